//! Unix timestamps as Conduit sends them: whole seconds in a bare integer.

use chrono::{DateTime, Utc};
use serde::{ser::Error as _, Deserialize, Deserializer, Serialize, Serializer};

/// Seconds since the Unix epoch.
///
/// Values are stored verbatim; no range or timezone checks are made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Epoch(pub i64);

impl Epoch {
    pub fn seconds(self) -> i64 {
        self.0
    }

    /// `None` when the value is outside chrono's representable range.
    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.0, 0)
    }
}

impl From<i64> for Epoch {
    fn from(seconds: i64) -> Self {
        Epoch(seconds)
    }
}

impl From<DateTime<Utc>> for Epoch {
    fn from(time: DateTime<Utc>) -> Self {
        Epoch(time.timestamp())
    }
}

impl Serialize for Epoch {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.0)
    }
}

impl<'de> Deserialize<'de> for Epoch {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        i64::deserialize(deserializer).map(Epoch)
    }
}

/// `serialize_with` helper for `Option<Epoch>` fields.
///
/// An absent timestamp cannot be encoded: pair this with
/// `skip_serializing_if = "Option::is_none"` so that `None` omits the field
/// instead of reaching here.
pub fn serialize_required<S: Serializer>(
    epoch: &Option<Epoch>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match epoch {
        Some(epoch) => epoch.serialize(serializer),
        None => Err(S::Error::custom(
            "cannot encode an absent epoch; omit the field instead",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Serialize)]
    struct Strict {
        #[serde(serialize_with = "serialize_required")]
        at: Option<Epoch>,
    }

    #[derive(Serialize)]
    struct Omitting {
        #[serde(
            skip_serializing_if = "Option::is_none",
            serialize_with = "serialize_required"
        )]
        at: Option<Epoch>,
    }

    #[test]
    fn encodes_as_bare_integer() {
        assert_eq!(serde_json::to_string(&Epoch(1700000000)).unwrap(), "1700000000");
    }

    #[test]
    fn decodes_negative_and_large_values_verbatim() {
        let epoch: Epoch = serde_json::from_str("-86400").unwrap();
        assert_eq!(epoch, Epoch(-86400));
        let epoch: Epoch = serde_json::from_str("9223372036854775807").unwrap();
        assert_eq!(epoch.seconds(), i64::MAX);
    }

    #[test]
    fn rejects_non_integer() {
        assert!(serde_json::from_str::<Epoch>(r#""1700000000""#).is_err());
        assert!(serde_json::from_str::<Epoch>("null").is_err());
    }

    #[test]
    fn encoding_absent_epoch_fails() {
        let err = serde_json::to_string(&Strict { at: None }).unwrap_err();
        assert!(err.to_string().contains("absent epoch"));
    }

    #[test]
    fn present_epoch_through_strict_helper() {
        let value = serde_json::to_value(Strict { at: Some(Epoch(42)) }).unwrap();
        assert_eq!(value, json!({"at": 42}));
    }

    #[test]
    fn absent_epoch_is_omitted_when_skipped() {
        let value = serde_json::to_value(Omitting { at: None }).unwrap();
        assert_eq!(value, json!({}));
    }

    #[test]
    fn chrono_conversion() {
        let time = DateTime::from_timestamp(1700000000, 0).unwrap();
        let epoch = Epoch::from(time);
        assert_eq!(epoch, Epoch(1700000000));
        assert_eq!(epoch.to_datetime(), Some(time));
    }
}
