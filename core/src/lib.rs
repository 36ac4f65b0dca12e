//! Typed client core for the Conduit API of Phabricator-style servers.
//!
//! # Overview
//! Builds `HttpRequest` values for named Conduit methods and parses
//! `HttpResponse` values back into typed results (host-does-IO pattern). A
//! `Transport` performs the round-trip in between; `UreqTransport` is the
//! default one.
//!
//! # Design
//! - `ConduitClient` is stateless: a host plus immutable `ClientOptions`.
//! - Every response goes through one classifier that turns HTTP error
//!   statuses and envelope `error_code`s into `ConduitError`, and a missing
//!   `result` key into `Error::MissingResults`.
//! - Fields whose wire shape varies (`SearchOrder`, `BoardAttachment`) are
//!   enums or dual-slot structs with hand-written serde impls that try each
//!   shape in a fixed order.
//! - No retries, caching or pagination loops; callers own those policies.

pub mod client;
pub mod columns;
pub mod endpoint;
pub mod entities;
pub mod envelope;
pub mod epoch;
pub mod error;
pub mod http;
pub mod options;
pub mod order;
pub mod requests;
pub mod responses;
pub mod transport;

pub use client::{invoke, ConduitClient};
pub use columns::{BoardAttachment, BoardColumns, Column};
pub use endpoint::endpoint_url;
pub use epoch::Epoch;
pub use error::{ConduitError, Error, Result, TransportError};
pub use http::{HttpRequest, HttpResponse};
pub use options::ClientOptions;
pub use order::{BuiltinOrder, SearchOrder};
pub use transport::{Transport, UreqTransport};
