use mock_server::MockConduit;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;

    let mut server = MockConduit::with_defaults();
    if let Ok(token) = std::env::var("CONDUIT_API_TOKEN") {
        server = server.require_token(&token);
    }
    println!("mock conduit listening on {addr}");
    server.run(listener).await
}
