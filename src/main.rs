//! Composition root.
//!
//! Loads configuration, builds the relay and its routing table once, and
//! runs the server until a shutdown signal drains it.

use std::sync::Arc;

use tracing::error;
use tracing_subscriber::EnvFilter;

use wxrelay::{Config, Relay, Server, routes};

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("configuration error: {e}");
            std::process::exit(1);
        }
    };

    let addr = config.listen_addr.clone();
    let app = routes(Arc::new(Relay::new(config)));

    let server = match Server::bind(&addr) {
        Ok(server) => server,
        Err(e) => {
            error!("{e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = server.serve(app).await {
        error!("server error: {e}");
        std::process::exit(1);
    }
}
