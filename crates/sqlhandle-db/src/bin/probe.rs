//! # Connection Probe
//!
//! Connects with settings from the environment, shows what the sanitizers
//! do to some text, and disconnects.
//!
//! ## Usage
//! ```bash
//! # Default descriptor (user:password@tcp(localhost)/database), lazy connect
//! cargo run -p sqlhandle-db --features probe --bin probe
//!
//! # Real server, verified, custom text
//! SQLHANDLE_HOST=db:3306 SQLHANDLE_VERIFY=1 \
//!     cargo run -p sqlhandle-db --features probe --bin probe -- "<h1>O'Brien</h1>"
//! ```
//!
//! Log level follows `RUST_LOG` (default `info`).

use std::env;

use sqlhandle_db::{DbConfig, MySqlDatabase};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const SAMPLE_INPUT: &str = "user' OR '1'='1";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let text = env::args()
        .nth(1)
        .unwrap_or_else(|| SAMPLE_INPUT.to_string());

    let config = DbConfig::from_env()?;
    info!(config = ?config, "Configuration loaded");

    let mut db = MySqlDatabase::new(config);

    if let Err(err) = db.connect().await {
        error!(error = %err, "Failed to connect to the database");
        return Err(err.into());
    }

    println!("Connected:        {}", db.is_connected());
    println!("Server reachable: {}", db.health_check().await);
    println!("Sanitized input:  {}", db.sanitize_input(&text));
    println!("Sanitized output: {}", db.sanitize_output(&text));

    db.disconnect().await?;
    info!("Done");

    Ok(())
}
