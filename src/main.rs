//! ircrelay - announce one repository event on IRC.
//!
//! Usage: `ircrelay <config.toml> <event-kind> <payload.json>`
//!
//! The session transcript is printed to stdout once the session ends,
//! whether or not delivery succeeded.

use std::process::ExitCode;

use anyhow::Context;
use ircrelay::{Config, EventKind, Notification, Relay};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: ircrelay <config.toml> <event-kind> <payload.json>";

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let [config_path, kind, payload_path] = args.as_slice() else {
        eprintln!("{USAGE}");
        return Ok(ExitCode::from(2));
    };

    let config = Config::load(config_path).map_err(|e| {
        error!(path = %config_path, error = %e, "Failed to load config");
        e
    })?;
    let kind: EventKind = kind.parse()?;
    let payload = std::fs::read_to_string(payload_path)
        .with_context(|| format!("reading payload {payload_path}"))?;
    let payload = serde_json::from_str(&payload)
        .with_context(|| format!("parsing payload {payload_path}"))?;

    info!(
        host = %config.irc.host,
        channel = %config.irc.channel(),
        kind = %kind,
        "Starting delivery"
    );

    let relay = Relay::from_config(&config);
    match relay.deliver(&Notification::new(kind, payload)).await {
        Ok(delivery) => {
            println!("{}", delivery.transcript.snapshot());
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            if let Some(transcript) = e.transcript() {
                println!("{}", transcript.snapshot());
            }
            error!(error = %e, "Delivery failed");
            Ok(ExitCode::FAILURE)
        }
    }
}
