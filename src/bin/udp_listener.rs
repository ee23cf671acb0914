//! Prints every datagram arriving on the tracker port.

use clap::Parser;
use color_eyre::Result;
use crosshair_controller::config::AppConfig;
use crosshair_controller::network::DebugListener;
use crosshair_controller::setup::{setup, setup_logging};
use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a TOML config file
    #[arg(short, long, env = "CROSSHAIR_CONFIG")]
    config: Option<PathBuf>,

    /// UDP port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "LOG_LEVEL")]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    setup()?;

    let config = AppConfig::load(args.config.as_deref())?;
    setup_logging(args.log_level.as_deref().unwrap_or(&config.log_level))?;

    let port = args.port.unwrap_or(config.network.port);
    let listener = DebugListener::bind(SocketAddr::new(Ipv4Addr::UNSPECIFIED.into(), port)).await?;
    println!("Listening on UDP port {}...", port);

    let mut stdout = std::io::stdout();
    tokio::select! {
        result = listener.run(&mut stdout) => result?,
        signal = tokio::signal::ctrl_c() => {
            signal?;
            info!("Interrupted, stopping listener");
        }
    }

    Ok(())
}
