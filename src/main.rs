use clap::Parser;
use color_eyre::{eyre::eyre, Result};
use crosshair_controller::config::{AppConfig, TargetMode};
use crosshair_controller::frame_loop::FrameLoop;
use crosshair_controller::input::gamepad::{GamepadSampler, Sampling};
use crosshair_controller::network::{endpoint, UdpEmitter};
use crosshair_controller::setup::{setup, setup_logging};
use crosshair_controller::ui::{drawing::CanvasLayout, CrosshairApp};
use std::path::PathBuf;
use tracing::{info, warn};

const WINDOW_TITLE: &str = "Crosshair Controller";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a TOML config file
    #[arg(short, long, env = "CROSSHAIR_CONFIG")]
    config: Option<PathBuf>,

    /// Send to the lighting console instead of this machine
    #[arg(long)]
    production: bool,

    /// Destination UDP port
    #[arg(short, long)]
    port: Option<u16>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "LOG_LEVEL")]
    log_level: Option<String>,

    /// Write the default config file and exit
    #[arg(long)]
    init_config: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    setup()?;

    if args.init_config {
        setup_logging(args.log_level.as_deref().unwrap_or("info"))?;
        let path = AppConfig::write_default(args.config.as_deref())?;
        info!("Wrote default config to {}", path.display());
        return Ok(());
    }

    let config = load_config(&args)?;
    setup_logging(&config.log_level)?;
    info!("Starting {}", WINDOW_TITLE);

    let destination = endpoint::destination(&config.network);
    let emitter = UdpEmitter::bind(destination)?;
    let frame_loop = FrameLoop::new(&config, emitter);
    let gamepad = start_gamepad();

    let layout = CanvasLayout::from_config(&config);
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size(layout.window_size())
            .with_resizable(false),
        ..Default::default()
    };

    eframe::run_native(
        WINDOW_TITLE,
        native_options,
        Box::new(move |cc| Ok(Box::new(CrosshairApp::new(cc, &config, frame_loop, gamepad)))),
    )
    .map_err(|e| eyre!("Window closed with error: {}", e))?;

    info!("Shut down cleanly");
    Ok(())
}

/// Config file plus command line overrides
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = AppConfig::load(args.config.as_deref())?;
    if args.production {
        config.network.mode = TargetMode::Production;
    }
    if let Some(port) = args.port {
        config.network.port = port;
    }
    if let Some(level) = &args.log_level {
        config.log_level = level.clone();
    }
    config.validate()?;
    Ok(config)
}

fn start_gamepad() -> Option<GamepadSampler<Sampling>> {
    match GamepadSampler::create() {
        Ok(sampler) => Some(sampler.initialize()),
        Err(e) => {
            warn!("{}, continuing with keyboard and mouse only", e);
            None
        }
    }
}
