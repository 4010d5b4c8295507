//! parklot - drive a parking lot from the command line
//!
//! Builds one lot from config, env and flags, runs the scripted park/unpark
//! operations against it and renders what the lot reports.

mod cli;
mod display;
mod error;
mod events;
mod logging;

use crate::cli::{Cli, GlobalArgs, LotOp};
use crate::display::OutputRenderer;
use crate::error::CliError;
use crate::events::NoticeBoard;
use clap::Parser;
use parklot_config::{Config, LoggingConfig};
use parklot_errors::LotError;
use parklot_events::EventReceiver;
use parklot_lot::{LotObserver, ParkingLot};
use parklot_types::{Car, OutputFormat};
use std::collections::HashMap;
use std::process;
use std::sync::Arc;
use tracing::{debug, error, info};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // No subscriber exists until the logging config is known
    let config = match load_config(&cli.global).await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(2);
        }
    };
    init_tracing(&config.logging, cli.global.debug);

    match run(cli, config) {
        Ok(0) => {}
        Ok(rejected) => {
            debug!(rejected, "finished with rejected operations");
            process::exit(1);
        }
        Err(e) => {
            error!("Application error: {}", e);
            eprintln!("Error: {e}");
            process::exit(2);
        }
    }
}

/// Load configuration with proper precedence:
/// 1. Start with file config (or defaults)
/// 2. Merge environment variables
/// 3. Apply CLI flags (highest precedence)
async fn load_config(global: &GlobalArgs) -> Result<Config, CliError> {
    let mut config = Config::load_or_default(global.config.as_deref()).await?;
    config.merge_env()?;
    apply_cli_config(&mut config, global)?;
    config.validate()?;
    Ok(config)
}

/// Main application logic. Returns the number of rejected operations.
fn run(cli: Cli, config: Config) -> Result<usize, CliError> {
    let format = cli.global.output_format();
    info!("Starting parklot v{}", env!("CARGO_PKG_VERSION"));

    let (event_sender, mut event_receiver) = parklot_events::channel();
    let notices = Arc::new(NoticeBoard::new(
        config.lot.name.clone(),
        format == OutputFormat::Plain,
    ));
    let mut lot: ParkingLot<Car> = ParkingLot::new(config.lot.capacity()?)
        .with_name(config.lot.name.clone())
        .with_event_sender(event_sender);
    let _ = lot.add_observer(Arc::clone(&notices) as Arc<dyn LotObserver>);

    let renderer = OutputRenderer::new(format);
    let mut garage: HashMap<String, Car> = HashMap::new();
    let mut rejected = 0;

    render_pending(&renderer, &mut event_receiver)?;
    for op in cli.ops {
        let car = garage
            .entry(op.label().to_string())
            .or_insert_with(|| Car::with_plate(op.label()));
        let result = match &op {
            LotOp::Park(_) => lot.park(car.clone()).map_err(LotError::from),
            LotOp::Unpark(_) => lot.unpark(car).map(|_| ()),
        };
        if let Err(e) = result {
            debug!(op = %op, error = %e, "operation rejected");
            rejected += 1;
        }
        render_pending(&renderer, &mut event_receiver)?;
    }

    renderer.render_summary(&lot, &notices)?;
    info!(rejected, "Run completed");
    Ok(rejected)
}

/// Render everything the lot has emitted so far
fn render_pending(
    renderer: &OutputRenderer,
    receiver: &mut EventReceiver,
) -> Result<(), CliError> {
    while let Ok(message) = receiver.try_recv() {
        logging::log_event_with_tracing(&message);
        renderer.render_event(&message)?;
    }
    Ok(())
}

/// Apply CLI configuration overrides
fn apply_cli_config(config: &mut Config, global: &GlobalArgs) -> Result<(), CliError> {
    if let Some(capacity) = global.capacity {
        if capacity == 0 {
            return Err(CliError::InvalidArguments(
                "--capacity must be at least 1".to_string(),
            ));
        }
        config.lot.capacity = capacity;
    }
    if let Some(name) = &global.name {
        config.lot.name.clone_from(name);
    }
    if global.debug {
        config.logging.level = "debug".to_string();
    }
    if global.json {
        config.logging.json = true;
    }
    Ok(())
}

/// Initialize tracing/logging
///
/// Logs always go to stderr so they never mix with rendered output on stdout.
fn init_tracing(logging: &LoggingConfig, debug_enabled_flag: bool) {
    let fallback = if debug_enabled_flag {
        "debug,parklot=debug,parklot_lot=debug".to_string()
    } else {
        logging.level.clone()
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback));

    if logging.json {
        tracing_subscriber::fmt()
            .json()
            .with_writer(std::io::stderr)
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(filter)
            .init();
    }
}
