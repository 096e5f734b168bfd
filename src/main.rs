// Ski Resort Simulator - Main Entry Point
//
// You can run it via Cargo:
//
// ```console
// $ cargo build --release
// $ ./target/release/ski-resort-simulator
// ```
//
// Or with custom configuration:
//
// ```console
// $ ./target/release/ski-resort-simulator --config resort.json --skier-count 200 --duration 120 --verbose
// ```

use anyhow::Context;
use clap::Parser;
use ski_resort_simulator::simulation::{
    LoggingConfig, LoggingGuard, ResortSnapshot, SimulationError, SimulationOrchestrator,
};
use ski_resort_simulator::types::{CliArgs, ResortConfig};
use std::process;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{error, info, warn, Level};

#[tokio::main]
async fn main() {
    // Parse CLI arguments first to check for special flags
    let args = CliArgs::parse();

    // Handle special CLI flags that don't require full initialization
    if args.print_config {
        match ResortConfig::default().print_json() {
            Ok(json) => {
                println!("{}", json);
                return;
            }
            Err(e) => {
                eprintln!("Failed to serialize default configuration: {}", e);
                process::exit(1);
            }
        }
    }

    let _logging = match init_logging(&args) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            process::exit(1);
        }
    };

    info!("Starting Ski Resort Simulator");

    if let Err(e) = run(args).await {
        let category = e.downcast_ref::<SimulationError>().map_or("Runtime", |e| e.category());
        error!(category, "Simulation failed: {:#}", e);
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }

    info!("Ski Resort Simulator completed successfully");
}

/// Initialize logging based on CLI flags
fn init_logging(
    args: &CliArgs,
) -> Result<LoggingGuard, Box<dyn std::error::Error + Send + Sync>> {
    let mut logging = if args.debug {
        LoggingConfig::new().with_level(Level::DEBUG).with_span_events()
    } else if args.verbose {
        LoggingConfig::new().with_level(Level::INFO)
    } else {
        // Default: minimal logging so the snapshot report stays readable
        LoggingConfig::new().with_level(Level::WARN)
    };

    if args.json {
        logging = logging.with_json_format();
    }
    if let Some(dir) = &args.log_dir {
        logging = logging.with_file_logging(dir.clone());
    }

    logging.init()
}

/// Load the configuration, then run the simulation until the run duration
/// elapses or Ctrl-C is pressed
async fn run(args: CliArgs) -> anyhow::Result<()> {
    let json_output = args.json;
    let dry_run = args.dry_run;

    let config = ResortConfig::from_cli_args(args).map_err(SimulationError::from)?;
    config.validate().map_err(SimulationError::from)?;
    info!("Configuration loaded and validated successfully");

    let orchestrator = SimulationOrchestrator::new(config.clone())
        .context("Failed to build the resort")?;

    if dry_run {
        eprintln!("Configuration validation successful!");
        eprintln!("Dry run mode - simulation will not be executed.");
        print_configuration_summary(&config);
        return Ok(());
    }

    print_startup_banner(&config);

    let simulation = orchestrator.start().context("Failed to start the simulation")?;
    let reporter = tokio::spawn(report_snapshots(simulation.subscribe(), json_output));

    match config.run_duration {
        Some(secs) => {
            tokio::select! {
                _ = tokio::time::sleep(Duration::from_secs(secs)) => {
                    info!("Run duration of {} seconds elapsed", secs);
                }
                result = tokio::signal::ctrl_c() => {
                    result.context("Failed to listen for Ctrl-C")?;
                    info!("Interrupted");
                }
            }
        }
        None => {
            tokio::signal::ctrl_c().await.context("Failed to listen for Ctrl-C")?;
            info!("Interrupted");
        }
    }

    let statistics = simulation.shutdown().await.context("Shutdown failed")?;
    if let Err(e) = reporter.await {
        warn!("Snapshot reporter ended abnormally: {}", e);
    }

    if !statistics.is_conserved() {
        warn!("Final skier count does not match the configured number of skiers");
    }
    eprintln!("{}", statistics.generate_summary_output());

    Ok(())
}

/// Print every published snapshot until the publisher goes away
async fn report_snapshots(mut snapshots: watch::Receiver<Arc<ResortSnapshot>>, json: bool) {
    while snapshots.changed().await.is_ok() {
        let snapshot = Arc::clone(&snapshots.borrow_and_update());
        if json {
            match serde_json::to_string(snapshot.as_ref()) {
                Ok(line) => println!("{}", line),
                Err(e) => warn!("Failed to serialize snapshot: {}", e),
            }
        } else {
            println!("{}\n", snapshot);
        }
    }
}

/// Print startup banner and configuration summary
fn print_startup_banner(config: &ResortConfig) {
    eprintln!("Ski Resort Simulator");
    eprintln!("====================");
    eprintln!("Skiers, lifts and descent routes running concurrently");
    eprintln!();

    print_configuration_summary(config);
}

/// Print configuration summary
fn print_configuration_summary(config: &ResortConfig) {
    eprintln!("Configuration:");
    eprintln!("  Stations: {}", config.stations.len());
    for station in &config.stations {
        eprintln!(
            "    {} ({})",
            station.name,
            station.station_type.as_deref().unwrap_or("untyped")
        );
    }
    eprintln!("  Routes: {}", config.routes.len());
    eprintln!("  Lifts: {}", config.lifts.len());
    for lift in config.effective_lifts() {
        eprintln!(
            "    {} on {}: capacity {}, ride {}s, group {}, maintenance every {}s for {}s",
            lift.name,
            lift.route,
            lift.capacity,
            lift.interval,
            lift.boarding_group_size,
            lift.maintenance_time,
            lift.maintenance_duration
        );
    }
    eprintln!("  Skiers: {}", config.skier_count);
    eprintln!("  Boarding Interval: {}s", config.global_boarding_interval);
    eprintln!("  Snapshot Interval: {}s", config.snapshot_interval);
    if let Some(start) = &config.start_station {
        eprintln!("  Start Station: {}", start);
    }
    match config.run_duration {
        Some(secs) => eprintln!("  Run Duration: {}s", secs),
        None => eprintln!("  Run Duration: until Ctrl-C"),
    }
    if let Some(seed) = config.seed {
        eprintln!("  Random Seed: {}", seed);
    }
    eprintln!();
}
