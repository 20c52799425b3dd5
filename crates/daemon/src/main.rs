// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! NG procedure daemon (ngpd)
//!
//! Runs the AMF connection procedure until it settles or a signal arrives,
//! then prints a JSON report on stdout.

use std::path::PathBuf;

use clap::Parser;
use ngp_daemon::{write_startup_marker, Config, Daemon, LifecycleError};
use tokio::signal::unix::{signal, SignalKind};
use tokio::time::MissedTickBehavior;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "ngpd", version, about = "NG control-plane procedure daemon")]
struct Args {
    /// Path to the TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    let log_path = config.log_path()?;
    write_startup_marker(&log_path)?;
    let _log_guard = setup_logging(&log_path)?;

    let mut daemon = match Daemon::startup(&config) {
        Ok(d) => d,
        Err(e) => {
            error!("Failed to start daemon: {}", e);
            return Err(e.into());
        }
    };

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    let mut ticker = tokio::time::interval(daemon.tick_length());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    info!(amf = %config.amf(), "Daemon ready");
    println!("READY");

    loop {
        tokio::select! {
            Some(reply) = daemon.inbound.recv() => {
                daemon.deliver(reply);
            }

            _ = ticker.tick() => {
                daemon.tick();
            }

            _ = sigterm.recv() => {
                info!("Received SIGTERM, shutting down...");
                break;
            }

            _ = sigint.recv() => {
                info!("Received SIGINT, shutting down...");
                break;
            }
        }

        if config.exit_when_settled && daemon.settled() {
            info!("AMF connection settled, shutting down...");
            break;
        }
    }

    let report = daemon.shutdown();
    println!("{}", serde_json::to_string(&report)?);
    Ok(())
}

fn setup_logging(
    log_path: &std::path::Path,
) -> Result<tracing_appender::non_blocking::WorkerGuard, LifecycleError> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let file_appender = tracing_appender::rolling::never(
        log_path.parent().ok_or(LifecycleError::NoStateDir)?,
        log_path.file_name().ok_or(LifecycleError::NoStateDir)?,
    );
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(non_blocking))
        .init();

    Ok(guard)
}
