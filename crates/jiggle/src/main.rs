//! jiggle binary entry point.
//!
//! ```text
//! main()
//!  └─ Cli::try_parse()          -- exit 2 on bad arguments, 0 on --help
//!  └─ --tutorial                -- print and exit 0
//!  └─ load_tuning()             -- exit 2 on a bad tuning file
//!  └─ build_driver()            -- native, or dry-run
//!  └─ spawn_stop_listener()     -- Ctrl-C / SIGTERM raise the stop signal
//!  └─ CycleScheduler::run()     -- exit 0 on deadline or signal, 1 on failure
//! ```
//!
//! Logs go to stderr so that dry-run output on stdout stays clean.

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use jiggle::application::cursor::CursorDriver;
use jiggle::application::run_cycles::{CycleScheduler, Deadline, StopReason};
use jiggle::application::stop::StopSignal;
use jiggle::cli::{Cli, RunConfig, EXIT_OK, EXIT_RUNTIME, EXIT_USAGE, TUTORIAL};
use jiggle::infrastructure::cursor_driver::{native_driver, permission_hint, DryRunDriver};
use jiggle::infrastructure::signals::spawn_stop_listener;
use jiggle::infrastructure::tuning_file::load_tuning;
use jiggle_core::{ScreenBounds, Tuning};

/// Screen assumed by a dry run when the real one cannot be queried.
const FALLBACK_SCREEN: ScreenBounds = ScreenBounds::new(1920, 1080);

#[tokio::main]
async fn main() -> ExitCode {
    // ── Logging setup ─────────────────────────────────────────────────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    // ── Parse CLI arguments ───────────────────────────────────────────────────
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Prints help/version to stdout and usage errors to stderr.
            let _ = e.print();
            return exit_code(e.exit_code());
        }
    };
    let config = cli.into_run_config();

    if config.tutorial {
        println!("{TUTORIAL}");
        return exit_code(EXIT_OK);
    }

    let tuning = match load_tuning(config.config.as_deref()) {
        Ok(tuning) => tuning,
        Err(e) => {
            error!("{e}");
            eprintln!("error: {e}");
            return exit_code(EXIT_USAGE);
        }
    };

    match run(config, tuning).await {
        Ok(reason) => {
            println!("jiggle {reason}");
            exit_code(EXIT_OK)
        }
        Err(e) => {
            error!("{e:#}");
            eprintln!("error: {e:#}");
            if let Some(hint) = permission_hint() {
                eprintln!("hint: {hint}");
            }
            exit_code(EXIT_RUNTIME)
        }
    }
}

/// Runs the scheduler until the deadline, a stop signal or a failure.
async fn run(config: RunConfig, tuning: Tuning) -> anyhow::Result<StopReason> {
    let driver = build_driver(&config)?;

    let stop = StopSignal::new();
    let _listener = spawn_stop_listener(stop.clone());

    log_banner(&config);

    let mut scheduler =
        CycleScheduler::new(driver, tuning, StdRng::seed_from_u64(config.seed), stop)
            .with_deadline(Deadline::from_minutes(config.minutes))
            .with_fixed_pause(config.interval);

    let reason = scheduler.run().await.context("cursor control failed")?;
    info!(cycles = scheduler.cycles_completed(), "jiggle {reason}");
    Ok(reason)
}

/// The native driver, or a dry-run driver seeded from the real cursor and
/// screen when they can be read.
fn build_driver(config: &RunConfig) -> anyhow::Result<Arc<dyn CursorDriver>> {
    if !config.dry_run {
        return native_driver().context("failed to initialise the cursor driver");
    }

    let probed = native_driver()
        .ok()
        .and_then(|d| Some((d.cursor_position().ok()?, d.screen_size().ok()?)));
    let (start, bounds) = probed.unwrap_or_else(|| {
        warn!(
            screen = %FALLBACK_SCREEN,
            "cannot read the real cursor; dry run starts from the centre of a simulated screen"
        );
        (FALLBACK_SCREEN.center(), FALLBACK_SCREEN)
    });
    Ok(Arc::new(DryRunDriver::new(start, bounds)))
}

fn log_banner(config: &RunConfig) {
    let interval = config
        .interval
        .map(|i| format!("{}s", i.as_secs()))
        .unwrap_or_else(|| "random".to_string());
    info!(
        minutes = config.minutes,
        interval = %interval,
        dry_run = config.dry_run,
        seed = config.seed,
        "jiggle started"
    );

    if config.minutes > 0 {
        let stop_at = i64::try_from(config.minutes)
            .ok()
            .and_then(chrono::TimeDelta::try_minutes)
            .and_then(|d| chrono::Local::now().checked_add_signed(d));
        if let Some(stop_at) = stop_at {
            info!("jiggle will stop at {}", stop_at.to_rfc3339());
        }
    }
    info!("press Ctrl+C to stop");
}

fn exit_code(code: i32) -> ExitCode {
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}
