//! Command-line interface.
//!
//! ```text
//! jiggle [MINUTES] [-m MINUTES] [-i SECONDS] [--seed N] [--dry-run] [--tutorial] [--config PATH]
//! ```
//!
//! `MINUTES` given positionally wins over `-m`.  Zero minutes means run until
//! stopped.  Without `-i` the pause between cycles is drawn from the tiered
//! distribution; with it, every pause is exactly that many seconds.

use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use clap::Parser;

/// Exit code for a normal stop: deadline, signal, tutorial or help.
pub const EXIT_OK: i32 = 0;
/// Exit code for a cursor failure during the run.
pub const EXIT_RUNTIME: i32 = 1;
/// Exit code for bad arguments or an unusable tuning file.
pub const EXIT_USAGE: i32 = 2;

const EXAMPLES: &str = "\
Examples:
  jiggle             # run forever
  jiggle 120         # run for 120 minutes
  jiggle -m 45       # run for 45 minutes
  jiggle -i 20       # move every 20 seconds
  jiggle --tutorial  # show quick tutorial commands";

/// Text printed by `--tutorial`.
pub const TUTORIAL: &str = "\
Tutorial commands (easy to memorize):
  1) Start now, run forever:
     jiggle
  2) Work for 2 hours:
     jiggle 120
  3) Lunch break cover (90 min):
     jiggle 90
  4) Fast anti-idle mode (move every 20s):
     jiggle -i 20
  5) Test without moving cursor:
     jiggle 5 --dry-run
  6) Reproduce a previous run exactly:
     jiggle --seed 42 --dry-run";

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(
    name = "jiggle",
    about = "Keeps the session awake by moving the cursor and scrolling like a person would",
    version,
    after_help = EXAMPLES
)]
pub struct Cli {
    /// Minutes to run; overrides -m.  0 runs until stopped.
    #[arg(value_name = "MINUTES")]
    pub minutes_positional: Option<u64>,

    /// Minutes to run.  0 runs until stopped.
    #[arg(short = 'm', long = "minutes", default_value_t = 0)]
    pub minutes: u64,

    /// Fixed number of seconds to pause between cycles instead of a random pause.
    #[arg(
        short = 'i',
        long = "interval",
        value_name = "SECONDS",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub interval: Option<u64>,

    /// Random seed; 0 picks one from the current time.
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Print actions instead of moving the cursor.
    #[arg(long)]
    pub dry_run: bool,

    /// Print quick usage examples and exit.
    #[arg(long)]
    pub tutorial: bool,

    /// TOML file with tuning overrides.
    #[arg(long, value_name = "PATH", env = "JIGGLE_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Resolved run settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// 0 means no deadline.
    pub minutes: u64,
    /// Fixed inter-cycle pause, if requested.
    pub interval: Option<Duration>,
    /// The seed actually used; never 0.
    pub seed: u64,
    pub dry_run: bool,
    pub tutorial: bool,
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Resolves precedence and defaults into a [`RunConfig`].
    pub fn into_run_config(self) -> RunConfig {
        RunConfig {
            minutes: self.minutes_positional.unwrap_or(self.minutes),
            interval: self.interval.map(Duration::from_secs),
            seed: if self.seed == 0 { time_seed() } else { self.seed },
            dry_run: self.dry_run,
            tutorial: self.tutorial,
            config: self.config,
        }
    }
}

/// A non-zero seed derived from the wall clock.
fn time_seed() -> u64 {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);
    nanos.max(1)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn test_defaults_run_forever_with_tiered_pause() {
        // Arrange: no arguments
        let cli = Cli::parse_from(["jiggle"]);

        // Act
        let cfg = cli.into_run_config();

        // Assert
        assert_eq!(cfg.minutes, 0);
        assert_eq!(cfg.interval, None);
        assert_ne!(cfg.seed, 0, "seed 0 must be replaced");
        assert!(!cfg.dry_run);
        assert!(!cfg.tutorial);
    }

    #[test]
    fn test_positional_minutes_override_flag() {
        let cfg = Cli::parse_from(["jiggle", "-m", "45", "120"]).into_run_config();

        assert_eq!(cfg.minutes, 120);
    }

    #[test]
    fn test_minutes_flag_alone() {
        let cfg = Cli::parse_from(["jiggle", "-m", "45"]).into_run_config();

        assert_eq!(cfg.minutes, 45);
    }

    #[test]
    fn test_positional_after_flags() {
        let cfg = Cli::parse_from(["jiggle", "--dry-run", "5"]).into_run_config();

        assert_eq!(cfg.minutes, 5);
        assert!(cfg.dry_run);
    }

    #[test]
    fn test_interval_becomes_fixed_pause() {
        let cfg = Cli::parse_from(["jiggle", "-i", "20"]).into_run_config();

        assert_eq!(cfg.interval, Some(Duration::from_secs(20)));
    }

    #[test]
    fn test_zero_interval_is_rejected() {
        let err = Cli::try_parse_from(["jiggle", "-i", "0"]).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn test_negative_minutes_are_rejected() {
        assert!(Cli::try_parse_from(["jiggle", "-m", "-5"]).is_err());
        assert!(Cli::try_parse_from(["jiggle", "abc"]).is_err());
    }

    #[test]
    fn test_too_many_positionals_are_rejected() {
        assert!(Cli::try_parse_from(["jiggle", "5", "6"]).is_err());
    }

    #[test]
    fn test_explicit_seed_is_kept() {
        let cfg = Cli::parse_from(["jiggle", "--seed", "42"]).into_run_config();

        assert_eq!(cfg.seed, 42);
    }

    #[test]
    fn test_tutorial_and_config_flags() {
        let cfg = Cli::parse_from(["jiggle", "--tutorial", "--config", "/tmp/t.toml"])
            .into_run_config();

        assert!(cfg.tutorial);
        assert_eq!(cfg.config, Some(PathBuf::from("/tmp/t.toml")));
    }

    #[test]
    fn test_help_is_reported_as_display_help() {
        let err = Cli::try_parse_from(["jiggle", "--help"]).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
        assert_eq!(err.exit_code(), EXIT_OK);
    }

    #[test]
    fn test_usage_errors_use_exit_code_two() {
        let err = Cli::try_parse_from(["jiggle", "--bogus"]).unwrap_err();

        assert_eq!(err.exit_code(), EXIT_USAGE);
    }

    #[test]
    fn test_command_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
