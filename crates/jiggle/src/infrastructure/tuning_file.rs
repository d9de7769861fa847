//! Optional TOML file of tuning overrides.
//!
//! Every field is optional; anything the file leaves out keeps its built-in
//! default.  Example:
//!
//! ```toml
//! [motion]
//! margin = 24
//! steps = { min = 25, max = 50 }
//!
//! [scroll]
//! probability = 0.3
//!
//! [[pause.tiers]]
//! weight = 1.0
//! ms = { min = 20000, max = 40000 }
//! ```
//!
//! The file is only ever read.  Nothing is written back, so a run leaves no
//! state behind.

use std::path::{Path, PathBuf};

use jiggle_core::{Tuning, TuningError};
use thiserror::Error;
use tracing::info;

/// Error type for loading a tuning file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("I/O error reading tuning file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed into [`Tuning`].
    #[error("failed to parse tuning file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// The file parsed but describes unusable distributions.
    #[error("invalid tuning in {path}: {source}")]
    Invalid {
        path: PathBuf,
        #[source]
        source: TuningError,
    },
}

/// Loads tuning from `path`, or returns the validated defaults when no path
/// is given.
///
/// Unlike an implicit config location, an explicitly named file that does
/// not exist is an error.
///
/// # Errors
///
/// [`ConfigError::Io`] if the file cannot be read, [`ConfigError::Parse`] if
/// it is not valid TOML for [`Tuning`], [`ConfigError::Invalid`] if the
/// result fails [`Tuning::validate`].
pub fn load_tuning(path: Option<&Path>) -> Result<Tuning, ConfigError> {
    let Some(path) = path else {
        return Ok(Tuning::default());
    };
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let tuning = parse_tuning(&content, path)?;
    info!(path = %path.display(), "loaded tuning overrides");
    Ok(tuning)
}

/// Parses and validates tuning text.  `origin` is only used in errors.
///
/// # Errors
///
/// See [`load_tuning`].
pub fn parse_tuning(content: &str, origin: &Path) -> Result<Tuning, ConfigError> {
    let tuning: Tuning = toml::from_str(content).map_err(|source| ConfigError::Parse {
        path: origin.to_path_buf(),
        source,
    })?;
    tuning.validate().map_err(|source| ConfigError::Invalid {
        path: origin.to_path_buf(),
        source,
    })?;
    Ok(tuning)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
