//! Process environment setup that must run before argument parsing.
//!
//! Responsibilities:
//! - Load `.env` from the working directory unless `DOTENV_DISABLED` is set.
//! - Resolve the default document path from the platform config directory.
//!
//! Invariants:
//! - `load_dotenv()` is called BEFORE CLI parsing so clap `env` defaults and
//!   `${NAME}` expressions in documents can read `.env` values.
//! - `DOTENV_DISABLED` set to "true" or "1" disables loading.

use std::path::PathBuf;

use directories::ProjectDirs;
use thiserror::Error;

/// Name of the default document inside the platform config directory.
pub const DEFAULT_FILE_NAME: &str = "config.ini";

#[derive(Debug, Error)]
pub enum DotenvError {
    #[error("failed to parse .env file at line {error_index}")]
    Parse { error_index: usize },

    #[error("failed to read .env file: {kind}")]
    Io { kind: std::io::ErrorKind },

    #[error("failed to load .env file")]
    Unknown,
}

fn dotenv_disabled() -> bool {
    matches!(
        std::env::var("DOTENV_DISABLED").ok().as_deref(),
        Some("true") | Some("1")
    )
}

fn is_not_found(err: &dotenvy::Error) -> bool {
    matches!(err, dotenvy::Error::Io(io) if io.kind() == std::io::ErrorKind::NotFound)
}

/// Load `.env` into the process environment. A missing file is not an error.
pub fn load_dotenv() -> Result<(), DotenvError> {
    if dotenv_disabled() {
        return Ok(());
    }

    match dotenvy::dotenv() {
        Ok(path) => {
            tracing::debug!(path = %path.display(), "Loaded .env file");
            Ok(())
        }
        Err(e) if is_not_found(&e) => Ok(()),
        Err(dotenvy::Error::LineParse(_, idx)) => Err(DotenvError::Parse { error_index: idx }),
        Err(dotenvy::Error::Io(io_err)) => Err(DotenvError::Io {
            kind: io_err.kind(),
        }),
        Err(_) => Err(DotenvError::Unknown),
    }
}

/// `config.ini` in the platform config directory, if one can be determined.
pub fn default_document_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "iniconf").map(|dirs| dirs.config_dir().join(DEFAULT_FILE_NAME))
}
