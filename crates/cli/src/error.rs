//! CLI exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that scripts can use to distinguish error types.
//! - Map `ConfigError` variants to appropriate exit codes.
//!
//! Does NOT handle:
//! - Error message formatting (handled by anyhow Display).
//!
//! Invariants:
//! - Exit codes 1-9 are reserved for specific error categories.

use iniconf::ConfigError;

/// Structured exit codes for iniconf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success - command completed successfully.
    Success = 0,

    /// General error - unhandled or generic failure.
    GeneralError = 1,

    /// Key or section not found.
    ///
    /// Scripts should check the key spelling or fall back to a default.
    NotFound = 4,

    /// Validation error - malformed document, unconvertible value, empty key.
    ///
    /// Scripts should fix the input and not retry.
    ValidationError = 5,

    /// I/O error - the document or a save target could not be read or written.
    IoError = 6,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }
}

impl From<&ConfigError> for ExitCode {
    fn from(err: &ConfigError) -> Self {
        match err {
            ConfigError::KeyNotFound { .. } | ConfigError::SectionNotFound(_) => {
                ExitCode::NotFound
            }

            ConfigError::Syntax { .. }
            | ConfigError::EmptyInput
            | ConfigError::Conversion { .. }
            | ConfigError::EmptyKey
            | ConfigError::InvalidValue { .. } => ExitCode::ValidationError,

            ConfigError::Io { .. } => ExitCode::IoError,

            // Absorbed by the include resolver; never reaches a command.
            ConfigError::IncludeCycle { .. } => ExitCode::GeneralError,
        }
    }
}

/// Extension trait for anyhow::Error to extract exit codes.
pub trait ExitCodeExt {
    /// Extract the appropriate exit code from this error.
    ///
    /// Returns ExitCode::GeneralError if no `ConfigError` is in the chain.
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        self.chain()
            .find_map(|cause| cause.downcast_ref::<ConfigError>())
            .map(ExitCode::from)
            .unwrap_or(ExitCode::GeneralError)
    }
}
