use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// Skipped targets and failed mutations still exit with `Success`; only
/// conditions that prevent any work from being done are failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Run completed (including "nothing to do" and cancelled runs)
    Success = 0,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (tool missing, config unreadable, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Application-specific errors for override resolution.
///
/// `ToolMissing`, `ConfigNotFound` and `ConfigMalformed` abort the run.
/// The remaining variants describe failures of a single external-tool call
/// and are logged by the use case without stopping the run.
#[derive(Debug, Error)]
pub enum OverriderError {
    #[error("The package manager CLI '{program}' could not be started\nDetails: {details}\n\n💡 Hint: Please install it or add it to your PATH (or pass --dotnet <PATH>)")]
    ToolMissing { program: String, details: String },

    #[error("Config file not found: {path}\n\n💡 Hint: Create the file or point to it with --config <PATH>")]
    ConfigNotFound { path: PathBuf },

    #[error("Config file is not valid: {path}\nDetails: {details}\n\n💡 Hint: The file must be JSON with 'commonRoot', 'projectPaths' and 'overrides' properties")]
    ConfigMalformed { path: PathBuf, details: String },

    #[error("Command `{command}` failed: {details}")]
    CommandFailed { command: String, details: String },

    #[error("Command `{command}` timed out after {}s", timeout.as_secs())]
    CommandTimedOut { command: String, timeout: Duration },

    #[error("Failed to parse package report for {project}\nDetails: {details}")]
    ReportParseError { project: String, details: String },
}
