//! Console logging for the binary.
//!
//! Records go to stderr so they never mix with the prompts on stdout. The
//! level comes from `RUST_LOG` and defaults to [`DEFAULT_SPEC`], which keeps
//! a normal run silent.

use flexi_logger::{FlexiLoggerError, Logger, LoggerHandle};

pub const DEFAULT_SPEC: &str = "warn";

/// Starts the logger. Keep the returned handle alive until exit.
pub fn init() -> Result<LoggerHandle, FlexiLoggerError> {
    Logger::try_with_env_or_str(DEFAULT_SPEC)?
        .log_to_stderr()
        .start()
}
