//! Error codes shared by every error type in the crate.

// =============================================================================
// ERROR CODES
// =============================================================================

/// Grepable error code and retryable flag for structured error output.
///
/// Nothing in the crate retries on its own; `retryable` only tells a caller
/// whether trying again by hand could help.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;

    fn retryable(&self) -> bool {
        false
    }
}

/// Render an error as `[CODE] message`, the shape the CLI prints to stderr.
pub fn describe(err: &(impl ErrorCode + ?Sized)) -> String {
    let hint = if err.retryable() { " (try again)" } else { "" };
    format!("[{}] {err}{hint}", err.error_code())
}
