//! CLI output: error mapping from domain errors to the CLI surface.

use crate::error::ApiError;

/// Map errors to the single line printed on stderr before exiting.
pub fn map_error(e: &ApiError) -> String {
    match e {
        ApiError::Io(io) => format!("treefs: {}", io),
        other => format!("treefs: {}", other),
    }
}
