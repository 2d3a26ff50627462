//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::FlattenError;

/// Map domain errors to a string for CLI output.
pub fn map_error(e: &FlattenError) -> String {
    match e {
        FlattenError::Validation { .. } => format!("Validation failed: {}", e),
        _ => format!("Error: {}", e),
    }
}
