//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::ApiError;

/// Map domain/service errors to a string for CLI output.
pub fn map_error(e: &ApiError) -> String {
    match e.status() {
        Some(status) => format!("{} ({}, status {})", e, e.kind(), status),
        None => format!("{} ({})", e, e.kind()),
    }
}
