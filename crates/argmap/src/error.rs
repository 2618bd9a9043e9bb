//! Error types for argmap operations.
//!
//! This module provides the main error type [`ArgmapError`] which wraps
//! the error conditions of parsing, graph editing and layout.

use std::io;

use thiserror::Error;

use argmap_core::GraphError;
use argmap_parser::ParseError;

/// The main error type for argmap operations.
///
/// The `Parse` variant keeps the script next to the diagnostics so that
/// callers can render labelled source snippets.
#[derive(Debug, Error)]
pub enum ArgmapError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("Layout error: {0}")]
    Layout(String),
}

impl ArgmapError {
    /// Create a new `Parse` error with the associated script.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
