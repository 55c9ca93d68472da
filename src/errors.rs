/*!
 * Error types for the xliffsync application.
 *
 * This module contains custom error types for the different layers of a
 * synchronization pass, using the thiserror crate for ergonomic error definitions.
 */

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when loading or saving a localization document
#[derive(Error, Debug)]
pub enum DocumentError {
    /// No document exists at the expected location
    #[error("Document not found: {}", path.display())]
    NotFound {
        /// Path that was looked up
        path: PathBuf,
    },

    /// The document content is not well-formed XML
    #[error("Failed to parse document {}: {message}", path.display())]
    Parse {
        /// Path of the offending document
        path: PathBuf,
        /// Parser message
        message: String,
    },

    /// Reading or writing the document failed
    #[error("I/O error on {}: {message}", path.display())]
    Io {
        /// Path of the document
        path: PathBuf,
        /// Underlying error message
        message: String,
    },
}

impl DocumentError {
    /// Whether this error only affects loading, so the language can be skipped
    pub fn is_load_failure(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::Parse { .. })
    }
}

/// Errors raised while mutating a single translation unit
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UnitError {
    /// The unit has no `<note>` element to hold the context description
    #[error("Translation unit '{id}' has no note element")]
    Malformed {
        /// Identifier of the unit
        id: String,
    },

    /// The unit handle was not issued by this document
    #[error("No translation unit #{index} in this document")]
    UnknownUnit {
        /// Position of the handle in its own document
        index: usize,
    },
}

/// Errors from the external localization export tool
#[derive(Error, Debug)]
pub enum ExportError {
    /// The tool could not be started
    #[error("Failed to launch {tool}: {message}")]
    Spawn {
        /// Program name
        tool: String,
        /// Underlying error message
        message: String,
    },

    /// The tool ran but reported failure
    #[error("{tool} exited with status {status}: {stderr}")]
    Failed {
        /// Program name
        tool: String,
        /// Exit status as reported by the OS
        status: String,
        /// Captured standard error
        stderr: String,
    },
}
