/*!
 * Error types for the qbank application.
 *
 * This module contains custom error types for different parts of the
 * application, using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

use crate::question_processor::DocumentGrammar;

/// Errors raised while extracting records from document text
#[derive(Error, Debug)]
pub enum ParseError {
    /// Non-empty input produced zero record boundaries. This signals a
    /// grammar/input mismatch rather than a document with zero questions;
    /// callers may report it and continue with an empty batch.
    #[error("No question records found under {grammar:?} grammar - wrong grammar or malformed input")]
    GrammarMismatch {
        /// Grammar the input was parsed under
        grammar: DocumentGrammar,
    },
}

/// Errors raised by structurally invalid question records
#[derive(Error, Debug)]
pub enum RecordError {
    /// The record's answer label names none of its own options. Such a
    /// record is rejected rather than silently formatted.
    #[error("Question {index}: answer label '{label}' is not among the record's options")]
    UnknownAnswerLabel {
        /// Record serial
        index: usize,
        /// Offending label
        label: char,
    },

    /// A dialogue line is empty after blank-slot resolution
    #[error("Question {index}: dialogue line is empty after resolution")]
    EmptyDialogue {
        /// Record serial
        index: usize,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from record extraction
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Error from an invalid record
    #[error("Record error: {0}")]
    Record(#[from] RecordError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
