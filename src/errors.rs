/*!
 * Error types for the bangscan application.
 *
 * This module contains custom error types for different parts of the
 * application, using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors raised when configuration is rejected at the boundary
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The keyword stem is empty or blank
    #[error("Keyword must not be empty")]
    EmptyKeyword,

    /// The overlap threshold falls outside the meaningful range
    #[error("Overlap threshold must be within [0, 1], got {0}")]
    InvalidOverlapThreshold(f64),

    /// The keyword could not be compiled into a match pattern
    #[error("Failed to build keyword pattern: {0}")]
    InvalidKeywordPattern(String),
}

/// Errors that can occur when reading or writing bang reports
#[derive(Error, Debug)]
pub enum ReportError {
    /// The report file could not be read
    #[error("Failed to read report: {0}")]
    Read(String),

    /// The report content is not a valid report document
    #[error("Failed to parse report JSON: {0}")]
    Parse(String),

    /// The report file could not be written
    #[error("Failed to write report: {0}")]
    Write(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from configuration validation
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Error from report handling
    #[error("Report error: {0}")]
    Report(#[from] ReportError),

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

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::Report(ReportError::Parse(error.to_string()))
    }
}
