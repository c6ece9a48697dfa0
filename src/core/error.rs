// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core error types for cxxglue.
//!
//! Provides error types for the generation pipeline:
//! - Header parsing
//! - Configuration loading
//! - File pattern compilation
//! - Output file I/O

use thiserror::Error;

/// Errors that can occur while generating binding glue.
#[derive(Debug, Clone, Error)]
pub enum GlueError {
    /// Parse error in a header or configuration text
    #[error("Parse error in {context}: {message}")]
    ParseError {
        /// What was being parsed
        context: String,
        /// Error message
        message: String,
    },

    /// Invalid configuration value
    #[error("Invalid configuration '{key}': {reason}")]
    InvalidConfig {
        /// Configuration key or section
        key: String,
        /// Validation error message
        reason: String,
    },

    /// File system error
    #[error("I/O error on '{path}': {message}")]
    Io {
        /// Path being read or written
        path: String,
        /// Error message
        message: String,
    },

    /// Wildcard pattern that could not be compiled
    #[error("Invalid file pattern '{pattern}': {message}")]
    InvalidPattern {
        /// The offending pattern
        pattern: String,
        /// Error message
        message: String,
    },

    /// Other error
    #[error("Other error: {0}")]
    Other(String),
}

impl GlueError {
    /// Create a parse error.
    pub fn parse(context: impl Into<String>, message: impl Into<String>) -> Self {
        GlueError::ParseError {
            context: context.into(),
            message: message.into(),
        }
    }

    /// Create an invalid configuration error.
    pub fn invalid_config(key: impl Into<String>, reason: impl Into<String>) -> Self {
        GlueError::InvalidConfig {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Create an I/O error bound to a path.
    pub fn io(path: impl AsRef<std::path::Path>, err: &std::io::Error) -> Self {
        GlueError::Io {
            path: path.as_ref().display().to_string(),
            message: err.to_string(),
        }
    }

    /// Create an invalid pattern error.
    pub fn invalid_pattern(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        GlueError::InvalidPattern {
            pattern: pattern.into(),
            message: message.into(),
        }
    }

    /// Get structured fields for logging.
    pub fn log_fields(&self) -> Vec<(&'static str, String)> {
        match self {
            GlueError::ParseError { context, message } => {
                vec![("context", context.clone()), ("message", message.clone())]
            }
            GlueError::InvalidConfig { key, reason } => {
                vec![("key", key.clone()), ("reason", reason.clone())]
            }
            GlueError::Io { path, message } => {
                vec![("path", path.clone()), ("message", message.clone())]
            }
            GlueError::InvalidPattern { pattern, message } => {
                vec![("pattern", pattern.clone()), ("message", message.clone())]
            }
            GlueError::Other(msg) => vec![("message", msg.clone())],
        }
    }
}

impl From<std::io::Error> for GlueError {
    fn from(err: std::io::Error) -> Self {
        GlueError::Io {
            path: "<unknown>".to_string(),
            message: err.to_string(),
        }
    }
}

/// Result type for cxxglue operations.
pub type Result<T> = std::result::Result<T, GlueError>;
