// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core types used throughout cxxglue.
//!
//! This module provides the foundational types for the library:
//! - [`GlueError`] - Error handling
//! - [`GlueConfig`] / [`DirectoryConfig`] - Layered configuration
//! - [`Target`] - Glue flavour being generated

pub mod config;
pub mod error;

pub use config::{
    ConfigLayer, DirectoryConfig, DirectoryEntry, GlueConfig, ModuleConfig, SwigConfig,
};
pub use error::{GlueError, Result};

/// Glue flavour being generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    /// pybind11 registration sources
    Pybind,
    /// SWIG interface file
    Swig,
}

/// Error returned when parsing a `Target` from string fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseTargetError {
    _private: (),
}

impl std::fmt::Display for ParseTargetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid target name, expected 'pybind' or 'swig'")
    }
}

impl std::error::Error for ParseTargetError {}

impl std::str::FromStr for Target {
    type Err = ParseTargetError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pybind" | "pybind11" => Ok(Target::Pybind),
            "swig" => Ok(Target::Swig),
            _ => Err(ParseTargetError { _private: () }),
        }
    }
}

impl Target {
    /// Convert to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Target::Pybind => "pybind",
            Target::Swig => "swig",
        }
    }
}
