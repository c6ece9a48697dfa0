// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # cxxglue
//!
//! Binding glue generator for C++ headers.
//!
//! Given directories of C++ headers, cxxglue emits static source text for two
//! binding flavours:
//! - **pybind11** registration sources (one header/source pair per input
//!   header, an aggregated module-init file and a combined dump)
//! - a **SWIG** interface file with `%shared_ptr`, `%ignore` and `%include`
//!   directives
//!
//! ## Architecture
//!
//! - `locate` - header discovery by wildcard, with file-exclusion keywords
//! - `header/` - tolerant header parser (pest grammar + declaration analysis)
//! - `classify/` - class admission, pointer categories and the ordered method rules
//! - `emit/` - append-only emission buffers, pybind11/SWIG text and file layout
//! - `generator` - directory walk driving a [`GlueTarget`]
//! - `macro_enum` - macro-driven enum header conversion
//!
//! ## Example
//!
//! ```rust,no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use cxxglue::{GlueConfig, GlueGenerator};
//!
//! let config = GlueConfig::load("glue.toml")?;
//! let mut generator = GlueGenerator::new(config)?;
//! let stats = generator.generate_pybind()?;
//! println!("{} bindings emitted", stats.counts.bindings);
//! # Ok(())
//! # }
//! ```

// Core types
pub mod core;

pub use core::{
    ConfigLayer, DirectoryConfig, GlueConfig, GlueError, ModuleConfig, Result, SwigConfig, Target,
};

// Header discovery
pub mod locate;

// Header parsing
pub mod header;

// Declaration classification
pub mod classify;

// Glue text emission
pub mod emit;

// Directory-level driver
pub mod generator;

pub use generator::{GenerateStats, GlueGenerator, GlueTarget, PybindTarget, SwigTarget};

// Enum macro conversion
pub mod macro_enum;
