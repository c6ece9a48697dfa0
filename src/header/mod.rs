// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! C++ header parsing.
//!
//! - [`ast`] - Declaration types ([`ParsedHeader`], [`Class`], [`Method`], ...)
//! - [`preprocess`] - Comment, directive and attribute stripping
//! - [`parser`] - Pest grammar and declaration analysis

pub mod ast;
pub mod parser;
pub mod preprocess;

pub use ast::{
    qualify, Class, ClassKind, Enum, EnumValue, Method, Parameter, ParsedHeader,
    ENUM_TYPE_SUFFIX,
};
pub use parser::{parse_header, parse_header_file};
