// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Conversion of macro-driven enum headers into plain enum declarations.
//!
//! C headers sometimes list enum members through a macro so the same list
//! can be expanded several ways:
//!
//! ```text
//! #ifdef TILEDB_QUERY_TYPE_ENUM
//!     TILEDB_QUERY_TYPE_ENUM(READ) = 0,
//!     TILEDB_QUERY_TYPE_ENUM(WRITE) = 1,
//! #endif
//! ```
//!
//! [`convert_enum_macro_header`] rewrites such blocks into declarations the
//! header parser understands, keeping each original line as a trailing
//! comment:
//!
//! ```text
//! enum tiledb_query_type_t{ //#ifdef TILEDB_QUERY_TYPE_ENUM
//!     TILEDB_READ =  0, //    TILEDB_QUERY_TYPE_ENUM(READ) = 0,
//!     TILEDB_WRITE =  1, //    TILEDB_QUERY_TYPE_ENUM(WRITE) = 1,
//! };//#endif
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::{GlueError, Result};
use crate::emit::write_text;

/// Marker every enum macro name carries.
pub const ENUM_MACRO_MARKER: &str = "_ENUM";

/// Settings for [`convert_enum_macro_header`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MacroEnumOptions {
    /// Prefix of the enum macros, also prepended to every member name
    pub prefix: String,
    /// Derived type name to final type name
    pub aliases: BTreeMap<String, String>,
}

impl Default for MacroEnumOptions {
    fn default() -> Self {
        let mut aliases = BTreeMap::new();
        aliases.insert(
            "tiledb_object_type_t".to_string(),
            "tiledb_object_t".to_string(),
        );
        Self {
            prefix: "TILEDB_".to_string(),
            aliases,
        }
    }
}

impl MacroEnumOptions {
    /// Type name for the macro named on an `#ifdef` line.
    ///
    /// `TILEDB_QUERY_TYPE_ENUM` becomes `tiledb_query_type_t`, then the
    /// alias table is applied.
    pub fn type_name(&self, macro_name: &str) -> String {
        let derived = macro_name.replace("ENUM", "t").to_lowercase();
        self.aliases.get(&derived).cloned().unwrap_or(derived)
    }

    fn opens_block(&self, line: &str) -> bool {
        line.contains("#ifdef") && line.contains(&self.prefix) && line.contains(ENUM_MACRO_MARKER)
    }

    fn is_member(&self, line: &str) -> bool {
        line.contains('(')
            && line.contains(')')
            && line.contains(&self.prefix)
            && line.contains(ENUM_MACRO_MARKER)
    }
}

/// Convert the text of a macro-driven enum header.
///
/// Lines outside enum blocks pass through unchanged. Every output line ends
/// with `\n`.
pub fn convert_enum_macro_header(text: &str, options: &MacroEnumOptions) -> String {
    let mut out = String::with_capacity(text.len() * 2);
    let mut in_block = false;

    for line in text.lines() {
        if options.opens_block(line) {
            in_block = true;
            let macro_name = line.split_whitespace().nth(1).unwrap_or_default();
            out.push_str(&format!("enum {}{{ //{line}\n", options.type_name(macro_name)));
        } else if in_block && line.contains("#endif") {
            in_block = false;
            out.push_str(&format!("}};//{line}\n"));
        } else if in_block && options.is_member(line) {
            out.push_str(&member_line(line, &options.prefix));
        } else {
            out.push_str(line);
            out.push('\n');
        }
    }
    out
}

/// `    <PREFIX><NAME> = <VALUE> //<line>` for one macro member line.
fn member_line(line: &str, prefix: &str) -> String {
    let head = line.split('=').next().unwrap_or(line);
    let value = line.rsplit('=').next().unwrap_or(line);
    let name = head
        .rsplit('(')
        .next()
        .and_then(|s| s.split(')').next())
        .unwrap_or_default();
    format!("    {prefix}{name} = {value} //{line}\n")
}

/// Convert `input` and write the result to `output`.
pub fn convert_enum_macro_file(input: &Path, output: &Path, options: &MacroEnumOptions) -> Result<()> {
    let text = std::fs::read_to_string(input).map_err(|e| GlueError::io(input, &e))?;
    let converted = convert_enum_macro_header(&text, options);
    write_text(output, &converted)?;
    info!(
        input = %input.display(),
        output = %output.display(),
        "converted enum macro header"
    );
    Ok(())
}
