// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Convert-enums command - rewrite macro-driven enum blocks as plain enums.

use std::path::PathBuf;

use anyhow::anyhow;
use clap::Args;
use cxxglue::macro_enum::{convert_enum_macro_file, MacroEnumOptions};

use crate::common::Result;

/// Convert a macro-driven enum header into plain enums.
#[derive(Args, Clone, Debug)]
pub struct ConvertEnumsCmd {
    /// Macro-driven enum header
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Converted header
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Macro prefix, also prepended to member names
    #[arg(long, default_value = "TILEDB_")]
    prefix: String,

    /// Extra type rename, FROM=TO (repeatable)
    #[arg(long = "alias", value_name = "FROM=TO")]
    aliases: Vec<String>,
}

impl ConvertEnumsCmd {
    pub fn run(self) -> Result<()> {
        let mut options = MacroEnumOptions {
            prefix: self.prefix,
            ..Default::default()
        };
        for alias in &self.aliases {
            let (from, to) = alias
                .split_once('=')
                .ok_or_else(|| anyhow!("invalid alias '{alias}', expected FROM=TO"))?;
            options.aliases.insert(from.to_string(), to.to_string());
        }

        convert_enum_macro_file(&self.input, &self.output, &options)?;
        println!(
            "Converted {} -> {}",
            self.input.display(),
            self.output.display()
        );
        Ok(())
    }
}
