// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Locate command - list the headers each directory contributes.

use clap::Args;
use cxxglue::locate::{find_files_recursive, locate_headers};

use crate::common::{ConfigArgs, Result};

/// List the headers a run would process.
#[derive(Args, Clone, Debug)]
pub struct LocateCmd {
    #[command(flatten)]
    config: ConfigArgs,

    /// Also search subdirectories (exclusion keywords are not applied)
    #[arg(short, long)]
    recursive: bool,
}

impl LocateCmd {
    pub fn run(self) -> Result<()> {
        let config = self.config.load()?;
        let mut total = 0;

        for (name, dir) in config.directories() {
            println!("[{name}] {}", dir.source_dir.display());
            let paths: Vec<String> = if self.recursive {
                find_files_recursive(&dir.source_dir, &dir.header_pattern)?
                    .iter()
                    .map(|p| p.display().to_string())
                    .collect()
            } else {
                locate_headers(&dir)
                    .iter()
                    .map(|f| f.path.display().to_string())
                    .collect()
            };
            for path in &paths {
                println!("  {path}");
            }
            total += paths.len();
        }

        println!("Total: {total}");
        Ok(())
    }
}
