// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Pybind command - generate pybind11 registration sources.

use std::path::PathBuf;

use clap::Args;
use cxxglue::GlueGenerator;

use crate::common::{print_stats, ConfigArgs, ProgressBar, Result};

/// Generate pybind11 registration sources.
#[derive(Args, Clone, Debug)]
pub struct PybindCmd {
    #[command(flatten)]
    config: ConfigArgs,

    /// Python module name
    #[arg(long, value_name = "NAME")]
    module_name: Option<String>,

    /// Directory for the module-init file and the combined dump
    #[arg(long, value_name = "DIR")]
    module_dir: Option<PathBuf>,
}

impl PybindCmd {
    pub fn run(self) -> Result<()> {
        let mut config = self.config.load()?;
        if let Some(name) = self.module_name {
            config.module.name = name;
        }
        if let Some(dir) = self.module_dir {
            config.module.output_dir = Some(dir);
        }

        let generator = GlueGenerator::new(config)?;
        let progress = ProgressBar::new(generator.locate().len() as u64, "pybind");
        let handle = progress.clone();
        let mut generator = generator.with_progress(move |file| handle.inc(file.file_name()));

        let stats = generator.generate_pybind()?;
        progress.finish_with_message(format!("{} headers", stats.files_generated));
        print_stats("pybind", &stats);
        Ok(())
    }
}
