// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Swig command - generate the combined interface file.

use std::path::PathBuf;

use clap::Args;
use cxxglue::GlueGenerator;

use crate::common::{print_stats, ConfigArgs, ProgressBar, Result};

/// Generate a combined SWIG interface file.
#[derive(Args, Clone, Debug)]
pub struct SwigCmd {
    #[command(flatten)]
    config: ConfigArgs,

    /// Interface name; the file is swig_<NAME>.i
    #[arg(long, value_name = "NAME")]
    name: Option<String>,

    /// Directory for the interface file
    #[arg(long, value_name = "DIR")]
    swig_dir: Option<PathBuf>,

    /// Other interface files to %include (replaces the configured list)
    #[arg(long = "include", value_name = "FILE")]
    includes: Vec<String>,
}

impl SwigCmd {
    pub fn run(self) -> Result<()> {
        let mut config = self.config.load()?;
        if let Some(name) = self.name {
            config.swig.name = name;
        }
        if let Some(dir) = self.swig_dir {
            config.swig.output_dir = Some(dir);
        }
        if !self.includes.is_empty() {
            config.swig.includes = self.includes;
        }

        let generator = GlueGenerator::new(config)?;
        let progress = ProgressBar::new(generator.locate().len() as u64, "swig");
        let handle = progress.clone();
        let mut generator = generator.with_progress(move |file| handle.inc(file.file_name()));

        let stats = generator.generate_swig()?;
        progress.finish_with_message(format!("{} headers", stats.files_generated));
        print_stats("swig", &stats);
        Ok(())
    }
}
