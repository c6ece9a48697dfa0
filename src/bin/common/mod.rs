// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for CLI commands.

use std::io::IsTerminal as _;
use std::path::PathBuf;

use anyhow::Context as _;
use clap::Args;
use cxxglue::{ConfigLayer, DirectoryConfig, GenerateStats, GlueConfig};

pub use anyhow::Result as CliResult;
pub type Result<T = ()> = CliResult<T>;

/// Configuration source shared by every command that walks directories.
///
/// Without `--config` the flags describe a single directory. With it, the
/// flags override the matching setting of every configured directory.
#[derive(Args, Clone, Debug, Default)]
pub struct ConfigArgs {
    /// Config file (TOML)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory scanned for headers
    #[arg(long, value_name = "DIR")]
    pub source_dir: Option<PathBuf>,

    /// Directory receiving per-header outputs
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Namespace of interest; repeat for more, the first is primary
    #[arg(short = 'n', long = "namespace", value_name = "NS")]
    pub namespaces: Vec<String>,

    /// Header file wildcard
    #[arg(short, long, value_name = "GLOB")]
    pub pattern: Option<String>,
}

impl ConfigArgs {
    fn overrides(&self) -> ConfigLayer {
        ConfigLayer {
            source_dir: self.source_dir.clone(),
            output_dir: self.output_dir.clone(),
            namespaces: (!self.namespaces.is_empty()).then(|| self.namespaces.clone()),
            header_pattern: self.pattern.clone(),
            ..Default::default()
        }
    }

    /// Build the run configuration from the config file and flags.
    pub fn load(&self) -> Result<GlueConfig> {
        let overrides = self.overrides();
        let Some(path) = &self.config else {
            return Ok(GlueConfig::single("cli", overrides));
        };

        let mut config = GlueConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?;
        for entry in &mut config.directory {
            overlay(&mut entry.layer, &overrides);
        }
        Ok(config)
    }

    /// First resolved directory, or the built-in defaults when none is configured.
    pub fn first_directory(&self) -> Result<DirectoryConfig> {
        let config = self.load()?;
        Ok(config
            .directories()
            .into_iter()
            .next()
            .map(|(_, dir)| dir)
            .unwrap_or_default())
    }
}

fn overlay(layer: &mut ConfigLayer, overrides: &ConfigLayer) {
    if overrides.source_dir.is_some() {
        layer.source_dir = overrides.source_dir.clone();
    }
    if overrides.output_dir.is_some() {
        layer.output_dir = overrides.output_dir.clone();
    }
    if overrides.namespaces.is_some() {
        layer.namespaces = overrides.namespaces.clone();
    }
    if overrides.header_pattern.is_some() {
        layer.header_pattern = overrides.header_pattern.clone();
    }
}

/// Print a run summary.
pub fn print_stats(title: &str, stats: &GenerateStats) {
    println!("=== {title} ===");
    println!("Directories: {}", stats.directories);
    println!(
        "Headers: {} located, {} generated, {} failed",
        stats.files_located, stats.files_generated, stats.files_failed
    );
    let counts = &stats.counts;
    if counts.enums + counts.classes + counts.skipped_classes > 0 {
        println!(
            "Enums: {} | Classes: {} ({} skipped)",
            counts.enums, counts.classes, counts.skipped_classes
        );
        println!(
            "Methods: {} bound, {} placeholders",
            counts.bindings, counts.placeholders
        );
    }
    if stats.swig_ignored > 0 {
        println!("Ignore directives: {}", stats.swig_ignored);
    }
    println!("Files written: {}", stats.outputs.len());
    for path in &stats.outputs {
        println!("  {}", path.display());
    }
}

/// Progress bar wrapper for consistent progress reporting.
#[derive(Clone)]
pub struct ProgressBar {
    inner: Option<indicatif::ProgressBar>,
}

impl ProgressBar {
    /// Create a new progress bar.
    pub fn new(total: u64, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        let inner = if std::io::stderr().is_terminal() {
            let pb = indicatif::ProgressBar::new(total);
            if let Ok(style) = indicatif::ProgressStyle::default_bar()
                .template("{prefix} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} {msg}")
            {
                pb.set_style(style.progress_chars("=>-"));
            }
            pb.set_prefix(prefix);
            Some(pb)
        } else {
            None
        };

        Self { inner }
    }

    /// Advance by one, showing `msg`.
    pub fn inc(&self, msg: impl Into<String>) {
        if let Some(pb) = &self.inner {
            pb.set_message(msg.into());
            pb.inc(1);
        }
    }

    /// Finish the progress bar with a message.
    pub fn finish_with_message(&self, msg: String) {
        if let Some(pb) = &self.inner {
            pb.finish_with_message(msg);
        }
    }
}
