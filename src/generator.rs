// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Generation driver.
//!
//! [`GlueGenerator`] walks every configured directory, parses each located
//! header and hands it to a [`GlueTarget`]. Targets write per-header outputs
//! as they go and the aggregate outputs in [`GlueTarget::finish`].
//!
//! A header that fails to parse or to write is logged and counted in
//! [`GenerateStats::files_failed`]; the run continues. Only aggregate writes
//! abort a run.
//!
//! # Example
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use cxxglue::{GlueConfig, GlueGenerator};
//!
//! let config = GlueConfig::load("demos/tiledb.toml")?;
//! let stats = GlueGenerator::new(config)?.generate_pybind()?;
//! println!("{} headers, {} failed", stats.files_generated, stats.files_failed);
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::core::{DirectoryConfig, GlueConfig, ModuleConfig, Result, SwigConfig, Target};
use crate::emit::{
    dump_text, emit_pybind, emit_swig, module_init_text, swig_interface_text, write_file_pair,
    write_text, EmitCounts, FileGlue, SwigFileGlue, MODULE_INIT_FILE,
};
use crate::header::{parse_header_file, ParsedHeader};
use crate::locate::{locate_headers, FileConfig};

/// Statistics from a generation run.
#[derive(Debug, Clone, Default)]
pub struct GenerateStats {
    /// Directories visited
    pub directories: usize,

    /// Headers located across all directories
    pub files_located: usize,

    /// Headers whose glue was produced
    pub files_generated: usize,

    /// Headers that failed to parse or write
    pub files_failed: usize,

    /// Emission counters summed over all headers
    pub counts: EmitCounts,

    /// `%ignore` directives emitted (interface files only)
    pub swig_ignored: usize,

    /// Every file written, in write order
    pub outputs: Vec<PathBuf>,
}

impl GenerateStats {
    pub fn new() -> Self {
        Self::default()
    }
}

/// A glue flavour driven by [`GlueGenerator`].
pub trait GlueTarget {
    /// Flavour produced by this target.
    fn target(&self) -> Target;

    /// Called once per directory, before its headers are processed.
    fn begin_directory(&mut self, _config: &DirectoryConfig) {}

    /// Produce glue for one parsed header.
    ///
    /// An error here marks only this header as failed.
    fn process_file(
        &mut self,
        file: &FileConfig,
        header: &ParsedHeader,
        stats: &mut GenerateStats,
    ) -> Result<()>;

    /// Write the aggregate outputs once every directory has been processed.
    fn finish(&mut self, stats: &mut GenerateStats) -> Result<()>;
}

/// pybind11 sources: one header/source pair per input header, plus the
/// module-init file and the combined dump.
#[derive(Debug, Clone)]
pub struct PybindTarget {
    module: ModuleConfig,
    common_include: String,
    last_output_dir: Option<PathBuf>,
    files: Vec<FileGlue>,
}

impl PybindTarget {
    pub fn new(module: ModuleConfig) -> Self {
        Self {
            module,
            common_include: String::new(),
            last_output_dir: None,
            files: Vec::new(),
        }
    }

    /// Directory receiving the aggregate files.
    fn aggregate_dir(&self) -> PathBuf {
        self.module
            .output_dir
            .clone()
            .or_else(|| self.last_output_dir.clone())
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

impl GlueTarget for PybindTarget {
    fn target(&self) -> Target {
        Target::Pybind
    }

    fn begin_directory(&mut self, config: &DirectoryConfig) {
        self.common_include = config.include_text.clone();
        self.last_output_dir = Some(config.output_dir.clone());
    }

    fn process_file(
        &mut self,
        file: &FileConfig,
        header: &ParsedHeader,
        stats: &mut GenerateStats,
    ) -> Result<()> {
        let glue = emit_pybind(header, file);
        let (h, cpp) = write_file_pair(&glue, &file.config.output_dir)?;
        info!(
            path = %file.path.display(),
            enums = glue.counts.enums,
            classes = glue.counts.classes,
            "generated pybind glue"
        );
        stats.outputs.push(h);
        stats.outputs.push(cpp);
        stats.counts.merge(&glue.counts);
        self.files.push(glue);
        Ok(())
    }

    fn finish(&mut self, stats: &mut GenerateStats) -> Result<()> {
        let dir = self.aggregate_dir();

        let init_path = dir.join(MODULE_INIT_FILE);
        write_text(
            &init_path,
            &module_init_text(&self.module, &self.common_include, &self.files),
        )?;
        stats.outputs.push(init_path);

        let dump_path = dir.join(&self.module.dump_file);
        write_text(&dump_path, &dump_text(&self.files))?;
        stats.outputs.push(dump_path);
        Ok(())
    }
}

/// A single combined SWIG interface file.
#[derive(Debug, Clone)]
pub struct SwigTarget {
    swig: SwigConfig,
    files: Vec<SwigFileGlue>,
}

impl SwigTarget {
    pub fn new(swig: SwigConfig) -> Self {
        Self {
            swig,
            files: Vec::new(),
        }
    }
}

impl GlueTarget for SwigTarget {
    fn target(&self) -> Target {
        Target::Swig
    }

    fn process_file(
        &mut self,
        file: &FileConfig,
        header: &ParsedHeader,
        stats: &mut GenerateStats,
    ) -> Result<()> {
        let glue = emit_swig(header, file);
        stats.swig_ignored += glue.ignored;
        self.files.push(glue);
        Ok(())
    }

    fn finish(&mut self, stats: &mut GenerateStats) -> Result<()> {
        let dir = self
            .swig
            .output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));
        let path = dir.join(self.swig.file_name());
        write_text(&path, &swig_interface_text(&self.swig, &self.files))?;
        stats.outputs.push(path);
        Ok(())
    }
}

/// Callback invoked before each header is processed.
pub type ProgressFn = Box<dyn FnMut(&FileConfig)>;

/// Drives header location, parsing and emission over every configured directory.
pub struct GlueGenerator {
    config: GlueConfig,
    progress: Option<ProgressFn>,
}

impl std::fmt::Debug for GlueGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlueGenerator")
            .field("config", &self.config)
            .field("progress", &self.progress.is_some())
            .finish()
    }
}

impl GlueGenerator {
    /// Create a generator after validating the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GlueError::InvalidConfig`](crate::GlueError::InvalidConfig)
    /// when a directory has no namespaces or an empty header pattern.
    pub fn new(config: GlueConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            progress: None,
        })
    }

    /// Report each header before it is processed.
    pub fn with_progress(mut self, progress: impl FnMut(&FileConfig) + 'static) -> Self {
        self.progress = Some(Box::new(progress));
        self
    }

    pub fn config(&self) -> &GlueConfig {
        &self.config
    }

    /// Every header that a run would process, in processing order.
    pub fn locate(&self) -> Vec<FileConfig> {
        self.config
            .directories()
            .iter()
            .flat_map(|(_, dir)| locate_headers(dir))
            .collect()
    }

    /// Generate pybind11 sources for every configured directory.
    pub fn generate_pybind(&mut self) -> Result<GenerateStats> {
        let mut target = PybindTarget::new(self.config.module.clone());
        self.run(&mut target)
    }

    /// Generate the combined SWIG interface file.
    pub fn generate_swig(&mut self) -> Result<GenerateStats> {
        let mut target = SwigTarget::new(self.config.swig.clone());
        self.run(&mut target)
    }

    /// Generate the given flavour.
    pub fn generate(&mut self, target: Target) -> Result<GenerateStats> {
        match target {
            Target::Pybind => self.generate_pybind(),
            Target::Swig => self.generate_swig(),
        }
    }

    /// Run any [`GlueTarget`] over the configured directories.
    pub fn run<T: GlueTarget>(&mut self, target: &mut T) -> Result<GenerateStats> {
        let mut stats = GenerateStats::new();

        for (name, dir) in self.config.directories() {
            info!(
                directory = %name,
                source = %dir.source_dir.display(),
                target = target.target().as_str(),
                "processing directory"
            );
            stats.directories += 1;
            target.begin_directory(&dir);

            let files = locate_headers(&dir);
            stats.files_located += files.len();

            for file in &files {
                if let Some(progress) = self.progress.as_mut() {
                    progress(file);
                }
                process_one(target, file, &mut stats);
            }
        }

        target.finish(&mut stats)?;
        info!(
            target = target.target().as_str(),
            located = stats.files_located,
            generated = stats.files_generated,
            failed = stats.files_failed,
            "generation complete"
        );
        Ok(stats)
    }
}

fn process_one<T: GlueTarget>(target: &mut T, file: &FileConfig, stats: &mut GenerateStats) {
    let Some(header) = parse_header_file(Path::new(&file.path), &file.config.declspecs) else {
        stats.files_failed += 1;
        return;
    };
    match target.process_file(file, &header, stats) {
        Ok(()) => stats.files_generated += 1,
        Err(err) => {
            warn!(
                path = %file.path.display(),
                error = %err,
                fields = ?err.log_fields(),
                "failed to generate glue"
            );
            stats.files_failed += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ConfigLayer;
    use std::cell::RefCell;
    use std::fs;
    use std::rc::Rc;

    fn config_for(src: &Path, out: &Path) -> GlueConfig {
        GlueConfig::single(
            "test",
            ConfigLayer {
                source_dir: Some(src.to_path_buf()),
                output_dir: Some(out.to_path_buf()),
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_generate_pybind_writes_all_outputs() {
        let src = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        fs::write(
            src.path().join("shape.h"),
            "namespace tiledb { class Shape { public: int area() const; }; }",
        )
        .unwrap();

        let mut generator = GlueGenerator::new(config_for(src.path(), out.path())).unwrap();
        let stats = generator.generate_pybind().unwrap();

        assert_eq!(stats.directories, 1);
        assert_eq!(stats.files_generated, 1);
        assert_eq!(stats.files_failed, 0);
        assert_eq!(stats.counts.classes, 1);
        for name in ["pybind_shape.h", "pybind_shape.cpp", MODULE_INIT_FILE, "temp_pybind.cpp"] {
            assert!(out.path().join(name).exists(), "missing {name}");
        }
    }

    #[test]
    fn test_unreadable_header_is_counted_not_fatal() {
        let src = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        fs::write(src.path().join("bad.h"), [0xff, 0xfe, 0x00]).unwrap();
        fs::write(src.path().join("good.h"), "namespace tiledb { enum E { A }; }").unwrap();
        // rejected by the grammar rather than by the read
        fs::write(src.path().join("unbalanced.h"), "namespace tiledb { class A {").unwrap();

        let stats = GlueGenerator::new(config_for(src.path(), out.path()))
            .unwrap()
            .generate_pybind()
            .unwrap();
        assert_eq!(stats.files_located, 3);
        assert_eq!(stats.files_failed, 2);
        assert_eq!(stats.files_generated, 1);
        assert!(!out.path().join("pybind_unbalanced.h").exists());
        let init = fs::read_to_string(out.path().join(MODULE_INIT_FILE)).unwrap();
        assert!(!init.contains("unbalanced"));
    }

    #[test]
    fn test_progress_callback_sees_each_header() {
        let src = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        fs::write(src.path().join("a.h"), "").unwrap();
        fs::write(src.path().join("b.h"), "").unwrap();

        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut generator = GlueGenerator::new(config_for(src.path(), out.path()))
            .unwrap()
            .with_progress(move |file| sink.borrow_mut().push(file.file_name()));
        assert_eq!(generator.locate().len(), 2);
        generator.generate_pybind().unwrap();
        assert_eq!(*seen.borrow(), vec!["a.h".to_string(), "b.h".to_string()]);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = GlueConfig::single(
            "bad",
            ConfigLayer {
                namespaces: Some(Vec::new()),
                ..Default::default()
            },
        );
        assert!(GlueGenerator::new(config).is_err());
    }
}
