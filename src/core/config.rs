// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Layered generator configuration.
//!
//! Configuration is resolved in three layers:
//! 1. [`DirectoryConfig::default`] - the hand-authored built-in defaults
//! 2. the `[defaults]` table of a config file ([`ConfigLayer`])
//! 3. each `[[directory]]` entry ([`DirectoryEntry`])
//!
//! A later layer only replaces the fields it sets. The resolved
//! [`DirectoryConfig`] is immutable for the rest of the run.
//!
//! ```toml
//! [defaults]
//! namespaces = ["tiledb"]
//!
//! [module]
//! name = "pytiledb"
//!
//! [[directory]]
//! name = "cxxapi"
//! source_dir = "cpp/src/tiledb/cxx_api"
//! ignore_file_keywords = ["typedef", "deleter"]
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{GlueError, Result};

/// Fully resolved configuration for one header directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectoryConfig {
    /// Directory scanned for headers (non-recursive)
    pub source_dir: PathBuf,
    /// Wildcard applied to file names in `source_dir`
    pub header_pattern: String,
    /// Namespaces of interest; the first one is the primary namespace
    pub namespaces: Vec<String>,
    /// Where per-header outputs are written
    pub output_dir: PathBuf,
    /// Header paths containing any of these are skipped
    pub ignore_file_keywords: Vec<String>,
    /// Class names containing any of these are skipped
    pub ignore_class_keywords: Vec<String>,
    /// Method signatures containing any of these become placeholders
    pub ignore_method_keywords: Vec<String>,
    /// Class names containing any of these are registered without `std::shared_ptr`
    pub ignore_ptr_keywords: Vec<String>,
    /// Pointer-holding class keywords; carried for project configuration
    /// files, the ignore-pointer keywords alone decide the category
    pub ptr_keywords: Vec<String>,
    /// Boilerplate inserted at the top of every generated header
    pub include_text: String,
    /// Macro/attribute words stripped before parsing (e.g. export macros)
    pub declspecs: Vec<String>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        let mut ignore_method_keywords = strings(&[
            "compareBar",
            "operator",
            "std::thread",
            "boost::array",
            "boost::signals2",
            "boost::unordered",
            "std::unordered",
            "tbb::concurrent_",
            "sf::contfree_safe_ptr",
            "emplace",
            "ConcurrentQueue",
            "std::list",
            "std::set",
            "std::deque",
            "std::map<int, int",
            "time_t",
            "FILE",
            "ptr()",
            "std::function",
        ]);
        ignore_method_keywords.extend(strings(&[
            "const void",
            "const void*",
            "void *",
            "std::pair<T,",
        ]));

        Self {
            source_dir: PathBuf::from("."),
            header_pattern: "*.h".to_string(),
            namespaces: strings(&["tiledb"]),
            output_dir: PathBuf::from("./temp"),
            ignore_file_keywords: strings(&[
                "XTAppBase",
                "XTConfig",
                "XTTimer",
                "XTSingleton",
                "XTStartExit",
            ]),
            ignore_class_keywords: Vec::new(),
            ignore_method_keywords,
            ignore_ptr_keywords: strings(&["Enum", "Util", "Comparator", "Mgr", "CThostFtdc"]),
            ptr_keywords: strings(&["MgrData", "CfgData"]),
            include_text: "#include \"common_include.h\" \n\n".to_string(),
            declspecs: Vec::new(),
        }
    }
}

impl DirectoryConfig {
    /// The primary namespace (first configured), or `""` when none is set.
    pub fn primary_namespace(&self) -> &str {
        self.namespaces.first().map(String::as_str).unwrap_or("")
    }

    /// Check whether a namespace is one of the namespaces of interest.
    pub fn is_namespace_of_interest(&self, namespace: &str) -> bool {
        self.namespaces.iter().any(|ns| ns == namespace)
    }

    /// Return a copy with every field set in `layer` replaced.
    pub fn with_layer(&self, layer: &ConfigLayer) -> Self {
        let mut merged = self.clone();
        if let Some(v) = &layer.source_dir {
            merged.source_dir = v.clone();
        }
        if let Some(v) = &layer.header_pattern {
            merged.header_pattern = v.clone();
        }
        if let Some(v) = &layer.namespaces {
            merged.namespaces = v.clone();
        }
        if let Some(v) = &layer.output_dir {
            merged.output_dir = v.clone();
        }
        if let Some(v) = &layer.ignore_file_keywords {
            merged.ignore_file_keywords = v.clone();
        }
        if let Some(v) = &layer.ignore_class_keywords {
            merged.ignore_class_keywords = v.clone();
        }
        if let Some(v) = &layer.ignore_method_keywords {
            merged.ignore_method_keywords = v.clone();
        }
        if let Some(v) = &layer.extra_ignore_method_keywords {
            merged.ignore_method_keywords.extend(v.iter().cloned());
        }
        if let Some(v) = &layer.ignore_ptr_keywords {
            merged.ignore_ptr_keywords = v.clone();
        }
        if let Some(v) = &layer.ptr_keywords {
            merged.ptr_keywords = v.clone();
        }
        if let Some(v) = &layer.include_text {
            merged.include_text = v.clone();
        }
        if let Some(v) = &layer.declspecs {
            merged.declspecs = v.clone();
        }
        merged
    }
}

/// Override layer; every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigLayer {
    pub source_dir: Option<PathBuf>,
    pub header_pattern: Option<String>,
    pub namespaces: Option<Vec<String>>,
    pub output_dir: Option<PathBuf>,
    pub ignore_file_keywords: Option<Vec<String>>,
    pub ignore_class_keywords: Option<Vec<String>>,
    pub ignore_method_keywords: Option<Vec<String>>,
    /// Appended to the inherited method keywords instead of replacing them
    pub extra_ignore_method_keywords: Option<Vec<String>>,
    pub ignore_ptr_keywords: Option<Vec<String>>,
    pub ptr_keywords: Option<Vec<String>>,
    pub include_text: Option<String>,
    pub declspecs: Option<Vec<String>>,
}

impl ConfigLayer {
    fn resolve_paths(&mut self, base_dir: &Path) {
        if let Some(dir) = self.source_dir.as_mut() {
            if dir.is_relative() {
                *dir = base_dir.join(&*dir);
            }
        }
        if let Some(dir) = self.output_dir.as_mut() {
            if dir.is_relative() {
                *dir = base_dir.join(&*dir);
            }
        }
    }
}

/// One `[[directory]]` entry of a config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    /// Label used in logs
    pub name: String,
    #[serde(flatten)]
    pub layer: ConfigLayer,
}

/// Settings for the aggregated pybind11 module-init file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModuleConfig {
    /// Module name for the default build
    pub name: String,
    /// Module name when `legacy_switch` is defined (defaults to `<name>2`)
    pub legacy_name: Option<String>,
    /// Preprocessor symbol selecting the legacy module name
    pub legacy_switch: String,
    /// Header included ahead of the per-file headers
    pub common_header: String,
    /// Registration call emitted before all others
    pub common_init: String,
    /// Destination of the aggregate files (defaults to the last directory's output)
    pub output_dir: Option<PathBuf>,
    /// File name of the combined inspection dump
    pub dump_file: String,
}

impl Default for ModuleConfig {
    fn default() -> Self {
        Self {
            name: "pytiledb".to_string(),
            legacy_name: None,
            legacy_switch: "PYTHON_VERSION_2".to_string(),
            common_header: "init_module_common.h".to_string(),
            common_init: "init_common".to_string(),
            output_dir: None,
            dump_file: "temp_pybind.cpp".to_string(),
        }
    }
}

impl ModuleConfig {
    /// Module name used when the legacy switch is defined.
    pub fn legacy_module_name(&self) -> String {
        self.legacy_name
            .clone()
            .unwrap_or_else(|| format!("{}2", self.name))
    }
}

/// Settings for the combined SWIG interface file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwigConfig {
    /// Interface name; the file is `swig_<name>.i`
    pub name: String,
    /// Other interface files pulled in with `%include`
    pub includes: Vec<String>,
    /// Destination directory (defaults to the current directory)
    pub output_dir: Option<PathBuf>,
}

impl Default for SwigConfig {
    fn default() -> Self {
        Self {
            name: "tiledb".to_string(),
            includes: vec!["swig_common.i".to_string()],
            output_dir: None,
        }
    }
}

impl SwigConfig {
    /// File name of the interface file.
    pub fn file_name(&self) -> String {
        format!("swig_{}.i", self.name)
    }
}

/// Top-level configuration: a defaults layer plus an ordered list of directories.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlueConfig {
    pub defaults: ConfigLayer,
    pub module: ModuleConfig,
    pub swig: SwigConfig,
    pub directory: Vec<DirectoryEntry>,
}

impl GlueConfig {
    /// Parse configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| GlueError::parse("config", e.to_string()))
    }

    /// Load a config file, resolving relative paths against its directory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| GlueError::io(path, &e))?;
        let mut cfg = Self::from_toml_str(&text)?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        cfg.resolve_paths(base_dir);
        debug!(
            path = %path.display(),
            directories = cfg.directory.len(),
            "loaded configuration"
        );
        Ok(cfg)
    }

    /// Config with a single directory built from explicit overrides.
    pub fn single(name: impl Into<String>, layer: ConfigLayer) -> Self {
        Self {
            directory: vec![DirectoryEntry {
                name: name.into(),
                layer,
            }],
            ..Self::default()
        }
    }

    fn resolve_paths(&mut self, base_dir: &Path) {
        self.defaults.resolve_paths(base_dir);
        for entry in &mut self.directory {
            entry.layer.resolve_paths(base_dir);
        }
        if let Some(dir) = self.module.output_dir.as_mut() {
            if dir.is_relative() {
                *dir = base_dir.join(&*dir);
            }
        }
        if let Some(dir) = self.swig.output_dir.as_mut() {
            if dir.is_relative() {
                *dir = base_dir.join(&*dir);
            }
        }
    }

    /// Resolve every directory entry against the built-in defaults and the
    /// `[defaults]` layer, in declaration order.
    pub fn directories(&self) -> Vec<(String, DirectoryConfig)> {
        let base = DirectoryConfig::default().with_layer(&self.defaults);
        self.directory
            .iter()
            .map(|entry| (entry.name.clone(), base.with_layer(&entry.layer)))
            .collect()
    }

    /// Check for values that would make every run produce nothing useful.
    pub fn validate(&self) -> Result<()> {
        for (i, (name, dir)) in self.directories().iter().enumerate() {
            if dir.namespaces.is_empty() {
                return Err(GlueError::invalid_config(
                    format!("directory[{i}] ({name})"),
                    "namespaces must not be empty",
                ));
            }
            if dir.header_pattern.trim().is_empty() {
                return Err(GlueError::invalid_config(
                    format!("directory[{i}] ({name})"),
                    "header_pattern must not be empty",
                ));
            }
        }
        if self.module.name.is_empty() {
            return Err(GlueError::invalid_config("module.name", "must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directory_config() {
        let cfg = DirectoryConfig::default();
        assert_eq!(cfg.header_pattern, "*.h");
        assert_eq!(cfg.primary_namespace(), "tiledb");
        assert!(cfg.ignore_method_keywords.iter().any(|k| k == "operator"));
        assert!(cfg.ptr_keywords.contains(&"MgrData".to_string()));
    }

    #[test]
    fn test_layer_replaces_only_set_fields() {
        let base = DirectoryConfig::default();
        let layer = ConfigLayer {
            namespaces: Some(vec!["IB".to_string(), "tiledb".to_string()]),
            ..Default::default()
        };
        let merged = base.with_layer(&layer);
        assert_eq!(merged.primary_namespace(), "IB");
        assert_eq!(merged.header_pattern, base.header_pattern);
        assert_eq!(merged.ignore_method_keywords, base.ignore_method_keywords);
    }

    #[test]
    fn test_extra_method_keywords_are_appended() {
        let base = DirectoryConfig::default();
        let layer = ConfigLayer {
            extra_ignore_method_keywords: Some(vec!["tiledb_ctx_t".to_string()]),
            ..Default::default()
        };
        let merged = base.with_layer(&layer);
        assert_eq!(
            merged.ignore_method_keywords.len(),
            base.ignore_method_keywords.len() + 1
        );
        assert_eq!(merged.ignore_method_keywords.last().unwrap(), "tiledb_ctx_t");
    }

    #[test]
    fn test_parse_toml_layers() {
        let text = r#"
            [defaults]
            namespaces = ["tiledb", "IB"]
            output_dir = "gen"

            [module]
            name = "pyfoo"

            [[directory]]
            name = "cxxapi"
            source_dir = "include"
            ignore_class_keywords = ["VectorData"]

            [[directory]]
            name = "extra"
            header_pattern = "*.hpp"
        "#;
        let cfg = GlueConfig::from_toml_str(text).unwrap();
        let dirs = cfg.directories();
        assert_eq!(dirs.len(), 2);
        assert_eq!(dirs[0].0, "cxxapi");
        assert_eq!(dirs[0].1.source_dir, PathBuf::from("include"));
        assert_eq!(dirs[0].1.ignore_class_keywords, vec!["VectorData"]);
        assert_eq!(dirs[0].1.output_dir, PathBuf::from("gen"));
        assert_eq!(dirs[1].1.header_pattern, "*.hpp");
        assert_eq!(dirs[1].1.namespaces, vec!["tiledb", "IB"]);
        assert_eq!(cfg.module.name, "pyfoo");
        assert_eq!(cfg.module.legacy_module_name(), "pyfoo2");
        assert_eq!(cfg.swig.file_name(), "swig_tiledb.i");
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let err = GlueConfig::from_toml_str("[[directory]\nname=").unwrap_err();
        assert!(matches!(err, GlueError::ParseError { .. }));
    }

    #[test]
    fn test_validate_rejects_empty_namespaces() {
        let cfg = GlueConfig::single(
            "x",
            ConfigLayer {
                namespaces: Some(Vec::new()),
                ..Default::default()
            },
        );
        assert!(matches!(
            cfg.validate(),
            Err(GlueError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_load_resolves_relative_paths() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("glue.toml");
        std::fs::write(
            &path,
            "[[directory]]\nname = \"a\"\nsource_dir = \"headers\"\noutput_dir = \"/abs/out\"\n",
        )
        .unwrap();
        let cfg = GlueConfig::load(&path).unwrap();
        let dirs = cfg.directories();
        assert_eq!(dirs[0].1.source_dir, dir.path().join("headers"));
        assert_eq!(dirs[0].1.output_dir, PathBuf::from("/abs/out"));
    }
}
