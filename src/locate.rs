// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Header discovery.
//!
//! [`locate_headers`] expands a directory's header pattern into one
//! [`FileConfig`] per header. The remaining helpers cover general file and
//! directory discovery (recursive and flat) and separator-agnostic path
//! splitting.

use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::core::{DirectoryConfig, GlueError, Result};

/// Shell matching rules: case-sensitive, `*` never crosses a separator and
/// names starting with `.` need a literal leading `.` in the pattern.
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

/// Compile a shell wildcard (`*`, `?`, `[...]`, `[!...]`).
pub fn compile_pattern(pattern: &str) -> Result<Pattern> {
    Pattern::new(pattern).map_err(|e| GlueError::invalid_pattern(pattern, e.msg))
}

/// Directory configuration bound to one discovered header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileConfig {
    pub config: DirectoryConfig,
    /// Header path with `/` separators
    pub path: PathBuf,
}

impl FileConfig {
    /// Bind a directory configuration to a header path.
    pub fn new(config: DirectoryConfig, path: impl AsRef<Path>) -> Self {
        Self {
            config,
            path: PathBuf::from(normalize_separators(path.as_ref())),
        }
    }

    /// File name, e.g. `array.h`.
    pub fn file_name(&self) -> String {
        leaf_name(&self.path.to_string_lossy()).to_string()
    }

    /// File name without its extension, e.g. `array`.
    pub fn stem(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Path text with `\` turned into `/`.
pub fn normalize_separators(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Expand a directory's header pattern into file configurations.
///
/// The expansion is not recursive. Headers whose path contains a
/// file-exclusion keyword are logged and skipped. A missing directory, an
/// unusable pattern or an empty match all yield an empty list.
pub fn locate_headers(config: &DirectoryConfig) -> Vec<FileConfig> {
    let paths = match glob_entries(&config.source_dir, &config.header_pattern, EntryKind::File) {
        Ok(paths) => paths,
        Err(e) => {
            warn!(dir = %config.source_dir.display(), error = %e, "no headers located");
            return Vec::new();
        }
    };
    if paths.is_empty() {
        debug!(dir = %config.source_dir.display(), pattern = %config.header_pattern, "no header matched");
    }

    paths
        .into_iter()
        .filter_map(|path| {
            let normalized = normalize_separators(&path);
            if let Some(keyword) = config
                .ignore_file_keywords
                .iter()
                .find(|k| normalized.contains(k.as_str()))
            {
                info!(file = %normalized, keyword = %keyword, "ignore file");
                return None;
            }
            info!(file = %normalized, "start to process");
            Some(FileConfig::new(config.clone(), normalized))
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryKind {
    File,
    Dir,
}

impl EntryKind {
    fn accepts(self, path: &Path) -> bool {
        match self {
            EntryKind::File => path.is_file(),
            EntryKind::Dir => path.is_dir(),
        }
    }
}

/// Direct children of `dir` matching `pattern`, sorted.
///
/// A missing or unreadable directory expands to nothing.
fn glob_entries(dir: &Path, pattern: &str, kind: EntryKind) -> Result<Vec<PathBuf>> {
    // validate the wildcard on its own so errors name the user's pattern
    compile_pattern(pattern)?;
    let full = format!("{}/{}", Pattern::escape(&dir.to_string_lossy()), pattern);
    let entries =
        glob::glob_with(&full, MATCH_OPTIONS).map_err(|e| GlueError::invalid_pattern(pattern, e.msg))?;
    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .filter(|path| kind.accepts(path))
        .collect();
    paths.sort();
    Ok(paths)
}

/// Files directly inside `dir` matching `pattern`. A missing directory yields an empty list.
pub fn find_files(dir: impl AsRef<Path>, pattern: &str) -> Result<Vec<PathBuf>> {
    glob_entries(dir.as_ref(), pattern, EntryKind::File)
}

/// Names of the files directly inside `dir` matching `pattern`.
pub fn file_names_by_pattern(dir: impl AsRef<Path>, pattern: &str) -> Result<Vec<String>> {
    Ok(find_files(dir, pattern)?
        .iter()
        .map(|p| leaf_name(&p.to_string_lossy()).to_string())
        .collect())
}

/// Subdirectories directly inside `dir` matching `pattern`.
pub fn find_subdirs(dir: impl AsRef<Path>, pattern: &str) -> Result<Vec<PathBuf>> {
    let pattern = compile_pattern(pattern)?;
    let entries = match std::fs::read_dir(dir.as_ref()) {
        Ok(entries) => entries,
        Err(_) => return Ok(Vec::new()),
    };
    let mut dirs: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| pattern.matches_with(&entry.file_name().to_string_lossy(), MATCH_OPTIONS))
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();
    dirs.sort();
    Ok(dirs)
}

fn walk_matching(root: &Path, pattern: &Pattern, kind: EntryKind) -> Vec<PathBuf> {
    let mut results: Vec<PathBuf> = WalkDir::new(root)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| match kind {
            EntryKind::File => e.file_type().is_file(),
            EntryKind::Dir => e.file_type().is_dir(),
        })
        .filter(|e| pattern.matches_with(&e.file_name().to_string_lossy(), MATCH_OPTIONS))
        .map(|e| e.into_path())
        .collect();
    results.sort();
    results
}

/// Files anywhere under `root` whose name matches `pattern`.
pub fn find_files_recursive(root: impl AsRef<Path>, pattern: &str) -> Result<Vec<PathBuf>> {
    let pattern = compile_pattern(pattern)?;
    Ok(walk_matching(root.as_ref(), &pattern, EntryKind::File))
}

/// Directories anywhere under `root` whose name matches `pattern`.
pub fn find_dirs_recursive(root: impl AsRef<Path>, pattern: &str) -> Result<Vec<PathBuf>> {
    let pattern = compile_pattern(pattern)?;
    Ok(walk_matching(root.as_ref(), &pattern, EntryKind::Dir))
}

/// Last component of a path, accepting either separator.
pub fn leaf_name(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

/// Everything before the last component, with `/` separators.
pub fn parent_dir(path: &str) -> String {
    let normalized = path.replace('\\', "/");
    match normalized.rfind('/') {
        Some(idx) => normalized[..idx].to_string(),
        None => String::new(),
    }
}
