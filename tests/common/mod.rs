// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for integration tests.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use cxxglue::{ConfigLayer, GlueConfig};

/// Directory holding the test fixtures.
pub fn fixtures_dir() -> PathBuf {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(manifest_dir).join("tests").join("fixtures")
}

/// Directory of sample C++ headers.
pub fn header_dir() -> PathBuf {
    fixtures_dir().join("cxx_api")
}

/// Single-directory config over the sample headers, writing into `out`.
pub fn fixture_config(out: &Path) -> GlueConfig {
    let mut config = GlueConfig::single(
        "cxxapi",
        ConfigLayer {
            source_dir: Some(header_dir()),
            output_dir: Some(out.to_path_buf()),
            ..Default::default()
        },
    );
    config.swig.output_dir = Some(out.to_path_buf());
    config
}

/// Single-directory config over an arbitrary header directory.
pub fn config_for(src: &Path, out: &Path) -> GlueConfig {
    let mut config = GlueConfig::single(
        "test",
        ConfigLayer {
            source_dir: Some(src.to_path_buf()),
            output_dir: Some(out.to_path_buf()),
            ..Default::default()
        },
    );
    config.swig.output_dir = Some(out.to_path_buf());
    config
}

/// Read a generated file, panicking with its path when missing.
pub fn read_output(dir: &Path, name: &str) -> String {
    let path = dir.join(name);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read {}: {e}", path.display()))
}

/// Every file of a directory, keyed by name.
pub fn snapshot(dir: &Path) -> BTreeMap<String, String> {
    std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| {
            let entry = entry.unwrap();
            (
                entry.file_name().to_string_lossy().into_owned(),
                std::fs::read_to_string(entry.path()).unwrap(),
            )
        })
        .collect()
}
