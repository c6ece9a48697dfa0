// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Rendering of frozen glue into output files.
//!
//! Every `*_text` function is pure; only [`write_text`] and
//! [`write_file_pair`] touch the filesystem.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::buffers::FileGlue;
use super::swig::SwigFileGlue;
use crate::core::{GlueError, ModuleConfig, Result, SwigConfig};

/// Name of the aggregated module-init source.
pub const MODULE_INIT_FILE: &str = "init_module_pybind.cpp";

/// Declaration file for one header: guard, includes, initializer prototypes.
pub fn pybind_header_text(glue: &FileGlue) -> String {
    let guard = &glue.source.guard;
    let mut text = format!("#pragma once\n#ifndef {guard}\n#define {guard}\n\n");
    text.push_str(&glue.includes);
    text.push_str(&glue.enum_decls);
    text.push_str(&glue.class_decls);
    text.push_str("\n\n#endif");
    text
}

/// Body file for one header: initializer definitions.
pub fn pybind_source_text(glue: &FileGlue) -> String {
    let mut text = format!("#include \"{}\" \n", glue.header_file_name());
    text.push_str(&glue.enum_bodies);
    text.push_str(&glue.class_bodies);
    text
}

/// Write `pybind_<stem>.h` and `pybind_<stem>.cpp` into `out_dir`.
pub fn write_file_pair(glue: &FileGlue, out_dir: &Path) -> Result<(PathBuf, PathBuf)> {
    let header_path = out_dir.join(glue.header_file_name());
    let source_path = out_dir.join(glue.source_file_name());
    write_text(&header_path, &pybind_header_text(glue))?;
    write_text(&source_path, &pybind_source_text(glue))?;
    Ok((header_path, source_path))
}

/// Aggregated module-init source registering every processed header.
///
/// `common_include` is the include boilerplate of the last directory.
pub fn module_init_text(module: &ModuleConfig, common_include: &str, files: &[FileGlue]) -> String {
    let mut includes = String::new();
    let mut calls = format!("\t{}(m);\n", module.common_init);
    for glue in files {
        includes.push('\n');
        includes.push_str(&glue.module_includes);
        calls.push_str(&format!("\n//file:{}", glue.source.path));
        calls.push('\n');
        calls.push_str(&glue.module_calls);
    }

    let name = &module.name;
    let mut text = String::from(common_include);
    text.push_str(&format!("#include \"{}\"\n", module.common_header));
    text.push_str("\n//////\n");
    text.push_str(&includes);
    text.push_str("////////////\n");
    text.push_str(&format!("#ifdef {}\n", module.legacy_switch));
    text.push_str(&format!(
        "PYBIND11_MODULE({}, m)\n",
        module.legacy_module_name()
    ));
    text.push_str("#else\n");
    text.push_str(&format!("PYBIND11_MODULE({name}, m)\n"));
    text.push_str("#endif\n");
    text.push_str("{\n");
    text.push_str(&calls);
    text.push_str(&format!("\n}}//PYBIND11_MODULE({name}, m)\n"));
    text
}

/// Single-file concatenation of every header's glue, for inspection.
pub fn dump_text(files: &[FileGlue]) -> String {
    let mut includes = String::new();
    let mut bodies = String::new();
    for glue in files {
        let path = &glue.source.path;
        includes.push('\n');
        includes.push_str(&glue.header_include());
        bodies.push_str(&format!("\n//begin_filename:{path}\n"));
        bodies.push_str(&glue.enum_bodies);
        bodies.push('\n');
        bodies.push_str(&glue.class_bodies);
        bodies.push_str(&format!("//end_filename:{path}\n\n"));
    }
    includes.push_str("\n\n");
    includes.push_str(&bodies);
    includes
}

/// Combined SWIG interface file.
pub fn swig_interface_text(swig: &SwigConfig, files: &[SwigFileGlue]) -> String {
    let mut shared_ptr = String::new();
    let mut copy = String::new();
    let mut ignore = String::new();
    let mut headers = String::new();
    for glue in files {
        for (acc, piece) in [
            (&mut shared_ptr, &glue.shared_ptr),
            (&mut copy, &glue.include_copy),
            (&mut ignore, &glue.ignore),
            (&mut headers, &glue.include_headers),
        ] {
            acc.push('\n');
            acc.push_str(piece);
        }
    }

    let guard = format!("SWIG_{}_I", swig.name.to_uppercase());
    let mut text = format!("#ifndef {guard}\n#define {guard}\n");
    text.push_str("\n//////include other i files\n");
    for include in &swig.includes {
        text.push_str(&format!("%include {include}\n"));
    }
    text.push_str("\n//////\n");
    text.push_str("\n//////shared_ptr\n");
    text.push_str(&shared_ptr);
    text.push_str("\n//////end shared_ptr\n");
    text.push_str("\n//////\n");
    text.push_str("%{\n");
    text.push_str(&copy);
    text.push_str("%}\n");
    text.push_str("\n//////ignore\n");
    text.push_str(&ignore);
    text.push_str("\n//////end ignore\n");
    text.push_str("\n//////headers\n");
    text.push_str(&headers);
    text.push_str("\n//////end headers\n");
    text.push_str("\n#endif\n");
    text
}

/// Write `text` to `path`, creating missing parent directories.
pub fn write_text(path: &Path, text: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| GlueError::io(parent, &e))?;
    }
    fs::write(path, text).map_err(|e| GlueError::io(path, &e))?;
    debug!(path = %path.display(), bytes = text.len(), "wrote file");
    Ok(())
}
