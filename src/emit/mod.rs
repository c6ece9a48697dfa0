// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Glue emission.
//!
//! - [`buffers`] - append-only per-header accumulators and their frozen form
//! - [`pybind`] - pybind11 registration text
//! - [`swig`] - SWIG interface fragments
//! - [`writer`] - file layout and aggregate outputs

pub mod buffers;
pub mod pybind;
pub mod swig;
pub mod writer;

pub use buffers::{EmissionBuffers, EmitCounts, FileGlue, GlueSource};
pub use pybind::{emit_pybind, init_function_name};
pub use swig::{emit_swig, SwigFileGlue};
pub use writer::{
    dump_text, module_init_text, pybind_header_text, pybind_source_text, swig_interface_text,
    write_file_pair, write_text, MODULE_INIT_FILE,
};

use crate::locate::FileConfig;

/// Identity of a located header, with the include guard of its generated header.
///
/// The guard is `<PRIMARY_NS>_PYBIND_<STEM>_H`, upper-cased, `::` turned into `_`.
pub fn glue_source(file: &FileConfig) -> GlueSource {
    let stem = file.stem();
    let guard = format!("{}_PYBIND_{}_H", file.config.primary_namespace(), stem)
        .replace("::", "_")
        .to_uppercase();
    GlueSource {
        path: file.path.to_string_lossy().into_owned(),
        file_name: file.file_name(),
        stem,
        guard,
    }
}
