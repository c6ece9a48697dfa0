// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Append-only emission buffers.
//!
//! Emission steps receive `&mut EmissionBuffers` and may only append. Once a
//! header is done the buffers are frozen into an immutable [`FileGlue`].

/// Counters collected while emitting one header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmitCounts {
    /// Enums registered (standalone and class-paired)
    pub enums: usize,
    /// Classes registered with method bindings
    pub classes: usize,
    /// Classes skipped by admission
    pub skipped_classes: usize,
    /// Methods bound (constructors included)
    pub bindings: usize,
    /// Methods emitted as placeholders
    pub placeholders: usize,
}

impl EmitCounts {
    /// Add another set of counters to this one.
    pub fn merge(&mut self, other: &EmitCounts) {
        self.enums += other.enums;
        self.classes += other.classes;
        self.skipped_classes += other.skipped_classes;
        self.bindings += other.bindings;
        self.placeholders += other.placeholders;
    }
}

/// Per-header text accumulators.
#[derive(Debug, Default)]
pub struct EmissionBuffers {
    includes: String,
    enum_decls: String,
    enum_bodies: String,
    class_decls: String,
    class_bodies: String,
    module_calls: String,
    module_includes: String,
    counts: EmitCounts,
}

impl EmissionBuffers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append to the include section of the generated header.
    pub fn include(&mut self, text: &str) {
        self.includes.push_str(text);
    }

    /// Append an enum initializer declaration.
    pub fn enum_decl(&mut self, text: &str) {
        self.enum_decls.push_str(text);
    }

    /// Append an enum initializer body.
    pub fn enum_body(&mut self, text: &str) {
        self.enum_bodies.push_str(text);
    }

    /// Append a class initializer declaration.
    pub fn class_decl(&mut self, text: &str) {
        self.class_decls.push_str(text);
    }

    /// Append class initializer text.
    pub fn class_body(&mut self, text: &str) {
        self.class_bodies.push_str(text);
    }

    /// Append a module-registration call.
    pub fn module_call(&mut self, text: &str) {
        self.module_calls.push_str(text);
    }

    /// Append a module-registration include.
    pub fn module_include(&mut self, text: &str) {
        self.module_includes.push_str(text);
    }

    /// Mutable access to the emission counters.
    pub fn counts_mut(&mut self) -> &mut EmitCounts {
        &mut self.counts
    }

    /// Finish emission for one header.
    pub fn freeze(self, source: GlueSource) -> FileGlue {
        FileGlue {
            source,
            includes: self.includes,
            enum_decls: self.enum_decls,
            enum_bodies: self.enum_bodies,
            class_decls: self.class_decls,
            class_bodies: self.class_bodies,
            module_calls: self.module_calls,
            module_includes: self.module_includes,
            counts: self.counts,
        }
    }
}

/// Identity of the header a [`FileGlue`] was generated from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlueSource {
    /// Header path as located, `/`-separated
    pub path: String,
    /// Header file name, e.g. `array.h`
    pub file_name: String,
    /// File name without extension, e.g. `array`
    pub stem: String,
    /// Include guard of the generated header
    pub guard: String,
}

/// Frozen emission result for one header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileGlue {
    pub source: GlueSource,
    pub includes: String,
    pub enum_decls: String,
    pub enum_bodies: String,
    pub class_decls: String,
    pub class_bodies: String,
    pub module_calls: String,
    pub module_includes: String,
    pub counts: EmitCounts,
}

impl FileGlue {
    /// Name of the generated declaration file, `pybind_<stem>.h`.
    pub fn header_file_name(&self) -> String {
        format!("pybind_{}.h", self.source.stem)
    }

    /// Name of the generated body file, `pybind_<stem>.cpp`.
    pub fn source_file_name(&self) -> String {
        format!("pybind_{}.cpp", self.source.stem)
    }

    /// `#include` line for the original header.
    pub fn header_include(&self) -> String {
        format!("#include \"{}\"", self.source.file_name)
    }
}
