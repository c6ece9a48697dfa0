// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! pybind11 registration text for one header.

use std::collections::HashMap;

use tracing::debug;

use super::buffers::{EmissionBuffers, FileGlue};
use super::glue_source;
use crate::classify::{
    admit_class, admit_class_logged, classify_method, BindingForm, BindingStyle, MethodContext,
    PointerCategory, Verdict,
};
use crate::core::{DirectoryConfig, Target};
use crate::header::{qualify, Class, Enum, ParsedHeader, ENUM_TYPE_SUFFIX};
use crate::locate::FileConfig;

/// Generate the pybind11 glue for one parsed header.
///
/// Enums are registered first in declaration order, then every admitted
/// class. An enum named `<Class>_enumtype` is registered in place of
/// `<Class>` when that class is present and admitted; the class itself then
/// gets no method bindings.
pub fn emit_pybind(header: &ParsedHeader, file: &FileConfig) -> FileGlue {
    let config = &file.config;
    let source = glue_source(file);
    let mut buffers = EmissionBuffers::new();

    buffers.include(&config.include_text);
    buffers.include(&format!("\n#include \"{}\"\n", source.file_name));

    let paired = paired_enums(header, config);

    for e in &header.enums {
        if e.paired_class().is_some_and(|c| paired.contains_key(c)) {
            debug!(r#enum = %e.name, "enum registered with its class");
            continue;
        }
        emit_enum(&mut buffers, e);
    }

    for class in &header.classes {
        if !admit_class_logged(class, config) {
            buffers.counts_mut().skipped_classes += 1;
            continue;
        }
        match paired.get(class.scoped_name().as_str()) {
            Some(e) => emit_class_enum(&mut buffers, class, e),
            None => emit_class(&mut buffers, class, config),
        }
    }

    buffers.module_include(&format!("#include \"pybind_{}.h\" \n", source.stem));
    buffers.freeze(source)
}

/// `_enumtype` enums whose class is present and admitted, keyed by class name.
fn paired_enums<'a>(header: &'a ParsedHeader, config: &DirectoryConfig) -> HashMap<&'a str, &'a Enum> {
    header
        .enum_types()
        .filter(|(class_name, _)| {
            header
                .class(class_name)
                .is_some_and(|c| admit_class(c, config).is_admitted())
        })
        .collect()
}

/// Registration function name, e.g. `init_tiledb_Array`.
pub fn init_function_name(namespace: &str, name: &str) -> String {
    let name = name.replace("::", "_");
    if namespace.is_empty() {
        format!("init_{name}")
    } else {
        format!("init_{}_{name}", namespace.replace("::", "_"))
    }
}

fn prototype(fname: &str) -> String {
    format!("void {fname}(pybind11::module& m)")
}

fn emit_enum(buffers: &mut EmissionBuffers, e: &Enum) {
    let fname = init_function_name(&e.namespace, &e.name);
    let qualified = e.qualified_name();

    let decl = prototype(&fname);
    buffers.enum_decl(&format!("{decl};\n"));

    let mut body = format!("{decl} {{\n");
    body.push_str(&format!("\tpybind11::enum_<{qualified}>(m,\"{}\")\n", e.name));
    for value in &e.values {
        let path = if e.scoped {
            qualify(&qualified, &value.name)
        } else {
            qualify(&e.namespace, &value.name)
        };
        body.push_str(&format!("\t\t.value(\"{}\", {path})\n", value.name));
    }
    body.push_str("\t\t.export_values();\n\n}\n\n");
    buffers.enum_body(&body);

    buffers.module_call(&format!("\t{fname}(m);\n"));
    buffers.counts_mut().enums += 1;
}

fn emit_class_enum(buffers: &mut EmissionBuffers, class: &Class, e: &Enum) {
    let fname = init_function_name(&class.namespace, &class.scoped_name());
    let member_prefix = format!("{}{ENUM_TYPE_SUFFIX}_", class.name);

    let decl = prototype(&fname);
    buffers.enum_decl(&format!("{decl};\n"));

    let mut body = format!("{decl} {{\n");
    body.push_str(&format!(
        "\tpybind11::enum_<{}>(m,\"{}\")\n",
        e.qualified_name(),
        class.name
    ));
    for value in &e.values {
        let exposed = format!("{}_{}", class.name, value.name.replace(&member_prefix, ""));
        let path = if e.scoped {
            qualify(&e.qualified_name(), &value.name)
        } else {
            qualify(&e.namespace, &value.name)
        };
        body.push_str(&format!("\t\t.value(\"{exposed}\", {path})\n"));
    }
    body.push_str("\t\t.export_values();\n\n}\n\n");
    buffers.enum_body(&body);

    buffers.module_call(&format!("\t{fname}(m);\n"));
    buffers.counts_mut().enums += 1;
}

fn emit_class(buffers: &mut EmissionBuffers, class: &Class, config: &DirectoryConfig) {
    let fname = init_function_name(&class.namespace, &class.scoped_name());
    let qualified = class.qualified_name();
    let category = PointerCategory::of(&class.scoped_name(), config);

    let decl = prototype(&fname);
    buffers.class_decl(&format!("\n{decl};\n"));

    let mut body = format!("\n{decl} {{\n");
    if category.is_shared() {
        body.push_str(&format!(
            "\tpybind11::class_<{qualified}, std::shared_ptr<{qualified}> >(m,\"{}\")\n",
            class.name
        ));
    } else {
        body.push_str(&format!(
            "\tpybind11::class_<{qualified}>(m,\"{}\")\n",
            class.name
        ));
    }

    for method in &class.methods {
        let ctx = MethodContext::new(class, method, config);
        let Some(decision) = classify_method(&ctx, Target::Pybind) else {
            continue;
        };
        match decision.verdict {
            Verdict::Placeholder(_) => buffers.counts_mut().placeholders += 1,
            _ => buffers.counts_mut().bindings += 1,
        }
        body.push_str(&method_line(&ctx, decision.verdict, &qualified));
    }

    body.push_str("\t\t;\n\n}\n\n");
    buffers.class_body(&body);
    buffers.module_call(&format!("\t{fname}(m);\n"));
    buffers.counts_mut().classes += 1;
}

/// One line of class registration text for a classified method.
pub fn method_line(ctx: &MethodContext<'_>, verdict: Verdict, qualified_class: &str) -> String {
    let method = ctx.method;
    match verdict {
        Verdict::Placeholder(reason) => format!("//{} {}\n", reason.tag(), ctx.signature),
        Verdict::Constructor => {
            format!("\t\t.def(py::init<{}>())\n", method.parameter_types())
        }
        Verdict::Bind(form) => binding_line(ctx, form, qualified_class),
    }
}

fn binding_line(ctx: &MethodContext<'_>, form: BindingForm, qualified_class: &str) -> String {
    let method = ctx.method;
    let name = &method.name;
    let target = format!("&{qualified_class}::{name}");
    let types = method.parameter_types();
    // annotations need a name for every parameter
    let args: String = if method.has_named_parameters() {
        method
            .parameters
            .iter()
            .map(|p| format!(", py::arg(\"{}\")", p.name))
            .collect()
    } else {
        String::new()
    };

    match (form.is_static, form.style) {
        (true, BindingStyle::Cast) => format!(
            "\t\t.def_static(\"{name}\", static_cast< {} (*)({types}) >({target}))\n",
            method.return_type
        ),
        (true, BindingStyle::Plain) => format!("\t\t.def_static(\"{name}\", {target})\n"),
        (true, BindingStyle::Named) => format!("\t\t.def_static(\"{name}\", {target}{args})\n"),
        (false, BindingStyle::Cast) => {
            let constness = if method.is_const { " const" } else { "" };
            format!(
                "\t\t.def(\"{name}\", ({} ({qualified_class}::*)({types}){constness})({target}){args})\n",
                method.return_type
            )
        }
        (false, BindingStyle::Plain) => format!("\t\t.def(\"{name}\", {target})\n"),
        (false, BindingStyle::Named) => format!("\t\t.def(\"{name}\", {target}{args})\n"),
    }
}
