// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Declaration classification.
//!
//! Decides, from naming conventions and configured keyword lists:
//! - whether a class is admitted at all ([`admit_class`])
//! - how an admitted class is registered ([`PointerCategory`])
//! - what happens to each public method ([`rules::classify_method`])

pub mod rules;

use tracing::info;

use crate::core::DirectoryConfig;
use crate::header::{Class, Method};

pub use rules::{
    classify_method, BindingForm, BindingStyle, Decision, MethodContext, MethodRule, SkipReason,
    Verdict, METHOD_RULES,
};

/// Name suffixes of classes registered as plain values.
pub const VALUE_SUFFIXES: &[&str] = &["Util", "Type"];

/// Name suffixes of manager-like classes, also registered as plain values.
pub const ALT_VALUE_SUFFIXES: &[&str] = &["Mgr", "Mask", "Status", "TypeHelper"];

/// Registration template bucket of a class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerCategory {
    /// Ignore-pointer keyword or value suffix; plain `class_<T>`
    BareValue,
    /// Manager/mask/status/helper suffix; plain `class_<T>`
    BareValueAlt,
    /// Everything else; held by `std::shared_ptr<T>`
    Shared,
}

impl PointerCategory {
    /// Decide the category for a class name.
    pub fn of(class_name: &str, config: &DirectoryConfig) -> Self {
        if contains_any(class_name, &config.ignore_ptr_keywords)
            || ends_with_any(class_name, VALUE_SUFFIXES)
        {
            PointerCategory::BareValue
        } else if ends_with_any(class_name, ALT_VALUE_SUFFIXES) {
            PointerCategory::BareValueAlt
        } else {
            PointerCategory::Shared
        }
    }

    /// Check whether instances are held by `std::shared_ptr`.
    pub fn is_shared(self) -> bool {
        self == PointerCategory::Shared
    }
}

/// Outcome of the class admission check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Admission {
    Admitted,
    /// Namespace is not one of the namespaces of interest
    ForeignNamespace,
    /// Class name contains an exclusion keyword
    ExcludedKeyword(String),
}

impl Admission {
    pub fn is_admitted(&self) -> bool {
        matches!(self, Admission::Admitted)
    }
}

/// Decide whether a class takes part in generation.
pub fn admit_class(class: &Class, config: &DirectoryConfig) -> Admission {
    if !config.is_namespace_of_interest(&class.namespace) {
        return Admission::ForeignNamespace;
    }
    let scoped = class.scoped_name();
    match find_keyword(&scoped, &config.ignore_class_keywords) {
        Some(keyword) => Admission::ExcludedKeyword(keyword.to_string()),
        None => Admission::Admitted,
    }
}

/// [`admit_class`] with the skip logged.
pub fn admit_class_logged(class: &Class, config: &DirectoryConfig) -> bool {
    match admit_class(class, config) {
        Admission::Admitted => {
            info!(class = %class.qualified_name(), "start to process class");
            true
        }
        Admission::ForeignNamespace => {
            info!(
                class = %class.qualified_name(),
                namespace = %class.namespace,
                "ignore class namespace"
            );
            false
        }
        Admission::ExcludedKeyword(keyword) => {
            info!(class = %class.qualified_name(), keyword = %keyword, "ignore class keywords");
            false
        }
    }
}

/// Human-readable signature used for keyword matching and placeholder lines.
///
/// `"\t" + ["virtual "] + ["static "] + return + " " + name + "(" + params + ")"`
/// where each parameter renders as `" {type} {name}"` and parameters are
/// joined by `,`.
pub fn signature(method: &Method) -> String {
    let mut sig = String::from("\t");
    if method.is_virtual {
        sig.push_str("virtual ");
    }
    if method.is_static {
        sig.push_str("static ");
    }
    sig.push_str(&method.return_type);
    sig.push(' ');
    sig.push_str(&method.name);
    sig.push('(');
    let params: Vec<String> = method
        .parameters
        .iter()
        .map(|p| format!(" {} {}", p.type_text, p.name))
        .collect();
    sig.push_str(&params.join(","));
    sig.push(')');
    sig
}

/// Check whether any keyword is a substring of `text`.
pub fn contains_any<S: AsRef<str>>(text: &str, keywords: &[S]) -> bool {
    keywords.iter().any(|k| text.contains(k.as_ref()))
}

/// First keyword that is a substring of `text`.
pub fn find_keyword<'a, S: AsRef<str>>(text: &str, keywords: &'a [S]) -> Option<&'a str> {
    keywords
        .iter()
        .map(AsRef::as_ref)
        .find(|k| text.contains(*k))
}

fn ends_with_any(text: &str, suffixes: &[&str]) -> bool {
    suffixes.iter().any(|s| text.ends_with(s))
}
