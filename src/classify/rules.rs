// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Ordered method rules.
//!
//! [`METHOD_RULES`] is evaluated top to bottom and the first rule returning a
//! verdict wins. Each rule is tagged with a name (used in logs and tests) and
//! with whether it also drives `%ignore` directives in interface files.

use tracing::debug;

use super::{contains_any, find_keyword, signature};
use crate::core::{DirectoryConfig, Target};
use crate::header::{Class, Method};

/// Accessor prefixes of generated message classes that must never be bound.
pub const ACCESSOR_PREFIXES: &[&str] = &["mutable_", "release_", "set_allocated_"];

/// Setter prefix checked by the string-setter rules.
pub const SETTER_PREFIX: &str = "set_";

/// Accepted spellings of a C string parameter.
pub const STRING_POINTER_TYPES: &[&str] = &["const char *", "char const *"];

/// Length parameter type paired with a C string.
pub const SIZE_TYPE: &str = "size_t";

/// Marker of generated type-wrapper classes.
pub const TYPE_WRAPPER_MARKER: &str = "Type";

/// Class suffixes of static utility classes; their constructors are not bound.
pub const UTILITY_SUFFIXES: &[&str] = &["Util", "Mgr"];

/// Prefix of external aggregate types that cannot be bound generically.
pub const AGGREGATE_PREFIX: &str = "google::protobuf";

/// Aggregate map marker; always rejected.
pub const AGGREGATE_MAP_MARKER: &str = "::google::protobuf::Map";

/// Fixed-width integer aliases under [`AGGREGATE_PREFIX`] that bind fine.
pub const AGGREGATE_INT_ALIASES: &[&str] = &[
    "google::protobuf::int32",
    "google::protobuf::uint32",
    "google::protobuf::int64",
    "google::protobuf::uint64",
];

/// Parameter types that make pybind11 forward arguments unchanged.
pub const VARIADIC_MARKERS: &[&str] = &["py::args", "py::kwargs"];

/// Why a method was emitted as a commented-out placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// `mutable_` / `release_` / `set_allocated_` accessor
    Accessor,
    /// `set_` taking a single C string
    StringSetter,
    /// `set_` taking a C string and a length
    StringLengthSetter,
    /// Signature contains a method-exclusion keyword
    Keyword,
    /// Signature mentions a type wrapper in the primary namespace
    TypeWrapper,
    DeletedConstructor,
    /// Constructor of a static utility class
    StaticClassConstructor,
    Destructor,
    TemplateFunction,
    /// Signature uses an external aggregate type
    ExternalAggregate,
}

impl SkipReason {
    /// Placeholder tag written after `//`.
    pub fn tag(self) -> &'static str {
        match self {
            SkipReason::Accessor | SkipReason::StringSetter | SkipReason::ExternalAggregate => {
                "ignore"
            }
            SkipReason::StringLengthSetter => "ignore_constchar",
            SkipReason::Keyword => "ignore_keywords",
            SkipReason::TypeWrapper => "ignore_Type",
            SkipReason::DeletedConstructor => "ignore_constructor_deleted",
            SkipReason::StaticClassConstructor => "ignore_constructor_staticclass",
            SkipReason::Destructor => "ignore_destructor",
            SkipReason::TemplateFunction => "ignore_templatefunction",
        }
    }
}

/// How a method reference is written in a binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingStyle {
    /// Function-pointer cast selecting one overload
    Cast,
    /// Plain address-of, arguments forwarded as-is
    Plain,
    /// Address-of with `py::arg` annotations
    Named,
}

/// Binding emitted for a method that passed every rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BindingForm {
    pub is_static: bool,
    pub style: BindingStyle,
}

/// Decision for one method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Placeholder(SkipReason),
    /// Bound as `py::init<...>`
    Constructor,
    Bind(BindingForm),
}

/// Everything a rule may look at.
#[derive(Debug, Clone)]
pub struct MethodContext<'a> {
    pub class: &'a Class,
    pub method: &'a Method,
    pub config: &'a DirectoryConfig,
    /// Rendered signature, see [`signature`]
    pub signature: String,
    /// Public methods of the class sharing this method's name
    pub overloads: usize,
}

impl<'a> MethodContext<'a> {
    pub fn new(class: &'a Class, method: &'a Method, config: &'a DirectoryConfig) -> Self {
        Self {
            class,
            method,
            config,
            signature: signature(method),
            overloads: class.overload_count(&method.name),
        }
    }

    fn first_param_is_string(&self) -> bool {
        self.method
            .parameters
            .first()
            .is_some_and(|p| STRING_POINTER_TYPES.contains(&p.type_text.as_str()))
    }
}

/// A named predicate over a method.
#[derive(Clone, Copy)]
pub struct MethodRule {
    pub name: &'static str,
    /// Also applies when generating interface files
    pub swig: bool,
    pub apply: fn(&MethodContext<'_>) -> Option<Verdict>,
}

impl std::fmt::Debug for MethodRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MethodRule")
            .field("name", &self.name)
            .field("swig", &self.swig)
            .finish_non_exhaustive()
    }
}

impl MethodRule {
    /// Check whether the rule takes part for `target`.
    pub fn applies_to(&self, target: Target) -> bool {
        match target {
            Target::Pybind => true,
            Target::Swig => self.swig,
        }
    }
}

/// Rules in precedence order.
pub const METHOD_RULES: &[MethodRule] = &[
    MethodRule {
        name: "accessor",
        swig: true,
        apply: accessor_rule,
    },
    MethodRule {
        name: "string_setter",
        swig: true,
        apply: string_setter_rule,
    },
    MethodRule {
        name: "keyword",
        swig: true,
        apply: keyword_rule,
    },
    MethodRule {
        name: "type_wrapper",
        swig: false,
        apply: type_wrapper_rule,
    },
    MethodRule {
        name: "constructor",
        swig: false,
        apply: constructor_rule,
    },
    MethodRule {
        name: "destructor",
        swig: false,
        apply: destructor_rule,
    },
    MethodRule {
        name: "template",
        swig: false,
        apply: template_rule,
    },
    MethodRule {
        name: "external_aggregate",
        swig: false,
        apply: aggregate_rule,
    },
    MethodRule {
        name: "binding",
        swig: false,
        apply: binding_rule,
    },
];

/// A verdict together with the rule that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub rule: &'static str,
    pub verdict: Verdict,
}

/// Run the rules for `target` and return the first verdict.
///
/// For [`Target::Pybind`] the final binding rule always matches, so the
/// result is never `None`. For [`Target::Swig`] `None` means the method is
/// left to the interface generator's defaults.
pub fn classify_method(ctx: &MethodContext<'_>, target: Target) -> Option<Decision> {
    let decision = METHOD_RULES
        .iter()
        .filter(|rule| rule.applies_to(target))
        .find_map(|rule| {
            (rule.apply)(ctx).map(|verdict| Decision {
                rule: rule.name,
                verdict,
            })
        });

    if let Some(d) = &decision {
        debug!(
            class = %ctx.class.name,
            method = %ctx.method.name,
            rule = d.rule,
            verdict = ?d.verdict,
            "classified method"
        );
    }
    decision
}

fn accessor_rule(ctx: &MethodContext<'_>) -> Option<Verdict> {
    ACCESSOR_PREFIXES
        .iter()
        .any(|p| ctx.method.name.starts_with(p))
        .then_some(Verdict::Placeholder(SkipReason::Accessor))
}

fn string_setter_rule(ctx: &MethodContext<'_>) -> Option<Verdict> {
    if !ctx.method.name.starts_with(SETTER_PREFIX) || !ctx.first_param_is_string() {
        return None;
    }
    match ctx.method.parameters.as_slice() {
        [_] => Some(Verdict::Placeholder(SkipReason::StringSetter)),
        [_, len] if len.type_text == SIZE_TYPE => {
            Some(Verdict::Placeholder(SkipReason::StringLengthSetter))
        }
        _ => None,
    }
}

fn keyword_rule(ctx: &MethodContext<'_>) -> Option<Verdict> {
    let keyword = find_keyword(&ctx.signature, &ctx.config.ignore_method_keywords)?;
    debug!(method = %ctx.method.name, keyword = %keyword, "method keyword matched");
    Some(Verdict::Placeholder(SkipReason::Keyword))
}

fn type_wrapper_rule(ctx: &MethodContext<'_>) -> Option<Verdict> {
    (ctx.class.namespace == ctx.config.primary_namespace()
        && ctx.signature.contains(TYPE_WRAPPER_MARKER))
    .then_some(Verdict::Placeholder(SkipReason::TypeWrapper))
}

fn constructor_rule(ctx: &MethodContext<'_>) -> Option<Verdict> {
    if !ctx.method.is_constructor {
        return None;
    }
    if ctx.method.is_deleted {
        Some(Verdict::Placeholder(SkipReason::DeletedConstructor))
    } else if UTILITY_SUFFIXES
        .iter()
        .any(|s| ctx.class.name.ends_with(s))
    {
        Some(Verdict::Placeholder(SkipReason::StaticClassConstructor))
    } else {
        Some(Verdict::Constructor)
    }
}

fn destructor_rule(ctx: &MethodContext<'_>) -> Option<Verdict> {
    ctx.method
        .is_destructor
        .then_some(Verdict::Placeholder(SkipReason::Destructor))
}

fn template_rule(ctx: &MethodContext<'_>) -> Option<Verdict> {
    ctx.method
        .is_template()
        .then_some(Verdict::Placeholder(SkipReason::TemplateFunction))
}

fn aggregate_rule(ctx: &MethodContext<'_>) -> Option<Verdict> {
    let sig = &ctx.signature;
    let generic_aggregate =
        sig.contains(AGGREGATE_PREFIX) && !contains_any(sig, AGGREGATE_INT_ALIASES);
    (generic_aggregate || sig.contains(AGGREGATE_MAP_MARKER))
        .then_some(Verdict::Placeholder(SkipReason::ExternalAggregate))
}

fn binding_rule(ctx: &MethodContext<'_>) -> Option<Verdict> {
    let style = if ctx.overloads > 1 {
        BindingStyle::Cast
    } else if contains_any(&ctx.signature, VARIADIC_MARKERS) {
        BindingStyle::Plain
    } else {
        BindingStyle::Named
    };
    Some(Verdict::Bind(BindingForm {
        is_static: ctx.method.is_static,
        style,
    }))
}
