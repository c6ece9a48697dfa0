// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Declaration types produced by the header parser.

use serde::Serialize;

/// Marker closing the name of an enum paired with a class.
pub const ENUM_TYPE_SUFFIX: &str = "_enumtype";

/// Declarations found in one header file, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParsedHeader {
    /// File name the header was read from
    pub file_name: String,
    /// Enums declared at namespace scope
    pub enums: Vec<Enum>,
    /// Classes, structs and unions (nested ones included)
    pub classes: Vec<Class>,
}

impl ParsedHeader {
    /// Create an empty header.
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            ..Default::default()
        }
    }

    /// Look up a class by its (scoped) name.
    pub fn class(&self, name: &str) -> Option<&Class> {
        self.classes.iter().find(|c| c.scoped_name() == name)
    }

    /// Look up an enum by name.
    pub fn enum_named(&self, name: &str) -> Option<&Enum> {
        self.enums.iter().find(|e| e.name == name)
    }

    /// Enums whose name carries [`ENUM_TYPE_SUFFIX`], keyed by the owning class name.
    pub fn enum_types(&self) -> impl Iterator<Item = (&str, &Enum)> {
        self.enums.iter().filter_map(|e| e.paired_class().map(|c| (c, e)))
    }

    /// Check whether nothing was declared.
    pub fn is_empty(&self) -> bool {
        self.enums.is_empty() && self.classes.is_empty()
    }
}

/// An enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Enum {
    /// Enum name (empty for anonymous enums)
    pub name: String,
    /// Enclosing namespace path, `::`-joined (empty at global scope)
    pub namespace: String,
    /// `enum class` / `enum struct`
    pub scoped: bool,
    /// Underlying type text, if declared
    pub base_type: Option<String>,
    /// Members in declaration order
    pub values: Vec<EnumValue>,
}

impl Enum {
    /// Owning class name for `<Class>_enumtype` enums.
    pub fn paired_class(&self) -> Option<&str> {
        self.name
            .strip_suffix(ENUM_TYPE_SUFFIX)
            .filter(|name| !name.is_empty())
    }

    /// Fully qualified enum type name.
    pub fn qualified_name(&self) -> String {
        qualify(&self.namespace, &self.name)
    }
}

/// A single enumerator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumValue {
    pub name: String,
    /// Explicit initializer text, if any
    pub value: Option<String>,
}

/// Kind of class-like declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassKind {
    Class,
    Struct,
    Union,
}

impl ClassKind {
    /// Members are public until the first access specifier.
    pub fn default_public(self) -> bool {
        !matches!(self, ClassKind::Class)
    }
}

/// A class, struct or union with its public methods.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Class {
    pub name: String,
    /// Enclosing namespace path, `::`-joined
    pub namespace: String,
    /// Enclosing class for nested declarations (`Outer` or `Outer::Mid`)
    pub parent: Option<String>,
    pub kind: ClassKind,
    /// Base-clause text, if any
    pub bases: Option<String>,
    /// Public methods in declaration order
    pub methods: Vec<Method>,
    /// Enums declared inside the class
    pub enums: Vec<Enum>,
}

impl Class {
    /// Create an empty class.
    pub fn new(name: impl Into<String>, namespace: impl Into<String>, kind: ClassKind) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            parent: None,
            kind,
            bases: None,
            methods: Vec::new(),
            enums: Vec::new(),
        }
    }

    /// Name including enclosing classes (`Outer::Inner`).
    pub fn scoped_name(&self) -> String {
        match &self.parent {
            Some(parent) => format!("{parent}::{}", self.name),
            None => self.name.clone(),
        }
    }

    /// Fully qualified name including the namespace.
    pub fn qualified_name(&self) -> String {
        qualify(&self.namespace, &self.scoped_name())
    }

    /// Number of public methods sharing `name`.
    pub fn overload_count(&self, name: &str) -> usize {
        self.methods.iter().filter(|m| m.name == name).count()
    }
}

/// A method parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parameter {
    /// Parameter name (empty when unnamed)
    pub name: String,
    /// Rendered type text, e.g. `const std::string &`
    #[serde(rename = "type")]
    pub type_text: String,
    /// Default argument text, if any
    pub default: Option<String>,
}

/// A public method.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Method {
    /// Method name; destructors keep the leading `~`
    pub name: String,
    /// Rendered return type (empty for constructors and destructors)
    pub return_type: String,
    pub parameters: Vec<Parameter>,
    pub is_virtual: bool,
    pub is_pure_virtual: bool,
    pub is_const: bool,
    pub is_static: bool,
    pub is_constructor: bool,
    pub is_destructor: bool,
    pub is_deleted: bool,
    /// `template<...>` header text for member templates
    pub template: Option<String>,
}

impl Method {
    /// Comma-joined parameter types, as used in casts and `py::init<...>`.
    pub fn parameter_types(&self) -> String {
        self.parameters
            .iter()
            .map(|p| p.type_text.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Check whether every parameter has a name.
    pub fn has_named_parameters(&self) -> bool {
        self.parameters.iter().all(|p| !p.name.is_empty())
    }

    /// Check whether the template header declares type parameters.
    pub fn is_template(&self) -> bool {
        self.template
            .as_deref()
            .is_some_and(|t| t.contains("typename") || t.contains("class"))
    }
}

/// Join a namespace path and a name with `::`.
pub fn qualify(namespace: &str, name: &str) -> String {
    if namespace.is_empty() {
        name.to_string()
    } else {
        format!("{namespace}::{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn method(name: &str, params: &[(&str, &str)]) -> Method {
        Method {
            name: name.to_string(),
            return_type: "void".to_string(),
            parameters: params
                .iter()
                .map(|(t, n)| Parameter {
                    name: n.to_string(),
                    type_text: t.to_string(),
                    default: None,
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_paired_class() {
        let e = Enum {
            name: "Layout_enumtype".to_string(),
            namespace: "tiledb".to_string(),
            scoped: false,
            base_type: None,
            values: Vec::new(),
        };
        assert_eq!(e.paired_class(), Some("Layout"));
        assert_eq!(e.qualified_name(), "tiledb::Layout_enumtype");

        let plain = Enum {
            name: "_enumtype".to_string(),
            ..e
        };
        assert_eq!(plain.paired_class(), None);
    }

    #[test]
    fn test_scoped_and_qualified_names() {
        let mut c = Class::new("Inner", "tiledb", ClassKind::Struct);
        assert_eq!(c.qualified_name(), "tiledb::Inner");
        c.parent = Some("Outer".to_string());
        assert_eq!(c.scoped_name(), "Outer::Inner");
        assert_eq!(c.qualified_name(), "tiledb::Outer::Inner");

        let global = Class::new("G", "", ClassKind::Class);
        assert_eq!(global.qualified_name(), "G");
    }

    #[test]
    fn test_overload_count() {
        let mut c = Class::new("Query", "tiledb", ClassKind::Class);
        c.methods.push(method("set", &[("int", "a")]));
        c.methods.push(method("set", &[("double", "a")]));
        c.methods.push(method("get", &[]));
        assert_eq!(c.overload_count("set"), 2);
        assert_eq!(c.overload_count("get"), 1);
        assert_eq!(c.overload_count("missing"), 0);
    }

    #[test]
    fn test_parameter_types_and_names() {
        let m = method("f", &[("const char *", "s"), ("size_t", "")]);
        assert_eq!(m.parameter_types(), "const char *,size_t");
        assert!(!m.has_named_parameters());
    }

    #[test]
    fn test_is_template() {
        let mut m = method("f", &[]);
        assert!(!m.is_template());
        m.template = Some("template<typename T>".to_string());
        assert!(m.is_template());
        m.template = Some("template<>".to_string());
        assert!(!m.is_template());
    }
}
