// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Tolerant C++ header parser using Pest.
//!
//! The grammar recognises:
//! - Named, nested and inline namespaces
//! - `extern "C"` linkage blocks
//! - Classes, structs and unions (nested, templated, `typedef`'d)
//! - Plain and scoped enums with explicit initializers
//! - Access sections and member declarations
//!
//! Member declarations are analysed by [`declaration`]; only public methods
//! are recorded.

pub mod declaration;

use std::path::Path;

use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;
use tracing::{debug, warn};

use crate::core::{GlueError, Result};
use crate::header::ast::{Class, ClassKind, Enum, EnumValue, ParsedHeader};
use crate::header::preprocess::preprocess;

use declaration::{analyze_declaration, collapse_whitespace, tokens_from_pairs};

/// Pest parser for preprocessed C++ headers.
#[derive(Parser)]
#[grammar = "header/parser/cpp_header.pest"] // Path relative to src/ directory
pub struct HeaderGrammar;

/// Parse header source text.
///
/// `declspecs` are macro words stripped before parsing (export macros,
/// deprecation markers and similar).
pub fn parse_header(file_name: &str, source: &str, declspecs: &[String]) -> Result<ParsedHeader> {
    let text = preprocess(source, declspecs);
    let mut pairs = HeaderGrammar::parse(Rule::header, &text)
        .map_err(|e| GlueError::parse(file_name, format!("{e}")))?;

    let mut walker = Walker {
        header: ParsedHeader::new(file_name),
        namespaces: Vec::new(),
    };
    if let Some(root) = pairs.next() {
        walker.walk_items(root);
    }
    Ok(walker.header)
}

/// Read and parse a header file.
///
/// Failures are logged with the path and reported as `None` so that one bad
/// header never stops a directory run.
pub fn parse_header_file(path: &Path, declspecs: &[String]) -> Option<ParsedHeader> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let source = match std::fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) => {
            let err = GlueError::io(path, &e);
            warn!(fields = ?err.log_fields(), "failed to read header");
            return None;
        }
    };

    match parse_header(&file_name, &source, declspecs) {
        Ok(header) => Some(header),
        Err(err) => {
            warn!(path = %path.display(), error = %err, "failed to parse header");
            None
        }
    }
}

struct Walker {
    header: ParsedHeader,
    namespaces: Vec<String>,
}

impl Walker {
    fn namespace(&self) -> String {
        self.namespaces
            .iter()
            .filter(|n| !n.is_empty())
            .cloned()
            .collect::<Vec<_>>()
            .join("::")
    }

    fn walk_items(&mut self, pair: Pair<'_, Rule>) {
        for item in pair.into_inner() {
            match item.as_rule() {
                Rule::namespace_def => {
                    let name = item
                        .clone()
                        .into_inner()
                        .find(|p| p.as_rule() == Rule::namespace_name)
                        .map(|p| p.as_str().to_string())
                        .unwrap_or_default();
                    self.namespaces.push(name);
                    self.walk_items(item);
                    self.namespaces.pop();
                }
                Rule::linkage_block => self.walk_items(item),
                Rule::enum_def => {
                    if let Some(e) = parse_enum(item, &self.namespace()) {
                        self.header.enums.push(e);
                    }
                }
                Rule::class_def => {
                    let namespace = self.namespace();
                    self.header
                        .classes
                        .extend(parse_class(item, &namespace, None));
                }
                _ => {}
            }
        }
    }
}

fn parse_enum(pair: Pair<'_, Rule>, namespace: &str) -> Option<Enum> {
    let mut name = String::new();
    let mut alias = String::new();
    let mut scoped = false;
    let mut base_type = None;
    let mut values = Vec::new();

    for part in pair.into_inner() {
        match part.as_rule() {
            Rule::enum_key => scoped = true,
            Rule::enum_name => name = part.as_str().trim().to_string(),
            Rule::enum_alias => alias = part.as_str().trim().to_string(),
            Rule::enum_base => {
                base_type = part
                    .into_inner()
                    .next()
                    .map(|t| collapse_whitespace(t.as_str()));
            }
            Rule::enumerator_list => {
                for enumerator in part.into_inner() {
                    let mut inner = enumerator.into_inner();
                    let Some(ident) = inner.next() else {
                        continue;
                    };
                    values.push(EnumValue {
                        name: ident.as_str().to_string(),
                        value: inner.next().map(|v| collapse_whitespace(v.as_str())),
                    });
                }
            }
            _ => {}
        }
    }

    if name.is_empty() {
        name = alias;
    }
    if name.is_empty() {
        debug!(namespace, "skipping anonymous enum");
        return None;
    }

    Some(Enum {
        name,
        namespace: namespace.to_string(),
        scoped,
        base_type,
        values,
    })
}

/// Parse a class definition into the class followed by its public nested classes.
fn parse_class(pair: Pair<'_, Rule>, namespace: &str, parent: Option<&str>) -> Vec<Class> {
    let mut kind = ClassKind::Class;
    let mut name = String::new();
    let mut is_template = false;
    let mut is_typedef = false;

    for part in pair.clone().into_inner() {
        match part.as_rule() {
            Rule::template_header => is_template = true,
            Rule::kw_typedef => is_typedef = true,
            Rule::class_key => {
                kind = match part.as_str().trim() {
                    "struct" => ClassKind::Struct,
                    "union" => ClassKind::Union,
                    _ => ClassKind::Class,
                };
            }
            Rule::class_head_name => {
                // leftover macro words precede the real name
                let mut inner = part.into_inner();
                name = inner
                    .clone()
                    .filter(|p| p.as_rule() == Rule::identifier)
                    .last()
                    .map(|p| p.as_str().to_string())
                    .unwrap_or_default();
                if inner.any(|p| p.as_rule() == Rule::angle_group) {
                    is_template = true;
                }
            }
            Rule::class_trailer if name.is_empty() && is_typedef => {
                name = part
                    .into_inner()
                    .find(|p| p.as_rule() == Rule::identifier)
                    .map(|p| p.as_str().to_string())
                    .unwrap_or_default();
            }
            _ => {}
        }
    }

    if name.is_empty() {
        debug!(namespace, "skipping anonymous class");
        return Vec::new();
    }
    if is_template {
        debug!(namespace, class = %name, "skipping class template");
        return Vec::new();
    }

    let mut class = Class::new(name, namespace, kind);
    class.parent = parent.map(str::to_string);
    let scoped_name = class.scoped_name();
    let mut nested = Vec::new();
    let mut public = kind.default_public();

    for part in pair.into_inner() {
        match part.as_rule() {
            Rule::base_clause => {
                class.bases = part
                    .into_inner()
                    .next()
                    .map(|b| collapse_whitespace(b.as_str()));
            }
            Rule::access_spec => {
                public = part.as_str().trim_start().starts_with("public");
            }
            Rule::enum_def if public => {
                if let Some(e) = parse_enum(part, &class.qualified_name()) {
                    class.enums.push(e);
                }
            }
            Rule::class_def if public => {
                nested.extend(parse_class(part, namespace, Some(&scoped_name)));
            }
            Rule::declaration if public => {
                let mut template = None;
                let mut tokens = Vec::new();
                for piece in part.into_inner() {
                    match piece.as_rule() {
                        Rule::template_header => template = Some(piece.as_str().to_string()),
                        Rule::decl_tokens => tokens = tokens_from_pairs(piece.into_inner()),
                        _ => {}
                    }
                }
                if let Some(method) = analyze_declaration(&tokens, template.as_deref(), &class.name)
                {
                    class.methods.push(method);
                }
            }
            _ => {}
        }
    }

    let mut classes = Vec::with_capacity(nested.len() + 1);
    classes.push(class);
    classes.extend(nested);
    classes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> ParsedHeader {
        parse_header("test.h", text, &[]).expect("parse")
    }

    #[test]
    fn test_parse_empty_header() {
        let header = parse("#pragma once\n// nothing here\n");
        assert!(header.is_empty());
        assert_eq!(header.file_name, "test.h");
    }

    #[test]
    fn test_parse_namespaced_class() {
        let header = parse(
            r#"
#include <string>
namespace tiledb {
class Context {
 public:
  Context();
  explicit Context(const Config& config);
  ~Context();
  std::string get_tag(const std::string& key) const;
  static std::shared_ptr<Context> create();
 private:
  void hidden();
  int state_;
};
}  // namespace tiledb
"#,
        );
        assert_eq!(header.classes.len(), 1);
        let class = &header.classes[0];
        assert_eq!(class.name, "Context");
        assert_eq!(class.namespace, "tiledb");
        let names: Vec<_> = class.methods.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Context", "Context", "~Context", "get_tag", "create"]
        );
        assert!(class.methods[3].is_const);
        assert!(class.methods[4].is_static);
    }

    #[test]
    fn test_class_default_private_struct_default_public() {
        let header = parse("class A { void f(); }; struct B { void g(); };");
        assert!(header.class("A").unwrap().methods.is_empty());
        assert_eq!(header.class("B").unwrap().methods.len(), 1);
    }

    #[test]
    fn test_parse_enums() {
        let header = parse(
            r#"
namespace tiledb {
enum Layout_enumtype {
  Layout_enumtype_ROW = 0,
  Layout_enumtype_COL = 1 << 2,
};
enum class Datatype : uint8_t { INT32, FLOAT64 };
typedef enum { A, B } Alias;
enum { ANONYMOUS };
}
"#,
        );
        assert_eq!(header.enums.len(), 3);
        let layout = &header.enums[0];
        assert_eq!(layout.paired_class(), Some("Layout"));
        assert_eq!(layout.values[1].value.as_deref(), Some("1 << 2"));
        let datatype = header.enum_named("Datatype").unwrap();
        assert!(datatype.scoped);
        assert_eq!(datatype.base_type.as_deref(), Some("uint8_t"));
        assert!(header.enum_named("Alias").is_some());
    }

    #[test]
    fn test_nested_namespaces_and_classes() {
        let header = parse(
            r#"
namespace a { namespace b {
struct Outer {
  struct Inner { int value() const; };
  enum Kind { X, Y };
};
} }
namespace a::c { class Other { public: void f(); }; }
"#,
        );
        let outer = header.class("Outer").unwrap();
        assert_eq!(outer.namespace, "a::b");
        assert_eq!(outer.enums.len(), 1);
        assert_eq!(outer.enums[0].namespace, "a::b::Outer");
        let inner = header.class("Outer::Inner").unwrap();
        assert_eq!(inner.parent.as_deref(), Some("Outer"));
        assert_eq!(inner.qualified_name(), "a::b::Outer::Inner");
        assert_eq!(header.class("Other").unwrap().namespace, "a::c");
    }

    #[test]
    fn test_inline_bodies_and_templates() {
        let header = parse(
            r#"
namespace tiledb {
class Query {
 public:
  Query() : count_(0) { init(); }
  template <typename T>
  Query& set_buffer(const std::string& name, std::vector<T>& buf) { return *this; }
  int count() const { if (x) { return 1; } return count_; }
  using Base::Base;
  friend class Other;
};
template <typename T> class Holder { public: T get(); };
}
"#,
        );
        assert_eq!(header.classes.len(), 1);
        let query = header.class("Query").unwrap();
        let names: Vec<_> = query.methods.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Query", "set_buffer", "count"]);
        assert!(query.methods[1].is_template());
        assert_eq!(query.methods[1].return_type, "Query &");
    }

    #[test]
    fn test_declspecs_and_extern_blocks() {
        let header = parse_header(
            "api.h",
            r#"
extern "C" {
int tiledb_version(int* major);
}
namespace tiledb {
class TILEDB_EXPORT Array {
 public:
  TILEDB_DEPRECATED void close();
};
}
"#,
            &["TILEDB_EXPORT".to_string(), "TILEDB_DEPRECATED".to_string()],
        )
        .unwrap();
        let array = header.class("Array").unwrap();
        assert_eq!(array.methods.len(), 1);
        assert_eq!(array.methods[0].return_type, "void");
    }

    #[test]
    fn test_typedef_struct() {
        let header = parse("typedef struct { int x; void f(); } Point;");
        let point = header.class("Point").unwrap();
        assert_eq!(point.kind, ClassKind::Struct);
        assert_eq!(point.methods.len(), 1);
    }

    #[test]
    fn test_base_clause() {
        let header = parse("class D : public B<int>, private C { public: void f(); };");
        assert_eq!(
            header.class("D").unwrap().bases.as_deref(),
            Some("public B<int>, private C")
        );
    }

    #[test]
    fn test_unbalanced_input_is_an_error() {
        let err = parse_header("bad.h", "class A { void f();", &[]).unwrap_err();
        assert!(matches!(err, GlueError::ParseError { .. }));
    }

    #[test]
    fn test_parse_header_file_missing() {
        assert!(parse_header_file(Path::new("/nonexistent/nothing.h"), &[]).is_none());
    }
}
