// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Member declaration analysis.
//!
//! The grammar hands over each member declaration as a flat token stream.
//! This module finds the parameter list, splits the prefix into flags and a
//! return type, reads the trailing qualifiers, and renders type text in a
//! canonical spacing so later keyword matching is stable across source
//! formatting styles.

use pest::iterators::Pairs;
use pest::Parser;

use super::{HeaderGrammar, Rule};
use crate::core::{GlueError, Result};
use crate::header::ast::{Method, Parameter};

/// One lexical token of a declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tok {
    /// Identifier or keyword
    Word(String),
    /// Operator or punctuation
    Punct(String),
    /// Number, string or character literal
    Literal(String),
    /// Parenthesised group, holding the text between the parentheses
    Group(String),
    /// `[...]` including the brackets
    Bracket(String),
    /// `{...}` including the braces
    Brace(String),
}

impl Tok {
    fn is_word(&self, word: &str) -> bool {
        matches!(self, Tok::Word(w) if w == word)
    }

    fn is_punct(&self, punct: &str) -> bool {
        matches!(self, Tok::Punct(p) if p == punct)
    }

    fn text(&self) -> String {
        match self {
            Tok::Word(s) | Tok::Punct(s) | Tok::Literal(s) => s.clone(),
            Tok::Group(inner) => format!("({})", collapse_whitespace(inner)),
            Tok::Bracket(s) | Tok::Brace(s) => collapse_whitespace(s),
        }
    }
}

/// Words that may precede a parenthesis without naming a function.
const NON_FUNCTION_WORDS: &[&str] = &[
    "decltype",
    "alignas",
    "alignof",
    "noexcept",
    "sizeof",
    "throw",
    "static_assert",
    "__attribute__",
    "__declspec",
];

/// Declaration kinds that never describe a bindable method.
const SKIPPED_LEADING_WORDS: &[&str] = &["friend", "typedef", "using", "static_assert"];

/// Specifiers removed from the return type and recorded as flags.
const PREFIX_SPECIFIERS: &[&str] = &[
    "virtual",
    "static",
    "inline",
    "explicit",
    "constexpr",
    "consteval",
    "extern",
];

const FUNDAMENTAL_TYPES: &[&str] = &[
    "void", "bool", "char", "wchar_t", "char8_t", "char16_t", "char32_t", "short", "int", "long",
    "float", "double", "signed", "unsigned", "auto",
];

const TYPE_QUALIFIERS: &[&str] = &["const", "volatile", "struct", "class", "enum", "typename"];

/// Convert grammar pairs into declaration tokens.
pub fn tokens_from_pairs(pairs: Pairs<'_, Rule>) -> Vec<Tok> {
    pairs
        .filter_map(|pair| match pair.as_rule() {
            Rule::identifier => Some(Tok::Word(pair.as_str().to_string())),
            Rule::punct => Some(Tok::Punct(pair.as_str().to_string())),
            Rule::number | Rule::string_lit | Rule::char_lit => {
                Some(Tok::Literal(pair.as_str().to_string()))
            }
            Rule::paren_group => {
                let inner = pair
                    .into_inner()
                    .next()
                    .map(|p| p.as_str().to_string())
                    .unwrap_or_default();
                Some(Tok::Group(inner))
            }
            Rule::bracket_group => Some(Tok::Bracket(pair.as_str().to_string())),
            Rule::brace_block => Some(Tok::Brace(pair.as_str().to_string())),
            _ => None,
        })
        .collect()
}

/// Tokenise free text with the same lexer the declaration grammar uses.
pub fn tokenize(text: &str) -> Result<Vec<Tok>> {
    let mut pairs = HeaderGrammar::parse(Rule::token_stream, text)
        .map_err(|e| GlueError::parse("token stream", e.to_string()))?;
    Ok(pairs
        .next()
        .map(|root| tokens_from_pairs(root.into_inner()))
        .unwrap_or_default())
}

/// Analyse one member declaration of `class_name`.
///
/// Returns `None` for anything that is not a method: fields, type aliases,
/// friend declarations and leftover macro invocations. A macro invocation in
/// front of a real declaration (`DISALLOW_COPY(X) void f();`) is skipped and
/// the remainder analysed.
pub fn analyze_declaration(
    tokens: &[Tok],
    template: Option<&str>,
    class_name: &str,
) -> Option<Method> {
    if let Some(Tok::Word(first)) = tokens.first() {
        if SKIPPED_LEADING_WORDS.contains(&first.as_str()) {
            return None;
        }
    }

    let mut start = 0;
    while start < tokens.len() {
        match analyze_from(&tokens[start..], template, class_name) {
            Analysis::Method(method) => return Some(*method),
            Analysis::NotMethod => return None,
            Analysis::Macro { resume } => start += resume,
        }
    }
    None
}

enum Analysis {
    Method(Box<Method>),
    NotMethod,
    /// A macro call ending at `resume`; analysis continues after it
    Macro {
        resume: usize,
    },
}

/// Locate the function name and its parameter group.
///
/// Returns `(name, first name token index, parameter group index)`.
fn find_function_name(tokens: &[Tok]) -> Option<(String, usize, usize)> {
    if let Some(op) = tokens.iter().position(|t| t.is_word("operator")) {
        // `operator()` carries an empty group before its parameters
        if matches!(tokens.get(op + 1), Some(Tok::Group(g)) if g.trim().is_empty())
            && matches!(tokens.get(op + 2), Some(Tok::Group(_)))
        {
            return Some(("operator()".to_string(), op, op + 2));
        }
        let group = op + 1 + tokens[op + 1..]
            .iter()
            .position(|t| matches!(t, Tok::Group(_)))?;
        let symbol = render_type(&tokens[op + 1..group]);
        let name = match tokens.get(op + 1) {
            Some(Tok::Word(_)) => format!("operator {symbol}"),
            _ => format!("operator{symbol}"),
        };
        return Some((name, op, group));
    }

    tokens.iter().enumerate().skip(1).find_map(|(i, tok)| {
        if !matches!(tok, Tok::Group(_)) {
            return None;
        }
        match &tokens[i - 1] {
            Tok::Word(w) if !NON_FUNCTION_WORDS.contains(&w.as_str()) => {
                Some((w.clone(), i - 1, i))
            }
            _ => None,
        }
    })
}

fn analyze_from(tokens: &[Tok], template: Option<&str>, class_name: &str) -> Analysis {
    let Some((name, name_idx, group_idx)) = find_function_name(tokens) else {
        return Analysis::NotMethod;
    };
    let is_operator = name.starts_with("operator");

    if !is_operator
        && (FUNDAMENTAL_TYPES.contains(&name.as_str()) || TYPE_QUALIFIERS.contains(&name.as_str()))
    {
        // function pointer field such as `void (*cb)(int);`
        return Analysis::NotMethod;
    }

    let is_destructor = name_idx > 0 && tokens[name_idx - 1].is_punct("~");
    let prefix_end = if is_destructor { name_idx - 1 } else { name_idx };
    let prefix = &tokens[..prefix_end];

    if prefix.iter().any(|t| t.is_punct("=")) {
        return Analysis::NotMethod;
    }

    let mut method = Method {
        name: if is_destructor {
            format!("~{name}")
        } else {
            name.clone()
        },
        template: template.map(collapse_whitespace),
        is_destructor,
        ..Default::default()
    };

    let mut return_tokens = Vec::with_capacity(prefix.len());
    for tok in prefix {
        match tok {
            Tok::Word(w) if w == "virtual" => method.is_virtual = true,
            Tok::Word(w) if w == "static" => method.is_static = true,
            Tok::Word(w) if PREFIX_SPECIFIERS.contains(&w.as_str()) => {}
            other => return_tokens.push(other.clone()),
        }
    }
    method.return_type = render_type(&return_tokens);
    method.is_constructor = !is_destructor && name == class_name && method.return_type.is_empty();

    if method.return_type.is_empty()
        && !method.is_constructor
        && !method.is_destructor
        && !is_operator
    {
        return Analysis::Macro {
            resume: group_idx + 1,
        };
    }

    let Tok::Group(params) = &tokens[group_idx] else {
        return Analysis::NotMethod;
    };
    method.parameters = match parse_parameters(params) {
        Ok(parameters) => parameters,
        Err(e) => {
            tracing::debug!(method = %method.name, error = %e, "dropping method with unreadable parameters");
            return Analysis::NotMethod;
        }
    };

    apply_trailing_qualifiers(&mut method, &tokens[group_idx + 1..]);
    Analysis::Method(Box::new(method))
}

/// Read `const`, `= 0`, `= delete` and a trailing return type.
fn apply_trailing_qualifiers(method: &mut Method, trailing: &[Tok]) {
    let mut i = 0;
    while i < trailing.len() {
        match &trailing[i] {
            Tok::Word(w) if w == "const" => method.is_const = true,
            Tok::Word(w) if w == "noexcept" || w == "throw" => {
                if matches!(trailing.get(i + 1), Some(Tok::Group(_))) {
                    i += 1;
                }
            }
            Tok::Punct(p) if p == "=" => {
                match trailing.get(i + 1) {
                    Some(Tok::Literal(l)) if l == "0" => method.is_pure_virtual = true,
                    Some(Tok::Word(w)) if w == "delete" => method.is_deleted = true,
                    _ => {}
                }
                i += 1;
            }
            Tok::Punct(p) if p == "->" => {
                let end = trailing[i + 1..]
                    .iter()
                    .position(|t| {
                        t.is_punct("=")
                            || t.is_word("override")
                            || t.is_word("final")
                            || t.is_word("noexcept")
                    })
                    .map_or(trailing.len(), |n| i + 1 + n);
                method.return_type = render_type(&trailing[i + 1..end]);
                i = end;
                continue;
            }
            // constructor initializer list
            Tok::Punct(p) if p == ":" => break,
            _ => {}
        }
        i += 1;
    }
}

/// Split and analyse the text between a method's parentheses.
pub fn parse_parameters(text: &str) -> Result<Vec<Parameter>> {
    let tokens = tokenize(text)?;
    if tokens.is_empty() || (tokens.len() == 1 && tokens[0].is_word("void")) {
        return Ok(Vec::new());
    }

    Ok(split_top_level(&tokens, ",")
        .into_iter()
        .filter(|chunk| !chunk.is_empty())
        .map(parameter_from_tokens)
        .collect())
}

/// Split on `sep` outside of angle brackets.
fn split_top_level<'a>(tokens: &'a [Tok], sep: &str) -> Vec<&'a [Tok]> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut begin = 0;
    for (i, tok) in tokens.iter().enumerate() {
        match tok {
            Tok::Punct(p) if p == "<" => depth += 1,
            Tok::Punct(p) if p == ">" => depth = depth.saturating_sub(1),
            Tok::Punct(p) if p == sep && depth == 0 => {
                parts.push(&tokens[begin..i]);
                begin = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&tokens[begin..]);
    parts
}

fn parameter_from_tokens(tokens: &[Tok]) -> Parameter {
    let default_at = {
        let mut depth = 0usize;
        tokens.iter().position(|t| match t {
            Tok::Punct(p) if p == "<" => {
                depth += 1;
                false
            }
            Tok::Punct(p) if p == ">" => {
                depth = depth.saturating_sub(1);
                false
            }
            Tok::Punct(p) => p == "=" && depth == 0,
            _ => false,
        })
    };
    let (decl, default) = match default_at {
        Some(at) => (&tokens[..at], Some(render_type(&tokens[at + 1..]))),
        None => (tokens, None),
    };

    // trailing array extents belong to the type
    let array_start = decl
        .iter()
        .rposition(|t| !matches!(t, Tok::Bracket(_)))
        .map_or(0, |i| i + 1);
    let (core, extents) = decl.split_at(array_start);

    let name_idx = core.len().checked_sub(1).filter(|&last| {
        let Tok::Word(word) = &core[last] else {
            return false;
        };
        last >= 1
            && !FUNDAMENTAL_TYPES.contains(&word.as_str())
            && !TYPE_QUALIFIERS.contains(&word.as_str())
            && !core[last - 1].is_punct("::")
            && core[..last].iter().any(|t| match t {
                Tok::Word(w) => !TYPE_QUALIFIERS.contains(&w.as_str()),
                _ => false,
            })
    });

    match name_idx {
        Some(idx) => {
            let mut type_tokens = core[..idx].to_vec();
            type_tokens.extend_from_slice(extents);
            Parameter {
                name: core[idx].text(),
                type_text: render_type(&type_tokens),
                default,
            }
        }
        None => Parameter {
            name: String::new(),
            type_text: render_type(decl),
            default,
        },
    }
}

/// Render tokens as canonical type text.
///
/// Tokens are separated by one space except after `::`, `<` and `~`, before
/// `<`, `>` and `,`, between consecutive `*`, and before parenthesised or
/// bracketed groups. `::` attaches to the name it qualifies, so a leading
/// global-scope `::` after `const` keeps its space.
pub fn render_type(tokens: &[Tok]) -> String {
    let mut out = String::new();
    let mut prev: Option<&Tok> = None;

    for tok in tokens {
        let text = tok.text();
        if let Some(p) = prev {
            let prev_text = p.text();
            let scope_continues = text == "::"
                && match p {
                    Tok::Word(w) => !TYPE_QUALIFIERS.contains(&w.as_str()),
                    Tok::Punct(q) => q == ">",
                    _ => false,
                };
            let glue = prev_text == "::"
                || prev_text == "<"
                || prev_text == "~"
                || scope_continues
                || text == "<"
                || text == ">"
                || text == ","
                || (prev_text == "*" && text == "*")
                || matches!(tok, Tok::Group(_) | Tok::Bracket(_));
            if !glue {
                out.push(' ');
            }
        }
        out.push_str(&text);
        prev = Some(tok);
    }

    out
}

/// Collapse runs of whitespace into single spaces.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyze(decl: &str, class_name: &str) -> Option<Method> {
        let tokens = tokenize(decl).expect("tokenize");
        analyze_declaration(&tokens, None, class_name)
    }

    fn render(text: &str) -> String {
        render_type(&tokenize(text).expect("tokenize"))
    }

    #[test]
    fn test_render_type_spacing() {
        assert_eq!(render("const char*"), "const char *");
        assert_eq!(render("char const *"), "char const *");
        assert_eq!(render("std::map< int,int >"), "std::map<int, int>");
        assert_eq!(render("std::vector<std::string>&"), "std::vector<std::string> &");
        assert_eq!(render("char**"), "char **");
        assert_eq!(
            render("::google::protobuf::Map<int32_t, Foo>"),
            "::google::protobuf::Map<int32_t, Foo>"
        );
        assert_eq!(render("unsigned   long"), "unsigned long");
        assert_eq!(
            render("const ::google::protobuf::Map<int, int>&"),
            "const ::google::protobuf::Map<int, int> &"
        );
    }

    #[test]
    fn test_simple_method() {
        let m = analyze("int get_value(const std::string& key) const", "Config").unwrap();
        assert_eq!(m.name, "get_value");
        assert_eq!(m.return_type, "int");
        assert!(m.is_const);
        assert_eq!(m.parameters.len(), 1);
        assert_eq!(m.parameters[0].name, "key");
        assert_eq!(m.parameters[0].type_text, "const std::string &");
    }

    #[test]
    fn test_flags() {
        let m = analyze("virtual void run() = 0", "Task").unwrap();
        assert!(m.is_virtual);
        assert!(m.is_pure_virtual);

        let s = analyze("static std::shared_ptr<Task> create(int id)", "Task").unwrap();
        assert!(s.is_static);
        assert_eq!(s.return_type, "std::shared_ptr<Task>");
    }

    #[test]
    fn test_constructors_and_destructors() {
        let ctor = analyze("explicit Task(int id, bool lazy = false)", "Task").unwrap();
        assert!(ctor.is_constructor);
        assert_eq!(ctor.return_type, "");
        assert_eq!(ctor.parameters[1].default.as_deref(), Some("false"));

        let deleted = analyze("Task(const Task&) = delete", "Task").unwrap();
        assert!(deleted.is_constructor);
        assert!(deleted.is_deleted);
        assert_eq!(deleted.parameters[0].name, "");
        assert_eq!(deleted.parameters[0].type_text, "const Task &");

        let dtor = analyze("virtual ~Task()", "Task").unwrap();
        assert!(dtor.is_destructor);
        assert!(dtor.is_virtual);
        assert_eq!(dtor.name, "~Task");
    }

    #[test]
    fn test_constructor_with_initializer_list() {
        let m = analyze("Task() : id_(0), name_(\"x\")", "Task").unwrap();
        assert!(m.is_constructor);
        assert!(!m.is_const);
    }

    #[test]
    fn test_operators() {
        let eq = analyze("bool operator==(const Task& other) const", "Task").unwrap();
        assert_eq!(eq.name, "operator==");
        let call = analyze("int operator()(int x)", "Task").unwrap();
        assert_eq!(call.name, "operator()");
        assert_eq!(call.parameters[0].name, "x");
        let conv = analyze("explicit operator bool() const", "Task").unwrap();
        assert_eq!(conv.name, "operator bool");
    }

    #[test]
    fn test_fields_are_not_methods() {
        assert!(analyze("int count", "Task").is_none());
        assert!(analyze("void (*callback)(int)", "Task").is_none());
        assert!(analyze("Foo foo = Foo(3)", "Task").is_none());
        assert!(analyze("friend class Other", "Task").is_none());
        assert!(analyze("using Base::Base", "Task").is_none());
    }

    #[test]
    fn test_leading_macro_is_skipped() {
        let m = analyze("DISALLOW_COPY(Task) void run()", "Task").unwrap();
        assert_eq!(m.name, "run");
        assert!(analyze("Q_OBJECT_MACRO(Task)", "Task").is_none());
    }

    #[test]
    fn test_trailing_return_type() {
        let m = analyze("auto size() const -> std::size_t", "Task").unwrap();
        assert_eq!(m.return_type, "std::size_t");
        assert!(m.is_const);
    }

    #[test]
    fn test_parameter_names() {
        let params = parse_parameters("unsigned long, const char* s, size_t n, int arr[4]").unwrap();
        assert_eq!(params[0].name, "");
        assert_eq!(params[0].type_text, "unsigned long");
        assert_eq!(params[1].name, "s");
        assert_eq!(params[2].name, "n");
        assert_eq!(params[2].type_text, "size_t");
        assert_eq!(params[3].name, "arr");
        assert_eq!(params[3].type_text, "int[4]");
    }

    #[test]
    fn test_parameters_with_template_commas() {
        let params =
            parse_parameters("const std::map<std::string, int>& m, std::pair<int,int> p = {1, 2}")
                .unwrap();
        assert_eq!(params.len(), 2);
        assert_eq!(params[0].type_text, "const std::map<std::string, int> &");
        assert_eq!(params[1].name, "p");
        assert_eq!(params[1].default.as_deref(), Some("{1, 2}"));
    }

    #[test]
    fn test_void_and_empty_parameter_lists() {
        assert!(parse_parameters("").unwrap().is_empty());
        assert!(parse_parameters(" void ").unwrap().is_empty());
        let variadic = parse_parameters("const char* fmt, ...").unwrap();
        assert_eq!(variadic[1].type_text, "...");
    }

    #[test]
    fn test_template_text_is_kept() {
        let tokens = tokenize("T get(int i)").unwrap();
        let m = analyze_declaration(&tokens, Some("template <typename  T>"), "Box").unwrap();
        assert_eq!(m.template.as_deref(), Some("template <typename T>"));
        assert!(m.is_template());
    }
}
