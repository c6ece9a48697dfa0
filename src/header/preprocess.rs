// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Source cleanup applied before the declaration grammar runs.
//!
//! Removes comments, preprocessor directives, standard and vendor attribute
//! syntax, and any configured declspec macros. Line structure is kept so
//! grammar errors still point at the right line.

use std::sync::OnceLock;

use regex::Regex;

/// Strip everything the declaration grammar does not understand.
///
/// `declspecs` are whole-word macro names (optionally invoked with an
/// argument list) such as `TILEDB_EXPORT` or `DEPRECATED("use x")`.
pub fn preprocess(source: &str, declspecs: &[String]) -> String {
    let text = strip_comments(source);
    let text = strip_directives(&text);
    let text = strip_attributes(&text);
    strip_declspecs(&text, declspecs)
}

/// Remove `//` and `/* */` comments, leaving string and char literals intact.
pub fn strip_comments(source: &str) -> String {
    #[derive(Clone, Copy, PartialEq)]
    enum State {
        Code,
        Line,
        Block,
        Str,
        Chr,
    }

    let mut out = String::with_capacity(source.len());
    let mut state = State::Code;
    let mut chars = source.chars().peekable();

    while let Some(c) = chars.next() {
        match state {
            State::Code => match c {
                '/' if chars.peek() == Some(&'/') => {
                    chars.next();
                    state = State::Line;
                }
                '/' if chars.peek() == Some(&'*') => {
                    chars.next();
                    out.push(' ');
                    state = State::Block;
                }
                '"' => {
                    out.push(c);
                    state = State::Str;
                }
                '\'' => {
                    out.push(c);
                    state = State::Chr;
                }
                _ => out.push(c),
            },
            State::Line => {
                if c == '\n' {
                    out.push('\n');
                    state = State::Code;
                }
            }
            State::Block => {
                if c == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    state = State::Code;
                } else if c == '\n' {
                    out.push('\n');
                }
            }
            State::Str | State::Chr => {
                out.push(c);
                let close = if state == State::Str { '"' } else { '\'' };
                if c == '\\' {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                } else if c == close || c == '\n' {
                    state = State::Code;
                }
            }
        }
    }

    out
}

/// Blank out preprocessor lines, following `\` continuations.
pub fn strip_directives(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut in_directive = false;

    for line in source.split_inclusive('\n') {
        let body = line.trim_end_matches(['\n', '\r']);
        let starts_directive = body.trim_start().starts_with('#');
        if in_directive || starts_directive {
            in_directive = body.ends_with('\\');
            if line.ends_with('\n') {
                out.push('\n');
            }
        } else {
            out.push_str(line);
        }
    }

    out
}

fn attribute_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            r"\[\[[^\]]*\]\]",
            r"__attribute__\s*\(\((?:[^()]|\([^()]*\))*\)\)",
            r"__declspec\s*\([^)]*\)",
            r"\balignas\s*\([^)]*\)",
        ]
        .iter()
        .filter_map(|p| Regex::new(p).ok())
        .collect()
    })
}

/// Remove `[[...]]`, `__attribute__((...))`, `__declspec(...)` and `alignas(...)`.
pub fn strip_attributes(source: &str) -> String {
    attribute_patterns()
        .iter()
        .fold(source.to_string(), |text, re| {
            re.replace_all(&text, "").into_owned()
        })
}

/// Remove configured macro words, together with a directly following argument list.
pub fn strip_declspecs(source: &str, declspecs: &[String]) -> String {
    let words: Vec<String> = declspecs
        .iter()
        .filter(|d| !d.trim().is_empty())
        .map(|d| regex::escape(d.trim()))
        .collect();
    if words.is_empty() {
        return source.to_string();
    }

    let pattern = format!(r"\b(?:{})\b(?:\s*\([^()]*\))?", words.join("|"));
    match Regex::new(&pattern) {
        Ok(re) => re.replace_all(source, "").into_owned(),
        Err(e) => {
            tracing::warn!(pattern = %pattern, error = %e, "ignoring unusable declspec list");
            source.to_string()
        }
    }
}
