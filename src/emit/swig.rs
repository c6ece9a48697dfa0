// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! SWIG interface fragments for one header.

use tracing::info;

use crate::classify::{admit_class, classify_method, MethodContext, PointerCategory};
use crate::core::Target;
use crate::header::ParsedHeader;
use crate::locate::FileConfig;

/// Interface fragments contributed by one header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SwigFileGlue {
    /// `%shared_ptr(...)` lines
    pub shared_ptr: String,
    /// Lines copied verbatim into the `%{ ... %}` block
    pub include_copy: String,
    /// `%ignore` directives, headed by a comment naming the file
    pub ignore: String,
    /// `%include` lines for the header itself
    pub include_headers: String,
    /// Number of `%ignore` directives emitted
    pub ignored: usize,
}

/// Generate the interface fragments for one parsed header.
///
/// Non-admitted classes are ignored wholesale. For admitted classes only the
/// rules flagged for interface files are consulted; any method they catch is
/// ignored by its full signature.
pub fn emit_swig(header: &ParsedHeader, file: &FileConfig) -> SwigFileGlue {
    let config = &file.config;
    let file_name = file.file_name();
    let path = file.path.to_string_lossy();

    let mut glue = SwigFileGlue {
        include_copy: format!("#include \"{file_name}\"\n"),
        ignore: format!("//ignore class or methods in file:{path}\n"),
        include_headers: format!("%include \"{file_name}\"\n"),
        ..Default::default()
    };

    for class in &header.classes {
        if !admit_class(class, config).is_admitted() {
            info!(class = %class.qualified_name(), "ignore class");
            glue.ignore.push_str(&format!("%ignore {};\n", class.name));
            glue.ignored += 1;
            continue;
        }

        let qualified = class.qualified_name();
        if PointerCategory::of(&class.scoped_name(), config).is_shared() {
            glue.shared_ptr
                .push_str(&format!("%shared_ptr({qualified})\n"));
        }

        for method in &class.methods {
            let ctx = MethodContext::new(class, method, config);
            if classify_method(&ctx, Target::Swig).is_some() {
                glue.ignore.push_str(&format!(
                    "%ignore {qualified}::{}({});\n",
                    method.name,
                    method.parameter_types()
                ));
                glue.ignored += 1;
            }
        }
    }
    glue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DirectoryConfig;
    use crate::header::parse_header;

    const HEADER: &str = r#"
namespace tiledb {
class Array {
 public:
  Array(const Context& ctx, const std::string& uri);
  void set_uri(const char* uri);
  void reopen();
  void on_close(std::function<void()> cb);
  Schema* mutable_schema();
};
class StringUtil {
 public:
  static int length(const std::string& s);
};
}
namespace detail {
class Helper { public: void run(); };
}
"#;

    fn swig_glue() -> SwigFileGlue {
        let header = parse_header("array.h", HEADER, &[]).unwrap();
        let file = FileConfig::new(DirectoryConfig::default(), "cxx_api/array.h");
        emit_swig(&header, &file)
    }

    #[test]
    fn test_shared_ptr_only_for_shared_classes() {
        let glue = swig_glue();
        assert_eq!(glue.shared_ptr, "%shared_ptr(tiledb::Array)\n");
    }

    #[test]
    fn test_ignore_directives() {
        let glue = swig_glue();
        assert_eq!(
            glue.ignore,
            "//ignore class or methods in file:cxx_api/array.h\n\
             %ignore tiledb::Array::set_uri(const char *);\n\
             %ignore tiledb::Array::on_close(std::function<void()>);\n\
             %ignore tiledb::Array::mutable_schema();\n\
             %ignore Helper;\n"
        );
        assert_eq!(glue.ignored, 4);
    }

    #[test]
    fn test_include_lines() {
        let glue = swig_glue();
        assert_eq!(glue.include_copy, "#include \"array.h\"\n");
        assert_eq!(glue.include_headers, "%include \"array.h\"\n");
    }
}
