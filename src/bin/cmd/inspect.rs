// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Inspect command - parse one header and show every classification decision.

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Args;
use cxxglue::classify::{
    admit_class, classify_method, Admission, BindingStyle, MethodContext, PointerCategory, Verdict,
};
use cxxglue::header::{parse_header, ParsedHeader};
use cxxglue::{DirectoryConfig, Target};

use crate::common::{ConfigArgs, Result};

/// Parse one header and show how it is classified.
#[derive(Args, Clone, Debug)]
pub struct InspectCmd {
    /// Header file
    #[arg(value_name = "HEADER")]
    input: PathBuf,

    /// Classification settings (the first configured directory is used)
    #[command(flatten)]
    config: ConfigArgs,

    /// Rule set to apply (pybind or swig)
    #[arg(short, long, default_value = "pybind")]
    target: Target,

    /// Print the parsed declarations as JSON instead
    #[arg(long)]
    json: bool,
}

impl InspectCmd {
    pub fn run(self) -> Result<()> {
        let dir = self.config.first_directory()?;
        let text = std::fs::read_to_string(&self.input)
            .with_context(|| format!("failed to read {}", self.input.display()))?;
        let file_name = self
            .input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let header = parse_header(&file_name, &text, &dir.declspecs)
            .with_context(|| format!("failed to parse {}", self.input.display()))?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&header)?);
            return Ok(());
        }
        print_header(&header, &dir, self.target);
        Ok(())
    }
}

fn print_header(header: &ParsedHeader, dir: &DirectoryConfig, target: Target) {
    println!("=== {} ({}) ===", header.file_name, target.as_str());

    println!("Enums: {}", header.enums.len());
    for e in &header.enums {
        let paired = e
            .paired_class()
            .map(|c| format!(" -> {c}"))
            .unwrap_or_default();
        println!("  {} ({} values){paired}", e.qualified_name(), e.values.len());
    }

    println!("Classes: {}", header.classes.len());
    for class in &header.classes {
        let admission = match admit_class(class, dir) {
            Admission::Admitted => {
                let category = PointerCategory::of(&class.scoped_name(), dir);
                format!("{category:?}")
            }
            Admission::ForeignNamespace => "skipped: namespace".to_string(),
            Admission::ExcludedKeyword(k) => format!("skipped: keyword {k}"),
        };
        println!("  {} [{admission}]", class.qualified_name());
        if !admit_class(class, dir).is_admitted() {
            continue;
        }

        for method in &class.methods {
            let ctx = MethodContext::new(class, method, dir);
            let (rule, label) = match classify_method(&ctx, target) {
                Some(d) => (d.rule, verdict_label(d.verdict)),
                None => ("-", "default".to_string()),
            };
            println!("    {rule:<18} {label:<24} {}", ctx.signature.trim());
        }
    }
}

fn verdict_label(verdict: Verdict) -> String {
    match verdict {
        Verdict::Placeholder(reason) => reason.tag().to_string(),
        Verdict::Constructor => "init".to_string(),
        Verdict::Bind(form) => {
            let def = if form.is_static { "def_static" } else { "def" };
            let style = match form.style {
                BindingStyle::Cast => "cast",
                BindingStyle::Plain => "plain",
                BindingStyle::Named => "named",
            };
            format!("{def} ({style})")
        }
    }
}
