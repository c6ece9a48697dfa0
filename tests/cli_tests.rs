// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! CLI integration tests.
//!
//! These tests run the actual cxxglue binary and verify its behavior.

use std::{
    path::{Path, PathBuf},
    process::{Command, Output},
};

/// Get the path to the built cxxglue binary
fn cxxglue_bin() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    // The test binary is in target/debug/deps/
    // The cxxglue binary is in target/debug/
    path.pop(); // deps
    path.pop(); // debug or release
    path.push("cxxglue");
    path
}

/// Get the path to a test fixture file
fn fixture_path(name: &str) -> PathBuf {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(manifest_dir)
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// Run cxxglue with arguments
fn run(args: &[&str]) -> Output {
    let bin = cxxglue_bin();
    Command::new(&bin)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap_or_else(|_| panic!("Failed to run {:?}", bin))
}

/// Run cxxglue and assert success
fn run_ok(args: &[&str]) -> String {
    let output = run(args);
    assert!(
        output.status.success(),
        "Command failed: {:?}\nstdout: {}\nstderr: {}",
        args,
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Run cxxglue and assert failure
fn run_err(args: &[&str]) -> String {
    let output = run(args);
    assert!(
        !output.status.success(),
        "Command should have failed but succeeded: {:?}",
        args
    );
    String::from_utf8_lossy(&output.stderr).to_string()
}

// ============================================================================
// Basic CLI Tests
// ============================================================================

#[test]
fn test_cli_help() {
    let output = run_ok(&["--help"]);
    assert!(output.contains("Generate pybind11 and SWIG glue from C++ headers"));
    assert!(output.contains("pybind"));
    assert!(output.contains("swig"));
    assert!(output.contains("inspect"));
    assert!(output.contains("locate"));
    assert!(output.contains("convert-enums"));
}

#[test]
fn test_cli_version() {
    let output = run_ok(&["--version"]);
    assert!(output.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_cli_unknown_command() {
    let stderr = run_err(&["frobnicate"]);
    assert!(stderr.contains("frobnicate"));
}

#[test]
fn test_cli_verbose_and_quiet_conflict() {
    run_err(&["-v", "-q", "locate"]);
}

// ============================================================================
// Generation
// ============================================================================

#[test]
fn test_pybind_single_directory() {
    let out = tempfile::tempdir().unwrap();
    let src = path_arg(&fixture_path("cxx_api"));
    let dst = path_arg(out.path());

    let stdout = run_ok(&[
        "pybind",
        "--source-dir",
        &src,
        "--output-dir",
        &dst,
        "--namespace",
        "tiledb",
    ]);
    assert!(stdout.contains("=== pybind ==="));
    assert!(stdout.contains("Headers: 3 located, 3 generated, 0 failed"));
    assert!(out.path().join("pybind_tiledb_cxx_query.cpp").exists());
    assert!(out.path().join("init_module_pybind.cpp").exists());
}

#[test]
fn test_pybind_with_config_file() {
    let out = tempfile::tempdir().unwrap();
    let config = path_arg(&fixture_path("glue.toml"));
    let dst = path_arg(out.path());

    run_ok(&[
        "-q",
        "pybind",
        "--config",
        &config,
        "--output-dir",
        &dst,
        "--module-dir",
        &dst,
    ]);
    let init = std::fs::read_to_string(out.path().join("init_module_pybind.cpp")).unwrap();
    assert!(init.contains("PYBIND11_MODULE(pyfixture, m)"));
    assert!(init.contains("PYBIND11_MODULE(pyfixture2, m)"));
}

#[test]
fn test_pybind_module_name_flag() {
    let out = tempfile::tempdir().unwrap();
    let src = path_arg(&fixture_path("cxx_api"));
    let dst = path_arg(out.path());

    run_ok(&[
        "pybind",
        "--source-dir",
        &src,
        "-o",
        &dst,
        "--module-name",
        "pyarrays",
    ]);
    let init = std::fs::read_to_string(out.path().join("init_module_pybind.cpp")).unwrap();
    assert!(init.ends_with("}//PYBIND11_MODULE(pyarrays, m)\n"));
}

#[test]
fn test_swig_with_config_file() {
    let out = tempfile::tempdir().unwrap();
    let config = path_arg(&fixture_path("glue.toml"));
    let dst = path_arg(out.path());

    let stdout = run_ok(&["swig", "--config", &config, "--swig-dir", &dst]);
    assert!(stdout.contains("=== swig ==="));
    assert!(stdout.contains("Ignore directives: 4"));
    let text = std::fs::read_to_string(out.path().join("swig_fixture.i")).unwrap();
    assert!(text.starts_with("#ifndef SWIG_FIXTURE_I\n"));
    assert!(text.contains("%shared_ptr(tiledb::Query)\n"));
}

#[test]
fn test_missing_config_file_fails() {
    let stderr = run_err(&["pybind", "--config", "/nonexistent/glue.toml"]);
    assert!(stderr.contains("failed to load config"));
}

#[test]
fn test_empty_namespace_list_rejected() {
    let out = tempfile::tempdir().unwrap();
    let dir = out.path();
    std::fs::write(
        dir.join("bad.toml"),
        "[[directory]]\nname = \"x\"\nnamespaces = []\n",
    )
    .unwrap();
    let stderr = run_err(&["pybind", "--config", &path_arg(&dir.join("bad.toml"))]);
    assert!(stderr.contains("namespaces must not be empty"));
}

// ============================================================================
// Inspect / Locate
// ============================================================================

#[test]
fn test_inspect_text() {
    let header = path_arg(&fixture_path("cxx_api/tiledb_cxx_query.h"));
    let stdout = run_ok(&["inspect", &header]);

    assert!(stdout.contains("=== tiledb_cxx_query.h (pybind) ==="));
    assert!(stdout.contains("tiledb::QueryStatus_enumtype (3 values) -> QueryStatus"));
    assert!(stdout.contains("tiledb::Query [Shared]"));
    assert!(stdout.contains("detail::QueryHelper [skipped: namespace]"));
    assert!(stdout.contains("ignore_constchar"));
    assert!(stdout.contains("def (cast)"));
    assert!(stdout.contains("def_static (named)"));
}

#[test]
fn test_inspect_swig_target() {
    let header = path_arg(&fixture_path("cxx_api/tiledb_cxx_query.h"));
    let stdout = run_ok(&["inspect", &header, "--target", "swig"]);

    assert!(stdout.contains("(swig)"));
    assert!(stdout.contains("default"));
    assert!(!stdout.contains("ignore_destructor"));
}

#[test]
fn test_inspect_json() {
    let header = path_arg(&fixture_path("cxx_api/tiledb_cxx_util.h"));
    let stdout = run_ok(&["inspect", &header, "--json"]);

    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value["file_name"], "tiledb_cxx_util.h");
    assert_eq!(value["classes"][0]["name"], "StringUtil");
    assert_eq!(value["classes"][1]["kind"], "struct");
    assert_eq!(
        value["classes"][0]["methods"][1]["parameters"][0]["type"],
        "const std::string &"
    );
}

#[test]
fn test_inspect_invalid_target() {
    let header = path_arg(&fixture_path("cxx_api/tiledb_cxx_util.h"));
    run_err(&["inspect", &header, "--target", "cffi"]);
}

#[test]
fn test_inspect_missing_file() {
    let stderr = run_err(&["inspect", "/nonexistent/header.h"]);
    assert!(stderr.contains("failed to read"));
}

#[test]
fn test_locate() {
    let src = path_arg(&fixture_path("cxx_api"));
    let stdout = run_ok(&["locate", "--source-dir", &src]);

    assert!(stdout.contains("tiledb_cxx_query.h"));
    assert!(!stdout.contains("XTTimer.h"));
    assert!(!stdout.contains("README.txt"));
    assert!(stdout.contains("Total: 3"));
}

#[test]
fn test_locate_recursive_ignores_keywords() {
    let src = path_arg(&fixture_path("cxx_api"));
    let stdout = run_ok(&["locate", "--source-dir", &src, "--recursive"]);
    assert!(stdout.contains("XTTimer.h"));
    assert!(stdout.contains("Total: 4"));
}

// ============================================================================
// Enum conversion
// ============================================================================

#[test]
fn test_convert_enums() {
    let out = tempfile::tempdir().unwrap();
    let input = path_arg(&fixture_path("tiledb_enum.h"));
    let output = out.path().join("gen").join("tiledb_enum.h");

    let stdout = run_ok(&["convert-enums", &input, &path_arg(&output)]);
    assert!(stdout.contains("Converted"));

    let text = std::fs::read_to_string(&output).unwrap();
    assert!(text.starts_with("enum tiledb_query_type_t{ //#ifdef TILEDB_QUERY_TYPE_ENUM\n"));
    assert!(text.contains("enum tiledb_object_t{ //#ifdef TILEDB_OBJECT_TYPE_ENUM\n"));
    assert!(text.contains("    TILEDB_GROUP =  2, //    TILEDB_OBJECT_TYPE_ENUM(GROUP) = 2,\n"));
}

#[test]
fn test_convert_enums_bad_alias() {
    let out = tempfile::tempdir().unwrap();
    let input = path_arg(&fixture_path("tiledb_enum.h"));
    let output = path_arg(&out.path().join("x.h"));
    let stderr = run_err(&["convert-enums", &input, &output, "--alias", "no_equals"]);
    assert!(stderr.contains("expected FROM=TO"));
}
