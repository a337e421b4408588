// Test code uses unwrap/expect for clarity - panics provide good test failure messages
#![allow(clippy::unwrap_used, clippy::expect_used)]

//! End-to-end tests of the `metapkg` binary.
//!
//! Programs are fed through `--ir` so no exporter has to be installed.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use metapkg_ir::{
    BasicKind, FuncMember, Member, MethodDecl, Package, ParamDescriptor, Signature, TypeMember,
    TypeShape, TypedProgram,
};
use pretty_assertions::assert_eq;

const TARGET: &str = "example.com/calc";

fn metapkg(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_metapkg"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to spawn metapkg")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn int(name: &str) -> ParamDescriptor {
    ParamDescriptor::new(name, TARGET, TypeShape::basic(BasicKind::Int))
}

fn calc_program() -> TypedProgram {
    let callback = Signature::new(vec![int("")], vec![int("")]);
    TypedProgram {
        packages: vec![Package {
            path: TARGET.to_string(),
            name: "calc".to_string(),
            errors: Vec::new(),
            members: vec![
                Member::Func(FuncMember {
                    name: "Add".to_string(),
                    type_params: Vec::new(),
                    signature: Signature::new(vec![int("a"), int("b")], vec![int("")]),
                }),
                Member::Func(FuncMember {
                    name: "Apply".to_string(),
                    type_params: Vec::new(),
                    signature: Signature::new(
                        vec![ParamDescriptor::new("f", TARGET, TypeShape::signature(callback))],
                        vec![int("")],
                    ),
                }),
                Member::Func(FuncMember {
                    name: "helper".to_string(),
                    type_params: Vec::new(),
                    signature: Signature::default(),
                }),
                Member::Type(TypeMember {
                    name: "Counter".to_string(),
                    type_params: Vec::new(),
                    underlying: Some(TypeShape::empty_struct()),
                    methods: vec![MethodDecl {
                        name: "Inc".to_string(),
                        receiver_name: "c".to_string(),
                        pointer_receiver: true,
                        signature: Signature::default(),
                    }],
                    embedded: Vec::new(),
                }),
            ],
        }],
    }
}

fn write_ir(dir: &Path, program: &TypedProgram) -> PathBuf {
    let path = dir.join("calc.json");
    std::fs::write(&path, serde_json::to_string_pretty(program).unwrap()).unwrap();
    path
}

const CALC_GOLDEN: &str = "\
// Code generated by metapkg. DO NOT EDIT.

package main

import \"example.com/calc\"

func example_com_calc_Add() {
\tvar a int
\tvar b int
\tcalc.Add(a, b)
}

func example_com_calc_Apply() {
\tcalc.Apply(closure0)
}

func example_com_calc_Counter_Inc() {
\tvar c *calc.Counter
\tc.Inc()
}

func closure0(int) int {
\tvar v0 int
\treturn v0
}

func main() {
\texample_com_calc_Add()
\texample_com_calc_Apply()
\texample_com_calc_Counter_Inc()
}
";

#[test]
fn generates_harness_from_ir_file() {
    let dir = tempfile::tempdir().unwrap();
    let ir = write_ir(dir.path(), &calc_program());
    let out = dir.path().join("harness.go");

    let output = metapkg(&[
        "--ir",
        ir.to_str().unwrap(),
        "-o",
        out.to_str().unwrap(),
        TARGET,
    ]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "generated 3 wrappers, 1 closures, 0 skipped\n");
    assert_eq!(std::fs::read_to_string(&out).unwrap(), CALC_GOLDEN);
}

#[test]
fn output_defaults_to_buildme_in_working_directory() {
    let dir = tempfile::tempdir().unwrap();
    let ir = write_ir(dir.path(), &calc_program());

    let output = Command::new(env!("CARGO_BIN_EXE_metapkg"))
        .args(["--ir", ir.to_str().unwrap(), TARGET])
        .current_dir(dir.path())
        .env_remove("RUST_LOG")
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(
        std::fs::read_to_string(dir.path().join("buildme.go")).unwrap(),
        CALC_GOLDEN
    );
}

#[test]
fn runs_are_reproducible() {
    let dir = tempfile::tempdir().unwrap();
    let ir = write_ir(dir.path(), &calc_program());
    let first = dir.path().join("first.go");
    let second = dir.path().join("second.go");
    for out in [&first, &second] {
        let output = metapkg(&["--ir", ir.to_str().unwrap(), "-o", out.to_str().unwrap(), TARGET]);
        assert!(output.status.success());
    }
    assert_eq!(
        std::fs::read_to_string(first).unwrap(),
        std::fs::read_to_string(second).unwrap()
    );
}

#[test]
fn skipped_members_are_reported_on_stderr() {
    let mut program = calc_program();
    program.packages[0].members.push(Member::Func(FuncMember {
        name: "Deref".to_string(),
        type_params: Vec::new(),
        signature: Signature::new(
            vec![ParamDescriptor::new(
                "pp",
                TARGET,
                TypeShape::pointer(TypeShape::pointer(TypeShape::basic(BasicKind::Int))),
            )],
            Vec::new(),
        ),
    }));
    let dir = tempfile::tempdir().unwrap();
    let ir = write_ir(dir.path(), &program);
    let out = dir.path().join("buildme.go");

    let output = metapkg(&["--ir", ir.to_str().unwrap(), "-o", out.to_str().unwrap(), TARGET]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "generated 3 wrappers, 1 closures, 1 skipped\n");
    assert!(stderr(&output).contains("skipped calc.Deref: unsupported type shape"));
}

#[test]
fn too_many_packages_is_a_usage_error() {
    let output = metapkg(&["example.com/a", "example.com/b"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("too many packages"));
}

#[test]
fn missing_package_is_a_usage_error() {
    let output = metapkg(&["--gomod"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("missing package path"));
}

#[test]
fn unknown_flag_is_a_usage_error() {
    let output = metapkg(&["--frobnicate", TARGET]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("unknown flag `--frobnicate`"));
}

#[test]
fn missing_ir_file_is_a_load_failure() {
    let dir = tempfile::tempdir().unwrap();
    let ir = dir.path().join("absent.json");
    let out = dir.path().join("buildme.go");
    let output = metapkg(&["--ir", ir.to_str().unwrap(), "-o", out.to_str().unwrap(), TARGET]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("load failed"));
    assert!(!out.exists());
}

#[test]
fn target_with_type_errors_is_a_load_failure() {
    let mut program = calc_program();
    program.packages[0].errors.push("calc.go:3:1: undefined: x".to_string());
    let dir = tempfile::tempdir().unwrap();
    let ir = write_ir(dir.path(), &program);
    let out = dir.path().join("buildme.go");
    let output = metapkg(&["--ir", ir.to_str().unwrap(), "-o", out.to_str().unwrap(), TARGET]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("type errors"));
}

#[test]
fn missing_exporter_is_a_load_failure() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("buildme.go");
    let output = Command::new(env!("CARGO_BIN_EXE_metapkg"))
        .args(["-o", out.to_str().unwrap(), TARGET])
        .env("METAPKG_EXPORTER", dir.path().join("no-such-exporter"))
        .env_remove("RUST_LOG")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(!out.exists());
}

#[test]
fn help_and_version() {
    let help = metapkg(&["--help"]);
    assert!(help.status.success());
    assert!(stdout(&help).contains("Usage: metapkg [options] <package>"));

    let version = metapkg(&["--version"]);
    assert!(version.status.success());
    assert_eq!(
        stdout(&version),
        format!("metapkg {}\n", env!("CARGO_PKG_VERSION"))
    );
}
