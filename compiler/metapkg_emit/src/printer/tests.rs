use metapkg_ir::syntax::{Expr, FuncDecl, Param, Stmt, TypeExpr};
use metapkg_ir::ChanDir;
use pretty_assertions::assert_eq;

use super::*;

fn qualified(package: &str, name: &str) -> TypeExpr {
    TypeExpr::Qualified {
        package: package.to_string(),
        name: name.to_string(),
    }
}

#[test]
fn type_expressions() {
    let cases = [
        (TypeExpr::Ident("int".to_string()), "int"),
        (TypeExpr::Pointer(Box::new(qualified("calc", "Counter"))), "*calc.Counter"),
        (
            TypeExpr::Array {
                len: 4,
                elem: Box::new(TypeExpr::spelled("byte")),
            },
            "[4]byte",
        ),
        (TypeExpr::Slice(Box::new(TypeExpr::spelled("*calc.Counter"))), "[]*calc.Counter"),
        (
            TypeExpr::Map {
                key: Box::new(TypeExpr::spelled("string")),
                value: Box::new(TypeExpr::spelled("[]int")),
            },
            "map[string][]int",
        ),
        (
            TypeExpr::Chan {
                dir: ChanDir::Send,
                elem: Box::new(TypeExpr::spelled("error")),
            },
            "chan<- error",
        ),
        (
            TypeExpr::Chan {
                dir: ChanDir::Both,
                elem: Box::new(TypeExpr::spelled("<-chan int")),
            },
            "chan (<-chan int)",
        ),
    ];
    for (ty, expected) in cases {
        assert_eq!(type_text(&ty), expected);
    }
}

#[test]
fn statements() {
    assert_eq!(
        stmt_text(&Stmt::Define {
            name: "ch".to_string(),
            value: Expr::Make(TypeExpr::Chan {
                dir: ChanDir::Recv,
                elem: Box::new(TypeExpr::spelled("int")),
            }),
        }),
        "ch := make(<-chan int)"
    );
    assert_eq!(stmt_text(&Stmt::Return(Vec::new())), "return");
    assert_eq!(
        stmt_text(&Stmt::Return(vec![Expr::ident("v0"), Expr::ident("v1")])),
        "return v0, v1"
    );
    assert_eq!(
        stmt_text(&Stmt::Expr(Expr::Call {
            callee: Box::new(Expr::Selector {
                base: Box::new(Expr::ident("c")),
                name: "Log".to_string(),
            }),
            args: vec![Expr::ident("format"), Expr::ident("args")],
            spread: true,
        })),
        "c.Log(format, args...)"
    );
}

#[test]
fn function_with_variadic_params_and_results() {
    let mut printer = Printer::new();
    printer.func(&FuncDecl {
        name: "closure0".to_string(),
        params: vec![
            Param {
                ty: TypeExpr::spelled("string"),
                variadic: false,
            },
            Param {
                ty: TypeExpr::spelled("interface{}"),
                variadic: true,
            },
        ],
        results: vec![TypeExpr::spelled("int"), TypeExpr::spelled("error")],
        body: vec![
            Stmt::Var {
                name: "v0".to_string(),
                ty: TypeExpr::Ident("int".to_string()),
            },
            Stmt::Var {
                name: "v1".to_string(),
                ty: TypeExpr::Ident("error".to_string()),
            },
            Stmt::Return(vec![Expr::ident("v0"), Expr::ident("v1")]),
        ],
    });
    assert_eq!(
        printer.finish(),
        "func closure0(string, ...interface{}) (int, error) {\n\tvar v0 int\n\tvar v1 error\n\treturn v0, v1\n}\n"
    );
}

#[test]
fn empty_body_keeps_braces_on_separate_lines() {
    let mut printer = Printer::new();
    printer.func(&FuncDecl::nullary("main", Vec::new()));
    assert_eq!(printer.finish(), "func main() {\n}\n");
}

#[test]
fn finish_collapses_trailing_blank_lines() {
    let mut printer = Printer::new();
    printer.writeln("package main");
    printer.newline();
    printer.newline();
    assert_eq!(printer.finish(), "package main\n");
}
