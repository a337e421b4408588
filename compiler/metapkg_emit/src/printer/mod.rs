//! Indenting Go printer.
//!
//! Writes statements one per line with tab indentation, the layout `gofmt`
//! would produce for the small subset of Go the synthesizer generates.

use metapkg_ir::syntax::{Expr, FuncDecl, Import, Param, Program, Stmt, TypeExpr};
use metapkg_ir::ChanDir;

#[derive(Debug, Default)]
pub struct Printer {
    indent: usize,
    output: String,
}

impl Printer {
    pub fn new() -> Self {
        Self {
            indent: 0,
            output: String::with_capacity(4096),
        }
    }

    pub fn indent(&mut self) {
        self.indent += 1;
    }

    pub fn dedent(&mut self) {
        debug_assert!(self.indent > 0, "dedent called with zero indent");
        self.indent = self.indent.saturating_sub(1);
    }

    /// Write `s` on its own line at the current indentation.
    pub fn writeln(&mut self, s: &str) {
        for _ in 0..self.indent {
            self.output.push('\t');
        }
        self.output.push_str(s);
        self.output.push('\n');
    }

    pub fn newline(&mut self) {
        self.output.push('\n');
    }

    /// The printed text, ending in exactly one newline.
    pub fn finish(mut self) -> String {
        while self.output.ends_with("\n\n") {
            self.output.pop();
        }
        if !self.output.ends_with('\n') {
            self.output.push('\n');
        }
        self.output
    }

    pub fn program(&mut self, program: &Program) {
        self.writeln(&format!("package {}", program.package));
        self.imports(&program.imports);
        for func in &program.funcs {
            self.newline();
            self.func(func);
        }
    }

    fn imports(&mut self, imports: &[Import]) {
        match imports {
            [] => {}
            [single] => {
                self.newline();
                self.writeln(&format!("import {}", import_spec(single)));
            }
            _ => {
                self.newline();
                self.writeln("import (");
                self.indent();
                for import in imports {
                    self.writeln(&import_spec(import));
                }
                self.dedent();
                self.writeln(")");
            }
        }
    }

    pub fn func(&mut self, func: &FuncDecl) {
        let mut header = format!("func {}(", func.name);
        for (i, param) in func.params.iter().enumerate() {
            if i > 0 {
                header.push_str(", ");
            }
            header.push_str(&param_text(param));
        }
        header.push(')');
        match func.results.as_slice() {
            [] => {}
            [single] => {
                header.push(' ');
                header.push_str(&type_text(single));
            }
            results => {
                header.push_str(" (");
                header.push_str(&join(results.iter().map(type_text)));
                header.push(')');
            }
        }
        header.push_str(" {");
        self.writeln(&header);

        self.indent();
        for stmt in &func.body {
            self.writeln(&stmt_text(stmt));
        }
        self.dedent();
        self.writeln("}");
    }
}

fn import_spec(import: &Import) -> String {
    if import.needs_alias() {
        format!("{} \"{}\"", import.name, import.path)
    } else {
        format!("\"{}\"", import.path)
    }
}

fn param_text(param: &Param) -> String {
    if param.variadic {
        format!("...{}", type_text(&param.ty))
    } else {
        type_text(&param.ty)
    }
}

fn join(parts: impl Iterator<Item = String>) -> String {
    parts.collect::<Vec<_>>().join(", ")
}

pub(crate) fn type_text(ty: &TypeExpr) -> String {
    match ty {
        TypeExpr::Ident(name) | TypeExpr::Spelled(name) => name.clone(),
        TypeExpr::Qualified { package, name } => format!("{package}.{name}"),
        TypeExpr::Pointer(elem) => format!("*{}", type_text(elem)),
        TypeExpr::Array { len, elem } => format!("[{len}]{}", type_text(elem)),
        TypeExpr::Slice(elem) => format!("[]{}", type_text(elem)),
        TypeExpr::Map { key, value } => format!("map[{}]{}", type_text(key), type_text(value)),
        TypeExpr::Chan { dir, elem } => {
            let elem_text = type_text(elem);
            match dir {
                // `chan <-chan T` would bind as `chan<- (chan T)`.
                ChanDir::Both if elem_text.starts_with("<-") => format!("chan ({elem_text})"),
                ChanDir::Both => format!("chan {elem_text}"),
                ChanDir::Send => format!("chan<- {elem_text}"),
                ChanDir::Recv => format!("<-chan {elem_text}"),
            }
        }
    }
}

pub(crate) fn expr_text(expr: &Expr) -> String {
    match expr {
        Expr::Ident(name) => name.clone(),
        Expr::Qualified { package, name } => format!("{package}.{name}"),
        Expr::Selector { base, name } => format!("{}.{name}", expr_text(base)),
        Expr::Call {
            callee,
            args,
            spread,
        } => {
            let mut out = expr_text(callee);
            out.push('(');
            out.push_str(&join(args.iter().map(expr_text)));
            if *spread {
                out.push_str("...");
            }
            out.push(')');
            out
        }
        Expr::Make(ty) => format!("make({})", type_text(ty)),
    }
}

pub(crate) fn stmt_text(stmt: &Stmt) -> String {
    match stmt {
        Stmt::Var { name, ty } => format!("var {name} {}", type_text(ty)),
        Stmt::Define { name, value } => format!("{name} := {}", expr_text(value)),
        Stmt::Expr(expr) => expr_text(expr),
        Stmt::Return(values) if values.is_empty() => "return".to_string(),
        Stmt::Return(values) => format!("return {}", join(values.iter().map(expr_text))),
    }
}

#[cfg(test)]
mod tests;
