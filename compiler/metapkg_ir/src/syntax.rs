//! Abstract syntax of the generated program.
//!
//! Just enough Go to express placeholder declarations, calls, returns and
//! function definitions. The emitter turns a [`Program`] into source text.

use crate::ChanDir;

/// A type in declaration position.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeExpr {
    /// An unqualified identifier: `int`, `error`.
    Ident(String),
    /// `package.Name`
    Qualified { package: String, name: String },
    /// `*T`
    Pointer(Box<TypeExpr>),
    /// `[N]T`
    Array { len: u64, elem: Box<TypeExpr> },
    /// `[]T`
    Slice(Box<TypeExpr>),
    /// `map[K]V`
    Map {
        key: Box<TypeExpr>,
        value: Box<TypeExpr>,
    },
    /// `chan T` and its directional forms.
    Chan { dir: ChanDir, elem: Box<TypeExpr> },
    /// A spelling produced by the type-name renderer, emitted verbatim.
    Spelled(String),
}

impl TypeExpr {
    pub fn spelled(text: impl Into<String>) -> Self {
        TypeExpr::Spelled(text.into())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Expr {
    Ident(String),
    /// `package.Name`
    Qualified { package: String, name: String },
    /// `base.name`
    Selector { base: Box<Expr>, name: String },
    /// `callee(args...)`; `spread` marks the last argument with `...`.
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
        spread: bool,
    },
    /// `make(T)`
    Make(TypeExpr),
}

impl Expr {
    pub fn ident(name: impl Into<String>) -> Self {
        Expr::Ident(name.into())
    }

    pub fn call(callee: Expr, args: Vec<Expr>) -> Self {
        Expr::Call {
            callee: Box::new(callee),
            args,
            spread: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Stmt {
    /// `var name T`
    Var { name: String, ty: TypeExpr },
    /// `name := value`
    Define { name: String, value: Expr },
    Expr(Expr),
    Return(Vec<Expr>),
}

/// An unnamed parameter of a generated function.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Param {
    pub ty: TypeExpr,
    /// Rendered as `...T`; `ty` is then the element type.
    pub variadic: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FuncDecl {
    pub name: String,
    pub params: Vec<Param>,
    pub results: Vec<TypeExpr>,
    pub body: Vec<Stmt>,
}

impl FuncDecl {
    /// A `func name()` with no parameters or results.
    pub fn nullary(name: impl Into<String>, body: Vec<Stmt>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            results: Vec::new(),
            body,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Import {
    pub path: String,
    /// Package name the generated code qualifies with.
    pub name: String,
}

impl Import {
    /// Whether the import needs an explicit name because the package clause
    /// differs from the last path element.
    pub fn needs_alias(&self) -> bool {
        self.path.rsplit('/').next() != Some(self.name.as_str())
    }
}

/// A complete generated source file.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Program {
    pub package: String,
    pub imports: Vec<Import>,
    pub funcs: Vec<FuncDecl>,
}
