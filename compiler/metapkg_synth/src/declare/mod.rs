//! Declaration synthesizer.
//!
//! Given a parameter (or result, or receiver) descriptor, emit the statements
//! that declare a usable zero-valued placeholder of its type. Dispatches on
//! the type shape:
//!
//! | shape | declaration |
//! |---|---|
//! | primitive, named | `var x T` / `var x *T` |
//! | pointer | one level unwrapped into primitive/named |
//! | array, slice, map | `var x [N]T`, `var x []T`, `var x map[K]V` |
//! | channel | `x := make(chan T)` |
//! | interface, struct | `var x interface{...}`, `var x struct{...}` |
//! | signature | nothing; a closure is enqueued in its place |
//!
//! Channels are the one shape constructed eagerly: a nil channel blocks
//! forever, so the placeholder is a fresh unbuffered channel instead.

use metapkg_ir::syntax::{Expr, Stmt, TypeExpr};
use metapkg_ir::{is_exported, BasicKind, ParamDescriptor, TypeShape};

use crate::names::Scope;
use crate::render::type_name;
use crate::{SynthContext, SynthError};

/// Declare a placeholder for `param`.
///
/// Returns the variable name to use as the argument expression together
/// with the declaring statements. For signature-shaped parameters the name
/// is that of an enqueued closure and no statements are produced.
pub fn declare(
    ctx: &mut SynthContext,
    scope: &mut Scope,
    param: &ParamDescriptor,
) -> Result<(String, Vec<Stmt>), SynthError> {
    if let TypeShape::Signature(signature) = &param.ty {
        let name = ctx.enqueue_closure(&param.owning_unit, signature);
        return Ok((name, Vec::new()));
    }

    let name = scope.bind(&param.name);
    tracing::trace!(variable = %name, shape = param.ty.kind_name(), "declaring placeholder");
    let stmt = match placeholder(&param.ty, &name)? {
        Placeholder::Zero(ty) => Stmt::Var {
            name: name.clone(),
            ty,
        },
        Placeholder::Made(value) => Stmt::Define {
            name: name.clone(),
            value,
        },
    };
    Ok((name, vec![stmt]))
}

/// How a placeholder gets its value.
enum Placeholder {
    /// `var x T`
    Zero(TypeExpr),
    /// `x := value`
    Made(Expr),
}

fn placeholder(ty: &TypeShape, variable: &str) -> Result<Placeholder, SynthError> {
    Ok(match ty {
        TypeShape::Primitive { .. } | TypeShape::Named { .. } => {
            Placeholder::Zero(value_type(ty, false, variable)?)
        }
        TypeShape::Pointer { elem } => Placeholder::Zero(value_type(elem, true, variable)?),
        TypeShape::Array { len, elem } => Placeholder::Zero(TypeExpr::Array {
            len: *len,
            elem: Box::new(TypeExpr::Spelled(type_name(elem)?)),
        }),
        TypeShape::Slice { elem } => {
            Placeholder::Zero(TypeExpr::Slice(Box::new(TypeExpr::Spelled(type_name(elem)?))))
        }
        TypeShape::Map { key, value } => Placeholder::Zero(TypeExpr::Map {
            key: Box::new(TypeExpr::Spelled(type_name(key)?)),
            value: Box::new(TypeExpr::Spelled(type_name(value)?)),
        }),
        TypeShape::Channel { dir, elem } => Placeholder::Made(Expr::Make(TypeExpr::Chan {
            dir: *dir,
            elem: Box::new(TypeExpr::Spelled(type_name(elem)?)),
        })),
        TypeShape::Interface { .. } | TypeShape::Struct { .. } => {
            Placeholder::Zero(TypeExpr::Spelled(type_name(ty)?))
        }
        TypeShape::TypeParam { name } => {
            return Err(SynthError::unsupported(
                format!("type parameter {name}"),
                variable,
            ));
        }
        // Deferred to a closure by `declare`; never declared inline.
        TypeShape::Signature(_) => return Err(SynthError::unsupported("signature", variable)),
    })
}

/// The declared type of a primitive or named slot, behind a pointer marker
/// when `pointer` is set.
fn value_type(ty: &TypeShape, pointer: bool, variable: &str) -> Result<TypeExpr, SynthError> {
    let base = match ty {
        TypeShape::Primitive {
            basic: BasicKind::UnsafePointer,
        } => TypeExpr::Qualified {
            package: "unsafe".to_string(),
            name: "Pointer".to_string(),
        },
        TypeShape::Primitive { basic } => TypeExpr::Ident(basic.spelling().to_string()),
        TypeShape::Named {
            unit: Some(unit),
            name,
            ..
        } if !is_exported(name) => {
            return Err(SynthError::unsupported(
                format!("unexported type {}.{name}", unit.name),
                variable,
            ));
        }
        TypeShape::Named {
            unit,
            name,
            type_args,
        } if type_args.is_empty() => match unit {
            Some(unit) => TypeExpr::Qualified {
                package: unit.name.clone(),
                name: name.clone(),
            },
            None => TypeExpr::Ident(name.clone()),
        },
        TypeShape::Named { .. } => TypeExpr::Spelled(type_name(ty)?),
        other => {
            let shape = if pointer {
                format!("pointer to {}", other.kind_name())
            } else {
                other.kind_name().to_string()
            };
            return Err(SynthError::unsupported(shape, variable));
        }
    };
    Ok(if pointer {
        TypeExpr::Pointer(Box::new(base))
    } else {
        base
    })
}
