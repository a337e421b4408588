//! Call-site generator.
//!
//! Turns one member descriptor into the body of its wrapper function:
//! argument placeholders in parameter order, a receiver placeholder for
//! methods, then exactly one call.

use std::collections::BTreeSet;

use metapkg_ir::syntax::{Expr, Stmt, TypeExpr};
use metapkg_ir::{MemberDescriptor, TypeShape, UnitRef};

use crate::declare::declare;
use crate::names::Scope;
use crate::{SynthContext, SynthError};

/// Identifiers the generated program defines itself.
const RESERVED_NAMES: &[&str] = &["init", "main"];

/// Why a member gets no wrapper even though nothing failed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Exclusion {
    /// `init` and `main` cannot be re-declared.
    ReservedName(String),
    /// The receiver's type cannot be named outside its unit.
    PrivateReceiverType(String),
}

/// Outcome of call-site generation for one member.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CallSite {
    Wrapper(WrapperBody),
    Excluded(Exclusion),
}

/// The body of one wrapper and the units it references.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WrapperBody {
    pub body: Vec<Stmt>,
    pub units: Vec<UnitRef>,
}

/// Generate the wrapper body for `member`.
///
/// Closures for function-typed parameters are enqueued on `ctx`; the caller
/// is responsible for draining them.
pub fn generate(ctx: &mut SynthContext, member: &MemberDescriptor) -> Result<CallSite, SynthError> {
    let simple = member.simple_name();
    if RESERVED_NAMES.contains(&simple) {
        return Ok(CallSite::Excluded(Exclusion::ReservedName(simple.to_string())));
    }
    if member.is_parent_type_private() {
        let parent = member.parent_type_name().unwrap_or_default();
        return Ok(CallSite::Excluded(Exclusion::PrivateReceiverType(
            parent.to_string(),
        )));
    }
    if member.is_generic() {
        let shape = if !member.type_params.is_empty() {
            "generic function"
        } else if member
            .receiver
            .as_ref()
            .is_some_and(|receiver| receiver.ty.mentions_type_param())
        {
            "method of generic type"
        } else {
            "generic signature"
        };
        return Err(SynthError::unsupported(shape, &member.name));
    }

    let units = referenced_units(member);
    let mut scope = Scope::with_reserved(units.iter().map(|unit| unit.name.as_str()));
    let mut body = Vec::new();
    let mut args = Vec::with_capacity(member.params.len());

    for param in &member.params {
        let (name, decls) = declare(ctx, &mut scope, param)?;
        body.extend(decls);
        args.push(Expr::Ident(name));
    }

    let callee = match &member.receiver {
        Some(receiver) => {
            let Some(parent) = member.parent_type_name() else {
                return Err(SynthError::unsupported(
                    format!("receiver {}", receiver.ty.kind_name()),
                    &receiver.name,
                ));
            };
            let base = match member.parent_type_unit() {
                Some(unit) => TypeExpr::Qualified {
                    package: unit.name.clone(),
                    name: parent.to_string(),
                },
                None => TypeExpr::Ident(parent.to_string()),
            };
            let recv = scope.bind(&receiver.name);
            body.push(Stmt::Var {
                name: recv.clone(),
                ty: if member.is_receiver_pointer() {
                    TypeExpr::Pointer(Box::new(base))
                } else {
                    base
                },
            });
            Expr::Selector {
                base: Box::new(Expr::Ident(recv)),
                name: member.name.clone(),
            }
        }
        None => Expr::Qualified {
            package: member.unit.name.clone(),
            name: member.name.clone(),
        },
    };

    body.push(Stmt::Expr(Expr::Call {
        callee: Box::new(callee),
        spread: member.variadic && !args.is_empty(),
        args,
    }));

    Ok(CallSite::Wrapper(WrapperBody { body, units }))
}

/// Units the wrapper body will mention: every declared parameter type, the
/// receiver type, or the callee's unit for free functions. Function-typed
/// parameters only name a closure, so their types are not counted.
fn referenced_units(member: &MemberDescriptor) -> Vec<UnitRef> {
    let mut units = BTreeSet::new();
    let mut add = |unit: &UnitRef| {
        units.insert(unit.clone());
    };
    for param in &member.params {
        if !matches!(param.ty, TypeShape::Signature(_)) {
            param.ty.for_each_unit(&mut add);
        }
    }
    match &member.receiver {
        Some(receiver) => receiver.ty.for_each_unit(&mut add),
        None => add(&member.unit),
    }
    units.into_iter().collect()
}
