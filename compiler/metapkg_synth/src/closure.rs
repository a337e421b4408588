//! Closure synthesizer.
//!
//! Each pending closure becomes a standalone function with the requested
//! signature whose body declares zero-valued results and returns them.
//! Result declarations go through the declaration synthesizer, so a closure
//! returning a function enqueues a further closure of its own.

use std::collections::BTreeSet;

use metapkg_ir::syntax::{Expr, FuncDecl, Param, Stmt, TypeExpr};
use metapkg_ir::TypeShape;

use crate::declare::declare;
use crate::names::Scope;
use crate::render::type_name;
use crate::{Fragment, PendingClosure, SynthContext, SynthError};

/// Build the function definition for `closure`.
///
/// Any parameter or result type without a spelling fails the whole closure
/// with [`SynthError::TypeResolution`].
pub fn synthesize(ctx: &mut SynthContext, closure: &PendingClosure) -> Result<Fragment, SynthError> {
    let last = closure.params.len().saturating_sub(1);
    let mut params = Vec::with_capacity(closure.params.len());
    for (i, param) in closure.params.iter().enumerate() {
        let variadic = closure.variadic && i == last;
        let ty = match &param.ty {
            TypeShape::Slice { elem } if variadic => elem.as_ref(),
            other => other,
        };
        params.push(Param {
            ty: TypeExpr::spelled(type_name(ty)?),
            variadic,
        });
    }

    let results = closure
        .results
        .iter()
        .map(|result| type_name(&result.ty).map(TypeExpr::spelled))
        .collect::<Result<Vec<_>, _>>()?;

    let mut units = BTreeSet::new();
    for param in closure.params.iter().chain(&closure.results) {
        param.ty.for_each_unit(&mut |unit| {
            units.insert(unit.clone());
        });
    }

    let mut scope = Scope::with_reserved(units.iter().map(|unit| unit.name.as_str()));
    let mut body = Vec::new();
    let mut values = Vec::with_capacity(closure.results.len());
    for result in &closure.results {
        let (name, decls) = declare(ctx, &mut scope, result)?;
        body.extend(decls);
        values.push(Expr::Ident(name));
    }
    body.push(Stmt::Return(values));

    tracing::trace!(closure = %closure.name, results = closure.results.len(), "closure synthesized");
    Ok(Fragment {
        func: FuncDecl {
            name: closure.name.clone(),
            params,
            results,
            body,
        },
        units: units.into_iter().collect(),
    })
}
