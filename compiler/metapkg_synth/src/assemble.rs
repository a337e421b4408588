//! Harness assembler.

use std::collections::BTreeMap;

use metapkg_ir::syntax::{Expr, FuncDecl, Import, Program, Stmt};
use metapkg_ir::UnitRef;

use crate::SynthError;

/// One generated function and the units its body and signature mention.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fragment {
    pub func: FuncDecl,
    pub units: Vec<UnitRef>,
}

/// Build `package main` from wrapper and closure fragments.
///
/// Functions appear in the order given: wrappers, then closures, then a
/// `main` that calls each wrapper once. Imports are the union of every
/// fragment's units, sorted by path.
pub fn assemble(wrappers: &[Fragment], closures: &[Fragment]) -> Result<Program, SynthError> {
    let imports = collect_imports(wrappers.iter().chain(closures))?;

    let entry = FuncDecl::nullary(
        "main",
        wrappers
            .iter()
            .map(|wrapper| Stmt::Expr(Expr::call(Expr::ident(&wrapper.func.name), Vec::new())))
            .collect(),
    );

    let mut funcs = Vec::with_capacity(wrappers.len() + closures.len() + 1);
    funcs.extend(wrappers.iter().map(|f| f.func.clone()));
    funcs.extend(closures.iter().map(|f| f.func.clone()));
    funcs.push(entry);

    tracing::debug!(
        wrappers = wrappers.len(),
        closures = closures.len(),
        imports = imports.len(),
        "harness assembled"
    );
    Ok(Program {
        package: "main".to_string(),
        imports,
        funcs,
    })
}

fn collect_imports<'a>(
    fragments: impl Iterator<Item = &'a Fragment>,
) -> Result<Vec<Import>, SynthError> {
    // package name -> import path
    let mut by_name: BTreeMap<&str, &str> = BTreeMap::new();
    for unit in fragments.flat_map(|f| &f.units) {
        match by_name.get(unit.name.as_str()) {
            Some(path) if *path != unit.path => {
                let (first, second) = if *path < unit.path.as_str() {
                    (*path, unit.path.as_str())
                } else {
                    (unit.path.as_str(), *path)
                };
                return Err(SynthError::ImportConflict {
                    name: unit.name.clone(),
                    first: first.to_string(),
                    second: second.to_string(),
                });
            }
            Some(_) => {}
            None => {
                by_name.insert(&unit.name, &unit.path);
            }
        }
    }

    let mut imports: Vec<Import> = by_name
        .into_iter()
        .map(|(name, path)| Import {
            path: path.to_string(),
            name: name.to_string(),
        })
        .collect();
    imports.sort();
    Ok(imports)
}
