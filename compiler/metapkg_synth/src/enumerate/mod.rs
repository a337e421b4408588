//! Member enumerator.
//!
//! Walks the member table of the target unit and produces one
//! [`MemberDescriptor`] per exported function and per exported method in the
//! method set of `*T` for every declared type `T`.
//!
//! Type visibility is not checked here: methods of unexported types are
//! enumerated like any other and filtered later by the call-site generator.

use rustc_hash::FxHashSet;

use metapkg_ir::{is_exported, Member, MemberDescriptor, TypedProgram, UnitRef};
use metapkg_loader::{LoadError, ProgramLoader};

/// Load `target` through `loader` and enumerate its exported members.
#[tracing::instrument(level = "debug", skip(loader))]
pub fn enumerate(
    loader: &dyn ProgramLoader,
    target: &str,
    include_tests: bool,
) -> Result<Vec<MemberDescriptor>, LoadError> {
    let program = loader.load(target, include_tests)?;
    members_of(&program, target)
}

/// Enumerate the exported members of `target` within an already loaded
/// program.
///
/// Descriptors come in member-table order. A method reachable both directly
/// and through embedding (with the same receiver) is listed once.
pub fn members_of(
    program: &TypedProgram,
    target: &str,
) -> Result<Vec<MemberDescriptor>, LoadError> {
    let package = program
        .package(target)
        .ok_or_else(|| LoadError::MissingUnit {
            target: target.to_string(),
        })?;
    let unit = UnitRef::new(package.path.clone(), package.name.clone());

    let mut seen = FxHashSet::default();
    let mut members = Vec::new();
    let mut push = |descriptor: MemberDescriptor| {
        if seen.insert(descriptor.clone()) {
            members.push(descriptor);
        }
    };

    for member in &package.members {
        match member {
            Member::Func(func) => {
                if !is_exported(&func.name) {
                    tracing::trace!(name = %func.name, "skipping unexported function");
                    continue;
                }
                push(
                    MemberDescriptor::function(unit.clone(), func.name.clone(), &func.signature)
                        .with_type_params(func.type_params.clone()),
                );
            }
            Member::Type(ty) => {
                for entry in program.pointer_method_set(&unit, &ty.name) {
                    if !is_exported(&entry.name) {
                        continue;
                    }
                    push(MemberDescriptor::method(
                        entry.unit,
                        entry.name,
                        entry.receiver,
                        &entry.signature,
                    ));
                }
            }
            Member::Var { .. } | Member::Const { .. } => {}
        }
    }

    tracing::debug!(count = members.len(), "members enumerated");
    Ok(members)
}
