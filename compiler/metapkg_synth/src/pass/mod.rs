//! The synthesis pass: descriptors in, assembled harness out.
//!
//! Members are processed in enumeration order. Each member's closures are
//! drained as soon as its wrapper is generated, so a failure anywhere in
//! that tree drops the member alone and leaves nothing queued behind.

use metapkg_ir::syntax::{FuncDecl, Program};
use metapkg_ir::MemberDescriptor;

use crate::callsite::{generate, CallSite, Exclusion, WrapperBody};
use crate::names::{wrapper_base_name, WrapperNames};
use crate::summary::{ExcludedMember, Rename, RunSummary, SkippedMember};
use crate::{assemble, closure, Fragment, SynthContext, SynthError};

/// The assembled program and what went into it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Harness {
    pub program: Program,
    pub summary: RunSummary,
}

enum Outcome {
    Generated(WrapperBody, Vec<Fragment>),
    Excluded(Exclusion),
}

/// Generate wrappers and closures for `members` and assemble the harness.
///
/// Per-member synthesis failures are recorded in the summary. Only an
/// assembly failure is returned as an error.
#[tracing::instrument(level = "debug", skip_all, fields(members = members.len()))]
pub fn synthesize_harness(members: &[MemberDescriptor]) -> Result<Harness, SynthError> {
    let mut ctx = SynthContext::new();
    let mut names = WrapperNames::new();
    let mut summary = RunSummary::default();
    let mut wrappers = Vec::new();
    let mut closures = Vec::new();

    for member in members {
        let label = label(member);
        match synthesize_member(&mut ctx, member) {
            Ok(Outcome::Generated(site, member_closures)) => {
                let (name, renamed) = names.claim(member);
                if renamed {
                    let original = wrapper_base_name(member);
                    tracing::debug!(%original, assigned = %name, "wrapper renamed");
                    summary.renamed.push(Rename {
                        original,
                        assigned: name.clone(),
                    });
                }
                tracing::debug!(member = %label, wrapper = %name, closures = member_closures.len(), "wrapper generated");
                wrappers.push(Fragment {
                    func: FuncDecl::nullary(name, site.body),
                    units: site.units,
                });
                closures.extend(member_closures);
            }
            Ok(Outcome::Excluded(reason)) => {
                tracing::debug!(member = %label, %reason, "member excluded");
                summary.excluded.push(ExcludedMember {
                    member: label,
                    reason,
                });
            }
            Err(reason) => {
                ctx.discard_pending();
                tracing::warn!(member = %label, %reason, "member skipped");
                summary.skipped.push(SkippedMember {
                    member: label,
                    reason,
                });
            }
        }
    }

    summary.wrappers = wrappers.len();
    summary.closures = closures.len();
    let program = assemble(&wrappers, &closures)?;
    Ok(Harness { program, summary })
}

fn synthesize_member(
    ctx: &mut SynthContext,
    member: &MemberDescriptor,
) -> Result<Outcome, SynthError> {
    let site = match generate(ctx, member)? {
        CallSite::Wrapper(site) => site,
        CallSite::Excluded(reason) => return Ok(Outcome::Excluded(reason)),
    };
    let mut fragments = Vec::with_capacity(ctx.pending_len());
    while let Some(pending) = ctx.next_pending() {
        fragments.push(closure::synthesize(ctx, &pending)?);
    }
    Ok(Outcome::Generated(site, fragments))
}

/// `calc.Add` or `calc.Counter.Inc`.
fn label(member: &MemberDescriptor) -> String {
    match member.parent_type_name() {
        Some(parent) => format!("{}.{parent}.{}", member.unit.name, member.name),
        None => format!("{}.{}", member.unit.name, member.name),
    }
}

#[cfg(test)]
mod tests;
