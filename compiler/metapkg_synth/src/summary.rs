//! Per-run accounting of what was generated and what was not.

use std::fmt;

use crate::{Exclusion, SynthError};

/// A member that got no wrapper because synthesis failed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedMember {
    /// Display label, `unit.Name` or `unit.Parent.Name`.
    pub member: String,
    pub reason: SynthError,
}

/// A member left out on purpose: reserved names and private receivers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExcludedMember {
    pub member: String,
    pub reason: Exclusion,
}

/// A wrapper that was given a disambiguated name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rename {
    pub original: String,
    pub assigned: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub wrappers: usize,
    pub closures: usize,
    pub excluded: Vec<ExcludedMember>,
    pub skipped: Vec<SkippedMember>,
    pub renamed: Vec<Rename>,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "generated {} wrappers, {} closures, {} skipped",
            self.wrappers,
            self.closures,
            self.skipped.len()
        )
    }
}

impl fmt::Display for Exclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Exclusion::ReservedName(name) => write!(f, "reserved name `{name}`"),
            Exclusion::PrivateReceiverType(ty) => write!(f, "unexported receiver type `{ty}`"),
        }
    }
}
