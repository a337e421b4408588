//! Identifier allocation.
//!
//! Every generated identifier comes from a deterministic allocator, so the
//! same input always yields the same program:
//!
//! - [`Scope`] hands out local variable names inside one function body
//! - [`WrapperNames`] derives top-level wrapper names from member identity
//! - closure names (`closureN`) are counted by the synthesis context
//!
//! Wrapper names always contain an underscore and closure names never do, so
//! the two namespaces cannot collide.

use rustc_hash::{FxHashMap, FxHashSet};

use metapkg_ir::MemberDescriptor;

/// Prefix of synthesized closure function names.
pub const CLOSURE_PREFIX: &str = "closure";

/// Prefix of synthesized local variable names.
const LOCAL_PREFIX: &str = "v";

/// Go's predeclared identifiers. A local with one of these names would
/// shadow it for the rest of the body.
const PREDECLARED: &[&str] = &[
    "any", "append", "bool", "byte", "cap", "clear", "close", "comparable", "complex",
    "complex128", "complex64", "copy", "delete", "error", "false", "float32", "float64",
    "imag", "int", "int16", "int32", "int64", "int8", "iota", "len", "make", "max", "min",
    "new", "nil", "panic", "print", "println", "real", "recover", "rune", "string", "true",
    "uint", "uint16", "uint32", "uint64", "uint8", "uintptr",
];

pub fn closure_name(index: u32) -> String {
    format!("{CLOSURE_PREFIX}{index}")
}

/// Whether `name` lies in the namespace reserved for closures.
pub fn is_closure_name(name: &str) -> bool {
    name.strip_prefix(CLOSURE_PREFIX)
        .is_some_and(|rest| !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()))
}

/// Local identifiers of one generated function body.
#[derive(Debug, Default)]
pub struct Scope {
    used: FxHashSet<String>,
    reserved: FxHashSet<String>,
    counter: u32,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    /// A scope in which `qualifiers` (package names referenced by the body)
    /// must stay visible.
    pub fn with_reserved<'a>(qualifiers: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            reserved: qualifiers.into_iter().map(str::to_string).collect(),
            ..Self::default()
        }
    }

    /// Bind a variable, keeping `preferred` when it is a legal, unused name.
    pub fn bind(&mut self, preferred: &str) -> String {
        if self.is_available(preferred) {
            self.used.insert(preferred.to_string());
            return preferred.to_string();
        }
        self.fresh()
    }

    /// Allocate a synthesized name: `v0`, `v1`, ...
    pub fn fresh(&mut self) -> String {
        loop {
            let candidate = format!("{LOCAL_PREFIX}{}", self.counter);
            self.counter += 1;
            if self.is_available(&candidate) {
                self.used.insert(candidate.clone());
                return candidate;
            }
        }
    }

    fn is_available(&self, name: &str) -> bool {
        !name.is_empty()
            && name != "_"
            && !self.used.contains(name)
            && !self.reserved.contains(name)
            && !PREDECLARED.contains(&name)
            && !is_closure_name(name)
    }
}

/// Replace every character that cannot appear in a Go identifier with `_`,
/// prefixing `_` when the result would start with a digit.
pub fn sanitize(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 1);
    if raw.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        out.push('_');
    }
    for c in raw.chars() {
        if c.is_alphanumeric() || c == '_' {
            out.push(c);
        } else {
            out.push('_');
        }
    }
    out
}

/// The undisambiguated wrapper name of `member`:
/// `unitPath_[ParentType_]Member`, sanitized.
pub fn wrapper_base_name(member: &MemberDescriptor) -> String {
    let raw = match member.parent_type_name() {
        Some(parent) => format!("{}_{parent}_{}", member.unit_path(), member.name),
        None => format!("{}_{}", member.unit_path(), member.name),
    };
    sanitize(&raw)
}

/// Allocates unique wrapper names across a run.
///
/// A member whose sanitized name is already taken gets the next free numeric
/// suffix (`_2`, `_3`, ...) instead of replacing the earlier wrapper.
#[derive(Debug, Default)]
pub struct WrapperNames {
    taken: FxHashSet<String>,
    next_suffix: FxHashMap<String, u32>,
}

impl WrapperNames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim a name for `member`. The second value is `true` when the name
    /// had to be disambiguated.
    pub fn claim(&mut self, member: &MemberDescriptor) -> (String, bool) {
        let base = wrapper_base_name(member);
        if self.taken.insert(base.clone()) {
            return (base, false);
        }
        let suffix = self.next_suffix.entry(base.clone()).or_insert(2);
        loop {
            let candidate = format!("{base}_{suffix}");
            *suffix += 1;
            if self.taken.insert(candidate.clone()) {
                return (candidate, true);
            }
        }
    }
}
