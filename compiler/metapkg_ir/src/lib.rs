//! Metapkg IR - data shared by every stage of harness generation.
//!
//! - [`TypeShape`] and friends: the structural type algebra
//! - [`ParamDescriptor`], [`Signature`], [`MemberDescriptor`]: call targets
//! - [`TypedProgram`]: the loader's whole-program view, with method sets
//! - [`syntax`]: the abstract Go syntax tree handed to the emitter
//!
//! Everything here is plain data. Descriptors are produced once per run and
//! never mutated; the syntax tree is owned by the assembler until emission.

mod descriptor;
mod program;
mod shape;
pub mod syntax;

pub use descriptor::{is_exported, MemberDescriptor, ParamDescriptor, Signature};
pub use program::{
    EmbeddedField, FuncMember, Member, MethodDecl, MethodSetEntry, Package, TypeMember,
    TypedProgram,
};
pub use shape::{BasicKind, ChanDir, InterfaceMethod, StructField, TypeShape, UnitRef};
