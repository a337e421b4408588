//! Metapkg synthesis - from member descriptors to a harness program.
//!
//! ```text
//! TypedProgram
//!     |  enumerate          exported functions, *T method sets
//!     v
//! [MemberDescriptor]
//!     |  callsite::generate placeholders + one call per member
//!     |  closure::synthesize   drained per member from SynthContext
//!     v
//! [Fragment]
//!     |  assemble           imports, wrappers, closures, main()
//!     v
//! Program + RunSummary
//! ```
//!
//! All mutable state of a run lives in [`SynthContext`] and the wrapper name
//! table owned by [`synthesize_harness`]. Nothing is global, so runs are
//! reproducible and independent.

mod assemble;
pub mod callsite;
pub mod closure;
mod context;
pub mod declare;
mod enumerate;
mod error;
pub mod names;
mod pass;
pub mod render;
mod summary;

pub use assemble::{assemble, Fragment};
pub use callsite::{CallSite, Exclusion, WrapperBody};
pub use context::{PendingClosure, SynthContext};
pub use enumerate::{enumerate, members_of};
pub use error::SynthError;
pub use pass::{synthesize_harness, Harness};
pub use render::type_name;
pub use summary::{ExcludedMember, Rename, RunSummary, SkippedMember};
