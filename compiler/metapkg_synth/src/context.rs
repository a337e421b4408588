//! Per-run synthesis state.
//!
//! `SynthContext` owns everything that outlives a single declaration: the
//! queue of pending closures and the closure name counter. It is passed by
//! `&mut` through every synthesis call, so two runs never share state.

use std::collections::VecDeque;

use metapkg_ir::{ParamDescriptor, Signature};

use crate::names::closure_name;

/// A function-typed parameter or result awaiting its standalone closure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingClosure {
    pub name: String,
    /// Import path of the unit whose parameter requested the closure.
    pub owning_unit: String,
    pub params: Vec<ParamDescriptor>,
    pub results: Vec<ParamDescriptor>,
    pub variadic: bool,
    pub receiver: Option<ParamDescriptor>,
}

#[derive(Debug, Default)]
pub struct SynthContext {
    pending: VecDeque<PendingClosure>,
    closure_counter: u32,
}

impl SynthContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a closure for `signature` and return the name it will be
    /// defined under.
    pub fn enqueue_closure(&mut self, owning_unit: &str, signature: &Signature) -> String {
        let name = closure_name(self.closure_counter);
        self.closure_counter += 1;
        tracing::trace!(closure = %name, "closure requested");
        self.pending.push_back(PendingClosure {
            name: name.clone(),
            owning_unit: owning_unit.to_string(),
            params: signature.params.clone(),
            results: signature.results.clone(),
            variadic: signature.variadic,
            receiver: signature.receiver.as_deref().cloned(),
        });
        name
    }

    /// Take the oldest pending closure.
    pub fn next_pending(&mut self) -> Option<PendingClosure> {
        self.pending.pop_front()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Drop every pending closure. Used to roll back a failed member.
    pub fn discard_pending(&mut self) {
        self.pending.clear();
    }
}
