//! The bench-model abstraction and the signal hierarchy models expose for
//! trace binding.
//!
//! A [`BenchModel`] is anything the harness can evaluate step by step and
//! observe through a tracer: it declares its signals as a [`Scope`] tree,
//! answers [`sample`](BenchModel::sample) queries against those
//! declarations, and raises the run context's completion flag when its
//! embedded stimulus is exhausted.

use serde::{Deserialize, Serialize};

use crate::context::SimContext;
use crate::error::SimError;
use crate::value::Bits;

/// Opaque ID for a signal declared by a bench model.
///
/// IDs are assigned by the model and only need to be unique within it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct SignalId(u32);

impl SignalId {
    /// Creates a `SignalId` from a raw index.
    pub const fn from_raw(index: u32) -> Self {
        Self(index)
    }

    /// Returns the raw index.
    pub const fn as_raw(self) -> u32 {
        self.0
    }
}

/// A single signal declaration within a scope.
#[derive(Clone, Debug)]
pub struct SignalDecl {
    /// The model-assigned signal ID.
    pub id: SignalId,
    /// The signal's name within its scope.
    pub name: String,
    /// Bit width of the signal.
    pub width: u32,
}

/// One level of the signal hierarchy a model exposes for tracing.
#[derive(Clone, Debug)]
pub struct Scope {
    /// Scope name, shown as a module level in waveform viewers.
    pub name: String,
    /// Signals declared directly in this scope.
    pub signals: Vec<SignalDecl>,
    /// Nested child scopes.
    pub children: Vec<Scope>,
}

impl Scope {
    /// Creates an empty scope with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            signals: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Adds a signal declaration to this scope.
    pub fn signal(mut self, id: SignalId, name: &str, width: u32) -> Self {
        self.signals.push(SignalDecl {
            id,
            name: name.to_string(),
            width,
        });
        self
    }

    /// Nests a child scope under this one.
    pub fn child(mut self, child: Scope) -> Self {
        self.children.push(child);
        self
    }

    /// Returns the depth of this scope tree (a leaf scope has depth 1).
    pub fn depth(&self) -> u32 {
        1 + self
            .children
            .iter()
            .map(Scope::depth)
            .max()
            .unwrap_or(0)
    }
}

/// A cycle-accurate simulation model driven by the bench harness.
///
/// One implementation exists per target circuit. The harness never looks
/// inside the model: the whole contract is evaluate-and-completion-flag
/// plus trace-bindability.
pub trait BenchModel {
    /// Human-readable test name used in the start/end banners.
    fn test_name(&self) -> &str;

    /// The signal hierarchy to register with a tracer.
    fn scope(&self) -> Scope;

    /// Samples the current value of a declared signal.
    ///
    /// # Panics
    ///
    /// Implementations may panic when `id` was not declared in
    /// [`scope`](BenchModel::scope).
    fn sample(&self, id: SignalId) -> Bits;

    /// Advances internal combinational and sequential state one step.
    ///
    /// Called once per virtual-time tick, in strictly increasing time
    /// order. The model raises `ctx`'s completion flag when its stimulus
    /// is exhausted; the harness keeps calling until it does (or until an
    /// explicit step limit intervenes).
    fn eval(&mut self, ctx: &mut SimContext) -> Result<(), SimError>;
}
