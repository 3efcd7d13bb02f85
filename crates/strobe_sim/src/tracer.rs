//! Model-bound trace recording: hierarchy registration at bounded depth,
//! then change-only dumps against sampled signal values.
//!
//! The tracer observes a model it does not own: at each
//! [`dump`](Tracer::dump) it samples every watched signal and forwards the
//! values that changed since the previous dump to the VCD writer. The first
//! dump records everything.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::SimError;
use crate::model::{BenchModel, Scope, SignalId};
use crate::time::SimTime;
use crate::value::Bits;
use crate::vcd::VcdWriter;

/// Hierarchy depth the drivers pass when binding a tracer: effectively
/// unbounded for these small benches.
pub const TRACE_LEVELS: u32 = 99;

/// A trace writer bound to one model's signal hierarchy.
pub struct Tracer<W: Write> {
    vcd: VcdWriter<W>,
    watched: Vec<SignalId>,
    last: Vec<Option<Bits>>,
    last_time: Option<u64>,
}

impl Tracer<BufWriter<File>> {
    /// Opens `path` for writing and binds the model's signal hierarchy,
    /// truncating any previous trace at the same path.
    pub fn create<M: BenchModel>(
        model: &M,
        path: &Path,
        levels: u32,
    ) -> Result<Self, SimError> {
        let file = File::create(path)?;
        Self::new(BufWriter::new(file), &model.scope(), levels)
    }
}

impl<W: Write> Tracer<W> {
    /// Binds the given scope tree to a writer, registering signals at most
    /// `levels` scopes deep. Scopes below the cutoff are not declared and
    /// their signals never appear in the trace.
    pub fn new(writer: W, scope: &Scope, levels: u32) -> Result<Self, SimError> {
        let mut tracer = Self {
            vcd: VcdWriter::new(writer),
            watched: Vec::new(),
            last: Vec::new(),
            last_time: None,
        };
        tracer.register_scope(scope, levels)?;
        Ok(tracer)
    }

    fn register_scope(&mut self, scope: &Scope, levels: u32) -> Result<(), SimError> {
        if levels == 0 {
            return Ok(());
        }
        self.vcd.begin_scope(&scope.name)?;
        for decl in &scope.signals {
            self.vcd.declare(decl.id, &decl.name, decl.width)?;
            self.watched.push(decl.id);
            self.last.push(None);
        }
        for child in &scope.children {
            self.register_scope(child, levels - 1)?;
        }
        self.vcd.end_scope()
    }

    /// Number of signals registered at bind time.
    pub fn watched_count(&self) -> usize {
        self.watched.len()
    }

    /// Records the model's signal state at `time`.
    ///
    /// Dump times must be strictly increasing. A dump where nothing changed
    /// emits no timestamp at all.
    pub fn dump<M: BenchModel>(&mut self, model: &M, time: SimTime) -> Result<(), SimError> {
        let now = time.ticks();
        if let Some(prev) = self.last_time {
            if now <= prev {
                return Err(SimError::NonMonotonicTime { prev, next: now });
            }
        }
        self.last_time = Some(now);

        let mut changes = Vec::new();
        for (slot, &id) in self.watched.iter().enumerate() {
            let value = model.sample(id);
            let changed = match &self.last[slot] {
                Some(prev) => *prev != value,
                None => true,
            };
            if changed {
                changes.push((slot, id, value));
            }
        }

        if changes.is_empty() {
            return Ok(());
        }
        self.vcd.timestamp(now)?;
        for (slot, id, value) in changes {
            self.vcd.change(id, &value)?;
            self.last[slot] = Some(value);
        }
        Ok(())
    }

    /// Finalizes the trace and flushes the underlying writer.
    pub fn close(mut self) -> Result<(), SimError> {
        self.vcd.finalize()
    }

    /// Read access to the underlying writer.
    pub fn get_ref(&self) -> &W {
        self.vcd.get_ref()
    }
}
