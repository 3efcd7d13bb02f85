//! Cycle-accurate bench harness with VCD waveform tracing.
//!
//! This crate drives self-stimulating circuit models through a fixed
//! evaluate/dump/advance loop and mirrors their signal state into a Value
//! Change Dump (VCD) file for waveform viewers.
//!
//! # Architecture
//!
//! A [`BenchModel`] exposes evaluation, a completion flag raised through
//! the run-scoped [`SimContext`], and a signal hierarchy for trace binding.
//! The [`Harness`] owns one model, one context, and optionally one
//! [`Tracer`]; each iteration evaluates the model, dumps post-evaluation
//! state at the current virtual time, and advances time by one tick.
//!
//! # Usage
//!
//! ```ignore
//! use strobe_sim::{run_bench, BenchConfig};
//!
//! let config = BenchConfig {
//!     waveform_path: Some("bench.vcd".into()),
//!     record_waveform: true,
//!     ..BenchConfig::default()
//! };
//! let result = run_bench(MyBench::new(), &config, std::env::args().skip(1))?;
//! println!("finished at {}", result.final_time);
//! ```
//!
//! # Modules
//!
//! - `error` — bench error types
//! - `time` — virtual time as a tick counter
//! - `value` — 4-state logic and packed bit vectors
//! - `context` — per-run state (time, completion flag, plusargs)
//! - `model` — the bench-model trait and signal declaration tree
//! - `vcd` — low-level VCD text output
//! - `tracer` — model-bound change-only trace recording
//! - `harness` — the evaluate/dump/advance loop

#![warn(missing_docs)]

pub mod context;
pub mod error;
pub mod harness;
pub mod model;
pub mod time;
pub mod tracer;
pub mod value;
pub mod vcd;

pub use context::SimContext;
pub use error::SimError;
pub use harness::{BenchConfig, BenchResult, Harness, StepResult};
pub use model::{BenchModel, Scope, SignalDecl, SignalId};
pub use time::SimTime;
pub use tracer::{Tracer, TRACE_LEVELS};
pub use value::{Bits, Logic};

/// High-level entry point: runs one bench to completion with banners.
///
/// Executes the fixed driver sequence: forward pass-through arguments into
/// the run context, enable tracing and open the waveform file when
/// configured, print the start banner, loop until the model finishes (or
/// the configured step limit is reached), close the trace, print the end
/// banner. A run that stops at its step limit is still a normal result.
pub fn run_bench<M, I, S>(model: M, config: &BenchConfig, args: I) -> Result<BenchResult, SimError>
where
    M: BenchModel,
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut harness = Harness::new(model);
    harness.command_args(args);

    if config.record_waveform {
        if let Some(path) = &config.waveform_path {
            harness.open_trace(path, TRACE_LEVELS)?;
        }
    }

    println!("****** START of {} ****** ", harness.model().test_name());
    let result = harness.run(config.max_steps)?;
    println!("****** END of {} ****** ", harness.model().test_name());

    Ok(result)
}
