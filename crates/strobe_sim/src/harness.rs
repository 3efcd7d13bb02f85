//! The bench harness: one model, one run context, optionally one tracer,
//! and the fixed evaluate/dump/advance loop.
//!
//! Each loop iteration evaluates the model to a fixed point, dumps the
//! post-evaluation signal state at the current virtual time, then advances
//! time by one tick. The loop ends when the model raises the completion
//! flag, or at an explicit step limit when one is configured.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::context::SimContext;
use crate::error::SimError;
use crate::model::BenchModel;
use crate::time::SimTime;
use crate::tracer::Tracer;

/// Configuration for one bench run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BenchConfig {
    /// Optional upper bound on evaluation steps. `None` leaves the loop
    /// unbounded: the run ends only when the model finishes.
    pub max_steps: Option<u64>,
    /// Output path for the waveform file.
    pub waveform_path: Option<PathBuf>,
    /// Whether to record a waveform. Ignored if `waveform_path` is `None`.
    pub record_waveform: bool,
}

/// The outcome of a completed bench run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchResult {
    /// Virtual time when the loop exited.
    pub final_time: SimTime,
    /// Whether the model raised the completion flag, as opposed to the run
    /// stopping at its step limit.
    pub finished: bool,
    /// Number of evaluation steps executed.
    pub steps: u64,
}

/// The result of a single harness step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepResult {
    /// The model has not finished; the loop can continue.
    Continued,
    /// The model raised the completion flag during this step.
    Finished,
}

/// Drives one model through a complete simulation run.
pub struct Harness<M: BenchModel> {
    ctx: SimContext,
    model: M,
    tracer: Option<Tracer<BufWriter<File>>>,
}

impl<M: BenchModel> Harness<M> {
    /// Creates a harness around a freshly constructed model.
    pub fn new(model: M) -> Self {
        Self {
            ctx: SimContext::new(),
            model,
            tracer: None,
        }
    }

    /// Forwards process arguments into the run context.
    pub fn command_args<I, S>(&mut self, args: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ctx.command_args(args);
    }

    /// Enables tracing and opens a waveform file at `path`, registering the
    /// model's signal hierarchy at most `levels` scopes deep.
    pub fn open_trace(&mut self, path: &Path, levels: u32) -> Result<(), SimError> {
        self.ctx.trace_ever_on();
        self.tracer = Some(Tracer::create(&self.model, path, levels)?);
        Ok(())
    }

    /// Executes one evaluate/dump/advance iteration.
    ///
    /// The dump always reflects post-evaluation state at the pre-advance
    /// time, including on the iteration where the model finishes.
    pub fn step(&mut self) -> Result<StepResult, SimError> {
        self.model.eval(&mut self.ctx)?;
        if let Some(tracer) = &mut self.tracer {
            tracer.dump(&self.model, self.ctx.time())?;
        }
        self.ctx.advance(1);
        if self.ctx.finished() {
            Ok(StepResult::Finished)
        } else {
            Ok(StepResult::Continued)
        }
    }

    /// Runs until the model finishes or `max_steps` is reached, then closes
    /// the tracer.
    ///
    /// Reaching the step limit is a normal exit with `finished = false`,
    /// not an error. With `max_steps: None` a model that never finishes
    /// loops forever; that is the accepted contract of these benches.
    pub fn run(&mut self, max_steps: Option<u64>) -> Result<BenchResult, SimError> {
        let mut steps = 0u64;
        while !self.ctx.finished() {
            if let Some(limit) = max_steps {
                if steps >= limit {
                    break;
                }
            }
            self.step()?;
            steps += 1;
        }
        if let Some(tracer) = self.tracer.take() {
            tracer.close()?;
        }
        Ok(BenchResult {
            final_time: self.ctx.time(),
            finished: self.ctx.finished(),
            steps,
        })
    }

    /// Read access to the run context.
    pub fn context(&self) -> &SimContext {
        &self.ctx
    }

    /// Read access to the model under test.
    pub fn model(&self) -> &M {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Scope, SignalId};
    use crate::value::Bits;

    const SIG_COUNT: u32 = 0;

    /// Counts down from `remaining` and finishes at zero. `None` never
    /// finishes.
    struct Countdown {
        remaining: Option<u64>,
        count: u64,
    }

    impl Countdown {
        fn finite(remaining: u64) -> Self {
            Self {
                remaining: Some(remaining),
                count: 0,
            }
        }

        fn endless() -> Self {
            Self {
                remaining: None,
                count: 0,
            }
        }
    }

    impl BenchModel for Countdown {
        fn test_name(&self) -> &str {
            "COUNTDOWN TEST"
        }

        fn scope(&self) -> Scope {
            Scope::new("countdown_tb").signal(SignalId::from_raw(SIG_COUNT), "count", 16)
        }

        fn sample(&self, id: SignalId) -> Bits {
            match id.as_raw() {
                SIG_COUNT => Bits::from_u64(self.count & 0xFFFF, 16),
                other => panic!("signal {other} not declared"),
            }
        }

        fn eval(&mut self, ctx: &mut SimContext) -> Result<(), SimError> {
            self.count += 1;
            if let Some(remaining) = &mut self.remaining {
                if self.count >= *remaining {
                    ctx.finish();
                }
            }
            Ok(())
        }
    }

    #[test]
    fn run_finishes_with_model() {
        let mut harness = Harness::new(Countdown::finite(5));
        let result = harness.run(None).unwrap();
        assert!(result.finished);
        assert_eq!(result.steps, 5);
        assert_eq!(result.final_time, SimTime::from_ticks(5));
    }

    #[test]
    fn run_stops_at_step_limit() {
        let mut harness = Harness::new(Countdown::endless());
        let result = harness.run(Some(10)).unwrap();
        assert!(!result.finished);
        assert_eq!(result.steps, 10);
        assert_eq!(result.final_time, SimTime::from_ticks(10));
    }

    #[test]
    fn step_reports_finish() {
        let mut harness = Harness::new(Countdown::finite(2));
        assert_eq!(harness.step().unwrap(), StepResult::Continued);
        assert_eq!(harness.step().unwrap(), StepResult::Finished);
    }

    #[test]
    fn time_advances_once_per_step() {
        let mut harness = Harness::new(Countdown::finite(3));
        harness.step().unwrap();
        harness.step().unwrap();
        assert_eq!(harness.context().time(), SimTime::from_ticks(2));
    }

    #[test]
    fn finished_run_returns_immediately() {
        let mut harness = Harness::new(Countdown::finite(1));
        let first = harness.run(None).unwrap();
        assert!(first.finished);
        let again = harness.run(None).unwrap();
        assert_eq!(again.steps, 0);
        assert_eq!(again.final_time, first.final_time);
    }

    #[test]
    fn command_args_reach_context() {
        let mut harness = Harness::new(Countdown::finite(1));
        harness.command_args(["+trace=deep"]);
        assert_eq!(harness.context().plusarg_value("trace"), Some("deep"));
    }

    #[test]
    fn traced_run_writes_waveform() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("countdown.vcd");

        let mut harness = Harness::new(Countdown::finite(4));
        harness.open_trace(&path, crate::tracer::TRACE_LEVELS).unwrap();
        assert!(harness.context().tracing_enabled());
        let result = harness.run(None).unwrap();
        assert!(result.finished);

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("$scope module countdown_tb $end"));
        assert!(contents.contains("#0"));
        assert!(contents.contains("#3"));
    }

    #[test]
    fn open_trace_into_missing_directory_errors() {
        let mut harness = Harness::new(Countdown::finite(1));
        let err = harness
            .open_trace(Path::new("/nonexistent/dir/out.vcd"), 99)
            .unwrap_err();
        assert!(matches!(err, SimError::WaveformIo(_)));
    }

    #[test]
    fn bench_config_default() {
        let config = BenchConfig::default();
        assert!(config.max_steps.is_none());
        assert!(config.waveform_path.is_none());
        assert!(!config.record_waveform);
    }

    #[test]
    fn bench_config_serde_roundtrip() {
        let config = BenchConfig {
            max_steps: Some(1000),
            waveform_path: Some(PathBuf::from("out/bench.vcd")),
            record_waveform: true,
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: BenchConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.max_steps, Some(1000));
        assert_eq!(back.waveform_path.as_deref(), Some(Path::new("out/bench.vcd")));
        assert!(back.record_waveform);
    }
}
