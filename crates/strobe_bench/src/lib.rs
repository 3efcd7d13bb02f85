//! Bench models for the strobe waveform drivers.
//!
//! Two self-stimulating benches, each wrapping a small DUT: a 4-bit adder
//! with unsigned operand conversion and a registered multiply-accumulate
//! unit. Each bench generates its own clock and stimulus, raises the run
//! context's completion flag when the stimulus is exhausted, and exposes
//! its signals for VCD tracing through the [`strobe_sim::BenchModel`]
//! contract.

#![warn(missing_docs)]

pub mod adder;
pub mod mac;

pub use adder::Adder4Tb;
pub use mac::MacTb;
