//! Error types for bench setup and execution.
//!
//! All failures that can occur while binding a tracer or running a bench
//! are represented as variants of [`SimError`].

use std::io;

/// Errors that can occur during bench setup or execution.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// An I/O error occurred while opening or writing waveform data.
    #[error("waveform I/O error: {0}")]
    WaveformIo(#[from] io::Error),

    /// A value change was recorded for a signal never declared to the writer.
    #[error("unregistered trace signal {0}")]
    UnknownSignal(u32),

    /// A dump was issued at or before the previous dump time.
    #[error("non-monotonic dump time: {prev} followed by {next}")]
    NonMonotonicTime {
        /// The previously dumped time in ticks.
        prev: u64,
        /// The offending later dump time in ticks.
        next: u64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn waveform_io_display() {
        let e = SimError::WaveformIo(io::Error::new(io::ErrorKind::NotFound, "file not found"));
        assert!(e.to_string().contains("waveform I/O error"));
    }

    #[test]
    fn unknown_signal_display() {
        let e = SimError::UnknownSignal(7);
        assert_eq!(e.to_string(), "unregistered trace signal 7");
    }

    #[test]
    fn non_monotonic_time_display() {
        let e = SimError::NonMonotonicTime { prev: 5, next: 5 };
        assert_eq!(e.to_string(), "non-monotonic dump time: 5 followed by 5");
    }
}
