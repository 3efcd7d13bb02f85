//! Driver for the 4-bit adder bench.
//!
//! Runs the simulation to completion and records the waveform to
//! `adder_4bit_conv_unsign.vcd` in the working directory. Reruns truncate
//! the previous trace. A completed run exits 0 whether or not the bench
//! raised its completion flag; only setup failures exit nonzero.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use strobe_bench::Adder4Tb;
use strobe_sim::{run_bench, BenchConfig};

/// Bench driver for the 4-bit adder with unsigned conversion.
#[derive(Parser, Debug)]
#[command(
    name = "adder_4bit_conv_unsign",
    version,
    about = "4-bit adder bench driver"
)]
struct Args {
    /// Output path for the waveform file.
    #[arg(short, long, default_value = "adder_4bit_conv_unsign.vcd")]
    output: PathBuf,

    /// Disable waveform recording.
    #[arg(long)]
    no_waveform: bool,

    /// Stop after this many evaluation steps even if the bench has not
    /// finished. Unbounded by default.
    #[arg(long)]
    max_steps: Option<u64>,

    /// Suppress the run summary on stderr.
    #[arg(short, long)]
    quiet: bool,

    /// Simulator pass-through arguments (`+name` or `+name=value`).
    /// Unrecognized plusargs are accepted and ignored.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    plusargs: Vec<String>,
}

fn main() {
    let args = Args::parse();

    let config = BenchConfig {
        max_steps: args.max_steps,
        waveform_path: Some(args.output.clone()),
        record_waveform: !args.no_waveform,
    };

    match run_bench(Adder4Tb::new(), &config, args.plusargs) {
        Ok(result) => {
            if !args.quiet {
                eprintln!(
                    "   {} steps, final time {}",
                    result.steps, result.final_time
                );
                if !args.no_waveform {
                    eprintln!("   Waveform: {}", args.output.display());
                }
            }
            process::exit(0);
        }
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}
