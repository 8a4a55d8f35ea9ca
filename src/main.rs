//! Converts a recording of `/proc/interrupts` into json.
//!
//! ```bash
//! # writes data/final/host1/interrupts.json
//! irq-timeline data/raw/host1/interrupts
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process;

use irq_timeline::convert::{convert_file, output_path};

/// Per cpu interrupt time series from recorded /proc/interrupts snapshots
#[derive(Parser)]
#[command(name = "irq-timeline")]
#[command(author, version, about, long_about = None)]
struct Cli {
	/// Recording, `data/raw` in the path is replaced by `data/final`
	/// for the output
	#[arg(value_name = "INPUT")]
	input: PathBuf,

	/// Write the json here instead
	#[arg(short, long, value_name = "OUTPUT")]
	output: Option<PathBuf>,

	/// Verbosity level (-v for info, -vv for debug)
	#[arg(short, long, action = clap::ArgAction::Count)]
	verbose: u8
}

fn main() -> Result<()> {
	let cli = match Cli::try_parse() {
		Ok(cli) => cli,
		// usage errors exit with 1, help and version with 0
		Err(e) if e.use_stderr() => {
			let _ = e.print();
			process::exit(1)
		},
		Err(e) => e.exit()
	};

	let log_level = match cli.verbose {
		0 => "warn",
		1 => "info",
		_ => "debug"
	};
	env_logger::Builder::from_env(
		env_logger::Env::default().default_filter_or(log_level)
	).init();

	let output = cli.output
		.unwrap_or_else(|| output_path(&cli.input));

	convert_file(&cli.input, &output)
		.with_context(|| format!(
			"problem converting {}",
			cli.input.display()
		))?;

	Ok(())
}
