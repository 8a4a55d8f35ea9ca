//! Convert a whole recording into a [`Timeline`].
//!
//! ```
//! use irq_timeline::convert::{output_path, IntervalParser};
//! use irq_timeline::snapshot::Interrupts;
//! use std::path::Path;
//!
//! let timeline = IntervalParser::parse(&Interrupts::from_string(String::new())).unwrap();
//! assert_eq!(timeline.to_json().unwrap(), r#"{"labels":[],"datasets":[]}"#);
//!
//! let out = output_path(Path::new("data/raw/host1/interrupts"));
//! assert_eq!(out, Path::new("data/final/host1/interrupts.json"));
//! ```

use crate::delta::DeltaComputer;
use crate::error::{Error, RecordError, Result};
use crate::series::{Reshaper, Timeline};
use crate::snapshot::{Interrupts, Record};

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// Part of the input path that gets replaced.
pub const RAW_DIR: &str = "data/raw";
/// Replacement of [`RAW_DIR`] in the output path.
pub const FINAL_DIR: &str = "data/final";
/// Appended to the output path.
pub const JSON_SUFFIX: &str = ".json";

/// Runs every record through parsing, delta computation and reshaping.
///
/// The amount of cpus is taken from the first record, every following
/// record needs to list the same amount.
#[derive(Debug, Clone, Default)]
pub struct IntervalParser {
	records: usize,
	deltas: DeltaComputer,
	// set by the first record
	reshaper: Option<Reshaper>
}

impl IntervalParser {

	pub fn new() -> Self {
		Self::default()
	}

	/// Parses every record of the recording and returns the timeline.
	pub fn parse(interrupts: &Interrupts) -> Result<Timeline> {
		let mut parser = Self::new();
		for record in interrupts.records() {
			parser.feed(record)?;
		}
		Ok(parser.finish())
	}

	/// How many records were fed.
	pub fn records(&self) -> usize {
		self.records
	}

	/// The amount of cpus, known after the first record.
	pub fn cpus(&self) -> Option<usize> {
		self.reshaper.as_ref().map(Reshaper::cpus)
	}

	/// Feeds the next record.
	///
	/// ## Errors
	/// Parsing errors are returned as [`Error::Record`] containing the index and
	/// text of the record.
	pub fn feed(&mut self, record: Record<'_>) -> Result<()> {
		let index = self.records;
		self.records += 1;

		let wrap = |source: RecordError| Error::Record {
			index,
			raw: record.raw().to_string(),
			source
		};

		let snapshot = record.snapshot().map_err(&wrap)?;

		let reshaper = self.reshaper
			.get_or_insert_with(|| Reshaper::new(snapshot.cpus()));
		if reshaper.cpus() != snapshot.cpus() {
			return Err(wrap(RecordError::CpuCountMismatch {
				expected: reshaper.cpus(),
				found: snapshot.cpus()
			}))
		}

		log::debug!(
			"record {} at {} with {} cpus",
			index, snapshot.timestamp(), snapshot.cpus()
		);

		if let Some(row) = self.deltas.process(&snapshot)? {
			reshaper.push(row)?;
		}

		Ok(())
	}

	/// Returns the timeline, one row per record after the first.
	pub fn finish(self) -> Timeline {
		self.reshaper
			.map(Reshaper::finish)
			.unwrap_or_else(Timeline::empty)
	}

}

/// Replaces `data/raw` with `data/final` and appends `.json`.
pub fn output_path(input: &Path) -> PathBuf {
	let mut out = match input.to_str() {
		Some(s) => OsString::from(s.replace(RAW_DIR, FINAL_DIR)),
		None => input.as_os_str().to_os_string()
	};
	out.push(JSON_SUFFIX);
	out.into()
}

/// Converts the recording at `input` and writes the json to `output`.
///
/// The output file is only created once the whole recording was
/// converted successfully.
pub fn convert_file(input: &Path, output: &Path) -> Result<Timeline> {
	let interrupts = Interrupts::read(input)?;
	log::info!("read {} bytes from {}", interrupts.raw().len(), input.display());

	let timeline = IntervalParser::parse(&interrupts)?;
	let json = timeline.to_json()?;

	fs::write(output, json)
		.map_err(|e| Error::io(output, e))?;
	log::info!(
		"wrote {} rows for {} cpus to {}",
		timeline.rows(), timeline.cpus(), output.display()
	);

	Ok(timeline)
}
