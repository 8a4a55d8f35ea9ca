//!
//! Parse recorded snapshots of `/proc/interrupts`.
//!
//! A recording is a file where a collector repeatedly wrote the marker
//! `##TIMESTAMP## `, the current time and then the content of
//! `/proc/interrupts`.
//!
//! ```
//! use irq_timeline::snapshot::{Interrupts, TIMESTAMP_MARKER};
//! let raw = format!(
//! 	"{}20240101-000000\n{}\n{}\n",
//! 	TIMESTAMP_MARKER,
//! 	"           CPU0       CPU1",
//! 	"  0:          5         10   IO-APIC   2-edge      timer"
//! );
//! let interrupts = Interrupts::from_string(raw);
//! let record = interrupts.records().next().unwrap();
//! let snapshot = record.snapshot().unwrap();
//! assert_eq!(snapshot.totals(), [5, 10]);
//! ```

use crate::error::{Error, RecordError, Result};
use crate::util::{count_markers, parse_counters};

use std::fs;
use std::path::Path;

use chrono::NaiveDateTime;

/// Introduces every snapshot.
pub const TIMESTAMP_MARKER: &str = "##TIMESTAMP## ";
/// Format of the line following the marker.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S";
/// Every cpu column in the header contains this.
pub const CPU_MARKER: &str = "CPU";

/// A whole recording.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interrupts {
	raw: String
}

impl Interrupts {

	pub fn from_string(raw: String) -> Self {
		Self {raw}
	}

	/// Read a recording from a file.
	pub fn read(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		fs::read_to_string(path)
			.map(Self::from_string)
			.map_err(|e| Error::io(path, e))
	}

	pub fn raw(&self) -> &str {
		&self.raw
	}

	/// Returns every record. Text before the first marker is skipped.
	pub fn records<'a>(&'a self) -> impl Iterator<Item=Record<'a>> {
		self.raw.split(TIMESTAMP_MARKER)
			.skip(1)
			.map(Record::from_str)
	}

}

/// One snapshot as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record<'a> {
	raw: &'a str
}

impl<'a> Record<'a> {

	fn from_str(raw: &'a str) -> Self {
		Self {raw}
	}

	/// The text after the marker, including the timestamp.
	pub fn raw(&self) -> &'a str {
		self.raw
	}

	#[inline]
	fn lines(&self) -> impl Iterator<Item=&'a str> {
		self.raw.split('\n')
	}

	/// Parses the first line.
	pub fn timestamp(&self) -> std::result::Result<NaiveDateTime, RecordError> {
		let line = self.lines().next().unwrap_or("").trim();
		NaiveDateTime::parse_from_str(line, TIMESTAMP_FORMAT)
			.map_err(|e| RecordError::MalformedTimestamp {
				line: line.into(),
				reason: e.to_string()
			})
	}

	/// Returns the amount of cpu columns in the header.
	pub fn cpus(&self) -> std::result::Result<usize, RecordError> {
		let header = self.lines().nth(1)
			.ok_or(RecordError::MissingCpuHeader)?;
		match count_markers(header, CPU_MARKER) {
			0 => Err(RecordError::MissingCpuHeader),
			n => Ok(n)
		}
	}

	/// Returns every line which has exactly `cpus` counters, other lines
	/// are skipped.
	pub fn irq_lines(&self, cpus: usize) -> impl Iterator<Item=IrqLine<'a>> {
		self.lines()
			.skip(2)// timestamp and header
			.filter_map(move |line| IrqLine::parse(line, cpus))
	}

	/// Sums the counters of every irq line per cpu.
	/// Returns `None` if no line matched.
	pub fn totals(&self, cpus: usize) -> Option<Vec<u64>> {
		self.irq_lines(cpus)
			.fold(None, |totals: Option<Vec<u64>>, line| {
				let mut totals = totals.unwrap_or_else(|| vec![0; cpus]);
				// wraps, see DeltaComputer
				totals.iter_mut()
					.zip(line.counters())
					.for_each(|(t, c)| *t = t.wrapping_add(*c));
				Some(totals)
			})
	}

	/// Parses the whole record.
	pub fn snapshot(&self) -> std::result::Result<Snapshot, RecordError> {
		let timestamp = self.timestamp()?;
		let cpus = self.cpus()?;
		let totals = self.totals(cpus)
			.ok_or(RecordError::NoInterrupts)?;

		Ok(Snapshot { timestamp, totals })
	}

}

/// A line of `/proc/interrupts` with one counter per cpu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IrqLine<'a> {
	name: &'a str,
	counters: Vec<u64>
}

impl<'a> IrqLine<'a> {

	fn parse(line: &'a str, cpus: usize) -> Option<Self> {
		parse_counters(line, cpus)
			.map(|(name, counters)| Self { name, counters })
	}

	/// The irq number or name, for example `0` or `LOC`.
	pub fn name(&self) -> &'a str {
		self.name
	}

	/// One counter per cpu.
	pub fn counters(&self) -> &[u64] {
		&self.counters
	}

}

/// Cumulative interrupt count per cpu at a given time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
	timestamp: NaiveDateTime,
	totals: Vec<u64>
}

impl Snapshot {

	pub fn new(timestamp: NaiveDateTime, totals: Vec<u64>) -> Self {
		Self { timestamp, totals }
	}

	pub fn timestamp(&self) -> NaiveDateTime {
		self.timestamp
	}

	/// The totals ordered by cpu index.
	pub fn totals(&self) -> &[u64] {
		&self.totals
	}

	pub fn cpus(&self) -> usize {
		self.totals.len()
	}

}
