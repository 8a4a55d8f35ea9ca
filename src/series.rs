//! Reshape delta rows into one series per cpu.

use crate::delta::DeltaRow;
use crate::error::{Error, Result};

use serde::{Serialize, Deserialize};

/// The deltas of one cpu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Series {
	/// `cpu0`, `cpu1`, ...
	pub label: String,
	pub data: Vec<i64>
}

/// The final document, a shared time axis with a series per cpu.
///
/// Serializes to `{"labels": [..], "datasets": [{"label": "cpu0", "data": [..]}, ..]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
	pub labels: Vec<f64>,
	pub datasets: Vec<Series>
}

impl Timeline {

	/// A timeline without any cpu.
	pub fn empty() -> Self {
		Self {
			labels: vec![],
			datasets: vec![]
		}
	}

	pub fn rows(&self) -> usize {
		self.labels.len()
	}

	pub fn cpus(&self) -> usize {
		self.datasets.len()
	}

	/// Compact json without a trailing newline.
	pub fn to_json(&self) -> Result<String> {
		serde_json::to_string(self)
			.map_err(Into::into)
	}

}

fn cpu_label(cpu: usize) -> String {
	format!("cpu{}", cpu)
}

/// Collects rows column by column.
#[derive(Debug, Clone)]
pub struct Reshaper {
	labels: Vec<f64>,
	columns: Vec<Vec<i64>>
}

impl Reshaper {

	pub fn new(cpus: usize) -> Self {
		Self {
			labels: vec![],
			columns: vec![vec![]; cpus]
		}
	}

	pub fn cpus(&self) -> usize {
		self.columns.len()
	}

	/// Appends a row.
	///
	/// ## Errors
	/// If the row does not contain exactly one delta per cpu.
	pub fn push(&mut self, row: DeltaRow) -> Result<()> {
		if row.cpus() != self.cpus() {
			return Err(Error::WidthMismatch {
				expected: self.cpus(),
				found: row.cpus()
			})
		}

		self.labels.push(row.elapsed);
		self.columns.iter_mut()
			.zip(row.deltas)
			.for_each(|(col, delta)| col.push(delta));

		Ok(())
	}

	pub fn finish(self) -> Timeline {
		Timeline {
			labels: self.labels,
			datasets: self.columns.into_iter()
				.enumerate()
				.map(|(cpu, data)| Series {
					label: cpu_label(cpu),
					data
				})
				.collect()
		}
	}

}
