//! Differences between consecutive snapshots.

use crate::error::{Error, Result};
use crate::snapshot::Snapshot;

use chrono::NaiveDateTime;

/// Interrupts per cpu that happened between two snapshots.
#[derive(Debug, Clone, PartialEq)]
pub struct DeltaRow {
	/// Seconds since the anchor timestamp.
	pub elapsed: f64,
	/// Ordered by cpu index, negative if a counter went backwards.
	pub deltas: Vec<i64>
}

impl DeltaRow {

	pub fn cpus(&self) -> usize {
		self.deltas.len()
	}

}

/// Turns a sequence of snapshots into rows of deltas.
///
/// The first snapshot only sets the baseline and does not produce a row.
/// The time of the second snapshot is the anchor, so the first row
/// always has an elapsed time of zero.
///
/// Totals are treated as wrapping counters, the difference of two totals
/// is computed modulo 2^64 and then interpreted as signed.
#[derive(Debug, Clone, Default)]
pub struct DeltaComputer {
	previous: Option<Vec<u64>>,
	anchor: Option<NaiveDateTime>
}

impl DeltaComputer {

	pub fn new() -> Self {
		Self::default()
	}

	/// Returns `true` if a baseline was recorded.
	pub fn has_baseline(&self) -> bool {
		self.previous.is_some()
	}

	/// The time of the first row, if there was one.
	pub fn anchor(&self) -> Option<NaiveDateTime> {
		self.anchor
	}

	/// Feeds the next snapshot, snapshots need to be in file order.
	///
	/// ## Errors
	/// If the snapshot has a different amount of cpus than the previous one.
	pub fn process(&mut self, snapshot: &Snapshot) -> Result<Option<DeltaRow>> {
		let current = snapshot.totals();

		let previous = match &mut self.previous {
			Some(prev) => prev,
			None => {
				self.previous = Some(current.to_vec());
				return Ok(None)
			}
		};

		if previous.len() != current.len() {
			return Err(Error::WidthMismatch {
				expected: previous.len(),
				found: current.len()
			})
		}

		let anchor = *self.anchor.get_or_insert(snapshot.timestamp());
		let elapsed = (snapshot.timestamp() - anchor).num_milliseconds() as f64 / 1000.0;

		let deltas: Vec<i64> = current.iter()
			.zip(previous.iter())
			.map(|(cur, prev)| cur.wrapping_sub(*prev) as i64)
			.collect();

		if let Some(cpu) = deltas.iter().position(|d| *d < 0) {
			log::warn!(
				"interrupt count of cpu{} went backwards at {}",
				cpu, snapshot.timestamp()
			);
		}

		previous.copy_from_slice(current);

		Ok(Some(DeltaRow { elapsed, deltas }))
	}

}

#[cfg(test)]
mod tests {
	use super::*;

	fn snapshot(ts: &str, totals: &[u64]) -> Snapshot {
		let ts = NaiveDateTime::parse_from_str(ts, crate::snapshot::TIMESTAMP_FORMAT)
			.unwrap();
		Snapshot::new(ts, totals.to_vec())
	}

	#[test]
	fn baseline_has_no_row() {
		let mut comp = DeltaComputer::new();
		assert!(!comp.has_baseline());
		let row = comp.process(&snapshot("20240101-000000", &[5, 10])).unwrap();
		assert!(row.is_none());
		assert!(comp.has_baseline());
		assert!(comp.anchor().is_none());
	}

	#[test]
	fn second_snapshot_is_time_zero() {
		let mut comp = DeltaComputer::new();
		comp.process(&snapshot("20240101-000000", &[5, 10])).unwrap();
		let row = comp.process(&snapshot("20240101-000010", &[8, 15]))
			.unwrap().unwrap();
		assert_eq!(row.elapsed, 0.0);
		assert_eq!(row.deltas, [3, 5]);

		let row = comp.process(&snapshot("20240101-000030", &[12, 20]))
			.unwrap().unwrap();
		assert_eq!(row.elapsed, 20.0);
		assert_eq!(row.deltas, [4, 5]);
		assert_eq!(row.cpus(), 2);
	}

	#[test]
	fn equal_totals() {
		let mut comp = DeltaComputer::new();
		comp.process(&snapshot("20240101-000000", &[7, 7, 7])).unwrap();
		let row = comp.process(&snapshot("20240101-000001", &[7, 7, 7]))
			.unwrap().unwrap();
		assert_eq!(row.deltas, [0, 0, 0]);
	}

	#[test]
	fn negative_deltas() {
		let mut comp = DeltaComputer::new();
		comp.process(&snapshot("20240101-000000", &[100, 10])).unwrap();
		let row = comp.process(&snapshot("20240101-000005", &[40, 12]))
			.unwrap().unwrap();
		assert_eq!(row.deltas, [-60, 2]);
	}

	#[test]
	fn wrapped_counter() {
		let mut comp = DeltaComputer::new();
		comp.process(&snapshot("20240101-000000", &[u64::MAX - 1])).unwrap();
		let row = comp.process(&snapshot("20240101-000005", &[3]))
			.unwrap().unwrap();
		assert_eq!(row.deltas, [5]);
	}

	#[test]
	fn width_mismatch() {
		let mut comp = DeltaComputer::new();
		comp.process(&snapshot("20240101-000000", &[1, 2])).unwrap();
		let err = comp.process(&snapshot("20240101-000005", &[1, 2, 3]))
			.unwrap_err();
		assert!(matches!(err, Error::WidthMismatch { expected: 2, found: 3 }));
	}

	#[test]
	fn time_going_backwards() {
		let mut comp = DeltaComputer::new();
		comp.process(&snapshot("20240101-000000", &[1])).unwrap();
		comp.process(&snapshot("20240101-000010", &[2])).unwrap();
		let row = comp.process(&snapshot("20240101-000004", &[3]))
			.unwrap().unwrap();
		assert_eq!(row.elapsed, -6.0);
	}

}
