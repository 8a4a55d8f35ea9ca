//!
//! Turn recordings of `/proc/interrupts` into a time series per cpu.
//!
//! A recording contains snapshots of `/proc/interrupts`, every snapshot
//! introduced by `##TIMESTAMP## YYYYMMDD-HHMMSS`. For every snapshot the
//! counters of all irqs are summed per cpu, then the difference to the
//! previous snapshot is calculated. The result is a [`series::Timeline`]
//! which serializes to the json format used by most charting libraries.
//!
//! ## Async
//! Recordings are read into memory at once and converted in a single
//! pass, nothing here benefits from async code.

/// Parse recorded snapshots.
pub mod snapshot;
/// Differences between snapshots.
pub mod delta;
/// Reshape rows into one series per cpu.
pub mod series;
// Glue everything together and write json files.
pub mod convert;

mod error;
mod util;

pub use error::{Error, RecordError, Result};
