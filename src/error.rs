use std::io;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

/// Why a single snapshot record could not be turned into a [`Snapshot`].
///
/// [`Snapshot`]: crate::snapshot::Snapshot
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
	/// The first line is not `YYYYMMDD-HHMMSS`.
	#[error("malformed timestamp {line:?}: {reason}")]
	MalformedTimestamp {
		line: String,
		reason: String
	},
	/// There is no second line or it does not contain a single `CPU` column.
	#[error("missing cpu header line")]
	MissingCpuHeader,
	/// The header lists another amount of cpus than the first record did.
	#[error("expected {expected} cpus but the header lists {found}")]
	CpuCountMismatch {
		expected: usize,
		found: usize
	},
	/// Not a single irq line matched.
	#[error("no interrupt lines could be parsed")]
	NoInterrupts
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// Reading the input or writing the output failed.
	#[error("failed to access {}", path.display())]
	Io {
		path: PathBuf,
		#[source]
		source: io::Error
	},
	/// A record could not be parsed. Contains the raw text of the record.
	#[error("problem extracting entry {index}, entry is:\n{raw}")]
	Record {
		index: usize,
		raw: String,
		#[source]
		source: RecordError
	},
	/// A row or snapshot does not have one value per cpu.
	#[error("expected {expected} values per row but got {found}")]
	WidthMismatch {
		expected: usize,
		found: usize
	},
	#[error("failed to serialize timeline: {0}")]
	Json(#[from] serde_json::Error)
}

impl Error {

	pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
		Self::Io { path: path.into(), source }
	}

}
