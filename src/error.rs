use core::fmt;
use std::{error::Error, fmt::Display, io};

/// Represents an error that occurred whilst reading the header or index of an archive.
///
/// Nothing beyond the point of failure can be trusted, so these errors always abort a run.
#[derive(Debug)]
pub enum ReadError {
	/// Indicates that a generic I/O error occurred.
	IoError(io::Error),

	/// Indicates that the header was not in the expected format.
	InvalidHeader,

	/// Indicates that the stream ended before the declared number of index records.
	TruncatedIndex,
}

/// Represents an error that occurred whilst extracting a single entry.
#[derive(Debug)]
pub enum ExtractError {
	/// Indicates that a generic I/O error occurred.
	IoError(io::Error),

	/// Indicates that the compressed stream of an entry could not be inflated.
	DecodeError(io::Error),

	/// Indicates that the inflated payload did not match the declared length of its entry.
	LengthMismatch {
		expected: i32,
		actual: usize,
	},
}

impl Error for ReadError {}

impl Display for ReadError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::IoError(err) => write!(f, "input/output error [{}]", err),
			Self::InvalidHeader => write!(f, "invalid header"),
			Self::TruncatedIndex => write!(f, "truncated index"),
		}
	}
}

impl From<io::Error> for ReadError {
	fn from(value: io::Error) -> Self {
		Self::IoError(value)
	}
}

impl Error for ExtractError {}

impl Display for ExtractError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::IoError(err) => write!(f, "input/output error [{}]", err),
			Self::DecodeError(err) => write!(f, "decode error [{}]", err),
			Self::LengthMismatch {
				expected,
				actual,
			} => write!(f, "length mismatch [expected {}, actual {}]", expected, actual),
		}
	}
}

impl From<io::Error> for ExtractError {
	fn from(value: io::Error) -> Self {
		Self::IoError(value)
	}
}
