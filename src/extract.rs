use std::{
	fs::{self, File},
	io::{self, Read, Seek, SeekFrom, Write},
	path::Path,
};

use byteorder::{LittleEndian, ReadBytesExt};
use flate2::read::ZlibDecoder;

use crate::{
	error::ExtractError,
	names::FileList,
	read::{Archive, Entry},
	CODE_COMPRESSED,
};

/// Represents the length of the duplicate size field at the head of a compressed payload region.
///
/// The field counts towards `packed_len` but is never part of the compressed stream.
const SIZE_FIELD: i32 = 4;

/// Represents the outcome of fetching the payload of a single entry.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Payload {
	/// The decoded content of the entry.
	Data(Vec<u8>),

	/// The entry carries an encryption code the format does not cover and was not decoded.
	Unsupported {
		code: i32,
	},
}

/// Represents a fetcher of entry payloads.
#[derive(Debug, Default)]
pub struct Extractor {
	verify_len: bool,
}

impl Extractor {
	/// Creates a new extractor with the default policy of passing length mismatches through silently.
	pub fn new() -> Self {
		Self {
			verify_len: false,
		}
	}

	/// Sets whether an inflated payload must match the declared length of its entry.
	///
	/// Off by default; declared lengths in the wild are not reliable enough to reject on.
	pub fn verify_len(mut self, verify_len: bool) -> Self {
		self.verify_len = verify_len;
		self
	}

	/// Attempts to fetch and decode the payload of the specified entry from the specified source.
	pub fn fetch<R>(&self, src: &mut R, entry: &Entry) -> Result<Payload, ExtractError>
	where
		R: Read + Seek,
	{
		// Seek to the start of the payload region of the entry.

		let off = u64::try_from(entry.off).map_err(|_| invalid("offset is negative"))?;

		src.seek(SeekFrom::Start(off))?;

		// Verbatim entries hold their content as-is.

		if entry.packed_len == 0 {
			let len = usize::try_from(entry.len).map_err(|_| invalid("length is negative"))?;

			let mut data = vec![0; len];

			src.read_exact(&mut data)?;

			return Ok(Payload::Data(data));
		}

		// The region opens with a duplicate of the uncompressed size, which is not part of the compressed stream.

		let _ = src.read_i32::<LittleEndian>()?;

		let len = entry
			.packed_len
			.checked_sub(SIZE_FIELD)
			.and_then(|len| usize::try_from(len).ok())
			.ok_or_else(|| invalid("packed region is shorter than its size field"))?;

		let mut data = vec![0; len];

		src.read_exact(&mut data)?;

		if entry.code != CODE_COMPRESSED {
			return Ok(Payload::Unsupported {
				code: entry.code,
			});
		}

		// Inflate the compressed stream.

		let mut inflated = Vec::new();

		ZlibDecoder::new(data.as_slice())
			.read_to_end(&mut inflated)
			.map_err(ExtractError::DecodeError)?;

		if self.verify_len && inflated.len() != entry.len as usize {
			return Err(ExtractError::LengthMismatch {
				expected: entry.len,
				actual: inflated.len(),
			});
		}

		Ok(Payload::Data(inflated))
	}
}

/// Represents a diagnostic raised for a single entry during a pipeline run.
///
/// The ordinal is the zero-based position of the entry in on-disk index order.
#[derive(Debug)]
pub enum Notice {
	/// An entry was skipped because its encryption code is not understood.
	Unsupported {
		ordinal: usize,
		off: i32,
		code: i32,
	},

	/// An entry failed to decode or write, and was recorded without stopping the run.
	Failed {
		ordinal: usize,
		name: String,
		error: ExtractError,
	},
}

/// Represents the aggregate outcome of a pipeline run.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
pub struct Summary {
	/// The number of entries decoded and written.
	pub written: usize,

	/// The number of entries skipped over an unsupported encryption code.
	pub skipped: usize,

	/// The number of entries that failed to decode or write.
	pub failed: usize,
}

impl Summary {
	/// Returns if every entry of the run was written.
	pub fn is_complete(&self) -> bool {
		self.skipped == 0 && self.failed == 0
	}
}

/// Extracts every entry of the specified archive under the specified root, in index order.
///
/// Each resolved name is joined onto the root, with intermediate directories created as
/// needed. Entries that cannot be decoded or written are reported to `notify` and do not
/// stop the run; the returned summary carries the aggregate counts.
pub fn extract_all<R, F>(archive: &mut Archive<R>, names: &FileList, root: &Path, extractor: &Extractor, mut notify: F) -> Summary
where
	R: Read + Seek,
	F: FnMut(Notice),
{
	let mut summary = Summary::default();
	let (src, entries) = archive.split();

	for (ordinal, entry) in entries.iter().enumerate() {
		let name = names.resolve(entry.hash);

		match extractor.fetch(src, entry) {
			Ok(Payload::Data(data)) => match write_entry(root, &name, &data) {
				Ok(()) => summary.written += 1,
				Err(err) => {
					summary.failed += 1;

					notify(Notice::Failed {
						ordinal,
						name,
						error: ExtractError::IoError(err),
					});
				}
			},
			Ok(Payload::Unsupported {
				code,
			}) => {
				summary.skipped += 1;

				notify(Notice::Unsupported {
					ordinal,
					off: entry.off,
					code,
				});
			}
			Err(error) => {
				summary.failed += 1;

				notify(Notice::Failed {
					ordinal,
					name,
					error,
				});
			}
		}
	}

	summary
}

fn write_entry(root: &Path, name: &str, data: &[u8]) -> io::Result<()> {
	let path = root.join(name);

	if let Some(parent) = path.parent() {
		fs::create_dir_all(parent)?;
	}

	let mut file = File::create(&path)?;

	file.write_all(data)?;
	file.flush()?;

	Ok(())
}

fn invalid(what: &str) -> ExtractError {
	ExtractError::IoError(io::Error::new(io::ErrorKind::InvalidInput, what))
}
