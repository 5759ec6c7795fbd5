use std::io::{self, Read, Seek, SeekFrom};

use byteorder::{LittleEndian, ReadBytesExt};

use crate::{error::ReadError, ENTRY_SIZE, HEADER};

/// Represents an archive.
#[derive(Debug)]
pub struct Archive<'a, R> {
	inner: &'a mut R,

	entries: Vec<Entry>,
}

/// Represents an entry in the index of an archive.
///
/// Entries keep their on-disk field widths; offsets and sizes are only bounds-checked
/// against the stream once the payload is actually fetched.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub struct Entry {
	/// The content hash of the entry, the key used for name resolution.
	pub hash: u32,

	/// The absolute offset, in bytes, of the payload of the entry.
	pub off: i32,

	/// The length, in bytes, of the stored payload region, or `0` if the payload is stored verbatim.
	pub packed_len: i32,

	/// The length, in bytes, of the entry once extracted.
	/// Exact for verbatim payloads, declared but unverified for compressed ones.
	pub len: i32,

	/// The encryption code of the entry, where `1` denotes a zlib-compressed payload.
	pub code: i32,
}

/// Represents a reader of archives.
#[derive(Debug)]
pub struct Reader<'a, R>
where
	R: Read + Seek,
{
	src: &'a mut R,
}

impl<'a, R> Reader<'a, R>
where
	R: Read + Seek,
{
	/// Creates a new reader with the specified source, positioned at the start of the archive.
	pub fn new(src: &'a mut R) -> Self {
		Self {
			src,
		}
	}

	/// Attempts to fully read the header and index of the archive, consuming `self` in the process.
	pub fn read(self) -> Result<Archive<'a, R>, ReadError> {
		// Read the header of the archive.

		let header = {
			let mut buffer = [0; HEADER.len()];

			self.src.read_exact(&mut buffer).map_err(invalid_header)?;

			buffer
		};

		// Check if the header is of the expected format.

		if header != HEADER {
			return Err(ReadError::InvalidHeader);
		}

		// Read the (expected) number of entries in the archive.
		// A negative count cannot describe an index and is treated the same as a bad tag.

		let count = self.src.read_i32::<LittleEndian>().map_err(invalid_header)?;
		let count = usize::try_from(count).map_err(|_| ReadError::InvalidHeader)?;

		// The remaining stream must hold `count` full records.

		let remaining = {
			let pos = self.src.stream_position()?;
			let end = self.src.seek(SeekFrom::End(0))?;

			self.src.seek(SeekFrom::Start(pos))?;

			end.saturating_sub(pos)
		};

		if remaining < count as u64 * ENTRY_SIZE {
			return Err(ReadError::TruncatedIndex);
		}

		let mut entries: Vec<Entry> = Vec::with_capacity(count);

		for _ in 0..count {
			// Read the properties of the entry, preserving on-disk order.

			let hash = self.src.read_u32::<LittleEndian>().map_err(truncated)?;
			let off = self.src.read_i32::<LittleEndian>().map_err(truncated)?;
			let packed_len = self.src.read_i32::<LittleEndian>().map_err(truncated)?;
			let len = self.src.read_i32::<LittleEndian>().map_err(truncated)?;
			let code = self.src.read_i32::<LittleEndian>().map_err(truncated)?;

			entries.push(Entry {
				hash,
				off,
				packed_len,
				len,
				code,
			})
		}

		Ok(Archive {
			inner: self.src,
			entries,
		})
	}
}

impl<'a, R> Archive<'a, R> {
	/// Returns the number of entries in the archive.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Returns if the archive is void of any entries.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Returns the entry at the specified index, if it exists.
	pub fn get(&self, index: usize) -> Option<&Entry> {
		self.entries.get(index)
	}

	/// Returns an iterator over each of the entries in the archive, in on-disk order.
	pub fn iter(&self) -> impl Iterator<Item = &Entry> {
		self.entries.iter()
	}

	/// Returns the underlying source alongside the entries, for driving extraction.
	pub fn split(&mut self) -> (&mut R, &[Entry]) {
		(&mut *self.inner, &self.entries)
	}
}

fn invalid_header(err: io::Error) -> ReadError {
	match err.kind() {
		io::ErrorKind::UnexpectedEof => ReadError::InvalidHeader,
		_ => ReadError::IoError(err),
	}
}

fn truncated(err: io::Error) -> ReadError {
	match err.kind() {
		io::ErrorKind::UnexpectedEof => ReadError::TruncatedIndex,
		_ => ReadError::IoError(err),
	}
}
