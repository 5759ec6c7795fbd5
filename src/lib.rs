//! Library for extracting files from `GRA2` archives used for the game data and save containers of Legend of Grimrock.

use std::io::{Read, Seek};

use error::ReadError;
use read::Reader;

/// Contains types for errors.
pub mod error;

/// Contains types and the accompanying logic for extracting the payloads of an archive.
pub mod extract;

/// Contains types and the accompanying logic for resolving content hashes to file names.
pub mod names;

/// Contains types and the accompanying logic for reading the header and index of an archive.
pub mod read;

/// Represents the structure of the header tag.
pub const HEADER: [u8; 4] = [0x47, 0x52, 0x41, 0x32]; // GRA2

/// Represents the size of a single index record, in bytes.
pub const ENTRY_SIZE: u64 = 20;

/// Represents the encryption code that denotes a zlib-compressed payload.
pub const CODE_COMPRESSED: i32 = 1;

/// Attempts to read the header and index of the archive in the specified source.
///
/// If the read is successful, an `Archive<R>` is returned which may be inspected for the contents of the archive.
/// If the read is unsuccessful, a `ReadError` is returned.
pub fn read<R>(src: &mut R) -> Result<read::Archive<R>, ReadError>
where
	R: Read + Seek,
{
	Reader::new(src).read()
}
