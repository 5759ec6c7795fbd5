/// Represents a lookup list mapping content hashes to relative file names.
///
/// Built once from a plain-text resource of `HEXHASH|relative/path` lines and read-only
/// thereafter. Line order defines first-match-wins semantics for duplicate keys.
#[derive(Debug, Default)]
pub struct FileList {
	entries: Vec<(String, String)>,
}

impl FileList {
	/// Creates an empty list, under which every hash resolves to its fallback name.
	pub fn new() -> Self {
		Self::default()
	}

	/// Parses a list from the specified text, one `HEXHASH|relative/path` pair per line.
	///
	/// The first `|` splits the key from the name; the name is kept verbatim.
	/// Lines without a separator can never match a hash and are dropped.
	pub fn parse(text: &str) -> Self {
		let entries = text
			.lines()
			.filter_map(|line| line.split_once('|'))
			.map(|(hash, name)| (hash.to_owned(), name.to_owned()))
			.collect();

		Self {
			entries,
		}
	}

	/// Returns the number of usable lines in the list.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Returns if the list holds no usable lines.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Resolves the specified hash to a relative file name.
	///
	/// The hash is matched as unpadded uppercase hexadecimal, exactly and case-sensitively,
	/// against the key of each line in order. A hash absent from the list resolves to its
	/// decimal representation with a `dat` extension, so every entry has a writable name.
	pub fn resolve(&self, hash: u32) -> String {
		let key = format!("{:X}", hash);

		self.entries
			.iter()
			.find(|(candidate, _)| *candidate == key)
			.map(|(_, name)| name.clone())
			.unwrap_or_else(|| format!("{}.dat", hash))
	}
}

/// Hashes the specified name with the 32-bit FNV-1a function the archive format keys its entries by.
///
/// Useful for generating lookup list lines for names recovered by other means.
pub fn fnv_hash(name: &str) -> u32 {
	let mut hash: u32 = 0x811c9dc5;

	for byte in name.bytes() {
		hash ^= u32::from(byte);
		hash = hash.wrapping_mul(0x01000193);
	}

	hash
}
