//! Command-line application for inspecting and extracting `GRA2` archives.

use std::{
	fs::{self, File},
	io,
	path::{Path, PathBuf},
	process::ExitCode,
};

use clap::{command, Parser, Subcommand};
use gra2::{
	extract::{extract_all, Extractor, Notice},
	names::{fnv_hash, FileList},
};

/// Represents the lookup list consulted when no explicit list is given.
const DEFAULT_LIST: &str = "filelist.txt";

/// Performs operations on GRA2 archives
#[derive(Debug, Parser)]
struct Cli {
	/// Indicates the operation to perform
	#[command(subcommand)]
	operation: Operation,
}

/// Represents the operation to perform
#[derive(Debug, Subcommand)]
enum Operation {
	/// Inspect the contents of an archive
	Inspect {
		/// Specifies the archive to inspect
		archive: PathBuf,

		/// Specifies the lookup list used to resolve entry names [default: filelist.txt]
		#[arg(short, long)]
		list: Option<PathBuf>,
	},

	/// Extract the contents of an archive to an output directory
	Extract {
		/// Specifies the archive to extract
		archive: PathBuf,

		/// Specifies the output directory
		#[arg(short, long)]
		target: PathBuf,

		/// Specifies the lookup list used to resolve entry names [default: filelist.txt]
		#[arg(short, long)]
		list: Option<PathBuf>,

		/// Treats a decoded payload whose length differs from its declared length as a failure
		#[arg(long)]
		verify: bool,
	},

	/// Hash a file name into a ready lookup list line
	Hash {
		/// Specifies the name to hash
		name: String,
	},
}

fn main() -> ExitCode {
	let cli = Cli::parse();

	match cli.operation {
		Operation::Inspect {
			archive,
			list,
		} => inspect(&archive, list.as_deref()),
		Operation::Extract {
			archive,
			target,
			list,
			verify,
		} => extract(&archive, &target, list.as_deref(), verify),
		Operation::Hash {
			name,
		} => {
			println!("{:X}|{}", fnv_hash(&name), name);

			ExitCode::SUCCESS
		}
	}
}

fn inspect(archive: &Path, list: Option<&Path>) -> ExitCode {
	let names = match load_list(list) {
		Ok(names) => names,
		Err(err) => {
			eprintln!("Failed to read lookup list: {}", err);

			return ExitCode::FAILURE;
		}
	};

	let mut file = match File::open(archive) {
		Ok(file) => file,
		Err(err) => {
			eprintln!("Failed to open archive <{}>: {}", archive.display(), err);

			return ExitCode::FAILURE;
		}
	};

	let archive = match gra2::read(&mut file) {
		Ok(archive) => archive,
		Err(err) => {
			eprintln!("Failed to read archive: {}", err);

			return ExitCode::FAILURE;
		}
	};

	println!("Inspecting contents of archive...");

	for (ordinal, entry) in archive.iter().enumerate() {
		let name = names.resolve(entry.hash);

		println!(
			"[{:>4}] {:<48} hash: {:X}, offset: {}, packed: {}, length: {}, code: {}",
			ordinal, name, entry.hash, entry.off, entry.packed_len, entry.len, entry.code
		);
	}

	println!("Inspected {} entries.", archive.len());

	ExitCode::SUCCESS
}

fn extract(archive: &Path, target: &Path, list: Option<&Path>, verify: bool) -> ExitCode {
	if target.is_file() {
		eprintln!("Output directory <{}> already exists as a file.", target.display());

		return ExitCode::FAILURE;
	}

	let names = match load_list(list) {
		Ok(names) => names,
		Err(err) => {
			eprintln!("Failed to read lookup list: {}", err);

			return ExitCode::FAILURE;
		}
	};

	let mut file = match File::open(archive) {
		Ok(file) => file,
		Err(err) => {
			eprintln!("Failed to open archive <{}>: {}", archive.display(), err);

			return ExitCode::FAILURE;
		}
	};

	let mut archive = match gra2::read(&mut file) {
		Ok(archive) => archive,
		Err(err) => {
			eprintln!("Failed to read archive: {}", err);

			return ExitCode::FAILURE;
		}
	};

	println!("Extracting {} entries to <{}>...", archive.len(), target.display());

	let extractor = Extractor::new().verify_len(verify);

	let summary = extract_all(&mut archive, &names, target, &extractor, |notice| match notice {
		Notice::Unsupported {
			ordinal,
			off,
			code,
		} => {
			println!("Not saving entry {} from offset 0x{:X} (encryption code {})", ordinal, off, code);
		}
		Notice::Failed {
			ordinal,
			name,
			error,
		} => {
			println!("Failed to extract entry {} <{}>: {}", ordinal, name, error);
		}
	});

	println!("Extracted {} entries ({} skipped, {} failed).", summary.written, summary.skipped, summary.failed);

	if summary.failed == 0 {
		ExitCode::SUCCESS
	} else {
		ExitCode::FAILURE
	}
}

/// Loads the lookup list, tolerating only the absence of the implicit default.
fn load_list(list: Option<&Path>) -> io::Result<FileList> {
	match list {
		Some(path) => fs::read_to_string(path).map(|text| FileList::parse(&text)),
		None => match fs::read_to_string(DEFAULT_LIST) {
			Ok(text) => Ok(FileList::parse(&text)),
			Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(FileList::new()),
			Err(err) => Err(err),
		},
	}
}
