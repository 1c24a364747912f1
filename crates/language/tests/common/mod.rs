//! Shared library fixture built from the Giblang parse tables.
//!
//! The tables are compiled with the entry point renamed to
//! `tree_sitter_giblang_fixture`, so the library resolves as grammar
//! `giblang-fixture` and never collides with the bundled grammar.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::OnceLock;

use giblang_language::grammar_library_name;

/// Grammar name the fixture library answers to.
pub const FIXTURE_GRAMMAR: &str = "giblang-fixture";

pub struct Fixture {
	dir: tempfile::TempDir,
	library: PathBuf,
}

impl Fixture {
	/// Directory holding the compiled library.
	pub fn dir(&self) -> &Path {
		self.dir.path()
	}

	/// Absolute path of the compiled library.
	pub fn library(&self) -> &Path {
		&self.library
	}

	/// File name of the compiled library.
	pub fn file_name(&self) -> String {
		grammar_library_name(FIXTURE_GRAMMAR)
	}
}

fn find_compiler<'a>(candidates: &[&'a str]) -> Option<&'a str> {
	candidates
		.iter()
		.copied()
		.find(|name| Command::new(name).arg("--version").stdout(Stdio::null()).stderr(Stdio::null()).status().is_ok())
}

/// Compiles the grammar into a shared library once per test binary.
pub fn fixture() -> &'static Fixture {
	static FIXTURE: OnceLock<Fixture> = OnceLock::new();
	FIXTURE.get_or_init(|| {
		let src = Path::new(env!("CARGO_MANIFEST_DIR")).join("../grammar/src");
		let dir = tempfile::Builder::new()
			.prefix("giblang-fixture")
			.tempdir_in(env!("CARGO_TARGET_TMPDIR"))
			.expect("create fixture dir");
		let library = dir.path().join(grammar_library_name(FIXTURE_GRAMMAR));

		let cc = std::env::var("CC")
			.ok()
			.or_else(|| find_compiler(&["cc", "clang", "gcc"]).map(str::to_string))
			.expect("no C compiler found for the grammar fixture");

		let status = Command::new(&cc)
			.args(["-shared", "-fPIC", "-O0", "-w"])
			.arg("-I")
			.arg(&src)
			.arg("-Dtree_sitter_giblang=tree_sitter_giblang_fixture")
			.arg("-o")
			.arg(&library)
			.arg(src.join("parser.c"))
			.status()
			.unwrap_or_else(|e| panic!("failed to run {cc}: {e}"));
		assert!(status.success(), "{cc} failed to build the grammar fixture: {status}");

		Fixture { dir, library }
	})
}

/// Copies the fixture library into `dir` and returns the copy's path.
pub fn copy_fixture_to(dir: &Path) -> PathBuf {
	let fixture = fixture();
	let path = dir.join(fixture.file_name());
	std::fs::copy(fixture.library(), &path).expect("copy fixture library");
	path
}
