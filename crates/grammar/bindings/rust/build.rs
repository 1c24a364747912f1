//! Compiles the generated parse tables into a static library linked into the crate.

use std::path::Path;

fn main() {
	let src_dir = Path::new("src");
	let parser_path = src_dir.join("parser.c");

	let mut build = cc::Build::new();
	build.std("c11").include(src_dir).warnings(false).file(&parser_path);

	#[cfg(target_env = "msvc")]
	build.flag("-utf-8");

	println!("cargo:rerun-if-changed={}", parser_path.display());
	println!("cargo:rerun-if-changed={}", src_dir.join("tree_sitter").join("parser.h").display());

	build.compile("tree-sitter-giblang");
}
