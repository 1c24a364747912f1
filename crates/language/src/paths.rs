//! Runtime directories and grammar search paths.
//!
//! Grammar libraries are looked up, in order, in:
//!
//! 1. `search_paths` from `grammars.toml` (prepended by [`GrammarLoader`](crate::GrammarLoader))
//! 2. `<runtime>/grammars`, where `<runtime>` is `$GIBLANG_RUNTIME` or the
//!    platform data directory joined with `giblang`
//! 3. `<cache>/grammars`, under the platform cache directory

use std::env::consts::{DLL_PREFIX, DLL_SUFFIX};
use std::path::PathBuf;

/// Environment variable overriding the runtime directory.
pub const RUNTIME_ENV: &str = "GIBLANG_RUNTIME";

const APP_DIR: &str = "giblang";
const GRAMMARS_DIR: &str = "grammars";

/// Returns the runtime directory holding `grammars.toml` and compiled grammars.
///
/// Falls back to the working directory when the platform has no data directory.
pub fn runtime_dir() -> PathBuf {
	std::env::var_os(RUNTIME_ENV)
		.map(PathBuf::from)
		.or_else(|| dirs::data_local_dir().map(|d| d.join(APP_DIR)))
		.unwrap_or_else(|| PathBuf::from("."))
}

/// Returns the cache directory, if the platform has one.
pub fn cache_dir() -> Option<PathBuf> {
	dirs::cache_dir().map(|d| d.join(APP_DIR))
}

/// Returns the default directories searched for compiled grammar libraries.
pub fn grammar_search_paths() -> Vec<PathBuf> {
	std::iter::once(runtime_dir())
		.chain(cache_dir())
		.map(|d| d.join(GRAMMARS_DIR))
		.collect()
}

/// Returns the platform file name of the shared library for grammar `name`.
///
/// Dashes become underscores, matching the entry symbol.
pub fn grammar_library_name(name: &str) -> String {
	format!("{DLL_PREFIX}{}{DLL_SUFFIX}", name.replace('-', "_"))
}
