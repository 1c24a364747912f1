//! Name-based grammar resolution.

use std::path::PathBuf;

use tracing::debug;

use crate::config::{ConfigError, LoaderConfig};
use crate::grammar::{GrammarArtifact, GrammarLoadError, load};
use crate::language::LanguageHandle;
use crate::paths::{grammar_library_name, grammar_search_paths};

/// Resolves grammar names to artifacts and loads them.
///
/// Resolution order for a name:
/// 1. A `[[grammar]]` entry in the configuration.
/// 2. A grammar bundled into this binary.
/// 3. A `lib<name>` library in the configured, then default, search paths.
#[derive(Debug, Clone, Default)]
pub struct GrammarLoader {
	config: LoaderConfig,
}

impl GrammarLoader {
	pub fn new(config: LoaderConfig) -> Self {
		Self { config }
	}

	/// Creates a loader from `grammars.toml` in the runtime directory.
	pub fn from_runtime() -> Result<Self, ConfigError> {
		LoaderConfig::load_default().map(Self::new)
	}

	pub fn config(&self) -> &LoaderConfig {
		&self.config
	}

	/// Directories searched for grammar libraries, in order.
	pub fn search_paths(&self) -> Vec<PathBuf> {
		let mut dirs = self.config.search_paths.clone();
		dirs.extend(grammar_search_paths());
		dirs
	}

	/// Finds the artifact for `name` without loading it.
	pub fn resolve(&self, name: &str) -> Result<GrammarArtifact, GrammarLoadError> {
		if let Some(entry) = self.config.grammar(name) {
			debug!(grammar = name, path = %entry.path.display(), "Using configured grammar");
			return Ok(entry.artifact());
		}

		if let Some(artifact) = bundled(name) {
			debug!(grammar = name, "Using bundled grammar");
			return Ok(artifact);
		}

		let lib_name = grammar_library_name(name);
		for dir in self.search_paths() {
			let lib_path = dir.join(&lib_name);
			if lib_path.exists() {
				debug!(grammar = name, path = %lib_path.display(), "Found grammar library");
				return Ok(GrammarArtifact::library(name, lib_path));
			}
		}

		Err(GrammarLoadError::NotFound(name.to_string()))
	}

	/// Resolves and loads the grammar called `name`.
	pub fn load(&self, name: &str) -> Result<LanguageHandle, GrammarLoadError> {
		load(&self.resolve(name)?)
	}
}

/// Returns the bundled artifact for `name`, if this binary carries one.
pub fn bundled(name: &str) -> Option<GrammarArtifact> {
	(name == tree_sitter_giblang::GRAMMAR_NAME).then(GrammarArtifact::bundled)
}
