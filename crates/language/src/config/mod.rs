//! Grammar loader configuration.
//!
//! Read from `grammars.toml` in the runtime directory:
//!
//! ```toml
//! search_paths = ["/opt/giblang/grammars"]
//!
//! [[grammar]]
//! name = "giblang-dev"
//! path = "/work/tree-sitter-giblang/libgiblang.so"
//! symbol = "tree_sitter_giblang"
//! ```
//!
//! Relative paths are resolved against the directory containing the file.

use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::grammar::GrammarArtifact;
use crate::paths::runtime_dir;

/// Name of the configuration file inside the runtime directory.
pub const CONFIG_FILE: &str = "grammars.toml";

/// Errors that can occur when reading loader configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("failed to read {}: {source}", .path.display())]
	Read {
		path: PathBuf,
		#[source]
		source: io::Error,
	},
	#[error("failed to parse grammars.toml: {0}")]
	Parse(#[from] toml::de::Error),
	#[error("grammar `{0}` is configured more than once")]
	DuplicateGrammar(String),
}

/// Loader configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoaderConfig {
	/// Directories searched for `lib<name>` grammar libraries, before the defaults.
	#[serde(default)]
	pub search_paths: Vec<PathBuf>,
	/// Explicit grammar libraries, keyed by grammar name.
	#[serde(default, rename = "grammar")]
	pub grammars: Vec<GrammarEntry>,
}

/// An explicitly configured grammar library.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GrammarEntry {
	pub name: String,
	pub path: PathBuf,
	/// Entry symbol; defaults to `tree_sitter_<name>`.
	pub symbol: Option<String>,
}

impl GrammarEntry {
	/// Returns the artifact this entry describes.
	pub fn artifact(&self) -> GrammarArtifact {
		let artifact = GrammarArtifact::library(&self.name, &self.path);
		match &self.symbol {
			Some(symbol) => artifact.with_symbol(symbol),
			None => artifact,
		}
	}
}

impl LoaderConfig {
	/// Parses configuration from TOML text. Paths are kept as written.
	pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
		let config: Self = toml::from_str(text)?;

		let mut seen = HashSet::new();
		if let Some(dup) = config.grammars.iter().find(|g| !seen.insert(g.name.as_str())) {
			return Err(ConfigError::DuplicateGrammar(dup.name.clone()));
		}

		Ok(config)
	}

	/// Reads configuration from `path`, resolving relative paths against its directory.
	///
	/// A missing file yields the default configuration.
	pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
		let text = match std::fs::read_to_string(path) {
			Ok(text) => text,
			Err(e) if e.kind() == io::ErrorKind::NotFound => {
				tracing::debug!(path = %path.display(), "No grammar config, using defaults");
				return Ok(Self::default());
			}
			Err(source) => {
				return Err(ConfigError::Read {
					path: path.to_path_buf(),
					source,
				});
			}
		};

		let config = Self::from_toml(&text)?;
		let path = std::path::absolute(path).map_err(|source| ConfigError::Read {
			path: path.to_path_buf(),
			source,
		})?;
		Ok(match path.parent() {
			Some(base) => config.resolve_relative(base),
			None => config,
		})
	}

	/// Reads `grammars.toml` from the runtime directory.
	pub fn load_default() -> Result<Self, ConfigError> {
		Self::load_file(&runtime_dir().join(CONFIG_FILE))
	}

	/// Returns the configured entry for `name`.
	pub fn grammar(&self, name: &str) -> Option<&GrammarEntry> {
		self.grammars.iter().find(|g| g.name == name)
	}

	fn resolve_relative(mut self, base: &Path) -> Self {
		for dir in &mut self.search_paths {
			if dir.is_relative() {
				*dir = base.join(&*dir);
			}
		}
		for grammar in &mut self.grammars {
			if grammar.path.is_relative() {
				grammar.path = base.join(&grammar.path);
			}
		}
		self
	}
}

#[cfg(test)]
mod tests;
