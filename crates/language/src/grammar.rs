//! Grammar artifacts and loading.
//!
//! A grammar artifact is a compiled tree-sitter parser: either the Giblang
//! tables bundled into this binary or a shared library built elsewhere.
//! [`load`] turns an artifact into a [`LanguageHandle`] after checking that
//! the tables are present and speak an ABI version this runtime understands.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use libloading::{Library, Symbol};
use thiserror::Error;
use tracing::{debug, warn};
use tree_sitter::{LANGUAGE_VERSION, Language, MIN_COMPATIBLE_LANGUAGE_VERSION};
use tree_sitter_language::LanguageFn;

use crate::language::{GrammarOrigin, LanguageHandle};

/// Errors that can occur when loading a grammar.
#[derive(Error, Debug)]
pub enum GrammarLoadError {
	/// No artifact exists for the requested grammar or path.
	#[error("grammar not found: {0}")]
	NotFound(String),

	/// The dynamic loader rejected the library file.
	#[error("failed to load grammar library {}: {source}", .path.display())]
	Library {
		path: PathBuf,
		#[source]
		source: libloading::Error,
	},

	/// Grammar library exists but doesn't export the expected symbol.
	#[error("grammar library {} missing language function `{symbol}`", .path.display())]
	MissingSymbol { path: PathBuf, symbol: String },

	/// The entry point ran but returned no parse tables.
	#[error("grammar `{0}` returned a null language")]
	NullLanguage(String),

	/// The parse tables were generated for an ABI this runtime cannot read.
	#[error("grammar `{name}` has ABI version {version}, runtime supports {min} through {max}")]
	IncompatibleVersion {
		name: String,
		version: usize,
		min: usize,
		max: usize,
	},

	/// The parse tables define no node kinds.
	#[error("grammar `{0}` defines no node kinds")]
	Malformed(String),

	/// Filesystem I/O error.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
}

/// A compiled grammar that can be loaded into a [`LanguageHandle`].
#[derive(Clone)]
pub enum GrammarArtifact {
	/// Parse tables linked into this binary.
	Bundled { name: &'static str, entry: LanguageFn },
	/// A shared library exporting `symbol`.
	Library { name: String, path: PathBuf, symbol: String },
}

impl GrammarArtifact {
	/// The Giblang grammar compiled into this crate.
	pub fn bundled() -> Self {
		Self::Bundled {
			name: tree_sitter_giblang::GRAMMAR_NAME,
			entry: tree_sitter_giblang::LANGUAGE,
		}
	}

	/// A shared library at `path` exporting the default entry symbol for `name`.
	pub fn library(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
		let name = name.into();
		Self::Library {
			symbol: entry_symbol(&name),
			name,
			path: path.into(),
		}
	}

	/// Overrides the entry symbol of a library artifact. Bundled artifacts are returned unchanged.
	pub fn with_symbol(self, symbol: impl Into<String>) -> Self {
		match self {
			Self::Library { name, path, .. } => Self::Library {
				name,
				path,
				symbol: symbol.into(),
			},
			bundled => bundled,
		}
	}

	pub fn name(&self) -> &str {
		match self {
			Self::Bundled { name, .. } => name,
			Self::Library { name, .. } => name.as_str(),
		}
	}

	/// Loads this artifact. See [`load`].
	pub fn load(&self) -> Result<LanguageHandle, GrammarLoadError> {
		load(self)
	}
}

impl fmt::Debug for GrammarArtifact {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Bundled { name, .. } => f.debug_struct("Bundled").field("name", name).finish_non_exhaustive(),
			Self::Library { name, path, symbol } => f
				.debug_struct("Library")
				.field("name", name)
				.field("path", path)
				.field("symbol", symbol)
				.finish(),
		}
	}
}

/// Returns the entry symbol a grammar library exports: `tree_sitter_<name>`.
pub fn entry_symbol(name: &str) -> String {
	format!("tree_sitter_{}", name.replace('-', "_"))
}

/// Loads a grammar artifact into a language handle.
///
/// Every load produces an independent handle; loading the same artifact from
/// several threads at once needs no coordination.
///
/// # Errors
///
/// * [`GrammarLoadError::NotFound`] if a library path does not exist.
/// * [`GrammarLoadError::Library`] if the file is not a loadable library.
/// * [`GrammarLoadError::MissingSymbol`] if the library lacks the entry symbol.
/// * [`GrammarLoadError::NullLanguage`] if the entry point returns null.
/// * [`GrammarLoadError::IncompatibleVersion`] if the ABI version is unsupported.
/// * [`GrammarLoadError::Malformed`] if the tables define no node kinds.
pub fn load(artifact: &GrammarArtifact) -> Result<LanguageHandle, GrammarLoadError> {
	let handle = match artifact {
		GrammarArtifact::Bundled { name, entry } => {
			// SAFETY: bundled entry points are generated tree-sitter constructors
			// that take no arguments and return a pointer to static tables.
			let raw = unsafe { (entry.into_raw())() };
			let language = validate(name, raw)?;
			LanguageHandle::new(name, language, GrammarOrigin::Bundled, None)
		}
		GrammarArtifact::Library { name, path, symbol } => load_library(name, path, symbol)?,
	};

	debug!(
		grammar = handle.name(),
		abi = handle.abi_version(),
		node_kinds = handle.node_kind_count(),
		"Loaded grammar"
	);
	Ok(handle)
}

fn load_library(name: &str, path: &Path, symbol: &str) -> Result<LanguageHandle, GrammarLoadError> {
	// The dynamic loader resolves bare file names against the system library
	// path, not the working directory.
	let path = &std::path::absolute(path)?;
	if !path.try_exists()? {
		return Err(GrammarLoadError::NotFound(path.display().to_string()));
	}

	// SAFETY: grammar libraries are plain C tables with no load-time initializers.
	let library = unsafe { Library::new(path) }.map_err(|source| GrammarLoadError::Library {
		path: path.to_path_buf(),
		source,
	})?;

	let raw = {
		// SAFETY: tree-sitter entry points have the signature `const TSLanguage *(void)`.
		let entry: Symbol<'_, unsafe extern "C" fn() -> *const ()> =
			unsafe { library.get(symbol.as_bytes()) }.map_err(|_| GrammarLoadError::MissingSymbol {
				path: path.to_path_buf(),
				symbol: symbol.to_string(),
			})?;
		// SAFETY: see above; the library stays mapped for the duration of the call.
		unsafe { entry() }
	};

	let language = validate(name, raw).inspect_err(|e| {
		warn!(grammar = name, path = %path.display(), error = %e, "Rejected grammar library");
	})?;

	Ok(LanguageHandle::new(
		name,
		language,
		GrammarOrigin::Library(path.to_path_buf()),
		Some(Arc::new(library)),
	))
}

/// Wraps raw parse tables, rejecting null, version-incompatible and empty tables.
fn validate(name: &str, raw: *const ()) -> Result<Language, GrammarLoadError> {
	if raw.is_null() {
		return Err(GrammarLoadError::NullLanguage(name.to_string()));
	}

	// SAFETY: non-null, and entry points return a pointer to a `TSLanguage`.
	let language = unsafe { Language::from_raw(raw.cast()) };

	let version = language.abi_version();
	if !(MIN_COMPATIBLE_LANGUAGE_VERSION..=LANGUAGE_VERSION).contains(&version) {
		// Rejected tables never reach the runtime's destructor.
		let _ = language.into_raw();
		return Err(GrammarLoadError::IncompatibleVersion {
			name: name.to_string(),
			version,
			min: MIN_COMPATIBLE_LANGUAGE_VERSION,
			max: LANGUAGE_VERSION,
		});
	}

	if language.node_kind_count() == 0 {
		let _ = language.into_raw();
		return Err(GrammarLoadError::Malformed(name.to_string()));
	}

	Ok(language)
}
