//! Loaded language handles.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use libloading::Library;
use tree_sitter::{Language, Parser};

use crate::parse::ParseError;

/// Where a handle's parse tables came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrammarOrigin {
	/// Linked into this binary.
	Bundled,
	/// Loaded from the shared library at this path.
	Library(PathBuf),
}

/// A loaded grammar, ready to hand to a parser.
///
/// Handles are cheap to clone and can be shared across threads. A handle
/// backed by a shared library keeps that library mapped until the last clone
/// is dropped.
#[derive(Clone)]
pub struct LanguageHandle {
	language: Language,
	name: Arc<str>,
	origin: GrammarOrigin,
	/// Declared after `language` so the tables are released before the code is unmapped.
	_library: Option<Arc<Library>>,
}

impl LanguageHandle {
	pub(crate) fn new(name: &str, language: Language, origin: GrammarOrigin, library: Option<Arc<Library>>) -> Self {
		Self {
			language,
			name: Arc::from(name),
			origin,
			_library: library,
		}
	}

	/// Grammar name (e.g., "giblang").
	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn origin(&self) -> &GrammarOrigin {
		&self.origin
	}

	/// The underlying tree-sitter language.
	pub fn language(&self) -> &Language {
		&self.language
	}

	/// ABI version the parse tables were generated for.
	pub fn abi_version(&self) -> usize {
		self.language.abi_version()
	}

	/// Number of distinct node kinds, including anonymous tokens.
	pub fn node_kind_count(&self) -> usize {
		self.language.node_kind_count()
	}

	/// Returns the numeric id for a node kind, if the grammar defines it.
	pub fn kind_id(&self, kind: &str, named: bool) -> Option<u16> {
		match self.language.id_for_node_kind(kind, named) {
			0 => None,
			id => Some(id),
		}
	}

	/// Creates a parser bound to this language.
	///
	/// # Errors
	///
	/// Returns [`ParseError::Language`] if the runtime refuses the grammar.
	pub fn parser(&self) -> Result<Parser, ParseError> {
		let mut parser = Parser::new();
		parser
			.set_language(&self.language)
			.map_err(|source| ParseError::Language {
				name: self.name.to_string(),
				source,
			})?;
		Ok(parser)
	}
}

impl fmt::Debug for LanguageHandle {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("LanguageHandle")
			.field("name", &self.name)
			.field("origin", &self.origin)
			.field("abi_version", &self.abi_version())
			.finish_non_exhaustive()
	}
}
