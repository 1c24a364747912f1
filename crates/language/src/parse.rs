//! One-shot parsing with a loaded grammar.

use thiserror::Error;
use tree_sitter::{LanguageError, Tree};

use crate::language::LanguageHandle;

/// Errors that can occur when parsing with a loaded grammar.
#[derive(Error, Debug)]
pub enum ParseError {
	/// The tree-sitter runtime refused to bind the grammar to a parser.
	#[error("parser rejected grammar `{name}`: {source}")]
	Language {
		name: String,
		#[source]
		source: LanguageError,
	},

	/// The parser stopped without producing a tree.
	#[error("parsing with grammar `{0}` produced no tree")]
	Aborted(String),
}

/// Parses `source` from scratch with `handle`'s grammar.
pub fn parse_source(handle: &LanguageHandle, source: &str) -> Result<Tree, ParseError> {
	let mut parser = handle.parser()?;
	parser
		.parse(source, None)
		.ok_or_else(|| ParseError::Aborted(handle.name().to_string()))
}
