//! Giblang grammar for [tree-sitter].
//!
//! The parse tables are compiled into this crate by its build script. Hand
//! [`LANGUAGE`] to a tree-sitter parser to parse Giblang source:
//!
//! ```
//! let code = "fn main() {}";
//! let mut parser = tree_sitter::Parser::new();
//! let language = tree_sitter_giblang::LANGUAGE;
//! parser
//! 	.set_language(&language.into())
//! 	.expect("Error loading Giblang parser");
//! let tree = parser.parse(code, None).unwrap();
//! assert!(!tree.root_node().has_error());
//! ```
//!
//! [tree-sitter]: https://tree-sitter.github.io/

use tree_sitter_language::LanguageFn;

unsafe extern "C" {
	fn tree_sitter_giblang() -> *const ();
}

/// Name the grammar was generated under; also the suffix of its entry symbol.
pub const GRAMMAR_NAME: &str = "giblang";

/// The tree-sitter [`LanguageFn`] for this grammar.
pub const LANGUAGE: LanguageFn = unsafe { LanguageFn::from_raw(tree_sitter_giblang) };

/// The content of the [`node-types.json`] file for this grammar.
///
/// [`node-types.json`]: https://tree-sitter.github.io/tree-sitter/using-parsers/6-static-node-types
pub const NODE_TYPES: &str = include_str!("../../src/node-types.json");
