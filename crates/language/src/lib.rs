// Grammar operations report through tracing, never stderr
#![deny(clippy::print_stderr)]

//! Giblang grammar loading.
//!
//! Turns compiled tree-sitter grammars into [`LanguageHandle`]s that parsers
//! can use.
//!
//! # Architecture
//!
//! * [`grammar`]: Grammar artifacts, validation and [`load`]
//! * [`language`]: The opaque [`LanguageHandle`]
//! * [`loader`]: Name-based resolution via [`GrammarLoader`]
//! * [`config`]: `grammars.toml` loader configuration
//! * [`paths`]: Runtime directories and library search paths
//! * [`parse`]: One-shot parsing with a loaded handle
//!
//! ```
//! use giblang_language::{GrammarArtifact, parse_source};
//!
//! let handle = GrammarArtifact::bundled().load().unwrap();
//! let tree = parse_source(&handle, "fn main() {}").unwrap();
//! assert_eq!(tree.root_node().kind(), "source_file");
//! ```

pub mod config;
pub mod grammar;
pub mod language;
pub mod loader;
pub mod parse;
pub mod paths;

pub use config::{ConfigError, GrammarEntry, LoaderConfig};
pub use grammar::{GrammarArtifact, GrammarLoadError, entry_symbol, load};
pub use language::{GrammarOrigin, LanguageHandle};
pub use loader::GrammarLoader;
pub use parse::{ParseError, parse_source};
pub use paths::{cache_dir, grammar_library_name, grammar_search_paths, runtime_dir};
