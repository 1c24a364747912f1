//! `giblang-grammar`: load Giblang grammar artifacts and parse with them.
//!
//! `check` is the load smoke test as a command: it exits non-zero when the
//! grammar cannot be loaded.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use giblang_language::{GrammarArtifact, GrammarLoader, GrammarOrigin, LanguageHandle, parse_source};
use tracing::{debug, info};

/// Command line arguments.
#[derive(Parser, Debug)]
#[command(name = "giblang-grammar")]
#[command(about = "Check Giblang grammar artifacts and parse sources with them")]
struct Cli {
	/// Verbose logging
	#[arg(short, long, global = true)]
	verbose: bool,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Load a grammar and report what it contains
	Check {
		/// Grammar name
		#[arg(default_value = "giblang")]
		name: String,

		/// Load this shared library instead of resolving the name
		#[arg(short, long, value_name = "PATH")]
		library: Option<PathBuf>,

		/// Entry symbol exported by the library
		#[arg(short, long, requires = "library")]
		symbol: Option<String>,
	},
	/// Parse a file and print its syntax tree
	Parse {
		/// Source file
		file: PathBuf,

		/// Grammar name
		#[arg(short, long, default_value = "giblang")]
		grammar: String,
	},
	/// Print the directories searched for grammar libraries
	Paths,
}

fn main() -> ExitCode {
	let cli = Cli::parse();

	let subscriber = tracing_subscriber::fmt()
		.with_max_level(if cli.verbose {
			tracing::Level::DEBUG
		} else {
			tracing::Level::INFO
		})
		.with_writer(std::io::stderr)
		.finish();

	if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
		eprintln!("failed to install logger: {e}");
	}

	match run(cli.command, GrammarLoader::from_runtime) {
		Ok(code) => code,
		Err(e) => {
			tracing::error!("{e:#}");
			ExitCode::FAILURE
		}
	}
}

/// Runs `command`. `loader` is only called by subcommands that resolve grammar names.
fn run<E>(command: Command, loader: impl FnOnce() -> Result<GrammarLoader, E>) -> Result<ExitCode>
where
	E: std::error::Error + Send + Sync + 'static,
{
	let loader = || loader().context("failed to read grammar configuration");

	match command {
		Command::Check { name, library, symbol } => {
			let handle = match library {
				Some(path) => {
					let artifact = GrammarArtifact::library(&name, path);
					let artifact = match symbol {
						Some(symbol) => artifact.with_symbol(symbol),
						None => artifact,
					};
					artifact.load()
				}
				None => loader()?.load(&name),
			}
			.with_context(|| format!("Error loading {name} grammar"))?;

			info!(grammar = handle.name(), "Grammar loaded");
			println!("{}", describe(&handle));
			Ok(ExitCode::SUCCESS)
		}
		Command::Parse { file, grammar } => {
			let source = std::fs::read_to_string(&file).with_context(|| format!("failed to read {}", file.display()))?;
			let handle = loader()?
				.load(&grammar)
				.with_context(|| format!("Error loading {grammar} grammar"))?;
			debug!(grammar = handle.name(), file = %file.display(), "Parsing");

			let tree = parse_source(&handle, &source).with_context(|| format!("failed to parse {}", file.display()))?;
			let root = tree.root_node();
			println!("{}", root.to_sexp());

			if root.has_error() {
				tracing::warn!(file = %file.display(), "Syntax tree contains errors");
				return Ok(ExitCode::FAILURE);
			}
			Ok(ExitCode::SUCCESS)
		}
		Command::Paths => {
			for dir in loader()?.search_paths() {
				println!("{}", dir.display());
			}
			Ok(ExitCode::SUCCESS)
		}
	}
}

fn describe(handle: &LanguageHandle) -> String {
	let origin = match handle.origin() {
		GrammarOrigin::Bundled => "bundled".to_string(),
		GrammarOrigin::Library(path) => path.display().to_string(),
	};
	format!(
		"{}: ABI {}, {} node kinds ({origin})",
		handle.name(),
		handle.abi_version(),
		handle.node_kind_count()
	)
}
