use pretty_assertions::assert_eq;

use super::*;

#[test]
fn parse_empty_config() {
	let config = LoaderConfig::from_toml("").unwrap();
	assert_eq!(config, LoaderConfig::default());
}

#[test]
fn parse_full_config() {
	let toml = r#"
search_paths = ["/opt/giblang/grammars", "grammars"]

[[grammar]]
name = "giblang-dev"
path = "/work/tree-sitter-giblang/libgiblang.so"
symbol = "tree_sitter_giblang"

[[grammar]]
name = "other"
path = "libother.so"
"#;
	let config = LoaderConfig::from_toml(toml).unwrap();

	assert_eq!(
		config.search_paths,
		vec![PathBuf::from("/opt/giblang/grammars"), PathBuf::from("grammars")]
	);
	assert_eq!(config.grammars.len(), 2);

	let dev = config.grammar("giblang-dev").unwrap();
	assert_eq!(dev.path, PathBuf::from("/work/tree-sitter-giblang/libgiblang.so"));
	assert_eq!(dev.symbol.as_deref(), Some("tree_sitter_giblang"));

	let other = config.grammar("other").unwrap();
	assert_eq!(other.symbol, None);
	assert!(config.grammar("missing").is_none());
}

#[test]
fn entry_artifact_uses_symbol_override() {
	let entry = GrammarEntry {
		name: "giblang-dev".into(),
		path: "/tmp/libgiblang.so".into(),
		symbol: Some("tree_sitter_giblang".into()),
	};
	match entry.artifact() {
		GrammarArtifact::Library { name, path, symbol } => {
			assert_eq!(name, "giblang-dev");
			assert_eq!(path, PathBuf::from("/tmp/libgiblang.so"));
			assert_eq!(symbol, "tree_sitter_giblang");
		}
		other => panic!("expected library artifact, got {other:?}"),
	}
}

#[test]
fn entry_artifact_defaults_symbol() {
	let entry = GrammarEntry {
		name: "giblang-dev".into(),
		path: "/tmp/libgiblang.so".into(),
		symbol: None,
	};
	assert!(matches!(
		entry.artifact(),
		GrammarArtifact::Library { ref symbol, .. } if symbol == "tree_sitter_giblang_dev"
	));
}

#[test]
fn reject_duplicate_grammar() {
	let toml = r#"
[[grammar]]
name = "giblang"
path = "a.so"

[[grammar]]
name = "giblang"
path = "b.so"
"#;
	let err = LoaderConfig::from_toml(toml).unwrap_err();
	assert!(matches!(err, ConfigError::DuplicateGrammar(ref name) if name == "giblang"));
}

#[test]
fn reject_unknown_field() {
	let err = LoaderConfig::from_toml("grammar_dirs = []").unwrap_err();
	assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn missing_file_is_default() {
	let dir = tempfile::tempdir().expect("create tempdir");
	let config = LoaderConfig::load_file(&dir.path().join(CONFIG_FILE)).unwrap();
	assert_eq!(config, LoaderConfig::default());
}

#[test]
fn load_file_resolves_relative_paths() {
	let dir = tempfile::tempdir().expect("create tempdir");
	let path = dir.path().join(CONFIG_FILE);
	std::fs::write(
		&path,
		r#"
search_paths = ["grammars", "/abs/grammars"]

[[grammar]]
name = "giblang"
path = "build/libgiblang.so"
"#,
	)
	.unwrap();

	let config = LoaderConfig::load_file(&path).unwrap();
	assert_eq!(
		config.search_paths,
		vec![dir.path().join("grammars"), PathBuf::from("/abs/grammars")]
	);
	assert_eq!(config.grammars[0].path, dir.path().join("build").join("libgiblang.so"));
}

#[test]
fn unreadable_path_is_read_error() {
	let dir = tempfile::tempdir().expect("create tempdir");
	// A directory cannot be read as a file.
	let err = LoaderConfig::load_file(dir.path()).unwrap_err();
	assert!(matches!(err, ConfigError::Read { .. }));
}
