use iconsmith::config::{load_config, Layout};
use iconsmith::error::Error;
use iconsmith::synthesizer::Framework;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn working_dir_with_entry(entry: &str) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    fs::create_dir_all(temp_dir.path().join(entry)).unwrap();
    temp_dir
}

#[test]
fn test_missing_config_file_uses_defaults() {
    let temp_dir = working_dir_with_entry("src");

    let config = load_config(temp_dir.path(), None).unwrap();

    assert_eq!(config.entry, PathBuf::from("./src"));
    assert_eq!(config.output, PathBuf::from("./dist"));
    assert_eq!(config.generate, vec![Framework::React]);
    assert_eq!(config.default_color, "#262626");
    assert_eq!(config.title_suffix, " icon");
    assert!(config.format);
    assert!(config.declarations);
    assert!(config.readme.is_none());
    assert_eq!(config.entry_dir(), temp_dir.path().join("./src"));
}

#[test]
fn test_json_config() {
    let temp_dir = working_dir_with_entry("icons");
    fs::write(
        temp_dir.path().join("build.config.json"),
        r#"{
            "entry": "icons",
            "output": "out",
            "generate": ["react", "vue"],
            "layout": "flat",
            "defaultColor": "currentColor",
            "readme": { "output": "README.md", "template": "README.tpl.md" }
        }"#,
    )
    .unwrap();

    let config = load_config(temp_dir.path(), None).unwrap();

    assert_eq!(config.entry, PathBuf::from("icons"));
    assert_eq!(config.output, PathBuf::from("out"));
    assert_eq!(config.generate, vec![Framework::React, Framework::Vue]);
    assert_eq!(config.layout, Layout::Flat);
    assert_eq!(config.default_color, "currentColor");

    let readme = config.readme.unwrap();
    assert_eq!(readme.output, PathBuf::from("README.md"));
    assert_eq!(readme.template, Some(PathBuf::from("README.tpl.md")));
    assert_eq!(readme.declaration_tag, "[icons-declaration]");
}

#[test]
fn test_yaml_config() {
    let temp_dir = working_dir_with_entry("svg");
    fs::write(
        temp_dir.path().join("build.config.yml"),
        "entry: svg\ngenerate: [vue]\nreadme:\n  output: docs/ICONS.md\n  declarationTag: '<!-- icons -->'\n",
    )
    .unwrap();

    let config = load_config(temp_dir.path(), None).unwrap();

    assert_eq!(config.generate, vec![Framework::Vue]);
    assert_eq!(config.readme.unwrap().declaration_tag, "<!-- icons -->");
}

#[test]
fn test_json_config_takes_precedence() {
    let temp_dir = working_dir_with_entry("a");
    fs::create_dir_all(temp_dir.path().join("b")).unwrap();
    fs::write(temp_dir.path().join("build.config.json"), r#"{"entry": "a"}"#).unwrap();
    fs::write(temp_dir.path().join("build.config.yaml"), "entry: b\n").unwrap();

    let config = load_config(temp_dir.path(), None).unwrap();
    assert_eq!(config.entry, PathBuf::from("a"));
}

#[test]
fn test_explicit_config_path() {
    let temp_dir = working_dir_with_entry("icons");
    fs::write(temp_dir.path().join("icons.yaml"), "entry: icons\n").unwrap();

    let config = load_config(temp_dir.path(), Some(Path::new("icons.yaml"))).unwrap();
    assert_eq!(config.entry, PathBuf::from("icons"));

    let missing = load_config(temp_dir.path(), Some(Path::new("missing.yaml")));
    assert!(matches!(missing, Err(Error::ConfigError(_))));
}

#[test]
fn test_missing_entry_folder() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("build.config.json"), r#"{"entry": "nope"}"#).unwrap();

    match load_config(temp_dir.path(), None) {
        Err(e @ Error::EntryNotFound { .. }) => assert_eq!(e.exit_code(), 2),
        other => panic!("Expected EntryNotFound, got {other:?}"),
    }
}

#[test]
fn test_invalid_values() {
    let temp_dir = working_dir_with_entry("src");
    let config_file = temp_dir.path().join("build.config.json");

    fs::write(&config_file, r#"{"entry": "src", "defaultColor": "red'); alert('x"}"#).unwrap();
    assert!(matches!(load_config(temp_dir.path(), None), Err(Error::ConfigError(_))));

    fs::write(&config_file, r#"{"entry": "src", "titleSuffix": " {icon}"}"#).unwrap();
    assert!(matches!(load_config(temp_dir.path(), None), Err(Error::ConfigError(_))));

    fs::write(&config_file, r#"{"entry": "src", "generate": []}"#).unwrap();
    assert!(matches!(load_config(temp_dir.path(), None), Err(Error::ConfigError(_))));

    fs::write(&config_file, r#"{"entry": "src", "generate": ["svelte"]}"#).unwrap();
    assert!(matches!(load_config(temp_dir.path(), None), Err(Error::JSONParseError(_))));

    fs::write(&config_file, r#"{"entry": "src""#).unwrap();
    assert!(matches!(load_config(temp_dir.path(), None), Err(Error::JSONParseError(_))));
}

#[test]
fn test_project_name() {
    let temp_dir = working_dir_with_entry("src");
    let config = load_config(temp_dir.path(), None).unwrap();
    let dir_name = temp_dir.path().canonicalize().unwrap();
    assert_eq!(config.project_name(), dir_name.file_name().unwrap().to_string_lossy());

    fs::write(temp_dir.path().join("package.json"), r#"{"name": "@acme/icons"}"#).unwrap();
    assert_eq!(config.project_name(), "@acme/icons");

    fs::write(
        temp_dir.path().join("build.config.json"),
        r#"{"entry": "src", "projectName": "my-icons"}"#,
    )
    .unwrap();
    let config = load_config(temp_dir.path(), None).unwrap();
    assert_eq!(config.project_name(), "my-icons");
}
