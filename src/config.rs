//! Configuration handling for iconsmith.
//! Loads `build.config.{json,yml,yaml}` from the working directory, fills in
//! defaults and validates the result before anything touches the filesystem.

use crate::constants::{
    CONFIG_FILES, DEFAULT_COLOR, DEFAULT_COMPILER, DEFAULT_DECLARATION_TAG, DEFAULT_ENTRY,
    DEFAULT_FORMATTER, DEFAULT_OUTPUT, DEFAULT_TITLE_SUFFIX,
};
use crate::error::{Error, Result};
use crate::synthesizer::{Framework, SynthesisDefaults};
use log::{debug, warn};
use regex::Regex;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static COLOR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(#[0-9A-Fa-f]{3,8}|[A-Za-z]+|(rgb|rgba|hsl|hsla)\([0-9.,%\s]+\))$")
        .expect("valid color pattern")
});

/// Characters that would break out of a quoted string in generated code.
static UNSAFE_LITERAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"['"`\\{}<>\n]"#).expect("valid literal pattern"));

/// Where a component lands inside its folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// `<Name>/index.<ext>`
    #[default]
    Nested,
    /// `<Name>.<ext>`
    Flat,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadmeConfig {
    /// Markdown file to write
    pub output: PathBuf,
    /// Markdown template holding the declaration tag
    #[serde(default)]
    pub template: Option<PathBuf>,
    #[serde(default = "default_declaration_tag")]
    pub declaration_tag: String,
}

fn default_declaration_tag() -> String {
    DEFAULT_DECLARATION_TAG.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub entry: PathBuf,
    pub output: PathBuf,
    pub generate: Vec<Framework>,
    pub layout: Layout,
    pub default_color: String,
    pub title_suffix: String,
    /// Package name used in readme import statements
    pub project_name: Option<String>,
    pub format: bool,
    pub formatter: String,
    pub declarations: bool,
    pub compiler: String,
    pub clean_sources: bool,
    pub readme: Option<ReadmeConfig>,
    /// Directory relative paths are resolved against
    #[serde(skip)]
    pub working_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            entry: PathBuf::from(DEFAULT_ENTRY),
            output: PathBuf::from(DEFAULT_OUTPUT),
            generate: vec![Framework::React],
            layout: Layout::default(),
            default_color: DEFAULT_COLOR.to_string(),
            title_suffix: DEFAULT_TITLE_SUFFIX.to_string(),
            project_name: None,
            format: true,
            formatter: DEFAULT_FORMATTER.to_string(),
            declarations: true,
            compiler: DEFAULT_COMPILER.to_string(),
            clean_sources: false,
            readme: None,
            working_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    /// Entry folder resolved against the working directory.
    pub fn entry_dir(&self) -> PathBuf {
        self.working_dir.join(&self.entry)
    }

    /// Output folder resolved against the working directory.
    pub fn output_dir(&self) -> PathBuf {
        self.working_dir.join(&self.output)
    }

    pub fn resolve<P: AsRef<Path>>(&self, path: P) -> PathBuf {
        self.working_dir.join(path)
    }

    pub fn synthesis_defaults(&self) -> SynthesisDefaults {
        SynthesisDefaults::new(&self.default_color, &self.title_suffix)
    }

    /// Name used as the package prefix of readme imports.
    pub fn project_name(&self) -> String {
        self.project_name
            .clone()
            .or_else(|| package_name(&self.working_dir))
            .or_else(|| {
                self.working_dir
                    .canonicalize()
                    .ok()
                    .and_then(|dir| dir.file_name().map(|n| n.to_string_lossy().into_owned()))
            })
            .unwrap_or_else(|| "icons".to_string())
    }

    /// Checks the configuration before any output is produced.
    ///
    /// # Errors
    /// * `Error::EntryNotFound` if the entry folder does not exist
    /// * `Error::ConfigError` for values that cannot be embedded in generated code
    pub fn validate(&self) -> Result<()> {
        if !self.entry_dir().is_dir() {
            return Err(Error::EntryNotFound { entry: self.entry.display().to_string() });
        }
        if self.generate.is_empty() {
            return Err(Error::ConfigError("'generate' must name at least one framework".into()));
        }
        if !COLOR_PATTERN.is_match(&self.default_color) {
            return Err(Error::ConfigError(format!(
                "'defaultColor' is not a color literal: {}",
                self.default_color
            )));
        }
        if UNSAFE_LITERAL.is_match(&self.title_suffix) {
            return Err(Error::ConfigError(format!(
                "'titleSuffix' contains quotes, braces or angle brackets: {}",
                self.title_suffix
            )));
        }
        Ok(())
    }
}

/// Reads the `name` field of `package.json` in `dir`.
fn package_name(dir: &Path) -> Option<String> {
    let content = std::fs::read_to_string(dir.join("package.json")).ok()?;
    let package: serde_json::Value = serde_json::from_str(&content).ok()?;
    package.get("name")?.as_str().map(str::to_string)
}

/// Returns the first existing configuration file in `working_dir`.
pub fn find_config_file<P: AsRef<Path>>(working_dir: P, config_files: &[&str]) -> Option<PathBuf> {
    config_files
        .iter()
        .map(|file| working_dir.as_ref().join(file))
        .find(|path| path.is_file())
}

/// Parses configuration content; `.json` files are JSON, anything else YAML.
///
/// # Errors
/// * `Error::JSONParseError` / `Error::YAMLParseError` if parsing fails
pub fn parse_config(content: &str, path: &Path) -> Result<Config> {
    let is_json = path.extension().is_some_and(|ext| ext == "json");
    if is_json {
        Ok(serde_json::from_str(content)?)
    } else {
        Ok(serde_yaml::from_str(content)?)
    }
}

/// Loads and validates the configuration.
///
/// # Arguments
/// * `working_dir` - Directory to search for configuration files
/// * `explicit` - Configuration file given on the command line
///
/// # Errors
/// * `Error::ConfigError` if an explicit file does not exist
/// * Parse and validation errors from [`parse_config`] and [`Config::validate`]
pub fn load_config(working_dir: &Path, explicit: Option<&Path>) -> Result<Config> {
    let config_path = match explicit {
        Some(path) => {
            let path = working_dir.join(path);
            if !path.is_file() {
                return Err(Error::ConfigError(format!(
                    "Invalid configuration path: {}",
                    path.display()
                )));
            }
            Some(path)
        }
        None => find_config_file(working_dir, &CONFIG_FILES),
    };

    let mut config = match config_path {
        Some(path) => {
            debug!("Loading configuration from {}", path.display());
            let content = std::fs::read_to_string(&path)?;
            parse_config(&content, &path)?
        }
        None => {
            warn!(
                "No configuration file found (tried: {}), using default options",
                CONFIG_FILES.join(", ")
            );
            Config::default()
        }
    };

    config.working_dir = working_dir.to_path_buf();
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_pattern() {
        for color in ["#262626", "#fff", "currentColor", "rgb(0, 0, 0)", "hsla(0, 0%, 0%, .5)"] {
            assert!(COLOR_PATTERN.is_match(color), "{color}");
        }
        for color in ["#262626'", "red; alert(1)", "{color}", ""] {
            assert!(!COLOR_PATTERN.is_match(color), "{color}");
        }
    }

    #[test]
    fn test_parse_yaml_defaults() {
        let config = parse_config("entry: icons\n", Path::new("build.config.yml")).unwrap();
        assert_eq!(config.entry, PathBuf::from("icons"));
        assert_eq!(config.output, PathBuf::from(DEFAULT_OUTPUT));
        assert_eq!(config.generate, vec![Framework::React]);
        assert_eq!(config.layout, Layout::Nested);
    }
}
