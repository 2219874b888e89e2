//! Markdown documentation of the icon set.
//!
//! Runs its own discovery pass over the entry folder and renders one table
//! per folder with a preview, the file name and the import statement.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::naming::{svg_stem, ComponentName};
use crate::processor::write_file;
use crate::report::{print_report, GeneratedFile};
use crate::walker::{discover_folders, SourceFolder};
use log::{debug, warn};
use std::fs;
use std::path::Path;

const TABLE_HEADER: &str = "\n| Icon | Name | ESM import |\n| --- | --- | --- |";

/// Joins path fragments with `/`, dropping empty and `.` segments.
fn join_url(parts: &[&str]) -> String {
    let absolute = parts.first().is_some_and(|first| first.starts_with('/'));
    let joined = parts
        .iter()
        .flat_map(|part| part.split(['/', '\\']))
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect::<Vec<_>>()
        .join("/");
    if absolute {
        format!("/{joined}")
    } else {
        joined
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Renders the icon tables for every folder that contains icons.
///
/// # Arguments
/// * `folders` - Discovered folders, root first
/// * `entry` - Entry folder as configured, used for image links
/// * `project_name` - Package name imports start with
/// * `output` - Output folder as configured, part of the import path
pub fn build_tables(
    folders: &[SourceFolder],
    entry: &Path,
    project_name: &str,
    output: &Path,
) -> String {
    let entry_lossy = entry.to_string_lossy();
    let entry: &str = &entry_lossy;
    let output_lossy = output.to_string_lossy();
    let output: &str = &output_lossy;
    let mut out = String::new();

    for folder in folders.iter().filter(|folder| !folder.icons.is_empty()) {
        if !folder.is_root() {
            out.push_str(&format!("\n\n### {}", capitalize(&folder.name)));
        }
        out.push_str(TABLE_HEADER);

        let module = if folder.is_root() {
            join_url(&[project_name, output])
        } else {
            join_url(&[project_name, output, folder.name.as_str()])
        };

        for icon in &folder.icons {
            let name = svg_stem(&icon.file_name);
            let image = join_url(&[entry, folder.name.as_str(), icon.file_name.as_str()])
                .replace(' ', "%20");
            let import_name = ComponentName::from_file_name(&icon.file_name);
            out.push_str(&format!(
                "\n| ![{name}]({image}) | {name} | `import {{ {import_name} }} from '{module}'` |"
            ));
        }
    }

    out
}

/// Substitutes `tables` for the first `declaration_tag` in `template`.
///
/// Without a template the tables are returned as they are.
pub fn merge_template(template: Option<&str>, declaration_tag: &str, tables: &str) -> String {
    match template {
        Some(template) if template.contains(declaration_tag) => {
            template.replacen(declaration_tag, tables, 1)
        }
        Some(template) => {
            warn!("Readme template has no '{}' tag, writing it unchanged", declaration_tag);
            template.to_string()
        }
        None => tables.to_string(),
    }
}

/// Writes the readme configured in `config.readme`.
///
/// # Errors
/// * `Error::ConfigError` if the configuration has no `readme` section
/// * `Error::IoError` if the template cannot be read or the readme written
pub fn generate_readme(config: &Config) -> Result<GeneratedFile> {
    let readme = config
        .readme
        .as_ref()
        .ok_or_else(|| Error::ConfigError("No readme options provided".to_string()))?;

    let folders = discover_folders(config.entry_dir())?;
    let tables = build_tables(&folders, &config.entry, &config.project_name(), &config.output);

    let template = match &readme.template {
        Some(path) => {
            debug!("Reading readme template {}", path.display());
            Some(fs::read_to_string(config.resolve(path))?)
        }
        None => None,
    };
    let content = merge_template(template.as_deref(), &readme.declaration_tag, &tables);

    let output = config.resolve(&readme.output);
    write_file(&output, &content)?;

    let name = output
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file = GeneratedFile::new(name, &output);
    print_report(std::slice::from_ref(&file));
    Ok(file)
}
