//! Summary table of generated files.

use comfy_table::{presets::UTF8_FULL, Cell, Color, Table};
use std::fs;
use std::path::{Path, PathBuf};

/// A file written during a run, as shown in the summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub name: String,
    pub path: PathBuf,
}

impl GeneratedFile {
    pub fn new<N: Into<String>, P: Into<PathBuf>>(name: N, path: P) -> Self {
        Self { name: name.into(), path: path.into() }
    }
}

/// Size in whole kilobytes, rounded, or `-` when the file cannot be read.
pub fn file_size_kb(path: &Path) -> String {
    match fs::metadata(path) {
        Ok(metadata) => format!("{}kb", (metadata.len() as f64 / 1024.0).round() as u64),
        Err(_) => "-".to_string(),
    }
}

pub fn render_report(files: &[GeneratedFile]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(
        ["Index", "Name", "Path", "Size"]
            .into_iter()
            .map(|title| Cell::new(title).fg(Color::Yellow)),
    );

    for (index, file) in files.iter().enumerate() {
        table.add_row(vec![
            index.to_string(),
            file.name.clone(),
            file.path.display().to_string(),
            file_size_kb(&file.path),
        ]);
    }

    format!("Generated {} files successfully:\n{}", files.len(), table)
}

pub fn print_report(files: &[GeneratedFile]) {
    println!("{}", render_report(files));
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_size_kb() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("Home.tsx");
        fs::write(&file, vec![b'a'; 1600]).unwrap();

        assert_eq!(file_size_kb(&file), "2kb");
        assert_eq!(file_size_kb(&temp_dir.path().join("missing")), "-");
    }

    #[test]
    fn test_render_report() {
        let files = vec![
            GeneratedFile::new("ArrowLeft", "dist/ArrowLeft/index.tsx"),
            GeneratedFile::new("Logo", "dist/brand/Logo/index.tsx"),
        ];
        let report = render_report(&files);
        assert!(report.starts_with("Generated 2 files successfully:"));
        assert!(report.contains("ArrowLeft"));
        assert!(report.contains("dist/brand/Logo/index.tsx"));
    }
}
