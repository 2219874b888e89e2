//! Discovery of icon folders.
//!
//! Only the entry root and its immediate subdirectories are scanned. Entries
//! come back in directory-listing order, unsorted.

use crate::constants::{ROOT_FOLDER, SVG_EXTENSION};
use crate::error::{Error, Result};
use log::{debug, warn};
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// An `.svg` file found during discovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconFile {
    pub file_name: String,
    pub path: PathBuf,
}

impl IconFile {
    pub fn read(&self) -> Result<IconSource> {
        let content = std::fs::read_to_string(&self.path)?;
        Ok(IconSource { file_name: self.file_name.clone(), path: self.path.clone(), content })
    }
}

/// An icon file together with its markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconSource {
    pub file_name: String,
    pub path: PathBuf,
    pub content: String,
}

/// A folder of the entry tree and the icons directly inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFolder {
    /// `.` for the entry root, otherwise the subdirectory name
    pub name: String,
    pub path: PathBuf,
    pub icons: Vec<IconFile>,
}

impl SourceFolder {
    pub fn is_root(&self) -> bool {
        self.name == ROOT_FOLDER
    }
}

/// Lists the entry root followed by its immediate subdirectories.
///
/// Symlinked directories are not followed.
pub fn discover_folders<P: AsRef<Path>>(entry: P) -> Result<Vec<SourceFolder>> {
    let entry = entry.as_ref();
    let mut folders = vec![SourceFolder {
        name: ROOT_FOLDER.to_string(),
        path: entry.to_path_buf(),
        icons: list_svg_files(entry)?,
    }];

    for dir_entry in WalkDir::new(entry).min_depth(1).max_depth(1) {
        let dir_entry = dir_entry.map_err(|e| Error::IoError(e.into()))?;
        if !dir_entry.file_type().is_dir() {
            continue;
        }
        let Some(name) = dir_entry.file_name().to_str() else {
            warn!("Skipping folder with a non UTF-8 name: {}", dir_entry.path().display());
            continue;
        };

        debug!("Discovered folder '{}'", name);
        folders.push(SourceFolder {
            name: name.to_string(),
            path: dir_entry.path().to_path_buf(),
            icons: list_svg_files(dir_entry.path())?,
        });
    }

    Ok(folders)
}

/// Lists the `.svg` files directly inside `folder` in listing order.
pub fn list_svg_files<P: AsRef<Path>>(folder: P) -> Result<Vec<IconFile>> {
    let mut icons = Vec::new();
    for dir_entry in WalkDir::new(folder).min_depth(1).max_depth(1) {
        let dir_entry = dir_entry.map_err(|e| Error::IoError(e.into()))?;
        if dir_entry.file_type().is_dir() {
            continue;
        }
        let Some(file_name) = dir_entry.file_name().to_str() else {
            continue;
        };
        if file_name.ends_with(SVG_EXTENSION) {
            icons.push(IconFile {
                file_name: file_name.to_string(),
                path: dir_entry.path().to_path_buf(),
            });
        }
    }
    Ok(icons)
}

/// Fails if regenerating any folder into `output` would touch `entry`.
///
/// The output root is only written into, so it must differ from the entry.
/// Subfolders are wiped first, so the entry must not be one of them or sit
/// inside one.
///
/// # Errors
/// * `Error::FolderCollision` naming the first offending folder
pub fn check_collisions(entry: &Path, output: &Path, folders: &[SourceFolder]) -> Result<()> {
    let entry_abs = normalize_path(entry)?;
    for folder in folders {
        let target = normalize_path(&output.join(&folder.name))?;
        let collides = if folder.is_root() {
            target == entry_abs
        } else {
            entry_abs.starts_with(&target)
        };
        if collides {
            return Err(Error::FolderCollision {
                folder: target.display().to_string(),
                entry: entry.display().to_string(),
            });
        }
    }
    Ok(())
}

/// Makes `path` absolute and resolves `.` and `..` without touching the
/// filesystem, so paths that do not exist yet can be compared.
pub fn normalize_path(path: &Path) -> Result<PathBuf> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };

    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    Ok(normalized)
}
