use std::fs;
use std::path::{Path, PathBuf};

use crate::{Result, VisError};

pub mod trajectory_loader;
pub mod keypoint_loader;

/**
 * Regular files of a directory sorted by name. Subdirectories are ignored.
 */
pub fn list_files(dir_path: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir_path).map_err(|source| VisError::io(dir_path, source))?;
    let mut files = Vec::<PathBuf>::new();

    for entry in entries {
        let path = entry.map_err(|source| VisError::io(dir_path, source))?.path();
        if path.is_file() {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

pub fn file_name(path: &Path) -> String {
    path.file_name().map(|name| name.to_string_lossy().into_owned()).unwrap_or_default()
}
