extern crate image as image_rs;

use std::path::PathBuf;
use ndarray_npy::ReadNpyError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, VisError>;

#[derive(Debug, Error)]
pub enum VisError {
    #[error("io failure on {}", .path.display())]
    Io { path: PathBuf, source: std::io::Error },

    #[error("malformed trajectory line {line_number}: {reason} ({line:?})")]
    MalformedLine { line_number: usize, line: String, reason: String },

    #[error("could not read keypoints from {}", .path.display())]
    Keypoints { path: PathBuf, source: ReadNpyError },

    #[error("keypoints in {} have shape {shape:?}, expected N x 3", .path.display())]
    KeypointShape { path: PathBuf, shape: Vec<usize> },

    #[error("render failed: {0}")]
    Render(String),

    #[error("png encoding failed")]
    Encode(#[from] image_rs::ImageError),

    #[error("invalid runtime config {}", .path.display())]
    Config { path: PathBuf, source: serde_yaml::Error }
}

impl VisError {
    pub fn io<P: Into<PathBuf>>(path: P, source: std::io::Error) -> VisError {
        VisError::Io { path: path.into(), source }
    }

    pub fn malformed(line_number: usize, line: &str, reason: String) -> VisError {
        VisError::MalformedLine { line_number, line: line.to_string(), reason }
    }
}
