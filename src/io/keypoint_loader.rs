extern crate nalgebra as na;

use std::path::{Path, PathBuf};
use na::Point3;
use ndarray::Array2;
use ndarray_npy::read_npy;

use crate::io::list_files;
use crate::{Float, Result, VisError};

pub const KEYPOINT_EXTENSION: &str = ".npy";

pub fn list_frame_files(keypoint_dir: &Path) -> Result<Vec<PathBuf>> {
    list_files(keypoint_dir)
}

/**
 * A name without the extension is returned unchanged; it will simply not match any pose.
 */
pub fn timestamp_key(file_name: &str, extension: &str) -> String {
    file_name.strip_suffix(extension).unwrap_or(file_name).to_string()
}

/**
 * Loads an N x 3 array. Both float64 and float32 arrays are accepted.
 */
pub fn load_keypoints(file_path: &Path) -> Result<Vec<Point3<Float>>> {
    let array = match read_npy::<_, Array2<Float>>(file_path) {
        Ok(array) => array,
        Err(source) => match read_npy::<_, Array2<f32>>(file_path) {
            Ok(array) => array.mapv(|v| v as Float),
            Err(_) => return Err(VisError::Keypoints { path: file_path.to_path_buf(), source })
        }
    };

    if array.ncols() != 3 {
        return Err(VisError::KeypointShape { path: file_path.to_path_buf(), shape: array.shape().to_vec() });
    }

    Ok(array.outer_iter().map(|row| Point3::<Float>::new(row[0], row[1], row[2])).collect::<Vec<Point3<Float>>>())
}
