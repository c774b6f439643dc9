extern crate nalgebra as na;
extern crate serde;

use std::fs;
use std::path::Path;
use serde::Deserialize;

pub mod error;
pub mod io;
pub mod numerics;
pub mod sensors;
pub mod visualize;
pub mod pipeline;

pub use error::{Result, VisError};

macro_rules! define_float {
    ($f:tt) => {
        pub use std::$f as float;
        pub type Float = $f;
    }
}

define_float!(f64);

pub const RUNTIME_CONF_FILE: &str = "vis_keypoints.yaml";

/**
 * Paths are relative to the run root. Every field falls back to the value the
 * visualization has always used, so a config file only needs the overrides.
 */
#[derive(Debug,Clone,PartialEq,Deserialize)]
#[serde(default)]
pub struct RuntimeConf {
    pub trajectory_file: String,
    pub keypoint_dir: String,
    pub output_dir: String,
    pub keypoint_extension: String,
    pub render: RenderConf,
    pub marker: MarkerConf
}

impl Default for RuntimeConf {
    fn default() -> RuntimeConf {
        RuntimeConf {
            trajectory_file: String::from("build/CameraTrajectory.txt"),
            keypoint_dir: String::from("per_frame_keypoints"),
            output_dir: String::from("per_frame_keypoints_vis"),
            keypoint_extension: String::from(io::keypoint_loader::KEYPOINT_EXTENSION),
            render: RenderConf::default(),
            marker: MarkerConf::default()
        }
    }
}

#[derive(Debug,Clone,PartialEq,Deserialize)]
#[serde(default)]
pub struct RenderConf {
    pub width: u32,
    pub height: u32,
    /// Horizontal and vertical field of view in degrees
    pub fov: [Float;2],
    pub z_near: Float,
    pub z_far: Float,
    pub distance: Float,
    /// Static xyz euler angles in radians
    pub angles: [Float;3],
    pub center: [Float;3],
    pub background: [u8;3],
    pub point_color: [u8;3],
    pub point_radius: u32,
    pub line_width: u32
}

impl Default for RenderConf {
    fn default() -> RenderConf {
        RenderConf {
            width: 640,
            height: 480,
            fov: [90.0,60.0],
            z_near: 0.01,
            z_far: 1000.0,
            distance: 10.0,
            angles: [0.0,0.0,0.0],
            center: [0.0,0.0,0.0],
            background: [253,253,253],
            point_color: [102,102,102],
            point_radius: 2,
            line_width: 2
        }
    }
}

#[derive(Debug,Clone,PartialEq,Deserialize)]
#[serde(default)]
pub struct MarkerConf {
    pub height: Float,
    /// Focal lengths of the camera the marker depicts, in pixels
    pub focal: [Float;2],
    pub resolution: [u32;2],
    pub color: [u8;3]
}

impl Default for MarkerConf {
    fn default() -> MarkerConf {
        MarkerConf {
            height: 0.3,
            focal: [500.0,400.0],
            resolution: [640,480],
            color: [0,0,255]
        }
    }
}

pub fn load_runtime_conf(root: &Path) -> Result<RuntimeConf> {
    let path = root.join(RUNTIME_CONF_FILE);
    match path.is_file() {
        true => {
            let contents = fs::read_to_string(&path).map_err(|source| VisError::io(&path, source))?;
            serde_yaml::from_str(&contents).map_err(|source| VisError::Config { path, source })
        },
        false => Ok(RuntimeConf::default())
    }
}
