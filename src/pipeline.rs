extern crate nalgebra as na;

use std::fs;
use std::path::{Path, PathBuf};
use na::{Matrix4, Point3};
use tracing::{debug, info};

use crate::io::{file_name, keypoint_loader, trajectory_loader};
use crate::visualize::render::render_scene;
use crate::visualize::scene::{CameraMarker, PointCloud, Scene, SceneCamera, SceneStyle};
use crate::{Float, Result, RuntimeConf, VisError};

#[derive(Debug,Clone,Default)]
pub struct RunSummary {
    pub rendered: Vec<PathBuf>,
    /// Timestamp keys without a pose
    pub skipped: Vec<String>
}

/**
 * Point cloud plus the camera marker placed at `pose`, seen from the fixed
 * orbit viewpoint. The viewpoint does not depend on the pose.
 */
pub fn build_frame_scene(points: Vec<Point3<Float>>, pose: &Matrix4<Float>, runtime_conf: &RuntimeConf) -> Scene {
    let render_conf = &runtime_conf.render;

    let mut marker = CameraMarker::from_conf(&runtime_conf.marker);
    marker.apply_transform(pose);

    let mut scene = Scene::new(PointCloud::new(points), marker, SceneCamera::from_conf(render_conf), SceneStyle::from_conf(render_conf));
    scene.set_camera(render_conf.distance, &render_conf.angles, &render_conf.center);
    scene
}

pub fn render_frame(points: Vec<Point3<Float>>, pose: &Matrix4<Float>, runtime_conf: &RuntimeConf) -> Result<Vec<u8>> {
    render_scene(&build_frame_scene(points, pose, runtime_conf))
}

pub fn run(root: &Path, runtime_conf: &RuntimeConf) -> Result<RunSummary> {
    let trajectory_path = root.join(&runtime_conf.trajectory_file);
    let keypoint_dir = root.join(&runtime_conf.keypoint_dir);
    let output_dir = root.join(&runtime_conf.output_dir);

    let trajectory = trajectory_loader::load_trajectory(&trajectory_path)?;
    info!("{} poses in {}", trajectory.len(), trajectory_path.display());

    let frame_files = keypoint_loader::list_frame_files(&keypoint_dir)?;
    fs::create_dir_all(&output_dir).map_err(|source| VisError::io(&output_dir, source))?;

    let mut summary = RunSummary::default();
    for frame_file in frame_files {
        let timestamp = keypoint_loader::timestamp_key(&file_name(&frame_file), &runtime_conf.keypoint_extension);
        let pose = match trajectory.get(&timestamp) {
            Some(pose) => pose,
            None => {
                debug!("no pose for {}, skipping", timestamp);
                summary.skipped.push(timestamp);
                continue;
            }
        };

        let points = keypoint_loader::load_keypoints(&frame_file)?;
        let point_count = points.len();
        let png = render_frame(points, pose, runtime_conf)?;

        let png_path = output_dir.join(format!("{}.png", timestamp));
        fs::write(&png_path, &png).map_err(|source| VisError::io(&png_path, source))?;
        info!("rendered {} points to {}", point_count, png_path.display());
        summary.rendered.push(png_path);
    }

    info!("--------");
    info!("rendered {} frames, skipped {} without a pose", summary.rendered.len(), summary.skipped.len());
    Ok(summary)
}
