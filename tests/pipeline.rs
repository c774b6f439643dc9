use std::fs;
use std::path::{Path, PathBuf};

use nalgebra as na;
use na::{Matrix4, Point3, Vector3};
use ndarray::{array, Array2};
use ndarray_npy::write_npy;
use tempfile::TempDir;

use keypoint_vis::io::keypoint_loader::load_keypoints;
use keypoint_vis::pipeline::{build_frame_scene, run};
use keypoint_vis::visualize::render::{project_point, rasterize};
use keypoint_vis::{Float, RuntimeConf, VisError};

fn setup(trajectory: &str) -> (TempDir, RuntimeConf) {
    let root = tempfile::tempdir().unwrap();
    let runtime_conf = RuntimeConf::default();
    let trajectory_path = root.path().join(&runtime_conf.trajectory_file);
    fs::create_dir_all(trajectory_path.parent().unwrap()).unwrap();
    fs::write(&trajectory_path, trajectory).unwrap();
    fs::create_dir_all(root.path().join(&runtime_conf.keypoint_dir)).unwrap();
    (root, runtime_conf)
}

fn write_keypoints(root: &Path, runtime_conf: &RuntimeConf, timestamp: &str, points: &Array2<f64>) {
    let path = root.join(&runtime_conf.keypoint_dir).join(format!("{}.npy", timestamp));
    write_npy(path, points).unwrap();
}

fn output_files(root: &Path, runtime_conf: &RuntimeConf) -> Vec<PathBuf> {
    let mut files = fs::read_dir(root.join(&runtime_conf.output_dir)).unwrap().map(|e| e.unwrap().path()).collect::<Vec<PathBuf>>();
    files.sort();
    files
}

fn sample_points() -> Array2<f64> {
    array![[0.0, 0.0, 0.0], [1.0, 0.5, -2.0], [-1.5, 1.0, 0.5]]
}

#[test]
fn test_matched_frames_render_unmatched_skip() {
    let (root, runtime_conf) = setup("# t tx ty tz qx qy qz qw\n100.5 0 0 0 0 0 0 1\n101.5 1 0 0 0 0 0.7071068 0.7071068\n");
    write_keypoints(root.path(), &runtime_conf, "100.5", &sample_points());
    write_keypoints(root.path(), &runtime_conf, "101.5", &sample_points());
    write_keypoints(root.path(), &runtime_conf, "999.0", &sample_points());

    let summary = run(root.path(), &runtime_conf).unwrap();

    let output_dir = root.path().join(&runtime_conf.output_dir);
    assert_eq!(summary.rendered, vec![output_dir.join("100.5.png"), output_dir.join("101.5.png")]);
    assert_eq!(summary.skipped, vec![String::from("999.0")]);
    assert_eq!(output_files(root.path(), &runtime_conf), summary.rendered);
    assert!(!output_dir.join("999.0.png").exists());

    let decoded = image::open(output_dir.join("100.5.png")).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (640, 480));
}

#[test]
fn test_empty_keypoint_dir_renders_nothing() {
    let (root, runtime_conf) = setup("100.5 0 0 0 0 0 0 1\n");

    let summary = run(root.path(), &runtime_conf).unwrap();

    assert!(summary.rendered.is_empty());
    assert!(summary.skipped.is_empty());
    assert!(output_files(root.path(), &runtime_conf).is_empty());
}

#[test]
fn test_comment_only_trajectory_skips_all_frames() {
    let (root, runtime_conf) = setup("# nothing tracked\n# still nothing\n");
    write_keypoints(root.path(), &runtime_conf, "100.5", &sample_points());

    let summary = run(root.path(), &runtime_conf).unwrap();

    assert!(summary.rendered.is_empty());
    assert_eq!(summary.skipped, vec![String::from("100.5")]);
    assert!(output_files(root.path(), &runtime_conf).is_empty());
}

#[test]
fn test_subdirectories_are_not_frames() {
    let (root, runtime_conf) = setup("100.5 0 0 0 0 0 0 1\n");
    fs::create_dir_all(root.path().join(&runtime_conf.keypoint_dir).join("100.5.npy")).unwrap();

    let summary = run(root.path(), &runtime_conf).unwrap();

    assert!(summary.rendered.is_empty());
    assert!(summary.skipped.is_empty());
}

#[test]
fn test_malformed_trajectory_aborts() {
    let (root, runtime_conf) = setup("100.5 0 0 0 0 0 1\n");
    write_keypoints(root.path(), &runtime_conf, "100.5", &sample_points());

    assert!(matches!(run(root.path(), &runtime_conf), Err(VisError::MalformedLine { .. })));
    assert!(!root.path().join(&runtime_conf.output_dir).join("100.5.png").exists());
}

#[test]
fn test_wrong_keypoint_shape_aborts() {
    let (root, runtime_conf) = setup("100.5 0 0 0 0 0 0 1\n");
    write_keypoints(root.path(), &runtime_conf, "100.5", &array![[0.0, 1.0], [2.0, 3.0]]);

    match run(root.path(), &runtime_conf) {
        Err(VisError::KeypointShape { shape, .. }) => assert_eq!(shape, vec![2, 2]),
        other => panic!("expected a shape error, got {:?}", other)
    }
}

#[test]
fn test_float32_keypoints_load() {
    let root = tempfile::tempdir().unwrap();
    let path = root.path().join("1.npy");
    write_npy(&path, &array![[1.0f32, 2.0, 3.0]]).unwrap();

    assert_eq!(load_keypoints(&path).unwrap(), vec![Point3::<Float>::new(1.0, 2.0, 3.0)]);
}

#[test]
fn test_identity_pose_places_marker_at_origin() {
    let runtime_conf = RuntimeConf::default();
    let points = vec![Point3::new(0.5, 0.5, 0.5); 4];

    let scene = build_frame_scene(points, &Matrix4::<Float>::identity(), &runtime_conf);

    assert_eq!(scene.marker.transform, Matrix4::<Float>::identity());
    assert_eq!(scene.marker.world_segments()[0].0, Point3::origin());
    assert_eq!(scene.point_cloud.points.len(), 4);
}

#[test]
fn test_viewpoint_ignores_frame_pose() {
    let runtime_conf = RuntimeConf::default();
    let mut pose = Matrix4::<Float>::identity();
    pose.fixed_view_mut::<3,1>(0,3).copy_from(&Vector3::new(3.0, -1.0, 2.0));

    let scene = build_frame_scene(Vec::new(), &pose, &runtime_conf);

    assert_eq!(scene.marker.transform, pose);
    assert_eq!(project_point(&scene.camera, &Point3::origin()), Some((320, 240)));
}

#[test]
fn test_origin_renders_at_image_center() {
    let runtime_conf = RuntimeConf::default();
    let mut far_away = Matrix4::<Float>::identity();
    far_away[(2,3)] = 50.0;

    let image = rasterize(&build_frame_scene(vec![Point3::origin()], &far_away, &runtime_conf)).unwrap();

    let background = image::Rgb(runtime_conf.render.background);
    assert_eq!(*image.get_pixel(320, 240), image::Rgb(runtime_conf.render.point_color));
    assert_eq!(*image.get_pixel(0, 0), background);
    assert_eq!(*image.get_pixel(639, 479), background);
}

#[test]
fn test_whole_second_timestamp_matches_float_named_file() {
    let (root, runtime_conf) = setup("1403636580.000000 0 0 0 0 0 0 1\n1403636579763555584 0 0 0 0 0 0 1\n");
    write_keypoints(root.path(), &runtime_conf, "1403636580.0", &sample_points());
    write_keypoints(root.path(), &runtime_conf, "1.4036365797635556e+18", &sample_points());

    let summary = run(root.path(), &runtime_conf).unwrap();

    let output_dir = root.path().join(&runtime_conf.output_dir);
    assert!(summary.skipped.is_empty());
    assert_eq!(summary.rendered, vec![output_dir.join("1.4036365797635556e+18.png"), output_dir.join("1403636580.0.png")]);
}

#[test]
fn test_unreadable_keypoints_abort() {
    let (root, runtime_conf) = setup("100.5 0 0 0 0 0 0 1\n");
    fs::write(root.path().join(&runtime_conf.keypoint_dir).join("100.5.npy"), b"not an array").unwrap();

    assert!(matches!(run(root.path(), &runtime_conf), Err(VisError::Keypoints { .. })));
    assert!(!root.path().join(&runtime_conf.output_dir).join("100.5.png").exists());
}
