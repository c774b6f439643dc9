extern crate nalgebra as na;

use na::{Isometry3, Matrix4, Point3, Vector3};
use crate::numerics::pose;
use crate::sensors::camera::perspective::Perspective;
use crate::{Float, MarkerConf, RenderConf};

/// Apex at the camera center, then the four corners of the image plane.
pub const MARKER_SEGMENTS: [(usize,usize);8] = [(0,1),(0,2),(0,3),(0,4),(1,2),(2,3),(3,4),(4,1)];

/**
 * Wireframe pyramid depicting a camera. The camera looks down its -Z axis,
 * the base is `height` in front of the apex and spans the camera's field of view.
 */
#[derive(Debug,Clone)]
pub struct CameraMarker {
    pub vertices: [Point3<Float>;5],
    pub color: [u8;3],
    pub transform: Matrix4<Float>
}

impl CameraMarker {
    pub fn new(camera: &Perspective, height: Float, color: [u8;3]) -> CameraMarker {
        let (fov_x, fov_y) = camera.fov();
        let x = height*(fov_x.to_radians()/2.0).tan();
        let y = height*(fov_y.to_radians()/2.0).tan();
        let z = height;

        let vertices = [Point3::<Float>::origin(),
                        Point3::<Float>::new(-x,-y,-z),
                        Point3::<Float>::new(x,-y,-z),
                        Point3::<Float>::new(x,y,-z),
                        Point3::<Float>::new(-x,y,-z)];

        CameraMarker{vertices, color, transform: Matrix4::<Float>::identity()}
    }

    pub fn from_conf(conf: &MarkerConf) -> CameraMarker {
        let camera = Perspective::from_focal(conf.resolution[0], conf.resolution[1], conf.focal[0], conf.focal[1]);
        CameraMarker::new(&camera, conf.height, conf.color)
    }

    pub fn apply_transform(&mut self, transform: &Matrix4<Float>) {
        self.transform = transform*self.transform;
    }

    pub fn world_segments(&self) -> Vec<(Point3<Float>,Point3<Float>)> {
        let world = self.vertices.iter().map(|v| self.transform.transform_point(v)).collect::<Vec<Point3<Float>>>();
        MARKER_SEGMENTS.iter().map(|&(a,b)| (world[a],world[b])).collect()
    }
}

#[derive(Debug,Clone)]
pub struct PointCloud {
    pub points: Vec<Point3<Float>>
}

impl PointCloud {
    pub fn new(points: Vec<Point3<Float>>) -> PointCloud {
        PointCloud{points}
    }
}

/**
 * `pose` is camera to world, OpenGL convention: the camera looks down -Z with +Y up.
 */
#[derive(Debug,Clone)]
pub struct SceneCamera {
    pub intrinsics: Perspective,
    pub z_near: Float,
    pub z_far: Float,
    pub pose: Isometry3<Float>
}

impl SceneCamera {
    pub fn new(intrinsics: Perspective, z_near: Float, z_far: Float) -> SceneCamera {
        SceneCamera{intrinsics, z_near, z_far, pose: Isometry3::<Float>::identity()}
    }

    pub fn from_conf(conf: &RenderConf) -> SceneCamera {
        SceneCamera::new(Perspective::from_fov(conf.width, conf.height, conf.fov[0], conf.fov[1]), conf.z_near, conf.z_far)
    }

    /// World point in the camera frame, +Z pointing into the scene
    pub fn to_camera_frame(&self, point: &Point3<Float>) -> Vector3<Float> {
        let p = self.pose.inverse_transform_point(point);
        Vector3::<Float>::new(p.x, -p.y, -p.z)
    }
}

#[derive(Debug,Clone,Copy)]
pub struct SceneStyle {
    pub background: [u8;3],
    pub point_color: [u8;3],
    pub point_radius: u32,
    pub line_width: u32
}

impl SceneStyle {
    pub fn from_conf(conf: &RenderConf) -> SceneStyle {
        SceneStyle {
            background: conf.background,
            point_color: conf.point_color,
            point_radius: conf.point_radius,
            line_width: conf.line_width
        }
    }
}

#[derive(Debug,Clone)]
pub struct Scene {
    pub point_cloud: PointCloud,
    pub marker: CameraMarker,
    pub camera: SceneCamera,
    pub style: SceneStyle
}

impl Scene {
    pub fn new(point_cloud: PointCloud, marker: CameraMarker, camera: SceneCamera, style: SceneStyle) -> Scene {
        Scene{point_cloud, marker, camera, style}
    }

    pub fn set_camera(&mut self, distance: Float, angles: &[Float;3], center: &[Float;3]) {
        self.camera.pose = pose::orbit_pose(distance, angles, &Vector3::<Float>::new(center[0],center[1],center[2]));
    }
}
