extern crate nalgebra as na;

use na::{Matrix3, Point2, Vector3};
use crate::sensors::camera::Camera;
use crate::Float;

#[derive(Debug,Copy,Clone)]
pub struct Perspective {
    pub projection: Matrix3<Float>,
    pub width: u32,
    pub height: u32
}

impl Perspective {
    pub fn new(fx: Float, fy: Float, cx: Float, cy: Float, width: u32, height: u32) -> Perspective {
        let projection = Matrix3::<Float>::new(fx, 0.0, cx,
                                               0.0, fy, cy,
                                               0.0, 0.0, 1.0);

        Perspective{projection,width,height}
    }

    /**
     * Principal point at the image center. Field of view is given in degrees.
     */
    pub fn from_fov(width: u32, height: u32, fov_x: Float, fov_y: Float) -> Perspective {
        let cx = width as Float/2.0;
        let cy = height as Float/2.0;
        let fx = cx/(fov_x.to_radians()/2.0).tan();
        let fy = cy/(fov_y.to_radians()/2.0).tan();
        Perspective::new(fx, fy, cx, cy, width, height)
    }

    pub fn from_focal(width: u32, height: u32, fx: Float, fy: Float) -> Perspective {
        Perspective::new(fx, fy, width as Float/2.0, height as Float/2.0, width, height)
    }

    /// Horizontal and vertical field of view in degrees
    pub fn fov(&self) -> (Float,Float) {
        let fov_x = 2.0*(self.width as Float/(2.0*self.get_fx())).atan();
        let fov_y = 2.0*(self.height as Float/(2.0*self.get_fy())).atan();
        (fov_x.to_degrees(),fov_y.to_degrees())
    }

    pub fn get_fx(&self) -> Float {
        self.projection[(0,0)]
    }

    pub fn get_fy(&self) -> Float {
        self.projection[(1,1)]
    }
}

impl Camera for Perspective {
    fn project(&self, position: &Vector3<Float>) -> Option<Point2<Float>> {
        match position[2] {
            z if z > 0.0 => {
                let projected_coordinates = self.projection*(position/z);
                Some(Point2::<Float>::new(projected_coordinates[0],projected_coordinates[1]))
            },
            _ => None
        }
    }
}
