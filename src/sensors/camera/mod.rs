extern crate nalgebra as na;

use na::{Point2, Vector3};
use crate::Float;

pub mod perspective;

/**
 * Positions are given in the camera frame with +Z pointing into the scene.
 */
pub trait Camera {
    fn project(&self, position: &Vector3<Float>) -> Option<Point2<Float>>;
}
