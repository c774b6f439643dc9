extern crate nalgebra as na;

use na::{Vector3,Matrix4,Quaternion,UnitQuaternion,Isometry3,Translation3};
use crate::Float;

/**
 * Quaternion given as (w,x,y,z). Non-unit input is normalized, a zero quaternion yields NaN.
 */
pub fn from_quaternion(qw: Float, qx: Float, qy: Float, qz: Float) -> UnitQuaternion<Float> {
    UnitQuaternion::<Float>::from_quaternion(Quaternion::<Float>::new(qw,qx,qy,qz))
}

pub fn from_parts(t: &Vector3<Float>, quat: &UnitQuaternion<Float>) -> Isometry3<Float> {
    Isometry3::<Float>::from_parts(Translation3::from(*t), *quat)
}

/**
 * [R | t; 0 0 0 1]
 */
pub fn se3(t: &Vector3<Float>, quat: &UnitQuaternion<Float>) -> Matrix4<Float> {
    from_parts(t, quat).to_homogeneous()
}

/**
 * Camera to world transform of a viewer orbiting `center` at `distance`,
 * looking down its own -Z axis at the center. Angles are static xyz euler angles.
 */
pub fn orbit_pose(distance: Float, angles: &[Float;3], center: &Vector3<Float>) -> Isometry3<Float> {
    let rotation = UnitQuaternion::<Float>::from_euler_angles(angles[0],angles[1],angles[2]);
    let position = center + rotation*Vector3::<Float>::new(0.0,0.0,distance);
    from_parts(&position, &rotation)
}
