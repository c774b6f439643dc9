extern crate image as image_rs;
extern crate nalgebra as na;
extern crate plotters;

use std::io::Cursor;
use image_rs::{ImageFormat, RgbImage};
use na::{Point3, Vector3};
use plotters::prelude::*;

use crate::sensors::camera::Camera;
use crate::visualize::scene::{Scene, SceneCamera};
use crate::{Float, Result, VisError};

fn to_color(rgb: &[u8;3]) -> RGBColor {
    RGBColor(rgb[0],rgb[1],rgb[2])
}

fn render_error<E: std::fmt::Display>(error: E) -> VisError {
    VisError::Render(error.to_string())
}

fn to_pixel(camera: &SceneCamera, position: &Vector3<Float>) -> Option<(i32,i32)> {
    camera.intrinsics.project(position).map(|p| (p.x.round() as i32, p.y.round() as i32))
}

/**
 * Pixel of a world point, None if it lies outside [z_near, z_far].
 */
pub fn project_point(camera: &SceneCamera, point: &Point3<Float>) -> Option<(i32,i32)> {
    let position = camera.to_camera_frame(point);
    match position[2] {
        z if z >= camera.z_near && z <= camera.z_far => to_pixel(camera, &position),
        _ => None
    }
}

fn clip_to_halfspace<D>(a: &Vector3<Float>, b: &Vector3<Float>, distance: D) -> Option<(Vector3<Float>,Vector3<Float>)> where D: Fn(&Vector3<Float>) -> Float {
    let d_a = distance(a);
    let d_b = distance(b);
    match (d_a >= 0.0, d_b >= 0.0) {
        (true,true) => Some((*a,*b)),
        (false,false) => None,
        (true,false) => Some((*a, a + (b - a)*(d_a/(d_a - d_b)))),
        (false,true) => Some((a + (b - a)*(d_a/(d_a - d_b)), *b))
    }
}

/**
 * Clips a camera frame segment to the depth range so both ends project.
 */
pub fn clip_segment(a: &Vector3<Float>, b: &Vector3<Float>, z_near: Float, z_far: Float) -> Option<(Vector3<Float>,Vector3<Float>)> {
    let (a_near, b_near) = clip_to_halfspace(a, b, |v| v[2] - z_near)?;
    clip_to_halfspace(&a_near, &b_near, |v| z_far - v[2])
}

pub fn project_segment(camera: &SceneCamera, a: &Point3<Float>, b: &Point3<Float>) -> Option<((i32,i32),(i32,i32))> {
    let (a_clipped, b_clipped) = clip_segment(&camera.to_camera_frame(a), &camera.to_camera_frame(b), camera.z_near, camera.z_far)?;
    Some((to_pixel(camera, &a_clipped)?, to_pixel(camera, &b_clipped)?))
}

/**
 * Points first, the marker on top of them.
 */
pub fn rasterize(scene: &Scene) -> Result<RgbImage> {
    let width = scene.camera.intrinsics.width;
    let height = scene.camera.intrinsics.height;
    let style = &scene.style;
    let margin = style.point_radius as i32;
    let mut buffer = vec![0u8; (width*height*3) as usize];

    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width,height)).into_drawing_area();
        root.fill(&to_color(&style.background)).map_err(render_error)?;

        let point_style = to_color(&style.point_color).filled();
        for point in &scene.point_cloud.points {
            match project_point(&scene.camera, point) {
                Some((x,y)) if x >= -margin && y >= -margin && x < width as i32 + margin && y < height as i32 + margin => {
                    root.draw(&Circle::new((x,y), style.point_radius, point_style)).map_err(render_error)?;
                },
                _ => ()
            }
        }

        let line_style = to_color(&scene.marker.color).stroke_width(style.line_width);
        for (a,b) in scene.marker.world_segments() {
            if let Some((start,end)) = project_segment(&scene.camera, &a, &b) {
                root.draw(&PathElement::new(vec![start,end], line_style)).map_err(render_error)?;
            }
        }

        root.present().map_err(render_error)?;
    }

    RgbImage::from_raw(width, height, buffer).ok_or_else(|| VisError::Render(String::from("frame buffer does not match the image size")))
}

pub fn encode_png(image: &RgbImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::<u8>::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

pub fn render_scene(scene: &Scene) -> Result<Vec<u8>> {
    encode_png(&rasterize(scene)?)
}
