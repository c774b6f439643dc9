extern crate nalgebra as na;

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use na::{Matrix4, Vector3};
use tracing::{debug, warn};

use crate::numerics::pose;
use crate::{Float, Result, VisError};

pub const COMMENT_MARKER: char = '#';
const FIELD_COUNT: usize = 8;

/// Poses keyed by `timestamp_repr` of the parsed timestamp.
pub type TrajectoryTable = HashMap<String, Matrix4<Float>>;

pub fn load_trajectory(file_path: &Path) -> Result<TrajectoryTable> {
    let contents = fs::read_to_string(file_path).map_err(|source| VisError::io(file_path, source))?;
    let table = parse_trajectory(&contents)?;
    debug!("loaded {} poses from {}", table.len(), file_path.display());
    Ok(table)
}

/**
 * Each line: t tx ty tz qx qy qz qw
 * Only lines starting with the comment marker are skipped. Blank lines are
 * malformed unless they trail the last entry.
 */
pub fn parse_trajectory(contents: &str) -> Result<TrajectoryTable> {
    let mut table = TrajectoryTable::new();

    for (idx, line) in contents.trim_end().lines().enumerate() {
        if line.starts_with(COMMENT_MARKER) {
            continue;
        }

        let (timestamp, pose) = parse_pose_line(line, idx + 1)?;
        if table.insert(timestamp.clone(), pose).is_some() {
            warn!("duplicate timestamp {} on line {}, keeping the later pose", timestamp, idx + 1);
        }
    }

    Ok(table)
}

pub fn parse_pose_line(line: &str, line_number: usize) -> Result<(String, Matrix4<Float>)> {
    let fields = line.split_whitespace().collect::<Vec<&str>>();
    if fields.len() != FIELD_COUNT {
        return Err(VisError::malformed(line_number, line, format!("expected {} fields, found {}", FIELD_COUNT, fields.len())));
    }

    let mut values = [0.0 as Float; FIELD_COUNT];
    for (value, field) in values.iter_mut().zip(fields.iter()) {
        *value = field.parse::<Float>()
            .map_err(|_| VisError::malformed(line_number, line, format!("field {:?} is not numeric", field)))?;
    }

    let [_, tx, ty, tz, qx, qy, qz, qw] = values;
    let norm_squared = qw*qw + qx*qx + qy*qy + qz*qz;
    if !(norm_squared > 0.0) || !norm_squared.is_finite() {
        return Err(VisError::malformed(line_number, line, String::from("quaternion has no valid norm")));
    }

    let transform = pose::se3(&Vector3::<Float>::new(tx, ty, tz), &pose::from_quaternion(qw, qx, qy, qz));

    Ok((timestamp_repr(values[0]), transform))
}

/**
 * Shortest round-trip digits, `.0` on whole numbers, exponent form
 * (`1.4036365797635556e+18`, `1e-05`) when the decimal exponent is >= 16 or < -4.
 * Keypoint files are named with this rendering of the timestamp.
 */
pub fn timestamp_repr(value: Float) -> String {
    if value.is_nan() {
        return String::from("nan");
    }
    let sign = match value.is_sign_negative() {
        true => "-",
        false => ""
    };
    if value.is_infinite() {
        return format!("{}inf", sign);
    }

    let scientific = format!("{:e}", value.abs());
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((mantissa, exponent)) => (mantissa, exponent.parse::<i32>().unwrap_or(0)),
        None => (scientific.as_str(), 0)
    };
    let digits = mantissa.replace('.', "");

    let body = match exponent {
        e if e >= 16 || e < -4 => {
            let exponent_sign = if e < 0 { '-' } else { '+' };
            match digits.len() {
                1 => format!("{}e{}{:02}", digits, exponent_sign, e.abs()),
                _ => format!("{}.{}e{}{:02}", &digits[..1], &digits[1..], exponent_sign, e.abs())
            }
        },
        e if e < 0 => format!("0.{}{}", "0".repeat((-e - 1) as usize), digits),
        e => {
            let integer_len = (e + 1) as usize;
            match digits.len() {
                len if len <= integer_len => format!("{}{}.0", digits, "0".repeat(integer_len - len)),
                _ => format!("{}.{}", &digits[..integer_len], &digits[integer_len..])
            }
        }
    };

    format!("{}{}", sign, body)
}
