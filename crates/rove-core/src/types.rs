//! Spatial types

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// A 3D vector. +Y is up; the camera looks down -Z at zero yaw.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn from_array(arr: [f32; 3]) -> Self {
        Self {
            x: arr[0],
            y: arr[1],
            z: arr[2],
        }
    }

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Length of the XZ projection
    pub fn horizontal_length(&self) -> f32 {
        (self.x * self.x + self.z * self.z).sqrt()
    }

    /// Unit vector in the same direction. A zero vector stays zero instead of
    /// turning into NaN.
    pub fn normalized(&self) -> Self {
        let len = self.length();
        if len > 0.0 {
            Self {
                x: self.x / len,
                y: self.y / len,
                z: self.z / len,
            }
        } else {
            Self::ZERO
        }
    }

    /// Rotate about the +Y axis by `yaw` radians (right-handed).
    ///
    /// At yaw 0 this is the identity; at yaw π/2 the -Z axis maps to -X.
    pub fn rotate_y(&self, yaw: f32) -> Self {
        let (sin, cos) = yaw.sin_cos();
        Self {
            x: self.x * cos + self.z * sin,
            y: self.y,
            z: -self.x * sin + self.z * cos,
        }
    }

    /// Same vector with its Y component replaced
    pub fn with_y(self, y: f32) -> Self {
        Self { y, ..self }
    }
}

impl Add for Vec3 {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl Sub for Vec3 {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl Mul<f32> for Vec3 {
    type Output = Self;
    fn mul(self, scalar: f32) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
            z: self.z * scalar,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn test_vec3_operations() {
        let v1 = Vec3::new(1.0, 2.0, 3.0);
        let v2 = Vec3::new(4.0, 5.0, 6.0);

        assert_eq!(v1 + v2, Vec3::new(5.0, 7.0, 9.0));
        assert_eq!(v2 - v1, Vec3::new(3.0, 3.0, 3.0));
        assert_eq!(v1 * 2.0, Vec3::new(2.0, 4.0, 6.0));
    }

    #[test]
    fn test_normalize_zero_stays_zero() {
        let n = Vec3::ZERO.normalized();
        assert_eq!(n, Vec3::ZERO);
        assert!(!n.x.is_nan());
    }

    #[test]
    fn test_rotate_y_quarter_turn() {
        let forward = Vec3::new(0.0, 0.0, -1.0);
        assert!(approx(forward.rotate_y(0.0), forward));
        assert!(approx(forward.rotate_y(FRAC_PI_2), Vec3::new(-1.0, 0.0, 0.0)));
        assert!(approx(forward.rotate_y(PI), Vec3::new(0.0, 0.0, 1.0)));
    }

    #[test]
    fn test_rotate_y_preserves_length_and_height() {
        let v = Vec3::new(3.0, 7.0, -4.0);
        for i in 0..64 {
            let yaw = i as f32 * (2.0 * PI / 64.0);
            let r = v.rotate_y(yaw);
            assert!((r.horizontal_length() - 5.0).abs() < 1e-4);
            assert_eq!(r.y, 7.0);
        }
    }
}
