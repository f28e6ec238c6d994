//! Rotation of a rectangular node about its own visual center.
//!
//! Hosts usually only let a plugin assign a node's relative transform, which
//! rotates about the node's origin (its top-left corner). Rotating about the
//! center therefore needs the translation that keeps the center fixed.
//!
//! # Algorithm
//!
//! With `a = current rotation` and `t = target rotation` (radians), the box
//! center `(cx, cy) = (x + w/2, y + h/2)`:
//!
//! 1. Undo the current rotation to recover the top-left `(ox, oy)` of the
//!    unrotated reference frame:
//!    ```text
//!    ox = -cos(a)*x - sin(a)*y + sin(a)*cy + cos(a)*cx + cx - w
//!    oy =  sin(a)*x - sin(a)*cx - cos(a)*y + cos(a)*cy + cy - h
//!    ```
//! 2. Take that frame's center `(ocx, ocy) = (ox + w/2, oy + h/2)`.
//! 3. Rotate the frame by `t` about its own center:
//!    ```text
//!    nx =  cos(t)*ox + sin(t)*oy - sin(t)*ocy - cos(t)*ocx + ocx
//!    ny = -sin(t)*ox + sin(t)*ocx + cos(t)*oy - cos(t)*ocy + ocy
//!    ```
//! 4. Emit `[[cos(t), sin(t), nx], [-sin(t), cos(t), ny]]`.

use crate::Point2D;
use serde::{Deserialize, Serialize};

/// Snapshot of a node's geometry.
///
/// `x`/`y` is the top-left corner of the unrotated box and `rotation` is the
/// node's current rotation about its center, in degrees. Unknown fields are
/// ignored when deserializing from a host object.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub rotation: f64,
}

impl BoundingBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64, rotation: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            rotation,
        }
    }

    /// Top-left corner
    #[inline]
    pub fn origin(&self) -> Point2D {
        Point2D::new(self.x, self.y)
    }

    /// Center of the unrotated box
    #[inline]
    pub fn center(&self) -> Point2D {
        Point2D::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// A 2x3 affine matrix `[[a, b, tx], [c, d, ty]]`.
///
/// Serialized as the nested arrays hosts expect for a relative transform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transform(pub [[f64; 3]; 2]);

impl Transform {
    pub const IDENTITY: Transform = Transform([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);

    /// Matrix rows
    #[inline]
    pub fn rows(&self) -> &[[f64; 3]; 2] {
        &self.0
    }

    /// Translation component `(tx, ty)`
    #[inline]
    pub fn translation(&self) -> Point2D {
        Point2D::new(self.0[0][2], self.0[1][2])
    }

    /// Rotation encoded by the linear part, in degrees within `(-180, 180]`.
    pub fn rotation_degrees(&self) -> f64 {
        (-self.0[1][0]).atan2(self.0[0][0]).to_degrees()
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Compute the transform that rotates `bounds` to `target_angle_deg` about its
/// visual center.
///
/// Applying the result leaves the center where it was and sets the node's
/// rotation to `target_angle_deg`. Angles are not normalized and degenerate
/// (zero-extent) boxes are not special-cased.
///
/// # Example
///
/// ```
/// use circlet_core::{rotation_about, BoundingBox};
///
/// let bounds = BoundingBox::new(10.0, 20.0, 40.0, 30.0, 0.0);
/// let t = rotation_about(&bounds, 0.0);
/// assert!((t.translation().x - 10.0).abs() < 1e-9);
/// ```
pub fn rotation_about(bounds: &BoundingBox, target_angle_deg: f64) -> Transform {
    let BoundingBox {
        x,
        y,
        width,
        height,
        rotation,
    } = *bounds;

    let theta = target_angle_deg.to_radians();
    let origin_theta = rotation.to_radians();
    let (sin_o, cos_o) = origin_theta.sin_cos();
    let (sin_t, cos_t) = theta.sin_cos();

    let center_x = x + width / 2.0;
    let center_y = y + height / 2.0;

    // Top-left of the unrotated reference frame
    let origin_x = (-cos_o * x + y * -sin_o - center_y * -sin_o - center_x * -cos_o + center_x)
        - width;
    let origin_y = (sin_o * x + center_x * -sin_o + y * -cos_o - center_y * -cos_o + center_y)
        - height;

    let origin_center_x = origin_x + width / 2.0;
    let origin_center_y = origin_y + height / 2.0;

    let new_x = cos_t * origin_x + origin_y * sin_t - origin_center_y * sin_t
        - origin_center_x * cos_t
        + origin_center_x;
    let new_y = -sin_t * origin_x + origin_center_x * sin_t + origin_y * cos_t
        - origin_center_y * cos_t
        + origin_center_y;

    Transform([[cos_t, sin_t, new_x], [-sin_t, cos_t, new_y]])
}


// ============================================================================
// Property-Based Tests
// ============================================================================
