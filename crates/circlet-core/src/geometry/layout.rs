//! Evenly spaced placements around a circle.
//!
//! # Algorithm
//!
//! The angular step between copies is
//!
//! ```text
//! step = 360 / count + angle_offset
//! ```
//!
//! The offset is added to every step rather than once, so a non-zero offset
//! turns the ring into a spiral. Copy `i` sits at `theta = i * step`:
//!
//! ```text
//! x = cx + r * cos(theta)
//! y = cy + r * sin(theta)
//! ```

use crate::Point2D;
use serde::{Deserialize, Serialize};

/// Target position and step angle for one copy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// Where the copy's top-left is placed
    pub position: Point2D,
    /// Step angle in degrees (`i * step`)
    pub angle: f64,
}

impl Placement {
    /// Rotation the copy should end up with, in degrees.
    ///
    /// Positive step angles proceed clockwise on screen, so the copy
    /// counter-rotates by the step angle and then adds the offset.
    #[inline]
    pub fn facing(&self, angle_offset_deg: f64) -> f64 {
        -self.angle + angle_offset_deg
    }
}

/// Parameters of a circular arrangement.
///
/// The layout holds no iteration state; [`CircularLayout::iter`] may be
/// called repeatedly and always yields the same sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircularLayout {
    pub center: Point2D,
    pub radius: f64,
    pub count: u32,
    pub angle_offset_deg: f64,
}

impl CircularLayout {
    pub fn new(center: Point2D, radius: f64, count: u32, angle_offset_deg: f64) -> Self {
        Self {
            center,
            radius,
            count,
            angle_offset_deg,
        }
    }

    /// Angular increment between consecutive copies, in degrees.
    ///
    /// Infinite when `count` is zero; no placement is produced in that case.
    #[inline]
    pub fn angle_increment(&self) -> f64 {
        360.0 / self.count as f64 + self.angle_offset_deg
    }

    /// Placement of copy `index`.
    pub fn placement(&self, index: u32) -> Placement {
        let angle = index as f64 * self.angle_increment();
        let theta = angle.to_radians();
        Placement {
            position: Point2D {
                x: self.center.x + self.radius * theta.cos(),
                y: self.center.y + self.radius * theta.sin(),
            },
            angle,
        }
    }

    /// Iterate over all `count` placements in order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = Placement> + '_ {
        (0..self.count).map(move |i| self.placement(i))
    }
}

/// Compute the ordered placements of `count` copies around `center`.
///
/// Returns exactly `count` placements. A zero radius puts every copy on the
/// center.
///
/// # Example
///
/// ```
/// use circlet_core::{positions_around, Point2D};
///
/// let placements = positions_around(Point2D::ORIGIN, 100.0, 4, 0.0);
/// assert_eq!(placements.len(), 4);
/// assert!((placements[1].position.y - 100.0).abs() < 1e-9);
/// ```
pub fn positions_around(
    center: Point2D,
    radius: f64,
    count: u32,
    angle_offset_deg: f64,
) -> Vec<Placement> {
    CircularLayout::new(center, radius, count, angle_offset_deg)
        .iter()
        .collect()
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn center_strategy() -> impl Strategy<Value = Point2D> {
        (-1000.0f64..1000.0, -1000.0f64..1000.0).prop_map(|(x, y)| Point2D::new(x, y))
    }

    proptest! {
        /// Property: exactly `count` placements are produced.
        #[test]
        fn prop_length_matches_count(
            center in center_strategy(),
            radius in 0.0f64..1000.0,
            count in 1u32..200,
            offset in -720.0f64..720.0,
        ) {
            let placements = positions_around(center, radius, count, offset);
            prop_assert_eq!(placements.len(), count as usize);
        }

        /// Property: every placement lies on the circle.
        #[test]
        fn prop_points_on_circle(
            center in center_strategy(),
            radius in 0.0f64..1000.0,
            count in 1u32..64,
            offset in -720.0f64..720.0,
        ) {
            for p in positions_around(center, radius, count, offset) {
                prop_assert!((p.position.distance(center) - radius).abs() < 1e-6);
            }
        }

        /// Property: without offset, consecutive points are 360/count apart.
        #[test]
        fn prop_even_spacing_without_offset(
            center in center_strategy(),
            radius in 1.0f64..1000.0,
            count in 2u32..64,
        ) {
            let placements = positions_around(center, radius, count, 0.0);
            let expected = 360.0 / count as f64;

            for pair in placements.windows(2) {
                let (ax, ay) = (pair[0].position.x - center.x, pair[0].position.y - center.y);
                let (bx, by) = (pair[1].position.x - center.x, pair[1].position.y - center.y);
                let between = (ax * by - ay * bx).atan2(ax * bx + ay * by).to_degrees();
                let between = between.rem_euclid(360.0);
                prop_assert!(
                    (between - expected).abs() < 1e-6,
                    "spacing {} != {}", between, expected
                );
            }
        }

        /// Property: identical inputs give identical sequences.
        #[test]
        fn prop_deterministic(
            center in center_strategy(),
            radius in 0.0f64..1000.0,
            count in 1u32..64,
            offset in -720.0f64..720.0,
        ) {
            prop_assert_eq!(
                positions_around(center, radius, count, offset),
                positions_around(center, radius, count, offset)
            );
        }
    }
}
