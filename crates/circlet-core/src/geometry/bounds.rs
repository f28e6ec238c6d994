//! Center of a multi-object selection.

use super::BoundingBox;
use crate::Point2D;

/// Center of the axis-aligned union of `boxes`.
///
/// Each box spans `[x, x + width] x [y, y + height]`; rotation is ignored.
/// Returns `None` for an empty selection.
pub fn selection_center(boxes: &[BoundingBox]) -> Option<Point2D> {
    if boxes.is_empty() {
        return None;
    }

    let mut min_x = f64::INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut max_y = f64::NEG_INFINITY;

    for b in boxes {
        min_x = min_x.min(b.x);
        min_y = min_y.min(b.y);
        max_x = max_x.max(b.x + b.width);
        max_y = max_y.max(b.y + b.height);
    }

    Some(Point2D::new((min_x + max_x) / 2.0, (min_y + max_y) / 2.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_selection() {
        assert_eq!(selection_center(&[]), None);
    }

    #[test]
    fn test_single_box_center() {
        let center = selection_center(&[BoundingBox::new(10.0, 10.0, 20.0, 40.0, 0.0)]);
        assert_eq!(center, Some(Point2D::new(20.0, 30.0)));
    }

    #[test]
    fn test_union_of_disjoint_boxes() {
        let boxes = [
            BoundingBox::new(0.0, 0.0, 10.0, 10.0, 0.0),
            BoundingBox::new(90.0, 40.0, 10.0, 10.0, 0.0),
        ];
        assert_eq!(selection_center(&boxes), Some(Point2D::new(50.0, 25.0)));
    }

    #[test]
    fn test_rotation_is_ignored() {
        let a = selection_center(&[BoundingBox::new(0.0, 0.0, 10.0, 10.0, 0.0)]);
        let b = selection_center(&[BoundingBox::new(0.0, 0.0, 10.0, 10.0, 45.0)]);
        assert_eq!(a, b);
    }
}
