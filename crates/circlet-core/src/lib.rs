//! Circlet Core - circular arrangement library
//!
//! This crate provides the core functionality for the Circlet design-tool
//! plugin: duplicating the selected objects around a circle, rotating every
//! copy so it faces away from the center, and grouping the result.
//!
//! # Module Structure
//!
//! - `geometry` - Pure layout and rotation math (no side effects)
//! - `scene` - Collaborator traits for the host scene graph and plugin UI,
//!   plus an in-memory scene graph
//! - `message` - Inbound panel messages and their validation
//! - `arrange` - The arrange operation that clones, places, rotates and groups
//! - `config` - Behavior switches for the arrange operation
//! - `plugin` - Message dispatch over one plugin session

pub mod arrange;
pub mod config;
pub mod geometry;
pub mod message;
pub mod plugin;
pub mod scene;

pub use arrange::{ArrangeError, ArrangeOperation, Arranged, Phase};
pub use config::{ArrangeConfig, CenterPolicy, MissingOffsetPolicy};
pub use geometry::{
    positions_around, rotation_about, selection_center, BoundingBox, CircularLayout, Placement,
    Transform,
};
pub use message::{ArrangeRequest, CreateArgs, Message, MessageError, RawMessage};
pub use plugin::Plugin;
pub use scene::{PluginUi, SceneError, SceneGraph};

/// A location in the host document's coordinate space.
///
/// Screen convention: x grows to the right, y grows downward.
#[derive(Debug, Clone, Copy, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub const ORIGIN: Point2D = Point2D { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: Point2D) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_default_is_origin() {
        assert_eq!(Point2D::default(), Point2D::ORIGIN);
    }

    #[test]
    fn test_point_distance() {
        let a = Point2D::new(0.0, 0.0);
        let b = Point2D::new(3.0, 4.0);
        assert!((a.distance(b) - 5.0).abs() < f64::EPSILON);
        assert!((b.distance(a) - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_point_serializes_as_object() {
        let json = serde_json::to_string(&Point2D::new(1.5, -2.0)).unwrap();
        assert_eq!(json, r#"{"x":1.5,"y":-2.0}"#);
    }
}
