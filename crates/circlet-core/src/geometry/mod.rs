//! Pure geometry for circular arrangements.
//!
//! Nothing in this module touches the scene graph: every function is a pure
//! function of its inputs and may be called any number of times.
//!
//! # Coordinate System
//!
//! - Angles are in degrees at the API surface and converted with `pi / 180`
//! - Screen coordinates: origin is top-left, y grows downward
//! - Angles are never normalized; 370 degrees behaves like 10 degrees through
//!   trigonometric periodicity

mod bounds;
mod layout;
mod rotation;

pub use bounds::selection_center;
pub use layout::{positions_around, CircularLayout, Placement};
pub use rotation::{rotation_about, BoundingBox, Transform};
