//! Messages sent from the plugin panel.
//!
//! The panel posts plain objects of the shape
//!
//! ```typescript
//! { type: "create" | "cancel", count?: number, radius?: number, radOffset?: number }
//! ```
//!
//! They arrive as [`RawMessage`], are narrowed to the closed [`Message`] union,
//! and a create message is validated into an [`ArrangeRequest`] before
//! anything in the document is touched.

use crate::arrange::ArrangeError;
use crate::config::{ArrangeConfig, MissingOffsetPolicy};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Error decoding an inbound message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessageError {
    /// The `type` field names no known handler.
    #[error("no action found.")]
    UnknownType(String),
}

/// A message exactly as posted by the panel.
///
/// Numbers are kept as `f64` because the panel sends JavaScript numbers;
/// absent fields (or `null`/`undefined`) become `None`. The one exception is
/// an explicit `radOffset: null`, which the panel treats as an offset of 0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawMessage {
    /// Handler name; a missing `type` decodes as empty and matches nothing
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub count: Option<f64>,
    #[serde(default)]
    pub radius: Option<f64>,
    #[serde(default, rename = "radOffset", deserialize_with = "null_as_zero")]
    pub rad_offset: Option<f64>,
}

/// Only called for a present field, so absence still decodes as `None`.
fn null_as_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    Ok(Some(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0)))
}

/// Unvalidated arguments of a create message.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CreateArgs {
    pub count: Option<f64>,
    pub radius: Option<f64>,
    pub angle_offset: Option<f64>,
}

/// A decoded panel message.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Message {
    Create(CreateArgs),
    Cancel,
}

impl TryFrom<RawMessage> for Message {
    type Error = MessageError;

    fn try_from(raw: RawMessage) -> Result<Self, Self::Error> {
        match raw.kind.as_str() {
            "create" => Ok(Message::Create(CreateArgs {
                count: raw.count,
                radius: raw.radius,
                angle_offset: raw.rad_offset,
            })),
            "cancel" => Ok(Message::Cancel),
            _ => Err(MessageError::UnknownType(raw.kind)),
        }
    }
}

/// Validated arrange parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrangeRequest {
    /// Number of angular steps, at least 1
    pub count: u32,
    /// Circle radius, positive and finite
    pub radius: f64,
    /// Per-step perturbation and facing offset, in degrees
    pub angle_offset_deg: f64,
}

impl ArrangeRequest {
    /// Validate panel input.
    ///
    /// Checks run in a fixed order: radius, then count, then the angle
    /// offset. Only the first problem is reported.
    pub fn from_args(args: CreateArgs, config: &ArrangeConfig) -> Result<Self, ArrangeError> {
        let radius = match args.radius {
            None => return Err(ArrangeError::MissingRadius),
            Some(r) if r == 0.0 || r.is_nan() => return Err(ArrangeError::MissingRadius),
            Some(r) if r < 0.0 || r.is_infinite() => return Err(ArrangeError::InvalidRadius(r)),
            Some(r) => r,
        };

        let count = match args.count {
            None => return Err(ArrangeError::MissingCount),
            Some(c) if c == 0.0 || c.is_nan() => return Err(ArrangeError::MissingCount),
            Some(c) if c < 0.0 || c.fract() != 0.0 || c > u32::MAX as f64 => {
                return Err(ArrangeError::InvalidCount(c))
            }
            Some(c) => c as u32,
        };

        let angle_offset_deg = match (args.angle_offset, config.missing_offset) {
            (Some(o), _) if !o.is_finite() => return Err(ArrangeError::InvalidOffset(o)),
            (Some(o), _) => o,
            (None, MissingOffsetPolicy::Zero) => 0.0,
            (None, _) => return Err(ArrangeError::MissingOffset),
        };

        Ok(Self {
            count,
            radius,
            angle_offset_deg,
        })
    }
}
