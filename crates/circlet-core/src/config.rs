//! Behavior switches for the arrange operation.
//!
//! The defaults keep the plugin's established behavior for input handling
//! (a missing angle offset aborts silently) while cleaning up after host
//! faults instead of leaving orphaned clones behind. Setting
//! `rollback_on_fault` and `report_faults` to `false` gives the exact
//! historical behavior.
//!
//! All fields are optional when deserializing, so the host can pass `{}` or
//! any subset:
//!
//! ```typescript
//! const plugin = new ArrangePlugin(host, { center: "selectionBounds" });
//! ```

use serde::{Deserialize, Serialize};

/// Which point the copies are arranged around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CenterPolicy {
    /// The primary (first) selected object's own `x, y`.
    #[default]
    Primary,
    /// Centroid of the axis-aligned bounds of the whole selection.
    SelectionBounds,
}

/// What to do when the panel sends no angle offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MissingOffsetPolicy {
    /// Abort without telling the user.
    #[default]
    Ignore,
    /// Abort and notify the user.
    Report,
    /// Proceed with an offset of zero.
    Zero,
}

/// Configuration for [`crate::ArrangeOperation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ArrangeConfig {
    pub center: CenterPolicy,
    pub missing_offset: MissingOffsetPolicy,
    /// Remove already created clones when the host fails mid-operation
    pub rollback_on_fault: bool,
    /// Notify the user about host faults (they are always logged)
    pub report_faults: bool,
}

impl Default for ArrangeConfig {
    fn default() -> Self {
        Self {
            center: CenterPolicy::Primary,
            missing_offset: MissingOffsetPolicy::Ignore,
            rollback_on_fault: true,
            report_faults: true,
        }
    }
}

impl ArrangeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration matching earlier releases: faults are
    /// only logged and partial results stay in the document.
    pub fn legacy() -> Self {
        Self {
            rollback_on_fault: false,
            report_faults: false,
            ..Self::default()
        }
    }
}
