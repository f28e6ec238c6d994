//! Collaborator interfaces for the host application.
//!
//! The arrange operation never sees host types. It talks to the document
//! through [`SceneGraph`] and to the user through [`PluginUi`]; the WASM
//! bindings implement both on top of the design tool's plugin API, and
//! [`memory`] provides an in-memory document for tests and host-less runs.
//!
//! All calls are synchronous and happen on the host's single plugin thread.

pub mod memory;

use crate::geometry::{BoundingBox, Transform};
use crate::Point2D;
use std::fmt;
use thiserror::Error;

pub use memory::{MemoryScene, NodeId, RecordingUi, UiEvent};

/// Failure reported by the host while reading or mutating the document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SceneError {
    /// The host rejected the call.
    #[error("host error: {0}")]
    Host(String),

    /// A node handle no longer refers to a node in the document.
    #[error("node not found: {0}")]
    MissingNode(String),

    /// Grouping was requested with no nodes.
    #[error("cannot group an empty set of nodes")]
    EmptyGroup,
}

/// The host document as seen by the arrange operation.
pub trait SceneGraph {
    /// Handle to a node in the host document.
    type Node: Clone + fmt::Debug;

    /// Currently selected nodes, in selection order. Read fresh on every call.
    fn selection(&self) -> Result<Vec<Self::Node>, SceneError>;

    /// Parent of `node`, or `None` for a top-level node.
    fn parent(&self, node: &Self::Node) -> Result<Option<Self::Node>, SceneError>;

    /// The page currently shown, used when a node has no parent.
    fn current_page(&self) -> Result<Self::Node, SceneError>;

    /// Structural and visual copy of `node`.
    fn clone_node(&mut self, node: &Self::Node) -> Result<Self::Node, SceneError>;

    /// Move `child` to the end of `parent`'s children.
    fn append_child(&mut self, parent: &Self::Node, child: &Self::Node) -> Result<(), SceneError>;

    /// Current geometry of `node`.
    fn bounding_box(&self, node: &Self::Node) -> Result<BoundingBox, SceneError>;

    fn set_position(&mut self, node: &Self::Node, position: Point2D) -> Result<(), SceneError>;

    /// Assign the node's transform relative to its parent.
    fn set_relative_transform(
        &mut self,
        node: &Self::Node,
        transform: &Transform,
    ) -> Result<(), SceneError>;

    /// Bundle `nodes` into a new group inside `parent` and return the group.
    fn group(&mut self, nodes: &[Self::Node], parent: &Self::Node)
        -> Result<Self::Node, SceneError>;

    /// Delete `node` from the document.
    fn remove(&mut self, node: &Self::Node) -> Result<(), SceneError>;
}

/// The plugin's user-facing surface.
pub trait PluginUi {
    /// Show the input panel. Called once when the plugin starts.
    fn show(&mut self);

    /// Fire-and-forget toast.
    fn notify(&mut self, message: &str);

    /// End the plugin session, optionally with a status message.
    fn close(&mut self, message: Option<&str>);
}
