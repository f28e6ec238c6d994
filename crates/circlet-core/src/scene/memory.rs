//! In-memory scene graph and UI recorder.
//!
//! [`MemoryScene`] is a small tree of pages, shapes and groups that follows
//! the host's conventions closely enough to exercise the arrange operation
//! without a design tool:
//!
//! - a clone is created next to its original (same parent) and deep-copies
//!   its children
//! - assigning a relative transform sets the translation as the node's
//!   `x, y` and derives the rotation from the matrix
//! - grouping moves the nodes into a new group whose box is the union of
//!   theirs
//!
//! Host faults can be injected with [`MemoryScene::fail_clones_after`] and
//! [`MemoryScene::fail_grouping`].

use super::{PluginUi, SceneError, SceneGraph};
use crate::geometry::{BoundingBox, Transform};
use crate::Point2D;
use std::collections::BTreeMap;
use std::fmt;

/// Handle to a node in a [`MemoryScene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Page,
    Shape,
    Group,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MemoryNode {
    pub kind: NodeKind,
    pub name: String,
    pub bounds: BoundingBox,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

/// A document held entirely in memory.
#[derive(Debug, Clone)]
pub struct MemoryScene {
    nodes: BTreeMap<NodeId, MemoryNode>,
    next_id: u32,
    page: NodeId,
    selection: Vec<NodeId>,
    /// Number of clones allowed before `clone_node` starts failing
    clone_budget: Option<usize>,
    group_fails: bool,
}

impl Default for MemoryScene {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryScene {
    /// Create a document with a single empty page.
    pub fn new() -> Self {
        let page = NodeId(0);
        let mut nodes = BTreeMap::new();
        nodes.insert(
            page,
            MemoryNode {
                kind: NodeKind::Page,
                name: "Page 1".to_string(),
                bounds: BoundingBox::default(),
                parent: None,
                children: Vec::new(),
            },
        );
        Self {
            nodes,
            next_id: 1,
            page,
            selection: Vec::new(),
            clone_budget: None,
            group_fails: false,
        }
    }

    /// The document's only page.
    pub fn page(&self) -> NodeId {
        self.page
    }

    /// Add a shape as the last child of `parent`.
    pub fn add_shape(
        &mut self,
        parent: NodeId,
        name: &str,
        bounds: BoundingBox,
    ) -> Result<NodeId, SceneError> {
        self.insert(parent, NodeKind::Shape, name, bounds)
    }

    /// Add an empty group (a container) as the last child of `parent`.
    pub fn add_group(
        &mut self,
        parent: NodeId,
        name: &str,
        bounds: BoundingBox,
    ) -> Result<NodeId, SceneError> {
        self.insert(parent, NodeKind::Group, name, bounds)
    }

    /// Replace the current selection.
    pub fn select(&mut self, ids: &[NodeId]) {
        self.selection = ids.to_vec();
    }

    pub fn node(&self, id: NodeId) -> Option<&MemoryNode> {
        self.nodes.get(&id)
    }

    /// Children of `id`, empty for unknown nodes.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(&id)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    /// Total number of nodes, the page included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Let `n` more clones succeed, then fail every following clone.
    pub fn fail_clones_after(&mut self, n: usize) {
        self.clone_budget = Some(n);
    }

    /// Make every `group` call fail.
    pub fn fail_grouping(&mut self) {
        self.group_fails = true;
    }

    fn get(&self, id: NodeId) -> Result<&MemoryNode, SceneError> {
        self.nodes
            .get(&id)
            .ok_or_else(|| SceneError::MissingNode(id.to_string()))
    }

    fn get_mut(&mut self, id: NodeId) -> Result<&mut MemoryNode, SceneError> {
        self.nodes
            .get_mut(&id)
            .ok_or_else(|| SceneError::MissingNode(id.to_string()))
    }

    fn allocate(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }

    fn insert(
        &mut self,
        parent: NodeId,
        kind: NodeKind,
        name: &str,
        bounds: BoundingBox,
    ) -> Result<NodeId, SceneError> {
        self.get(parent)?;
        let id = self.allocate();
        self.nodes.insert(
            id,
            MemoryNode {
                kind,
                name: name.to_string(),
                bounds,
                parent: Some(parent),
                children: Vec::new(),
            },
        );
        self.get_mut(parent)?.children.push(id);
        Ok(id)
    }

    fn detach(&mut self, id: NodeId) -> Result<(), SceneError> {
        if let Some(parent) = self.get(id)?.parent {
            self.get_mut(parent)?.children.retain(|c| *c != id);
        }
        self.get_mut(id)?.parent = None;
        Ok(())
    }

    fn is_ancestor(&self, ancestor: NodeId, mut node: NodeId) -> bool {
        loop {
            if node == ancestor {
                return true;
            }
            match self.nodes.get(&node).and_then(|n| n.parent) {
                Some(parent) => node = parent,
                None => return false,
            }
        }
    }

    /// Copy `source` and its subtree; the copy is not attached anywhere.
    fn copy_subtree(&mut self, source: NodeId) -> Result<NodeId, SceneError> {
        let original = self.get(source)?.clone();
        let id = self.allocate();
        let mut children = Vec::with_capacity(original.children.len());
        for child in &original.children {
            let copy = self.copy_subtree(*child)?;
            self.get_mut(copy)?.parent = Some(id);
            children.push(copy);
        }
        self.nodes.insert(
            id,
            MemoryNode {
                children,
                parent: None,
                ..original
            },
        );
        Ok(id)
    }

    fn remove_subtree(&mut self, id: NodeId) {
        if let Some(node) = self.nodes.remove(&id) {
            for child in node.children {
                self.remove_subtree(child);
            }
        }
    }
}

impl SceneGraph for MemoryScene {
    type Node = NodeId;

    fn selection(&self) -> Result<Vec<NodeId>, SceneError> {
        Ok(self.selection.clone())
    }

    fn parent(&self, node: &NodeId) -> Result<Option<NodeId>, SceneError> {
        Ok(self.get(*node)?.parent)
    }

    fn current_page(&self) -> Result<NodeId, SceneError> {
        Ok(self.page)
    }

    fn clone_node(&mut self, node: &NodeId) -> Result<NodeId, SceneError> {
        if let Some(budget) = self.clone_budget.as_mut() {
            if *budget == 0 {
                return Err(SceneError::Host(format!("cannot clone {}", node)));
            }
            *budget -= 1;
        }

        let parent = self.get(*node)?.parent;
        let copy = self.copy_subtree(*node)?;
        if let Some(parent) = parent {
            self.append_child(&parent, &copy)?;
        }
        Ok(copy)
    }

    fn append_child(&mut self, parent: &NodeId, child: &NodeId) -> Result<(), SceneError> {
        self.get(*parent)?;
        if self.is_ancestor(*child, *parent) {
            return Err(SceneError::Host(format!(
                "cannot move {} into its own descendant {}",
                child, parent
            )));
        }
        self.detach(*child)?;
        self.get_mut(*child)?.parent = Some(*parent);
        self.get_mut(*parent)?.children.push(*child);
        Ok(())
    }

    fn bounding_box(&self, node: &NodeId) -> Result<BoundingBox, SceneError> {
        Ok(self.get(*node)?.bounds)
    }

    fn set_position(&mut self, node: &NodeId, position: Point2D) -> Result<(), SceneError> {
        let bounds = &mut self.get_mut(*node)?.bounds;
        bounds.x = position.x;
        bounds.y = position.y;
        Ok(())
    }

    fn set_relative_transform(
        &mut self,
        node: &NodeId,
        transform: &Transform,
    ) -> Result<(), SceneError> {
        let bounds = &mut self.get_mut(*node)?.bounds;
        let origin = transform.translation();
        bounds.x = origin.x;
        bounds.y = origin.y;
        bounds.rotation = transform.rotation_degrees();
        Ok(())
    }

    fn group(&mut self, nodes: &[NodeId], parent: &NodeId) -> Result<NodeId, SceneError> {
        if self.group_fails {
            return Err(SceneError::Host("grouping is not available".to_string()));
        }
        if nodes.is_empty() {
            return Err(SceneError::EmptyGroup);
        }

        let mut min_x = f64::INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut max_y = f64::NEG_INFINITY;
        for id in nodes {
            let b = self.get(*id)?.bounds;
            min_x = min_x.min(b.x);
            min_y = min_y.min(b.y);
            max_x = max_x.max(b.x + b.width);
            max_y = max_y.max(b.y + b.height);
        }

        let bounds = BoundingBox::new(min_x, min_y, max_x - min_x, max_y - min_y, 0.0);
        let group = self.insert(*parent, NodeKind::Group, "Group", bounds)?;
        for id in nodes {
            self.append_child(&group, id)?;
        }
        Ok(group)
    }

    fn remove(&mut self, node: &NodeId) -> Result<(), SceneError> {
        if *node == self.page {
            return Err(SceneError::Host("cannot remove the page".to_string()));
        }
        self.detach(*node)?;
        self.remove_subtree(*node);
        let nodes = &self.nodes;
        self.selection.retain(|id| nodes.contains_key(id));
        Ok(())
    }
}

/// Something the plugin showed to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Shown,
    Notified(String),
    Closed(Option<String>),
}

/// [`PluginUi`] that records every call in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingUi {
    pub events: Vec<UiEvent>,
}

impl RecordingUi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages passed to `notify`, in order.
    pub fn notifications(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                UiEvent::Notified(msg) => Some(msg.as_str()),
                _ => None,
            })
            .collect()
    }

    /// The close event, if the session was closed.
    pub fn closed(&self) -> Option<&Option<String>> {
        self.events.iter().find_map(|e| match e {
            UiEvent::Closed(msg) => Some(msg),
            _ => None,
        })
    }
}

impl PluginUi for RecordingUi {
    fn show(&mut self) {
        self.events.push(UiEvent::Shown);
    }

    fn notify(&mut self, message: &str) {
        self.events.push(UiEvent::Notified(message.to_string()));
    }

    fn close(&mut self, message: Option<&str>) {
        self.events.push(UiEvent::Closed(message.map(str::to_string)));
    }
}
