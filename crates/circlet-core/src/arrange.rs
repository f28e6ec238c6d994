//! The arrange operation: clone the selection around a circle and group it.
//!
//! One invocation walks through
//!
//! ```text
//! Idle -> Validating -> Executing -> Done
//!            |              |
//!            v              v
//!         Rejected        Failed
//! ```
//!
//! Validation happens before any mutation, so a rejected request leaves the
//! document untouched. Execution clones every selected object once per
//! angular step (selection order inside each step), moves each clone next to
//! the primary object, places it on the circle, rotates it about its center
//! and finally groups all clones under the primary object's parent.
//!
//! If the host fails midway, clones that were already created are removed
//! again in reverse order (unless rollback is disabled in the config).

use crate::config::{ArrangeConfig, CenterPolicy};
use crate::geometry::{rotation_about, selection_center, BoundingBox, CircularLayout};
use crate::message::{ArrangeRequest, CreateArgs};
use crate::scene::{SceneError, SceneGraph};
use crate::Point2D;
use log::{debug, warn};
use thiserror::Error;

/// Why an arrange invocation did not complete.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ArrangeError {
    #[error("radius is unset or 0.")]
    MissingRadius,

    #[error("radius must be a positive number, got {0}.")]
    InvalidRadius(f64),

    #[error("count is unset or 0.")]
    MissingCount,

    #[error("count must be a positive whole number, got {0}.")]
    InvalidCount(f64),

    #[error("angle offset is unset.")]
    MissingOffset,

    #[error("angle offset must be a finite number, got {0}.")]
    InvalidOffset(f64),

    #[error("no object selected.")]
    EmptySelection,

    /// The host failed while the document was being modified.
    #[error("failed to create objects: {source}")]
    Fault {
        source: SceneError,
        /// Number of clones removed again after the fault
        rolled_back: usize,
    },
}

impl ArrangeError {
    /// True for input problems detected before touching the document.
    pub fn is_rejection(&self) -> bool {
        !matches!(self, ArrangeError::Fault { .. })
    }
}

/// Where an invocation currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Validating,
    Executing,
    Done,
    Rejected,
    Failed,
}

/// Result of a successful arrangement.
#[derive(Debug, Clone, PartialEq)]
pub struct Arranged<N> {
    /// The new group holding every clone
    pub group: N,
    /// Clones in creation order
    pub clones: Vec<N>,
    /// Center the copies were arranged around
    pub center: Point2D,
}

/// A single arrange invocation.
#[derive(Debug, Clone)]
pub struct ArrangeOperation {
    config: ArrangeConfig,
    phase: Phase,
}

impl ArrangeOperation {
    pub fn new(config: ArrangeConfig) -> Self {
        Self {
            config,
            phase: Phase::Idle,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Validate `args` and arrange the current selection of `scene`.
    pub fn run<S: SceneGraph>(
        &mut self,
        scene: &mut S,
        args: CreateArgs,
    ) -> Result<Arranged<S::Node>, ArrangeError> {
        self.phase = Phase::Validating;

        let request = ArrangeRequest::from_args(args, &self.config).inspect_err(|_| {
            self.phase = Phase::Rejected;
        })?;

        let selection = match scene.selection() {
            Ok(selection) => selection,
            Err(source) => {
                self.phase = Phase::Failed;
                warn!("could not read selection: {}", source);
                return Err(ArrangeError::Fault {
                    source,
                    rolled_back: 0,
                });
            }
        };
        if selection.is_empty() {
            self.phase = Phase::Rejected;
            return Err(ArrangeError::EmptySelection);
        }

        self.phase = Phase::Executing;
        debug!(
            "arranging {} object(s): count={} radius={} offset={}",
            selection.len(),
            request.count,
            request.radius,
            request.angle_offset_deg
        );

        // Never pre-sized from `request.count`.
        let mut created = Vec::new();
        match self.execute(scene, &request, &selection, &mut created) {
            Ok((group, center)) => {
                self.phase = Phase::Done;
                debug!("grouped {} clone(s)", created.len());
                Ok(Arranged {
                    group,
                    clones: created,
                    center,
                })
            }
            Err(source) => {
                self.phase = Phase::Failed;
                warn!(
                    "arrange failed after {} clone(s): {}",
                    created.len(),
                    source
                );
                let rolled_back = if self.config.rollback_on_fault {
                    rollback(scene, &created)
                } else {
                    0
                };
                Err(ArrangeError::Fault {
                    source,
                    rolled_back,
                })
            }
        }
    }

    fn execute<S: SceneGraph>(
        &self,
        scene: &mut S,
        request: &ArrangeRequest,
        selection: &[S::Node],
        created: &mut Vec<S::Node>,
    ) -> Result<(S::Node, Point2D), SceneError> {
        let primary = &selection[0];
        let parent = match scene.parent(primary)? {
            Some(parent) => parent,
            None => scene.current_page()?,
        };
        let center = self.center(scene, selection)?;

        let layout = CircularLayout::new(
            center,
            request.radius,
            request.count,
            request.angle_offset_deg,
        );

        for placement in layout.iter() {
            let facing = placement.facing(request.angle_offset_deg);
            for node in selection {
                let clone = scene.clone_node(node)?;
                created.push(clone.clone());

                scene.append_child(&parent, &clone)?;
                scene.set_position(&clone, placement.position)?;

                let bounds = scene.bounding_box(&clone)?;
                scene.set_relative_transform(&clone, &rotation_about(&bounds, facing))?;
            }
        }

        let group = scene.group(&created[..], &parent)?;
        Ok((group, center))
    }

    fn center<S: SceneGraph>(
        &self,
        scene: &S,
        selection: &[S::Node],
    ) -> Result<Point2D, SceneError> {
        let primary = scene.bounding_box(&selection[0])?.origin();
        match self.config.center {
            CenterPolicy::Primary => Ok(primary),
            CenterPolicy::SelectionBounds => {
                let boxes = selection
                    .iter()
                    .map(|node| scene.bounding_box(node))
                    .collect::<Result<Vec<BoundingBox>, _>>()?;
                Ok(selection_center(&boxes).unwrap_or(primary))
            }
        }
    }
}

/// Remove `created` in reverse order, returning how many were removed.
fn rollback<S: SceneGraph>(scene: &mut S, created: &[S::Node]) -> usize {
    let mut removed = 0;
    for node in created.iter().rev() {
        match scene.remove(node) {
            Ok(()) => removed += 1,
            Err(e) => warn!("could not remove clone {:?}: {}", node, e),
        }
    }
    removed
}
