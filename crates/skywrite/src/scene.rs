//! Scene nodes produced by drawing and import
//!
//! The core does not render. It keeps an arena of nodes grouped under three
//! parent containers (left-hand strokes, right-hand strokes, imported
//! content) and records every change in a queue. The renderer drains the
//! queue each frame with [`SceneNodes::take_changes`] and binds materials
//! itself.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::brush::{BrushGenerator, MeshUpdate};
use crate::style::BrushKind;
use crate::types::Chirality;

/// Stable identifier of a scene node
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u64);

/// Parent container a node is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Container {
    Left,
    Right,
    Imported,
}

impl From<Chirality> for Container {
    fn from(chirality: Chirality) -> Self {
        match chirality {
            Chirality::Left => Container::Left,
            Chirality::Right => Container::Right,
        }
    }
}

/// What a node represents
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Stroke { chirality: Chirality, brush: BrushKind },
    Imported { label: String },
}

/// A node in the drawing scene
#[derive(Debug, Clone)]
pub struct SceneNode {
    pub id: NodeId,
    pub container: Container,
    pub kind: NodeKind,
    pub visible: bool,
    /// Geometry is frozen
    pub finished: bool,
    /// Stroke geometry, attached when the stroke finishes
    stroke: Option<BrushGenerator>,
}

impl SceneNode {
    pub fn stroke(&self) -> Option<&BrushGenerator> {
        self.stroke.as_ref()
    }

    /// Mesh of a finished stroke for upload
    pub fn update(&mut self) -> Option<MeshUpdate<'_>> {
        self.stroke.as_mut().and_then(|stroke| stroke.update())
    }
}

/// Change notifications for the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneChange {
    Added(NodeId),
    GeometryChanged(NodeId),
    VisibilityChanged { id: NodeId, visible: bool },
    Removed(NodeId),
}

/// Arena of scene nodes with a change queue
#[derive(Debug, Default)]
pub struct SceneNodes {
    nodes: BTreeMap<NodeId, SceneNode>,
    next_id: u64,
    changes: Vec<SceneChange>,
}

impl SceneNodes {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate(&mut self, container: Container, kind: NodeKind, finished: bool) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(
            id,
            SceneNode {
                id,
                container,
                kind,
                visible: true,
                finished,
                stroke: None,
            },
        );
        self.changes.push(SceneChange::Added(id));
        trace!("SceneNodes: added {:?} under {:?}", id, container);
        id
    }

    /// Create an open stroke node under the hand's container
    pub fn spawn_stroke(&mut self, chirality: Chirality, brush: BrushKind) -> NodeId {
        self.allocate(
            chirality.into(),
            NodeKind::Stroke { chirality, brush },
            false,
        )
    }

    /// Create a node for imported content
    pub fn spawn_imported(&mut self, label: impl Into<String>) -> NodeId {
        self.allocate(
            Container::Imported,
            NodeKind::Imported {
                label: label.into(),
            },
            true,
        )
    }

    /// Attach finished stroke geometry to a node and freeze it.
    ///
    /// Returns false if the node does not exist.
    pub fn attach_stroke(&mut self, id: NodeId, generator: BrushGenerator) -> bool {
        let Some(node) = self.nodes.get_mut(&id) else {
            return false;
        };
        node.stroke = Some(generator);
        node.finished = true;
        self.changes.push(SceneChange::GeometryChanged(id));
        true
    }

    /// Show or hide a node. Returns false if the node does not exist.
    pub fn set_visible(&mut self, id: NodeId, visible: bool) -> bool {
        let Some(node) = self.nodes.get_mut(&id) else {
            return false;
        };
        if node.visible != visible {
            node.visible = visible;
            self.changes
                .push(SceneChange::VisibilityChanged { id, visible });
        }
        true
    }

    /// Destroy a node
    pub fn remove(&mut self, id: NodeId) -> Option<SceneNode> {
        let node = self.nodes.remove(&id)?;
        self.changes.push(SceneChange::Removed(id));
        trace!("SceneNodes: removed {:?}", id);
        Some(node)
    }

    /// Destroy every node
    pub fn clear(&mut self) {
        let ids: Vec<NodeId> = self.nodes.keys().copied().collect();
        for id in ids {
            self.remove(id);
        }
    }

    pub fn get(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(&id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.nodes.get_mut(&id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn is_visible(&self, id: NodeId) -> bool {
        self.nodes.get(&id).is_some_and(|node| node.visible)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes in creation order
    pub fn iter(&self) -> impl Iterator<Item = &SceneNode> {
        self.nodes.values()
    }

    /// Children of one container in creation order
    pub fn children(&self, container: Container) -> impl Iterator<Item = &SceneNode> {
        self.nodes
            .values()
            .filter(move |node| node.container == container)
    }

    /// Drain pending changes
    pub fn take_changes(&mut self) -> Vec<SceneChange> {
        std::mem::take(&mut self.changes)
    }

    pub fn has_changes(&self) -> bool {
        !self.changes.is_empty()
    }
}
