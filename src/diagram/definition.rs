use super::properties::NodeKind;
use crate::graph::Graph;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The canonical call-flow diagram handed to the compiler.
///
/// A diagram is an immutable snapshot: the compiler only ever borrows it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagram {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl Diagram {
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }

    /// Builds the lookup index used by every analysis pass.
    pub fn graph(&self) -> Graph<'_> {
        Graph::new(self)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// A single typed step of the call flow.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: String,
    /// The type tag exactly as the editor sent it (e.g. `play-audio-tts`).
    pub node_type: String,
    pub position: Option<Position>,
    pub kind: NodeKind,
}

impl Node {
    /// Creates a node from its raw type tag and property bag.
    pub fn new(id: impl Into<String>, node_type: impl Into<String>, properties: &Map<String, Value>) -> Self {
        let id = id.into();
        let node_type = node_type.into();
        let kind = NodeKind::from_properties(&id, &node_type, properties);
        Self {
            id,
            node_type,
            position: None,
            kind,
        }
    }

    /// Creates a node from an already typed kind, using the kind's canonical tag.
    pub fn with_kind(id: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            node_type: kind.canonical_type().to_string(),
            position: None,
            kind,
        }
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.position = Some(Position { x, y });
        self
    }

    pub fn type_name(&self) -> &str {
        &self.node_type
    }
}

/// Canvas coordinates of a node. Irrelevant to compilation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// A directed connection between two nodes.
///
/// The optional label selects a named outcome of the source node ("Success", "timeout", ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub label: Option<String>,
}

impl Edge {
    pub fn new(id: impl Into<String>, source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            label: None,
        }
    }

    pub fn labeled(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn has_label(&self, label: &str) -> bool {
        self.label.as_deref() == Some(label)
    }
}
