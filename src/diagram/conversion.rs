use super::definition::{Diagram, Edge, Node, Position};
use crate::error::DiagramConversionError;
use itertools::Itertools;
use serde::Deserialize;
use serde_json::{Map, Value};

/// A trait for payloads that can be converted into a compiler `Diagram`.
///
/// This is the ingestion boundary: raw property bags are validated into typed node kinds here,
/// so nothing past this point deals with loosely typed input.
///
/// # Example
///
/// ```rust
/// use callflow::diagram::{Diagram, Edge, IntoDiagram, Node};
/// use callflow::error::DiagramConversionError;
/// use serde_json::Map;
///
/// struct Step { id: String, kind: String }
/// struct MyFlow { steps: Vec<Step> }
///
/// impl IntoDiagram for MyFlow {
///     fn into_diagram(self) -> Result<Diagram, DiagramConversionError> {
///         let nodes: Vec<Node> = self
///             .steps
///             .iter()
///             .map(|s| Node::new(s.id.clone(), s.kind.clone(), &Map::new()))
///             .collect();
///         let edges = nodes
///             .windows(2)
///             .enumerate()
///             .map(|(i, pair)| Edge::new(format!("e{i}"), pair[0].id.clone(), pair[1].id.clone()))
///             .collect();
///         Ok(Diagram::new(nodes, edges))
///     }
/// }
/// ```
pub trait IntoDiagram {
    /// Consumes the object and converts it into a compiler-ready diagram.
    fn into_diagram(self) -> Result<Diagram, DiagramConversionError>;
}

impl IntoDiagram for Diagram {
    fn into_diagram(self) -> Result<Diagram, DiagramConversionError> {
        ensure_unique_ids(&self.nodes)?;
        Ok(self)
    }
}

/// The diagram exactly as the browser editor serialises it.
#[derive(Debug, Deserialize)]
pub struct EditorDiagram {
    #[serde(default)]
    pub nodes: Vec<EditorNode>,
    #[serde(default)]
    pub edges: Vec<EditorEdge>,
}

/// Editor node. The real type tag lives in `data.type`; the top-level `type` is the
/// canvas renderer and only used when `data.type` is missing.
#[derive(Debug, Deserialize)]
pub struct EditorNode {
    pub id: String,
    #[serde(rename = "type", default)]
    pub node_type: Option<String>,
    #[serde(default)]
    pub position: Option<Position>,
    #[serde(default)]
    pub data: Option<EditorNodeData>,
    #[serde(default)]
    pub properties: Option<Map<String, Value>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct EditorNodeData {
    #[serde(rename = "type", default)]
    pub node_type: Option<String>,
    #[serde(default)]
    pub properties: Option<Map<String, Value>>,
}

#[derive(Debug, Deserialize)]
pub struct EditorEdge {
    #[serde(default)]
    pub id: Option<String>,
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub data: Option<EditorEdgeData>,
}

#[derive(Debug, Default, Deserialize)]
pub struct EditorEdgeData {
    #[serde(default)]
    pub label: Option<String>,
}

impl EditorDiagram {
    pub fn from_json(json: &str) -> Result<Self, DiagramConversionError> {
        serde_json::from_str(json).map_err(|e| DiagramConversionError::Json(e.to_string()))
    }
}

impl IntoDiagram for EditorDiagram {
    fn into_diagram(self) -> Result<Diagram, DiagramConversionError> {
        let nodes: Vec<Node> = self
            .nodes
            .into_iter()
            .map(|raw| {
                let data = raw.data.unwrap_or_default();
                let node_type = data
                    .node_type
                    .filter(|t| !t.is_empty())
                    .or(raw.node_type)
                    .unwrap_or_else(|| "unknown".to_string());
                let properties = data.properties.or(raw.properties).unwrap_or_default();
                let mut node = Node::new(raw.id, node_type, &properties);
                node.position = raw.position;
                node
            })
            .collect();
        ensure_unique_ids(&nodes)?;

        let edges = self
            .edges
            .into_iter()
            .enumerate()
            .map(|(index, raw)| Edge {
                id: raw.id.unwrap_or_else(|| format!("edge-{}", index)),
                source: raw.source,
                target: raw.target,
                label: raw
                    .data
                    .and_then(|d| d.label)
                    .or(raw.label)
                    .filter(|l| !l.is_empty()),
            })
            .collect();

        Ok(Diagram::new(nodes, edges))
    }
}

impl Diagram {
    /// Parses and converts an editor JSON payload in one step.
    pub fn from_editor_json(json: &str) -> Result<Self, DiagramConversionError> {
        EditorDiagram::from_json(json)?.into_diagram()
    }
}

fn ensure_unique_ids(nodes: &[Node]) -> Result<(), DiagramConversionError> {
    match nodes.iter().map(|n| n.id.as_str()).duplicates().next() {
        Some(id) => Err(DiagramConversionError::DuplicateNodeId(id.to_string())),
        None => Ok(()),
    }
}
