//! Read-only analysis over a `Diagram`: start-node discovery, edge lookup and path search.
//!
//! Every query is total. Cycles, dangling edges and disconnected nodes yield `None` or an empty
//! result, never an error.

use crate::diagram::{Diagram, Edge, Node};
use ahash::{AHashMap, AHashSet};

/// A borrowed index over a diagram's nodes and edges.
pub struct Graph<'a> {
    diagram: &'a Diagram,
    nodes: AHashMap<&'a str, &'a Node>,
    outgoing: AHashMap<&'a str, Vec<&'a Edge>>,
    incoming: AHashSet<&'a str>,
}

impl<'a> Graph<'a> {
    pub fn new(diagram: &'a Diagram) -> Self {
        let mut nodes = AHashMap::with_capacity(diagram.nodes.len());
        for node in &diagram.nodes {
            // First occurrence wins, matching the order-based lookups below.
            nodes.entry(node.id.as_str()).or_insert(node);
        }

        let mut outgoing: AHashMap<&'a str, Vec<&'a Edge>> = AHashMap::new();
        let mut incoming = AHashSet::new();
        for edge in &diagram.edges {
            outgoing.entry(edge.source.as_str()).or_default().push(edge);
            incoming.insert(edge.target.as_str());
        }

        Self {
            diagram,
            nodes,
            outgoing,
            incoming,
        }
    }

    pub fn diagram(&self) -> &'a Diagram {
        self.diagram
    }

    pub fn node(&self, id: &str) -> Option<&'a Node> {
        self.nodes.get(id).copied()
    }

    /// The first node (in input order) with no incoming edge. Falls back to the first node when
    /// every node has one, and is `None` only for an empty diagram.
    pub fn start_node(&self) -> Option<&'a Node> {
        self.diagram
            .nodes
            .iter()
            .find(|n| !self.incoming.contains(n.id.as_str()))
            .or_else(|| self.diagram.nodes.first())
    }

    /// All edges leaving `node_id`, in input order.
    pub fn outgoing_edges(&self, node_id: &str) -> &[&'a Edge] {
        self.outgoing
            .get(node_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Target of the first outgoing edge, whatever its label.
    pub fn default_transition(&self, node_id: &str) -> Option<&'a str> {
        self.outgoing_edges(node_id)
            .first()
            .copied()
            .and_then(|edge| self.existing_target(edge))
    }

    /// Target of the first outgoing edge carrying `label`.
    pub fn resolve_transition(&self, node_id: &str, label: &str) -> Option<&'a str> {
        self.outgoing_edges(node_id)
            .iter()
            .find(|edge| edge.has_label(label))
            .copied()
            .and_then(|edge| self.existing_target(edge))
    }

    /// Depth-first search following edges forward from `from` to `to`.
    ///
    /// Each node is visited at most once per search, so cycles terminate. Returns the first path
    /// found (both ends included) or an empty vector when `to` is unreachable.
    pub fn find_path(&self, from: &str, to: &str) -> Vec<&'a str> {
        let Some(start) = self.node(from) else {
            return Vec::new();
        };

        let mut visited: AHashSet<&'a str> = AHashSet::new();
        visited.insert(start.id.as_str());
        // Each frame is a node on the current path plus the index of its next edge to try.
        let mut stack: Vec<(&'a str, usize)> = vec![(start.id.as_str(), 0)];

        while let Some(&(current, cursor)) = stack.last() {
            if current == to {
                return stack.into_iter().map(|(id, _)| id).collect();
            }
            match self.outgoing_edges(current).get(cursor) {
                Some(&edge) => {
                    if let Some(frame) = stack.last_mut() {
                        frame.1 += 1;
                    }
                    let next = edge.target.as_str();
                    if visited.insert(next) {
                        stack.push((next, 0));
                    }
                }
                None => {
                    stack.pop();
                }
            }
        }
        Vec::new()
    }

    /// Edge targets that do not name an existing node resolve to "no transition".
    fn existing_target(&self, edge: &'a Edge) -> Option<&'a str> {
        self.node(&edge.target).map(|n| n.id.as_str())
    }
}
