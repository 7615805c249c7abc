//! Graph Model
//! Node and edge descriptions handed to the vis-network backend.

use serde::Serialize;

/// Id of the single central node.
pub const CENTRAL_NODE_ID: &str = "central";

pub const TUMOR_ID_PREFIX: &str = "tumor:";
pub const GENE_ID_PREFIX: &str = "gene:";

pub fn tumor_node_id(label: &str) -> String {
    format!("{TUMOR_ID_PREFIX}{label}")
}

pub fn gene_node_id(symbol: &str) -> String {
    format!("{GENE_ID_PREFIX}{symbol}")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeRole {
    Central,
    Tumor,
    Gene,
}

/// vis-network shape names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeShape {
    #[serde(rename = "dot")]
    Circle,
    Diamond,
    Ellipse,
    Box,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeColor {
    pub background: String,
    pub border: String,
}

impl NodeColor {
    pub fn solid(color: &str) -> Self {
        Self {
            background: color.to_string(),
            border: color.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeFont {
    pub size: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    /// Tooltip markup; user text inside is already escaped.
    pub title: String,
    pub role: NodeRole,
    pub shape: NodeShape,
    pub size: f64,
    pub color: NodeColor,
    pub border_width: f64,
    pub font: NodeFont,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    /// Central and tumor nodes are pinned; genes can be dragged.
    pub fixed: bool,
    pub physics: bool,
    pub cross_tumor: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeColor {
    pub color: String,
    pub opacity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphEdge {
    pub from: String,
    pub to: String,
    pub width: f64,
    pub color: EdgeColor,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Complete node/edge description for one visualization.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Graph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
    pub directed: bool,
}

impl Graph {
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn nodes_with_role(&self, role: NodeRole) -> impl Iterator<Item = &GraphNode> {
        self.nodes.iter().filter(move |n| n.role == role)
    }

    /// Edges touching `id` on either end.
    pub fn edges_of<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a GraphEdge> {
        self.edges.iter().filter(move |e| e.from == id || e.to == id)
    }
}
