//! Graph module - attribute mapping from datasets to styled nodes and edges

pub mod layout;
mod mapper;
mod model;
pub mod scale;

pub use mapper::{map_datasets, representative_pcc};
pub use model::{
    gene_node_id, tumor_node_id, EdgeColor, Graph, GraphEdge, GraphNode, NodeColor, NodeFont,
    NodeRole, NodeShape, CENTRAL_NODE_ID, GENE_ID_PREFIX, TUMOR_ID_PREFIX,
};
pub use scale::RiskBand;
