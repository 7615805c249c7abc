//! Attribute Mapper
//! Turns loaded tumor datasets into a styled node/edge graph.
//!
//! Steps, in order:
//! 1. filter rows below the correlation threshold (and cap per tumor)
//! 2. aggregate by gene symbol, flagging cross-tumor genes
//! 3. scale correlation into node size and edge width
//! 4. classify into risk bands (survival tree only)
//! 5. assign shapes: diamonds at 1.5x for cross-tumor genes, circles otherwise
//!
//! The output depends only on the datasets and the config.

use std::collections::BTreeMap;
use tracing::{debug, info, warn};

use super::layout::{self, Point};
use super::model::{
    gene_node_id, tumor_node_id, EdgeColor, Graph, GraphEdge, GraphNode, NodeColor, NodeFont,
    NodeRole, NodeShape, CENTRAL_NODE_ID,
};
use super::scale::{self, RiskBand, CROSS_TUMOR_SIZE_FACTOR};
use crate::config::{CrossTumorSizing, Variant, VisualConfig};
use crate::data::{DataProcessor, GeneEntry, TumorDataset, TumorHit, TumorType};
use crate::render::escape_html;

const CROSS_TUMOR_BACKGROUND: &str = "#FF9800";
const CROSS_TUMOR_BORDER: &str = "#E65100";
const NETWORK_SPOKE_COLOR: &str = "rgba(150,150,150,0.8)";

/// Build the graph for `datasets` under `config`.
pub fn map_datasets(datasets: &[TumorDataset], config: &VisualConfig) -> Graph {
    let filtered: Vec<TumorDataset> = datasets
        .iter()
        .map(|ds| {
            DataProcessor::filter_rows(ds, config.min_correlation, config.max_genes_per_tumor)
        })
        .collect();
    let index = DataProcessor::aggregate(&filtered);

    let mut graph = Graph {
        directed: config.variant.directed(),
        ..Graph::default()
    };
    graph.nodes.push(central_node(config));

    let tumors: Vec<&TumorType> = filtered
        .iter()
        .filter(|ds| {
            if ds.rows.is_empty() {
                warn!("No data for {} after filtering", ds.tumor.label);
                // The tree only branches into tumors that have genes.
                config.variant != Variant::SurvivalTree
            } else {
                true
            }
        })
        .map(|ds| &ds.tumor)
        .collect();

    let mut anchors: BTreeMap<&str, Point> = BTreeMap::new();
    for (i, tumor) in tumors.iter().enumerate() {
        let position = layout::tumor_position(i, tumors.len(), config.variant.tumor_radius());
        anchors.insert(tumor.label.as_str(), position);
        graph.nodes.push(tumor_node(tumor, position, config));
        graph.edges.push(spoke_edge(tumor, config));
    }

    for tumor in &tumors {
        let Some(&anchor) = anchors.get(tumor.label.as_str()) else {
            continue;
        };
        let genes = index.tumor_specific(tumor);
        debug!("{}: Adding {} tumor-specific genes", tumor.label, genes.len());

        for (k, gene) in genes.into_iter().enumerate() {
            let hit = &gene.hits[0];
            let position = layout::spiral_position(anchor, k);
            graph.nodes.push(specific_gene_node(gene, hit, position, config));
            graph.edges.push(gene_edge(&gene.symbol, hit, config));
        }
    }

    let mut ordinals: BTreeMap<&str, usize> = BTreeMap::new();
    for gene in index.cross_tumor() {
        let Some(strongest) = gene.strongest_hit() else {
            continue;
        };
        let Some(&anchor) = anchors.get(strongest.tumor.label.as_str()) else {
            continue;
        };
        let ordinal = ordinals.entry(strongest.tumor.label.as_str()).or_insert(0);
        let position = layout::cross_tumor_position(anchor, *ordinal);
        *ordinal += 1;

        graph.nodes.push(cross_tumor_node(gene, position, config));
        for hit in &gene.hits {
            graph.edges.push(gene_edge(&gene.symbol, hit, config));
        }
        debug!(
            "  {}: exists in {} tumor types ({})",
            gene.symbol,
            gene.hits.len(),
            gene.hits
                .iter()
                .map(|h| h.tumor.label.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
    }

    info!(
        "Mapped {} nodes and {} edges ({} variant)",
        graph.nodes.len(),
        graph.edges.len(),
        config.variant
    );
    graph
}

/// Coefficient that stands for a cross-tumor gene.
pub fn representative_pcc(gene: &GeneEntry, sizing: CrossTumorSizing) -> f64 {
    match sizing {
        CrossTumorSizing::Max => gene.max_pcc(),
        CrossTumorSizing::Mean => gene.mean_pcc(),
    }
}

fn central_node(config: &VisualConfig) -> GraphNode {
    let label = escape_html(&config.central_label);
    let (shape, title) = match config.variant {
        Variant::Network => (NodeShape::Circle, format!("{label} (Central Gene)")),
        Variant::SurvivalTree => (NodeShape::Ellipse, label),
    };
    GraphNode {
        id: CENTRAL_NODE_ID.to_string(),
        label: config.central_label.clone(),
        title,
        role: NodeRole::Central,
        shape,
        size: config.central_node_size,
        color: NodeColor::solid(config.variant.central_color()),
        border_width: 4.0,
        font: NodeFont { size: 18.0 },
        x: Some(0.0),
        y: Some(0.0),
        fixed: true,
        physics: false,
        cross_tumor: false,
    }
}

fn tumor_node(tumor: &TumorType, position: Point, config: &VisualConfig) -> GraphNode {
    let (shape, label) = match config.variant {
        Variant::Network => (NodeShape::Circle, tumor.label.clone()),
        Variant::SurvivalTree => (NodeShape::Box, tumor.code.clone()),
    };
    GraphNode {
        id: tumor_node_id(&tumor.label),
        label,
        title: escape_html(&tumor.label),
        role: NodeRole::Tumor,
        shape,
        size: config.tumor_node_size,
        color: NodeColor::solid(config.tumor_color(tumor)),
        border_width: 3.0,
        font: NodeFont { size: 14.0 },
        x: Some(position.x),
        y: Some(position.y),
        fixed: true,
        physics: false,
        cross_tumor: false,
    }
}

fn spoke_edge(tumor: &TumorType, config: &VisualConfig) -> GraphEdge {
    let (width, color, opacity) = match config.variant {
        Variant::Network => (2.0, NETWORK_SPOKE_COLOR, 0.8),
        Variant::SurvivalTree => (3.0, RiskBand::High.color(), 1.0),
    };
    GraphEdge {
        from: CENTRAL_NODE_ID.to_string(),
        to: tumor_node_id(&tumor.label),
        width,
        color: EdgeColor {
            color: color.to_string(),
            opacity,
        },
        title: None,
    }
}

fn specific_gene_node(
    gene: &GeneEntry,
    hit: &TumorHit,
    position: Point,
    config: &VisualConfig,
) -> GraphNode {
    let symbol = escape_html(&gene.symbol);
    let mut title = format!(
        "<b>{symbol}</b><br>PCC: {:.3}<br>Tumor: {}",
        hit.pcc,
        escape_html(&hit.tumor.label)
    );
    let color = if config.variant.uses_risk_bands() {
        let band = RiskBand::classify(hit.pcc);
        title.push_str(&format!("<br>Risk Level: {}", band.label()));
        band.color()
    } else {
        config.tumor_color(&hit.tumor)
    };
    for (name, value) in &hit.extra {
        title.push_str(&format!("<br>{}: {}", escape_html(name), escape_html(value)));
    }

    GraphNode {
        id: gene_node_id(&gene.symbol),
        label: gene.symbol.clone(),
        title,
        role: NodeRole::Gene,
        shape: NodeShape::Circle,
        size: scale::node_size(hit.pcc, config),
        color: NodeColor::solid(color),
        border_width: 1.0,
        font: NodeFont {
            size: gene_font_size(config.variant, false),
        },
        x: Some(position.x),
        y: Some(position.y),
        fixed: false,
        physics: true,
        cross_tumor: false,
    }
}

fn cross_tumor_node(gene: &GeneEntry, position: Point, config: &VisualConfig) -> GraphNode {
    let pcc = representative_pcc(gene, config.cross_tumor_sizing);
    let mut title = format!(
        "<b>{}</b><br>Cross-tumor gene (in {} tumors)",
        escape_html(&gene.symbol),
        gene.hits.len()
    );
    for hit in &gene.hits {
        title.push_str(&format!(
            "<br>{}: PCC={:.3}",
            escape_html(&hit.tumor.label),
            hit.pcc
        ));
    }

    let color = if config.variant.uses_risk_bands() {
        let band = RiskBand::classify(pcc);
        title.push_str(&format!("<br>Risk Level: {}", band.label()));
        NodeColor::solid(band.color())
    } else {
        NodeColor {
            background: CROSS_TUMOR_BACKGROUND.to_string(),
            border: CROSS_TUMOR_BORDER.to_string(),
        }
    };

    GraphNode {
        id: gene_node_id(&gene.symbol),
        label: gene.symbol.clone(),
        title,
        role: NodeRole::Gene,
        shape: NodeShape::Diamond,
        size: scale::node_size(pcc, config) * CROSS_TUMOR_SIZE_FACTOR,
        color,
        border_width: 2.0,
        font: NodeFont {
            size: gene_font_size(config.variant, true),
        },
        x: Some(position.x),
        y: Some(position.y),
        fixed: false,
        physics: true,
        cross_tumor: true,
    }
}

fn gene_edge(symbol: &str, hit: &TumorHit, config: &VisualConfig) -> GraphEdge {
    let (color, opacity) = if config.variant.uses_risk_bands() {
        (RiskBand::classify(hit.pcc).color(), 0.8)
    } else {
        (config.tumor_color(&hit.tumor), 0.6)
    };
    GraphEdge {
        from: tumor_node_id(&hit.tumor.label),
        to: gene_node_id(symbol),
        width: scale::edge_width(hit.pcc, config),
        color: EdgeColor {
            color: color.to_string(),
            opacity,
        },
        title: Some(format!(
            "{} - {}: PCC={:.3}",
            escape_html(&hit.tumor.label),
            escape_html(symbol),
            hit.pcc
        )),
    }
}

fn gene_font_size(variant: Variant, cross_tumor: bool) -> f64 {
    match (variant, cross_tumor) {
        (Variant::Network, false) => 6.0,
        (Variant::Network, true) => 7.0,
        (Variant::SurvivalTree, _) => 10.0,
    }
}
