//! Graph Statistics Module
//! Gene counts per tumor and cross-tumor totals for the end-of-run report.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use tracing::info;

use crate::graph::{Graph, NodeRole, TUMOR_ID_PREFIX};

/// Counts describing a mapped graph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphSummary {
    pub total_genes: usize,
    pub tumor_specific: usize,
    pub cross_tumor: usize,
    /// Tumor label -> number of genes attached to it. A cross-tumor gene
    /// counts once for every tumor it connects to.
    pub per_tumor: BTreeMap<String, usize>,
}

impl GraphSummary {
    pub fn from_graph(graph: &Graph) -> Self {
        let mut summary = GraphSummary::default();

        let mut tumor_labels: BTreeMap<&str, &str> = BTreeMap::new();
        for node in graph.nodes_with_role(NodeRole::Tumor) {
            let label = node.id.strip_prefix(TUMOR_ID_PREFIX).unwrap_or(&node.id);
            tumor_labels.insert(node.id.as_str(), label);
            summary.per_tumor.insert(label.to_string(), 0);
        }

        let mut gene_ids: BTreeSet<&str> = BTreeSet::new();
        for node in graph.nodes_with_role(NodeRole::Gene) {
            gene_ids.insert(node.id.as_str());
            summary.total_genes += 1;
            if node.cross_tumor {
                summary.cross_tumor += 1;
            } else {
                summary.tumor_specific += 1;
            }
        }

        for edge in &graph.edges {
            if !gene_ids.contains(edge.to.as_str()) {
                continue;
            }
            if let Some(label) = tumor_labels.get(edge.from.as_str()) {
                *summary.per_tumor.entry(label.to_string()).or_insert(0) += 1;
            }
        }

        summary
    }

    pub fn tumor_count(&self) -> usize {
        self.per_tumor.len()
    }

    /// Sum of per-tumor gene attachments.
    pub fn total_attachments(&self) -> usize {
        self.per_tumor.values().sum()
    }

    pub fn log(&self) {
        info!("Gene network statistics:");
        info!(
            "  Total genes: {} across {} tumor types",
            self.total_genes,
            self.tumor_count()
        );
        info!("  Tumor-specific genes: {}", self.tumor_specific);
        info!("  Cross-tumor genes: {}", self.cross_tumor);
        info!("  Gene-tumor links: {}", self.total_attachments());
        for (tumor, count) in &self.per_tumor {
            info!("  {}: {} genes", tumor, count);
        }
    }
}

impl fmt::Display for GraphSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Gene network statistics:")?;
        writeln!(
            f,
            "Total genes: {} across {} tumor types",
            self.total_genes,
            self.tumor_count()
        )?;
        writeln!(f, "Tumor-specific genes: {}", self.tumor_specific)?;
        writeln!(f, "Cross-tumor genes: {}", self.cross_tumor)?;
        writeln!(f, "Gene-tumor links: {}", self.total_attachments())?;
        for (tumor, count) in &self.per_tumor {
            writeln!(f, "  {}: {} genes", tumor, count)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VisualConfig;
    use crate::data::{GeneRow, TumorDataset, TumorType};
    use crate::graph::map_datasets;

    #[test]
    fn counts_specific_and_cross_tumor_genes() {
        let datasets = vec![
            TumorDataset {
                tumor: TumorType::from_code("BRCA"),
                rows: vec![GeneRow::new("GATA3", 0.87), GeneRow::new("MYC", 0.6)],
            },
            TumorDataset {
                tumor: TumorType::from_code("OV"),
                rows: vec![GeneRow::new("MYC", 0.8)],
            },
        ];
        let graph = map_datasets(&datasets, &VisualConfig::default());
        let summary = GraphSummary::from_graph(&graph);

        assert_eq!(summary.total_genes, 2);
        assert_eq!(summary.tumor_specific, 1);
        assert_eq!(summary.cross_tumor, 1);
        assert_eq!(summary.per_tumor["BRCA Tumor"], 2);
        assert_eq!(summary.per_tumor["OV Tumor"], 1);
        assert_eq!(summary.tumor_count(), 2);
        assert_eq!(summary.total_attachments(), 3);
        let report = summary.to_string();
        assert!(report.contains("Total genes: 2 across 2 tumor types"));
        assert!(report.contains("Cross-tumor genes: 1"));
        assert!(report.contains("Gene-tumor links: 3"));
    }

    #[test]
    fn spoke_edges_are_not_counted_as_genes() {
        let datasets = vec![
            TumorDataset {
                tumor: TumorType::from_code("BRCA"),
                rows: vec![GeneRow::new("GATA3", 0.87)],
            },
            TumorDataset {
                tumor: TumorType::from_code("OV"),
                rows: vec![GeneRow::new("PAX8", 0.2)],
            },
        ];
        let graph = map_datasets(&datasets, &VisualConfig::default());
        let summary = GraphSummary::from_graph(&graph);

        // OV keeps its node in the network variant but has no genes.
        assert_eq!(summary.per_tumor["OV Tumor"], 0);
        assert_eq!(summary.per_tumor["BRCA Tumor"], 1);
        assert_eq!(summary.total_attachments(), 1);
    }

    #[test]
    fn large_graph_summary_counts_every_link() {
        let tumors = ["ACC", "BRCA", "ESCA", "GBM", "KICH", "LGG", "PCPG", "TGCT", "SARC", "OV", "BLCA"];
        let datasets: Vec<TumorDataset> = tumors
            .iter()
            .map(|code| TumorDataset {
                tumor: TumorType::from_code(code),
                rows: (0..1000)
                    .map(|i| GeneRow::new(format!("{code}_G{i}"), 0.5 + (i as f64) / 4000.0))
                    .collect(),
            })
            .collect();
        let graph = map_datasets(&datasets, &VisualConfig::default());
        let summary = GraphSummary::from_graph(&graph);

        assert_eq!(summary.total_genes, 11_000);
        assert_eq!(summary.tumor_count(), 11);
        assert_eq!(summary.total_attachments(), 11_000);
        assert!(summary.per_tumor.values().all(|&n| n == 1000));
    }

    #[test]
    fn empty_graph_summary() {
        let graph = map_datasets(&[], &VisualConfig::default());
        assert_eq!(GraphSummary::from_graph(&graph), GraphSummary::default());
    }
}
