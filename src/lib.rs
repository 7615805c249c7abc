//! Tumor Network - interactive gene/tumor correlation graphs
//!
//! Reads one `<TumorType> Tumor.csv` per tumor, keeps the genes whose
//! correlation clears the threshold and writes a standalone vis-network page.

pub mod browser;
pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod graph;
pub mod render;
pub mod stats;

use std::path::PathBuf;
use tracing::{info, warn};

use crate::config::VisualConfig;
use crate::data::{scan_data_dir, DataLoader};
use crate::error::Result;
use crate::stats::GraphSummary;

/// Outcome of a successful render.
#[derive(Debug, Clone)]
pub struct RenderReport {
    pub output_path: PathBuf,
    pub summary: GraphSummary,
    /// Files that were found but could not be loaded, with the reason.
    pub skipped: Vec<(PathBuf, String)>,
}

/// Scan, load, map and write the visualization described by `config`.
pub fn render(config: &VisualConfig) -> Result<RenderReport> {
    info!("Variant: {}", config.variant);
    info!("Data directory: {}", config.data_dir.display());

    let sources = scan_data_dir(&config.data_dir)?;
    if sources.is_empty() {
        warn!("No tumor CSV files found in {}", config.data_dir.display());
    }

    let mut loader = DataLoader::new();
    loader.load_all(&sources);
    let skipped = loader.skipped().to_vec();

    let graph = graph::map_datasets(loader.datasets(), config);
    let summary = GraphSummary::from_graph(&graph);
    let output_path = render::write_page(&graph, config)?;

    Ok(RenderReport {
        output_path,
        summary,
        skipped,
    })
}
