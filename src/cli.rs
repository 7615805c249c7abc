//! Command-line interface definitions.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::config::{ConfigOverrides, CrossTumorSizing, Variant};

/// Render tumor/gene correlation data as an interactive network page.
#[derive(Parser, Debug)]
#[command(name = "tumor-network", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// TOML file with visualization settings
    #[arg(long, global = true, env = "TUMOR_NETWORK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build the HTML visualization from the CSV directory
    Render(RenderArgs),
    /// Open an already rendered visualization
    Open(OpenArgs),
}

#[derive(Args, Debug, Default)]
pub struct RenderArgs {
    #[arg(long, value_enum)]
    pub variant: Option<Variant>,

    /// Directory holding `<TumorType> Tumor.csv` files
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Drop rows with PCC below this value
    #[arg(long, allow_negative_numbers = true)]
    pub min_correlation: Option<f64>,

    #[arg(long)]
    pub node_size_min: Option<f64>,

    #[arg(long)]
    pub node_size_max: Option<f64>,

    #[arg(long)]
    pub edge_width_min: Option<f64>,

    #[arg(long)]
    pub edge_width_max: Option<f64>,

    #[arg(long = "central-size")]
    pub central_node_size: Option<f64>,

    #[arg(long = "tumor-size")]
    pub tumor_node_size: Option<f64>,

    /// Keep at most this many genes per tumor
    #[arg(long = "max-genes")]
    pub max_genes_per_tumor: Option<usize>,

    /// Coefficient used to size cross-tumor genes
    #[arg(long, value_enum)]
    pub cross_tumor_sizing: Option<CrossTumorSizing>,

    #[arg(long)]
    pub central_label: Option<String>,

    /// Write the page without launching a browser
    #[arg(long)]
    pub no_open: bool,
}

impl RenderArgs {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            variant: self.variant,
            data_dir: self.data_dir.clone(),
            output_dir: self.output_dir.clone(),
            min_correlation: self.min_correlation,
            max_genes_per_tumor: self.max_genes_per_tumor,
            node_size_min: self.node_size_min,
            node_size_max: self.node_size_max,
            edge_width_min: self.edge_width_min,
            edge_width_max: self.edge_width_max,
            central_node_size: self.central_node_size,
            tumor_node_size: self.tumor_node_size,
            cross_tumor_sizing: self.cross_tumor_sizing,
            central_label: self.central_label.clone(),
        }
    }
}

#[derive(Args, Debug, Default)]
pub struct OpenArgs {
    #[arg(long, value_enum)]
    pub variant: Option<Variant>,

    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Open this file instead of the configured output path
    #[arg(long)]
    pub file: Option<PathBuf>,
}

impl OpenArgs {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            variant: self.variant,
            output_dir: self.output_dir.clone(),
            ..ConfigOverrides::default()
        }
    }
}
