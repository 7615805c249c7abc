//! Visualization Configuration Module
//! Immutable settings for one render, layered as defaults < TOML file < CLI flags.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::data::TumorType;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("{0}")]
    Invalid(String),
}

/// Which visualization gets produced.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    /// Multi-tumor network around a central gene.
    #[default]
    Network,
    /// Poor-prognosis survival tree with risk-band coloring.
    SurvivalTree,
}

impl Variant {
    /// Page title used when none is configured.
    pub fn default_title(self, central_label: &str) -> String {
        match self {
            Variant::Network => format!("Multi-Tumor Network with {central_label} as Central Node"),
            Variant::SurvivalTree => "Survival Tree for Poor Prognosis".to_string(),
        }
    }

    pub fn default_central_label(self) -> &'static str {
        match self {
            Variant::Network => "GCH1",
            Variant::SurvivalTree => "Poor Prognosis",
        }
    }

    pub fn default_output_filename(self) -> &'static str {
        match self {
            Variant::Network => "multi_tumor_network",
            Variant::SurvivalTree => "bad_survival_tree",
        }
    }

    /// Color of the central node.
    pub fn central_color(self) -> &'static str {
        match self {
            Variant::Network => "#FF4136",
            Variant::SurvivalTree => "#E31A1C",
        }
    }

    /// Color used for tumors missing from the palette.
    pub fn fallback_color(self) -> &'static str {
        match self {
            Variant::Network => "#666666",
            Variant::SurvivalTree => "#AAAAAA",
        }
    }

    /// Distance of tumor nodes from the central node.
    pub fn tumor_radius(self) -> f64 {
        match self {
            Variant::Network => 400.0,
            Variant::SurvivalTree => 250.0,
        }
    }

    /// Genes are colored by risk band instead of tumor color.
    pub fn uses_risk_bands(self) -> bool {
        matches!(self, Variant::SurvivalTree)
    }

    pub fn directed(self) -> bool {
        matches!(self, Variant::SurvivalTree)
    }

    pub fn default_palette(self) -> BTreeMap<String, String> {
        let entries: &[(&str, &str)] = match self {
            Variant::Network => &NETWORK_PALETTE[..],
            Variant::SurvivalTree => &TREE_PALETTE[..],
        };
        entries
            .iter()
            .map(|(code, color)| (code.to_string(), color.to_string()))
            .collect()
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Variant::Network => write!(f, "network"),
            Variant::SurvivalTree => write!(f, "survival-tree"),
        }
    }
}

const NETWORK_PALETTE: [(&str, &str); 11] = [
    ("ACC", "#3D9970"),  // Green
    ("BRCA", "#0074D9"), // Blue
    ("ESCA", "#FF851B"), // Orange
    ("GBM", "#B10DC9"),  // Purple
    ("KICH", "#FF4081"), // Pink
    ("LGG", "#2ECC40"),  // Light green
    ("PCPG", "#F012BE"), // Magenta
    ("TGCT", "#01FF70"), // Lime
    ("SARC", "#85144b"), // Maroon
    ("OV", "#FFDC00"),   // Yellow
    ("BLCA", "#39CCCC"), // Teal
];

const TREE_PALETTE: [(&str, &str); 8] = [
    ("ACC", "#1F77B4"),
    ("BRCA", "#FF7F0E"),
    ("ESCA", "#2CA02C"),
    ("GBM", "#D62728"),
    ("KICH", "#9467BD"),
    ("LGG", "#8C564B"),
    ("PCPG", "#E377C2"),
    ("TGCT", "#FFC125"),
];

/// Which per-tumor coefficient stands for a cross-tumor gene when sizing it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum CrossTumorSizing {
    #[default]
    Max,
    Mean,
}

/// Closed numeric output range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub min: f64,
    pub max: f64,
}

impl Span {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Linear interpolation, `t` in [0, 1].
    pub fn lerp(&self, t: f64) -> f64 {
        self.min + t * (self.max - self.min)
    }
}

/// Settings consumed by the attribute mapper and the page renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisualConfig {
    pub variant: Variant,
    pub data_dir: PathBuf,
    pub min_correlation: f64,
    pub max_genes_per_tumor: usize,
    pub node_size: Span,
    pub edge_width: Span,
    pub central_node_size: f64,
    pub tumor_node_size: f64,
    pub cross_tumor_sizing: CrossTumorSizing,
    pub central_label: String,
    pub title: String,
    /// Tumor code (or full label) -> `#RRGGBB`.
    pub palette: BTreeMap<String, String>,
    pub output_dir: PathBuf,
    pub output_filename: String,
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self::for_variant(Variant::default())
    }
}

impl VisualConfig {
    pub fn for_variant(variant: Variant) -> Self {
        Self {
            variant,
            data_dir: PathBuf::from("data"),
            min_correlation: 0.5,
            max_genes_per_tumor: 1000,
            node_size: Span::new(8.0, 16.0),
            edge_width: Span::new(0.5, 2.5),
            central_node_size: 45.0,
            tumor_node_size: 30.0,
            cross_tumor_sizing: CrossTumorSizing::default(),
            central_label: variant.default_central_label().to_string(),
            title: variant.default_title(variant.default_central_label()),
            palette: variant.default_palette(),
            output_dir: PathBuf::from("output"),
            output_filename: variant.default_output_filename().to_string(),
        }
    }

    /// Build the final config from an optional TOML file and CLI overrides.
    pub fn resolve(
        config_path: Option<&Path>,
        overrides: &ConfigOverrides,
    ) -> Result<Self, ConfigError> {
        let file = match config_path {
            Some(path) => ConfigFile::load(path)?,
            None => ConfigFile::default(),
        };

        let variant = overrides.variant.or(file.variant).unwrap_or_default();
        let mut config = Self::for_variant(variant);
        file.apply(&mut config);
        overrides.apply(&mut config);
        if file.title.is_none() {
            config.title = variant.default_title(&config.central_label);
        }
        config.validate()?;
        Ok(config)
    }

    /// Palette color for a tumor, looked up by code first, then by full label.
    pub fn tumor_color(&self, tumor: &TumorType) -> &str {
        self.palette
            .get(&tumor.code)
            .or_else(|| self.palette.get(&tumor.label))
            .map(String::as_str)
            .unwrap_or_else(|| self.variant.fallback_color())
    }

    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}.html", self.output_filename))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.min_correlation.is_finite() || !(-1.0..=1.0).contains(&self.min_correlation) {
            return Err(ConfigError::Invalid(format!(
                "min_correlation must be within [-1, 1], got {}",
                self.min_correlation
            )));
        }
        validate_span("node_size", &self.node_size)?;
        validate_span("edge_width", &self.edge_width)?;
        for (name, value) in [
            ("central_node_size", self.central_node_size),
            ("tumor_node_size", self.tumor_node_size),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        if self.max_genes_per_tumor == 0 {
            return Err(ConfigError::Invalid(
                "max_genes_per_tumor must be at least 1".to_string(),
            ));
        }
        for (tumor, color) in &self.palette {
            if !is_hex_color(color) {
                return Err(ConfigError::Invalid(format!(
                    "palette color for {tumor} must look like #RRGGBB, got '{color}'"
                )));
            }
        }
        if self.output_filename.is_empty()
            || self.output_filename.contains(['/', '\\'])
        {
            return Err(ConfigError::Invalid(format!(
                "output_filename must be a plain file stem, got '{}'",
                self.output_filename
            )));
        }
        Ok(())
    }
}

fn validate_span(name: &str, span: &Span) -> Result<(), ConfigError> {
    if !span.min.is_finite() || !span.max.is_finite() || span.min < 0.0 || span.min > span.max {
        return Err(ConfigError::Invalid(format!(
            "{name} range must satisfy 0 <= min <= max, got {}..{}",
            span.min, span.max
        )));
    }
    Ok(())
}

fn is_hex_color(color: &str) -> bool {
    color.len() == 7
        && color.starts_with('#')
        && color[1..].chars().all(|c| c.is_ascii_hexdigit())
}

/// On-disk TOML layer. Every field is optional; `palette` entries are merged
/// over the variant's default palette.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub variant: Option<Variant>,
    pub data_dir: Option<PathBuf>,
    pub min_correlation: Option<f64>,
    pub max_genes_per_tumor: Option<usize>,
    pub node_size: Option<Span>,
    pub edge_width: Option<Span>,
    pub central_node_size: Option<f64>,
    pub tumor_node_size: Option<f64>,
    pub cross_tumor_sizing: Option<CrossTumorSizing>,
    pub central_label: Option<String>,
    pub title: Option<String>,
    pub palette: BTreeMap<String, String>,
    pub output_dir: Option<PathBuf>,
    pub output_filename: Option<String>,
}

impl ConfigFile {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    fn apply(&self, config: &mut VisualConfig) {
        if let Some(dir) = &self.data_dir {
            config.data_dir = dir.clone();
        }
        if let Some(v) = self.min_correlation {
            config.min_correlation = v;
        }
        if let Some(v) = self.max_genes_per_tumor {
            config.max_genes_per_tumor = v;
        }
        if let Some(span) = self.node_size {
            config.node_size = span;
        }
        if let Some(span) = self.edge_width {
            config.edge_width = span;
        }
        if let Some(v) = self.central_node_size {
            config.central_node_size = v;
        }
        if let Some(v) = self.tumor_node_size {
            config.tumor_node_size = v;
        }
        if let Some(v) = self.cross_tumor_sizing {
            config.cross_tumor_sizing = v;
        }
        if let Some(label) = &self.central_label {
            config.central_label = label.clone();
        }
        if let Some(title) = &self.title {
            config.title = title.clone();
        }
        config
            .palette
            .extend(self.palette.iter().map(|(k, v)| (k.clone(), v.clone())));
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        if let Some(name) = &self.output_filename {
            config.output_filename = name.clone();
        }
    }
}

/// Command-line layer, highest precedence.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub variant: Option<Variant>,
    pub data_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub min_correlation: Option<f64>,
    pub max_genes_per_tumor: Option<usize>,
    pub node_size_min: Option<f64>,
    pub node_size_max: Option<f64>,
    pub edge_width_min: Option<f64>,
    pub edge_width_max: Option<f64>,
    pub central_node_size: Option<f64>,
    pub tumor_node_size: Option<f64>,
    pub cross_tumor_sizing: Option<CrossTumorSizing>,
    pub central_label: Option<String>,
}

impl ConfigOverrides {
    fn apply(&self, config: &mut VisualConfig) {
        if let Some(dir) = &self.data_dir {
            config.data_dir = dir.clone();
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        if let Some(v) = self.min_correlation {
            config.min_correlation = v;
        }
        if let Some(v) = self.max_genes_per_tumor {
            config.max_genes_per_tumor = v;
        }
        if let Some(v) = self.node_size_min {
            config.node_size.min = v;
        }
        if let Some(v) = self.node_size_max {
            config.node_size.max = v;
        }
        if let Some(v) = self.edge_width_min {
            config.edge_width.min = v;
        }
        if let Some(v) = self.edge_width_max {
            config.edge_width.max = v;
        }
        if let Some(v) = self.central_node_size {
            config.central_node_size = v;
        }
        if let Some(v) = self.tumor_node_size {
            config.tumor_node_size = v;
        }
        if let Some(v) = self.cross_tumor_sizing {
            config.cross_tumor_sizing = v;
        }
        if let Some(label) = &self.central_label {
            config.central_label = label.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = VisualConfig::default();
        assert_eq!(config.variant, Variant::Network);
        assert_eq!(config.min_correlation, 0.5);
        assert_eq!(config.node_size, Span::new(8.0, 16.0));
        assert_eq!(config.edge_width, Span::new(0.5, 2.5));
        assert_eq!(config.central_node_size, 45.0);
        assert_eq!(config.tumor_node_size, 30.0);
        assert_eq!(config.output_path(), PathBuf::from("output/multi_tumor_network.html"));
        config.validate().unwrap();
    }

    #[test]
    fn tumor_color_prefers_code_then_label_then_fallback() {
        let mut config = VisualConfig::default();
        config.palette.insert("XYZ Tumor".to_string(), "#123456".to_string());

        assert_eq!(config.tumor_color(&TumorType::from_code("BRCA")), "#0074D9");
        assert_eq!(config.tumor_color(&TumorType::from_code("XYZ")), "#123456");
        assert_eq!(config.tumor_color(&TumorType::from_code("NOPE")), "#666666");
    }

    #[test]
    fn toml_layer_then_cli_layer() {
        let file = ConfigFile::parse(
            r##"
variant = "survival-tree"
min_correlation = 0.6
node_size = { min = 4, max = 12 }
title = "From file"

[palette]
BRCA = "#000000"
"##,
        )
        .unwrap();

        let mut config = VisualConfig::for_variant(file.variant.unwrap());
        file.apply(&mut config);
        let overrides = ConfigOverrides {
            min_correlation: Some(0.7),
            node_size_max: Some(20.0),
            ..Default::default()
        };
        overrides.apply(&mut config);

        assert_eq!(config.variant, Variant::SurvivalTree);
        assert_eq!(config.min_correlation, 0.7);
        assert_eq!(config.node_size, Span::new(4.0, 20.0));
        assert_eq!(config.title, "From file");
        assert_eq!(config.central_label, "Poor Prognosis");
        assert_eq!(config.palette["BRCA"], "#000000");
        assert_eq!(config.palette["GBM"], "#D62728");
    }

    #[test]
    fn unknown_toml_keys_are_rejected() {
        assert!(ConfigFile::parse("min_corelation = 0.6").is_err());
    }

    #[test]
    fn validation_rejects_bad_values() {
        let mut config = VisualConfig::default();
        config.min_correlation = 1.5;
        assert!(config.validate().is_err());

        let mut config = VisualConfig::default();
        config.node_size = Span::new(16.0, 8.0);
        assert!(config.validate().is_err());

        let mut config = VisualConfig::default();
        config.palette.insert("BRCA".to_string(), "blue".to_string());
        assert!(config.validate().is_err());

        let mut config = VisualConfig::default();
        config.output_filename = "../escape".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn resolve_without_file_uses_overrides() {
        let overrides = ConfigOverrides {
            variant: Some(Variant::SurvivalTree),
            output_dir: Some(PathBuf::from("out")),
            ..Default::default()
        };
        let config = VisualConfig::resolve(None, &overrides).unwrap();
        assert_eq!(config.output_path(), PathBuf::from("out/bad_survival_tree.html"));
    }

    #[test]
    fn default_title_follows_central_label() {
        let overrides = ConfigOverrides {
            central_label: Some("TP53".to_string()),
            ..Default::default()
        };
        let config = VisualConfig::resolve(None, &overrides).unwrap();
        assert_eq!(config.title, "Multi-Tumor Network with TP53 as Central Node");
        assert_eq!(VisualConfig::default().title, "Multi-Tumor Network with GCH1 as Central Node");
    }

    #[test]
    fn configured_title_wins_over_derived_title() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("network.toml");
        std::fs::write(&path, "title = \"Custom\"\ncentral_label = \"TP53\"\n").unwrap();

        let config = VisualConfig::resolve(Some(&path), &ConfigOverrides::default()).unwrap();
        assert_eq!(config.title, "Custom");
        assert_eq!(config.central_label, "TP53");
    }
}
