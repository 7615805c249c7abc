//! CSV Data Loader Module
//! Loads tumor correlation tables with Polars and validates their columns.

use polars::prelude::*;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::scanner::{DatasetSource, TumorType};

/// Required gene identifier column.
pub const GENE_SYMBOL_COLUMN: &str = "Gene Symbol";
/// Required Pearson correlation column.
pub const PCC_COLUMN: &str = "PCC";

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV {}: {source}", path.display())]
    Csv { path: PathBuf, source: PolarsError },
    #[error("{} is missing required column '{column}'", path.display())]
    MissingColumn { path: PathBuf, column: &'static str },
}

/// One row of a tumor dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneRow {
    pub symbol: String,
    pub pcc: f64,
    /// Any other non-empty columns, kept verbatim for tooltips.
    pub extra: BTreeMap<String, String>,
}

impl GeneRow {
    pub fn new(symbol: impl Into<String>, pcc: f64) -> Self {
        Self {
            symbol: symbol.into(),
            pcc,
            extra: BTreeMap::new(),
        }
    }
}

/// All rows loaded from one `<TumorType> Tumor.csv` file.
#[derive(Debug, Clone, PartialEq)]
pub struct TumorDataset {
    pub tumor: TumorType,
    pub rows: Vec<GeneRow>,
}

/// Loads every discovered dataset, skipping the ones that fail.
#[derive(Debug, Default)]
pub struct DataLoader {
    datasets: Vec<TumorDataset>,
    skipped: Vec<(PathBuf, String)>,
}

impl DataLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load all sources in order. Failures are logged and recorded, never fatal.
    pub fn load_all(&mut self, sources: &[DatasetSource]) -> &[TumorDataset] {
        for source in sources {
            match Self::load_csv(source) {
                Ok(dataset) => {
                    info!("{}: loaded {} rows", dataset.tumor.label, dataset.rows.len());
                    self.datasets.push(dataset);
                }
                Err(e) => {
                    warn!("Skipping {}: {}", source.tumor.label, e);
                    self.skipped.push((source.path.clone(), e.to_string()));
                }
            }
        }
        &self.datasets
    }

    /// Load a single CSV file using Polars.
    pub fn load_csv(source: &DatasetSource) -> Result<TumorDataset, LoaderError> {
        let path = &source.path;
        let path_str = path.to_string_lossy().to_string();
        let csv_err = |source| LoaderError::Csv {
            path: path.clone(),
            source,
        };

        let df = LazyCsvReader::new(&path_str)
            .with_infer_schema_length(Some(10000))
            .with_ignore_errors(true)
            .finish()
            .and_then(|lazy| lazy.collect())
            .map_err(csv_err)?;

        let rows = Self::rows_from_frame(&df, path)?;
        Ok(TumorDataset {
            tumor: source.tumor.clone(),
            rows,
        })
    }

    /// Extract gene rows from a loaded DataFrame.
    ///
    /// Rows with an empty symbol or a non-numeric PCC are dropped.
    pub fn rows_from_frame(df: &DataFrame, path: &Path) -> Result<Vec<GeneRow>, LoaderError> {
        let csv_err = |source| LoaderError::Csv {
            path: path.to_path_buf(),
            source,
        };
        let columns: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        let symbol_name = find_column(&columns, GENE_SYMBOL_COLUMN).ok_or_else(|| {
            LoaderError::MissingColumn {
                path: path.to_path_buf(),
                column: GENE_SYMBOL_COLUMN,
            }
        })?;
        let pcc_name =
            find_column(&columns, PCC_COLUMN).ok_or_else(|| LoaderError::MissingColumn {
                path: path.to_path_buf(),
                column: PCC_COLUMN,
            })?;

        let symbols = df
            .column(symbol_name)
            .and_then(|c| c.cast(&DataType::String))
            .map_err(csv_err)?;
        let symbols = symbols.str().map_err(csv_err)?;
        let pcc = df
            .column(pcc_name)
            .and_then(|c| c.cast(&DataType::Float64))
            .map_err(csv_err)?;
        let pcc = pcc.f64().map_err(csv_err)?;

        let mut extra_columns = Vec::new();
        for name in columns
            .iter()
            .filter(|c| c.as_str() != symbol_name && c.as_str() != pcc_name)
        {
            let column = df
                .column(name)
                .and_then(|c| c.cast(&DataType::String))
                .map_err(csv_err)?;
            extra_columns.push((name.trim().to_string(), column));
        }

        let mut rows = Vec::with_capacity(df.height());
        let mut dropped = 0usize;
        for i in 0..df.height() {
            let symbol = symbols.get(i).map(str::trim).filter(|s| !s.is_empty());
            let value = pcc.get(i).filter(|v| !v.is_nan());
            let (Some(symbol), Some(value)) = (symbol, value) else {
                dropped += 1;
                continue;
            };

            let mut row = GeneRow::new(symbol, value);
            for (name, column) in &extra_columns {
                if let Some(v) = column.str().ok().and_then(|ca| ca.get(i)) {
                    let v = v.trim();
                    if !v.is_empty() {
                        row.extra.insert(name.clone(), v.to_string());
                    }
                }
            }
            rows.push(row);
        }

        if dropped > 0 {
            debug!(
                "{}: dropped {} rows with missing symbol or non-numeric PCC",
                path.display(),
                dropped
            );
        }
        Ok(rows)
    }

    pub fn datasets(&self) -> &[TumorDataset] {
        &self.datasets
    }

    /// Files that could not be loaded, with the reason.
    pub fn skipped(&self) -> &[(PathBuf, String)] {
        &self.skipped
    }
}

/// Match a required header, tolerating surrounding whitespace.
fn find_column<'a>(columns: &'a [String], wanted: &str) -> Option<&'a str> {
    columns
        .iter()
        .find(|c| c.trim() == wanted)
        .map(String::as_str)
}
