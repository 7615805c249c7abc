//! Dataset Scanner Module
//! Discovers `<TumorType> Tumor.csv` files in the data directory.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};

/// File name suffix every tumor dataset must carry.
pub const TUMOR_FILE_SUFFIX: &str = " Tumor.csv";

/// A tumor type as named by its dataset file.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TumorType {
    /// Short code, e.g. `BRCA`.
    pub code: String,
    /// Display label, e.g. `BRCA Tumor`.
    pub label: String,
}

impl TumorType {
    pub fn from_code(code: &str) -> Self {
        Self {
            code: code.to_string(),
            label: format!("{code} Tumor"),
        }
    }

    /// Parse a dataset file name such as `BRCA Tumor.csv`.
    pub fn from_file_name(name: &str) -> Option<Self> {
        let code = name.strip_suffix(TUMOR_FILE_SUFFIX)?.trim();
        if code.is_empty() {
            return None;
        }
        Some(Self::from_code(code))
    }
}

impl std::fmt::Display for TumorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label)
    }
}

/// A discovered dataset file, not yet loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetSource {
    pub tumor: TumorType,
    pub path: PathBuf,
}

/// Scan `dir` for tumor datasets, sorted by tumor label.
///
/// A missing directory is an error; an empty one yields an empty list.
/// CSV files that do not follow the naming convention are ignored with a warning.
pub fn scan_data_dir(dir: &Path) -> Result<Vec<DatasetSource>> {
    if !dir.is_dir() {
        return Err(Error::DataDir(dir.to_path_buf()));
    }

    let entries = fs::read_dir(dir).map_err(|e| Error::io(e, dir))?;
    let mut sources = Vec::new();

    for entry in entries {
        let entry = entry.map_err(|e| Error::io(e, dir))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            warn!("Skipping file with non UTF-8 name: {}", path.display());
            continue;
        };

        match TumorType::from_file_name(name) {
            Some(tumor) => {
                info!("Discovered tumor type: {}", tumor.label);
                sources.push(DatasetSource { tumor, path });
            }
            None if name.ends_with(".csv") => {
                warn!(
                    "Ignoring {}: expected a file named '<TumorType>{}'",
                    path.display(),
                    TUMOR_FILE_SUFFIX
                );
            }
            None => debug!("Ignoring non-CSV file {}", path.display()),
        }
    }

    sources.sort_by(|a, b| a.tumor.label.cmp(&b.tumor.label));
    Ok(sources)
}
