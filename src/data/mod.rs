//! Data module - dataset discovery, CSV loading and filtering

mod loader;
mod processor;
mod scanner;

pub use loader::{DataLoader, GeneRow, LoaderError, TumorDataset, GENE_SYMBOL_COLUMN, PCC_COLUMN};
pub use processor::{DataProcessor, GeneEntry, GeneIndex, TumorHit};
pub use scanner::{scan_data_dir, DatasetSource, TumorType, TUMOR_FILE_SUFFIX};
