//! Data Processor Module
//! Threshold filtering, per-tumor capping and aggregation by gene symbol.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use tracing::{debug, info};

use super::loader::{GeneRow, TumorDataset};
use super::scanner::TumorType;

/// One tumor in which a gene passed the threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct TumorHit {
    pub tumor: TumorType,
    pub pcc: f64,
    pub extra: BTreeMap<String, String>,
}

/// A gene symbol and every tumor it survived filtering in.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneEntry {
    pub symbol: String,
    /// Sorted by tumor label.
    pub hits: Vec<TumorHit>,
}

impl GeneEntry {
    pub fn is_cross_tumor(&self) -> bool {
        self.hits.len() > 1
    }

    pub fn max_pcc(&self) -> f64 {
        self.hits
            .iter()
            .map(|h| h.pcc)
            .fold(f64::NEG_INFINITY, f64::max)
    }

    pub fn mean_pcc(&self) -> f64 {
        if self.hits.is_empty() {
            return f64::NAN;
        }
        self.hits.iter().map(|h| h.pcc).sum::<f64>() / self.hits.len() as f64
    }

    /// Tumor with the strongest correlation; ties go to the first label.
    pub fn strongest_hit(&self) -> Option<&TumorHit> {
        self.hits.iter().reduce(|best, h| if h.pcc > best.pcc { h } else { best })
    }
}

/// Surviving genes keyed by symbol.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeneIndex {
    genes: BTreeMap<String, GeneEntry>,
}

impl GeneIndex {
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    pub fn get(&self, symbol: &str) -> Option<&GeneEntry> {
        self.genes.get(symbol)
    }

    /// All genes in symbol order.
    pub fn iter(&self) -> impl Iterator<Item = &GeneEntry> {
        self.genes.values()
    }

    pub fn cross_tumor(&self) -> impl Iterator<Item = &GeneEntry> {
        self.iter().filter(|g| g.is_cross_tumor())
    }

    /// Genes found only in `tumor`, strongest first.
    pub fn tumor_specific(&self, tumor: &TumorType) -> Vec<&GeneEntry> {
        let mut genes: Vec<&GeneEntry> = self
            .iter()
            .filter(|g| g.hits.len() == 1 && g.hits[0].tumor == *tumor)
            .collect();
        genes.sort_by(|a, b| by_pcc_desc(a.hits[0].pcc, b.hits[0].pcc, &a.symbol, &b.symbol));
        genes
    }
}

/// Handles filtering and aggregation of loaded datasets.
pub struct DataProcessor;

impl DataProcessor {
    /// Keep rows with `pcc >= min_correlation`, strongest first, at most
    /// `max_genes` of them. Duplicate symbols keep their strongest row.
    pub fn filter_rows(
        dataset: &TumorDataset,
        min_correlation: f64,
        max_genes: usize,
    ) -> TumorDataset {
        let mut best: BTreeMap<&str, &GeneRow> = BTreeMap::new();
        for row in dataset.rows.iter().filter(|r| r.pcc >= min_correlation) {
            best.entry(row.symbol.as_str())
                .and_modify(|current| {
                    if row.pcc > current.pcc {
                        *current = row;
                    }
                })
                .or_insert(row);
        }

        let mut rows: Vec<GeneRow> = best.into_values().cloned().collect();
        rows.sort_by(|a, b| by_pcc_desc(a.pcc, b.pcc, &a.symbol, &b.symbol));
        let passed = rows.len();
        rows.truncate(max_genes);

        info!(
            "{}: Applied correlation threshold >= {}, resulting in {} rows",
            dataset.tumor.label,
            min_correlation,
            rows.len()
        );
        if passed > rows.len() {
            debug!(
                "{}: capped {} genes to the top {}",
                dataset.tumor.label, passed, max_genes
            );
        }

        TumorDataset {
            tumor: dataset.tumor.clone(),
            rows,
        }
    }

    /// Group rows of already filtered datasets by gene symbol.
    pub fn aggregate(datasets: &[TumorDataset]) -> GeneIndex {
        let mut genes: BTreeMap<String, GeneEntry> = BTreeMap::new();
        for dataset in datasets {
            for row in &dataset.rows {
                genes
                    .entry(row.symbol.clone())
                    .or_insert_with(|| GeneEntry {
                        symbol: row.symbol.clone(),
                        hits: Vec::new(),
                    })
                    .hits
                    .push(TumorHit {
                        tumor: dataset.tumor.clone(),
                        pcc: row.pcc,
                        extra: row.extra.clone(),
                    });
            }
        }
        for entry in genes.values_mut() {
            entry.hits.sort_by(|a, b| a.tumor.label.cmp(&b.tumor.label));
        }

        let index = GeneIndex { genes };
        info!("Found {} cross-tumor genes", index.cross_tumor().count());
        index
    }
}

fn by_pcc_desc(a: f64, b: f64, a_symbol: &str, b_symbol: &str) -> Ordering {
    b.total_cmp(&a).then_with(|| a_symbol.cmp(b_symbol))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(code: &str, rows: &[(&str, f64)]) -> TumorDataset {
        TumorDataset {
            tumor: TumorType::from_code(code),
            rows: rows.iter().map(|(s, p)| GeneRow::new(*s, *p)).collect(),
        }
    }

    #[test]
    fn filter_drops_rows_below_threshold() {
        let ds = dataset("BRCA", &[("GATA3", 0.87), ("LOW", 0.3), ("EDGE", 0.5), ("NEG", -0.9)]);
        let filtered = DataProcessor::filter_rows(&ds, 0.5, 1000);
        let symbols: Vec<_> = filtered.rows.iter().map(|r| r.symbol.as_str()).collect();
        assert_eq!(symbols, ["GATA3", "EDGE"]);
    }

    #[test]
    fn filter_caps_and_deduplicates() {
        let ds = dataset(
            "OV",
            &[("A", 0.6), ("B", 0.9), ("A", 0.95), ("C", 0.7), ("D", 0.7)],
        );
        let filtered = DataProcessor::filter_rows(&ds, 0.5, 3);
        let got: Vec<_> = filtered
            .rows
            .iter()
            .map(|r| (r.symbol.as_str(), r.pcc))
            .collect();
        assert_eq!(got, [("A", 0.95), ("B", 0.9), ("C", 0.7)]);
    }

    #[test]
    fn aggregate_marks_cross_tumor_genes() {
        let a = dataset("BRCA", &[("GATA3", 0.87), ("MYC", 0.6)]);
        let b = dataset("OV", &[("MYC", 0.8)]);
        let index = DataProcessor::aggregate(&[a, b]);

        assert_eq!(index.len(), 2);
        let myc = index.get("MYC").unwrap();
        assert!(myc.is_cross_tumor());
        assert_eq!(myc.hits.len(), 2);
        assert_eq!(myc.strongest_hit().unwrap().tumor.code, "OV");
        assert!((myc.mean_pcc() - 0.7).abs() < 1e-12);
        assert_eq!(myc.max_pcc(), 0.8);

        let brca_only = index.tumor_specific(&TumorType::from_code("BRCA"));
        assert_eq!(brca_only.len(), 1);
        assert_eq!(brca_only[0].symbol, "GATA3");
        assert_eq!(index.cross_tumor().count(), 1);
    }

    #[test]
    fn strongest_hit_tie_goes_to_first_label() {
        let a = dataset("ACC", &[("X", 0.7)]);
        let b = dataset("BRCA", &[("X", 0.7)]);
        let index = DataProcessor::aggregate(&[b, a]);
        assert_eq!(index.get("X").unwrap().strongest_hit().unwrap().tumor.code, "ACC");
    }
}
