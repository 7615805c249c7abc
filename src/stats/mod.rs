//! Stats module - graph summary statistics

mod summary;

pub use summary::GraphSummary;
