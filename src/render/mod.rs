//! Render module - self-contained HTML output for the vis-network backend

mod page;
mod scripts;

use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::VisualConfig;
use crate::error::{Error, Result};
use crate::graph::Graph;

pub use page::{render_page, subtitle, HTML2CANVAS_CDN, VIS_NETWORK_CDN};
pub use scripts::LayoutPresets;

/// Escape text for HTML element content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render `graph` and write it to `config.output_path()`, creating the
/// output directory if needed.
pub fn write_page(graph: &Graph, config: &VisualConfig) -> Result<PathBuf> {
    let html = render_page(graph, config)?;
    let path = config.output_path();
    write_html(&path, &html)?;
    info!("Visualization written to {}", path.display());
    Ok(path)
}

fn write_html(path: &Path, html: &str) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|e| Error::io(e, dir))?;
    }
    fs::write(path, html).map_err(|e| Error::io(e, path))
}
