//! HTML Page Renderer
//! Builds the standalone visualization document.
//!
//! Layout:
//! 1. Header: title + subtitle
//! 2. `#mynetwork` canvas container
//! 3. Legend (central node, tumor colors or risk bands, shapes, threshold)
//! 4. Status indicator, layout controls, PNG download buttons
//! 5. Embedded graph JSON and scripts

use serde::Serialize;

use super::escape_html;
use super::scripts::{self, LayoutPresets};
use crate::config::{Variant, VisualConfig};
use crate::graph::{Graph, NodeRole, RiskBand};

pub const VIS_NETWORK_CDN: &str =
    "https://unpkg.com/vis-network@9.1.9/standalone/umd/vis-network.min.js";
pub const HTML2CANVAS_CDN: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/html2canvas/1.4.1/html2canvas.min.js";

/// Render the complete HTML document for `graph`.
///
/// The output depends only on its inputs: no timestamps, no random ids.
pub fn render_page(graph: &Graph, config: &VisualConfig) -> Result<String, serde_json::Error> {
    let nodes = script_json(&graph.nodes)?;
    let edges = script_json(&graph.edges)?;
    let options = script_json(&scripts::network_options(config.variant, graph.directed))?;
    let presets = script_json(&LayoutPresets::for_variant(config.variant))?;
    let export_name = script_json(&config.output_filename)?;

    let title = escape_html(&config.title);
    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{title}</title>
<script src="{vis}"></script>
<script src="{h2c}"></script>
<style>{css}</style>
</head>
<body>
<div class="network-container">
  <div class="header-container">
    <h1 class="main-title">{title}</h1>
    <p class="subtitle">{subtitle}</p>
  </div>
  <div id="mynetwork"></div>
</div>
{legend}
<div id="physics-status" class="status-indicator frozen">Initializing...</div>
<div class="control-buttons">
  <button class="ctrl-btn" onclick="clusterLayout()">Cluster</button>
  <button class="ctrl-btn" onclick="expandLayout()">Expand</button>
  <button class="ctrl-btn" onclick="resetLayout()">Reset &amp; Stabilize</button>
  <button class="ctrl-btn" onclick="freezeAll()">Freeze</button>
  <button class="ctrl-btn" onclick="unfreezeGenes()">Unfreeze</button>
</div>
<div class="download-buttons">
  <button class="download-btn" onclick="downloadNetworkImage(1)">Download PNG</button>
  <button class="download-btn" onclick="downloadNetworkImage(3)">Download Hi-Res PNG</button>
</div>
<script>
const GRAPH_NODES = {nodes};
const GRAPH_EDGES = {edges};
const GRAPH_OPTIONS = {options};
const LAYOUT_PRESETS = {presets};
const EXPORT_NAME = {export_name};
{network}{controls}{export}</script>
</body>
</html>
"#,
        vis = VIS_NETWORK_CDN,
        h2c = HTML2CANVAS_CDN,
        css = inline_css(),
        subtitle = escape_html(&subtitle(config)),
        legend = legend_html(graph, config),
        network = scripts::network_script(),
        controls = scripts::controls_script(),
        export = scripts::export_script(),
    ))
}

pub fn subtitle(config: &VisualConfig) -> String {
    match config.variant {
        Variant::Network => format!(
            "Visualization of {} gene correlations with multiple tumor types and associated genes",
            config.central_label
        ),
        Variant::SurvivalTree => format!(
            "Genes correlated with {} across tumor types",
            config.central_label.to_lowercase()
        ),
    }
}

/// JSON safe to place inside a `<script>` element.
fn script_json<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    let json = serde_json::to_string(value)?;
    Ok(json
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026"))
}

fn legend_html(graph: &Graph, config: &VisualConfig) -> String {
    let mut html = String::from("<div class=\"legend\">\n  <h3>Legend</h3>\n");
    html.push_str(&legend_item(
        config.variant.central_color(),
        "legend-circle",
        &escape_html(&config.central_label),
    ));

    match config.variant {
        Variant::Network => {
            html.push_str("  <h4>Cancer Types</h4>\n");
            for node in graph.nodes_with_role(NodeRole::Tumor) {
                html.push_str(&legend_item(&node.color.background, "legend-circle", &node.title));
            }
        }
        Variant::SurvivalTree => {
            html.push_str("  <h4>Risk Levels</h4>\n");
            for band in RiskBand::ALL {
                let text = format!("{} (PCC &ge; {:.2})", band.label(), band.threshold());
                html.push_str(&legend_item(band.color(), "legend-circle", &text));
            }
        }
    }

    html.push_str("  <h4>Shapes</h4>\n");
    html.push_str(&legend_item("#999999", "legend-circle", "Tumor-specific gene"));
    html.push_str(&legend_item(
        "#FF9800",
        "legend-diamond",
        "Diamond: gene shared by multiple tumors (1.5x size)",
    ));
    html.push_str(&format!(
        "  <p class=\"legend-note\">Node size and edge width scale with PCC. Minimum correlation: {:.2}</p>\n</div>",
        config.min_correlation
    ));
    html
}

/// `text` must already be escaped.
fn legend_item(color: &str, class: &str, text: &str) -> String {
    format!(
        "  <div class=\"legend-item\"><span class=\"{class}\" style=\"background-color: {};\"></span>{text}</div>\n",
        escape_html(color)
    )
}

fn inline_css() -> &'static str {
    r#"
body { margin: 0; padding: 0; font-family: Arial, sans-serif; background: #ffffff; }
.network-container { position: relative; width: 100%; }
.header-container { text-align: center; padding: 16px 0 8px 0; }
.main-title { margin: 0; font-size: 24px; color: #222222; }
.subtitle { margin: 6px 0 0 0; font-size: 14px; color: #666666; }
#mynetwork { width: 100%; height: 850px; border: 1px solid #dddddd; background: #ffffff; }
.legend { position: absolute; top: 90px; right: 20px; max-width: 260px; padding: 12px;
  background: rgba(255,255,255,0.95); border: 1px solid #cccccc; border-radius: 6px;
  font-size: 12px; box-shadow: 0 2px 6px rgba(0,0,0,0.1); }
.legend h3 { margin: 0 0 8px 0; font-size: 14px; }
.legend h4 { margin: 10px 0 4px 0; font-size: 12px; color: #444444; }
.legend-item { display: flex; align-items: center; margin: 3px 0; }
.legend-circle { display: inline-block; width: 12px; height: 12px; border-radius: 50%; margin-right: 8px; }
.legend-diamond { display: inline-block; width: 10px; height: 10px; transform: rotate(45deg); margin: 0 9px 0 1px; }
.legend-note { margin: 10px 0 0 0; color: #666666; }
.status-indicator { position: fixed; top: 20px; left: 20px; padding: 6px 12px; border-radius: 4px;
  font-size: 12px; color: #ffffff; }
.status-indicator.active { background: #FF851B; }
.status-indicator.frozen { background: #2ECC40; }
.status-indicator.error { background: #FF4136; }
.control-buttons { position: fixed; bottom: 20px; left: 20px; display: flex; gap: 8px; }
.download-buttons { position: fixed; bottom: 20px; right: 20px; display: flex; gap: 8px; }
.ctrl-btn, .download-btn { padding: 8px 14px; border: none; border-radius: 4px; cursor: pointer;
  font-size: 13px; color: #ffffff; }
.ctrl-btn { background: #555555; }
.ctrl-btn:hover { background: #333333; }
.download-btn { background: #0074D9; }
.download-btn:hover { background: #005FA3; }
.graph-tooltip { font-size: 12px; line-height: 1.4; }
"#
}
