//! Embedded JavaScript
//! Network bootstrap, layout controls and PNG export for the generated page.
//!
//! The scripts read five globals written by the page renderer:
//! `GRAPH_NODES`, `GRAPH_EDGES`, `GRAPH_OPTIONS`, `LAYOUT_PRESETS` and
//! `EXPORT_NAME`.

use serde::Serialize;
use serde_json::{json, Value};

use crate::config::Variant;

/// Physics settings behind the Cluster and Expand buttons.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutPresets {
    pub solver: &'static str,
    pub cluster: Value,
    pub expand: Value,
}

impl LayoutPresets {
    pub fn for_variant(variant: Variant) -> Self {
        match variant {
            Variant::Network => Self {
                solver: "forceAtlas2Based",
                cluster: force_atlas(-500.0, 0.4, 50.0, 0.3),
                expand: force_atlas(-50.0, 0.05, 200.0, 0.05),
            },
            Variant::SurvivalTree => Self {
                solver: "barnesHut",
                cluster: barnes_hut(-8000.0, 0.6, 150.0, 0.05, 0.5),
                expand: barnes_hut(-3000.0, 0.05, 250.0, 0.01, 0.09),
            },
        }
    }
}

fn force_atlas(gravity: f64, central: f64, spring_length: f64, spring: f64) -> Value {
    json!({
        "gravitationalConstant": gravity,
        "centralGravity": central,
        "springLength": spring_length,
        "springConstant": spring,
    })
}

fn barnes_hut(gravity: f64, central: f64, spring_length: f64, spring: f64, damping: f64) -> Value {
    json!({
        "gravitationalConstant": gravity,
        "centralGravity": central,
        "springLength": spring_length,
        "springConstant": spring,
        "damping": damping,
    })
}

/// vis-network options shared by both variants. Physics starts disabled so
/// the precomputed layout is shown as-is.
pub fn network_options(variant: Variant, directed: bool) -> Value {
    let solver = LayoutPresets::for_variant(variant).solver;
    json!({
        "interaction": {
            "dragNodes": true,
            "dragView": true,
            "zoomView": true,
            "selectable": true,
            "hover": true,
            "navigationButtons": true,
        },
        "physics": {
            "enabled": false,
            "solver": solver,
            "stabilization": { "iterations": 100 },
        },
        "edges": {
            "smooth": false,
            "arrows": { "to": { "enabled": directed, "scaleFactor": 0.6 } },
        },
        "nodes": {
            "font": { "face": "Arial" },
        },
    })
}

pub fn network_script() -> &'static str {
    r#"
function htmlTitle(markup) {
  const tip = document.createElement('div');
  tip.className = 'graph-tooltip';
  tip.innerHTML = markup;
  return tip;
}

const graphNodes = new vis.DataSet(GRAPH_NODES.map(function (node) {
  if (typeof node.title === 'string') { node.title = htmlTitle(node.title); }
  return node;
}));
const graphEdges = new vis.DataSet(GRAPH_EDGES.map(function (edge) {
  if (typeof edge.title === 'string') { edge.title = htmlTitle(edge.title); }
  return edge;
}));

const network = new vis.Network(
  document.getElementById('mynetwork'),
  { nodes: graphNodes, edges: graphEdges },
  GRAPH_OPTIONS
);
window.network = network;
window.graphNodes = graphNodes;
window.graphEdges = graphEdges;
"#
}

pub fn controls_script() -> &'static str {
    r#"
let savedPositions = {};
let settleTimer = null;

function isPinned(node) {
  return node.role === 'central' || node.role === 'tumor';
}

function setStatus(text, state) {
  const el = document.getElementById('physics-status');
  el.textContent = text;
  el.className = 'status-indicator ' + state;
}

function savePositions() {
  savedPositions = network.getPositions();
}

function releaseGenes() {
  graphNodes.update(graphNodes.get({ filter: function (n) { return !isPinned(n); } })
    .map(function (n) { return { id: n.id, fixed: false, physics: true }; }));
}

function settle() {
  if (settleTimer !== null) { clearTimeout(settleTimer); }
  settleTimer = setTimeout(function () {
    settleTimer = null;
    network.stopSimulation();
    network.setOptions({ physics: { enabled: false } });
    setStatus('Layout settled - drag gene nodes freely', 'frozen');
  }, 3000);
}

function applyPreset(preset, label) {
  const physics = { enabled: true, solver: LAYOUT_PRESETS.solver };
  physics[LAYOUT_PRESETS.solver] = preset;
  releaseGenes();
  network.setOptions({ physics: physics });
  setStatus(label, 'active');
  network.stabilize(100);
  settle();
}

function clusterLayout() {
  applyPreset(LAYOUT_PRESETS.cluster, 'Clustering genes around tumors...');
}

function expandLayout() {
  applyPreset(LAYOUT_PRESETS.expand, 'Expanding layout...');
}

function resetLayout() {
  if (settleTimer !== null) { clearTimeout(settleTimer); settleTimer = null; }
  network.stopSimulation();
  network.setOptions({ physics: { enabled: false } });
  graphNodes.update(Object.keys(savedPositions).map(function (id) {
    const node = graphNodes.get(id);
    return {
      id: id,
      x: savedPositions[id].x,
      y: savedPositions[id].y,
      fixed: node ? isPinned(node) : false
    };
  }));
  network.fit();
  setStatus('Layout reset', 'frozen');
}

function freezeAll() {
  if (settleTimer !== null) { clearTimeout(settleTimer); settleTimer = null; }
  network.stopSimulation();
  network.setOptions({ physics: { enabled: false } });
  const positions = network.getPositions();
  graphNodes.update(Object.keys(positions).map(function (id) {
    return { id: id, x: positions[id].x, y: positions[id].y, fixed: true };
  }));
  setStatus('All positions fixed', 'frozen');
}

function unfreezeGenes() {
  graphNodes.update(graphNodes.get({ filter: function (n) { return !isPinned(n); } })
    .map(function (n) { return { id: n.id, fixed: false }; }));
  network.setOptions({ interaction: { dragNodes: true } });
  setStatus('Dragging enabled for gene nodes', 'frozen');
}

network.once('afterDrawing', function () {
  network.fit();
  savePositions();
  setStatus('Tumor nodes fixed - drag gene nodes freely', 'frozen');
});
"#
}

pub fn export_script() -> &'static str {
    r#"
const CAPTURE_HIDDEN = ['.download-buttons', '.control-buttons', '.status-indicator'];

function downloadNetworkImage(scale) {
  const hidden = [];
  CAPTURE_HIDDEN.forEach(function (selector) {
    document.querySelectorAll(selector).forEach(function (el) {
      hidden.push([el, el.style.display]);
      el.style.display = 'none';
    });
  });
  const restore = function () {
    hidden.forEach(function (entry) { entry[0].style.display = entry[1]; });
  };

  const suffix = scale > 1 ? '_hires' : '';
  html2canvas(document.body, {
    scale: scale,
    backgroundColor: '#ffffff',
    useCORS: true,
    logging: false
  }).then(function (canvas) {
    restore();
    const link = document.createElement('a');
    link.download = EXPORT_NAME + suffix + '.png';
    link.href = canvas.toDataURL('image/png');
    document.body.appendChild(link);
    link.click();
    document.body.removeChild(link);
  }).catch(function (err) {
    restore();
    setStatus('Export failed: ' + err, 'error');
  });
}
"#
}
