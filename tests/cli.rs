/// End-to-end tests for the tumor-network binary
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Helper to write a tumor CSV into `dir`
fn write_tumor_csv(dir: &Path, code: &str, rows: &[(&str, f64)]) {
    let mut text = String::from("Gene Symbol,PCC,P-value\n");
    for (symbol, pcc) in rows {
        text.push_str(&format!("{symbol},{pcc},0.001\n"));
    }
    fs::write(dir.join(format!("{code} Tumor.csv")), text).unwrap();
}

/// Helper to create the three-tumor sample used by most tests
fn create_sample_data(tmpdir: &TempDir) -> PathBuf {
    let data_dir = tmpdir.path().join("data");
    fs::create_dir_all(&data_dir).unwrap();
    write_tumor_csv(&data_dir, "BRCA", &[("GATA3", 0.87), ("MYC", 0.6), ("LOWGENE", 0.3)]);
    write_tumor_csv(&data_dir, "OV", &[("MYC", 0.8), ("PAX8", 0.7)]);
    write_tumor_csv(&data_dir, "GBM", &[("EGFR", 0.9)]);
    data_dir
}

fn render_cmd(data_dir: &Path, output_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("tumor-network").unwrap();
    cmd.env_remove("TUMOR_NETWORK_CONFIG")
        .env_remove("RUST_LOG")
        .arg("render")
        .arg("--data-dir")
        .arg(data_dir)
        .arg("--output-dir")
        .arg(output_dir)
        .arg("--no-open");
    cmd
}

#[test]
fn test_render_writes_network_page() {
    let tmpdir = TempDir::new().unwrap();
    let data_dir = create_sample_data(&tmpdir);
    let output_dir = tmpdir.path().join("output");

    render_cmd(&data_dir, &output_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Total genes: 4 across 3 tumor types"))
        .stdout(predicate::str::contains("Cross-tumor genes: 1"))
        .stdout(predicate::str::contains("multi_tumor_network.html"));

    let html = fs::read_to_string(output_dir.join("multi_tumor_network.html")).unwrap();
    assert!(html.contains("\"id\":\"gene:GATA3\""));
    assert!(html.contains("\"shape\":\"diamond\""));
    assert!(!html.contains("gene:LOWGENE"));
    assert!(html.contains("BRCA Tumor"));
}

#[test]
fn test_render_survival_tree_variant() {
    let tmpdir = TempDir::new().unwrap();
    let data_dir = create_sample_data(&tmpdir);
    let output_dir = tmpdir.path().join("output");

    render_cmd(&data_dir, &output_dir)
        .arg("--variant")
        .arg("survival-tree")
        .assert()
        .success();

    let html = fs::read_to_string(output_dir.join("bad_survival_tree.html")).unwrap();
    assert!(html.contains("Poor Prognosis"));
    assert!(html.contains("High Risk"));
    assert!(html.contains("\"barnesHut\""));
}

#[test]
fn test_empty_directory_renders_central_node_only() {
    let tmpdir = TempDir::new().unwrap();
    let data_dir = tmpdir.path().join("empty");
    fs::create_dir_all(&data_dir).unwrap();
    let output_dir = tmpdir.path().join("output");

    render_cmd(&data_dir, &output_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Total genes: 0 across 0 tumor types"));

    let html = fs::read_to_string(output_dir.join("multi_tumor_network.html")).unwrap();
    assert!(html.contains("\"id\":\"central\""));
    assert!(!html.contains("\"role\":\"tumor\""));
    assert!(!html.contains("\"role\":\"gene\""));
}

#[test]
fn test_malformed_file_is_skipped() {
    let tmpdir = TempDir::new().unwrap();
    let data_dir = create_sample_data(&tmpdir);
    fs::write(data_dir.join("BAD Tumor.csv"), "foo,bar\n1,2\n").unwrap();
    let output_dir = tmpdir.path().join("output");

    render_cmd(&data_dir, &output_dir)
        .assert()
        .success()
        .stderr(predicate::str::contains("BAD Tumor.csv"));

    let html = fs::read_to_string(output_dir.join("multi_tumor_network.html")).unwrap();
    assert!(!html.contains("BAD Tumor"));
    assert!(html.contains("gene:GATA3"));
}

#[test]
fn test_missing_data_directory_fails() {
    let tmpdir = TempDir::new().unwrap();

    render_cmd(&tmpdir.path().join("nope"), &tmpdir.path().join("output"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("data directory not found"));
}

#[test]
fn test_renders_are_byte_identical() {
    let tmpdir = TempDir::new().unwrap();
    let data_dir = create_sample_data(&tmpdir);
    let first = tmpdir.path().join("first");
    let second = tmpdir.path().join("second");

    render_cmd(&data_dir, &first).assert().success();
    render_cmd(&data_dir, &second).assert().success();

    let a = fs::read(first.join("multi_tumor_network.html")).unwrap();
    let b = fs::read(second.join("multi_tumor_network.html")).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_config_file_is_applied() {
    let tmpdir = TempDir::new().unwrap();
    let data_dir = create_sample_data(&tmpdir);
    let output_dir = tmpdir.path().join("output");
    let config = tmpdir.path().join("network.toml");
    fs::write(&config, "title = \"Configured Title\"\noutput_filename = \"custom\"\n").unwrap();

    render_cmd(&data_dir, &output_dir)
        .arg("--config")
        .arg(&config)
        .assert()
        .success();

    let html = fs::read_to_string(output_dir.join("custom.html")).unwrap();
    assert!(html.contains("<title>Configured Title</title>"));
}

#[test]
fn test_open_missing_file_fails() {
    let tmpdir = TempDir::new().unwrap();

    Command::cargo_bin("tumor-network")
        .unwrap()
        .env_remove("TUMOR_NETWORK_CONFIG")
        .arg("open")
        .arg("--file")
        .arg(tmpdir.path().join("missing.html"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("run `tumor-network render` first"));
}

#[test]
fn test_logs_go_to_stderr_not_report() {
    let tmpdir = TempDir::new().unwrap();
    let data_dir = create_sample_data(&tmpdir);
    let output_dir = tmpdir.path().join("output");

    render_cmd(&data_dir, &output_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Visualization saved to"))
        .stdout(predicate::str::contains("Mapped ").not())
        .stderr(predicate::str::contains("Mapped "));
}

#[test]
fn test_central_label_sets_page_title() {
    let tmpdir = TempDir::new().unwrap();
    let data_dir = create_sample_data(&tmpdir);
    let output_dir = tmpdir.path().join("output");

    render_cmd(&data_dir, &output_dir)
        .arg("--central-label")
        .arg("TP53")
        .assert()
        .success();

    let html = fs::read_to_string(output_dir.join("multi_tumor_network.html")).unwrap();
    assert!(html.contains("<title>Multi-Tumor Network with TP53 as Central Node</title>"));
    assert!(!html.contains("GCH1"));
}
