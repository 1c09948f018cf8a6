use std::fs;
use std::path::Path;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

fn vizreport() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("vizreport"));
    cmd.env_remove("RUST_LOG");
    cmd
}

fn write(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("write");
    path
}

#[test]
fn render_writes_outputs_and_assets() {
    let src = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let index = write(
        src.path(),
        "index.html",
        r#"{% extends "base.html" %}{% block content %}<h1>{{ heading }}</h1>{% endblock %}"#,
    );
    let ctx = write(src.path(), "ctx.json", r#"{"heading": "Beta diversity"}"#);

    vizreport()
        .arg("render")
        .arg(&index)
        .arg("--output")
        .arg(out.path())
        .arg("--context")
        .arg(&ctx)
        .args(["--plugin", "diversity", "--method", "beta"])
        .assert()
        .success()
        .stdout(contains("rendered 1 file(s)"))
        .stdout(contains("index.html"));

    let html = fs::read_to_string(out.path().join("index.html")).unwrap();
    assert!(html.contains("<title>diversity : beta</title>"), "{html}");
    assert!(html.contains("<h1>Beta diversity</h1>"));
    assert!(out.path().join("q2templateassets").join("css").join("report.css").is_file());
}

#[test]
fn render_with_config_file_and_yaml_context() {
    let src = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let page = write(src.path(), "page.html", "{{ q2templates_default_page_title }}/{{ n }}");
    let ctx = write(src.path(), "ctx.yaml", "n: 7\n");
    let config = write(src.path(), "vizreport.yaml", "title: Configured Title\n");

    vizreport()
        .arg("render")
        .arg(&page)
        .arg("-o")
        .arg(out.path())
        .arg("-c")
        .arg(&ctx)
        .arg("--config")
        .arg(&config)
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(out.path().join("page.html")).unwrap(),
        "Configured Title/7"
    );
}

#[test]
fn render_without_title_fails() {
    let src = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let page = write(src.path(), "page.html", "x");

    vizreport()
        .arg("render")
        .arg(&page)
        .arg("--output")
        .arg(out.path())
        .assert()
        .failure()
        .stderr(contains("default page title"));
}

#[test]
fn render_reports_missing_template() {
    let src = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let page = write(src.path(), "page.html", r#"{% include "ghost.html" %}"#);

    vizreport()
        .arg("render")
        .arg(&page)
        .arg("--output")
        .arg(out.path())
        .args(["--title", "T"])
        .assert()
        .failure()
        .stderr(contains("ghost.html"));

    assert!(!out.path().join("page.html").exists());
}

#[test]
fn templates_lists_embedded_package() {
    vizreport()
        .arg("templates")
        .assert()
        .success()
        .stdout(contains("base.html"))
        .stdout(contains("tabbed.html"))
        .stdout(contains("auxiliary"));
}

#[test]
fn assets_lists_output_paths() {
    vizreport()
        .arg("assets")
        .assert()
        .success()
        .stdout(contains("q2templateassets/css/report.css"));
}

#[test]
fn debug_verbosity_logs_resolved_settings() {
    let src = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let page = write(src.path(), "page.html", "x");

    vizreport()
        .arg("-vv")
        .arg("render")
        .arg(&page)
        .arg("--output")
        .arg(out.path())
        .args(["--title", "Debugged"])
        .assert()
        .success()
        .stderr(contains("title: Debugged"))
        .stderr(contains("package: Embedded"));
}
