use std::process::Command;

use anyhow::Context as _;
use serde_json::Value;

const MULTI_HOST_RUN: &str = r#"{
    "config": {
        "recordSizeKb": 0,
        "totalSizeKb": 64,
        "biggestBufferBytes": 32768,
        "requestedHosts": ["alpha", "beta"],
        "requestedThreadCount": 2,
        "iterations": 50,
        "minCompletionPct": 90,
        "jsonOutputRequested": true
    },
    "results": [
        {"host": "beta", "thread": "00", "elapsedSeconds": 2.0, "files": 50, "records": 100},
        {"host": "alpha", "thread": "00", "elapsedSeconds": 4.0, "files": 50, "records": 100},
        {"host": "alpha", "thread": "01", "elapsedSeconds": 3.0, "files": 50, "records": 100}
    ]
}"#;

fn run(args: &[&str], doc: &std::path::Path) -> anyhow::Result<std::process::Output> {
    Command::new(env!("CARGO_BIN_EXE_smfstat"))
        .arg("report")
        .arg(doc)
        .args(args)
        .output()
        .context("run smfstat binary")
}

#[test]
fn document_flag_selects_json_output() -> anyhow::Result<()> {
    let dir = tempfile::tempdir().context("tempdir")?;
    let doc = dir.path().join("run.json");
    std::fs::write(&doc, MULTI_HOST_RUN).context("write results document")?;

    let out = run(&[], &doc)?;
    anyhow::ensure!(out.status.success(), "smfstat failed: {out:?}");

    let stdout = String::from_utf8_lossy(&out.stdout);
    anyhow::ensure!(
        stdout.starts_with("{\n    \"hosts\""),
        "expected four-space indented json:\n{stdout}"
    );

    let v: Value = serde_json::from_str(&stdout).context("parse json report")?;

    anyhow::ensure!(v.pointer("/hosts/alpha/files").and_then(Value::as_u64) == Some(100));
    anyhow::ensure!(v.pointer("/hosts/alpha/elapsed").and_then(Value::as_f64) == Some(4.0));
    anyhow::ensure!(
        v.pointer("/hosts/beta/threads/00/status").and_then(Value::as_str) == Some("ok")
    );
    anyhow::ensure!(v.get("files").and_then(Value::as_u64) == Some(150));
    anyhow::ensure!(v.get("records").and_then(Value::as_u64) == Some(300));
    anyhow::ensure!(v.get("elapsed").and_then(Value::as_f64) == Some(4.0));
    anyhow::ensure!(v.get("iops").and_then(Value::as_f64) == Some(75.0));
    // 64 KB files clamped to the 32 KB buffer.
    anyhow::ensure!(v.get("MB-per-sec").and_then(Value::as_f64) == Some(2.4));
    anyhow::ensure!(v.pointer("/warnings/missing-threads").and_then(Value::as_u64) == Some(1));
    anyhow::ensure!(v.get("pct-files-processed").and_then(Value::as_f64) == Some(100.0));

    Ok(())
}

#[test]
fn human_output_lists_threads_in_input_order() -> anyhow::Result<()> {
    let dir = tempfile::tempdir().context("tempdir")?;
    let doc = dir.path().join("run.json");
    std::fs::write(&doc, MULTI_HOST_RUN).context("write results document")?;

    let out = run(&["--output", "human-readable"], &doc)?;
    anyhow::ensure!(out.status.success(), "smfstat failed: {out:?}");

    let stdout = String::from_utf8_lossy(&out.stdout);
    let lines: Vec<&str> = stdout.lines().collect();

    anyhow::ensure!(
        lines.first().is_some_and(|l| l.starts_with("host = beta,thr = 00,")),
        "unexpected first line:\n{stdout}"
    );
    anyhow::ensure!(lines.contains(&"total threads = 3"), "{stdout}");
    anyhow::ensure!(
        lines.contains(&"WARNING: failed to get some responses from remote hosts"),
        "{stdout}"
    );
    anyhow::ensure!(lines.contains(&"75.000000 IOPS"), "{stdout}");
    anyhow::ensure!(lines.contains(&"2.343750 MB/sec"), "{stdout}");

    Ok(())
}
