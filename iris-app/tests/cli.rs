use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

fn iris(workdir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("iris-diaphragm").expect("二进制未构建");
    cmd.current_dir(workdir).env_remove("IRIS_CONFIG");
    cmd
}

#[test]
fn generate_prints_document_to_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let output = iris(dir.path())
        .args(["generate", "6", "30"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let doc: Value = serde_json::from_slice(&output).expect("标准输出应为纯 JSON");
    assert_eq!(doc["schema"], "slvs-json/1");
    assert_eq!(doc["parameters"]["blade_angle"], 30.0);
    assert_eq!(doc["entities"][0]["id"], "center");
}

#[test]
fn generate_with_two_blades_fails() {
    let dir = tempfile::tempdir().unwrap();
    iris(dir.path())
        .args(["generate", "2"])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("叶片数量 2"));
}

#[test]
fn unparsable_arguments_fall_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let output = iris(dir.path())
        .args(["generate", "--variant", "tapered", "many", "steep"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let doc: Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(doc["parameters"]["blade_angle"], 60.0);
    assert_eq!(doc["parameters"]["pivot_radius"], 120.0);
    let pivots = doc["entities"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|e| e["id"].as_str())
        .filter(|id| id.starts_with("pivot") && *id != "pivot_circle")
        .count();
    assert_eq!(pivots, 8);
}

#[test]
fn generate_writes_file_and_reports_summary() {
    let dir = tempfile::tempdir().unwrap();
    iris(dir.path())
        .args(["generate", "--variant", "constrained", "5", "40", "out/iris.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("point_on_circle: 5"));

    let text = fs::read_to_string(dir.path().join("out/iris.json")).unwrap();
    let doc: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(doc["parameters"]["num_blades"], 5.0);
}

#[test]
fn batch_writes_sweep_and_inspect_reads_it_back() {
    let dir = tempfile::tempdir().unwrap();
    iris(dir.path())
        .args(["batch", "--output-dir", "sweep"])
        .assert()
        .success();

    let written: Vec<_> = fs::read_dir(dir.path().join("sweep"))
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(written.len(), 7);
    assert!(written.contains(&"sophisticated_6blade_closed.json".to_string()));

    iris(dir.path())
        .args(["inspect", "sweep/sophisticated_8blade.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("perpendicular: 16"))
        .stdout(predicate::str::contains("360.000"));
}

#[test]
fn config_file_controls_output_and_mechanism() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("config")).unwrap();
    fs::write(
        dir.path().join("config/default.toml"),
        concat!(
            "[output]\npretty = false\ndirectory = \"from_config\"\n\n",
            "[mechanism]\nblade_length = 42.0\n",
        ),
    )
    .unwrap();

    let output = iris(dir.path())
        .args(["generate", "4", "30"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8(output).unwrap();
    assert_eq!(text.trim_end().lines().count(), 1);
    let doc: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(doc["parameters"]["blade_length"], 42.0);

    iris(dir.path()).arg("batch").assert().success();
    assert!(dir.path().join("from_config/sophisticated_8blade.json").exists());
}

#[test]
fn inspect_rejects_broken_document() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("broken.json"),
        r#"{"schema":"slvs-json/1","units":"mm","parameters":{},
            "entities":[{"type":"line","id":"radial1","p1":"center","p2":"pivot1"}],
            "constraints":[]}"#,
    )
    .unwrap();

    iris(dir.path())
        .args(["inspect", "broken.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("center"));
}

#[test]
fn explicit_missing_config_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    iris(dir.path())
        .args(["--config", "absent.toml", "generate"])
        .assert()
        .failure();
}
