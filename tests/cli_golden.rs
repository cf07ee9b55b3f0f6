// Copyright 2026 Beckon Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use assert_cmd::Command;
use jsonschema::JSONSchema;
use predicates::prelude::*;
use serde_json::Value;
use serde_json::json;
use tempfile::TempDir;

fn beckon_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("beckon"))
}

fn beckon_cmd_with_env(config_root: &Path) -> Command {
    let mut cmd = beckon_cmd();
    cmd.env("XDG_CONFIG_HOME", config_root);
    cmd.env("HOME", config_root);
    cmd.env("APPDATA", config_root);
    cmd
}

fn global_config_path(config_root: &Path) -> PathBuf {
    let base = if cfg!(target_os = "macos") {
        config_root.join("Library").join("Application Support")
    } else {
        config_root.to_path_buf()
    };
    base.join("beckon").join("beckon.toml")
}

fn load_schema() -> JSONSchema {
    let schema_text = include_str!("../schemas/response.schema.json");
    let schema_json: Value = serde_json::from_str(schema_text).expect("schema json");
    JSONSchema::options()
        .compile(&schema_json)
        .expect("compile schema")
}

fn run_json(cmd: &mut Command, cwd: &Path) -> Value {
    let output = cmd.current_dir(cwd).output().expect("run command");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).expect("parse json")
}

fn assert_schema(schema: &JSONSchema, value: &Value) {
    if let Err(errors) = schema.validate(value) {
        let msgs: Vec<String> = errors.map(|e| e.to_string()).collect();
        panic!("schema validation failed:\n{}", msgs.join("\n"));
    }
}

fn seed_catalog(root: &Path) {
    fs::create_dir_all(root.join("files")).expect("files dir");
    fs::write(root.join("files/beach.png"), [0u8; 64]).expect("write beach");
    fs::write(root.join("files/report.pdf"), [0u8; 128]).expect("write report");
    fs::write(root.join("files/slides.pptx"), [0u8; 256]).expect("write slides");
    fs::write(root.join("files/notes.txt"), "plain text\n").expect("write notes");
}

#[test]
fn golden_cli_outputs() {
    let schema = load_schema();
    let config_temp = TempDir::new().expect("config tempdir");
    let config_root = config_temp.path();
    let temp = TempDir::new().expect("tempdir");
    let root = temp.path();
    seed_catalog(root);

    // init
    let mut cmd = beckon_cmd_with_env(config_root);
    cmd.args(["init", "."]);
    cmd.current_dir(root)
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized Beckon manifest"));

    // add: notes.txt has no supported MIME and is skipped with a warning
    let mut cmd = beckon_cmd_with_env(config_root);
    cmd.args(["add", "files", "--json"]);
    let add_json = run_json(&mut cmd, root);
    assert_schema(&schema, &add_json);
    assert_eq!(add_json["ok"], json!(true));
    assert_eq!(add_json["stats"]["total_hits"], json!(3));
    assert_eq!(add_json["stats"]["file_count"], json!(3));
    let warnings = add_json["warnings"].as_array().expect("warnings array");
    assert_eq!(warnings.len(), 1);
    assert!(
        warnings[0]
            .as_str()
            .expect("warning string")
            .contains("unsupported")
    );

    // re-adding the same directory skips every name
    let mut cmd = beckon_cmd_with_env(config_root);
    cmd.args(["add", "files", "--json"]);
    let readd_json = run_json(&mut cmd, root);
    assert_schema(&schema, &readd_json);
    assert_eq!(readd_json["stats"]["total_hits"], json!(0));
    assert_eq!(readd_json["stats"]["file_count"], json!(3));

    // label
    let mut cmd = beckon_cmd_with_env(config_root);
    cmd.args(["label", "report.pdf", "quarterly budget"]);
    cmd.current_dir(root).assert().success();

    // match with explanation
    let mut cmd = beckon_cmd_with_env(config_root);
    cmd.args(["match", "open beach", "--json", "--explain"]);
    let match_json = run_json(&mut cmd, root);
    assert_schema(&schema, &match_json);
    assert_eq!(match_json["query"]["utterance"], json!("open beach"));
    assert_eq!(match_json["query"]["language"], json!("en"));
    assert_eq!(match_json["query"]["target"], json!("beach"));
    let results = match_json["results"].as_array().expect("results");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["file"]["name"], json!("beach.png"));
    assert_eq!(results[0]["score"], json!(130.0));
    assert_eq!(results[0]["reason"], json!("exact"));
    assert_eq!(results[0]["signals"]["name_exact"], json!(100.0));
    assert_eq!(results[0]["signals"]["name_words"], json!(30.0));

    // keyword label drives matching
    let mut cmd = beckon_cmd_with_env(config_root);
    cmd.args(["match", "open budget", "--json"]);
    let label_match = run_json(&mut cmd, root);
    assert_schema(&schema, &label_match);
    let results = label_match["results"].as_array().expect("results");
    assert_eq!(results[0]["file"]["name"], json!("report.pdf"));
    assert_eq!(results[0]["score"], json!(115.0));

    // type vocabulary with --k truncation
    let mut cmd = beckon_cmd_with_env(config_root);
    cmd.args(["match", "show presentation", "--k", "1", "--json"]);
    let type_match = run_json(&mut cmd, root);
    assert_schema(&schema, &type_match);
    let results = type_match["results"].as_array().expect("results");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["file"]["name"], json!("slides.pptx"));

    // run: success
    let mut cmd = beckon_cmd_with_env(config_root);
    cmd.args(["run", "open beach", "--json"]);
    let run_ok = run_json(&mut cmd, root);
    assert_schema(&schema, &run_ok);
    assert_eq!(run_ok["success"], json!(true));
    assert_eq!(run_ok["message"], json!("Opened file: beach.png"));
    assert_eq!(run_ok["selected"]["file"]["name"], json!("beach.png"));

    // run: no match is a normal result with the utterance verbatim
    let mut cmd = beckon_cmd_with_env(config_root);
    cmd.args(["run", "Open ZEBRA unicorn", "--json"]);
    let run_miss = run_json(&mut cmd, root);
    assert_schema(&schema, &run_miss);
    assert_eq!(run_miss["ok"], json!(true));
    assert_eq!(run_miss["success"], json!(false));
    assert_eq!(
        run_miss["message"],
        json!("No matching file found: \"Open ZEBRA unicorn\"")
    );
    assert!(run_miss.get("selected").is_none());
    assert_eq!(run_miss["results"].as_array().expect("results").len(), 0);

    // ls
    let mut cmd = beckon_cmd_with_env(config_root);
    cmd.args(["ls", "--json"]);
    let ls_json = run_json(&mut cmd, root);
    assert_schema(&schema, &ls_json);
    let results = ls_json["results"].as_array().expect("results");
    assert_eq!(results.len(), 3);
    assert_eq!(results[0]["name"], json!("beach.png"));
    assert_eq!(results[0]["mime_type"], json!("image/png"));

    // stats
    let mut cmd = beckon_cmd_with_env(config_root);
    cmd.args(["stats", "--json"]);
    let stats_json = run_json(&mut cmd, root);
    assert_schema(&schema, &stats_json);
    assert_eq!(stats_json["stats"]["file_count"], json!(3));
    assert!(stats_json["stats"]["catalog_bytes"].as_u64().expect("bytes") > 0);

    // rm
    let mut cmd = beckon_cmd_with_env(config_root);
    cmd.args(["rm", "slides.pptx", "--json"]);
    let rm_json = run_json(&mut cmd, root);
    assert_schema(&schema, &rm_json);
    assert_eq!(rm_json["stats"]["total_hits"], json!(1));
    assert_eq!(rm_json["stats"]["file_count"], json!(2));
}

#[test]
fn chinese_catalog_flow() {
    let schema = load_schema();
    let config_temp = TempDir::new().expect("config tempdir");
    let config_root = config_temp.path();
    let temp = TempDir::new().expect("tempdir");
    let root = temp.path();
    fs::create_dir_all(root.join("files")).expect("files dir");
    fs::write(root.join("files/会议记录.pdf"), [0u8; 64]).expect("write file");

    let mut cmd = beckon_cmd_with_env(config_root);
    cmd.args(["init", "."]);
    assert!(cmd.current_dir(root).output().unwrap().status.success());

    let mut cmd = beckon_cmd_with_env(config_root);
    cmd.args(["add", "files", "--json"]);
    let add_json = run_json(&mut cmd, root);
    assert_schema(&schema, &add_json);
    assert_eq!(add_json["stats"]["total_hits"], json!(1));

    let mut cmd = beckon_cmd_with_env(config_root);
    cmd.args(["match", "打开 会议", "--lang", "zh", "--json"]);
    let match_json = run_json(&mut cmd, root);
    assert_schema(&schema, &match_json);
    assert_eq!(match_json["query"]["language"], json!("zh"));
    assert_eq!(match_json["query"]["target"], json!("会议"));
    let results = match_json["results"].as_array().expect("results");
    assert_eq!(results[0]["file"]["name"], json!("会议记录.pdf"));
    assert_eq!(results[0]["score"], json!(130.0));

    let mut cmd = beckon_cmd_with_env(config_root);
    cmd.args(["run", "打开 海滩", "--lang", "zh", "--json"]);
    let run_miss = run_json(&mut cmd, root);
    assert_schema(&schema, &run_miss);
    assert_eq!(run_miss["success"], json!(false));
    assert_eq!(run_miss["message"], json!("未找到匹配的文件：\"打开 海滩\""));
}

#[test]
fn global_config_sets_default_language() {
    let schema = load_schema();
    let config_temp = TempDir::new().expect("config tempdir");
    let config_root = config_temp.path();
    let config_path = global_config_path(config_root);
    fs::create_dir_all(config_path.parent().expect("config parent")).expect("config dir");
    fs::write(&config_path, "language = \"zh\"\n").expect("write config");

    let temp = TempDir::new().expect("tempdir");
    let root = temp.path();
    fs::create_dir_all(root.join("files")).expect("files dir");
    fs::write(root.join("files/会议记录.pdf"), [0u8; 64]).expect("write file");

    let mut cmd = beckon_cmd_with_env(config_root);
    cmd.args(["init", "."]);
    assert!(cmd.current_dir(root).output().unwrap().status.success());

    let mut cmd = beckon_cmd_with_env(config_root);
    cmd.args(["add", "files", "--json"]);
    run_json(&mut cmd, root);

    // no --lang flag: the configured default applies
    let mut cmd = beckon_cmd_with_env(config_root);
    cmd.args(["run", "打开 会议", "--json"]);
    let run_json_value = run_json(&mut cmd, root);
    assert_schema(&schema, &run_json_value);
    assert_eq!(run_json_value["query"]["language"], json!("zh"));
    assert_eq!(run_json_value["message"], json!("已打开文件：会议记录.pdf"));
}

#[test]
fn duplicate_label_is_rejected() {
    let config_temp = TempDir::new().expect("config tempdir");
    let config_root = config_temp.path();
    let temp = TempDir::new().expect("tempdir");
    let root = temp.path();
    seed_catalog(root);

    let mut cmd = beckon_cmd_with_env(config_root);
    cmd.args(["init", "."]);
    assert!(cmd.current_dir(root).output().unwrap().status.success());

    let mut cmd = beckon_cmd_with_env(config_root);
    cmd.args(["add", "files", "--json"]);
    run_json(&mut cmd, root);

    let mut cmd = beckon_cmd_with_env(config_root);
    cmd.args(["label", "report.pdf", "quarterly budget"]);
    cmd.current_dir(root).assert().success();

    let mut cmd = beckon_cmd_with_env(config_root);
    cmd.args(["label", "beach.png", "quarterly budget"]);
    cmd.current_dir(root)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already used by report.pdf"));
}

#[test]
fn missing_manifest_reports_error() {
    let schema = load_schema();
    let config_temp = TempDir::new().expect("config tempdir");
    let config_root = config_temp.path();
    let temp = TempDir::new().expect("tempdir");
    let root = temp.path();

    let mut cmd = beckon_cmd_with_env(config_root);
    cmd.args(["match", "open beach"]);
    cmd.current_dir(root)
        .assert()
        .failure()
        .stderr(predicate::str::contains("manifest not found"));

    // with --json the error comes back as an envelope on stdout
    let mut cmd = beckon_cmd_with_env(config_root);
    cmd.args(["match", "open beach", "--json"]);
    let err_json = run_json(&mut cmd, root);
    assert_schema(&schema, &err_json);
    assert_eq!(err_json["ok"], json!(false));
    assert!(
        err_json["error"]["message"]
            .as_str()
            .expect("error message")
            .contains("manifest not found")
    );
}

#[test]
fn init_refuses_to_overwrite() {
    let config_temp = TempDir::new().expect("config tempdir");
    let config_root = config_temp.path();
    let temp = TempDir::new().expect("tempdir");
    let root = temp.path();

    let mut cmd = beckon_cmd_with_env(config_root);
    cmd.args(["init", "."]);
    assert!(cmd.current_dir(root).output().unwrap().status.success());

    let mut cmd = beckon_cmd_with_env(config_root);
    cmd.args(["init", "."]);
    cmd.current_dir(root)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn completions_emit_script() {
    let mut cmd = beckon_cmd();
    cmd.args(["completions", "bash"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("beckon"));
}
