use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::Value;

const LICENSES: &str = "tests/fixtures/records/licenses.json";

fn query_json(extra: &[&str]) -> Value {
    let mut cmd = cargo_bin_cmd!("contractiq");
    cmd.env_remove("CONTRACTIQ_SERVER_URL");
    cmd.args(["query", "--records", LICENSES, "--format", "json"]);
    cmd.args(extra);

    let assert = cmd.assert().success();
    serde_json::from_slice(&assert.get_output().stdout).expect("valid json output")
}

fn match_indices(value: &Value) -> Vec<u64> {
    value["matches"]
        .as_array()
        .expect("matches array")
        .iter()
        .map(|m| m["index"].as_u64().expect("index"))
        .collect()
}

#[test]
fn cli_query_without_keyword_lists_every_record_in_input_order() {
    let value = query_json(&[]);

    assert_eq!(value["version"], "1.0.0");
    assert_eq!(value["keyword"], "");
    assert_eq!(value["field"], "all");
    assert_eq!(value["sort"], "none");
    assert_eq!(match_indices(&value), vec![0, 1, 2]);
    assert_eq!(value["summary"]["total_records"], 3);
    assert_eq!(value["summary"]["visible_records"], 3);
    assert_eq!(value["summary"]["truncated"], false);
}

#[test]
fn cli_query_restricts_keyword_to_selected_field() {
    assert_eq!(match_indices(&query_json(&["acme", "--field", "licensor"])), vec![0]);
    assert_eq!(match_indices(&query_json(&["acme", "--field", "licensee"])), vec![1]);
    assert_eq!(match_indices(&query_json(&["ACME"])), vec![0, 1]);
    assert_eq!(
        match_indices(&query_json(&["insolvency", "--field", "termination"])),
        vec![0]
    );
    assert_eq!(
        match_indices(&query_json(&["wales", "--field", "governing_law"])),
        vec![1]
    );
}

#[test]
fn cli_query_scope_that_is_not_a_list_never_matches() {
    let value = query_json(&["all purposes", "--field", "scope_of_use"]);
    assert!(match_indices(&value).is_empty());
    assert_eq!(value["summary"]["visible_records"], 0);
}

#[test]
fn cli_query_sorts_by_date_with_unparsable_dates_last() {
    assert_eq!(match_indices(&query_json(&["--sort", "date_desc"])), vec![1, 0, 2]);
    assert_eq!(match_indices(&query_json(&["--sort", "date_asc"])), vec![2, 0, 1]);
}

#[test]
fn cli_query_sorts_by_licensor() {
    assert_eq!(
        match_indices(&query_json(&["--sort", "licensor_asc"])),
        vec![0, 1, 2]
    );
    assert_eq!(
        match_indices(&query_json(&["--sort", "licensor_desc"])),
        vec![2, 1, 0]
    );
}

#[test]
fn cli_query_limit_truncates_after_sorting() {
    let value = query_json(&["--sort", "date_desc", "--limit", "1"]);
    assert_eq!(match_indices(&value), vec![1]);
    assert_eq!(value["summary"]["visible_records"], 3);
    assert_eq!(value["summary"]["truncated"], true);
}

#[test]
fn cli_query_text_output_lists_parties_and_dates() {
    let mut cmd = cargo_bin_cmd!("contractiq");
    cmd.env_remove("CONTRACTIQ_SERVER_URL");
    cmd.args(["query", "acme", "--records", LICENSES]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "#0: Acme Corp -> Globex Inc (2023-01-01)",
        ))
        .stdout(predicate::str::contains("#1: Initech -> Acme Corp (2024-06-01)"))
        .stdout(predicate::str::contains("Umbrella").not());
}

#[test]
fn cli_query_table_output_has_header() {
    let mut cmd = cargo_bin_cmd!("contractiq");
    cmd.env_remove("CONTRACTIQ_SERVER_URL");
    cmd.args(["query", "--records", LICENSES, "--format", "table"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("INDEX LICENSOR"))
        .stdout(predicate::str::contains("State of Delaware"));
}

#[test]
fn cli_query_reads_directories_and_fenced_model_output() {
    let mut cmd = cargo_bin_cmd!("contractiq");
    cmd.env_remove("CONTRACTIQ_SERVER_URL");
    cmd.args([
        "query",
        "--records",
        "tests/fixtures/records",
        "--records",
        "tests/fixtures/model_response.json",
        "--format",
        "json",
    ]);

    let assert = cmd.assert().success();
    let value: Value =
        serde_json::from_slice(&assert.get_output().stdout).expect("valid json output");
    assert_eq!(value["summary"]["total_records"], 4);
    assert_eq!(
        value["matches"][3]["record"]["parties"]["licensor"],
        "Cyberdyne Systems"
    );
}

#[test]
fn cli_query_requires_records() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let mut cmd = cargo_bin_cmd!("contractiq");
    cmd.current_dir(tmp.path());
    cmd.env_remove("CONTRACTIQ_SERVER_URL");
    cmd.args(["query", "acme"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("no record files given"));
}

#[test]
fn cli_query_reports_unreadable_record_files() {
    let mut cmd = cargo_bin_cmd!("contractiq");
    cmd.env_remove("CONTRACTIQ_SERVER_URL");
    cmd.args(["query", "--records", "tests/fixtures/missing.json"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("tests/fixtures/missing.json"));
}

#[test]
fn cli_schema_version_prints_query_result_version() {
    let mut cmd = cargo_bin_cmd!("contractiq");
    cmd.arg("--schema-version");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("1.0.0"));
}
