use assert_cmd::cargo::cargo_bin_cmd;
use reqwest::blocking::Client;
use serde_json::{json, Value};
use std::net::TcpListener;
use std::process::{Child, Command};
use std::thread;
use std::time::Duration;

const LICENSES: &str = "tests/fixtures/records/licenses.json";

struct TestDaemon {
    base_url: String,
    child: Child,
}

impl TestDaemon {
    fn spawn() -> Self {
        // Bind an ephemeral port first so we know which port to pass
        // to `contractiq serve`.
        let listener =
            TcpListener::bind("127.0.0.1:0").expect("bind ephemeral TCP listener for daemon");
        let port = listener
            .local_addr()
            .expect("local_addr for daemon listener")
            .port();
        drop(listener);

        let addr_arg = format!("127.0.0.1:{port}");
        let base_url = format!("http://{addr_arg}");

        let log_dir = std::env::temp_dir();
        let stdout_file =
            std::fs::File::create(log_dir.join(format!("contractiq_daemon_{port}_stdout.log")))
                .expect("create daemon stdout log file");
        let stderr_file =
            std::fs::File::create(log_dir.join(format!("contractiq_daemon_{port}_stderr.log")))
                .expect("create daemon stderr log file");

        let mut cmd = Command::new(env!("CARGO_BIN_EXE_contractiq"));
        cmd.args(["serve", "--addr", &addr_arg])
            .stdout(stdout_file)
            .stderr(stderr_file);
        let child = cmd.spawn().expect("spawn contractiq serve daemon");

        wait_for_health(&base_url);

        Self { base_url, child }
    }
}

impl Drop for TestDaemon {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

fn wait_for_health(base_url: &str) {
    let client = Client::new();
    let url = format!("{base_url}/v1/health");

    let mut last_err = None;
    for _ in 0..150 {
        match client.get(&url).send() {
            Ok(resp) if resp.status().is_success() => return,
            Err(e) => {
                last_err = Some(format!("HTTP error: {e}"));
                thread::sleep(Duration::from_millis(100));
            }
            Ok(resp) => {
                last_err = Some(format!("unexpected status: {}", resp.status()));
                thread::sleep(Duration::from_millis(100));
            }
        }
    }

    panic!(
        "contractiq HTTP daemon did not become healthy in time. Last error: {}",
        last_err.unwrap_or_else(|| "unknown".to_string())
    );
}

fn run_stdout(args: &[&str]) -> Vec<u8> {
    let mut cmd = cargo_bin_cmd!("contractiq");
    cmd.env_remove("CONTRACTIQ_SERVER_URL");
    cmd.args(args);
    cmd.assert().success().get_output().stdout.clone()
}

#[test]
fn cli_serve_health_endpoint_reports_ok_status() {
    let daemon = TestDaemon::spawn();
    let resp = Client::new()
        .get(format!("{}/v1/health", daemon.base_url))
        .send()
        .expect("health response");
    assert!(resp.status().is_success());

    let value: Value = resp.json().expect("valid health JSON body");
    assert_eq!(value["status"], "ok");
}

#[test]
fn cli_query_via_server_matches_local_query() {
    let daemon = TestDaemon::spawn();
    let base = ["query", "acme", "--records", LICENSES, "--sort", "date_desc", "--format", "json"];

    let local: Value = serde_json::from_slice(&run_stdout(&base)).expect("local json");

    let mut remote_args = base.to_vec();
    remote_args.extend(["--server", daemon.base_url.as_str()]);
    let remote: Value = serde_json::from_slice(&run_stdout(&remote_args)).expect("server json");

    assert_eq!(local, remote, "daemon-backed query should match local query");
}

#[test]
fn cli_export_via_server_matches_local_export() {
    let daemon = TestDaemon::spawn();

    for format in ["json", "csv", "pdf-text"] {
        let base = ["export", "--records", LICENSES, "--index", "1", "--format", format];
        let local = run_stdout(&base);

        let mut remote_args = base.to_vec();
        remote_args.extend(["--server", daemon.base_url.as_str()]);
        let remote = run_stdout(&remote_args);

        assert_eq!(local, remote, "{format} export differs via server");
    }
}

#[test]
fn cli_export_via_server_reports_missing_target() {
    let daemon = TestDaemon::spawn();

    let mut cmd = cargo_bin_cmd!("contractiq");
    cmd.args([
        "export",
        "--records",
        LICENSES,
        "--index",
        "9",
        "--server",
        &daemon.base_url,
    ]);
    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("no record at index 9"));
}

#[test]
fn http_export_returns_tagged_payload() {
    let daemon = TestDaemon::spawn();

    let resp = Client::new()
        .post(format!("{}/v1/export", daemon.base_url))
        .json(&json!({
            "records": [{"parties": {"licensor": "Acme Corp"}}],
            "format": "pdf_text"
        }))
        .send()
        .expect("export response");
    assert!(resp.status().is_success());

    let value: Value = resp.json().expect("payload json");
    assert_eq!(value["format"], "pdf_text");
    assert_eq!(value["wrap_width"], 180.0);
    assert_eq!(value["line_height"], 8.0);
    assert_eq!(value["lines"][0], json!({"label": "Licensor", "value": "Acme Corp"}));
}

#[test]
fn http_malformed_body_is_a_json_error() {
    let daemon = TestDaemon::spawn();

    let resp = Client::new()
        .post(format!("{}/v1/query", daemon.base_url))
        .header("content-type", "application/json")
        .body("{\"records\": 3}")
        .send()
        .expect("query response");
    assert!(resp.status().is_client_error());

    let value: Value = resp.json().expect("error json");
    assert!(value["error"].as_str().is_some_and(|e| !e.is_empty()));
}
