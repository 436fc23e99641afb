//! End-to-end tests for the `dohscope` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Binary isolated from the user's config file and environment.
fn dohscope(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("dohscope").unwrap();
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env_remove("DOHSCOPE_RESOLVER")
        .env_remove("DOHSCOPE_PROXY")
        .env_remove("RUST_LOG")
        .arg("--no-color");
    cmd
}

async fn mock_upstreams() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/resolve"))
        .and(query_param("name", "www.example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "Status": 0,
            "Answer": [
                {"name": "www.example.com.", "type": 5, "TTL": 3600, "data": "example.com."}
            ]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/resolve"))
        .and(query_param("name", "example.com."))
        .and(query_param("type", "A"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "Status": 0,
            "Answer": [
                {"name": "example.com.", "type": 1, "TTL": 300, "data": "192.0.2.1"}
            ]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/get"))
        .respond_with(
            ResponseTemplate::new(200).insert_header("x-certificate-valid-until", "2099-01-01"),
        )
        .mount(&server)
        .await;

    server
}

fn with_server(cmd: &mut Command, server: &MockServer) {
    cmd.arg("--resolver")
        .arg(format!("{}/resolve", server.uri()))
        .arg("--proxy")
        .arg(format!("{}/get", server.uri()));
}

#[test]
fn test_help_lists_commands() {
    let home = TempDir::new().unwrap();
    dohscope(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("resolve"))
        .stdout(predicate::str::contains("inspect"));
}

#[test]
fn test_types_as_json() {
    let home = TempDir::new().unwrap();
    dohscope(&home)
        .args(["types", "-o", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"CNAME\""))
        .stdout(predicate::str::contains("\"code\": 28"));
}

#[test]
fn test_empty_domain_rejected() {
    let home = TempDir::new().unwrap();
    dohscope(&home)
        .args(["resolve", "  "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Domain must not be empty"));
}

#[test]
fn test_config_set_then_show() {
    let home = TempDir::new().unwrap();

    dohscope(&home)
        .args(["config", "set", "timeout_secs", "4"])
        .assert()
        .success();

    dohscope(&home)
        .args(["config", "show", "-o", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"timeout_secs\": 4"));

    dohscope(&home)
        .args(["config", "set", "colour", "blue"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown config key"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_resolve_follows_cname() {
    let server = mock_upstreams().await;
    let home = TempDir::new().unwrap();

    let mut cmd = dohscope(&home);
    with_server(&mut cmd, &server);
    cmd.args(["resolve", "www.example.com", "-o", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"chain_depth\": 1"))
        .stdout(predicate::str::contains("192.0.2.1"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_cert_reports_expiry() {
    let server = mock_upstreams().await;
    let home = TempDir::new().unwrap();

    let mut cmd = dohscope(&home);
    with_server(&mut cmd, &server);
    cmd.args(["cert", "example.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Valid SSL Detected"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_inspect_reports_everything() {
    let server = mock_upstreams().await;
    let home = TempDir::new().unwrap();

    let mut cmd = dohscope(&home);
    with_server(&mut cmd, &server);
    cmd.args(["inspect", "www.example.com", "-o", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"status\": \"valid\""))
        .stdout(predicate::str::contains("\"state\": \"estimated\""));
}
