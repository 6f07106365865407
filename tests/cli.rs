use assert_cmd::prelude::*;
use mockito::Matcher;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::tempdir;

const ACCESS_ID: &str = "12345";

/// `tcop` with no TCOP_* leaking in from the environment
fn tcop(home: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("tcop"));
    for var in [
        "TCOP_CONFIG",
        "TCOP_ACCESS_ID",
        "TCOP_SECRET_KEY",
        "TCOP_BASE_URL",
        "TCOP_OWNER",
        "TCOP_FORMAT",
        "TCOP_DEBUG",
    ] {
        cmd.env_remove(var);
    }
    cmd.env("HOME", home).env("NO_COLOR", "1").env("CLICOLOR", "0");
    cmd
}

fn write_config(dir: &Path, base_url: &str, owner: Option<&str>) -> PathBuf {
    let path = dir.join("config.yaml");
    let mut contents = format!(
        "access_id: \"{ACCESS_ID}\"\nsecret_key: secret\nbase_url: {base_url}\npreferences:\n  timeout_secs: 5\n"
    );
    if let Some(owner) = owner {
        contents.push_str(&format!("default_owner: {owner}\n"));
    }
    fs::write(&path, contents).expect("failed to write config");
    path
}

fn signed() -> Matcher {
    Matcher::Regex(format!(r"^TC {ACCESS_ID}:[A-Za-z0-9+/]{{43}}=$"))
}

fn timestamp() -> Matcher {
    Matcher::Regex(r"^\d{10,}$".to_string())
}

// ============================================================================
// Local commands
// ============================================================================

#[test]
fn status_uses_custom_config_path() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let config_path = write_config(temp.path(), "https://sandbox.example.com", Some("Acme Co"));

    let assert = tcop(temp.path())
        .arg("status")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(stdout.contains("Access ID: 12345"));
    assert!(stdout.contains("Default owner: Acme Co"));
    assert!(stdout.contains("https://sandbox.example.com"));
    assert!(stdout.contains(&config_path.to_string_lossy().to_string()));
    assert!(!stdout.contains("secret"));

    Ok(())
}

#[test]
fn path_prints_query_in_fixed_order() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;

    tcop(temp.path())
        .args([
            "path",
            "adversaries",
            "--indicator",
            "host:evil.example.com",
            "--owner",
            "Acme Co",
            "--start",
            "100",
            "--limit",
            "50",
        ])
        .assert()
        .success()
        .stdout(
            "/v2/indicators/hosts/evil.example.com/groups/adversaries?owner=Acme%20Co&resultStart=100&resultLimit=50\n",
        );

    Ok(())
}

#[test]
fn path_rejects_unsupported_filter() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;

    tcop(temp.path())
        .args(["path", "owners", "--tag", "APT 1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("owners cannot be filtered by tag"));

    Ok(())
}

#[test]
fn path_rejects_pagination_on_single_entity() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;

    tcop(temp.path())
        .args(["path", "threats", "--group", "threat:42", "--limit", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("single-entity"));

    Ok(())
}

#[test]
fn families_lists_every_resource() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;

    tcop(temp.path())
        .arg("families")
        .assert()
        .success()
        .stdout(predicate::str::contains("victim assets"))
        .stdout(predicate::str::contains("--indicator-type"));

    Ok(())
}

#[test]
fn completion_generates_script() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;

    tcop(temp.path())
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("tcop"));

    Ok(())
}

// ============================================================================
// Error Scenario Tests
// ============================================================================

/// Test that missing credentials show an actionable error message.
#[test]
fn missing_config_shows_helpful_error() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let nonexistent_config = temp.path().join("does-not-exist.yaml");

    let assert = tcop(temp.path())
        .args(["list", "owners", "--config"])
        .arg(&nonexistent_config)
        .assert()
        .failure();

    let stderr = String::from_utf8_lossy(&assert.get_output().stderr);
    assert!(
        stderr.contains("tcop init"),
        "Expected error to mention 'tcop init', got: {}",
        stderr
    );

    Ok(())
}

#[test]
fn invalid_base_url_fails_before_sending() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let config_path = write_config(temp.path(), "ftp://api.example.com", None);

    tcop(temp.path())
        .args(["list", "owners", "--config"])
        .arg(&config_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("http://"));

    Ok(())
}

#[test]
fn bad_limit_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;

    tcop(temp.path())
        .args(["path", "tags", "--limit", "501"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("between 1 and 500"));

    Ok(())
}

// ============================================================================
// Requests against a mock API
// ============================================================================

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn list_adversaries_sends_signed_request() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();

    let mock = server
        .mock("GET", "/v2/indicators/hosts/evil.example.com/groups/adversaries")
        .match_query(Matcher::Missing)
        .match_header("authorization", signed())
        .match_header("timestamp", timestamp())
        .with_status(200)
        .with_body(
            r#"{
                "status": "Success",
                "data": {
                    "resultCount": 2,
                    "adversary": [
                        { "id": 7, "name": "Evil Corp", "ownerName": "Acme Co" },
                        { "id": 8, "name": "Bad Guy", "ownerName": "Acme Co" }
                    ]
                }
            }"#,
        )
        .create();

    let temp = tempdir()?;
    let config_path = write_config(temp.path(), &server.url(), None);

    let assert = tcop(temp.path())
        .args([
            "list",
            "adversaries",
            "--indicator",
            "host:evil.example.com",
            "--config",
        ])
        .arg(&config_path)
        .assert()
        .success();

    mock.assert();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(stdout.contains("Evil Corp"));
    assert!(stdout.contains("Bad Guy"));
    assert!(!stdout.contains("resultCount"));

    Ok(())
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn url_indicator_is_escaped_once() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();

    let mock = server
        .mock("GET", "/v2/indicators/urls/http%3A%2F%2Fexample.com%2Fa%20b/tags")
        .match_query(Matcher::Missing)
        .match_header("authorization", signed())
        .with_status(200)
        .with_body(r#"{ "status": "Success", "data": { "resultCount": 1, "tag": [{ "name": "APT 1" }] } }"#)
        .create();

    let temp = tempdir()?;
    let config_path = write_config(temp.path(), &server.url(), None);

    tcop(temp.path())
        .args(["list", "tags", "--indicator", "url:http://example.com/a b", "--config"])
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("APT 1"));

    mock.assert();
    Ok(())
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn default_owner_and_pagination_go_in_query() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();

    let mock = server
        .mock("GET", "/v2/groups/threats")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("owner".into(), "Acme Co".into()),
            Matcher::UrlEncoded("resultStart".into(), "500".into()),
            Matcher::UrlEncoded("resultLimit".into(), "500".into()),
        ]))
        .with_status(200)
        .with_body(r#"{ "status": "Success", "data": { "resultCount": 501, "threat": [{ "id": 1, "name": "Last" }] } }"#)
        .create();

    let temp = tempdir()?;
    let config_path = write_config(temp.path(), &server.url(), Some("Acme Co"));

    let assert = tcop(temp.path())
        .args([
            "list", "threats", "--start", "500", "--limit", "500", "--format", "json", "--config",
        ])
        .arg(&config_path)
        .assert()
        .success();

    mock.assert();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    let parsed: serde_json::Value = serde_json::from_str(&stdout)?;
    assert_eq!(parsed["data"][0]["name"], "Last");
    assert_eq!(parsed["meta"]["resultCount"], 501);

    Ok(())
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn credentials_from_environment() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();

    let mock = server
        .mock("GET", "/v2/owners")
        .match_query(Matcher::Missing)
        .match_header("authorization", Matcher::Regex(r"^TC env-id:".to_string()))
        .with_status(200)
        .with_body(r#"{ "status": "Success", "data": { "resultCount": 1, "owner": [{ "id": 1, "name": "Acme Co", "type": "Organization" }] } }"#)
        .create();

    let temp = tempdir()?;

    tcop(temp.path())
        .args(["list", "owners"])
        .env("TCOP_ACCESS_ID", "env-id")
        .env("TCOP_SECRET_KEY", "env-secret")
        .env("TCOP_BASE_URL", server.url())
        .assert()
        .success()
        .stdout(predicate::str::contains("Acme Co"));

    mock.assert();
    Ok(())
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn api_failure_status_is_reported() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();

    let _mock = server
        .mock("GET", "/v2/groups/incidents")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{ "status": "Failure - invalid owner" }"#)
        .create();

    let temp = tempdir()?;
    let config_path = write_config(temp.path(), &server.url(), None);

    tcop(temp.path())
        .args(["list", "incidents", "--owner", "Nobody", "--config"])
        .arg(&config_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failure - invalid owner"));

    Ok(())
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn failure_envelope_on_http_error_keeps_message() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();

    let _mock = server
        .mock("GET", "/v2/groups/adversaries/99")
        .match_query(Matcher::Any)
        .with_status(404)
        .with_body(r#"{ "status": "Failure", "message": "Adversary not found" }"#)
        .create();

    let temp = tempdir()?;
    let config_path = write_config(temp.path(), &server.url(), None);

    tcop(temp.path())
        .args(["list", "adversaries", "--group", "adversary:99", "--config"])
        .arg(&config_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Adversary not found"));

    Ok(())
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn unauthorized_error_suggests_checking_keys() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();

    let _mock = server
        .mock("GET", "/v2/owners")
        .match_query(Matcher::Any)
        .with_status(401)
        .with_body("")
        .create();

    let temp = tempdir()?;
    let config_path = write_config(temp.path(), &server.url(), None);

    tcop(temp.path())
        .args(["list", "owners", "--config"])
        .arg(&config_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("access ID and secret key"));

    Ok(())
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn create_incident_sends_converted_date() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();

    let mock = server
        .mock("POST", "/v2/groups/incidents")
        .match_query(Matcher::UrlEncoded("owner".into(), "Acme Co".into()))
        .match_header("authorization", signed())
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(serde_json::json!({
            "name": "Breach",
            "eventDate": "2014-11-03T00:00:00+00:00"
        })))
        .with_status(201)
        .with_body(r#"{ "status": "Success", "data": { "incident": { "id": 44, "name": "Breach" } } }"#)
        .create();

    let temp = tempdir()?;
    let config_path = write_config(temp.path(), &server.url(), Some("Acme Co"));

    tcop(temp.path())
        .args([
            "create",
            "incident",
            "Breach",
            "--event-date",
            "2014-11-03",
            "--config",
        ])
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("44"));

    mock.assert();
    Ok(())
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn tag_add_posts_escaped_name() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();

    let mock = server
        .mock("POST", "/v2/groups/threats/4/tags/APT%201")
        .match_query(Matcher::Missing)
        .match_header("authorization", signed())
        .with_status(201)
        .with_body(r#"{ "status": "Success" }"#)
        .create();

    let temp = tempdir()?;
    let config_path = write_config(temp.path(), &server.url(), None);

    tcop(temp.path())
        .args(["tag", "add", "--group", "threat:4", "APT 1", "--config"])
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Tagged APT 1"));

    mock.assert();
    Ok(())
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn download_prints_raw_signature() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();

    let _mock = server
        .mock("GET", "/v2/groups/signatures/31/download")
        .match_query(Matcher::Missing)
        .with_status(200)
        .with_body("rule evil { condition: true }")
        .create();

    let temp = tempdir()?;
    let config_path = write_config(temp.path(), &server.url(), None);

    tcop(temp.path())
        .args(["download", "31", "--config"])
        .arg(&config_path)
        .assert()
        .success()
        .stdout("rule evil { condition: true }");

    Ok(())
}

#[test]
fn bad_event_date_fails_before_sending() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    // Nothing listens here; a request would fail with a network error instead
    let config_path = write_config(temp.path(), "http://127.0.0.1:9", None);

    tcop(temp.path())
        .args([
            "create",
            "incident",
            "Breach",
            "--event-date",
            "sometime",
            "--config",
        ])
        .arg(&config_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot convert date 'sometime'"));

    Ok(())
}
