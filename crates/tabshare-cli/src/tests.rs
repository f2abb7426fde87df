//! CLI tests

use clap::CommandFactory;
use std::io::Write;

use crate::cli::Cli;
use crate::commands;

#[test]
fn cli_definition_is_valid() {
    Cli::command().debug_assert();
}

#[test]
fn reconcile_command_accepts_saved_response() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"Here you go: {{"store_name": "Deli", "items": [{{"name": "Fries", "price": "3.85", "quantity": "1"}}], "subtotal": "3.85"}}"#
    )
    .unwrap();

    assert!(commands::cmd_reconcile(file.path(), true).is_ok());
    assert!(commands::cmd_reconcile(file.path(), false).is_ok());
}

#[test]
fn reconcile_command_fails_on_missing_file() {
    let path = std::path::Path::new("/nonexistent/response.txt");
    assert!(commands::cmd_reconcile(path, true).is_err());
}

#[test]
fn availability_command_accepts_request_shape() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{
            "members": [
                {{"name": "alice", "availability": {{"monday": {{"14": true}}}}}}
            ],
            "events": []
        }}"#
    )
    .unwrap();

    assert!(commands::cmd_availability(file.path(), true).is_ok());
    assert!(commands::cmd_availability(file.path(), false).is_ok());
}

#[test]
fn availability_command_rejects_empty_members() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{"members": [], "events": []}}"#).unwrap();

    assert!(commands::cmd_availability(file.path(), true).is_err());
}

#[tokio::test]
async fn analyze_command_uses_mock_backend() {
    // Scoped env mutation; tests in this binary that read VISION_BACKEND
    // are limited to this one.
    std::env::set_var("VISION_BACKEND", "mock");

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"fake image bytes").unwrap();

    let result = commands::cmd_analyze(file.path(), None, true).await;
    std::env::remove_var("VISION_BACKEND");

    assert!(result.is_ok());
}
