use std::io::Write;

use triview_core::config::ClientConfig;

#[test]
fn test_defaults() {
    let config = ClientConfig::default();
    assert_eq!(config.server_url, "http://localhost:5000");
    assert_eq!(config.username, "admin");
    assert!(!config.has_credentials());
}

#[test]
fn test_load_full_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("triview.toml");
    let mut f = std::fs::File::create(&path).unwrap();
    writeln!(
        f,
        "server_url = \"http://pacs.example:8080\"\nusername = \"viewer\"\npassword = \"s3cret\""
    )
    .unwrap();

    let config = ClientConfig::load(&path).unwrap();
    assert_eq!(config.server_url, "http://pacs.example:8080");
    assert_eq!(config.username, "viewer");
    assert!(config.has_credentials());
}

#[test]
fn test_partial_file_fills_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("triview.toml");
    std::fs::write(&path, "password = \"s3cret\"\n").unwrap();

    let config = ClientConfig::load(&path).unwrap();
    assert_eq!(config.server_url, "http://localhost:5000");
    assert_eq!(config.username, "admin");
    assert_eq!(config.password, "s3cret");
}

#[test]
fn test_missing_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = ClientConfig::load_or_default(&dir.path().join("absent.toml"));
    assert_eq!(config.server_url, "http://localhost:5000");
}

#[test]
fn test_malformed_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("triview.toml");
    std::fs::write(&path, "server_url = [not toml").unwrap();
    assert!(ClientConfig::load(&path).is_err());
}
