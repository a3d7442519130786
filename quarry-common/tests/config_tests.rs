//! Integration tests for config loading and first-run bootstrap
//!
//! Tests that manipulate QUARRY_CONFIG are marked with #[serial]
//! so they never run in parallel.

use quarry_common::config::{
    bootstrap_config, example_path, load_config, resolve_config_path, CONFIG_ENV_VAR,
    DEFAULT_CONFIG_FILE,
};
use quarry_common::{Error, IdRewrite};
use serial_test::serial;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const EXAMPLE: &str = r#"
base = "/search"
page_size = 20
pagination_steps = 11
pagination_bubble = 2
query = "http://solr:8983/solr/site/select?wt=json&q={{query}}&rows={{rows}}&start={{start}}"

[replace]
regex = "^/var/www/"
with = "https://www.example.org/"

[server]
port = 8080

[logging]
level = "debug"
"#;

#[test]
fn test_bootstrap_copies_example_when_missing() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(example_path(&config_path), EXAMPLE).unwrap();

    let created = bootstrap_config(&config_path).unwrap();

    assert!(created);
    assert_eq!(fs::read_to_string(&config_path).unwrap(), EXAMPLE);
}

#[test]
fn test_bootstrap_keeps_existing_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(example_path(&config_path), EXAMPLE).unwrap();
    fs::write(&config_path, "# operator edited\n").unwrap();

    let created = bootstrap_config(&config_path).unwrap();

    assert!(!created);
    assert_eq!(fs::read_to_string(&config_path).unwrap(), "# operator edited\n");
}

#[test]
fn test_bootstrap_without_example_fails() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");

    let err = bootstrap_config(&config_path).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

#[test]
fn test_load_config_first_run() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(example_path(&config_path), EXAMPLE).unwrap();

    let config = load_config(&config_path).unwrap();

    assert!(config_path.exists());
    assert_eq!(config.base, "/search");
    assert_eq!(config.page_size, 20);
    assert_eq!(config.pagination_steps, 11);
    assert_eq!(config.pagination_bubble, 2);
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.logging.level, "debug");
    assert_eq!(
        config.rewrite.to_url("/var/www/about.html"),
        "https://www.example.org/about.html"
    );
}

#[test]
fn test_load_config_invalid_toml() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "page_size = [not toml").unwrap();

    let err = load_config(&config_path).unwrap_err();
    assert!(err.to_string().contains("Failed to parse TOML"));
}

#[test]
fn test_bundled_example_is_valid() {
    let example = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("config.toml.example");
    let toml_str = fs::read_to_string(example).unwrap();

    let config = quarry_common::SearchConfig::parse(&toml_str).unwrap();
    assert!(config.page_size >= 1);
    assert!(config.pagination_steps >= 5);
}

#[test]
#[serial]
fn test_resolve_cli_takes_precedence() {
    env::set_var(CONFIG_ENV_VAR, "/tmp/quarry-env.toml");

    let path = resolve_config_path(Some(Path::new("/tmp/quarry-cli.toml")));
    assert_eq!(path, PathBuf::from("/tmp/quarry-cli.toml"));

    env::remove_var(CONFIG_ENV_VAR);
}

#[test]
#[serial]
fn test_resolve_env_var() {
    env::set_var(CONFIG_ENV_VAR, "/tmp/quarry-env.toml");

    let path = resolve_config_path(None);
    assert_eq!(path, PathBuf::from("/tmp/quarry-env.toml"));

    env::remove_var(CONFIG_ENV_VAR);
}

#[test]
#[serial]
fn test_resolve_default() {
    env::remove_var(CONFIG_ENV_VAR);

    let path = resolve_config_path(None);
    assert_eq!(path, PathBuf::from(DEFAULT_CONFIG_FILE));
}
