use std::fs;
use std::path::PathBuf;

use clap::Parser;
use tempfile::TempDir;

use cartmate::cli::Cli;
use cartmate::config::Settings;

#[test]
fn test_load_config_file() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let root = temp_dir.path();

    let cartmate_toml = r#"
[server]
host = "0.0.0.0"
port = 4000

[model]
default = "claude-3-5-haiku-latest"
max_tokens = 512

[search]
max_results = 3
default_retailers = ["Costco", "Target"]

[documents]
tools_schema = "schemas/tools.json"
policies = "data/policies.json"
"#;
    let config_path = root.join("cartmate.toml");
    fs::write(&config_path, cartmate_toml)?;

    let cli = Cli {
        config: config_path,
        host: None,
        port: None,
        model: None,
    };
    let settings = Settings::new_with_cli(&cli)?;

    assert_eq!(settings.server.host, "0.0.0.0");
    assert_eq!(settings.server.port, 4000);
    assert_eq!(settings.model.default, "claude-3-5-haiku-latest");
    assert_eq!(settings.model.max_tokens, 512);
    assert_eq!(settings.search.max_results, 3);
    assert_eq!(settings.search.default_retailers, vec!["Costco", "Target"]);
    assert_eq!(settings.documents.tools_schema, "schemas/tools.json");
    assert_eq!(settings.documents.policies, "data/policies.json");

    Ok(())
}

#[test]
fn test_missing_config_file_uses_defaults() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;

    let cli = Cli {
        config: temp_dir.path().join("nope.toml"),
        host: None,
        port: None,
        model: None,
    };
    let settings = Settings::new_with_cli(&cli)?;

    assert_eq!(settings.server.host, "127.0.0.1");
    assert_eq!(settings.server.port, 3000);
    assert_eq!(settings.model.default, "claude-3-7-sonnet-latest");
    assert_eq!(settings.model.max_tokens, 1024);
    assert_eq!(
        settings.search.default_retailers,
        vec!["Target", "Walmart", "BestBuy"]
    );
    assert_eq!(settings.documents.tools_schema, "config/tools.json");

    Ok(())
}

#[test]
fn test_cli_overrides_config_file() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let config_path = temp_dir.path().join("cartmate.toml");
    fs::write(
        &config_path,
        r#"
[server]
host = "127.0.0.1"
port = 3000
"#,
    )?;

    let cli = Cli {
        config: config_path,
        host: Some("0.0.0.0".to_string()),
        port: Some(9999),
        model: Some("claude-3-opus-latest".to_string()),
    };
    let settings = Settings::new_with_cli(&cli)?;

    assert_eq!(settings.server.host, "0.0.0.0");
    assert_eq!(settings.server.port, 9999);
    assert_eq!(settings.model.default, "claude-3-opus-latest");

    Ok(())
}

#[test]
fn test_invalid_config_is_rejected() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let config_path = temp_dir.path().join("cartmate.toml");
    fs::write(
        &config_path,
        r#"
[server]
host = "127.0.0.1"
port = 3000

[model]
max_tokens = 0
"#,
    )?;

    let cli = Cli {
        config: config_path,
        host: None,
        port: None,
        model: None,
    };
    let err = Settings::new_with_cli(&cli).unwrap_err();
    assert!(err.to_string().contains("max_tokens"));

    Ok(())
}

#[test]
fn test_cli_parses_config_path() {
    let cli = Cli::parse_from(["cartmate", "--config", "custom.toml"]);
    assert_eq!(cli.config, PathBuf::from("custom.toml"));
}
