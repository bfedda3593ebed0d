//! End-to-end tests for layered configuration resolution.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::time::Duration;

use condo_backend::config::{ConfigError, ConfigResolver, ResolvedConfig, ENV_OVERRIDES};
use tempfile::TempDir;

mod common;

use common::{env, write_config};

fn resolver(dir: &Path, vars: &[(&str, &str)]) -> ConfigResolver<HashMap<String, String>> {
    ConfigResolver::new(dir.join("configs"))
        .env_file(Some(dir.join(".env")))
        .with_env(env(vars))
}

/// Read the field an override key targets.
fn override_field<'a>(config: &'a ResolvedConfig, var: &str) -> &'a str {
    match var {
        "DB_HOST" => &config.database.host,
        "DB_PORT" => &config.database.port,
        "DB_USER" => &config.database.user,
        "DB_PASS" => &config.database.password,
        "DB_NAME" => &config.database.name,
        "REDIS_URL" => &config.cache.url,
        "JWT_SECRET" => &config.secret.jwt_secret,
        other => panic!("unknown override {other}"),
    }
}

#[test]
fn test_each_override_key_precedence() {
    for (var, _) in ENV_OVERRIDES {
        let tmp = TempDir::new().unwrap();
        write_config(tmp.path(), &format!("{var}: from-file\n"));

        let env_wins = resolver(tmp.path(), &[(var, "from-env")]).resolve().unwrap();
        assert_eq!(override_field(&env_wins, var), "from-env", "{var}");

        let file_only = resolver(tmp.path(), &[]).resolve().unwrap();
        assert_eq!(override_field(&file_only, var), "from-file", "{var}");

        let empty_env = resolver(tmp.path(), &[(var, "")]).resolve().unwrap();
        assert_eq!(override_field(&empty_env, var), "from-file", "{var}");

        let empty_dir = TempDir::new().unwrap();
        let neither = resolver(empty_dir.path(), &[]).resolve().unwrap();
        assert_eq!(override_field(&neither, var), "", "{var}");
    }
}

#[test]
fn test_file_only_keys_ignore_environment() {
    let tmp = TempDir::new().unwrap();
    write_config(
        tmp.path(),
        "app:\n  name: CondoAPI\n  version: 1.2.0\n  description: Condo management\n\
         logging:\n  level: info\n  format: json\n\
         api:\n  rate_limit: 100/m\n  timeout: 30s\n",
    );

    let vars = [
        ("app.name", "EnvName"),
        ("APP_NAME", "EnvName"),
        ("APP_VERSION", "9.9.9"),
        ("APP_DESCRIPTION", "env"),
        ("LOGGING_LEVEL", "trace"),
        ("LOGGING_FORMAT", "text"),
        ("API_RATE_LIMIT", "1/s"),
        ("API_TIMEOUT", "1s"),
        ("app", "scalar"),
        ("logging", "scalar"),
    ];
    let config = resolver(tmp.path(), &vars).resolve().unwrap();

    assert_eq!(config.app.name, "CondoAPI");
    assert_eq!(config.app.version, "1.2.0");
    assert_eq!(config.app.description, "Condo management");
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.format, "json");
    assert_eq!(config.api.rate_limit, "100/m");
    assert_eq!(config.api.timeout, "30s");
}

#[test]
fn test_file_only_keys_stay_empty_without_file() {
    let tmp = TempDir::new().unwrap();
    let config = resolver(tmp.path(), &[("APP_NAME", "EnvName"), ("LOGGING_LEVEL", "debug")])
        .resolve()
        .unwrap();

    assert_eq!(config.app.name, "");
    assert_eq!(config.logging.level, "");
}

#[test]
fn test_scenario_env_host_and_file_app_name() {
    let tmp = TempDir::new().unwrap();
    write_config(tmp.path(), "DB_HOST: filehost\napp:\n  name: CondoAPI\n");

    let config = resolver(tmp.path(), &[("DB_HOST", "envhost")]).resolve().unwrap();

    assert_eq!(config.database.host, "envhost");
    assert_eq!(config.app.name, "CondoAPI");
}

#[test]
fn test_scenario_nothing_present() {
    let tmp = TempDir::new().unwrap();
    let config = resolver(tmp.path(), &[("PATH", "/usr/bin")]).resolve().unwrap();

    assert_eq!(config, ResolvedConfig::default());
    assert_eq!(config.app.address(), "0.0.0.0:8080");
    assert_eq!(config.app.shutdown_timeout(), Duration::from_secs(10));
}

#[test]
fn test_dotenv_layers_under_live_environment() {
    let tmp = TempDir::new().unwrap();
    write_config(tmp.path(), "DB_HOST: filehost\nDB_USER: fileuser\nDB_NAME: filedb\n");
    fs::write(
        tmp.path().join(".env"),
        "DB_HOST=dotenvhost\nDB_USER=dotenvuser\nDB_NAME=dotenvdb\nAPP_NAME=ignored\n",
    )
    .unwrap();

    let config = resolver(tmp.path(), &[("DB_USER", "liveuser"), ("DB_NAME", "")])
        .resolve()
        .unwrap();

    // dotenv beats the file
    assert_eq!(config.database.host, "dotenvhost");
    // live environment beats dotenv
    assert_eq!(config.database.user, "liveuser");
    // an empty live value shadows dotenv and then falls through to the file
    assert_eq!(config.database.name, "filedb");
    assert_eq!(config.app.name, "");
}

#[test]
fn test_malformed_dotenv_is_soft() {
    let tmp = TempDir::new().unwrap();
    write_config(tmp.path(), "DB_HOST: filehost\n");
    fs::write(tmp.path().join(".env"), "THIS IS NOT DOTENV\n").unwrap();

    let config = resolver(tmp.path(), &[]).resolve().unwrap();
    assert_eq!(config.database.host, "filehost");
}

#[test]
fn test_unparsable_yaml_is_soft() {
    let tmp = TempDir::new().unwrap();
    write_config(tmp.path(), "app:\n  name: [unterminated\n");

    let config = resolver(tmp.path(), &[("REDIS_URL", "redis://env:6379")]).resolve().unwrap();
    assert_eq!(config.cache.url, "redis://env:6379");
    assert_eq!(config.app.name, "");
}

#[test]
fn test_wrong_shape_is_fatal() {
    let tmp = TempDir::new().unwrap();
    write_config(tmp.path(), "app:\n  name:\n    - Condo\n    - API\n");

    let result = resolver(tmp.path(), &[]).resolve();
    assert!(matches!(result, Err(ConfigError::Decode(_))));
}

#[test]
fn test_override_cannot_hide_wrong_shape_elsewhere() {
    let tmp = TempDir::new().unwrap();
    write_config(tmp.path(), "logging: verbose\n");

    let result = resolver(tmp.path(), &[("DB_HOST", "envhost")]).resolve();
    assert!(matches!(result, Err(ConfigError::Decode(_))));
}

#[test]
fn test_override_replaces_wrong_shape_in_file() {
    let tmp = TempDir::new().unwrap();
    write_config(tmp.path(), "DB_PORT:\n  primary: 5432\n");

    let config = resolver(tmp.path(), &[("DB_PORT", "6543")]).resolve().unwrap();
    assert_eq!(config.database.port, "6543");
}

#[test]
fn test_mixed_case_and_numeric_values() {
    let tmp = TempDir::new().unwrap();
    write_config(
        tmp.path(),
        "db_host: lower\nDb_Port: 5432\nAPP:\n  NAME: Condo\n  port: 3000\n  shutdown_timeout: 5s\n",
    );

    let config = resolver(tmp.path(), &[]).resolve().unwrap();

    assert_eq!(config.database.host, "lower");
    assert_eq!(config.database.port, "5432");
    assert_eq!(config.app.name, "Condo");
    assert_eq!(config.app.address(), "0.0.0.0:3000");
    assert_eq!(config.app.shutdown_timeout(), Duration::from_secs(5));
}

#[test]
fn test_yml_extension_found() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("configs");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("app.yml"), "app:\n  name: FromYml\n").unwrap();

    let config = resolver(tmp.path(), &[]).resolve().unwrap();
    assert_eq!(config.app.name, "FromYml");
}

#[test]
fn test_resolution_is_idempotent() {
    let tmp = TempDir::new().unwrap();
    write_config(
        tmp.path(),
        "DB_HOST: filehost\napp:\n  name: CondoAPI\nlogging:\n  level: debug\n",
    );
    fs::write(tmp.path().join(".env"), "JWT_SECRET=dotenv-secret\n").unwrap();

    let resolver = resolver(tmp.path(), &[("DB_PASS", "pw")]);
    let first = resolver.resolve().unwrap();
    let second = resolver.resolve().unwrap();

    assert_eq!(first, second);
    assert_eq!(first.secret.jwt_secret, "dotenv-secret");
}
