//! Configuration loading, secrets and command context tests

use bundle_ops::commands::CommandContext;
use bundle_ops::config::{Config, EnvSecretStore, SecretStore, github_token};
use bundle_ops::git::Logger;
use serial_test::serial;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_config(dir: &Path, yaml: &str) -> String {
    let path = dir.join("bundle.yaml");
    fs::write(&path, yaml).unwrap();
    path.to_string_lossy().into_owned()
}

fn context(config: Config) -> CommandContext {
    CommandContext {
        config,
        repos: None,
        logger: Logger::quiet(),
    }
}

#[test]
fn test_load_resolves_relative_paths() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_config(
        temp_dir.path(),
        r#"
local_root: work/local
remote_root: work/remote
project: cash
secrets_path: secrets.yaml
extra_repos:
  - project: conway
    subproject: acceptance
    description: Acceptance tests for the framework
"#,
    );

    let config = Config::load(&path).unwrap();
    assert_eq!(config.local_root_path(), temp_dir.path().join("work/local"));
    assert_eq!(
        config.remote_root_location(),
        temp_dir.path().join("work/remote").to_string_lossy()
    );
    assert_eq!(config.secrets_file(), Some(temp_dir.path().join("secrets.yaml")));

    let bundle = config.full_bundle();
    assert_eq!(bundle.len(), 6);
    assert_eq!(bundle.names().last().unwrap(), "conway.acceptance");
}

#[test]
fn test_load_keeps_github_root() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_config(
        temp_dir.path(),
        "local_root: /srv/local\nremote_root: https://github.com/acme\nproject: cash\n",
    );

    let config = Config::load(&path).unwrap();
    assert_eq!(config.remote_root_location(), "https://github.com/acme");
    assert_eq!(config.local_root_path(), Path::new("/srv/local"));
}

#[test]
fn test_load_reports_every_problem() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_config(
        temp_dir.path(),
        "local_root: ''\nremote_root: remote\nproject: cash\nrepos: [cash.svc, cash.nope]\n",
    );

    let err = Config::load(&path).unwrap_err().to_string();
    assert!(err.contains("Configuration validation failed"));
    assert!(err.contains("'local_root' cannot be empty"));
    assert!(err.contains("'cash.nope' is not part of the bundle"));
}

#[test]
fn test_load_missing_file() {
    let err = Config::load("/definitely/not/here/bundle.yaml").unwrap_err();
    assert!(err.to_string().contains("Failed to read configuration file"));
}

#[test]
fn test_save_and_load() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("saved.yaml");
    let path = path.to_string_lossy();

    let mut config = Config::new("/srv/local", "/srv/remote", "cash");
    config.repos = Some(vec!["cash.svc".to_string(), "cash.docs".to_string()]);
    config.save(&path).unwrap();

    let content = fs::read_to_string(&*path).unwrap();
    assert!(content.starts_with("---\n"));

    let loaded = Config::load(&path).unwrap();
    assert_eq!(loaded.repos, config.repos);
    assert_eq!(
        loaded.bundle(None).unwrap().names(),
        vec!["cash.svc", "cash.docs"]
    );
}

#[test]
#[serial]
fn test_push_credential_from_secrets_file() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("secrets.yaml"),
        "secrets:\n  github_token: ghp_from_file\n",
    )
    .unwrap();
    let path = write_config(
        temp_dir.path(),
        "local_root: local\nremote_root: remote\nproject: cash\ngithub_user: ada\nsecrets_path: secrets.yaml\n",
    );

    let context = context(Config::load(&path).unwrap());
    let credential = context.push_credential().unwrap().unwrap();
    assert_eq!(credential.user, "ada");
    assert_eq!(credential.token, "ghp_from_file");
    assert!(!format!("{:?}", credential).contains("ghp_from_file"));

    let workspace = context.workspace().unwrap();
    assert_eq!(workspace.local_root(), temp_dir.path().join("local"));
    assert_eq!(workspace.bundle().len(), 5);
}

#[test]
fn test_push_credential_requires_token() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("secrets.yaml"), "secrets: {}\n").unwrap();
    let path = write_config(
        temp_dir.path(),
        "local_root: local\nremote_root: remote\nproject: cash\ngithub_user: ada\nsecrets_path: secrets.yaml\n",
    );

    let err = context(Config::load(&path).unwrap())
        .push_credential()
        .unwrap_err();
    assert!(err.to_string().contains("'github_user' is set to 'ada'"));
}

#[test]
fn test_no_push_credential_without_user() {
    let config = Config::new("/srv/local", "/srv/remote", "cash");
    assert!(context(config).push_credential().unwrap().is_none());
}

#[test]
#[serial]
fn test_context_repos_narrow_the_bundle() {
    let mut context = context(Config::new("/srv/local", "/srv/remote", "cash"));
    context.repos = Some(vec!["cash.ops".to_string()]);
    assert_eq!(context.workspace().unwrap().bundle().names(), vec!["cash.ops"]);

    context.repos = Some(vec!["cash.nope".to_string()]);
    assert!(context.workspace().is_err());
}

#[test]
#[serial]
fn test_env_secret_store() {
    unsafe {
        std::env::set_var("GITHUB_TOKEN", "ghp_from_env");
    }
    assert_eq!(
        EnvSecretStore.secret("github_token").unwrap(),
        Some("ghp_from_env".to_string())
    );

    let config = Config::new("/srv/local", "/srv/remote", "cash");
    assert_eq!(github_token(&config).unwrap(), Some("ghp_from_env".to_string()));

    unsafe {
        std::env::set_var("GITHUB_TOKEN", "  ");
    }
    assert_eq!(EnvSecretStore.secret("github_token").unwrap(), None);

    unsafe {
        std::env::remove_var("GITHUB_TOKEN");
    }
    assert_eq!(github_token(&config).unwrap(), None);
}
