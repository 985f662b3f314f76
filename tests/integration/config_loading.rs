//! Integration tests for layered configuration loading

use treefs::cli::RunContext;
use treefs::config::ConfigLoader;
use tempfile::TempDir;

/// An explicit config file drives the run context
#[test]
fn test_run_context_from_config_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("custom.toml");
    std::fs::write(
        &path,
        r#"
[shell]
user = "ops"
seed_directories = ["/data", "/data/in"]
"#,
    )
    .unwrap();

    let ctx = RunContext::new(temp.path().to_path_buf(), Some(path)).unwrap();
    assert_eq!(ctx.config().shell.user, "ops");

    let shell = ctx.shell();
    assert!(shell.filesystem().resolve("/data/in").is_ok());
    assert!(shell.filesystem().resolve("/home").is_err());
}

/// Invalid values are rejected when the context is built
#[test]
fn test_invalid_config_rejected() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("bad.toml");
    std::fs::write(&path, "[logging]\nlevel = \"chatty\"\n").unwrap();

    assert!(ConfigLoader::load_from_file(&path).is_ok());
    let err = RunContext::new(temp.path().to_path_buf(), Some(path))
        .err()
        .unwrap();
    assert!(err.to_string().contains("chatty"));
}

/// A missing explicit config file is an error
#[test]
fn test_missing_config_file() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("absent.toml");
    assert!(ConfigLoader::load_from_file(&missing).is_err());
}
