//! Integration tests for layered configuration loading.

use docsense::domain::models::StorageBackend;
use docsense::ConfigLoader;
use std::fs;

fn write_project_config(root: &std::path::Path, file: &str, contents: &str) {
    let dir = root.join(".docsense");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(file), contents).unwrap();
}

#[test]
fn test_defaults_without_files() {
    let dir = tempfile::tempdir().unwrap();

    temp_env::with_vars_unset(["OPENAI_API_KEY", "DOCSENSE_STORAGE__NAMESPACE"], || {
        let config = ConfigLoader::load_from_dir(dir.path()).unwrap();
        assert_eq!(config.storage.namespace, "ocr-sessions");
        assert_eq!(config.storage.backend, StorageBackend::Sqlite);
        assert!(config.openai.api_key.is_none());
    });
}

#[test]
fn test_local_overrides_project_and_env_overrides_both() {
    let dir = tempfile::tempdir().unwrap();
    write_project_config(
        dir.path(),
        "config.yaml",
        "storage:\n  backend: memory\n  namespace: project\nlogging:\n  level: warn\n",
    );
    write_project_config(dir.path(), "local.yaml", "storage:\n  namespace: local\n");

    temp_env::with_vars(
        [
            ("DOCSENSE_LOGGING__LEVEL", Some("debug")),
            ("OPENAI_API_KEY", Some("sk-env-key")),
        ],
        || {
            let config = ConfigLoader::load_from_dir(dir.path()).unwrap();
            assert_eq!(config.storage.backend, StorageBackend::Memory);
            assert_eq!(config.storage.namespace, "local");
            assert_eq!(config.logging.level, "debug");
            assert_eq!(config.openai.api_key.as_deref(), Some("sk-env-key"));
        },
    );
}

#[test]
fn test_invalid_layer_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    write_project_config(dir.path(), "config.yaml", "models:\n  answer:\n    model: gpt-4o\n    max_tokens: 0\n");

    let err = ConfigLoader::load_from_dir(dir.path()).unwrap_err();
    assert!(err.to_string().contains("max_tokens"));
}
