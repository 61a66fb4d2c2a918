//! Configuration loading and validation.

use std::path::PathBuf;

use datarun::config::{Config, SparsePolicy};
use datarun::error::DataRunError;

#[test]
fn test_defaults() {
    let cfg = Config::default();
    assert_eq!(cfg.cluster_size, 4096);
    assert_eq!(cfg.output, PathBuf::from("reconstructed_file.bin"));
    assert_eq!(cfg.sparse, SparsePolicy::Copy);
    assert!(cfg.validate().is_ok());
}

#[test]
fn test_empty_toml_uses_defaults() {
    let cfg = Config::from_toml("").expect("parse");
    assert_eq!(cfg.cluster_size, 4096);
    assert_eq!(cfg.sparse, SparsePolicy::Copy);
}

#[test]
fn test_full_toml() {
    let cfg = Config::from_toml(
        r#"
        cluster_size = 512
        output = "carved/report.docx"
        sparse = "zero-fill"
        "#,
    )
    .expect("parse");
    assert_eq!(cfg.cluster_size, 512);
    assert_eq!(cfg.output, PathBuf::from("carved/report.docx"));
    assert_eq!(cfg.sparse, SparsePolicy::ZeroFill);
}

#[test]
fn test_zero_cluster_size_rejected() {
    assert!(matches!(
        Config::from_toml("cluster_size = 0"),
        Err(DataRunError::Config(_))
    ));
}

#[test]
fn test_unknown_sparse_policy_rejected() {
    assert!(matches!(
        Config::from_toml(r#"sparse = "skip""#),
        Err(DataRunError::Config(_))
    ));
}

#[test]
fn test_from_file() {
    let dir = tempfile::tempdir().expect("create tempdir");
    let path = dir.path().join("datarun.toml");
    std::fs::write(&path, "cluster_size = 1024\n").expect("write config");

    let cfg = Config::from_file(&path).expect("load");
    assert_eq!(cfg.cluster_size, 1024);

    let missing = dir.path().join("nope.toml");
    assert!(matches!(Config::from_file(&missing), Err(DataRunError::Config(_))));
}
