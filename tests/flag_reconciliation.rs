//! Tests for resolving the session context and namespace from CLI flags

use std::path::Path;
use std::sync::Arc;

use k9s_config::config::ConfigResult;
use k9s_config::kube::{Connection, OfflineSettings};
use k9s_config::{Config, ConfigError, Flags};
use mockall::mock;

mock! {
    Cluster {}

    impl Connection for Cluster {
        fn current_context_name(&self) -> ConfigResult<String>;
        fn is_valid_namespace(&self, ns: &str) -> ConfigResult<bool>;
    }
}

fn cluster_on(context: &'static str) -> MockCluster {
    let mut conn = MockCluster::new();
    conn.expect_current_context_name()
        .returning(move || Ok(context.to_string()));
    conn
}

fn config_in(dir: &Path) -> Config {
    let mut cfg = Config::new(Arc::new(OfflineSettings));
    cfg.k9s.screen_dump_dir = dir.join("dumps").to_string_lossy().into_owned();
    cfg
}

fn flags(context: &str, namespace: &str, all: bool) -> Flags {
    Flags {
        context: Some(context.to_string()),
        namespace: Some(namespace.to_string()),
        all_namespaces: Some(all),
    }
}

/// Config with a saved `dev` context whose namespace is `staging`, then reset
fn config_with_saved_namespace(dir: &Path) -> Config {
    let mut cfg = config_in(dir);
    cfg.set_current_context("dev").unwrap();
    cfg.set_active_namespace("staging").unwrap();
    cfg.reset();
    cfg
}

#[test]
fn test_namespace_flag_beats_saved_namespace() {
    let tmp = tempfile::tempdir().unwrap();
    let mut cfg = config_with_saved_namespace(tmp.path());
    let conn = cluster_on("dev");

    cfg.reconcile(&flags("", "prod", false), Some(&conn)).unwrap();

    assert_eq!(cfg.active_context_name(), Some("dev"));
    assert_eq!(cfg.active_namespace(), "prod");
}

#[test]
fn test_all_namespaces_flag_wins() {
    let tmp = tempfile::tempdir().unwrap();
    let mut cfg = config_with_saved_namespace(tmp.path());
    let conn = cluster_on("dev");

    cfg.reconcile(&flags("", "prod", true), Some(&conn)).unwrap();

    assert_eq!(cfg.active_namespace(), "all");
}

#[test]
fn test_saved_namespace_without_flags() {
    let tmp = tempfile::tempdir().unwrap();
    let mut cfg = config_with_saved_namespace(tmp.path());
    let conn = cluster_on("dev");

    cfg.reconcile(&Flags::default(), Some(&conn)).unwrap();

    assert_eq!(cfg.active_context_name(), Some("dev"));
    assert_eq!(cfg.active_namespace(), "staging");
}

#[test]
fn test_fresh_context_uses_default_namespace() {
    let tmp = tempfile::tempdir().unwrap();
    let mut cfg = config_in(tmp.path());
    let conn = cluster_on("dev");

    cfg.reconcile(&flags("", "", false), Some(&conn)).unwrap();

    assert_eq!(cfg.active_namespace(), "default");
    assert_eq!(cfg.fav_namespaces(), ["default"]);
}

#[test]
fn test_context_flag_beats_connection() {
    let tmp = tempfile::tempdir().unwrap();
    let mut cfg = config_in(tmp.path());
    let mut conn = MockCluster::new();
    conn.expect_current_context_name().never();

    cfg.reconcile(&flags("prod", "", false), Some(&conn)).unwrap();

    assert_eq!(cfg.active_context_name(), Some("prod"));
}

#[test]
fn test_connection_error_propagates() {
    let tmp = tempfile::tempdir().unwrap();
    let mut cfg = config_in(tmp.path());
    let mut conn = MockCluster::new();
    conn.expect_current_context_name()
        .returning(|| Err(ConfigError::Connection("cluster unreachable".into())));

    let err = cfg.reconcile(&Flags::default(), Some(&conn)).unwrap_err();

    assert!(matches!(err, ConfigError::Connection(msg) if msg == "cluster unreachable"));
    assert!(cfg.active_context_name().is_none());
}

#[test]
fn test_no_connection_and_no_context_flag() {
    let tmp = tempfile::tempdir().unwrap();
    let mut cfg = config_in(tmp.path());

    assert!(cfg.reconcile(&Flags::default(), None).is_err());

    cfg.reconcile(&flags("dev", "kube-system", false), None).unwrap();
    assert_eq!(cfg.active_namespace(), "kube-system");
}

#[test]
fn test_reconcile_is_repeatable() {
    let tmp = tempfile::tempdir().unwrap();
    let mut cfg = config_in(tmp.path());
    let conn = cluster_on("dev");

    cfg.reconcile(&flags("", "prod", false), Some(&conn)).unwrap();
    cfg.reconcile(&Flags::default(), Some(&conn)).unwrap();
    assert_eq!(cfg.active_namespace(), "prod");

    cfg.reconcile(&flags("stage", "", false), Some(&conn)).unwrap();
    assert_eq!(cfg.active_context_name(), Some("stage"));
    assert_eq!(cfg.active_namespace(), "default");
    assert!(cfg.k9s.contexts.contains_key("dev"));
}

#[test]
fn test_screen_dump_dir_is_created() {
    let tmp = tempfile::tempdir().unwrap();
    let mut cfg = config_in(tmp.path());

    cfg.reconcile(&flags("dev", "", false), None).unwrap();

    assert!(tmp.path().join("dumps").is_dir());
}

#[test]
fn test_screen_dump_dir_failure_is_io_error() {
    let tmp = tempfile::tempdir().unwrap();
    let blocker = tmp.path().join("blocker");
    std::fs::write(&blocker, "not a directory").unwrap();

    let mut cfg = Config::new(Arc::new(OfflineSettings));
    cfg.k9s.screen_dump_dir = blocker.join("dumps").to_string_lossy().into_owned();

    let err = cfg.reconcile(&flags("dev", "", false), None).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}

#[test]
fn test_screen_dump_path_is_a_file() {
    let tmp = tempfile::tempdir().unwrap();
    let dumps = tmp.path().join("dumps");
    std::fs::write(&dumps, "").unwrap();

    let mut cfg = config_in(tmp.path());
    let err = cfg.reconcile(&flags("dev", "", false), None).unwrap_err();

    assert!(matches!(err, ConfigError::Io { .. }));
}
