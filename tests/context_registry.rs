//! Context registry tests

use std::sync::Arc;

use k9s_config::config::{ConfigLoader, K9s};
use k9s_config::kube::{KubeconfigSettings, OfflineSettings};
use k9s_config::{Config, ConfigError};

const KUBECONFIG: &str = r#"
apiVersion: v1
kind: Config
current-context: dev
clusters:
- name: dev-cluster
  cluster:
    server: https://127.0.0.1:6443
contexts:
- name: dev
  context:
    cluster: dev-cluster
    user: dev-user
    namespace: staging
- name: prod
  context:
    cluster: prod-cluster
    user: prod-user
users:
- name: dev-user
  user:
    token: abc
"#;

#[test]
fn test_activation_tracks_last_context() {
    let mut cfg = Config::new(Arc::new(OfflineSettings));

    for name in ["dev", "prod", "arn:aws:eks:us-east-1:123:cluster/prod", "dev"] {
        cfg.set_current_context(name).unwrap();
        assert_eq!(cfg.active_context_name(), Some(name));
    }
    assert_eq!(cfg.k9s.contexts.len(), 3);
}

#[test]
fn test_activation_from_kubeconfig() {
    let settings = KubeconfigSettings::from_yaml(KUBECONFIG).unwrap();
    let mut cfg = Config::new(Arc::new(settings));

    let ct = cfg.set_current_context("dev").unwrap();
    assert_eq!(ct.cluster_name, "dev-cluster");
    assert_eq!(ct.namespace.active, "staging");

    // Contexts missing from the kubeconfig still activate
    let ct = cfg.set_current_context("kind-local").unwrap();
    assert_eq!(ct.cluster_name, "kind-local");
    assert_eq!(ct.namespace.active, "default");
}

#[test]
fn test_side_files_use_kubeconfig_cluster() {
    let settings = KubeconfigSettings::from_yaml(KUBECONFIG).unwrap();
    let mut cfg = Config::new(Arc::new(settings));
    cfg.set_current_context("dev").unwrap();

    let aliases = cfg.context_aliases_path().unwrap();
    let plugins = cfg.context_plugins_path().unwrap();
    assert!(aliases.ends_with("clusters/dev-cluster/dev/aliases.yaml"));
    assert!(plugins.ends_with("clusters/dev-cluster/dev/plugins.yaml"));

    cfg.k9s.screen_dump_dir = "/tmp/dumps".to_string();
    assert_eq!(
        cfg.k9s.context_screen_dump_dir().unwrap(),
        std::path::PathBuf::from("/tmp/dumps/dev-cluster/dev")
    );
}

#[test]
fn test_new_context_starts_on_default_namespace() {
    let mut cfg = Config::new(Arc::new(OfflineSettings));
    cfg.set_current_context("dev").unwrap();

    assert_eq!(cfg.active_namespace(), "default");
    assert_eq!(cfg.fav_namespaces(), ["default"]);
}

#[test]
fn test_empty_context_name_is_rejected() {
    let mut cfg = Config::new(Arc::new(OfflineSettings));
    cfg.set_current_context("dev").unwrap();

    let err = cfg.set_current_context("").unwrap_err();
    assert!(matches!(err, ConfigError::NotFound(_)));
    assert_eq!(cfg.active_context_name(), Some("dev"));
}

#[test]
fn test_reset_keeps_context_records() {
    let mut cfg = Config::new(Arc::new(OfflineSettings));
    cfg.set_current_context("dev").unwrap();
    cfg.set_active_namespace("prod").unwrap();

    cfg.reset();

    assert!(cfg.active_context_name().is_none());
    assert_eq!(cfg.active_namespace(), "default");
    assert!(matches!(
        cfg.current_context(),
        Err(ConfigError::NoActiveContext)
    ));

    cfg.set_current_context("dev").unwrap();
    assert_eq!(cfg.active_namespace(), "prod");
}

#[test]
fn test_refine_is_idempotent() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("config.yaml");
    std::fs::write(
        &path,
        r#"
k9s:
  refreshRate: 3
  logger:
    tail: 200
  currentContext: prod
  contexts:
    dev:
      cluster: dev-cluster
      namespace:
        active: kube-system
        favorites:
        - kube-system
        - default
    prod:
      cluster: prod-cluster
      view:
        active: deploy
"#,
    )
    .unwrap();

    let mut cfg = Config::new(Arc::new(OfflineSettings));
    cfg.load(&path).unwrap();
    let once = cfg.k9s.clone();
    cfg.load(&path).unwrap();

    assert_eq!(cfg.k9s, once);
    assert_eq!(cfg.active_context_name(), Some("prod"));
    assert_eq!(cfg.active_view(), "deploy");
}

#[test]
fn test_loaded_registry_serializes_back() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("config.yaml");

    let mut cfg = Config::new(Arc::new(OfflineSettings));
    cfg.set_current_context("dev").unwrap();
    cfg.set_current_context("prod").unwrap();
    cfg.save(&path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let mut reread = Config::new(Arc::new(OfflineSettings));
    reread.load(&path).unwrap();

    assert_eq!(ConfigLoader::to_yaml(&reread.k9s).unwrap(), text);
    assert_eq!(reread.k9s.contexts.keys().collect::<Vec<_>>(), ["dev", "prod"]);
}

#[test]
fn test_default_registry_is_empty() {
    let k9s = K9s::default();

    assert!(k9s.contexts.is_empty());
    assert!(k9s.active_context_name().is_none());
    assert!(matches!(
        k9s.active_context_namespace(),
        Err(ConfigError::NoActiveContext)
    ));
}
