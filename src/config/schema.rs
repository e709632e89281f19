//! Configuration schema definitions
//!
//! Defines the structure of the configuration file using serde for serialization.
//! The live document (`K9s` and friends) always carries concrete, defaulted values.
//! Loading goes through the `*Patch` mirror types instead, where every field is
//! optional, so that a partially written file only overrides what it actually names.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::defaults::{
    DEFAULT_LOG_BUFFER, DEFAULT_LOG_SINCE_SECONDS, DEFAULT_LOG_TAIL, DEFAULT_MAX_CONN_RETRY,
    DEFAULT_NAMESPACE, DEFAULT_REFRESH_RATE, DEFAULT_VIEW, default_favorites,
};

/// On-disk envelope: everything lives under the top-level `k9s` key
#[derive(Debug, Serialize)]
pub struct ConfigDocument<'a> {
    pub k9s: &'a K9s,
}

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct K9s {
    /// UI refresh rate in seconds
    #[serde(default = "default_refresh_rate")]
    pub refresh_rate: u32,

    /// Connection retries before giving up on the api server
    #[serde(default = "default_max_conn_retry")]
    pub max_conn_retry: u32,

    /// Disable modification operations globally
    #[serde(default)]
    pub read_only: bool,

    /// Screen dump directory override
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub screen_dump_dir: String,

    /// Logger configuration, built lazily after load
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logger: Option<LoggerConfig>,

    /// Active context pointer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_context: Option<String>,

    /// Context records keyed by context name
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub contexts: BTreeMap<String, Context>,
}

/// Logger configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LoggerConfig {
    /// Default log line count
    #[serde(default = "default_log_tail")]
    pub tail: i64,

    /// Max log lines in view
    #[serde(default = "default_log_buffer")]
    pub buffer: i64,

    /// Historical log timeframe in seconds
    #[serde(default = "default_log_since_seconds")]
    pub since_seconds: i64,

    /// Enable/disable line wrapping
    #[serde(default)]
    pub text_wrap: bool,

    /// Prefix log lines with timestamps
    #[serde(default)]
    pub show_time: bool,
}

/// A named configuration scope for one kubeconfig context
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Context {
    /// Cluster backing this context
    #[serde(default, rename = "cluster")]
    pub cluster_name: String,

    #[serde(default)]
    pub namespace: Namespace,

    #[serde(default)]
    pub view: View,
}

/// Namespace state of a context
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Namespace {
    /// Active namespace, possibly the "all" sentinel
    #[serde(default = "default_namespace")]
    pub active: String,

    /// Stop favorites from being reshuffled on activation
    #[serde(default)]
    pub lock_favorites: bool,

    #[serde(default = "default_favorites")]
    pub favorites: Vec<String>,
}

/// View state of a context
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct View {
    #[serde(default = "default_view")]
    pub active: String,
}

/// Loaded-file envelope; `k9s` may be absent entirely
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct ConfigFilePatch {
    #[serde(default)]
    pub k9s: Option<K9sPatch>,
}

/// Field-by-field optional mirror of [`K9s`]
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct K9sPatch {
    pub refresh_rate: Option<u32>,
    pub max_conn_retry: Option<u32>,
    pub read_only: Option<bool>,
    pub screen_dump_dir: Option<String>,
    pub logger: Option<LoggerPatch>,
    pub current_context: Option<String>,
    pub contexts: Option<BTreeMap<String, ContextPatch>>,
}

/// Optional mirror of [`LoggerConfig`]
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LoggerPatch {
    pub tail: Option<i64>,
    pub buffer: Option<i64>,
    pub since_seconds: Option<i64>,
    pub text_wrap: Option<bool>,
    pub show_time: Option<bool>,
}

/// Optional mirror of [`Context`]
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContextPatch {
    #[serde(rename = "cluster")]
    pub cluster_name: Option<String>,
    pub namespace: Option<NamespacePatch>,
    pub view: Option<ViewPatch>,
}

/// Optional mirror of [`Namespace`]
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NamespacePatch {
    pub active: Option<String>,
    pub lock_favorites: Option<bool>,
    pub favorites: Option<Vec<String>>,
}

/// Optional mirror of [`View`]
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct ViewPatch {
    pub active: Option<String>,
}

/// Overwrite `slot` only when the loaded file carried a value
pub(crate) fn merge_field<T: Clone>(slot: &mut T, loaded: &Option<T>) {
    if let Some(value) = loaded {
        *slot = value.clone();
    }
}

// Default value functions
fn default_refresh_rate() -> u32 {
    DEFAULT_REFRESH_RATE
}

fn default_max_conn_retry() -> u32 {
    DEFAULT_MAX_CONN_RETRY
}

fn default_log_tail() -> i64 {
    DEFAULT_LOG_TAIL
}

fn default_log_buffer() -> i64 {
    DEFAULT_LOG_BUFFER
}

fn default_log_since_seconds() -> i64 {
    DEFAULT_LOG_SINCE_SECONDS
}

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

fn default_view() -> String {
    DEFAULT_VIEW.to_string()
}

impl Default for K9s {
    fn default() -> Self {
        Self {
            refresh_rate: default_refresh_rate(),
            max_conn_retry: default_max_conn_retry(),
            read_only: false,
            screen_dump_dir: String::new(),
            logger: None,
            current_context: None,
            contexts: BTreeMap::new(),
        }
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            tail: default_log_tail(),
            buffer: default_log_buffer(),
            since_seconds: default_log_since_seconds(),
            text_wrap: false,
            show_time: false,
        }
    }
}

impl Default for Namespace {
    fn default() -> Self {
        Self {
            active: default_namespace(),
            lock_favorites: false,
            favorites: default_favorites(),
        }
    }
}

impl Default for View {
    fn default() -> Self {
        Self {
            active: default_view(),
        }
    }
}

impl LoggerConfig {
    /// Apply a loaded logger section on top of this one
    pub fn refine(&mut self, loaded: &LoggerPatch) {
        merge_field(&mut self.tail, &loaded.tail);
        merge_field(&mut self.buffer, &loaded.buffer);
        merge_field(&mut self.since_seconds, &loaded.since_seconds);
        merge_field(&mut self.text_wrap, &loaded.text_wrap);
        merge_field(&mut self.show_time, &loaded.show_time);
    }

    /// Bring out-of-range values back to something usable
    pub fn validate(&mut self) {
        if self.tail <= 0 {
            self.tail = DEFAULT_LOG_TAIL;
        }
        if self.buffer <= 0 {
            self.buffer = DEFAULT_LOG_BUFFER;
        }
        if self.tail > self.buffer {
            self.tail = self.buffer;
        }
    }
}

impl Context {
    /// Create a context record for a cluster
    pub fn new(cluster_name: impl Into<String>) -> Self {
        Self {
            cluster_name: cluster_name.into(),
            ..Default::default()
        }
    }

    pub fn refine(&mut self, loaded: &ContextPatch) {
        merge_field(&mut self.cluster_name, &loaded.cluster_name);
        if let Some(ns) = &loaded.namespace {
            merge_field(&mut self.namespace.active, &ns.active);
            merge_field(&mut self.namespace.lock_favorites, &ns.lock_favorites);
            merge_field(&mut self.namespace.favorites, &ns.favorites);
        }
        if let Some(view) = &loaded.view {
            merge_field(&mut self.view.active, &view.active);
        }
    }
}
