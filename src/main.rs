//! k9s-config - persistent context and namespace state for K9s-style clients
//!
//! Resolves the active kubeconfig context and namespace from CLI flags, the
//! saved configuration and the kubeconfig, and keeps that state on disk.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

use cli::Command;
use k9s_config::config::{Config, Flags, SessionInit, paths, yaml_extension};
use k9s_config::kube::{
    Connection, KubeConnection, KubeSettings, KubeconfigSettings, OfflineSettings,
};

/// k9s-config - persistent context and namespace state for K9s-style clients
#[derive(Parser, Debug)]
#[command(name = "k9s-config")]
#[command(about = "Persistent context and namespace state for K9s-style clients", long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(long, short = 'd', global = true)]
    debug: bool,

    /// Kubeconfig context to use
    #[arg(long, global = true)]
    context: Option<String>,

    /// Namespace to activate
    #[arg(long, short = 'n', global = true)]
    namespace: Option<String>,

    /// Activate all namespaces
    #[arg(long, short = 'A', global = true)]
    all_namespaces: bool,

    /// View to show first, overriding the saved view once
    #[arg(long, short = 'c', global = true)]
    command: Option<String>,

    /// Configuration file (defaults to the k9s config home)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Kubeconfig file (defaults to KUBECONFIG or ~/.kube/config)
    #[arg(long, global = true)]
    kubeconfig: Option<PathBuf>,

    /// Never talk to the cluster
    #[arg(long, global = true)]
    offline: bool,

    #[command(subcommand)]
    subcommand: Command,
}

impl Args {
    fn flags(&self) -> Flags {
        Flags {
            context: self.context.clone(),
            namespace: self.namespace.clone(),
            all_namespaces: Some(self.all_namespaces),
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Command::Version = args.subcommand {
        cli::display_version();
        return Ok(());
    }

    let log_file = cli::init_logging(args.debug)?;
    if let Some(ref log_path) = log_file {
        eprintln!(
            "Debug logging enabled. Logs written to: {}",
            log_path.display()
        );
    }

    let kubeconfig = match &args.kubeconfig {
        Some(path) => KubeconfigSettings::read_from(path),
        None => KubeconfigSettings::read(),
    };
    let kubeconfig = match kubeconfig {
        Ok(ks) => Some(ks),
        Err(e) => {
            tracing::warn!("Running without kubeconfig: {}", e);
            None
        }
    };

    let (settings, conn) = connect(kubeconfig, &args);

    let mut config = Config::with_init(
        settings,
        SessionInit {
            manual_command: args.command.clone(),
        },
    );

    let path = args
        .config
        .as_deref()
        .map(yaml_extension)
        .unwrap_or_else(paths::root_config_path);
    if path.exists() {
        config
            .load(&path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
    } else {
        tracing::debug!("No config file at {}, starting from defaults", path.display());
    }
    config.set_connection(conn);

    let flags = args.flags();
    cli::handle_command(args.subcommand, &mut config, &flags, &path)
}

/// Build the settings provider and the connection
///
/// Offline, or when the client cannot be built, the kubeconfig itself stands in
/// for the connection: the current context still resolves, favorites are not checked.
fn connect(
    kubeconfig: Option<KubeconfigSettings>,
    args: &Args,
) -> (Arc<dyn KubeSettings>, Option<Arc<dyn Connection>>) {
    let Some(kubeconfig) = kubeconfig else {
        let settings: Arc<dyn KubeSettings> = Arc::new(OfflineSettings);
        return (settings, None);
    };

    if !args.offline {
        match KubeConnection::connect(kubeconfig.clone(), args.context.as_deref()) {
            Ok(conn) => {
                let conn = Arc::new(conn);
                let settings: Arc<dyn KubeSettings> = conn.clone();
                let conn: Arc<dyn Connection> = conn;
                return (settings, Some(conn));
            }
            Err(e) => tracing::warn!("Running disconnected: {}", e),
        }
    }

    let kubeconfig = Arc::new(kubeconfig);
    let settings: Arc<dyn KubeSettings> = kubeconfig.clone();
    let conn: Arc<dyn Connection> = kubeconfig;
    (settings, Some(conn))
}
