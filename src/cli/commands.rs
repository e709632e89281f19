//! CLI command handlers

use anyhow::{Context, Result};
use clap::Subcommand;
use serde::Serialize;
use std::path::Path;

use k9s_config::config::{Config, FavoritesValidation, Flags, paths};

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show configuration and per-context file locations
    Info,
    /// Resolve the active context and namespace, then save them
    Session {
        /// Print as JSON instead of YAML
        #[arg(long)]
        json: bool,
    },
    /// Switch the active namespace of the resolved context
    Namespace {
        /// Namespace name ("all" for every namespace)
        name: String,
    },
    /// List favorite namespaces of the resolved context
    Favorites {
        /// Drop favorites the cluster no longer knows about
        #[arg(long)]
        validate: bool,
    },
    /// Forget the active context
    Reset,
    /// Print version information
    Version,
}

/// Resolved session state as printed by `session`
#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub context: String,
    pub cluster: String,
    pub namespace: String,
    pub favorites: Vec<String>,
    pub view: String,
}

impl SessionSummary {
    pub fn from_config(config: &mut Config) -> Result<Self> {
        let view = config.active_view();
        let ct = config.current_context()?;
        Ok(Self {
            context: config.active_context_name().unwrap_or_default().to_string(),
            cluster: ct.cluster_name.clone(),
            namespace: ct.namespace.active.clone(),
            favorites: ct.namespace.favorites.clone(),
            view,
        })
    }
}

/// Handle a subcommand against a loaded configuration
pub fn handle_command(cmd: Command, config: &mut Config, flags: &Flags, path: &Path) -> Result<()> {
    match cmd {
        Command::Info => {
            println!("config:       {}", path.display());
            println!("data:         {}", paths::data_dir().display());
            println!("screen dumps: {}", config.k9s.screen_dump_dir().display());
            match reconcile(config, flags) {
                Ok(()) => {
                    if let Some(p) = config.context_aliases_path() {
                        println!("aliases:      {}", p.display());
                    }
                    if let Some(p) = config.context_plugins_path() {
                        println!("plugins:      {}", p.display());
                    }
                }
                Err(e) => println!("context:      unresolved ({:#})", e),
            }
        }
        Command::Session { json } => {
            reconcile(config, flags)?;
            let summary = SessionSummary::from_config(config)?;
            if json {
                let out = serde_json::to_string_pretty(&summary)
                    .context("Failed to serialize session")?;
                println!("{}", out);
            } else {
                let out = serde_yaml::to_string(&summary).context("Failed to serialize session")?;
                print!("{}", out);
            }
            save(config, path)?;
        }
        Command::Namespace { name } => {
            reconcile(config, flags)?;
            config
                .set_active_namespace(&name)
                .with_context(|| format!("Failed to activate namespace {}", name))?;
            save(config, path)?;
            println!("Active namespace: {}", config.active_namespace());
        }
        Command::Favorites { validate } => {
            reconcile(config, flags)?;
            if validate {
                match config.validate_favorites() {
                    FavoritesValidation::Skipped => {
                        eprintln!("Cluster unreachable, favorites left as is")
                    }
                    FavoritesValidation::Validated { dropped } => {
                        for ns in &dropped {
                            eprintln!("Dropped unknown namespace: {}", ns);
                        }
                        save(config, path)?;
                    }
                }
            }
            for ns in config.fav_namespaces() {
                println!("{}", ns);
            }
        }
        Command::Reset => {
            config.reset();
            save(config, path)?;
            println!("Active context cleared");
        }
        Command::Version => super::display_version(),
    }

    Ok(())
}

fn reconcile(config: &mut Config, flags: &Flags) -> Result<()> {
    let conn = config.connection_handle();
    config
        .reconcile(flags, conn.as_deref())
        .context("Failed to resolve active context")?;
    config.dump("Session");
    Ok(())
}

fn save(config: &mut Config, path: &Path) -> Result<()> {
    config
        .save(path)
        .with_context(|| format!("Failed to save configuration to {}", path.display()))
}
