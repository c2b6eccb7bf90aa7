use crate::config::AppConfig;
use crate::types::{Category, KindFilter};
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::str::FromStr;

/// Lunch Set - build a cafeteria lunch combo from the daily menu
#[derive(Parser, Debug)]
#[command(name = "lunchset")]
#[command(about = "Pick a lunch set from the cafeteria menu in your terminal")]
#[command(version)]
pub struct Cli {
    /// Configuration file (JSON). Missing fields fall back to defaults.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the dishes API endpoint
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Read the catalog from a local JSON file instead of the API
    #[arg(long, global = true)]
    pub catalog_file: Option<PathBuf>,

    /// Write accepted orders to this file as JSON
    #[arg(long, global = true)]
    pub order_output: Option<PathBuf>,

    /// Write logs to this file.
    ///
    /// The interactive menu discards logs unless this is given, since the
    /// terminal is owned by the UI.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the interactive menu (default)
    Menu,
    /// Print the catalog grouped by category, sorted by name
    Catalog {
        /// Restrict a category to one kind, e.g. `--kind soup=fish`
        #[arg(short, long, value_parser = parse_kind_filter)]
        kind: Vec<(Category, KindFilter)>,
    },
    /// Check whether a set of dishes makes a valid lunch set
    Check {
        /// Dish keywords, at most one per category
        #[arg(required = true)]
        keywords: Vec<String>,
    },
    /// Write a configuration file with default values
    InitConfig {
        /// Destination path
        path: PathBuf,
    },
}

/// Parse a `category=kind` pair for `catalog --kind`
fn parse_kind_filter(s: &str) -> Result<(Category, KindFilter), String> {
    let (category, kind) = s
        .split_once('=')
        .ok_or_else(|| format!("expected CATEGORY=KIND, got '{}'", s))?;
    let category = Category::from_str(category.trim())
        .map_err(|_| format!("unknown category '{}'", category.trim()))?;
    let kind = KindFilter::from_str(kind.trim()).map_err(|e| e.to_string())?;
    Ok((category, kind))
}

impl Cli {
    pub fn parse_args() -> Self {
        <Self as clap::Parser>::parse()
    }

    /// Whether this invocation runs the interactive menu
    pub fn is_interactive(&self) -> bool {
        matches!(self.command, None | Some(Commands::Menu))
    }

    /// Build the effective configuration: file (if any), then flag overrides
    pub fn resolve_config(&self) -> anyhow::Result<AppConfig> {
        let mut config = match self.config {
            Some(ref path) => AppConfig::load_from_file(path)?,
            None => AppConfig::default(),
        };

        if let Some(ref endpoint) = self.endpoint {
            config.endpoint = endpoint.clone();
        }
        if let Some(ref path) = self.catalog_file {
            config.catalog_file = Some(path.clone());
        }
        if let Some(ref path) = self.order_output {
            config.order_output = Some(path.clone());
        }

        config
            .validate()
            .context("Invalid configuration")?;
        Ok(config)
    }
}
