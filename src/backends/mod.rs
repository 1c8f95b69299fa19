//! Backends module - the CLI playing the bundler host for files on disk
//!
//! Provides:
//! - transform: run the plugin pipeline over one file or stdin
//! - check: walk a project tree and report which files would be rewritten
//! - show_config: print the effective configuration

pub mod check;
pub mod show_config;
pub mod transform;

use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;

use crate::config::ProjectConfig;
use crate::plugin::{AutoReference, Plugin, PluginContainer, ResolvedConfig};

/// Build the injector from project config and run its setup hook
pub fn init_plugin(root: &Path, project: &ProjectConfig) -> Result<Arc<AutoReference>> {
    let (source, options) = project
        .build(root)
        .context("failed to build plugin options")?;
    let plugin = Arc::new(AutoReference::new(source, options));
    plugin
        .config_resolved(&ResolvedConfig::new(root))
        .context("plugin setup failed")?;
    Ok(plugin)
}

/// Wrap an initialized injector in a host pipeline
pub fn container(plugin: Arc<AutoReference>) -> PluginContainer {
    PluginContainer::new(vec![plugin as Arc<dyn Plugin>])
}
