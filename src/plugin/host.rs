//! Host-side plugin contract
//!
//! Mirrors the slice of a bundler plugin API that the injector needs: a
//! name, an ordering hint, a setup hook receiving the resolved config, and
//! an async transform hook. [`PluginContainer`] drives a set of plugins the
//! way a bundler would for each module.

use async_trait::async_trait;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::core::error::InjectorResult;

/// Ordering hint relative to plugins without one
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Enforce {
    Pre,
    Post,
}

/// Configuration the host hands to `config_resolved`
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedConfig {
    /// Project root directory
    pub root: PathBuf,
}

impl ResolvedConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
pub trait Plugin: Send + Sync {
    /// Identifier reported in diagnostics
    fn name(&self) -> &'static str;

    /// Ordering hint; `None` runs between `Pre` and `Post` plugins
    fn enforce(&self) -> Option<Enforce> {
        None
    }

    /// Called once after the host resolved its configuration
    fn config_resolved(&self, _config: &ResolvedConfig) -> InjectorResult<()> {
        Ok(())
    }

    /// Transform one module. Return `code` unchanged to pass it through.
    async fn transform(&self, code: &str, id: &str) -> InjectorResult<String>;
}

fn order_key(enforce: Option<Enforce>) -> u8 {
    match enforce {
        Some(Enforce::Pre) => 0,
        None => 1,
        Some(Enforce::Post) => 2,
    }
}

/// Ordered set of plugins driven like a bundler pipeline
#[derive(Clone, Default)]
pub struct PluginContainer {
    plugins: Vec<Arc<dyn Plugin>>,
}

impl PluginContainer {
    /// Sort plugins by enforce (`pre`, unset, `post`), keeping insertion
    /// order within each group
    pub fn new(mut plugins: Vec<Arc<dyn Plugin>>) -> Self {
        plugins.sort_by_key(|p| order_key(p.enforce()));
        Self { plugins }
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.plugins.iter().map(|p| p.name()).collect()
    }

    /// Run every plugin's setup hook; the first failure aborts
    pub fn config_resolved(&self, config: &ResolvedConfig) -> InjectorResult<()> {
        for plugin in &self.plugins {
            debug!(plugin = plugin.name(), "config_resolved");
            plugin.config_resolved(config)?;
        }
        Ok(())
    }

    /// Thread `code` through every plugin's transform in order
    #[instrument(skip(self, code))]
    pub async fn transform(&self, code: &str, id: &str) -> InjectorResult<String> {
        let mut current = code.to_string();
        for plugin in &self.plugins {
            current = plugin.transform(&current, id).await?;
        }
        Ok(current)
    }
}
