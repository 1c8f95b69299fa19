//! tailwind-auto-reference as a Rust crate
//!
//! Tailwind v4 style blocks that use `@apply` must `@reference` the
//! stylesheet defining the theme. [`AutoReference`] is a bundler transform
//! that prepends those directives to matching modules:
//!
//! ```no_run
//! use autoref::{AutoReference, PluginOptions, ResolvedConfig};
//!
//! # async fn demo() -> Result<(), autoref::InjectorError> {
//! let plugin = AutoReference::new("./src/index.css", PluginOptions::default());
//! plugin.init(&ResolvedConfig::new("/proj"))?;
//!
//! let out = plugin
//!     .transform(".a{@apply flex;}", "Component.vue?vue&type=style")
//!     .await?;
//! assert_eq!(out, "\n@reference \"/proj/src/index.css\";.a{@apply flex;}");
//! # Ok(())
//! # }
//! ```

pub mod backends;
pub mod cli;
pub mod config;
pub mod core;
pub mod plugin;

pub use crate::core::error::{InjectorError, InjectorResult};
pub use crate::plugin::{
    AutoReference, Enforce, FilterPattern, Outcome, Plugin, PluginContainer, PluginOptions,
    ReferenceSource, References, ResolvedConfig,
};
