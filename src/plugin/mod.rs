//! Plugin module - the reference injector and the host contract it plugs into
//!
//! Provides:
//! - host: Plugin trait, resolved config, plugin container
//! - injector: the `@reference` injecting transform
//! - filter: include/exclude identifier filter
//! - options: partial options merged over defaults
//! - source: static or callback stylesheet sources

pub mod filter;
pub mod host;
pub mod injector;
pub mod options;
pub mod source;

pub use filter::{FilterPattern, IdFilter};
pub use host::{Enforce, Plugin, PluginContainer, ResolvedConfig};
pub use injector::{AutoReference, Outcome, Transformed};
pub use options::{PluginOptions, ResolvedOptions, SkipFn};
pub use source::{ReferenceSource, References};
