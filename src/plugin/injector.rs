//! The reference injector
//!
//! Lifecycle: construct with a source and options, initialize exactly once
//! from the host's resolved config, then serve any number of concurrent
//! transforms against that frozen state.

use async_trait::async_trait;
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::core::error::{InjectorError, InjectorResult};
use crate::core::paths::{absolutize, normalize_path, resolve_from};
use crate::plugin::filter::IdFilter;
use crate::plugin::host::{Enforce, Plugin, ResolvedConfig};
use crate::plugin::options::{PluginOptions, ResolvedOptions};
use crate::plugin::source::ReferenceSource;

/// Plugin name reported to the host
pub const PLUGIN_NAME: &str = "tailwind-auto-reference";

/// Content must contain this (trailing space included) to be rewritten
pub const APPLY_MARKER: &str = "@apply ";

/// State bound by `config_resolved`
#[derive(Debug)]
struct Session {
    root: PathBuf,
    filter: IdFilter,
}

/// What a transform decided for one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The identifier did not pass the include/exclude filter
    Filtered,
    /// The content has no `@apply ` directive
    NoMarker,
    /// The skip predicate returned true
    Skipped,
    /// References were prepended; absolute stylesheet paths in order
    Injected(Vec<String>),
}

/// Transform output together with the decision that produced it
#[derive(Debug, Clone)]
pub struct Transformed {
    pub code: String,
    pub outcome: Outcome,
}

/// Prepends `@reference` directives to style content using `@apply`
#[derive(Debug)]
pub struct AutoReference {
    source: ReferenceSource,
    options: ResolvedOptions,
    session: OnceCell<Session>,
}

impl AutoReference {
    pub fn new(source: impl Into<ReferenceSource>, options: PluginOptions) -> Self {
        Self {
            source: source.into(),
            options: options.resolve(),
            session: OnceCell::new(),
        }
    }

    pub fn options(&self) -> &ResolvedOptions {
        &self.options
    }

    pub fn source(&self) -> &ReferenceSource {
        &self.source
    }

    /// Project root captured at setup
    pub fn root(&self) -> Option<&Path> {
        self.session.get().map(|s| s.root.as_path())
    }

    /// Capture the root and compile the filter. Fails on a second call or
    /// on a malformed pattern.
    pub fn init(&self, config: &ResolvedConfig) -> InjectorResult<()> {
        if self.session.get().is_some() {
            return Err(InjectorError::AlreadyInitialized);
        }

        let root = absolutize(&config.root)?;
        let filter = IdFilter::new(&self.options.include, &self.options.exclude, Some(&root))?;
        info!(
            root = %root.display(),
            include = self.options.include.len(),
            exclude = self.options.exclude.len(),
            "auto reference initialized"
        );

        self.session
            .set(Session { root, filter })
            .map_err(|_| InjectorError::AlreadyInitialized)
    }

    fn session(&self) -> InjectorResult<&Session> {
        self.session.get().ok_or(InjectorError::NotInitialized)
    }

    /// Whether `id` passes the include/exclude filter
    pub fn accepts(&self, id: &str) -> InjectorResult<bool> {
        Ok(self.session()?.filter.matches(id))
    }

    /// Run the transform and report why it did or did not apply
    pub async fn transform_with_outcome(&self, code: &str, id: &str) -> InjectorResult<Transformed> {
        let session = self.session()?;
        let unchanged = |outcome| Transformed {
            code: code.to_string(),
            outcome,
        };

        if !session.filter.matches(id) {
            return Ok(unchanged(Outcome::Filtered));
        }
        if !code.contains(APPLY_MARKER) {
            debug!(id, "no @apply directive");
            return Ok(unchanged(Outcome::NoMarker));
        }
        if (self.options.skip)(code, id) {
            debug!(id, "skipped by predicate");
            return Ok(unchanged(Outcome::Skipped));
        }

        let paths = self
            .source
            .resolve(code, id)
            .await
            .map_err(|source| InjectorError::Resolver {
                id: id.to_string(),
                source,
            })?;

        let absolute: Vec<String> = paths
            .iter()
            .map(|p| normalize_path(&resolve_from(&session.root, p)))
            .collect();
        debug!(id, references = ?absolute, "prepending references");

        let mut out = reference_block(&absolute);
        out.push_str(code);
        Ok(Transformed {
            code: out,
            outcome: Outcome::Injected(absolute),
        })
    }

    /// Returns `code` unchanged, or prefixed by one reference line per path
    pub async fn transform(&self, code: &str, id: &str) -> InjectorResult<String> {
        self.transform_with_outcome(code, id).await.map(|t| t.code)
    }
}

impl Default for AutoReference {
    fn default() -> Self {
        Self::new(ReferenceSource::default(), PluginOptions::default())
    }
}

/// `\n@reference "<path>";` for each path, in order
pub fn reference_block<S: AsRef<str>>(paths: &[S]) -> String {
    paths.iter().fold(String::new(), |mut acc, path| {
        acc.push_str("\n@reference \"");
        acc.push_str(path.as_ref());
        acc.push_str("\";");
        acc
    })
}

#[async_trait]
impl Plugin for AutoReference {
    fn name(&self) -> &'static str {
        PLUGIN_NAME
    }

    fn enforce(&self) -> Option<Enforce> {
        Some(Enforce::Pre)
    }

    fn config_resolved(&self, config: &ResolvedConfig) -> InjectorResult<()> {
        self.init(config)
    }

    async fn transform(&self, code: &str, id: &str) -> InjectorResult<String> {
        AutoReference::transform(self, code, id).await
    }
}
