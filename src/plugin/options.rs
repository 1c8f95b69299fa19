//! Plugin options and their defaults

use std::fmt;
use std::sync::Arc;

use crate::core::error::InjectorResult;
use crate::plugin::filter::FilterPattern;

/// Identifiers Vite assigns to `<style>` blocks of single-file components
pub const DEFAULT_INCLUDE: &str = r"\.vue\?.*type=style";

/// Predicate over `(code, id)`; returning true leaves the file untouched
pub type SkipFn = Arc<dyn Fn(&str, &str) -> bool + Send + Sync>;

/// Partial options as supplied by the caller.
///
/// Any field that is set replaces its default wholesale; unset fields fall
/// back to [`ResolvedOptions::default`].
#[derive(Clone, Default)]
pub struct PluginOptions {
    pub include: Option<Vec<FilterPattern>>,
    pub exclude: Option<Vec<FilterPattern>>,
    pub skip: Option<SkipFn>,
}

impl PluginOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn include(mut self, patterns: impl IntoIterator<Item = FilterPattern>) -> Self {
        self.include = Some(patterns.into_iter().collect());
        self
    }

    pub fn exclude(mut self, patterns: impl IntoIterator<Item = FilterPattern>) -> Self {
        self.exclude = Some(patterns.into_iter().collect());
        self
    }

    /// Parse include patterns from their text form (`re:` prefix for regex)
    pub fn include_str<I, S>(self, patterns: I) -> InjectorResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let parsed = parse_patterns(patterns)?;
        Ok(self.include(parsed))
    }

    /// Parse exclude patterns from their text form (`re:` prefix for regex)
    pub fn exclude_str<I, S>(self, patterns: I) -> InjectorResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let parsed = parse_patterns(patterns)?;
        Ok(self.exclude(parsed))
    }

    pub fn skip<F>(mut self, f: F) -> Self
    where
        F: Fn(&str, &str) -> bool + Send + Sync + 'static,
    {
        self.skip = Some(Arc::new(f));
        self
    }

    /// Shallow merge over the defaults
    pub fn resolve(self) -> ResolvedOptions {
        let defaults = ResolvedOptions::default();
        ResolvedOptions {
            include: self.include.unwrap_or(defaults.include),
            exclude: self.exclude.unwrap_or(defaults.exclude),
            skip: self.skip.unwrap_or(defaults.skip),
        }
    }
}

fn parse_patterns<I, S>(patterns: I) -> InjectorResult<Vec<FilterPattern>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    patterns.into_iter().map(|p| p.as_ref().parse()).collect()
}

/// Fully populated options, fixed for the lifetime of the plugin
#[derive(Clone)]
pub struct ResolvedOptions {
    pub include: Vec<FilterPattern>,
    pub exclude: Vec<FilterPattern>,
    pub skip: SkipFn,
}

impl Default for ResolvedOptions {
    fn default() -> Self {
        Self {
            include: vec![default_include()],
            exclude: Vec::new(),
            skip: Arc::new(|_, _| false),
        }
    }
}

fn default_include() -> FilterPattern {
    static PATTERN: once_cell::sync::Lazy<regex::Regex> = once_cell::sync::Lazy::new(|| {
        regex::Regex::new(DEFAULT_INCLUDE).expect("default include pattern is valid")
    });
    FilterPattern::Regex(PATTERN.clone())
}

impl fmt::Debug for PluginOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginOptions")
            .field("include", &self.include)
            .field("exclude", &self.exclude)
            .field("skip", &self.skip.as_ref().map(|_| ".."))
            .finish()
    }
}

impl fmt::Debug for ResolvedOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedOptions")
            .field("include", &self.include)
            .field("exclude", &self.exclude)
            .finish_non_exhaustive()
    }
}
