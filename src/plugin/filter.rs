//! Identifier filter built from include/exclude patterns
//!
//! Patterns are either globs or regular expressions. In text form a
//! pattern starting with `re:` is a regular expression; anything else is a
//! glob. Relative globs are anchored at the project root; absolute globs
//! and globs starting with `**` are used as written.

use globset::{GlobBuilder, GlobMatcher};
use path_clean::PathClean;
use regex::Regex;
use serde::{Serialize, Serializer};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::core::error::{InjectorError, InjectorResult};
use crate::core::paths::{normalize_id, normalize_path};

/// Prefix marking a regular expression in text form
pub const REGEX_PREFIX: &str = "re:";

/// A single include/exclude pattern
#[derive(Debug, Clone)]
pub enum FilterPattern {
    Glob(String),
    Regex(Regex),
}

impl FilterPattern {
    pub fn glob(pattern: impl Into<String>) -> Self {
        FilterPattern::Glob(pattern.into())
    }

    /// Compile a regular expression pattern
    pub fn regex(pattern: &str) -> InjectorResult<Self> {
        Regex::new(pattern)
            .map(FilterPattern::Regex)
            .map_err(|e| InjectorError::InvalidPattern {
                pattern: format!("{REGEX_PREFIX}{pattern}"),
                message: e.to_string(),
            })
    }
}

impl FromStr for FilterPattern {
    type Err = InjectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.strip_prefix(REGEX_PREFIX) {
            Some(re) => FilterPattern::regex(re),
            None => Ok(FilterPattern::glob(s)),
        }
    }
}

impl From<Regex> for FilterPattern {
    fn from(re: Regex) -> Self {
        FilterPattern::Regex(re)
    }
}

impl fmt::Display for FilterPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterPattern::Glob(g) => f.write_str(g),
            FilterPattern::Regex(re) => write!(f, "{REGEX_PREFIX}{}", re.as_str()),
        }
    }
}

impl Serialize for FilterPattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone)]
enum Matcher {
    Glob(GlobMatcher),
    Regex(Regex),
}

impl Matcher {
    fn is_match(&self, id: &str) -> bool {
        match self {
            Matcher::Glob(glob) => glob.is_match(id),
            Matcher::Regex(re) => re.is_match(id),
        }
    }
}

/// Compiled include/exclude filter over module identifiers
#[derive(Debug, Clone)]
pub struct IdFilter {
    include: Vec<Matcher>,
    exclude: Vec<Matcher>,
}

impl IdFilter {
    /// Compile the patterns. `base` anchors relative globs; `None` uses
    /// them verbatim.
    pub fn new(
        include: &[FilterPattern],
        exclude: &[FilterPattern],
        base: Option<&Path>,
    ) -> InjectorResult<Self> {
        let compile = |patterns: &[FilterPattern]| -> InjectorResult<Vec<Matcher>> {
            patterns.iter().map(|p| compile_pattern(p, base)).collect()
        };

        Ok(Self {
            include: compile(include)?,
            exclude: compile(exclude)?,
        })
    }

    /// An identifier passes when no exclude pattern matches and at least one
    /// include pattern does. Without include patterns everything not
    /// excluded passes. Virtual module ids (containing NUL) never pass.
    pub fn matches(&self, id: &str) -> bool {
        if id.contains('\0') {
            return false;
        }

        let id = normalize_id(id);
        if self.exclude.iter().any(|m| m.is_match(&id)) {
            return false;
        }
        if self.include.iter().any(|m| m.is_match(&id)) {
            return true;
        }
        self.include.is_empty()
    }
}

fn compile_pattern(pattern: &FilterPattern, base: Option<&Path>) -> InjectorResult<Matcher> {
    match pattern {
        FilterPattern::Regex(re) => Ok(Matcher::Regex(re.clone())),
        FilterPattern::Glob(glob) => {
            let anchored = anchor_glob(glob, base);
            GlobBuilder::new(&anchored)
                .literal_separator(true)
                .build()
                .map(|g| Matcher::Glob(g.compile_matcher()))
                .map_err(|e| InjectorError::InvalidPattern {
                    pattern: glob.clone(),
                    message: e.to_string(),
                })
        }
    }
}

fn anchor_glob(glob: &str, base: Option<&Path>) -> String {
    let glob = normalize_id(glob);
    match base {
        Some(base) if !glob.starts_with("**") && !is_absolute_glob(&glob) => {
            let base = globset::escape(&normalize_path(base));
            normalize_path(&Path::new(&base).join(&glob).clean())
        }
        _ => glob,
    }
}

fn is_absolute_glob(glob: &str) -> bool {
    glob.starts_with('/') || Path::new(glob).is_absolute()
}
