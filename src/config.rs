//! Project configuration
//!
//! An optional `autoref.json` at the project root describes the stylesheet
//! source and filter options. CLI flags and `AUTOREF_CSS` override it field
//! by field; a field that is set replaces the file's value wholesale.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::core::error::InjectorError;
use crate::plugin::filter::{FilterPattern, IdFilter};
use crate::plugin::options::PluginOptions;
use crate::plugin::source::{ReferenceSource, DEFAULT_CSS_FILE};

/// File name looked up under the project root
pub const CONFIG_FILE: &str = "autoref.json";

/// Environment variable overriding `css` (comma-separated)
pub const CSS_ENV: &str = "AUTOREF_CSS";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Pattern(#[from] InjectorError),

    #[error("invalid skip.content regex `{pattern}`: {source}")]
    SkipRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// A single path or a list of paths
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    pub fn to_vec(&self) -> Vec<String> {
        match self {
            OneOrMany::One(s) => vec![s.clone()],
            OneOrMany::Many(v) => v.clone(),
        }
    }
}

impl From<OneOrMany> for ReferenceSource {
    fn from(value: OneOrMany) -> Self {
        match value {
            OneOrMany::One(path) => ReferenceSource::Literal(path),
            OneOrMany::Many(paths) => ReferenceSource::LiteralList(paths),
        }
    }
}

/// Conditions that leave a file untouched
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SkipConfig {
    /// Regexes tested against file content
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub content: Vec<String>,

    /// Patterns tested against the identifier (`re:` prefix for regex)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub id: Vec<String>,
}

impl SkipConfig {
    fn is_empty(&self) -> bool {
        self.content.is_empty() && self.id.is_empty()
    }
}

/// Per-identifier stylesheet selection; first match wins
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Rule {
    pub when: String,
    pub css: OneOrMany,
}

/// Contents of `autoref.json`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub css: Option<OneOrMany>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "SkipConfig::is_empty")]
    pub skip: SkipConfig,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<Rule>,
}

/// Values supplied on the command line
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub css: Vec<String>,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
}

impl ProjectConfig {
    /// Parse a config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `explicit` if given, else `<root>/autoref.json` if present,
    /// else defaults.
    pub fn discover(root: &Path, explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let candidate = root.join(CONFIG_FILE);
        if candidate.is_file() {
            debug!(path = %candidate.display(), "loading project config");
            Self::load(&candidate)
        } else {
            Ok(Self::default())
        }
    }

    /// Apply CLI flags; non-empty flag lists replace the file's values
    pub fn with_overrides(mut self, overrides: &ConfigOverrides) -> Self {
        if !overrides.css.is_empty() {
            self.css = Some(one_or_many(overrides.css.clone()));
        }
        if !overrides.include.is_empty() {
            self.include = Some(overrides.include.clone());
        }
        if !overrides.exclude.is_empty() {
            self.exclude = Some(overrides.exclude.clone());
        }
        self
    }

    /// Apply `AUTOREF_CSS` given its value
    pub fn with_css_env(mut self, value: Option<&str>) -> Self {
        if let Some(value) = value {
            let paths: Vec<String> = value
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect();
            if !paths.is_empty() {
                self.css = Some(one_or_many(paths));
            }
        }
        self
    }

    /// Build the reference source and plugin options. `root` anchors
    /// relative globs in `rules` and `skip.id`.
    pub fn build(&self, root: &Path) -> Result<(ReferenceSource, PluginOptions), ConfigError> {
        let css = self
            .css
            .clone()
            .unwrap_or_else(|| OneOrMany::One(DEFAULT_CSS_FILE.to_string()));

        let source = if self.rules.is_empty() {
            css.into()
        } else {
            rules_source(&self.rules, css.to_vec(), root)?
        };

        let mut options = PluginOptions::new();
        if let Some(include) = &self.include {
            options = options.include_str(include)?;
        }
        if let Some(exclude) = &self.exclude {
            options = options.exclude_str(exclude)?;
        }
        if !self.skip.is_empty() {
            let skip = compile_skip(&self.skip, root)?;
            options = options.skip(move |code, id| skip.is_match(code, id));
        }

        Ok((source, options))
    }
}

fn one_or_many(mut paths: Vec<String>) -> OneOrMany {
    if paths.len() == 1 {
        OneOrMany::One(paths.remove(0))
    } else {
        OneOrMany::Many(paths)
    }
}

fn id_matcher(pattern: &str, root: &Path) -> Result<IdFilter, ConfigError> {
    let pattern: FilterPattern = pattern.parse()?;
    Ok(IdFilter::new(&[pattern], &[], Some(root))?)
}

fn rules_source(
    rules: &[Rule],
    fallback: Vec<String>,
    root: &Path,
) -> Result<ReferenceSource, ConfigError> {
    let compiled = rules
        .iter()
        .map(|rule| Ok((id_matcher(&rule.when, root)?, rule.css.to_vec())))
        .collect::<Result<Vec<_>, ConfigError>>()?;

    Ok(ReferenceSource::sync(move |_code, id| {
        let paths = compiled
            .iter()
            .find(|(matcher, _)| matcher.matches(id))
            .map(|(_, paths)| paths.clone())
            .unwrap_or_else(|| fallback.clone());
        Ok(paths)
    }))
}

struct CompiledSkip {
    content: Vec<Regex>,
    ids: Vec<IdFilter>,
}

impl CompiledSkip {
    fn is_match(&self, code: &str, id: &str) -> bool {
        self.content.iter().any(|re| re.is_match(code)) || self.ids.iter().any(|f| f.matches(id))
    }
}

fn compile_skip(skip: &SkipConfig, root: &Path) -> Result<CompiledSkip, ConfigError> {
    let content = skip
        .content
        .iter()
        .map(|pattern| {
            Regex::new(pattern).map_err(|source| ConfigError::SkipRegex {
                pattern: pattern.clone(),
                source,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    let ids = skip
        .id
        .iter()
        .map(|pattern| id_matcher(pattern, root))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(CompiledSkip { content, ids })
}
