//! Unified Result Model
//!
//! Every CLI command maps its findings to this model before rendering output.

use serde::{Deserialize, Serialize};

/// The kind of result item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    /// The file would receive reference directives
    Rewrite,
    /// The file passes through untouched
    Unchanged,
    /// Effective configuration dump
    Config,
    Error,
}

/// Why a file was left unchanged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reason {
    Filtered,
    NoMarker,
    Skipped,
}

impl Reason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Reason::Filtered => "filtered",
            Reason::NoMarker => "no_marker",
            Reason::Skipped => "skipped",
        }
    }
}

/// Metadata for a result item
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Meta {
    /// File size in bytes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,

    /// Number of bytes the transform would prepend
    #[serde(skip_serializing_if = "Option::is_none")]
    pub added_bytes: Option<usize>,
}

/// Error information for a result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutorefError {
    pub code: String,
    pub message: String,
}

impl AutorefError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// The unified result item that all commands produce
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultItem {
    /// The kind of this result
    pub kind: Kind,

    /// Path relative to root, using '/' as separator
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Module identifier handed to the transform
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Absolute stylesheet paths that were (or would be) referenced
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub references: Vec<String>,

    /// Reason the file was left unchanged
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<Reason>,

    /// Text excerpt (the prepended block, for rewrites)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,

    /// Structured payload (used by `config`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,

    /// Metadata
    #[serde(default)]
    pub meta: Meta,

    /// Errors (if any)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<AutorefError>,
}

impl ResultItem {
    fn empty(kind: Kind) -> Self {
        Self {
            kind,
            path: None,
            id: None,
            references: Vec::new(),
            reason: None,
            excerpt: None,
            data: None,
            meta: Meta::default(),
            errors: Vec::new(),
        }
    }

    /// A file that would receive the given references
    pub fn rewrite(path: impl Into<String>, references: Vec<String>) -> Self {
        Self {
            path: Some(path.into()),
            references,
            ..Self::empty(Kind::Rewrite)
        }
    }

    /// A file left untouched
    pub fn unchanged(path: impl Into<String>, reason: Reason) -> Self {
        Self {
            path: Some(path.into()),
            reason: Some(reason),
            ..Self::empty(Kind::Unchanged)
        }
    }

    /// The effective configuration
    pub fn config(data: serde_json::Value) -> Self {
        Self {
            data: Some(data),
            ..Self::empty(Kind::Config)
        }
    }

    /// Create a new error result
    pub fn error(error: AutorefError) -> Self {
        Self {
            errors: vec![error],
            ..Self::empty(Kind::Error)
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_excerpt(mut self, excerpt: impl Into<String>) -> Self {
        self.excerpt = Some(excerpt.into());
        self
    }

    /// Set metadata
    pub fn with_meta(mut self, meta: Meta) -> Self {
        self.meta = meta;
        self
    }
}

/// Result set containing multiple result items
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResultSet {
    pub items: Vec<ResultItem>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn push(&mut self, item: ResultItem) {
        self.items.push(item);
    }

    /// Sort items by path for stable output; path-less items go last
    pub fn sort(&mut self) {
        self.items.sort_by(|a, b| match (&a.path, &b.path) {
            (Some(pa), Some(pb)) => pa.cmp(pb),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromIterator<ResultItem> for ResultSet {
    fn from_iter<T: IntoIterator<Item = ResultItem>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_item_rewrite() {
        let item = ResultItem::rewrite("src/a.css", vec!["/p/src/index.css".to_string()]);
        assert_eq!(item.kind, Kind::Rewrite);
        assert_eq!(item.path, Some("src/a.css".to_string()));
        assert_eq!(item.references.len(), 1);
        assert!(item.reason.is_none());
    }

    #[test]
    fn test_result_item_unchanged_serializes_reason() {
        let item = ResultItem::unchanged("src/b.css", Reason::NoMarker);
        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains("\"kind\":\"unchanged\""));
        assert!(json.contains("\"reason\":\"no_marker\""));
        assert!(!json.contains("references"));
    }

    #[test]
    fn test_result_item_error() {
        let item = ResultItem::error(AutorefError::new("RESOLVER_FAILED", "boom"));
        assert_eq!(item.kind, Kind::Error);
        assert_eq!(item.errors[0].code, "RESOLVER_FAILED");
    }

    #[test]
    fn test_result_set_sort() {
        let mut set = ResultSet::new();
        set.push(ResultItem::error(AutorefError::new("E", "no path")));
        set.push(ResultItem::unchanged("src/b.css", Reason::Skipped));
        set.push(ResultItem::rewrite("src/a.css", Vec::new()));
        set.sort();
        assert_eq!(set.items[0].path.as_deref(), Some("src/a.css"));
        assert_eq!(set.items[1].path.as_deref(), Some("src/b.css"));
        assert!(set.items[2].path.is_none());
    }

    #[test]
    fn test_reason_as_str() {
        assert_eq!(Reason::Filtered.as_str(), "filtered");
        assert_eq!(Reason::Skipped.as_str(), "skipped");
    }
}
