//! Renderer module
//!
//! Renders ResultSet to different output formats: jsonl, json, md, raw

use crate::core::model::{Kind, ResultItem, ResultSet};

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Jsonl,
    Json,
    Markdown,
    Raw,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "jsonl" => Ok(OutputFormat::Jsonl),
            "json" => Ok(OutputFormat::Json),
            "md" | "markdown" => Ok(OutputFormat::Markdown),
            "raw" => Ok(OutputFormat::Raw),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

/// Render configuration combining format and options
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderConfig {
    pub format: OutputFormat,
    pub pretty: bool,
}

impl RenderConfig {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            pretty: false,
        }
    }

    /// Create a new render config with pretty option
    pub fn with_pretty(format: OutputFormat, pretty: bool) -> Self {
        Self { format, pretty }
    }
}

/// Renderer for result sets
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            config: RenderConfig::new(format),
        }
    }

    /// Create a new renderer with render config
    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Render a result set to a string
    pub fn render(&self, result_set: &ResultSet) -> String {
        match self.config.format {
            OutputFormat::Jsonl => self.render_jsonl(result_set),
            OutputFormat::Json => self.render_json(result_set),
            OutputFormat::Markdown => self.render_markdown(result_set),
            OutputFormat::Raw => self.render_raw(result_set),
        }
    }

    /// Render as JSON Lines (one JSON object per line)
    fn render_jsonl(&self, result_set: &ResultSet) -> String {
        result_set
            .items
            .iter()
            .filter_map(|item| {
                if self.config.pretty {
                    serde_json::to_string_pretty(item).ok()
                } else {
                    serde_json::to_string(item).ok()
                }
            })
            .collect::<Vec<_>>()
            .join(if self.config.pretty { "\n\n" } else { "\n" })
    }

    /// Render as a single JSON array
    fn render_json(&self, result_set: &ResultSet) -> String {
        if self.config.pretty {
            serde_json::to_string_pretty(&result_set.items).unwrap_or_else(|_| "[]".to_string())
        } else {
            serde_json::to_string(&result_set.items).unwrap_or_else(|_| "[]".to_string())
        }
    }

    /// Render as Markdown
    fn render_markdown(&self, result_set: &ResultSet) -> String {
        let mut output = String::new();

        let mut rewrites = Vec::new();
        let mut unchanged = Vec::new();
        let mut configs = Vec::new();
        let mut errors = Vec::new();

        for item in &result_set.items {
            match item.kind {
                Kind::Rewrite => rewrites.push(item),
                Kind::Unchanged => unchanged.push(item),
                Kind::Config => configs.push(item),
                Kind::Error => errors.push(item),
            }
        }

        if !errors.is_empty() {
            output.push_str("## Errors\n\n");
            for item in errors {
                for error in &item.errors {
                    output.push_str(&format!("- **{}**: {}", error.code, error.message));
                    if let Some(path) = &item.path {
                        output.push_str(&format!(" (`{}`)", path));
                    }
                    output.push('\n');
                }
            }
            output.push('\n');
        }

        if !rewrites.is_empty() {
            output.push_str("## Rewrites\n\n");
            for item in rewrites {
                self.render_rewrite_md(&mut output, item);
            }
        }

        if !unchanged.is_empty() {
            output.push_str("## Unchanged\n\n");
            for item in unchanged {
                if let Some(path) = &item.path {
                    output.push_str(&format!("- `{}`", path));
                    if let Some(reason) = item.reason {
                        output.push_str(&format!(" ({})", reason.as_str()));
                    }
                    output.push('\n');
                }
            }
            output.push('\n');
        }

        if !configs.is_empty() {
            output.push_str("## Configuration\n\n");
            for item in configs {
                if let Some(data) = &item.data {
                    let json = serde_json::to_string_pretty(data).unwrap_or_default();
                    output.push_str("```json\n");
                    output.push_str(&json);
                    output.push_str("\n```\n\n");
                }
            }
        }

        output
    }

    fn render_rewrite_md(&self, output: &mut String, item: &ResultItem) {
        if let Some(path) = &item.path {
            output.push_str(&format!("### `{}`\n", path));
        }
        for reference in &item.references {
            output.push_str(&format!("- `{}`\n", reference));
        }
        output.push('\n');
    }

    /// Render as raw output (for debugging)
    fn render_raw(&self, result_set: &ResultSet) -> String {
        result_set
            .items
            .iter()
            .filter_map(|item| item.excerpt.clone())
            .collect::<Vec<_>>()
            .join("\n---\n")
    }
}
