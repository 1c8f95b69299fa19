//! Show the effective configuration after file, env, and flag merging

use anyhow::Result;
use serde_json::json;
use std::path::Path;

use crate::backends::init_plugin;
use crate::config::{OneOrMany, ProjectConfig};
use crate::core::model::{ResultItem, ResultSet};
use crate::core::paths::normalize_path;
use crate::core::render::{RenderConfig, Renderer};
use crate::plugin::source::DEFAULT_CSS_FILE;
use crate::plugin::{Plugin, ReferenceSource};

/// Describe the configured plugin. Runs setup so pattern errors surface here.
pub fn describe(root: &Path, project: &ProjectConfig) -> Result<ResultItem> {
    let plugin = init_plugin(root, project)?;
    let options = plugin.options();

    let source = match plugin.source() {
        ReferenceSource::Literal(path) => json!(path),
        ReferenceSource::LiteralList(paths) => json!(paths),
        ReferenceSource::Resolver(_) => json!({
            "rules": project.rules,
            "default": project
                .css
                .clone()
                .unwrap_or_else(|| OneOrMany::One(DEFAULT_CSS_FILE.to_string())),
        }),
    };

    let data = json!({
        "plugin": plugin.name(),
        "enforce": plugin.enforce(),
        "root": plugin.root().map(normalize_path),
        "css": source,
        "include": options.include,
        "exclude": options.exclude,
        "skip": project.skip,
    });

    Ok(ResultItem::config(data))
}

/// Run the config command
pub fn run_config(root: &Path, project: &ProjectConfig, render: RenderConfig) -> Result<()> {
    let result_set: ResultSet = std::iter::once(describe(root, project)?).collect();
    let renderer = Renderer::with_config(render);
    println!("{}", renderer.render(&result_set));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigOverrides;

    #[cfg(unix)]
    #[test]
    fn test_describe_defaults() {
        let item = describe(Path::new("/proj"), &ProjectConfig::default()).unwrap();
        let data = item.data.unwrap();
        assert_eq!(data["plugin"], "tailwind-auto-reference");
        assert_eq!(data["enforce"], "pre");
        assert_eq!(data["root"], "/proj");
        assert_eq!(data["css"], "./src/index.css");
        assert_eq!(data["include"][0], r"re:\.vue\?.*type=style");
        assert_eq!(data["exclude"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn test_describe_with_overrides() {
        let project = ProjectConfig::default().with_overrides(&ConfigOverrides {
            css: vec!["./a.css".into(), "./b.css".into()],
            include: vec!["**/*.css".into()],
            exclude: Vec::new(),
        });
        let data = describe(Path::new("/proj"), &project).unwrap().data.unwrap();
        assert_eq!(data["css"], json!(["./a.css", "./b.css"]));
        assert_eq!(data["include"], json!(["**/*.css"]));
    }

    #[test]
    fn test_describe_rules_keep_fallback_css() {
        let project: ProjectConfig = serde_json::from_str(
            r#"{
                "css": "./src/main.css",
                "rules": [{ "when": "src/admin/**", "css": "./admin.css" }]
            }"#,
        )
        .unwrap();
        let data = describe(Path::new("/proj"), &project).unwrap().data.unwrap();
        assert_eq!(data["css"]["default"], "./src/main.css");
        assert_eq!(data["css"]["rules"][0]["css"], "./admin.css");

        let overridden = project.with_overrides(&ConfigOverrides {
            css: vec!["./flag.css".into()],
            include: Vec::new(),
            exclude: Vec::new(),
        });
        let data = describe(Path::new("/proj"), &overridden).unwrap().data.unwrap();
        assert_eq!(data["css"]["default"], "./flag.css");
    }

    #[test]
    fn test_describe_rules_without_css_use_default_file() {
        let project: ProjectConfig =
            serde_json::from_str(r#"{ "rules": [{ "when": "**/admin/**", "css": "./a.css" }] }"#)
                .unwrap();
        let data = describe(Path::new("/proj"), &project).unwrap().data.unwrap();
        assert_eq!(data["css"]["default"], DEFAULT_CSS_FILE);
    }
}
