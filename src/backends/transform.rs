//! Transform backend - run the plugin over a single file or stdin

use anyhow::{bail, Context, Result};
use std::io::{Read, Write};
use std::path::Path;
use tracing::debug;

use crate::backends::{container, init_plugin};
use crate::config::ProjectConfig;
use crate::core::paths::{normalize_path, resolve_from};

/// Source of the content to transform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input<'a> {
    Stdin,
    File(&'a Path),
}

impl<'a> Input<'a> {
    pub fn from_arg(arg: &'a Path) -> Self {
        if arg == Path::new("-") {
            Input::Stdin
        } else {
            Input::File(arg)
        }
    }
}

/// Transform `code` as module `id` through a freshly initialized pipeline
pub async fn transform_text(
    root: &Path,
    project: &ProjectConfig,
    code: &str,
    id: &str,
) -> Result<String> {
    let plugin = init_plugin(root, project)?;
    let pipeline = container(plugin);
    pipeline
        .transform(code, id)
        .await
        .with_context(|| format!("transform failed for {id}"))
}

/// Run the transform command; the result goes to stdout byte for byte
pub async fn run_transform(
    root: &Path,
    project: &ProjectConfig,
    input: Input<'_>,
    id: Option<&str>,
) -> Result<()> {
    let (code, id) = match input {
        Input::Stdin => {
            let Some(id) = id else {
                bail!("--id is required when reading from stdin");
            };
            let mut code = String::new();
            std::io::stdin()
                .read_to_string(&mut code)
                .context("failed to read stdin")?;
            (code, id.to_string())
        }
        Input::File(path) => {
            let full = resolve_from(root, &path.to_string_lossy());
            let code = std::fs::read_to_string(&full)
                .with_context(|| format!("failed to read {}", full.display()))?;
            let id = id
                .map(str::to_string)
                .unwrap_or_else(|| normalize_path(&full));
            (code, id)
        }
    };

    debug!(id = %id, bytes = code.len(), "transforming");
    let output = transform_text(root, project, &code, &id).await?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigOverrides;

    fn project(css: &[&str], include: &[&str]) -> ProjectConfig {
        ProjectConfig::default().with_overrides(&ConfigOverrides {
            css: css.iter().map(|s| s.to_string()).collect(),
            include: include.iter().map(|s| s.to_string()).collect(),
            exclude: Vec::new(),
        })
    }

    #[test]
    fn test_input_from_arg() {
        assert_eq!(Input::from_arg(Path::new("-")), Input::Stdin);
        assert_eq!(
            Input::from_arg(Path::new("a.css")),
            Input::File(Path::new("a.css"))
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_transform_text_default_include() {
        let out = transform_text(
            Path::new("/proj"),
            &ProjectConfig::default(),
            ".a{@apply flex;}",
            "Component.vue?vue&type=style",
        )
        .await
        .unwrap();
        assert_eq!(out, "\n@reference \"/proj/src/index.css\";.a{@apply flex;}");
    }

    #[tokio::test]
    async fn test_transform_text_filtered() {
        let out = transform_text(
            Path::new("/proj"),
            &project(&["./a.css"], &["**/*.css"]),
            "@apply flex;",
            "/proj/src/main.ts",
        )
        .await
        .unwrap();
        assert_eq!(out, "@apply flex;");
    }

    #[tokio::test]
    async fn test_transform_text_bad_pattern_fails_setup() {
        let err = transform_text(
            Path::new("/proj"),
            &project(&[], &["src/{a"]),
            "@apply flex;",
            "/proj/src/a.css",
        )
        .await
        .unwrap_err();
        assert!(format!("{err:#}").contains("invalid filter pattern"));
    }
}
