//! Check backend - walk a project and report which files the plugin rewrites
//!
//! Uses the ignore crate for traversal and runs one transform task per file.

use anyhow::Result;
use ignore::WalkBuilder;
use std::path::Path;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::core::error::InjectorError;
use crate::core::file_reader::{read_file_safe, FileReadResult};
use crate::core::model::{AutorefError, Meta, Reason, ResultItem, ResultSet};
use crate::core::paths::{make_relative, normalize_path};
use crate::core::render::{RenderConfig, Renderer};
use crate::plugin::injector::{reference_block, AutoReference, Outcome};

/// Traversal options for `check`
#[derive(Debug, Clone, Default)]
pub struct CheckOptions<'a> {
    pub scope: Option<&'a Path>,
    pub hidden: bool,
    pub ignore: bool,
    /// Also report files left unchanged
    pub all: bool,
}

/// Transform every text file under the scope and collect the outcomes
pub async fn check_tree(
    root: &Path,
    plugin: Arc<AutoReference>,
    options: &CheckOptions<'_>,
) -> Result<ResultSet> {
    let scan_path = match options.scope {
        Some(scope) => root.join(scope),
        None => root.to_path_buf(),
    };

    let mut builder = WalkBuilder::new(&scan_path);
    builder
        .hidden(!options.hidden)
        .git_ignore(options.ignore)
        .git_global(options.ignore)
        .git_exclude(options.ignore)
        .ignore(options.ignore)
        .require_git(false);

    let mut tasks = JoinSet::new();

    for entry in builder.build() {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                warn!(error = %err, "skipping unreadable entry");
                continue;
            }
        };

        if !entry.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }

        let path = entry.into_path();
        let relative = match make_relative(&path, root) {
            Some(r) => r,
            None => continue,
        };

        let (code, size) = match read_file_safe(&path) {
            FileReadResult::Text { content, size } => (content, size),
            FileReadResult::Skipped(reason) => {
                debug!(path = %relative, reason = reason.as_str(), "not a transformable text file");
                continue;
            }
        };

        let id = normalize_path(&path);
        let plugin = Arc::clone(&plugin);
        let all = options.all;
        tasks.spawn(async move {
            let outcome = plugin.transform_with_outcome(&code, &id).await;
            to_item(relative, id, size, outcome.map(|t| t.outcome), all)
        });
    }

    let mut result_set = ResultSet::new();
    while let Some(joined) = tasks.join_next().await {
        if let Some(item) = joined? {
            result_set.push(item);
        }
    }

    result_set.sort();
    Ok(result_set)
}

fn to_item(
    relative: String,
    id: String,
    size: u64,
    outcome: Result<Outcome, InjectorError>,
    all: bool,
) -> Option<ResultItem> {
    let reason = match outcome {
        Ok(Outcome::Injected(references)) => {
            let block = reference_block(&references);
            let meta = Meta {
                size: Some(size),
                added_bytes: Some(block.len()),
            };
            return Some(
                ResultItem::rewrite(relative, references)
                    .with_id(id)
                    .with_excerpt(block)
                    .with_meta(meta),
            );
        }
        Ok(Outcome::Filtered) => Reason::Filtered,
        Ok(Outcome::NoMarker) => Reason::NoMarker,
        Ok(Outcome::Skipped) => Reason::Skipped,
        Err(err) => {
            let code = match err {
                InjectorError::Resolver { .. } => "RESOLVER_FAILED",
                _ => "TRANSFORM_FAILED",
            };
            let message = format!("{:#}", anyhow::Error::new(err));
            return Some(
                ResultItem::error(AutorefError::new(code, message))
                    .with_path(relative)
                    .with_id(id),
            );
        }
    };

    all.then(|| ResultItem::unchanged(relative, reason).with_id(id))
}

/// Run the check command
pub async fn run_check(
    root: &Path,
    plugin: Arc<AutoReference>,
    options: &CheckOptions<'_>,
    render: RenderConfig,
) -> Result<()> {
    let result_set = check_tree(root, plugin, options).await?;

    let renderer = Renderer::with_config(render);
    let output = renderer.render(&result_set);
    if !output.is_empty() {
        println!("{}", output);
    }

    Ok(())
}
