//! Golden tests for autoref
//!
//! These tests run the binary against `tests/fixtures/sample_project` and
//! verify:
//! - Which files `check` reports, in stable order
//! - The exact reference blocks produced for each file
//! - The effective configuration assembled from `autoref.json`

use assert_cmd::Command;
use serde_json::Value;
use std::path::PathBuf;

/// Get the path to the fixtures directory
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Get the path to the sample project
fn sample_project() -> PathBuf {
    fixtures_dir()
        .join("sample_project")
        .canonicalize()
        .expect("fixture exists")
}

fn sample_root_str() -> String {
    sample_project().to_string_lossy().replace('\\', "/")
}

/// Create a command for running the autoref binary
fn autoref_cmd() -> Command {
    let mut cmd = Command::cargo_bin("autoref").expect("Failed to find autoref binary");
    cmd.env_remove("AUTOREF_CSS").env_remove("AUTOREF_LOG");
    cmd
}

/// Parse JSONL output into a vector of JSON values
fn parse_jsonl(output: &str) -> Vec<Value> {
    output
        .lines()
        .filter(|l| !l.trim().is_empty())
        .filter_map(|l| serde_json::from_str::<Value>(l).ok())
        .collect()
}

fn paths_of(items: &[Value]) -> Vec<&str> {
    items
        .iter()
        .filter_map(|v| v.get("path").and_then(|p| p.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Check Tests ====================

    #[test]
    fn golden_check_rewrites() {
        let mut cmd = autoref_cmd();
        cmd.arg("--root").arg(sample_project()).arg("check");

        let output = cmd.output().expect("failed to execute");
        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        let items = parse_jsonl(&stdout);

        assert_eq!(
            paths_of(&items),
            vec!["src/admin/panel.css", "src/components/button.css"]
        );
        for item in &items {
            assert_eq!(item["kind"], "rewrite");
        }
    }

    #[test]
    fn golden_check_reference_blocks() {
        let root = sample_root_str();
        let mut cmd = autoref_cmd();
        cmd.arg("--root").arg(sample_project()).arg("check");

        let output = cmd.output().expect("failed to execute");
        let items = parse_jsonl(&String::from_utf8_lossy(&output.stdout));

        let panel = &items[0];
        assert_eq!(
            panel["references"],
            serde_json::json!([
                format!("{root}/src/styles/main.css"),
                format!("{root}/src/styles/admin.css"),
            ])
        );
        assert_eq!(
            panel["excerpt"],
            format!(
                "\n@reference \"{root}/src/styles/main.css\";\n@reference \"{root}/src/styles/admin.css\";"
            )
        );

        let button = &items[1];
        assert_eq!(
            button["references"],
            serde_json::json!([format!("{root}/src/styles/main.css")])
        );
        assert_eq!(button["id"], format!("{root}/src/components/button.css"));
    }

    #[test]
    fn golden_check_all_reasons() {
        let mut cmd = autoref_cmd();
        cmd.arg("--root")
            .arg(sample_project())
            .arg("check")
            .arg("--all");

        let output = cmd.output().expect("failed to execute");
        let items = parse_jsonl(&String::from_utf8_lossy(&output.stdout));

        let reason_of = |path: &str| -> Option<String> {
            items
                .iter()
                .find(|v| v["path"] == path)
                .and_then(|v| v.get("reason"))
                .and_then(|r| r.as_str())
                .map(str::to_string)
        };

        assert_eq!(reason_of("src/components/card.css").as_deref(), Some("no_marker"));
        assert_eq!(reason_of("src/vendor/reset.css").as_deref(), Some("filtered"));
        assert_eq!(reason_of("src/App.vue").as_deref(), Some("filtered"));
        assert_eq!(reason_of("src/styles/main.css").as_deref(), Some("no_marker"));
        assert!(reason_of("src/components/button.css").is_none());
    }

    #[test]
    fn golden_check_markdown() {
        let mut cmd = autoref_cmd();
        cmd.arg("--root")
            .arg(sample_project())
            .arg("--format")
            .arg("md")
            .arg("check");

        let output = cmd.output().expect("failed to execute");
        let stdout = String::from_utf8_lossy(&output.stdout);

        assert!(stdout.contains("## Rewrites"));
        assert!(stdout.contains("### `src/admin/panel.css`"));
        assert!(stdout.contains("### `src/components/button.css`"));
        assert!(!stdout.contains("## Unchanged"));
    }

    // ==================== Transform Tests ====================

    #[test]
    fn golden_transform_rule_match() {
        let root = sample_root_str();
        let mut cmd = autoref_cmd();
        cmd.arg("--root")
            .arg(sample_project())
            .arg("transform")
            .arg("src/admin/panel.css");

        let output = cmd.output().expect("failed to execute");
        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);

        let expected = format!(
            "\n@reference \"{root}/src/styles/main.css\";\n@reference \"{root}/src/styles/admin.css\";.panel {{\n  @apply grid gap-2 bg-panel;\n}}\n"
        );
        assert_eq!(stdout, expected);
    }

    #[test]
    fn golden_transform_vue_style_id() {
        let root = sample_root_str();
        let mut cmd = autoref_cmd();
        cmd.arg("--root")
            .arg(sample_project())
            .arg("transform")
            .arg("-")
            .arg("--id")
            .arg(format!("{root}/src/App.vue?vue&type=style&index=0&scoped=true&lang.css"))
            .write_stdin(".btn {\n  @apply font-bold;\n}\n");

        let output = cmd.output().expect("failed to execute");
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert_eq!(
            stdout,
            format!("\n@reference \"{root}/src/styles/main.css\";.btn {{\n  @apply font-bold;\n}}\n")
        );
    }

    // ==================== Config Tests ====================

    #[test]
    fn golden_config_from_file() {
        let mut cmd = autoref_cmd();
        cmd.arg("--root").arg(sample_project()).arg("config");

        let output = cmd.output().expect("failed to execute");
        let items = parse_jsonl(&String::from_utf8_lossy(&output.stdout));
        assert_eq!(items.len(), 1);

        let data = &items[0]["data"];
        assert_eq!(items[0]["kind"], "config");
        assert_eq!(data["plugin"], "tailwind-auto-reference");
        assert_eq!(data["root"], sample_root_str());
        assert_eq!(
            data["include"],
            serde_json::json!(["src/**/*.css", "re:\\.vue\\?.*type=style"])
        );
        assert_eq!(data["exclude"], serde_json::json!(["**/vendor/**"]));
        assert_eq!(data["css"]["rules"][0]["when"], "src/admin/**");
        assert_eq!(data["css"]["default"], "./src/styles/main.css");
    }

    #[test]
    fn golden_config_css_flag_replaces_fallback() {
        let mut cmd = autoref_cmd();
        cmd.arg("--root")
            .arg(sample_project())
            .arg("config")
            .arg("--css")
            .arg("./src/styles/flag.css");

        let output = cmd.output().expect("failed to execute");
        let items = parse_jsonl(&String::from_utf8_lossy(&output.stdout));

        let css = &items[0]["data"]["css"];
        assert_eq!(css["default"], "./src/styles/flag.css");
        assert_eq!(css["rules"][0]["when"], "src/admin/**");
    }
}
