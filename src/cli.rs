//! CLI module - Command-line interface definitions and handlers

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::backends::check::CheckOptions;
use crate::backends::transform::Input;
use crate::config::{ConfigOverrides, ProjectConfig, CSS_ENV};
use crate::core::paths::absolutize;
use crate::core::render::{OutputFormat, RenderConfig};

/// autoref - prepend Tailwind `@reference` directives to style blocks that use `@apply`.
#[derive(Parser, Debug)]
#[command(name = "autoref")]
#[command(
    author,
    version,
    about,
    long_about = r#"autoref runs the tailwind-auto-reference transform outside a bundler.

Style content containing `@apply ` whose module id passes the include/exclude
filter gets one line per stylesheet prepended:

    @reference "/abs/path/to/src/index.css";

Settings come from ROOT/autoref.json (optional), then AUTOREF_CSS, then flags.

Examples:
    autoref transform src/components/button.css
    autoref transform - --id "src/App.vue?vue&type=style&index=0&lang.css" < style.css
    autoref check --include "src/**/*.css" --css ./src/main.css
    autoref config
"#
)]
pub struct Cli {
    /// Project root the stylesheet paths resolve against.
    #[arg(
        long,
        global = true,
        default_value = ".",
        value_name = "ROOT",
        long_help = "Project root (defaults to the current directory).\n\n\
Stylesheet paths and relative include/exclude globs are resolved against it."
    )]
    pub root: PathBuf,

    /// Config file (defaults to ROOT/autoref.json when present).
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output format for result sets (jsonl/json/md/raw).
    #[arg(
        long,
        global = true,
        default_value = "jsonl",
        value_name = "FORMAT",
        long_help = "Select the output format for `check` and `config`.\n\n\
Supported values:\n\
- jsonl (default)\n\
- json\n\
- md (markdown)\n\
- raw (prepended blocks only)"
    )]
    pub format: String,

    /// Pretty-print JSON/JSONL output with indentation.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Quiet mode (errors only on stderr).
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose mode (per-file decisions on stderr).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Flags overriding the project config field by field
#[derive(Args, Debug, Clone, Default)]
pub struct OverrideArgs {
    /// Stylesheet to reference (repeatable; order is kept).
    #[arg(long = "css", value_name = "PATH")]
    pub css: Vec<String>,

    /// Include pattern (repeatable; `re:` prefix for a regex).
    #[arg(long, value_name = "PATTERN")]
    pub include: Vec<String>,

    /// Exclude pattern (repeatable; `re:` prefix for a regex).
    #[arg(long, value_name = "PATTERN")]
    pub exclude: Vec<String>,
}

impl From<OverrideArgs> for ConfigOverrides {
    fn from(args: OverrideArgs) -> Self {
        Self {
            css: args.css,
            include: args.include,
            exclude: args.exclude,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Transform one file (or stdin) and print the result.
    #[command(long_about = "Run the transform once and write the result to stdout exactly,\n\
without adding a trailing newline.\n\n\
The module id defaults to the file's absolute path. Use --id to emulate\n\
bundler ids such as `App.vue?vue&type=style&index=0&lang.css`.\n\n\
Examples:\n\
  autoref transform src/button.css --include \"**/*.css\"\n\
  autoref transform - --id App.vue?vue&type=style < block.css\n")]
    Transform {
        /// File to transform (relative to ROOT unless absolute), or `-` for stdin.
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Module id handed to the filter, skip predicate, and rules.
        #[arg(long, value_name = "ID")]
        id: Option<String>,

        #[command(flatten)]
        overrides: OverrideArgs,
    },

    /// Report which files under ROOT the transform would rewrite.
    #[command(long_about = "Walk ROOT (or --scope), transform every UTF-8 text file in memory,\n\
and emit one `rewrite` result per file that would receive references.\n\
Files are never modified.\n\n\
Each file is transformed whole, with its absolute path as the module id.\n\
`.vue` files are not split into `<style>` blocks, so the default include\n\
(`\\.vue\\?.*type=style`) matches nothing here: pass --include globs such as\n\
\"src/**/*.css\", or use `transform --id` to emulate a style block id.\n\n\
Examples:\n\
  autoref check --include \"src/**/*.css\"\n\
  autoref check --all --format md\n")]
    Check {
        /// Limit the walk to a subdirectory under ROOT.
        #[arg(long, value_name = "PATH")]
        scope: Option<PathBuf>,

        /// Include hidden files/directories (dotfiles).
        #[arg(long)]
        hidden: bool,

        /// Disable .gitignore and other ignore rules.
        #[arg(long)]
        no_ignore: bool,

        /// Also report unchanged files with the reason.
        #[arg(long)]
        all: bool,

        #[command(flatten)]
        overrides: OverrideArgs,
    },

    /// Print the effective configuration.
    Config {
        #[command(flatten)]
        overrides: OverrideArgs,
    },
}

impl Commands {
    fn overrides(&self) -> ConfigOverrides {
        match self {
            Commands::Transform { overrides, .. }
            | Commands::Check { overrides, .. }
            | Commands::Config { overrides } => overrides.clone().into(),
        }
    }
}

/// Load the project config and merge env and flag overrides
fn load_project(cli: &Cli, root: &std::path::Path) -> Result<ProjectConfig> {
    let project = ProjectConfig::discover(root, cli.config.as_deref())
        .context("failed to load project config")?;
    let env_css = std::env::var(CSS_ENV).ok();
    Ok(project
        .with_css_env(env_css.as_deref())
        .with_overrides(&cli.command.overrides()))
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    let format: OutputFormat = cli.format.parse().unwrap_or_default();
    let render_config = RenderConfig::with_pretty(format, cli.pretty);

    let root = cli
        .root
        .canonicalize()
        .or_else(|_| absolutize(&cli.root))
        .context("cannot resolve --root")?;
    let project = load_project(&cli, &root)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    match &cli.command {
        Commands::Transform { file, id, .. } => runtime.block_on(
            crate::backends::transform::run_transform(
                &root,
                &project,
                Input::from_arg(file),
                id.as_deref(),
            ),
        ),

        Commands::Check {
            scope,
            hidden,
            no_ignore,
            all,
            ..
        } => {
            let plugin = crate::backends::init_plugin(&root, &project)?;
            let options = CheckOptions {
                scope: scope.as_deref(),
                hidden: *hidden,
                ignore: !no_ignore,
                all: *all,
            };
            runtime.block_on(crate::backends::check::run_check(
                &root,
                plugin,
                &options,
                render_config,
            ))
        }

        Commands::Config { .. } => {
            crate::backends::show_config::run_config(&root, &project, render_config)
        }
    }
}
