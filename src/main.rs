//! bundle-log: asset-bundle build log viewer and diff tool
//!
//! Serves an interactive viewer over a build log, prints asset and bundle
//! views, and compares two logs.

#![allow(clippy::needless_pass_by_value)]

use anyhow::{Context, Result};
use bundle_log_tools::{
    cli,
    config::{
        self, AppConfig, DiffConfig, DiffPaths, ServeConfig, ViewConfig, ViewTarget,
        CONFIG_FILE_NAMES,
    },
    model::{AssetSortKey, SortDirection},
    pipeline::exit_codes,
    reports::ReportFormat,
};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "bundle-log")]
#[command(version)]
#[command(about = "Asset-bundle build log viewer and diff tool", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Success / no changes detected
    1  Changes detected (with --fail-on-change)
    3  Error occurred

EXAMPLES:
    # Browse the build log in a local viewer
    bundle-log serve Build/build_log.json

    # List the assets packed into the most bundles
    bundle-log view build_log.json --sort bundles --desc

    # Which bundles is one asset in, and with which GUIDs
    bundle-log view build_log.json --asset Assets/UI/icon.png

    # CI check between two builds
    bundle-log diff previous.json build_log.json -o summary --fail-on-change")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output (also respects `NO_COLOR` env)
    #[arg(long, global = true)]
    no_color: bool,

    /// Path to configuration file
    #[arg(long, global = true, env = "BUNDLE_LOG_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

// ============================================================================
// Command argument structs
// ============================================================================

/// Arguments for the `serve` subcommand
#[derive(Parser)]
struct ServeArgs {
    /// Path to the build log (default: build_log.json or the config file's `server.log_file`)
    log: Option<PathBuf>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Address to bind
    #[arg(long)]
    bind: Option<String>,

    /// Path the viewer page is served at
    #[arg(long)]
    page_path: Option<String>,
}

/// Arguments for the `view` subcommand
#[derive(Parser)]
struct ViewArgs {
    /// Path to the build log
    log: PathBuf,

    /// Output format (auto detects TTY: table if interactive, summary otherwise)
    #[arg(short, long, default_value = "auto")]
    output: ReportFormat,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// Case-insensitive substring filter on asset paths
    #[arg(short, long, conflicts_with_all = ["asset", "bundle"])]
    search: Option<String>,

    /// Sort the asset table by column
    #[arg(long, value_enum, default_value = "none", conflicts_with_all = ["asset", "bundle"])]
    sort: AssetSortKey,

    /// Sort descending
    #[arg(long)]
    desc: bool,

    /// Show the bundles (with GUIDs) one asset maps to
    #[arg(long, conflicts_with = "bundle")]
    asset: Option<String>,

    /// Show one bundle's content
    #[arg(long)]
    bundle: Option<String>,
}

/// Arguments for the `diff` subcommand
#[derive(Parser)]
struct DiffArgs {
    /// Path to the previous build log
    previous: PathBuf,

    /// Path to the current build log
    current: PathBuf,

    /// Output format (auto detects TTY: table if interactive, summary otherwise)
    #[arg(short, long, default_value = "auto")]
    output: ReportFormat,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// Exit with code 1 if any changes are detected
    #[arg(long)]
    fail_on_change: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the local viewer server
    Serve(ServeArgs),

    /// Print the asset table, one asset's bundles, or one bundle's content
    View(ViewArgs),

    /// Compare two build logs
    Diff(DiffArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Generate JSON Schema for the config file format
    ConfigSchema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show, discover, or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Sub-subcommands for the `config` command
#[derive(Subcommand)]
enum ConfigAction {
    /// Print current effective configuration (merged from defaults + file)
    Show,
    /// Print config file search paths and discovered config file
    Path,
    /// Generate an example .bundle-log.yaml in the current directory
    Init,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    match run(cli) {
        Ok(exit_code) => {
            if exit_code != exit_codes::SUCCESS {
                std::process::exit(exit_code);
            }
        }
        Err(err) => {
            eprintln!("Error: {err:#}");
            std::process::exit(exit_codes::ERROR);
        }
    }
}

/// Settings shared by every command, from CLI flags layered over the config file.
fn effective_config(cli: &Cli, mut overrides: AppConfig) -> AppConfig {
    overrides.output.no_color |= cli.no_color;
    overrides.behavior.quiet |= cli.quiet;

    let (config, loaded_from) =
        AppConfig::from_file_with_overrides(cli.config.as_deref(), &overrides);
    if let Some(path) = loaded_from {
        tracing::debug!("Loaded config from {}", path.display());
    }
    config
}

fn run(cli: Cli) -> Result<i32> {
    match &cli.command {
        Commands::Serve(args) => {
            let mut overrides = AppConfig::default();
            if let Some(log) = &args.log {
                overrides.server.log_file.clone_from(log);
            }
            if let Some(port) = args.port {
                overrides.server.port = port;
            }
            if let Some(bind) = &args.bind {
                overrides.server.bind.clone_from(bind);
            }
            if let Some(page_path) = &args.page_path {
                overrides.server.page_path.clone_from(page_path);
            }

            let config = effective_config(&cli, overrides);
            cli::run_serve(ServeConfig {
                server: config.server,
                behavior: config.behavior,
            })?;
            Ok(exit_codes::SUCCESS)
        }

        Commands::View(args) => {
            let overrides = AppConfig::builder()
                .output_format(args.output)
                .build();
            let mut config = effective_config(&cli, overrides);
            config.output.file.clone_from(&args.output_file);

            let target = match (&args.asset, &args.bundle) {
                (Some(asset), _) => ViewTarget::Asset(asset.clone()),
                (None, Some(bundle)) => ViewTarget::Bundle(bundle.clone()),
                (None, None) => ViewTarget::Assets {
                    search: args.search.clone(),
                    sort: args.sort,
                    direction: if args.desc {
                        SortDirection::Desc
                    } else {
                        SortDirection::Asc
                    },
                },
            };

            cli::run_view(ViewConfig {
                log_path: args.log.clone(),
                target,
                output: config.output,
                behavior: config.behavior,
            })?;
            Ok(exit_codes::SUCCESS)
        }

        Commands::Diff(args) => {
            let overrides = AppConfig::builder()
                .output_format(args.output)
                .fail_on_change(args.fail_on_change)
                .build();
            let mut config = effective_config(&cli, overrides);
            config.output.file.clone_from(&args.output_file);

            cli::run_diff(DiffConfig {
                paths: DiffPaths {
                    previous: args.previous.clone(),
                    current: args.current.clone(),
                },
                output: config.output,
                behavior: config.behavior,
            })
        }

        Commands::Completions { shell } => {
            generate(*shell, &mut Cli::command(), "bundle-log", &mut io::stdout());
            Ok(exit_codes::SUCCESS)
        }

        Commands::ConfigSchema { output } => {
            let schema = config::generate_json_schema();
            match output {
                Some(path) => {
                    std::fs::write(path, &schema)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    eprintln!("Schema written to {}", path.display());
                }
                None => {
                    println!("{schema}");
                }
            }
            Ok(exit_codes::SUCCESS)
        }

        Commands::Config { action } => {
            run_config_action(action, &cli)?;
            Ok(exit_codes::SUCCESS)
        }
    }
}

fn run_config_action(action: &ConfigAction, cli: &Cli) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let (config, loaded_from) = config::load_or_default(cli.config.as_deref());
            if let Some(path) = &loaded_from {
                eprintln!("# Loaded from: {}", path.display());
            } else {
                eprintln!("# No config file found; showing defaults");
            }
            let yaml = serde_yaml::to_string(&config).context("failed to serialize config")?;
            print!("{yaml}");
            Ok(())
        }
        ConfigAction::Path => {
            let search_paths: [Option<String>; 3] = [
                std::env::current_dir()
                    .ok()
                    .map(|p| p.display().to_string()),
                config::file::user_config_path().map(|p| p.display().to_string()),
                ::dirs::home_dir().map(|p| p.display().to_string()),
            ];
            eprintln!("Config file search paths (in order, after --config and the git root):");
            for path in search_paths.into_iter().flatten() {
                eprintln!("  {path}");
            }
            eprintln!();
            eprintln!("Recognized file names:");
            for name in CONFIG_FILE_NAMES {
                eprintln!("  {name}");
            }
            eprintln!();
            match config::discover_config_file(cli.config.as_deref()) {
                Some(path) => eprintln!("Active config file: {}", path.display()),
                None => eprintln!("No config file found."),
            }
            Ok(())
        }
        ConfigAction::Init => {
            let target = std::env::current_dir()
                .context("cannot determine current directory")?
                .join(".bundle-log.yaml");
            if target.exists() {
                anyhow::bail!(
                    "{} already exists. Remove it first to re-initialize.",
                    target.display()
                );
            }
            let content = config::generate_example_config();
            std::fs::write(&target, content)
                .with_context(|| format!("failed to write {}", target.display()))?;
            eprintln!("Created {}", target.display());
            Ok(())
        }
    }
}
