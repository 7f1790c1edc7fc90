//! Shadecraft CLI - theme configuration from the command line
//!
//! Works on a directory holding an optional `shadecraft.toml` and the
//! persisted theme state. Provides:
//! - Validation and import of theme JSON
//! - CSS, app-config and JSON export
//! - Application of generated themes, rate limited per client
//! - Field edits, reset and named presets

mod commands;
mod config;

use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use shadecraft_theme::{ColorMode, ExportFormat, RateLimiter};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::commands::{Field, Workspace};

/// Theme configuration engine for component-library design tokens
#[derive(Parser, Debug)]
#[command(name = "shadecraft")]
#[command(about = "Validate, import, export and manage theme configurations")]
#[command(version)]
struct Cli {
    /// Workspace directory
    #[arg(short = 'C', long, global = true, default_value = ".")]
    dir: PathBuf,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write a default shadecraft.toml
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Check a theme JSON file without importing it
    Validate { file: PathBuf },

    /// Replace the current theme with a JSON file
    Import { file: PathBuf },

    /// Export the current theme
    Export {
        #[arg(short, long, value_enum, default_value_t = FormatArg::Css)]
        format: FormatArg,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Apply generated theme files
    Ai {
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Client key the rate limit is counted against
        #[arg(long, default_value = "local")]
        client: String,
    },

    /// Set one field, e.g. `color.primary violet` or `text.muted 600`
    Set {
        field: String,
        value: String,

        /// Edit the dark-mode counterpart
        #[arg(long)]
        dark: bool,
    },

    /// Restore the default theme
    Reset,

    /// Manage saved presets
    Preset {
        #[command(subcommand)]
        action: PresetAction,
    },
}

#[derive(Subcommand, Debug)]
enum PresetAction {
    /// List saved presets
    List,
    /// Save the current theme under a name
    Save { name: String },
    /// Load a saved preset
    Load { name: String },
    /// Delete a saved preset
    Delete { name: String },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatArg {
    Css,
    AppConfig,
    Json,
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Css => ExportFormat::Css,
            FormatArg::AppConfig => ExportFormat::AppConfig,
            FormatArg::Json => ExportFormat::Json,
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let workspace = || Workspace::open(&cli.dir);

    match cli.command {
        Commands::Init { force } => {
            let path = commands::init(&cli.dir, force)?;
            println!("Created {}", path.display());
        }
        Commands::Validate { file } => {
            commands::validate_file(&file)?;
            println!("{} is a valid theme", file.display());
        }
        Commands::Import { file } => {
            commands::import(&workspace()?, &file)?;
            info!("imported {}", file.display());
        }
        Commands::Export { format, output } => {
            let artifact = commands::export(&workspace()?, format.into(), output.as_deref())?;
            if output.is_none() {
                print!("{}", artifact.contents);
            }
        }
        Commands::Ai { files, client } => {
            let ws = workspace()?;
            let limiter = RateLimiter::new(ws.config().rate_limit());
            let now_ms = || u64::try_from(Utc::now().timestamp_millis()).unwrap_or_default();
            for explanation in commands::apply_ai(&ws, &files, &client, &limiter, now_ms)? {
                println!("{explanation}");
            }
        }
        Commands::Set { field, value, dark } => {
            let mode = if dark { ColorMode::Dark } else { ColorMode::Light };
            commands::set(&workspace()?, mode, Field::parse(&field)?, &value)?;
        }
        Commands::Reset => commands::reset(&workspace()?)?,
        Commands::Preset { action } => {
            let ws = workspace()?;
            match action {
                PresetAction::List => {
                    for line in commands::preset_list(&ws)? {
                        println!("{line}");
                    }
                }
                PresetAction::Save { name } => {
                    let outcome = commands::preset_save(&ws, &name)?;
                    let verb = if outcome.is_update { "Updated" } else { "Saved" };
                    println!("{verb} preset '{}'", name.trim());
                }
                PresetAction::Load { name } => commands::preset_load(&ws, &name)?,
                PresetAction::Delete { name } => commands::preset_delete(&ws, &name)?,
            }
        }
    }

    Ok(())
}
