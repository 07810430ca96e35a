//! Scaffold CLI - provision and inspect e2e test workspaces.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(name = "scaffold")]
#[command(about = "Cached project fixtures for end-to-end tests", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file (defaults apply when it does not exist)
    #[arg(long, global = true, default_value = "scaffold.toml")]
    config: PathBuf,
    /// Override the scratch root from the configuration
    #[arg(long, global = true)]
    root: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reset the live workspace from a variant snapshot
    Provision {
        /// Variant to provision
        #[arg(short, long, default_value = scaffold_core::DEFAULT_VARIANT)]
        variant: String,
    },
    /// Remove the live workspace, keeping snapshots
    Cleanup,
    /// Remove the scratch root including all snapshots
    Purge,
    /// Run a shell command in the live workspace
    Run {
        /// Command line passed to `sh -c`
        command: String,
        /// Print captured output instead of failing on a non-zero exit
        #[arg(long)]
        silence_error: bool,
        /// Run on the async executor and print both streams
        #[arg(long)]
        r#async: bool,
    },
    /// Run a generator subcommand in the live workspace
    Generate {
        #[command(subcommand)]
        command: GenerateCommands,
    },
    /// Fail unless every path exists
    Check {
        /// Paths, relative to the workspace unless absolute
        #[arg(required = true)]
        paths: Vec<String>,
    },
    /// Print a workspace file
    Read {
        /// Path, relative to the workspace unless absolute
        path: String,
        /// Parse as JSON and pretty-print
        #[arg(long)]
        json: bool,
    },
    /// Print a file's size in bytes
    Size {
        /// Path, relative to the workspace unless absolute
        path: String,
    },
    /// Print the effective configuration as TOML
    Config,
}

#[derive(Subcommand)]
enum GenerateCommands {
    /// generate app --no-interactive <name>
    App {
        /// Application name
        name: String,
    },
    /// generate lib --no-interactive <name>
    Lib {
        /// Library name
        name: String,
    },
    /// generate module <name>
    Module {
        /// Module name
        name: String,
    },
}

fn main() -> Result<()> {
    // Initialize tracing subscriber
    // Respects RUST_LOG environment variable (e.g., RUST_LOG=debug)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let provisioner = commands::load(&cli.config, cli.root)?;

    match cli.command {
        Commands::Provision { variant } => commands::provision::run(&provisioner, &variant),
        Commands::Cleanup => commands::provision::cleanup(&provisioner),
        Commands::Purge => commands::provision::purge(&provisioner),
        Commands::Run {
            command,
            silence_error,
            r#async,
        } => {
            if r#async {
                commands::run::run_async(&provisioner, &command, silence_error)
            } else {
                commands::run::run(&provisioner, &command, silence_error)
            }
        }
        Commands::Generate { command } => {
            let (schematic, name) = match command {
                GenerateCommands::App { name } => (commands::run::Schematic::App, name),
                GenerateCommands::Lib { name } => (commands::run::Schematic::Lib, name),
                GenerateCommands::Module { name } => (commands::run::Schematic::Module, name),
            };
            commands::run::generate(&provisioner, schematic, &name)
        }
        Commands::Check { paths } => commands::inspect::check(&provisioner, &paths),
        Commands::Read { path, json } => commands::inspect::read(&provisioner, &path, json),
        Commands::Size { path } => commands::inspect::size(&provisioner, &path),
        Commands::Config => commands::inspect::config(&provisioner),
    }
}
