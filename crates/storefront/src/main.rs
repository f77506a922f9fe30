//! Storefront CLI - static e-commerce catalog generator.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "storefront")]
#[command(about = "Static e-commerce catalog generator")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to storefront.toml config file
    #[arg(short, long, default_value = "storefront.toml", global = true)]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Content source overrides shared by commands that query the CMS.
#[derive(Args, Debug, Default, Clone)]
pub struct SourceArgs {
    /// GraphQL endpoint (defaults to config, then the built-in endpoint)
    #[arg(long)]
    endpoint: Option<String>,

    /// Locale to render, repeatable (replaces the configured locales)
    #[arg(short, long = "locale")]
    locales: Vec<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default storefront.toml
    Init {
        /// Overwrite an existing config
        #[arg(short, long)]
        yes: bool,
    },

    /// Build the static catalog site
    Build {
        /// Output directory (defaults to config or "dist")
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Skip minification
        #[arg(long)]
        no_minify: bool,

        #[command(flatten)]
        source: SourceArgs,
    },

    /// List the routes a build would render
    Routes {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Preview a built site
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// Directory to serve
        #[arg(short, long, default_value = "dist")]
        dir: PathBuf,

        /// Do not open browser
        #[arg(long)]
        no_open: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    // Execute command
    match cli.command {
        Commands::Init { yes } => {
            commands::init::run(&cli.config, yes)?;
        }
        Commands::Build {
            output,
            no_minify,
            source,
        } => {
            commands::build::run(&cli.config, output, no_minify, &source).await?;
        }
        Commands::Routes { source } => {
            commands::routes::run(&cli.config, &source).await?;
        }
        Commands::Serve { port, dir, no_open } => {
            commands::serve::run(port, dir, !no_open).await?;
        }
    }

    Ok(())
}
