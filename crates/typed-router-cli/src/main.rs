mod commands;
mod config;
mod scan;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::filter::LevelFilter;
use typed_router::{Backtracking, EmitTarget};

use config::{Config, DEFAULT_CONFIG_FILE};

#[derive(Parser)]
#[command(name = "typed-router")]
#[command(version, about = "Typed Router CLI - route declarations for file-system routers", long_about = None)]
struct Cli {
    /// Configuration file
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// App directory to scan (overrides the config file)
    #[arg(short, long, global = true)]
    app_dir: Option<String>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate route declarations from the app directory
    Generate {
        /// Output file
        #[arg(short, long)]
        out: Option<String>,

        /// Artifact to emit: typescript, rust or manifest
        #[arg(short, long)]
        target: Option<EmitTarget>,

        /// Fail instead of writing when the artifact is out of date
        #[arg(long)]
        check: bool,
    },

    /// List declared routes and their params
    Routes,

    /// Show what an href resolves to
    Resolve {
        /// Href to resolve, e.g. /colors/red
        href: String,

        /// Backtracking policy: full or committed
        #[arg(long)]
        backtracking: Option<Backtracking>,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = Config::load(&cli.config)?;
    if let Some(app_dir) = cli.app_dir {
        config.routing.app_dir = app_dir;
    }

    // Execute command
    match cli.command {
        Commands::Generate { out, target, check } => {
            if let Some(target) = target {
                config.emit.target = target;
            }
            if out.is_some() {
                config.emit.out_file = out;
            }
            commands::generate::execute(&config, check)?;
        }
        Commands::Routes => {
            commands::routes::execute(&config)?;
        }
        Commands::Resolve { href, backtracking } => {
            if let Some(backtracking) = backtracking {
                config.matching.backtracking = backtracking;
            }
            commands::resolve::execute(&config, &href)?;
        }
    }

    Ok(())
}
