mod commands;

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use multi_search_core::{paths, Dashboard, FileStore};

#[derive(Parser, Debug)]
#[command(name = "multi-search", about = "Query several search engines from one profile")]
struct Args {
    /// Key-value storage file (defaults to ~/.multi-search/storage.json)
    #[arg(long, global = true)]
    storage: Option<PathBuf>,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List profiles, marking the selected one
    Profiles,
    /// Select the active profile
    Select { profile_id: String },
    /// Print the frame URL of every engine for a query
    Urls {
        #[arg(long)]
        profile: Option<String>,
        #[arg(required = true)]
        query: Vec<String>,
    },
    /// Add an engine to a profile
    AddEngine {
        profile_id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        template: Option<String>,
    },
    /// Change an engine's name or URL template
    UpdateEngine {
        profile_id: String,
        engine_id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        template: Option<String>,
    },
    /// Remove an engine from a profile
    RemoveEngine { profile_id: String, engine_id: String },
    /// Rename a profile
    RenameProfile { profile_id: String, name: String },
    /// Set a profile's minimum tile size
    Resize {
        profile_id: String,
        #[arg(long)]
        min_width: Option<f64>,
        #[arg(long)]
        min_height: Option<f64>,
    },
    /// Write the configuration document (`-` for stdout)
    Export {
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Load a configuration document
    Import { path: PathBuf },
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let storage_path = match args.storage {
        Some(path) => path,
        None => paths::storage_path()?,
    };
    let storage = FileStore::open(storage_path);
    info!("Using storage {}", storage.path().display());
    let mut dashboard = Dashboard::open(storage);

    let mut stdout = std::io::stdout().lock();
    commands::run(&mut dashboard, args.command, &mut stdout)
}
