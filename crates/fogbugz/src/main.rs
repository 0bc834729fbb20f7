use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

use fogbugz_core::CliConfig;

mod commands;
mod output;
mod prompt;

#[derive(Parser)]
#[command(name = "fogbugz")]
#[command(version)]
#[command(about = "Manage FogBugz cases from the command line. Ideal for batch processing.")]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to an alternate configuration file
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Search FogBugz for cases, using FogBugz query syntax
    Search {
        /// Query terms; negations use ! instead of -. No terms returns your current case list
        query: Vec<String>,
    },
    /// Display a list of projects, categories, people, statuses, areas, wikis, or mailboxes
    List {
        /// The type of list to display
        #[arg(value_name = "TYPE")]
        kind: Option<String>,
        /// For statuses only, filter by a category
        #[arg(long, value_name = "ID")]
        category: Option<u32>,
        /// For statuses only, only list resolved statuses
        #[arg(long)]
        resolved: bool,
        /// For people only, list all user records
        #[arg(long)]
        all: bool,
        /// For people only, include active users
        #[arg(long)]
        include_active: bool,
        /// For people only, include normal users
        #[arg(long)]
        include_normal: bool,
        /// For people only, include deleted users
        #[arg(long)]
        include_deleted: bool,
        /// For people only, include community users
        #[arg(long)]
        include_community: bool,
        /// For people only, include virtual users
        #[arg(long)]
        include_virtual: bool,
    },
    /// Resolve all cases that match a given query, and are assigned to you
    Resolve {
        /// Query terms selecting the cases to resolve
        query: Vec<String>,
        /// In addition to resolving the case, close it out
        #[arg(long)]
        close: bool,
        /// The status with which to resolve the case; 45 is "Fixed"
        #[arg(long, value_name = "ID", default_value_t = fogbugz_core::DEFAULT_RESOLVE_STATUS)]
        status: u32,
    },
    /// Close all cases that match a given query, and are assigned to you
    Close {
        /// Query terms selecting the cases to close
        query: Vec<String>,
    },
    /// Reopen all closed cases that match a given query
    Reopen {
        /// Query terms selecting the cases to reopen
        query: Vec<String>,
    },
}

fn main() -> Result<()> {
    fogbugz_tracing::init();

    let cli = Cli::parse();
    let config = CliConfig::load(cli.config)?;
    let printer = output::Printer::new(&config);

    match cli.command {
        Commands::Search { query } => {
            info!(command = "search", terms = query.len());
            commands::search::run(&config, &printer, query)
        }
        Commands::List {
            kind,
            category,
            resolved,
            all,
            include_active,
            include_normal,
            include_deleted,
            include_community,
            include_virtual,
        } => {
            info!(command = "list", kind = kind.as_deref());
            commands::list::run(
                &config,
                &printer,
                kind,
                category,
                resolved,
                all,
                include_active,
                include_normal,
                include_deleted,
                include_community,
                include_virtual,
            )
        }
        Commands::Resolve {
            query,
            close,
            status,
        } => {
            info!(command = "resolve", terms = query.len(), close, status);
            commands::resolve::run(&config, &printer, query, close, status)
        }
        Commands::Close { query } => {
            info!(command = "close", terms = query.len());
            commands::close::run(&config, &printer, query)
        }
        Commands::Reopen { query } => {
            info!(command = "reopen", terms = query.len());
            commands::reopen::run(&config, &printer, query)
        }
    }
}
