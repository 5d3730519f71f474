//! CLI command definitions and handlers.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod graph;
pub mod import;
pub mod init;

/// NasoBiome - nasal microbiome knowledgebase
#[derive(Parser)]
#[command(name = "nasobiome")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the SQLite database file
    #[arg(long, global = true, env = "NASOBIOME_DB", default_value = "nasobiome.db")]
    pub db: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the database and apply schema migrations
    Init,

    /// Import a spreadsheet (CSV export) into the relational store
    Import {
        /// Path to the sheet CSV file
        file: PathBuf,
    },

    /// Graph mirror commands
    #[command(subcommand)]
    Graph(graph::GraphCommands),
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Init => init::execute(&self.db),
            Commands::Import { file } => import::execute(&self.db, &file),
            Commands::Graph(cmd) => graph::execute(cmd, &self.db).await,
        }
    }
}
