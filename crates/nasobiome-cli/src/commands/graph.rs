//! Graph mirror CLI commands.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;

use nasobiome_db::{queries::diseases, DbPool};
use nasobiome_graph::queries::{explore, pathway};
use nasobiome_graph::{schema, GraphClient};

#[derive(Subcommand)]
pub enum GraphCommands {
    /// Sync the relational store to Neo4j
    Sync,

    /// Show node and relationship counts
    Status,

    /// Fetch the full pathway subgraph for a disease
    Pathway {
        /// Disease name, or its numeric id
        disease: String,
    },

    /// Fetch the one-hop neighborhood of a node ("Label:id")
    Neighbors {
        /// Composite node id, e.g. "Species:3"
        node_id: String,
    },

    /// Fetch a bounded sample of disease/species/site nodes
    Sample {
        /// Maximum number of nodes
        #[arg(long, default_value = "15")]
        limit: i64,
    },
}

pub async fn execute(cmd: GraphCommands, db_path: &Path) -> Result<()> {
    let client = GraphClient::connect_from_env()
        .await
        .context("Failed to connect to Neo4j")?;

    match cmd {
        GraphCommands::Sync => cmd_sync(&client, db_path).await,
        GraphCommands::Status => cmd_status(&client).await,
        GraphCommands::Pathway { disease } => cmd_pathway(&client, db_path, &disease).await,
        GraphCommands::Neighbors { node_id } => cmd_neighbors(&client, &node_id).await,
        GraphCommands::Sample { limit } => cmd_sample(&client, limit).await,
    }
}

/// Run full sync from SQLite to Neo4j.
async fn cmd_sync(client: &GraphClient, db_path: &Path) -> Result<()> {
    println!("{}", "Syncing to Neo4j...".bold());

    let pool = open_db(db_path)?;

    schema::initialize_schema(client).await?;
    let result = nasobiome_graph::run_full_sync(client, &pool).await?;

    println!("\n{}", "Sync complete:".green().bold());
    println!("  Nodes synced:         {}", result.nodes_synced);
    println!("  Relationships synced: {}", result.relationships_synced);

    Ok(())
}

/// Show graph node/relationship counts.
async fn cmd_status(client: &GraphClient) -> Result<()> {
    let counts = client.get_counts().await?;

    println!("{}", "Graph status:".bold());
    println!("  Nodes:         {}", counts.nodes.to_string().cyan());
    println!("  Relationships: {}", counts.relationships.to_string().cyan());

    Ok(())
}

/// Fetch and print a disease pathway as JSON.
async fn cmd_pathway(client: &GraphClient, db_path: &Path, disease: &str) -> Result<()> {
    let disease_id = resolve_disease_id(db_path, disease)?;

    let view = pathway::fetch_disease_pathway(client, disease_id).await?;
    if view.nodes.is_empty() {
        eprintln!("{}", "No pathway found for that disease.".dimmed());
    } else {
        eprintln!(
            "{} {} nodes, {} links",
            "✓".green().bold(),
            view.nodes.len(),
            view.links.len()
        );
    }

    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}

/// Fetch and print a one-hop neighborhood as JSON.
async fn cmd_neighbors(client: &GraphClient, node_id: &str) -> Result<()> {
    let view = explore::fetch_neighbors(client, node_id).await?;
    if view.nodes.is_empty() {
        eprintln!("{}", "No node with that id.".dimmed());
    }
    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}

/// Fetch and print a bounded node sample as JSON.
async fn cmd_sample(client: &GraphClient, limit: i64) -> Result<()> {
    let nodes = explore::fetch_initial_graph(client, limit).await?;
    println!("{}", serde_json::to_string_pretty(&nodes)?);
    Ok(())
}

/// Resolve a disease argument to its relational id: numeric input is looked
/// up as an id, anything else by exact name. Either way the disease must
/// exist in the relational store.
fn resolve_disease_id(db_path: &Path, disease: &str) -> Result<i64> {
    let pool = open_db(db_path)?;

    if let Ok(id) = disease.parse::<i64>() {
        let row = pool
            .with_conn(|conn| diseases::get_by_id(conn, id))
            .map_err(|e| anyhow::anyhow!("Disease lookup failed: {}", e))?;
        return row
            .map(|d| d.id)
            .ok_or_else(|| anyhow::anyhow!("No disease with id {}", id));
    }

    let row = pool
        .with_conn(|conn| diseases::get_by_name(conn, disease))
        .map_err(|e| anyhow::anyhow!("Disease lookup failed: {}", e))?;

    row.map(|d| d.id)
        .ok_or_else(|| anyhow::anyhow!("No disease named '{}'", disease))
}

fn open_db(db_path: &Path) -> Result<DbPool> {
    DbPool::open(db_path)
        .with_context(|| format!("Failed to open database {}", db_path.display()))
}
