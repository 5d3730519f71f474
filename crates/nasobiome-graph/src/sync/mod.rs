//! SQLite to Neo4j synchronization pipeline.
//!
//! Reads entities from SQLite and upserts them into Neo4j as nodes and
//! relationships. Every statement is a MERGE keyed on the relational id, so
//! re-running a sync after a partial failure converges on the same graph.

pub mod body_site_sync;
pub mod disease_sync;
pub mod interaction_sync;
pub mod migration_sync;
pub mod product_event_sync;
pub mod product_sync;
pub mod species_sync;

use anyhow::{Context, Result};
use tracing::info;

use crate::GraphClient;
use nasobiome_db::DbPool;

/// Result of a sync operation.
#[derive(Debug, Clone, Default)]
pub struct SyncResult {
    pub nodes_synced: usize,
    pub relationships_synced: usize,
}

impl SyncResult {
    fn merge(&mut self, other: &SyncResult) {
        self.nodes_synced += other.nodes_synced;
        self.relationships_synced += other.relationships_synced;
    }
}

/// Run a full sync from SQLite to Neo4j.
///
/// Entity types are pushed in dependency order so that every relationship
/// MERGE finds both endpoints already present: sites and diseases before
/// species, all node types before the event-like types that reference them.
pub async fn run_full_sync(client: &GraphClient, db: &DbPool) -> Result<SyncResult> {
    info!("Starting full graph sync");

    let mut total = SyncResult::default();

    let result = body_site_sync::sync_body_sites(client, db)
        .await
        .context("Failed to sync body sites")?;
    info!(nodes = result.nodes_synced, "Body sites synced");
    total.merge(&result);

    let result = disease_sync::sync_diseases(client, db)
        .await
        .context("Failed to sync diseases")?;
    info!(nodes = result.nodes_synced, rels = result.relationships_synced, "Diseases synced");
    total.merge(&result);

    let result = product_sync::sync_products(client, db)
        .await
        .context("Failed to sync products")?;
    info!(nodes = result.nodes_synced, "Products synced");
    total.merge(&result);

    let result = species_sync::sync_species(client, db)
        .await
        .context("Failed to sync species")?;
    info!(nodes = result.nodes_synced, rels = result.relationships_synced, "Species synced");
    total.merge(&result);

    let result = interaction_sync::sync_interactions(client, db)
        .await
        .context("Failed to sync interactions")?;
    info!(nodes = result.nodes_synced, rels = result.relationships_synced, "Interactions synced");
    total.merge(&result);

    let result = migration_sync::sync_migrations(client, db)
        .await
        .context("Failed to sync migration patterns")?;
    info!(nodes = result.nodes_synced, rels = result.relationships_synced, "Migrations synced");
    total.merge(&result);

    let result = product_event_sync::sync_product_events(client, db)
        .await
        .context("Failed to sync product events")?;
    info!(nodes = result.nodes_synced, rels = result.relationships_synced, "Product events synced");
    total.merge(&result);

    info!(
        nodes = total.nodes_synced,
        relationships = total.relationships_synced,
        "Full sync complete"
    );

    Ok(total)
}
