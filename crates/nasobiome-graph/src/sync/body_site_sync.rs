//! Body-site synchronization to Neo4j.
//!
//! Syncs body sites as (:BodySite) nodes. Sites carry no outgoing edges of
//! their own; everything else points at them.

use anyhow::Result;
use neo4rs::Query;
use tracing::debug;

use super::SyncResult;
use crate::GraphClient;
use nasobiome_db::queries::body_sites;
use nasobiome_db::DbPool;

/// Sync all body sites to Neo4j.
pub async fn sync_body_sites(client: &GraphClient, db: &DbPool) -> Result<SyncResult> {
    let sites = db
        .with_conn(body_sites::list_all)
        .map_err(|e| anyhow::anyhow!("Failed to list body sites: {}", e))?;

    let mut result = SyncResult::default();

    for site in &sites {
        let query = Query::new(
            "MERGE (b:BodySite {id: $id})
             SET b.name = $name, b.description = $description"
                .to_string(),
        )
        .param("id", site.id)
        .param("name", site.name.as_str())
        .param("description", site.description.as_str());

        client.execute(query).await?;
        result.nodes_synced += 1;

        debug!(site_id = site.id, name = %site.name, "Synced body site");
    }

    Ok(result)
}
