//! Disease synchronization to Neo4j.
//!
//! Syncs diseases as (:Disease) nodes with AFFECTS edges to their affected
//! body site.

use anyhow::Result;
use neo4rs::Query;
use tracing::debug;

use super::SyncResult;
use crate::GraphClient;
use nasobiome_db::queries::diseases;
use nasobiome_db::DbPool;

/// Sync all diseases to Neo4j.
pub async fn sync_diseases(client: &GraphClient, db: &DbPool) -> Result<SyncResult> {
    let all = db
        .with_conn(diseases::list_all)
        .map_err(|e| anyhow::anyhow!("Failed to list diseases: {}", e))?;

    let mut result = SyncResult::default();

    for disease in &all {
        let query = Query::new(
            "MERGE (d:Disease {id: $id})
             SET d.name = $name,
                 d.description = $description,
                 d.mechanism_of_causation = $mechanism"
                .to_string(),
        )
        .param("id", disease.id)
        .param("name", disease.name.as_str())
        .param("description", disease.description.as_str())
        .param("mechanism", disease.mechanism_of_causation.as_str());

        client.execute(query).await?;
        result.nodes_synced += 1;

        if let Some(site_id) = disease.affected_site_id {
            let rel_query = Query::new(
                "MATCH (d:Disease {id: $disease_id}), (b:BodySite {id: $site_id})
                 MERGE (d)-[:AFFECTS]->(b)"
                    .to_string(),
            )
            .param("disease_id", disease.id)
            .param("site_id", site_id);

            client.execute(rel_query).await?;
            result.relationships_synced += 1;
        }

        debug!(disease_id = disease.id, name = %disease.name, "Synced disease");
    }

    Ok(result)
}
