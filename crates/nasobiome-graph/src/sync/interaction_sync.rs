//! Species-interaction synchronization to Neo4j.
//!
//! Each interaction becomes a reified (:Interaction) node with INVOLVES
//! edges to both species, an OCCURS_AT edge to its site, and a CAUSES edge
//! to its associated disease, plus a direct INTERACTS_WITH edge between the
//! two species tagged with the interaction id.

use anyhow::Result;
use neo4rs::Query;
use tracing::debug;

use super::SyncResult;
use crate::GraphClient;
use nasobiome_db::queries::interactions;
use nasobiome_db::DbPool;

/// Sync all species interactions to Neo4j.
pub async fn sync_interactions(client: &GraphClient, db: &DbPool) -> Result<SyncResult> {
    let all = db
        .with_conn(interactions::list_all)
        .map_err(|e| anyhow::anyhow!("Failed to list interactions: {}", e))?;

    let mut result = SyncResult::default();

    for interaction in &all {
        let query = Query::new(
            "MERGE (i:Interaction {id: $id})
             SET i.type = $type, i.mechanism = $mechanism, i.evidence = $evidence"
                .to_string(),
        )
        .param("id", interaction.id)
        .param("type", interaction.interaction_type.as_str())
        .param("mechanism", interaction.mechanism.as_str())
        .param("evidence", interaction.evidence.as_str());

        client.execute(query).await?;
        result.nodes_synced += 1;

        let species_query = Query::new(
            "MATCH (i:Interaction {id: $id}),
                   (s1:Species {id: $source_id}),
                   (s2:Species {id: $target_id})
             MERGE (s1)-[:INTERACTS_WITH {interaction_id: $id}]->(s2)
             MERGE (i)-[:INVOLVES]->(s1)
             MERGE (i)-[:INVOLVES]->(s2)"
                .to_string(),
        )
        .param("id", interaction.id)
        .param("source_id", interaction.source_species_id)
        .param("target_id", interaction.target_species_id);

        client.execute(species_query).await?;
        result.relationships_synced += 3;

        if let Some(site_id) = interaction.site_id {
            let site_query = Query::new(
                "MATCH (i:Interaction {id: $id}), (b:BodySite {id: $site_id})
                 MERGE (i)-[:OCCURS_AT]->(b)"
                    .to_string(),
            )
            .param("id", interaction.id)
            .param("site_id", site_id);

            client.execute(site_query).await?;
            result.relationships_synced += 1;
        }

        if let Some(disease_id) = interaction.disease_id {
            let disease_query = Query::new(
                "MATCH (i:Interaction {id: $id}), (d:Disease {id: $disease_id})
                 MERGE (i)-[:CAUSES]->(d)"
                    .to_string(),
            )
            .param("id", interaction.id)
            .param("disease_id", disease_id);

            client.execute(disease_query).await?;
            result.relationships_synced += 1;
        }

        debug!(interaction_id = interaction.id, "Synced interaction");
    }

    Ok(result)
}
