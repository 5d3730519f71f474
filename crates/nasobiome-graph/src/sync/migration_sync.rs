//! Migration-pattern synchronization to Neo4j.
//!
//! Each migration becomes a (:Migration) node with INVOLVES_SPECIES,
//! STARTS_FROM, MIGRATES_TO and optional CAUSES edges.

use anyhow::Result;
use neo4rs::Query;
use tracing::debug;

use super::SyncResult;
use crate::GraphClient;
use nasobiome_db::queries::migration_patterns;
use nasobiome_db::DbPool;

/// Sync all migration patterns to Neo4j.
pub async fn sync_migrations(client: &GraphClient, db: &DbPool) -> Result<SyncResult> {
    let all = db
        .with_conn(migration_patterns::list_all)
        .map_err(|e| anyhow::anyhow!("Failed to list migration patterns: {}", e))?;

    let mut result = SyncResult::default();

    for migration in &all {
        let query = Query::new(
            "MERGE (m:Migration {id: $id})
             SET m.mechanism = $mechanism,
                 m.trigger_conditions = $trigger,
                 m.evidence = $evidence"
                .to_string(),
        )
        .param("id", migration.id)
        .param("mechanism", migration.mechanism.as_str())
        .param("trigger", migration.trigger_conditions.as_str())
        .param("evidence", migration.evidence.as_str());

        client.execute(query).await?;
        result.nodes_synced += 1;

        let species_query = Query::new(
            "MATCH (m:Migration {id: $id}), (s:Species {id: $species_id})
             MERGE (m)-[:INVOLVES_SPECIES]->(s)"
                .to_string(),
        )
        .param("id", migration.id)
        .param("species_id", migration.species_id);

        client.execute(species_query).await?;
        result.relationships_synced += 1;

        if let Some(from_id) = migration.from_site_id {
            let from_query = Query::new(
                "MATCH (m:Migration {id: $id}), (b:BodySite {id: $site_id})
                 MERGE (m)-[:STARTS_FROM]->(b)"
                    .to_string(),
            )
            .param("id", migration.id)
            .param("site_id", from_id);

            client.execute(from_query).await?;
            result.relationships_synced += 1;
        }

        if let Some(to_id) = migration.to_site_id {
            let to_query = Query::new(
                "MATCH (m:Migration {id: $id}), (b:BodySite {id: $site_id})
                 MERGE (m)-[:MIGRATES_TO]->(b)"
                    .to_string(),
            )
            .param("id", migration.id)
            .param("site_id", to_id);

            client.execute(to_query).await?;
            result.relationships_synced += 1;
        }

        if let Some(disease_id) = migration.resulting_disease_id {
            let disease_query = Query::new(
                "MATCH (m:Migration {id: $id}), (d:Disease {id: $disease_id})
                 MERGE (m)-[:CAUSES]->(d)"
                    .to_string(),
            )
            .param("id", migration.id)
            .param("disease_id", disease_id);

            client.execute(disease_query).await?;
            result.relationships_synced += 1;
        }

        debug!(migration_id = migration.id, "Synced migration pattern");
    }

    Ok(result)
}
