//! Product-event synchronization to Neo4j.
//!
//! Each event becomes a (:ProductEvent) node. The producing species points
//! at the event (PRODUCES_EVENT), an optional partner species joins it
//! (PARTICIPATES_IN), and the event points at its site, product, disease and
//! migration/interaction context.

use anyhow::Result;
use neo4rs::Query;
use tracing::debug;

use super::SyncResult;
use crate::GraphClient;
use nasobiome_db::queries::product_events;
use nasobiome_db::DbPool;

/// Sync all product events to Neo4j.
pub async fn sync_product_events(client: &GraphClient, db: &DbPool) -> Result<SyncResult> {
    let all = db
        .with_conn(product_events::list_all)
        .map_err(|e| anyhow::anyhow!("Failed to list product events: {}", e))?;

    let mut result = SyncResult::default();

    for event in &all {
        let query = Query::new(
            "MERGE (e:ProductEvent {id: $id})
             SET e.mechanism = $mechanism, e.evidence = $evidence"
                .to_string(),
        )
        .param("id", event.id)
        .param("mechanism", event.mechanism.as_str())
        .param("evidence", event.evidence.as_str());

        client.execute(query).await?;
        result.nodes_synced += 1;

        let species_query = Query::new(
            "MATCH (e:ProductEvent {id: $id}), (s:Species {id: $species_id})
             MERGE (s)-[:PRODUCES_EVENT]->(e)"
                .to_string(),
        )
        .param("id", event.id)
        .param("species_id", event.species_id);

        client.execute(species_query).await?;
        result.relationships_synced += 1;

        if let Some(partner_id) = event.interacting_species_id {
            let partner_query = Query::new(
                "MATCH (e:ProductEvent {id: $id}), (s:Species {id: $partner_id})
                 MERGE (s)-[:PARTICIPATES_IN]->(e)"
                    .to_string(),
            )
            .param("id", event.id)
            .param("partner_id", partner_id);

            client.execute(partner_query).await?;
            result.relationships_synced += 1;
        }

        if let Some(site_id) = event.site_id {
            let site_query = Query::new(
                "MATCH (e:ProductEvent {id: $id}), (b:BodySite {id: $site_id})
                 MERGE (e)-[:AT_SITE]->(b)"
                    .to_string(),
            )
            .param("id", event.id)
            .param("site_id", site_id);

            client.execute(site_query).await?;
            result.relationships_synced += 1;
        }

        let product_query = Query::new(
            "MATCH (e:ProductEvent {id: $id}), (p:Product {id: $product_id})
             MERGE (e)-[:PRODUCT]->(p)"
                .to_string(),
        )
        .param("id", event.id)
        .param("product_id", event.product_id);

        client.execute(product_query).await?;
        result.relationships_synced += 1;

        if let Some(disease_id) = event.disease_id {
            let disease_query = Query::new(
                "MATCH (e:ProductEvent {id: $id}), (d:Disease {id: $disease_id})
                 MERGE (e)-[:CAUSES]->(d)"
                    .to_string(),
            )
            .param("id", event.id)
            .param("disease_id", disease_id);

            client.execute(disease_query).await?;
            result.relationships_synced += 1;
        }

        if let Some(migration_id) = event.migration_id {
            let migration_query = Query::new(
                "MATCH (e:ProductEvent {id: $id}), (m:Migration {id: $migration_id})
                 MERGE (e)-[:DURING_MIGRATION]->(m)"
                    .to_string(),
            )
            .param("id", event.id)
            .param("migration_id", migration_id);

            client.execute(migration_query).await?;
            result.relationships_synced += 1;
        }

        if let Some(interaction_id) = event.interaction_id {
            let interaction_query = Query::new(
                "MATCH (e:ProductEvent {id: $id}), (i:Interaction {id: $interaction_id})
                 MERGE (e)-[:DURING_INTERACTION]->(i)"
                    .to_string(),
            )
            .param("id", event.id)
            .param("interaction_id", interaction_id);

            client.execute(interaction_query).await?;
            result.relationships_synced += 1;
        }

        debug!(event_id = event.id, "Synced product event");
    }

    Ok(result)
}
