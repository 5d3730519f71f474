//! Species synchronization to Neo4j.
//!
//! Syncs species as (:Species) nodes with RESIDES_IN (origin site),
//! PRESENT_IN (body-site memberships), ASSOCIATED_WITH (diseases) and
//! PRODUCES (products) edges.

use anyhow::Result;
use neo4rs::Query;
use tracing::debug;

use super::SyncResult;
use crate::GraphClient;
use nasobiome_db::queries::species;
use nasobiome_db::DbPool;

/// Sync all species and their association edges to Neo4j.
pub async fn sync_species(client: &GraphClient, db: &DbPool) -> Result<SyncResult> {
    let (all, site_links, disease_links, product_links) = db
        .with_conn(|conn| {
            Ok((
                species::list_all(conn)?,
                species::list_body_site_links(conn)?,
                species::list_disease_links(conn)?,
                species::list_product_links(conn)?,
            ))
        })
        .map_err(|e| anyhow::anyhow!("Failed to list species: {}", e))?;

    let mut result = SyncResult::default();

    for sp in &all {
        let query = Query::new(
            "MERGE (s:Species {id: $id})
             SET s.name = $name, s.phylum = $phylum, s.genus = $genus,
                 s.family = $family, s.genome_reference_link = $link,
                 s.age_range = $age, s.description = $description"
                .to_string(),
        )
        .param("id", sp.id)
        .param("name", sp.name.as_str())
        .param("phylum", sp.phylum.as_str())
        .param("genus", sp.genus.as_str())
        .param("family", sp.family.as_str())
        .param("link", sp.genome_reference_link.as_deref().unwrap_or(""))
        .param("age", sp.age_range.as_deref().unwrap_or(""))
        .param("description", sp.description.as_str());

        client.execute(query).await?;
        result.nodes_synced += 1;

        if let Some(origin_id) = sp.origin_site_id {
            let rel_query = Query::new(
                "MATCH (s:Species {id: $species_id}), (b:BodySite {id: $site_id})
                 MERGE (s)-[:RESIDES_IN]->(b)"
                    .to_string(),
            )
            .param("species_id", sp.id)
            .param("site_id", origin_id);

            client.execute(rel_query).await?;
            result.relationships_synced += 1;
        }

        debug!(species_id = sp.id, name = %sp.name, "Synced species");
    }

    for (species_id, site_id) in &site_links {
        let query = Query::new(
            "MATCH (s:Species {id: $species_id}), (b:BodySite {id: $site_id})
             MERGE (s)-[:PRESENT_IN]->(b)"
                .to_string(),
        )
        .param("species_id", *species_id)
        .param("site_id", *site_id);

        client.execute(query).await?;
        result.relationships_synced += 1;
    }

    for (species_id, disease_id) in &disease_links {
        let query = Query::new(
            "MATCH (s:Species {id: $species_id}), (d:Disease {id: $disease_id})
             MERGE (s)-[:ASSOCIATED_WITH]->(d)"
                .to_string(),
        )
        .param("species_id", *species_id)
        .param("disease_id", *disease_id);

        client.execute(query).await?;
        result.relationships_synced += 1;
    }

    for (species_id, product_id) in &product_links {
        let query = Query::new(
            "MATCH (s:Species {id: $species_id}), (p:Product {id: $product_id})
             MERGE (s)-[:PRODUCES]->(p)"
                .to_string(),
        )
        .param("species_id", *species_id)
        .param("product_id", *product_id);

        client.execute(query).await?;
        result.relationships_synced += 1;
    }

    Ok(result)
}
