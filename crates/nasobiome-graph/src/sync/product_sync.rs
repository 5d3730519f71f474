//! Product synchronization to Neo4j.

use anyhow::Result;
use neo4rs::Query;
use tracing::debug;

use super::SyncResult;
use crate::GraphClient;
use nasobiome_db::queries::products;
use nasobiome_db::DbPool;

/// Sync all products to Neo4j as (:Product) nodes.
pub async fn sync_products(client: &GraphClient, db: &DbPool) -> Result<SyncResult> {
    let all = db
        .with_conn(products::list_all)
        .map_err(|e| anyhow::anyhow!("Failed to list products: {}", e))?;

    let mut result = SyncResult::default();

    for product in &all {
        let query = Query::new(
            "MERGE (p:Product {id: $id})
             SET p.name = $name,
                 p.description = $description,
                 p.mechanism_of_action = $mechanism"
                .to_string(),
        )
        .param("id", product.id)
        .param("name", product.name.as_str())
        .param("description", product.description.as_str())
        .param("mechanism", product.mechanism_of_action.as_str());

        client.execute(query).await?;
        result.nodes_synced += 1;

        debug!(product_id = product.id, name = %product.name, "Synced product");
    }

    Ok(result)
}
