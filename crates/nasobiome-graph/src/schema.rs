//! Neo4j schema initialization (uniqueness constraints).

use anyhow::Result;
use neo4rs::Query;
use tracing::info;

use crate::GraphClient;

/// Cypher statements for schema initialization. One uniqueness constraint
/// per synced label, keyed on the relational id.
const SCHEMA_STATEMENTS: &[&str] = &[
    "CREATE CONSTRAINT body_site_id IF NOT EXISTS FOR (b:BodySite) REQUIRE b.id IS UNIQUE",
    "CREATE CONSTRAINT disease_id IF NOT EXISTS FOR (d:Disease) REQUIRE d.id IS UNIQUE",
    "CREATE CONSTRAINT product_id IF NOT EXISTS FOR (p:Product) REQUIRE p.id IS UNIQUE",
    "CREATE CONSTRAINT species_id IF NOT EXISTS FOR (s:Species) REQUIRE s.id IS UNIQUE",
    "CREATE CONSTRAINT interaction_id IF NOT EXISTS FOR (i:Interaction) REQUIRE i.id IS UNIQUE",
    "CREATE CONSTRAINT migration_id IF NOT EXISTS FOR (m:Migration) REQUIRE m.id IS UNIQUE",
    "CREATE CONSTRAINT product_event_id IF NOT EXISTS FOR (e:ProductEvent) REQUIRE e.id IS UNIQUE",
];

/// Initialize Neo4j schema with constraints.
///
/// Safe to run multiple times - uses IF NOT EXISTS clauses.
pub async fn initialize_schema(client: &GraphClient) -> Result<()> {
    info!("Initializing Neo4j schema...");

    for statement in SCHEMA_STATEMENTS {
        client.execute(Query::new(statement.to_string())).await?;
    }

    info!("Neo4j schema initialized ({} statements)", SCHEMA_STATEMENTS.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_constraint_per_synced_label() {
        let labels = [
            "BodySite",
            "Disease",
            "Product",
            "Species",
            "Interaction",
            "Migration",
            "ProductEvent",
        ];
        assert_eq!(SCHEMA_STATEMENTS.len(), labels.len());
        for label in labels {
            assert!(
                SCHEMA_STATEMENTS.iter().any(|s| s.contains(&format!(":{label})"))),
                "missing constraint for {label}"
            );
        }
    }
}
