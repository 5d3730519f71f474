//! Product-event queries.

use rusqlite::{params, Connection, OptionalExtension};

use crate::pool::DbResult;

/// Product-event row from database.
#[derive(Debug, Clone)]
pub struct ProductEventRow {
    pub id: i64,
    pub species_id: i64,
    pub interacting_species_id: Option<i64>,
    pub site_id: Option<i64>,
    pub product_id: i64,
    pub disease_id: Option<i64>,
    pub migration_id: Option<i64>,
    pub interaction_id: Option<i64>,
    pub mechanism: String,
    pub evidence: String,
}

fn row_to_event(row: &rusqlite::Row<'_>) -> rusqlite::Result<ProductEventRow> {
    Ok(ProductEventRow {
        id: row.get(0)?,
        species_id: row.get(1)?,
        interacting_species_id: row.get(2)?,
        site_id: row.get(3)?,
        product_id: row.get(4)?,
        disease_id: row.get(5)?,
        migration_id: row.get(6)?,
        interaction_id: row.get(7)?,
        mechanism: row.get(8)?,
        evidence: row.get(9)?,
    })
}

const COLUMNS: &str = "id, species_id, interacting_species_id, site_id, product_id, disease_id, \
                       migration_id, interaction_id, mechanism, evidence";

/// Get a product event by its natural key (species, site, product).
pub fn get_by_key(
    conn: &Connection,
    species_id: i64,
    site_id: i64,
    product_id: i64,
) -> DbResult<Option<ProductEventRow>> {
    conn.query_row(
        &format!(
            "SELECT {COLUMNS} FROM product_events
             WHERE species_id = ?1 AND site_id = ?2 AND product_id = ?3"
        ),
        params![species_id, site_id, product_id],
        row_to_event,
    )
    .optional()
    .map_err(Into::into)
}

/// Insert a new product event and return its id. Migration and interaction
/// context is attached afterwards via [`set_migration`] and
/// [`set_interaction`].
pub fn insert(
    conn: &Connection,
    species_id: i64,
    site_id: i64,
    product_id: i64,
    mechanism: &str,
    evidence: &str,
) -> DbResult<i64> {
    conn.execute(
        "INSERT INTO product_events (species_id, site_id, product_id, mechanism, evidence)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![species_id, site_id, product_id, mechanism, evidence],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Link an event to the migration it occurred during.
pub fn set_migration(conn: &Connection, event_id: i64, migration_id: i64) -> DbResult<()> {
    conn.execute(
        "UPDATE product_events SET migration_id = ?1 WHERE id = ?2",
        params![migration_id, event_id],
    )?;
    Ok(())
}

/// Link an event to the interaction it occurred during.
pub fn set_interaction(conn: &Connection, event_id: i64, interaction_id: i64) -> DbResult<()> {
    conn.execute(
        "UPDATE product_events SET interaction_id = ?1 WHERE id = ?2",
        params![interaction_id, event_id],
    )?;
    Ok(())
}

/// List all product events ordered by id.
pub fn list_all(conn: &Connection) -> DbResult<Vec<ProductEventRow>> {
    let mut stmt = conn.prepare(&format!("SELECT {COLUMNS} FROM product_events ORDER BY id"))?;
    let rows = stmt.query_map([], row_to_event)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Number of product-event rows.
pub fn count(conn: &Connection) -> DbResult<i64> {
    conn.query_row("SELECT COUNT(*) FROM product_events", [], |row| row.get(0))
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::migrations::run_migrations;
    use crate::pool::DbPool;

    fn seeded_pool() -> DbPool {
        let pool = DbPool::in_memory().unwrap();
        run_migrations(&pool).unwrap();
        pool.with_conn(|conn| {
            conn.execute("INSERT INTO species (name) VALUES ('Staphylococcus lugdunensis')", [])?;
            conn.execute("INSERT INTO species (name) VALUES ('Staphylococcus aureus')", [])?;
            conn.execute("INSERT INTO body_sites (name) VALUES ('Nose')", [])?;
            conn.execute("INSERT INTO products (name) VALUES ('Lugdunin')", [])?;
            conn.execute(
                "INSERT INTO migration_patterns (species_id, from_site_id, to_site_id)
                 VALUES (1, 1, 1)",
                [],
            )?;
            conn.execute(
                "INSERT INTO species_interactions
                 (source_species_id, target_species_id, site_id, interaction_type)
                 VALUES (1, 2, 1, 'antagonistic')",
                [],
            )?;
            Ok(())
        })
        .unwrap();
        pool
    }

    #[test]
    fn test_event_context_links_set_after_insert() {
        let pool = seeded_pool();
        pool.with_conn(|conn| {
            let event_id = insert(conn, 1, 1, 1, "Produced at the origin site.", "")?;
            set_migration(conn, event_id, 1)?;
            set_interaction(conn, event_id, 1)?;

            let event = get_by_key(conn, 1, 1, 1)?.unwrap();
            assert_eq!(event.id, event_id);
            assert_eq!(event.migration_id, Some(1));
            assert_eq!(event.interaction_id, Some(1));
            Ok(())
        })
        .unwrap();
    }

    #[test]
    fn test_context_links_reject_missing_rows() {
        let pool = seeded_pool();
        pool.with_conn(|conn| {
            let event_id = insert(conn, 1, 1, 1, "", "")?;
            assert!(set_migration(conn, event_id, 99).is_err());
            assert!(set_interaction(conn, event_id, 99).is_err());
            Ok(())
        })
        .unwrap();
    }
}
