//! Database migrations.

use rusqlite_migration::{Migrations, M};
use tracing::debug;

use crate::pool::{DbError, DbPool, DbResult};

/// SQL schema definition.
const SCHEMA: &str = include_str!("schema.sql");

/// Run all database migrations.
pub fn run_migrations(pool: &DbPool) -> DbResult<()> {
    let migrations = Migrations::new(vec![M::up(SCHEMA)]);

    pool.with_conn_mut(|conn| {
        migrations
            .to_latest(conn)
            .map_err(|e| DbError::Migration(e.to_string()))
    })?;
    debug!("Database schema up to date");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations() {
        let pool = DbPool::in_memory().unwrap();
        run_migrations(&pool).unwrap();

        // Verify tables exist
        pool.with_conn(|conn| {
            let count: i64 = conn.query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='species'",
                [],
                |row| row.get(0),
            )?;
            assert_eq!(count, 1);
            Ok(())
        })
        .unwrap();
    }

    #[test]
    fn test_interaction_requires_distinct_species() {
        let pool = DbPool::in_memory().unwrap();
        run_migrations(&pool).unwrap();

        pool.with_conn(|conn| {
            conn.execute("INSERT INTO species (name) VALUES ('Staphylococcus aureus')", [])?;
            conn.execute("INSERT INTO body_sites (name) VALUES ('Nose')", [])?;
            let result = conn.execute(
                "INSERT INTO species_interactions
                 (source_species_id, target_species_id, site_id, interaction_type)
                 VALUES (1, 1, 1, 'antagonistic')",
                [],
            );
            assert!(result.is_err());
            Ok(())
        })
        .unwrap();
    }
}
