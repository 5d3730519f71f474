//! Migration-pattern queries.

use rusqlite::{params, Connection, OptionalExtension};

use crate::pool::DbResult;

/// Migration-pattern row from database.
#[derive(Debug, Clone)]
pub struct MigrationRow {
    pub id: i64,
    pub species_id: i64,
    pub from_site_id: Option<i64>,
    pub to_site_id: Option<i64>,
    pub mechanism: String,
    pub trigger_conditions: String,
    pub evidence: String,
    pub resulting_disease_id: Option<i64>,
}

fn row_to_migration(row: &rusqlite::Row<'_>) -> rusqlite::Result<MigrationRow> {
    Ok(MigrationRow {
        id: row.get(0)?,
        species_id: row.get(1)?,
        from_site_id: row.get(2)?,
        to_site_id: row.get(3)?,
        mechanism: row.get(4)?,
        trigger_conditions: row.get(5)?,
        evidence: row.get(6)?,
        resulting_disease_id: row.get(7)?,
    })
}

const COLUMNS: &str = "id, species_id, from_site_id, to_site_id, mechanism, trigger_conditions, \
                       evidence, resulting_disease_id";

/// Get a migration pattern by its natural key (species, from-site, to-site).
pub fn get_by_key(
    conn: &Connection,
    species_id: i64,
    from_site_id: i64,
    to_site_id: i64,
) -> DbResult<Option<MigrationRow>> {
    conn.query_row(
        &format!(
            "SELECT {COLUMNS} FROM migration_patterns
             WHERE species_id = ?1 AND from_site_id = ?2 AND to_site_id = ?3"
        ),
        params![species_id, from_site_id, to_site_id],
        row_to_migration,
    )
    .optional()
    .map_err(Into::into)
}

/// Insert a new migration pattern and return its id.
pub fn insert(
    conn: &Connection,
    species_id: i64,
    from_site_id: i64,
    to_site_id: i64,
    mechanism: &str,
    trigger_conditions: &str,
    evidence: &str,
    resulting_disease_id: Option<i64>,
) -> DbResult<i64> {
    conn.execute(
        "INSERT INTO migration_patterns
         (species_id, from_site_id, to_site_id, mechanism, trigger_conditions, evidence, resulting_disease_id)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            species_id,
            from_site_id,
            to_site_id,
            mechanism,
            trigger_conditions,
            evidence,
            resulting_disease_id
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// List all migration patterns ordered by id.
pub fn list_all(conn: &Connection) -> DbResult<Vec<MigrationRow>> {
    let mut stmt =
        conn.prepare(&format!("SELECT {COLUMNS} FROM migration_patterns ORDER BY id"))?;
    let rows = stmt.query_map([], row_to_migration)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Number of migration-pattern rows.
pub fn count(conn: &Connection) -> DbResult<i64> {
    conn.query_row("SELECT COUNT(*) FROM migration_patterns", [], |row| row.get(0))
        .map_err(Into::into)
}
