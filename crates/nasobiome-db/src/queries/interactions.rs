//! Species-interaction queries.

use rusqlite::{params, Connection, OptionalExtension};

use crate::pool::DbResult;

/// Species-interaction row from database.
#[derive(Debug, Clone)]
pub struct InteractionRow {
    pub id: i64,
    pub source_species_id: i64,
    pub target_species_id: i64,
    pub site_id: Option<i64>,
    pub interaction_type: String,
    pub mechanism: String,
    pub evidence: String,
    pub disease_id: Option<i64>,
}

fn row_to_interaction(row: &rusqlite::Row<'_>) -> rusqlite::Result<InteractionRow> {
    Ok(InteractionRow {
        id: row.get(0)?,
        source_species_id: row.get(1)?,
        target_species_id: row.get(2)?,
        site_id: row.get(3)?,
        interaction_type: row.get(4)?,
        mechanism: row.get(5)?,
        evidence: row.get(6)?,
        disease_id: row.get(7)?,
    })
}

const COLUMNS: &str = "id, source_species_id, target_species_id, site_id, interaction_type, \
                       mechanism, evidence, disease_id";

/// Get an interaction by its natural key (source, target, site).
pub fn get_by_key(
    conn: &Connection,
    source_species_id: i64,
    target_species_id: i64,
    site_id: i64,
) -> DbResult<Option<InteractionRow>> {
    conn.query_row(
        &format!(
            "SELECT {COLUMNS} FROM species_interactions
             WHERE source_species_id = ?1 AND target_species_id = ?2 AND site_id = ?3"
        ),
        params![source_species_id, target_species_id, site_id],
        row_to_interaction,
    )
    .optional()
    .map_err(Into::into)
}

/// Insert a new interaction and return its id.
#[allow(clippy::too_many_arguments)]
pub fn insert(
    conn: &Connection,
    source_species_id: i64,
    target_species_id: i64,
    site_id: i64,
    interaction_type: &str,
    mechanism: &str,
    evidence: &str,
    disease_id: Option<i64>,
) -> DbResult<i64> {
    conn.execute(
        "INSERT INTO species_interactions
         (source_species_id, target_species_id, site_id, interaction_type, mechanism, evidence, disease_id)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            source_species_id,
            target_species_id,
            site_id,
            interaction_type,
            mechanism,
            evidence,
            disease_id
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// List all interactions ordered by id.
pub fn list_all(conn: &Connection) -> DbResult<Vec<InteractionRow>> {
    let mut stmt =
        conn.prepare(&format!("SELECT {COLUMNS} FROM species_interactions ORDER BY id"))?;
    let rows = stmt.query_map([], row_to_interaction)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Number of interaction rows.
pub fn count(conn: &Connection) -> DbResult<i64> {
    conn.query_row("SELECT COUNT(*) FROM species_interactions", [], |row| row.get(0))
        .map_err(Into::into)
}
