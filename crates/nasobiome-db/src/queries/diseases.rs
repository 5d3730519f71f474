//! Disease queries.

use rusqlite::{params, Connection, OptionalExtension};

use crate::pool::DbResult;

/// Disease row from database.
#[derive(Debug, Clone)]
pub struct DiseaseRow {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub mechanism_of_causation: String,
    pub affected_site_id: Option<i64>,
}

fn row_to_disease(row: &rusqlite::Row<'_>) -> rusqlite::Result<DiseaseRow> {
    Ok(DiseaseRow {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        mechanism_of_causation: row.get(3)?,
        affected_site_id: row.get(4)?,
    })
}

const COLUMNS: &str = "id, name, description, mechanism_of_causation, affected_site_id";

/// Get a disease by exact name.
pub fn get_by_name(conn: &Connection, name: &str) -> DbResult<Option<DiseaseRow>> {
    conn.query_row(
        &format!("SELECT {COLUMNS} FROM diseases WHERE name = ?1"),
        params![name],
        row_to_disease,
    )
    .optional()
    .map_err(Into::into)
}

/// Get a disease by id.
pub fn get_by_id(conn: &Connection, id: i64) -> DbResult<Option<DiseaseRow>> {
    conn.query_row(
        &format!("SELECT {COLUMNS} FROM diseases WHERE id = ?1"),
        params![id],
        row_to_disease,
    )
    .optional()
    .map_err(Into::into)
}

/// Insert a new disease and return the stored row.
pub fn insert(
    conn: &Connection,
    name: &str,
    description: &str,
    mechanism: &str,
    affected_site_id: Option<i64>,
) -> DbResult<DiseaseRow> {
    conn.execute(
        "INSERT INTO diseases (name, description, mechanism_of_causation, affected_site_id)
         VALUES (?1, ?2, ?3, ?4)",
        params![name, description, mechanism, affected_site_id],
    )?;
    Ok(DiseaseRow {
        id: conn.last_insert_rowid(),
        name: name.to_string(),
        description: description.to_string(),
        mechanism_of_causation: mechanism.to_string(),
        affected_site_id,
    })
}

/// Overwrite a disease's description.
pub fn update_description(conn: &Connection, id: i64, description: &str) -> DbResult<()> {
    conn.execute(
        "UPDATE diseases SET description = ?1 WHERE id = ?2",
        params![description, id],
    )?;
    Ok(())
}

/// List all diseases ordered by id.
pub fn list_all(conn: &Connection) -> DbResult<Vec<DiseaseRow>> {
    let mut stmt = conn.prepare(&format!("SELECT {COLUMNS} FROM diseases ORDER BY id"))?;
    let rows = stmt.query_map([], row_to_disease)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Number of disease rows.
pub fn count(conn: &Connection) -> DbResult<i64> {
    conn.query_row("SELECT COUNT(*) FROM diseases", [], |row| row.get(0))
        .map_err(Into::into)
}
