//! Body-site queries.

use rusqlite::{params, Connection, OptionalExtension};

use crate::pool::DbResult;

/// Body-site row from database.
#[derive(Debug, Clone)]
pub struct BodySiteRow {
    pub id: i64,
    pub name: String,
    pub description: String,
}

fn row_to_site(row: &rusqlite::Row<'_>) -> rusqlite::Result<BodySiteRow> {
    Ok(BodySiteRow {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
    })
}

/// Get a body site by exact name.
pub fn get_by_name(conn: &Connection, name: &str) -> DbResult<Option<BodySiteRow>> {
    conn.query_row(
        "SELECT id, name, description FROM body_sites WHERE name = ?1",
        params![name],
        row_to_site,
    )
    .optional()
    .map_err(Into::into)
}

/// Get a body site by id.
pub fn get_by_id(conn: &Connection, id: i64) -> DbResult<Option<BodySiteRow>> {
    conn.query_row(
        "SELECT id, name, description FROM body_sites WHERE id = ?1",
        params![id],
        row_to_site,
    )
    .optional()
    .map_err(Into::into)
}

/// Insert a new body site and return the stored row.
pub fn insert(conn: &Connection, name: &str, description: &str) -> DbResult<BodySiteRow> {
    conn.execute(
        "INSERT INTO body_sites (name, description) VALUES (?1, ?2)",
        params![name, description],
    )?;
    Ok(BodySiteRow {
        id: conn.last_insert_rowid(),
        name: name.to_string(),
        description: description.to_string(),
    })
}

/// Overwrite a body site's description.
pub fn update_description(conn: &Connection, id: i64, description: &str) -> DbResult<()> {
    conn.execute(
        "UPDATE body_sites SET description = ?1 WHERE id = ?2",
        params![description, id],
    )?;
    Ok(())
}

/// List all body sites ordered by id.
pub fn list_all(conn: &Connection) -> DbResult<Vec<BodySiteRow>> {
    let mut stmt = conn.prepare("SELECT id, name, description FROM body_sites ORDER BY id")?;
    let rows = stmt.query_map([], row_to_site)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Number of body-site rows.
pub fn count(conn: &Connection) -> DbResult<i64> {
    conn.query_row("SELECT COUNT(*) FROM body_sites", [], |row| row.get(0))
        .map_err(Into::into)
}
