//! Product queries.

use rusqlite::{params, Connection, OptionalExtension};

use crate::pool::DbResult;

/// Product row from database.
#[derive(Debug, Clone)]
pub struct ProductRow {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub mechanism_of_action: String,
}

fn row_to_product(row: &rusqlite::Row<'_>) -> rusqlite::Result<ProductRow> {
    Ok(ProductRow {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        mechanism_of_action: row.get(3)?,
    })
}

/// Get a product by exact name.
pub fn get_by_name(conn: &Connection, name: &str) -> DbResult<Option<ProductRow>> {
    conn.query_row(
        "SELECT id, name, description, mechanism_of_action FROM products WHERE name = ?1",
        params![name],
        row_to_product,
    )
    .optional()
    .map_err(Into::into)
}

/// Insert a new product and return the stored row.
pub fn insert(conn: &Connection, name: &str, mechanism: &str) -> DbResult<ProductRow> {
    conn.execute(
        "INSERT INTO products (name, mechanism_of_action) VALUES (?1, ?2)",
        params![name, mechanism],
    )?;
    Ok(ProductRow {
        id: conn.last_insert_rowid(),
        name: name.to_string(),
        description: String::new(),
        mechanism_of_action: mechanism.to_string(),
    })
}

/// List all products ordered by id.
pub fn list_all(conn: &Connection) -> DbResult<Vec<ProductRow>> {
    let mut stmt = conn
        .prepare("SELECT id, name, description, mechanism_of_action FROM products ORDER BY id")?;
    let rows = stmt.query_map([], row_to_product)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Number of product rows.
pub fn count(conn: &Connection) -> DbResult<i64> {
    conn.query_row("SELECT COUNT(*) FROM products", [], |row| row.get(0))
        .map_err(Into::into)
}
