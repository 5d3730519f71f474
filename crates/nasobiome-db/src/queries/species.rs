//! Species queries, including the many-to-many association tables.

use rusqlite::{params, Connection, OptionalExtension};

use crate::pool::DbResult;

/// Species row from database.
#[derive(Debug, Clone)]
pub struct SpeciesRow {
    pub id: i64,
    pub name: String,
    pub phylum: String,
    pub genus: String,
    pub family: String,
    pub genome_reference_link: Option<String>,
    pub age_range: Option<String>,
    pub description: String,
    pub origin_site_id: Option<i64>,
}

/// Field values for creating a species.
#[derive(Debug, Clone, Default)]
pub struct NewSpecies {
    pub phylum: String,
    pub description: String,
    pub genome_reference_link: Option<String>,
    pub origin_site_id: Option<i64>,
}

fn row_to_species(row: &rusqlite::Row<'_>) -> rusqlite::Result<SpeciesRow> {
    Ok(SpeciesRow {
        id: row.get(0)?,
        name: row.get(1)?,
        phylum: row.get(2)?,
        genus: row.get(3)?,
        family: row.get(4)?,
        genome_reference_link: row.get(5)?,
        age_range: row.get(6)?,
        description: row.get(7)?,
        origin_site_id: row.get(8)?,
    })
}

const COLUMNS: &str = "id, name, phylum, genus, family, genome_reference_link, age_range, \
                       description, origin_site_id";

/// Get a species by exact name.
pub fn get_by_name(conn: &Connection, name: &str) -> DbResult<Option<SpeciesRow>> {
    conn.query_row(
        &format!("SELECT {COLUMNS} FROM species WHERE name = ?1"),
        params![name],
        row_to_species,
    )
    .optional()
    .map_err(Into::into)
}

/// Get a species by id.
pub fn get_by_id(conn: &Connection, id: i64) -> DbResult<Option<SpeciesRow>> {
    conn.query_row(
        &format!("SELECT {COLUMNS} FROM species WHERE id = ?1"),
        params![id],
        row_to_species,
    )
    .optional()
    .map_err(Into::into)
}

/// Insert a new species and return the stored row.
pub fn insert(conn: &Connection, name: &str, fields: &NewSpecies) -> DbResult<SpeciesRow> {
    conn.execute(
        "INSERT INTO species (name, phylum, description, genome_reference_link, origin_site_id)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            name,
            fields.phylum,
            fields.description,
            fields.genome_reference_link,
            fields.origin_site_id
        ],
    )?;
    Ok(SpeciesRow {
        id: conn.last_insert_rowid(),
        name: name.to_string(),
        phylum: fields.phylum.clone(),
        genus: String::new(),
        family: String::new(),
        genome_reference_link: fields.genome_reference_link.clone(),
        age_range: None,
        description: fields.description.clone(),
        origin_site_id: fields.origin_site_id,
    })
}

/// Overwrite phylum, description and genome link in one statement.
/// The resolver decides which of these carry old vs. new values.
pub fn update_profile(
    conn: &Connection,
    id: i64,
    phylum: &str,
    description: &str,
    genome_reference_link: Option<&str>,
) -> DbResult<()> {
    conn.execute(
        "UPDATE species SET phylum = ?1, description = ?2, genome_reference_link = ?3
         WHERE id = ?4",
        params![phylum, description, genome_reference_link, id],
    )?;
    Ok(())
}

/// Set the origin body site.
pub fn set_origin_site(conn: &Connection, species_id: i64, site_id: i64) -> DbResult<()> {
    conn.execute(
        "UPDATE species SET origin_site_id = ?1 WHERE id = ?2",
        params![site_id, species_id],
    )?;
    Ok(())
}

/// Add a body-site membership (no-op when already present).
pub fn add_body_site(conn: &Connection, species_id: i64, site_id: i64) -> DbResult<()> {
    conn.execute(
        "INSERT OR IGNORE INTO species_body_sites (species_id, body_site_id) VALUES (?1, ?2)",
        params![species_id, site_id],
    )?;
    Ok(())
}

/// Add a disease association (no-op when already present).
pub fn add_disease(conn: &Connection, species_id: i64, disease_id: i64) -> DbResult<()> {
    conn.execute(
        "INSERT OR IGNORE INTO species_diseases (species_id, disease_id) VALUES (?1, ?2)",
        params![species_id, disease_id],
    )?;
    Ok(())
}

/// Add a product association (no-op when already present).
pub fn add_product(conn: &Connection, species_id: i64, product_id: i64) -> DbResult<()> {
    conn.execute(
        "INSERT OR IGNORE INTO species_products (species_id, product_id) VALUES (?1, ?2)",
        params![species_id, product_id],
    )?;
    Ok(())
}

/// List all species ordered by id.
pub fn list_all(conn: &Connection) -> DbResult<Vec<SpeciesRow>> {
    let mut stmt = conn.prepare(&format!("SELECT {COLUMNS} FROM species ORDER BY id"))?;
    let rows = stmt.query_map([], row_to_species)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

fn list_links(conn: &Connection, sql: &str) -> DbResult<Vec<(i64, i64)>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// All (species_id, body_site_id) membership pairs.
pub fn list_body_site_links(conn: &Connection) -> DbResult<Vec<(i64, i64)>> {
    list_links(
        conn,
        "SELECT species_id, body_site_id FROM species_body_sites ORDER BY species_id",
    )
}

/// All (species_id, disease_id) association pairs.
pub fn list_disease_links(conn: &Connection) -> DbResult<Vec<(i64, i64)>> {
    list_links(
        conn,
        "SELECT species_id, disease_id FROM species_diseases ORDER BY species_id",
    )
}

/// All (species_id, product_id) association pairs.
pub fn list_product_links(conn: &Connection) -> DbResult<Vec<(i64, i64)>> {
    list_links(
        conn,
        "SELECT species_id, product_id FROM species_products ORDER BY species_id",
    )
}

/// Number of species rows.
pub fn count(conn: &Connection) -> DbResult<i64> {
    conn.query_row("SELECT COUNT(*) FROM species", [], |row| row.get(0))
        .map_err(Into::into)
}
