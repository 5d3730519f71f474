//! Get-or-create resolution over the relational store.
//!
//! Every resolver returns a tagged [`Resolved`] so callers can tell a fresh
//! row from a lookup hit. The fill-blank-only policy lives here as explicit
//! branches: existing non-empty fields are never overwritten, so re-imports
//! cannot clobber manually curated edits. The one exception is the species
//! phylum, which the sheet is authoritative for.

use rusqlite::Connection;

use nasobiome_db::queries::body_sites::{self, BodySiteRow};
use nasobiome_db::queries::diseases::{self, DiseaseRow};
use nasobiome_db::queries::products::{self, ProductRow};
use nasobiome_db::queries::species::{self, NewSpecies, SpeciesRow};
use nasobiome_db::DbResult;

/// Maximum stored length of a body-site name, in characters.
const MAX_SITE_NAME_CHARS: usize = 100;

/// Outcome of a get-or-create resolution.
#[derive(Debug, Clone)]
pub enum Resolved<T> {
    Created(T),
    Found(T),
}

impl<T> Resolved<T> {
    pub fn is_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }

    pub fn get(&self) -> &T {
        match self {
            Self::Created(inner) | Self::Found(inner) => inner,
        }
    }

    pub fn into_inner(self) -> T {
        match self {
            Self::Created(inner) | Self::Found(inner) => inner,
        }
    }
}

/// Resolve a body site by name, creating it when missing.
///
/// Names longer than the stored maximum are truncated to form the lookup
/// key; the full original text is preserved in the description when the row
/// is new or its description is still empty.
pub fn resolve_body_site(conn: &Connection, name: &str) -> DbResult<Option<Resolved<BodySiteRow>>> {
    let full_name = name.trim();
    if full_name.is_empty() {
        return Ok(None);
    }

    let truncated = full_name.chars().count() > MAX_SITE_NAME_CHARS;
    let short_name: String = full_name.chars().take(MAX_SITE_NAME_CHARS).collect();

    if let Some(mut site) = body_sites::get_by_name(conn, &short_name)? {
        if truncated && site.description.is_empty() {
            body_sites::update_description(conn, site.id, full_name)?;
            site.description = full_name.to_string();
        }
        return Ok(Some(Resolved::Found(site)));
    }

    let description = if truncated { full_name } else { "" };
    let site = body_sites::insert(conn, &short_name, description)?;
    Ok(Some(Resolved::Created(site)))
}

/// Resolve a disease by name, creating it when missing.
///
/// On a lookup hit only an empty description is back-filled; mechanism and
/// affected site are set at creation time only.
pub fn resolve_disease(
    conn: &Connection,
    name: &str,
    mechanism: &str,
    site_name: Option<&str>,
    description: &str,
) -> DbResult<Option<Resolved<DiseaseRow>>> {
    let name = name.trim();
    if name.is_empty() {
        return Ok(None);
    }

    if let Some(mut disease) = diseases::get_by_name(conn, name)? {
        if !description.is_empty() && disease.description.is_empty() {
            diseases::update_description(conn, disease.id, description)?;
            disease.description = description.to_string();
        }
        return Ok(Some(Resolved::Found(disease)));
    }

    let site_id = match site_name {
        Some(site_name) => resolve_body_site(conn, site_name)?.map(|r| r.into_inner().id),
        None => None,
    };
    let disease = diseases::insert(conn, name, description, mechanism.trim(), site_id)?;
    Ok(Some(Resolved::Created(disease)))
}

/// Resolve a product by name, creating it when missing. The mechanism is
/// only stored on creation.
pub fn resolve_product(
    conn: &Connection,
    name: &str,
    mechanism: &str,
) -> DbResult<Option<Resolved<ProductRow>>> {
    let name = name.trim();
    if name.is_empty() {
        return Ok(None);
    }

    if let Some(product) = products::get_by_name(conn, name)? {
        return Ok(Some(Resolved::Found(product)));
    }

    let product = products::insert(conn, name, mechanism.trim())?;
    Ok(Some(Resolved::Created(product)))
}

/// Resolve a species by name with the full sheet-derived profile.
///
/// On a lookup hit, description and genome link are back-filled only when
/// empty; the phylum is always overwritten with the freshly computed value.
pub fn resolve_species(
    conn: &Connection,
    name: &str,
    fields: &NewSpecies,
) -> DbResult<Resolved<SpeciesRow>> {
    if let Some(existing) = species::get_by_name(conn, name)? {
        let description = if existing.description.is_empty() && !fields.description.is_empty() {
            fields.description.clone()
        } else {
            existing.description.clone()
        };
        let genome_link = match (&existing.genome_reference_link, &fields.genome_reference_link) {
            (Some(link), _) if !link.is_empty() => Some(link.clone()),
            (_, Some(new_link)) => Some(new_link.clone()),
            (old, None) => old.clone(),
        };
        species::update_profile(conn, existing.id, &fields.phylum, &description, genome_link.as_deref())?;
        return Ok(Resolved::Found(SpeciesRow {
            phylum: fields.phylum.clone(),
            description,
            genome_reference_link: genome_link,
            ..existing
        }));
    }

    let created = species::insert(conn, name, fields)?;
    Ok(Resolved::Created(created))
}

/// Bare get-or-create for species discovered inside interaction sentences.
/// These are inferred entities: defaults apply on creation only, and an
/// existing row is never modified.
pub fn resolve_species_stub(
    conn: &Connection,
    name: &str,
    phylum: &str,
) -> DbResult<Resolved<SpeciesRow>> {
    if let Some(existing) = species::get_by_name(conn, name)? {
        return Ok(Resolved::Found(existing));
    }
    let created = species::insert(
        conn,
        name,
        &NewSpecies {
            phylum: phylum.to_string(),
            ..Default::default()
        },
    )?;
    Ok(Resolved::Created(created))
}

#[cfg(test)]
mod tests {
    use super::*;
    use nasobiome_db::{migrations, DbPool};

    fn test_pool() -> DbPool {
        let pool = DbPool::in_memory().unwrap();
        migrations::run_migrations(&pool).unwrap();
        pool
    }

    #[test]
    fn test_body_site_get_or_create_idempotent() {
        let pool = test_pool();
        pool.with_conn(|conn| {
            let first = resolve_body_site(conn, "Nose")?.unwrap();
            assert!(first.is_created());
            let second = resolve_body_site(conn, "Nose")?.unwrap();
            assert!(!second.is_created());
            assert_eq!(first.get().id, second.get().id);
            assert_eq!(body_sites::count(conn)?, 1);
            Ok(())
        })
        .unwrap();
    }

    #[test]
    fn test_body_site_empty_name_is_none() {
        let pool = test_pool();
        pool.with_conn(|conn| {
            assert!(resolve_body_site(conn, "   ")?.is_none());
            Ok(())
        })
        .unwrap();
    }

    #[test]
    fn test_body_site_truncation_side_channel() {
        let pool = test_pool();
        let long_name = "x".repeat(150);
        pool.with_conn(|conn| {
            let site = resolve_body_site(conn, &long_name)?.unwrap().into_inner();
            assert_eq!(site.name.chars().count(), 100);
            assert_eq!(site.description, long_name);

            let stored = body_sites::get_by_id(conn, site.id)?.unwrap();
            assert_eq!(stored.description, long_name);
            Ok(())
        })
        .unwrap();
    }

    #[test]
    fn test_disease_description_backfill_only_when_empty() {
        let pool = test_pool();
        pool.with_conn(|conn| {
            let created = resolve_disease(conn, "Sepsis", "toxin", Some("Nose"), "")?
                .unwrap()
                .into_inner();
            assert!(created.description.is_empty());

            // Empty description is back-filled...
            let found = resolve_disease(conn, "Sepsis", "", None, "bloodstream invasion")?
                .unwrap()
                .into_inner();
            assert_eq!(found.description, "bloodstream invasion");

            // ...but a non-empty one is never overwritten.
            let again = resolve_disease(conn, "Sepsis", "", None, "different text")?
                .unwrap()
                .into_inner();
            assert_eq!(again.description, "bloodstream invasion");

            let stored = diseases::get_by_id(conn, created.id)?.unwrap();
            assert_eq!(stored.description, "bloodstream invasion");
            Ok(())
        })
        .unwrap();
    }

    #[test]
    fn test_product_mechanism_set_on_create_only() {
        let pool = test_pool();
        pool.with_conn(|conn| {
            let created = resolve_product(conn, "Lugdunin", "antibiotic")?.unwrap().into_inner();
            assert_eq!(created.mechanism_of_action, "antibiotic");
            let found = resolve_product(conn, "Lugdunin", "something else")?.unwrap().into_inner();
            assert_eq!(found.mechanism_of_action, "antibiotic");
            Ok(())
        })
        .unwrap();
    }

    #[test]
    fn test_species_fill_blank_only_but_phylum_overwritten() {
        let pool = test_pool();
        pool.with_conn(|conn| {
            let fields = NewSpecies {
                phylum: "Firmicutes".to_string(),
                description: "original description".to_string(),
                genome_reference_link: Some("https://example.org/genome".to_string()),
                origin_site_id: None,
            };
            resolve_species(conn, "Staphylococcus aureus", &fields)?;

            let update = NewSpecies {
                phylum: "Bacillota".to_string(),
                description: "replacement description".to_string(),
                genome_reference_link: Some("https://example.org/other".to_string()),
                origin_site_id: None,
            };
            let resolved = resolve_species(conn, "Staphylococcus aureus", &update)?;
            assert!(!resolved.is_created());
            let row = resolved.into_inner();
            assert_eq!(row.description, "original description");
            assert_eq!(row.genome_reference_link.as_deref(), Some("https://example.org/genome"));
            assert_eq!(row.phylum, "Bacillota");
            Ok(())
        })
        .unwrap();
    }

    #[test]
    fn test_species_stub_never_modifies_existing() {
        let pool = test_pool();
        pool.with_conn(|conn| {
            let fields = NewSpecies {
                phylum: "Firmicutes".to_string(),
                ..Default::default()
            };
            resolve_species(conn, "Staphylococcus aureus", &fields)?;
            let stub = resolve_species_stub(conn, "Staphylococcus aureus", "Unknown")?;
            assert!(!stub.is_created());
            assert_eq!(stub.get().phylum, "Firmicutes");

            let stored = species::get_by_id(conn, stub.get().id)?.unwrap();
            assert_eq!(stored.phylum, "Firmicutes");
            Ok(())
        })
        .unwrap();
    }
}
