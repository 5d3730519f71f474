//! Transactional sheet import.
//!
//! One pass over the prepared species groups, inside a single SQLite
//! transaction: any failure rolls back every write from the run. Every
//! get-or-create goes through the resolver, so re-running the importer on
//! an unchanged sheet creates no new rows.

use rusqlite::Connection;
use tracing::{debug, info};

use nasobiome_core::extract::{
    extract_diseases, extract_interactions, extract_known_products, extract_url,
};
use nasobiome_db::queries::species::NewSpecies;
use nasobiome_db::queries::{interactions, migration_patterns, product_events, species};
use nasobiome_db::{DbError, DbPool, DbResult};

use crate::resolver::{
    resolve_body_site, resolve_disease, resolve_product, resolve_species, resolve_species_stub,
};
use crate::sheet::{prepare_rows, SheetRow, SpeciesGroup};

/// Every species in this dataset is nasal-microbiome-derived; "Nose" is
/// forced as origin site and body-site membership for each one.
const ORIGIN_SITE: &str = "Nose";

/// Words marking a body-site line as describing co-location rather than
/// migration.
const PRESENCE_WORDS: &[&str] = &["detected", "presence", "found"];

/// Counters reported after an import run.
#[derive(Debug, Clone, Default)]
pub struct ImportStats {
    pub species_processed: usize,
    pub species_created: usize,
    pub body_sites_created: usize,
    pub diseases_created: usize,
    pub products_created: usize,
    pub migrations_created: usize,
    pub interactions_created: usize,
    pub product_events_created: usize,
}

/// Import a whole sheet under one atomic transaction.
pub fn import_sheet(pool: &DbPool, rows: &[SheetRow]) -> DbResult<ImportStats> {
    let groups = prepare_rows(rows);
    info!(rows = rows.len(), species = groups.len(), "Starting sheet import");

    let stats = pool.with_conn_mut(|conn| {
        let tx = conn.transaction()?;
        let mut stats = ImportStats::default();
        for group in &groups {
            import_group(&tx, group, &mut stats)?;
        }
        tx.commit()?;
        Ok(stats)
    })?;

    info!(
        species = stats.species_processed,
        created = stats.species_created,
        diseases = stats.diseases_created,
        interactions = stats.interactions_created,
        "Sheet import committed"
    );
    Ok(stats)
}

fn import_group(conn: &Connection, group: &SpeciesGroup, stats: &mut ImportStats) -> DbResult<()> {
    stats.species_processed += 1;
    debug!(species = %group.name, phylum = %group.phylum, "Importing species group");

    // Functions and extra notes form one blob, the primary extraction input.
    let full_functions = join_non_empty(&[&group.functions, &group.extra_notes]);

    // Disease lines also carry URLs; the explicit urls column wins the
    // first-URL race for the genome reference candidate.
    let (disease_hits, extracted_urls) = extract_diseases(&group.infections);
    let all_urls = join_non_empty(&[&group.urls, &extracted_urls]);
    let genome_url = extract_url(&all_urls);

    let nose = resolve_site(conn, ORIGIN_SITE, stats)?
        .ok_or_else(|| DbError::OperationFailed("origin site could not be resolved".to_string()))?;

    let resolved = resolve_species(
        conn,
        &group.name,
        &NewSpecies {
            phylum: group.phylum.clone(),
            description: full_functions.clone(),
            genome_reference_link: genome_url.clone(),
            origin_site_id: Some(nose),
        },
    )?;
    if resolved.is_created() {
        stats.species_created += 1;
    }
    let species_id = resolved.get().id;

    species::set_origin_site(conn, species_id, nose)?;
    species::add_body_site(conn, species_id, nose)?;

    import_migrations(conn, group, species_id, stats)?;

    for hit in &disease_hits {
        if let Some(disease) = resolve_disease(
            conn,
            &hit.name,
            &group.migration_mechanism,
            Some(ORIGIN_SITE),
            &hit.source_line,
        )? {
            if disease.is_created() {
                stats.diseases_created += 1;
            }
            species::add_disease(conn, species_id, disease.get().id)?;
        }
    }

    import_products(conn, group, species_id, nose, genome_url.as_deref(), stats)?;
    import_interactions(conn, &full_functions, &group.name, species_id, nose, genome_url.as_deref(), stats)?;

    Ok(())
}

/// Parse en-dash separated site pairs from the body-site interaction column
/// and record a migration pattern for each, adding both sites to the
/// species' body-site set. Presence-only lines describe co-location, not
/// migration, and are skipped.
fn import_migrations(
    conn: &Connection,
    group: &SpeciesGroup,
    species_id: i64,
    stats: &mut ImportStats,
) -> DbResult<()> {
    for line in group.body_interaction.lines() {
        let line = line.trim();
        if !line.contains('–') || PRESENCE_WORDS.iter().any(|w| line.contains(w)) {
            continue;
        }
        let sites: Vec<&str> = line.split('–').map(str::trim).filter(|s| !s.is_empty()).collect();
        if sites.len() != 2 {
            continue;
        }

        let from_site = resolve_site(conn, sites[0], stats)?;
        let to_site = resolve_site(conn, sites[1], stats)?;
        let (Some(from_site), Some(to_site)) = (from_site, to_site) else {
            continue;
        };

        if migration_patterns::get_by_key(conn, species_id, from_site, to_site)?.is_none() {
            migration_patterns::insert(
                conn,
                species_id,
                from_site,
                to_site,
                &group.migration_mechanism,
                "",
                "",
                None,
            )?;
            stats.migrations_created += 1;
        }
        species::add_body_site(conn, species_id, from_site)?;
        species::add_body_site(conn, species_id, to_site)?;
    }
    Ok(())
}

/// Attach known products found in the functions blob, recording a product
/// event at the origin site for each.
fn import_products(
    conn: &Connection,
    group: &SpeciesGroup,
    species_id: i64,
    site_id: i64,
    genome_url: Option<&str>,
    stats: &mut ImportStats,
) -> DbResult<()> {
    let full_functions = join_non_empty(&[&group.functions, &group.extra_notes]);
    for product_name in extract_known_products(&full_functions) {
        let Some(product) = resolve_product(conn, &product_name, "")? else {
            continue;
        };
        if product.is_created() {
            stats.products_created += 1;
        }
        let product_id = product.get().id;
        species::add_product(conn, species_id, product_id)?;

        if product_events::get_by_key(conn, species_id, site_id, product_id)?.is_none() {
            product_events::insert(
                conn,
                species_id,
                site_id,
                product_id,
                &format!("Produced by {} as noted in Functions.", group.name),
                genome_url.unwrap_or(""),
            )?;
            stats.product_events_created += 1;
        }
    }
    Ok(())
}

/// Record classified interactions extracted from the functions blob,
/// get-or-creating target species as inferred "Unknown"-phylum entities.
fn import_interactions(
    conn: &Connection,
    full_functions: &str,
    subject_name: &str,
    species_id: i64,
    site_id: i64,
    genome_url: Option<&str>,
    stats: &mut ImportStats,
) -> DbResult<()> {
    for hit in extract_interactions(full_functions, subject_name) {
        let target = resolve_species_stub(conn, &hit.target, "Unknown")?;
        if target.is_created() {
            stats.species_created += 1;
        }
        let target_id = target.get().id;

        // An abbreviation can canonicalize back to the subject itself;
        // self-interactions violate the pair invariant.
        if target_id == species_id {
            debug!(species = %subject_name, "Skipping self-interaction");
            continue;
        }

        if interactions::get_by_key(conn, species_id, target_id, site_id)?.is_none() {
            interactions::insert(
                conn,
                species_id,
                target_id,
                site_id,
                hit.interaction_type.as_str(),
                &hit.sentence,
                genome_url.unwrap_or(""),
                None,
            )?;
            stats.interactions_created += 1;
        }
    }
    Ok(())
}

fn resolve_site(conn: &Connection, name: &str, stats: &mut ImportStats) -> DbResult<Option<i64>> {
    Ok(resolve_body_site(conn, name)?.map(|resolved| {
        if resolved.is_created() {
            stats.body_sites_created += 1;
        }
        resolved.get().id
    }))
}

fn join_non_empty(parts: &[&str]) -> String {
    parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::SheetRow;
    use nasobiome_db::queries::{body_sites, diseases, products, species as species_q};
    use nasobiome_db::{migrations, DbPool};

    fn test_pool() -> DbPool {
        let pool = DbPool::in_memory().unwrap();
        migrations::run_migrations(&pool).unwrap();
        pool
    }

    fn sample_rows() -> Vec<SheetRow> {
        vec![
            SheetRow {
                species: "Firmicutes".to_string(),
                ..Default::default()
            },
            SheetRow {
                species: "Staphylococcus lugdunensis".to_string(),
                functions: "Produces lugdunin. Inhibits S. aureus growth significantly".to_string(),
                body_interaction: "Nose – Bloodstream".to_string(),
                migration_mechanism: "hematogenous spread".to_string(),
                extra_notes: String::new(),
                infections: "Can cause acute sinusitis and endocarditis\nhttps://www.ncbi.nlm.nih.gov/genome/2734".to_string(),
                urls: String::new(),
            },
        ]
    }

    fn table_counts(pool: &DbPool) -> (i64, i64, i64, i64, i64, i64, i64) {
        pool.with_conn(|conn| {
            Ok((
                species_q::count(conn)?,
                body_sites::count(conn)?,
                diseases::count(conn)?,
                products::count(conn)?,
                migration_patterns::count(conn)?,
                interactions::count(conn)?,
                product_events::count(conn)?,
            ))
        })
        .unwrap()
    }

    #[test]
    fn test_import_creates_expected_entities() {
        let pool = test_pool();
        let stats = import_sheet(&pool, &sample_rows()).unwrap();

        // Sheet species plus the inferred interaction target.
        assert_eq!(stats.species_created, 2);
        assert_eq!(stats.migrations_created, 1);
        assert_eq!(stats.products_created, 1);
        assert_eq!(stats.interactions_created, 1);
        assert_eq!(stats.product_events_created, 1);
        assert!(stats.diseases_created >= 1);

        pool.with_conn(|conn| {
            let subject = species_q::get_by_name(conn, "Staphylococcus lugdunensis")?.unwrap();
            assert_eq!(subject.phylum, "Firmicutes");
            assert_eq!(
                subject.genome_reference_link.as_deref(),
                Some("https://www.ncbi.nlm.nih.gov/genome/2734")
            );

            let target = species_q::get_by_name(conn, "Staphylococcus aureus")?.unwrap();
            assert_eq!(target.phylum, "Unknown");

            let nose = body_sites::get_by_name(conn, "Nose")?.unwrap();
            assert_eq!(subject.origin_site_id, Some(nose.id));

            let links = species_q::list_body_site_links(conn)?;
            // Nose membership is forced, plus both migration endpoints.
            assert!(links.contains(&(subject.id, nose.id)));
            assert_eq!(
                links.iter().filter(|(sid, _)| *sid == subject.id).count(),
                2 // Nose + Bloodstream (Nose doubles as the migration origin)
            );

            let all_interactions = interactions::list_all(conn)?;
            assert_eq!(all_interactions.len(), 1);
            assert_eq!(all_interactions[0].interaction_type, "antagonistic");
            assert_eq!(all_interactions[0].source_species_id, subject.id);
            assert_eq!(all_interactions[0].target_species_id, target.id);
            Ok(())
        })
        .unwrap();
    }

    #[test]
    fn test_import_idempotent() {
        let pool = test_pool();
        import_sheet(&pool, &sample_rows()).unwrap();
        let first = table_counts(&pool);

        let stats = import_sheet(&pool, &sample_rows()).unwrap();
        let second = table_counts(&pool);

        assert_eq!(first, second);
        assert_eq!(stats.species_created, 0);
        assert_eq!(stats.migrations_created, 0);
        assert_eq!(stats.interactions_created, 0);
        assert_eq!(stats.product_events_created, 0);
    }

    #[test]
    fn test_reimport_preserves_description_overwrites_phylum() {
        let pool = test_pool();
        import_sheet(&pool, &sample_rows()).unwrap();

        // Simulate a manual curation edit.
        pool.with_conn(|conn| {
            conn.execute(
                "UPDATE species SET description = 'curated text' WHERE name = 'Staphylococcus lugdunensis'",
                [],
            )?;
            Ok(())
        })
        .unwrap();

        // Re-import with a changed phylum header.
        let mut rows = sample_rows();
        rows[0].species = "Bacillota".to_string();
        import_sheet(&pool, &rows).unwrap();

        pool.with_conn(|conn| {
            let subject = species_q::get_by_name(conn, "Staphylococcus lugdunensis")?.unwrap();
            assert_eq!(subject.description, "curated text");
            assert_eq!(subject.phylum, "Bacillota");
            Ok(())
        })
        .unwrap();
    }

    #[test]
    fn test_presence_lines_do_not_create_migrations() {
        let pool = test_pool();
        let rows = vec![SheetRow {
            species: "Moraxella catarrhalis".to_string(),
            body_interaction: "Nose – Lungs presence detected".to_string(),
            ..Default::default()
        }];
        let stats = import_sheet(&pool, &rows).unwrap();
        assert_eq!(stats.migrations_created, 0);
    }

    #[test]
    fn test_disease_extraction_attached_to_species() {
        let pool = test_pool();
        import_sheet(&pool, &sample_rows()).unwrap();
        pool.with_conn(|conn| {
            let all = diseases::list_all(conn)?;
            assert!(all.iter().any(|d| d.name.to_lowercase().contains("sinusitis")));
            let subject = species_q::get_by_name(conn, "Staphylococcus lugdunensis")?.unwrap();
            let links = species_q::list_disease_links(conn)?;
            assert!(links.iter().any(|(sid, _)| *sid == subject.id));
            Ok(())
        })
        .unwrap();
    }
}
