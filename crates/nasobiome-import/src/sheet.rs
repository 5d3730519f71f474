//! Sheet reading and row preparation.
//!
//! The source sheet has seven logical columns addressed by position (header
//! text drifts between revisions): species, functions, body-site
//! interaction, migration mechanism, extra notes, infections caused, urls.
//! Phylum names appear as header rows interleaved with the data: a row
//! whose species cell is the only non-empty cell.

use std::collections::HashMap;
use std::path::Path;

use csv::ReaderBuilder;

use nasobiome_core::extract::normalize;
use nasobiome_core::{BiomeError, BiomeResult};

/// One raw sheet row, cells normalized (trimmed, missing -> empty).
#[derive(Debug, Clone, Default)]
pub struct SheetRow {
    pub species: String,
    pub functions: String,
    pub body_interaction: String,
    pub migration_mechanism: String,
    pub extra_notes: String,
    pub infections: String,
    pub urls: String,
}

impl SheetRow {
    fn from_record(record: &csv::StringRecord) -> Self {
        let cell = |i: usize| normalize(record.get(i));
        Self {
            species: cell(0),
            functions: cell(1),
            body_interaction: cell(2),
            migration_mechanism: cell(3),
            extra_notes: cell(4),
            infections: cell(5),
            urls: cell(6),
        }
    }
}

/// All raw rows aggregated for one species, other columns newline-joined.
#[derive(Debug, Clone)]
pub struct SpeciesGroup {
    pub name: String,
    pub phylum: String,
    pub functions: String,
    pub body_interaction: String,
    pub migration_mechanism: String,
    pub extra_notes: String,
    pub infections: String,
    pub urls: String,
}

/// Read the sheet from a CSV file. Fails before any database work starts.
pub fn read_sheet(path: impl AsRef<Path>) -> BiomeResult<Vec<SheetRow>> {
    let path = path.as_ref();
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|e| BiomeError::sheet_read(format!("Failed to open {}: {e}", path.display())))?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| {
            BiomeError::malformed_record(format!("{} in {}", e, path.display()))
        })?;
        rows.push(SheetRow::from_record(&record));
    }
    Ok(rows)
}

/// A phylum header row: the species cell is populated and every other cell
/// is empty after normalization.
///
/// Must be evaluated on raw rows, before forward-filling — fill would make
/// headers indistinguishable from data rows.
pub fn is_phylum_header(row: &SheetRow) -> bool {
    !row.species.is_empty()
        && row.functions.is_empty()
        && row.body_interaction.is_empty()
        && row.migration_mechanism.is_empty()
        && row.extra_notes.is_empty()
        && row.infections.is_empty()
        && row.urls.is_empty()
}

/// Reconstruct the sheet's implicit structure: detect phylum headers,
/// forward-fill the species column, assign each species its current phylum,
/// drop header/speciesless rows, and group the remainder by species in
/// first-appearance order.
pub fn prepare_rows(rows: &[SheetRow]) -> Vec<SpeciesGroup> {
    // Headers are identified before any fill operation.
    let headers: Vec<bool> = rows.iter().map(is_phylum_header).collect();

    // Forward-fill the species column.
    let mut filled_species: Vec<String> = Vec::with_capacity(rows.len());
    let mut last_species = String::new();
    for row in rows {
        if !row.species.is_empty() {
            last_species = row.species.clone();
        }
        filled_species.push(last_species.clone());
    }

    // Assign phyla in original order; rows before the first header are "Unknown".
    let mut phylum_map: HashMap<String, String> = HashMap::new();
    let mut current_phylum = "Unknown".to_string();
    for (idx, row) in rows.iter().enumerate() {
        if headers[idx] {
            current_phylum = row.species.clone();
        } else if !filled_species[idx].is_empty() {
            phylum_map.insert(filled_species[idx].clone(), current_phylum.clone());
        }
    }

    // Group data rows by species, preserving first-appearance order.
    let mut order: Vec<String> = Vec::new();
    let mut grouped: HashMap<String, Vec<&SheetRow>> = HashMap::new();
    for (idx, row) in rows.iter().enumerate() {
        if headers[idx] || filled_species[idx].is_empty() {
            continue;
        }
        let name = &filled_species[idx];
        if !grouped.contains_key(name) {
            order.push(name.clone());
        }
        grouped.entry(name.clone()).or_default().push(row);
    }

    order
        .into_iter()
        .map(|name| {
            let members = &grouped[&name];
            let phylum = phylum_map
                .get(&name)
                .cloned()
                .unwrap_or_else(|| "Unknown".to_string());
            SpeciesGroup {
                phylum,
                functions: agg_non_empty(members, |r| &r.functions),
                body_interaction: agg_non_empty(members, |r| &r.body_interaction),
                migration_mechanism: agg_non_empty(members, |r| &r.migration_mechanism),
                extra_notes: agg_non_empty(members, |r| &r.extra_notes),
                infections: agg_non_empty(members, |r| &r.infections),
                urls: agg_non_empty(members, |r| &r.urls),
                name,
            }
        })
        .collect()
}

/// Concatenate every non-empty trimmed cell value with newline separation,
/// preserving every distinct free-text fragment.
fn agg_non_empty<'a>(rows: &[&'a SheetRow], cell: impl Fn(&'a SheetRow) -> &'a str) -> String {
    rows.iter()
        .map(|r| cell(r).trim())
        .filter(|v| !v.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn row(cells: [&str; 7]) -> SheetRow {
        SheetRow {
            species: cells[0].to_string(),
            functions: cells[1].to_string(),
            body_interaction: cells[2].to_string(),
            migration_mechanism: cells[3].to_string(),
            extra_notes: cells[4].to_string(),
            infections: cells[5].to_string(),
            urls: cells[6].to_string(),
        }
    }

    #[test]
    fn test_phylum_header_detected() {
        let header = row(["Firmicutes", "", "", "", "", "", ""]);
        assert!(is_phylum_header(&header));
    }

    #[test]
    fn test_data_row_with_one_extra_cell_is_not_header() {
        let data = row(["Staphylococcus aureus", "", "", "aspiration", "", "", ""]);
        assert!(!is_phylum_header(&data));
    }

    #[test]
    fn test_headers_excluded_and_phylum_assigned() {
        let rows = vec![
            row(["Firmicutes", "", "", "", "", "", ""]),
            row(["Staphylococcus aureus", "produces toxins", "", "", "", "", ""]),
            row(["Actinobacteria", "", "", "", "", "", ""]),
            row(["Corynebacterium accolens", "lipid metabolism", "", "", "", "", ""]),
        ];
        let groups = prepare_rows(&rows);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].name, "Staphylococcus aureus");
        assert_eq!(groups[0].phylum, "Firmicutes");
        assert_eq!(groups[1].name, "Corynebacterium accolens");
        assert_eq!(groups[1].phylum, "Actinobacteria");
    }

    #[test]
    fn test_rows_before_first_header_default_unknown() {
        let rows = vec![
            row(["Moraxella catarrhalis", "notes", "", "", "", "", ""]),
            row(["Proteobacteria", "", "", "", "", "", ""]),
        ];
        let groups = prepare_rows(&rows);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].phylum, "Unknown");
    }

    #[test]
    fn test_forward_fill_aggregates_multi_row_entries() {
        let rows = vec![
            row(["Firmicutes", "", "", "", "", "", ""]),
            row(["Staphylococcus aureus", "first fragment", "", "", "", "", ""]),
            row(["", "second fragment", "", "", "", "sepsis", ""]),
        ];
        let groups = prepare_rows(&rows);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].functions, "first fragment\nsecond fragment");
        assert_eq!(groups[0].infections, "sepsis");
    }

    #[test]
    fn test_group_order_is_first_appearance() {
        let rows = vec![
            row(["Zeta species", "a", "", "", "", "", ""]),
            row(["Alpha species", "b", "", "", "", "", ""]),
            row(["Zeta species", "c", "", "", "", "", ""]),
        ];
        let groups = prepare_rows(&rows);
        assert_eq!(groups[0].name, "Zeta species");
        assert_eq!(groups[1].name, "Alpha species");
        assert_eq!(groups[0].functions, "a\nc");
    }

    #[test]
    fn test_read_sheet_positional_columns() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Species,Functions,Body site interaction,Migration Mechanism,Notes,infections caused,urls").unwrap();
        writeln!(file, "Staphylococcus aureus,produces lugdunin,Nose – Lungs,aspiration,,sepsis,https://example.org").unwrap();
        file.flush().unwrap();

        let rows = read_sheet(file.path()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].species, "Staphylococcus aureus");
        assert_eq!(rows[0].body_interaction, "Nose – Lungs");
        assert_eq!(rows[0].urls, "https://example.org");
    }

    #[test]
    fn test_read_sheet_missing_file_fails() {
        let err = read_sheet("/nonexistent/sheet.csv").unwrap_err();
        assert!(matches!(err, BiomeError::SheetRead(_)));
        assert!(err.to_string().contains("Failed to open"));
    }

    #[test]
    fn test_read_sheet_invalid_utf8_is_malformed_record() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"Species,Functions\n\xff\xfe,bad\n").unwrap();
        file.flush().unwrap();

        let err = read_sheet(file.path()).unwrap_err();
        assert!(matches!(err, BiomeError::MalformedRecord(_)));
    }
}
