//! Sheet import command.

use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;

use nasobiome_db::{migrations, DbPool};
use nasobiome_import::{import_sheet, read_sheet};

pub fn execute(db_path: &Path, file: &Path) -> Result<()> {
    println!(
        "{} Importing {} into {}",
        "→".blue().bold(),
        file.display().to_string().cyan(),
        db_path.display()
    );

    // Read the whole sheet up front: a malformed file aborts before any
    // database work starts.
    let rows = read_sheet(file)?;

    let pool = DbPool::open(db_path)
        .with_context(|| format!("Failed to open database {}", db_path.display()))?;
    migrations::run_migrations(&pool).context("Failed to apply schema migrations")?;

    let stats = import_sheet(&pool, &rows).context("Import failed, no changes were written")?;

    println!("\n{}", "Import complete:".green().bold());
    println!("  Species processed:  {}", stats.species_processed);
    println!("  Species created:    {}", stats.species_created);
    println!("  Body sites created: {}", stats.body_sites_created);
    println!("  Diseases created:   {}", stats.diseases_created);
    println!("  Products created:   {}", stats.products_created);
    println!("  Migrations created: {}", stats.migrations_created);
    println!("  Interactions:       {}", stats.interactions_created);
    println!("  Product events:     {}", stats.product_events_created);

    Ok(())
}
