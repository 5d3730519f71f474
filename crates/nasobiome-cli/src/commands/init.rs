//! Database initialization command.

use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;

use nasobiome_db::{migrations, DbPool};

pub fn execute(db_path: &Path) -> Result<()> {
    println!(
        "{} Initializing database: {}",
        "→".blue().bold(),
        db_path.display()
    );

    let pool = DbPool::open(db_path)
        .with_context(|| format!("Failed to open database {}", db_path.display()))?;
    migrations::run_migrations(&pool).context("Failed to apply schema migrations")?;

    println!("{} Database ready: {}", "✓".green().bold(), db_path.display());
    println!();
    println!("{}", "Next steps:".bold());
    println!("  nasobiome import <sheet.csv>   # Load the microbiome sheet");
    println!("  nasobiome graph sync           # Mirror into Neo4j");

    Ok(())
}
