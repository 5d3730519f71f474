//! NasoBiome Import Pipeline
//!
//! Reads the semi-structured microbiome sheet, reconstructs its implicit
//! phylum grouping, extracts entities and relationships from free text, and
//! loads everything into the relational store under one transaction.

pub mod importer;
pub mod resolver;
pub mod sheet;

pub use importer::{import_sheet, ImportStats};
pub use resolver::Resolved;
pub use sheet::{is_phylum_header, prepare_rows, read_sheet, SheetRow, SpeciesGroup};
