//! Heuristic text extraction over spreadsheet cell text.
//!
//! All functions here are pure and deterministic for identical input.
//! They are best-effort extractors: false positives and negatives are
//! expected and tolerated downstream.

pub mod vocab;

mod diseases;
mod interactions;
mod products;
mod species;
mod text;

pub use diseases::{extract_diseases, DiseaseHit};
pub use interactions::{extract_interactions, InteractionHit, InteractionType};
pub use products::extract_known_products;
pub use species::extract_species_candidates;
pub use text::{extract_url, normalize};
