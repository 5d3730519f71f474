//! Database query implementations.
//!
//! Functions take a `&rusqlite::Connection` rather than the pool so the
//! same code runs both standalone and inside the importer's transaction
//! (`Transaction` derefs to `Connection`).

pub mod body_sites;
pub mod diseases;
pub mod interactions;
pub mod migration_patterns;
pub mod product_events;
pub mod products;
pub mod species;
