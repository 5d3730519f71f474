//! NasoBiome Database Layer
//!
//! SQLite persistence for the relational knowledgebase: connection pool,
//! schema migrations, and per-entity query modules.

pub mod migrations;
pub mod pool;
pub mod queries;

pub use pool::{DbError, DbPool, DbResult};
