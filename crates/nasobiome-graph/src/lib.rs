//! NasoBiome Graph Layer
//!
//! Neo4j mirror of the relational knowledgebase: connection client, schema
//! constraints, full sync pipeline, and pathway/exploration queries.

pub mod client;
pub mod queries;
pub mod schema;
pub mod sync;

pub use client::{GraphClient, GraphConfig, GraphCounts};
pub use queries::serialize::{GraphLink, GraphNode, GraphView};
pub use sync::{run_full_sync, SyncResult};
