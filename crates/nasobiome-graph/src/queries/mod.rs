//! Read-only graph queries over the synced Neo4j mirror.

pub mod explore;
pub mod pathway;
pub mod serialize;
