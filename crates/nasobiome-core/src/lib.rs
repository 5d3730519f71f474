//! NasoBiome Core Library
//!
//! Error types and the heuristic text-extraction utilities that turn
//! loosely-formatted biological prose into structured signals.

pub mod error;
pub mod extract;

pub use error::{BiomeError, BiomeResult};
pub use extract::InteractionType;
