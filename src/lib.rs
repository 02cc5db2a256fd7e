//! Musicdb Library
//!
//! An in-memory music catalog of artists, songs and albums with secondary
//! indices kept consistent under every mutation.

pub mod catalog;
pub mod config;
pub mod seed;

// Re-export commonly used types for convenience
pub use catalog::{Catalog, CatalogError};
pub use config::{CascadePolicy, CatalogConfig};
