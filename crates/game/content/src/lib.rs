//! Data-driven content definitions and loaders.
//!
//! This crate provides loaders for RON/TOML data files:
//! - Item catalogs (data-driven via RON)
//! - Balance and session configuration (data-driven via TOML)
//!
//! Content is consumed by runtime oracles and never appears in a snapshot.
//!
//! All loaders use landscape-core types directly with serde for RON/TOML
//! deserialization.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{CatalogFile, CatalogLoader, ConfigLoader, ContentFactory, LoadResult};
