//! Coordinate reference systems and reprojection
//!
//! Reference systems are resolved by PROJ. Nothing here is process-wide:
//! catalogs and registries are plain values owned by the caller.

pub mod catalog;
pub mod crs;
pub mod registry;
pub mod transformer;

pub use self::catalog::{CatalogEntry, CrsCatalog};
pub use self::crs::ReferenceSystem;
pub use self::registry::{CrsDefinition, CrsRegistry, RegistryStats};
pub use self::transformer::{reproject, Transformer};
