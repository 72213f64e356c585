//! Named coordinate systems offered to users

use crate::error::{Error, Result};
use crate::projection::crs::ReferenceSystem;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// One selectable coordinate system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Human readable name, e.g. "ETRS89 / UTM zone 32N"
    pub name: String,
    /// Identifier passed to PROJ
    pub code: ReferenceSystem,
}

/// A list of named coordinate systems
///
/// The catalog is configuration data. Nothing in it is checked against PROJ
/// until a system is actually used. It serializes as a plain JSON array and
/// deserializing goes through [`CrsCatalog::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<CatalogEntry>", into = "Vec<CatalogEntry>")]
pub struct CrsCatalog {
    entries: Vec<CatalogEntry>,
}

impl CrsCatalog {
    /// Creates a catalog, rejecting duplicate names
    pub fn new(entries: Vec<CatalogEntry>) -> Result<Self> {
        let mut seen = HashSet::new();
        for entry in &entries {
            if entry.name.trim().is_empty() {
                return Err(Error::InvalidInput("catalog entry with empty name".to_string()));
            }
            if !seen.insert(entry.name.as_str()) {
                return Err(Error::InvalidInput(format!(
                    "duplicate catalog entry '{}'",
                    entry.name
                )));
            }
        }

        Ok(Self { entries })
    }

    /// Parses a catalog from a JSON array of `{ "name", "code" }` objects
    pub fn from_json_str(json: &str) -> Result<Self> {
        let entries: Vec<CatalogEntry> = serde_json::from_str(json)?;
        Self::new(entries)
    }

    /// Loads a catalog from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Returns all entries in catalog order
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Finds an entry by its display name
    pub fn lookup(&self, name: &str) -> Option<&CatalogEntry> {
        let name = name.trim();
        self.entries.iter().find(|entry| entry.name == name)
    }

    /// Resolves a catalog name or a raw `AUTHORITY:CODE` identifier
    pub fn resolve(&self, name_or_code: &str) -> Result<ReferenceSystem> {
        match self.lookup(name_or_code) {
            Some(entry) => Ok(entry.code.clone()),
            None => ReferenceSystem::parse(name_or_code),
        }
    }

    /// Returns the display name for a system, if the catalog has one
    pub fn name_of(&self, system: &ReferenceSystem) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| &entry.code == system)
            .map(|entry| entry.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TryFrom<Vec<CatalogEntry>> for CrsCatalog {
    type Error = Error;

    fn try_from(entries: Vec<CatalogEntry>) -> Result<Self> {
        Self::new(entries)
    }
}

impl From<CrsCatalog> for Vec<CatalogEntry> {
    fn from(catalog: CrsCatalog) -> Self {
        catalog.entries
    }
}

impl Default for CrsCatalog {
    fn default() -> Self {
        let entries = [
            ("ETRS89 / UTM zone 32N", 25832),
            ("WGS 84 / UTM zone 32N", 32632),
            ("ETRS89 / UTM zone 33N", 25833),
            ("WGS 84 / UTM zone 33N", 32633),
            ("WGS 84", 4326),
        ]
        .into_iter()
        .map(|(name, code)| CatalogEntry {
            name: name.to_string(),
            code: ReferenceSystem::epsg(code),
        })
        .collect();

        Self { entries }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_catalog() {
        let catalog = CrsCatalog::default();
        assert_eq!(catalog.len(), 5);

        let entry = catalog.lookup("ETRS89 / UTM zone 32N").unwrap();
        assert_eq!(entry.code, ReferenceSystem::epsg(25832));
        assert_eq!(catalog.name_of(&ReferenceSystem::epsg(32633)), Some("WGS 84 / UTM zone 33N"));
    }

    #[test]
    fn test_resolve_name_or_code() {
        let catalog = CrsCatalog::default();

        assert_eq!(catalog.resolve("WGS 84 / UTM zone 32N").unwrap(), ReferenceSystem::epsg(32632));
        assert_eq!(catalog.resolve("epsg:3857").unwrap(), ReferenceSystem::epsg(3857));
        assert!(matches!(
            catalog.resolve("Unknown zone").unwrap_err(),
            Error::InvalidReferenceSystem(_)
        ));
    }

    #[test]
    fn test_from_json() {
        let json = r#"[
            {"name": "ITRF2014 UTM Zone 30N", "code": "epsg:7927"},
            {"name": "ETRS89 / UTM zone 31N", "code": "EPSG:25831"}
        ]"#;

        let catalog = CrsCatalog::from_json_str(json).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.entries()[0].code, ReferenceSystem::epsg(7927));
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let json = r#"[
            {"name": "A", "code": "EPSG:25832"},
            {"name": "A", "code": "EPSG:25833"}
        ]"#;

        assert!(matches!(CrsCatalog::from_json_str(json).unwrap_err(), Error::InvalidInput(_)));
    }

    #[test]
    fn test_deserialize_validates_entries() {
        let duplicate = r#"[
            {"name": "A", "code": "EPSG:25832"},
            {"name": "A", "code": "EPSG:25833"}
        ]"#;
        assert!(serde_json::from_str::<CrsCatalog>(duplicate).is_err());
        assert!(serde_json::from_str::<CrsCatalog>(r#"[{"name": " ", "code": "EPSG:4326"}]"#).is_err());

        let json = serde_json::to_string(&CrsCatalog::default()).unwrap();
        assert!(json.starts_with('['));
        assert_eq!(serde_json::from_str::<CrsCatalog>(&json).unwrap(), CrsCatalog::default());
    }

    #[test]
    fn test_malformed_code_rejected() {
        let json = r#"[{"name": "Broken", "code": "25832"}]"#;
        assert!(matches!(CrsCatalog::from_json_str(json).unwrap_err(), Error::Json(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"name": "Zone 32", "code": "EPSG:25832"}}]"#).unwrap();

        let catalog = CrsCatalog::load(file.path()).unwrap();
        assert_eq!(catalog.resolve("Zone 32").unwrap(), ReferenceSystem::epsg(25832));
    }

    #[test]
    fn test_load_missing_file() {
        let err = CrsCatalog::load("/nonexistent/catalog.json").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
