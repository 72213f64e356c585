use crate::error::{Error, Result};
use proj::Proj;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Identifier of a coordinate reference system, e.g. `EPSG:25832`
///
/// Only the syntax is checked on construction. Whether PROJ actually knows the
/// system is decided by [`ReferenceSystem::resolve`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReferenceSystem {
    authority: String,
    code: String,
}

impl ReferenceSystem {
    /// Parses an `AUTHORITY:CODE` identifier
    pub fn parse(identifier: &str) -> Result<Self> {
        let trimmed = identifier.trim();

        let (authority, code) = trimmed.split_once(':').ok_or_else(|| {
            Error::InvalidReferenceSystem(format!("expected AUTHORITY:CODE, got '{}'", identifier))
        })?;

        let authority = authority.trim();
        let code = code.trim();

        if authority.is_empty() || !authority.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(Error::InvalidReferenceSystem(format!(
                "invalid authority in '{}'",
                identifier
            )));
        }

        if code.is_empty() || !code.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(Error::InvalidReferenceSystem(format!(
                "invalid code in '{}'",
                identifier
            )));
        }

        Ok(Self {
            authority: authority.to_ascii_uppercase(),
            code: code.to_string(),
        })
    }

    /// Creates an EPSG reference system
    pub fn epsg(code: u32) -> Self {
        Self {
            authority: "EPSG".to_string(),
            code: code.to_string(),
        }
    }

    /// WGS 84 geographic, the default display system
    pub fn wgs84() -> Self {
        Self::epsg(4326)
    }

    /// Returns the authority name, upper case
    pub fn authority(&self) -> &str {
        &self.authority
    }

    /// Returns the code within the authority
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Returns the EPSG code if this is an EPSG system
    pub fn epsg_code(&self) -> Option<u32> {
        if self.authority == "EPSG" {
            self.code.parse().ok()
        } else {
            None
        }
    }

    /// Checks that PROJ can build a definition for this system
    pub fn resolve(&self) -> Result<()> {
        let identifier = self.to_string();
        Proj::new(&identifier)
            .map(|_| ())
            .map_err(|e| Error::InvalidReferenceSystem(format!("{}: {}", identifier, e)))
    }
}

impl Default for ReferenceSystem {
    fn default() -> Self {
        Self::wgs84()
    }
}

impl fmt::Display for ReferenceSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.authority, self.code)
    }
}

impl FromStr for ReferenceSystem {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for ReferenceSystem {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ReferenceSystem {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
