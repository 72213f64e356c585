//! Core point types for tunnelmap

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};

/// A point in a projected (planar) reference system, usually meters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanarPoint {
    /// Easting
    pub x: f64,
    /// Northing
    pub y: f64,
}

impl PlanarPoint {
    /// Creates a new planar point
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns true if both components are finite
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Fails with `InvalidCoordinate` unless both components are finite
    pub fn validate(&self) -> Result<Self> {
        if self.is_finite() {
            Ok(*self)
        } else {
            Err(Error::InvalidCoordinate(format!(
                "non-finite planar coordinate ({}, {})",
                self.x, self.y
            )))
        }
    }

    /// Euclidean distance to another point in the same system
    pub fn distance_to(&self, other: PlanarPoint) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl From<(f64, f64)> for PlanarPoint {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for PlanarPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

/// A geographic position in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lon: f64,
}

impl GeoPoint {
    /// Creates a new geographic point
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Arithmetic mean of a set of positions, `None` when empty
    pub fn centroid(points: &[GeoPoint]) -> Option<GeoPoint> {
        if points.is_empty() {
            return None;
        }

        let n = points.len() as f64;
        let lat = points.iter().map(|p| p.lat).sum::<f64>() / n;
        let lon = points.iter().map(|p| p.lon).sum::<f64>() / n;

        Some(GeoPoint::new(lat, lon))
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_planar_distance() {
        let a = PlanarPoint::new(0.0, 0.0);
        let b = PlanarPoint::new(3.0, 4.0);
        assert_eq!(a.distance_to(b), 5.0);
    }

    #[test]
    fn test_planar_validate() {
        assert!(PlanarPoint::new(1.0, 2.0).validate().is_ok());

        let err = PlanarPoint::new(f64::NAN, 2.0).validate().unwrap_err();
        assert!(matches!(err, Error::InvalidCoordinate(_)));

        let err = PlanarPoint::new(1.0, f64::INFINITY).validate().unwrap_err();
        assert!(matches!(err, Error::InvalidCoordinate(_)));
    }

    #[test]
    fn test_centroid() {
        let points = [GeoPoint::new(50.0, 8.0), GeoPoint::new(52.0, 10.0)];
        assert_eq!(GeoPoint::centroid(&points), Some(GeoPoint::new(51.0, 9.0)));
        assert_eq!(GeoPoint::centroid(&[]), None);
    }

    #[test]
    fn test_display_precision() {
        assert_eq!(PlanarPoint::new(506354.6, 5883817.714).to_string(), "(506354.60, 5883817.71)");
        assert_eq!(GeoPoint::new(53.1, 9.09).to_string(), "(53.100000, 9.090000)");
    }
}
