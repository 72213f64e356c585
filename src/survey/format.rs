//! Display formatting for survey results

use crate::survey::BoreholeReport;

/// Planar coordinate, two decimals
pub fn format_planar(value: f64) -> String {
    format!("{:.2}", value)
}

/// Geographic coordinate, six decimals
pub fn format_degrees(value: f64) -> String {
    format!("{:.6}", value)
}

/// Distance in meters, two decimals
pub fn format_distance(meters: f64) -> String {
    format!("{:.2} m", meters)
}

impl BoreholeReport {
    /// Plain text summary of the borehole for a marker popup
    pub fn summary(&self) -> String {
        let mut lines = vec![
            self.name.clone(),
            "Input Coordinates:".to_string(),
            format!("X: {}", format_planar(self.planar.x)),
            format!("Y: {}", format_planar(self.planar.y)),
            "Lat/Lon Coordinates:".to_string(),
            format!("Lat: {}", format_degrees(self.geo.lat)),
            format!("Lon: {}", format_degrees(self.geo.lon)),
        ];

        if let Some(offset) = &self.offset {
            lines.push(format!(
                "Distance to Tunnel: {}",
                format_distance(offset.projection.distance)
            ));
            lines.push(format!("Chainage: {}", format_distance(offset.projection.chainage)));
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alignment::ProjectionResult;
    use crate::survey::AlignmentOffset;
    use crate::types::{GeoPoint, PlanarPoint};

    fn report(offset: Option<AlignmentOffset>) -> BoreholeReport {
        BoreholeReport {
            name: "BH1".to_string(),
            planar: PlanarPoint::new(506480.6, 5885291.284),
            geo: GeoPoint::new(53.1123456789, 9.0987654321),
            offset,
        }
    }

    #[test]
    fn test_number_formats() {
        assert_eq!(format_planar(506354.6), "506354.60");
        assert_eq!(format_degrees(53.1), "53.100000");
        assert_eq!(format_distance(5.0990195), "5.10 m");
    }

    #[test]
    fn test_summary_without_offset() {
        let summary = report(None).summary();

        assert!(summary.starts_with("BH1\n"));
        assert!(summary.contains("X: 506480.60"));
        assert!(summary.contains("Y: 5885291.28"));
        assert!(summary.contains("Lat: 53.112346"));
        assert!(summary.contains("Lon: 9.098765"));
        assert!(!summary.contains("Distance"));
    }

    #[test]
    fn test_summary_with_offset() {
        let offset = AlignmentOffset {
            projection: ProjectionResult {
                nearest: PlanarPoint::new(506475.0, 5885291.0),
                distance: 5.584,
                segment_index: 0,
                chainage: 1478.936,
            },
            nearest_geo: GeoPoint::new(53.11, 9.09),
        };

        let summary = report(Some(offset)).summary();
        assert!(summary.contains("Distance to Tunnel: 5.58 m"));
        assert!(summary.contains("Chainage: 1478.94 m"));
    }
}
