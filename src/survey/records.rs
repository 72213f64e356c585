//! CSV input and output for boreholes and survey reports

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;
use tracing::debug;

use crate::error::{Error, Result};
use crate::survey::format::{format_degrees, format_planar};
use crate::survey::{Borehole, SurveyReport};

const REPORT_HEADER: [&str; 9] = [
    "name",
    "x",
    "y",
    "latitude",
    "longitude",
    "distance_m",
    "nearest_latitude",
    "nearest_longitude",
    "chainage_m",
];

/// Reads boreholes from CSV with `Name,X,Y` columns
///
/// The name column is optional. A row that does not parse fails the whole
/// read with its line number in the error.
pub fn read_boreholes<R: Read>(reader: R) -> Result<Vec<Borehole>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut boreholes = Vec::new();
    for result in csv_reader.deserialize() {
        let borehole: Borehole = result?;
        boreholes.push(borehole);
    }

    if boreholes.is_empty() {
        return Err(Error::InvalidInput("CSV contains no boreholes".to_string()));
    }

    debug!(count = boreholes.len(), "read boreholes");
    Ok(boreholes)
}

/// Reads boreholes from a CSV file
pub fn read_boreholes_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Borehole>> {
    let file = File::open(path)?;
    read_boreholes(file)
}

/// Writes one row per borehole
///
/// Alignment columns stay empty for offshore reports.
pub fn write_report<W: Write>(report: &SurveyReport, writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(REPORT_HEADER).map_err(write_error)?;

    for borehole in &report.boreholes {
        let (distance, nearest_lat, nearest_lon, chainage) = match &borehole.offset {
            Some(offset) => (
                format_planar(offset.projection.distance),
                format_degrees(offset.nearest_geo.lat),
                format_degrees(offset.nearest_geo.lon),
                format_planar(offset.projection.chainage),
            ),
            None => Default::default(),
        };

        csv_writer.write_record([
            borehole.name.clone(),
            format_planar(borehole.planar.x),
            format_planar(borehole.planar.y),
            format_degrees(borehole.geo.lat),
            format_degrees(borehole.geo.lon),
            distance,
            nearest_lat,
            nearest_lon,
            chainage,
        ])
        .map_err(write_error)?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Renders the report as a CSV string
pub fn report_to_csv_string(report: &SurveyReport) -> Result<String> {
    let mut buffer = Vec::with_capacity(report.boreholes.len() * 96);
    write_report(report, &mut buffer)?;

    String::from_utf8(buffer).map_err(|e| Error::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
}

/// Reports a failed report write as `Io`
fn write_error(e: csv::Error) -> Error {
    Error::Io(io::Error::from(e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alignment::ProjectionResult;
    use crate::projection::ReferenceSystem;
    use crate::survey::{AlignmentOffset, BoreholeReport, ProjectKind};
    use crate::types::{GeoPoint, PlanarPoint};

    #[test]
    fn test_read_boreholes_with_names() {
        let data = "Name,X,Y\nBH1,506400.0,5884000.0\nBH2, 506410.0 ,5884100.0\n";
        let boreholes = read_boreholes(data.as_bytes()).unwrap();

        assert_eq!(boreholes.len(), 2);
        assert_eq!(boreholes[0], Borehole::new("BH1", 506400.0, 5884000.0));
        assert_eq!(boreholes[1].x, 506410.0);
    }

    #[test]
    fn test_read_boreholes_lowercase_and_empty_name() {
        let data = "name,x,y\n,1.5,2.5\n";
        let boreholes = read_boreholes(data.as_bytes()).unwrap();

        assert_eq!(boreholes[0].name, None);
        assert_eq!(boreholes[0].display_name(0), "BH1");
    }

    #[test]
    fn test_read_boreholes_without_name_column() {
        let data = "X,Y\n1,2\n3,4\n";
        let boreholes = read_boreholes(data.as_bytes()).unwrap();
        assert_eq!(boreholes.len(), 2);
        assert!(boreholes.iter().all(|b| b.name.is_none()));
    }

    #[test]
    fn test_read_boreholes_bad_row() {
        let data = "Name,X,Y\nBH1,abc,5884000.0\n";
        let err = read_boreholes(data.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::Csv(_)));
    }

    #[test]
    fn test_read_boreholes_empty() {
        let err = read_boreholes("Name,X,Y\n".as_bytes()).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_read_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Name,X,Y").unwrap();
        writeln!(file, "BH7,10,20").unwrap();

        let boreholes = read_boreholes_from_path(file.path()).unwrap();
        assert_eq!(boreholes, vec![Borehole::new("BH7", 10.0, 20.0)]);
    }

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"))
        }
    }

    #[test]
    fn test_write_failure_is_not_validation() {
        let borehole = BoreholeReport {
            name: "BH1".to_string(),
            planar: PlanarPoint::new(1.0, 2.0),
            geo: GeoPoint::new(53.0, 9.0),
            offset: None,
        };
        let report = SurveyReport {
            kind: ProjectKind::Offshore,
            crs: ReferenceSystem::epsg(25832),
            target: ReferenceSystem::wgs84(),
            center: GeoPoint::new(53.0, 9.0),
            alignment: None,
            boreholes: vec![borehole; 2000],
        };

        let err = write_report(&report, ClosedPipe).unwrap_err();
        assert!(matches!(err, Error::Io(_)), "got {:?}", err);
        assert!(!err.is_validation());
    }

    #[test]
    fn test_write_report() {
        let report = SurveyReport {
            kind: ProjectKind::TunnelBoring,
            crs: ReferenceSystem::epsg(25832),
            target: ReferenceSystem::wgs84(),
            center: GeoPoint::new(53.1, 9.1),
            alignment: None,
            boreholes: vec![
                BoreholeReport {
                    name: "BH1".to_string(),
                    planar: PlanarPoint::new(15.0, 1.0),
                    geo: GeoPoint::new(53.123456789, 9.1),
                    offset: Some(AlignmentOffset {
                        projection: ProjectionResult {
                            nearest: PlanarPoint::new(10.0, 0.0),
                            distance: 26f64.sqrt(),
                            segment_index: 0,
                            chainage: 10.0,
                        },
                        nearest_geo: GeoPoint::new(53.0, 9.0),
                    }),
                },
                BoreholeReport {
                    name: "BH2".to_string(),
                    planar: PlanarPoint::new(1.0, 2.0),
                    geo: GeoPoint::new(53.2, 9.2),
                    offset: None,
                },
            ],
        };

        let csv = report_to_csv_string(&report).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], REPORT_HEADER.join(","));
        assert_eq!(
            lines[1],
            "BH1,15.00,1.00,53.123457,9.100000,5.10,53.000000,9.000000,10.00"
        );
        assert_eq!(lines[2], "BH2,1.00,2.00,53.200000,9.200000,,,,");
    }
}
