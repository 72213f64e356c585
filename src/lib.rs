//! tunnelmap - Borehole positions relative to a tunnel alignment
//!
//! tunnelmap converts planar survey coordinates to geographic positions for
//! display and measures how far each borehole lies from a tunnel centerline.
//! Distances are always computed in the projected system, never on degrees.
//!
//! # Examples
//!
//! ## Distance to an alignment
//!
//! ```
//! use tunnelmap::{Alignment, PlanarPoint};
//!
//! let alignment = Alignment::new(vec![
//!     PlanarPoint::new(0.0, 0.0),
//!     PlanarPoint::new(10.0, 0.0),
//! ])?;
//!
//! let result = alignment.project(PlanarPoint::new(5.0, 5.0))?;
//! assert_eq!(result.nearest, PlanarPoint::new(5.0, 0.0));
//! assert_eq!(result.distance, 5.0);
//! # Ok::<(), tunnelmap::Error>(())
//! ```
//!
//! ## Reprojecting to WGS 84
//!
//! ```no_run
//! use tunnelmap::{reproject, PlanarPoint, ReferenceSystem};
//!
//! let utm = ReferenceSystem::parse("EPSG:25832")?;
//! let geo = reproject(PlanarPoint::new(506354.60, 5883817.71), &utm, &ReferenceSystem::wgs84())?;
//! println!("lat={:.6} lon={:.6}", geo.lat, geo.lon);
//! # Ok::<(), tunnelmap::Error>(())
//! ```

pub mod error;
pub mod types;
pub mod alignment;
pub mod projection;
pub mod survey;
pub mod config;
pub mod api;

pub use error::{Error, Result};
pub use types::{GeoPoint, PlanarPoint};
pub use alignment::{project_onto_alignment, Alignment, ProjectionResult, Segment, TIE_EPSILON};
pub use projection::{reproject, CatalogEntry, CrsCatalog, CrsRegistry, ReferenceSystem, Transformer};
pub use survey::{evaluate, Borehole, BoreholeReport, ProjectKind, SurveyReport, SurveyRequest};
