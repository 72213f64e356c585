//! Survey evaluation: boreholes against a tunnel alignment
//!
//! A survey request carries planar input in one reference system. Distances
//! are computed on the planar input; geographic positions are derived only
//! for display.

pub mod records;
pub mod format;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::alignment::{Alignment, ProjectionResult};
use crate::error::{Error, Result};
use crate::projection::{CrsRegistry, ReferenceSystem, Transformer};
use crate::types::{GeoPoint, PlanarPoint};

/// What kind of project the boreholes belong to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectKind {
    /// Boreholes along a tunnel; an alignment is required
    #[default]
    TunnelBoring,
    /// Free-standing boreholes without an alignment
    Offshore,
}

/// A borehole as entered by the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Borehole {
    #[serde(default, alias = "Name", alias = "NAME")]
    pub name: Option<String>,
    #[serde(alias = "X")]
    pub x: f64,
    #[serde(alias = "Y")]
    pub y: f64,
}

impl Borehole {
    pub fn new(name: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            name: Some(name.into()),
            x,
            y,
        }
    }

    /// Planar position of the borehole
    pub fn position(&self) -> PlanarPoint {
        PlanarPoint::new(self.x, self.y)
    }

    /// The given name, or `BH<n>` for the 1-based position `n`
    pub fn display_name(&self, index: usize) -> String {
        match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!("BH{}", index + 1),
        }
    }
}

/// Input of a survey evaluation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurveyRequest {
    #[serde(default)]
    pub kind: ProjectKind,
    /// System of all planar input
    pub crs: ReferenceSystem,
    /// Display system, WGS 84 unless given
    #[serde(default)]
    pub target: ReferenceSystem,
    /// Tunnel vertices, ignored for offshore projects
    #[serde(default)]
    pub alignment: Vec<PlanarPoint>,
    pub boreholes: Vec<Borehole>,
}

/// Geographic rendition of the tunnel alignment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlignmentReport {
    pub vertices: Vec<GeoPoint>,
    pub start: GeoPoint,
    pub end: GeoPoint,
    /// Planar length in the input unit
    pub length: f64,
}

/// Where a borehole sits relative to the alignment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlignmentOffset {
    pub projection: ProjectionResult,
    /// `projection.nearest` in the display system, for the connector line
    pub nearest_geo: GeoPoint,
}

/// Evaluation of one borehole
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoreholeReport {
    pub name: String,
    pub planar: PlanarPoint,
    pub geo: GeoPoint,
    pub offset: Option<AlignmentOffset>,
}

/// Output of a survey evaluation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurveyReport {
    pub kind: ProjectKind,
    pub crs: ReferenceSystem,
    pub target: ReferenceSystem,
    /// Suggested map center
    pub center: GeoPoint,
    pub alignment: Option<AlignmentReport>,
    pub boreholes: Vec<BoreholeReport>,
}

/// Evaluates a survey request
///
/// Boreholes are processed in parallel, each worker with its own transformer.
/// The output keeps input order.
pub fn evaluate(request: &SurveyRequest, registry: &CrsRegistry) -> Result<SurveyReport> {
    if request.boreholes.is_empty() {
        return Err(Error::InvalidInput("survey has no boreholes".to_string()));
    }

    let alignment = match request.kind {
        ProjectKind::TunnelBoring => Some(Alignment::new(request.alignment.clone())?),
        ProjectKind::Offshore => {
            if !request.alignment.is_empty() {
                warn!(
                    vertices = request.alignment.len(),
                    "ignoring alignment of offshore project"
                );
            }
            None
        }
    };

    let transformer = Transformer::with_registry(&request.crs, &request.target, registry)?;

    let alignment_report = match &alignment {
        Some(alignment) => {
            let vertices = transformer.reproject_many(alignment.vertices())?;
            Some(AlignmentReport {
                start: vertices[0],
                end: vertices[vertices.len() - 1],
                vertices,
                length: alignment.length(),
            })
        }
        None => None,
    };

    let boreholes = request
        .boreholes
        .par_iter()
        .enumerate()
        .map_init(
            || Transformer::with_registry(&request.crs, &request.target, registry),
            |worker, (index, borehole)| {
                let transformer = worker
                    .as_ref()
                    .map_err(|e| Error::Projection(format!("worker transformer: {}", e)))?;
                evaluate_borehole(index, borehole, alignment.as_ref(), transformer)
            },
        )
        .collect::<Result<Vec<_>>>()?;

    let center = match &alignment_report {
        Some(report) => GeoPoint::centroid(&report.vertices),
        None => boreholes.first().map(|b| b.geo),
    }
    .ok_or_else(|| Error::InvalidInput("nothing to center the map on".to_string()))?;

    debug!(
        kind = ?request.kind,
        crs = %request.crs,
        boreholes = boreholes.len(),
        "evaluated survey"
    );

    Ok(SurveyReport {
        kind: request.kind,
        crs: request.crs.clone(),
        target: request.target.clone(),
        center,
        alignment: alignment_report,
        boreholes,
    })
}

fn evaluate_borehole(
    index: usize,
    borehole: &Borehole,
    alignment: Option<&Alignment>,
    transformer: &Transformer,
) -> Result<BoreholeReport> {
    let name = borehole.display_name(index);
    let planar = borehole.position().validate().map_err(|e| {
        Error::InvalidCoordinate(format!("borehole {}: {}", name, e))
    })?;

    let geo = transformer.reproject(planar)?;

    let offset = match alignment {
        Some(alignment) => {
            let projection = alignment.project(planar)?;
            let nearest_geo = transformer.reproject(projection.nearest)?;
            Some(AlignmentOffset {
                projection,
                nearest_geo,
            })
        }
        None => None,
    };

    Ok(BoreholeReport {
        name,
        planar,
        geo,
        offset,
    })
}
