//! Tunnel alignments and nearest-point projection
//!
//! All distances are planar, in the unit of the alignment's reference system.
//! Never build an alignment from geographic degrees.

pub mod segment;

pub use self::segment::Segment;

use crate::error::{Error, Result};
use crate::types::PlanarPoint;
use serde::{Deserialize, Serialize};

/// Distance difference below which two segments count as equally close
pub const TIE_EPSILON: f64 = 1e-9;

/// An immutable polyline of at least two planar vertices
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<PlanarPoint>", into = "Vec<PlanarPoint>")]
pub struct Alignment {
    vertices: Vec<PlanarPoint>,
}

/// Outcome of projecting a point onto an alignment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResult {
    /// Closest point on the alignment
    pub nearest: PlanarPoint,
    /// Distance from the query point to `nearest`, never negative
    pub distance: f64,
    /// Index of the segment `nearest` lies on
    pub segment_index: usize,
    /// Distance along the alignment from its first vertex to `nearest`
    pub chainage: f64,
}

impl Alignment {
    /// Creates an alignment from its vertices
    pub fn new(vertices: Vec<PlanarPoint>) -> Result<Self> {
        if vertices.len() < 2 {
            return Err(Error::DegenerateAlignment(vertices.len()));
        }

        for vertex in &vertices {
            vertex.validate()?;
        }

        Ok(Self { vertices })
    }

    /// Returns the vertices in order
    pub fn vertices(&self) -> &[PlanarPoint] {
        &self.vertices
    }

    /// First vertex
    pub fn start(&self) -> PlanarPoint {
        self.vertices[0]
    }

    /// Last vertex
    pub fn end(&self) -> PlanarPoint {
        self.vertices[self.vertices.len() - 1]
    }

    /// Iterates over consecutive segments
    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        self.vertices.windows(2).map(|pair| Segment::new(pair[0], pair[1]))
    }

    pub fn segment_count(&self) -> usize {
        self.vertices.len() - 1
    }

    /// Total planar length
    pub fn length(&self) -> f64 {
        self.segments().map(|segment| segment.length()).sum()
    }

    /// Projects a point onto the alignment
    ///
    /// Segments are scanned in order and a later segment only wins if it is
    /// closer by more than [`TIE_EPSILON`], so ties (e.g. at a shared vertex)
    /// go to the lowest segment index.
    pub fn project(&self, point: PlanarPoint) -> Result<ProjectionResult> {
        let point = point.validate()?;

        let mut best: Option<ProjectionResult> = None;
        let mut offset = 0.0;

        for (index, segment) in self.segments().enumerate() {
            let (closest, t) = segment.closest_point(point);
            let distance = point.distance_to(closest);
            let length = segment.length();

            let better = match &best {
                None => true,
                Some(current) => current.distance - distance > TIE_EPSILON,
            };

            if better {
                best = Some(ProjectionResult {
                    nearest: closest,
                    distance,
                    segment_index: index,
                    chainage: offset + t * length,
                });
            }

            offset += length;
        }

        let best = best.ok_or(Error::DegenerateAlignment(self.vertices.len()))?;

        if !best.distance.is_finite() || !best.chainage.is_finite() {
            return Err(Error::InvalidCoordinate(format!(
                "{} is too far from the alignment for a finite distance",
                point
            )));
        }

        Ok(best)
    }

    /// Point at a given distance along the alignment
    ///
    /// Chainages outside `[0, length]` are clamped to the end vertices.
    pub fn interpolate(&self, chainage: f64) -> Result<PlanarPoint> {
        if !chainage.is_finite() {
            return Err(Error::InvalidCoordinate(format!("non-finite chainage {}", chainage)));
        }

        if chainage <= 0.0 {
            return Ok(self.start());
        }

        let mut remaining = chainage;
        for segment in self.segments() {
            let length = segment.length();
            if remaining <= length && length > 0.0 {
                return Ok(segment.point_at(remaining / length));
            }
            remaining -= length;
        }

        Ok(self.end())
    }
}

impl TryFrom<Vec<PlanarPoint>> for Alignment {
    type Error = Error;

    fn try_from(vertices: Vec<PlanarPoint>) -> Result<Self> {
        Self::new(vertices)
    }
}

impl From<Alignment> for Vec<PlanarPoint> {
    fn from(alignment: Alignment) -> Self {
        alignment.vertices
    }
}

/// Projects a point onto an alignment, see [`Alignment::project`]
pub fn project_onto_alignment(point: PlanarPoint, alignment: &Alignment) -> Result<ProjectionResult> {
    alignment.project(point)
}
