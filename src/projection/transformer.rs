use crate::error::{Error, Result};
use crate::projection::crs::ReferenceSystem;
use crate::projection::registry::CrsRegistry;
use crate::types::{GeoPoint, PlanarPoint};
use proj::Proj;
use tracing::debug;

const MAX_LATITUDE: f64 = 90.0;
// PROJ may leave longitudes unwrapped past the antimeridian.
const MAX_LONGITUDE: f64 = 540.0;

/// Transforms coordinates between two coordinate reference systems
///
/// Axis order is normalized for visualization: x is easting or longitude,
/// y is northing or latitude, whatever the authority's own order is.
pub struct Transformer {
    proj: Option<Proj>,
    from: ReferenceSystem,
    to: ReferenceSystem,
}

impl Transformer {
    /// Creates a new transformer from source to target CRS
    ///
    /// The source system is resolved even when it equals the target, so an
    /// unknown code never passes through as an identity.
    pub fn new(from: &ReferenceSystem, to: &ReferenceSystem) -> Result<Self> {
        from.resolve()?;
        if from == to {
            return Ok(Self::identity(from.clone()));
        }

        to.resolve()?;
        Self::build(from, to)
    }

    /// Creates a transformer, resolving both systems through a shared registry
    pub fn with_registry(
        from: &ReferenceSystem,
        to: &ReferenceSystem,
        registry: &CrsRegistry,
    ) -> Result<Self> {
        registry.resolve(from)?;
        if from == to {
            return Ok(Self::identity(from.clone()));
        }

        registry.resolve(to)?;
        Self::build(from, to)
    }

    /// Creates a transformer that returns its input unchanged
    ///
    /// The system is taken as already resolved.
    pub fn identity(system: ReferenceSystem) -> Self {
        Self {
            proj: None,
            from: system.clone(),
            to: system,
        }
    }

    fn build(from: &ReferenceSystem, to: &ReferenceSystem) -> Result<Self> {
        let proj = Proj::new_known_crs(&from.to_string(), &to.to_string(), None).map_err(|e| {
            Error::InvalidReferenceSystem(format!("no transformation from {} to {}: {}", from, to, e))
        })?;

        debug!(%from, %to, "created transformer");

        Ok(Self {
            proj: Some(proj),
            from: from.clone(),
            to: to.clone(),
        })
    }

    /// Transforms a coordinate from source to target CRS
    pub fn transform(&self, point: PlanarPoint) -> Result<PlanarPoint> {
        let point = point.validate()?;

        let proj = match &self.proj {
            Some(proj) => proj,
            None => return Ok(point),
        };

        let (x, y) = proj.convert((point.x, point.y)).map_err(|e| {
            Error::InvalidCoordinate(format!(
                "{} is outside the domain of {} -> {}: {}",
                point, self.from, self.to, e
            ))
        })?;

        if !x.is_finite() || !y.is_finite() {
            return Err(Error::InvalidCoordinate(format!(
                "{} has no finite image in {}",
                point, self.to
            )));
        }

        Ok(PlanarPoint::new(x, y))
    }

    /// Transforms a coordinate and reads the result as latitude/longitude
    ///
    /// The target must be geographic. Output outside the degree ranges means
    /// the target is projected and fails with `InvalidReferenceSystem`; use
    /// [`Transformer::transform`] for planar targets.
    pub fn reproject(&self, point: PlanarPoint) -> Result<GeoPoint> {
        let out = self.transform(point)?;

        if out.y.abs() > MAX_LATITUDE || out.x.abs() > MAX_LONGITUDE {
            return Err(Error::InvalidReferenceSystem(format!(
                "{} is not a geographic system: {} -> {} is not latitude/longitude",
                self.to, point, out
            )));
        }

        Ok(GeoPoint::new(out.y, out.x))
    }

    /// Transforms multiple coordinates in bulk
    pub fn transform_many(&self, points: &[PlanarPoint]) -> Result<Vec<PlanarPoint>> {
        points.iter().map(|&point| self.transform(point)).collect()
    }

    /// Reprojects multiple coordinates in bulk
    pub fn reproject_many(&self, points: &[PlanarPoint]) -> Result<Vec<GeoPoint>> {
        points.iter().map(|&point| self.reproject(point)).collect()
    }

    /// Creates the transformer for the opposite direction
    pub fn inverse(&self) -> Result<Transformer> {
        match self.proj {
            None => Ok(Self::identity(self.from.clone())),
            Some(_) => Self::build(&self.to, &self.from),
        }
    }

    /// Returns true if this transformer never touches PROJ
    pub fn is_identity(&self) -> bool {
        self.proj.is_none()
    }

    /// Returns the source system
    pub fn from(&self) -> &ReferenceSystem {
        &self.from
    }

    /// Returns the target system
    pub fn to(&self) -> &ReferenceSystem {
        &self.to
    }
}

/// Converts a planar point in `from` into a geographic position in `to`
pub fn reproject(point: PlanarPoint, from: &ReferenceSystem, to: &ReferenceSystem) -> Result<GeoPoint> {
    Transformer::new(from, to)?.reproject(point)
}
