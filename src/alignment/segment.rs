use crate::types::PlanarPoint;

/// A straight piece of an alignment between two vertices
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: PlanarPoint,
    pub end: PlanarPoint,
}

impl Segment {
    pub fn new(start: PlanarPoint, end: PlanarPoint) -> Self {
        Self { start, end }
    }

    /// Length of the segment
    pub fn length(&self) -> f64 {
        self.start.distance_to(self.end)
    }

    /// Returns true if both endpoints coincide
    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }

    /// Closest point on the segment and its parameter `t` in [0, 1]
    ///
    /// A zero-length segment collapses to its start point with `t = 0`.
    /// Coordinates whose squares overflow are rescaled before projecting.
    pub fn closest_point(&self, point: PlanarPoint) -> (PlanarPoint, f64) {
        let t = self
            .parameter(point, 1.0)
            .or_else(|| self.parameter(point, self.extent(point)))
            .unwrap_or(0.0);

        (self.point_at(t), t)
    }

    /// Distance from a point to the segment
    pub fn distance_to(&self, point: PlanarPoint) -> f64 {
        let (closest, _) = self.closest_point(point);
        point.distance_to(closest)
    }

    /// Point at parameter `t`; endpoints are returned exactly
    pub fn point_at(&self, t: f64) -> PlanarPoint {
        if t <= 0.0 {
            return self.start;
        }
        if t >= 1.0 {
            return self.end;
        }

        PlanarPoint::new(lerp(self.start.x, self.end.x, t), lerp(self.start.y, self.end.y, t))
    }

    /// Clamped projection parameter with every coordinate divided by `scale`
    ///
    /// Returns `None` if an intermediate value is not finite.
    fn parameter(&self, point: PlanarPoint, scale: f64) -> Option<f64> {
        let (sx, sy) = (self.start.x / scale, self.start.y / scale);
        let dx = self.end.x / scale - sx;
        let dy = self.end.y / scale - sy;
        let px = point.x / scale - sx;
        let py = point.y / scale - sy;

        let length_sq = dx * dx + dy * dy;
        let dot = px * dx + py * dy;

        if !length_sq.is_finite() || !dot.is_finite() {
            return None;
        }
        if length_sq == 0.0 {
            return Some(0.0);
        }

        Some((dot / length_sq).clamp(0.0, 1.0))
    }

    /// Largest absolute coordinate among the endpoints and `point`
    fn extent(&self, point: PlanarPoint) -> f64 {
        [self.start, self.end, point]
            .iter()
            .flat_map(|p| [p.x.abs(), p.y.abs()])
            .fold(0.0, f64::max)
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    let delta = b - a;
    if delta.is_finite() {
        a + t * delta
    } else {
        a * (1.0 - t) + b * t
    }
}
