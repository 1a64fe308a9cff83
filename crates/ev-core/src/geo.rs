//! Planar geometry in projected map units.
//!
//! All coordinates are `f64` in the same projected unit the scenario was
//! authored in (metres for the bundled beach).  Movers and waypoint markers
//! are points; regions are simple polygons given by their exterior ring.

use std::fmt;
use std::ops::{Add, Sub};

use crate::{EvacError, EvacResult};

/// Boundary tolerance used by [`Polygon::contains`].
const EPSILON: f64 = 1e-9;

// ── Point2 ────────────────────────────────────────────────────────────────────

/// A position on the map plane.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance(self, other: Point2) -> f64 {
        self.distance_2(other).sqrt()
    }

    /// Squared Euclidean distance; cheaper when only comparing.
    #[inline]
    pub fn distance_2(self, other: Point2) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Length of the vector from the origin to `self`.
    #[inline]
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    #[inline]
    pub fn scale(self, k: f64) -> Point2 {
        Point2::new(self.x * k, self.y * k)
    }

    /// `[x, y]` array form used by the R-tree.
    #[inline]
    pub fn to_array(self) -> [f64; 2] {
        [self.x, self.y]
    }
}

impl Add for Point2 {
    type Output = Point2;
    #[inline]
    fn add(self, rhs: Point2) -> Point2 {
        Point2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point2 {
    type Output = Point2;
    #[inline]
    fn sub(self, rhs: Point2) -> Point2 {
        Point2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl From<[f64; 2]> for Point2 {
    #[inline]
    fn from(p: [f64; 2]) -> Self {
        Point2::new(p[0], p[1])
    }
}

impl fmt::Display for Point2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

// ── Polygon ───────────────────────────────────────────────────────────────────

/// A simple polygon described by its exterior ring.
///
/// The ring is implicitly closed: the last vertex connects back to the first,
/// and a repeated closing vertex is dropped on construction.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Polygon {
    ring: Vec<Point2>,
}

impl Polygon {
    /// Build a polygon from its exterior ring.
    ///
    /// # Errors
    /// [`EvacError::DegeneratePolygon`] if fewer than three distinct
    /// vertices remain after dropping the closing vertex.
    pub fn new(mut ring: Vec<Point2>) -> EvacResult<Self> {
        if ring.len() > 1 && ring.first() == ring.last() {
            ring.pop();
        }
        if ring.len() < 3 {
            return Err(EvacError::DegeneratePolygon(ring.len()));
        }
        Ok(Self { ring })
    }

    /// Axis-aligned rectangle with corners `min` and `max`.
    pub fn rect(min: Point2, max: Point2) -> EvacResult<Self> {
        Self::new(vec![
            min,
            Point2::new(max.x, min.y),
            max,
            Point2::new(min.x, max.y),
        ])
    }

    pub fn vertices(&self) -> &[Point2] {
        &self.ring
    }

    /// Iterator over the ring's edges as `(start, end)` pairs.
    pub fn edges(&self) -> impl Iterator<Item = (Point2, Point2)> + '_ {
        let n = self.ring.len();
        (0..n).map(move |i| (self.ring[i], self.ring[(i + 1) % n]))
    }

    /// `(min, max)` corners of the bounding box.
    pub fn bounds(&self) -> (Point2, Point2) {
        let mut min = Point2::new(f64::INFINITY, f64::INFINITY);
        let mut max = Point2::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
        for p in &self.ring {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        (min, max)
    }

    /// Area-weighted centroid.  Falls back to the vertex mean for rings with
    /// (near-)zero area.
    pub fn centroid(&self) -> Point2 {
        let mut area2 = 0.0;
        let mut cx = 0.0;
        let mut cy = 0.0;
        for (a, b) in self.edges() {
            let cross = a.x * b.y - b.x * a.y;
            area2 += cross;
            cx += (a.x + b.x) * cross;
            cy += (a.y + b.y) * cross;
        }
        if area2.abs() < EPSILON {
            let n = self.ring.len() as f64;
            let sum = self.ring.iter().fold(Point2::default(), |acc, &p| acc + p);
            return sum.scale(1.0 / n);
        }
        Point2::new(cx / (3.0 * area2), cy / (3.0 * area2))
    }

    /// `true` if `p` lies inside the polygon or on its boundary.
    pub fn contains(&self, p: Point2) -> bool {
        if self.edges().any(|(a, b)| segment_distance_2(p, a, b) <= EPSILON) {
            return true;
        }
        // Even-odd ray cast towards +x.
        let mut inside = false;
        for (a, b) in self.edges() {
            if (a.y > p.y) != (b.y > p.y) {
                let x_cross = a.x + (p.y - a.y) / (b.y - a.y) * (b.x - a.x);
                if p.x < x_cross {
                    inside = !inside;
                }
            }
        }
        inside
    }

    /// Squared distance from `p` to the polygon; `0.0` when `p` is inside.
    pub fn distance_2(&self, p: Point2) -> f64 {
        if self.contains(p) {
            return 0.0;
        }
        self.edges()
            .map(|(a, b)| segment_distance_2(p, a, b))
            .fold(f64::INFINITY, f64::min)
    }

    /// Distance from `p` to the polygon; `0.0` when `p` is inside.
    pub fn distance(&self, p: Point2) -> f64 {
        self.distance_2(p).sqrt()
    }
}

/// Squared distance from `p` to the segment `a`–`b`.
fn segment_distance_2(p: Point2, a: Point2, b: Point2) -> f64 {
    let ab = b - a;
    let len_2 = ab.x * ab.x + ab.y * ab.y;
    if len_2 == 0.0 {
        return p.distance_2(a);
    }
    let ap = p - a;
    let t = ((ap.x * ab.x + ap.y * ab.y) / len_2).clamp(0.0, 1.0);
    p.distance_2(a + ab.scale(t))
}
