use crate::mesh::{EdgeId, Mesh};
use crate::point::Point;

/// Tolerance of all plane tests: values of the implicit equation within `±EPSILON` count as
/// lying on the plane.
pub const EPSILON: f64 = 0.001;

/// Tri-state classification of a point against a plane.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Below = -1,
    On = 0,
    Above = 1,
}

impl Side {
    #[inline]
    pub fn sign(self) -> i32 {
        self as i32
    }

    /// `true` if a point on this side survives a clip that keeps `reference`.
    /// Points on the plane are always kept.
    #[inline]
    pub fn retained_by(self, reference: Side) -> bool {
        self.sign() * reference.sign() >= 0
    }

    #[inline]
    pub fn opposes(self, other: Side) -> bool {
        self.sign() * other.sign() < 0
    }
}

/// A plane `A·x + B·y + C·z + D = 0` with unit normal `(A, B, C)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
}

impl Plane {
    /// Plane through `origin` perpendicular to `dir`. `dir` need not be unit length.
    ///
    /// Returns `None` when `dir` is (nearly) the zero vector, e.g. the bisector of two
    /// coincident sites.
    pub fn new(origin: Point, dir: Point) -> Option<Plane> {
        let len = dir.length();
        if !len.is_finite() || len <= f64::EPSILON {
            return None;
        }
        let a = dir.x / len;
        let b = dir.y / len;
        let c = dir.z / len;
        Some(Plane {
            a,
            b,
            c,
            d: -a * origin.x - b * origin.y - c * origin.z,
        })
    }

    /// Unit normal of the plane.
    pub fn normal(&self) -> Point {
        Point::new(self.a, self.b, self.c)
    }

    /// Value of the implicit equation, which is the signed distance since the normal is unit.
    #[inline]
    pub fn signed_distance(&self, p: &Point) -> f64 {
        self.a * p.x + self.b * p.y + self.c * p.z + self.d
    }

    #[inline]
    pub fn side(&self, p: &Point) -> Side {
        let t = self.signed_distance(p);
        if t < -EPSILON {
            Side::Below
        } else if t > EPSILON {
            Side::Above
        } else {
            Side::On
        }
    }

    /// Classifies every point once, indexed like `points`.
    pub fn sides(&self, points: &[Point]) -> Vec<Side> {
        points.iter().map(|p| self.side(p)).collect()
    }

    /// Intersection of the segment `v0 -> v1` with the plane.
    ///
    /// `None` if the segment is (nearly) parallel to the plane or the crossing lies outside
    /// the segment.
    pub fn segment_intersection(&self, v0: &Point, v1: &Point) -> Option<Point> {
        let denom = self.a * (v0.x - v1.x) + self.b * (v0.y - v1.y) + self.c * (v0.z - v1.z);
        if denom.abs() < EPSILON {
            return None;
        }
        let u = self.signed_distance(v0) / denom;
        if !(0.0..=1.0).contains(&u) {
            return None;
        }
        Some(Point::lerp(*v0, *v1, u))
    }

    /// Crossing points of every mesh edge whose endpoints lie strictly on opposite sides.
    ///
    /// An endpoint within `EPSILON` of the plane gets no crossing. It is kept by the clip and
    /// acts as the crossing vertex itself, so an edge ending on the plane is never cut.
    ///
    /// A shared edge is solved once and the point is recorded for both half-edges, so the two
    /// faces meeting there refer to the same crossing slot.
    pub(crate) fn edge_intersections(&self, mesh: &Mesh, sides: &[Side]) -> Crossings {
        let edges = mesh.edges();
        let mut crossings = Crossings {
            points: Vec::new(),
            slots: vec![None; edges.len()],
        };

        for (i, he) in edges.iter().enumerate() {
            let Some(pair) = he.pair else { continue };
            if crossings.slots[i].is_some() {
                continue;
            }
            let begin = he.begin;
            let end = mesh.end(EdgeId(i));
            if !sides[begin.0].opposes(sides[end.0]) {
                continue;
            }
            if let Some(p) = self.segment_intersection(mesh.point(begin), mesh.point(end)) {
                let slot = crossings.points.len();
                crossings.points.push(p);
                crossings.slots[i] = Some(slot);
                crossings.slots[pair.0] = Some(slot);
            }
        }
        crossings
    }
}

/// Edge to crossing-point mapping produced by [`Plane::edge_intersections`].
#[derive(Clone, Debug, Default)]
pub(crate) struct Crossings {
    points: Vec<Point>,
    slots: Vec<Option<usize>>,
}

impl Crossings {
    /// Crossing slot of `edge`, shared with its pair.
    #[inline]
    pub fn slot(&self, edge: EdgeId) -> Option<usize> {
        self.slots.get(edge.0).copied().flatten()
    }

    pub fn point(&self, slot: usize) -> Point {
        self.points[slot]
    }

    /// Number of distinct crossing points (one per undirected edge).
    pub fn len(&self) -> usize {
        self.points.len()
    }
}
