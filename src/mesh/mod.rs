//! Half-edge representation of convex cells.
//!
//! Points, half-edges and faces live in flat arenas and refer to each other by index, so the
//! `next`/`pair` cycles need no shared ownership. Two half-edges meet at "the same vertex"
//! only when they carry the same [`PointId`]; coordinates are never compared for identity.

mod clip;
mod face;
mod half_edge;

use std::collections::HashMap;

use crate::error::{VoronoiError, VoronoiResult};
use crate::point::Point;
use crate::polygon::Polygon;

pub use face::Face;
pub use half_edge::{EdgeId, FaceId, HalfEdge, PointId};

/// A closed polyhedral surface.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    points: Vec<Point>,
    edges: Vec<HalfEdge>,
    faces: Vec<Face>,
}

impl Mesh {
    /// Builds a mesh from shared points and faces given as index loops into `points`.
    ///
    /// Each (face, point) occurrence gets its own half-edge; half-edges running in opposite
    /// directions between the same two point indices are paired.
    pub fn build<F: AsRef<[usize]>>(points: &[Point], faces: &[F]) -> VoronoiResult<Mesh> {
        let mut mesh = Mesh {
            points: points.to_vec(),
            edges: Vec::new(),
            faces: Vec::with_capacity(faces.len()),
        };

        let mut loop_ids = Vec::new();
        for (f, indices) in faces.iter().enumerate() {
            let indices = indices.as_ref();
            if indices.len() < 3 {
                return Err(VoronoiError::InvalidFace {
                    face: f,
                    reason: format!("{} vertices, need at least 3", indices.len()),
                });
            }
            loop_ids.clear();
            for &i in indices {
                if i >= points.len() {
                    return Err(VoronoiError::InvalidFace {
                        face: f,
                        reason: format!("point index {} out of range ({} points)", i, points.len()),
                    });
                }
                loop_ids.push(PointId(i));
            }
            mesh.push_face(&loop_ids);
        }
        mesh.pair_edges();
        Ok(mesh)
    }

    /// Appends a face over `vertices` with fresh half-edges threaded into a loop.
    pub(crate) fn push_face(&mut self, vertices: &[PointId]) -> FaceId {
        let face = FaceId(self.faces.len());
        let first = self.edges.len();
        let n = vertices.len();
        for (k, &begin) in vertices.iter().enumerate() {
            self.edges.push(HalfEdge {
                begin,
                next: EdgeId(first + (k + 1) % n),
                pair: None,
                face,
            });
        }
        self.faces.push(Face {
            first: EdgeId(first),
            len: n,
        });
        face
    }

    /// Pairs every unpaired half-edge with the first unpaired half-edge running the other
    /// way between the same two point handles.
    pub(crate) fn pair_edges(&mut self) {
        let mut open: HashMap<(PointId, PointId), EdgeId> = HashMap::new();
        for i in 0..self.edges.len() {
            if self.edges[i].pair.is_some() {
                continue;
            }
            let e = EdgeId(i);
            let begin = self.edges[i].begin;
            let end = self.end(e);
            if let Some(other) = open.remove(&(end, begin)) {
                self.edges[i].pair = Some(other);
                self.edges[other.0].pair = Some(e);
            } else {
                open.entry((begin, end)).or_insert(e);
            }
        }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn edges(&self) -> &[HalfEdge] {
        &self.edges
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    #[inline]
    pub fn point(&self, id: PointId) -> &Point {
        &self.points[id.0]
    }

    #[inline]
    pub fn edge(&self, id: EdgeId) -> &HalfEdge {
        &self.edges[id.0]
    }

    #[inline]
    pub fn face(&self, id: FaceId) -> &Face {
        &self.faces[id.0]
    }

    #[inline]
    pub fn begin(&self, e: EdgeId) -> PointId {
        self.edges[e.0].begin
    }

    /// End point of `e`, i.e. the begin point of its successor.
    #[inline]
    pub fn end(&self, e: EdgeId) -> PointId {
        self.edges[self.edges[e.0].next.0].begin
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    pub fn face_vertices(&self, face: FaceId) -> Vec<PointId> {
        self.faces[face.0].edges(self).map(|e| self.begin(e)).collect()
    }

    pub fn face_polygon(&self, face: FaceId) -> Polygon {
        Polygon::new(
            self.faces[face.0]
                .edges(self)
                .map(|e| *self.point(self.begin(e)))
                .collect(),
        )
    }

    /// `true` when no half-edge is missing its pair.
    pub fn is_closed(&self) -> bool {
        self.edges.iter().all(|he| he.pair.is_some())
    }

    /// Checks `e.pair.pair == e` and that paired half-edges run between the same two points
    /// in opposite directions. Returns the first offending half-edge.
    pub fn check_pairing(&self) -> Result<(), EdgeId> {
        for (i, he) in self.edges.iter().enumerate() {
            let e = EdgeId(i);
            let Some(p) = he.pair else { continue };
            let back = self.edges[p.0].pair;
            if back != Some(e) || self.begin(p) != self.end(e) || self.end(p) != self.begin(e) {
                return Err(e);
            }
        }
        Ok(())
    }

    /// Range of the point coordinates along `axis` (0 = x, 1 = y, 2 = z).
    pub fn extent(&self, axis: usize) -> Option<(f64, f64)> {
        let mut it = self.points.iter().map(|p| p.axis(axis));
        let first = it.next()?;
        Some(it.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }

    /// Enclosed volume, summed over fan-triangulated faces.
    pub fn volume(&self) -> f64 {
        let mut volume = 0.0;
        self.for_each_triangle(|v0, v1, v2| {
            volume += v0.dot(&v1.cross(&v2));
        });
        (volume / 6.0).abs()
    }

    /// Centroid of the enclosed solid, or `None` for an empty or flat mesh.
    pub fn centroid(&self) -> Option<Point> {
        let mut total_volume = 0.0;
        let mut centroid = Point::origin();
        self.for_each_triangle(|v0, v1, v2| {
            let det = v0.dot(&v1.cross(&v2));
            total_volume += det;
            centroid = centroid + (v0 + v1 + v2) * det;
        });

        if total_volume.abs() < 1e-9 {
            return None;
        }
        Some(centroid * (1.0 / (4.0 * total_volume)))
    }

    fn for_each_triangle(&self, mut f: impl FnMut(Point, Point, Point)) {
        for face in &self.faces {
            let ids: Vec<PointId> = face.edges(self).map(|e| self.begin(e)).collect();
            if ids.len() < 3 {
                continue;
            }
            // Use the first vertex of the face as a pivot for fan triangulation
            let v0 = *self.point(ids[0]);
            for w in ids[1..].windows(2) {
                f(v0, *self.point(w[0]), *self.point(w[1]));
            }
        }
    }
}
