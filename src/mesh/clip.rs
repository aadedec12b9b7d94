//! Plane clipping and cross-sections.
//!
//! Both operations share one pass: every face is reduced to its part on the retained side,
//! the surviving faces are rebuilt from fresh half-edges and re-paired, and the half-edges
//! left without a pair trace the boundary of the cut. A clip closes that boundary with a cap
//! face; a cross-section returns the cap outline as a polygon.

use tracing::warn;

use super::face::ClipVertex;
use super::half_edge::{EdgeId, PointId};
use super::Mesh;
use crate::plane::{Plane, Side};
use crate::point::Point;
use crate::polygon::Polygon;

enum ClipOutcome {
    /// Nothing lies strictly on the discarded side.
    Unchanged,
    /// Nothing lies strictly on the retained side.
    Empty,
    Clipped(Clipped),
}

/// Faces on the retained side, plus the half-edges that lost their pair along the cut.
struct Clipped {
    mesh: Mesh,
    boundary: Vec<EdgeId>,
}

impl Mesh {
    /// Returns this mesh clipped to the half-space of `plane` that contains `site`.
    ///
    /// The result is a new mesh: retained points are carried over, each cut edge contributes
    /// one new crossing point, and the opening is closed by a cap face wound against the cut
    /// boundary. If `site` lies on the plane, or no point lies strictly on the far side,
    /// the mesh is returned unchanged. If no point lies strictly on the site's side the
    /// result is empty.
    pub fn clip(&self, plane: &Plane, site: &Point) -> Mesh {
        let reference = plane.side(site);
        if reference == Side::On {
            return self.clone();
        }
        let clipped = match self.clip_faces(plane, reference) {
            ClipOutcome::Unchanged => return self.clone(),
            ClipOutcome::Empty => return Mesh::default(),
            ClipOutcome::Clipped(clipped) => clipped,
        };
        let Clipped { mut mesh, boundary } = clipped;
        if boundary.is_empty() {
            return mesh;
        }

        let Some(ring) = trace_cap(&mesh, &boundary) else {
            warn!(
                boundary = boundary.len(),
                "Cut boundary does not close into a single loop, keeping the cell unchanged"
            );
            return self.clone();
        };

        // The cap runs against the boundary: its edge for ring[k] goes end -> begin.
        let cap: Vec<PointId> = ring.iter().rev().map(|&e| mesh.end(e)).collect();
        let face = mesh.push_face(&cap);
        let first = mesh.face(face).first.0;
        for (j, &he) in ring.iter().rev().enumerate() {
            let c = EdgeId(first + j);
            mesh.edges[c.0].pair = Some(he);
            mesh.edges[he.0].pair = Some(c);
        }
        mesh
    }

    /// Clips this mesh in place, see [`Mesh::clip`].
    pub fn split(&mut self, plane: &Plane, site: &Point) {
        *self = self.clip(plane, site);
    }

    /// Outline of the intersection of this mesh with the plane through `origin` perpendicular
    /// to `normal`.
    ///
    /// `None` if the plane misses the mesh (or only touches it), or if `origin + normal`
    /// lies on the plane so that no side can be told apart.
    pub fn cross_section(&self, origin: Point, normal: Point) -> Option<Polygon> {
        let plane = Plane::new(origin, normal)?;
        let reference = plane.side(&(origin + normal));
        if reference == Side::On {
            return None;
        }
        let ClipOutcome::Clipped(clipped) = self.clip_faces(&plane, reference) else {
            return None;
        };
        let ring = trace_cap(&clipped.mesh, &clipped.boundary)?;
        if ring.len() < 3 {
            return None;
        }
        Some(Polygon::new(
            ring.iter()
                .rev()
                .map(|&e| *clipped.mesh.point(clipped.mesh.end(e)))
                .collect(),
        ))
    }

    fn clip_faces(&self, plane: &Plane, reference: Side) -> ClipOutcome {
        let sides = plane.sides(&self.points);
        if !sides.iter().any(|s| s.opposes(reference)) {
            return ClipOutcome::Unchanged;
        }
        if !sides.iter().any(|&s| s == reference) {
            return ClipOutcome::Empty;
        }
        let crossings = plane.edge_intersections(self, &sides);

        let mut out = Mesh::default();
        let mut kept: Vec<Option<PointId>> = vec![None; self.points.len()];
        let mut cut: Vec<Option<PointId>> = vec![None; crossings.len()];
        let mut loop_ids = Vec::new();

        for face in &self.faces {
            let vertices = face.vertices_of(self, reference, &sides, &crossings);
            if vertices.len() < 3 {
                continue;
            }
            loop_ids.clear();
            for v in vertices {
                let id = match v {
                    ClipVertex::Kept(p) => {
                        *kept[p.0].get_or_insert_with(|| out.add_point(self.points[p.0]))
                    }
                    ClipVertex::Crossing(s) => {
                        *cut[s].get_or_insert_with(|| out.add_point(crossings.point(s)))
                    }
                };
                loop_ids.push(id);
            }
            out.push_face(&loop_ids);
        }
        out.pair_edges();

        let boundary = out
            .edges
            .iter()
            .enumerate()
            .filter(|(_, he)| he.pair.is_none())
            .map(|(i, _)| EdgeId(i))
            .collect();
        ClipOutcome::Clipped(Clipped { mesh: out, boundary })
    }

    fn add_point(&mut self, p: Point) -> PointId {
        self.points.push(p);
        PointId(self.points.len() - 1)
    }
}

/// Orders the unpaired half-edges into one loop.
///
/// From a boundary half-edge, the next one starts at its end point: rotate around that point
/// (`next`, then across `pair`, then `next`) until a boundary half-edge is reached. `None` if
/// the walk breaks off or the boundary is not a single loop.
fn trace_cap(mesh: &Mesh, boundary: &[EdgeId]) -> Option<Vec<EdgeId>> {
    let start = *boundary.first()?;
    let mut on_boundary = vec![false; mesh.edges.len()];
    for &e in boundary {
        on_boundary[e.0] = true;
    }

    let mut ring = Vec::with_capacity(boundary.len());
    let mut he = start;
    loop {
        ring.push(he);
        if ring.len() > boundary.len() {
            return None;
        }
        let mut next = mesh.edge(he).next;
        let mut hops = 0;
        while !on_boundary[next.0] {
            let pair = mesh.edge(next).pair?;
            next = mesh.edge(pair).next;
            hops += 1;
            if hops > mesh.edges.len() {
                return None;
            }
        }
        if next == start {
            break;
        }
        he = next;
    }

    if ring.len() == boundary.len() {
        Some(ring)
    } else {
        None
    }
}
