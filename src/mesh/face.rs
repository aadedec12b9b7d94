use super::half_edge::{EdgeId, PointId};
use super::Mesh;
use crate::plane::{Crossings, Side};

/// A closed loop of at least 3 half-edges.
///
/// Topology is fixed once the face is created; a clip replaces faces, it never edits one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Face {
    pub(crate) first: EdgeId,
    pub(crate) len: usize,
}

/// Vertex of a clipped face: either a surviving mesh point or a crossing slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum ClipVertex {
    Kept(PointId),
    Crossing(usize),
}

impl Face {
    pub fn first(&self) -> EdgeId {
        self.first
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Walks the loop starting at `first`.
    pub(crate) fn edges<'a>(&self, mesh: &'a Mesh) -> FaceEdges<'a> {
        FaceEdges {
            mesh,
            first: self.first,
            current: Some(self.first),
            remaining: self.len,
        }
    }

    /// Ordered vertices of this face after clipping to the side `reference`.
    ///
    /// Begin points on the retained side (or on the plane) are kept, and the crossing of each
    /// edge that cuts the plane follows right after the edge's begin slot. Two or fewer
    /// vertices mean the face is clipped away.
    pub(crate) fn vertices_of(
        &self,
        mesh: &Mesh,
        reference: Side,
        sides: &[Side],
        crossings: &Crossings,
    ) -> Vec<ClipVertex> {
        let mut out = Vec::with_capacity(self.len + 2);
        for e in self.edges(mesh) {
            let begin = mesh.edge(e).begin;
            if sides[begin.0].retained_by(reference) {
                out.push(ClipVertex::Kept(begin));
            }
            if let Some(slot) = crossings.slot(e) {
                out.push(ClipVertex::Crossing(slot));
            }
        }
        out
    }
}

/// Iterator over the half-edges of one face, bounded by the face length.
pub(crate) struct FaceEdges<'a> {
    mesh: &'a Mesh,
    first: EdgeId,
    current: Option<EdgeId>,
    remaining: usize,
}

impl Iterator for FaceEdges<'_> {
    type Item = EdgeId;

    fn next(&mut self) -> Option<EdgeId> {
        if self.remaining == 0 {
            return None;
        }
        let e = self.current?;
        self.remaining -= 1;
        let next = self.mesh.edge(e).next;
        self.current = if next == self.first { None } else { Some(next) };
        Some(e)
    }
}
