use std::fmt;

macro_rules! id {
    ($name:ident) => {
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub usize);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

// Handles into the arenas of a single `Mesh`. Vertex identity is handle equality.
id!(PointId);
id!(EdgeId);
id!(FaceId);

/// A directed edge owned by one face.
///
/// The end point is not stored: it is the begin point of `next`.
#[derive(Clone, Debug, PartialEq)]
pub struct HalfEdge {
    pub begin: PointId,
    /// The following half-edge around `face`.
    pub next: EdgeId,
    /// The opposite half-edge of the same undirected edge, once paired.
    pub pair: Option<EdgeId>,
    pub face: FaceId,
}
