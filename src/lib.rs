//! # vorolattice
//!
//! `vorolattice` partitions an axis-aligned box into 3D Voronoi cells and samples each cell on
//! a regular lattice. It is designed to be used in Rust as well as compiled to WebAssembly (WASM).
//!
//! ## Features
//!
//! - **Half-edge cells**: Every cell is a closed half-edge mesh, clipped plane by plane.
//! - **Adjacency and weights**: Cells can be clipped against listed neighbors only, with a
//!   movable plane between each pair of sites.
//! - **Lattice sampling**: Cells are sliced along z and the lattice points inside every slice
//!   are counted or collected, scanning outward from the site.
//! - **WASM-first**: Built with `wasm-bindgen`; cell construction runs in parallel with `rayon`.
//!
//! ## Main Interface
//!
//! The primary entry point is the [`Voronoi`] struct, which owns the sites and their cells.
//!
//! ```
//! use vorolattice::{Point, Voronoi};
//!
//! let mut voronoi = Voronoi::new(0.0, 10.0, 0.0, 10.0, 0.0, 10.0).unwrap();
//! voronoi.add_site(Point::new(2.5, 5.5, 5.5));
//! voronoi.add_site(Point::new(7.5, 5.5, 5.5));
//! voronoi.create_cells(None, None).unwrap();
//!
//! // x in 0.5..=4.5, y and z in 0.5..=9.5
//! assert_eq!(voronoi.count_grids(0, 1.0).unwrap(), 500);
//! ```

mod bounds;
mod error;
mod mesh;
mod params;
mod plane;
mod point;
mod polygon;
mod voronoi;
pub mod wasm;

pub use bounds::BoundingBox;
pub use bounds::HEXAHEDRON_FACES;
pub use error::{VoronoiError, VoronoiResult};
pub use mesh::{EdgeId, Face, FaceId, HalfEdge, Mesh, PointId};
pub use params::{GridParams, VoronoiParams};
pub use plane::{Plane, Side, EPSILON};
pub use point::Point;
pub use polygon::Polygon;
pub use voronoi::Voronoi;
