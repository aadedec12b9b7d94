//! Error types for partition construction and lattice sampling.
//!
//! Only programming errors at the call boundary are reported here. Degenerate geometry
//! (parallel segments, coincident sites, planes that miss a cell) is an expected outcome
//! of convex clipping and is expressed as `None` or a no-op instead.

use thiserror::Error;

/// Errors raised by the Voronoi engine and the mesh builder.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum VoronoiError {
    /// The bounding box is empty, inverted or not finite.
    #[error("Invalid bounds: [{x0}, {x1}] x [{y0}, {y1}] x [{z0}, {z1}]")]
    InvalidBounds {
        x0: f64,
        x1: f64,
        y0: f64,
        y1: f64,
        z0: f64,
        z1: f64,
    },

    /// A face index group references a missing point or has fewer than 3 entries.
    #[error("Invalid face {face}: {reason}")]
    InvalidFace { face: usize, reason: String },

    /// Grid queries were issued before `create_cells`, or sites changed since.
    #[error("Cells have not been created for the current sites ({sites} sites, {cells} cells)")]
    CellsNotCreated { sites: usize, cells: usize },

    /// A site index is outside the site list.
    #[error("Site index {index} out of range (site count {count})")]
    SiteOutOfRange { index: usize, count: usize },

    /// The adjacency table does not have one row per site.
    #[error("Adjacency table has {found} rows, expected {expected}")]
    AdjacencyLength { expected: usize, found: usize },

    /// An adjacency row lists an invalid neighbor.
    #[error("Site {site} lists invalid neighbor {neighbor}")]
    NeighborOutOfRange { site: usize, neighbor: usize },

    /// The weight table does not have one row per site.
    #[error("Weight table has {found} rows, expected {expected}")]
    WeightTableLength { expected: usize, found: usize },

    /// A weight row does not match the adjacency row it belongs to.
    #[error("Weight row {site} has {found} entries, expected {expected}")]
    WeightLength {
        site: usize,
        expected: usize,
        found: usize,
    },

    /// A weight is outside `[0, 1]`.
    #[error("Weight {weight} of site {site} is outside [0, 1]")]
    WeightOutOfRange { site: usize, weight: f64 },

    /// Weights only make sense along an adjacency table.
    #[error("Weight table given without an adjacency table")]
    WeightsWithoutAdjacency,

    /// Lattice spacing must be positive and finite.
    #[error("Invalid resolution: {0} (must be > 0)")]
    InvalidResolution(f64),

    /// An outward scan would exceed the configured step limit.
    #[error("Scan needs {steps} steps, limit is {limit}")]
    ScanLimit { steps: usize, limit: usize },
}

/// Result type for partition and sampling operations.
pub type VoronoiResult<T> = std::result::Result<T, VoronoiError>;
