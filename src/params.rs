//! Engine and sampling parameters.

use crate::error::{VoronoiError, VoronoiResult};

/// Default cap on the number of lattice offsets one outward scan may visit.
pub const DEFAULT_MAX_SCAN_STEPS: usize = 100_000;

/// Parameters held by a [`Voronoi`](crate::Voronoi) engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoronoiParams {
    /// Upper bound on rows, columns or slices visited by a single scan.
    ///
    /// Exceeding it (a resolution far too fine for the cell) is reported as
    /// [`VoronoiError::ScanLimit`] instead of running for an unbounded time.
    pub max_scan_steps: usize,
}

impl Default for VoronoiParams {
    fn default() -> Self {
        Self {
            max_scan_steps: DEFAULT_MAX_SCAN_STEPS,
        }
    }
}

impl VoronoiParams {
    #[must_use]
    pub fn with_max_scan_steps(mut self, steps: usize) -> Self {
        self.max_scan_steps = steps;
        self
    }

    /// Grid parameters for one sampling call at `resolution`.
    pub fn grid(&self, resolution: f64) -> GridParams {
        GridParams {
            resolution,
            max_steps: self.max_scan_steps,
        }
    }
}

/// Lattice spacing and scan bound for one sampling call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridParams {
    /// Distance between neighboring lattice points along each axis.
    pub resolution: f64,
    pub max_steps: usize,
}

impl Default for GridParams {
    fn default() -> Self {
        Self {
            resolution: 1.0,
            max_steps: DEFAULT_MAX_SCAN_STEPS,
        }
    }
}

impl GridParams {
    pub fn new(resolution: f64) -> Self {
        Self {
            resolution,
            ..Default::default()
        }
    }

    /// Checks that the resolution is positive and finite.
    pub fn validate(&self) -> VoronoiResult<()> {
        if self.resolution.is_finite() && self.resolution > 0.0 {
            Ok(())
        } else {
            Err(VoronoiError::InvalidResolution(self.resolution))
        }
    }
}
