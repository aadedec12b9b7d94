use crate::bounds::{BoundingBox, HEXAHEDRON_FACES};
use crate::error::{VoronoiError, VoronoiResult};
use crate::mesh::Mesh;
use crate::params::{GridParams, VoronoiParams};
use crate::plane::Plane;
use crate::point::Point;
use crate::polygon::{scan_outward, Polygon};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use tracing::{debug, info, trace};

/// A Voronoi partition of an axis-aligned box, discretized on demand onto a regular lattice.
///
/// Sites are added first, then [`Voronoi::create_cells`] clips one copy of the box per site
/// against the bisector planes of its neighbors. Lattice queries slice a cell along z and
/// count (or collect) the lattice points inside each slice.
#[derive(Clone, Debug)]
pub struct Voronoi {
    bounds: BoundingBox,
    params: VoronoiParams,
    sites: Vec<Point>,
    cells: Vec<Mesh>,
}

/// Which sites each cell is clipped against.
#[derive(Clone, Copy, Debug)]
enum Neighbors<'a> {
    /// Every other site, with plain bisectors.
    All,
    Adjacent(&'a [Vec<usize>]),
    Weighted(&'a [Vec<usize>], &'a [Vec<f64>]),
}

impl<'a> Neighbors<'a> {
    /// Validates the optional tables against `count` sites.
    fn new(
        count: usize,
        adjacency: Option<&'a [Vec<usize>]>,
        weights: Option<&'a [Vec<f64>]>,
    ) -> VoronoiResult<Self> {
        let adjacency = match (adjacency, weights) {
            (None, None) => return Ok(Neighbors::All),
            (None, Some(_)) => return Err(VoronoiError::WeightsWithoutAdjacency),
            (Some(adjacency), _) => adjacency,
        };

        if adjacency.len() != count {
            return Err(VoronoiError::AdjacencyLength {
                expected: count,
                found: adjacency.len(),
            });
        }
        for (site, row) in adjacency.iter().enumerate() {
            if let Some(&neighbor) = row.iter().find(|&&j| j >= count || j == site) {
                return Err(VoronoiError::NeighborOutOfRange { site, neighbor });
            }
        }

        let Some(weights) = weights else {
            return Ok(Neighbors::Adjacent(adjacency));
        };
        if weights.len() != count {
            return Err(VoronoiError::WeightTableLength {
                expected: count,
                found: weights.len(),
            });
        }
        for (site, (row, w)) in adjacency.iter().zip(weights).enumerate() {
            if row.len() != w.len() {
                return Err(VoronoiError::WeightLength {
                    site,
                    expected: row.len(),
                    found: w.len(),
                });
            }
            if let Some(&weight) = w.iter().find(|w| !(0.0..=1.0).contains(*w)) {
                return Err(VoronoiError::WeightOutOfRange { site, weight });
            }
        }
        Ok(Neighbors::Weighted(adjacency, weights))
    }

    /// `(neighbor, weight)` pairs for site `i`.
    fn of(&self, i: usize, count: usize) -> Vec<(usize, f64)> {
        match *self {
            Neighbors::All => (0..count).filter(|&j| j != i).map(|j| (j, 0.5)).collect(),
            Neighbors::Adjacent(adjacency) => adjacency[i].iter().map(|&j| (j, 0.5)).collect(),
            Neighbors::Weighted(adjacency, weights) => adjacency[i]
                .iter()
                .copied()
                .zip(weights[i].iter().copied())
                .collect(),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Neighbors::All => "all",
            Neighbors::Adjacent(_) => "adjacent",
            Neighbors::Weighted(..) => "weighted",
        }
    }
}

impl Voronoi {
    /// Creates an engine over the box `[x0, x1] x [y0, y1] x [z0, z1]`.
    pub fn new(x0: f64, x1: f64, y0: f64, y1: f64, z0: f64, z1: f64) -> VoronoiResult<Self> {
        Ok(Self::from_bounds(BoundingBox::new(x0, x1, y0, y1, z0, z1)?))
    }

    pub fn from_bounds(bounds: BoundingBox) -> Self {
        Self {
            bounds,
            params: VoronoiParams::default(),
            sites: Vec::new(),
            cells: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_params(mut self, params: VoronoiParams) -> Self {
        self.params = params;
        self
    }

    pub fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }

    pub fn params(&self) -> &VoronoiParams {
        &self.params
    }

    /// Appends a site. Cells built earlier no longer match and must be created again.
    pub fn add_site(&mut self, site: Point) {
        self.sites.push(site);
    }

    /// Removes all sites and cells.
    pub fn clear_sites(&mut self) {
        self.sites.clear();
        self.cells.clear();
    }

    /// Replaces the sites with `count` uniformly random points inside the bounds.
    pub fn random_sites(&mut self, count: usize) {
        let mut rng = StdRng::seed_from_u64(get_seed());
        let b = &self.bounds;
        let w = b.max_x - b.min_x;
        let h = b.max_y - b.min_y;
        let d = b.max_z - b.min_z;

        let sites = (0..count)
            .map(|_| {
                Point::new(
                    b.min_x + rng.r#gen::<f64>() * w,
                    b.min_y + rng.r#gen::<f64>() * h,
                    b.min_z + rng.r#gen::<f64>() * d,
                )
            })
            .collect();
        self.sites = sites;
        self.cells.clear();
    }

    pub fn sites(&self) -> &[Point] {
        &self.sites
    }

    pub fn site(&self, index: usize) -> VoronoiResult<Point> {
        self.sites
            .get(index)
            .copied()
            .ok_or(VoronoiError::SiteOutOfRange {
                index,
                count: self.sites.len(),
            })
    }

    pub fn count_sites(&self) -> usize {
        self.sites.len()
    }

    pub fn count_cells(&self) -> usize {
        self.cells.len()
    }

    pub fn cells(&self) -> &[Mesh] {
        &self.cells
    }

    /// The cell of site `index`, once cells exist for the current sites.
    pub fn cell(&self, index: usize) -> VoronoiResult<&Mesh> {
        self.site(index)?;
        self.ensure_cells()?;
        Ok(&self.cells[index])
    }

    fn ensure_cells(&self) -> VoronoiResult<()> {
        if self.cells.len() == self.sites.len() {
            Ok(())
        } else {
            Err(VoronoiError::CellsNotCreated {
                sites: self.sites.len(),
                cells: self.cells.len(),
            })
        }
    }

    /// Builds one cell per site, replacing any earlier cells.
    ///
    /// Without tables every cell is clipped against the bisector of every other site. With an
    /// `adjacency` table, site `i` is clipped only against the sites in `adjacency[i]`. With
    /// `weights` as well, the plane between `s0` and its neighbor `s1` passes through
    /// `s0 * (1 - w) + s1 * w` instead of the midpoint; `w = 0.5` gives the plain bisector.
    /// Coincident sites produce no plane and are skipped.
    pub fn create_cells(
        &mut self,
        adjacency: Option<&[Vec<usize>]>,
        weights: Option<&[Vec<f64>]>,
    ) -> VoronoiResult<()> {
        let count = self.sites.len();
        let neighbors = Neighbors::new(count, adjacency, weights)?;
        info!(sites = count, neighbors = neighbors.name(), "Creating cells");

        let template = Mesh::build(&self.bounds.corners(), &HEXAHEDRON_FACES)?;
        let sites = &self.sites;
        self.cells = (0..count)
            .into_par_iter()
            .map(|i| {
                let s0 = sites[i];
                let mut cell = template.clone();
                for (j, w) in neighbors.of(i, count) {
                    let s1 = sites[j];
                    let Some(plane) = Plane::new(Point::lerp(s0, s1, w), s0 - s1) else {
                        trace!(site = i, neighbor = j, "Coincident sites, no bisector");
                        continue;
                    };
                    cell.split(&plane, &s0);
                    if cell.is_empty() {
                        break;
                    }
                }
                cell
            })
            .collect();

        info!(cells = self.cells.len(), "Created cells");
        Ok(())
    }

    /// Number of lattice points inside the cell of site `index`.
    ///
    /// The lattice is `site + (i, j, k) * resolution`, scanned outward from the site. Slices,
    /// rows and columns each stop at the first step in a direction that finds no point, so a
    /// site far outside its own cell counts nothing.
    pub fn count_grids(&self, index: usize, resolution: f64) -> VoronoiResult<usize> {
        let mut count = 0;
        self.visit_slices(index, resolution, |section, site, grid| {
            let found = section.count_grid_points(site.x, site.y, grid)?;
            count += found;
            Ok(found)
        })?;
        debug!(index, resolution, count, "Counted cell lattice");
        Ok(count)
    }

    /// The lattice points counted by [`Voronoi::count_grids`], slice by slice from the site's
    /// z outward.
    pub fn get_grids(&self, index: usize, resolution: f64) -> VoronoiResult<Vec<Point>> {
        let mut points = Vec::new();
        self.visit_slices(index, resolution, |section, site, grid| {
            let found = section.grid_points(site.x, site.y, grid)?;
            let n = found.len();
            points.extend(found);
            Ok(n)
        })?;
        Ok(points)
    }

    /// Sum of [`Voronoi::count_grids`] over all cells, computed in parallel.
    pub fn count_all_grids(&self, resolution: f64) -> VoronoiResult<usize> {
        self.ensure_cells()?;
        (0..self.sites.len())
            .into_par_iter()
            .map(|i| self.count_grids(i, resolution))
            .sum()
    }

    /// Calls `visit` on the cross-section at `site.z + k * resolution` for `k = 0, 1, -1, ...`.
    /// A direction ends at the first slice that misses the cell or holds no lattice point.
    fn visit_slices(
        &self,
        index: usize,
        resolution: f64,
        mut visit: impl FnMut(&Polygon, &Point, &GridParams) -> VoronoiResult<usize>,
    ) -> VoronoiResult<()> {
        let grid = self.params.grid(resolution);
        grid.validate()?;
        let cell = self.cell(index)?;
        let site = self.sites[index];

        let up = Point::new(0.0, 0.0, 1.0);
        scan_outward(grid.max_steps, |k| {
            let z = site.z + k as f64 * grid.resolution;
            match cell.cross_section(Point::new(0.0, 0.0, z), up) {
                Some(section) => visit(&section, &site, &grid),
                None => Ok(0),
            }
        })
    }

    /// Moves every site to the centroid of its cell (Lloyd relaxation).
    ///
    /// Sites with an empty cell stay in place. The cells are dropped afterwards and must be
    /// created again.
    pub fn relax(&mut self) -> VoronoiResult<()> {
        self.ensure_cells()?;
        let moved: Vec<Point> = self
            .cells
            .par_iter()
            .zip(self.sites.par_iter())
            .map(|(cell, site)| cell.centroid().unwrap_or(*site))
            .collect();

        let shift = moved
            .iter()
            .zip(&self.sites)
            .map(|(a, b)| a.distance(b))
            .fold(0.0, f64::max);
        debug!(sites = moved.len(), max_shift = shift, "Relaxed sites");

        self.sites = moved;
        self.cells.clear();
        Ok(())
    }
}

fn get_seed() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        (js_sys::Math::random() * 4294967296.0) as u64
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        123456789 // Fixed seed for tests
    }
}
