use crate::error::{VoronoiError, VoronoiResult};
use crate::params::GridParams;
use crate::plane::EPSILON;
use crate::point::Point;

/// A closed planar polygon, e.g. the cross-section of a cell.
///
/// Lattice sampling treats the polygon as lying in a plane of constant z and works on its
/// x/y coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    vertices: Vec<Point>,
}

impl Polygon {
    pub fn new(vertices: Vec<Point>) -> Self {
        Self { vertices }
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Area of the projection onto the xy plane.
    pub fn area(&self) -> f64 {
        let n = self.vertices.len();
        let mut twice = 0.0;
        for i in 0..n {
            let a = self.vertices[i];
            let b = self.vertices[(i + 1) % n];
            twice += a.x * b.y - b.x * a.y;
        }
        (twice * 0.5).abs()
    }

    /// Number of lattice points `(cx + i·r, cy + j·r)` inside the polygon.
    pub fn count_grid_points(&self, cx: f64, cy: f64, params: &GridParams) -> VoronoiResult<usize> {
        let mut count = 0;
        self.visit_grid(cx, cy, params, |_, _| count += 1)?;
        Ok(count)
    }

    /// Lattice points `(cx + i·r, cy + j·r)` inside the polygon, at the polygon's z.
    ///
    /// Rows are visited from `cy` outward (`cy`, `cy + r`, `cy - r`, ...), and so are the
    /// points within a row. Each direction stops at its first row or column without a point.
    pub fn grid_points(&self, cx: f64, cy: f64, params: &GridParams) -> VoronoiResult<Vec<Point>> {
        let z = self.vertices.first().map_or(0.0, |p| p.z);
        let mut points = Vec::new();
        self.visit_grid(cx, cy, params, |x, y| points.push(Point::new(x, y, z)))?;
        Ok(points)
    }

    fn visit_grid(
        &self,
        cx: f64,
        cy: f64,
        params: &GridParams,
        mut visit: impl FnMut(f64, f64),
    ) -> VoronoiResult<()> {
        params.validate()?;
        let r = params.resolution;

        scan_outward(params.max_steps, |j| {
            let y = cy + j as f64 * r;
            let Some((x0, x1)) = self.row_span(y) else {
                return Ok(0);
            };
            let mut found = 0;
            scan_outward(params.max_steps, |i| {
                let x = cx + i as f64 * r;
                if x0 < x && x < x1 {
                    visit(x, y);
                    found += 1;
                    Ok(1)
                } else {
                    Ok(0)
                }
            })?;
            Ok(found)
        })
    }

    /// The interval where the horizontal line at `y` is inside the polygon.
    ///
    /// `None` unless the line meets the boundary at exactly two distinct x values.
    fn row_span(&self, y: f64) -> Option<(f64, f64)> {
        let xs = self.row_intersections(y);
        match xs[..] {
            [x0, x1] => Some((x0, x1)),
            _ => None,
        }
    }

    /// Sorted x values where the boundary meets the line at `y`, merged within `EPSILON`.
    fn row_intersections(&self, y: f64) -> Vec<f64> {
        let n = self.vertices.len();
        let mut xs = Vec::with_capacity(4);
        for i in 0..n {
            let v0 = self.vertices[i];
            let v1 = self.vertices[(i + 1) % n];
            if y < v0.y.min(v1.y) || v0.y.max(v1.y) < y {
                continue;
            }
            let dy = v1.y - v0.y;
            if dy.abs() < EPSILON {
                // Horizontal edge: both ends, no division
                xs.push(v0.x);
                xs.push(v1.x);
            } else {
                xs.push(v0.x + (y - v0.y) * (v1.x - v0.x) / dy);
            }
        }
        xs.sort_by(f64::total_cmp);
        xs.dedup_by(|a, b| (*a - *b).abs() < EPSILON);
        xs
    }
}

/// Visits the offsets `0, 1, -1, 2, -2, ...` for as long as they yield something.
///
/// `visit` returns how many items the offset produced. Offset 0 is always visited; after it,
/// the positive and the negative direction each stop at their first offset that yields
/// nothing. Fails with [`VoronoiError::ScanLimit`] once a direction passes `max_steps`
/// offsets, which only happens for a resolution far too fine for the region.
pub(crate) fn scan_outward(
    max_steps: usize,
    mut visit: impl FnMut(i64) -> VoronoiResult<usize>,
) -> VoronoiResult<()> {
    visit(0)?;
    let mut up = true;
    let mut down = true;
    let mut k = 1;
    while up || down {
        if k > max_steps {
            return Err(VoronoiError::ScanLimit {
                steps: k,
                limit: max_steps,
            });
        }
        let step = k as i64;
        if up && visit(step)? == 0 {
            up = false;
        }
        if down && visit(-step)? == 0 {
            down = false;
        }
        k += 1;
    }
    Ok(())
}
