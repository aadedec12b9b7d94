use crate::error::{VoronoiError, VoronoiResult};
use crate::point::Point;

/// Face index table of the bounding hexahedron, indexing into [`BoundingBox::corners`].
/// All faces share one winding: their right-hand normals point into the box.
pub const HEXAHEDRON_FACES: [[usize; 4]; 6] = [
    [0, 1, 2, 3], // Back (y+)
    [1, 0, 4, 5], // Top (z+)
    [0, 3, 7, 4], // Right (x+)
    [2, 1, 5, 6], // Left (x-)
    [5, 4, 7, 6], // Front (y-)
    [3, 2, 6, 7], // Bottom (z-)
];

/// Axis-aligned box that every cell starts from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
    pub min_z: f64,
    pub max_z: f64,
}

impl BoundingBox {
    /// Creates a box from its extent along each axis.
    ///
    /// Every range must be finite and non-empty (`x0 < x1`, `y0 < y1`, `z0 < z1`).
    pub fn new(x0: f64, x1: f64, y0: f64, y1: f64, z0: f64, z1: f64) -> VoronoiResult<Self> {
        let valid = [x0, x1, y0, y1, z0, z1].iter().all(|v| v.is_finite())
            && x0 < x1
            && y0 < y1
            && z0 < z1;
        if !valid {
            return Err(VoronoiError::InvalidBounds { x0, x1, y0, y1, z0, z1 });
        }
        Ok(Self {
            min_x: x0,
            max_x: x1,
            min_y: y0,
            max_y: y1,
            min_z: z0,
            max_z: z1,
        })
    }

    /// The 8 corners in the order [`HEXAHEDRON_FACES`] refers to.
    pub fn corners(&self) -> [Point; 8] {
        let (x0, x1) = (self.min_x, self.max_x);
        let (y0, y1) = (self.min_y, self.max_y);
        let (z0, z1) = (self.min_z, self.max_z);
        [
            Point::new(x1, y1, z1), // 0
            Point::new(x0, y1, z1), // 1
            Point::new(x0, y1, z0), // 2
            Point::new(x1, y1, z0), // 3
            Point::new(x1, y0, z1), // 4
            Point::new(x0, y0, z1), // 5
            Point::new(x0, y0, z0), // 6
            Point::new(x1, y0, z0), // 7
        ]
    }

    pub fn contains(&self, p: &Point) -> bool {
        p.x >= self.min_x
            && p.x <= self.max_x
            && p.y >= self.min_y
            && p.y <= self.max_y
            && p.z >= self.min_z
            && p.z <= self.max_z
    }

    pub fn volume(&self) -> f64 {
        (self.max_x - self.min_x) * (self.max_y - self.min_y) * (self.max_z - self.min_z)
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min_x + self.max_x) * 0.5,
            (self.min_y + self.max_y) * 0.5,
            (self.min_z + self.max_z) * 0.5,
        )
    }
}
