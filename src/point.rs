use std::ops::{Add, Mul, Neg, Sub};

/// A coordinate (or direction) in 3D space.
///
/// Points are plain values. Inside a [`Mesh`](crate::Mesh) vertices are identified by their
/// [`PointId`](crate::PointId), so two points with equal coordinates are still distinct
/// vertices unless they share a handle.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub const fn origin() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Linear interpolation, `t = 0` gives `a` and `t = 1` gives `b`.
    #[inline]
    pub fn lerp(a: Point, b: Point, t: f64) -> Point {
        Point::new(
            a.x + t * (b.x - a.x),
            a.y + t * (b.y - a.y),
            a.z + t * (b.z - a.z),
        )
    }

    #[inline]
    pub fn dot(&self, other: &Point) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    #[inline]
    pub fn cross(&self, other: &Point) -> Point {
        Point::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.dot(self).sqrt()
    }

    #[inline]
    pub fn distance_sq(&self, other: &Point) -> f64 {
        let d = *self - *other;
        d.dot(&d)
    }

    #[inline]
    pub fn distance(&self, other: &Point) -> f64 {
        self.distance_sq(other).sqrt()
    }

    /// Component by axis index (0 = x, 1 = y, 2 = z).
    #[inline]
    pub fn axis(&self, axis: usize) -> f64 {
        match axis {
            0 => self.x,
            1 => self.y,
            _ => self.z,
        }
    }

    pub fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<[f64; 3]> for Point {
    fn from(p: [f64; 3]) -> Self {
        Point::new(p[0], p[1], p[2])
    }
}

impl From<Point> for [f64; 3] {
    fn from(p: Point) -> Self {
        p.to_array()
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Neg for Point {
    type Output = Point;

    fn neg(self) -> Point {
        Point::new(-self.x, -self.y, -self.z)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, s: f64) -> Point {
        Point::new(self.x * s, self.y * s, self.z * s)
    }
}
