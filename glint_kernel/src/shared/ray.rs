use crate::core::types::{Number, Point3, Vector3};
use getset::CopyGetters;

#[derive(Copy, Clone, PartialEq, Debug, CopyGetters)]
#[get_copy = "pub"]
pub struct Ray {
    /// World-space coordinate of the ray
    pos: Point3,
    /// Direction vector of the ray.
    ///
    /// Does not have to be normalised; every intersection formula in the kernel accepts a
    /// general direction. Callers that want the unit-length policy should use
    /// [Ray::new_normalised].
    dir: Vector3,
    /// Per-component reciprocal of the direction, precomputed at construction.
    ///
    /// Zero direction components give infinities here, which behave correctly in the
    /// slab comparisons that consume this.
    inv_dir: Vector3,
}

impl Ray {
    pub fn new(pos: impl Into<Point3>, dir: impl Into<Vector3>) -> Self {
        let (pos, dir) = (pos.into(), dir.into());
        Self {
            pos,
            dir,
            inv_dir: dir.recip(),
        }
    }

    /// Creates a new ray, normalising the direction vector
    pub fn new_normalised(pos: impl Into<Point3>, dir: impl Into<Vector3>) -> Self {
        Self::new(pos.into(), dir.into().normalize())
    }

    /// Gets the position at a given distance along the ray
    ///
    /// `pos + (t * dir)`
    pub fn at(&self, t: Number) -> Point3 { self.pos + (self.dir * t) }

    /// Re-aims the ray at a new origin and direction, refreshing the cached reciprocal.
    /// Useful for pooled rays that get reused across many traces.
    pub fn set(&mut self, pos: impl Into<Point3>, dir: impl Into<Vector3>) { *self = Self::new(pos, dir); }
}
