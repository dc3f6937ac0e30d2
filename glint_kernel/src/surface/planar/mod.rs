//! This module is not a surface module per-se, but a helper module that provides
//! abstractions for planar types (planes, disks, rectangles, triangles).
//!
//! Store an instance of [Planar] inside your surface struct, and then validate the edge
//! coordinates of the planar intersection for whichever shape you need.

use crate::core::types::{Number, Point3, Vector3};
use crate::shared::intersect::Intersection;
use crate::shared::ray::Ray;
use getset::CopyGetters;
use num_traits::Zero;

pub mod disk;
pub mod plane;
pub mod rectangle;
pub mod triangle;

/// A helper struct that is used in planar surfaces (surfaces that exist in a subsection of
/// a 2D plane).
///
/// Use this for calculating the ray-plane intersection, instead of reimplementing it for
/// each type; restrict the shape by validating the `alpha`/`beta` edge coordinates of the
/// returned [PlanarHit].
#[derive(Copy, Clone, Debug, CopyGetters)]
#[get_copy = "pub"]
pub struct Planar {
    p: Point3,
    /// The vector for the `U` direction, typically the 'right' direction
    u: Vector3,
    /// The vector for the `V` direction, typically the 'up' direction
    v: Vector3,
    /// The normal vector for the plane, perpendicular to [u](field@Self::u) and
    /// [v](field@Self::v), and normalised
    n: Vector3,
    /// Part of the plane equation
    d: Number,
    /// Precalculated vector `n / dot(n, cross(u,v))` (using un-normalised `n`), used to
    /// recover the edge coordinates of a hit
    w: Vector3,
}

// region Constructors

impl Planar {
    /// Creates a plane from the origin point `p`, and the two side vectors `u`, `v`
    ///
    /// # Panics
    /// `u` and `v` must not be parallel (their cross product must be non-zero), since the
    /// plane normal is derived from it
    pub fn new(p: impl Into<Point3>, u: impl Into<Vector3>, v: impl Into<Vector3>) -> Self {
        let (p, u, v) = (p.into(), u.into(), v.into());

        let n_raw = Vector3::cross(u, v);
        let n = n_raw
            .try_normalize()
            .expect("couldn't normalise plane normal: cross(u, v) == 0");
        let d = -Vector3::dot(n, p.to_vector());
        // NOTE: using non-normalised normal here
        let w = n_raw / n_raw.length_squared();
        Self { p, u, v, n, d, w }
    }

    /// Creates a [Planar] from three points on the surface: `b` is the origin corner, and
    /// `a`/`c` are the corners along the two edges
    pub fn new_points(a: impl Into<Point3>, b: impl Into<Point3>, c: impl Into<Point3>) -> Self {
        let (a, b, c) = (a.into(), b.into(), c.into());
        Self::new(b, a - b, c - b)
    }
}

/// Create from three point array
impl<P: Into<Point3>> From<[P; 3]> for Planar {
    fn from([p, a, b]: [P; 3]) -> Self { Self::new_points(p, a, b) }
}
/// Create from three point tuple
impl<P: Into<Point3>, A: Into<Point3>, B: Into<Point3>> From<(P, A, B)> for Planar {
    fn from((p, a, b): (P, A, B)) -> Self { Self::new_points(p, a, b) }
}

// endregion

// region Intersection

/// A raw ray-plane intersection, before any shape-specific edge validation
#[derive(Copy, Clone, Debug)]
pub struct PlanarHit {
    /// Distance along the ray
    pub dist: Number,
    pub pos_w: Point3,
    /// Hit position relative to the plane origin [Planar::p]
    pub pos_l: Vector3,
    /// Coordinate of the hit along [Planar::u], in units of `u` (`1.0` is the far edge)
    pub alpha: Number,
    /// Coordinate of the hit along [Planar::v], in units of `v`
    pub beta: Number,
    /// True when the ray struck the back face (travelling with the normal)
    pub reversed: bool,
}

impl Planar {
    /// Does a ray-plane intersection check, rejecting distances at or below `eps`.
    ///
    /// A [None] means the ray is perfectly parallel to the plane, or the hit distance was
    /// within the noise tolerance.
    #[inline(always)]
    pub fn hit(&self, ray: &Ray, eps: Number) -> Option<PlanarHit> {
        let denominator = Vector3::dot(self.n, ray.dir());

        // Ray is parallel to plane
        if denominator.is_zero() {
            return None;
        }

        let t = -(Vector3::dot(self.n, ray.pos().to_vector()) + self.d) / denominator;

        if t <= eps {
            return None;
        }

        let pos_w = ray.at(t);
        let pos_l = pos_w - self.p;

        // We would normally project so the point is `P = P_local + α*u + β*v`
        // But since the vectors `u, v` don't have to be orthogonal, have to account for that too
        let alpha = Vector3::dot(self.w, Vector3::cross(pos_l, self.v));
        let beta = Vector3::dot(self.w, Vector3::cross(self.u, pos_l));

        Some(PlanarHit {
            dist: t,
            pos_w,
            pos_l,
            alpha,
            beta,
            // Positive => ray and normal same dir => must be behind plane => backface
            reversed: denominator.is_sign_positive(),
        })
    }

    /// Writes `hit` into `record` using this plane's fixed normal
    pub fn write_record(&self, hit: &PlanarHit, record: &mut Intersection) {
        record.pos_w = hit.pos_w;
        record.pos_l = hit.pos_l.to_point();
        record.normal = self.n;
        record.reversed = hit.reversed;
    }
}

// endregion
