use glam::swizzles::*;
use glamour::FromRaw;
use glamour::ToRaw;

use crate::core::types::{Number, Point3, Size3, Vector2, Vector3};
use crate::shared::epsilon::EpsilonTable;
use crate::shared::intersect::Intersection;
use crate::shared::ray::Ray;
use crate::shared::token::SurfaceToken;
use crate::shared::validate;
use crate::surface::{Surface, SurfaceKind};
use getset::CopyGetters;

/// An axis-aligned box surface
#[derive(Copy, Clone, Debug, CopyGetters)]
#[get_copy = "pub"]
pub struct AxisBoxSurface {
    centre: Point3,
    /// Half-extents along each axis
    radius: Vector3,
    inv_radius: Vector3,
    token: SurfaceToken,
}

// region Constructors

impl AxisBoxSurface {
    /// Creates a box from two opposite corners, which do *not* have to be sorted by min/max
    pub fn new(a: impl Into<Point3>, b: impl Into<Point3>) -> Self {
        let (a, b) = (a.into(), b.into());
        let (min, max) = (Point3::min(a, b), Point3::max(a, b));
        let radius = (max - min) / 2.;
        Self {
            centre: min + radius,
            radius,
            inv_radius: radius.recip(),
            token: SurfaceToken::next(),
        }
    }

    pub fn new_centred(centre: impl Into<Point3>, size: impl Into<Size3>) -> Self {
        let (centre, size) = (centre.into(), size.into().to_vector());
        Self::new(centre + size / 2., centre - size / 2.)
    }
}

impl From<(Point3, Point3)> for AxisBoxSurface {
    fn from((a, b): (Point3, Point3)) -> Self { Self::new(a, b) }
}

impl From<[Point3; 2]> for AxisBoxSurface {
    fn from([a, b]: [Point3; 2]) -> Self { Self::new(a, b) }
}

impl From<(Point3, Size3)> for AxisBoxSurface {
    /// Creates a box with the given centre and dimensions
    fn from((centre, size): (Point3, Size3)) -> Self { Self::new_centred(centre, size) }
}

// endregion Constructors

// region Surface Implementation

/// A raw slab-test hit, before the record is written
#[derive(Copy, Clone, Debug)]
struct SlabHit {
    dist: Number,
    /// Unit axis vector pointing against the incident ray
    ray_normal: Vector3,
    /// `+1.` if the ray started outside the box, `-1.` if inside
    winding: Number,
}

impl AxisBoxSurface {
    //noinspection RsLiveness
    fn slab_hit(&self, ray: &Ray, eps: Number) -> Option<SlabHit> {
        /*
        CREDITS:

        Title: "A Ray-Box Intersection Algorithm and Efficient Dynamic Voxel Rendering"
        Authors: Alexander Majercik, Cyril Crassin, Peter Shirley, Morgan McGuire
        URL: <https://jcgt.org/published/0007/03/04/>
        Publisher: Journal of Computer Graphics Techniques (JCGT)
        */

        // Move to the box's reference frame. This is unavoidable and un-optimizable.
        let ro = ray.pos() - self.centre;
        let rd = ray.dir();

        // Winding direction: -1 if the ray starts inside of the box (i.e., and is leaving), +1 if it is starting outside of the box
        let winding = ((ro.abs() * self.inv_radius).max_element() - 1.).signum();

        // We'll use the negated sign of the ray direction in several places, so precompute it.
        let sgn = -rd.signum();

        // Ray-plane intersection. For each pair of planes, choose the one that is front-facing
        // to the ray and compute the distance to it.
        let mut plane_dist = (self.radius * winding * sgn) - ro;
        plane_dist *= ray.inv_dir();

        // Perform all three ray-box tests on each axis.
        // Use a macro to eliminate the redundant code (no efficiency boost from doing so, of course!)
        macro_rules! test {
            // Preserve exactly one element of `sgn`, with the correct sign
            // Also masks the distance by the non-zero axis
            ($u:ident, $vw:ident) => {{
                let dist: Number = plane_dist.$u;
                // Is there a hit on this axis past the noise tolerance?
                if dist > eps {
                    let face_pos = Vector2::from_raw(ro.to_raw().$vw() + (rd.to_raw().$vw() * dist));
                    let radius = Vector2::from_raw(self.radius.to_raw().$vw());
                    // Is that hit within the face of the box?
                    if (face_pos.x.abs() < radius.x) && (face_pos.y.abs() < radius.y) {
                        // Mask the sign to be the normal
                        let ray_normal = Vector3 {
                            $u: sgn.$u,
                            ..Vector3::ZERO
                        };
                        return Some(SlabHit {
                            dist,
                            ray_normal,
                            winding,
                        });
                    }
                }
            }};
        }

        validate::vector3(&plane_dist);
        validate::vector3(&sgn);

        test!(x, yz);
        test!(y, zx);
        test!(z, xy);

        // None of the tests matched, so we didn't hit any sides
        None
    }
}

impl Surface for AxisBoxSurface {
    fn kind(&self) -> SurfaceKind { SurfaceKind::AxisBox }
    fn token(&self) -> SurfaceToken { self.token }

    fn intersect(&self, ray: &Ray, t_min: &mut Number, record: &mut Intersection, epsilons: &EpsilonTable) -> bool {
        let eps = epsilons.for_kind(self.kind());
        let Some(SlabHit {
            dist,
            ray_normal,
            winding,
        }) = self.slab_hit(ray, eps)
        else {
            return false;
        };

        let pos_w = ray.at(dist);
        record.pos_w = pos_w;
        record.pos_l = pos_w - self.centre.to_vector();
        // The outward normal is the ray-facing normal, un-flipped by the winding
        record.normal = ray_normal * winding;
        record.reversed = winding.is_sign_negative();
        *t_min = dist;

        validate::intersection(ray, &*record, dist);
        true
    }

    fn shadows(
        &self,
        ray: &Ray,
        t_min: &mut Number,
        occluder: &mut Option<SurfaceToken>,
        epsilons: &EpsilonTable,
        t_max: Number,
    ) -> bool {
        let eps = epsilons.for_kind(self.kind());
        match self.slab_hit(ray, eps) {
            Some(SlabHit { dist, .. }) if dist < t_max => {
                *t_min = dist;
                *occluder = Some(self.token);
                true
            }
            _ => false,
        }
    }
}

// endregion Surface Implementation
