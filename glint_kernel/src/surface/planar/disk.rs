use crate::core::types::{Number, Point3, Vector3};
use crate::shared::epsilon::EpsilonTable;
use crate::shared::intersect::Intersection;
use crate::shared::ray::Ray;
use crate::shared::token::SurfaceToken;
use crate::shared::validate;
use crate::surface::planar::{Planar, PlanarHit};
use crate::surface::{Surface, SurfaceKind};
use getset::CopyGetters;

/// A flat circular disk: a plane hit restricted to `radius` around the centre
#[derive(Copy, Clone, Debug, CopyGetters)]
#[get_copy = "pub"]
pub struct DiskSurface {
    /// The plane that this surface sits upon, originated at the disk centre
    plane: Planar,
    radius: Number,
    radius_sqr: Number,
    token: SurfaceToken,
}

// region Constructors

impl DiskSurface {
    /// Creates a disk from its centre, plane normal, and radius
    ///
    /// # Panics
    /// The normal must be non-zero
    pub fn new(centre: impl Into<Point3>, normal: impl Into<Vector3>, radius: Number) -> Self {
        let centre = centre.into();
        let n = normal
            .into()
            .try_normalize()
            .expect("couldn't normalise disk normal: zero length");
        // Any orthonormal frame in the plane works; the edge vectors only give the hit
        // a local coordinate basis
        let (u, v) = Vector3::any_orthonormal_pair(&n);
        Self {
            plane: Planar::new(centre, u * radius, v * radius),
            radius,
            radius_sqr: radius * radius,
            token: SurfaceToken::next(),
        }
    }

    /// Checks a raw plane hit against the disk's rim
    fn on_disk(&self, hit: &PlanarHit) -> bool { hit.pos_l.length_squared() < self.radius_sqr }
}

// endregion Constructors

// region Surface Impl

impl Surface for DiskSurface {
    fn kind(&self) -> SurfaceKind { SurfaceKind::Disk }
    fn token(&self) -> SurfaceToken { self.token }

    fn intersect(&self, ray: &Ray, t_min: &mut Number, record: &mut Intersection, epsilons: &EpsilonTable) -> bool {
        let eps = epsilons.for_kind(self.kind());
        let Some(hit) = self.plane.hit(ray, eps) else {
            return false;
        };
        if !self.on_disk(&hit) {
            return false;
        }

        self.plane.write_record(&hit, record);
        *t_min = hit.dist;

        validate::intersection(ray, &*record, hit.dist);
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
        match self.plane.hit(ray, eps) {
            Some(hit) if hit.dist < t_max && self.on_disk(&hit) => {
                *t_min = hit.dist;
                *occluder = Some(self.token);
                true
            }
            _ => false,
        }
    }
}

// endregion Surface Impl
