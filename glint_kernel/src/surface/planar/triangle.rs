use crate::core::types::Number;
use crate::shared::epsilon::EpsilonTable;
use crate::shared::intersect::Intersection;
use crate::shared::ray::Ray;
use crate::shared::token::SurfaceToken;
use crate::shared::validate;
use crate::surface::planar::{Planar, PlanarHit};
use crate::surface::{Surface, SurfaceKind};
use getset::CopyGetters;

/// A triangle surface, as the half of a [Planar] parallelogram below its diagonal
#[derive(Copy, Clone, Debug, CopyGetters)]
#[get_copy = "pub"]
pub struct TriangleSurface {
    /// The plane that this surface sits upon
    plane: Planar,
    token: SurfaceToken,
}

// region Constructors

impl TriangleSurface {
    pub fn new(plane: impl Into<Planar>) -> Self {
        Self {
            plane: plane.into(),
            token: SurfaceToken::next(),
        }
    }
}

impl<T: Into<Planar>> From<T> for TriangleSurface {
    fn from(plane: T) -> Self { Self::new(plane) }
}

// endregion Constructors

// region Surface Impl

/// Barycentric check: both edge coordinates non-negative, summing to at most one
fn on_triangle(hit: &PlanarHit) -> bool { hit.alpha >= 0. && hit.beta >= 0. && (hit.alpha + hit.beta) <= 1. }

impl Surface for TriangleSurface {
    fn kind(&self) -> SurfaceKind { SurfaceKind::Triangle }
    fn token(&self) -> SurfaceToken { self.token }

    fn intersect(&self, ray: &Ray, t_min: &mut Number, record: &mut Intersection, epsilons: &EpsilonTable) -> bool {
        let eps = epsilons.for_kind(self.kind());
        let Some(hit) = self.plane.hit(ray, eps) else {
            return false;
        };
        if !on_triangle(&hit) {
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
            Some(hit) if hit.dist < t_max && on_triangle(&hit) => {
                *t_min = hit.dist;
                *occluder = Some(self.token);
                true
            }
            _ => false,
        }
    }
}

// endregion Surface Impl
