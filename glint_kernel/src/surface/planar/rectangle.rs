use crate::core::types::Number;
use crate::shared::epsilon::EpsilonTable;
use crate::shared::intersect::Intersection;
use crate::shared::ray::Ray;
use crate::shared::token::SurfaceToken;
use crate::shared::validate;
use crate::surface::planar::{Planar, PlanarHit};
use crate::surface::{Surface, SurfaceKind};
use getset::CopyGetters;

/// A parallelogram surface: a corner point plus two edge vectors
#[derive(Copy, Clone, Debug, CopyGetters)]
#[get_copy = "pub"]
pub struct RectangleSurface {
    /// The plane that this surface sits upon
    plane: Planar,
    token: SurfaceToken,
}

// region Constructors

impl RectangleSurface {
    pub fn new(plane: impl Into<Planar>) -> Self {
        Self {
            plane: plane.into(),
            token: SurfaceToken::next(),
        }
    }
}

impl<T: Into<Planar>> From<T> for RectangleSurface {
    fn from(plane: T) -> Self { Self::new(plane) }
}

// endregion Constructors

// region Surface Impl

/// Check for our segment of the plane: both edge coordinates in `[0, 1]`
fn on_rectangle(hit: &PlanarHit) -> bool {
    (0. ..=1.).contains(&hit.alpha) && (0. ..=1.).contains(&hit.beta)
}

impl Surface for RectangleSurface {
    fn kind(&self) -> SurfaceKind { SurfaceKind::Rectangle }
    fn token(&self) -> SurfaceToken { self.token }

    fn intersect(&self, ray: &Ray, t_min: &mut Number, record: &mut Intersection, epsilons: &EpsilonTable) -> bool {
        let eps = epsilons.for_kind(self.kind());
        let Some(hit) = self.plane.hit(ray, eps) else {
            return false;
        };
        if !on_rectangle(&hit) {
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
            Some(hit) if hit.dist < t_max && on_rectangle(&hit) => {
                *t_min = hit.dist;
                *occluder = Some(self.token);
                true
            }
            _ => false,
        }
    }
}

// endregion Surface Impl
