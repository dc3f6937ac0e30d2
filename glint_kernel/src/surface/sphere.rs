use crate::core::types::{Number, Point3, Vector3};
use crate::shared::epsilon::EpsilonTable;
use crate::shared::intersect::Intersection;
use crate::shared::ray::Ray;
use crate::shared::token::SurfaceToken;
use crate::shared::validate;
use crate::surface::{Surface, SurfaceKind};
use getset::CopyGetters;

#[derive(Copy, Clone, Debug, CopyGetters)]
#[get_copy = "pub"]
pub struct SphereSurface {
    centre: Point3,
    radius: Number,
    radius_sqr: Number,
    token: SurfaceToken,
}

// region Constructors

impl SphereSurface {
    pub fn new(centre: impl Into<Point3>, radius: Number) -> Self {
        Self {
            centre: centre.into(),
            radius,
            radius_sqr: radius * radius,
            token: SurfaceToken::next(),
        }
    }
}

impl From<(Point3, Number)> for SphereSurface {
    fn from((centre, radius): (Point3, Number)) -> Self { Self::new(centre, radius) }
}

// endregion Constructors

// region Surface Impl

impl SphereSurface {
    /// Smallest root of the ray-sphere quadratic above `eps`, if any
    fn nearest_root(&self, ray: &Ray, eps: Number) -> Option<Number> {
        let ray_rel_pos = ray.pos() - self.centre;

        // Quadratic formula variables
        let a = ray.dir().length_squared();
        let half_b = Vector3::dot(ray_rel_pos, ray.dir());
        let c = ray_rel_pos.length_squared() - self.radius_sqr;
        let discriminant = (half_b * half_b) - (a * c);

        // No solutions to where ray intersects with sphere because of negative square root
        if discriminant < 0. {
            return None;
        }

        let sqrt_d = discriminant.sqrt();

        // Prioritise the less-positive root (it's closer), falling back to the farther one
        // when the near one is inside the noise tolerance (or behind the ray)
        let mut root = (-half_b - sqrt_d) / a;
        if root <= eps {
            root = (-half_b + sqrt_d) / a;
            if root <= eps {
                return None;
            }
        }
        Some(root)
    }
}

impl Surface for SphereSurface {
    fn kind(&self) -> SurfaceKind { SurfaceKind::Sphere }
    fn token(&self) -> SurfaceToken { self.token }

    fn intersect(&self, ray: &Ray, t_min: &mut Number, record: &mut Intersection, epsilons: &EpsilonTable) -> bool {
        let eps = epsilons.for_kind(self.kind());
        let Some(root) = self.nearest_root(ray, eps) else {
            return false;
        };

        let pos_w = ray.at(root);
        let local = (pos_w - self.centre) / self.radius;
        // Positive dot means the ray came from inside, striking the back of the surface
        let reversed = Vector3::dot(ray.dir(), local) > 0.;

        record.pos_w = pos_w;
        record.pos_l = local.to_point();
        record.normal = local;
        record.reversed = reversed;
        *t_min = root;

        validate::intersection(ray, &*record, root);
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
        match self.nearest_root(ray, eps) {
            Some(root) if root < t_max => {
                *t_min = root;
                *occluder = Some(self.token);
                true
            }
            _ => false,
        }
    }
}

// endregion Surface Impl
