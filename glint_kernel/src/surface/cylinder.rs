use crate::core::types::{Number, Point3, Vector3};
use crate::shared::epsilon::EpsilonTable;
use crate::shared::intersect::Intersection;
use crate::shared::ray::Ray;
use crate::shared::token::SurfaceToken;
use crate::shared::validate;
use crate::surface::{Surface, SurfaceKind};
use getset::CopyGetters;

/// An open (uncapped) cylinder around a vertical axis.
///
/// The body is the set of points at `radius` from the axis line through `centre`, with
/// height clamped to `[y_min, y_max]`. There are no end caps; a ray can pass through the
/// openings without hitting anything.
#[derive(Copy, Clone, Debug, CopyGetters)]
#[get_copy = "pub"]
pub struct CylinderSurface {
    centre: Point3,
    radius: Number,
    radius_sqr: Number,
    y_min: Number,
    y_max: Number,
    token: SurfaceToken,
}

// region Constructors

impl CylinderSurface {
    pub fn new(centre: impl Into<Point3>, radius: Number, height: Number) -> Self {
        let centre = centre.into();
        Self {
            centre,
            radius,
            radius_sqr: radius * radius,
            y_min: centre.y - (height / 2.),
            y_max: centre.y + (height / 2.),
            token: SurfaceToken::next(),
        }
    }
}

// endregion Constructors

// region Surface Impl

impl CylinderSurface {
    /// Smallest root of the x/z-plane quadratic above `eps` whose hit height lies on the
    /// body, if any
    fn nearest_root(&self, ray: &Ray, eps: Number) -> Option<Number> {
        let (ox, oz) = (ray.pos().x - self.centre.x, ray.pos().z - self.centre.z);
        let (dx, dz) = (ray.dir().x, ray.dir().z);

        // The quadratic lives entirely in the x/z plane
        let a = (dx * dx) + (dz * dz);
        if a == 0. {
            // Ray runs parallel to the axis; it can never cross the body
            return None;
        }
        let half_b = (ox * dx) + (oz * dz);
        let c = (ox * ox) + (oz * oz) - self.radius_sqr;

        let discriminant = (half_b * half_b) - (a * c);
        if discriminant < 0. {
            return None;
        }
        let sqrt_d = discriminant.sqrt();

        // Nearer root first; the farther one only counts when the nearer is rejected
        for root in [(-half_b - sqrt_d) / a, (-half_b + sqrt_d) / a] {
            if root > eps {
                let y = ray.pos().y + (root * ray.dir().y);
                if y >= self.y_min && y <= self.y_max {
                    return Some(root);
                }
            }
        }
        None
    }
}

impl Surface for CylinderSurface {
    fn kind(&self) -> SurfaceKind { SurfaceKind::Cylinder }
    fn token(&self) -> SurfaceToken { self.token }

    fn intersect(&self, ray: &Ray, t_min: &mut Number, record: &mut Intersection, epsilons: &EpsilonTable) -> bool {
        let eps = epsilons.for_kind(self.kind());
        let Some(root) = self.nearest_root(ray, eps) else {
            return false;
        };

        let pos_w = ray.at(root);
        // Radial in the x/z plane; the hit sits at exactly `radius` from the axis
        let normal = Vector3::new(
            (pos_w.x - self.centre.x) / self.radius,
            0.,
            (pos_w.z - self.centre.z) / self.radius,
        );
        let reversed = Vector3::dot(ray.dir(), normal) > 0.;

        record.pos_w = pos_w;
        record.pos_l = (pos_w - self.centre).to_point();
        record.normal = normal;
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
