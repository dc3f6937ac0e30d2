use crate::core::types::{Number, Point3, Vector3};
use crate::shared::epsilon::EpsilonTable;
use crate::shared::intersect::Intersection;
use crate::shared::poly;
use crate::shared::ray::Ray;
use crate::shared::token::SurfaceToken;
use crate::shared::validate;
use crate::surface::{Surface, SurfaceKind};
use getset::CopyGetters;

/// Relative epsilon handed to the polynomial solver for classifying near-zero
/// discriminants. Scene-scale tolerances live in the epsilon tables; this one only guards
/// the root extraction itself, and gets scaled up to the magnitude of the quartic's
/// coefficients before use.
const ROOT_EPSILON: Number = 1e-9;

/// A torus around a vertical axis through `centre`: the set of points at `minor_radius`
/// from the horizontal circle of `major_radius`.
///
/// Hit distances come from the quartic that results from substituting the ray equation
/// into the implicit torus equation; see [crate::shared::poly].
#[derive(Copy, Clone, Debug, CopyGetters)]
#[get_copy = "pub"]
pub struct TorusSurface {
    centre: Point3,
    /// Radius of the ring circle, measured from the axis
    major_radius: Number,
    /// Radius of the tube around the ring circle
    minor_radius: Number,
    token: SurfaceToken,
}

// region Constructors

impl TorusSurface {
    pub fn new(centre: impl Into<Point3>, major_radius: Number, minor_radius: Number) -> Self {
        Self {
            centre: centre.into(),
            major_radius,
            minor_radius,
            token: SurfaceToken::next(),
        }
    }
}

// endregion Constructors

// region Surface Impl

impl TorusSurface {
    /// Smallest root of the ray-torus quartic above `eps`, if any
    fn nearest_root(&self, ray: &Ray, eps: Number) -> Option<Number> {
        let o = ray.pos() - self.centre;
        let d = ray.dir();

        let rr = self.major_radius * self.major_radius;
        let aa = self.minor_radius * self.minor_radius;

        let dd = d.length_squared();
        let od = Vector3::dot(o, d);
        let oo = o.length_squared();
        let k = oo - (rr + aa);

        // Substituting `o + t*d` into `(|p|^2 + R^2 - r^2)^2 = 4R^2 (p.x^2 + p.z^2)` and
        // expanding gives a quartic in `t`
        let c4 = dd * dd;
        let c3 = 4. * dd * od;
        let c2 = (2. * dd * k) + (4. * od * od) + (4. * rr * d.y * d.y);
        let c1 = (4. * k * od) + (8. * rr * o.y * d.y);
        let c0 = (k * k) - (4. * rr * (aa - (o.y * o.y)));

        // The solver's zero test has to track the scale of the coefficients (which grow
        // with the sixth power of the torus size); the constant term is a serviceable proxy
        let root_eps = ROOT_EPSILON * c0.abs().max(1.);

        poly::quartic(c4, c3, c2, c1, c0, root_eps)
            .into_iter()
            .filter(|&t| t > eps)
            .min_by(Number::total_cmp)
    }

    /// Outward surface normal at a world-space point on the torus, from the gradient of
    /// the implicit function
    fn normal_at(&self, pos_w: Point3) -> Vector3 {
        let p = pos_w - self.centre;
        let rr = self.major_radius * self.major_radius;
        let aa = self.minor_radius * self.minor_radius;

        // grad f / 4 = p * (|p|^2 + R^2 - r^2) - 2R^2 * (p.x, 0, p.z)
        let g = p.length_squared() + rr - aa;
        ((p * g) - (Vector3::new(p.x, 0., p.z) * (2. * rr))).normalize()
    }
}

impl Surface for TorusSurface {
    fn kind(&self) -> SurfaceKind { SurfaceKind::Torus }
    fn token(&self) -> SurfaceToken { self.token }

    fn intersect(&self, ray: &Ray, t_min: &mut Number, record: &mut Intersection, epsilons: &EpsilonTable) -> bool {
        let eps = epsilons.for_kind(self.kind());
        let Some(root) = self.nearest_root(ray, eps) else {
            return false;
        };

        let pos_w = ray.at(root);
        let normal = self.normal_at(pos_w);
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
