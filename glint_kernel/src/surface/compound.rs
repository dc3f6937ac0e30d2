use crate::core::types::Number;
use crate::shared::epsilon::EpsilonTable;
use crate::shared::intersect::Intersection;
use crate::shared::ray::Ray;
use crate::shared::scratch::ScratchCache;
use crate::shared::token::SurfaceToken;
use crate::surface::{Surface, SurfaceInstance, SurfaceKind};
use getset::Getters;
use itertools::Itertools;

/// A group of surfaces that answer intersection queries as one surface: the closest child
/// hit wins.
///
/// Children are tested against a record borrowed from the thread's [ScratchCache], so
/// losing candidates never touch the caller's record — it is written exactly once, at the
/// end, from the winning child's result.
#[derive(Clone, Debug, Getters)]
#[get = "pub"]
pub struct CompoundSurface {
    children: Vec<SurfaceInstance>,
    #[getset(skip)]
    token: SurfaceToken,
}

// region Constructors

impl CompoundSurface {
    pub fn new(children: impl IntoIterator<Item: Into<SurfaceInstance>>) -> Self {
        Self {
            children: children.into_iter().map(Into::into).collect_vec(),
            token: SurfaceToken::next(),
        }
    }
}

impl<Iter: IntoIterator<Item: Into<SurfaceInstance>>> From<Iter> for CompoundSurface {
    fn from(children: Iter) -> Self { Self::new(children) }
}

// endregion Constructors

// region Surface Impl

impl Surface for CompoundSurface {
    fn kind(&self) -> SurfaceKind { SurfaceKind::Compound }
    fn token(&self) -> SurfaceToken { self.token }

    fn intersect(&self, ray: &Ray, t_min: &mut Number, record: &mut Intersection, epsilons: &EpsilonTable) -> bool {
        ScratchCache::with(|scratch| {
            // Children scribble on a borrowed record; the guard hands it back when we leave
            let mut candidate = scratch
                .intersections()
                .borrow()
                .expect("scratch intersection pool exhausted");

            let mut winner = Intersection::empty();
            let mut closest = Number::INFINITY;
            let mut hit_any = false;

            for child in &self.children {
                let mut t = Number::INFINITY;
                if child.intersect(ray, &mut t, &mut candidate, epsilons) && t < closest {
                    closest = t;
                    winner = *candidate;
                    hit_any = true;
                }
            }

            if hit_any {
                *record = winner;
                *t_min = closest;
            }
            hit_any
        })
    }

    fn shadows(
        &self,
        ray: &Ray,
        t_min: &mut Number,
        occluder: &mut Option<SurfaceToken>,
        epsilons: &EpsilonTable,
        t_max: Number,
    ) -> bool {
        // Occlusion is a boolean, so the first shadowing child settles it; no
        // nearest-distance aggregation needed
        self.children
            .iter()
            .any(|child| child.shadows(ray, t_min, occluder, epsilons, t_max))
    }
}

// endregion Surface Impl
