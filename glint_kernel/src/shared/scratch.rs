//! Thread-local pools of reusable temporaries, so deep recursive traces don't pay a heap
//! allocation for every scratch point/vector/record they need.
//!
//! Each worker thread lazily gets its own [ScratchCache] on first access (see
//! [ScratchCache::with]); there is no cross-thread sharing and no locking. A borrowed
//! object is physically absent from its pool until the [PoolGuard] drops, so another
//! caller drawing from the same pool can never alias it — the hazard this design accepts
//! is a leak if a guard is forgotten, and the guard's `Drop` makes that hard to do.

use crate::core::targets;
use crate::core::types::{Colour, Matrix4, Number, Point2, Point3, Quaternion, Vector3};
use crate::shared::intersect::Intersection;
use crate::shared::ray::Ray;
use crate::shared::token::SurfaceToken;
use derivative::Derivative;
use getset::Getters;
use std::cell::{Cell, RefCell};
use std::ops::{Deref, DerefMut};
use thiserror::Error;

/// Number of instances each pool in the per-thread cache is seeded with
pub const DEFAULT_SEED: usize = 8;

/// Error returned when a [Pool] cannot satisfy a borrow
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum ScratchError {
    /// The pool's freelist is empty and the growth policy forbids creating more instances
    #[error("scratch pool exhausted ({capacity} instances outstanding)")]
    Exhausted { capacity: usize },
}

/// What a [Pool] does when a borrow finds the freelist empty
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum GrowthPolicy {
    /// Create a fresh instance; the pool grows without bound
    #[default]
    Grow,
    /// Fail the borrow with [ScratchError::Exhausted]
    Fixed,
}

/// A value the scratch cache knows how to create and clear
pub trait Scratch {
    /// Creates a brand-new instance, used to seed or grow a pool
    fn fresh() -> Self;
    /// Clears the value before it re-enters the freelist
    fn reset(&mut self);
}

/// Pooled container for a single scalar, e.g. a running closest-hit distance
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct ScalarCell(pub Number);

/// Pooled container for an optional surface reference, e.g. a shadow test's occluder output
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct TokenCell(pub Option<SurfaceToken>);

macro_rules! impl_scratch {
    ($($ty:ty => $fresh:expr),* $(,)?) => {
        $(
            impl Scratch for $ty {
                fn fresh() -> Self { $fresh }
                fn reset(&mut self) { *self = $fresh; }
            }
        )*
    };
}

impl_scratch! {
    Point3 => Self::ZERO,
    Vector3 => Self::ZERO,
    Point2 => Self::ZERO,
    Colour => Self::BLACK,
    Matrix4 => Self::IDENTITY,
    Quaternion => Self::IDENTITY,
    Ray => Ray::new(Point3::ZERO, Vector3::new(0., 0., 1.)),
    Intersection => Intersection::empty(),
    ScalarCell => Self(0.),
    TokenCell => Self(None),
}

// region Pool

/// A freelist of reusable instances of one scratch type.
///
/// `borrow` removes an instance from the freelist; the returned guard re-inserts it
/// (cleared) when dropped, on every exit path.
#[derive(Derivative)]
#[derivative(Debug)]
pub struct Pool<T: Scratch> {
    #[derivative(Debug = "ignore")]
    free: RefCell<Vec<T>>,
    policy: GrowthPolicy,
    /// Total number of instances this pool has ever created
    created: Cell<usize>,
}

impl<T: Scratch> Pool<T> {
    pub fn new(initial: usize, policy: GrowthPolicy) -> Self {
        let free = (0..initial).map(|_| T::fresh()).collect();
        Self {
            free: RefCell::new(free),
            policy,
            created: Cell::new(initial),
        }
    }

    /// Removes one instance from the freelist, creating a fresh one if the freelist is
    /// empty and the growth policy permits it.
    ///
    /// The instance is exclusively owned through the guard until the guard drops.
    pub fn borrow(&self) -> Result<PoolGuard<'_, T>, ScratchError> {
        let item = self.free.borrow_mut().pop();
        let item = match item {
            Some(item) => item,
            None => match self.policy {
                GrowthPolicy::Grow => {
                    self.created.set(self.created.get() + 1);
                    tracing::trace!(target: targets::SCRATCH, total = self.created.get(), "scratch pool grew");
                    T::fresh()
                }
                GrowthPolicy::Fixed => {
                    return Err(ScratchError::Exhausted {
                        capacity: self.created.get(),
                    })
                }
            },
        };
        Ok(PoolGuard {
            pool: self,
            item: Some(item),
        })
    }

    /// How many instances are currently available to borrow
    pub fn available(&self) -> usize { self.free.borrow().len() }

    /// Total number of instances this pool has created over its lifetime
    pub fn created(&self) -> usize { self.created.get() }
}

/// Scoped guard for a borrowed scratch instance. Dereferences to the instance.
///
/// On drop the instance is [reset](Scratch::reset) and returned to the pool it came from —
/// including on early returns and panics — which keeps every borrow balanced with exactly
/// one return.
#[derive(Derivative)]
#[derivative(Debug)]
pub struct PoolGuard<'pool, T: Scratch> {
    #[derivative(Debug = "ignore")]
    pool: &'pool Pool<T>,
    #[derivative(Debug = "ignore")]
    item: Option<T>,
}

impl<T: Scratch> Deref for PoolGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &T { self.item.as_ref().expect("pool guard emptied before drop") }
}
impl<T: Scratch> DerefMut for PoolGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut T { self.item.as_mut().expect("pool guard emptied before drop") }
}

impl<T: Scratch> Drop for PoolGuard<'_, T> {
    fn drop(&mut self) {
        if let Some(mut item) = self.item.take() {
            item.reset();
            self.pool.free.borrow_mut().push(item);
        }
    }
}

// endregion Pool

// region ScratchCache

/// The per-thread cache of scratch pools, one per value type
#[derive(Debug, Getters)]
#[get = "pub"]
pub struct ScratchCache {
    colours: Pool<Colour>,
    matrices: Pool<Matrix4>,
    points: Pool<Point3>,
    vectors: Pool<Vector3>,
    quaternions: Pool<Quaternion>,
    rays: Pool<Ray>,
    intersections: Pool<Intersection>,
    scalars: Pool<ScalarCell>,
    slots: Pool<TokenCell>,
    uvs: Pool<Point2>,
}

thread_local! {
    static SCRATCH: ScratchCache = ScratchCache::new(DEFAULT_SEED, GrowthPolicy::Grow);
}

impl ScratchCache {
    pub fn new(initial: usize, policy: GrowthPolicy) -> Self {
        tracing::debug!(target: targets::SCRATCH, initial, ?policy, "creating scratch cache");
        Self {
            colours: Pool::new(initial, policy),
            matrices: Pool::new(initial, policy),
            points: Pool::new(initial, policy),
            vectors: Pool::new(initial, policy),
            quaternions: Pool::new(initial, policy),
            rays: Pool::new(initial, policy),
            intersections: Pool::new(initial, policy),
            scalars: Pool::new(initial, policy),
            slots: Pool::new(initial, policy),
            uvs: Pool::new(initial, policy),
        }
    }

    /// Runs `f` against this thread's cache, constructing the cache lazily on first access.
    ///
    /// Each thread gets its own independent instance; borrows cannot escape the closure,
    /// which is what keeps them from outliving the thread.
    pub fn with<R>(f: impl FnOnce(&ScratchCache) -> R) -> R { SCRATCH.with(f) }
}

// endregion ScratchCache
