//! # Module [crate::surface]
//!
//! This module contains the submodules for the different surface (see [Surface] and
//! [SurfaceInstance]) types.
//!
//! # DEV: Code Structure
//!
//! ## Surface Modules
//! Surfaces (and their corresponding types) are placed into named submodules, and those
//! submodules are publicly exported. A surface struct holds immutable geometric data
//! (with cached values for performance), and is constructed through its `new()` functions
//! (or [From] conversions for the planar types).
//!
//! ## Example
//! Considering a "Sphere" surface:
//!
//! - File: `./sphere.rs`
//! - Add module: `pub mod sphere;`
//! - Struct: `SphereSurface`, where `SphereSurface: Surface`
//! - Add an entry to [SurfaceKind] and a variant to [SurfaceInstance] for static-dispatch
//! - See [sphere] for an example

use crate::core::types::Number;
use crate::shared::epsilon::EpsilonTable;
use crate::shared::intersect::Intersection;
use crate::shared::ray::Ray;
use crate::shared::token::SurfaceToken;
use enum_dispatch::enum_dispatch;
use strum_macros::{Display, EnumIter, IntoStaticStr};

// noinspection ALL - Used by enum_dispatch macro
#[allow(unused_imports)]
use self::{
    axis_box::AxisBoxSurface,
    compound::CompoundSurface,
    cylinder::CylinderSurface,
    planar::{disk::DiskSurface, plane::PlaneSurface, rectangle::RectangleSurface, triangle::TriangleSurface},
    sphere::SphereSurface,
    torus::TorusSurface,
};

pub mod axis_box;
pub mod compound;
pub mod cylinder;
pub mod planar;
pub mod sphere;
pub mod torus;

// region Surface kinds

/// The closed set of surface kinds the kernel understands.
///
/// The string form of each kind (see [Self::key]) is the fixed key used in
/// [EpsilonTable]s.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Display, EnumIter, IntoStaticStr)]
pub enum SurfaceKind {
    #[strum(serialize = "surf.sphere")]
    Sphere,
    #[strum(serialize = "surf.box")]
    AxisBox,
    #[strum(serialize = "surf.cylinder")]
    Cylinder,
    #[strum(serialize = "surf.plane")]
    Plane,
    #[strum(serialize = "surf.disk")]
    Disk,
    #[strum(serialize = "surf.rect")]
    Rectangle,
    #[strum(serialize = "surf.triangle")]
    Triangle,
    #[strum(serialize = "surf.torus")]
    Torus,
    #[strum(serialize = "surf.compound")]
    Compound,
}

impl SurfaceKind {
    /// The fixed string key for this kind, as used in epsilon tables
    pub fn key(self) -> &'static str { self.into() }
}

// endregion Surface kinds

// region Surface traits

#[enum_dispatch]
pub trait Surface {
    /// Which kind of surface this is; selects the entry used in epsilon-table lookups
    fn kind(&self) -> SurfaceKind;

    /// The opaque identity of this (built) surface
    fn token(&self) -> SurfaceToken;

    /// Attempts to intersect `ray` with this surface.
    ///
    /// # Return Value
    /// On `true`, `record` is fully written and `*t_min` holds the smallest accepted
    /// positive parametric distance along the ray; both are written before this returns.
    /// On `false` neither output is meaningful. A candidate distance at or below the
    /// epsilon looked up for [Self::kind] in `epsilons` is rejected as self-intersection
    /// noise.
    ///
    /// Geometric misses and degenerate geometry both take the `false` path; nothing here
    /// panics on a miss.
    fn intersect(&self, ray: &Ray, t_min: &mut Number, record: &mut Intersection, epsilons: &EpsilonTable) -> bool;

    /// Checks whether this surface occludes `ray` strictly before `t_max` (the distance to
    /// the light being tested).
    ///
    /// Callers pass the *shadow* epsilon table here; it is looser than the hit table. On
    /// `true`, only `*t_min` (the occluding distance) and `*occluder` (this surface's
    /// token, for material lookup above the kernel) are written — no full record.
    fn shadows(
        &self,
        ray: &Ray,
        t_min: &mut Number,
        occluder: &mut Option<SurfaceToken>,
        epsilons: &EpsilonTable,
        t_max: Number,
    ) -> bool;
}

/// A static-dispatch instance of [Surface].
///
/// The surface set is closed, so an enum (via [macro@enum_dispatch]) is preferred over
/// `Box<dyn Surface>`.
#[enum_dispatch(Surface)]
#[derive(Clone, Debug)]
pub enum SurfaceInstance {
    SphereSurface,
    AxisBoxSurface,
    CylinderSurface,
    PlaneSurface,
    DiskSurface,
    RectangleSurface,
    TriangleSurface,
    TorusSurface,
    CompoundSurface,
}

// endregion Surface traits
