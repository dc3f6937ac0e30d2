use crate::core::targets;
use crate::core::types::Number;
use crate::surface::SurfaceKind;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use strum::IntoEnumIterator;

/// Per-surface-kind numerical tolerances.
///
/// Every surface looks up its own key (see [SurfaceKind::key]) before accepting a candidate
/// hit distance; a distance at or below the tolerance is rejected as self-intersection
/// noise rather than a real hit.
///
/// Tables are plain immutable values once built: construct one (or use the canonical
/// [HIT_EPSILONS]/[SHADOW_EPSILONS]), then pass it by reference through the trace. Nothing
/// in the kernel mutates a table at runtime.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EpsilonTable {
    /// Tolerance returned for keys that have no entry
    default: Number,
    entries: HashMap<String, Number>,
}

impl EpsilonTable {
    pub fn new(default: Number) -> Self {
        Self {
            default,
            entries: HashMap::new(),
        }
    }

    /// Looks up the tolerance for `name`, falling back to the table default.
    /// This never fails.
    pub fn get(&self, name: &str) -> Number { self.entries.get(name).copied().unwrap_or(self.default) }

    /// Convenience lookup keyed by surface kind
    pub fn for_kind(&self, kind: SurfaceKind) -> Number { self.get(kind.key()) }

    /// Inserts or overwrites the tolerance for `name`
    pub fn set(&mut self, name: impl Into<String>, value: Number) {
        let name = name.into();
        tracing::trace!(target: targets::EPSILON, name = %name, value, "set epsilon");
        self.entries.insert(name, value);
    }

    pub fn default_epsilon(&self) -> Number { self.default }

    /// Builds the canonical table for visible-hit tests
    pub fn hit() -> Self {
        let mut table = Self::new(1e-6);
        for kind in SurfaceKind::iter() {
            let eps = match kind {
                SurfaceKind::Plane | SurfaceKind::Disk | SurfaceKind::Rectangle | SurfaceKind::Triangle => 1e-5,
                SurfaceKind::Torus => 1e-4,
                _ => 1e-6,
            };
            table.set(kind.key(), eps);
        }
        table
    }

    /// Builds the canonical table for shadow tests.
    ///
    /// Shadow rays tolerate coarser self-intersection avoidance, so every entry here is
    /// looser than its [Self::hit] counterpart.
    pub fn shadow() -> Self {
        let mut table = Self::new(1e-4);
        for kind in SurfaceKind::iter() {
            let eps = match kind {
                SurfaceKind::Plane | SurfaceKind::Disk | SurfaceKind::Rectangle | SurfaceKind::Triangle => 1e-3,
                SurfaceKind::Torus => 1e-3,
                _ => 1e-4,
            };
            table.set(kind.key(), eps);
        }
        table
    }
}

/// Shared instance of the canonical visible-hit table
pub static HIT_EPSILONS: Lazy<EpsilonTable> = Lazy::new(EpsilonTable::hit);
/// Shared instance of the canonical shadow table
pub static SHADOW_EPSILONS: Lazy<EpsilonTable> = Lazy::new(EpsilonTable::shadow);
