use crate::core::types::{Point3, Vector3};

/// A struct representing a ray-surface intersection.
///
/// Records are mutable and reused across many intersection attempts (see
/// [crate::shared::scratch]); the fields are only valid to read after a hit-test has
/// returned `true`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Intersection {
    /// The position in surface-local coordinates of the intersection
    pub pos_l: Point3,
    /// The position in world coordinates of the intersection
    pub pos_w: Point3,
    /// Surface normal at the intersection.
    /// This points in the *outwards* direction, irrespective of the incident ray
    ///
    /// # Invariants
    /// - Must be normalised
    /// - Cannot be zero/nan
    pub normal: Vector3,
    /// Set when the ray struck the surface from behind/inside, i.e. the incident direction
    /// and [normal](field@Self::normal) point the same way. Shading layers flip the normal
    /// when this is set
    pub reversed: bool,
}

impl Intersection {
    /// A cleared record, as handed out by the scratch cache. Not a valid intersection
    /// until a hit-test writes it.
    pub fn empty() -> Self {
        Self {
            pos_l: Point3::ZERO,
            pos_w: Point3::ZERO,
            normal: Vector3::ZERO,
            reversed: false,
        }
    }
}

impl Default for Intersection {
    fn default() -> Self { Self::empty() }
}
