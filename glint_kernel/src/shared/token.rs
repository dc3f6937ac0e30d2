use crate::core::types::IdToken;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// An identifier used as an opaque reference to a built surface.
///
/// Shadow tests report the occluding surface through its token, and the layers above map
/// tokens back to materials. Tokens are unique per constructed surface; cloning a surface
/// shares its token.
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub struct SurfaceToken(IdToken);

impl SurfaceToken {
    /// Allocates the next process-unique token
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    pub const fn id(self) -> IdToken { self.0 }
}

impl fmt::Display for SurfaceToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{id:>0width$X}", id = self.0, width = IdToken::BITS as usize / 4)
    }
}
