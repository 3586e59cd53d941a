//! Fixed-point danger values.
//!
//! Danger is accumulated in integers so that the total is exact and the same
//! whatever order threats are added in. Floats only appear at the boundary
//! where callers hand in a weighted contribution.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Danger with scale 10000: 0.25 → 2500, 1.0 → 10000.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Danger(i64);

impl Danger {
    /// Scale factor: 10000 = 1.0
    pub const SCALE: i64 = 10000;

    pub const ZERO: Danger = Danger(0);
    pub const ONE: Danger = Danger(Self::SCALE);
    pub const MAX: Danger = Danger(i64::MAX);

    /// Create from a raw scaled value. Negative values clamp to zero.
    #[inline]
    pub const fn from_raw(raw: i64) -> Self {
        if raw < 0 {
            Danger(0)
        } else {
            Danger(raw)
        }
    }

    /// Create from a whole number of danger points. Saturates at [`Danger::MAX`].
    #[inline]
    pub const fn from_int(v: u32) -> Self {
        Danger(v as i64 * Self::SCALE)
    }

    /// Convert a caller-supplied contribution.
    ///
    /// `None` for NaN, infinite, negative, or values too large to represent.
    /// Rounds to the nearest 1/10000.
    pub fn try_from_f32(v: f32) -> Option<Self> {
        if !v.is_finite() || v < 0.0 {
            return None;
        }
        let scaled = (f64::from(v) * Self::SCALE as f64).round();
        // i64::MAX as f64 rounds up to 2^63, which is itself out of range.
        if scaled >= i64::MAX as f64 {
            return None;
        }
        Some(Danger(scaled as i64))
    }

    /// Convert to f32 (display and logging only).
    #[inline]
    pub fn to_f32(self) -> f32 {
        (self.0 as f64 / Self::SCALE as f64) as f32
    }

    #[inline]
    pub const fn raw(self) -> i64 {
        self.0
    }

    #[inline]
    pub fn checked_add(self, other: Danger) -> Option<Danger> {
        self.0.checked_add(other.0).map(Danger)
    }

    #[inline]
    pub fn saturating_add(self, other: Danger) -> Danger {
        Danger(self.0.saturating_add(other.0))
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Debug for Danger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Danger({})", self.to_f32())
    }
}

impl fmt::Display for Danger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.to_f32())
    }
}
