//! Per-direction movement blocking.
//!
//! Each cell stores one 8-bit mask per [`MovementProfile`]: bit `i` set means
//! leaving the cell in [`Direction`] index `i` is not allowed. Flying units have
//! no mask; callers modelling flight skip these lookups (see [`Mobility`]).

use crate::direction::Direction;
use serde::{Deserialize, Serialize};

/// A class of ground mobility with its own blocking mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MovementProfile {
    /// Blocked by mountains and open water.
    Standard,
    /// Crosses mountains; still blocked by open water.
    MountainCapable,
}

impl MovementProfile {
    pub const ALL: [MovementProfile; 2] = [MovementProfile::Standard, MovementProfile::MountainCapable];

    #[inline]
    const fn slot(self) -> usize {
        match self {
            MovementProfile::Standard => 0,
            MovementProfile::MountainCapable => 1,
        }
    }
}

/// How a moving force gets around, as seen by accessibility queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mobility {
    Standard,
    MountainCapable,
    Flying,
}

impl Mobility {
    /// The blocking profile to consult, or `None` when masks do not apply.
    pub const fn profile(self) -> Option<MovementProfile> {
        match self {
            Mobility::Standard => Some(MovementProfile::Standard),
            Mobility::MountainCapable => Some(MovementProfile::MountainCapable),
            Mobility::Flying => None,
        }
    }
}

impl From<MovementProfile> for Mobility {
    fn from(profile: MovementProfile) -> Self {
        match profile {
            MovementProfile::Standard => Mobility::Standard,
            MovementProfile::MountainCapable => Mobility::MountainCapable,
        }
    }
}

/// Blocked directions for both movement profiles.
///
/// Zero-allocation, O(1) lookups. Entries are fully independent: touching one
/// `(profile, direction)` pair never changes another.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockingTable {
    masks: [u8; 2],
}

impl BlockingTable {
    #[inline]
    const fn bit(direction: Direction) -> u8 {
        1u8 << direction.index()
    }

    #[inline]
    pub fn is_blocked(&self, profile: MovementProfile, direction: Direction) -> bool {
        self.masks[profile.slot()] & Self::bit(direction) != 0
    }

    #[inline]
    pub fn set_blocked(&mut self, profile: MovementProfile, direction: Direction, blocked: bool) {
        let mask = &mut self.masks[profile.slot()];
        if blocked {
            *mask |= Self::bit(direction);
        } else {
            *mask &= !Self::bit(direction);
        }
    }

    /// Unblock every direction for every profile.
    pub fn clear(&mut self) {
        self.masks = [0; 2];
    }

    /// Raw mask for one profile, bit `i` = direction index `i`.
    pub fn mask(&self, profile: MovementProfile) -> u8 {
        self.masks[profile.slot()]
    }

    pub fn blocked_directions(&self, profile: MovementProfile) -> impl Iterator<Item = Direction> + '_ {
        Direction::ALL
            .into_iter()
            .filter(move |&d| self.is_blocked(profile, d))
    }
}
