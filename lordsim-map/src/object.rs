//! Capability traits for things on the map.
//!
//! Map objects declare only what they have: a position, an owner, an identity.
//! Code that needs several capabilities asks for them as trait bounds.

use crate::direction::Position;
use crate::ids::PlayerId;

pub trait Placed {
    fn position(&self) -> Position;
}

pub trait Owned {
    /// `None` for neutral objects.
    fn owner(&self) -> Option<PlayerId>;

    fn is_owned_by(&self, player: PlayerId) -> bool {
        self.owner() == Some(player)
    }
}

pub trait Identified {
    type Id: Copy + Eq + std::fmt::Debug;

    fn id(&self) -> Self::Id;
}
