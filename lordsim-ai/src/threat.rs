//! Threat records and the ordered collection an assessment keeps them in.
//!
//! A [`ThreatRecord`] says *what* threatens a city (a stack or a ruin), where
//! it was seen, who owns it and how strong it is. How much danger that means
//! for a particular city is weighed by the caller and stored alongside the
//! record in a [`ThreatEntry`].

use crate::danger::Danger;
use lordsim_map::{Identified, Owned, PlayerId, Placed, Position, StackId};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RuinId(pub u32);

/// The entity a threat comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThreatSource {
    /// An enemy stack that can reach the city.
    Stack(StackId),
    /// An unexplored ruin whose guardian may sally out.
    Ruin(RuinId),
}

impl fmt::Display for ThreatSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThreatSource::Stack(id) => write!(f, "{id}"),
            ThreatSource::Ruin(id) => write!(f, "RuinId#{}", id.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThreatRecord {
    pub source: ThreatSource,
    /// Where the source was when it was discovered.
    pub origin: Position,
    /// `None` for neutral sources such as ruins.
    pub owner: Option<PlayerId>,
    pub strength: f32,
}

impl ThreatRecord {
    pub fn new(source: ThreatSource, origin: Position, owner: Option<PlayerId>, strength: f32) -> Self {
        Self {
            source,
            origin,
            owner,
            strength,
        }
    }

    pub fn from_stack<S>(stack: &S, strength: f32) -> Self
    where
        S: Placed + Owned + Identified<Id = StackId>,
    {
        Self::new(
            ThreatSource::Stack(stack.id()),
            stack.position(),
            stack.owner(),
            strength,
        )
    }

    pub fn from_ruin<R>(ruin: &R, strength: f32) -> Self
    where
        R: Placed + Identified<Id = RuinId>,
    {
        Self::new(ThreatSource::Ruin(ruin.id()), ruin.position(), None, strength)
    }

    pub fn is_ruin(&self) -> bool {
        matches!(self.source, ThreatSource::Ruin(_))
    }
}

/// A record together with the danger it was scored at.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThreatEntry {
    pub record: ThreatRecord,
    pub danger: Danger,
}

/// Threats against one city, in discovery order.
///
/// Each collection owns its entries outright; two assessments never share one.
#[derive(Debug, Default, PartialEq)]
pub struct ThreatCollection {
    entries: Vec<ThreatEntry>,
}

impl ThreatCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, entry: ThreatEntry) {
        self.entries.push(entry);
    }

    /// Replace the contents with a copy of `other`'s entries, same order.
    pub fn copy_from(&mut self, other: &ThreatCollection) {
        self.entries.clear();
        self.entries.extend(other.entries.iter().copied());
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ThreatEntry> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ThreatEntry> + '_ {
        self.entries.iter()
    }

    /// Sum of the entries' danger. Exact, so independent of order.
    pub fn total_danger(&self) -> Danger {
        self.entries
            .iter()
            .fold(Danger::ZERO, |acc, entry| acc.saturating_add(entry.danger))
    }
}
