//! Lightweight stand-ins for game objects, for tests and tooling.

use crate::city::{City, CityId};
use crate::threat::{RuinId, ThreatRecord, ThreatSource};
use lordsim_map::{Identified, Owned, PlayerId, Placed, Position, StackId};

#[derive(Debug, Clone)]
pub struct FixtureCity {
    id: CityId,
    defenders: u32,
    position: Position,
    owner: Option<PlayerId>,
}

impl FixtureCity {
    pub fn new(id: u32) -> Self {
        Self {
            id: CityId(id),
            defenders: 0,
            position: Position::default(),
            owner: None,
        }
    }

    pub fn defenders(mut self, count: u32) -> Self {
        self.defenders = count;
        self
    }

    pub fn at(mut self, x: i32, y: i32) -> Self {
        self.position = Position::new(x, y);
        self
    }

    pub fn owned_by(mut self, player: u32) -> Self {
        self.owner = Some(PlayerId(player));
        self
    }

    pub fn set_defenders(&mut self, count: u32) {
        self.defenders = count;
    }
}

impl City for FixtureCity {
    fn id(&self) -> CityId {
        self.id
    }

    fn count_defenders(&self) -> u32 {
        self.defenders
    }
}

impl Placed for FixtureCity {
    fn position(&self) -> Position {
        self.position
    }
}

impl Owned for FixtureCity {
    fn owner(&self) -> Option<PlayerId> {
        self.owner
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixtureStack {
    pub id: StackId,
    pub position: Position,
    pub owner: PlayerId,
}

impl FixtureStack {
    pub fn new(id: u32, owner: u32, x: i32, y: i32) -> Self {
        Self {
            id: StackId(id),
            position: Position::new(x, y),
            owner: PlayerId(owner),
        }
    }
}

impl Placed for FixtureStack {
    fn position(&self) -> Position {
        self.position
    }
}

impl Owned for FixtureStack {
    fn owner(&self) -> Option<PlayerId> {
        Some(self.owner)
    }
}

impl Identified for FixtureStack {
    type Id = StackId;

    fn id(&self) -> StackId {
        self.id
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixtureRuin {
    pub id: RuinId,
    pub position: Position,
}

impl FixtureRuin {
    pub fn new(id: u32, x: i32, y: i32) -> Self {
        Self {
            id: RuinId(id),
            position: Position::new(x, y),
        }
    }
}

impl Placed for FixtureRuin {
    fn position(&self) -> Position {
        self.position
    }
}

impl Identified for FixtureRuin {
    type Id = RuinId;

    fn id(&self) -> RuinId {
        self.id
    }
}

/// Builds a [`ThreatRecord`] field by field.
///
/// Starts as a neutral stack threat of strength 1 seen at the origin.
#[derive(Debug, Clone)]
pub struct ThreatRecordBuilder {
    source: ThreatSource,
    origin: Position,
    owner: Option<PlayerId>,
    strength: f32,
}

impl ThreatRecordBuilder {
    pub fn stack(id: u32) -> Self {
        Self::with_source(ThreatSource::Stack(StackId(id)))
    }

    pub fn ruin(id: u32) -> Self {
        Self::with_source(ThreatSource::Ruin(RuinId(id)))
    }

    fn with_source(source: ThreatSource) -> Self {
        Self {
            source,
            origin: Position::default(),
            owner: None,
            strength: 1.0,
        }
    }

    pub fn at(mut self, x: i32, y: i32) -> Self {
        self.origin = Position::new(x, y);
        self
    }

    pub fn owned_by(mut self, player: u32) -> Self {
        self.owner = Some(PlayerId(player));
        self
    }

    pub fn strength(mut self, strength: f32) -> Self {
        self.strength = strength;
        self
    }

    pub fn build(self) -> ThreatRecord {
        ThreatRecord::new(self.source, self.origin, self.owner, self.strength)
    }
}

/// A threat from stack `stack` owned by `owner`, seen at the origin.
pub fn stack_threat(stack: u32, owner: u32, strength: f32) -> ThreatRecord {
    ThreatRecordBuilder::stack(stack)
        .owned_by(owner)
        .strength(strength)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_builders() {
        let city = FixtureCity::new(3).defenders(2).at(4, 5).owned_by(1);
        assert_eq!(city.id(), CityId(3));
        assert_eq!(city.count_defenders(), 2);
        assert_eq!(city.position(), Position::new(4, 5));
        assert!(city.is_owned_by(PlayerId(1)));
    }

    #[test]
    fn test_stack_threat_fields() {
        let record = stack_threat(9, 2, 1.5);
        assert_eq!(record.source, ThreatSource::Stack(StackId(9)));
        assert_eq!(record.owner, Some(PlayerId(2)));
        assert_eq!(record.strength, 1.5);
        assert!(!record.is_ruin());
    }

    #[test]
    fn test_ruin_fixture() {
        let ruin = FixtureRuin::new(4, 5, 3);
        let record = ThreatRecord::from_ruin(&ruin, 2.0);
        assert_eq!(record.source, ThreatSource::Ruin(RuinId(4)));
        assert_eq!(record.origin, Position::new(5, 3));
        assert_eq!(record.owner, None);
    }

    #[test]
    fn test_threat_record_builder() {
        let record = ThreatRecordBuilder::stack(7)
            .at(2, -1)
            .owned_by(3)
            .strength(4.5)
            .build();
        let stack = FixtureStack::new(7, 3, 2, -1);
        assert_eq!(record, ThreatRecord::from_stack(&stack, 4.5));

        let ruin = ThreatRecordBuilder::ruin(2).at(1, 1).build();
        assert!(ruin.is_ruin());
        assert_eq!(ruin.owner, None);
        assert_eq!(ruin.strength, 1.0);
        assert_eq!(ruin, ThreatRecord::from_ruin(&FixtureRuin::new(2, 1, 1), 1.0));
    }
}
