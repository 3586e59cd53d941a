//! Danger assessment for a single city.
//!
//! One [`CityThreatAssessment`] is built per city per planning cycle. The scan
//! feeds it threats with [`add_threat`](CityThreatAssessment::add_threat); the
//! planner reads back the danger and the reinforcement need.
//!
//! # Speculative planning
//!
//! Cloning yields a fully independent assessment: its threat collection is
//! copied entry by entry, so a planning branch can add threats or consume
//! reinforcements without the original noticing.

use crate::city::{City, CityId};
use crate::config::AssessmentPolicy;
use crate::danger::Danger;
use crate::threat::{ThreatCollection, ThreatEntry, ThreatRecord};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ThreatError {
    #[error("Invalid danger {danger} for {city}: must be finite, non-negative and representable")]
    InvalidDanger { city: CityId, danger: f32 },
    #[error("Danger for {city} would overflow")]
    DangerOverflow { city: CityId },
    #[error("No assessment for {0}")]
    UnknownCity(CityId),
}

#[derive(Debug, PartialEq)]
pub struct CityThreatAssessment {
    city: CityId,
    /// Garrison size when the assessment was made. Not kept live.
    defender_count: u32,
    /// Always equal to `threats.total_danger()`.
    danger: Danger,
    reinforcements: u32,
    threats: ThreatCollection,
}

impl CityThreatAssessment {
    pub fn new<C: City + ?Sized>(city: &C) -> Self {
        Self {
            city: city.id(),
            defender_count: city.count_defenders(),
            danger: Danger::ZERO,
            reinforcements: 0,
            threats: ThreatCollection::new(),
        }
    }

    /// Record a threat worth `danger` to this city.
    ///
    /// The contribution is rounded to [`Danger`]'s fixed point. Negative, NaN,
    /// infinite and unrepresentable contributions are rejected and leave the
    /// assessment untouched.
    pub fn add_threat(&mut self, danger: f32, record: &ThreatRecord) -> Result<(), ThreatError> {
        let Some(fixed) = Danger::try_from_f32(danger) else {
            log::warn!(
                "Rejected threat {} against {}: danger {}",
                record.source,
                self.city,
                danger
            );
            return Err(ThreatError::InvalidDanger {
                city: self.city,
                danger,
            });
        };
        self.add_danger(fixed, record)
    }

    /// Record a threat with an already fixed-point contribution.
    ///
    /// Fails without changing anything if the total would overflow.
    pub fn add_danger(&mut self, danger: Danger, record: &ThreatRecord) -> Result<(), ThreatError> {
        let Some(total) = self.danger.checked_add(danger) else {
            log::warn!(
                "Rejected threat {} against {}: total danger overflows",
                record.source,
                self.city
            );
            return Err(ThreatError::DangerOverflow { city: self.city });
        };

        self.danger = total;
        self.threats.append(ThreatEntry {
            record: *record,
            danger,
        });
        log::trace!(
            "{}: threat {} adds {} (total {})",
            self.city,
            record.source,
            danger,
            self.danger
        );
        Ok(())
    }

    pub fn city(&self) -> CityId {
        self.city
    }

    pub fn danger(&self) -> Danger {
        self.danger
    }

    pub fn reinforcements_needed(&self) -> u32 {
        self.reinforcements
    }

    pub fn defender_count(&self) -> u32 {
        self.defender_count
    }

    pub fn threats(&self) -> &ThreatCollection {
        &self.threats
    }

    /// Recompute the reinforcement request from the current danger.
    pub fn evaluate_reinforcements(&mut self, policy: &AssessmentPolicy) -> u32 {
        self.reinforcements = policy.reinforcements_for(self.danger, self.defender_count);
        if self.reinforcements > 0 {
            log::debug!(
                "{} needs {} reinforcements (danger {}, {} defenders)",
                self.city,
                self.reinforcements,
                self.danger,
                self.defender_count
            );
        }
        self.reinforcements
    }

    /// Mark `count` armies as sent. Returns what is still needed.
    pub fn supply_reinforcements(&mut self, count: u32) -> u32 {
        self.reinforcements = self.reinforcements.saturating_sub(count);
        self.reinforcements
    }

    /// Drop all threats and requests. The defender snapshot is kept.
    pub fn reset(&mut self) {
        self.danger = Danger::ZERO;
        self.reinforcements = 0;
        self.threats.clear();
    }
}

impl Clone for CityThreatAssessment {
    fn clone(&self) -> Self {
        let mut threats = ThreatCollection::new();
        threats.copy_from(&self.threats);
        Self {
            city: self.city,
            defender_count: self.defender_count,
            danger: self.danger,
            reinforcements: self.reinforcements,
            threats,
        }
    }
}
