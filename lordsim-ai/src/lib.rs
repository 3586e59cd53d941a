//! # City Threat Assessment
//!
//! Decision support for the strategy AI: how much danger each city is in, and
//! how many armies it should get to hold.
//!
//! ## Flow
//!
//! ```text
//! ┌──────────────┐    ┌──────────────┐    ┌──────────────────────┐
//! │  Map scan    │───▶│ ThreatRecord │───▶│ CityThreatAssessment │
//! │ (AI loop)    │    │ + danger     │    │  (per city)          │
//! └──────────────┘    └──────────────┘    └──────────┬───────────┘
//!                                                    │ clone
//!                                         ┌──────────▼───────────┐
//!                                         │ what-if branches     │
//!                                         └──────────────────────┘
//! ```
//!
//! The scan uses [`lordsim_map`] accessibility queries to decide which enemy
//! forces can reach a city; weighing distance and strength into a danger
//! value also happens there.
//!
//! ## Key Types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`ThreatRecord`] | One source of danger (stack or ruin) |
//! | [`ThreatCollection`] | Ordered threats against one city |
//! | [`CityThreatAssessment`] | Accumulated danger and reinforcement need for one city |
//! | [`ThreatAnalysis`] | Assessments for all cities, ranked by danger |
//! | [`AssessmentPolicy`] | Defender strength and reinforcement cap |
//! | [`Danger`] | Fixed-point danger, summed exactly |

pub mod analysis;
pub mod assessment;
pub mod city;
pub mod config;
pub mod danger;
pub mod testing;
pub mod threat;

pub use analysis::ThreatAnalysis;
pub use assessment::{CityThreatAssessment, ThreatError};
pub use city::{City, CityId};
pub use config::{AssessmentPolicy, PolicyError};
pub use danger::Danger;
pub use threat::{RuinId, ThreatCollection, ThreatEntry, ThreatRecord, ThreatSource};
