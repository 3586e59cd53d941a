//! Threat assessments for all of a player's cities.
//!
//! Cities are kept ordered by id so that iteration, and anything the planner
//! derives from it, is the same on every run.

use crate::assessment::{CityThreatAssessment, ThreatError};
use crate::city::{City, CityId};
use crate::config::AssessmentPolicy;
use crate::danger::Danger;
use crate::threat::ThreatRecord;
use std::collections::BTreeMap;
use tracing::instrument;

#[derive(Debug, Clone, Default)]
pub struct ThreatAnalysis {
    cities: BTreeMap<CityId, CityThreatAssessment>,
}

impl ThreatAnalysis {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh assessments for every city given.
    #[instrument(skip_all, name = "assess_cities")]
    pub fn assess<'a, C, I>(cities: I) -> Self
    where
        C: City + 'a,
        I: IntoIterator<Item = &'a C>,
    {
        let mut analysis = Self::new();
        for city in cities {
            analysis.insert(CityThreatAssessment::new(city));
        }
        log::debug!("Assessing {} cities", analysis.len());
        analysis
    }

    /// Add or replace a city's assessment, returning the replaced one.
    pub fn insert(&mut self, assessment: CityThreatAssessment) -> Option<CityThreatAssessment> {
        self.cities.insert(assessment.city(), assessment)
    }

    pub fn add_threat(
        &mut self,
        city: CityId,
        danger: f32,
        record: &ThreatRecord,
    ) -> Result<(), ThreatError> {
        self.cities
            .get_mut(&city)
            .ok_or(ThreatError::UnknownCity(city))?
            .add_threat(danger, record)
    }

    pub fn assessment(&self, city: CityId) -> Option<&CityThreatAssessment> {
        self.cities.get(&city)
    }

    pub fn assessment_mut(&mut self, city: CityId) -> Option<&mut CityThreatAssessment> {
        self.cities.get_mut(&city)
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CityThreatAssessment> + '_ {
        self.cities.values()
    }

    #[instrument(skip_all, name = "evaluate_reinforcements")]
    pub fn evaluate_reinforcements(&mut self, policy: &AssessmentPolicy) {
        for assessment in self.cities.values_mut() {
            assessment.evaluate_reinforcements(policy);
        }
    }

    /// Mark `count` armies as sent to `city`. Returns what it still needs.
    pub fn supply_reinforcements(&mut self, city: CityId, count: u32) -> Result<u32, ThreatError> {
        self.cities
            .get_mut(&city)
            .map(|assessment| assessment.supply_reinforcements(count))
            .ok_or(ThreatError::UnknownCity(city))
    }

    /// Cities with their danger, most endangered first; ties by city id.
    pub fn cities_by_danger(&self) -> Vec<(CityId, Danger)> {
        let mut ranked: Vec<_> = self
            .cities
            .values()
            .map(|a| (a.city(), a.danger()))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        ranked
    }

    /// The city in the most danger, if any city faces danger at all.
    pub fn most_endangered(&self) -> Option<CityId> {
        self.cities_by_danger()
            .into_iter()
            .find(|&(_, danger)| danger > Danger::ZERO)
            .map(|(city, _)| city)
    }

    pub fn total_reinforcements_needed(&self) -> u32 {
        self.cities
            .values()
            .map(CityThreatAssessment::reinforcements_needed)
            .fold(0, u32::saturating_add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{stack_threat, FixtureCity};

    fn cities() -> Vec<FixtureCity> {
        vec![
            FixtureCity::new(3).defenders(1),
            FixtureCity::new(1).defenders(2),
            FixtureCity::new(2).defenders(0),
        ]
    }

    #[test]
    fn test_assess_orders_by_city() {
        let analysis = ThreatAnalysis::assess(&cities());
        let ids: Vec<_> = analysis.iter().map(|a| a.city()).collect();
        assert_eq!(ids, vec![CityId(1), CityId(2), CityId(3)]);
    }

    #[test]
    fn test_unknown_city() {
        let mut analysis = ThreatAnalysis::assess(&cities());
        let err = analysis
            .add_threat(CityId(99), 1.0, &stack_threat(1, 2, 1.0))
            .unwrap_err();
        assert_eq!(err, ThreatError::UnknownCity(CityId(99)));
        assert!(analysis.supply_reinforcements(CityId(99), 1).is_err());
    }

    #[test]
    fn test_ranking_and_ties() {
        let mut analysis = ThreatAnalysis::assess(&cities());
        analysis.add_threat(CityId(3), 2.0, &stack_threat(1, 2, 1.0)).unwrap();
        analysis.add_threat(CityId(1), 2.0, &stack_threat(2, 2, 1.0)).unwrap();
        analysis.add_threat(CityId(2), 5.0, &stack_threat(3, 2, 1.0)).unwrap();

        assert_eq!(
            analysis.cities_by_danger(),
            vec![
                (CityId(2), Danger::from_int(5)),
                (CityId(1), Danger::from_int(2)),
                (CityId(3), Danger::from_int(2))
            ]
        );
        assert_eq!(analysis.most_endangered(), Some(CityId(2)));
    }

    #[test]
    fn test_no_danger_means_no_most_endangered() {
        let analysis = ThreatAnalysis::assess(&cities());
        assert_eq!(analysis.most_endangered(), None);
    }

    #[test]
    fn test_reinforcement_totals() {
        let mut analysis = ThreatAnalysis::assess(&cities());
        analysis.add_threat(CityId(1), 4.0, &stack_threat(1, 2, 1.0)).unwrap();
        analysis.add_threat(CityId(2), 1.0, &stack_threat(2, 2, 1.0)).unwrap();
        analysis.evaluate_reinforcements(&AssessmentPolicy::default());

        assert_eq!(analysis.assessment(CityId(1)).unwrap().reinforcements_needed(), 2);
        assert_eq!(analysis.assessment(CityId(2)).unwrap().reinforcements_needed(), 1);
        assert_eq!(analysis.total_reinforcements_needed(), 3);

        assert_eq!(analysis.supply_reinforcements(CityId(1), 1), Ok(1));
        assert_eq!(analysis.total_reinforcements_needed(), 2);
    }

    #[test]
    fn test_branch_does_not_leak() {
        let mut analysis = ThreatAnalysis::assess(&cities());
        analysis.add_threat(CityId(1), 1.0, &stack_threat(1, 2, 1.0)).unwrap();

        let mut branch = analysis.clone();
        branch.add_threat(CityId(1), 3.0, &stack_threat(2, 2, 1.0)).unwrap();

        assert_eq!(analysis.assessment(CityId(1)).unwrap().danger(), Danger::ONE);
        assert_eq!(branch.assessment(CityId(1)).unwrap().danger(), Danger::from_int(4));
    }
}
