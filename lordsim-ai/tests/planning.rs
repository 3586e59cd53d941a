//! End-to-end planning scenarios: a small map, a scan over it, and
//! speculative reinforcement branches.

use lordsim_ai::testing::{stack_threat, FixtureCity, FixtureRuin, FixtureStack};
use lordsim_ai::{
    AssessmentPolicy, CityId, CityThreatAssessment, Danger, ThreatAnalysis, ThreatRecord,
};
use lordsim_map::{
    Accessibility, Building, Mobility, Placed, Position, TerrainCatalog, TerrainGrid,
};
use proptest::prelude::*;
use std::sync::Arc;

#[test]
fn test_two_threats_in_insertion_order() {
    let city = FixtureCity::new(1).defenders(3);
    let mut assessment = CityThreatAssessment::new(&city);
    let threat_a = stack_threat(1, 2, 5.0);
    let threat_b = stack_threat(2, 2, 3.0);

    assessment.add_threat(2.5, &threat_a).unwrap();
    assessment.add_threat(1.5, &threat_b).unwrap();

    assert_eq!(assessment.danger(), Danger::from_int(4));
    assert_eq!(assessment.threats().len(), 2);
    assert_eq!(assessment.threats().get(0).unwrap().record, threat_a);
    assert_eq!(assessment.threats().get(1).unwrap().record, threat_b);
}

#[test]
fn test_clone_then_add_only_to_clone() {
    let city = FixtureCity::new(1).defenders(3);
    let mut original = CityThreatAssessment::new(&city);
    original.add_threat(2.5, &stack_threat(1, 2, 5.0)).unwrap();
    original.add_threat(1.5, &stack_threat(2, 2, 3.0)).unwrap();

    let mut clone = original.clone();
    clone.add_threat(10.0, &stack_threat(3, 2, 9.0)).unwrap();

    assert_eq!(clone.danger(), Danger::from_int(14));
    assert_eq!(original.danger(), Danger::from_int(4));
    assert_eq!(original.threats().len(), 2);
    assert_eq!(clone.defender_count(), original.defender_count());
    assert_eq!(clone.city(), original.city());
}

/// ```text
/// . . . . . . .
/// . C . ~ . E .
/// . . . ~ . . .
/// . . . ~ . R .
/// ```
/// `C` our city, `~` a river, `E` an enemy stack, `R` a ruin.
#[test]
fn test_scan_only_counts_threats_that_can_cross() {
    let catalog = Arc::new(TerrainCatalog::standard());
    let grass = catalog.find("grass").unwrap();
    let water = catalog.find("water").unwrap();
    let mut grid = TerrainGrid::new(7, 4, catalog, grass).unwrap();
    for y in 0..4 {
        grid.set_terrain(Position::new(3, y), water).unwrap();
    }

    let city = FixtureCity::new(1).defenders(1).at(1, 1);
    let enemy = FixtureStack::new(20, 2, 5, 1);
    let ruin = FixtureRuin::new(4, 5, 3);
    let candidates = [
        (ThreatRecord::from_stack(&enemy, 3.0), Mobility::Standard),
        (ThreatRecord::from_ruin(&ruin, 2.0), Mobility::Flying),
    ];

    let scan = |grid: &TerrainGrid| {
        let mut analysis = ThreatAnalysis::assess([&city]);
        for (record, mobility) in &candidates {
            // A threat counts if it can step off its own side of the river.
            let can_cross = reaches(grid, record.origin, city.position(), *mobility);
            if can_cross {
                let distance = record.origin.distance(city.position()) as f32;
                analysis
                    .add_threat(CityId(1), record.strength / distance, record)
                    .unwrap();
            }
        }
        analysis
    };

    let before = scan(&grid);
    let assessment = before.assessment(CityId(1)).unwrap();
    assert_eq!(assessment.threats().len(), 1);
    assert!(assessment.threats().get(0).unwrap().record.is_ruin());
    assert_eq!(assessment.danger(), Danger::from_raw(5_000));

    grid.set_building(Position::new(3, 1), Building::Bridge).unwrap();
    let after = scan(&grid);
    let assessment = after.assessment(CityId(1)).unwrap();
    assert_eq!(assessment.threats().len(), 2);
    assert_eq!(assessment.danger(), Danger::from_raw(12_500));
}

/// Flood fill over `Accessibility::neighbors`; a stand-in for the AI's search.
fn reaches(grid: &TerrainGrid, from: Position, to: Position, mobility: Mobility) -> bool {
    let mut seen = vec![from];
    let mut frontier = vec![from];
    while let Some(pos) = frontier.pop() {
        if pos == to {
            return true;
        }
        for next in grid.neighbors(pos, mobility) {
            if !seen.contains(&next) {
                seen.push(next);
                frontier.push(next);
            }
        }
    }
    false
}

#[test]
fn test_what_if_reinforcement_branches() {
    let cities = [
        FixtureCity::new(1).defenders(1),
        FixtureCity::new(2).defenders(0),
    ];
    let mut analysis = ThreatAnalysis::assess(&cities);
    analysis.add_threat(CityId(1), 4.0, &stack_threat(1, 2, 4.0)).unwrap();
    analysis.add_threat(CityId(2), 2.0, &stack_threat(2, 2, 2.0)).unwrap();
    analysis.evaluate_reinforcements(&AssessmentPolicy::default());
    assert_eq!(analysis.total_reinforcements_needed(), 5);

    let mut all_to_first = analysis.clone();
    all_to_first.supply_reinforcements(CityId(1), 3).unwrap();

    let mut split = analysis.clone();
    split.supply_reinforcements(CityId(1), 1).unwrap();
    split.supply_reinforcements(CityId(2), 2).unwrap();

    assert_eq!(all_to_first.total_reinforcements_needed(), 2);
    assert_eq!(split.total_reinforcements_needed(), 2);
    assert_eq!(analysis.total_reinforcements_needed(), 5);
}

proptest! {
    #[test]
    fn prop_danger_is_order_independent_sum(
        contributions in proptest::collection::vec(0.0f32..1.0e9, 0..32),
        seed in any::<u64>(),
    ) {
        let expected = Danger::from_raw(
            contributions
                .iter()
                .map(|&d| Danger::try_from_f32(d).unwrap().raw())
                .sum(),
        );

        let mut shuffled = contributions.clone();
        let len = shuffled.len();
        if len > 1 {
            let mut state = seed;
            for i in (1..len).rev() {
                state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
                let j = (state >> 33) as usize % (i + 1);
                shuffled.swap(i, j);
            }
        }

        let city = FixtureCity::new(1);
        let mut forward = CityThreatAssessment::new(&city);
        let mut permuted = CityThreatAssessment::new(&city);
        for (i, danger) in contributions.iter().enumerate() {
            forward.add_threat(*danger, &stack_threat(i as u32, 2, 1.0)).unwrap();
        }
        for (i, danger) in shuffled.iter().enumerate() {
            permuted.add_threat(*danger, &stack_threat(i as u32, 2, 1.0)).unwrap();
        }

        prop_assert_eq!(forward.danger(), expected);
        prop_assert_eq!(permuted.danger(), expected);
        prop_assert_eq!(forward.danger(), forward.threats().total_danger());
        prop_assert_eq!(permuted.danger(), permuted.threats().total_danger());
    }

    #[test]
    fn prop_overflow_leaves_total_consistent(
        raws in proptest::collection::vec(0i64..=i64::MAX / 4, 1..16),
    ) {
        let city = FixtureCity::new(1);
        let mut assessment = CityThreatAssessment::new(&city);
        for (i, raw) in raws.iter().enumerate() {
            // Later additions may overflow; those must leave no trace.
            let _ = assessment.add_danger(Danger::from_raw(*raw), &stack_threat(i as u32, 2, 1.0));
            prop_assert_eq!(assessment.danger(), assessment.threats().total_danger());
        }
    }

    #[test]
    fn prop_clone_never_aliases(
        base in proptest::collection::vec(0u32..100, 0..10),
        extra in proptest::collection::vec(0u32..100, 1..10),
    ) {
        let city = FixtureCity::new(7).defenders(2);
        let mut original = CityThreatAssessment::new(&city);
        for (i, d) in base.iter().enumerate() {
            original.add_threat(*d as f32, &stack_threat(i as u32, 1, 1.0)).unwrap();
        }
        let danger_before = original.danger();
        let count_before = original.threats().len();

        let mut clone = original.clone();
        for (i, d) in extra.iter().enumerate() {
            clone.add_threat(*d as f32, &stack_threat(100 + i as u32, 1, 1.0)).unwrap();
        }
        clone.evaluate_reinforcements(&AssessmentPolicy::default());

        prop_assert_eq!(original.danger(), danger_before);
        prop_assert_eq!(original.threats().len(), count_before);
        prop_assert_eq!(original.reinforcements_needed(), 0);
        prop_assert_eq!(clone.threats().len(), count_before + extra.len());
    }
}
