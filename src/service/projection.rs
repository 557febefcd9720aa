//! Filter & projection engine.
//!
//! Pure and re-entrant: takes a snapshot of records plus the active filter
//! set and reference coordinate, returns records paired with their computed
//! distance. The canonical record is never mutated.

use std::collections::HashSet;

use serde::Serialize;

use crate::domain::adapters::MapAnnotation;
use crate::domain::models::{Climb, Coordinate, Discipline};
use crate::geo::haversine_miles;

/// Why a projection came back empty. "Pick a discipline" and "nothing in
/// range" are distinct states for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EmptyReason {
    NoFiltersSelected,
    NoMatches,
}

/// A climb paired with its distance from the reference coordinate.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectedClimb {
    pub climb: Climb,
    pub distance_miles: f64,
}

/// Ordered result set handed to presentation.
#[derive(Debug, Clone, Serialize)]
pub struct Projection {
    pub items: Vec<ProjectedClimb>,
    pub empty_reason: Option<EmptyReason>,
}

impl Projection {
    /// Map annotations, 1:1 with the projected items.
    pub fn annotations(&self) -> Vec<MapAnnotation> {
        self.items
            .iter()
            .map(|p| MapAnnotation::from(&p.climb))
            .collect()
    }
}

/// Project `all` onto the filtered, distance-sorted list shown to the user.
///
/// A record survives when its discipline list intersects `active`. Surviving
/// records are paired with their great-circle distance from `reference`,
/// records at or beyond `max_distance_miles` are discarded, and the rest are
/// sorted by distance ascending with ties broken by id ascending.
pub fn project(
    all: &[Climb],
    active: &HashSet<Discipline>,
    reference: Coordinate,
    max_distance_miles: f64,
) -> Projection {
    if active.is_empty() {
        return Projection {
            items: Vec::new(),
            empty_reason: Some(EmptyReason::NoFiltersSelected),
        };
    }

    let mut items: Vec<ProjectedClimb> = all
        .iter()
        .filter(|climb| climb.type_list().iter().any(|d| active.contains(d)))
        .map(|climb| ProjectedClimb {
            distance_miles: haversine_miles(reference, climb.coordinate()),
            climb: climb.clone(),
        })
        .filter(|p| p.distance_miles < max_distance_miles)
        .collect();

    items.sort_by(|a, b| {
        a.distance_miles
            .total_cmp(&b.distance_miles)
            .then_with(|| a.climb.id.cmp(&b.climb.id))
    });

    let empty_reason = items.is_empty().then_some(EmptyReason::NoMatches);
    Projection {
        items,
        empty_reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_MAX_DISTANCE_MILES;
    use crate::test_utils::fixtures;

    fn active(disciplines: &[Discipline]) -> HashSet<Discipline> {
        disciplines.iter().copied().collect()
    }

    const REFERENCE: Coordinate = Coordinate::new(39.0, -105.0);

    #[test]
    fn empty_filter_set_yields_no_filters_selected() {
        let climbs = vec![fixtures::climb_at(1, 39.0, -105.0)];
        let projection = project(&climbs, &HashSet::new(), REFERENCE, 120.0);
        assert!(projection.items.is_empty());
        assert_eq!(projection.empty_reason, Some(EmptyReason::NoFiltersSelected));
    }

    #[test]
    fn empty_filter_set_wins_even_with_no_records() {
        let projection = project(&[], &HashSet::new(), REFERENCE, 120.0);
        assert_eq!(projection.empty_reason, Some(EmptyReason::NoFiltersSelected));
    }

    #[test]
    fn non_intersecting_disciplines_are_excluded() {
        let climbs = vec![
            fixtures::climb_with_type_at(1, "Sport", 39.01, -105.0),
            fixtures::climb_with_type_at(2, "Ice", 39.01, -105.01),
        ];
        let projection = project(&climbs, &active(&[Discipline::Ice]), REFERENCE, 120.0);
        assert_eq!(projection.items.len(), 1);
        assert_eq!(projection.items[0].climb.id, 2);
        assert_eq!(projection.empty_reason, None);
    }

    #[test]
    fn no_survivors_yields_no_matches() {
        let climbs = vec![fixtures::climb_with_type_at(1, "Sport", 39.01, -105.0)];
        let projection = project(&climbs, &active(&[Discipline::Boulder]), REFERENCE, 120.0);
        assert!(projection.items.is_empty());
        assert_eq!(projection.empty_reason, Some(EmptyReason::NoMatches));
    }

    #[test]
    fn records_at_or_beyond_the_radius_are_discarded() {
        let climbs = vec![
            // ~3 miles north of the reference
            fixtures::climb_with_type_at(1, "Sport", 39.0435, -105.0),
            // ~150 miles north
            fixtures::climb_with_type_at(2, "Sport", 41.17, -105.0),
        ];
        let projection = project(
            &climbs,
            &active(&[Discipline::Sport]),
            REFERENCE,
            DEFAULT_MAX_DISTANCE_MILES,
        );
        assert_eq!(projection.items.len(), 1);
        assert_eq!(projection.items[0].climb.id, 1);
        assert!((projection.items[0].distance_miles - 3.0).abs() < 0.1);
    }

    #[test]
    fn output_is_sorted_ascending_and_within_radius() {
        let climbs = vec![
            fixtures::climb_with_type_at(3, "Sport", 39.5, -105.0),
            fixtures::climb_with_type_at(1, "Sport", 39.01, -105.0),
            fixtures::climb_with_type_at(2, "Sport", 39.2, -105.0),
        ];
        let projection = project(&climbs, &active(&[Discipline::Sport]), REFERENCE, 120.0);

        let distances: Vec<f64> = projection.items.iter().map(|p| p.distance_miles).collect();
        assert!(distances.windows(2).all(|w| w[0] <= w[1]));
        assert!(distances.iter().all(|d| *d < 120.0));
        let ids: Vec<i64> = projection.items.iter().map(|p| p.climb.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn equidistant_records_tie_break_by_id() {
        // Same point, so identical distances.
        let climbs = vec![
            fixtures::climb_with_type_at(20, "Sport", 39.05, -105.0),
            fixtures::climb_with_type_at(5, "Sport", 39.05, -105.0),
        ];
        let projection = project(&climbs, &active(&[Discipline::Sport]), REFERENCE, 120.0);
        let ids: Vec<i64> = projection.items.iter().map(|p| p.climb.id).collect();
        assert_eq!(ids, vec![5, 20]);
    }

    #[test]
    fn projection_does_not_mutate_input_records() {
        let climbs = vec![fixtures::climb_with_type_at(1, "Sport", 39.01, -105.0)];
        let before = climbs[0].clone();
        let _ = project(&climbs, &active(&[Discipline::Sport]), REFERENCE, 120.0);
        assert_eq!(climbs[0].latitude, before.latitude);
        assert_eq!(climbs[0].type_tag, before.type_tag);
    }

    #[test]
    fn annotations_are_one_to_one_with_items() {
        let climbs = vec![
            fixtures::climb_with_type_at(1, "Sport", 39.01, -105.0),
            fixtures::climb_with_type_at(2, "Sport", 39.02, -105.0),
        ];
        let projection = project(&climbs, &active(&[Discipline::Sport]), REFERENCE, 120.0);
        let annotations = projection.annotations();
        assert_eq!(annotations.len(), projection.items.len());
        assert_eq!(annotations[0].id, projection.items[0].climb.id);
    }
}
