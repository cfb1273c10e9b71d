//! End-to-end itinerary planning against one catalog snapshot.

use tracing::debug;

use crate::catalog::CatalogSnapshot;
use crate::domain::Itinerary;

use super::allocate::allocate;
use super::config::PlannerConfig;
use super::cost::estimate;
use super::validate::{PlanError, TripRequest, validate};

/// Itinerary planner.
///
/// Borrows a catalog snapshot for the duration of one request, so the
/// whole plan is computed against a single consistent view. Planning is a
/// pure function of the request, the snapshot and the configuration.
pub struct Planner<'a> {
    snapshot: &'a CatalogSnapshot,
    config: &'a PlannerConfig,
}

impl<'a> Planner<'a> {
    /// Create a new planner.
    pub fn new(snapshot: &'a CatalogSnapshot, config: &'a PlannerConfig) -> Self {
        Self { snapshot, config }
    }

    /// Plan a trip: validate, select candidates, allocate days, estimate cost.
    pub fn plan(&self, request: &TripRequest) -> Result<Itinerary, PlanError> {
        validate(request, self.config)?;

        let candidates = self.snapshot.select_candidates(&request.interests);
        let days = allocate(&candidates, request.days, self.config.daily_capacity_mins);
        let total_estimated_cost =
            estimate(&days, request.budget, request.days, &self.config.allowances);

        let itinerary = Itinerary {
            days,
            total_estimated_cost,
        };

        debug!(
            days = request.days,
            budget = %request.budget,
            candidates = candidates.len(),
            scheduled = itinerary.slot_count(),
            total = %itinerary.total_estimated_cost,
            "planned itinerary"
        );

        Ok(itinerary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Attraction, AttractionId, BudgetTier, Interests, Money};

    fn attraction(id: u64, duration: u32, price: u64, tags: &[&str]) -> Attraction {
        Attraction::new(
            AttractionId(id),
            format!("Attraction {id}"),
            "natural",
            duration,
            Money::from_major(price),
        )
        .unwrap()
        .with_tags(tags.iter().copied())
    }

    /// Five attractions: durations [120, 90, 200, 300, 60], prices [0, 50, 100, 0, 20].
    fn five_attractions() -> CatalogSnapshot {
        CatalogSnapshot::new(vec![
            attraction(1, 120, 0, &["natural"]),
            attraction(2, 90, 50, &["historical"]),
            attraction(3, 200, 100, &["cultural"]),
            attraction(4, 300, 0, &["natural"]),
            attraction(5, 60, 20, &["historical"]),
        ])
    }

    #[test]
    fn five_attractions_over_three_days() {
        let snapshot = five_attractions();
        let config = PlannerConfig::default();
        let request = TripRequest::new(3, BudgetTier::Medium, Interests::none());

        let itinerary = Planner::new(&snapshot, &config).plan(&request).unwrap();

        assert_eq!(itinerary.days.len(), 3);
        assert_eq!(itinerary.slot_count(), 5);
        for day in &itinerary.days {
            assert!(day.total_minutes() <= 480);
        }
        assert_eq!(
            itinerary.total_estimated_cost,
            Money::from_major(170 + 3 * 1300)
        );
    }

    #[test]
    fn single_day_trip() {
        let snapshot = five_attractions();
        let config = PlannerConfig::default();
        let request = TripRequest::new(1, BudgetTier::Low, Interests::none());

        let itinerary = Planner::new(&snapshot, &config).plan(&request).unwrap();

        assert_eq!(itinerary.days.len(), 1);
        assert_eq!(itinerary.days[0].day, 1);
        let ids: Vec<u64> = itinerary.slots().map(|s| s.attraction_id.0).collect();
        assert_eq!(ids, vec![1, 4, 5]);
    }

    #[test]
    fn week_long_trip_with_three_attractions() {
        let snapshot = CatalogSnapshot::new(vec![
            attraction(1, 300, 10, &["natural"]),
            attraction(2, 300, 20, &["natural"]),
            attraction(3, 300, 30, &["natural"]),
        ]);
        let config = PlannerConfig::default();
        let request = TripRequest::new(7, BudgetTier::High, Interests::none());

        let itinerary = Planner::new(&snapshot, &config).plan(&request).unwrap();

        assert_eq!(itinerary.days.len(), 7);
        for day in &itinerary.days[..3] {
            assert_eq!(day.activities.len(), 1);
        }
        for day in &itinerary.days[3..] {
            assert!(day.is_empty());
        }
        assert_eq!(
            itinerary.total_estimated_cost,
            Money::from_major(60 + 7 * 3500)
        );
    }

    #[test]
    fn interests_select_matching_attractions() {
        let snapshot = five_attractions();
        let config = PlannerConfig::default();
        let interests: Interests = ["historical"].into_iter().collect();
        let request = TripRequest::new(2, BudgetTier::Low, interests);

        let itinerary = Planner::new(&snapshot, &config).plan(&request).unwrap();

        let ids: Vec<u64> = itinerary.slots().map(|s| s.attraction_id.0).collect();
        assert_eq!(ids, vec![5, 2]);
        assert_eq!(
            itinerary.total_estimated_cost,
            Money::from_major(70 + 2 * 550)
        );
    }

    #[test]
    fn empty_catalog_costs_allowance_only() {
        let snapshot = CatalogSnapshot::empty();
        let config = PlannerConfig::default();
        let request = TripRequest::new(4, BudgetTier::Medium, Interests::none());

        let itinerary = Planner::new(&snapshot, &config).plan(&request).unwrap();

        assert_eq!(itinerary.days.len(), 4);
        assert!(itinerary.days.iter().all(|d| d.is_empty()));
        assert_eq!(itinerary.total_estimated_cost, Money::from_major(4 * 1300));
    }

    #[test]
    fn invalid_request_produces_no_itinerary() {
        let snapshot = five_attractions();
        let config = PlannerConfig::default();
        let planner = Planner::new(&snapshot, &config);

        for days in [0, 8] {
            let request = TripRequest::new(days, BudgetTier::Medium, Interests::none());
            assert!(matches!(
                planner.plan(&request),
                Err(PlanError::InvalidRequest(_))
            ));
        }
    }
}
