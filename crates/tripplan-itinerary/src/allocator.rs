//! POI allocation across the days of a trip.
//!
//! Each day is filled in two phases:
//!
//! 1. **Round-robin**: walk the pool from a cursor shared by all days,
//!    skipping POIs already scheduled and, on rainy days, outdoor POIs.
//!    The walk is bounded to `2 * max(1, pool.len())` steps.
//! 2. **Backfill**: if the day is still short, take unscheduled POIs in pool
//!    order regardless of weather.
//!
//! Backfill means a rainy day can still receive outdoor POIs once the indoor
//! ones are used up. Completeness of the schedule wins over rain compliance.
//!
//! A POI name is scheduled at most once per run.

use std::collections::HashSet;

use tripplan_places::ClassifiedPoi;

/// Allocation state for one itinerary: the rotating cursor and the set of
/// POI names already scheduled. Owned by a single planning call.
#[derive(Debug)]
pub struct PlanningContext<'a> {
    pool: &'a [ClassifiedPoi],
    cursor: usize,
    assigned: HashSet<&'a str>,
}

impl<'a> PlanningContext<'a> {
    pub fn new(pool: &'a [ClassifiedPoi]) -> Self {
        Self {
            pool,
            cursor: 0,
            assigned: HashSet::new(),
        }
    }

    pub fn is_assigned(&self, name: &str) -> bool {
        self.assigned.contains(name)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Phase 1: bounded round-robin from the shared cursor.
    ///
    /// Appends to `selection` until it holds `daily_limit` POIs or the attempt
    /// budget runs out. The cursor keeps advancing across calls.
    pub fn round_robin(&mut self, selection: &mut Vec<&'a str>, rainy: bool, daily_limit: usize) {
        let pool = self.pool;
        if pool.is_empty() {
            return;
        }

        let max_attempts = 2 * pool.len();
        let mut attempts = 0;

        while selection.len() < daily_limit && attempts < max_attempts {
            let poi = &pool[self.cursor % pool.len()];
            self.cursor += 1;
            attempts += 1;

            if self.assigned.contains(poi.name.as_str()) {
                continue;
            }
            if rainy && !poi.is_indoor {
                continue;
            }
            self.accept(selection, poi);
        }
    }

    /// Phase 2: top up from the pool in source order, ignoring weather.
    pub fn backfill(&mut self, selection: &mut Vec<&'a str>, daily_limit: usize) {
        let pool = self.pool;
        for poi in pool {
            if selection.len() >= daily_limit {
                break;
            }
            if self.assigned.contains(poi.name.as_str()) {
                continue;
            }
            self.accept(selection, poi);
        }
    }

    /// Select up to `daily_limit` POIs for the next day
    pub fn select_day(&mut self, rainy: bool, daily_limit: usize) -> Vec<&'a str> {
        let mut selection = Vec::with_capacity(daily_limit.min(self.pool.len()));

        self.round_robin(&mut selection, rainy, daily_limit);
        if selection.len() < daily_limit {
            let before = selection.len();
            self.backfill(&mut selection, daily_limit);
            if rainy && selection.len() > before {
                tracing::debug!(
                    "Backfilled {} POIs ignoring rain",
                    selection.len() - before
                );
            }
        }

        selection
    }

    fn accept(&mut self, selection: &mut Vec<&'a str>, poi: &'a ClassifiedPoi) {
        selection.push(poi.name.as_str());
        self.assigned.insert(poi.name.as_str());
    }
}

/// Allocate POIs for every day; `rainy_days[i]` is the rain flag of day `i`.
///
/// Returns one selection per day, in calendar order.
pub fn allocate(pool: &[ClassifiedPoi], rainy_days: &[bool], daily_limit: usize) -> Vec<Vec<String>> {
    let mut ctx = PlanningContext::new(pool);

    rainy_days
        .iter()
        .map(|&rainy| {
            ctx.select_day(rainy, daily_limit)
                .into_iter()
                .map(str::to_string)
                .collect()
        })
        .collect()
}
