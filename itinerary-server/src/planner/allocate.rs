//! Greedy first-fit allocation of attractions into days.
//!
//! Candidates are walked once in rank order. Each one goes into the first
//! day that still has enough time left for it. No attraction is scheduled
//! twice, and a day may end up with no visits at all when candidates run
//! out.

use std::collections::HashSet;

use crate::domain::{ActivitySlot, Attraction, AttractionId, DayPlan, TimeOfDay};

/// Attractions admitted to one day so far.
struct Bucket<'a> {
    remaining_mins: u32,
    admitted: Vec<&'a Attraction>,
}

/// Distribute `candidates` over `days` days.
///
/// Returns exactly `days` plans numbered `1..=days`. The visit time
/// assigned to any day never exceeds `daily_capacity_mins`. Within a day,
/// slots keep the order in which they were admitted and are labelled
/// Morning, Afternoon, then Evening.
pub fn allocate(candidates: &[&Attraction], days: u32, daily_capacity_mins: u32) -> Vec<DayPlan> {
    let mut buckets: Vec<Bucket<'_>> = (0..days)
        .map(|_| Bucket {
            remaining_mins: daily_capacity_mins,
            admitted: Vec::new(),
        })
        .collect();
    let mut used: HashSet<AttractionId> = HashSet::new();
    let shortest_remaining = suffix_minimums(candidates);

    for (i, &candidate) in candidates.iter().enumerate() {
        // Stop once no day can take even the shortest remaining candidate.
        let most_room = buckets.iter().map(|b| b.remaining_mins).max().unwrap_or(0);
        if most_room < shortest_remaining[i] {
            break;
        }

        if used.contains(&candidate.id) {
            continue;
        }

        let duration = candidate.visit_duration_mins;
        if let Some(bucket) = buckets.iter_mut().find(|b| b.remaining_mins >= duration) {
            bucket.remaining_mins -= duration;
            bucket.admitted.push(candidate);
            used.insert(candidate.id);
        }
    }

    buckets
        .into_iter()
        .zip(1..)
        .map(|(bucket, day)| DayPlan {
            day,
            activities: bucket
                .admitted
                .iter()
                .enumerate()
                .map(|(slot, a)| ActivitySlot::from_attraction(TimeOfDay::for_slot(slot), a))
                .collect(),
        })
        .collect()
}

/// `result[i]` is the shortest visit duration among `candidates[i..]`.
fn suffix_minimums(candidates: &[&Attraction]) -> Vec<u32> {
    let mut mins = vec![u32::MAX; candidates.len()];
    let mut shortest = u32::MAX;
    for (i, candidate) in candidates.iter().enumerate().rev() {
        shortest = shortest.min(candidate.visit_duration_mins);
        mins[i] = shortest;
    }
    mins
}
