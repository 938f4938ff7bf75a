use std::collections::HashMap;

use crate::core::{Move, Square};
use crate::render::geometry::direction;

/******************************************\
|==========================================|
|             Arrow Candidates             |
|==========================================|
\******************************************/

/// Plies below this fan out; deeper arrows always stand alone
pub const FAN_PLY_LIMIT: usize = 2;

/// A candidate arrow awaiting its fan slot: the move, the rank of the
/// variation it came from, and its ply index within that variation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub variation: usize,
    pub ply: usize,
    pub mv: Move,
}

impl Candidate {
    pub const fn new(variation: usize, ply: usize, mv: Move) -> Self {
        Self { variation, ply, mv }
    }
}

/// The allocated fan slot for one candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FanSlot {
    pub offset: usize,
    pub total: usize,
    /// Rounded travel direction in degrees; also the lane's direction bucket
    pub direction: i32,
}

/******************************************\
|==========================================|
|           Fan Slot Allocation            |
|==========================================|
\******************************************/

/// Groups candidate arrows into lanes and assigns fan slots.
///
/// A lane is (origin square, rounded travel direction): arrows leaving the
/// same square at the same angle would otherwise paint over each other, so
/// each lane member gets one slot of a lateral fan. Two passes over the
/// shallow (ply 0/1) candidates: the first counts lane sizes, the second
/// hands out running offsets in the caller's order. Because the caller
/// supplies candidates in a fixed order (variation rank, then ply), an
/// unchanged candidate list always reproduces the same slots and the fan
/// never jitters between evaluation updates. Deep candidates (ply 2+) are
/// excluded from lane grouping entirely and each get the lone slot of a
/// one-member lane.
pub fn allocate(candidates: &[Candidate]) -> Vec<FanSlot> {
    let mut totals: HashMap<(Square, i32), usize> = HashMap::new();

    for candidate in candidates.iter().filter(|c| c.ply < FAN_PLY_LIMIT) {
        let key = (
            candidate.mv.from(),
            direction(candidate.mv.from(), candidate.mv.to()),
        );
        *totals.entry(key).or_insert(0) += 1;
    }

    let mut running: HashMap<(Square, i32), usize> = HashMap::new();

    candidates
        .iter()
        .map(|candidate| {
            let angle = direction(candidate.mv.from(), candidate.mv.to());

            if candidate.ply >= FAN_PLY_LIMIT {
                return FanSlot {
                    offset: 0,
                    total: 1,
                    direction: angle,
                };
            }

            let key = (candidate.mv.from(), angle);
            let slot = running.entry(key).or_insert(0);
            let offset = *slot;
            *slot += 1;

            FanSlot {
                offset,
                total: totals[&key],
                direction: angle,
            }
        })
        .collect()
}

/******************************************\
|==========================================|
|                Unit Tests                |
|==========================================|
\******************************************/

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(variation: usize, ply: usize, mv: &str) -> Candidate {
        Candidate::new(variation, ply, mv.parse().unwrap())
    }

    #[test]
    fn test_shared_lane_fans_in_supply_order() {
        // Three arrows out of e2, all rounding to the same direction bucket
        let candidates = vec![
            candidate(0, 0, "e2e4"),
            candidate(1, 0, "e2e3"),
            candidate(2, 0, "e2e4"),
        ];
        let slots = allocate(&candidates);

        assert_eq!(slots[0], FanSlot { offset: 0, total: 3, direction: 90 });
        assert_eq!(slots[1], FanSlot { offset: 1, total: 3, direction: 90 });
        assert_eq!(slots[2], FanSlot { offset: 2, total: 3, direction: 90 });
    }

    #[test]
    fn test_offsets_form_dense_permutation() {
        let candidates = vec![
            candidate(0, 0, "e2e4"),
            candidate(0, 1, "e7e5"),
            candidate(1, 0, "e2e4"),
            candidate(1, 1, "e7e6"),
            candidate(2, 0, "g1f3"),
        ];
        let slots = allocate(&candidates);

        // e2 lane: offsets {0, 1} of 2
        let e2: Vec<usize> = [0, 2].iter().map(|&i| slots[i].offset).collect();
        assert_eq!(e2, vec![0, 1]);
        assert!(slots[0].total == 2 && slots[2].total == 2);

        // e7 arrows point at distinct buckets (-90 both!) -- e7e5 and e7e6
        // share origin and direction, so they fan too
        assert_eq!(slots[1], FanSlot { offset: 0, total: 2, direction: -90 });
        assert_eq!(slots[3], FanSlot { offset: 1, total: 2, direction: -90 });

        // Knight move stands alone
        assert_eq!(slots[4].offset, 0);
        assert_eq!(slots[4].total, 1);
    }

    #[test]
    fn test_different_direction_buckets_split_lanes() {
        // e2e4 travels at 90 degrees, e2d4 at 117: separate lanes
        let candidates = vec![candidate(0, 0, "e2e4"), candidate(1, 0, "e2d4")];
        let slots = allocate(&candidates);

        assert_eq!(slots[0], FanSlot { offset: 0, total: 1, direction: 90 });
        assert_eq!(slots[1], FanSlot { offset: 0, total: 1, direction: 117 });
    }

    #[test]
    fn test_deep_plies_never_fan() {
        // Ply 2+ candidates are excluded from lanes even when they overlap
        let candidates = vec![
            candidate(0, 0, "e2e4"),
            candidate(0, 2, "e2e4"),
            candidate(0, 3, "e2e4"),
        ];
        let slots = allocate(&candidates);

        assert_eq!(slots[0], FanSlot { offset: 0, total: 1, direction: 90 });
        assert_eq!(slots[1], FanSlot { offset: 0, total: 1, direction: 90 });
        assert_eq!(slots[2], FanSlot { offset: 0, total: 1, direction: 90 });
    }

    #[test]
    fn test_allocation_is_deterministic() {
        let candidates = vec![
            candidate(0, 0, "e2e4"),
            candidate(1, 0, "e2e3"),
            candidate(2, 0, "d2d4"),
            candidate(2, 1, "d7d5"),
        ];
        assert_eq!(allocate(&candidates), allocate(&candidates));
    }
}
