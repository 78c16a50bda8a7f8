//! Anchor slots: where along a word each of its arcs lands.
//!
//! A word touched by `n` arcs is cut into `n + 1` equal parts and every arc
//! gets its own cut. At a word `w`:
//!
//! ```text
//!   arcs arriving from the left          arcs leaving to the right
//!   (far source ... near source)         (far target ... near target)
//!   slot 0 ............ k-1              slot k ............ n-1
//! ```
//!
//! Arriving arcs come first. Among them the one from the farthest source sits
//! rightmost; among the leaving arcs the one to the farthest target sits
//! leftmost. Outer arcs thereby keep their legs outside the legs of the arcs
//! they enclose.

use std::collections::BTreeMap;

use crate::types::WordId;

use super::types::{Relation, Slots};

/// Slots per relation, keyed by the relation's dependent token.
pub type SlotMap = BTreeMap<WordId, Slots>;

/// Compute the start and end slots of every relation.
pub fn assign_slots(relations: &[Relation]) -> SlotMap {
    relations
        .iter()
        .map(|relation| (relation.dependent, slots_for(relations, relation)))
        .collect()
}

fn slots_for(relations: &[Relation], relation: &Relation) -> Slots {
    let (start, end) = relation.endpoints();

    let start_count = relations.iter().filter(|r| r.touches(start)).count();
    let end_count = relations.iter().filter(|r| r.touches(end)).count();

    // Left anchor: after every arc arriving at `start`, then ranked among the
    // arcs leaving `start` with the farthest target first.
    let arriving = relations.iter().filter(|r| r.word_end == start).count();
    let mut targets: Vec<WordId> = relations
        .iter()
        .filter(|r| r.word_start == start)
        .map(|r| r.word_end)
        .collect();
    targets.sort();
    let start_slot = arriving + rank_from_far_end(&targets, end);

    // Right anchor: ranked among the arcs arriving at `end`, farthest source
    // last.
    let mut sources: Vec<WordId> = relations
        .iter()
        .filter(|r| r.word_end == end)
        .map(|r| r.word_start)
        .collect();
    sources.sort();
    let end_slot = rank_from_far_end(&sources, start);

    Slots {
        start: start_slot,
        start_count,
        end: end_slot,
        end_count,
    }
}

/// `len - index - 1` of the first occurrence of `word` in `sorted`.
fn rank_from_far_end(sorted: &[WordId], word: WordId) -> usize {
    sorted
        .iter()
        .position(|&w| w == word)
        .map_or(0, |idx| sorted.len() - idx - 1)
}

/// Slot indices used at `word`, one per arc touching it, in relation order.
pub fn slots_at(relations: &[Relation], slots: &SlotMap, word: WordId) -> Vec<usize> {
    relations
        .iter()
        .filter_map(|r| {
            let s = slots.get(&r.dependent)?;
            if r.word_start == word {
                Some(s.start)
            } else if r.word_end == word {
                Some(s.end)
            } else {
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rel(dependent: usize, head: usize) -> Relation {
        Relation::new(WordId(dependent), WordId(head), "x")
    }

    fn sorted(mut v: Vec<usize>) -> Vec<usize> {
        v.sort();
        v
    }

    #[test]
    fn fan_out_nearest_target_innermost() {
        // word 1 governs 2, 3 and 4
        let relations = vec![rel(2, 1), rel(3, 1), rel(4, 1)];
        let slots = assign_slots(&relations);

        assert_eq!(slots[&WordId(4)].start, 0);
        assert_eq!(slots[&WordId(3)].start, 1);
        assert_eq!(slots[&WordId(2)].start, 2);
        assert_eq!(slots[&WordId(2)].start_count, 3);

        // each target is touched only once
        assert_eq!(slots[&WordId(3)].end, 0);
        assert_eq!(slots[&WordId(3)].end_count, 1);
    }

    #[test]
    fn fan_in_farthest_source_outermost() {
        // word 4 governs 1, 2 and 3
        let relations = vec![rel(1, 4), rel(2, 4), rel(3, 4)];
        let slots = assign_slots(&relations);

        assert_eq!(slots[&WordId(1)].end, 2);
        assert_eq!(slots[&WordId(2)].end, 1);
        assert_eq!(slots[&WordId(3)].end, 0);
        assert_eq!(slots[&WordId(1)].end_count, 3);
    }

    #[test]
    fn arriving_arcs_take_the_first_slots() {
        // maria: (1,3) (1,2) (3,4) (3,5); word 3 has one arrival, two departures
        let relations = vec![rel(1, 3), rel(2, 1), rel(4, 3), rel(5, 3)];
        let slots = assign_slots(&relations);

        assert_eq!(slots[&WordId(1)].end, 0); // (1,3) arrives at 3
        assert_eq!(slots[&WordId(5)].start, 1); // (3,5) farther target
        assert_eq!(slots[&WordId(4)].start, 2); // (3,4) nearer target
        assert_eq!(slots[&WordId(4)].start_count, 3);

        // word 1: (1,3) farther than (1,2)
        assert_eq!(slots[&WordId(1)].start, 0);
        assert_eq!(slots[&WordId(2)].start, 1);
    }

    #[test]
    fn every_word_gets_a_permutation() {
        let relations = vec![rel(1, 3), rel(2, 1), rel(4, 3), rel(5, 3), rel(6, 5)];
        let slots = assign_slots(&relations);
        for w in 1..=6 {
            let used = slots_at(&relations, &slots, WordId(w));
            let n = used.len();
            assert_eq!(sorted(used), (0..n).collect::<Vec<_>>(), "word {w}");
        }
    }

    #[test]
    fn nothing_to_assign() {
        assert!(assign_slots(&[]).is_empty());
    }
}
