//! Nesting heights for arcs.
//!
//! Relations are visited from the narrowest span to the widest. When a
//! relation is reached, everything its span contains has already been
//! visited, so its height is fixed by what is nested inside it:
//!
//! ```text
//! height(R) = |{ height(C) : C visited, C != R, C inside R }| + 1
//! ```
//!
//! The set holds height *values*. Two nested siblings that ended up on the
//! same level count once, so a parent of several same-level arcs sits only one
//! level above them.

use std::collections::{BTreeMap, BTreeSet};

use crate::types::WordId;

use super::types::Relation;

/// Height per relation, keyed by the relation's dependent token.
pub type HeightMap = BTreeMap<WordId, u32>;

/// Relations sorted by ascending span width.
///
/// The sort is stable, so equal widths keep their input (token) order. This is
/// also the order in which heights are assigned.
pub fn by_span(relations: &[Relation]) -> Vec<&Relation> {
    let mut sorted: Vec<&Relation> = relations.iter().collect();
    sorted.sort_by_key(|r| r.span());
    sorted
}

/// Assign every relation a nesting height of at least 1.
pub fn assign_heights(relations: &[Relation]) -> HeightMap {
    let sorted = by_span(relations);

    let mut visited: Vec<(&Relation, u32)> = Vec::with_capacity(sorted.len());
    let mut heights = HeightMap::new();

    for relation in sorted {
        let nested: BTreeSet<u32> = visited
            .iter()
            .filter(|(other, _)| other.dependent != relation.dependent && relation.contains(other))
            .map(|&(_, height)| height)
            .collect();
        let height = nested.len() as u32 + 1;

        visited.push((relation, height));
        heights.insert(relation.dependent, height);
    }

    heights
}

/// Overall diagram height: the highest level, 0 without relations.
pub fn max_height(heights: &HeightMap) -> u32 {
    heights.values().copied().max().unwrap_or(0)
}
