//! Position cache shared by successive searches.
//!
//! Results are kept in two tables, one per side to move, so the same
//! arrangement reached with a different player on move never aliases. An entry
//! answers any query at the same or a shallower depth, and an update only
//! replaces an entry with one searched at least as deep.

use rustc_hash::FxHashMap;
use std::hash::Hash;

use crate::board::side::Side;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BoundType {
    Exact,
    /// The true value is at least the stored score (the search failed high).
    Lower,
    /// The true value is at most the stored score (the search failed low).
    Upper,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct CacheEntry {
    pub depth: u8,
    pub score: i32,
    pub bound_type: BoundType,
}

pub struct PositionCache<P> {
    maximizing: FxHashMap<P, CacheEntry>,
    minimizing: FxHashMap<P, CacheEntry>,
}

impl<P: Eq + Hash + Clone> Default for PositionCache<P> {
    fn default() -> Self {
        Self {
            maximizing: FxHashMap::default(),
            minimizing: FxHashMap::default(),
        }
    }
}

impl<P: Eq + Hash + Clone> PositionCache<P> {
    pub fn new() -> Self {
        Default::default()
    }

    fn table(&self, side: Side) -> &FxHashMap<P, CacheEntry> {
        if side.maximize_score() {
            &self.maximizing
        } else {
            &self.minimizing
        }
    }

    fn table_mut(&mut self, side: Side) -> &mut FxHashMap<P, CacheEntry> {
        if side.maximize_score() {
            &mut self.maximizing
        } else {
            &mut self.minimizing
        }
    }

    pub fn get(&self, side: Side, position: &P) -> Option<&CacheEntry> {
        self.table(side).get(position)
    }

    /// The entry for `position` if it was searched at least `depth` plies deep.
    pub fn lookup(&self, side: Side, position: &P, depth: u8) -> Option<CacheEntry> {
        self.get(side, position)
            .filter(|entry| entry.depth >= depth)
            .copied()
    }

    pub fn is_hit(&self, side: Side, position: &P, depth: u8) -> bool {
        self.lookup(side, position, depth).is_some()
    }

    /// Records a search result. An existing entry is only replaced when the new
    /// result was searched at least as deep. Returns whether the write happened.
    pub fn update(&mut self, side: Side, position: &P, depth: u8, score: i32, bound_type: BoundType) -> bool {
        let entry = CacheEntry {
            depth,
            score,
            bound_type,
        };
        let table = self.table_mut(side);
        match table.get_mut(position) {
            Some(existing) if existing.depth > depth => false,
            Some(existing) => {
                *existing = entry;
                true
            }
            None => {
                table.insert(position.clone(), entry);
                true
            }
        }
    }

    pub fn clear(&mut self) {
        self.maximizing.clear();
        self.minimizing.clear();
    }

    pub fn len(&self) -> usize {
        self.maximizing.len() + self.minimizing.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deeper_entry_survives_shallower_update() {
        let mut cache = PositionCache::new();
        assert!(cache.update(Side::Computer, &7u32, 4, 120, BoundType::Exact));
        assert!(!cache.update(Side::Computer, &7u32, 2, -50, BoundType::Exact));

        let entry = cache.get(Side::Computer, &7).unwrap();
        assert_eq!(entry.depth, 4);
        assert_eq!(entry.score, 120);
    }

    #[test]
    fn test_equal_or_deeper_update_replaces() {
        let mut cache = PositionCache::new();
        cache.update(Side::Human, &7u32, 3, 10, BoundType::Exact);
        assert!(cache.update(Side::Human, &7u32, 3, 11, BoundType::Exact));
        assert!(cache.update(Side::Human, &7u32, 5, 12, BoundType::Lower));
        let entry = cache.get(Side::Human, &7).unwrap();
        assert_eq!((entry.depth, entry.score), (5, 12));
        assert_eq!(entry.bound_type, BoundType::Lower);
    }

    #[test]
    fn test_hit_requires_enough_depth() {
        let mut cache = PositionCache::new();
        cache.update(Side::Computer, &1u32, 3, 42, BoundType::Exact);
        assert!(cache.is_hit(Side::Computer, &1, 3));
        assert!(cache.is_hit(Side::Computer, &1, 1));
        assert!(!cache.is_hit(Side::Computer, &1, 4));
        assert_eq!(cache.lookup(Side::Computer, &1, 2).map(|entry| entry.score), Some(42));
        assert_eq!(cache.lookup(Side::Computer, &1, 4), None);
    }

    #[test]
    fn test_sides_do_not_alias() {
        let mut cache = PositionCache::new();
        cache.update(Side::Computer, &9u32, 2, 100, BoundType::Exact);
        assert!(!cache.is_hit(Side::Human, &9, 0));
        cache.update(Side::Human, &9u32, 2, -100, BoundType::Exact);
        assert_eq!(cache.get(Side::Computer, &9).unwrap().score, 100);
        assert_eq!(cache.get(Side::Human, &9).unwrap().score, -100);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_clear() {
        let mut cache = PositionCache::new();
        cache.update(Side::Computer, &1u32, 2, 50, BoundType::Exact);
        cache.clear();
        assert!(cache.is_empty());
        assert!(!cache.is_hit(Side::Computer, &1, 0));
    }
}
