// Selector: deterministic, conflict-aware application of a recommendation pool.
// Commits go through the edit log; the section map itself is never mutated in place.

pub mod edit_log;
pub mod selector;
