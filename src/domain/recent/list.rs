//! Bounded most-recently-used list of search strings

use serde::{Deserialize, Serialize};

/// Default number of recent searches kept
pub const DEFAULT_MAX_RECENT_SEARCHES: usize = 10;

/// What `add` does when the text is already in the list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Drop the old occurrence and insert at the front
    #[default]
    PromoteToFront,
    /// Leave the list as it is
    KeepExisting,
}

/// Ordered, de-duplicated, size-bounded list, most recent first
///
/// Duplicates are detected by exact, case-sensitive comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentSearchList {
    entries: Vec<String>,
    max_count: usize,
    policy: DuplicatePolicy,
}

impl RecentSearchList {
    pub fn new(max_count: usize) -> Self {
        Self {
            entries: Vec::new(),
            max_count: max_count.max(1),
            policy: DuplicatePolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Builds a list from persisted entries, restoring the invariants if the
    /// stored data violates them (duplicates dropped, tail truncated).
    pub fn from_entries(entries: Vec<String>, max_count: usize) -> Self {
        let mut list = Self::new(max_count);

        for entry in entries {
            if list.entries.len() == list.max_count {
                break;
            }
            if !list.contains(&entry) {
                list.entries.push(entry);
            }
        }

        list
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_count(&self) -> usize {
        self.max_count
    }

    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    pub fn contains(&self, text: &str) -> bool {
        self.position(text).is_some()
    }

    fn position(&self, text: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry == text)
    }

    /// Inserts `text` at the front. Returns whether the list changed.
    pub fn add(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();

        if let Some(index) = self.position(&text) {
            match self.policy {
                DuplicatePolicy::KeepExisting => return false,
                DuplicatePolicy::PromoteToFront => {
                    if index == 0 {
                        return false;
                    }
                    self.entries.remove(index);
                }
            }
        }

        if self.entries.len() >= self.max_count {
            self.entries.truncate(self.max_count - 1);
        }

        self.entries.insert(0, text);
        true
    }

    /// Removes the entry at `index`; out-of-bounds is a no-op
    pub fn delete(&mut self, index: usize) -> Option<String> {
        if index >= self.entries.len() {
            return None;
        }

        Some(self.entries.remove(index))
    }

    /// Returns whether there was anything to clear
    pub fn clear(&mut self) -> bool {
        let had_entries = !self.entries.is_empty();
        self.entries.clear();
        had_entries
    }

    /// Moves an existing entry to the front; absent text is a no-op.
    ///
    /// Promotes regardless of [`DuplicatePolicy`], since re-selecting a saved
    /// search always marks it as the most recent one.
    pub fn update_recent(&mut self, text: &str) -> bool {
        match self.position(text) {
            None | Some(0) => false,
            Some(index) => {
                let entry = self.entries.remove(index);
                self.entries.insert(0, entry);
                true
            }
        }
    }

    /// Changes the bound, dropping least-recent entries if needed
    pub fn resize(&mut self, max_count: usize) {
        self.max_count = max_count.max(1);
        self.entries.truncate(self.max_count);
    }
}

impl Default for RecentSearchList {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_RECENT_SEARCHES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_of(max: usize, items: &[&str]) -> RecentSearchList {
        let mut list = RecentSearchList::new(max);
        for item in items {
            list.add(*item);
        }
        list
    }

    #[test]
    fn test_add_evicts_least_recent() {
        let list = list_of(3, &["a", "b", "c", "d"]);
        assert_eq!(list.entries(), ["d", "c", "b"]);
    }

    #[test]
    fn test_add_twice_keeps_single_front_entry() {
        let list = list_of(10, &["x", "y", "x", "x"]);
        assert_eq!(list.entries(), ["x", "y"]);
    }

    #[test]
    fn test_add_is_case_sensitive() {
        let list = list_of(10, &["Park", "park"]);
        assert_eq!(list.entries(), ["park", "Park"]);
    }

    #[test]
    fn test_add_existing_in_full_list_does_not_evict() {
        let mut list = list_of(3, &["a", "b", "c"]);
        list.add("a");
        assert_eq!(list.entries(), ["a", "c", "b"]);
    }

    #[test]
    fn test_keep_existing_policy_ignores_duplicates() {
        let mut list = RecentSearchList::new(3).with_policy(DuplicatePolicy::KeepExisting);
        list.add("a");
        list.add("b");

        assert!(!list.add("a"));
        assert_eq!(list.entries(), ["b", "a"]);
    }

    #[test]
    fn test_never_exceeds_bound_or_duplicates() {
        let mut list = RecentSearchList::new(4);
        let inputs = ["a", "b", "a", "c", "d", "e", "b", "f", "a", "a", "g", "c"];

        for input in inputs {
            list.add(input);

            assert!(list.len() <= 4);
            let mut sorted = list.entries().to_vec();
            sorted.sort();
            sorted.dedup();
            assert_eq!(sorted.len(), list.len());
            assert_eq!(list.entries()[0], input);
        }
    }

    #[test]
    fn test_delete_out_of_bounds_is_noop() {
        let mut list = list_of(10, &["a", "b"]);

        assert_eq!(list.delete(2), None);
        assert_eq!(list.delete(usize::MAX), None);
        assert_eq!(list.entries(), ["b", "a"]);

        assert_eq!(list.delete(0), Some("b".to_string()));
        assert_eq!(list.entries(), ["a"]);
    }

    #[test]
    fn test_clear_empties_list() {
        let mut list = list_of(10, &["a", "b"]);
        assert!(list.clear());
        assert!(list.is_empty());
        assert!(!list.clear());
        assert!(list.is_empty());
    }

    #[test]
    fn test_update_recent_promotes_present_entry() {
        let mut list = list_of(10, &["a", "b"]);
        assert!(list.update_recent("a"));
        assert_eq!(list.entries(), ["a", "b"]);

        let mut list = list_of(10, &["a", "b", "c", "d"]);
        list.update_recent("b");
        assert_eq!(list.entries(), ["b", "d", "c", "a"]);
    }

    #[test]
    fn test_update_recent_absent_is_noop() {
        let mut list = list_of(10, &["a", "b"]);
        assert!(!list.update_recent("z"));
        assert_eq!(list.entries(), ["b", "a"]);
    }

    #[test]
    fn test_update_recent_promotes_under_keep_existing_policy() {
        let mut list = RecentSearchList::new(5).with_policy(DuplicatePolicy::KeepExisting);
        list.add("a");
        list.add("b");

        assert!(list.update_recent("a"));
        assert_eq!(list.entries(), ["a", "b"]);
    }

    #[test]
    fn test_from_entries_restores_invariants() {
        let stored = vec!["a", "b", "a", "c", "d"]
            .into_iter()
            .map(String::from)
            .collect();
        let list = RecentSearchList::from_entries(stored, 3);

        assert_eq!(list.entries(), ["a", "b", "c"]);
    }

    #[test]
    fn test_resize_truncates_tail() {
        let mut list = list_of(5, &["a", "b", "c", "d"]);
        list.resize(2);

        assert_eq!(list.entries(), ["d", "c"]);
        assert_eq!(list.max_count(), 2);
    }

    #[test]
    fn test_zero_bound_is_clamped() {
        let list = list_of(0, &["a", "b"]);
        assert_eq!(list.entries(), ["b"]);
    }
}
