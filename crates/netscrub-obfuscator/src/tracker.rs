//! Run-scoped sequence numbering for the consistent replacement policy

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use crate::matcher::Category;

#[derive(Debug, Default)]
struct TrackerState {
    counters: HashMap<Category, u64>,
    assigned: HashMap<(Category, String), u64>,
}

/// Assigns each distinct (category, canonical value) pair a stable sequence
/// number. Counters are independent per category and start at 1.
///
/// The lookup-or-assign step runs under one lock, so concurrent callers never
/// see a number handed out twice.
#[derive(Debug, Default)]
pub struct ConsistentTracker {
    state: Mutex<TrackerState>,
}

impl ConsistentTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the number for this value, assigning the next one on first sight
    pub fn assign(&self, category: Category, canonical: &str) -> u64 {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let key = (category, canonical.to_string());

        if let Some(seq) = state.assigned.get(&key) {
            return *seq;
        }

        let counter = state.counters.entry(category).or_insert(0);
        *counter += 1;
        let seq = *counter;
        state.assigned.insert(key, seq);

        seq
    }

    /// Highest number handed out so far for a category, 0 if none
    pub fn count(&self, category: Category) -> u64 {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.counters.get(&category).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_assign_is_idempotent() {
        let tracker = ConsistentTracker::new();

        assert_eq!(tracker.assign(Category::Ipv4, "192.168.1.20"), 1);
        assert_eq!(tracker.assign(Category::Ipv4, "192.168.1.30"), 2);
        assert_eq!(tracker.assign(Category::Ipv4, "192.168.1.20"), 1);
        assert_eq!(tracker.count(Category::Ipv4), 2);
    }

    #[test]
    fn test_categories_have_independent_counters() {
        let tracker = ConsistentTracker::new();

        assert_eq!(tracker.assign(Category::Ipv6, "::2fa:bf9"), 1);
        assert_eq!(tracker.assign(Category::Ipv4, "192.168.1.30"), 1);
        assert_eq!(tracker.assign(Category::Ipv4, "10.0.0.1"), 2);
        assert_eq!(tracker.count(Category::Ipv6), 1);
        assert_eq!(tracker.count(Category::Mac), 0);
    }

    #[test]
    fn test_concurrent_assignment_is_injective() {
        let tracker = Arc::new(ConsistentTracker::new());

        let handles: Vec<_> = (0..8)
            .map(|worker| {
                let tracker = Arc::clone(&tracker);
                thread::spawn(move || {
                    (0..100)
                        .map(|i| {
                            // Half the values are shared between workers
                            let value = if i % 2 == 0 {
                                format!("10.0.0.{i}")
                            } else {
                                format!("10.{worker}.0.{i}")
                            };
                            (value.clone(), tracker.assign(Category::Ipv4, &value))
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut by_value = HashMap::new();
        for handle in handles {
            for (value, seq) in handle.join().unwrap() {
                let previous = by_value.insert(value, seq);
                assert!(previous.is_none_or(|p| p == seq));
            }
        }

        let numbers: HashSet<u64> = by_value.values().copied().collect();
        assert_eq!(numbers.len(), by_value.len());
        assert_eq!(tracker.count(Category::Ipv4), by_value.len() as u64);
        assert!(numbers.iter().all(|n| *n >= 1 && *n <= by_value.len() as u64));
    }
}
