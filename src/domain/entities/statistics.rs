//! Aggregate statistics snapshot.

use serde::Serialize;
use std::collections::BTreeMap;

/// Point-in-time view of the store's aggregate state.
///
/// Produced by [`crate::application::services::StatsService`] from its
/// in-memory cache. The store remains the source of truth; a snapshot may lag
/// behind concurrent writes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Statistics {
    pub total_shortened_links: i64,
    pub clicks_per_short_link: BTreeMap<String, i64>,
}

impl Statistics {
    /// Sum of all cached per-key click counts.
    pub fn total_clicks(&self) -> i64 {
        self.clicks_per_short_link.values().sum()
    }

    /// Keys ordered by click count, highest first, truncated to `limit`.
    pub fn top(&self, limit: usize) -> Vec<(&str, i64)> {
        let mut entries: Vec<(&str, i64)> = self
            .clicks_per_short_link
            .iter()
            .map(|(k, v)| (k.as_str(), *v))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries.truncate(limit);
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Statistics {
        Statistics {
            total_shortened_links: 3,
            clicks_per_short_link: BTreeMap::from([
                ("aaaaaa".to_string(), 2),
                ("bbbbbb".to_string(), 7),
                ("cccccc".to_string(), 2),
            ]),
        }
    }

    #[test]
    fn test_total_clicks() {
        assert_eq!(sample().total_clicks(), 11);
        assert_eq!(Statistics::default().total_clicks(), 0);
    }

    #[test]
    fn test_top_orders_by_clicks_then_key() {
        let stats = sample();
        let top = stats.top(2);

        assert_eq!(top, vec![("bbbbbb", 7), ("aaaaaa", 2)]);
    }
}
