//! DTOs for the statistics endpoint.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::domain::entities::Statistics;

/// Snapshot of link and click counters.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub total_shortened_links: i64,
    pub total_clicks: i64,
    pub clicks_per_short_link: BTreeMap<String, i64>,
}

impl From<Statistics> for StatsResponse {
    fn from(stats: Statistics) -> Self {
        Self {
            total_shortened_links: stats.total_shortened_links,
            total_clicks: stats.total_clicks(),
            clicks_per_short_link: stats.clicks_per_short_link,
        }
    }
}
