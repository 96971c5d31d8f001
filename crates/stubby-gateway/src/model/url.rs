use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use stubby_core::{ClickStats, UrlRecord};

#[derive(Debug, Serialize, Deserialize)]
pub struct ShortenResponse {
    pub id: String,
    pub short_url: String,
    pub stats_url: String,
    pub destination: String,
    pub is_new: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UrlSummary {
    pub id: String,
    pub destination: String,
    pub created_at: Timestamp,
}

/// Body of `GET /api/stats/{id}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct StatsResponse {
    pub url: UrlSummary,
    pub clicks: u64,
}

impl StatsResponse {
    pub fn new(record: UrlRecord, stats: ClickStats) -> Self {
        Self {
            url: UrlSummary {
                id: record.id.into_string(),
                destination: record.destination,
                created_at: record.created_at,
            },
            clicks: stats.clicks,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
