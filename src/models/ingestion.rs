use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Record of one CSV ingestion run on the server.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct IngestionLog {
    pub id: u64,
    pub filename: String,
    pub records_processed: i64,
    pub errors: Option<String>,
    pub ingested_at: DateTime<Utc>,
}
