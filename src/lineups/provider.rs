use anyhow::Result;
use async_trait::async_trait;

use crate::store::models::LineupRecord;

/// Trait that every lineup source must implement.
#[async_trait]
pub trait LineupProvider: Send + Sync {
    /// Fetch the lineup for one match. `Ok(None)` means the source has
    /// not published a lineup for this match yet (expected before
    /// kick-off); `Err` means the request or body parse itself failed.
    async fn fetch_lineup(&self, match_id: u64) -> Result<Option<LineupRecord>>;

    /// Human-readable name for logging.
    fn name(&self) -> &str;
}
