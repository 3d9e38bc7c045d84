use async_trait::async_trait;

use crate::error::Result;
use crate::models::AccountSnapshot;

/// Seam between the analysis pipeline and the network. The pipeline only
/// ever sees this trait, so tests can substitute a fixture source.
#[async_trait]
pub trait ActivitySource: Send + Sync {
    /// Fetch the profile, event stream, and repository list for one
    /// account, plus the derived contribution summary when available.
    async fn fetch_snapshot(&self, username: &str) -> Result<AccountSnapshot>;
}
