//! Batch orchestration: one generation call per entry, all-or-nothing
//!
//! Every call starts immediately (no concurrency cap; batches are small and
//! user-driven) and the batch suspends once on the joint join. If any call
//! fails, the whole batch fails and no report is published for any entry.

use chrono::Utc;
use futures::future::try_join_all;

use super::types::{BugInput, GeneratedReport};
use crate::gemini::client::GenerateApi;
use crate::gemini::error::GenerateError;


/// Generate one report per entry, preserving submission order.
///
/// Each result carries the id of the entry it was generated for; the id,
/// not the position, is the authoritative correlation key.
pub async fn generate_batch(
    api: &impl GenerateApi,
    entries: &[BugInput],
) -> Result<Vec<GeneratedReport>, GenerateError> {
    let calls = entries.iter().map(|bug| async move {
        let body = api.generate(bug).await?;
        Ok(GeneratedReport {
            original_id: bug.id.clone(),
            generated_at: Utc::now(),
            body,
        })
    });
    try_join_all(calls).await
}
