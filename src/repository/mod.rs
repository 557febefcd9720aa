use async_trait::async_trait;

use crate::domain::models::Climb;
use crate::error::Result;

pub mod sqlite;

pub use sqlite::{ClimbRepository, SettingsRepository};

/// Keyed local store for climb records. Upsert is idempotent per id and
/// last-write-wins, so overlapping fetch completions may call it in any
/// order.
#[async_trait]
pub trait ClimbStore: Send + Sync {
    async fn upsert_batch(&self, climbs: &[Climb]) -> Result<()>;
    async fn load_all(&self) -> Result<Vec<Climb>>;
    async fn get(&self, id: i64) -> Result<Option<Climb>>;
    async fn count(&self) -> Result<i64>;
}
