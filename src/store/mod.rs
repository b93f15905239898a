// Storage backends for video records.

mod memory;
mod sql;

pub use memory::MemoryVideoStore;
pub use sql::SqlVideoStore;

use async_trait::async_trait;

use crate::error::AppResult;
use crate::models::{Video, VideoChanges, VideoId};

/// Key-value style repository of video records keyed by id.
///
/// Every operation is atomic with respect to concurrent callers: the
/// existence check and the mutation it guards run under the backend's own
/// serialization (a transaction for the table store, the map mutex for the
/// in-memory store), so the resource layer never does an unguarded
/// check-then-act.
#[async_trait]
pub trait VideoStore: Send + Sync {
    /// Look up a record by id.
    async fn get(&self, id: VideoId) -> AppResult<Option<Video>>;

    /// Insert a new record. Returns false when the id is already taken;
    /// the existing record is left as it was.
    async fn insert(&self, video: Video) -> AppResult<bool>;

    /// Apply `changes` to an existing record and return the updated
    /// record, or None when the id does not exist.
    async fn update(&self, id: VideoId, changes: VideoChanges) -> AppResult<Option<Video>>;

    /// Remove a record. Returns false when the id does not exist.
    async fn delete(&self, id: VideoId) -> AppResult<bool>;
}
