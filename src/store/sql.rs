use async_trait::async_trait;
use sqlx::sqlite::{SqlitePool, SqliteRow};
use sqlx::Row;

use super::VideoStore;
use crate::error::AppResult;
use crate::models::{Video, VideoChanges, VideoId};

/// Table-backed store over a SQLx connection pool.
pub struct SqlVideoStore {
    pool: SqlitePool,
}

impl SqlVideoStore {
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let pool = SqlitePool::connect(database_url).await?;
        Ok(SqlVideoStore { pool })
    }

    /// Create the videos table if it is not there yet. Safe to run on
    /// every startup.
    pub async fn init(&self) -> anyhow::Result<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS videos (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                views INTEGER NOT NULL,
                likes INTEGER NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

fn video_from_row(row: &SqliteRow) -> Video {
    Video {
        id: row.get("id"),
        name: row.get("name"),
        views: row.get("views"),
        likes: row.get("likes"),
    }
}

#[async_trait]
impl VideoStore for SqlVideoStore {
    async fn get(&self, id: VideoId) -> AppResult<Option<Video>> {
        let row = sqlx::query("SELECT id, name, views, likes FROM videos WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(video_from_row))
    }

    async fn insert(&self, video: Video) -> AppResult<bool> {
        let result = sqlx::query(
            "INSERT INTO videos (id, name, views, likes) VALUES (?, ?, ?, ?)
             ON CONFLICT(id) DO NOTHING",
        )
        .bind(video.id)
        .bind(&video.name)
        .bind(video.views)
        .bind(video.likes)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn update(&self, id: VideoId, changes: VideoChanges) -> AppResult<Option<Video>> {
        // Read and write in one transaction so the row cannot change (or
        // vanish) between the merge and the commit.
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query("SELECT id, name, views, likes FROM videos WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        let Some(row) = row else {
            return Ok(None);
        };

        let mut video = video_from_row(&row);
        changes.apply(&mut video);

        sqlx::query("UPDATE videos SET name = ?, views = ?, likes = ? WHERE id = ?")
            .bind(&video.name)
            .bind(video.views)
            .bind(video.likes)
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        Ok(Some(video))
    }

    async fn delete(&self, id: VideoId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM videos WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn memory_store() -> SqlVideoStore {
        let store = SqlVideoStore::new("sqlite::memory:").await.unwrap();
        store.init().await.unwrap();
        store
    }

    fn sample(id: VideoId) -> Video {
        Video {
            id,
            name: format!("video {}", id),
            views: 100,
            likes: 5,
        }
    }

    #[tokio::test]
    async fn insert_then_get_round_trips() {
        let store = memory_store().await;
        assert!(store.insert(sample(1)).await.unwrap());
        assert_eq!(store.get(1).await.unwrap(), Some(sample(1)));
    }

    #[tokio::test]
    async fn duplicate_insert_keeps_first_record() {
        let store = memory_store().await;
        assert!(store.insert(sample(1)).await.unwrap());

        let mut second = sample(1);
        second.views = 999;
        assert!(!store.insert(second).await.unwrap());
        assert_eq!(store.get(1).await.unwrap(), Some(sample(1)));
    }

    #[tokio::test]
    async fn update_merges_into_existing_row() {
        let store = memory_store().await;
        store.insert(sample(1)).await.unwrap();

        let changes = VideoChanges {
            name: Some("renamed".to_string()),
            ..VideoChanges::default()
        };
        let updated = store.update(1, changes).await.unwrap().unwrap();
        assert_eq!(updated.name, "renamed");
        assert_eq!(updated.views, 100);
        assert_eq!(updated.likes, 5);
        assert_eq!(store.get(1).await.unwrap(), Some(updated));
    }

    #[tokio::test]
    async fn update_of_missing_id_is_none() {
        let store = memory_store().await;
        let outcome = store.update(9, VideoChanges::default()).await.unwrap();
        assert_eq!(outcome, None);
    }

    #[tokio::test]
    async fn delete_reports_absence() {
        let store = memory_store().await;
        store.insert(sample(1)).await.unwrap();
        assert!(store.delete(1).await.unwrap());
        assert!(!store.delete(1).await.unwrap());
    }

    #[tokio::test]
    async fn init_is_idempotent() {
        let store = memory_store().await;
        store.init().await.unwrap();
        store.insert(sample(1)).await.unwrap();
        store.init().await.unwrap();
        assert_eq!(store.get(1).await.unwrap(), Some(sample(1)));
    }

    #[tokio::test]
    async fn records_persist_across_connections() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}?mode=rwc", dir.path().join("videos.db").display());

        {
            let store = SqlVideoStore::new(&url).await.unwrap();
            store.init().await.unwrap();
            assert!(store.insert(sample(7)).await.unwrap());
        }

        let store = SqlVideoStore::new(&url).await.unwrap();
        store.init().await.unwrap();
        assert_eq!(store.get(7).await.unwrap(), Some(sample(7)));
    }
}
