use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::VideoStore;
use crate::error::AppResult;
use crate::models::{Video, VideoChanges, VideoId};

/// Process-local store. The mutex is held across each whole
/// check-then-mutate sequence so concurrent requests cannot race a
/// duplicate insert or a lost update.
#[derive(Default)]
pub struct MemoryVideoStore {
    videos: Mutex<HashMap<VideoId, Video>>,
}

impl MemoryVideoStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VideoStore for MemoryVideoStore {
    async fn get(&self, id: VideoId) -> AppResult<Option<Video>> {
        Ok(self.videos.lock().await.get(&id).cloned())
    }

    async fn insert(&self, video: Video) -> AppResult<bool> {
        let mut videos = self.videos.lock().await;
        if videos.contains_key(&video.id) {
            return Ok(false);
        }
        videos.insert(video.id, video);
        Ok(true)
    }

    async fn update(&self, id: VideoId, changes: VideoChanges) -> AppResult<Option<Video>> {
        let mut videos = self.videos.lock().await;
        match videos.get_mut(&id) {
            Some(video) => {
                changes.apply(video);
                Ok(Some(video.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: VideoId) -> AppResult<bool> {
        Ok(self.videos.lock().await.remove(&id).is_some())
    }
}
