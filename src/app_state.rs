use std::sync::Arc;

use crate::{
    config::{Config, StoreBackend},
    store::{MemoryVideoStore, SqlVideoStore, VideoStore},
    video_resource::{UpdateMode, VideoResource},
};

#[derive(Clone)]
pub struct AppState {
    pub video_resource: VideoResource,
    pub config: Config,
}

impl AppState {
    /// Build the configured store and wire it into the resource. The
    /// update mode follows the backend: table-backed deployments expose
    /// partial updates, in-memory deployments expose full replaces.
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let (store, update_mode): (Arc<dyn VideoStore>, UpdateMode) = match config.store.backend {
            StoreBackend::Sql => {
                let store = SqlVideoStore::new(&config.database.url).await?;
                store.init().await?;
                (Arc::new(store), UpdateMode::Partial)
            }
            StoreBackend::Memory => (Arc::new(MemoryVideoStore::new()), UpdateMode::Replace),
        };
        tracing::info!(
            "store backend: {:?}, update mode: {:?}",
            config.store.backend,
            update_mode
        );

        Ok(Self {
            video_resource: VideoResource::new(store, update_mode),
            config,
        })
    }
}
