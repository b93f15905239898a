use serde::{Deserialize, Serialize};

pub type VideoId = i64;

/// A video record. The id is supplied by the caller and unique across the
/// store; name, views and likes are all required to create one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    pub id: VideoId,
    pub name: String,
    pub views: i64,
    pub likes: i64,
}

/// Field values carried by an update request. `None` leaves the stored
/// field untouched; full-replace requests always carry all three.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VideoChanges {
    pub name: Option<String>,
    pub views: Option<i64>,
    pub likes: Option<i64>,
}

impl VideoChanges {
    pub fn apply(self, video: &mut Video) {
        if let Some(name) = self.name {
            video.name = name;
        }
        if let Some(views) = self.views {
            video.views = views;
        }
        if let Some(likes) = self.likes {
            video.likes = likes;
        }
    }
}
