//! Video entity <-> model mapper

use clip_core::entities::Video;
use clip_core::value_objects::Snowflake;

use crate::models::VideoModel;

impl From<VideoModel> for Video {
    fn from(model: VideoModel) -> Self {
        Video {
            id: Snowflake::new(model.id),
            owner_id: Snowflake::new(model.owner_id),
            title: model.title,
            description: model.description,
            tags: model.tags,
            video_url: model.video_url,
            thumbnail_url: model.thumbnail_url,
            duration: model.duration,
            quality: model.quality,
            is_short: model.is_short,
            views: model.views,
            likes_count: model.likes_count,
            dislikes_count: model.dislikes_count,
            comments_count: model.comments_count,
            shares: model.shares,
            created_at: model.created_at,
        }
    }
}
