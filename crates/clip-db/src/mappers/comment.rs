//! Comment entity <-> model mapper

use clip_core::entities::Comment;
use clip_core::value_objects::Snowflake;

use crate::models::{CommentModel, CommentWithViewerModel};

impl From<CommentModel> for Comment {
    fn from(model: CommentModel) -> Self {
        Comment {
            id: Snowflake::new(model.id),
            video_id: Snowflake::new(model.video_id),
            author_id: Snowflake::new(model.author_id),
            text: model.text,
            parent_id: model.parent_id.map(Snowflake::new),
            pinned: model.pinned,
            likes_count: model.likes_count,
            created_at: model.created_at,
        }
    }
}

impl From<CommentWithViewerModel> for Comment {
    fn from(model: CommentWithViewerModel) -> Self {
        Comment {
            id: Snowflake::new(model.id),
            video_id: Snowflake::new(model.video_id),
            author_id: Snowflake::new(model.author_id),
            text: model.text,
            parent_id: model.parent_id.map(Snowflake::new),
            pinned: model.pinned,
            likes_count: model.likes_count,
            created_at: model.created_at,
        }
    }
}
