//! Video service
//!
//! Upload, browse, personalized feed, watch history, watch-later, views,
//! shares, and deletion.

use std::collections::HashMap;

use clip_core::traits::{Bucket, VideoQuery};
use clip_core::{DomainError, Snowflake, User, Video};
use tracing::{info, instrument};

use crate::dto::{
    FilePayload, ShareCountResponse, UploadVideoRequest, VideoDetailResponse, VideoResponse,
    ViewCountResponse, WatchLaterResponse,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Largest page size for video listings
const MAX_LIST_LIMIT: i64 = 100;

const DEFAULT_QUALITY: &str = "720p";

/// Video service
pub struct VideoService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> VideoService<'a> {
    /// Create a new VideoService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Upload a video with optional thumbnail.
    ///
    /// Oversized metadata is truncated rather than rejected. The files are
    /// written to object storage before the row is created; a failed insert
    /// leaves orphaned objects behind, which is acceptable.
    #[instrument(skip(self, request, video_file, thumbnail), fields(title = %request.title))]
    pub async fn upload(
        &self,
        owner_id: Snowflake,
        request: UploadVideoRequest,
        video_file: FilePayload,
        thumbnail: Option<FilePayload>,
    ) -> ServiceResult<VideoResponse> {
        let title = truncate_chars(request.title.trim(), Video::MAX_TITLE_LEN);
        if title.is_empty() {
            return Err(ServiceError::validation("Title is required"));
        }
        let description = truncate_chars(&request.description, Video::MAX_DESCRIPTION_LEN);
        let tags = truncate_chars(&request.tags, Video::MAX_TAGS_LEN);

        let video_url = self
            .ctx
            .storage()
            .upload(video_file.data, &video_file.filename, Bucket::Videos)
            .await?;

        let thumbnail_url = match thumbnail {
            Some(file) => Some(
                self.ctx
                    .storage()
                    .upload(file.data, &file.filename, Bucket::Thumbnails)
                    .await?,
            ),
            None => None,
        };

        let video = Video::new(
            self.ctx.generate_id(),
            owner_id,
            title,
            description,
            tags,
            video_url,
            thumbnail_url,
            request.duration,
            request
                .quality
                .unwrap_or_else(|| DEFAULT_QUALITY.to_string()),
            request.is_short,
        );

        self.ctx.video_repo().create(&video).await?;

        info!(video_id = %video.id, owner_id = %owner_id, "Video uploaded");

        let author = self.ctx.user_repo().find_by_id(owner_id).await?;
        Ok(VideoResponse::from(&video).with_author(author.as_ref()))
    }

    /// Get a single video with its uploader, channel subscriber count, and
    /// the viewer's reaction and subscription state attached
    #[instrument(skip(self))]
    pub async fn get(
        &self,
        video_id: Snowflake,
        viewer: Option<Snowflake>,
    ) -> ServiceResult<VideoDetailResponse> {
        let video = self
            .ctx
            .video_repo()
            .find_by_id(video_id)
            .await?
            .ok_or(DomainError::VideoNotFound(video_id))?;

        let author = self.ctx.user_repo().find_by_id(video.owner_id).await?;
        let channel_subs = self
            .ctx
            .subscription_repo()
            .count_for_channel(video.owner_id)
            .await?;

        let (user_liked, user_subscribed) = match viewer {
            Some(viewer_id) => {
                let state = self.ctx.reaction_repo().find(viewer_id, video_id).await?;
                let subscribed = self
                    .ctx
                    .subscription_repo()
                    .is_subscribed(viewer_id, video.owner_id)
                    .await?;
                (state.map_or(0, |kind| kind.value()), subscribed)
            }
            None => (0, false),
        };

        Ok(VideoDetailResponse {
            video: VideoResponse::from(&video)
                .with_author(author.as_ref())
                .with_reaction(user_liked),
            channel_subs,
            user_subscribed,
        })
    }

    /// Browse videos by filter and ordering
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        mut query: VideoQuery,
        viewer: Option<Snowflake>,
    ) -> ServiceResult<Vec<VideoResponse>> {
        query.limit = query.limit.clamp(1, MAX_LIST_LIMIT);
        let videos = self.ctx.video_repo().list(query).await?;
        self.hydrate(videos, viewer).await
    }

    /// Personalized feed: subscribed channels plus popular uploads
    #[instrument(skip(self))]
    pub async fn feed(&self, user_id: Snowflake, limit: i64) -> ServiceResult<Vec<VideoResponse>> {
        let videos = self
            .ctx
            .video_repo()
            .feed(user_id, limit.clamp(1, MAX_LIST_LIMIT))
            .await?;
        self.hydrate(videos, Some(user_id)).await
    }

    /// Watch history, most recently watched first
    #[instrument(skip(self))]
    pub async fn history(
        &self,
        user_id: Snowflake,
        limit: i64,
    ) -> ServiceResult<Vec<VideoResponse>> {
        let videos = self
            .ctx
            .video_repo()
            .history(user_id, limit.clamp(1, MAX_LIST_LIMIT))
            .await?;
        self.hydrate(videos, Some(user_id)).await
    }

    /// Watch-later list, most recently saved first
    #[instrument(skip(self))]
    pub async fn watch_later(
        &self,
        user_id: Snowflake,
        limit: i64,
    ) -> ServiceResult<Vec<VideoResponse>> {
        let videos = self
            .ctx
            .video_repo()
            .watch_later(user_id, limit.clamp(1, MAX_LIST_LIMIT))
            .await?;
        self.hydrate(videos, Some(user_id)).await
    }

    /// Record a view. Every call counts, including repeats by the same
    /// viewer; known viewers also get a watch history entry.
    #[instrument(skip(self))]
    pub async fn record_view(
        &self,
        video_id: Snowflake,
        viewer: Option<Snowflake>,
    ) -> ServiceResult<ViewCountResponse> {
        let views = self.ctx.video_repo().record_view(video_id, viewer).await?;
        Ok(ViewCountResponse { views })
    }

    /// Toggle a video on the user's watch-later list
    #[instrument(skip(self))]
    pub async fn toggle_watch_later(
        &self,
        user_id: Snowflake,
        video_id: Snowflake,
    ) -> ServiceResult<WatchLaterResponse> {
        let saved = self
            .ctx
            .video_repo()
            .toggle_watch_later(user_id, video_id)
            .await?;
        Ok(WatchLaterResponse { saved })
    }

    /// Record a share
    #[instrument(skip(self))]
    pub async fn share(&self, video_id: Snowflake) -> ServiceResult<ShareCountResponse> {
        let shares = self.ctx.video_repo().add_share(video_id).await?;
        Ok(ShareCountResponse { shares })
    }

    /// Delete a video owned by the caller, cascading its engagement rows
    #[instrument(skip(self))]
    pub async fn delete(&self, video_id: Snowflake, owner_id: Snowflake) -> ServiceResult<()> {
        self.ctx
            .video_repo()
            .delete_owned(video_id, owner_id)
            .await?;

        info!(video_id = %video_id, owner_id = %owner_id, "Video deleted");

        Ok(())
    }

    /// Attach uploader profiles and the viewer's reactions, each fetched in
    /// one batch
    async fn hydrate(
        &self,
        videos: Vec<Video>,
        viewer: Option<Snowflake>,
    ) -> ServiceResult<Vec<VideoResponse>> {
        let mut owner_ids: Vec<Snowflake> = videos.iter().map(|v| v.owner_id).collect();
        owner_ids.sort_unstable();
        owner_ids.dedup();

        let authors: HashMap<Snowflake, User> = self
            .ctx
            .user_repo()
            .find_many(&owner_ids)
            .await?
            .into_iter()
            .map(|user| (user.id, user))
            .collect();

        let reactions: HashMap<Snowflake, i16> = match viewer {
            Some(viewer_id) => {
                let video_ids: Vec<Snowflake> = videos.iter().map(|v| v.id).collect();
                self.ctx
                    .reaction_repo()
                    .find_many(viewer_id, &video_ids)
                    .await?
                    .into_iter()
                    .map(|(video_id, kind)| (video_id, kind.value()))
                    .collect()
            }
            None => HashMap::new(),
        };

        Ok(videos
            .iter()
            .map(|video| {
                VideoResponse::from(video)
                    .with_author(authors.get(&video.owner_id))
                    .with_reaction(reactions.get(&video.id).copied().unwrap_or(0))
            })
            .collect())
    }
}

/// Truncate to at most `max_chars` characters
fn truncate_chars(value: &str, max_chars: usize) -> String {
    value.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("hello", 10), "hello");
        assert_eq!(truncate_chars("hello", 3), "hel");
        // Multi-byte characters count as one
        assert_eq!(truncate_chars("ééééé", 3), "ééé");
    }
}
