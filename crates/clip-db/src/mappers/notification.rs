//! Notification entity <-> model mapper

use clip_core::entities::{Notification, NotificationKind};
use clip_core::error::DomainError;
use clip_core::traits::NotificationView;
use clip_core::value_objects::Snowflake;

use crate::models::{NotificationModel, NotificationViewModel};

fn decode_kind(kind: &str) -> Result<NotificationKind, DomainError> {
    NotificationKind::from_str(kind)
        .ok_or_else(|| DomainError::InternalError(format!("Unknown notification kind: {kind}")))
}

impl TryFrom<NotificationModel> for Notification {
    type Error = DomainError;

    fn try_from(model: NotificationModel) -> Result<Self, Self::Error> {
        Ok(Notification {
            id: Snowflake::new(model.id),
            recipient_id: Snowflake::new(model.recipient_id),
            origin_id: Snowflake::new(model.origin_id),
            kind: decode_kind(&model.kind)?,
            video_id: model.video_id.map(Snowflake::new),
            read: model.read,
            created_at: model.created_at,
        })
    }
}

impl TryFrom<NotificationViewModel> for NotificationView {
    type Error = DomainError;

    fn try_from(model: NotificationViewModel) -> Result<Self, Self::Error> {
        Ok(NotificationView {
            notification: Notification {
                id: Snowflake::new(model.id),
                recipient_id: Snowflake::new(model.recipient_id),
                origin_id: Snowflake::new(model.origin_id),
                kind: decode_kind(&model.kind)?,
                video_id: model.video_id.map(Snowflake::new),
                read: model.read,
                created_at: model.created_at,
            },
            origin_username: model.origin_username,
            origin_avatar: model.origin_avatar,
            video_title: model.video_title,
        })
    }
}
