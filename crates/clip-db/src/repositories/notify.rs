//! Notification fan-out helper
//!
//! Engagement writes that notify a user do so inside the transaction that
//! performs the write, so the inbox row appears iff the action committed.

use sqlx::{Postgres, Transaction};

use clip_core::entities::Notification;

/// Insert a notification row inside an open transaction.
///
/// Self-directed notifications are skipped, not inserted: a user never hears
/// about their own action.
pub(crate) async fn insert_notification(
    tx: &mut Transaction<'_, Postgres>,
    notification: &Notification,
) -> Result<(), sqlx::Error> {
    if notification.is_self_directed() {
        return Ok(());
    }

    sqlx::query(
        r#"
        INSERT INTO notifications (id, recipient_id, origin_id, kind, video_id, read, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#,
    )
    .bind(notification.id.into_inner())
    .bind(notification.recipient_id.into_inner())
    .bind(notification.origin_id.into_inner())
    .bind(notification.kind.as_str())
    .bind(notification.video_id.map(clip_core::Snowflake::into_inner))
    .bind(notification.read)
    .bind(notification.created_at)
    .execute(&mut **tx)
    .await?;

    Ok(())
}
