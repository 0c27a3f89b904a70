//! PostgreSQL implementation of ReportRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use clip_core::error::DomainError;
use clip_core::traits::{RepoResult, Report, ReportRepository};

use super::error::map_db_error;

/// PostgreSQL implementation of ReportRepository
#[derive(Clone)]
pub struct PgReportRepository {
    pool: PgPool,
}

impl PgReportRepository {
    /// Create a new PgReportRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReportRepository for PgReportRepository {
    #[instrument(skip(self, report), fields(video_id = %report.video_id))]
    async fn create(&self, report: &Report) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO reports (id, reporter_id, video_id, reason, details, created_at)
            SELECT $1, $2, $3, $4, $5, $6
            WHERE EXISTS(SELECT 1 FROM videos WHERE id = $3)
            "#,
        )
        .bind(report.id.into_inner())
        .bind(report.reporter_id.into_inner())
        .bind(report.video_id.into_inner())
        .bind(&report.reason)
        .bind(report.details.as_deref())
        .bind(report.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::VideoNotFound(report.video_id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgReportRepository>();
    }
}
