//! Report service

use chrono::Utc;
use clip_core::traits::Report;
use clip_core::Snowflake;
use tracing::{info, instrument};

use crate::dto::CreateReportRequest;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Report service
pub struct ReportService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReportService<'a> {
    /// Create a new ReportService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// File a report against a video
    #[instrument(skip(self, request), fields(reason = %request.reason))]
    pub async fn create(
        &self,
        reporter_id: Snowflake,
        video_id: Snowflake,
        request: CreateReportRequest,
    ) -> ServiceResult<()> {
        let report = Report {
            id: self.ctx.generate_id(),
            reporter_id,
            video_id,
            reason: request.reason,
            details: request.details,
            created_at: Utc::now(),
        };

        self.ctx.report_repo().create(&report).await?;

        info!(report_id = %report.id, video_id = %video_id, "Report filed");

        Ok(())
    }
}
