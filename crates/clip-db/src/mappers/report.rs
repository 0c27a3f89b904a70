//! Report <-> model mapper

use clip_core::traits::Report;
use clip_core::value_objects::Snowflake;

use crate::models::ReportModel;

impl From<ReportModel> for Report {
    fn from(model: ReportModel) -> Self {
        Report {
            id: Snowflake::new(model.id),
            reporter_id: Snowflake::new(model.reporter_id),
            video_id: Snowflake::new(model.video_id),
            reason: model.reason,
            details: model.details,
            created_at: model.created_at,
        }
    }
}
