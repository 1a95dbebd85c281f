use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;
use tracing::info;
use validator::Validate;

use crate::{
    database::table_names::{REPORT_TABLE_NAME, USER_TABLE_NAME},
    entities::report::{
        CreateReport, Report, ReportFilter, ReportReason, ReportStatus, ReportType, TriageReport,
    },
    interfaces::repositories::{
        post::PostsRepositoryInterface, reply::RepliesRepositoryInterface,
        report::ReportsRepositoryInterface,
    },
    middleware::{
        error::{AppError, AppResult, CtxResult},
        utils::{
            db_utils::{Pagination, QryOrder},
            string_utils::get_str_thing,
        },
    },
};

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct ReportInput {
    pub report_type: ReportType,
    pub reported_item_id: String,
    pub reason: ReportReason,
    #[serde(default)]
    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: String,
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct TriageInput {
    pub status: ReportStatus,
    #[validate(length(max = 500, message = "Note must be at most 500 characters"))]
    pub admin_note: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct GetReportsQuery {
    pub status: Option<ReportStatus>,
    pub report_type: Option<ReportType>,
    pub order_dir: Option<QryOrder>,
    pub start: Option<u32>,
    pub count: Option<u16>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ReportPage {
    pub reports: Vec<Report>,
    /// Reports matching the filter, not only this page.
    pub total: u32,
}

const DEFAULT_PAGE_SIZE: u16 = 20;
const MAX_PAGE_SIZE: u16 = 100;
const MY_REPORTS_LIMIT: u16 = 50;

pub struct ReportService<'a, R, P, Q>
where
    R: ReportsRepositoryInterface,
    P: PostsRepositoryInterface,
    Q: RepliesRepositoryInterface,
{
    reports_repository: &'a R,
    posts_repository: &'a P,
    replies_repository: &'a Q,
}

impl<'a, R, P, Q> ReportService<'a, R, P, Q>
where
    R: ReportsRepositoryInterface,
    P: PostsRepositoryInterface,
    Q: RepliesRepositoryInterface,
{
    pub fn new(reports_repository: &'a R, posts_repository: &'a P, replies_repository: &'a Q) -> Self {
        Self {
            reports_repository,
            posts_repository,
            replies_repository,
        }
    }

    /// Files a report. A user reports the same item at most once.
    pub async fn create(&self, user_id: &str, data: ReportInput) -> CtxResult<Report> {
        data.validate()?;

        let item = self
            .reported_item(data.report_type, data.reported_item_id.trim())
            .await?;
        let reporter = Thing::from((USER_TABLE_NAME, user_id));

        if self
            .reports_repository
            .get_by_reporter_and_item(&reporter, &item)
            .await?
            .is_some()
        {
            return Err(AppError::Generic {
                description: "You have already reported this content".to_string(),
            }
            .into());
        }

        let report = self
            .reports_repository
            .create(CreateReport {
                reported_by: reporter,
                report_type: data.report_type,
                reported_item: item,
                reason: data.reason,
                description: data.description.trim().to_string(),
            })
            .await?;

        info!(report = %report.id, item = %report.reported_item, reason = %report.reason, "report filed");
        Ok(report)
    }

    /// Reports for the admin queue, newest first unless asked otherwise.
    pub async fn list(&self, query: GetReportsQuery) -> CtxResult<ReportPage> {
        let filter = ReportFilter {
            status: query.status,
            report_type: query.report_type,
        };
        let pagination = Pagination {
            order_dir: query.order_dir,
            count: query.count.unwrap_or(DEFAULT_PAGE_SIZE).min(MAX_PAGE_SIZE),
            start: query.start.unwrap_or(0),
        };

        let reports = self
            .reports_repository
            .list(filter.clone(), pagination)
            .await?;
        let total = self.reports_repository.count(filter).await?;
        Ok(ReportPage { reports, total })
    }

    pub async fn list_mine(&self, user_id: &str) -> CtxResult<Vec<Report>> {
        let reports = self
            .reports_repository
            .list_by_reporter(&Thing::from((USER_TABLE_NAME, user_id)), MY_REPORTS_LIMIT)
            .await?;
        Ok(reports)
    }

    /// Records the admin's decision on a report.
    pub async fn triage(&self, report_id: &str, admin_id: &str, data: TriageInput) -> CtxResult<Report> {
        data.validate()?;
        let report_thing = get_str_thing(report_id, REPORT_TABLE_NAME)?;
        let not_found = || AppError::EntityFailIdNotFound {
            ident: report_id.to_string(),
        };

        self.reports_repository
            .get_by_id(&report_thing)
            .await?
            .ok_or_else(not_found)?;

        let admin_note = data
            .admin_note
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());
        let report = self
            .reports_repository
            .triage(
                &report_thing,
                TriageReport {
                    status: data.status,
                    admin_note,
                    reviewed_by: Thing::from((USER_TABLE_NAME, admin_id)),
                },
            )
            .await?
            .ok_or_else(not_found)?;

        info!(report = %report.id, status = %report.status, "report triaged");
        Ok(report)
    }

    /// Resolves the reported id in the table of its type. Posts and replies
    /// must exist; users live in the identity provider and are taken as is.
    async fn reported_item(&self, report_type: ReportType, item_id: &str) -> AppResult<Thing> {
        let not_found = || AppError::EntityFailIdNotFound {
            ident: item_id.to_string(),
        };
        match report_type {
            ReportType::User if !item_id.contains(':') => {
                if item_id.is_empty() {
                    return Err(AppError::Generic {
                        description: "Reported item is required".to_string(),
                    });
                }
                Ok(Thing::from((USER_TABLE_NAME, item_id)))
            }
            ReportType::User => get_str_thing(item_id, USER_TABLE_NAME),
            ReportType::Post => {
                let thing = get_str_thing(item_id, report_type.table())?;
                let post = self.posts_repository.get_by_id(&thing).await?;
                post.map(|p| p.id).ok_or_else(not_found)
            }
            ReportType::Reply => {
                let thing = get_str_thing(item_id, report_type.table())?;
                let reply = self.replies_repository.get_by_id(&thing).await?;
                reply.map(|r| r.id).ok_or_else(not_found)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_input_parses_wire_names() {
        let input: ReportInput = serde_json::from_value(serde_json::json!({
            "report_type": "reply",
            "reported_item_id": "reply:abc",
            "reason": "hate-speech"
        }))
        .unwrap();
        assert_eq!(input.report_type, ReportType::Reply);
        assert_eq!(input.reason, ReportReason::HateSpeech);
        assert!(input.description.is_empty());
        assert!(input.validate().is_ok());

        let unknown_reason = serde_json::from_value::<ReportInput>(serde_json::json!({
            "report_type": "post",
            "reported_item_id": "post:abc",
            "reason": "boring"
        }));
        assert!(unknown_reason.is_err());
    }

    #[test]
    fn long_texts_are_rejected() {
        let input = ReportInput {
            report_type: ReportType::Post,
            reported_item_id: "post:abc".to_string(),
            reason: ReportReason::Other,
            description: "x".repeat(501),
        };
        assert!(input.validate().is_err());

        let triage = TriageInput {
            status: ReportStatus::Resolved,
            admin_note: Some("x".repeat(501)),
        };
        assert!(triage.validate().is_err());
    }
}
