use crate::database::client::Db;
use crate::database::table_names::{
    POST_TABLE_NAME, REPLY_TABLE_NAME, REPORT_TABLE_NAME, USER_TABLE_NAME,
};
use crate::entities::report::{
    CreateReport, Report, ReportFilter, ReportReason, ReportStatus, ReportType, TriageReport,
};
use crate::interfaces::repositories::report::ReportsRepositoryInterface;
use crate::middleware::error::{AppError, AppResult};
use crate::middleware::utils::db_utils::{Pagination, QryOrder};
use async_trait::async_trait;
use std::sync::Arc;
use strum::VariantNames;
use surrealdb::sql::Thing;

#[derive(Debug)]
pub struct ReportsRepository {
    client: Arc<Db>,
}

impl ReportsRepository {
    pub fn new(client: Arc<Db>) -> Self {
        Self { client }
    }

    pub(in crate::database) async fn mutate_db(&self) -> AppResult<()> {
        let sql = format!("
    DEFINE TABLE IF NOT EXISTS {REPORT_TABLE_NAME} SCHEMAFULL;
    DEFINE FIELD IF NOT EXISTS reported_by ON TABLE {REPORT_TABLE_NAME} TYPE record<{USER_TABLE_NAME}>;
    DEFINE INDEX IF NOT EXISTS reported_by_idx ON TABLE {REPORT_TABLE_NAME} COLUMNS reported_by;
    DEFINE FIELD IF NOT EXISTS report_type ON TABLE {REPORT_TABLE_NAME} TYPE string ASSERT $value INSIDE {:?};
    DEFINE FIELD IF NOT EXISTS reported_item ON TABLE {REPORT_TABLE_NAME} TYPE record<{POST_TABLE_NAME}|{REPLY_TABLE_NAME}|{USER_TABLE_NAME}>;
    DEFINE INDEX IF NOT EXISTS reported_item_idx ON TABLE {REPORT_TABLE_NAME} COLUMNS reported_item;
    DEFINE INDEX IF NOT EXISTS reporter_item_unique_idx ON TABLE {REPORT_TABLE_NAME} COLUMNS reported_by, reported_item UNIQUE;
    DEFINE FIELD IF NOT EXISTS reason ON TABLE {REPORT_TABLE_NAME} TYPE string ASSERT $value INSIDE {:?};
    DEFINE FIELD IF NOT EXISTS description ON TABLE {REPORT_TABLE_NAME} TYPE string DEFAULT '' ASSERT string::len($value) <= 500;
    DEFINE FIELD IF NOT EXISTS status ON TABLE {REPORT_TABLE_NAME} TYPE string DEFAULT 'pending' ASSERT $value INSIDE {:?};
    DEFINE INDEX IF NOT EXISTS status_idx ON TABLE {REPORT_TABLE_NAME} COLUMNS status;
    DEFINE FIELD IF NOT EXISTS reviewed_by ON TABLE {REPORT_TABLE_NAME} TYPE option<record<{USER_TABLE_NAME}>>;
    DEFINE FIELD IF NOT EXISTS reviewed_at ON TABLE {REPORT_TABLE_NAME} TYPE option<datetime>;
    DEFINE FIELD IF NOT EXISTS admin_note ON TABLE {REPORT_TABLE_NAME} TYPE option<string>;
    DEFINE FIELD IF NOT EXISTS created_at ON TABLE {REPORT_TABLE_NAME} TYPE datetime DEFAULT time::now() VALUE $before OR time::now();
    DEFINE FIELD IF NOT EXISTS updated_at ON TABLE {REPORT_TABLE_NAME} TYPE datetime DEFAULT time::now() VALUE time::now();
    DEFINE INDEX IF NOT EXISTS created_at_idx ON TABLE {REPORT_TABLE_NAME} COLUMNS created_at;
    ", ReportType::VARIANTS, ReportReason::VARIANTS, ReportStatus::VARIANTS);
        self.client.query(sql).await?.check()?;
        Ok(())
    }
}

fn filter_clause(filter: &ReportFilter) -> String {
    let mut conditions = vec![];
    if filter.status.is_some() {
        conditions.push("status=$status");
    }
    if filter.report_type.is_some() {
        conditions.push("report_type=$report_type");
    }
    if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    }
}

#[async_trait]
impl ReportsRepositoryInterface for ReportsRepository {
    async fn create(&self, data: CreateReport) -> AppResult<Report> {
        let report: Option<Report> = self.client.create(REPORT_TABLE_NAME).content(data).await?;
        report.ok_or(AppError::Generic {
            description: "report was not created".to_string(),
        })
    }

    async fn get_by_id(&self, report_id: &Thing) -> AppResult<Option<Report>> {
        let report: Option<Report> = self
            .client
            .select((REPORT_TABLE_NAME, report_id.id.to_raw()))
            .await?;
        Ok(report)
    }

    async fn get_by_reporter_and_item(
        &self,
        reporter: &Thing,
        item: &Thing,
    ) -> AppResult<Option<Report>> {
        let reports = self
            .client
            .query(format!(
                "SELECT * FROM {REPORT_TABLE_NAME} WHERE reported_by=$reporter AND reported_item=$item LIMIT 1;"
            ))
            .bind(("reporter", reporter.clone()))
            .bind(("item", item.clone()))
            .await?
            .take::<Vec<Report>>(0)?;
        Ok(reports.into_iter().next())
    }

    async fn list(&self, filter: ReportFilter, pagination: Pagination) -> AppResult<Vec<Report>> {
        let order_dir = pagination.order_dir.unwrap_or(QryOrder::DESC).to_string();
        let where_clause = filter_clause(&filter);
        let reports = self
            .client
            .query(format!(
                "SELECT * FROM {REPORT_TABLE_NAME} {where_clause} ORDER BY created_at {order_dir} LIMIT $limit START $start;"
            ))
            .bind(("status", filter.status))
            .bind(("report_type", filter.report_type))
            .bind(("limit", pagination.count))
            .bind(("start", pagination.start))
            .await?
            .take::<Vec<Report>>(0)?;
        Ok(reports)
    }

    async fn count(&self, filter: ReportFilter) -> AppResult<u32> {
        let where_clause = filter_clause(&filter);
        let count = self
            .client
            .query(format!(
                "RETURN array::len((SELECT id FROM {REPORT_TABLE_NAME} {where_clause}));"
            ))
            .bind(("status", filter.status))
            .bind(("report_type", filter.report_type))
            .await?
            .take::<Option<i64>>(0)?;
        Ok(count.unwrap_or(0) as u32)
    }

    async fn list_by_reporter(&self, reporter: &Thing, limit: u16) -> AppResult<Vec<Report>> {
        let reports = self
            .client
            .query(format!(
                "SELECT * FROM {REPORT_TABLE_NAME} WHERE reported_by=$reporter ORDER BY created_at DESC LIMIT $limit;"
            ))
            .bind(("reporter", reporter.clone()))
            .bind(("limit", limit))
            .await?
            .take::<Vec<Report>>(0)?;
        Ok(reports)
    }

    async fn triage(&self, report_id: &Thing, data: TriageReport) -> AppResult<Option<Report>> {
        let reports = self
            .client
            .query(format!(
                "UPDATE {REPORT_TABLE_NAME} SET status=$status, admin_note=$admin_note, \
                reviewed_by=$reviewed_by, reviewed_at=time::now() WHERE id=$report;"
            ))
            .bind(("report", report_id.clone()))
            .bind(("status", data.status))
            .bind(("admin_note", data.admin_note))
            .bind(("reviewed_by", data.reviewed_by))
            .await?
            .take::<Vec<Report>>(0)?;
        Ok(reports.into_iter().next())
    }
}
