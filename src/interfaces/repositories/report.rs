use async_trait::async_trait;
use surrealdb::sql::Thing;

use crate::entities::report::{CreateReport, Report, ReportFilter, TriageReport};
use crate::middleware::error::AppResult;
use crate::middleware::utils::db_utils::Pagination;

#[async_trait]
pub trait ReportsRepositoryInterface {
    async fn create(&self, data: CreateReport) -> AppResult<Report>;
    async fn get_by_id(&self, report_id: &Thing) -> AppResult<Option<Report>>;
    /// The report `reporter` already filed against `item`, if any.
    async fn get_by_reporter_and_item(
        &self,
        reporter: &Thing,
        item: &Thing,
    ) -> AppResult<Option<Report>>;
    async fn list(&self, filter: ReportFilter, pagination: Pagination) -> AppResult<Vec<Report>>;
    async fn count(&self, filter: ReportFilter) -> AppResult<u32>;
    /// Newest first.
    async fn list_by_reporter(&self, reporter: &Thing, limit: u16) -> AppResult<Vec<Report>>;
    async fn triage(&self, report_id: &Thing, data: TriageReport) -> AppResult<Option<Report>>;
}
