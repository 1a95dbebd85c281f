use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::routing::{get, put};
use axum::{Json, Router};

use crate::entities::report::Report;
use crate::middleware::bearer_auth::BearerAuth;
use crate::middleware::error::CtxResult;
use crate::middleware::mw_ctx::CtxState;
use crate::services::report_service::{
    GetReportsQuery, ReportInput, ReportPage, ReportService, TriageInput,
};

pub fn routes() -> Router<Arc<CtxState>> {
    Router::new()
        .route("/api/reports", get(get_reports).post(create_report))
        .route("/api/reports/my-reports", get(get_my_reports))
        .route("/api/reports/:report_id", put(triage_report))
}

async fn create_report(
    auth_data: BearerAuth,
    State(state): State<Arc<CtxState>>,
    Json(body): Json<ReportInput>,
) -> CtxResult<Json<Report>> {
    let report = ReportService::new(&state.db.reports, &state.db.posts, &state.db.replies)
        .create(&auth_data.user_thing_id(), body)
        .await
        .map_err(|e| auth_data.ctx.to_ctx_error(e.error))?;
    Ok(Json(report))
}

async fn get_reports(
    auth_data: BearerAuth,
    State(state): State<Arc<CtxState>>,
    Query(query): Query<GetReportsQuery>,
) -> CtxResult<Json<ReportPage>> {
    auth_data.require_admin()?;
    let page = ReportService::new(&state.db.reports, &state.db.posts, &state.db.replies)
        .list(query)
        .await
        .map_err(|e| auth_data.ctx.to_ctx_error(e.error))?;
    Ok(Json(page))
}

async fn get_my_reports(
    auth_data: BearerAuth,
    State(state): State<Arc<CtxState>>,
) -> CtxResult<Json<Vec<Report>>> {
    let reports = ReportService::new(&state.db.reports, &state.db.posts, &state.db.replies)
        .list_mine(&auth_data.user_thing_id())
        .await
        .map_err(|e| auth_data.ctx.to_ctx_error(e.error))?;
    Ok(Json(reports))
}

async fn triage_report(
    auth_data: BearerAuth,
    State(state): State<Arc<CtxState>>,
    Path(report_id): Path<String>,
    Json(body): Json<TriageInput>,
) -> CtxResult<Json<Report>> {
    auth_data.require_admin()?;
    let report = ReportService::new(&state.db.reports, &state.db.posts, &state.db.replies)
        .triage(&report_id, &auth_data.user_thing_id(), body)
        .await
        .map_err(|e| auth_data.ctx.to_ctx_error(e.error))?;
    Ok(Json(report))
}
