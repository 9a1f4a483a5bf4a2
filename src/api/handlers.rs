//! HTTP request handlers for the compensation engine API.
//!
//! This module contains the handler functions for all API endpoints. The
//! handlers are thin wrappers over [`PayrollService`]: batch endpoints
//! return the engine's coarse success flag, query endpoints return salary
//! records and period lists.
//!
//! [`PayrollService`]: crate::service::PayrollService

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::PeriodKey;
use crate::store::{DirectoryStore, SalaryLedger, TrustedClock};

use super::request::PeriodQuery;
use super::response::{ApiError, ApiErrorResponse, BatchResponse, PeriodsResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router<D, L, C>(state: AppState<D, L, C>) -> Router
where
    D: DirectoryStore + 'static,
    L: SalaryLedger + 'static,
    C: TrustedClock + 'static,
{
    Router::new()
        .route("/rollover", post(rollover_handler::<D, L, C>))
        .route("/migrate", post(migrate_handler::<D, L, C>))
        .route(
            "/employees/:employee_id/recalculate",
            post(recalculate_handler::<D, L, C>),
        )
        .route(
            "/employees/:employee_id/salary",
            get(get_salary_handler::<D, L, C>),
        )
        .route("/periods", get(list_periods_handler::<D, L, C>))
        .route(
            "/periods/:period/salaries",
            get(list_salaries_handler::<D, L, C>),
        )
        .with_state(state)
}

/// Handler for POST /rollover.
///
/// Safe to call on every host activation; a period that already has records
/// reports success without recomputing anything.
async fn rollover_handler<D, L, C>(State(state): State<AppState<D, L, C>>) -> impl IntoResponse
where
    D: DirectoryStore,
    L: SalaryLedger,
    C: TrustedClock,
{
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "processing rollover request");

    let success = state.service().trigger_rollover_if_needed().await;
    if !success {
        warn!(correlation_id = %correlation_id, "rollover batch reported failures");
    }
    Json(BatchResponse { success })
}

/// Handler for POST /migrate.
async fn migrate_handler<D, L, C>(State(state): State<AppState<D, L, C>>) -> impl IntoResponse
where
    D: DirectoryStore,
    L: SalaryLedger,
    C: TrustedClock,
{
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "processing migration request");

    let success = state.service().migrate_period_formats().await;
    if !success {
        warn!(correlation_id = %correlation_id, "migration pass reported failures");
    }
    Json(BatchResponse { success })
}

/// Handler for POST /employees/{employee_id}/recalculate.
async fn recalculate_handler<D, L, C>(
    State(state): State<AppState<D, L, C>>,
    Path(employee_id): Path<String>,
) -> impl IntoResponse
where
    D: DirectoryStore,
    L: SalaryLedger,
    C: TrustedClock,
{
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        employee_id,
        "processing recalculation request"
    );

    let success = state.service().recalculate_for_employee(&employee_id).await;
    Json(BatchResponse { success })
}

/// Handler for GET /employees/{employee_id}/salary?period=...
async fn get_salary_handler<D, L, C>(
    State(state): State<AppState<D, L, C>>,
    Path(employee_id): Path<String>,
    Query(query): Query<PeriodQuery>,
) -> impl IntoResponse
where
    D: DirectoryStore,
    L: SalaryLedger,
    C: TrustedClock,
{
    let period = match query.parse() {
        Ok(period) => period,
        Err(error) => return ApiErrorResponse::from(error).into_response(),
    };

    match state.service().get_salary(&employee_id, &period).await {
        Ok(Some(record)) => Json(record).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ApiError::salary_not_found(&employee_id, &period.to_string())),
        )
            .into_response(),
        Err(error) => {
            warn!(employee_id, %error, "salary lookup failed");
            ApiErrorResponse::from(error).into_response()
        }
    }
}

/// Handler for GET /periods.
async fn list_periods_handler<D, L, C>(State(state): State<AppState<D, L, C>>) -> impl IntoResponse
where
    D: DirectoryStore,
    L: SalaryLedger,
    C: TrustedClock,
{
    match state.service().list_available_periods().await {
        Ok(periods) => Json(PeriodsResponse {
            periods: periods.iter().map(PeriodKey::to_string).collect(),
        })
        .into_response(),
        Err(error) => {
            warn!(%error, "period listing failed");
            ApiErrorResponse::from(error).into_response()
        }
    }
}

/// Handler for GET /periods/{period}/salaries.
async fn list_salaries_handler<D, L, C>(
    State(state): State<AppState<D, L, C>>,
    Path(period): Path<String>,
) -> impl IntoResponse
where
    D: DirectoryStore,
    L: SalaryLedger,
    C: TrustedClock,
{
    let period: PeriodKey = match period.parse() {
        Ok(period) => period,
        Err(error) => return ApiErrorResponse::from(error).into_response(),
    };

    match state.service().list_salaries_for_period(&period).await {
        Ok(records) => Json(records).into_response(),
        Err(error) => {
            warn!(period = %period, %error, "salary listing failed");
            ApiErrorResponse::from(error).into_response()
        }
    }
}
