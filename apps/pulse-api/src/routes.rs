use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;

use pulse_service::{
	ACTIVE_USERS_PER_DAY_PATH, ActiveUsersPerDayResponse, EvaluationReport, FlushReport,
	IngestPayload, IngestResponse, SUPER_USERS_PATH, SuperUsersResponse, TEAM_INSIGHTS_PATH,
	TOP_COUNTRIES_PATH, TeamInsightsResponse, TopCountriesResponse,
};

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/v1/users", post(ingest))
		.route(SUPER_USERS_PATH, get(super_users))
		.route(TOP_COUNTRIES_PATH, get(top_countries))
		.route(TEAM_INSIGHTS_PATH, get(team_insights))
		.route(ACTIVE_USERS_PER_DAY_PATH, get(active_users_per_day))
		.route("/v1/evaluation", get(evaluation))
		.with_state(state)
}

pub fn admin_router(state: AppState) -> Router {
	Router::new().route("/v1/admin/flush", post(flush)).with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn ingest(
	State(state): State<AppState>,
	Json(payload): Json<IngestPayload>,
) -> Result<Json<IngestResponse>, ApiError> {
	let response = state.service.ingest(payload).await?;

	Ok(Json(response))
}

async fn super_users(State(state): State<AppState>) -> Result<Json<SuperUsersResponse>, ApiError> {
	let response = state.service.super_users().await?;

	Ok(Json(response))
}

async fn top_countries(
	State(state): State<AppState>,
) -> Result<Json<TopCountriesResponse>, ApiError> {
	let response = state.service.top_countries().await?;

	Ok(Json(response))
}

async fn team_insights(
	State(state): State<AppState>,
) -> Result<Json<TeamInsightsResponse>, ApiError> {
	let response = state.service.team_insights().await?;

	Ok(Json(response))
}

async fn active_users_per_day(
	State(state): State<AppState>,
) -> Result<Json<ActiveUsersPerDayResponse>, ApiError> {
	let response = state.service.active_users_per_day().await?;

	Ok(Json(response))
}

async fn evaluation(State(state): State<AppState>) -> Result<Json<EvaluationReport>, ApiError> {
	let response = state.service.evaluation().await?;

	Ok(Json(response))
}

async fn flush(State(state): State<AppState>) -> Result<Json<FlushReport>, ApiError> {
	let response = state.service.flush().await?;

	Ok(Json(response))
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	message: String,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: String,
	message: String,
}

impl From<pulse_service::Error> for ApiError {
	fn from(err: pulse_service::Error) -> Self {
		let (status, error_code) = match &err {
			pulse_service::Error::InvalidRequest { .. } =>
				(StatusCode::BAD_REQUEST, "invalid_request"),
			pulse_service::Error::Store { .. } =>
				(StatusCode::INTERNAL_SERVER_ERROR, "store_query_failed"),
		};

		Self { status, error_code: error_code.to_string(), message: err.to_string() }
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body = ErrorBody { error_code: self.error_code, message: self.message };

		(self.status, Json(body)).into_response()
	}
}
