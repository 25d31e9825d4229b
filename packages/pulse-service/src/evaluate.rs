use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;

use crate::{PulseService, Result};

pub const SUPER_USERS_PATH: &str = "/v1/users/super";
pub const TOP_COUNTRIES_PATH: &str = "/v1/analytics/top-countries";
pub const TEAM_INSIGHTS_PATH: &str = "/v1/analytics/team-insights";
pub const ACTIVE_USERS_PER_DAY_PATH: &str = "/v1/analytics/active-users-per-day";

/// Outcome of probing one analytic operation.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct EndpointProbe {
	pub status: u16,
	pub time_ms: f64,
	pub valid_response: bool,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct EvaluationReport {
	#[serde(with = "crate::time_serde")]
	pub timestamp: OffsetDateTime,
	pub tested_endpoints: BTreeMap<String, EndpointProbe>,
}

impl PulseService {
	/// Exercises the four analytic operations in-process and reports each
	/// one's status, reported execution time, and output shape.
	///
	/// Probes are isolated: a failing operation yields a 500/invalid entry
	/// and the remaining operations still run, so the report always carries
	/// one entry per endpoint.
	pub async fn evaluation(&self) -> Result<EvaluationReport> {
		let mut tested_endpoints = BTreeMap::new();

		tested_endpoints.insert(
			SUPER_USERS_PATH.to_string(),
			probe(SUPER_USERS_PATH, self.super_users().await, "data"),
		);
		tested_endpoints.insert(
			TOP_COUNTRIES_PATH.to_string(),
			probe(TOP_COUNTRIES_PATH, self.top_countries().await, "countries"),
		);
		tested_endpoints.insert(
			TEAM_INSIGHTS_PATH.to_string(),
			probe(TEAM_INSIGHTS_PATH, self.team_insights().await, "teams"),
		);
		tested_endpoints.insert(
			ACTIVE_USERS_PER_DAY_PATH.to_string(),
			probe(ACTIVE_USERS_PER_DAY_PATH, self.active_users_per_day().await, "logins"),
		);

		Ok(EvaluationReport { timestamp: OffsetDateTime::now_utc(), tested_endpoints })
	}
}

/// Maps one operation's outcome to a probe entry. The response is inspected
/// through its serialized form, the same shape the transport layer sends, so
/// the check covers the output contract rather than the Rust types.
fn probe<T>(path: &str, result: Result<T>, list_field: &str) -> EndpointProbe
where
	T: Serialize,
{
	let response = match result {
		Ok(response) => response,
		Err(err) => {
			tracing::warn!(path, %err, "Evaluation probe failed.");

			return EndpointProbe { status: 500, time_ms: 0.0, valid_response: false };
		},
	};
	let body = match serde_json::to_value(&response) {
		Ok(body) => body,
		Err(err) => {
			tracing::warn!(path, %err, "Evaluation probe produced an unserializable body.");

			return EndpointProbe { status: 500, time_ms: 0.0, valid_response: false };
		},
	};
	let time_ms = body.get("execution_time_ms").and_then(Value::as_f64).unwrap_or(0.0);
	let valid_response = body.get(list_field).map(Value::is_array).unwrap_or(false);

	EndpointProbe { status: 200, time_ms, valid_response }
}
