use std::time::Instant;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{GroupedQuery, PulseService, Result, elapsed_ms};

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct DailyCount {
	pub date: String,
	pub total: i64,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ActiveUsersPerDayResponse {
	#[serde(with = "crate::time_serde")]
	pub timestamp: OffsetDateTime,
	pub execution_time_ms: f64,
	pub logins: Vec<DailyCount>,
}

impl PulseService {
	/// Distinct users with activity, per log date.
	pub async fn active_users_per_day(&self) -> Result<ActiveUsersPerDayResponse> {
		let start = Instant::now();
		let groups = self.store.grouped_counts(GroupedQuery::LogDates).await?;
		let logins = groups
			.into_iter()
			.map(|group| DailyCount { date: group.key, total: group.total })
			.collect();

		Ok(ActiveUsersPerDayResponse {
			timestamp: OffsetDateTime::now_utc(),
			execution_time_ms: elapsed_ms(start),
			logins,
		})
	}
}
