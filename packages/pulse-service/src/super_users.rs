use std::time::Instant;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use pulse_domain::UserRecord;

use crate::{PulseService, Result, elapsed_ms};

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SuperUsersResponse {
	#[serde(with = "crate::time_serde")]
	pub timestamp: OffsetDateTime,
	pub execution_time_ms: f64,
	pub data: Vec<UserRecord>,
}

impl PulseService {
	/// Active users at or above the configured score cutoff.
	pub async fn super_users(&self) -> Result<SuperUsersResponse> {
		let start = Instant::now();
		let data = self.store.super_users(self.cfg.analytics.super_user_min_score).await?;

		Ok(SuperUsersResponse {
			timestamp: OffsetDateTime::now_utc(),
			execution_time_ms: elapsed_ms(start),
			data,
		})
	}
}
