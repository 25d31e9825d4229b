use std::time::Instant;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use pulse_domain::{CountryCount, rank_countries};

use crate::{PulseService, Result, elapsed_ms};

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct TopCountriesResponse {
	#[serde(with = "crate::time_serde")]
	pub timestamp: OffsetDateTime,
	pub execution_time_ms: f64,
	pub countries: Vec<CountryCount>,
}

impl PulseService {
	/// Country ranking over the super-user set. The reported time covers the
	/// upstream fetch as well as the tally.
	pub async fn top_countries(&self) -> Result<TopCountriesResponse> {
		let start = Instant::now();
		let super_users =
			self.store.super_users(self.cfg.analytics.super_user_min_score).await?;
		let countries = rank_countries(
			&super_users,
			&self.cfg.analytics.unknown_country_label,
			self.cfg.analytics.country_ranking_limit,
		);

		Ok(TopCountriesResponse {
			timestamp: OffsetDateTime::now_utc(),
			execution_time_ms: elapsed_ms(start),
			countries,
		})
	}
}
