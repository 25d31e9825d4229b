use std::time::Instant;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use pulse_domain::{ActivePercentagePolicy, TeamAggregate, merge_team_counts};

use crate::{GroupedQuery, PulseService, Result, elapsed_ms};

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct TeamInsightsResponse {
	#[serde(with = "crate::time_serde")]
	pub timestamp: OffsetDateTime,
	pub execution_time_ms: f64,
	pub teams: Vec<TeamAggregate>,
}

impl PulseService {
	/// Per-team statistics merged from four grouped counts.
	///
	/// The four queries run sequentially; any failure aborts the whole
	/// operation with no partial aggregate.
	pub async fn team_insights(&self) -> Result<TeamInsightsResponse> {
		let start = Instant::now();
		let members = self.store.grouped_counts(GroupedQuery::TeamMembers).await?;
		let active = self.store.grouped_counts(GroupedQuery::ActiveTeamMembers).await?;
		let leaders = self.store.grouped_counts(GroupedQuery::TeamLeaders).await?;
		let completed =
			self.store.grouped_counts(GroupedQuery::TeamsWithCompletedProjects).await?;
		let teams =
			merge_team_counts(&members, &active, &leaders, &completed, self.percentage_policy());

		Ok(TeamInsightsResponse {
			timestamp: OffsetDateTime::now_utc(),
			execution_time_ms: elapsed_ms(start),
			teams,
		})
	}

	fn percentage_policy(&self) -> ActivePercentagePolicy {
		if self.cfg.analytics.legacy_active_percentage_fallback {
			ActivePercentagePolicy::LegacyDenominatorOne
		} else {
			ActivePercentagePolicy::ZeroWhenUnknown
		}
	}
}
