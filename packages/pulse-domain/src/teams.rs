use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::records::GroupCount;

/// Per-team statistics reconciled from four grouped counts.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct TeamAggregate {
	pub team: String,
	pub total_members: i64,
	pub active_percentage: f64,
	pub leaders: i64,
	pub completed_projects: i64,
}

/// How to compute a team's active percentage when the team shows up in the
/// active-member counts but not in the membership counts.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ActivePercentagePolicy {
	/// Divide by one, as the legacy service did. Percentages can exceed 100.
	LegacyDenominatorOne,
	/// Report 0.0 when the membership count is unknown.
	ZeroWhenUnknown,
}

/// Merges the four grouped team counts into one aggregate per team.
///
/// The boolean-filtered sources omit teams with zero matches, so each source
/// covers only part of the key set; every pass upserts missing teams with
/// zeroed defaults. Output order is the order teams were first seen across
/// the four passes.
pub fn merge_team_counts(
	members: &[GroupCount],
	active: &[GroupCount],
	leaders: &[GroupCount],
	completed: &[GroupCount],
	policy: ActivePercentagePolicy,
) -> Vec<TeamAggregate> {
	let mut teams = Vec::<TeamAggregate>::new();
	let mut index = HashMap::<String, usize>::new();

	for group in members {
		upsert(&mut teams, &mut index, &group.key).total_members = group.total;
	}
	for group in active {
		let known = index.contains_key(group.key.as_str());
		let team = upsert(&mut teams, &mut index, &group.key);

		team.active_percentage = if team.total_members > 0 {
			round_one_decimal(group.total as f64 * 100.0 / team.total_members as f64)
		} else if known {
			0.0
		} else {
			match policy {
				ActivePercentagePolicy::LegacyDenominatorOne =>
					round_one_decimal(group.total as f64 * 100.0),
				ActivePercentagePolicy::ZeroWhenUnknown => 0.0,
			}
		};
	}
	for group in leaders {
		upsert(&mut teams, &mut index, &group.key).leaders = group.total;
	}
	for group in completed {
		upsert(&mut teams, &mut index, &group.key).completed_projects = group.total;
	}

	teams
}

fn upsert<'a>(
	teams: &'a mut Vec<TeamAggregate>,
	index: &mut HashMap<String, usize>,
	key: &str,
) -> &'a mut TeamAggregate {
	let at = match index.get(key) {
		Some(&at) => at,
		None => {
			index.insert(key.to_string(), teams.len());
			teams.push(TeamAggregate {
				team: key.to_string(),
				total_members: 0,
				active_percentage: 0.0,
				leaders: 0,
				completed_projects: 0,
			});

			teams.len() - 1
		},
	};

	&mut teams[at]
}

fn round_one_decimal(value: f64) -> f64 {
	(value * 10.0).round() / 10.0
}
