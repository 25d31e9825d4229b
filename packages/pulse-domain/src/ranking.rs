use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::records::UserRecord;

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct CountryCount {
	pub country: String,
	pub total: i64,
}

/// Tallies users per country and returns the `limit` largest tallies, largest
/// first. Records with a missing or empty country are counted under
/// `fallback_label`, not dropped. Ties keep first-seen order (stable sort), so
/// the result is deterministic for a given input order.
pub fn rank_countries(
	users: &[UserRecord],
	fallback_label: &str,
	limit: usize,
) -> Vec<CountryCount> {
	let mut tallies = Vec::<CountryCount>::new();
	let mut index = HashMap::<String, usize>::new();

	for user in users {
		let country = match user.country.as_deref() {
			Some(country) if !country.is_empty() => country,
			_ => fallback_label,
		};

		match index.get(country) {
			Some(&at) => tallies[at].total += 1,
			None => {
				index.insert(country.to_string(), tallies.len());
				tallies.push(CountryCount { country: country.to_string(), total: 1 });
			},
		}
	}

	tallies.sort_by(|a, b| b.total.cmp(&a.total));
	tallies.truncate(limit);

	tallies
}
