use serde::{Deserialize, Serialize};

/// One user document as ingested and indexed by the store. Re-ingesting the
/// same `id` replaces the whole document.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct UserRecord {
	pub id: String,
	pub name: String,
	pub age: i32,
	pub score: i64,
	pub active: bool,
	#[serde(default)]
	pub country: Option<String>,
	pub team: Team,
	#[serde(default)]
	pub logs: Vec<LogEntry>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Team {
	pub name: String,
	pub leader: bool,
	#[serde(default)]
	pub projects: Vec<Project>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Project {
	pub name: String,
	pub completed: bool,
}

/// Activity log entry. Dates are opaque strings; the store groups by the raw
/// value.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct LogEntry {
	pub date: String,
	pub action: String,
}

/// One row of a grouped aggregation query: a group key and its count.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct GroupCount {
	pub key: String,
	pub total: i64,
}

impl GroupCount {
	pub fn new(key: impl Into<String>, total: i64) -> Self {
		Self { key: key.into(), total }
	}
}
