use std::{collections::BTreeMap, sync::Arc};

use pulse_config::{Analytics, Config, Postgres, Security, Service, Storage};
use pulse_domain::{GroupCount, LogEntry, Project, Team, UserRecord};
use pulse_service::{
	ACTIVE_USERS_PER_DAY_PATH, BoxFuture, Error, GroupedQuery, PulseService, SUPER_USERS_PATH,
	TEAM_INSIGHTS_PATH, TOP_COUNTRIES_PATH, UserStore,
};

fn test_config() -> Config {
	Config {
		service: Service {
			http_bind: "127.0.0.1:0".to_string(),
			admin_bind: "127.0.0.1:0".to_string(),
			log_level: "info".to_string(),
		},
		storage: Storage {
			postgres: Postgres { dsn: "postgres://unused".to_string(), pool_max_conns: 1 },
		},
		analytics: Analytics {
			super_user_min_score: 900,
			country_ranking_limit: 5,
			unknown_country_label: "Country not informed".to_string(),
			legacy_active_percentage_fallback: true,
		},
		security: Security { bind_localhost_only: true },
	}
}

struct InMemoryStore {
	users: Vec<UserRecord>,
}
impl InMemoryStore {
	fn counts(&self, query: GroupedQuery) -> Vec<GroupCount> {
		let mut totals = BTreeMap::<String, i64>::new();

		match query {
			GroupedQuery::TeamMembers =>
				for user in &self.users {
					*totals.entry(user.team.name.clone()).or_default() += 1;
				},
			GroupedQuery::ActiveTeamMembers =>
				for user in self.users.iter().filter(|user| user.active) {
					*totals.entry(user.team.name.clone()).or_default() += 1;
				},
			GroupedQuery::TeamLeaders =>
				for user in self.users.iter().filter(|user| user.team.leader) {
					*totals.entry(user.team.name.clone()).or_default() += 1;
				},
			GroupedQuery::TeamsWithCompletedProjects =>
				for user in self
					.users
					.iter()
					.filter(|user| user.team.projects.iter().any(|project| project.completed))
				{
					*totals.entry(user.team.name.clone()).or_default() += 1;
				},
			GroupedQuery::LogDates =>
				for user in &self.users {
					let dates: std::collections::BTreeSet<&str> =
						user.logs.iter().map(|log| log.date.as_str()).collect();

					for date in dates {
						*totals.entry(date.to_string()).or_default() += 1;
					}
				},
		}

		totals.into_iter().map(|(key, total)| GroupCount { key, total }).collect()
	}
}
impl UserStore for InMemoryStore {
	fn super_users<'a>(
		&'a self,
		min_score: i64,
	) -> BoxFuture<'a, pulse_storage::Result<Vec<UserRecord>>> {
		let mut data: Vec<UserRecord> = self
			.users
			.iter()
			.filter(|user| user.active && user.score >= min_score)
			.cloned()
			.collect();

		data.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.id.cmp(&b.id)));

		Box::pin(async move { Ok(data) })
	}

	fn grouped_counts<'a>(
		&'a self,
		query: GroupedQuery,
	) -> BoxFuture<'a, pulse_storage::Result<Vec<GroupCount>>> {
		let counts = self.counts(query);

		Box::pin(async move { Ok(counts) })
	}

	fn upsert_users<'a>(
		&'a self,
		users: &'a [UserRecord],
	) -> BoxFuture<'a, pulse_storage::Result<u64>> {
		Box::pin(async move { Ok(users.len() as u64) })
	}

	fn flush<'a>(&'a self) -> BoxFuture<'a, pulse_storage::Result<()>> {
		Box::pin(async move { Ok(()) })
	}

	fn close<'a>(&'a self) -> BoxFuture<'a, ()> {
		Box::pin(async move {})
	}
}

struct FailingStore;
impl UserStore for FailingStore {
	fn super_users<'a>(
		&'a self,
		_min_score: i64,
	) -> BoxFuture<'a, pulse_storage::Result<Vec<UserRecord>>> {
		Box::pin(async move { Err(pulse_storage::Error::Message("Store offline.".to_string())) })
	}

	fn grouped_counts<'a>(
		&'a self,
		_query: GroupedQuery,
	) -> BoxFuture<'a, pulse_storage::Result<Vec<GroupCount>>> {
		Box::pin(async move { Err(pulse_storage::Error::Message("Store offline.".to_string())) })
	}

	fn upsert_users<'a>(
		&'a self,
		_users: &'a [UserRecord],
	) -> BoxFuture<'a, pulse_storage::Result<u64>> {
		Box::pin(async move { Err(pulse_storage::Error::Message("Store offline.".to_string())) })
	}

	fn flush<'a>(&'a self) -> BoxFuture<'a, pulse_storage::Result<()>> {
		Box::pin(async move { Err(pulse_storage::Error::Message("Store offline.".to_string())) })
	}

	fn close<'a>(&'a self) -> BoxFuture<'a, ()> {
		Box::pin(async move {})
	}
}

fn user(
	id: &str,
	score: i64,
	active: bool,
	country: Option<&str>,
	team: &str,
	leader: bool,
) -> UserRecord {
	UserRecord {
		id: id.to_string(),
		name: format!("User {id}"),
		age: 28,
		score,
		active,
		country: country.map(str::to_string),
		team: Team { name: team.to_string(), leader, projects: Vec::new() },
		logs: Vec::new(),
	}
}

fn sample_users() -> Vec<UserRecord> {
	let mut users = vec![
		user("u1", 980, true, Some("BR"), "Alpha", true),
		user("u2", 910, true, Some("BR"), "Alpha", false),
		user("u3", 905, true, None, "Beta", false),
		user("u4", 950, false, Some("PT"), "Beta", true),
		user("u5", 120, true, Some("AR"), "Gamma", false),
	];

	users[0].team.projects = vec![
		Project { name: "Atlas".to_string(), completed: true },
		Project { name: "Borealis".to_string(), completed: false },
	];
	users[2].team.projects = vec![Project { name: "Comet".to_string(), completed: false }];
	users[0].logs = vec![
		LogEntry { date: "2025-06-01".to_string(), action: "login".to_string() },
		LogEntry { date: "2025-06-01".to_string(), action: "logout".to_string() },
	];
	users[1].logs = vec![LogEntry { date: "2025-06-02".to_string(), action: "login".to_string() }];
	users[4].logs = vec![LogEntry { date: "2025-06-01".to_string(), action: "login".to_string() }];

	users
}

fn service_with(store: impl UserStore + 'static) -> PulseService {
	PulseService::new(test_config(), Arc::new(store))
}

#[tokio::test]
async fn super_users_filters_inactive_and_low_scores() {
	let service = service_with(InMemoryStore { users: sample_users() });
	let response = service.super_users().await.expect("Failed to run super_users.");
	let ids: Vec<&str> = response.data.iter().map(|user| user.id.as_str()).collect();

	assert_eq!(ids, ["u1", "u2", "u3"]);
	assert!(response.execution_time_ms >= 0.0);
}

#[tokio::test]
async fn top_countries_ranks_super_user_countries() {
	let service = service_with(InMemoryStore { users: sample_users() });
	let response = service.top_countries().await.expect("Failed to run top_countries.");

	assert_eq!(response.countries.len(), 2);
	assert_eq!(response.countries[0].country, "BR");
	assert_eq!(response.countries[0].total, 2);
	assert_eq!(response.countries[1].country, "Country not informed");
	assert_eq!(response.countries[1].total, 1);
}

#[tokio::test]
async fn team_insights_merges_the_four_counts() {
	let service = service_with(InMemoryStore { users: sample_users() });
	let response = service.team_insights().await.expect("Failed to run team_insights.");
	let by_team: BTreeMap<&str, _> =
		response.teams.iter().map(|team| (team.team.as_str(), team)).collect();
	let alpha = by_team["Alpha"];
	let beta = by_team["Beta"];
	let gamma = by_team["Gamma"];

	assert_eq!(alpha.total_members, 2);
	assert_eq!(alpha.active_percentage, 100.0);
	assert_eq!(alpha.leaders, 1);
	assert_eq!(alpha.completed_projects, 1);

	assert_eq!(beta.total_members, 2);
	assert_eq!(beta.active_percentage, 50.0);
	assert_eq!(beta.leaders, 1);
	assert_eq!(beta.completed_projects, 0);

	assert_eq!(gamma.total_members, 1);
	assert_eq!(gamma.active_percentage, 100.0);
	assert_eq!(gamma.leaders, 0);
}

#[tokio::test]
async fn team_insights_is_idempotent_against_an_unchanged_store() {
	let service = service_with(InMemoryStore { users: sample_users() });
	let first = service.team_insights().await.expect("Failed to run team_insights.");
	let second = service.team_insights().await.expect("Failed to run team_insights.");

	assert_eq!(first.teams, second.teams);
}

#[tokio::test]
async fn active_users_per_day_counts_distinct_users() {
	let service = service_with(InMemoryStore { users: sample_users() });
	let response =
		service.active_users_per_day().await.expect("Failed to run active_users_per_day.");

	// u1 logs twice on 06-01 but counts once; u5 also logs that day.
	assert_eq!(response.logins.len(), 2);
	assert_eq!(response.logins[0].date, "2025-06-01");
	assert_eq!(response.logins[0].total, 2);
	assert_eq!(response.logins[1].date, "2025-06-02");
	assert_eq!(response.logins[1].total, 1);
}

#[tokio::test]
async fn evaluation_reports_every_endpoint() {
	let service = service_with(InMemoryStore { users: sample_users() });
	let report = service.evaluation().await.expect("Failed to run evaluation.");
	let keys: Vec<&str> = report.tested_endpoints.keys().map(String::as_str).collect();
	let mut expected = vec![
		SUPER_USERS_PATH,
		TOP_COUNTRIES_PATH,
		TEAM_INSIGHTS_PATH,
		ACTIVE_USERS_PER_DAY_PATH,
	];

	expected.sort_unstable();

	assert_eq!(keys, expected);

	for probe in report.tested_endpoints.values() {
		assert_eq!(probe.status, 200);
		assert!(probe.valid_response);
		assert!(probe.time_ms >= 0.0);
	}
}

#[tokio::test]
async fn evaluation_contains_per_endpoint_failures() {
	let service = service_with(FailingStore);
	let report = service.evaluation().await.expect("Failed to run evaluation.");

	assert_eq!(report.tested_endpoints.len(), 4);

	for probe in report.tested_endpoints.values() {
		assert_eq!(probe.status, 500);
		assert!(!probe.valid_response);
		assert!(probe.time_ms >= 0.0);
	}
}

#[tokio::test]
async fn ingest_accepts_a_bare_record_array() {
	let service = service_with(InMemoryStore { users: Vec::new() });
	let records = sample_users();
	let payload = serde_json::to_value(&records).expect("Failed to encode records.");
	let response = service.ingest(payload).await.expect("Failed to ingest.");

	assert_eq!(response.user_count, records.len() as u64);
}

#[tokio::test]
async fn ingest_accepts_the_wrapped_payload_shape() {
	let service = service_with(InMemoryStore { users: Vec::new() });
	let records = sample_users();
	let file = serde_json::to_string(&records).expect("Failed to encode records.");
	let response = service
		.ingest(serde_json::json!({ "file": file }))
		.await
		.expect("Failed to ingest.");

	assert_eq!(response.user_count, records.len() as u64);
}

#[tokio::test]
async fn ingest_rejects_an_undecodable_wrapped_payload() {
	let service = service_with(InMemoryStore { users: Vec::new() });
	let err = service.ingest(serde_json::json!({ "file": "not json" })).await.unwrap_err();

	assert!(matches!(err, Error::InvalidRequest { .. }));
}

#[tokio::test]
async fn ingest_rejects_a_wrong_shaped_payload() {
	let service = service_with(InMemoryStore { users: Vec::new() });
	let err = service.ingest(serde_json::json!({ "file": 123 })).await.unwrap_err();

	assert!(matches!(err, Error::InvalidRequest { .. }));
}

#[tokio::test]
async fn store_failures_surface_as_store_errors() {
	let service = service_with(FailingStore);
	let err = service.team_insights().await.unwrap_err();

	assert!(matches!(err, Error::Store { .. }));
}
