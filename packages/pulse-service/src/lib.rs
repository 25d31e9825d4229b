pub mod activity;
pub mod admin;
pub mod evaluate;
pub mod ingest;
pub mod super_users;
pub mod team_insights;
pub mod time_serde;
pub mod top_countries;

mod error;

use std::{future::Future, pin::Pin, sync::Arc, time::Instant};

pub use activity::{ActiveUsersPerDayResponse, DailyCount};
pub use admin::FlushReport;
pub use error::{Error, Result};
pub use evaluate::{
	ACTIVE_USERS_PER_DAY_PATH, EndpointProbe, EvaluationReport, SUPER_USERS_PATH,
	TEAM_INSIGHTS_PATH, TOP_COUNTRIES_PATH,
};
pub use ingest::{IngestPayload, IngestResponse};
pub use super_users::SuperUsersResponse;
pub use team_insights::TeamInsightsResponse;
pub use top_countries::TopCountriesResponse;

use pulse_config::Config;
use pulse_domain::{GroupCount, UserRecord};
use pulse_storage::{db::Db, queries};
pub use pulse_storage::queries::GroupedQuery;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// The store access facade: the fixed set of filter/group queries the
/// analytic operations issue, behind an object-safe seam so tests can swap
/// the backing store.
pub trait UserStore
where
	Self: Send + Sync,
{
	fn super_users<'a>(
		&'a self,
		min_score: i64,
	) -> BoxFuture<'a, pulse_storage::Result<Vec<UserRecord>>>;
	fn grouped_counts<'a>(
		&'a self,
		query: GroupedQuery,
	) -> BoxFuture<'a, pulse_storage::Result<Vec<GroupCount>>>;
	fn upsert_users<'a>(
		&'a self,
		users: &'a [UserRecord],
	) -> BoxFuture<'a, pulse_storage::Result<u64>>;
	fn flush<'a>(&'a self) -> BoxFuture<'a, pulse_storage::Result<()>>;
	fn close<'a>(&'a self) -> BoxFuture<'a, ()>;
}

/// Postgres-backed [`UserStore`] delegating to the storage queries.
pub struct PgStore {
	pub db: Db,
}
impl PgStore {
	pub fn new(db: Db) -> Self {
		Self { db }
	}
}
impl UserStore for PgStore {
	fn super_users<'a>(
		&'a self,
		min_score: i64,
	) -> BoxFuture<'a, pulse_storage::Result<Vec<UserRecord>>> {
		Box::pin(queries::super_users(&self.db, min_score))
	}

	fn grouped_counts<'a>(
		&'a self,
		query: GroupedQuery,
	) -> BoxFuture<'a, pulse_storage::Result<Vec<GroupCount>>> {
		Box::pin(queries::grouped_counts(&self.db, query))
	}

	fn upsert_users<'a>(
		&'a self,
		users: &'a [UserRecord],
	) -> BoxFuture<'a, pulse_storage::Result<u64>> {
		Box::pin(queries::upsert_users(&self.db, users))
	}

	fn flush<'a>(&'a self) -> BoxFuture<'a, pulse_storage::Result<()>> {
		Box::pin(queries::flush(&self.db))
	}

	fn close<'a>(&'a self) -> BoxFuture<'a, ()> {
		Box::pin(self.db.close())
	}
}

pub struct PulseService {
	pub cfg: Config,
	pub store: Arc<dyn UserStore>,
}
impl PulseService {
	pub fn new(cfg: Config, store: Arc<dyn UserStore>) -> Self {
		Self { cfg, store }
	}

	/// Drains the underlying store connections. Call once at shutdown.
	pub async fn close(&self) {
		self.store.close().await;
	}
}

/// Milliseconds since `start`, rounded to three decimals. Operations time
/// their own body with this; transport overhead is never included.
pub(crate) fn elapsed_ms(start: Instant) -> f64 {
	let ms = start.elapsed().as_secs_f64() * 1_000.0;

	(ms * 1_000.0).round() / 1_000.0
}
