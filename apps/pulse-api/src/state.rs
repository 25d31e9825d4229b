use std::sync::Arc;

use pulse_service::{PgStore, PulseService};
use pulse_storage::db::Db;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<PulseService>,
}
impl AppState {
	pub async fn new(config: pulse_config::Config) -> color_eyre::Result<Self> {
		let db = Db::connect(&config.storage.postgres).await?;

		db.ensure_schema().await?;

		let store = PgStore::new(db);
		let service = PulseService::new(config, Arc::new(store));

		Ok(Self { service: Arc::new(service) })
	}

	/// Wraps an already-built service; used by tests to swap the store.
	pub fn with_service(service: PulseService) -> Self {
		Self { service: Arc::new(service) }
	}
}
