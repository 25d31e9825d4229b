use serde::{Deserialize, Serialize};

use crate::{PulseService, Result};

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct FlushReport {
	pub flushed: bool,
}

impl PulseService {
	/// Drops every ingested record. Admin surface only.
	pub async fn flush(&self) -> Result<FlushReport> {
		self.store.flush().await?;

		tracing::info!("Flushed user data.");

		Ok(FlushReport { flushed: true })
	}
}
