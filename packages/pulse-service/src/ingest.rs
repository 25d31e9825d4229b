use serde::{Deserialize, Serialize};
use serde_json::Value;

use pulse_domain::UserRecord;

use crate::{Error, PulseService, Result};

/// Raw ingest body. Decoding happens inside the operation so any undecodable
/// payload surfaces as an invalid-request error with the structured error
/// body, not as a transport-level rejection.
pub type IngestPayload = Value;

#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
enum IngestRequest {
	/// A bare array of user records.
	Records(Vec<UserRecord>),
	/// The legacy upload shape: a JSON-encoded array under a `file` key.
	Wrapped { file: String },
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct IngestResponse {
	pub message: String,
	pub user_count: u64,
}

impl PulseService {
	/// Upserts a batch of user records; re-ingesting an id replaces the whole
	/// document.
	pub async fn ingest(&self, payload: IngestPayload) -> Result<IngestResponse> {
		let records = decode_records(payload)?;
		let user_count = self.store.upsert_users(&records).await?;

		tracing::info!(user_count, "Ingested user batch.");

		Ok(IngestResponse { message: "Users ingested.".to_string(), user_count })
	}
}

fn decode_records(payload: IngestPayload) -> Result<Vec<UserRecord>> {
	let request: IngestRequest = serde_json::from_value(payload).map_err(|err| {
		Error::InvalidRequest { message: format!("Undecodable user payload: {err}.") }
	})?;

	match request {
		IngestRequest::Records(records) => Ok(records),
		IngestRequest::Wrapped { file } => serde_json::from_str(&file).map_err(|err| {
			Error::InvalidRequest { message: format!("Undecodable user payload: {err}.") }
		}),
	}
}
