pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Store query failed: {message}")]
	Store { message: String },
}
impl From<pulse_storage::Error> for Error {
	fn from(err: pulse_storage::Error) -> Self {
		Self::Store { message: err.to_string() }
	}
}
