#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Sqlx(#[from] sqlx::Error),
	#[error("Malformed store document: {0}")]
	MalformedDocument(String),
	#[error("{0}")]
	Message(String),
}
