use serde_json::Value;

#[derive(Debug, sqlx::FromRow)]
pub struct UserDocRow {
	pub doc: Value,
}

#[derive(Debug, sqlx::FromRow)]
pub struct GroupCountRow {
	pub key: String,
	pub total: i64,
}
