use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	pub analytics: Analytics,
	pub security: Security,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub admin_bind: String,
	pub log_level: String,
}

#[derive(Debug, Deserialize)]
pub struct Storage {
	pub postgres: Postgres,
}

#[derive(Debug, Deserialize)]
pub struct Postgres {
	pub dsn: String,
	pub pool_max_conns: u32,
}

#[derive(Debug, Deserialize)]
pub struct Analytics {
	/// Score cutoff for the super-user filter.
	pub super_user_min_score: i64,
	/// Maximum number of entries in the country ranking.
	pub country_ranking_limit: usize,
	/// Label that stands in for records without a country.
	pub unknown_country_label: String,
	/// Compute the active percentage against a denominator of one when a team
	/// shows up in the active counts but not the membership counts, as the
	/// legacy service did. When false such teams report 0.0.
	#[serde(default = "default_legacy_active_percentage_fallback")]
	pub legacy_active_percentage_fallback: bool,
}

#[derive(Debug, Deserialize)]
pub struct Security {
	pub bind_localhost_only: bool,
}

fn default_legacy_active_percentage_fallback() -> bool {
	true
}
