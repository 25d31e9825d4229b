mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Analytics, Config, Postgres, Security, Service, Storage};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;
	let cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.http_bind must be non-empty.".to_string(),
		});
	}
	if cfg.service.admin_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.admin_bind must be non-empty.".to_string(),
		});
	}
	if cfg.service.log_level.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.log_level must be non-empty.".to_string(),
		});
	}
	if cfg.storage.postgres.dsn.trim().is_empty() {
		return Err(Error::Validation {
			message: "storage.postgres.dsn must be non-empty.".to_string(),
		});
	}
	if cfg.storage.postgres.pool_max_conns == 0 {
		return Err(Error::Validation {
			message: "storage.postgres.pool_max_conns must be greater than zero.".to_string(),
		});
	}
	if cfg.analytics.super_user_min_score < 0 {
		return Err(Error::Validation {
			message: "analytics.super_user_min_score must be zero or greater.".to_string(),
		});
	}
	if cfg.analytics.country_ranking_limit == 0 {
		return Err(Error::Validation {
			message: "analytics.country_ranking_limit must be greater than zero.".to_string(),
		});
	}
	if cfg.analytics.unknown_country_label.trim().is_empty() {
		return Err(Error::Validation {
			message: "analytics.unknown_country_label must be non-empty.".to_string(),
		});
	}

	Ok(())
}
