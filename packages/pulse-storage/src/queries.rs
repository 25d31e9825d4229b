use pulse_domain::{GroupCount, UserRecord};

use crate::{
	Error, Result,
	db::Db,
	models::{GroupCountRow, UserDocRow},
};

/// The fixed set of grouped aggregation queries the analytics layer issues.
///
/// Boolean-filtered variants omit groups with zero matches, so callers must
/// not assume uniform key coverage across variants.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum GroupedQuery {
	/// All users per team.
	TeamMembers,
	/// Active users per team.
	ActiveTeamMembers,
	/// Team leaders per team.
	TeamLeaders,
	/// Users with at least one completed project, per team.
	TeamsWithCompletedProjects,
	/// Distinct users with activity, per log date.
	LogDates,
}

/// Active users at or above `min_score`, full documents, best score first.
pub async fn super_users(db: &Db, min_score: i64) -> Result<Vec<UserRecord>> {
	let rows: Vec<UserDocRow> = sqlx::query_as(
		"\
SELECT doc
FROM users
WHERE active AND score >= $1
ORDER BY score DESC, user_id",
	)
	.bind(min_score)
	.fetch_all(&db.pool)
	.await?;

	rows.into_iter()
		.map(|row| {
			serde_json::from_value(row.doc).map_err(|err| Error::MalformedDocument(err.to_string()))
		})
		.collect()
}

/// Runs one grouped count. Rows come back as bare (key, total) pairs in key
/// order; there is no leading total-count row.
pub async fn grouped_counts(db: &Db, query: GroupedQuery) -> Result<Vec<GroupCount>> {
	let sql = match query {
		GroupedQuery::TeamMembers =>
			"\
SELECT team_name AS key, COUNT(*) AS total
FROM users
GROUP BY team_name
ORDER BY team_name",
		GroupedQuery::ActiveTeamMembers =>
			"\
SELECT team_name AS key, COUNT(*) AS total
FROM users
WHERE active
GROUP BY team_name
ORDER BY team_name",
		GroupedQuery::TeamLeaders =>
			"\
SELECT team_name AS key, COUNT(*) AS total
FROM users
WHERE team_leader
GROUP BY team_name
ORDER BY team_name",
		GroupedQuery::TeamsWithCompletedProjects =>
			"\
SELECT u.team_name AS key, COUNT(DISTINCT u.user_id) AS total
FROM users u
JOIN user_projects p ON p.user_id = u.user_id
WHERE p.completed
GROUP BY u.team_name
ORDER BY u.team_name",
		GroupedQuery::LogDates =>
			"\
SELECT log_date AS key, COUNT(DISTINCT user_id) AS total
FROM user_activity
GROUP BY log_date
ORDER BY log_date",
	};
	let rows: Vec<GroupCountRow> = sqlx::query_as(sql).fetch_all(&db.pool).await?;

	Ok(rows.into_iter().map(|row| GroupCount { key: row.key, total: row.total }).collect())
}

/// Upserts a batch of user documents in one transaction. Child rows are
/// replaced wholesale so a re-ingested user never keeps stale projects or
/// logs.
pub async fn upsert_users(db: &Db, users: &[UserRecord]) -> Result<u64> {
	let mut tx = db.pool.begin().await?;

	for user in users {
		let doc =
			serde_json::to_value(user).map_err(|err| Error::MalformedDocument(err.to_string()))?;

		sqlx::query(
			"\
INSERT INTO users (user_id, name, age, score, active, country, team_name, team_leader, doc)
VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
ON CONFLICT (user_id) DO UPDATE
SET
	name = EXCLUDED.name,
	age = EXCLUDED.age,
	score = EXCLUDED.score,
	active = EXCLUDED.active,
	country = EXCLUDED.country,
	team_name = EXCLUDED.team_name,
	team_leader = EXCLUDED.team_leader,
	doc = EXCLUDED.doc",
		)
		.bind(&user.id)
		.bind(&user.name)
		.bind(user.age)
		.bind(user.score)
		.bind(user.active)
		.bind(user.country.as_deref())
		.bind(&user.team.name)
		.bind(user.team.leader)
		.bind(&doc)
		.execute(&mut *tx)
		.await?;

		sqlx::query("DELETE FROM user_projects WHERE user_id = $1")
			.bind(&user.id)
			.execute(&mut *tx)
			.await?;

		for project in &user.team.projects {
			sqlx::query(
				"INSERT INTO user_projects (user_id, project_name, completed) VALUES ($1, $2, $3)",
			)
			.bind(&user.id)
			.bind(&project.name)
			.bind(project.completed)
			.execute(&mut *tx)
			.await?;
		}

		sqlx::query("DELETE FROM user_activity WHERE user_id = $1")
			.bind(&user.id)
			.execute(&mut *tx)
			.await?;

		for log in &user.logs {
			sqlx::query("INSERT INTO user_activity (user_id, log_date, action) VALUES ($1, $2, $3)")
				.bind(&user.id)
				.bind(&log.date)
				.bind(&log.action)
				.execute(&mut *tx)
				.await?;
		}
	}

	tx.commit().await?;

	Ok(users.len() as u64)
}

/// Drops every ingested record.
pub async fn flush(db: &Db) -> Result<()> {
	sqlx::query("TRUNCATE users CASCADE").execute(&db.pool).await?;

	Ok(())
}
