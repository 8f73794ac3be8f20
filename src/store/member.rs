use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool};
use tracing::{debug, info};

use crate::{
    error::StoreError,
    model::member::{CreateMember, MemberRecord, UpdateMember},
};

const SELECT_MEMBER_BY_ID: &str = r#"
    SELECT m.id, m.full_name, m.team_name, c.check_in, c.check_out
    FROM members m
    LEFT JOIN checkin_checkout c ON c.member_id = m.id
    WHERE m.id = ?
"#;

const SELECT_ALL_MEMBERS: &str = r#"
    SELECT m.id, m.full_name, m.team_name, c.check_in, c.check_out
    FROM members m
    LEFT JOIN checkin_checkout c ON c.member_id = m.id
    ORDER BY m.id
"#;

fn require_non_empty<'a>(field: &str, value: &'a str) -> Result<&'a str, StoreError> {
    if value.trim().is_empty() {
        return Err(StoreError::Validation(format!("{field} must not be empty")));
    }
    Ok(value)
}

/// Loads a member joined with its attendance record.
async fn fetch_member(
    conn: &mut SqliteConnection,
    member_id: i64,
) -> Result<Option<MemberRecord>, sqlx::Error> {
    sqlx::query_as::<_, MemberRecord>(SELECT_MEMBER_BY_ID)
        .bind(member_id)
        .fetch_optional(conn)
        .await
}

pub async fn create_member(
    pool: &SqlitePool,
    payload: &CreateMember,
) -> Result<MemberRecord, StoreError> {
    let full_name = require_non_empty("full_name", &payload.full_name)?;
    let team_name = require_non_empty("team_name", &payload.team_name)?;

    let result = sqlx::query("INSERT INTO members (full_name, team_name) VALUES (?, ?)")
        .bind(full_name)
        .bind(team_name)
        .execute(pool)
        .await?;

    let member_id = result.last_insert_rowid();
    info!(member_id, "Member created");

    Ok(MemberRecord {
        id: member_id,
        full_name: full_name.to_string(),
        team_name: team_name.to_string(),
        check_in: None,
        check_out: None,
    })
}

pub async fn list_members(pool: &SqlitePool) -> Result<Vec<MemberRecord>, StoreError> {
    let members = sqlx::query_as::<_, MemberRecord>(SELECT_ALL_MEMBERS)
        .fetch_all(pool)
        .await?;

    debug!(count = members.len(), "Listed members");
    Ok(members)
}

pub async fn get_member(pool: &SqlitePool, member_id: i64) -> Result<MemberRecord, StoreError> {
    let mut conn = pool.acquire().await?;

    fetch_member(&mut conn, member_id)
        .await?
        .ok_or(StoreError::NotFound)
}

/// Applies only the fields present in `changes`. An empty update returns the
/// current state untouched.
///
/// The write is a single `UPDATE` naming only the supplied columns, so
/// concurrent updates of different fields do not overwrite each other.
pub async fn update_member(
    pool: &SqlitePool,
    member_id: i64,
    changes: UpdateMember,
) -> Result<MemberRecord, StoreError> {
    let current = get_member(pool, member_id).await?;

    if changes.is_empty() {
        return Ok(current);
    }

    if let Some(full_name) = &changes.full_name {
        require_non_empty("full_name", full_name)?;
    }
    if let Some(team_name) = &changes.team_name {
        require_non_empty("team_name", team_name)?;
    }

    let mut query = QueryBuilder::<Sqlite>::new("UPDATE members SET ");
    {
        let mut assignments = query.separated(", ");
        if let Some(full_name) = changes.full_name {
            assignments.push("full_name = ").push_bind_unseparated(full_name);
        }
        if let Some(team_name) = changes.team_name {
            assignments.push("team_name = ").push_bind_unseparated(team_name);
        }
    }
    query.push(" WHERE id = ").push_bind(member_id);

    let result = query.build().execute(pool).await?;
    if result.rows_affected() == 0 {
        return Err(StoreError::NotFound);
    }

    info!(member_id, "Member updated");

    get_member(pool, member_id).await
}
