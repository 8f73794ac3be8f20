use chrono::NaiveDateTime;
use sqlx::SqlitePool;
use tracing::{error, info};

use crate::{
    error::StoreError,
    model::attendance::{AttendanceKind, AttendanceOutcome},
    store::member::get_member,
    utils::datetime,
};

/// Insert-or-update keyed by `member_id`. The `WHERE` on the update arm makes
/// the statement a no-op when the field is already set, so concurrent callers
/// cannot both record the same side.
fn upsert_sql(kind: AttendanceKind) -> String {
    let column = kind.column();
    format!(
        "INSERT INTO checkin_checkout (member_id, {column}) VALUES (?, ?) \
         ON CONFLICT(member_id) DO UPDATE SET {column} = excluded.{column} \
         WHERE checkin_checkout.{column} IS NULL"
    )
}

pub async fn check_in(pool: &SqlitePool, member_id: i64) -> Result<AttendanceOutcome, StoreError> {
    record(pool, member_id, AttendanceKind::CheckIn, datetime::now()).await
}

pub async fn check_out(pool: &SqlitePool, member_id: i64) -> Result<AttendanceOutcome, StoreError> {
    record(pool, member_id, AttendanceKind::CheckOut, datetime::now()).await
}

/// Sets one side of the member's attendance record to `at` unless it is
/// already set.
///
/// The lookup and the upsert run as separate autocommit statements on pooled
/// connections; no read transaction is held open while writing. SQLite undoes
/// a statement that fails on a constraint, so a rejected write leaves the
/// store unchanged.
pub async fn record(
    pool: &SqlitePool,
    member_id: i64,
    kind: AttendanceKind,
    at: NaiveDateTime,
) -> Result<AttendanceOutcome, StoreError> {
    let member = get_member(pool, member_id).await?;

    let already_set = match kind {
        AttendanceKind::CheckIn => member.check_in.is_some(),
        AttendanceKind::CheckOut => member.check_out.is_some(),
    };
    let already = AttendanceOutcome::AlreadyRecorded {
        kind,
        full_name: member.full_name.clone(),
    };
    if already_set {
        return Ok(already);
    }

    let result = sqlx::query(&upsert_sql(kind))
        .bind(member_id)
        .bind(at)
        .execute(pool)
        .await
        .map_err(|e| {
            error!(error = %e, member_id, op = kind.label(), "Attendance write failed");
            StoreError::from_write(kind.label(), e)
        })?;

    // Another request set the field between the lookup and the upsert.
    if result.rows_affected() == 0 {
        return Ok(already);
    }

    info!(member_id, op = kind.label(), "Attendance recorded");

    Ok(AttendanceOutcome::Recorded {
        kind,
        full_name: member.full_name,
        at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{file_pool, test_pool};
    use crate::model::member::CreateMember;
    use crate::store::member::create_member;
    use chrono::NaiveDate;
    use std::collections::HashMap;

    async fn seed_member(pool: &SqlitePool, full_name: &str) -> i64 {
        create_member(
            pool,
            &CreateMember {
                full_name: full_name.into(),
                team_name: "Core".into(),
            },
        )
        .await
        .unwrap()
        .id
    }

    async fn attendance_rows(pool: &SqlitePool, member_id: i64) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM checkin_checkout WHERE member_id = ?")
            .bind(member_id)
            .fetch_one(pool)
            .await
            .unwrap()
    }

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[actix_web::test]
    async fn first_check_in_creates_record() {
        let pool = test_pool().await;
        let id = seed_member(&pool, "Ada").await;

        let outcome = record(&pool, id, AttendanceKind::CheckIn, at(14, 7))
            .await
            .unwrap();

        assert_eq!(
            outcome,
            AttendanceOutcome::Recorded {
                kind: AttendanceKind::CheckIn,
                full_name: "Ada".into(),
                at: at(14, 7),
            }
        );
        let member = get_member(&pool, id).await.unwrap();
        assert_eq!(member.check_in, Some(at(14, 7)));
        assert_eq!(member.check_out, None);
    }

    #[actix_web::test]
    async fn second_check_in_keeps_first_timestamp() {
        let pool = test_pool().await;
        let id = seed_member(&pool, "Ada").await;

        record(&pool, id, AttendanceKind::CheckIn, at(9, 0))
            .await
            .unwrap();
        let outcome = record(&pool, id, AttendanceKind::CheckIn, at(10, 30))
            .await
            .unwrap();

        assert_eq!(
            outcome.message(),
            "The member Ada is already checked in."
        );
        let member = get_member(&pool, id).await.unwrap();
        assert_eq!(member.check_in, Some(at(9, 0)));
    }

    #[actix_web::test]
    async fn check_in_then_check_out_fill_both_fields() {
        let pool = test_pool().await;
        let id = seed_member(&pool, "Ada").await;

        record(&pool, id, AttendanceKind::CheckIn, at(9, 0))
            .await
            .unwrap();
        record(&pool, id, AttendanceKind::CheckOut, at(17, 45))
            .await
            .unwrap();

        let member = get_member(&pool, id).await.unwrap();
        assert_eq!(member.check_in, Some(at(9, 0)));
        assert_eq!(member.check_out, Some(at(17, 45)));
        assert_eq!(attendance_rows(&pool, id).await, 1);
    }

    #[actix_web::test]
    async fn check_out_without_check_in_leaves_check_in_null() {
        let pool = test_pool().await;
        let id = seed_member(&pool, "Ada").await;

        let outcome = check_out(&pool, id).await.unwrap();
        assert!(matches!(outcome, AttendanceOutcome::Recorded { .. }));

        let member = get_member(&pool, id).await.unwrap();
        assert!(member.check_out.is_some());
        assert_eq!(member.check_in, None);

        let again = check_out(&pool, id).await.unwrap();
        assert_eq!(again.message(), "The member Ada is already checked out.");
    }

    #[actix_web::test]
    async fn unknown_member_is_not_found() {
        let pool = test_pool().await;

        assert!(matches!(
            check_in(&pool, 404).await.unwrap_err(),
            StoreError::NotFound
        ));
        assert!(matches!(
            check_out(&pool, 404).await.unwrap_err(),
            StoreError::NotFound
        ));
    }

    #[actix_web::test]
    async fn rejected_write_is_rolled_back() {
        let pool = test_pool().await;
        let id = seed_member(&pool, "Ada").await;

        sqlx::query(
            "CREATE TRIGGER lock_attendance BEFORE INSERT ON checkin_checkout \
             BEGIN SELECT RAISE(ABORT, 'attendance is locked'); END",
        )
        .execute(&pool)
        .await
        .unwrap();

        let err = check_in(&pool, id).await.unwrap_err();
        assert!(matches!(err, StoreError::Integrity { op: "check-in", .. }));
        assert_eq!(
            err.to_string(),
            "Database integrity error during check-in: attendance is locked"
        );

        assert_eq!(attendance_rows(&pool, id).await, 0);
        assert_eq!(get_member(&pool, id).await.unwrap().check_in, None);
    }

    #[actix_web::test]
    async fn overlapping_check_ins_on_a_file_database() {
        let dir = tempfile::tempdir().unwrap();
        let pool = file_pool(&dir).await;

        let mut ids = Vec::new();
        for i in 0..20 {
            ids.push(seed_member(&pool, &format!("Member {i}")).await);
        }

        let tasks = ids.iter().flat_map(|&id| {
            (0..8).map({
                let pool = pool.clone();
                move |_| {
                    let pool = pool.clone();
                    actix_web::rt::spawn(async move { (id, check_in(&pool, id).await) })
                }
            })
        });
        let results = futures::future::join_all(tasks).await;

        let mut recorded: HashMap<i64, usize> = HashMap::new();
        for result in results {
            let (id, outcome) = result.expect("check-in task panicked");
            match outcome.expect("check-in failed") {
                AttendanceOutcome::Recorded { .. } => *recorded.entry(id).or_default() += 1,
                AttendanceOutcome::AlreadyRecorded { .. } => {}
            }
        }

        for id in ids {
            assert_eq!(recorded.get(&id), Some(&1), "member {id}");
            assert_eq!(attendance_rows(&pool, id).await, 1, "member {id}");
        }
    }
}
