use actix_web::{HttpResponse, Responder, web};
use sqlx::SqlitePool;

use crate::{error::StoreError, model::attendance::AttendanceMessage, store::attendance};

/// Check-in endpoint
#[utoipa::path(
    post,
    path = "/checkin/{member_id}",
    params(
        ("member_id", Path, description = "Member ID")
    ),
    responses(
        (status = 200, description = "Checked in, or already checked in", body = AttendanceMessage, example = json!({
            "message": "The member Ada Lovelace has checked in at 05-03-2024 02:07 PM."
        })),
        (status = 404, description = "Member not found", body = Object, example = json!({
            "detail": "Member not found"
        })),
        (status = 500, description = "Integrity error, nothing was written", body = Object, example = json!({
            "detail": "Database integrity error during check-in: UNIQUE constraint failed: checkin_checkout.member_id"
        }))
    ),
    tag = "Attendance"
)]
pub async fn check_in(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> Result<impl Responder, StoreError> {
    let outcome = attendance::check_in(pool.get_ref(), path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(AttendanceMessage::from(outcome)))
}

/// Check-out endpoint
#[utoipa::path(
    post,
    path = "/checkout/{member_id}",
    params(
        ("member_id", Path, description = "Member ID")
    ),
    responses(
        (status = 200, description = "Checked out, or already checked out", body = AttendanceMessage, example = json!({
            "message": "The member Ada Lovelace has checked out at 05-03-2024 06:30 PM."
        })),
        (status = 404, description = "Member not found", body = Object, example = json!({
            "detail": "Member not found"
        })),
        (status = 500, description = "Integrity error, nothing was written", body = Object, example = json!({
            "detail": "Database integrity error during check-out: UNIQUE constraint failed: checkin_checkout.member_id"
        }))
    ),
    tag = "Attendance"
)]
pub async fn check_out(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> Result<impl Responder, StoreError> {
    let outcome = attendance::check_out(pool.get_ref(), path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(AttendanceMessage::from(outcome)))
}
