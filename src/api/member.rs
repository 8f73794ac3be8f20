use actix_web::{HttpResponse, Responder, web};
use sqlx::SqlitePool;

use crate::{
    error::StoreError,
    model::member::{CreateMember, Member, UpdateMember},
    store::member as member_store,
};

/// Create Member
#[utoipa::path(
    post,
    path = "/members/",
    request_body = CreateMember,
    responses(
        (status = 200, description = "Member created", body = Member),
        (status = 400, description = "Missing or empty field", body = Object, example = json!({
            "detail": "full_name must not be empty"
        }))
    ),
    tag = "Member"
)]
pub async fn create_member(
    pool: web::Data<SqlitePool>,
    payload: web::Json<CreateMember>,
) -> Result<impl Responder, StoreError> {
    let member = member_store::create_member(pool.get_ref(), &payload).await?;

    Ok(HttpResponse::Ok().json(Member::from(member)))
}

/// List Members
#[utoipa::path(
    get,
    path = "/members/",
    responses(
        (status = 200, description = "Every member with attendance", body = Vec<Member>)
    ),
    tag = "Member"
)]
pub async fn list_members(pool: web::Data<SqlitePool>) -> Result<impl Responder, StoreError> {
    let members: Vec<Member> = member_store::list_members(pool.get_ref())
        .await?
        .into_iter()
        .map(Member::from)
        .collect();

    Ok(HttpResponse::Ok().json(members))
}

/// Get Member by ID
#[utoipa::path(
    get,
    path = "/members/{member_id}",
    params(
        ("member_id", Path, description = "Member ID")
    ),
    responses(
        (status = 200, description = "Member found", body = Member),
        (status = 404, description = "Member not found", body = Object, example = json!({
            "detail": "Member not found"
        }))
    ),
    tag = "Member"
)]
pub async fn get_member(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> Result<impl Responder, StoreError> {
    let member = member_store::get_member(pool.get_ref(), path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(Member::from(member)))
}

/// Update Member
#[utoipa::path(
    put,
    path = "/members/{member_id}",
    params(
        ("member_id", Path, description = "Member ID")
    ),
    request_body = UpdateMember,
    responses(
        (status = 200, description = "Member updated", body = Member),
        (status = 400, description = "Supplied field is empty"),
        (status = 404, description = "Member not found", body = Object, example = json!({
            "detail": "Member not found"
        }))
    ),
    tag = "Member"
)]
pub async fn update_member(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    body: web::Json<UpdateMember>,
) -> Result<impl Responder, StoreError> {
    let member =
        member_store::update_member(pool.get_ref(), path.into_inner(), body.into_inner()).await?;

    Ok(HttpResponse::Ok().json(Member::from(member)))
}
