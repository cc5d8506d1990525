//! Comments under a post.

use actix_web::{HttpResponse, web};

use zerone_core::services::CommentDraft;
use zerone_shared::CommonResponse;
use zerone_shared::dto::CommentRequest;
use zerone_shared::query::PaginationQuery;

use crate::mapper::{Paging, comment_response};
use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/v1/post/{id}/comments
pub async fn get_comments(
    state: web::Data<AppState>,
    _identity: Identity,
    path: web::Path<i64>,
    paging: web::Query<PaginationQuery>,
) -> AppResult<HttpResponse> {
    let paging = Paging::from_query(&paging)?;
    let page = state
        .comments
        .get_comments(path.into_inner(), paging.request())
        .await?;
    Ok(HttpResponse::Ok().json(paging.envelope(page, comment_response)))
}

/// POST /api/v1/post/{id}/comments
pub async fn create_comment(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i64>,
    body: web::Json<CommentRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let draft = CommentDraft {
        parent_id: req.parent_id,
        comment_text: req.comment_text,
    };

    let comment = state
        .comments
        .create_comment(&identity, path.into_inner(), draft)
        .await?;
    Ok(HttpResponse::Created().json(CommonResponse::now(comment_response(comment))))
}

/// PUT /api/v1/post/{id}/comments/{comment_id}
pub async fn edit_comment(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<(i64, i64)>,
    body: web::Json<CommentRequest>,
) -> AppResult<HttpResponse> {
    let (post_id, comment_id) = path.into_inner();
    let comment = state
        .comments
        .edit_comment(&identity, post_id, comment_id, body.into_inner().comment_text)
        .await?;
    Ok(HttpResponse::Ok().json(CommonResponse::now(comment_response(comment))))
}

/// DELETE /api/v1/post/{id}/comments/{comment_id}
pub async fn delete_comment(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<(i64, i64)>,
) -> AppResult<HttpResponse> {
    let (post_id, comment_id) = path.into_inner();
    let comment = state
        .comments
        .delete_comment(&identity, post_id, comment_id)
        .await?;
    Ok(HttpResponse::Ok().json(CommonResponse::now(comment_response(comment))))
}

/// PUT /api/v1/post/{id}/comments/{comment_id}/recover
pub async fn recover_comment(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<(i64, i64)>,
) -> AppResult<HttpResponse> {
    let (post_id, comment_id) = path.into_inner();
    let comment = state
        .comments
        .recover_comment(&identity, post_id, comment_id)
        .await?;
    Ok(HttpResponse::Ok().json(CommonResponse::now(comment_response(comment))))
}
