//! Tag search and management.

use actix_web::{HttpResponse, web};

use zerone_shared::CommonResponse;
use zerone_shared::dto::{MessageResponse, TagRequest};
use zerone_shared::query::{PaginationQuery, TagIdQuery, TagSearchQuery};

use crate::mapper::{Paging, tag_response};
use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/v1/tags
pub async fn get_tags(
    state: web::Data<AppState>,
    _identity: Identity,
    search: web::Query<TagSearchQuery>,
    paging: web::Query<PaginationQuery>,
) -> AppResult<HttpResponse> {
    let paging = Paging::from_query(&paging)?;
    let page = state.tags.get_all_tags(&search.tag, paging.request()).await?;
    Ok(HttpResponse::Ok().json(paging.envelope(page, tag_response)))
}

/// POST /api/v1/tags
pub async fn add_tag(
    state: web::Data<AppState>,
    _identity: Identity,
    body: web::Json<TagRequest>,
) -> AppResult<HttpResponse> {
    let tag = state.tags.add_tag(body.into_inner().tag).await?;
    Ok(HttpResponse::Created().json(CommonResponse::now(tag_response(tag))))
}

/// DELETE /api/v1/tags?id=
pub async fn delete_tag(
    state: web::Data<AppState>,
    _identity: Identity,
    query: web::Query<TagIdQuery>,
) -> AppResult<HttpResponse> {
    state.tags.delete_tag(query.id).await?;
    Ok(HttpResponse::Ok().json(CommonResponse::now(MessageResponse::ok())))
}
