//! Posts, walls and the feed.

use actix_web::{HttpResponse, web};

use zerone_core::services::{PostDraft, PostSearch};
use zerone_shared::CommonResponse;
use zerone_shared::dto::PostRequest;
use zerone_shared::query::{PaginationQuery, PostSearchQuery, PublishQuery};

use crate::mapper::{Paging, post_response};
use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/v1/post
pub async fn search_posts(
    state: web::Data<AppState>,
    _identity: Identity,
    search: web::Query<PostSearchQuery>,
    paging: web::Query<PaginationQuery>,
) -> AppResult<HttpResponse> {
    let paging = Paging::from_query(&paging)?;
    let search = search.into_inner();
    let search = PostSearch {
        text: search.text,
        author: search.author,
        tag: search.tag,
        date_from: search.date_from,
        date_to: search.date_to,
    };

    let page = state.posts.search_posts(search, paging.request()).await?;
    Ok(HttpResponse::Ok().json(paging.envelope(page, post_response)))
}

/// GET /api/v1/post/{id}
pub async fn get_post(
    state: web::Data<AppState>,
    _identity: Identity,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let post = state.posts.get_post_by_id(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(CommonResponse::now(post_response(post))))
}

/// PUT /api/v1/post/{id}
pub async fn edit_post(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i64>,
    publish: web::Query<PublishQuery>,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let post = state
        .posts
        .edit_post_by_id(
            &identity,
            path.into_inner(),
            publish.publish_date,
            req.title,
            req.post_text,
        )
        .await?;
    Ok(HttpResponse::Ok().json(CommonResponse::now(post_response(post))))
}

/// DELETE /api/v1/post/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let post = state
        .posts
        .delete_post_by_id(&identity, path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(CommonResponse::now(post_response(post))))
}

/// PUT /api/v1/post/{id}/recover
pub async fn recover_post(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let post = state
        .posts
        .recover_post_by_id(&identity, path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(CommonResponse::now(post_response(post))))
}

/// GET /api/v1/users/{id}/wall
pub async fn get_wall(
    state: web::Data<AppState>,
    _identity: Identity,
    path: web::Path<i64>,
    paging: web::Query<PaginationQuery>,
) -> AppResult<HttpResponse> {
    let paging = Paging::from_query(&paging)?;
    let page = state
        .posts
        .get_author_wall(path.into_inner(), paging.request())
        .await?;
    Ok(HttpResponse::Ok().json(paging.envelope(page, post_response)))
}

/// POST /api/v1/users/{id}/wall
pub async fn create_post(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i64>,
    publish: web::Query<PublishQuery>,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let draft = PostDraft {
        title: req.title,
        post_text: req.post_text,
        tags: req.tags,
    };

    let post = state
        .posts
        .create_post(&identity, path.into_inner(), publish.publish_date, draft)
        .await?;
    Ok(HttpResponse::Created().json(CommonResponse::now(post_response(post))))
}

/// GET /api/v1/feeds
pub async fn get_feeds(
    state: web::Data<AppState>,
    identity: Identity,
    paging: web::Query<PaginationQuery>,
) -> AppResult<HttpResponse> {
    let paging = Paging::from_query(&paging)?;
    let page = state.posts.get_feeds(&identity, paging.request()).await?;
    Ok(HttpResponse::Ok().json(paging.envelope(page, post_response)))
}
