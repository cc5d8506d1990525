//! HTTP handlers and route configuration.

mod auth;
mod comments;
mod health;
mod posts;
mod tags;
mod users;


use actix_web::web;

use crate::middleware::error::AppError;

/// Malformed query strings become 400 problem responses.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into())
}

/// Malformed bodies become 400 problem responses.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into())
}

/// Non-numeric ids become 400 problem responses.
fn path_config() -> web::PathConfig {
    web::PathConfig::default()
        .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into())
}

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(path_config())
            // Public routes
            .route("/health", web::get().to(health::health_check))
            .service(
                web::scope("/v1")
                    .service(
                        web::scope("/auth")
                            .route("/register", web::post().to(auth::register))
                            .route("/login", web::post().to(auth::login)),
                    )
                    // `/users/me` must be registered before `/users/{id}`.
                    .route("/users/me", web::get().to(users::me))
                    .route("/users/me", web::put().to(users::update_me))
                    .route("/users/me", web::delete().to(users::delete_me))
                    .route("/users/{id}", web::get().to(users::get_user))
                    .route("/users/{id}/wall", web::get().to(posts::get_wall))
                    .route("/users/{id}/wall", web::post().to(posts::create_post))
                    .route("/post", web::get().to(posts::search_posts))
                    .route("/post/{id}", web::get().to(posts::get_post))
                    .route("/post/{id}", web::put().to(posts::edit_post))
                    .route("/post/{id}", web::delete().to(posts::delete_post))
                    .route("/post/{id}/recover", web::put().to(posts::recover_post))
                    .service(
                        web::scope("/post/{id}/comments")
                            .route("", web::get().to(comments::get_comments))
                            .route("", web::post().to(comments::create_comment))
                            .route("/{comment_id}", web::put().to(comments::edit_comment))
                            .route("/{comment_id}", web::delete().to(comments::delete_comment))
                            .route(
                                "/{comment_id}/recover",
                                web::put().to(comments::recover_comment),
                            ),
                    )
                    .route("/feeds", web::get().to(posts::get_feeds))
                    .route("/tags", web::get().to(tags::get_tags))
                    .route("/tags", web::post().to(tags::add_tag))
                    .route("/tags", web::delete().to(tags::delete_tag)),
            ),
    );
}
