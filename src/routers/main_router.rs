use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware::{from_fn, from_fn_with_state},
    routing::{get, patch, post},
};
use tower_http::{compression::CompressionLayer, cors::CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    docs::ApiDoc,
    handlers::{
        admin::{
            create_category::create_category, create_location::create_location,
            update_category::update_category, update_location::update_location,
        },
        auth::{login::login, logout::logout, me::me_handler, signup::signup_handler},
        blog::{
            category_posts::category_posts, delete_comment::delete_comment,
            delete_post::delete_post, get_posts::get_posts, read_post::read_post,
            submit_comment::submit_comment, submit_post::submit_post,
            update_comment::update_comment, update_post::update_post,
        },
        server::{fallback::fallback_handler, healthcheck::healthcheck},
        user::{get_profile::get_profile, update_profile::update_profile},
    },
    init::state::ServerState,
};

use super::middleware::{
    auth::auth_middleware, is_logged_in::is_logged_in_middleware,
    is_superuser::is_superuser_middleware, logging::log_middleware,
};

const MAX_REQUEST_SIZE: usize = 1024 * 1024 * 2; // 2MB; bodies are JSON only

pub fn build_router(state: Arc<ServerState>) -> axum::Router {
    let auth_middleware = from_fn(auth_middleware);
    let is_superuser_middleware = from_fn_with_state(state.clone(), is_superuser_middleware);
    let log_middleware = from_fn_with_state(state.clone(), log_middleware);
    let is_logged_in_middleware = from_fn_with_state(state.clone(), is_logged_in_middleware);
    let compression_middleware = CompressionLayer::new().gzip(true).zstd(true);
    let cors_layer = CorsLayer::very_permissive();

    // Anyone may read; the viewer only narrows or widens what is visible
    let public_router = Router::new()
        .route("/api/healthcheck/server", get(healthcheck))
        .route("/api/auth/signup", post(signup_handler))
        .route("/api/auth/login", post(login))
        .route("/api/posts", get(get_posts))
        .route("/api/posts/{post_id}", get(read_post))
        .route("/api/category/{category_slug}", get(category_posts))
        .route("/api/profile/{user_name}", get(get_profile));

    // Anonymous requests are turned away before any lookup
    let protected_router = Router::new()
        .route("/api/auth/logout", post(logout))
        .route("/api/auth/me", get(me_handler))
        .route("/api/posts", post(submit_post))
        .route(
            "/api/posts/{post_id}",
            patch(update_post).delete(delete_post),
        )
        .route("/api/posts/{post_id}/comment", post(submit_comment))
        .route(
            "/api/posts/{post_id}/comments/{comment_id}",
            patch(update_comment).delete(delete_comment),
        )
        .route("/api/profile", patch(update_profile))
        .layer(auth_middleware.clone());

    // Layers run bottom-up: auth first, then the superuser check
    let admin_router = Router::new()
        .route("/api/admin/categories", post(create_category))
        .route("/api/admin/categories/{category_id}", patch(update_category))
        .route("/api/admin/locations", post(create_location))
        .route("/api/admin/locations/{location_id}", patch(update_location))
        .layer(is_superuser_middleware)
        .layer(auth_middleware);

    let api_router = public_router
        .merge(protected_router)
        .merge(admin_router)
        .fallback(fallback_handler)
        .layer(is_logged_in_middleware)
        .layer(compression_middleware)
        .layer(log_middleware)
        .layer(DefaultBodyLimit::max(MAX_REQUEST_SIZE))
        .layer(cors_layer)
        .with_state(state);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(api_router)
}
