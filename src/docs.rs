//! OpenAPI documentation registration for Swagger UI.
//!
//! Utoipa only exposes operations listed in `#[openapi(paths(...))]`;
//! handler functions still need their own `#[utoipa::path(...)]` attributes.

use utoipa::OpenApi;

// ---- handlers (for `paths(...)`) ----
use crate::handlers::{
    admin::{create_category, create_location, update_category, update_location},
    auth::{login, logout, me, signup},
    blog::{
        category_posts, delete_comment, delete_post, get_posts, read_post, submit_comment,
        submit_post, update_comment, update_post,
    },
    server::healthcheck,
    user::{get_profile, update_profile},
};

// ---- schemas (for `components(schemas(...))`) ----
use crate::domain::{
    auth::user::{UserBadge, UserProfile},
    blog::{
        category::{Category, CategoryBadge},
        comment::{Comment, CommentForm, CommentView},
        location::{Location, LocationBadge},
        post::{Post, PostCard},
    },
    feed::assembler::{FeedPage, FeedSubject},
};
use crate::dto::{
    requests::{
        admin::{
            category_request::{CreateCategoryRequest, UpdateCategoryRequest},
            location_request::{CreateLocationRequest, UpdateLocationRequest},
        },
        auth::{login_request::LoginRequest, signup_request::SignupRequest},
        blog::{
            get_posts_request::GetPostsRequest, submit_comment_request::SubmitCommentRequest,
            submit_post_request::SubmitPostRequest, update_comment_request::UpdateCommentRequest,
            update_post_request::UpdatePostRequest,
        },
        user::update_profile_request::UpdateProfileRequest,
    },
    responses::{
        auth::{
            login_response::LoginResponse, me_response::MeResponse,
            signup_response::SignupResponse,
        },
        blog::{
            delete_comment_response::DeleteCommentResponse,
            delete_post_response::DeletePostResponse, read_post_response::ReadPostResponse,
        },
    },
};
use crate::errors::code_error::CodeErrorResp;
use crate::handlers::{auth::logout::LogoutResponse, server::healthcheck::ServerHealthcheckResponse};
use crate::util::pagination::PageInfo;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- server ---
        healthcheck::healthcheck,

        // --- auth ---
        signup::signup_handler,
        login::login,
        logout::logout,
        me::me_handler,

        // --- blog ---
        get_posts::get_posts,
        read_post::read_post,
        category_posts::category_posts,
        submit_post::submit_post,
        update_post::update_post,
        delete_post::delete_post,
        submit_comment::submit_comment,
        update_comment::update_comment,
        delete_comment::delete_comment,

        // --- user ---
        get_profile::get_profile,
        update_profile::update_profile,

        // --- admin ---
        create_category::create_category,
        update_category::update_category,
        create_location::create_location,
        update_location::update_location,
    ),
    components(
        schemas(
            // shared error response
            CodeErrorResp,

            // --- auth DTOs ---
            SignupRequest,
            SignupResponse,
            LoginRequest,
            LoginResponse,
            LogoutResponse,
            MeResponse,

            // --- blog DTOs ---
            GetPostsRequest,
            ReadPostResponse,
            SubmitPostRequest,
            UpdatePostRequest,
            SubmitCommentRequest,
            UpdateCommentRequest,
            DeletePostResponse,
            DeleteCommentResponse,

            // --- user DTOs ---
            UpdateProfileRequest,

            // --- admin DTOs ---
            CreateCategoryRequest,
            UpdateCategoryRequest,
            CreateLocationRequest,
            UpdateLocationRequest,

            // --- domain models used in responses ---
            ServerHealthcheckResponse,
            FeedPage,
            FeedSubject,
            PageInfo,
            Post,
            PostCard,
            Comment,
            CommentView,
            CommentForm,
            Category,
            CategoryBadge,
            Location,
            LocationBadge,
            UserProfile,
            UserBadge,
        )
    ),
    tags(
        (name = "server", description = "Server status endpoints"),
        (name = "auth", description = "Signup, login and sessions"),
        (name = "blog", description = "Feeds, posts and comments"),
        (name = "user", description = "Profiles"),
        (name = "admin", description = "Category and location management (superuser only)")
    )
)]
pub struct ApiDoc;
