use init::{config::ServerConfig, server_init::server_init_proc};
use mimalloc::MiMalloc;
use tracing::info;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

// modules tree
pub mod build_info;
pub mod docs;
pub mod schema;
pub mod domain {
    pub mod auth {
        pub mod user;
        pub mod viewer;
    }
    pub mod blog {
        pub mod category;
        pub mod comment;
        pub mod location;
        pub mod post;
    }
    pub mod feed;
    pub mod policy;
}
pub mod dto {
    pub mod common {
        pub mod double_option;
    }
    pub mod requests {
        pub mod admin {
            pub mod category_request;
            pub mod location_request;
        }
        pub mod auth {
            pub mod login_request;
            pub mod signup_request;
        }
        pub mod blog {
            pub mod get_posts_request;
            pub mod submit_comment_request;
            pub mod submit_post_request;
            pub mod update_comment_request;
            pub mod update_post_request;
        }
        pub mod user {
            pub mod update_profile_request;
        }
    }
    pub mod responses {
        pub mod auth {
            pub mod login_response;
            pub mod me_response;
            pub mod signup_response;
        }
        pub mod blog {
            pub mod delete_comment_response;
            pub mod delete_post_response;
            pub mod read_post_response;
        }
        pub mod response_data;
        pub mod response_meta;
    }
}
pub mod errors {
    pub mod code_error;
}
pub mod handlers {
    pub mod admin {
        pub mod create_category;
        pub mod create_location;
        pub mod update_category;
        pub mod update_location;
    }
    pub mod auth {
        pub mod login;
        pub mod logout;
        pub mod me;
        pub mod signup;
    }
    pub mod blog {
        pub mod category_posts;
        pub mod delete_comment;
        pub mod delete_post;
        pub mod get_posts;
        pub mod read_post;
        pub mod submit_comment;
        pub mod submit_post;
        pub mod update_comment;
        pub mod update_post;
    }
    pub mod server {
        pub mod fallback;
        pub mod healthcheck;
    }
    pub mod user {
        pub mod get_profile;
        pub mod update_profile;
    }
}
pub mod routers {
    pub mod main_router;
    pub mod middleware {
        pub mod auth;
        pub mod is_logged_in;
        pub mod is_superuser;
        pub mod logging;
    }
}
pub mod init {
    pub mod config;
    pub mod server_init;
    pub mod state;
}
pub mod util {
    pub mod auth {
        pub mod is_superuser;
    }
    pub mod crypto {
        pub mod hash_pw;
        pub mod verify_pw;
    }
    pub mod pagination;
    pub mod string {
        pub mod generate_slug;
        pub mod validations;
    }
    pub mod time {
        pub mod now;
    }
}

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    let start = tokio::time::Instant::now();

    // On AWS the environment is injected; elsewhere a missing .env is fine
    if std::env::var("IS_AWS").is_err() {
        let _ = dotenvy::dotenv();
    }

    let server_config = ServerConfig::from_env()?;

    let file_appender = tracing_appender::rolling::daily(&server_config.log_dir, "blogicum.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_max_level(server_config.log_level)
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(false)
        .init();

    info!(
        log_level = %server_config.log_level,
        log_dir = %server_config.log_dir,
        "Initializing server..."
    );
    server_init_proc(start, server_config).await?;

    Ok(())
}
