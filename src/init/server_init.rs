use std::net::SocketAddr;
use std::sync::Arc;

use diesel::prelude::QueryableByName;
use diesel_async::RunQueryDsl;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::Pool;
use tracing::info;

use crate::routers::main_router::build_router;

use super::{
    config::{DbConfig, ServerConfig},
    state::ServerState,
};

pub async fn server_init_proc(
    start: tokio::time::Instant,
    server_config: ServerConfig,
) -> anyhow::Result<()> {
    let num_cores: u32 = num_cpus::get_physical() as u32;

    let db_url = DbConfig::from_env()?.to_url();

    let pool_config =
        AsyncDieselConnectionManager::<diesel_async::AsyncPgConnection>::new(db_url);

    let pool = Pool::builder()
        .min_idle(Some(num_cores))
        .max_size(num_cores * 10u32)
        .build(pool_config)
        .await?;

    let state = Arc::new(
        ServerState::builder()
            .app_name_version(format!(
                "{} {}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION")
            ))
            .pool(pool)
            .server_start_time(start)
            .session_duration(server_config.session_duration)
            .deployment_environment(server_config.deployment_environment)
            .build()?,
    );

    let mut conn = state.get_conn().await?;

    #[derive(QueryableByName)]
    struct PgVersion {
        #[diesel(sql_type = diesel::sql_types::Text)]
        version: String,
    }

    let pg_version: PgVersion = diesel::sql_query("SELECT version()")
        .get_result(&mut conn)
        .await?;

    info!("PostgreSQL version: {}", pg_version.version);

    drop(conn);

    let listener = tokio::net::TcpListener::bind(server_config.bind_addr()).await?;

    info!(
        addr = %server_config.bind_addr(),
        environment = ?server_config.deployment_environment,
        startup = ?start.elapsed(),
        "Blogicum server starting..."
    );

    axum::serve(
        listener,
        build_router(state).into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("Server shut down.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
}
