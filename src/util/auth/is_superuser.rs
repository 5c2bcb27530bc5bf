use std::sync::Arc;

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::{init::state::ServerState, schema::users};

/// Unknown users are simply not superusers.
pub async fn is_superuser(state: Arc<ServerState>, user_id: Uuid) -> anyhow::Result<bool> {
    let mut conn = state.get_conn().await?;

    let is_superuser: Option<bool> = users::table
        .filter(users::user_id.eq(user_id))
        .select(users::user_is_superuser)
        .first::<bool>(&mut conn)
        .await
        .optional()?;

    drop(conn);

    Ok(is_superuser.unwrap_or(false))
}
