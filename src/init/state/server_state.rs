use std::sync::atomic::AtomicU64;

use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::bb8::{Pool, PooledConnection};
use uuid::Uuid;

use super::builder::ServerStateBuilder;
use super::deployment_environment::DeploymentEnvironment;
use super::session::Session;

pub struct ServerState {
    pub(crate) app_name_version: String,
    pub(crate) server_start_time: tokio::time::Instant,
    pub(crate) pool: Pool<AsyncPgConnection>,
    pub(crate) responses_handled: AtomicU64,
    pub(crate) session_map: scc::HashMap<Uuid, Session>, // read/write
    pub(crate) session_duration: chrono::Duration,
    pub(crate) deployment_environment: DeploymentEnvironment,
}

impl ServerState {
    pub fn builder() -> ServerStateBuilder {
        ServerStateBuilder::default()
    }

    pub async fn new_session(&self, user_id: Uuid) -> anyhow::Result<Uuid> {
        let (pruned, remaining) = self.purge_expired_sessions().await;
        if pruned > 0 {
            tracing::info!(pruned, remaining, "Purged expired sessions.");
        }

        let session = Session::new(user_id, self.session_duration);
        let session_id = session.session_id;

        match self.session_map.insert_async(session_id, session).await {
            Ok(_) => Ok(session_id),
            Err(_) => Err(anyhow::anyhow!(
                "Failed to insert session into scc::HashMap; key already exists!"
            )),
        }
    }

    /// Expired sessions are dropped here rather than by a sweeper.
    pub async fn get_session(&self, session_id: &Uuid) -> anyhow::Result<Session> {
        let session = self
            .session_map
            .read_async(session_id, |_, v| v.clone())
            .await
            .ok_or_else(|| anyhow::anyhow!("Session not found"))?;

        if !session.is_unexpired() {
            let _ = self.session_map.remove_async(session_id).await;
            return Err(anyhow::anyhow!("Session expired"));
        }

        Ok(session)
    }

    pub async fn purge_expired_sessions(&self) -> (usize, usize) {
        let now = chrono::Utc::now();
        let (mut pruned, mut remaining): (usize, usize) = (0, 0);

        self.session_map
            .iter_mut_async(|entry| {
                if entry.expires_at < now {
                    pruned += 1;
                    let _ = entry.consume();
                } else {
                    remaining += 1;
                }
                true
            })
            .await;

        (pruned, remaining)
    }

    pub async fn remove_session(&self, session_id: &Uuid) -> Option<Session> {
        self.session_map
            .remove_async(session_id)
            .await
            .map(|(_, session)| session)
    }

    pub fn get_session_length(&self) -> usize {
        self.session_map.len()
    }

    pub fn get_app_name_version(&self) -> String {
        self.app_name_version.clone()
    }

    pub fn get_uptime(&self) -> tokio::time::Duration {
        self.server_start_time.elapsed()
    }

    pub fn get_deployment_environment(&self) -> DeploymentEnvironment {
        self.deployment_environment
    }

    pub async fn get_conn(&self) -> anyhow::Result<PooledConnection<'_, AsyncPgConnection>> {
        Ok(self.pool.get().await?)
    }

    pub fn get_responses_handled(&self) -> u64 {
        self.responses_handled
            .load(std::sync::atomic::Ordering::SeqCst)
    }

    pub fn add_responses_handled(&self) {
        self.responses_handled
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use diesel_async::pooled_connection::AsyncDieselConnectionManager;

    use super::*;

    fn state() -> ServerState {
        let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(
            "postgres://blog:pw@localhost/blogicum",
        );
        ServerState::builder()
            .app_name_version("blogicum-test".to_string())
            .server_start_time(tokio::time::Instant::now())
            .pool(Pool::builder().build_unchecked(manager))
            .build()
            .unwrap()
    }

    fn expired(user_id: Uuid) -> Session {
        let mut session = Session::new(user_id, chrono::Duration::minutes(5));
        session.created_at -= chrono::Duration::hours(2);
        session.expires_at = chrono::Utc::now() - chrono::Duration::hours(1);
        session
    }

    #[tokio::test]
    async fn login_drops_sessions_that_already_expired() {
        let state = state();
        let stale = expired(Uuid::new_v4());
        let stale_id = stale.session_id;
        assert!(state.session_map.insert_async(stale_id, stale).await.is_ok());

        let fresh_id = state.new_session(Uuid::new_v4()).await.unwrap();

        assert!(state.session_map.read_async(&stale_id, |_, _| ()).await.is_none());
        assert!(state.session_map.read_async(&fresh_id, |_, _| ()).await.is_some());
        assert_eq!(state.get_session_length(), 1);
    }

    #[tokio::test]
    async fn purge_keeps_live_sessions() {
        let state = state();
        let live_id = state.new_session(Uuid::new_v4()).await.unwrap();
        let stale = expired(Uuid::new_v4());
        let stale_id = stale.session_id;
        assert!(state.session_map.insert_async(stale_id, stale).await.is_ok());

        assert_eq!(state.purge_expired_sessions().await, (1, 1));
        assert!(state.get_session(&live_id).await.is_ok());
    }
}
