use chrono::Utc;
use uuid::Uuid;

pub const DEFAULT_SESSION_DURATION: chrono::Duration = chrono::Duration::hours(1);

#[derive(Debug, Clone, serde_derive::Serialize, serde_derive::Deserialize)]
pub struct Session {
    pub session_id: Uuid,
    pub user_id: Uuid,
    pub created_at: chrono::DateTime<Utc>,
    pub expires_at: chrono::DateTime<Utc>,
}

impl Session {
    pub fn new(user_id: Uuid, valid_for: chrono::Duration) -> Self {
        let now = Utc::now();
        Self {
            session_id: Uuid::new_v4(),
            user_id,
            created_at: now,
            expires_at: now + valid_for,
        }
    }

    pub fn is_unexpired(&self) -> bool {
        let now = Utc::now();

        self.created_at <= now && self.expires_at > now
    }

    pub fn get_user_id(&self) -> Uuid {
        self.user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_session_is_valid() {
        let session = Session::new(Uuid::new_v4(), DEFAULT_SESSION_DURATION);
        assert!(session.is_unexpired());
    }

    #[test]
    fn elapsed_session_is_expired() {
        let mut session = Session::new(Uuid::new_v4(), DEFAULT_SESSION_DURATION);
        session.expires_at = Utc::now() - chrono::Duration::seconds(1);
        assert!(!session.is_unexpired());
    }
}
