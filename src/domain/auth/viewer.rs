use uuid::Uuid;

/// Identity making the current request, resolved from the session cookie by
/// `is_logged_in_middleware`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Viewer {
    Anonymous,
    Authenticated(Uuid),
}

impl Viewer {
    pub fn user_id(&self) -> Option<Uuid> {
        match self {
            Viewer::Authenticated(user_id) => Some(*user_id),
            Viewer::Anonymous => None,
        }
    }

    /// True only for an authenticated viewer with exactly this id.
    pub fn is(&self, user_id: Uuid) -> bool {
        self.user_id() == Some(user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_is_nobody() {
        let id = Uuid::new_v4();
        assert!(!Viewer::Anonymous.is(id));
        assert_eq!(Viewer::Anonymous.user_id(), None);
    }

    #[test]
    fn authenticated_matches_own_id_only() {
        let id = Uuid::new_v4();
        let viewer = Viewer::Authenticated(id);
        assert!(viewer.is(id));
        assert!(!viewer.is(Uuid::new_v4()));
    }
}
