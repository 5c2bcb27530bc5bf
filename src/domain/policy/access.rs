use std::fmt;

pub const LOGIN_PATH: &str = "/api/auth/login";

/// Canonical detail location of a post; comments redirect to their parent.
pub fn post_detail_path(post_id: i64) -> String {
    format!("/api/posts/{post_id}")
}

/// Why a viewer was turned away. Mapped onto HTTP by `CodeErrorResp`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AccessError {
    /// Missing, or present but invisible to this viewer; callers cannot
    /// tell which.
    NotFound,
    /// Anonymous viewer attempted a mutation.
    AuthenticationRequired,
    /// Authenticated non-author attempted to mutate content they can see.
    Forbidden { redirect_to: String },
}

impl fmt::Display for AccessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessError::NotFound => write!(f, "not found"),
            AccessError::AuthenticationRequired => write!(f, "authentication required"),
            AccessError::Forbidden { redirect_to } => {
                write!(f, "forbidden; redirecting to {redirect_to}")
            }
        }
    }
}

impl std::error::Error for AccessError {}
