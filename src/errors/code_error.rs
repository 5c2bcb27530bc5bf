use axum::http::{HeaderValue, StatusCode, header};
use axum::response::IntoResponse;
use serde_derive::Serialize;
use std::error::Error;
use std::fmt;
use tracing::Level;
use utoipa::ToSchema;

use crate::domain::policy::access::{AccessError, LOGIN_PATH};

pub type HandlerResponse<T> = Result<T, CodeErrorResp>;

pub struct CodeError {
    pub success: bool,
    pub error_code: u16,
    pub http_status_code: StatusCode,
    pub message: &'static str,
    pub log_level: Level,
}

impl CodeError {
    pub const POOL_ERROR: CodeError = CodeError {
        success: false,
        error_code: 0,
        http_status_code: StatusCode::INTERNAL_SERVER_ERROR,
        message: "Could not get conn out of pool!",
        log_level: Level::ERROR,
    };
    pub const DB_QUERY_ERROR: CodeError = CodeError {
        success: false,
        error_code: 1,
        http_status_code: StatusCode::INTERNAL_SERVER_ERROR,
        message: "Database query failed!",
        log_level: Level::ERROR,
    };
    pub const DB_INSERTION_ERROR: CodeError = CodeError {
        success: false,
        error_code: 2,
        http_status_code: StatusCode::INTERNAL_SERVER_ERROR,
        message: "Database insertion failed!",
        log_level: Level::ERROR,
    };
    pub const DB_UPDATE_ERROR: CodeError = CodeError {
        success: false,
        error_code: 3,
        http_status_code: StatusCode::INTERNAL_SERVER_ERROR,
        message: "Database update failed!",
        log_level: Level::ERROR,
    };
    pub const DB_DELETION_ERROR: CodeError = CodeError {
        success: false,
        error_code: 4,
        http_status_code: StatusCode::INTERNAL_SERVER_ERROR,
        message: "Database deletion failed!",
        log_level: Level::ERROR,
    };
    pub const NOT_FOUND: CodeError = CodeError {
        success: false,
        error_code: 10,
        http_status_code: StatusCode::NOT_FOUND,
        message: "Requested resource does not exist!",
        log_level: Level::INFO,
    };
    pub const AUTHENTICATION_REQUIRED: CodeError = CodeError {
        success: false,
        error_code: 11,
        http_status_code: StatusCode::FOUND,
        message: "Log in to continue.",
        log_level: Level::INFO,
    };
    pub const FORBIDDEN: CodeError = CodeError {
        success: false,
        error_code: 12,
        http_status_code: StatusCode::FOUND,
        message: "Only the author may change this content.",
        log_level: Level::WARN,
    };
    pub const SUPERUSER_REQUIRED: CodeError = CodeError {
        success: false,
        error_code: 13,
        http_status_code: StatusCode::FORBIDDEN,
        message: "Superuser access required!",
        log_level: Level::WARN,
    };
    pub const USER_NAME_INVALID: CodeError = CodeError {
        success: false,
        error_code: 20,
        http_status_code: StatusCode::BAD_REQUEST,
        message: "User name must be 1-150 characters of letters, digits and @/./+/-/_ only.",
        log_level: Level::INFO,
    };
    pub const EMAIL_INVALID: CodeError = CodeError {
        success: false,
        error_code: 21,
        http_status_code: StatusCode::BAD_REQUEST,
        message: "Invalid email address!",
        log_level: Level::INFO,
    };
    pub const PASSWORD_INVALID: CodeError = CodeError {
        success: false,
        error_code: 22,
        http_status_code: StatusCode::BAD_REQUEST,
        message: "Password must be 8-128 characters long.",
        log_level: Level::INFO,
    };
    pub const TITLE_INVALID: CodeError = CodeError {
        success: false,
        error_code: 23,
        http_status_code: StatusCode::BAD_REQUEST,
        message: "Title must be 1-256 characters long.",
        log_level: Level::INFO,
    };
    pub const SLUG_INVALID: CodeError = CodeError {
        success: false,
        error_code: 24,
        http_status_code: StatusCode::BAD_REQUEST,
        message: "Slug may only contain latin letters, digits, hyphens and underscores.",
        log_level: Level::INFO,
    };
    pub const COMMENT_INVALID: CodeError = CodeError {
        success: false,
        error_code: 25,
        http_status_code: StatusCode::BAD_REQUEST,
        message: "Comment text must not be empty.",
        log_level: Level::INFO,
    };
    pub const INVALID_REFERENCE: CodeError = CodeError {
        success: false,
        error_code: 26,
        http_status_code: StatusCode::BAD_REQUEST,
        message: "Referenced category or location does not exist!",
        log_level: Level::INFO,
    };
    pub const USER_NAME_MUST_BE_UNIQUE: CodeError = CodeError {
        success: false,
        error_code: 30,
        http_status_code: StatusCode::CONFLICT,
        message: "User name is already taken!",
        log_level: Level::INFO,
    };
    pub const EMAIL_MUST_BE_UNIQUE: CodeError = CodeError {
        success: false,
        error_code: 31,
        http_status_code: StatusCode::CONFLICT,
        message: "Email is already registered!",
        log_level: Level::INFO,
    };
    pub const SLUG_MUST_BE_UNIQUE: CodeError = CodeError {
        success: false,
        error_code: 32,
        http_status_code: StatusCode::CONFLICT,
        message: "Category slug is already in use!",
        log_level: Level::INFO,
    };
    pub const WRONG_CREDENTIALS: CodeError = CodeError {
        success: false,
        error_code: 40,
        http_status_code: StatusCode::UNAUTHORIZED,
        message: "Wrong user name or password!",
        log_level: Level::INFO,
    };
    pub const COULD_NOT_HASH_PW: CodeError = CodeError {
        success: false,
        error_code: 41,
        http_status_code: StatusCode::INTERNAL_SERVER_ERROR,
        message: "Could not hash password!",
        log_level: Level::ERROR,
    };
    pub const COULD_NOT_VERIFY_PW: CodeError = CodeError {
        success: false,
        error_code: 42,
        http_status_code: StatusCode::INTERNAL_SERVER_ERROR,
        message: "Could not verify password!",
        log_level: Level::ERROR,
    };
    pub const SESSION_ID_ALREADY_EXISTS: CodeError = CodeError {
        success: false,
        error_code: 43,
        http_status_code: StatusCode::INTERNAL_SERVER_ERROR,
        message: "Session ID collision; try again.",
        log_level: Level::ERROR,
    };
    pub const INVALID_PATH: CodeError = CodeError {
        success: false,
        error_code: 50,
        http_status_code: StatusCode::NOT_FOUND,
        message: "Invalid path!",
        log_level: Level::INFO,
    };
}

pub fn code_err(cerr: CodeError, e: impl fmt::Display) -> CodeErrorResp {
    CodeErrorResp {
        success: cerr.success,
        error_code: cerr.error_code,
        http_status_code: cerr.http_status_code,
        message: cerr.message.to_string(),
        error_message: e.to_string(),
        redirect_to: None,
        log_level: cerr.log_level,
    }
}

impl From<CodeError> for CodeErrorResp {
    fn from(cerr: CodeError) -> Self {
        let message = cerr.message;
        code_err(cerr, message)
    }
}

impl From<AccessError> for CodeErrorResp {
    fn from(e: AccessError) -> Self {
        match e {
            AccessError::NotFound => code_err(CodeError::NOT_FOUND, &e),
            AccessError::AuthenticationRequired => {
                code_err(CodeError::AUTHENTICATION_REQUIRED, &e).with_redirect(LOGIN_PATH)
            }
            AccessError::Forbidden { ref redirect_to } => {
                let redirect_to = redirect_to.clone();
                code_err(CodeError::FORBIDDEN, &e).with_redirect(redirect_to)
            }
        }
    }
}

#[derive(Serialize, Debug, ToSchema)]
pub struct CodeErrorResp {
    pub success: bool,
    pub error_code: u16,
    #[serde(serialize_with = "serialize_status_code")]
    #[schema(value_type = u16)]
    pub http_status_code: StatusCode,
    pub message: String,
    pub error_message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_to: Option<String>,
    #[serde(skip)]
    pub log_level: Level,
}

impl CodeErrorResp {
    pub fn with_redirect(mut self, location: impl Into<String>) -> Self {
        self.redirect_to = Some(location.into());
        self
    }
}

fn serialize_status_code<S>(status: &StatusCode, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_u16(status.as_u16())
}

impl fmt::Display for CodeErrorResp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.message, self.error_message)
    }
}

impl Error for CodeErrorResp {}

// The logging middleware reads and strips the x-error-* headers.
impl IntoResponse for CodeErrorResp {
    fn into_response(self) -> axum::response::Response {
        let body = serde_json::to_string(&self).unwrap_or_else(|_| "{}".to_string());
        let mut response = (
            self.http_status_code,
            [(header::CONTENT_TYPE, "application/json")],
            body,
        )
            .into_response();

        let headers = response.headers_mut();
        let error_headers = [
            ("x-error-log-level", self.log_level.to_string()),
            (
                "x-error-status-code",
                self.http_status_code.as_u16().to_string(),
            ),
            ("x-error-code", self.error_code.to_string()),
            ("x-error-message", self.message),
            ("x-error-detail", self.error_message),
        ];
        for (name, value) in error_headers {
            if let Ok(value) = HeaderValue::from_str(&value) {
                headers.insert(name, value);
            }
        }

        if let Some(location) = self.redirect_to
            && let Ok(location) = HeaderValue::from_str(&location)
        {
            headers.insert(header::LOCATION, location);
        }

        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404_without_location() {
        let response = CodeErrorResp::from(AccessError::NotFound).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.headers().get(header::LOCATION).is_none());
    }

    #[test]
    fn authentication_required_redirects_to_login() {
        let response = CodeErrorResp::from(AccessError::AuthenticationRequired).into_response();
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            LOGIN_PATH
        );
    }

    #[test]
    fn forbidden_redirects_to_post_detail() {
        let err = AccessError::Forbidden {
            redirect_to: "/api/posts/42".to_string(),
        };
        let resp = CodeErrorResp::from(err);
        assert_eq!(resp.error_code, CodeError::FORBIDDEN.error_code);

        let response = resp.into_response();
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/api/posts/42"
        );
    }

    #[test]
    fn error_headers_carry_log_level_for_middleware() {
        let response = CodeErrorResp::from(CodeError::DB_QUERY_ERROR).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.headers().get("x-error-log-level").unwrap(),
            "ERROR"
        );
        assert_eq!(response.headers().get("x-error-code").unwrap(), "1");
    }

    #[test]
    fn body_omits_redirect_when_absent() {
        let resp: CodeErrorResp = CodeError::TITLE_INVALID.into();
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["http_status_code"], 400);
        assert!(json.get("redirect_to").is_none());
        assert!(json.get("log_level").is_none());
    }
}
