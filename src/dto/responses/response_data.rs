use axum::{http::StatusCode, response::IntoResponse};
use axum_extra::extract::{CookieJar, cookie::Cookie};
use serde_derive::Serialize;

use super::response_meta::ResponseMeta;

#[derive(Serialize)]
pub struct Response<D: serde::Serialize, M: serde::Serialize> {
    success: bool,
    data: D,
    meta: ResponseMeta<M>,
    #[serde(skip)]
    status: StatusCode,
    #[serde(skip)]
    cookies: Option<CookieJar>,
}

impl<D: serde::Serialize, M: serde::Serialize> Response<D, M> {
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }
}

impl<D: serde::Serialize, M: serde::Serialize> IntoResponse for Response<D, M> {
    fn into_response(mut self) -> axum::response::Response {
        let status = self.status;
        let cookies = self.cookies.take();
        (status, cookies, axum::response::Json(self)).into_response()
    }
}

pub fn http_resp<D: serde::Serialize, M: serde::Serialize>(
    data: D,
    meta: M,
    start: tokio::time::Instant,
) -> Response<D, M> {
    Response {
        success: true,
        data,
        meta: ResponseMeta::from(start, meta),
        status: StatusCode::OK,
        cookies: None,
    }
}

/// `removals` are sent as expired cookies so the browser drops them.
pub fn http_resp_with_cookies<D: serde::Serialize, M: serde::Serialize>(
    data: D,
    meta: M,
    start: tokio::time::Instant,
    cookies: Option<Vec<Cookie<'static>>>,
    removals: Option<Vec<Cookie<'static>>>,
) -> Response<D, M> {
    let mut jar = CookieJar::new();
    for cookie in cookies.into_iter().flatten() {
        jar = jar.add(cookie);
    }
    for cookie in removals.into_iter().flatten() {
        jar = jar.remove(cookie);
    }

    Response {
        cookies: Some(jar),
        ..http_resp(data, meta, start)
    }
}
