use super::args::Args;
use super::handler::Handler;
use super::Response;

use std::convert::Infallible;
use std::time::{Duration, SystemTime};

use bytes::Bytes;
use http::header::{
    HeaderValue, CONTENT_LENGTH, CONTENT_TYPE, IF_MODIFIED_SINCE, LAST_MODIFIED,
    X_CONTENT_TYPE_OPTIONS,
};
use http::{Request, StatusCode};
use http_body_util::Full;

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";
const NOSNIFF: &str = "nosniff";

pub fn text_response(status: StatusCode, body: impl Into<Bytes>) -> Response {
    let mut res = Response::new(Full::new(body.into()));
    *res.status_mut() = status;
    res.headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static(TEXT_PLAIN));
    res.headers_mut()
        .insert(X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static(NOSNIFF));
    res
}

/// A plain text response carrying the canonical reason phrase of `status`,
/// e.g. `"Not Found\n"`.
pub fn std_text_response(status: StatusCode) -> Response {
    let reason = status.canonical_reason().unwrap_or("");
    text_response(status, format!("{}\n", reason))
}

/// A handler that always answers with [`std_text_response`].
pub fn std_text_handler<B: 'static>(status: StatusCode) -> impl Handler<B> {
    move |_: Request<B>, _: Args| async move { Ok::<_, Infallible>(std_text_response(status)) }
}

/// Checks `If-Modified-Since` of `req` against `modtime`.
///
/// Returns `true` and sets `Last-Modified` on `res` if the resource changed
/// since the client's copy. Otherwise turns `res` into an empty
/// `304 Not Modified` and returns `false`.
pub fn modified<B>(req: &Request<B>, res: &mut Response, modtime: SystemTime) -> bool {
    let since = req
        .headers()
        .get(IF_MODIFIED_SINCE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| httpdate::parse_http_date(v).ok());

    // header dates have whole-second precision
    if let Some(since) = since {
        if modtime < since + Duration::from_secs(1) {
            *res.status_mut() = StatusCode::NOT_MODIFIED;
            *res.body_mut() = Full::default();
            res.headers_mut().remove(CONTENT_TYPE);
            res.headers_mut().remove(CONTENT_LENGTH);
            return false;
        }
    }

    if let Ok(value) = HeaderValue::from_str(&httpdate::fmt_http_date(modtime)) {
        res.headers_mut().insert(LAST_MODIFIED, value);
    }
    true
}
