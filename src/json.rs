//! JSON responses.
//!
//! Bodies are pretty printed with tab indentation. A value that fails to
//! serialize never surfaces as an error: the response is downgraded to a fixed
//! `500` payload instead.

#![forbid(unsafe_code)]

use crate::hyper_service::{Args, Handler, Response};

use std::convert::Infallible;

use bytes::Bytes;
use http::header::{HeaderValue, CONTENT_TYPE, LOCATION};
use http::{Request, StatusCode};
use http_body_util::Full;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use tracing::error;

const APPLICATION_JSON: &str = "application/json; charset=UTF-8";
const INDENT: &[u8] = b"\t";

const SERIALIZE_FAILURE: &str = r#"{"code":500,"errors":["Internal Server Error"]}"#;

#[derive(Debug, Serialize)]
struct ErrorBody<'a, S> {
    code: u16,
    errors: &'a [S],
}

#[derive(Debug, Serialize)]
struct RedirectBody<'a> {
    code: u16,
    location: &'a str,
}

/// Serializes `content` as the response body.
pub fn json_response<T>(content: &T, status: StatusCode) -> Response
where
    T: Serialize + ?Sized,
{
    let (status, body) = match to_pretty_vec(content) {
        Ok(body) => (status, Bytes::from(body)),
        Err(e) => {
            error!(error = %e, "cannot serialize response");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Bytes::from_static(SERIALIZE_FAILURE.as_bytes()),
            )
        }
    };

    let mut res = Response::new(Full::new(body));
    *res.status_mut() = status;
    res.headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
    res
}

/// `{"code": <status>, "errors": [<err>]}`
pub fn json_error(err: &str, status: StatusCode) -> Response {
    json_errors(&[err], status)
}

/// `{"code": <status>, "errors": [<errs>...]}`
pub fn json_errors<S>(errs: &[S], status: StatusCode) -> Response
where
    S: Serialize,
{
    let body = ErrorBody {
        code: status.as_u16(),
        errors: errs,
    };
    json_response(&body, status)
}

/// The canonical reason phrase of `status` as JSON. Statuses from 400 up use
/// the error shape of [`json_error`], the others a bare JSON string.
pub fn std_json_response(status: StatusCode) -> Response {
    let reason = status.canonical_reason().unwrap_or("");
    if status.as_u16() >= 400 {
        json_error(reason, status)
    } else {
        json_response(reason, status)
    }
}

/// A redirect carrying `{"code": <status>, "location": <location>}`.
pub fn json_redirect(location: &str, status: StatusCode) -> Response {
    let body = RedirectBody {
        code: status.as_u16(),
        location,
    };
    let mut res = json_response(&body, status);
    match HeaderValue::from_str(location) {
        Ok(value) => {
            res.headers_mut().insert(LOCATION, value);
        }
        Err(_) => {
            error!(location, "invalid redirect location");
            return std_json_response(StatusCode::INTERNAL_SERVER_ERROR);
        }
    }
    res
}

/// A handler that always answers with [`std_json_response`].
pub fn std_json_handler<B: 'static>(status: StatusCode) -> impl Handler<B> {
    move |_: Request<B>, _: Args| async move { Ok::<_, Infallible>(std_json_response(status)) }
}

fn to_pretty_vec<T>(content: &T) -> serde_json::Result<Vec<u8>>
where
    T: Serialize + ?Sized,
{
    let mut buf = Vec::with_capacity(128);
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    content.serialize(&mut ser)?;
    Ok(buf)
}
