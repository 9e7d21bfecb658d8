//! Conditional GET support for the recipe detail endpoint.
//!
//! Handlers that serve a cacheable payload attach a [`LastModifiedStamp`]
//! to the response. This middleware turns the stamp into a `Last-Modified`
//! header and short-circuits to `304 Not Modified` when the client's
//! `If-Modified-Since` is at least as fresh. Responses without a stamp
//! pass through untouched.

use axum::{
    extract::Request,
    http::{HeaderValue, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Timelike, Utc};

/// Modification time of the payload a handler just served.
#[derive(Debug, Clone, Copy)]
pub struct LastModifiedStamp(pub DateTime<Utc>);

const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

fn http_date(t: DateTime<Utc>) -> String {
    t.format(HTTP_DATE_FORMAT).to_string()
}

pub async fn conditional_get(request: Request, next: Next) -> Response {
    let if_modified_since = request
        .headers()
        .get(header::IF_MODIFIED_SINCE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| DateTime::parse_from_rfc2822(v).ok())
        .map(|t| t.with_timezone(&Utc));

    let mut response = next.run(request).await;

    let Some(stamp) = response.extensions().get::<LastModifiedStamp>().copied() else {
        return response;
    };

    // An epoch stamp means the modification time was never recorded.
    if stamp.0 == DateTime::UNIX_EPOCH {
        return response;
    }

    // HTTP dates carry whole seconds only, so compare at that precision.
    let last_modified = stamp.0.with_nanosecond(0).unwrap_or(stamp.0);
    let header_value = HeaderValue::from_str(&http_date(last_modified)).ok();

    if let Some(since) = if_modified_since
        && last_modified <= since
    {
        let mut not_modified = StatusCode::NOT_MODIFIED.into_response();
        if let Some(value) = header_value {
            not_modified
                .headers_mut()
                .insert(header::LAST_MODIFIED, value);
        }
        return not_modified;
    }

    if let Some(value) = header_value {
        response.headers_mut().insert(header::LAST_MODIFIED, value);
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn http_date_is_rfc2822_compatible() {
        let t = Utc.with_ymd_and_hms(2024, 3, 9, 18, 30, 15).unwrap();
        let formatted = http_date(t);

        assert_eq!(formatted, "Sat, 09 Mar 2024 18:30:15 GMT");

        let parsed = DateTime::parse_from_rfc2822(&formatted).unwrap();
        assert_eq!(parsed.with_timezone(&Utc), t);
    }

    #[tokio::test]
    async fn epoch_stamp_emits_no_header() {
        use axum::{Router, body::Body, middleware, routing::get};
        use tower::ServiceExt;

        async fn handler() -> Response {
            let mut response = "ok".into_response();
            response
                .extensions_mut()
                .insert(LastModifiedStamp(DateTime::UNIX_EPOCH));
            response
        }

        let app = Router::new()
            .route("/", get(handler))
            .layer(middleware::from_fn(conditional_get));

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get(header::LAST_MODIFIED).is_none());
    }
}
