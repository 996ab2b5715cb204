use axum::Router;

use super::{handler, middleware};

/// Every path and method lands on the walk handler.
pub fn build_router() -> Router {
    let app = Router::new().fallback(handler::walk_handler);
    middleware::cors::with_cors_headers(app)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::middleware::cors::{ALLOW_HEADERS, ALLOW_METHODS, ALLOW_ORIGIN};
    use crate::row::{HEADER_LINE, parse_row};
    use axum::body::Body;
    use axum::http::{Request, Response, StatusCode, header};
    use http_body_util::BodyExt;
    use std::time::Duration;
    use tower::ServiceExt;

    fn assert_cors_headers(response: &Response<Body>) {
        let headers = response.headers();
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], ALLOW_ORIGIN);
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], ALLOW_METHODS);
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS], ALLOW_HEADERS);
    }

    async fn next_chunk(body: &mut Body) -> String {
        let frame = tokio::time::timeout(Duration::from_secs(5), body.frame())
            .await
            .expect("chunk within timeout")
            .expect("body still open")
            .unwrap();
        String::from_utf8(frame.into_data().unwrap().to_vec()).unwrap()
    }

    async fn send(method: &str, uri: &str) -> Response<Body> {
        build_router()
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_preflight_on_any_path() {
        for uri in ["/", "/some/where?x=1"] {
            let response = send("OPTIONS", uri).await;

            assert_eq!(response.status(), StatusCode::OK);
            assert_cors_headers(&response);
            assert!(response.headers().get(header::CONTENT_TYPE).is_none());

            let body = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .unwrap();
            assert!(body.is_empty());
        }
    }

    #[tokio::test]
    async fn test_get_streams_header_then_rows() {
        let response = send("GET", "/").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_cors_headers(&response);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/plain");

        let mut body = response.into_body();
        assert_eq!(next_chunk(&mut body).await, HEADER_LINE);

        let row = parse_row(&next_chunk(&mut body).await).unwrap();
        assert!(row.min < row.max);
    }

    #[tokio::test]
    async fn test_routing_ignores_path_and_method() {
        for (method, uri) in [("GET", "/feed/any/depth?q=1"), ("POST", "/")] {
            let response = send(method, uri).await;

            assert_eq!(response.status(), StatusCode::OK);
            assert_cors_headers(&response);
            let mut body = response.into_body();
            assert_eq!(next_chunk(&mut body).await, HEADER_LINE);
        }
    }

    #[tokio::test]
    async fn test_concurrent_clients_get_independent_walks() {
        let (first, second) = tokio::join!(send("GET", "/"), send("GET", "/"));
        let mut first = first.into_body();
        let mut second = second.into_body();

        next_chunk(&mut first).await;
        next_chunk(&mut second).await;

        let (a, b) = tokio::join!(next_chunk(&mut first), next_chunk(&mut second));
        let a = parse_row(&a).unwrap();
        let b = parse_row(&b).unwrap();
        assert_ne!(a.value, b.value);
    }
}
