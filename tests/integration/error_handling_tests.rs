//! Error handling integration tests
//!
//! Upstream failures must come back with the mapped status and the
//! `{error, details?, suggestion?}` body.

#[cfg(test)]
mod tests {
    use crate::common::upstream::{api_error, text_chunk};
    use crate::common::{ConfigFactory, MockGemini, app_state};
    use actix_web::http::StatusCode;
    use actix_web::test;
    use gemini_image_gateway::Config;
    use gemini_image_gateway::server::HttpServer;
    use serde_json::{Value, json};

    async fn generate(config: Config) -> (StatusCode, Value) {
        let app = test::init_service(HttpServer::create_app(app_state(config).await)).await;
        let req = test::TestRequest::post()
            .uri("/generate-image")
            .set_json(json!({"prompt": "a red circle"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        let status = resp.status();
        let body: Value = test::read_body_json(resp).await;
        (status, body)
    }

    // ==================== Upstream HTTP Status ====================

    #[actix_web::test]
    async fn test_rate_limit_maps_to_429_with_retry_hint() {
        let upstream = MockGemini::start().await;
        upstream
            .mount_error(
                429,
                json!({
                    "error": {
                        "code": 429,
                        "message": "Quota exceeded for image generation",
                        "status": "RESOURCE_EXHAUSTED",
                        "details": [{
                            "@type": "type.googleapis.com/google.rpc.RetryInfo",
                            "retryDelay": "17s"
                        }]
                    }
                }),
            )
            .await;

        let (status, body) = generate(ConfigFactory::for_upstream(&upstream.uri())).await;

        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(body["error"], "Rate limit exceeded");
        assert_eq!(body["details"], "Quota exceeded for image generation");
        assert!(body["suggestion"].as_str().unwrap().contains("17 seconds"));
    }

    #[actix_web::test]
    async fn test_unauthorized_maps_to_401() {
        let upstream = MockGemini::start().await;
        upstream
            .mount_error(401, api_error(401, "UNAUTHENTICATED", "API key not valid"))
            .await;

        let (status, body) = generate(ConfigFactory::for_upstream(&upstream.uri())).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Invalid API key");
        assert_eq!(body["details"], "API key not valid");
    }

    #[actix_web::test]
    async fn test_forbidden_maps_to_401() {
        let upstream = MockGemini::start().await;
        upstream
            .mount_error(403, api_error(403, "PERMISSION_DENIED", "Permission denied"))
            .await;

        let (status, _) = generate(ConfigFactory::for_upstream(&upstream.uri())).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_bad_request_passes_upstream_message() {
        let upstream = MockGemini::start().await;
        upstream
            .mount_error(
                400,
                api_error(400, "INVALID_ARGUMENT", "Unsupported MIME type: image/tiff"),
            )
            .await;

        let (status, body) = generate(ConfigFactory::for_upstream(&upstream.uri())).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({"error": "Invalid request", "details": "Unsupported MIME type: image/tiff"})
        );
    }

    #[actix_web::test]
    async fn test_other_statuses_map_to_500() {
        for upstream_status in [404u16, 500, 503] {
            let upstream = MockGemini::start().await;
            upstream
                .mount_error(upstream_status, api_error(upstream_status, "INTERNAL", "upstream broke"))
                .await;

            let (status, body) = generate(ConfigFactory::for_upstream(&upstream.uri())).await;

            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{}", upstream_status);
            assert_eq!(body["error"], "Failed to generate content");
            assert_eq!(body["details"], "upstream broke", "{}", upstream_status);
        }
    }

    // ==================== Stream Contents ====================

    #[actix_web::test]
    async fn test_in_stream_error_discards_partial_results() {
        let upstream = MockGemini::start().await;
        upstream
            .mount_stream(
                &[
                    text_chunk("partial"),
                    api_error(429, "RESOURCE_EXHAUSTED", "Quota exceeded"),
                ],
                1,
            )
            .await;

        let (status, body) = generate(ConfigFactory::for_upstream(&upstream.uri())).await;

        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert!(body.get("results").is_none());
    }

    #[actix_web::test]
    async fn test_empty_result_is_500() {
        let upstream = MockGemini::start().await;
        upstream
            .mount_stream(
                &[
                    json!({"candidates": []}),
                    json!({"candidates": [{"finishReason": "SAFETY"}]}),
                ],
                1,
            )
            .await;

        let (status, body) = generate(ConfigFactory::for_upstream(&upstream.uri())).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "No results generated");
        assert!(body["suggestion"].is_string());
    }

    // ==================== Local Failures ====================

    #[actix_web::test]
    async fn test_missing_credential_is_500() {
        let upstream = MockGemini::start().await;
        upstream.expect_no_calls().await;

        let (status, body) = generate(ConfigFactory::without_key(&upstream.uri())).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "API key not configured");
        assert!(body["suggestion"].is_string());
    }

    #[actix_web::test]
    async fn test_unreachable_upstream_is_500() {
        // Nothing listens on port 9 (discard) in the test environment
        let (status, body) = generate(ConfigFactory::for_upstream("http://127.0.0.1:9")).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Failed to generate content");
    }
}
