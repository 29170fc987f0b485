//! `/generate-image` integration tests

#[cfg(test)]
mod tests {
    use crate::common::upstream::{image_chunk, sse_response, text_chunk};
    use crate::common::{ConfigFactory, MockGemini, PNG_BYTES, app_state};
    use actix_web::http::StatusCode;
    use actix_web::http::header::CONTENT_TYPE;
    use actix_web::test;
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use gemini_image_gateway::server::HttpServer;
    use serde_json::{Value, json};
    use wiremock::matchers::body_partial_json;

    fn assert_generated_name(filename: &str, base: &str, index: usize, ext: &str) {
        let middle = filename
            .strip_prefix(&format!("{}_", base))
            .and_then(|rest| rest.strip_suffix(&format!("_{}.{}", index, ext)))
            .unwrap_or_else(|| panic!("unexpected filename {}", filename));
        assert!(
            middle.parse::<i64>().is_ok(),
            "timestamp segment is not numeric: {}",
            filename
        );
    }

    // ==================== Happy Path ====================

    #[actix_web::test]
    async fn test_red_circle_returns_image_then_text() {
        let upstream = MockGemini::start().await;
        MockGemini::stream_request()
            .and(body_partial_json(json!({
                "contents": [{"role": "user", "parts": [{"text": "a red circle"}]}],
                "generationConfig": {"responseModalities": ["IMAGE", "TEXT"]}
            })))
            .respond_with(sse_response(&[
                image_chunk("image/png", PNG_BYTES),
                text_chunk("done"),
            ]))
            .expect(1)
            .mount(&upstream.server)
            .await;

        let app = test::init_service(HttpServer::create_app(
            app_state(ConfigFactory::for_upstream(&upstream.uri())).await,
        ))
        .await;

        let req = test::TestRequest::post()
            .uri("/generate-image")
            .set_json(json!({"prompt": "a red circle"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["prompt"], "a red circle");

        let results = body["results"].as_array().unwrap();
        assert_eq!(results.len(), 2);

        assert_eq!(results[0]["type"], "image");
        assert_eq!(results[0]["mimeType"], "image/png");
        assert_eq!(results[0]["data"], STANDARD.encode(PNG_BYTES));
        assert!(results[0].get("url").is_none());
        assert_generated_name(
            results[0]["filename"].as_str().unwrap(),
            "text_to_image",
            0,
            "png",
        );

        assert_eq!(results[1], json!({"type": "text", "content": "done"}));
    }

    #[actix_web::test]
    async fn test_malformed_chunks_are_skipped() {
        let upstream = MockGemini::start().await;
        upstream
            .mount_stream(
                &[
                    json!({"usageMetadata": {"promptTokenCount": 4}}),
                    image_chunk("image/jpeg", b"first"),
                    json!({"candidates": [{"content": {}}]}),
                    json!({"candidates": [{"content": {"parts": [{"inlineData": {"mimeType": "image/png", "data": "%%%"}}]}}]}),
                    image_chunk("image/webp", b"second"),
                    text_chunk("two images"),
                ],
                1,
            )
            .await;

        let app = test::init_service(HttpServer::create_app(
            app_state(ConfigFactory::for_upstream(&upstream.uri())).await,
        ))
        .await;

        let req = test::TestRequest::post()
            .uri("/generate-image")
            .set_json(json!({"prompt": "two images"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        let results = body["results"].as_array().unwrap();
        assert_eq!(results.len(), 3);
        assert_generated_name(results[0]["filename"].as_str().unwrap(), "text_to_image", 0, "jpg");
        assert_generated_name(results[1]["filename"].as_str().unwrap(), "text_to_image", 1, "webp");
        assert_eq!(results[2]["content"], "two images");
    }

    // ==================== Validation ====================

    #[actix_web::test]
    async fn test_missing_prompt_is_rejected() {
        let upstream = MockGemini::start().await;
        upstream.expect_no_calls().await;

        let app = test::init_service(HttpServer::create_app(
            app_state(ConfigFactory::for_upstream(&upstream.uri())).await,
        ))
        .await;

        for payload in [json!({}), json!({"prompt": "   "}), json!({"prompt": null})] {
            let req = test::TestRequest::post()
                .uri("/generate-image")
                .set_json(payload)
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

            let body: Value = test::read_body_json(resp).await;
            assert_eq!(body, json!({"error": "Prompt is required"}));
        }
    }

    #[actix_web::test]
    async fn test_invalid_json_uses_error_format() {
        let upstream = MockGemini::start().await;
        upstream.expect_no_calls().await;

        let app = test::init_service(HttpServer::create_app(
            app_state(ConfigFactory::for_upstream(&upstream.uri())).await,
        ))
        .await;

        let req = test::TestRequest::post()
            .uri("/generate-image")
            .insert_header((CONTENT_TYPE, "application/json"))
            .set_payload("{\"prompt\": ")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert!(
            body["error"]
                .as_str()
                .unwrap()
                .starts_with("Invalid JSON body")
        );
    }
}
