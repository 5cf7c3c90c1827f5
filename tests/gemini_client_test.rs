use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::{ImageBuffer, ImageFormat, Rgb};
use script_deck::gemini::{GeminiConfig, InlineImage, StructuredRequest};
use script_deck::quota::MemoryQuotaStore;
use script_deck::session::ResolverSettings;
use script_deck::status::RecordingReporter;
use script_deck::{
    DeckError, DeckSession, GeminiClient, GenerationRequest, ImageGenerator, QuotaTracker,
    TextGenerator,
};
use serde_json::{json, Value};
use std::io::Cursor;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TEXT_PATH: &str = "/models/text-model:generateContent";
const IMAGE_PATH: &str = "/models/image-model:generateContent";

fn can_bind_localhost() -> bool {
    std::net::TcpListener::bind("127.0.0.1:0").is_ok()
}

fn client_for(server: &MockServer) -> GeminiClient {
    GeminiClient::new(GeminiConfig {
        api_key: "test-key".to_string(),
        base_url: server.uri(),
        text_model: "text-model".to_string(),
        image_model: "image-model".to_string(),
        timeout: Duration::from_secs(10),
    })
    .expect("Failed to build client")
}

fn png_base64(width: u32, height: u32) -> String {
    let img = ImageBuffer::from_fn(width, height, |_, _| Rgb([0u8, 128u8, 0u8]));
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png)
        .expect("Failed to encode image");
    STANDARD.encode(buf.into_inner())
}

fn text_response(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] }
        }]
    })
}

fn image_response(data: &str) -> Value {
    json!({
        "candidates": [{
            "content": {
                "role": "model",
                "parts": [
                    { "text": "Here is your image." },
                    { "inlineData": { "mimeType": "image/png", "data": data } }
                ]
            }
        }]
    })
}

#[tokio::test]
async fn test_structured_request_contract() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(TEXT_PATH))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_partial_json(json!({
            "generationConfig": { "responseMimeType": "application/json" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_response("[]")))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let request = StructuredRequest {
        prompt: "Plan these slides".to_string(),
        attachments: vec![InlineImage {
            mime_type: "image/jpeg".to_string(),
            data_base64: "AQID".to_string(),
        }],
        response_schema: json!({ "type": "ARRAY" }),
    };

    let text = client
        .generate_structured(&request)
        .await
        .expect("request should succeed");
    assert_eq!(text, "[]");

    let received = server.received_requests().await.expect("requests recorded");
    let body: Value = serde_json::from_slice(&received[0].body).expect("JSON body");
    let parts = body["contents"][0]["parts"].as_array().expect("parts");
    assert_eq!(parts[0]["text"], "Plan these slides");
    assert_eq!(parts[1]["inlineData"]["mimeType"], "image/jpeg");
    assert_eq!(parts[1]["inlineData"]["data"], "AQID");
    assert_eq!(body["generationConfig"]["responseSchema"]["type"], "ARRAY");
}

#[tokio::test]
async fn test_rate_limit_status_is_classified() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(TEXT_PATH))
        .respond_with(ResponseTemplate::new(429).set_body_string("RESOURCE_EXHAUSTED"))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(IMAGE_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let request = StructuredRequest {
        prompt: "Plan".to_string(),
        attachments: vec![],
        response_schema: json!({}),
    };
    let err = client.generate_structured(&request).await.unwrap_err();
    assert!(matches!(err, DeckError::RateLimited));

    let err = client.generate_image("a fox", "16:9").await.unwrap_err();
    assert!(matches!(err, DeckError::ApiError { status: 500, .. }));
}

#[tokio::test]
async fn test_image_request_contract() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(IMAGE_PATH))
        .and(body_partial_json(json!({
            "contents": [{ "parts": [{ "text": "A red fox" }] }],
            "generationConfig": { "imageConfig": { "aspectRatio": "16:9" } }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(image_response("AQID")))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let image = client
        .generate_image("A red fox", "16:9")
        .await
        .expect("request should succeed")
        .expect("image present");
    assert_eq!(image.mime_type, "image/png");
    assert_eq!(image.data, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_image_response_without_payload_is_none() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(IMAGE_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(text_response("I cannot draw that.")),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let image = client
        .generate_image("something", "16:9")
        .await
        .expect("request should succeed");
    assert!(image.is_none());
}

#[tokio::test]
async fn test_session_end_to_end_against_mock_service() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    let plan = json!([
        { "title": "Intro", "content": ["Hello"], "imageIndex": -1, "imageGenerationPrompt": "a sunrise" },
        { "title": "Body", "content": ["Details"], "imageIndex": -1, "imageGenerationPrompt": "a mountain" }
    ]);

    Mock::given(method("POST"))
        .and(path(TEXT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_response(&plan.to_string())))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(IMAGE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(image_response(&png_base64(32, 18))))
        .expect(2)
        .mount(&server)
        .await;

    let client = Arc::new(client_for(&server));
    let mut session = DeckSession::new(
        QuotaTracker::new(Box::new(MemoryQuotaStore::new()), 100),
        client.clone(),
        client,
        ResolverSettings {
            cooldown: Duration::from_millis(10),
            aspect_ratio: "16:9".to_string(),
        },
    );

    let request = GenerationRequest {
        script: "Intro\nBody".to_string(),
        ..Default::default()
    };
    let generated = session
        .generate(&request, &RecordingReporter::new())
        .await
        .expect("generation should succeed");
    assert_eq!(generated.model.len(), 2);
    assert!(generated
        .model
        .images()
        .iter()
        .all(|image| image.as_ref().map(|i| (i.width, i.height)) == Some((32, 18))));

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let output = temp_dir.path().join("AI_Presentation.pptx");
    session.export(&output).expect("export should succeed");
    assert!(output.exists());
    assert_eq!(session.remaining_quota().unwrap(), 99);
}
