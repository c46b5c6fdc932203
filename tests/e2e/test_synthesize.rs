use crate::e2e::helpers;

use helpers::api_client::Part;
use helpers::fakes::{
    mock_audio_bytes, unreachable_google_repository, unreachable_polly_repository,
    FakeDocumentRepository, FakeTtsRepository,
};
use helpers::TestContext;
use hyper::StatusCode;
use pdf_speech::domain::tts::VoiceSettings;
use pretty_assertions::assert_eq;
use std::sync::Arc;
use test_context::test_context;

fn assert_audio_attachment(response: &helpers::api_client::ApiResponse) {
    response.assert_status(StatusCode::OK);
    response.assert_header("content-type", "audio/mp3");
    let disposition = response.header("content-disposition").unwrap();
    assert!(disposition.starts_with("attachment"));
    assert!(disposition.contains("speech.mp3"));
    assert!(!response.body_bytes.is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_synthesize_urlencoded_text(ctx: &TestContext) {
    let response = ctx
        .client
        .post_form("/synthesize", &[("text", "Hello")])
        .await
        .unwrap();

    assert_audio_attachment(&response);
    assert_eq!(response.body_bytes, mock_audio_bytes());
    response.assert_header("x-character-count", "5");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_synthesize_multipart_text(ctx: &TestContext) {
    // The page posts FormData, which is multipart
    let response = ctx
        .client
        .post_multipart(
            "/synthesize",
            &[Part::Field {
                name: "text",
                value: "Hello from the page",
            }],
        )
        .await
        .unwrap();

    assert_audio_attachment(&response);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_missing_text(ctx: &TestContext) {
    let response = ctx
        .client
        .post_form("/synthesize", &[("other", "value")])
        .await
        .unwrap();

    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_text("No text provided");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_empty_text(ctx: &TestContext) {
    let response = ctx
        .client
        .post_form("/synthesize", &[("text", "")])
        .await
        .unwrap();

    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_text("No text provided");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_request_without_body(ctx: &TestContext) {
    let response = ctx.client.post_empty("/synthesize").await.unwrap();

    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_text("No text provided");
}

#[tokio::test]
async fn it_should_narrate_in_slow_english_with_text_unchanged() {
    let tts_repo = Arc::new(FakeTtsRepository::new());
    let ctx = TestContext::start(
        Arc::new(FakeDocumentRepository::with_pages(&["unused"])),
        tts_repo.clone(),
    )
    .await;

    let text = "First line.\nSecond line with  double spaces & symbols <ok>.";
    ctx.client
        .post_form("/synthesize", &[("text", text)])
        .await
        .unwrap()
        .assert_status(StatusCode::OK);

    let calls = tts_repo.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, text);
    assert_eq!(calls[0].1, VoiceSettings::NARRATION);
}

#[tokio::test]
async fn it_should_return_equivalent_audio_for_repeated_requests() {
    let tts_repo = Arc::new(FakeTtsRepository::new());
    let ctx = TestContext::start(
        Arc::new(FakeDocumentRepository::with_pages(&["unused"])),
        tts_repo.clone(),
    )
    .await;

    let first = ctx.client.post_form("/synthesize", &[("text", "Hello")]).await.unwrap();
    let second = ctx.client.post_form("/synthesize", &[("text", "Hello")]).await.unwrap();

    assert_eq!(first.body_bytes, second.body_bytes);
    assert_eq!(tts_repo.calls().len(), 2);
}

#[tokio::test]
async fn it_should_report_provider_failures_as_bad_gateway() {
    let ctx = TestContext::start(
        Arc::new(FakeDocumentRepository::with_pages(&["unused"])),
        Arc::new(FakeTtsRepository::failing("quota exceeded")),
    )
    .await;

    let response = ctx
        .client
        .post_form("/synthesize", &[("text", "Hello")])
        .await
        .unwrap();

    response.assert_status(StatusCode::BAD_GATEWAY);
    response.assert_text("Speech synthesis failed");
    assert!(response.header("content-disposition").is_none());
}

#[tokio::test]
async fn it_should_report_unreachable_google_endpoint() {
    let ctx = TestContext::start(
        Arc::new(FakeDocumentRepository::with_pages(&["unused"])),
        unreachable_google_repository(),
    )
    .await;

    let response = ctx
        .client
        .post_form("/synthesize", &[("text", "Hello")])
        .await
        .unwrap();

    response.assert_status(StatusCode::BAD_GATEWAY);
    response.assert_text("Speech synthesis failed");
}

#[tokio::test]
async fn it_should_report_unreachable_polly_endpoint() {
    let ctx = TestContext::start(
        Arc::new(FakeDocumentRepository::with_pages(&["unused"])),
        unreachable_polly_repository(),
    )
    .await;

    let response = ctx
        .client
        .post_form("/synthesize", &[("text", "Hello")])
        .await
        .unwrap();

    response.assert_status(StatusCode::BAD_GATEWAY);
    response.assert_text("Speech synthesis failed");
}

#[tokio::test]
async fn it_should_report_whitespace_only_text_as_provider_failure() {
    let ctx = TestContext::start(
        Arc::new(FakeDocumentRepository::with_pages(&["unused"])),
        unreachable_google_repository(),
    )
    .await;

    // Non-empty, so it passes validation, but there is nothing to speak
    let response = ctx
        .client
        .post_form("/synthesize", &[("text", "   ")])
        .await
        .unwrap();

    response.assert_status(StatusCode::BAD_GATEWAY);
}
