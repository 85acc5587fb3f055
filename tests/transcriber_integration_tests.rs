use std::sync::Arc;

use tokio::sync::mpsc;
use vidchat::speech::providers::TranscribingRecognizer;
use vidchat::speech::transcribers::HttpTranscriber;
use vidchat::speech::wav::encode_pcm16_mono;
use vidchat::speech::{
    SpeechError, SpeechRecognizer, TranscribeError, Transcriber, stop_channel,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_bytes, header, method, path, query_param},
};

// ============================================================================
// Helper Functions
// ============================================================================

/// A short silent recording, the shape the capture side produces.
fn sample_wav() -> Vec<u8> {
    encode_pcm16_mono(&[0i16; 1600], 16_000)
}

fn transcriber_for(server: &MockServer) -> HttpTranscriber {
    HttpTranscriber::new(server.uri(), None, None)
}

// ============================================================================
// HTTP Transcriber Tests
// ============================================================================

#[tokio::test]
async fn test_http_transcriber_returns_text() {
    let mock_server = MockServer::start().await;
    let audio = sample_wav();

    Mock::given(method("POST"))
        .and(path("/audio/transcriptions"))
        .and(header("content-type", "audio/wav"))
        .and(body_bytes(audio.clone()))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "text": "who is the narrator?" })),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = transcriber_for(&mock_server).transcribe(&audio).await;
    assert_eq!(result, Ok("who is the narrator?".to_string()));
}

#[tokio::test]
async fn test_http_transcriber_sends_key_and_model() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/audio/transcriptions"))
        .and(header("authorization", "Bearer test-key"))
        .and(query_param("model", "whisper-small"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "text": "ok" })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let transcriber = HttpTranscriber::new(
        format!("{}/v1/", mock_server.uri()),
        Some("test-key".to_string()),
        Some("whisper-small".to_string()),
    );
    let result = transcriber.transcribe(&sample_wav()).await;
    assert_eq!(result, Ok("ok".to_string()));
}

#[tokio::test]
async fn test_http_transcriber_api_error_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/audio/transcriptions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("model overloaded"))
        .mount(&mock_server)
        .await;

    let result = transcriber_for(&mock_server).transcribe(&sample_wav()).await;
    assert_eq!(
        result,
        Err(TranscribeError::Api {
            status: 500,
            message: "model overloaded".to_string()
        })
    );
}

#[tokio::test]
async fn test_http_transcriber_unexpected_body_is_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/audio/transcriptions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&mock_server)
        .await;

    let result = transcriber_for(&mock_server).transcribe(&sample_wav()).await;
    assert!(matches!(result, Err(TranscribeError::Parse(_))));
}

#[tokio::test]
async fn test_http_transcriber_unreachable_is_network_error() {
    // Nothing listens on port 9 (discard) locally
    let transcriber = HttpTranscriber::new("http://127.0.0.1:9".into(), None, None);
    let result = transcriber.transcribe(&sample_wav()).await;
    assert!(matches!(result, Err(TranscribeError::Network(_))));
}

// ============================================================================
// Transcribing Recognizer over HTTP
// ============================================================================

#[tokio::test]
async fn test_recognizer_delivers_remote_transcript_as_final_fragment() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/audio/transcriptions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "text": "what song is this?" })),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let recognizer = TranscribingRecognizer::new(Arc::new(transcriber_for(&mock_server)));
    let (tx, mut rx) = mpsc::channel(8);
    let (stop, signal) = stop_channel();
    stop.stop();

    let result = recognizer.recognize(tx, signal).await;
    assert_eq!(result, Ok(()));

    let fragment = rx.recv().await.expect("one fragment");
    assert_eq!(fragment.text, "what song is this?");
    assert!(fragment.is_final);
    assert!(rx.recv().await.is_none());
}

#[tokio::test]
async fn test_recognizer_surfaces_transcription_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/audio/transcriptions"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
        .mount(&mock_server)
        .await;

    let recognizer = TranscribingRecognizer::new(Arc::new(transcriber_for(&mock_server)));
    let (tx, _rx) = mpsc::channel(8);
    let (stop, signal) = stop_channel();
    stop.stop();

    let result = recognizer.recognize(tx, signal).await;
    assert!(matches!(
        result,
        Err(SpeechError::Transcription(TranscribeError::Api { status: 401, .. }))
    ));
}
