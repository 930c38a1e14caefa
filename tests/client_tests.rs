use std::net::SocketAddr;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use workout_cues::config::ElevenLabsConfig;
use workout_cues::services::tts::{ElevenLabsService, SpeechBackend};
use workout_cues::SpeechGenerator;

const QUOTA_BODY: &str = r#"{"detail":{"status":"quota_exceeded","message":"This request exceeds your quota."}}"#;

/// Accepts a single connection, answers it with `status` and `body`, and hands
/// back the raw request text.
async fn serve_once(status: &'static str, body: Vec<u8>) -> (SocketAddr, oneshot::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        loop {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
            if request_complete(&request) {
                break;
            }
        }

        let head = format!(
            "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            status,
            body.len()
        );
        socket.write_all(head.as_bytes()).await.unwrap();
        socket.write_all(&body).await.unwrap();
        socket.shutdown().await.unwrap();
        let _ = tx.send(String::from_utf8_lossy(&request).into_owned());
    });

    (addr, rx)
}

fn request_complete(request: &[u8]) -> bool {
    let text = String::from_utf8_lossy(request);
    let Some(header_end) = text.find("\r\n\r\n") else {
        return false;
    };
    let content_length = text[..header_end]
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);
    request.len() >= header_end + 4 + content_length
}

fn config_for(addr: SocketAddr) -> ElevenLabsConfig {
    ElevenLabsConfig {
        api_key: "test-key".to_string(),
        base_url: format!("http://{}", addr),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_quota_response_latches_generator() {
    let (addr, request) = serve_once("401 Unauthorized", QUOTA_BODY.as_bytes().to_vec()).await;
    let backend = ElevenLabsService::new(&config_for(addr), 1000);
    let mut generator = SpeechGenerator::new(backend, "voice-xyz", 1000);

    let failure = generator.synthesize("Start jogging").await.unwrap_err();
    assert!(failure.permanent);
    assert!(generator.state().quota_exhausted());

    let request = request.await.unwrap();
    assert!(
        request.starts_with("POST /v1/text-to-speech/voice-xyz?output_format=pcm_1000 HTTP/1.1"),
        "{}",
        request
    );
    let lower = request.to_ascii_lowercase();
    assert!(lower.contains("xi-api-key: test-key"));
    assert!(lower.contains("content-type: application/json"));
    assert!(request.contains(r#""text":"Start jogging""#));
    assert!(request.contains(r#""model_id":"eleven_monolingual_v1""#));

    // Latched: the next cue never reaches the network
    let failure = generator.synthesize("Walk").await.unwrap_err();
    assert!(failure.permanent);
}

#[tokio::test]
async fn test_error_status_and_body_reach_the_caller() {
    let (addr, _request) = serve_once("401 Unauthorized", QUOTA_BODY.as_bytes().to_vec()).await;
    let backend = ElevenLabsService::new(&config_for(addr), 1000);

    let err = backend.synthesize("Hello", "v").await.unwrap_err();
    assert!(err.message.starts_with("401"), "{}", err.message);
    assert!(err.message.contains("quota_exceeded"));
}

#[tokio::test]
async fn test_pcm_response_becomes_speech_clip() {
    let pcm: Vec<u8> = [1000i16, -1000, 1000, -1000]
        .iter()
        .flat_map(|s| s.to_le_bytes())
        .collect();
    let (addr, _request) = serve_once("200 OK", pcm).await;
    let backend = ElevenLabsService::new(&config_for(addr), 1000);
    let mut generator = SpeechGenerator::new(backend, "v", 1000);

    let clip = generator.synthesize("Hello").await.unwrap();
    assert!(!clip.is_fallback());
    assert_eq!(clip.samples.len(), 4);
    assert!(!generator.state().quota_exhausted());
}
