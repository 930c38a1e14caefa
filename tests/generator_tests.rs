mod common;

use common::{StubBackend, TEST_RATE};
use workout_cues::error::BackendError;
use workout_cues::synth::{is_quota_error, ClipSource};
use workout_cues::SpeechGenerator;

#[tokio::test]
async fn test_success_decodes_clip_with_configured_voice() {
    let backend = StubBackend::tone();
    let voices = backend.voices.clone();
    let mut generator = SpeechGenerator::new(backend, "voice-123", TEST_RATE);

    let clip = generator.synthesize("Begin walking").await.unwrap();
    assert!(!clip.is_fallback());
    assert_eq!(clip.samples.len(), 200);
    assert_eq!(*voices.lock().unwrap(), vec!["voice-123".to_string()]);
}

#[tokio::test]
async fn test_transient_failure_becomes_silence() {
    let backend = StubBackend::failing_on(0, "503 Service Unavailable: upstream timeout");
    let mut generator = SpeechGenerator::new(backend, "v", TEST_RATE);

    let clip = generator.synthesize("first").await.unwrap();
    assert!(clip.is_fallback());
    assert_eq!(clip.duration_ms(), 1000);
    assert!(!generator.state().quota_exhausted());

    // Next cue still reaches the backend
    let clip = generator.synthesize("second").await.unwrap();
    assert!(!clip.is_fallback());
    assert_eq!(generator.backend().call_count(), 2);
}

#[tokio::test]
async fn test_undecodable_payload_becomes_silence() {
    let backend = StubBackend::new(|_, _| Ok(vec![1, 2, 3]));
    let mut generator = SpeechGenerator::new(backend, "v", TEST_RATE);

    let clip = generator.synthesize("odd bytes").await.unwrap();
    assert!(clip.is_fallback());
}

#[tokio::test]
async fn test_quota_error_latches_permanently() {
    let backend = StubBackend::new(|_, _| {
        Err(BackendError::new(
            r#"401 Unauthorized: {"detail":{"status":"quota_exceeded","message":"This request exceeds your quota."}}"#,
        ))
    });
    let mut generator = SpeechGenerator::new(backend, "v", TEST_RATE);

    let failure = generator.synthesize("one").await.unwrap_err();
    assert!(failure.permanent);
    assert!(generator.state().quota_exhausted());
    assert!(ClipSource::is_exhausted(&generator));
    assert_eq!(generator.backend().call_count(), 1);

    // Every later call fails without touching the backend
    for text in ["two", "three", "four"] {
        let failure = generator.synthesize(text).await.unwrap_err();
        assert!(failure.permanent);
    }
    assert_eq!(generator.backend().call_count(), 1);
}

#[tokio::test]
async fn test_independent_generators_have_independent_latches() {
    let mut exhausted = SpeechGenerator::new(
        StubBackend::new(|_, _| Err(BackendError::new("exceeds your quota"))),
        "v",
        TEST_RATE,
    );
    let mut healthy = SpeechGenerator::new(StubBackend::tone(), "v", TEST_RATE);

    assert!(exhausted.synthesize("x").await.is_err());
    assert!(healthy.synthesize("x").await.is_ok());
    assert!(!healthy.state().quota_exhausted());
}

#[test]
fn test_quota_markers_are_case_sensitive() {
    assert!(is_quota_error("status: quota_exceeded"));
    assert!(is_quota_error("This request exceeds your quota of 10000"));
    assert!(!is_quota_error("QUOTA_EXCEEDED"));
    assert!(!is_quota_error("Exceeds Your Quota"));
    assert!(!is_quota_error("429 Too Many Requests"));
}
