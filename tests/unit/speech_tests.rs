/*!
 * Tests for the speech synthesis abstraction
 */

use anyhow::Result;
use vocaslider::errors::SpeechError;
use vocaslider::speech::mock::SpokenClip;
use vocaslider::speech::{MockSpeech, SpeechSynthesizer};
use crate::common;

/// Test that a working mock writes the clip and records the call
#[tokio::test]
async fn test_synthesize_withWorkingMock_shouldWriteClipAndRecordCall() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let output = temp_dir.path().join("audio").join("hello.mp3");

    let synthesizer = MockSpeech::working();
    synthesizer.synthesize("hello", "en", &output).await?;

    assert!(output.exists());
    assert_eq!(
        synthesizer.calls(),
        vec![SpokenClip {
            text: "hello".to_string(),
            language: "en".to_string(),
            output: output.clone(),
        }]
    );

    Ok(())
}

/// Test that calls are recorded in arrival order
#[tokio::test]
async fn test_synthesize_withMultipleCalls_shouldRecordInOrder() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;

    let synthesizer = MockSpeech::working();
    synthesizer
        .synthesize("你好", "zh-CN", &temp_dir.path().join("a.mp3"))
        .await?;
    synthesizer
        .synthesize("नमस्ते", "hi", &temp_dir.path().join("b.mp3"))
        .await?;

    let texts: Vec<String> = synthesizer.calls().into_iter().map(|c| c.text).collect();
    assert_eq!(texts, vec!["你好", "नमस्ते"]);

    Ok(())
}

/// Test that a failing mock surfaces a service error and records nothing
#[tokio::test]
async fn test_synthesize_withFailingMock_shouldReturnServiceError() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let output = temp_dir.path().join("hello.mp3");

    let synthesizer = MockSpeech::failing();
    let result = synthesizer.synthesize("hello", "en", &output).await;

    assert!(matches!(
        result,
        Err(SpeechError::ServiceError {
            status_code: 503,
            ..
        })
    ));
    assert!(!output.exists());
    assert!(synthesizer.calls().is_empty());

    Ok(())
}
