/*!
 * Tests for the timeline synchronization engine
 */

use anyhow::Result;
use tempfile::TempDir;
use vocaslider::assets::AssetLocator;
use vocaslider::audio::AudioPiece;
use vocaslider::dictionary::{Dictionary, TranslationVariant};
use vocaslider::errors::BuildError;
use vocaslider::timeline::TimelineBuilder;
use crate::common;
use crate::common::mock_clips::MockClipStore;

/// A dictionary with one phrase and one Mandarin variant, assets registered:
/// phrase clip 1234 ms, variant clip 800 ms, breakdown clip 1500 ms
fn mandarin_fixture() -> Result<(TempDir, AssetLocator, Dictionary, MockClipStore)> {
    let temp_dir = common::create_temp_dir()?;
    let locator = AssetLocator::new(temp_dir.path(), "lesson");

    let mut dictionary = common::single_phrase_dictionary("lesson", "hello", "zh-CN", "你好");
    dictionary.phrases["hello"]["zh-CN"][0].romanization = Some("Nǐ hǎo".to_string());

    common::touch(&locator.phrase_image("hello"))?;
    common::touch(&locator.variant_image("hello", "zh-CN", 0))?;

    let mut clips = MockClipStore::new();
    clips.insert(locator.phrase_audio("hello"), 1_234);
    clips.insert(locator.variant_audio("hello", "zh-CN", 0), 800);
    clips.insert(locator.breakdown_audio("hello", "zh-CN", 0), 1_500);

    Ok((temp_dir, locator, dictionary, clips))
}

/// Test the full piece plan for one phrase and one Mandarin variant
#[tokio::test]
async fn test_build_withMandarinVariant_shouldScheduleExpectedPlan() -> Result<()> {
    let (_guard, locator, dictionary, clips) = mandarin_fixture()?;

    let timeline = TimelineBuilder::new(&locator, &clips)
        .build(&dictionary)
        .await?;

    // Phrase: 1234 + 2000 = 3234, padded to 4000.
    // Variant: played twice (800 + 2000 each) = 9600, breakdown 1500 + 2000
    // = 13100, padded to 14000.
    assert_eq!(timeline.total_ms, 14_000);

    let timestamps: Vec<u64> = timeline
        .timecodes
        .entries
        .iter()
        .map(|e| e.timestamp_ms)
        .collect();
    assert_eq!(timestamps, vec![0, 4_000]);

    assert_eq!(
        timeline.track.pieces,
        vec![
            AudioPiece::Clip {
                path: locator.phrase_audio("hello"),
                duration_ms: 1_234,
            },
            AudioPiece::Silence { duration_ms: 2_000 },
            AudioPiece::Silence { duration_ms: 766 },
            AudioPiece::Clip {
                path: locator.variant_audio("hello", "zh-CN", 0),
                duration_ms: 800,
            },
            AudioPiece::Silence { duration_ms: 2_000 },
            AudioPiece::Clip {
                path: locator.variant_audio("hello", "zh-CN", 0),
                duration_ms: 800,
            },
            AudioPiece::Silence { duration_ms: 2_000 },
            AudioPiece::Clip {
                path: locator.breakdown_audio("hello", "zh-CN", 0),
                duration_ms: 1_500,
            },
            AudioPiece::Silence { duration_ms: 2_000 },
            AudioPiece::Silence { duration_ms: 900 },
        ]
    );

    Ok(())
}

/// Test the drift invariant: planned audio duration equals cumulative time
#[tokio::test]
async fn test_build_withMandarinVariant_shouldMatchTrackAndCumulativeDurations() -> Result<()> {
    let (_guard, locator, dictionary, clips) = mandarin_fixture()?;

    let timeline = TimelineBuilder::new(&locator, &clips)
        .build(&dictionary)
        .await?;

    assert_eq!(timeline.track.duration_ms(), timeline.total_ms);

    Ok(())
}

/// Test that an exact second boundary still gains a full second of padding
#[tokio::test]
async fn test_build_withAlignedClipDurations_shouldStillPadForward() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let locator = AssetLocator::new(temp_dir.path(), "lesson");

    let dictionary = common::single_phrase_dictionary("lesson", "hello", "hi", "नमस्ते");

    common::touch(&locator.phrase_image("hello"))?;
    common::touch(&locator.variant_image("hello", "hi", 0))?;

    let mut clips = MockClipStore::new();
    // 2000 + 2000 lands exactly on 4000; padding must push to 5000
    clips.insert(locator.phrase_audio("hello"), 2_000);
    // 1000 twice with gaps lands on 11000 exactly; padding pushes to 12000
    clips.insert(locator.variant_audio("hello", "hi", 0), 1_000);

    let timeline = TimelineBuilder::new(&locator, &clips)
        .build(&dictionary)
        .await?;

    let timestamps: Vec<u64> = timeline
        .timecodes
        .entries
        .iter()
        .map(|e| e.timestamp_ms)
        .collect();
    assert_eq!(timestamps, vec![0, 5_000]);
    assert_eq!(timeline.total_ms, 12_000);

    Ok(())
}

/// Test whole-second alignment and monotonicity over a larger dictionary
#[tokio::test]
async fn test_build_withManyPhrases_shouldKeepTimestampsAlignedAndMonotonic() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let locator = AssetLocator::new(temp_dir.path(), "lesson");

    let mut dictionary = Dictionary::new("lesson");
    let mut clips = MockClipStore::new();

    // Awkward durations on purpose; none land on a boundary by themselves
    let durations = [317, 1_001, 999, 2_500, 731, 1_850];
    for (i, duration) in durations.iter().enumerate() {
        let phrase = format!("phrase{}", i);
        let mut languages = indexmap::IndexMap::new();
        languages.insert(
            "hi".to_string(),
            vec![TranslationVariant::new(format!("t{}", i))],
        );
        dictionary.phrases.insert(phrase.clone(), languages);

        common::touch(&locator.phrase_image(&phrase))?;
        common::touch(&locator.variant_image(&phrase, "hi", 0))?;
        clips.insert(locator.phrase_audio(&phrase), *duration);
        clips.insert(locator.variant_audio(&phrase, "hi", 0), *duration + 123);
    }

    let timeline = TimelineBuilder::new(&locator, &clips)
        .build(&dictionary)
        .await?;

    let timestamps: Vec<u64> = timeline
        .timecodes
        .entries
        .iter()
        .map(|e| e.timestamp_ms)
        .collect();

    assert_eq!(timestamps.len(), durations.len() * 2);
    for window in timestamps.windows(2) {
        assert!(window[0] < window[1], "timestamps must be non-decreasing");
    }
    for timestamp in &timestamps {
        assert_eq!(timestamp % 1_000, 0, "timestamps must be whole seconds");
    }
    assert_eq!(timeline.total_ms % 1_000, 0);
    assert_eq!(timeline.track.duration_ms(), timeline.total_ms);

    Ok(())
}

/// Test segment order: English first, then languages and variants as declared
#[tokio::test]
async fn test_build_withNestedVariants_shouldFollowDeclaredOrder() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let locator = AssetLocator::new(temp_dir.path(), "lesson");

    let mut dictionary = Dictionary::new("lesson");
    let mut languages = indexmap::IndexMap::new();
    languages.insert(
        "hi".to_string(),
        vec![
            TranslationVariant::new("एक"),
            TranslationVariant::new("दो"),
        ],
    );
    languages.insert("fr".to_string(), vec![TranslationVariant::new("un")]);
    dictionary.phrases.insert("one".to_string(), languages);

    let mut clips = MockClipStore::new();
    common::touch(&locator.phrase_image("one"))?;
    clips.insert(locator.phrase_audio("one"), 500);
    for (language, index) in [("hi", 0), ("hi", 1), ("fr", 0)] {
        common::touch(&locator.variant_image("one", language, index))?;
        clips.insert(locator.variant_audio("one", language, index), 500);
    }

    let timeline = TimelineBuilder::new(&locator, &clips)
        .build(&dictionary)
        .await?;

    let images: Vec<String> = timeline
        .timecodes
        .entries
        .iter()
        .map(|e| {
            e.image_path
                .file_name()
                .unwrap()
                .to_string_lossy()
                .to_string()
        })
        .collect();

    assert_eq!(
        images,
        vec!["one.png", "one_hi0.png", "one_hi1.png", "one_fr0.png"]
    );

    Ok(())
}

/// Test that non-Mandarin languages never get a breakdown clip
#[tokio::test]
async fn test_build_withHindiVariant_shouldNotScheduleBreakdown() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let locator = AssetLocator::new(temp_dir.path(), "lesson");

    let dictionary = common::single_phrase_dictionary("lesson", "hello", "hi", "नमस्ते");

    common::touch(&locator.phrase_image("hello"))?;
    common::touch(&locator.variant_image("hello", "hi", 0))?;

    let mut clips = MockClipStore::new();
    clips.insert(locator.phrase_audio("hello"), 700);
    clips.insert(locator.variant_audio("hello", "hi", 0), 700);

    let timeline = TimelineBuilder::new(&locator, &clips)
        .build(&dictionary)
        .await?;

    let clip_count = timeline
        .track
        .pieces
        .iter()
        .filter(|p| matches!(p, AudioPiece::Clip { .. }))
        .count();

    // One phrase clip plus the variant played twice
    assert_eq!(clip_count, 3);

    Ok(())
}

/// Test that an empty dictionary produces empty outputs, not an error
#[tokio::test]
async fn test_build_withEmptyDictionary_shouldProduceEmptyOutputs() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let locator = AssetLocator::new(temp_dir.path(), "lesson");
    let dictionary = Dictionary::new("lesson");
    let clips = MockClipStore::new();

    let timeline = TimelineBuilder::new(&locator, &clips)
        .build(&dictionary)
        .await?;

    assert_eq!(timeline.total_ms, 0);
    assert!(timeline.track.is_empty());
    assert!(timeline.timecodes.is_empty());

    Ok(())
}

/// Test that a missing audio clip aborts the build
#[tokio::test]
async fn test_build_withMissingAudio_shouldFailWithMissingAsset() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let locator = AssetLocator::new(temp_dir.path(), "lesson");
    let dictionary = common::single_phrase_dictionary("lesson", "hello", "hi", "नमस्ते");

    common::touch(&locator.phrase_image("hello"))?;
    common::touch(&locator.variant_image("hello", "hi", 0))?;

    // No audio registered at all
    let clips = MockClipStore::new();

    let result = TimelineBuilder::new(&locator, &clips)
        .build(&dictionary)
        .await;

    assert!(matches!(result, Err(BuildError::MissingAsset(_))));

    Ok(())
}

/// Test that a missing image aborts the build before any audio is read
#[tokio::test]
async fn test_build_withMissingImage_shouldFailWithMissingAsset() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let locator = AssetLocator::new(temp_dir.path(), "lesson");
    let dictionary = common::single_phrase_dictionary("lesson", "hello", "hi", "नमस्ते");

    // Audio is registered, but no image file exists on disk
    let mut clips = MockClipStore::new();
    clips.insert(locator.phrase_audio("hello"), 700);
    clips.insert(locator.variant_audio("hello", "hi", 0), 700);

    let result = TimelineBuilder::new(&locator, &clips)
        .build(&dictionary)
        .await;

    assert!(matches!(result, Err(BuildError::MissingAsset(_))));

    Ok(())
}
