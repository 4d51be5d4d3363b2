/*!
 * Tests for timecode formatting and the listing sink
 */

use anyhow::Result;
use vocaslider::timecode::{TimecodeEntry, TimecodeSheet};
use crate::common;

/// Test basic HH:MM:SS formatting with zero padding
#[test]
fn test_format_timestamp_withSubHourValues_shouldZeroPad() {
    assert_eq!(TimecodeEntry::format_timestamp(0), "00:00:00");
    assert_eq!(TimecodeEntry::format_timestamp(5_000), "00:00:05");
    assert_eq!(TimecodeEntry::format_timestamp(65_000), "00:01:05");
    assert_eq!(TimecodeEntry::format_timestamp(3_723_000), "01:02:03");
}

/// Test that milliseconds truncate to whole seconds
#[test]
fn test_format_timestamp_withFractionalSeconds_shouldTruncate() {
    assert_eq!(TimecodeEntry::format_timestamp(1_999), "00:00:01");
    assert_eq!(TimecodeEntry::format_timestamp(999), "00:00:00");
}

/// Test that durations past 24 hours widen the hours field instead of wrapping
#[test]
fn test_format_timestamp_withDayLongDuration_shouldWidenHoursField() {
    // 25 hours
    assert_eq!(TimecodeEntry::format_timestamp(25 * 3_600_000), "25:00:00");
    // 100 hours
    assert_eq!(TimecodeEntry::format_timestamp(100 * 3_600_000), "100:00:00");
}

/// Test the tab-separated listing serialization in append order
#[test]
fn test_to_listing_withEntries_shouldWriteTabSeparatedLines() {
    let mut sheet = TimecodeSheet::new();
    sheet.append(0, "out/d/images/hello.png");
    sheet.append(7_000, "out/d/images/hello_zh-CN0.png");

    assert_eq!(
        sheet.to_listing(),
        "00:00:00\tout/d/images/hello.png\n00:00:07\tout/d/images/hello_zh-CN0.png\n"
    );
}

/// Test that an empty sheet serializes to an empty listing
#[test]
fn test_to_listing_withNoEntries_shouldBeEmpty() {
    let sheet = TimecodeSheet::new();
    assert!(sheet.is_empty());
    assert_eq!(sheet.to_listing(), "");
}

/// Test writing the listing to a file
#[test]
fn test_write_to_withEntries_shouldPersistListing() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("d-timecodes.txt");

    let mut sheet = TimecodeSheet::new();
    sheet.append(4_000, "a.png");
    sheet.write_to(&path)?;

    let content = std::fs::read_to_string(&path)?;
    assert_eq!(content, "00:00:04\ta.png\n");

    Ok(())
}
