/*!
 * Tests for caption track parsing
 */

use bangscan::subtitle_processor::{parse_track_string, Cue};

/// Test parsing a simple two-cue WEBVTT document
#[test]
fn test_parse_track_string_withTwoCueDocument_shouldEmitBothCues() {
    let content = "WEBVTT\n\
\n\
00:00:01.000 --> 00:00:03.000\n\
Hello bang\n\
\n\
00:00:10.000 --> 00:00:12.000\n\
Another line\n";

    let cues = parse_track_string(content);

    assert_eq!(
        cues,
        vec![
            Cue::new(1, "Hello bang".to_string()),
            Cue::new(10, "Another line".to_string()),
        ]
    );
}

/// Test SRT-style comma separated timestamps and sequence numbers
#[test]
fn test_parse_track_string_withSrtDocument_shouldSkipSequenceNumbers() {
    let content = "1\n\
00:00:01,000 --> 00:00:04,000\n\
First entry\n\
\n\
2\n\
00:00:05,500 --> 00:00:08,000\n\
Second entry\n";

    let cues = parse_track_string(content);

    assert_eq!(cues.len(), 2);
    assert_eq!(cues[0].start_secs, 1);
    assert_eq!(cues[0].text, "First entry");
    assert_eq!(cues[1].start_secs, 5);
    assert_eq!(cues[1].text, "Second entry");
}

/// Test that hours and minutes contribute to the start offset and
/// milliseconds are discarded
#[test]
fn test_parse_track_string_withLargeTimestamps_shouldComputeWholeSeconds() {
    let content = "01:02:03.999 --> 01:02:05.000\ndeep into the stream\n";

    let cues = parse_track_string(content);

    assert_eq!(cues.len(), 1);
    assert_eq!(cues[0].start_secs, 3723);
}

/// Test multi-line cue accumulation with space joining
#[test]
fn test_parse_track_string_withMultiLineCue_shouldJoinWithSpaces() {
    let content = "00:00:01.000 --> 00:00:03.000\nfirst line\nsecond line\n";

    let cues = parse_track_string(content);

    assert_eq!(cues.len(), 1);
    assert_eq!(cues[0].text, "first line second line");
}

/// Test that cue payload markup is sanitized at flush
#[test]
fn test_parse_track_string_withMarkupInCue_shouldSanitizeText() {
    let content = "WEBVTT\n\
\n\
00:00:01.000 --> 00:00:03.000\n\
we<00:00:01.500><c> got</c> a&nbsp;banger\n";

    let cues = parse_track_string(content);

    assert_eq!(cues.len(), 1);
    assert_eq!(cues[0].text, "we got a banger");
}

/// Test that cues whose text sanitizes to nothing are dropped
#[test]
fn test_parse_track_string_withMarkupOnlyCue_shouldDropCue() {
    let content = "00:00:01.000 --> 00:00:03.000\n\
<c></c>\n\
\n\
00:00:05.000 --> 00:00:07.000\n\
kept\n";

    let cues = parse_track_string(content);

    assert_eq!(cues.len(), 1);
    assert_eq!(cues[0].start_secs, 5);
}

/// Test tolerance of header metadata before the first timing line
#[test]
fn test_parse_track_string_withLeadingJunk_shouldIgnoreUntilFirstTimingLine() {
    let content = "WEBVTT\n\
Kind: captions\n\
Language: en\n\
\n\
00:00:02.000 --> 00:00:04.000\n\
actual cue\n";

    let cues = parse_track_string(content);

    assert_eq!(cues.len(), 1);
    assert_eq!(cues[0].start_secs, 2);
    assert_eq!(cues[0].text, "actual cue");
}

/// Test carriage-return line endings
#[test]
fn test_parse_track_string_withCrLfEndings_shouldParseNormally() {
    let content = "WEBVTT\r\n\r\n00:00:01.000 --> 00:00:03.000\r\nwindows style\r\n";

    let cues = parse_track_string(content);

    assert_eq!(cues.len(), 1);
    assert_eq!(cues[0].text, "windows style");
}

/// Test that a truncated track still flushes the pending cue at EOF
#[test]
fn test_parse_track_string_withTruncatedTrack_shouldFlushPendingCue() {
    let content = "00:00:09.000 --> 00:00:11.000\ntrailing cue without blank line";

    let cues = parse_track_string(content);

    assert_eq!(cues.len(), 1);
    assert_eq!(cues[0].start_secs, 9);
}

/// Test malformed input never fails
#[test]
fn test_parse_track_string_withMalformedInput_shouldReturnEmptyNotFail() {
    assert!(parse_track_string("").is_empty());
    assert!(parse_track_string("no timing lines at all\njust text\n").is_empty());
    assert!(parse_track_string("99:99 --> nonsense\n").is_empty());
}

/// Test that a timing line with no following text emits nothing
#[test]
fn test_parse_track_string_withTextlessCue_shouldEmitNothing() {
    let content = "00:00:01.000 --> 00:00:03.000\n\n00:00:05.000 --> 00:00:07.000\nlater\n";

    let cues = parse_track_string(content);

    assert_eq!(cues.len(), 1);
    assert_eq!(cues[0].start_secs, 5);
}
