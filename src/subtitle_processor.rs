use std::fmt;
use once_cell::sync::Lazy;
use regex::Regex;
use crate::text_sanitizer;

// @module: Caption track parsing

// @const: Cue timing line regex (VTT and SRT timestamp separators)
static CUE_TIMING_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{2}):(\d{2}):(\d{2})[.,](\d{3})\s*-->").unwrap()
});

// @struct: Single timed cue from a caption track
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cue {
    // @field: Start offset in whole seconds
    pub start_secs: u64,

    // @field: Sanitized cue text
    pub text: String,
}

impl Cue {
    pub fn new(start_secs: u64, text: String) -> Self {
        Cue { start_secs, text }
    }
}

impl fmt::Display for Cue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{}s] {}", self.start_secs, self.text)
    }
}

/// Parse a caption track document into an ordered sequence of cues.
///
/// Works on both WebVTT and SRT shaped tracks: any line carrying an
/// `HH:MM:SS[.,]mmm -->` timing marker starts a new cue. Pure numeric
/// cue-sequence lines and the `WEBVTT` header are skipped; every other
/// non-blank line accumulates into the current cue, space-joined. The
/// accumulated text is sanitized when the cue is flushed and cues that end
/// up empty after sanitization are dropped.
///
/// Milliseconds are matched by the timing pattern but discarded: downstream
/// consumers key mentions by whole seconds.
///
/// Malformed or truncated tracks never fail the parse; unrecognized lines
/// are treated as cue text or ignored, so the worst case is an undercount.
pub fn parse_track_string(content: &str) -> Vec<Cue> {
    let mut cues = Vec::new();
    let mut current_start: Option<u64> = None;
    let mut current_text = String::new();

    for line in content.lines() {
        if let Some(caps) = CUE_TIMING_REGEX.captures(line) {
            flush_cue(&mut cues, current_start, &current_text);

            let hours = capture_as_u64(&caps, 1);
            let minutes = capture_as_u64(&caps, 2);
            let seconds = capture_as_u64(&caps, 3);
            current_start = Some(hours * 3600 + minutes * 60 + seconds);
            current_text.clear();
            continue;
        }

        let trimmed = line.trim();
        if current_start.is_none() || trimmed.is_empty() {
            continue;
        }

        // Numeric cue-sequence identifiers and the header token are not text
        if trimmed.parse::<u64>().is_ok() || trimmed.starts_with("WEBVTT") {
            continue;
        }

        if !current_text.is_empty() {
            current_text.push(' ');
        }
        current_text.push_str(trimmed);
    }

    flush_cue(&mut cues, current_start, &current_text);

    cues
}

/// Emit the pending cue if it accumulated any text that survives sanitization
fn flush_cue(cues: &mut Vec<Cue>, start: Option<u64>, text: &str) {
    let Some(start_secs) = start else {
        return;
    };
    if text.trim().is_empty() {
        return;
    }

    let cleaned = text_sanitizer::sanitize(text);
    if !cleaned.is_empty() {
        cues.push(Cue::new(start_secs, cleaned));
    }
}

fn capture_as_u64(caps: &regex::Captures, idx: usize) -> u64 {
    caps.get(idx)
        .map_or(0, |m| m.as_str().parse().unwrap_or(0))
}
