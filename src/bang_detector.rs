use log::debug;
use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;
use crate::keyword_matcher::KeywordMatcher;
use crate::subtitle_processor::{self, Cue};

// @module: Keyword mention extraction and deduplication

/// Default time window within which two hits may be the same utterance
pub const DEFAULT_DEDUP_WINDOW_SECS: u64 = 5;

/// Default word-overlap ratio above which two transcripts are duplicates
pub const DEFAULT_OVERLAP_THRESHOLD: f64 = 0.5;

/// A canonical keyword mention: timestamp plus the cue transcript it came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BangEvent {
    // @field: Offset into the recording, whole seconds
    pub timestamp: u64,

    // @field: Sanitized transcript of the cue that contained the hit
    pub transcript: String,
}

impl BangEvent {
    pub fn new(timestamp: u64, transcript: impl Into<String>) -> Self {
        BangEvent {
            timestamp,
            transcript: transcript.into(),
        }
    }
}

/// Result of analyzing one caption track
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackAnalysis {
    /// Keyword occurrences across the whole concatenated transcript
    pub bang_count: usize,

    /// Deduplicated, time-ordered mention events
    pub bangs: Vec<BangEvent>,
}

/// Extracts keyword mentions from caption tracks and collapses the
/// near-duplicates that rolling auto-generated captions produce.
///
/// Consecutive auto-captions repeat overlapping spans of the same speech, so
/// one spoken mention surfaces in several adjacent cues. Deduplication
/// merges hits that are close in time and textually overlapping into a
/// single canonical event.
#[derive(Debug, Clone)]
pub struct BangDetector {
    matcher: KeywordMatcher,
    dedup_window_secs: u64,
    overlap_threshold: f64,
}

impl BangDetector {
    /// Build a detector, rejecting configuration that cannot work.
    pub fn new(
        keyword: &str,
        dedup_window_secs: u64,
        overlap_threshold: f64,
    ) -> Result<Self, ConfigError> {
        if !(0.0..=1.0).contains(&overlap_threshold) {
            return Err(ConfigError::InvalidOverlapThreshold(overlap_threshold));
        }

        Ok(BangDetector {
            matcher: KeywordMatcher::new(keyword)?,
            dedup_window_secs,
            overlap_threshold,
        })
    }

    /// Detector with the stock window and threshold for the given keyword
    pub fn with_defaults(keyword: &str) -> Result<Self, ConfigError> {
        Self::new(keyword, DEFAULT_DEDUP_WINDOW_SECS, DEFAULT_OVERLAP_THRESHOLD)
    }

    pub fn matcher(&self) -> &KeywordMatcher {
        &self.matcher
    }

    /// Parse a raw caption track and analyze it in one step.
    ///
    /// This is the shared entry point for every ingestion path: parse the
    /// track, count occurrences over the whole concatenated transcript, pick
    /// the cues that carry a hit and deduplicate them.
    pub fn analyze_track(&self, content: &str) -> TrackAnalysis {
        let cues = subtitle_processor::parse_track_string(content);
        self.analyze_cues(&cues)
    }

    /// Analyze already-parsed cues.
    pub fn analyze_cues(&self, cues: &[Cue]) -> TrackAnalysis {
        let full_text = cues
            .iter()
            .map(|cue| cue.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        let bang_count = self.matcher.count_occurrences(&full_text);

        let hits: Vec<BangEvent> = cues
            .iter()
            .filter(|cue| self.matcher.has_match(&cue.text))
            .map(|cue| BangEvent::new(cue.start_secs, cue.text.clone()))
            .collect();

        let bangs = self.deduplicate(&hits);
        debug!(
            "Track analysis: {} occurrences, {} hit cues, {} events after dedup",
            bang_count,
            hits.len(),
            bangs.len()
        );

        TrackAnalysis { bang_count, bangs }
    }

    /// Collapse near-duplicate mention events into canonical ones.
    ///
    /// Events are processed in ascending timestamp order (stable for ties)
    /// and each candidate is compared against the entries already kept. A
    /// candidate within the time window whose transcript either contains /
    /// is contained by an existing entry's transcript, or shares more than
    /// the threshold ratio of words with it, merges into that entry: the
    /// longer transcript survives, the existing (earlier) timestamp is kept,
    /// and scanning stops at the first match.
    ///
    /// Because candidates match against the evolving output list, a long
    /// late transcript can only ever extend an entry that was kept earlier;
    /// three cues that only pairwise-overlap may therefore resolve
    /// order-dependently. That mirrors the ingestion behavior this detector
    /// replaced and is kept as-is.
    ///
    /// O(n²) over the candidate count, which stays small per recording.
    pub fn deduplicate(&self, events: &[BangEvent]) -> Vec<BangEvent> {
        if events.is_empty() {
            return Vec::new();
        }

        let mut sorted = events.to_vec();
        sorted.sort_by_key(|event| event.timestamp);

        let mut result: Vec<BangEvent> = Vec::new();

        'candidates: for event in sorted {
            for existing in result.iter_mut() {
                if event.timestamp.abs_diff(existing.timestamp) > self.dedup_window_secs {
                    continue;
                }

                if self.transcripts_overlap(&event.transcript, &existing.transcript) {
                    // Keep the longer transcript under the existing timestamp
                    if event.transcript.len() > existing.transcript.len() {
                        existing.transcript = event.transcript.clone();
                    }
                    continue 'candidates;
                }
            }

            result.push(event);
        }

        result
    }

    /// Duplicate test for two transcripts already known to be time-proximate
    fn transcripts_overlap(&self, candidate: &str, existing: &str) -> bool {
        let candidate_lower = candidate.to_lowercase();
        let existing_lower = existing.to_lowercase();

        if candidate_lower.contains(&existing_lower) || existing_lower.contains(&candidate_lower) {
            return true;
        }

        // Word overlap relative to the shorter transcript, e.g.
        // "Bang. Oh let's go" vs "let's go. We got"
        let candidate_words: Vec<&str> = candidate_lower.split_whitespace().collect();
        let existing_words: Vec<&str> = existing_lower.split_whitespace().collect();
        let shorter = candidate_words.len().min(existing_words.len());
        if shorter == 0 {
            return false;
        }

        let common = candidate_words
            .iter()
            .filter(|word| existing_words.contains(word))
            .count();

        (common as f64 / shorter as f64) > self.overlap_threshold
    }
}
