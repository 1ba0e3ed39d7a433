/*!
 * # bangscan
 *
 * A Rust library and CLI for extracting timestamped keyword mentions from
 * closed-caption subtitle tracks.
 *
 * ## Features
 *
 * - Parse WebVTT/SRT shaped caption tracks into timed cues
 * - Strip auto-caption markup artifacts (inline timing codes, cue tags,
 *   HTML entities)
 * - Count and locate keyword mentions with a configurable keyword stem
 * - Collapse the near-duplicate hits that rolling auto-generated captions
 *   produce into canonical, time-ordered events
 * - Batch scan directories of caption files into JSON bang reports
 * - Repair previously written reports (re-sanitize and re-deduplicate)
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `text_sanitizer`: Cue text markup stripping and entity decoding
 * - `subtitle_processor`: Caption track parsing into timed cues
 * - `keyword_matcher`: Keyword stem matching and occurrence counting
 * - `bang_detector`: Mention extraction and near-duplicate collapsing
 * - `file_utils`: File system operations
 * - `app_controller`: Scan and repair workflow orchestration
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod bang_detector;
pub mod errors;
pub mod file_utils;
pub mod keyword_matcher;
pub mod subtitle_processor;
pub mod text_sanitizer;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{BangReport, Controller, RepairOutcome, RepairSummary, SourceKind};
pub use bang_detector::{BangDetector, BangEvent, TrackAnalysis};
pub use errors::{AppError, ConfigError, ReportError};
pub use keyword_matcher::KeywordMatcher;
pub use subtitle_processor::{parse_track_string, Cue};
pub use text_sanitizer::sanitize;
