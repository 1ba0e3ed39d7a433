use anyhow::{anyhow, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::app_config::Config;
use crate::bang_detector::{BangDetector, BangEvent};
use crate::file_utils::FileManager;
use crate::text_sanitizer;

// @module: Application controller for the scan and repair workflows

/// Kind of recording a caption track came from
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    // @kind: Regular upload
    #[default]
    Video,
    // @kind: Stream VOD
    Vod,
}

impl SourceKind {
    // @returns: Lowercase kind identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::Video => "video".to_string(),
            Self::Vod => "vod".to_string(),
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

impl FromStr for SourceKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "video" => Ok(Self::Video),
            "vod" => Ok(Self::Vod),
            _ => Err(anyhow!("Invalid source kind: {}", s)),
        }
    }
}

/// Bang report document written per caption track.
///
/// The persistence layer proper lives outside this tool; the report is the
/// handoff format, keyed by the external video identifier taken from the
/// caption file stem.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct BangReport {
    /// Opaque external video identifier
    pub video_id: String,

    /// Kind of recording the track belongs to
    pub source: SourceKind,

    /// Keyword occurrences across the whole track transcript
    pub bang_count: usize,

    /// Deduplicated, time-ordered mention events
    pub bangs: Vec<BangEvent>,
}

/// Outcome of repairing a single report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepairOutcome {
    pub changed: bool,
    pub events_before: usize,
    pub events_after: usize,
}

/// Aggregate outcome of repairing a folder of reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RepairSummary {
    pub reports_checked: usize,
    pub reports_changed: usize,
    pub events_before: usize,
    pub events_after: usize,
}

impl RepairSummary {
    pub fn duplicates_removed(&self) -> usize {
        self.events_before.saturating_sub(self.events_after)
    }
}

/// Main application controller for caption scanning
pub struct Controller {
    // @field: App configuration
    config: Config,

    // @field: Shared detection core
    detector: BangDetector,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let detector = BangDetector::new(
            &config.keyword,
            config.dedup_window_secs,
            config.overlap_threshold,
        )?;

        Ok(Self { config, detector })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn detector(&self) -> &BangDetector {
        &self.detector
    }

    /// Scan one caption track and write its bang report.
    ///
    /// Returns the report, or `None` when an existing report was kept
    /// because `force_overwrite` was not set.
    pub async fn scan(
        &self,
        input_file: &Path,
        output_dir: &Path,
        source: SourceKind,
        force_overwrite: bool,
    ) -> Result<Option<BangReport>> {
        if !input_file.exists() {
            return Err(anyhow!("Input file does not exist: {:?}", input_file));
        }

        FileManager::ensure_dir(output_dir)?;

        let report_path = FileManager::report_path(input_file, output_dir);
        if report_path.exists() && !force_overwrite {
            warn!("Skipping file, report already exists (use -f to force overwrite)");
            return Ok(None);
        }

        let content = tokio::fs::read_to_string(input_file)
            .await
            .with_context(|| format!("Failed to read caption file: {:?}", input_file))?;

        let analysis = self.detector.analyze_track(&content);

        let video_id = input_file
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_else(|| "unknown".to_string());

        let report = BangReport {
            video_id,
            source,
            bang_count: analysis.bang_count,
            bangs: analysis.bangs,
        };

        let json = serde_json::to_string_pretty(&report)
            .context("Failed to serialize bang report to JSON")?;
        FileManager::write_atomic(&report_path, &json)?;

        info!(
            "{} -> {} bangs ({} events)",
            report.video_id,
            report.bang_count,
            report.bangs.len()
        );

        Ok(Some(report))
    }

    /// Scan every caption track under a directory.
    ///
    /// Reports are written next to their caption files. Individual failures
    /// are logged and counted, never aborting the batch.
    pub async fn scan_folder(
        &self,
        input_dir: &Path,
        source: SourceKind,
        force_overwrite: bool,
    ) -> Result<usize> {
        let caption_files = FileManager::find_caption_files(input_dir)?;

        if caption_files.is_empty() {
            warn!("No caption files found in directory: {:?}", input_dir);
            return Ok(0);
        }

        info!("Found {} caption file(s) to process", caption_files.len());

        let progress = ProgressBar::new(caption_files.len() as u64);
        progress.set_style(Self::folder_progress_style());
        progress.set_message("Scanning tracks");

        let mut processed_count = 0;
        let mut error_count = 0;

        for caption_file in caption_files.iter() {
            let file_name = caption_file
                .file_name()
                .map(|f| f.to_string_lossy().to_string())
                .unwrap_or_else(|| "unknown".to_string());
            progress.set_message(format!("Scanning: {}", file_name));

            let output_dir = match caption_file.parent() {
                Some(parent) => parent.to_path_buf(),
                None => input_dir.to_path_buf(),
            };

            match self
                .scan(caption_file, &output_dir, source, force_overwrite)
                .await
            {
                Ok(Some(_)) => processed_count += 1,
                Ok(None) => {}
                Err(e) => {
                    error!("Error processing {:?}: {}", caption_file, e);
                    error_count += 1;
                }
            }

            progress.inc(1);
        }

        progress.finish_with_message(format!(
            "Scanned {} track(s), {} error(s)",
            processed_count, error_count
        ));

        Ok(processed_count)
    }

    /// Re-sanitize and re-deduplicate one existing bang report.
    ///
    /// Early ingestion runs stored transcripts before the sanitizer handled
    /// every markup artifact, and rolling captions can leave near-duplicate
    /// events behind. This pass reruns both stages over the stored events
    /// and rewrites the report only when something actually changed, with
    /// the count reset to the deduplicated event count.
    pub async fn repair(&self, report_path: &Path) -> Result<RepairOutcome> {
        let content = tokio::fs::read_to_string(report_path)
            .await
            .with_context(|| format!("Failed to read report: {:?}", report_path))?;

        let report: BangReport = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse report JSON: {:?}", report_path))?;

        let events_before = report.bangs.len();

        let cleaned: Vec<BangEvent> = report
            .bangs
            .iter()
            .map(|bang| BangEvent::new(bang.timestamp, text_sanitizer::sanitize(&bang.transcript)))
            .collect();

        let deduplicated = self.detector.deduplicate(&cleaned);
        let events_after = deduplicated.len();

        let changed = events_before != events_after
            || report
                .bangs
                .iter()
                .zip(deduplicated.iter())
                .any(|(before, after)| before.transcript != after.transcript);

        if changed {
            let repaired = BangReport {
                bang_count: deduplicated.len(),
                bangs: deduplicated,
                ..report
            };

            let json = serde_json::to_string_pretty(&repaired)
                .context("Failed to serialize repaired report to JSON")?;
            FileManager::write_atomic(report_path, &json)?;

            let removed = events_before.saturating_sub(events_after);
            if removed > 0 {
                info!(
                    "Repaired: {} (removed {} duplicate(s))",
                    repaired.video_id, removed
                );
            } else {
                debug!("Repaired transcripts: {}", repaired.video_id);
            }
        }

        Ok(RepairOutcome {
            changed,
            events_before,
            events_after,
        })
    }

    /// Repair every bang report under a directory and summarize the result.
    pub async fn repair_folder(&self, input_dir: &Path) -> Result<RepairSummary> {
        let report_files = FileManager::find_report_files(input_dir)?;

        if report_files.is_empty() {
            warn!("No bang reports found in directory: {:?}", input_dir);
            return Ok(RepairSummary::default());
        }

        info!("Found {} report(s) to check", report_files.len());

        let mut summary = RepairSummary::default();

        for report_file in report_files.iter() {
            match self.repair(report_file).await {
                Ok(outcome) => {
                    summary.reports_checked += 1;
                    summary.events_before += outcome.events_before;
                    summary.events_after += outcome.events_after;
                    if outcome.changed {
                        summary.reports_changed += 1;
                    }
                }
                Err(e) => {
                    error!("Error repairing {:?}: {}", report_file, e);
                }
            }
        }

        info!(
            "Repair complete: {}/{} report(s) changed, {} events before, {} after, {} duplicate(s) removed",
            summary.reports_changed,
            summary.reports_checked,
            summary.events_before,
            summary.events_after,
            summary.duplicates_removed()
        );

        Ok(summary)
    }

    fn folder_progress_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg} {eta}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓▒░")
    }
}
