use anyhow::{anyhow, Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use walkdir::WalkDir;

// @module: File and directory utilities

/// Suffix used for bang report files, appended to the caption file stem
pub const REPORT_SUFFIX: &str = "bangs.json";

/// Caption file extensions the scan workflow picks up
const CAPTION_EXTENSIONS: [&str; 2] = ["vtt", "srt"];

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    // @checks: Caption file by extension
    pub fn is_caption_file<P: AsRef<Path>>(path: P) -> bool {
        let path = path.as_ref();
        if !path.is_file() {
            return false;
        }
        path.extension()
            .map(|ext| {
                CAPTION_EXTENSIONS
                    .iter()
                    .any(|known| ext.to_string_lossy().eq_ignore_ascii_case(known))
            })
            .unwrap_or(false)
    }

    // @checks: Bang report file by filename suffix
    pub fn is_report_file<P: AsRef<Path>>(path: P) -> bool {
        let path = path.as_ref();
        path.is_file()
            && path
                .file_name()
                .map(|name| name.to_string_lossy().ends_with(&format!(".{}", REPORT_SUFFIX)))
                .unwrap_or(false)
    }

    // @generates: Report path for a caption file, <stem>.bangs.json
    pub fn report_path<P1: AsRef<Path>, P2: AsRef<Path>>(
        caption_file: P1,
        output_dir: P2,
    ) -> PathBuf {
        let caption_file = caption_file.as_ref();
        let stem = caption_file.file_stem().unwrap_or_default();

        let mut report_filename = stem.to_string_lossy().to_string();
        report_filename.push('.');
        report_filename.push_str(REPORT_SUFFIX);

        output_dir.as_ref().join(report_filename)
    }

    /// Find caption files under a directory
    pub fn find_caption_files<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
        Self::find_files(dir, |path: &Path| Self::is_caption_file(path))
    }

    /// Find bang report files under a directory
    pub fn find_report_files<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
        Self::find_files(dir, |path: &Path| Self::is_report_file(path))
    }

    /// Walk a directory and collect files matching the predicate, sorted so
    /// batch runs are deterministic
    fn find_files<P: AsRef<Path>>(
        dir: P,
        matches: impl Fn(&Path) -> bool,
    ) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();

        for entry in WalkDir::new(dir.as_ref()).follow_links(true) {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if matches(path) {
                result.push(path.to_path_buf());
            }
        }

        result.sort();
        Ok(result)
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Write a string to a file
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Replace a file's content atomically.
    ///
    /// The content is written to a temporary file in the target directory
    /// and renamed over the destination, so a crashed repair pass never
    /// leaves a half-written report behind.
    pub fn write_atomic<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        let path = path.as_ref();
        let parent = path.parent().filter(|p| !p.as_os_str().is_empty());
        let parent = parent.unwrap_or_else(|| Path::new("."));
        Self::ensure_dir(parent)?;

        let mut temp = NamedTempFile::new_in(parent)
            .with_context(|| format!("Failed to create temp file in {:?}", parent))?;
        temp.write_all(content.as_bytes())
            .with_context(|| format!("Failed to write temp file for {:?}", path))?;
        temp.persist(path)
            .map_err(|e| anyhow!("Failed to persist {:?}: {}", path, e))?;

        Ok(())
    }
}
