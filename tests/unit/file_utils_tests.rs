/*!
 * Tests for file utility functions
 */

use anyhow::Result;
use bangscan::file_utils::FileManager;
use std::path::Path;
use crate::common;

/// Test existence checks
#[test]
fn test_file_exists_withRealAndMissingFiles_shouldReportCorrectly() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let file = common::create_test_file(&temp_dir.path().to_path_buf(), "a.vtt", "WEBVTT\n")?;

    assert!(FileManager::file_exists(&file));
    assert!(!FileManager::file_exists(temp_dir.path().join("missing.vtt")));
    assert!(FileManager::dir_exists(temp_dir.path()));

    Ok(())
}

/// Test report path derivation from the caption file stem
#[test]
fn test_report_path_withCaptionFile_shouldAppendReportSuffix() {
    let path = FileManager::report_path(Path::new("/tmp/abc123.en.vtt"), Path::new("/tmp"));
    assert_eq!(path, Path::new("/tmp/abc123.en.bangs.json"));

    let path = FileManager::report_path(Path::new("video1.srt"), Path::new("out"));
    assert_eq!(path, Path::new("out/video1.bangs.json"));
}

/// Test caption file discovery picks up both extensions, sorted
#[test]
fn test_find_caption_files_withMixedDirectory_shouldFindVttAndSrt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();

    common::create_test_file(&dir, "b.vtt", "WEBVTT\n")?;
    common::create_test_file(&dir, "a.srt", "1\n")?;
    common::create_test_file(&dir, "notes.txt", "not a caption\n")?;

    let found = FileManager::find_caption_files(&dir)?;

    let names: Vec<String> = found
        .iter()
        .filter_map(|p| p.file_name().map(|n| n.to_string_lossy().to_string()))
        .collect();
    assert_eq!(names, vec!["a.srt".to_string(), "b.vtt".to_string()]);

    Ok(())
}

/// Test report discovery only matches the report suffix
#[test]
fn test_find_report_files_withMixedDirectory_shouldMatchSuffixOnly() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();

    common::create_test_file(&dir, "abc.bangs.json", "{}")?;
    common::create_test_file(&dir, "conf.json", "{}")?;
    common::create_test_file(&dir, "abc.vtt", "WEBVTT\n")?;

    let found = FileManager::find_report_files(&dir)?;

    assert_eq!(found.len(), 1);
    assert!(found[0].ends_with("abc.bangs.json"));

    Ok(())
}

/// Test atomic write replaces content in place
#[test]
fn test_write_atomic_withExistingFile_shouldReplaceContent() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("report.bangs.json");

    FileManager::write_atomic(&path, "first")?;
    assert_eq!(FileManager::read_to_string(&path)?, "first");

    FileManager::write_atomic(&path, "second")?;
    assert_eq!(FileManager::read_to_string(&path)?, "second");

    Ok(())
}

/// Test caption extension detection is case-insensitive
#[test]
fn test_is_caption_file_withUppercaseExtension_shouldMatch() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();

    let upper = common::create_test_file(&dir, "LOUD.VTT", "WEBVTT\n")?;
    let other = common::create_test_file(&dir, "data.json", "{}")?;

    assert!(FileManager::is_caption_file(&upper));
    assert!(!FileManager::is_caption_file(&other));

    Ok(())
}
