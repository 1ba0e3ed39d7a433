/*!
 * Tests for keyword matching
 */

use bangscan::errors::ConfigError;
use bangscan::keyword_matcher::KeywordMatcher;

/// Test case-insensitive matching with attached suffix
#[test]
fn test_count_occurrences_withInflectedForm_shouldMatchStemBearingWord() {
    let matcher = KeywordMatcher::new("bang").unwrap();

    assert_eq!(matcher.count_occurrences("That was a BANGER"), 1);
    assert_eq!(matcher.count_occurrences("no match here"), 0);
}

/// Test counting multiple occurrences across a transcript
#[test]
fn test_count_occurrences_withMultipleHits_shouldCountEachWord() {
    let matcher = KeywordMatcher::new("bang").unwrap();

    let text = "bang! and another Bang, then banging around, big bangs";
    assert_eq!(matcher.count_occurrences(text), 4);
}

/// Test prefixes attached to the stem
#[test]
fn test_count_occurrences_withPrefixedStem_shouldMatch() {
    let matcher = KeywordMatcher::new("bang").unwrap();

    assert_eq!(matcher.count_occurrences("what a kabang that was"), 1);
}

/// Test has_match agreement with count_occurrences
#[test]
fn test_has_match_withAndWithoutHit_shouldAgreeWithCount() {
    let matcher = KeywordMatcher::new("bang").unwrap();

    assert!(matcher.has_match("small bang"));
    assert!(!matcher.has_match("nothing relevant"));
}

/// Test empty text
#[test]
fn test_count_occurrences_withEmptyText_shouldReturnZero() {
    let matcher = KeywordMatcher::new("bang").unwrap();

    assert_eq!(matcher.count_occurrences(""), 0);
    assert!(!matcher.has_match(""));
}

/// Test a different keyword domain reuses the same engine
#[test]
fn test_keyword_matcher_withOtherKeyword_shouldMatchThatStem() {
    let matcher = KeywordMatcher::new("goal").unwrap();

    assert_eq!(matcher.count_occurrences("GOAL! what a goalscorer"), 2);
    assert_eq!(matcher.count_occurrences("that was a bang"), 0);
}

/// Test regex metacharacters in the keyword are escaped
#[test]
fn test_keyword_matcher_withMetacharacterKeyword_shouldTreatItLiterally() {
    let matcher = KeywordMatcher::new("c++").unwrap();

    assert_eq!(matcher.count_occurrences("pure rust here"), 0);
}

/// Test empty keyword fails fast
#[test]
fn test_keyword_matcher_withEmptyKeyword_shouldFailFast() {
    assert!(matches!(
        KeywordMatcher::new(""),
        Err(ConfigError::EmptyKeyword)
    ));
    assert!(matches!(
        KeywordMatcher::new("   "),
        Err(ConfigError::EmptyKeyword)
    ));
}
