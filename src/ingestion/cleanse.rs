//! Building-name cleansing heuristics
//!
//! IOLP asset names frequently concatenate the actual building name with a
//! street address, suite, or zip code. The cleanser splits on the first
//! known delimiter, keeps the segment that scores least address-like, and
//! strips trailing address fragments. Best effort only.

use crate::ingestion::types::{EnrichedRow, RawRow};
use once_cell::sync::Lazy;
use regex::Regex;

/// Column holding the raw asset name in both IOLP exports.
pub const ASSET_NAME_COLUMN: &str = "Real Property Asset Name";

/// Delimiters that separate a name from an address, in the order they are
/// tried. Only the first delimiter present in a name is split on.
const NAME_DELIMITERS: [&str; 8] = [" - ", " – ", ", ", " / ", ": ", " | ", " @ ", " at "];

// Non-address scorer weights. Tuned by hand against the IOLP exports.
const BASE_SCORE: i32 = 10;
const LEADING_DIGIT_PENALTY: i32 = 15;
const STREET_WORD_PENALTY: i32 = 10;
const ZIP_CODE_PENALTY: i32 = 20;
const LANDMARK_WORD_BONUS: i32 = 15;
const CAPITALIZED_WORDS_BONUS: i32 = 5;
const SHORT_SEGMENT_PENALTY: i32 = 5;

static STREET_WORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(st|street|ave|avenue|rd|road|blvd|boulevard|dr|drive|ln|lane|ct|court|way|pl|place)\b")
        .expect("street word pattern")
});

static LANDMARK_WORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(center|centre|plaza|tower|building|complex|mall|square|park|place)\b")
        .expect("landmark word pattern")
});

static ZIP_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d{5}(-\d{4})?").expect("zip code pattern"));

static CAPITALIZED_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Z][a-z]+").expect("capitalized word pattern"));

static TRAILING_ZIP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r",?\s*\d{5}(-\d{4})?\s*$").expect("trailing zip pattern"));

static TRAILING_SUITE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i),?\s*(suite|ste|floor|fl|room|rm)\s*\d+\s*$").expect("trailing suite pattern")
});

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern"));

static ADDRESS_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        // number + one word + street type
        r"(?i)\d+\s+[A-Za-z]+\s+(st|street|ave|avenue|rd|road|blvd|boulevard|dr|drive|ln|lane|ct|court|way|pl|place)",
        // number + two words + street type
        r"(?i)\d+\s+[A-Za-z]+\s+[A-Za-z]+\s+(st|street|ave|avenue|rd|road|blvd|boulevard|dr|drive|ln|lane|ct|court|way|pl|place)",
        // bare 3-5 digit house number
        r"\d{3,5}\s+[A-Za-z]",
        // embedded zip code
        r",\s*\d{5}(-\d{4})?",
        // suite / floor / room designator
        r"(?i)(suite|ste|floor|fl|room|rm)\s*\d+",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("address pattern"))
    .collect()
});

/// True when an asset name looks like it embeds a street address.
/// Heuristic; false positives and negatives are expected.
pub fn has_address_in_name(name: &str) -> bool {
    if name.is_empty() {
        return false;
    }
    ADDRESS_PATTERNS.iter().any(|pattern| pattern.is_match(name))
}

/// Score a delimiter-split segment by how much it reads like a building
/// name rather than an address. Higher wins; ties keep the earlier segment.
pub fn score_as_non_address(text: &str) -> i32 {
    if text.len() < 2 {
        return 0;
    }

    let mut score = BASE_SCORE;

    if text.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        score -= LEADING_DIGIT_PENALTY;
    }
    if STREET_WORD.is_match(text) {
        score -= STREET_WORD_PENALTY;
    }
    if ZIP_CODE.is_match(text) {
        score -= ZIP_CODE_PENALTY;
    }
    if LANDMARK_WORD.is_match(text) {
        score += LANDMARK_WORD_BONUS;
    }
    if CAPITALIZED_WORD.find_iter(text).count() > 1 {
        score += CAPITALIZED_WORDS_BONUS;
    }
    if text.len() < 5 {
        score -= SHORT_SEGMENT_PENALTY;
    }

    score
}

/// Recover a human-readable building name from a raw asset name.
///
/// Splits on the first delimiter present, keeps the best-scoring segment,
/// then strips trailing zip codes and suite designators. If the result
/// collapses below three characters the original input is returned
/// unchanged rather than an over-cleaned fragment.
pub fn clean_building_name(name: &str) -> String {
    if name.is_empty() {
        return name.to_string();
    }

    let mut cleaned = name.trim().to_string();

    for delimiter in NAME_DELIMITERS {
        if cleaned.contains(delimiter) {
            let parts: Vec<&str> = cleaned.split(delimiter).map(str::trim).collect();
            if parts.len() >= 2 {
                let mut best = parts[0];
                let mut best_score = score_as_non_address(parts[0]);

                for part in &parts[1..] {
                    let score = score_as_non_address(part);
                    if score > best_score {
                        best = part;
                        best_score = score;
                    }
                }

                cleaned = best.to_string();
            }
            break;
        }
    }

    let cleaned = TRAILING_ZIP.replace(&cleaned, "");
    let cleaned = TRAILING_SUITE.replace(&cleaned, "");
    let cleaned = WHITESPACE.replace_all(&cleaned, " ");
    let cleaned = cleaned
        .trim_matches(|c: char| c == ',' || c == '-' || c.is_whitespace())
        .to_string();

    if cleaned.len() < 3 {
        return name.to_string();
    }

    cleaned
}

/// Attach the derived name fields to a row. Pure; a missing asset name
/// passes through as `None` rather than an empty string.
pub fn process_row(row: RawRow) -> EnrichedRow {
    let asset_name = row.text(ASSET_NAME_COLUMN);

    let cleaned_building_name = asset_name.as_deref().map(clean_building_name);
    let address_in_name = asset_name.as_deref().is_some_and(has_address_in_name);

    EnrichedRow {
        row,
        cleaned_building_name,
        address_in_name,
    }
}
