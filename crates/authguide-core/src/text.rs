//! Text normalisation for comparison and display cleansing.
//!
//! Every equality or substring check in the pipeline goes through
//! [`normalize`] first — raw text is only ever compared directly when it is
//! being displayed. Source rows are not guaranteed clean, so every field
//! read from a raw record passes through [`clean_value`].

/// Sentinel label standing in for missing/placeholder values ("other/misc").
pub const OTHER_LABEL: &str = "기타";

/// Lowercase and strip all whitespace.
///
/// Idempotent: `normalize(normalize(s)) == normalize(s)`.
pub fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(|c| c.to_lowercase())
        .collect()
}

/// True iff the string contains at least one Hangul codepoint.
///
/// Covers precomposed syllables (U+AC00–U+D7A3), conjoining jamo
/// (U+1100–U+11FF), and compatibility jamo (U+3130–U+318F).
pub fn has_korean(text: &str) -> bool {
    text.chars().any(|c| {
        matches!(c,
            '\u{AC00}'..='\u{D7A3}' | '\u{1100}'..='\u{11FF}' | '\u{3130}'..='\u{318F}')
    })
}

/// Map null-ish values to [`OTHER_LABEL`], otherwise trim.
///
/// The literal strings `"nan"` and `"null"` (any case) come from upstream
/// CSV/JSON exports and mean "no value".
pub fn clean_value(value: Option<&str>) -> String {
    let Some(raw) = value else {
        return OTHER_LABEL.to_string();
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return OTHER_LABEL.to_string();
    }
    let lower = trimmed.to_lowercase();
    if lower == "nan" || lower == "null" {
        return OTHER_LABEL.to_string();
    }
    trimmed.to_string()
}

/// True if the segment is a placeholder rather than a real label.
pub fn is_empty_segment(segment: &str) -> bool {
    let trimmed = segment.trim();
    trimmed.is_empty() || trimmed.eq_ignore_ascii_case("null") || trimmed.eq_ignore_ascii_case("nan")
}

/// Split free text into candidate keyword tokens.
///
/// Splits on whitespace and common punctuation; the intent resolver applies
/// its stopword and length filters on top of this.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| c.is_whitespace() || ",.?!;:/()[]\"'".contains(c))
        .filter(|t| !t.is_empty())
        .map(|t| t.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_lowercases_and_strips_whitespace() {
        assert_eq!(normalize("  Sales  Quote "), "salesquote");
        assert_eq!(normalize("영업 견적"), "영업견적");
        assert_eq!(normalize("A\tB\nC"), "abc");
    }

    #[test]
    fn normalize_is_idempotent() {
        for s in ["  ROLE_Admin ", "영업 (견적)", "", "a b c", "PJT.201"] {
            let once = normalize(s);
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn has_korean_detects_syllables_and_jamo() {
        assert!(has_korean("재무"));
        assert!(has_korean("ㄱㄴ"));
        assert!(has_korean("Sales 견적"));
        assert!(!has_korean("Sales Quote"));
        assert!(!has_korean("123-ABC"));
        assert!(!has_korean(""));
    }

    #[test]
    fn clean_value_maps_placeholders_to_other() {
        assert_eq!(clean_value(None), OTHER_LABEL);
        assert_eq!(clean_value(Some("")), OTHER_LABEL);
        assert_eq!(clean_value(Some("   ")), OTHER_LABEL);
        assert_eq!(clean_value(Some("null")), OTHER_LABEL);
        assert_eq!(clean_value(Some("NULL")), OTHER_LABEL);
        assert_eq!(clean_value(Some("NaN")), OTHER_LABEL);
    }

    #[test]
    fn clean_value_trims_real_values() {
        assert_eq!(clean_value(Some("  정산  ")), "정산");
        assert_eq!(clean_value(Some("R01")), "R01");
    }

    #[test]
    fn empty_segment_detection() {
        assert!(is_empty_segment(""));
        assert!(is_empty_segment("  "));
        assert!(is_empty_segment("null"));
        assert!(is_empty_segment("NULL"));
        assert!(!is_empty_segment("재무"));
        assert!(!is_empty_segment("0"));
    }

    #[test]
    fn tokenize_splits_on_whitespace_and_punctuation() {
        assert_eq!(
            tokenize("견적 메뉴 보여줘?"),
            vec!["견적", "메뉴", "보여줘"]
        );
        assert_eq!(tokenize("quote,menu.list"), vec!["quote", "menu", "list"]);
        assert!(tokenize("  ,, ?? ").is_empty());
    }
}
