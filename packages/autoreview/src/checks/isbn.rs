//! ISBN checksum validation and wikitext scanning.
//!
//! A surprisingly reliable vandalism signal: fabricated citations tend to
//! carry identifiers that fail the ISBN-10 (mod 11) or ISBN-13 (mod 10)
//! digit check. The scanner finds `isbn`-labelled candidates in wikitext
//! and reports the ones that do not validate.

use regex::Regex;

/// Validate an ISBN-10 checksum.
///
/// Hyphens and spaces are stripped first. The normalized form must be
/// exactly 10 characters: nine digits and a final digit or `X`/`x`
/// (valued 10). Checksum is `Σ digit_i × (10 − i) ≡ 0 (mod 11)`.
pub fn validate_isbn10(s: &str) -> bool {
    let normalized: String = s.chars().filter(|c| *c != '-' && *c != ' ').collect();
    let chars: Vec<char> = normalized.chars().collect();

    if chars.len() != 10 {
        return false;
    }

    let mut sum: u32 = 0;
    for (i, ch) in chars.iter().enumerate() {
        let value = match ch {
            '0'..='9' => *ch as u32 - '0' as u32,
            'X' | 'x' if i == 9 => 10,
            _ => return false,
        };
        sum += value * (10 - i as u32);
    }

    sum % 11 == 0
}

/// Validate an ISBN-13 checksum.
///
/// Hyphens and spaces are stripped first. The normalized form must be
/// exactly 13 digits starting with `978` or `979`; the 13th digit must
/// equal `(10 − (weighted sum mod 10)) mod 10` with alternating
/// weights 1,3,1,3,… over the first 12 digits.
pub fn validate_isbn13(s: &str) -> bool {
    let normalized: String = s.chars().filter(|c| *c != '-' && *c != ' ').collect();

    if normalized.len() != 13 || !normalized.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    if !normalized.starts_with("978") && !normalized.starts_with("979") {
        return false;
    }

    let digits: Vec<u32> = normalized.chars().map(|c| c as u32 - '0' as u32).collect();
    let sum: u32 = digits[..12]
        .iter()
        .enumerate()
        .map(|(i, d)| if i % 2 == 0 { *d } else { d * 3 })
        .sum();
    let check = (10 - (sum % 10)) % 10;

    digits[12] == check
}

/// Scan wikitext for `isbn`-labelled candidates and return the ones that
/// fail checksum validation, in the raw spelling they appeared with.
///
/// Detection is case-insensitive for the label and accepts `:`, `=`,
/// whitespace, or no separator at all ("ISBN0306406152"). A label glued
/// to letters on either side ("ISBNs", "autoisbn") is not a label.
/// Candidate collection is bounded: it stops at 10 significant characters
/// when they already form a valid ISBN-10, and at 13 significant
/// characters otherwise, so a trailing year ("… 40615 7 2020") is never
/// absorbed. Candidates whose significant length is neither 10 nor 13 are
/// reported invalid.
pub fn find_invalid_isbns(text: &str) -> Vec<String> {
    let label = Regex::new(r"(?i)isbn").unwrap();
    let mut invalid = Vec::new();

    for found in label.find_iter(text) {
        // A word boundary after the label would reject the no-separator
        // form, so bound the label by hand: nothing alphanumeric before
        // it, no letter after it (digits after are the candidate itself).
        let glued_before = text[..found.start()]
            .chars()
            .next_back()
            .is_some_and(|c| c.is_ascii_alphanumeric());
        let glued_after = text[found.end()..]
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic());
        if glued_before || glued_after {
            continue;
        }

        let rest = &text[found.end()..];
        let rest = skip_separator(rest);

        if let Some(candidate) = collect_candidate(rest) {
            if !candidate.is_valid() {
                invalid.push(candidate.raw);
            }
        }
    }

    invalid
}

/// Skip the optional separator between the label and the digits:
/// whitespace, then an optional `:` or `=`, then more whitespace.
fn skip_separator(rest: &str) -> &str {
    let rest = rest.trim_start();
    let rest = rest.strip_prefix([':', '=']).unwrap_or(rest);
    rest.trim_start()
}

/// One scanned candidate: the raw spelling and the significant characters.
struct IsbnCandidate {
    raw: String,
    significant: String,
}

impl IsbnCandidate {
    fn is_valid(&self) -> bool {
        if self.significant.len() == 13 && validate_isbn13(&self.significant) {
            return true;
        }
        self.significant.len() >= 10 && validate_isbn10(&self.significant[..10])
    }
}

/// Collect a candidate from the start of `rest`.
///
/// Digits and `X`/`x` are significant; single hyphens and spaces are
/// carried in the raw spelling. Collection terminates at any other
/// character (punctuation, newline) and is bounded at 13 significant
/// characters, or at 10 once those already validate as an ISBN-10.
fn collect_candidate(rest: &str) -> Option<IsbnCandidate> {
    let mut raw = String::new();
    let mut significant = String::new();

    for ch in rest.chars() {
        match ch {
            '0'..='9' | 'X' | 'x' => {
                raw.push(ch);
                significant.push(ch);
                if significant.len() == 10 && validate_isbn10(&significant) {
                    break;
                }
                if significant.len() == 13 {
                    break;
                }
            }
            '-' | ' ' => raw.push(ch),
            _ => break,
        }
    }

    if significant.is_empty() {
        return None;
    }

    let raw = raw.trim_end_matches(['-', ' ']).to_string();
    Some(IsbnCandidate { raw, significant })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_isbn10_numeric_check_digit() {
        assert!(validate_isbn10("0306406152"));
    }

    #[test]
    fn test_valid_isbn10_x_check_digit() {
        assert!(validate_isbn10("043942089X"));
        assert!(validate_isbn10("043942089x"));
    }

    #[test]
    fn test_invalid_isbn10_wrong_checksum() {
        assert!(!validate_isbn10("0306406153"));
    }

    #[test]
    fn test_invalid_isbn10_wrong_length() {
        assert!(!validate_isbn10("030640615"));
        assert!(!validate_isbn10("03064061521"));
    }

    #[test]
    fn test_invalid_isbn10_bad_characters() {
        assert!(!validate_isbn10("030640A152"));
        // X only allowed in the check position
        assert!(!validate_isbn10("X306406152"));
    }

    #[test]
    fn test_valid_isbn13_prefixes() {
        assert!(validate_isbn13("9780306406157"));
        assert!(validate_isbn13("9791234567896"));
    }

    #[test]
    fn test_invalid_isbn13_wrong_checksum() {
        assert!(!validate_isbn13("9780306406158"));
    }

    #[test]
    fn test_invalid_isbn13_wrong_prefix() {
        assert!(!validate_isbn13("9771234567890"));
    }

    #[test]
    fn test_invalid_isbn13_wrong_length() {
        assert!(!validate_isbn13("978030640615"));
        assert!(!validate_isbn13("97803064061571"));
    }

    #[test]
    fn test_invalid_isbn13_with_letter() {
        assert!(!validate_isbn13("978030640615X"));
    }

    #[test]
    fn test_no_isbns_in_text() {
        assert!(find_invalid_isbns("This is just normal text without any ISBNs.").is_empty());
    }

    #[test]
    fn test_valid_isbn10_formats_not_flagged() {
        assert!(find_invalid_isbns("isbn: 0-306-40615-2").is_empty());
        assert!(find_invalid_isbns("isbn 0 306 40615 2").is_empty());
        assert!(find_invalid_isbns("ISBN:0306406152").is_empty());
    }

    #[test]
    fn test_valid_isbn13_formats_not_flagged() {
        assert!(find_invalid_isbns("ISBN: 978-0-306-40615-7").is_empty());
        assert!(find_invalid_isbns("isbn = 978 0 306 40615 7").is_empty());
        assert!(find_invalid_isbns("Isbn:9780306406157").is_empty());
    }

    #[test]
    fn test_invalid_isbn10_detected_with_raw_spelling() {
        let invalid = find_invalid_isbns("isbn: 0-306-40615-3");
        assert_eq!(invalid.len(), 1);
        assert!(invalid[0].contains("0-306-40615-3"));
    }

    #[test]
    fn test_invalid_isbn13_detected() {
        assert_eq!(find_invalid_isbns("ISBN: 978-0-306-40615-8").len(), 1);
    }

    #[test]
    fn test_too_short_candidate_flagged() {
        assert_eq!(find_invalid_isbns("isbn: 123-456").len(), 1);
    }

    #[test]
    fn test_too_long_candidate_flagged() {
        assert_eq!(find_invalid_isbns("isbn: 12345678901234").len(), 1);
    }

    #[test]
    fn test_multiple_isbns() {
        let valid = "First book: ISBN: 0-306-40615-2\nSecond book: ISBN: 978-0-306-40615-7";
        assert!(find_invalid_isbns(valid).is_empty());

        let one_bad = "Valid: ISBN: 0-306-40615-2\nInvalid: ISBN: 978-0-306-40615-8";
        assert_eq!(find_invalid_isbns(one_bad).len(), 1);

        let both_bad = "Invalid 1: ISBN: 0-306-40615-3\nInvalid 2: ISBN: 978-0-306-40615-8";
        assert_eq!(find_invalid_isbns(both_bad).len(), 2);
    }

    #[test]
    fn test_wikipedia_citation_format() {
        let valid = "{{cite book |last=Smith |first=John |title=Example Book\n\
                     |publisher=Example Press |year=2020 |isbn=978-0-306-40615-7}}";
        assert!(find_invalid_isbns(valid).is_empty());

        let bad = "{{cite book |title=Fake Book |year=2020 |isbn=978-0-306-40615-8}}";
        assert_eq!(find_invalid_isbns(bad).len(), 1);
    }

    #[test]
    fn test_trailing_year_not_absorbed() {
        assert!(find_invalid_isbns("isbn: 978 0 306 40615 7 2020").is_empty());
        assert!(find_invalid_isbns("isbn: 0306406152 2020").is_empty());
    }

    #[test]
    fn test_spaces_around_hyphens() {
        assert!(find_invalid_isbns("isbn: 978 - 0 - 306 - 40615 - 7").is_empty());
    }

    #[test]
    fn test_trailing_punctuation_terminates_candidate() {
        assert!(find_invalid_isbns("isbn: 9780306406157, 2020").is_empty());
        assert!(find_invalid_isbns("isbn: 0-306-40615-2.").is_empty());
        assert!(find_invalid_isbns("isbn: 978-0-306-40615-7; another book").is_empty());
        assert_eq!(find_invalid_isbns("isbn: 9780306406158, 2020").len(), 1);
    }

    #[test]
    fn test_no_separator_at_all() {
        assert!(find_invalid_isbns("ISBN0306406152").is_empty());
        assert!(find_invalid_isbns("isbn9780306406157").is_empty());

        let invalid = find_invalid_isbns("Cited as ISBN0306406153 in print");
        assert_eq!(invalid.len(), 1);
        assert_eq!(invalid[0], "0306406153");
    }

    #[test]
    fn test_label_inside_word_ignored() {
        // A letter glued to the label means it is not a label
        assert!(find_invalid_isbns("All the ISBNs1234567890 here").is_empty());
        assert!(find_invalid_isbns("the autoisbn 123456 tool").is_empty());
    }
}
