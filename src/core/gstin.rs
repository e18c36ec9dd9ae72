//! GSTIN structural format validation.
//!
//! A GSTIN is a 15-character registration identifier: a 2-digit state code,
//! the 10-character PAN of the taxpayer (5 letters, 4 digits, 1 letter), an
//! entity digit, the fixed letter 'Z', and a trailing checksum character.
//! No network lookup is performed — this is format validation only.

/// Required GSTIN length.
pub const GSTIN_LEN: usize = 15;

/// Check a 15-character GSTIN against the structural pattern
/// `[0-9]{2}[A-Z]{5}[0-9]{4}[A-Z][0-9A-Z]Z[0-9A-Z]`.
///
/// Expects a normalized (trimmed, upper-cased) value.
pub fn is_well_formed(gstin: &str) -> bool {
    segment_failure(gstin).is_none()
}

/// Which structural segment a malformed GSTIN fails on, for issue payloads.
/// `None` means the value is well-formed.
pub fn segment_failure(gstin: &str) -> Option<&'static str> {
    let b = gstin.as_bytes();
    if b.len() != GSTIN_LEN {
        return Some("must be exactly 15 characters");
    }
    if !b[0..2].iter().all(u8::is_ascii_digit) {
        return Some("characters 1-2 must be a 2-digit state code");
    }
    if !b[2..7].iter().all(u8::is_ascii_uppercase) {
        return Some("characters 3-7 must be the 5 PAN letters");
    }
    if !b[7..11].iter().all(u8::is_ascii_digit) {
        return Some("characters 8-11 must be the 4 PAN digits");
    }
    if !b[11].is_ascii_uppercase() {
        return Some("character 12 must be the PAN check letter");
    }
    if !b[12].is_ascii_alphanumeric() {
        return Some("character 13 must be the entity code");
    }
    if b[13] != b'Z' {
        return Some("character 14 must be the letter 'Z'");
    }
    if !b[14].is_ascii_alphanumeric() {
        return Some("character 15 must be the checksum character");
    }
    None
}

/// Extract the 2-digit state-code prefix, if the value is long enough and
/// the prefix is numeric.
pub fn state_code(gstin: &str) -> Option<&str> {
    let prefix = gstin.get(0..2)?;
    prefix
        .bytes()
        .all(|b| b.is_ascii_digit())
        .then_some(prefix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_formed_gstin() {
        assert!(is_well_formed("27AAPFU0939F1ZV"));
        assert!(is_well_formed("29AABCU9603R1ZJ"));
        assert!(is_well_formed("07AABCS1234A1Z5"));
    }

    #[test]
    fn wrong_length() {
        assert_eq!(
            segment_failure("27AAPFU0939F1Z"),
            Some("must be exactly 15 characters")
        );
        assert!(!is_well_formed(""));
        assert!(!is_well_formed("27AAPFU0939F1ZVX"));
    }

    #[test]
    fn segment_failures() {
        // state code not numeric
        assert!(segment_failure("XXAAPFU0939F1ZV").is_some());
        // PAN letters missing
        assert!(segment_failure("27123FU0939F1ZV").is_some());
        // 14th character must be 'Z'
        assert_eq!(
            segment_failure("27AAPFU0939F1AV"),
            Some("character 14 must be the letter 'Z'")
        );
        // lowercase is not accepted — normalize first
        assert!(!is_well_formed("27aapfu0939f1zv"));
    }

    #[test]
    fn state_code_extraction() {
        assert_eq!(state_code("27AAPFU0939F1ZV"), Some("27"));
        assert_eq!(state_code("2"), None);
        assert_eq!(state_code("XXAAPFU0939F1ZV"), None);
        assert_eq!(state_code(""), None);
    }
}
