//! Conversion of CCI reference indexes into OSCAL control identifiers.

use std::sync::LazyLock;

use regex::Regex;

/// Base control (`SA-4`) followed by an optional enhancement number (`(7)`).
static CONTROL_INDEX_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([A-Z]+-[0-9]+)\s*(?:\(([0-9]+)\))?").expect("Invalid control index regex")
});

/// Normalize a NIST SP 800-53 citation to an OSCAL control ID.
///
/// `"SA-4 (7) (a)"` becomes `"sa-4.7"` and `"AC-1 a"` becomes `"ac-1"`.
/// Only the first base control and its first enhancement are kept; trailing
/// qualifiers are dropped. The family letters must be upper case. Returns an
/// empty string when no base control is present.
pub fn normalize_control_id(index: &str) -> String {
    let Some(captures) = CONTROL_INDEX_REGEX.captures(index) else {
        return String::new();
    };
    let base = captures[1].to_lowercase();
    match captures.get(2) {
        Some(enhancement) => format!("{base}.{}", enhancement.as_str()),
        None => base,
    }
}
