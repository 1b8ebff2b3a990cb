use once_cell::sync::Lazy;
use regex::Regex;

/// Expand common typographic ligatures found in PDFs.
pub fn expand_ligatures(text: &str) -> String {
    text.replace('\u{FB00}', "ff")
        .replace('\u{FB01}', "fi")
        .replace('\u{FB02}', "fl")
        .replace('\u{FB03}', "ffi")
        .replace('\u{FB04}', "ffl")
        .replace(['\u{FB05}', '\u{FB06}'], "st")
}

/// Collapse whitespace runs and trim. Safe on empty input.
pub fn normalize_ws(text: &str) -> String {
    static WS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
    WS_RE.replace_all(text.trim(), " ").into_owned()
}

/// Fix hyphenation from PDF line breaks.
///
/// `"exam-\nple"` or `"exam- ple"` becomes `"example"`. Hyphens preceded by
/// a digit are kept so model/identifier names like "COVID-19" survive when a
/// break lands after the digits.
pub fn fix_hyphenation(text: &str) -> String {
    static RE: Lazy<Regex> = Lazy::new(|| {
        // word-char, hyphen, whitespace (including newlines), then word chars
        Regex::new(r"(\w)-\s+(\w+)").unwrap()
    });

    RE.replace_all(text, |caps: &regex::Captures| {
        let before = &caps[1];
        let after = &caps[2];
        if before.chars().last().is_some_and(|c| c.is_ascii_digit()) {
            format!("{}-{}", before, after)
        } else {
            format!("{}{}", before, after)
        }
    })
    .into_owned()
}
