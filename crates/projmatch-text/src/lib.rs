pub mod stem;
pub mod stopwords;

pub use stem::stem;
pub use stopwords::is_stopword;

use projmatch_core::{CleanReport, ProjectRecord, TokenizedRecord, clean_records};

/// Contraction endings expanded before tokenization so the replacements
/// survive the alphabetic filter.
const CONTRACTIONS: [(&str, &str); 7] = [
    ("n't", " not"),
    ("'m", " am"),
    ("'s", " is"),
    ("'re", " are"),
    ("'ll", " will"),
    ("'ve", " have"),
    ("'d", " would"),
];

/// Expand common English contractions. Expects lowercased input.
pub fn expand_contractions(text: &str) -> String {
    let mut out = text.to_string();
    for (pattern, replacement) in CONTRACTIONS {
        out = out.replace(pattern, replacement);
    }
    out
}

/// Normalize a text into retrieval tokens.
///
/// Lowercase, expand contractions, split on non-alphabetic characters, drop
/// stopwords, and stem what remains. The identical routine runs over corpus
/// descriptions and live queries so their token forms agree.
pub fn preprocess(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    let expanded = expand_contractions(&lowered);

    expanded
        .split(|c: char| !c.is_ascii_alphabetic())
        .filter(|t| !t.is_empty())
        .map(stem)
        .filter(|t| !is_stopword(t))
        .collect()
}

/// Space-joined form of [`preprocess`], as stored in the tokenized CSV.
pub fn preprocess_joined(text: &str) -> String {
    preprocess(text).join(" ")
}

/// Clean a batch of records and tokenize every description.
///
/// Cleaning runs first so filled-in descriptions (title fallback) get
/// tokenized like any other.
pub fn tokenize_records(mut records: Vec<ProjectRecord>) -> (Vec<TokenizedRecord>, CleanReport) {
    let report = clean_records(&mut records);
    let tokenized = records
        .into_iter()
        .map(|record| {
            let tokens = preprocess_joined(&record.description);
            TokenizedRecord::from_record(record, tokens)
        })
        .collect::<Vec<_>>();
    tracing::debug!(records = tokenized.len(), "tokenized record batch");
    (tokenized, report)
}
