use std::collections::HashSet;

use once_cell::sync::Lazy;

/// The standard English stopword list used for both corpus and queries.
static STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "your", "yours",
        "yourself", "yourselves", "he", "him", "his", "himself", "she", "her", "hers", "herself",
        "it", "its", "itself", "they", "them", "their", "theirs", "themselves", "what", "which",
        "who", "whom", "this", "that", "these", "those", "am", "is", "are", "was", "were", "be",
        "been", "being", "have", "has", "had", "having", "do", "does", "did", "doing", "a", "an",
        "the", "and", "but", "if", "or", "because", "as", "until", "while", "of", "at", "by",
        "for", "with", "about", "against", "between", "into", "through", "during", "before",
        "after", "above", "below", "to", "from", "up", "down", "in", "out", "on", "off", "over",
        "under", "again", "further", "then", "once", "here", "there", "when", "where", "why",
        "how", "all", "any", "both", "each", "few", "more", "most", "other", "some", "such", "no",
        "nor", "not", "only", "own", "same", "so", "than", "too", "very", "s", "t", "can", "will",
        "just", "don", "should", "now", "would", "could", "ought", "im", "ive", "isn", "arent",
        "wasn", "weren", "hasn", "haven", "hadn", "doesn", "didn", "wont", "shan", "shouldn",
        "wouldn", "couldn", "mustn", "let", "also", "may", "might", "must", "shall",
    ]
    .into_iter()
    .collect()
});

/// True when `word` is an English stopword.
pub fn is_stopword(word: &str) -> bool {
    STOPWORDS.contains(word)
}
