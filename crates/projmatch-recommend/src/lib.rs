use thiserror::Error;

pub mod tfidf;

pub use tfidf::TfidfModel;

use projmatch_core::TokenizedRecord;

/// Default number of recommendations returned.
pub const DEFAULT_TOP_N: usize = 10;

/// Queries must carry more words than this to produce a meaningful ranking.
pub const DEFAULT_MIN_QUERY_WORDS: usize = 15;

#[derive(Error, Debug)]
pub enum RecommendError {
    #[error("query too short: {words} words, need more than {min}")]
    QueryTooShort { words: usize, min: usize },
    #[error("corpus has no tokenized records")]
    EmptyCorpus,
    #[error("no query tokens survived preprocessing")]
    EmptyQuery,
}

/// One ranked match with the metadata shown to the user.
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub title: String,
    pub theme: String,
    pub supervisors: String,
    pub score: f64,
}

/// Score a free-text query against a tokenized corpus and return the top-N.
///
/// The query is preprocessed with the same pipeline as the corpus, each
/// token scored by cosine similarity, and per-document scores summed and
/// ranked. Zero-score documents are dropped, so fewer than `top_n` results
/// is normal and not an error.
pub fn recommend(
    query: &str,
    corpus: &[TokenizedRecord],
    top_n: usize,
    min_query_words: usize,
) -> Result<Vec<Recommendation>, RecommendError> {
    let words = query.split_whitespace().count();
    if words <= min_query_words {
        return Err(RecommendError::QueryTooShort {
            words,
            min: min_query_words,
        });
    }
    if corpus.is_empty() {
        return Err(RecommendError::EmptyCorpus);
    }

    let docs: Vec<Vec<String>> = corpus
        .iter()
        .map(|r| r.tokens.split_whitespace().map(String::from).collect())
        .collect();
    let model = TfidfModel::fit(&docs);

    let query_tokens = projmatch_text::preprocess(query);
    if query_tokens.is_empty() {
        return Err(RecommendError::EmptyQuery);
    }
    tracing::debug!(tokens = query_tokens.len(), "scoring query");

    let scores = model.score_query(&query_tokens);

    let mut ranked: Vec<(usize, f64)> = scores
        .into_iter()
        .enumerate()
        .filter(|&(_, s)| s > 0.0)
        .collect();
    // highest score first; corpus order breaks ties
    ranked.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.0.cmp(&b.0))
    });
    ranked.truncate(top_n);

    Ok(ranked
        .into_iter()
        .map(|(idx, score)| {
            let r = &corpus[idx];
            Recommendation {
                title: r.title.clone(),
                theme: r.theme.clone(),
                supervisors: r.supervisors.clone(),
                score,
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn long_query(topic: &str) -> String {
        format!(
            "I am a student and I would really like to work on {} because it interests me greatly",
            topic
        )
    }

    fn record(title: &str, theme: &str, tokens: &str) -> TokenizedRecord {
        TokenizedRecord {
            title: title.to_string(),
            theme: theme.to_string(),
            supervisors: "Dr X".to_string(),
            description: String::new(),
            tokens: tokens.to_string(),
        }
    }

    fn corpus() -> Vec<TokenizedRecord> {
        vec![
            record(
                "A1 Immune atlas",
                "Immunology",
                "immune cell gut atlas profile",
            ),
            record(
                "A2 Epidemic models",
                "Mathematical biology",
                "epidemic model pandemic dynamic spread",
            ),
            record("A3 Protein folding", "Biophysics", "protein fold structure"),
        ]
    }

    #[test]
    fn test_query_too_short_rejected() {
        let err = recommend("biology projects please", &corpus(), 5, DEFAULT_MIN_QUERY_WORDS)
            .unwrap_err();
        match err {
            RecommendError::QueryTooShort { words, min } => {
                assert_eq!(words, 3);
                assert_eq!(min, DEFAULT_MIN_QUERY_WORDS);
            }
            other => panic!("expected QueryTooShort, got {other:?}"),
        }
    }

    #[test]
    fn test_sixteen_words_accepted() {
        // strictly-greater-than boundary
        let query = "one two three four five six seven eight nine ten eleven twelve thirteen fourteen fifteen pandemic";
        assert_eq!(query.split_whitespace().count(), 16);
        let results = recommend(query, &corpus(), 5, 15).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "A2 Epidemic models");
    }

    #[test]
    fn test_empty_corpus_rejected() {
        let err = recommend(&long_query("the pandemic"), &[], 5, 15).unwrap_err();
        assert!(matches!(err, RecommendError::EmptyCorpus));
    }

    #[test]
    fn test_topical_match_ranks_first() {
        let results = recommend(
            &long_query("modelling the pandemic and epidemic spread"),
            &corpus(),
            5,
            15,
        )
        .unwrap();
        assert!(!results.is_empty());
        assert_eq!(results[0].title, "A2 Epidemic models");
        assert_eq!(results[0].theme, "Mathematical biology");
        assert!(results[0].score > 0.0);
    }

    #[test]
    fn test_zero_scores_dropped() {
        let results = recommend(
            &long_query("pandemic epidemic spread dynamics"),
            &corpus(),
            5,
            15,
        )
        .unwrap();
        // only the epidemic project matches; the other two never appear
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn test_top_n_truncates() {
        let query = long_query("immune cells, epidemic models and protein structure");
        let all = recommend(&query, &corpus(), 5, 15).unwrap();
        assert!(all.len() >= 2);
        let one = recommend(&query, &corpus(), 1, 15).unwrap();
        assert_eq!(one.len(), 1);
        assert_eq!(one[0].title, all[0].title);
    }

    #[test]
    fn test_scores_descend() {
        let query = long_query("immune cells, epidemic models and protein structure");
        let results = recommend(&query, &corpus(), 5, 15).unwrap();
        for pair in results.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }
}
