use std::collections::{HashMap, HashSet};

/// A TF-IDF model fitted over a tokenized corpus.
///
/// Uses the smoothed idf `ln((1+n)/(1+df)) + 1` and L2-normalized document
/// vectors, so scores match what the usual vectorizer/cosine pairing
/// produces. A single-token query is a unit vector along that token's
/// dimension, which makes per-token cosine similarity a plain lookup into
/// the normalized document vector.
pub struct TfidfModel {
    vocab: HashMap<String, usize>,
    idf: Vec<f64>,
    doc_vectors: Vec<HashMap<usize, f64>>,
}

impl TfidfModel {
    /// Fit vocabulary, document frequencies, and normalized vectors.
    pub fn fit(docs: &[Vec<String>]) -> Self {
        let mut vocab: HashMap<String, usize> = HashMap::new();
        let mut df: Vec<usize> = Vec::new();

        for doc in docs {
            let mut seen: HashSet<usize> = HashSet::new();
            for token in doc {
                let id = match vocab.get(token) {
                    Some(&id) => id,
                    None => {
                        let id = vocab.len();
                        vocab.insert(token.clone(), id);
                        df.push(0);
                        id
                    }
                };
                if seen.insert(id) {
                    df[id] += 1;
                }
            }
        }

        let n = docs.len() as f64;
        let idf: Vec<f64> = df
            .iter()
            .map(|&d| ((1.0 + n) / (1.0 + d as f64)).ln() + 1.0)
            .collect();

        let doc_vectors = docs
            .iter()
            .map(|doc| {
                let mut tf: HashMap<usize, f64> = HashMap::new();
                for token in doc {
                    if let Some(&id) = vocab.get(token) {
                        *tf.entry(id).or_insert(0.0) += 1.0;
                    }
                }
                let mut vec: HashMap<usize, f64> =
                    tf.into_iter().map(|(id, c)| (id, c * idf[id])).collect();
                let norm = vec.values().map(|w| w * w).sum::<f64>().sqrt();
                if norm > 0.0 {
                    for w in vec.values_mut() {
                        *w /= norm;
                    }
                }
                vec
            })
            .collect();

        tracing::debug!(docs = docs.len(), vocab = vocab.len(), "fitted TF-IDF model");

        Self {
            vocab,
            idf,
            doc_vectors,
        }
    }

    pub fn n_docs(&self) -> usize {
        self.doc_vectors.len()
    }

    pub fn vocab_size(&self) -> usize {
        self.vocab.len()
    }

    /// Inverse document frequency of a token, if it is in the vocabulary.
    pub fn idf_of(&self, token: &str) -> Option<f64> {
        self.vocab.get(token).map(|&id| self.idf[id])
    }

    /// Per-document scores for a query: each query token is treated as its
    /// own unit vector, its cosine against every document is taken, and the
    /// per-document values are summed over tokens. Tokens outside the
    /// vocabulary contribute nothing.
    pub fn score_query(&self, query_tokens: &[String]) -> Vec<f64> {
        let mut scores = vec![0.0; self.doc_vectors.len()];
        for token in query_tokens {
            if let Some(&id) = self.vocab.get(token) {
                for (doc_idx, vec) in self.doc_vectors.iter().enumerate() {
                    if let Some(weight) = vec.get(&id) {
                        scores[doc_idx] += weight;
                    }
                }
            }
        }
        scores
    }
}
