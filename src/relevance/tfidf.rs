//! TF-IDF vector space over a corpus of short texts.

use std::collections::{BTreeMap, HashMap};

use super::{RelevanceOptions, Tokenizer};

/// A sparse, L2-normalised term vector keyed by vocabulary index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    /// Check if the vector has no non-zero weight.
    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cosine similarity with another normalised vector, clamped to `[0, 1]`.
    pub fn cosine(&self, other: &SparseVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut dot = 0.0;
        while i < self.entries.len() && j < other.entries.len() {
            let (a, wa) = self.entries[i];
            let (b, wb) = other.entries[j];
            if a == b {
                dot += wa * wb;
                i += 1;
                j += 1;
            } else if a < b {
                i += 1;
            } else {
                j += 1;
            }
        }
        dot.clamp(0.0, 1.0)
    }
}

/// Vocabulary and inverse document frequencies fitted on one corpus.
///
/// Built once per run and read-only afterwards, so one index can be shared
/// between threads.
#[derive(Debug, Clone)]
pub struct CorpusIndex {
    tokenizer: Tokenizer,
    vocabulary: BTreeMap<String, usize>,
    idf: Vec<f64>,
}

impl CorpusIndex {
    /// Fit the vocabulary and idf weights on `texts`.
    ///
    /// Terms found in more than `max_df` of the documents are dropped, then
    /// the `max_features` most frequent terms are kept (ties alphabetical).
    /// The idf is smoothed: `ln((1 + n) / (1 + df)) + 1`.
    pub fn build<S: AsRef<str>>(texts: &[S], options: &RelevanceOptions) -> Self {
        let tokenizer = Tokenizer::new(options.max_ngram, options.stop_words);
        let n_docs = texts.len();

        let mut df: HashMap<String, usize> = HashMap::new();
        let mut tf: HashMap<String, usize> = HashMap::new();
        for text in texts {
            let terms = tokenizer.terms(text.as_ref());
            let mut seen: Vec<&String> = Vec::new();
            for term in &terms {
                *tf.entry(term.clone()).or_insert(0) += 1;
                if !seen.contains(&term) {
                    seen.push(term);
                }
            }
            for term in seen {
                *df.entry(term.clone()).or_insert(0) += 1;
            }
        }

        let df_limit = options.max_df * n_docs as f64;
        let mut candidates: Vec<(String, usize)> = tf
            .into_iter()
            .filter(|(term, _)| df.get(term).map_or(false, |&d| d as f64 <= df_limit))
            .collect();
        candidates.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        if options.max_features > 0 {
            candidates.truncate(options.max_features);
        }

        let mut terms: Vec<String> = candidates.into_iter().map(|(t, _)| t).collect();
        terms.sort();

        let vocabulary: BTreeMap<String, usize> = terms
            .iter()
            .enumerate()
            .map(|(i, t)| (t.clone(), i))
            .collect();
        let n = n_docs as f64;
        let idf = terms
            .iter()
            .map(|t| {
                let d = df.get(t).copied().unwrap_or(0) as f64;
                ((1.0 + n) / (1.0 + d)).ln() + 1.0
            })
            .collect();

        log::debug!(
            "TF-IDF index: {} documents, {} terms kept of {}",
            n_docs,
            terms.len(),
            df.len()
        );

        Self {
            tokenizer,
            vocabulary,
            idf,
        }
    }

    /// Number of terms in the vocabulary.
    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    /// Check if a term is in the vocabulary.
    pub fn contains(&self, term: &str) -> bool {
        self.vocabulary.contains_key(term)
    }

    /// Weighted, L2-normalised vector of `text`. Unknown terms are ignored.
    pub fn vectorize(&self, text: &str) -> SparseVector {
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for term in self.tokenizer.terms(text) {
            if let Some(&index) = self.vocabulary.get(&term) {
                *counts.entry(index).or_insert(0.0) += 1.0;
            }
        }

        let mut entries: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(i, c)| (i, c * self.idf[i]))
            .collect();
        let norm = entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, w) in entries.iter_mut() {
                *w /= norm;
            }
        } else {
            entries.clear();
        }
        SparseVector { entries }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unigram_options() -> RelevanceOptions {
        RelevanceOptions::new().with_max_ngram(1).with_max_df(1.0)
    }

    #[test]
    fn test_identical_texts_have_unit_similarity() {
        let texts = ["budget hotels", "museum tours", "budget hotels"];
        let index = CorpusIndex::build(&texts, &unigram_options());
        let a = index.vectorize("budget hotels");
        let b = index.vectorize("budget hotels");
        assert!((a.cosine(&b) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_disjoint_texts_score_zero() {
        let texts = ["budget hotels", "museum tours"];
        let index = CorpusIndex::build(&texts, &unigram_options());
        assert_eq!(
            index.vectorize("budget hotels").cosine(&index.vectorize("museum tours")),
            0.0
        );
    }

    #[test]
    fn test_max_df_prunes_ubiquitous_terms() {
        let texts = ["trip budget", "trip museum", "trip beach"];
        let index = CorpusIndex::build(&texts, &RelevanceOptions::new().with_max_ngram(1));
        assert!(!index.contains("trip"));
        assert!(index.contains("budget"));
    }

    #[test]
    fn test_max_features_keeps_most_frequent() {
        let texts = ["alpha alpha beta", "gamma delta", "alpha zeta"];
        let options = unigram_options().with_max_features(1);
        let index = CorpusIndex::build(&texts, &options);
        assert_eq!(index.vocabulary_len(), 1);
        assert!(index.contains("alpha"));
    }

    #[test]
    fn test_bigrams_in_vocabulary() {
        let texts = ["budget hotels", "museum tours"];
        let index = CorpusIndex::build(&texts, &RelevanceOptions::new().with_max_df(1.0));
        assert!(index.contains("budget hotels"));
    }

    #[test]
    fn test_unknown_text_is_zero_vector() {
        let index = CorpusIndex::build(&["budget hotels"], &unigram_options());
        let v = index.vectorize("completely unrelated");
        assert!(v.is_zero());
        assert_eq!(v.cosine(&index.vectorize("budget")), 0.0);
    }

    #[test]
    fn test_empty_corpus() {
        let texts: [&str; 0] = [];
        let index = CorpusIndex::build(&texts, &RelevanceOptions::default());
        assert_eq!(index.vocabulary_len(), 0);
        assert!(index.vectorize("anything").is_zero());
    }
}
