//! Query relevance: TF-IDF cosine similarity blended with keyword overlap.

mod keywords;
mod options;
mod scorer;
mod tfidf;
mod tokenize;

pub use keywords::QueryKeywords;
pub use options::RelevanceOptions;
pub use scorer::{QueryScorer, RelevanceScorer};
pub use tfidf::{CorpusIndex, SparseVector};
pub use tokenize::{Tokenizer, ENGLISH_STOP_WORDS};
