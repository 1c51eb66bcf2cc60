//! Salient query terms: capitalised phrases and acronyms.

use std::collections::BTreeSet;

use regex::Regex;

use crate::model::Query;

/// Deduplicated keywords extracted from a query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryKeywords {
    keywords: BTreeSet<String>,
}

impl QueryKeywords {
    /// Extract keywords from the persona and task separately.
    pub fn from_query(query: &Query) -> Self {
        let phrase = Regex::new(r"\b[A-Z][a-z]+(?:\s+[A-Z][a-z]+)*\b").unwrap();
        let acronym = Regex::new(r"\b[A-Z]{2,}\b").unwrap();

        let mut keywords = BTreeSet::new();
        for text in [&query.persona, &query.task] {
            for m in phrase.find_iter(text).chain(acronym.find_iter(text)) {
                keywords.insert(m.as_str().to_string());
            }
        }
        Self { keywords }
    }

    /// Build from explicit keywords.
    pub fn from_terms<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keywords: terms.into_iter().map(Into::into).collect(),
        }
    }

    /// The keywords in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keywords.iter().map(String::as_str)
    }

    /// Number of distinct keywords.
    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    /// Check if no keywords were found.
    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    /// Share of keywords occurring in `text`, case-insensitively.
    ///
    /// Returns 0 when there are no keywords.
    pub fn score(&self, text: &str) -> f64 {
        if self.keywords.is_empty() {
            return 0.0;
        }
        let lower = text.to_lowercase();
        let matched = self
            .keywords
            .iter()
            .filter(|k| lower.contains(&k.to_lowercase()))
            .count();
        matched as f64 / self.keywords.len() as f64
    }
}
