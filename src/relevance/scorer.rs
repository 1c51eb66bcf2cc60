//! Query relevance of classified lines.

use super::{CorpusIndex, QueryKeywords, RelevanceOptions, SparseVector};
use crate::error::Result;
use crate::model::{ClassifiedLine, LineScores, Query, ScoredLine};

/// Scores lines against a persona and task query.
#[derive(Debug, Clone, Default)]
pub struct RelevanceScorer {
    options: RelevanceOptions,
}

impl RelevanceScorer {
    /// Create a scorer with the given options.
    pub fn new(options: RelevanceOptions) -> Self {
        Self { options }
    }

    /// The scorer options.
    pub fn options(&self) -> &RelevanceOptions {
        &self.options
    }

    /// Fit a corpus index on every line text plus the query text.
    ///
    /// The query counts as one more document, so its terms take part in
    /// the document frequencies.
    pub fn build_index<'a, I>(&self, lines: I, query: &Query) -> Result<CorpusIndex>
    where
        I: IntoIterator<Item = &'a ClassifiedLine>,
    {
        self.options.validate()?;
        let mut texts: Vec<&str> = lines.into_iter().map(|l| l.text()).collect();
        let query_text = query.text();
        texts.push(&query_text);
        Ok(CorpusIndex::build(&texts, &self.options))
    }

    /// Prepare per-query state against a fitted index.
    pub fn query<'a>(&'a self, index: &'a CorpusIndex, query: &Query) -> QueryScorer<'a> {
        QueryScorer {
            index,
            options: &self.options,
            vector: index.vectorize(&query.text()),
            keywords: QueryKeywords::from_query(query),
        }
    }

    /// Score the lines of every document against `query`.
    ///
    /// One index is fitted over all documents together; the result keeps the
    /// input nesting and order.
    pub fn score_documents(
        &self,
        documents: &[Vec<ClassifiedLine>],
        query: &Query,
    ) -> Result<Vec<Vec<ScoredLine>>> {
        let index = self.build_index(documents.iter().flatten(), query)?;
        let scorer = self.query(&index, query);
        if scorer.keywords().is_empty() {
            log::debug!("Query has no capitalised keywords; keyword scores are zero");
        }
        Ok(documents
            .iter()
            .map(|lines| lines.iter().map(|l| scorer.score_line(l)).collect())
            .collect())
    }
}

/// A query bound to a fitted corpus index.
#[derive(Debug, Clone)]
pub struct QueryScorer<'a> {
    index: &'a CorpusIndex,
    options: &'a RelevanceOptions,
    vector: SparseVector,
    keywords: QueryKeywords,
}

impl QueryScorer<'_> {
    /// Keywords extracted from the query.
    pub fn keywords(&self) -> &QueryKeywords {
        &self.keywords
    }

    /// Scores of one text.
    pub fn score(&self, text: &str) -> LineScores {
        let relevance = self.index.vectorize(text).cosine(&self.vector);
        let keyword = self.keywords.score(text);
        LineScores {
            relevance,
            keyword,
            combined: self.options.relevance_weight * relevance
                + self.options.keyword_weight * keyword,
        }
    }

    /// Attach scores to a classified line.
    pub fn score_line(&self, line: &ClassifiedLine) -> ScoredLine {
        ScoredLine {
            line: line.clone(),
            scores: self.score(line.text()),
        }
    }
}
