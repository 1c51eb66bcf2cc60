//! Word tokenization, stop-word removal and n-gram generation.

use std::collections::HashSet;

use regex::Regex;

/// English stop words removed before n-grams are built.
pub const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "afterwards", "again", "against", "all", "almost",
    "alone", "along", "already", "also", "although", "always", "am", "among", "amongst",
    "amoungst", "amount", "an", "and", "another", "any", "anyhow", "anyone", "anything", "anyway",
    "anywhere", "are", "around", "as", "at", "back", "be", "became", "because", "become",
    "becomes", "becoming", "been", "before", "beforehand", "behind", "being", "below", "beside",
    "besides", "between", "beyond", "bill", "both", "bottom", "but", "by", "call", "can",
    "cannot", "cant", "co", "con", "could", "couldnt", "cry", "de", "describe", "detail", "do",
    "done", "down", "due", "during", "each", "eg", "eight", "either", "eleven", "else",
    "elsewhere", "empty", "enough", "etc", "even", "ever", "every", "everyone", "everything",
    "everywhere", "except", "few", "fifteen", "fifty", "fill", "find", "fire", "first", "five",
    "for", "former", "formerly", "forty", "found", "four", "from", "front", "full", "further",
    "get", "give", "go", "had", "has", "hasnt", "have", "he", "hence", "her", "here",
    "hereafter", "hereby", "herein", "hereupon", "hers", "herself", "him", "himself", "his",
    "how", "however", "hundred", "i", "ie", "if", "in", "inc", "indeed", "interest", "into",
    "is", "it", "its", "itself", "keep", "last", "latter", "latterly", "least", "less", "ltd",
    "made", "many", "may", "me", "meanwhile", "might", "mill", "mine", "more", "moreover",
    "most", "mostly", "move", "much", "must", "my", "myself", "name", "namely", "neither",
    "never", "nevertheless", "next", "nine", "no", "nobody", "none", "noone", "nor", "not",
    "nothing", "now", "nowhere", "of", "off", "often", "on", "once", "one", "only", "onto",
    "or", "other", "others", "otherwise", "our", "ours", "ourselves", "out", "over", "own",
    "part", "per", "perhaps", "please", "put", "rather", "re", "same", "see", "seem", "seemed",
    "seeming", "seems", "serious", "several", "she", "should", "show", "side", "since",
    "sincere", "six", "sixty", "so", "some", "somehow", "someone", "something", "sometime",
    "sometimes", "somewhere", "still", "such", "system", "take", "ten", "than", "that", "the",
    "their", "them", "themselves", "then", "thence", "there", "thereafter", "thereby",
    "therefore", "therein", "thereupon", "these", "they", "thick", "thin", "third", "this",
    "those", "though", "three", "through", "throughout", "thru", "thus", "to", "together",
    "too", "top", "toward", "towards", "twelve", "twenty", "two", "un", "under", "until", "up",
    "upon", "us", "very", "via", "was", "we", "well", "were", "what", "whatever", "when",
    "whence", "whenever", "where", "whereafter", "whereas", "whereby", "wherein", "whereupon",
    "wherever", "whether", "which", "while", "whither", "who", "whoever", "whole", "whom",
    "whose", "why", "will", "with", "within", "without", "would", "yet", "you", "your",
    "yours", "yourself", "yourselves",
];

/// Splits text into lowercase terms.
///
/// Words are runs of two or more word characters. With stop words enabled,
/// stop words are removed first and n-grams are formed from the remaining
/// words, so "plan a trip" yields the bigram "plan trip".
#[derive(Debug, Clone)]
pub struct Tokenizer {
    word: Regex,
    stop_words: HashSet<&'static str>,
    max_ngram: usize,
}

impl Tokenizer {
    /// Create a tokenizer producing 1..=`max_ngram` grams.
    pub fn new(max_ngram: usize, stop_words: bool) -> Self {
        Self {
            word: Regex::new(r"(?u)\b\w\w+\b").unwrap(),
            stop_words: if stop_words {
                ENGLISH_STOP_WORDS.iter().copied().collect()
            } else {
                HashSet::new()
            },
            max_ngram: max_ngram.max(1),
        }
    }

    /// Lowercase words with stop words removed.
    pub fn words(&self, text: &str) -> Vec<String> {
        let lower = text.to_lowercase();
        self.word
            .find_iter(&lower)
            .map(|m| m.as_str())
            .filter(|w| !self.stop_words.contains(w))
            .map(str::to_string)
            .collect()
    }

    /// All terms of `text`: unigrams first, then longer n-grams.
    pub fn terms(&self, text: &str) -> Vec<String> {
        let words = self.words(text);
        let mut terms = words.clone();
        for n in 2..=self.max_ngram {
            if words.len() < n {
                break;
            }
            terms.extend(words.windows(n).map(|w| w.join(" ")));
        }
        terms
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(2, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_words_drop_short_and_stop_words() {
        let tokenizer = Tokenizer::default();
        assert_eq!(
            tokenizer.words("Plan a 4-day trip for the Group"),
            vec!["plan", "day", "trip", "group"]
        );
    }

    #[test]
    fn test_bigrams_skip_stop_words() {
        let tokenizer = Tokenizer::default();
        assert_eq!(
            tokenizer.terms("Plan a trip"),
            vec!["plan", "trip", "plan trip"]
        );
    }

    #[test]
    fn test_without_stop_words() {
        let tokenizer = Tokenizer::new(1, false);
        assert_eq!(tokenizer.terms("The Trip"), vec!["the", "trip"]);
    }

    #[test]
    fn test_unicode_words() {
        let tokenizer = Tokenizer::new(1, true);
        assert_eq!(tokenizer.terms("Café Führer"), vec!["café", "führer"]);
    }
}
