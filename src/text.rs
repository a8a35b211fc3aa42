//! Posting text normalisation: text lists, tokens and word counts.

use std::collections::{BTreeSet, HashMap};
use std::sync::OnceLock;

use regex::Regex;

use crate::data::loader::PostingStore;

/// English stopwords applied to every word cloud in addition to the
/// user's `stopwords.csv`.
pub const STOPWORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and",
    "any", "are", "aren't", "as", "at", "be", "because", "been", "before", "being", "below",
    "between", "both", "but", "by", "can", "can't", "cannot", "com", "could", "couldn't",
    "did", "didn't", "do", "does", "doesn't", "doing", "don't", "down", "during", "each",
    "else", "ever", "few", "for", "from", "further", "get", "had", "hadn't", "has", "hasn't",
    "have", "haven't", "having", "he", "her", "here", "hers", "herself", "him", "himself",
    "his", "how", "however", "http", "i", "if", "in", "into", "is", "isn't", "it", "it's",
    "its", "itself", "just", "k", "let's", "like", "me", "more", "most", "mustn't", "my",
    "myself", "no", "nor", "not", "of", "off", "on", "once", "only", "or", "other", "otherwise",
    "ought", "our", "ours", "ourselves", "out", "over", "own", "same", "shall", "shan't",
    "she", "should", "shouldn't", "since", "so", "some", "such", "than", "that", "that's",
    "the", "their", "theirs", "them", "themselves", "then", "there", "there's", "therefore",
    "these", "they", "this", "those", "through", "to", "too", "under", "until", "up", "very",
    "was", "wasn't", "we", "were", "weren't", "what", "when", "where", "which", "while", "who",
    "whom", "why", "with", "won't", "would", "wouldn't", "www", "you", "your", "yours",
    "yourself", "yourselves",
];

/// Runs of letters, digits, `+` and `#` (`c++`, `c#`).
const TOKEN_PATTERN: &str = r"[\p{Alphabetic}\p{N}+#]+";

static TOKEN_RE: OnceLock<Regex> = OnceLock::new();

fn token_re() -> &'static Regex {
    TOKEN_RE.get_or_init(|| Regex::new(TOKEN_PATTERN).unwrap_or_else(|e| panic!("bad token pattern: {e}")))
}

/// Texts of postings `"0"` .. `"first_n - 1"`; missing indices are skipped.
pub fn make_text_list(store: &PostingStore, first_n: usize) -> Vec<String> {
    (0..first_n)
        .filter_map(|i| store.get(&i.to_string()).cloned())
        .collect()
}

/// Split one text into normalised tokens.
///
/// Lower-cases, keeps runs matching `TOKEN_PATTERN`, strips leading
/// hashtags, and drops pure numbers and single characters other than
/// `r` and `c`.
pub fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    token_re()
        .find_iter(text)
        .map(|m| m.as_str().trim_start_matches('#').to_lowercase())
        .filter(|tok| tok.chars().count() >= 2 || tok == "r" || tok == "c")
        .filter(|tok| !tok.chars().all(|c| c.is_ascii_digit()))
}

/// Flat token list over all texts.
pub fn tokenize_list(texts: &[String]) -> Vec<String> {
    texts.iter().flat_map(|t| tokenize(t)).collect()
}

/// All tokens joined by single spaces, the word-cloud input.
pub fn tokenize_joined(texts: &[String]) -> String {
    tokenize_list(texts).join(" ")
}

/// Built-in stopwords merged with extra ones, lower-cased.
pub fn stopword_set(extra: &[String]) -> BTreeSet<String> {
    STOPWORDS
        .iter()
        .map(|s| s.to_string())
        .chain(extra.iter().map(|s| s.trim().to_lowercase()))
        .collect()
}

/// Word counts of `text` without stopwords, most frequent first.
///
/// Ties are broken alphabetically so the order is deterministic.
pub fn word_frequencies(text: &str, stopwords: &BTreeSet<String>) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for word in text.split_whitespace() {
        if !stopwords.contains(word) {
            *counts.entry(word).or_default() += 1;
        }
    }
    let mut freqs: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(w, n)| (w.to_string(), n))
        .collect();
    freqs.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    freqs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_list_takes_the_first_n_indices() {
        let store: PostingStore = [("0", "first"), ("1", "second"), ("3", "fourth")]
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        assert_eq!(make_text_list(&store, 2), ["first", "second"]);
        assert_eq!(make_text_list(&store, 4), ["first", "second", "fourth"]);
        assert!(make_text_list(&store, 0).is_empty());
    }

    #[test]
    fn tokenizer_keeps_language_names() {
        let tokens: Vec<String> = tokenize("Strong C++, C# and R skills; 5+ years of SQL.").collect();
        assert_eq!(tokens, ["strong", "c++", "c#", "and", "r", "skills", "5+", "years", "of", "sql"]);
    }

    #[test]
    fn tokenizer_drops_numbers_hashtags_and_single_letters() {
        let tokens: Vec<String> =
            tokenize("#Hiring a Data Engineer (2024), x-ray & Café culture: 100% remote!").collect();
        assert_eq!(tokens, ["hiring", "data", "engineer", "ray", "café", "culture", "remote"]);
    }

    #[test]
    fn tokens_keep_stopwords_until_counting() {
        let texts = vec!["The team uses Python".to_string(), "python and the cloud".to_string()];
        let tokens = tokenize_list(&texts);
        assert!(tokens.contains(&"the".to_string()));

        let joined = tokenize_joined(&texts);
        assert_eq!(joined, "the team uses python python and the cloud");

        let stop = stopword_set(&["Team".to_string()]);
        let freqs = word_frequencies(&joined, &stop);
        assert_eq!(
            freqs,
            [
                ("python".to_string(), 2),
                ("cloud".to_string(), 1),
                ("uses".to_string(), 1)
            ]
        );
    }
}
