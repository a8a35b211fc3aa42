//! Word-cloud profile of one job title from its saved postings.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::data::loader::{PostingStore, load_postings, load_stopwords};
use crate::settings::{Settings, WordCloudSettings};
use crate::text::{make_text_list, stopword_set, tokenize_joined, tokenize_list, word_frequencies};
use crate::wordcloud::{WordCloud, layout};

/// What a profile request returns. Exactly one output per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileRequest {
    /// The posting stored under index `first_n`.
    Posting,
    /// Raw texts of the first `first_n` postings.
    TextList,
    /// Tokens of the first `first_n` postings.
    Tokens,
    /// Word cloud of the first `first_n` postings.
    WordCloud { max_words: usize },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Profile {
    Posting(String),
    TextList(Vec<String>),
    Tokens(Vec<String>),
    WordCloud(WordCloud),
}

/// `"Machine Learning Engineer"` → `machine_learning_engineer`.
pub fn file_stem(title: &str) -> String {
    title.split_whitespace().collect::<Vec<_>>().join("_").to_lowercase()
}

/// Posting store path for a title inside `data_dir`.
pub fn posting_path(data_dir: &Path, title: &str) -> PathBuf {
    data_dir.join(format!("{}.json", file_stem(title)))
}

/// Load the title's posting store and answer `request`.
pub fn plot_profile(
    settings: &Settings,
    title: &str,
    first_n: usize,
    request: ProfileRequest,
) -> Result<Profile> {
    let path = posting_path(&settings.data_dir, title);
    let store = load_postings(&path)?;
    log::info!("Loaded {} postings from {}", store.len(), path.display());

    let stopwords = match request {
        ProfileRequest::WordCloud { .. } => load_stopwords(&settings.stopwords_path())?,
        _ => Vec::new(),
    };
    profile_from_store(settings, title, &store, &stopwords, first_n, request)
}

/// [`plot_profile`] over an already loaded store.
pub fn profile_from_store(
    settings: &Settings,
    title: &str,
    store: &PostingStore,
    extra_stopwords: &[String],
    first_n: usize,
    request: ProfileRequest,
) -> Result<Profile> {
    if request == ProfileRequest::Posting {
        let posting = store
            .get(&first_n.to_string())
            .with_context(|| format!("No posting with index {first_n}"))?;
        return Ok(Profile::Posting(posting.clone()));
    }

    let text_list = make_text_list(store, first_n);
    match request {
        ProfileRequest::Posting | ProfileRequest::TextList => Ok(Profile::TextList(text_list)),
        ProfileRequest::Tokens => Ok(Profile::Tokens(tokenize_list(&text_list))),
        ProfileRequest::WordCloud { max_words } => {
            let text = tokenize_joined(&text_list);
            let stopwords = stopword_set(extra_stopwords);
            let freqs = word_frequencies(&text, &stopwords);
            let params = WordCloudSettings {
                max_words,
                ..settings.wordcloud.clone()
            };
            Ok(Profile::WordCloud(layout(&file_stem(title), &freqs, &params)))
        }
    }
}
