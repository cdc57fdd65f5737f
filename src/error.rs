// src/error.rs

use thiserror::Error;

/// Failure kinds the pipeline distinguishes. Per-university failures are
/// contained at the run loop; only discovery, session acquisition, and
/// end-of-run emptiness abort the whole program.
#[derive(Debug, Error)]
pub enum Error {
    #[error("request for {url} failed: {source}")]
    Fetch {
        url: String,
        source: reqwest::Error,
    },

    #[error("response from {url} has no `data` array")]
    MissingData { url: String },

    #[error("state resolution for `{slug}` failed: {reason}")]
    StateResolution { slug: String, reason: String },

    #[error("no rows accumulated for {path}; refusing to write an empty file")]
    EmptyResult { path: String },

    #[error("csv write failed: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Why the page-text heuristic could not produce a state abbreviation.
/// The extraction is positional and template-bound, so each precondition
/// gets its own variant for the caller to report.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractError {
    #[error("page has {0} paragraph(s), need at least 3")]
    TooFewParagraphs(usize),

    #[error("about paragraph has no sentences")]
    NoSentences,

    #[error("first sentence has {0} word token(s), need at least 2")]
    TooFewWords(usize),
}
