// src/profile.rs

use fantoccini::Client;
use scraper::{Html, Selector};
use tracing::debug;
use unicode_segmentation::UnicodeSegmentation;

use crate::error::{Error, ExtractError};
use crate::fetch::urls;

/// Load the rendered profile page for `slug` in the shared browser session
/// and pull the state abbreviation out of its about text. Best-effort: the
/// extraction leans on the page template's paragraph order, so callers must
/// be prepared for failures on any template change.
pub async fn resolve_state(browser: &mut Client, slug: &str) -> Result<String, Error> {
    let url = urls::profile_url(slug);
    let failed = |reason: String| Error::StateResolution {
        slug: slug.to_string(),
        reason,
    };

    browser
        .goto(&url)
        .await
        .map_err(|e| failed(e.to_string()))?;
    let html = browser.source().await.map_err(|e| failed(e.to_string()))?;

    let state = extract_state(&html).map_err(|e| failed(e.to_string()))?;
    debug!(slug, %state, "resolved state");
    Ok(state)
}

/// Positional heuristic over rendered markup: the third paragraph holds the
/// about text, its first sentence ends with the state abbreviation, and the
/// token before the terminating period is that abbreviation.
pub fn extract_state(html: &str) -> Result<String, ExtractError> {
    let document = Html::parse_document(html);
    let paragraph = Selector::parse("p").expect("`p` should be a valid selector");

    let paragraphs: Vec<_> = document.select(&paragraph).collect();
    if paragraphs.len() < 3 {
        return Err(ExtractError::TooFewParagraphs(paragraphs.len()));
    }

    let about = paragraphs[2].text().collect::<String>();
    let first_sentence = about
        .trim()
        .unicode_sentences()
        .next()
        .ok_or(ExtractError::NoSentences)?;

    let tokens: Vec<&str> = first_sentence
        .split_word_bounds()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect();

    // Punctuation counts as a token (the trailing period is what puts the
    // abbreviation at second-to-last), but a sentence needs at least two
    // real words before indexing is meaningful.
    let words = tokens
        .iter()
        .filter(|t| t.chars().any(char::is_alphanumeric))
        .count();
    if words < 2 {
        return Err(ExtractError::TooFewWords(words));
    }

    Ok(tokens[tokens.len() - 2].to_string())
}
