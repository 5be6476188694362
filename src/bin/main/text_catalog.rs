//! File-backed document collaborator: paginates and tokenizes a UTF-8
//! text file into the bundle shape the engine expects.

use std::convert::Infallible;
use std::io;
use std::path::Path;

use tracing::debug;
use veloread_core::document::{DocumentId, ProcessingStatus, TokenBundle};
use veloread_core::grouping::{build_weighted_tokens, group_with_pages, repair_hyphenation};
use veloread_core::source::DocumentProvider;

/// Page break fallback for files without form feeds.
const LINES_PER_PAGE: usize = 40;

const FORM_FEED: char = '\u{c}';

/// Provider over a file that was fully ingested at open time; status
/// is therefore always `Completed`.
pub struct TextFileProvider {
    bundle: TokenBundle,
}

impl TextFileProvider {
    pub fn open(path: &Path) -> io::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let bundle = bundle_from_text(&text);
        debug!(
            "ingested {} tokens across {} pages",
            bundle.tokens.len(),
            bundle.page_count
        );
        Ok(Self { bundle })
    }
}

impl DocumentProvider for TextFileProvider {
    type Error = Infallible;

    fn poll_status(&mut self, _id: &DocumentId) -> Result<ProcessingStatus, Self::Error> {
        Ok(ProcessingStatus::Completed)
    }

    fn fetch_bundle(&mut self, _id: &DocumentId) -> Result<Option<TokenBundle>, Self::Error> {
        Ok(Some(self.bundle.clone()))
    }
}

fn bundle_from_text(text: &str) -> TokenBundle {
    let mut words: Vec<String> = Vec::new();
    let mut pages: Vec<u32> = Vec::new();
    let mut page_count = 0u32;

    for (index, page_text) in page_texts(text).iter().enumerate() {
        let page = index as u32 + 1;
        page_count = page;
        for word in page_text.split_whitespace() {
            words.push(String::from(word));
            pages.push(page);
        }
    }

    let (words, pages) = repair_hyphenation(&words, &pages);
    let (tokens, pages) = group_with_pages(&words, &pages);
    let (tokens, pages, weights) = build_weighted_tokens(&tokens, &pages);

    TokenBundle {
        tokens,
        pages,
        page_count,
        weights: Some(weights),
    }
}

/// Split on form feeds when present, otherwise into fixed-size line
/// chunks so page navigation still has something to aim at.
fn page_texts(text: &str) -> Vec<String> {
    if text.contains(FORM_FEED) {
        return text.split(FORM_FEED).map(String::from).collect();
    }

    let lines: Vec<&str> = text.lines().collect();
    lines
        .chunks(LINES_PER_PAGE)
        .map(|chunk| chunk.join("\n"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_feed_splits_pages() {
        let bundle = bundle_from_text("alpha beta.\u{c}gamma");
        assert_eq!(bundle.page_count, 2);
        assert_eq!(bundle.pages.last(), Some(&2));
    }

    #[test]
    fn tokens_carry_weights() {
        let bundle = bundle_from_text("I go home");
        let weights = bundle.weights.expect("ingestion always builds weights");
        assert_eq!(bundle.tokens.len(), weights.len());
    }

    #[test]
    fn empty_file_yields_empty_bundle() {
        let bundle = bundle_from_text("");
        assert!(bundle.tokens.is_empty());
        assert_eq!(bundle.page_count, 0);
    }
}
