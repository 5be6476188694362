//! Token sequences and the data types shared with collaborators.

use alloc::string::String;
use alloc::vec::Vec;

use crate::lexical;

/// Opaque identifier assigned by the document-processing collaborator.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DocumentId(String);

impl DocumentId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Processing state reported for a submitted document.
///
/// `Failed` is terminal but inert: the engine keeps observing and
/// simply never receives tokens for such a document.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ProcessingStatus {
    Processing,
    Completed,
    Failed,
}

/// Catalog metadata supplied when a document is (re)selected, used to
/// seed the resume position.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct DocumentMeta {
    /// Coarse page-level resume point (1-based, 0 treated as 1).
    pub last_read_page: u32,
    /// Precise token-level checkpoint; 0 means "none recorded".
    pub last_token_index: usize,
}

/// Payload delivered by the processing collaborator once a document
/// completes.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TokenBundle {
    pub tokens: Vec<String>,
    /// 1-based page per token, monotonically non-decreasing.
    pub pages: Vec<u32>,
    pub page_count: u32,
    /// Word-count weight per token; absent entries default to the
    /// token's own word count.
    pub weights: Option<Vec<u32>>,
}

/// Immutable token sequence with its page and weight maps, valid for
/// the lifetime of one reading session.
#[derive(Clone, Debug)]
pub struct Document {
    tokens: Vec<String>,
    pages: Vec<u32>,
    weights: Vec<u32>,
    page_count: u32,
}

impl Document {
    /// Builds a document from a collaborator bundle, repairing length
    /// mismatches instead of rejecting them: a short page map extends
    /// with its last value and a missing or mismatched weight map is
    /// replaced with per-token word counts.
    pub fn from_bundle(bundle: TokenBundle) -> Self {
        let TokenBundle {
            tokens,
            mut pages,
            page_count,
            weights,
        } = bundle;

        let n = tokens.len();
        if pages.len() != n {
            let fill = pages.last().copied().unwrap_or(1);
            pages.resize(n, fill);
        }

        let weights = match weights {
            Some(weights) if weights.len() == n => weights,
            _ => tokens
                .iter()
                .map(|token| lexical::word_count(token).max(1) as u32)
                .collect(),
        };

        let page_count = page_count.max(pages.last().copied().unwrap_or(0));

        Self {
            tokens,
            pages,
            weights,
            page_count,
        }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn token(&self, index: usize) -> Option<&str> {
        self.tokens.get(index).map(String::as_str)
    }

    /// Page of the token at `index`, defaulting to 1 out of range.
    pub fn page_at(&self, index: usize) -> u32 {
        self.pages.get(index).copied().unwrap_or(1).max(1)
    }

    /// Pacing weight of the token at `index`, never below 1.
    pub fn weight_at(&self, index: usize) -> u32 {
        self.weights.get(index).copied().unwrap_or(1).max(1)
    }

    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    /// First token index whose page is at or past `page`.
    pub fn first_index_at_page(&self, page: u32) -> Option<usize> {
        self.pages.iter().position(|&p| p >= page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn bundle(tokens: &[&str], pages: &[u32]) -> TokenBundle {
        TokenBundle {
            tokens: tokens.iter().map(|t| String::from(*t)).collect(),
            pages: pages.to_vec(),
            page_count: pages.last().copied().unwrap_or(0),
            weights: None,
        }
    }

    #[test]
    fn missing_weights_default_to_word_counts() {
        let doc = Document::from_bundle(bundle(&["I go", "home"], &[1, 1]));
        assert_eq!(doc.weight_at(0), 2);
        assert_eq!(doc.weight_at(1), 1);
    }

    #[test]
    fn short_page_map_is_extended() {
        let doc = Document::from_bundle(bundle(&["a", "b", "c"], &[1, 2]));
        assert_eq!(doc.page_at(2), 2);
        assert_eq!(doc.page_count(), 2);
    }

    #[test]
    fn mismatched_weight_map_is_replaced() {
        let mut raw = bundle(&["one two", "three"], &[1, 1]);
        raw.weights = Some(vec![7]);
        let doc = Document::from_bundle(raw);
        assert_eq!(doc.weight_at(0), 2);
        assert_eq!(doc.weight_at(1), 1);
    }

    #[test]
    fn zero_weight_is_clamped() {
        let mut raw = bundle(&["a", "b"], &[1, 1]);
        raw.weights = Some(vec![0, 3]);
        let doc = Document::from_bundle(raw);
        assert_eq!(doc.weight_at(0), 1);
        assert_eq!(doc.weight_at(1), 3);
    }

    #[test]
    fn first_index_at_page_finds_boundary() {
        let doc = Document::from_bundle(bundle(&["a", "b", "c", "d"], &[1, 1, 2, 3]));
        assert_eq!(doc.first_index_at_page(1), Some(0));
        assert_eq!(doc.first_index_at_page(2), Some(2));
        assert_eq!(doc.first_index_at_page(3), Some(3));
        assert_eq!(doc.first_index_at_page(4), None);
    }

    #[test]
    fn out_of_range_lookups_degrade() {
        let doc = Document::from_bundle(bundle(&[], &[]));
        assert!(doc.is_empty());
        assert_eq!(doc.page_at(5), 1);
        assert_eq!(doc.weight_at(5), 1);
        assert_eq!(doc.first_index_at_page(1), None);
    }
}
