//! Monosyllable grouping and ingestion-side token repairs.
//!
//! Everything here runs once while a document is being ingested; the
//! playback engine only ever sees the finished token sequence.

use alloc::string::String;
use alloc::vec::Vec;

use crate::lexical;

/// Vowel class used by the syllable approximation, including the
/// semivowel `y` and the accented vowels common in Romance languages.
const VOWELS: &str = "aeiouáéíóúâêôãõàüy";

/// Punctuation that closes a pacing segment when it trails a token.
const TRAILING_PUNCTUATION: &str = ",.:;?!…";

fn strip_word_edges(input: &str) -> &str {
    input.trim_matches(|ch: char| !ch.is_alphanumeric())
}

fn is_vowel(ch: char) -> bool {
    ch.to_lowercase().any(|lower| VOWELS.contains(lower))
}

fn is_alpha_word(token: &str) -> bool {
    !token.is_empty() && token.chars().all(char::is_alphabetic)
}

fn has_trailing_punctuation(token: &str) -> bool {
    token
        .trim()
        .chars()
        .last()
        .is_some_and(|ch| TRAILING_PUNCTUATION.contains(ch))
}

fn has_trailing_dot(token: &str) -> bool {
    token.trim().ends_with('.')
}

/// Whether a word reads as a single syllable.
///
/// Approximation: strip punctuation from the edges, then count maximal
/// runs of vowel characters. Anything of two characters or fewer is
/// treated as monosyllabic outright; empty input is not a word at all.
pub fn is_monosyllabic(raw_word: &str) -> bool {
    let word = strip_word_edges(raw_word);
    if word.is_empty() {
        return false;
    }
    if word.chars().count() <= 2 {
        return true;
    }

    let mut runs = 0u32;
    let mut in_run = false;
    for ch in word.chars() {
        if is_vowel(ch) {
            if !in_run {
                runs += 1;
                in_run = true;
            }
        } else {
            in_run = false;
        }
    }
    runs <= 1
}

/// Fuse each monosyllabic word with its successor in one left-to-right
/// pass, reducing flicker on very short words.
///
/// One-shot contract: this is applied exactly once at ingestion and is
/// not idempotent under reapplication.
pub fn group_monosyllables<S: AsRef<str>>(words: &[S]) -> Vec<String> {
    let mut tokens = Vec::with_capacity(words.len());
    let mut i = 0;
    while i < words.len() {
        let current = words[i].as_ref();
        if is_monosyllabic(current) && i + 1 < words.len() {
            tokens.push(fuse(current, words[i + 1].as_ref()));
            i += 2;
        } else {
            tokens.push(String::from(current));
            i += 1;
        }
    }
    tokens
}

/// Repair hyphenation artifacts left by page-oriented text extraction.
///
/// Two shapes are fixed, keeping the page of the first fragment:
/// a trailing-hyphen line break (`desenvolvi-` + `mento`) becomes the
/// joined word, and an isolated `-` between alphabetic words
/// (`e`, `-`, `mail`) becomes a single hyphenated word.
pub fn repair_hyphenation<S: AsRef<str>>(words: &[S], pages: &[u32]) -> (Vec<String>, Vec<u32>) {
    let n = words.len().min(pages.len());
    let mut out_words = Vec::with_capacity(n);
    let mut out_pages = Vec::with_capacity(n);

    let mut i = 0;
    while i < n {
        let current = words[i].as_ref();
        let page = pages[i];

        if current != "-"
            && i + 2 < n
            && words[i + 1].as_ref() == "-"
            && is_alpha_word(words[i + 2].as_ref())
        {
            let tail = words[i + 2].as_ref();
            let mut merged = String::with_capacity(current.len() + 1 + tail.len());
            merged.push_str(current);
            merged.push('-');
            merged.push_str(tail);
            out_words.push(merged);
            out_pages.push(page);
            i += 3;
            continue;
        }

        if let Some(stem) = current.strip_suffix('-')
            && i + 1 < n
            && is_alpha_word(words[i + 1].as_ref())
        {
            let tail = words[i + 1].as_ref();
            let mut merged = String::with_capacity(stem.len() + tail.len());
            merged.push_str(stem);
            merged.push_str(tail);
            out_words.push(merged);
            out_pages.push(page);
            i += 2;
            continue;
        }

        out_words.push(String::from(current));
        out_pages.push(page);
        i += 1;
    }

    (out_words, out_pages)
}

/// Page-propagating grouper used by ingestion: a fused token carries
/// the page of its first word, and fusion is suppressed across
/// sentence boundaries (terminal dot on the current or previous word).
pub fn group_with_pages<S: AsRef<str>>(words: &[S], pages: &[u32]) -> (Vec<String>, Vec<u32>) {
    let n = words.len().min(pages.len());
    let mut tokens = Vec::with_capacity(n);
    let mut token_pages = Vec::with_capacity(n);

    let mut i = 0;
    while i < n {
        let current = words[i].as_ref();
        if is_monosyllabic(current)
            && i + 1 < n
            && !has_trailing_dot(current)
            && !(i > 0 && has_trailing_dot(words[i - 1].as_ref()))
        {
            tokens.push(fuse(current, words[i + 1].as_ref()));
            token_pages.push(pages[i]);
            i += 2;
        } else {
            tokens.push(String::from(current));
            token_pages.push(pages[i]);
            i += 1;
        }
    }

    (tokens, token_pages)
}

/// Final ingestion pass producing `(tokens, pages, weights)`.
///
/// Tokens accumulate in a segment until one of them carries trailing
/// punctuation; the whole segment is then emitted with the page of its
/// first member and per-token word-count weights. An alphabetic
/// monosyllable that itself carries trailing punctuation closes the
/// segment and is emitted alone with weight 1, so a short sentence
/// tail does not get stretched by the fused-word weighting.
pub fn build_weighted_tokens<S: AsRef<str>>(
    words: &[S],
    pages: &[u32],
) -> (Vec<String>, Vec<u32>, Vec<u32>) {
    let n = words.len().min(pages.len());
    let mut tokens: Vec<String> = Vec::with_capacity(n);
    let mut token_pages: Vec<u32> = Vec::with_capacity(n);
    let mut token_weights: Vec<u32> = Vec::with_capacity(n);

    let mut segment: Vec<String> = Vec::new();
    let mut segment_page: Option<u32> = None;

    let mut flush =
        |segment: &mut Vec<String>,
         segment_page: &mut Option<u32>,
         tokens: &mut Vec<String>,
         token_pages: &mut Vec<u32>,
         token_weights: &mut Vec<u32>,
         fallback_page: u32| {
            let page = segment_page.take().unwrap_or(fallback_page);
            for token in segment.drain(..) {
                let weight = lexical::word_count(&token).max(1) as u32;
                tokens.push(token);
                token_pages.push(page);
                token_weights.push(weight);
            }
        };

    let mut i = 0;
    while i < n {
        let current = words[i].as_ref();
        let page = pages[i];
        let stripped = strip_word_edges(current);

        // A punctuated alphabetic monosyllable closes the running
        // segment and counts as a single word regardless of fusion.
        if is_monosyllabic(stripped) && has_trailing_punctuation(current) && is_alpha_word(stripped)
        {
            flush(
                &mut segment,
                &mut segment_page,
                &mut tokens,
                &mut token_pages,
                &mut token_weights,
                page,
            );
            tokens.push(String::from(current));
            token_pages.push(page);
            token_weights.push(1);
            i += 1;
            continue;
        }

        if is_monosyllabic(stripped)
            && i + 1 < n
            && !has_trailing_dot(current)
            && !(i > 0 && has_trailing_dot(words[i - 1].as_ref()))
        {
            let combined = fuse(current, words[i + 1].as_ref());
            segment_page.get_or_insert(page);
            let closes = has_trailing_punctuation(&combined);
            segment.push(combined);
            i += 2;
            if closes {
                flush(
                    &mut segment,
                    &mut segment_page,
                    &mut tokens,
                    &mut token_pages,
                    &mut token_weights,
                    page,
                );
            }
            continue;
        }

        segment_page.get_or_insert(page);
        segment.push(String::from(current));
        i += 1;
        if has_trailing_punctuation(current) {
            flush(
                &mut segment,
                &mut segment_page,
                &mut tokens,
                &mut token_pages,
                &mut token_weights,
                page,
            );
        }
    }

    if !segment.is_empty() {
        let fallback = pages.get(n.wrapping_sub(1)).copied().unwrap_or(1);
        flush(
            &mut segment,
            &mut segment_page,
            &mut tokens,
            &mut token_pages,
            &mut token_weights,
            fallback,
        );
    }

    (tokens, token_pages, token_weights)
}

fn fuse(first: &str, second: &str) -> String {
    let mut fused = String::with_capacity(first.len() + 1 + second.len());
    fused.push_str(first);
    fused.push(' ');
    fused.push_str(second);
    fused
}
