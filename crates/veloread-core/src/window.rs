//! Display-window computation over a token sequence.
//!
//! Windows group up to `group_size` consecutive tokens and are cut
//! short at sentence-ending periods so a sentence never bleeds into
//! the next display step. All functions are pure and O(`group_size`),
//! cheap enough to call on every tick.

/// Whether a token ends a sentence for windowing purposes: a trimmed
/// trailing `'.'` that is not part of an ellipsis.
pub fn is_terminal_period(token: &str) -> bool {
    let trimmed = token.trim();
    !trimmed.ends_with("...") && trimmed.ends_with('.')
}

/// Number of tokens to display together starting at `start`.
///
/// Returns 0 when `start` is out of bounds. The window stops at (and
/// includes) the first terminal-period token, otherwise it fills up to
/// `group_size`, never reading past the end of the sequence.
pub fn forward_window_len<S: AsRef<str>>(tokens: &[S], group_size: usize, start: usize) -> usize {
    if start >= tokens.len() {
        return 0;
    }

    let cap = group_size.min(tokens.len() - start);
    for offset in 0..cap {
        if is_terminal_period(tokens[start + offset].as_ref()) {
            return offset + 1;
        }
    }
    cap
}

/// Start index of the window preceding `index`, for backward steps.
///
/// Scans backward up to `group_size` tokens, stopping early at (and
/// including) the first terminal-period token. This traversal is not
/// the exact inverse of [`forward_window_len`] when `group_size > 1`
/// and punctuation falls irregularly; that asymmetry is part of the
/// navigation contract and is intentionally kept.
pub fn backward_window_start<S: AsRef<str>>(tokens: &[S], group_size: usize, index: usize) -> usize {
    if index == 0 {
        return 0;
    }

    let mut scanned = 0usize;
    let mut i = index;
    while i > 0 && scanned < group_size {
        i -= 1;
        scanned += 1;
        if tokens
            .get(i)
            .is_some_and(|token| is_terminal_period(token.as_ref()))
        {
            break;
        }
    }
    index.saturating_sub(scanned)
}
