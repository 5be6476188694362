//! App-level view models handed to presentation collaborators.

/// Borrowed snapshot of what the player wants on screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Screen<'a> {
    /// No document selected.
    Empty,
    /// A document is selected but its tokens have not arrived yet.
    Processing,
    Reading {
        /// Text of the current display window.
        window: &'a str,
        /// Text of the next window, `None` when the preview is off or
        /// the document is exhausted.
        preview: Option<&'a str>,
        playing: bool,
        /// 1-based display position and total token count.
        position: (usize, usize),
        /// Fraction of the document consumed, in `0.0..=1.0`.
        fraction: f32,
        /// 1-based page of the current window's first token.
        page: u32,
        page_count: u32,
    },
}
