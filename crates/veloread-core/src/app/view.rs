impl<DP> PlayerApp<DP>
where
    DP: DocumentProvider,
{
    /// Hand the current screen to a presentation callback. The view is
    /// borrowed from pre-assembled buffers, so this is cheap enough to
    /// call on every render.
    pub fn with_screen<R>(&self, f: impl FnOnce(Screen<'_>) -> R) -> R {
        let screen = match (self.session, self.document.as_ref()) {
            (SessionState::Empty, _) | (SessionState::Ready, None) => Screen::Empty,
            (SessionState::Processing { .. }, _) => Screen::Processing,
            (SessionState::Ready, Some(doc)) => {
                let n = doc.len();
                let fraction = if n == 0 {
                    0.0
                } else {
                    (self.current_index + 1) as f32 / n as f32
                };
                Screen::Reading {
                    window: self.window_text.as_str(),
                    preview: (self.config.show_preview && !self.preview_text.is_empty())
                        .then_some(self.preview_text.as_str()),
                    playing: self.is_playing(),
                    position: (self.current_index + 1, n),
                    fraction,
                    page: doc.page_at(self.current_index),
                    page_count: doc.page_count(),
                }
            }
        };
        f(screen)
    }

    /// Rebuild the display window and preview buffers for the current
    /// index and group size.
    fn rebuild_window_text(&mut self) {
        self.window_text.clear();
        self.preview_text.clear();
        let Some(doc) = self.document.as_ref() else {
            return;
        };

        let group_size = self.config.group_size as usize;
        let len = window::forward_window_len(doc.tokens(), group_size, self.current_index);
        join_window(&mut self.window_text, doc.tokens(), self.current_index, len);

        let next_start = self.current_index + len;
        let next_len = window::forward_window_len(doc.tokens(), group_size, next_start);
        join_window(&mut self.preview_text, doc.tokens(), next_start, next_len);
    }
}

fn join_window(out: &mut String, tokens: &[String], start: usize, len: usize) {
    for offset in 0..len {
        let Some(token) = tokens.get(start + offset) else {
            break;
        };
        if offset > 0 {
            out.push(' ');
        }
        out.push_str(token);
    }
}
