impl<DP> PlayerApp<DP>
where
    DP: DocumentProvider,
{
    /// Start playback from the current index. No-op unless a loaded,
    /// non-empty document is idle; a zero-length window (out-of-range
    /// index) also stays idle rather than erroring.
    pub fn play(&mut self, now_ms: u64) {
        if self.session != SessionState::Ready || self.is_playing() {
            return;
        }
        let duration = self.window_duration_ms(self.current_index);
        if duration == 0 {
            return;
        }
        self.playback = PlaybackPhase::Scheduled {
            next_window_ms: now_ms + duration,
        };
        self.pending_redraw = true;
        debug!(
            "pace: play index={} duration_ms={}",
            self.current_index, duration
        );
    }

    /// Stop playback, dropping the armed deadline. Index unchanged.
    pub fn pause(&mut self) {
        if self.is_playing() {
            self.playback = PlaybackPhase::Idle;
            self.pending_redraw = true;
            debug!("pace: pause index={}", self.current_index);
        }
    }

    pub fn toggle_play(&mut self, now_ms: u64) {
        if self.is_playing() {
            self.pause();
        } else {
            self.play(now_ms);
        }
    }

    /// Jump one window forward without changing the play/pause state.
    /// When a deadline is armed it is re-armed for the new window.
    pub fn step_forward(&mut self, now_ms: u64) {
        let Some(doc) = self.document.as_ref() else {
            return;
        };
        if doc.is_empty() {
            return;
        }
        let step = window::forward_window_len(
            doc.tokens(),
            self.config.group_size as usize,
            self.current_index,
        );
        let next = (self.current_index + step).min(doc.len() - 1);
        if next != self.current_index {
            self.current_index = next;
            self.index_changed(now_ms);
        }
        self.rearm_if_scheduled(now_ms);
    }

    /// Jump one window backward; see `window::backward_window_start`
    /// for why this does not always retrace a forward boundary.
    pub fn step_backward(&mut self, now_ms: u64) {
        let Some(doc) = self.document.as_ref() else {
            return;
        };
        let prev = window::backward_window_start(
            doc.tokens(),
            self.config.group_size as usize,
            self.current_index,
        );
        if prev != self.current_index {
            self.current_index = prev;
            self.index_changed(now_ms);
        }
        self.rearm_if_scheduled(now_ms);
    }

    /// Back to the first window, paused.
    pub fn restart(&mut self, now_ms: u64) {
        if self.document.is_none() {
            return;
        }
        self.playback = PlaybackPhase::Idle;
        if self.current_index != 0 {
            self.current_index = 0;
            self.index_changed(now_ms);
        }
        self.pending_redraw = true;
    }

    /// Change the target rate. Applies to the next scheduled duration,
    /// never to an in-flight window.
    pub fn set_wpm(&mut self, wpm: u16) {
        self.config.wpm = wpm.clamp(self.config.min_wpm, self.config.max_wpm);
    }

    /// Nudge the rate by one step, for increment-style controls.
    /// Returns whether the rate actually changed.
    pub fn adjust_wpm(&mut self, increase: bool) -> bool {
        let next = if increase {
            self.config
                .wpm
                .saturating_add(WPM_STEP)
                .min(self.config.max_wpm)
        } else {
            self.config
                .wpm
                .saturating_sub(WPM_STEP)
                .max(self.config.min_wpm)
        };
        if next != self.config.wpm {
            self.config.wpm = next;
            true
        } else {
            false
        }
    }

    /// Change the window cap. The display reflows right away; the
    /// in-flight deadline, if any, is untouched.
    pub fn set_group_size(&mut self, group_size: u8) {
        let clamped = group_size.clamp(MIN_GROUP_SIZE, MAX_GROUP_SIZE);
        if clamped != self.config.group_size {
            self.config.group_size = clamped;
            self.rebuild_window_text();
            self.pending_redraw = true;
        }
    }

    pub fn set_show_preview(&mut self, show: bool) {
        if show != self.config.show_preview {
            self.config.show_preview = show;
            self.pending_redraw = true;
        }
    }

    fn tick_playback(&mut self, now_ms: u64) -> bool {
        let PlaybackPhase::Scheduled { next_window_ms } = self.playback else {
            return false;
        };
        if now_ms < next_window_ms {
            return false;
        }

        let Some(doc) = self.document.as_ref() else {
            self.playback = PlaybackPhase::Idle;
            return false;
        };

        let n = doc.len();
        let step = window::forward_window_len(
            doc.tokens(),
            self.config.group_size as usize,
            self.current_index,
        );
        let next = self.current_index + step;
        if step == 0 || next >= n {
            // End of text: stop with the final window still displayed.
            self.playback = PlaybackPhase::Idle;
            debug!("pace: end of text index={}", self.current_index);
            return true;
        }

        self.current_index = next;
        self.index_changed(now_ms);
        let duration = self.window_duration_ms(self.current_index);
        self.playback = PlaybackPhase::Scheduled {
            next_window_ms: now_ms + duration,
        };
        true
    }

    fn rearm_if_scheduled(&mut self, now_ms: u64) {
        if self.is_playing() {
            let duration = self.window_duration_ms(self.current_index);
            self.playback = PlaybackPhase::Scheduled {
                next_window_ms: now_ms + duration,
            };
        }
    }

    /// Summed weighted duration of the window starting at `start`.
    /// Zero for empty documents and out-of-range indices.
    fn window_duration_ms(&self, start: usize) -> u64 {
        let Some(doc) = self.document.as_ref() else {
            return 0;
        };
        let len =
            window::forward_window_len(doc.tokens(), self.config.group_size as usize, start);
        let base = self.base_ms_per_word();

        let mut total = 0.0f32;
        for offset in 0..len {
            let index = start + offset;
            let Some(token) = doc.token(index) else {
                break;
            };
            total += base
                * doc.weight_at(index) as f32
                * lexical::punctuation_multiplier(token)
                * lexical::complexity_multiplier(token);
        }
        // Round to the nearest millisecond.
        (total + 0.5) as u64
    }

    fn base_ms_per_word(&self) -> f32 {
        let base = 60_000.0 / f32::from(self.config.wpm.max(1));
        if base < MIN_BASE_MS_PER_WORD {
            MIN_BASE_MS_PER_WORD
        } else {
            base
        }
    }
}
