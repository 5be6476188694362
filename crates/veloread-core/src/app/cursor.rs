impl<DP> PlayerApp<DP>
where
    DP: DocumentProvider,
{
    /// Select a document for reading. Resets the session, suppresses
    /// progress sync until the resume seed is applied, and starts
    /// observing the processing status.
    pub fn select_document(&mut self, id: DocumentId, meta: DocumentMeta, now_ms: u64) {
        debug!(
            "doc: select id={} last_page={} last_token={}",
            id.as_str(),
            meta.last_read_page,
            meta.last_token_index
        );
        self.document_id = Some(id);
        self.document = None;
        self.session = SessionState::Processing {
            next_poll_ms: now_ms,
        };
        self.playback = PlaybackPhase::Idle;
        self.current_index = 0;
        self.start_page = meta.last_read_page.max(1);
        self.start_page_dirty = false;
        self.resume_token_index = meta.last_token_index;
        self.progress.suppress();
        self.activate_sync = false;
        self.window_text.clear();
        self.preview_text.clear();
        self.pending_redraw = true;
    }

    /// React to a document being deleted. If it is the active one,
    /// every piece of session state goes back to empty/idle and any
    /// in-flight persistence for it is discarded.
    pub fn document_deleted(&mut self, id: &DocumentId) {
        if self.document_id.as_ref() != Some(id) {
            return;
        }
        debug!("doc: active document deleted id={}", id.as_str());
        self.document_id = None;
        self.document = None;
        self.session = SessionState::Empty;
        self.playback = PlaybackPhase::Idle;
        self.current_index = 0;
        self.start_page = 1;
        self.start_page_dirty = false;
        self.resume_token_index = 0;
        self.progress.suppress();
        self.activate_sync = false;
        self.window_text.clear();
        self.preview_text.clear();
        self.pending_redraw = true;
    }

    /// Explicit jump to a start page. This overrides a still-pending
    /// token checkpoint, moves immediately when the document is
    /// loaded, and persists without the debounce delay. Before the
    /// tokens arrive the page is kept as the load-time seed instead.
    pub fn set_start_page(&mut self, page: u32, now_ms: u64) {
        let mut page = page.max(1);
        if let Some(doc) = self.document.as_ref() {
            page = page.min(doc.page_count().max(1));
        }
        self.start_page = page;
        self.start_page_dirty = true;
        self.resume_token_index = 0;
        if self.document.is_some() {
            self.apply_page_jump(now_ms);
        }
    }

    fn tick_processing(&mut self, now_ms: u64, next_poll_ms: u64) -> bool {
        if now_ms < next_poll_ms {
            return false;
        }
        let Some(id) = self.document_id.clone() else {
            self.session = SessionState::Empty;
            return false;
        };

        match self.provider.poll_status(&id) {
            Ok(ProcessingStatus::Completed) => match self.provider.fetch_bundle(&id) {
                Ok(Some(bundle)) => {
                    self.load_bundle(bundle, now_ms);
                    return true;
                }
                Ok(None) => debug!("doc: bundle not yet available id={}", id.as_str()),
                Err(_) => debug!("doc: bundle fetch failed id={}", id.as_str()),
            },
            Ok(status) => debug!("doc: status={:?} id={}", status, id.as_str()),
            // Transient poll errors are swallowed; the next cycle retries.
            Err(_) => debug!("doc: status poll failed id={}", id.as_str()),
        }

        self.session = SessionState::Processing {
            next_poll_ms: now_ms + STATUS_POLL_INTERVAL_MS,
        };
        false
    }

    /// Apply a completed token bundle: seed the cursor with, in
    /// priority order, the token checkpoint, then the start page, then
    /// 0; schedule sync activation for the next tick so the seed is
    /// observed before persistence resumes.
    fn load_bundle(&mut self, bundle: crate::document::TokenBundle, now_ms: u64) {
        let doc = Document::from_bundle(bundle);
        let n = doc.len();

        let seeded = if self.resume_token_index > 0 && self.resume_token_index < n {
            debug!("cursor: seed from checkpoint index={}", self.resume_token_index);
            self.resume_token_index
        } else if self.start_page > 1 {
            let index = doc.first_index_at_page(self.start_page).unwrap_or(0);
            debug!("cursor: seed from page={} index={}", self.start_page, index);
            index
        } else {
            0
        };

        self.document = Some(doc);
        self.current_index = seeded;
        self.session = SessionState::Ready;
        self.playback = PlaybackPhase::Idle;
        self.rebuild_window_text();

        // A page jump requested while the document was still
        // processing is honored now that the page map exists.
        if self.start_page_dirty {
            self.apply_page_jump(now_ms);
        }

        self.activate_sync = true;
        self.pending_redraw = true;
        debug!("doc: loaded tokens={} index={}", n, self.current_index);
    }

    fn apply_page_jump(&mut self, now_ms: u64) {
        let Some(doc) = self.document.as_ref() else {
            return;
        };
        // A start page past the last mapped page resolves to nothing;
        // the request stays pending until the user picks a valid page.
        let Some(index) = doc.first_index_at_page(self.start_page) else {
            return;
        };

        self.current_index = index;
        let checkpoint = self.checkpoint_at(index);
        self.progress.observe_immediate(checkpoint);
        self.start_page_dirty = false;
        self.resume_token_index = 0;
        self.rebuild_window_text();
        self.rearm_if_scheduled(now_ms);
        self.pending_redraw = true;
        debug!(
            "cursor: page jump page={} index={}",
            checkpoint.page, checkpoint.token_index
        );
    }

    /// Every index change funnels through here: the view text is
    /// rebuilt and, when sync is active, the new position is recorded
    /// for debounced persistence.
    fn index_changed(&mut self, now_ms: u64) {
        self.rebuild_window_text();
        self.pending_redraw = true;
        let checkpoint = self.checkpoint_at(self.current_index);
        self.progress.observe(checkpoint, now_ms);
    }

    fn checkpoint_at(&self, index: usize) -> Checkpoint {
        let page = self
            .document
            .as_ref()
            .map(|doc| doc.page_at(index))
            .unwrap_or(1);
        Checkpoint {
            page,
            token_index: index,
        }
    }
}
