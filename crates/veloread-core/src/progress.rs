//! Debounced checkpoint persistence with explicit suppression state.
//!
//! The sync unit sits between the cursor and the progress store: index
//! changes are collapsed through a debounce window, writes come out in
//! index order through a small due queue, and a `Suppressed` state
//! keeps re-hydration from clobbering a not-yet-applied resume point.

use heapless::Deque;

/// Debounce applied to passive index changes before they persist.
pub const PROGRESS_DEBOUNCE_MS: u64 = 300;

/// Writes that became due but have not been drained yet. The queue is
/// tiny because at most one debounced write and one immediate write
/// can become due between drains; on overflow the oldest write is
/// dropped, which is safe under last-write-wins.
const DUE_WRITES: usize = 4;

/// Durable resume point for a document.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Checkpoint {
    /// 1-based page holding the current token.
    pub page: u32,
    pub token_index: usize,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum SyncState {
    /// Index changes are observed but never persisted (session is
    /// re-hydrating from a loaded document or an explicit jump).
    Suppressed,
    /// Index changes persist, debounced.
    Active,
}

pub struct ProgressSync {
    state: SyncState,
    pending: Option<(Checkpoint, u64)>,
    due: Deque<Checkpoint, DUE_WRITES>,
}

impl ProgressSync {
    pub const fn new() -> Self {
        Self {
            state: SyncState::Suppressed,
            pending: None,
            due: Deque::new(),
        }
    }

    /// Enter `Suppressed` and discard everything in flight. A write
    /// queued for a previous session must never fire into a new one.
    pub fn suppress(&mut self) {
        self.state = SyncState::Suppressed;
        self.pending = None;
        self.due.clear();
    }

    pub fn activate(&mut self) {
        self.state = SyncState::Active;
    }

    pub fn is_suppressed(&self) -> bool {
        self.state == SyncState::Suppressed
    }

    /// Record an index change. While suppressed this is a no-op; while
    /// active, a burst of changes collapses to the latest value with a
    /// fresh debounce window.
    pub fn observe(&mut self, checkpoint: Checkpoint, now_ms: u64) {
        if self.is_suppressed() {
            return;
        }
        match self.pending.as_mut() {
            Some((pending, changed_at_ms)) => {
                if *pending != checkpoint {
                    *pending = checkpoint;
                    *changed_at_ms = now_ms;
                }
            }
            None => self.pending = Some((checkpoint, now_ms)),
        }
    }

    /// Queue a write immediately, bypassing the debounce. Used for
    /// explicit user actions (page jumps), which persist even while
    /// passive sync is suppressed. Any pending debounced write is
    /// superseded so it cannot fire later with a stale position.
    pub fn observe_immediate(&mut self, checkpoint: Checkpoint) {
        self.pending = None;
        self.push_due(checkpoint);
    }

    /// Move the pending write to the due queue once its debounce
    /// window has elapsed.
    pub fn flush_if_due(&mut self, now_ms: u64) {
        let Some((checkpoint, changed_at_ms)) = self.pending else {
            return;
        };
        if now_ms.saturating_sub(changed_at_ms) < PROGRESS_DEBOUNCE_MS {
            return;
        }
        self.pending = None;
        self.push_due(checkpoint);
    }

    /// Next write that should be handed to the progress store, in
    /// index order.
    pub fn take_due(&mut self, now_ms: u64) -> Option<Checkpoint> {
        self.flush_if_due(now_ms);
        self.due.pop_front()
    }

    fn push_due(&mut self, checkpoint: Checkpoint) {
        if self.due.is_full() {
            let _ = self.due.pop_front();
        }
        let _ = self.due.push_back(checkpoint);
    }
}

impl Default for ProgressSync {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checkpoint(page: u32, token_index: usize) -> Checkpoint {
        Checkpoint { page, token_index }
    }

    #[test]
    fn suppressed_changes_are_never_persisted() {
        let mut sync = ProgressSync::new();
        sync.observe(checkpoint(1, 5), 0);
        assert_eq!(sync.take_due(10_000), None);
    }

    #[test]
    fn debounce_delays_and_then_releases() {
        let mut sync = ProgressSync::new();
        sync.activate();
        sync.observe(checkpoint(1, 5), 100);
        assert_eq!(sync.take_due(100 + PROGRESS_DEBOUNCE_MS - 1), None);
        assert_eq!(
            sync.take_due(100 + PROGRESS_DEBOUNCE_MS),
            Some(checkpoint(1, 5))
        );
        assert_eq!(sync.take_due(10_000), None);
    }

    #[test]
    fn burst_collapses_to_latest_value() {
        let mut sync = ProgressSync::new();
        sync.activate();
        sync.observe(checkpoint(1, 1), 0);
        sync.observe(checkpoint(1, 2), 50);
        sync.observe(checkpoint(2, 9), 120);
        // The window restarts from the last change.
        assert_eq!(sync.take_due(120 + PROGRESS_DEBOUNCE_MS - 1), None);
        assert_eq!(
            sync.take_due(120 + PROGRESS_DEBOUNCE_MS),
            Some(checkpoint(2, 9))
        );
        assert_eq!(sync.take_due(10_000), None);
    }

    #[test]
    fn repeated_identical_value_keeps_original_window() {
        let mut sync = ProgressSync::new();
        sync.activate();
        sync.observe(checkpoint(1, 3), 0);
        sync.observe(checkpoint(1, 3), 250);
        assert_eq!(sync.take_due(PROGRESS_DEBOUNCE_MS), Some(checkpoint(1, 3)));
    }

    #[test]
    fn immediate_write_bypasses_debounce_and_supersedes_pending() {
        let mut sync = ProgressSync::new();
        sync.activate();
        sync.observe(checkpoint(1, 4), 0);
        sync.observe_immediate(checkpoint(3, 40));
        assert_eq!(sync.take_due(1), Some(checkpoint(3, 40)));
        // The superseded debounced write must never surface.
        assert_eq!(sync.take_due(10_000), None);
    }

    #[test]
    fn immediate_write_works_while_suppressed() {
        let mut sync = ProgressSync::new();
        sync.observe_immediate(checkpoint(2, 20));
        assert_eq!(sync.take_due(0), Some(checkpoint(2, 20)));
    }

    #[test]
    fn suppress_discards_in_flight_writes() {
        let mut sync = ProgressSync::new();
        sync.activate();
        sync.observe_immediate(checkpoint(1, 1));
        sync.observe(checkpoint(1, 2), 0);
        sync.suppress();
        assert_eq!(sync.take_due(10_000), None);
    }

    #[test]
    fn due_writes_drain_in_order() {
        let mut sync = ProgressSync::new();
        sync.activate();
        sync.observe(checkpoint(1, 1), 0);
        sync.flush_if_due(PROGRESS_DEBOUNCE_MS);
        sync.observe_immediate(checkpoint(1, 2));
        assert_eq!(sync.take_due(PROGRESS_DEBOUNCE_MS), Some(checkpoint(1, 1)));
        assert_eq!(sync.take_due(PROGRESS_DEBOUNCE_MS), Some(checkpoint(1, 2)));
    }
}
