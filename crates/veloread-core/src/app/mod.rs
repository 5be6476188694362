//! Player state machine for document sessions, pacing, and resume.

use alloc::string::String;

use log::debug;

use crate::{
    document::{Document, DocumentId, DocumentMeta, ProcessingStatus},
    lexical,
    progress::{Checkpoint, ProgressSync},
    render::Screen,
    source::DocumentProvider,
    window,
};

/// Bounded fallback interval for status observation; push-capable
/// runtimes can tick faster, the contract only needs the `Completed`
/// status to be seen eventually.
pub const STATUS_POLL_INTERVAL_MS: u64 = 1_000;

const WPM_STEP: u16 = 10;
const MIN_GROUP_SIZE: u8 = 1;
const MAX_GROUP_SIZE: u8 = 3;

/// Floor on the per-word base duration so runaway rates cannot drive
/// the window delay to zero.
const MIN_BASE_MS_PER_WORD: f32 = 50.0;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TickResult {
    NoRender,
    RenderRequested,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PlayerConfig {
    pub wpm: u16,
    pub min_wpm: u16,
    pub max_wpm: u16,
    /// Tokens shown together per window, 1 to 3.
    pub group_size: u8,
    pub show_preview: bool,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            wpm: 300,
            min_wpm: 60,
            max_wpm: 1_200,
            group_size: 1,
            show_preview: true,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum SessionState {
    /// No document selected.
    Empty,
    /// Waiting for the processing collaborator to finish.
    Processing { next_poll_ms: u64 },
    /// Tokens are loaded and playback is available.
    Ready,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum PlaybackPhase {
    Idle,
    /// A single transition deadline is armed; arming a new one always
    /// replaces this value, so at most one exists at any time.
    Scheduled { next_window_ms: u64 },
}

pub struct PlayerApp<DP>
where
    DP: DocumentProvider,
{
    provider: DP,
    config: PlayerConfig,
    session: SessionState,
    playback: PlaybackPhase,
    document_id: Option<DocumentId>,
    document: Option<Document>,
    current_index: usize,
    /// Requested start page; only honored as a jump once the user has
    /// touched it (`start_page_dirty`) or no token checkpoint exists.
    start_page: u32,
    start_page_dirty: bool,
    /// Token-level checkpoint waiting to be consumed at load time.
    resume_token_index: usize,
    progress: ProgressSync,
    /// Set when a seed was just applied; the switch to active sync is
    /// deferred to the next tick so the seeded index is observed
    /// before persistence resumes.
    activate_sync: bool,
    window_text: String,
    preview_text: String,
    pending_redraw: bool,
}

impl<DP> PlayerApp<DP>
where
    DP: DocumentProvider,
{
    pub fn new(provider: DP, mut config: PlayerConfig) -> Self {
        if config.max_wpm < config.min_wpm {
            core::mem::swap(&mut config.max_wpm, &mut config.min_wpm);
        }
        config.min_wpm = config.min_wpm.max(1);
        config.wpm = config.wpm.clamp(config.min_wpm, config.max_wpm);
        config.group_size = config.group_size.clamp(MIN_GROUP_SIZE, MAX_GROUP_SIZE);

        Self {
            provider,
            config,
            session: SessionState::Empty,
            playback: PlaybackPhase::Idle,
            document_id: None,
            document: None,
            current_index: 0,
            start_page: 1,
            start_page_dirty: false,
            resume_token_index: 0,
            progress: ProgressSync::new(),
            activate_sync: false,
            window_text: String::new(),
            preview_text: String::new(),
            pending_redraw: false,
        }
    }

    /// Advance the machine to `now_ms`. Drives status observation,
    /// the pacing deadline, and the deferred sync activation.
    pub fn tick(&mut self, now_ms: u64) -> TickResult {
        if self.activate_sync {
            self.activate_sync = false;
            self.progress.activate();
            debug!("cursor: sync active index={}", self.current_index);
        }

        let mut render = match self.session {
            SessionState::Empty => false,
            SessionState::Processing { next_poll_ms } => self.tick_processing(now_ms, next_poll_ms),
            SessionState::Ready => self.tick_playback(now_ms),
        };

        if self.pending_redraw {
            self.pending_redraw = false;
            render = true;
        }

        if render {
            TickResult::RenderRequested
        } else {
            TickResult::NoRender
        }
    }

    /// Next checkpoint write that became due, to be handed to the
    /// progress store for the active document.
    pub fn take_due_progress(&mut self, now_ms: u64) -> Option<Checkpoint> {
        self.document_id.as_ref()?;
        self.progress.take_due(now_ms)
    }

    pub fn document_id(&self) -> Option<&DocumentId> {
        self.document_id.as_ref()
    }

    pub fn config(&self) -> PlayerConfig {
        self.config
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn start_page(&self) -> u32 {
        self.start_page
    }

    pub fn is_ready(&self) -> bool {
        self.session == SessionState::Ready
    }

    pub fn is_playing(&self) -> bool {
        matches!(self.playback, PlaybackPhase::Scheduled { .. })
    }
}

include!("playback.rs");
include!("cursor.rs");
include!("view.rs");
