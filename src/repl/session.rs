//! Session state for one run of the terminal
//!
//! Everything the interpreter reads or mutates lives here and is passed to
//! handlers explicitly, so tests can build isolated sessions.

use tracing::debug;

use crate::progress::{MemoryStorage, ProgressStore};
use crate::repl::transcript::{Transcript, TranscriptEntry};
use crate::safety::{tier_for, SafetyTier};

/// What the transcript region currently shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Intro, boot sequence and current safety shield
    Welcome,
    /// Interaction log
    Transcript,
}

/// Replace-on-render region holding the last rendered tier
#[derive(Debug, Clone, Default)]
pub struct TierRegion {
    tier: Option<SafetyTier>,
    renders: usize,
}

impl TierRegion {
    pub fn tier(&self) -> Option<SafetyTier> {
        self.tier
    }

    pub fn renders(&self) -> usize {
        self.renders
    }
}

/// Session state: progress, transcript, view and tier region
pub struct SessionState {
    store: ProgressStore,
    transcript: Transcript,
    view: View,
    tier_region: Option<TierRegion>,
}

impl SessionState {
    /// Session with a tier region to render into
    pub fn new(store: ProgressStore) -> Self {
        Self {
            store,
            transcript: Transcript::new(),
            view: View::Welcome,
            tier_region: Some(TierRegion::default()),
        }
    }

    /// Session without a tier region; tier renders become no-ops
    pub fn headless(store: ProgressStore) -> Self {
        Self {
            tier_region: None,
            ..Self::new(store)
        }
    }

    /// Throwaway session backed by memory
    pub fn in_memory() -> Self {
        Self::new(ProgressStore::open(Box::new(MemoryStorage::new())))
    }

    /// Tier for the current progress, independent of any region
    pub fn current_tier(&self) -> SafetyTier {
        tier_for(self.store.completed_count())
    }

    /// Render the current tier into the tier region
    ///
    /// Returns the rendered tier, or `None` when there is no region.
    pub fn render_tier(&mut self) -> Option<SafetyTier> {
        let tier = self.current_tier();
        match self.tier_region.as_mut() {
            Some(region) => {
                region.tier = Some(tier);
                region.renders += 1;
                Some(tier)
            }
            None => {
                debug!("No tier region, skipping render");
                None
            }
        }
    }

    /// Tier last written to the region
    pub fn rendered_tier(&self) -> Option<SafetyTier> {
        self.tier_region.as_ref().and_then(|r| r.tier())
    }

    pub fn tier_region(&self) -> Option<&TierRegion> {
        self.tier_region.as_ref()
    }

    pub fn append(&mut self, entry: TranscriptEntry) {
        self.transcript.push(entry);
    }

    /// Discard the transcript to an empty interaction view
    pub fn clear_transcript(&mut self) {
        self.transcript.clear();
        self.view = View::Transcript;
    }

    /// Discard the transcript and go back to the welcome view
    pub fn reset_to_welcome(&mut self) {
        self.transcript.clear();
        self.view = View::Welcome;
    }

    pub fn set_view(&mut self, view: View) {
        self.view = view;
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn store(&self) -> &ProgressStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut ProgressStore {
        &mut self.store
    }

    pub fn completed_count(&self) -> usize {
        self.store.completed_count()
    }
}
