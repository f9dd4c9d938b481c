//! In-memory conversation transcript

use crate::runtime::ChatView;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;

/// Who a turn is attributed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    User,
    Assistant,
}

/// One rendered entry in the conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub speaker: Speaker,
    pub text: String,
    pub at: DateTime<Utc>,
    /// The assistant placeholder awaiting a reply
    #[serde(default)]
    pub pending: bool,
}

impl Turn {
    fn new(speaker: Speaker, text: impl Into<String>) -> Self {
        Self {
            speaker,
            text: text.into(),
            at: Utc::now(),
            pending: false,
        }
    }
}

/// State of the submit control
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Control {
    pub enabled: bool,
    pub label: String,
}

impl Default for Control {
    fn default() -> Self {
        Self {
            enabled: true,
            label: String::new(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ViewError {
    #[error("a pending turn is already shown")]
    PendingExists,
}

/// Ordered turns plus the at-most-one pending placeholder
#[derive(Debug, Default)]
pub struct Transcript {
    turns: Vec<Turn>,
    /// Index into `turns` of the placeholder, if any
    pending: Option<usize>,
    control: Control,
    /// Lines scrolled up from the newest entry; 0 follows the tail
    scroll: u16,
}

impl Transcript {
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn control(&self) -> &Control {
        &self.control
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    #[cfg(test)]
    pub fn pending_count(&self) -> usize {
        self.turns.iter().filter(|turn| turn.pending).count()
    }

    pub fn scroll_offset(&self) -> u16 {
        self.scroll
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll = self.scroll.saturating_add(lines);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll = self.scroll.saturating_sub(lines);
    }

    pub fn push_user(&mut self, text: &str) {
        self.turns.push(Turn::new(Speaker::User, text));
        self.follow_tail();
    }

    pub fn push_pending(&mut self) -> Result<(), ViewError> {
        if self.pending.is_some() {
            return Err(ViewError::PendingExists);
        }
        let mut placeholder = Turn::new(Speaker::Assistant, "");
        placeholder.pending = true;
        self.pending = Some(self.turns.len());
        self.turns.push(placeholder);
        self.follow_tail();
        Ok(())
    }

    /// Replace the placeholder in place, or append when there is none.
    pub fn resolve_pending(&mut self, text: &str) {
        let text = text.trim();
        match self.pending.take().and_then(|idx| self.turns.get_mut(idx)) {
            Some(turn) => {
                turn.text = text.to_string();
                turn.pending = false;
                turn.at = Utc::now();
            }
            None => self.turns.push(Turn::new(Speaker::Assistant, text)),
        }
        self.follow_tail();
    }

    pub fn set_control(&mut self, enabled: bool, label: &str) {
        self.control = Control {
            enabled,
            label: label.to_string(),
        };
    }

    fn follow_tail(&mut self) {
        self.scroll = 0;
    }
}

/// Transcript shared between the runtime (writer) and the terminal (reader)
#[derive(Debug, Clone, Default)]
pub struct SharedTranscript {
    inner: Arc<Mutex<Transcript>>,
}

impl SharedTranscript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` with the transcript locked
    pub fn with<R>(&self, f: impl FnOnce(&mut Transcript) -> R) -> R {
        f(&mut *self.lock())
    }

    fn lock(&self) -> MutexGuard<'_, Transcript> {
        // A panic mid-render leaves nothing half-written worth refusing
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ChatView for SharedTranscript {
    fn render_user_turn(&self, text: &str) {
        self.lock().push_user(text);
    }

    fn render_pending_turn(&self) -> Result<(), ViewError> {
        self.lock().push_pending()
    }

    fn resolve_pending_turn(&self, text: &str) {
        self.lock().resolve_pending(text);
    }

    fn set_control(&self, enabled: bool, label: &str) {
        self.lock().set_control(enabled, label);
    }
}
