//! Conversation view model
//!
//! The transcript is the on-screen conversation; the terminal widget only
//! draws it. Keeping it free of any rendering surface lets the runtime be
//! tested against it directly.

pub mod input;
mod transcript;

pub use transcript::{Control, SharedTranscript, Speaker, Transcript, Turn, ViewError};
