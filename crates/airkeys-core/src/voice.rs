//! Voice interface: the seam between the pipeline and an audio backend.
//!
//! Chord-capable and single-note backends are distinct traits selected once
//! at construction time; the playback controller never probes capabilities
//! at runtime.

use crate::scale::NoteName;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VoiceError {
    #[error("failed to start note(s): {0}")]
    Start(String),
    #[error("failed to stop note(s): {0}")]
    Stop(String),
    #[error("failed to schedule stop: {0}")]
    Schedule(String),
}

/// A voice that can sound several notes at once.
pub trait PolyphonicVoice {
    fn start_notes(&mut self, notes: &[NoteName]) -> Result<(), VoiceError>;
    fn stop_all(&mut self) -> Result<(), VoiceError>;
    /// Schedule a release of everything currently sounding.
    fn schedule_stop(&mut self, after: Duration) -> Result<(), VoiceError>;
    /// Last-resort trigger: a plain, self-releasing one-shot. Must not fail.
    fn basic_trigger(&mut self, note: NoteName);
    /// Release backend resources. The voice is unusable afterwards.
    fn dispose(&mut self);
}

/// A voice that sounds one note at a time.
pub trait MonophonicVoice {
    fn start_note(&mut self, note: NoteName) -> Result<(), VoiceError>;
    fn stop_note(&mut self) -> Result<(), VoiceError>;
    fn schedule_stop(&mut self, after: Duration) -> Result<(), VoiceError>;
    fn basic_trigger(&mut self, note: NoteName);
    fn dispose(&mut self);
}

/// The handle the playback controller is written against.
pub enum VoiceHandle {
    Polyphonic(Box<dyn PolyphonicVoice>),
    Monophonic(Box<dyn MonophonicVoice>),
}

impl VoiceHandle {
    pub(crate) fn schedule_stop(&mut self, after: Duration) -> Result<(), VoiceError> {
        match self {
            VoiceHandle::Polyphonic(v) => v.schedule_stop(after),
            VoiceHandle::Monophonic(v) => v.schedule_stop(after),
        }
    }

    pub(crate) fn basic_trigger(&mut self, note: NoteName) {
        match self {
            VoiceHandle::Polyphonic(v) => v.basic_trigger(note),
            VoiceHandle::Monophonic(v) => v.basic_trigger(note),
        }
    }

    pub(crate) fn stop(&mut self) -> Result<(), VoiceError> {
        match self {
            VoiceHandle::Polyphonic(v) => v.stop_all(),
            VoiceHandle::Monophonic(v) => v.stop_note(),
        }
    }

    pub(crate) fn dispose(&mut self) {
        match self {
            VoiceHandle::Polyphonic(v) => v.dispose(),
            VoiceHandle::Monophonic(v) => v.dispose(),
        }
    }
}
