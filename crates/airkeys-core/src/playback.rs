//! Playback controller: retrigger semantics over a [`VoiceHandle`].

use crate::instrument::{DecayClass, InstrumentConfig, PLUCK_WINDOW_MS};
use crate::scale::NoteName;
use crate::voice::VoiceHandle;
use fnv::FnvHashSet;
use std::time::Duration;

/// What is currently sounding. Mutated only by the controller.
#[derive(Clone, Debug, Default)]
pub struct PlaybackState {
    pub current_notes: FnvHashSet<NoteName>,
    pub is_playing: bool,
}

/// Drives one voice with monophonic "retrigger" semantics: a new gesture's
/// notes never layer on top of a still-ringing previous gesture.
pub struct PlaybackController {
    voice: VoiceHandle,
    decay: DecayClass,
    state: PlaybackState,
}

impl PlaybackController {
    pub fn new(voice: VoiceHandle, config: &InstrumentConfig) -> Self {
        Self {
            voice,
            decay: config.decay,
            state: PlaybackState::default(),
        }
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    /// Stop whatever is sounding and start the candidate notes, preserving
    /// their order. A monophonic voice only sounds the first candidate; that
    /// is a property of the timbre, not something to silently fix here.
    pub fn trigger(&mut self, notes: &[NoteName]) {
        if notes.is_empty() {
            return;
        }
        self.stop_current();

        let started = match &mut self.voice {
            VoiceHandle::Polyphonic(v) => v.start_notes(notes),
            VoiceHandle::Monophonic(v) => v.start_note(notes[0]),
        };
        match started {
            Ok(()) => {
                if self.decay == DecayClass::Plucked {
                    let window = Duration::from_millis(PLUCK_WINDOW_MS);
                    if let Err(e) = self.voice.schedule_stop(window) {
                        log::warn!("could not schedule pluck release: {e}");
                    }
                }
                match &self.voice {
                    VoiceHandle::Polyphonic(_) => {
                        self.state.current_notes.extend(notes.iter().copied());
                    }
                    VoiceHandle::Monophonic(_) => {
                        self.state.current_notes.insert(notes[0]);
                    }
                }
                self.state.is_playing = true;
            }
            Err(e) => {
                // Degraded sound beats no sound: fall back to a bare
                // one-shot of the first candidate.
                log::error!("note start failed, using basic trigger: {e}");
                self.voice.basic_trigger(notes[0]);
                self.state.current_notes.insert(notes[0]);
                self.state.is_playing = true;
            }
        }
    }

    /// Force-stop everything and clear state. Idempotent: repeated calls in
    /// a contiguous no-hand run issue at most one stop command.
    pub fn silence(&mut self) {
        if !self.state.is_playing && self.state.current_notes.is_empty() {
            return;
        }
        self.stop_current();
    }

    /// Stop sounding notes and dispose the voice. Consumes the controller;
    /// used when switching instruments or shutting the session down.
    pub fn shutdown(mut self) {
        self.silence();
        self.voice.dispose();
    }

    fn stop_current(&mut self) {
        if self.state.is_playing || !self.state.current_notes.is_empty() {
            if let Err(e) = self.voice.stop() {
                log::warn!("stop before retrigger failed: {e}");
            }
        }
        self.state.current_notes.clear();
        self.state.is_playing = false;
    }
}
