//! Frame orchestrator: one tracking result in, note triggers out.
//!
//! Owns the single-writer session state (previous-frame features, active
//! scale/instrument, playback controller). Everything runs synchronously
//! inside the tracker's per-frame callback; there is no other writer.

use crate::hand::{finger_features, FingerFeature, HandFrame, FINGER_COUNT};
use crate::instrument::InstrumentPreset;
use crate::motion::{moved_fingers, MovedFingers};
use crate::playback::{PlaybackController, PlaybackState};
use crate::scale::{note_for_height, NoteName, ScalePreset};
use crate::voice::VoiceHandle;
use smallvec::SmallVec;

/// What one frame produced, for display and logging.
#[derive(Clone, Debug, Default)]
pub struct FrameReport {
    pub moved: MovedFingers,
    pub notes: SmallVec<[NoteName; FINGER_COUNT]>,
}

pub struct Session {
    scale: ScalePreset,
    instrument: InstrumentPreset,
    previous: Option<[FingerFeature; FINGER_COUNT]>,
    playback: Option<PlaybackController>,
}

impl Session {
    pub fn new(scale: ScalePreset, instrument: InstrumentPreset) -> Self {
        Self {
            scale,
            instrument,
            previous: None,
            playback: None,
        }
    }

    pub fn scale(&self) -> ScalePreset {
        self.scale
    }

    pub fn instrument(&self) -> InstrumentPreset {
        self.instrument
    }

    /// True once a voice is attached and gestures actually make sound.
    pub fn audio_ready(&self) -> bool {
        self.playback.is_some()
    }

    pub fn playback_state(&self) -> Option<&PlaybackState> {
        self.playback.as_ref().map(|p| p.state())
    }

    pub fn set_scale(&mut self, preset: ScalePreset) {
        self.scale = preset;
    }

    /// Attach a voice built for the current instrument. Any prior voice is
    /// silenced and disposed first, so no note outlives its synthesizer.
    pub fn attach_voice(&mut self, voice: VoiceHandle) {
        if let Some(old) = self.playback.take() {
            old.shutdown();
        }
        self.playback = Some(PlaybackController::new(voice, self.instrument.config()));
    }

    /// Record an instrument change and tear the old voice down. The caller
    /// constructs the replacement and hands it to [`Session::attach_voice`];
    /// until then gestures are dropped, never queued.
    pub fn change_instrument(&mut self, preset: InstrumentPreset) {
        self.instrument = preset;
        if let Some(old) = self.playback.take() {
            old.shutdown();
        }
    }

    /// Process one tracking result. `None` means no hand this frame.
    pub fn on_frame(&mut self, hand: Option<&HandFrame>) -> FrameReport {
        let Some(hand) = hand else {
            // Defined silent state, not an error. Dropping the previous
            // features means a reacquired hand needs two frames before
            // motion detection resumes.
            self.previous = None;
            if let Some(p) = self.playback.as_mut() {
                p.silence();
            }
            return FrameReport::default();
        };

        let features = finger_features(hand);
        let Some(previous) = self.previous.replace(features) else {
            // First frame after acquisition: nothing to compare against.
            return FrameReport::default();
        };

        let moved = moved_fingers(&features, &previous);
        if moved.is_empty() {
            return FrameReport::default();
        }

        let scale = self.scale.scale();
        let notes: SmallVec<[NoteName; FINGER_COUNT]> = moved
            .iter()
            .map(|f| note_for_height(scale, features[f.index()].height))
            .collect();

        match self.playback.as_mut() {
            Some(p) => p.trigger(&notes),
            // Stale gestures are meaningless once audio comes up; drop them.
            None => log::debug!("audio not ready, dropping {} gesture(s)", moved.len()),
        }

        FrameReport { moved, notes }
    }

    /// Camera stopped: silence playback and forget the previous frame.
    pub fn reset(&mut self) {
        self.previous = None;
        if let Some(p) = self.playback.as_mut() {
            p.silence();
        }
    }
}
