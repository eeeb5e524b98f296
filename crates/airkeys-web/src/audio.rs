//! WebAudio voices: oscillator one-shots with gain envelopes, routed
//! through a per-voice lowpass tone and gain into a master bus.

use airkeys_core::{
    midi_to_hz, note_to_midi, InstrumentConfig, InstrumentPreset, MonophonicVoice, NoteName,
    PolyphonicVoice, VoiceError, VoiceHandle, Waveform, PLUCK_WINDOW_MS,
};
use std::time::Duration;
use web_sys as web;

fn create_gain(
    audio_ctx: &web::AudioContext,
    value: f32,
    label: &str,
) -> Result<web::GainNode, ()> {
    match web::GainNode::new(audio_ctx) {
        Ok(g) => {
            g.gain().set_value(value);
            Ok(g)
        }
        Err(e) => {
            log::error!("{} GainNode error: {:?}", label, e);
            Err(())
        }
    }
}

fn oscillator_type(waveform: Waveform) -> web::OscillatorType {
    match waveform {
        Waveform::Sine => web::OscillatorType::Sine,
        Waveform::Square => web::OscillatorType::Square,
        Waveform::Saw => web::OscillatorType::Sawtooth,
        Waveform::Triangle => web::OscillatorType::Triangle,
    }
}

fn note_hz(config: &InstrumentConfig, note: NoteName) -> Option<f32> {
    note_to_midi(note).map(|m| midi_to_hz((m + 12 * config.octave_offset) as f32))
}

/// Shared audio context plus the master output bus.
pub struct AudioEngine {
    ctx: web::AudioContext,
    master: web::GainNode,
}

impl AudioEngine {
    pub fn new() -> Result<Self, ()> {
        let ctx = web::AudioContext::new().map_err(|e| {
            log::error!("AudioContext error: {:?}", e);
        })?;
        let master = create_gain(&ctx, 0.8, "master")?;
        let _ = master.connect_with_audio_node(&ctx.destination());
        Ok(Self { ctx, master })
    }

    /// Resolves once the context is actually running (autoplay unlock).
    pub fn resume_promise(&self) -> Option<js_sys::Promise> {
        self.ctx.resume().ok()
    }

    /// Construct the voice for a preset: `osc -> envelope -> lowpass tone ->
    /// voice gain -> master`. The poly/mono split is decided here, once.
    pub fn build_voice(&self, preset: InstrumentPreset) -> Result<VoiceHandle, ()> {
        let config = preset.config();
        let tone = web::BiquadFilterNode::new(&self.ctx).map_err(|e| {
            log::error!("{} BiquadFilterNode error: {:?}", config.name, e);
        })?;
        tone.set_type(web::BiquadFilterType::Lowpass);
        tone.frequency().set_value(config.cutoff_hz);
        let out = create_gain(&self.ctx, config.level, config.name)?;
        let _ = tone.connect_with_audio_node(&out);
        let _ = out.connect_with_audio_node(&self.master);

        let parts = SynthParts {
            ctx: self.ctx.clone(),
            input: tone,
            out,
            config,
        };
        Ok(if config.polyphonic {
            VoiceHandle::Polyphonic(Box::new(PolySynth {
                parts,
                active: Vec::new(),
            }))
        } else {
            VoiceHandle::Monophonic(Box::new(MonoSynth {
                parts,
                active: None,
            }))
        })
    }
}

struct ActiveNote {
    osc: web::OscillatorNode,
    env: web::GainNode,
}

struct SynthParts {
    ctx: web::AudioContext,
    input: web::BiquadFilterNode,
    out: web::GainNode,
    config: &'static InstrumentConfig,
}

impl SynthParts {
    fn start_note_now(&self, note: NoteName) -> Result<ActiveNote, VoiceError> {
        let hz = note_hz(self.config, note)
            .ok_or_else(|| VoiceError::Start(format!("unparseable note {note:?}")))?;
        let osc = web::OscillatorNode::new(&self.ctx)
            .map_err(|e| VoiceError::Start(format!("oscillator: {e:?}")))?;
        osc.set_type(oscillator_type(self.config.waveform));
        osc.frequency().set_value(hz);
        let env = web::GainNode::new(&self.ctx)
            .map_err(|e| VoiceError::Start(format!("envelope: {e:?}")))?;
        env.gain().set_value(0.0);
        let now = self.ctx.current_time();
        let _ = env
            .gain()
            .linear_ramp_to_value_at_time(1.0, now + self.config.attack_sec as f64);
        let _ = osc.connect_with_audio_node(&env);
        let _ = env.connect_with_audio_node(&self.input);
        let _ = osc.start();
        Ok(ActiveNote { osc, env })
    }

    fn release_at(&self, note: &ActiveNote, t0: f64) {
        let release = self.config.release_sec as f64;
        let g = note.env.gain();
        let _ = g.cancel_scheduled_values(t0);
        let _ = g.set_value_at_time(1.0, t0);
        let _ = g.linear_ramp_to_value_at_time(0.0, t0 + release);
        // Double-stop on an already-released oscillator throws; ignored.
        let _ = note.osc.stop_with_when(t0 + release + 0.05);
    }

    // Bare self-releasing one-shot, bypassing the envelope bookkeeping.
    // Nothing here can leave the voice in a bad state.
    fn one_shot(&self, note: NoteName) {
        let Some(hz) = note_hz(self.config, note) else {
            return;
        };
        if let Ok(src) = web::OscillatorNode::new(&self.ctx) {
            src.set_type(oscillator_type(self.config.waveform));
            src.frequency().set_value(hz);
            if let Ok(g) = web::GainNode::new(&self.ctx) {
                g.gain().set_value(0.0);
                let t0 = self.ctx.current_time() + 0.005;
                let dur = PLUCK_WINDOW_MS as f64 / 1000.0;
                let _ = g.gain().linear_ramp_to_value_at_time(1.0, t0 + 0.02);
                let _ = g.gain().linear_ramp_to_value_at_time(0.0, t0 + dur);
                let _ = src.connect_with_audio_node(&g);
                let _ = g.connect_with_audio_node(&self.out);
                let _ = src.start_with_when(t0);
                let _ = src.stop_with_when(t0 + dur + 0.05);
            }
        }
    }

    fn teardown(&self) {
        let _ = self.input.disconnect();
        let _ = self.out.disconnect();
    }
}

/// Chord-capable WebAudio voice.
pub struct PolySynth {
    parts: SynthParts,
    active: Vec<ActiveNote>,
}

impl PolyphonicVoice for PolySynth {
    fn start_notes(&mut self, notes: &[NoteName]) -> Result<(), VoiceError> {
        let mut started = Vec::with_capacity(notes.len());
        for &note in notes {
            match self.parts.start_note_now(note) {
                Ok(n) => started.push(n),
                Err(e) => {
                    // Roll the partial chord back before reporting failure.
                    let now = self.parts.ctx.current_time();
                    for n in &started {
                        self.parts.release_at(n, now);
                    }
                    return Err(e);
                }
            }
        }
        self.active = started;
        Ok(())
    }

    fn stop_all(&mut self) -> Result<(), VoiceError> {
        let now = self.parts.ctx.current_time();
        for note in self.active.drain(..) {
            self.parts.release_at(&note, now);
        }
        Ok(())
    }

    fn schedule_stop(&mut self, after: Duration) -> Result<(), VoiceError> {
        let t0 = self.parts.ctx.current_time() + after.as_secs_f64();
        for note in &self.active {
            self.parts.release_at(note, t0);
        }
        Ok(())
    }

    fn basic_trigger(&mut self, note: NoteName) {
        self.parts.one_shot(note);
    }

    fn dispose(&mut self) {
        let _ = self.stop_all();
        self.parts.teardown();
    }
}

/// Single-note WebAudio voice (bass).
pub struct MonoSynth {
    parts: SynthParts,
    active: Option<ActiveNote>,
}

impl MonophonicVoice for MonoSynth {
    fn start_note(&mut self, note: NoteName) -> Result<(), VoiceError> {
        if let Some(prev) = self.active.take() {
            self.parts.release_at(&prev, self.parts.ctx.current_time());
        }
        self.active = Some(self.parts.start_note_now(note)?);
        Ok(())
    }

    fn stop_note(&mut self) -> Result<(), VoiceError> {
        if let Some(note) = self.active.take() {
            self.parts.release_at(&note, self.parts.ctx.current_time());
        }
        Ok(())
    }

    fn schedule_stop(&mut self, after: Duration) -> Result<(), VoiceError> {
        if let Some(note) = &self.active {
            let t0 = self.parts.ctx.current_time() + after.as_secs_f64();
            self.parts.release_at(note, t0);
        }
        Ok(())
    }

    fn basic_trigger(&mut self, note: NoteName) {
        self.parts.one_shot(note);
    }

    fn dispose(&mut self) {
        let _ = self.stop_note();
        self.parts.teardown();
    }
}
