//! Session wiring: shared state touched by the frame bridge and the DOM
//! event closures.

use crate::audio::AudioEngine;
use crate::{dom, overlay};
use airkeys_core::{HandFrame, InstrumentPreset, ScalePreset, Session};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

const STATS_LOG_INTERVAL_FRAMES: u32 = 300;

struct FrameStats {
    frames: u32,
    since: Instant,
}

pub struct AppState {
    document: web::Document,
    session: RefCell<Session>,
    audio: RefCell<Option<AudioEngine>>,
    stats: RefCell<FrameStats>,
}

impl AppState {
    /// Build the session from the page's current `<select>` values, falling
    /// back to defaults when the controls are absent.
    pub fn from_document() -> anyhow::Result<AppState> {
        let document =
            dom::window_document().ok_or_else(|| anyhow::anyhow!("no window/document"))?;
        let scale = dom::select_value(&document, "scale-select")
            .and_then(|v| ScalePreset::from_key(&v))
            .unwrap_or(ScalePreset::Major);
        let instrument = dom::select_value(&document, "instrument-select")
            .and_then(|v| InstrumentPreset::from_key(&v))
            .unwrap_or(InstrumentPreset::Piano);
        log::info!(
            "[session] scale={} instrument={}",
            scale.key(),
            instrument.key()
        );
        Ok(AppState {
            document,
            session: RefCell::new(Session::new(scale, instrument)),
            audio: RefCell::new(None),
            stats: RefCell::new(FrameStats {
                frames: 0,
                since: Instant::now(),
            }),
        })
    }

    pub fn document(&self) -> &web::Document {
        &self.document
    }

    /// One tracker result. Failures here are logged and swallowed; a bad
    /// frame never halts tracking for the frames after it.
    pub fn on_frame(&self, landmarks: Option<&[f32]>) {
        self.tick_stats();
        let frame = match landmarks {
            Some(coords) => match HandFrame::from_flat(coords) {
                Ok(f) => Some(f),
                Err(e) => {
                    // Transient tracker garbage: skip the frame outright
                    // rather than treating it as a hand-lost transition.
                    log::error!("dropping malformed landmark frame: {e}");
                    return;
                }
            },
            None => None,
        };
        let report = self.session.borrow_mut().on_frame(frame.as_ref());
        if !report.notes.is_empty() {
            let notes = report.notes.join(" ");
            log::debug!("[frame] moved={:?} notes={}", report.moved, notes);
            self.refresh_status(&notes);
        }
    }

    pub fn set_scale_key(&self, key: &str) {
        match ScalePreset::from_key(key) {
            Some(preset) => {
                self.session.borrow_mut().set_scale(preset);
                self.refresh_status("");
            }
            None => log::warn!("unknown scale preset {key:?}"),
        }
    }

    /// Tear the old voice down synchronously, then attach a fresh one for
    /// the new preset (when audio is up).
    pub fn set_instrument_key(&self, key: &str) {
        let Some(preset) = InstrumentPreset::from_key(key) else {
            log::warn!("unknown instrument preset {key:?}");
            return;
        };
        {
            let mut session = self.session.borrow_mut();
            session.change_instrument(preset);
            if let Some(engine) = self.audio.borrow().as_ref() {
                match engine.build_voice(preset) {
                    Ok(voice) => session.attach_voice(voice),
                    Err(()) => log::error!("could not build {} voice", preset.key()),
                }
            }
        }
        self.refresh_status("");
    }

    /// Camera stopped.
    pub fn stop(&self) {
        self.session.borrow_mut().reset();
        self.refresh_status("");
    }

    fn attach_current_voice(&self) {
        let preset = self.session.borrow().instrument();
        if let Some(engine) = self.audio.borrow().as_ref() {
            match engine.build_voice(preset) {
                Ok(voice) => self.session.borrow_mut().attach_voice(voice),
                Err(()) => log::error!("could not build {} voice", preset.key()),
            }
        }
    }

    fn refresh_status(&self, notes: &str) {
        let (scale_name, instrument_name) = {
            let session = self.session.borrow();
            (session.scale().scale().name, session.instrument().key())
        };
        overlay::update_status(&self.document, scale_name, instrument_name, notes);
    }

    fn tick_stats(&self) {
        let mut stats = self.stats.borrow_mut();
        stats.frames += 1;
        if stats.frames >= STATS_LOG_INTERVAL_FRAMES {
            let elapsed = stats.since.elapsed().as_secs_f64();
            if elapsed > 0.0 {
                log::debug!("[frames] {:.1} fps", stats.frames as f64 / elapsed);
            }
            stats.frames = 0;
            stats.since = Instant::now();
        }
    }
}

/// Activate audio on a user gesture: construct the context, await its
/// resume, then attach the first voice. No playback call can happen before
/// this completes; frames arriving meanwhile still update display state.
pub fn enable_audio(state: Rc<AppState>) {
    if state.audio.borrow().is_some() {
        overlay::hide(&state.document);
        return;
    }
    let Ok(engine) = AudioEngine::new() else {
        overlay::show_error(&state.document, "Audio could not be started.");
        return;
    };
    let resume = engine.resume_promise();
    *state.audio.borrow_mut() = Some(engine);
    spawn_local(async move {
        if let Some(promise) = resume {
            if let Err(e) = JsFuture::from(promise).await {
                // Permission/autoplay denial is fatal to the session.
                log::error!("audio context resume failed: {:?}", e);
                overlay::show_error(&state.document, "Audio blocked by the browser.");
                *state.audio.borrow_mut() = None;
                return;
            }
        }
        state.attach_current_voice();
        overlay::hide(&state.document);
        state.refresh_status("");
        log::info!("audio ready");
    });
}
