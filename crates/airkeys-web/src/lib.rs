#![cfg(target_arch = "wasm32")]
//! WASM front-end: the host page owns the camera and the hand-tracking
//! library; this crate owns the gesture pipeline and the WebAudio output.

use std::rc::Rc;
use wasm_bindgen::prelude::*;

mod app;
mod audio;
mod dom;
mod events;
mod overlay;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("airkeys-web starting");
    Ok(())
}

/// Handle exported to the host page.
#[wasm_bindgen]
pub struct App {
    state: Rc<app::AppState>,
}

#[wasm_bindgen]
impl App {
    /// Reads the page's scale/instrument selects for initial configuration
    /// and wires the overlay, select, and keyboard listeners.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<App, JsValue> {
        let state = app::AppState::from_document()
            .map_err(|e| JsValue::from_str(&format!("{e:#}")))?;
        let state = Rc::new(state);
        events::wire_controls(state.clone());
        Ok(App { state })
    }

    /// One call per tracker result: 63 floats (21 landmarks × x,y,z in
    /// normalized image coordinates), or nothing when no hand was detected.
    pub fn on_frame(&self, landmarks: Option<Box<[f32]>>) {
        self.state.on_frame(landmarks.as_deref());
    }

    /// Must be called from a user gesture (the overlay buttons call it
    /// too). Activates the audio context and builds the first voice; until
    /// it completes, gestures are silently dropped.
    pub fn enable_audio(&self) {
        app::enable_audio(self.state.clone());
    }

    pub fn set_scale(&self, name: &str) {
        self.state.set_scale_key(name);
    }

    pub fn set_instrument(&self, name: &str) {
        self.state.set_instrument_key(name);
    }

    /// Camera stopped: silence playback and clear per-frame state.
    pub fn stop(&self) {
        self.state.stop();
    }
}
