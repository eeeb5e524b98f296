use crate::app::{self, AppState};
use crate::dom;
use airkeys_core::{InstrumentPreset, ScalePreset};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn scale_for_digit(key: &str) -> Option<ScalePreset> {
    match key {
        "1" => Some(ScalePreset::Major),
        "2" => Some(ScalePreset::Minor),
        "3" => Some(ScalePreset::MajorPentatonic),
        "4" => Some(ScalePreset::MinorPentatonic),
        "5" => Some(ScalePreset::Blues),
        _ => None,
    }
}

#[inline]
pub fn instrument_for_key(key: &str) -> Option<InstrumentPreset> {
    match key {
        "p" | "P" => Some(InstrumentPreset::Piano),
        "s" | "S" => Some(InstrumentPreset::Synth),
        "m" | "M" => Some(InstrumentPreset::Marimba),
        "g" | "G" => Some(InstrumentPreset::Guitar),
        "b" | "B" => Some(InstrumentPreset::Bass),
        _ => None,
    }
}

pub fn wire_controls(state: Rc<AppState>) {
    let document = state.document().clone();
    {
        let s = state.clone();
        dom::add_click_listener(&document, "overlay-ok", move || {
            app::enable_audio(s.clone());
        });
    }
    {
        let s = state.clone();
        dom::add_click_listener(&document, "overlay-close", move || {
            app::enable_audio(s.clone());
        });
    }
    {
        let s = state.clone();
        dom::add_select_listener(&document, "scale-select", move |value| {
            s.set_scale_key(&value);
        });
    }
    {
        let s = state.clone();
        dom::add_select_listener(&document, "instrument-select", move |value| {
            s.set_instrument_key(&value);
        });
    }
    wire_global_keydown(state);
}

// Digits 1-5 pick a scale; p/s/m/g/b pick an instrument.
fn wire_global_keydown(state: Rc<AppState>) {
    if let Some(window) = web::window() {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
                let key = ev.key();
                if let Some(preset) = scale_for_digit(&key) {
                    state.set_scale_key(preset.key());
                } else if let Some(preset) = instrument_for_key(&key) {
                    state.set_instrument_key(preset.key());
                }
            }) as Box<dyn FnMut(_)>);
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
