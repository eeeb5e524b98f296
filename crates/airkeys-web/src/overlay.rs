use web_sys as web;

#[inline]
pub fn hide(document: &web::Document) {
    if let Some(el) = document.get_element_by_id("start-overlay") {
        let cl = el.class_list();
        let _ = cl.add_1("hidden");
        // fallback
        let _ = el.set_attribute("style", "display:none");
    }
}

/// Update the status line with the current session configuration and the
/// most recently triggered notes.
pub fn update_status(
    document: &web::Document,
    scale_name: &str,
    instrument_name: &str,
    last_notes: &str,
) {
    if let Some(el) = document.get_element_by_id("status-line") {
        let notes_text = if last_notes.is_empty() {
            "—".to_string()
        } else {
            last_notes.to_string()
        };
        let html = format!(
            "<div style='color: #cfe7ff; font: 13px system-ui; background: rgba(10, 14, 24, 0.8); padding: 8px 12px; border-radius: 6px; border: 1px solid rgba(80, 110, 150, 0.35);'>Scale: {} • Instrument: {} • Notes: {}</div>",
            scale_name, instrument_name, notes_text
        );
        el.set_inner_html(&html);
    }
}

/// Surface a fatal error (audio or camera permission denied) to the user.
pub fn show_error(document: &web::Document, message: &str) {
    if let Some(el) = document.get_element_by_id("status-line") {
        let html = format!(
            "<div style='color: #ffb3b3; font: 13px system-ui; background: rgba(40, 10, 10, 0.85); padding: 8px 12px; border-radius: 6px;'>{}</div>",
            message
        );
        el.set_inner_html(&html);
    }
}
