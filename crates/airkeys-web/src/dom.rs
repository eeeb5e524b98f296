use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
        let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

/// Listen for `change` on a `<select>` and hand the new value to the handler.
pub fn add_select_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut(String) + 'static,
) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::Event| {
            if let Some(select) = ev
                .target()
                .and_then(|t| t.dyn_into::<web::HtmlSelectElement>().ok())
            {
                handler(select.value());
            }
        }) as Box<dyn FnMut(_)>);
        let _ = el.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

/// Current value of a `<select>`, if the element exists.
pub fn select_value(document: &web::Document, element_id: &str) -> Option<String> {
    document
        .get_element_by_id(element_id)?
        .dyn_into::<web::HtmlSelectElement>()
        .ok()
        .map(|s| s.value())
}
