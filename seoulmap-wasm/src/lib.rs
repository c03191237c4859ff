use wasm_bindgen::prelude::*;

mod detail;
mod hero;
mod landing;
mod scrollnav;
mod state;
mod utils;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;
    let path = window
        .location()
        .pathname()
        .unwrap_or_else(|_| "/".to_string());
    match path.strip_prefix("/shops/") {
        Some(segment) if !segment.is_empty() => detail::mount(window, document, segment),
        _ => landing::mount(window, document),
    }
}
