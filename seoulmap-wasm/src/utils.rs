use wasm_bindgen::prelude::*;
use web_sys::{HtmlImageElement, Window};

/// Log a message to the browser console.
pub fn log(s: &str) {
    web_sys::console::log_1(&JsValue::from_str(s));
}

pub fn warn(s: &str) {
    web_sys::console::warn_1(&JsValue::from_str(s));
}

/// Build an absolute URL for an asset, taking into account the optional
/// `window.__BASE_URL` which is set by the host page.
pub fn asset_url(path: &str) -> String {
    let p = path.trim();
    if p.starts_with("http://") || p.starts_with("https://") || p.starts_with("data:") {
        return p.to_string();
    }
    let base = web_sys::window()
        .and_then(|w| {
            let v = js_sys::Reflect::get(&w, &JsValue::from_str("__BASE_URL")).ok()?;
            v.as_string()
        })
        .unwrap_or_else(|| "/".to_string());
    let base = if base.ends_with('/') {
        base
    } else {
        format!("{}/", base)
    };
    let p = p.trim_start_matches('/');
    format!("{}{}", base, p)
}

/// One-shot timer. The closure is dropped after it fires.
pub fn set_timeout(window: &Window, ms: i32, f: impl FnOnce() + 'static) {
    let cb = Closure::once_into_js(f);
    let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(cb.unchecked_ref(), ms);
}

/// Load an image off-DOM and report whether the browser could decode it.
pub async fn preload_image(src: &str) -> bool {
    let img = match HtmlImageElement::new() {
        Ok(img) => img,
        Err(_) => return false,
    };
    let img_for_promise = img.clone();
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        let ok = resolve.clone();
        let onload = Closure::once_into_js(move || {
            let _ = ok.call1(&JsValue::NULL, &JsValue::TRUE);
        });
        img_for_promise.set_onload(Some(onload.unchecked_ref()));
        let failed = resolve.clone();
        let onerror = Closure::once_into_js(move || {
            let _ = failed.call1(&JsValue::NULL, &JsValue::FALSE);
        });
        img_for_promise.set_onerror(Some(onerror.unchecked_ref()));
    });
    img.set_src(&asset_url(src));
    matches!(
        wasm_bindgen_futures::JsFuture::from(promise).await,
        Ok(v) if v.as_bool() == Some(true)
    )
}

/// Minimal HTML escaping for text interpolated into `inner_html`.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
