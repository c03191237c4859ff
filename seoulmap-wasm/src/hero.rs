use std::rc::Rc;
use std::cell::RefCell;

use wasm_bindgen::JsCast;
use web_sys::HtmlImageElement;

use seoulmap_core::carousel::{Carousel, FADE_MS, HOLD_MS};
use seoulmap_core::images::hero_image_candidates;

use crate::state::{State, STATE};
use crate::utils;

/// Probe the numbered hero images, keeping the first extension that decodes
/// for each number. A number with no working extension is skipped.
pub async fn discover_hero_images() -> Vec<String> {
    let mut found = Vec::new();
    for candidates in hero_image_candidates() {
        for candidate in candidates {
            if utils::preload_image(&candidate).await {
                found.push(candidate);
                break;
            }
        }
    }
    found
}

fn base_img(state: &State) -> Option<HtmlImageElement> {
    state
        .document
        .get_element_by_id("hero-base")
        .and_then(|el| el.dyn_into::<HtmlImageElement>().ok())
}

fn overlay_img(state: &State) -> Option<HtmlImageElement> {
    state
        .document
        .get_element_by_id("hero-overlay")
        .and_then(|el| el.dyn_into::<HtmlImageElement>().ok())
}

/// Discover the slideshow images, show the first and start rotating. The
/// discovery future outlives the mount, so it picks the state back up from
/// the thread-local slot once it resumes.
pub fn init() {
    wasm_bindgen_futures::spawn_local(async move {
        let images = discover_hero_images().await;
        let Some(st) = STATE.with(|st| st.borrow().clone()) else {
            return;
        };
        st.borrow_mut().carousel = Carousel::new(images);
        let src = {
            let s = st.borrow();
            if let Some(img) = base_img(&s) {
                img.set_src(&utils::asset_url(s.carousel.current_image()));
            }
            s.carousel.current_image().to_string()
        };
        utils::log(&format!("hero: starting rotation at {src}"));
        start_cycle(st);
    });
}

/// One rotation step: hold, preload the next slide, cross-fade, commit, then
/// schedule the next step. Stale cycle ids fall out at each checkpoint.
pub fn start_cycle(state: Rc<RefCell<State>>) {
    let Some(cycle) = state.borrow_mut().carousel.begin_cycle() else {
        return;
    };
    let window = state.borrow().window.clone();
    let st = state.clone();
    utils::set_timeout(&window, HOLD_MS, move || {
        let pending = st.borrow_mut().carousel.hold_elapsed(cycle);
        let Some(pending) = pending else { return };
        let st2 = st.clone();
        wasm_bindgen_futures::spawn_local(async move {
            if !utils::preload_image(&pending).await {
                utils::warn(&format!("hero: dropping unloadable slide {pending}"));
                st2.borrow_mut().carousel.remove_failed(&pending);
                start_cycle(st2);
                return;
            }
            let next = st2.borrow_mut().carousel.preload_done(cycle);
            if let Some(next) = next {
                begin_fade(st2, cycle, &next);
            }
        });
    });
}

fn begin_fade(state: Rc<RefCell<State>>, cycle: u64, src: &str) {
    let (window, overlay) = {
        let s = state.borrow();
        (s.window.clone(), overlay_img(&s))
    };
    let Some(overlay) = overlay else { return };
    overlay.set_src(&utils::asset_url(src));
    let style = overlay.style();
    let _ = style.set_property("transition", "none");
    let _ = style.set_property("opacity", "0");
    // force a reflow so the transition starts from opacity 0
    let _ = overlay.offset_width();
    let _ = style.set_property("transition", &format!("opacity {FADE_MS}ms ease-in-out"));
    let _ = style.set_property("opacity", "1");

    let st = state.clone();
    utils::set_timeout(&window, FADE_MS, move || {
        if !st.borrow_mut().carousel.fade_elapsed(cycle) {
            return;
        }
        {
            let s = st.borrow();
            if let Some(base) = base_img(&s) {
                base.set_src(&utils::asset_url(s.carousel.current_image()));
            }
            if let Some(overlay) = overlay_img(&s) {
                let style = overlay.style();
                let _ = style.set_property("transition", "none");
                let _ = style.set_property("opacity", "0");
            }
        }
        start_cycle(st);
    });
}
