use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{
    AddEventListenerOptions, Event, ScrollBehavior, ScrollToOptions, WheelEvent, Window,
};

use seoulmap_core::scroll::{Action, IDLE_TIMEOUT_MS, SCROLL_SETTLE_MS, SECTION_ID};

use crate::state::State;
use crate::utils;

/// Document-space top of the content section.
pub fn content_boundary(state: &State) -> f64 {
    let top = state
        .document
        .get_element_by_id(SECTION_ID)
        .map(|el| el.get_bounding_client_rect().top())
        .unwrap_or(0.0);
    top + state.window.scroll_y().unwrap_or(0.0)
}

fn scroll_to(window: &Window, top: f64, smooth: bool) {
    let opts = ScrollToOptions::new();
    opts.set_top(top);
    opts.set_behavior(if smooth {
        ScrollBehavior::Smooth
    } else {
        ScrollBehavior::Auto
    });
    window.scroll_to_with_scroll_to_options(&opts);
}

/// Remove `#section-2` from the address bar without adding a history entry.
pub fn clear_section_hash(state: &State) {
    let location = state.window.location();
    let section_hash = format!("#{SECTION_ID}");
    if location.hash().ok().as_deref() != Some(section_hash.as_str()) {
        return;
    }
    if let Ok(history) = state.window.history() {
        let path = location.pathname().unwrap_or_else(|_| "/".to_string());
        let search = location.search().unwrap_or_default();
        let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(&format!("{path}{search}")));
    }
}

fn arm_settle_timer(state: &Rc<RefCell<State>>) {
    let (window, generation) = {
        let mut s = state.borrow_mut();
        s.settle_gen += 1;
        (s.window.clone(), s.settle_gen)
    };
    let st = state.clone();
    utils::set_timeout(&window, SCROLL_SETTLE_MS, move || {
        if st.borrow().settle_gen != generation {
            return;
        }
        let actions = st.borrow_mut().nav.on_settle_timeout();
        apply_actions(&st, actions, None);
    });
}

fn arm_idle_timer(state: &Rc<RefCell<State>>) {
    let (window, generation) = {
        let mut s = state.borrow_mut();
        s.idle_gen += 1;
        (s.window.clone(), s.idle_gen)
    };
    let st = state.clone();
    utils::set_timeout(&window, IDLE_TIMEOUT_MS, move || {
        if st.borrow().idle_gen != generation {
            return;
        }
        let actions = st.borrow_mut().nav.on_idle_fired();
        apply_actions(&st, actions, None);
    });
}

/// Execute the side effects a navigator transition asked for, in order.
pub fn apply_actions(state: &Rc<RefCell<State>>, actions: Vec<Action>, event: Option<&Event>) {
    for action in actions {
        match action {
            Action::ScrollSmooth(top) => {
                let window = state.borrow().window.clone();
                scroll_to(&window, top, true);
                arm_settle_timer(state);
            }
            Action::ScrollInstant(top) => {
                let window = state.borrow().window.clone();
                scroll_to(&window, top, false);
            }
            Action::PreventDefault => {
                if let Some(e) = event {
                    e.prevent_default();
                }
            }
            Action::StartIdleTimer => {
                // arrival also makes any pending settle timer moot
                state.borrow_mut().settle_gen += 1;
                arm_idle_timer(state);
            }
            Action::ClearIdleTimer => {
                state.borrow_mut().idle_gen += 1;
            }
            Action::ClearSectionHash => {
                let s = state.borrow();
                clear_section_hash(&s);
            }
        }
    }
}

/// True when this page view came from a hard reload.
pub fn was_hard_reload(window: &Window) -> bool {
    let Some(performance) = window.performance() else {
        return false;
    };
    let entries = performance.get_entries_by_type("navigation");
    if entries.length() > 0 {
        let entry = entries.get(0);
        return js_sys::Reflect::get(&entry, &JsValue::from_str("type"))
            .ok()
            .and_then(|v| v.as_string())
            .is_some_and(|t| t == "reload");
    }
    // legacy performance.navigation fallback
    js_sys::Reflect::get(performance.as_ref(), &JsValue::from_str("navigation"))
        .and_then(|nav| js_sys::Reflect::get(&nav, &JsValue::from_str("type")))
        .ok()
        .and_then(|v| v.as_f64())
        .is_some_and(|t| t == 1.0)
}

/// Wire the window-level scroll, wheel and activity listeners that drive the
/// section navigator.
pub fn attach_listeners(state: Rc<RefCell<State>>) -> Result<(), JsValue> {
    let window = state.borrow().window.clone();

    {
        let st = state.clone();
        let onscroll = Closure::<dyn FnMut(Event)>::wrap(Box::new(move |_e: Event| {
            let actions = {
                let mut s = st.borrow_mut();
                let y = s.window.scroll_y().unwrap_or(0.0);
                let boundary = content_boundary(&s);
                s.nav.on_scroll(y, boundary)
            };
            apply_actions(&st, actions, None);
        }));
        window.add_event_listener_with_callback("scroll", onscroll.as_ref().unchecked_ref())?;
        onscroll.forget();
    }

    {
        let st = state.clone();
        let onwheel = Closure::<dyn FnMut(WheelEvent)>::wrap(Box::new(move |e: WheelEvent| {
            let actions = {
                let mut s = st.borrow_mut();
                let y = s.window.scroll_y().unwrap_or(0.0);
                let boundary = content_boundary(&s);
                s.nav.on_wheel(y, e.delta_y(), boundary)
            };
            apply_actions(&st, actions, Some(&e));
        }));
        let opts = AddEventListenerOptions::new();
        opts.set_passive(false);
        window.add_event_listener_with_callback_and_add_event_listener_options(
            "wheel",
            onwheel.as_ref().unchecked_ref(),
            &opts,
        )?;
        onwheel.forget();
    }

    {
        let st = state.clone();
        let onactivity = Closure::<dyn FnMut(Event)>::wrap(Box::new(move |e: Event| {
            let is_keydown = e.type_() == "keydown";
            let actions = {
                let mut s = st.borrow_mut();
                let boundary = content_boundary(&s);
                s.nav.on_activity(boundary, is_keydown)
            };
            apply_actions(&st, actions, Some(&e));
        }));
        for event in ["mousemove", "mousedown", "touchstart", "touchmove", "keydown"] {
            window.add_event_listener_with_callback(event, onactivity.as_ref().unchecked_ref())?;
        }
        onactivity.forget();
    }

    Ok(())
}

/// Put `#section-2` into the address bar without adding a history entry.
pub fn set_section_hash(state: &State) {
    let location = state.window.location();
    let section_hash = format!("#{SECTION_ID}");
    if location.hash().ok().as_deref() == Some(section_hash.as_str()) {
        return;
    }
    if let Ok(history) = state.window.history() {
        let path = location.pathname().unwrap_or_else(|_| "/".to_string());
        let search = location.search().unwrap_or_default();
        let _ = history.replace_state_with_url(
            &JsValue::NULL,
            "",
            Some(&format!("{path}{search}{section_hash}")),
        );
    }
}
