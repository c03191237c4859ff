use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, HtmlImageElement, Window};

use seoulmap_core::catalog::{Catalog, Shop};
use seoulmap_core::images::{ImageFallback, encode_component};
use seoulmap_core::labels::{category_ko, region_ko};
use seoulmap_core::navigator::{region_neighbors, resolve};
use seoulmap_core::query::{build_landing_query, decode_component};
use seoulmap_core::scroll::{IDLE_TIMEOUT_MS, SECTION_ID};

use crate::utils::{self, escape_html};

const JUMP_FLAG: &str = "jumpToSection2";

struct DetailState {
    window: Window,
    fallback: ImageFallback,
    image_index: u32,
    idle_gen: u64,
}

pub fn mount(window: Window, document: Document, raw_segment: &str) -> Result<(), JsValue> {
    let name = decode_component(raw_segment.trim_end_matches('/'));
    let root: Element = match document.get_element_by_id("app") {
        Some(el) => el,
        None => document.body().ok_or("no body")?.into(),
    };

    let catalog = Catalog::from_json(include_str!("../../shops.json"))
        .map_err(|e| JsValue::from_str(&format!("shops.json: {e}")))?;

    let Some(shop) = resolve(catalog.shops(), &name) else {
        root.set_inner_html(&format!(
            "<p class=\"not-found\">상점 정보를 찾을 수 없습니다: {}</p>",
            escape_html(&name)
        ));
        return Ok(());
    };
    let shop = shop.clone();
    let (prev, next) = region_neighbors(catalog.shops(), &shop);
    root.set_inner_html(&render(&shop, prev, next));

    let state = Rc::new(RefCell::new(DetailState {
        window: window.clone(),
        fallback: ImageFallback::for_shop_image(&shop.name, 1),
        image_index: 1,
        idle_gen: 0,
    }));

    attach_photo_handlers(state.clone(), &document, shop.name.clone())?;
    attach_back_links(&document, &shop)?;
    attach_idle_watch(state, &window)?;
    Ok(())
}

fn render(shop: &Shop, prev: Option<&Shop>, next: Option<&Shop>) -> String {
    let cat_ko = category_ko(&shop.category).unwrap_or(&shop.category);
    let reg_ko = region_ko(&shop.region).unwrap_or(&shop.region);
    let mut html = format!(
        concat!(
            "<article class=\"shop-detail\">",
            "<img id=\"shop-photo\" alt=\"{name}\">",
            "<h1>{name}</h1>",
            "<p class=\"meta\">",
            "<a data-action=\"back-category\" data-en=\"{cat}\" data-ko=\"{cat_ko}\">{cat}</a>",
            " · ",
            "<a data-action=\"back-region\" data-en=\"{reg}\" data-ko=\"{reg_ko}\">{reg}</a>",
            "</p>",
        ),
        name = escape_html(&shop.name),
        cat = escape_html(&shop.category),
        cat_ko = escape_html(cat_ko),
        reg = escape_html(&shop.region),
        reg_ko = escape_html(reg_ko),
    );
    html.push_str("<dl class=\"address\">");
    for (label, value) in [
        ("도로명", &shop.road_address),
        ("지번", &shop.lot_address),
        ("우편번호", &shop.postal_code),
        ("전화", &shop.call_number),
    ] {
        if !value.is_empty() {
            html.push_str(&format!(
                "<dt>{label}</dt><dd>{}</dd>",
                escape_html(value)
            ));
        }
    }
    html.push_str("</dl><nav class=\"neighbors\">");
    if let Some(prev) = prev {
        html.push_str(&format!(
            "<a class=\"prev\" href=\"/shops/{}\">\u{2190} {}</a>",
            encode_component(&prev.name),
            escape_html(&prev.name)
        ));
    }
    if let Some(next) = next {
        html.push_str(&format!(
            "<a class=\"next\" href=\"/shops/{}\">{} \u{2192}</a>",
            encode_component(&next.name),
            escape_html(&next.name)
        ));
    }
    html.push_str("</nav></article>");
    html
}

fn photo(document: &Document) -> Option<HtmlImageElement> {
    document
        .get_element_by_id("shop-photo")
        .and_then(|el| el.dyn_into::<HtmlImageElement>().ok())
}

fn attach_photo_handlers(
    state: Rc<RefCell<DetailState>>,
    document: &Document,
    shop_name: String,
) -> Result<(), JsValue> {
    let Some(img) = photo(document) else {
        return Ok(());
    };
    if let Some(src) = state.borrow().fallback.current() {
        img.set_src(&utils::asset_url(src));
    }

    {
        let st = state.clone();
        let img2 = img.clone();
        let name = shop_name.clone();
        let onerror = Closure::<dyn FnMut()>::wrap(Box::new(move || {
            let mut s = st.borrow_mut();
            match s.fallback.on_error().map(str::to_string) {
                Some(src) => img2.set_src(&utils::asset_url(&src)),
                None => utils::warn(&format!(
                    "shop image: nothing loadable for {name}, tried {} candidates",
                    s.fallback.candidates().len()
                )),
            }
        }));
        img.set_onerror(Some(onerror.as_ref().unchecked_ref()));
        onerror.forget();
    }

    // hovering the photo flips to the alternate shot and back
    for (event, index) in [("mouseenter", 2u32), ("mouseleave", 1u32)] {
        let st = state.clone();
        let img2 = img.clone();
        let name = shop_name.clone();
        let onhover = Closure::<dyn FnMut()>::wrap(Box::new(move || {
            let mut s = st.borrow_mut();
            if s.image_index == index {
                return;
            }
            s.image_index = index;
            s.fallback = ImageFallback::for_shop_image(&name, index);
            if let Some(src) = s.fallback.current() {
                img2.set_src(&utils::asset_url(src));
            }
        }));
        img.add_event_listener_with_callback(event, onhover.as_ref().unchecked_ref())?;
        onhover.forget();
    }
    Ok(())
}

fn attach_back_links(document: &Document, shop: &Shop) -> Result<(), JsValue> {
    let category = shop.category.clone();
    let region = shop.region.clone();
    let onclick = Closure::<dyn FnMut(Event)>::wrap(Box::new(move |e: Event| {
        let Some(el) = e
            .target()
            .and_then(|t| t.dyn_into::<Element>().ok())
            .and_then(|el| el.closest("[data-action]").ok().flatten())
        else {
            return;
        };
        let query = match el.get_attribute("data-action").as_deref() {
            Some("back-category") => build_landing_query(std::slice::from_ref(&category), None),
            Some("back-region") => build_landing_query(&[], Some(&region)),
            _ => return,
        };
        go_to_landing(&query);
    }));
    document.add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
    onclick.forget();
    Ok(())
}

/// Navigate to the landing page with the filter pre-applied, asking it to
/// land directly on the content section.
fn go_to_landing(query: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    if let Ok(Some(storage)) = window.session_storage() {
        let _ = storage.set_item(JUMP_FLAG, "1");
    }
    let url = if query.is_empty() {
        format!("/#{SECTION_ID}")
    } else {
        format!("/?{query}#{SECTION_ID}")
    };
    let _ = window.location().set_href(&url);
}

fn attach_idle_watch(state: Rc<RefCell<DetailState>>, window: &Window) -> Result<(), JsValue> {
    arm_idle_timer(&state);
    let st = state.clone();
    let onactivity = Closure::<dyn FnMut()>::wrap(Box::new(move || {
        arm_idle_timer(&st);
    }));
    for event in ["mousemove", "mousedown", "keydown", "scroll", "touchstart"] {
        window.add_event_listener_with_callback(event, onactivity.as_ref().unchecked_ref())?;
    }
    onactivity.forget();
    Ok(())
}

/// After a minute without input the detail page gives the kiosk back to the
/// landing screen.
fn arm_idle_timer(state: &Rc<RefCell<DetailState>>) {
    let (window, generation) = {
        let mut s = state.borrow_mut();
        s.idle_gen += 1;
        (s.window.clone(), s.idle_gen)
    };
    let st = state.clone();
    utils::set_timeout(&window.clone(), IDLE_TIMEOUT_MS, move || {
        if st.borrow().idle_gen != generation {
            return;
        }
        if let Ok(Some(storage)) = window.session_storage() {
            let _ = storage.remove_item(JUMP_FLAG);
        }
        let _ = window.location().replace("/");
    });
}
