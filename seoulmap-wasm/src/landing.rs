use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, HtmlImageElement, HtmlInputElement, Window};

use seoulmap_core::carousel::Carousel;
use seoulmap_core::catalog::Catalog;
use seoulmap_core::filter::{self, FilterState};
use seoulmap_core::images::{
    HERO_TITLE_EN, HERO_TITLE_KO, ImageFallback, LOGO_EN, LOGO_KO, SEARCH_ICON, encode_component,
};
use seoulmap_core::labels::{category_ko, region_ko};
use seoulmap_core::query::{OpenMenu, parse_landing_query};
use seoulmap_core::scroll::{SECTION_ID, SectionNav};

use crate::hero;
use crate::scrollnav;
use crate::state::{STATE, State};
use crate::utils::{self, escape_html};

const JUMP_FLAG: &str = "jumpToSection2";

pub fn mount(window: Window, document: Document) -> Result<(), JsValue> {
    let root: Element = match document.get_element_by_id("app") {
        Some(el) => el,
        None => document.body().ok_or("no body")?.into(),
    };
    root.set_inner_html(&skeleton());

    let catalog = Catalog::from_json(include_str!("../../shops.json"))
        .map_err(|e| JsValue::from_str(&format!("shops.json: {e}")))?;

    let search = window.location().search().unwrap_or_default();
    let query = parse_landing_query(&search);
    let filters = FilterState {
        selected_categories: query.categories,
        selected_region: query.region,
        ..FilterState::default()
    };

    let map_fallback = match filters.selected_region.as_deref() {
        Some(region) => ImageFallback::for_region_map(region),
        None => ImageFallback::for_default_map(),
    };

    let state = Rc::new(RefCell::new(State {
        window: window.clone(),
        document: document.clone(),
        catalog,
        filters,
        open_menu: query.open,
        search_open: false,
        carousel: Carousel::new(Vec::new()),
        nav: SectionNav::default(),
        map_fallback,
        idle_gen: 0,
        settle_gen: 0,
    }));
    STATE.with(|st| st.replace(Some(state.clone())));

    // browser scroll restoration fights the navigator's own positioning
    if let Ok(history) = window.history() {
        let _ = js_sys::Reflect::set(
            history.as_ref(),
            &JsValue::from_str("scrollRestoration"),
            &JsValue::from_str("manual"),
        );
    }

    attach_map_error_handler(state.clone())?;
    attach_delegated_events(state.clone())?;
    scrollnav::attach_listeners(state.clone())?;

    render_all(&state.borrow());
    hero::init();

    let jump_requested = take_jump_flag(&window);
    if scrollnav::was_hard_reload(&window) {
        let actions = state.borrow_mut().nav.on_reload();
        scrollnav::apply_actions(&state, actions, None);
    } else if jump_requested {
        let actions = state.borrow_mut().nav.force_lock();
        scrollnav::apply_actions(&state, actions, None);
        // snap onto the section once layout has settled
        let window2 = state.borrow().window.clone();
        let st = state.clone();
        utils::set_timeout(&window2, 0, move || {
            let boundary = scrollnav::content_boundary(&st.borrow());
            scrollnav::apply_actions(
                &st,
                vec![seoulmap_core::scroll::Action::ScrollInstant(boundary)],
                None,
            );
        });
    } else if window.location().hash().ok().as_deref() == Some(format!("#{SECTION_ID}").as_str()) {
        let actions = {
            let mut s = state.borrow_mut();
            let boundary = scrollnav::content_boundary(&s);
            s.nav.request_enter(boundary)
        };
        scrollnav::apply_actions(&state, actions, None);
    }

    Ok(())
}

fn take_jump_flag(window: &Window) -> bool {
    let Ok(Some(storage)) = window.session_storage() else {
        return false;
    };
    let set = storage.get_item(JUMP_FLAG).ok().flatten().is_some();
    if set {
        let _ = storage.remove_item(JUMP_FLAG);
    }
    set
}

fn skeleton() -> String {
    format!(
        concat!(
            "<section id=\"hero\">",
            "<img id=\"hero-base\" class=\"hero-img\" alt=\"\">",
            "<img id=\"hero-overlay\" class=\"hero-img\" style=\"opacity:0\" alt=\"\">",
            "<div class=\"hero-title\">",
            "<img src=\"{title_en}\" data-src-en=\"{title_en}\" data-src-ko=\"{title_ko}\" alt=\"Seoul map\">",
            "</div>",
            "<button class=\"hero-enter\" data-action=\"enter-content\">&#x25BC;</button>",
            "</section>",
            "<section id=\"{section}\">",
            "<header class=\"topbar\">",
            "<span class=\"logo\" data-action=\"logo\">",
            "<img src=\"{logo_en}\" data-src-en=\"{logo_en}\" data-src-ko=\"{logo_ko}\" alt=\"logo\">",
            "</span>",
            "<div id=\"filter-bar\"></div>",
            "</header>",
            "<div id=\"chips\"></div>",
            "<div class=\"content\">",
            "<aside class=\"map-panel\"><img id=\"region-map\" alt=\"\"></aside>",
            "<div class=\"listing\">",
            "<div id=\"shop-grid\"></div>",
            "<nav id=\"pagination\"></nav>",
            "</div></div></section>",
        ),
        title_en = utils::asset_url(HERO_TITLE_EN),
        title_ko = utils::asset_url(HERO_TITLE_KO),
        logo_en = utils::asset_url(LOGO_EN),
        logo_ko = utils::asset_url(LOGO_KO),
        section = SECTION_ID,
    )
}

fn attach_map_error_handler(state: Rc<RefCell<State>>) -> Result<(), JsValue> {
    let document = state.borrow().document.clone();
    let Some(img) = document
        .get_element_by_id("region-map")
        .and_then(|el| el.dyn_into::<HtmlImageElement>().ok())
    else {
        return Ok(());
    };
    let img2 = img.clone();
    let onerror = Closure::<dyn FnMut()>::wrap(Box::new(move || {
        let next = state
            .borrow_mut()
            .map_fallback
            .on_error()
            .map(str::to_string);
        match next {
            Some(src) => img2.set_src(&utils::asset_url(&src)),
            None => utils::warn("region map: all candidates and placeholders failed"),
        }
    }));
    img.set_onerror(Some(onerror.as_ref().unchecked_ref()));
    onerror.forget();
    Ok(())
}

fn attach_delegated_events(state: Rc<RefCell<State>>) -> Result<(), JsValue> {
    let document = state.borrow().document.clone();

    {
        let st = state.clone();
        let onclick = Closure::<dyn FnMut(Event)>::wrap(Box::new(move |e: Event| {
            let Some(actor) = closest_actor(&e) else { return };
            let action = actor.get_attribute("data-action").unwrap_or_default();
            let value = actor.get_attribute("data-value").unwrap_or_default();
            handle_action(&st, &e, &action, &value);
        }));
        document.add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
        onclick.forget();
    }

    {
        let st = state.clone();
        let oninput = Closure::<dyn FnMut(Event)>::wrap(Box::new(move |e: Event| {
            let Some(input) = e
                .target()
                .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
            else {
                return;
            };
            if input.id() != "search-input" {
                return;
            }
            st.borrow_mut().filters.set_search(&input.value());
            let s = st.borrow();
            render_grid(&s);
            render_pagination(&s);
        }));
        document.add_event_listener_with_callback("input", oninput.as_ref().unchecked_ref())?;
        oninput.forget();
    }

    // bilingual hover swap: text via data-en/data-ko, artwork via data-src-*
    {
        let swap = Closure::<dyn FnMut(Event)>::wrap(Box::new(move |e: Event| {
            let Some(el) = e
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .and_then(|el| el.closest("[data-ko],[data-src-ko]").ok().flatten())
            else {
                return;
            };
            let korean = e.type_() == "mouseover";
            if let Some(src) = el.get_attribute(if korean { "data-src-ko" } else { "data-src-en" })
            {
                let _ = el.set_attribute("src", &src);
            } else if let Some(text) =
                el.get_attribute(if korean { "data-ko" } else { "data-en" })
            {
                el.set_text_content(Some(&text));
            }
        }));
        document.add_event_listener_with_callback("mouseover", swap.as_ref().unchecked_ref())?;
        document.add_event_listener_with_callback("mouseout", swap.as_ref().unchecked_ref())?;
        swap.forget();
    }

    Ok(())
}

fn closest_actor(e: &Event) -> Option<Element> {
    e.target()?
        .dyn_into::<Element>()
        .ok()?
        .closest("[data-action]")
        .ok()
        .flatten()
}

fn handle_action(state: &Rc<RefCell<State>>, e: &Event, action: &str, value: &str) {
    match action {
        "enter-content" => {
            let actions = {
                let mut s = state.borrow_mut();
                let boundary = scrollnav::content_boundary(&s);
                s.nav.request_enter(boundary)
            };
            scrollnav::apply_actions(state, actions, Some(e));
        }
        "logo" => {
            // logo resets the filters and re-centers on the content section
            let mut actions = {
                let mut s = state.borrow_mut();
                s.filters.clear_all();
                s.open_menu = None;
                s.map_fallback = ImageFallback::for_default_map();
                s.nav.force_lock()
            };
            render_all(&state.borrow());
            scrollnav::set_section_hash(&state.borrow());
            let boundary = scrollnav::content_boundary(&state.borrow());
            actions.push(seoulmap_core::scroll::Action::ScrollSmooth(boundary));
            scrollnav::apply_actions(state, actions, Some(e));
        }
        "toggle-category" => {
            toggle_menu(state, OpenMenu::Category);
        }
        "toggle-region" => {
            toggle_menu(state, OpenMenu::Region);
            {
                let mut s = state.borrow_mut();
                // the open dropdown always previews the whole-city map first
                if s.open_menu == Some(OpenMenu::Region) && s.filters.selected_region.is_none() {
                    s.map_fallback = ImageFallback::for_default_map();
                }
            }
            render_map(&state.borrow());
        }
        "toggle-search" => {
            {
                let mut s = state.borrow_mut();
                s.search_open = !s.search_open;
            }
            render_filter_bar(&state.borrow());
        }
        "select-category" => {
            {
                let mut s = state.borrow_mut();
                if value.is_empty() {
                    s.filters.selected_categories.clear();
                    s.filters.current_page = 1;
                } else {
                    s.filters.toggle_category(value);
                }
            }
            render_all(&state.borrow());
        }
        "select-region" => {
            {
                let mut s = state.borrow_mut();
                if value.is_empty() {
                    s.filters.set_region(None);
                    s.map_fallback = ImageFallback::for_default_map();
                } else {
                    s.filters.set_region(Some(value.to_string()));
                    s.map_fallback = ImageFallback::for_region_map(value);
                }
            }
            render_all(&state.borrow());
        }
        "remove-category" => {
            state.borrow_mut().filters.toggle_category(value);
            render_all(&state.borrow());
        }
        "clear-all" => {
            {
                let mut s = state.borrow_mut();
                s.filters.clear_all();
                s.open_menu = None;
                s.map_fallback = ImageFallback::for_default_map();
            }
            render_all(&state.borrow());
        }
        "page" => {
            if let Ok(page) = value.parse::<usize>() {
                state.borrow_mut().filters.current_page = page;
                {
                    let s = state.borrow();
                    render_grid(&s);
                    render_pagination(&s);
                }
                let boundary = scrollnav::content_boundary(&state.borrow());
                scrollnav::apply_actions(
                    state,
                    vec![seoulmap_core::scroll::Action::ScrollSmooth(boundary)],
                    None,
                );
            }
        }
        _ => {}
    }
}

fn toggle_menu(state: &Rc<RefCell<State>>, menu: OpenMenu) {
    {
        let mut s = state.borrow_mut();
        s.open_menu = if s.open_menu == Some(menu) {
            None
        } else {
            Some(menu)
        };
    }
    render_filter_bar(&state.borrow());
}

fn set_html(s: &State, id: &str, html: &str) {
    if let Some(el) = s.document.get_element_by_id(id) {
        el.set_inner_html(html);
    }
}

pub fn render_all(s: &State) {
    render_filter_bar(s);
    render_chips(s);
    render_map(s);
    render_grid(s);
    render_pagination(s);
}

fn render_filter_bar(s: &State) {
    let mut html = String::new();
    html.push_str(
        "<button class=\"filter-btn\" data-action=\"toggle-category\" \
         data-en=\"Category\" data-ko=\"카테고리\">Category</button>",
    );
    if s.open_menu == Some(OpenMenu::Category) {
        html.push_str("<ul class=\"dropdown\">");
        html.push_str(
            "<li data-action=\"select-category\" data-value=\"\">전체</li>",
        );
        for category in s.catalog.categories() {
            let marker = if s.filters.selected_categories.iter().any(|c| c == category) {
                " class=\"selected\""
            } else {
                ""
            };
            let ko = category_ko(category).unwrap_or(category);
            html.push_str(&format!(
                "<li{marker} data-action=\"select-category\" data-value=\"{v}\" \
                 data-en=\"{v}\" data-ko=\"{ko}\">{v}</li>",
                v = escape_html(category),
                ko = escape_html(ko),
            ));
        }
        html.push_str("</ul>");
    }
    html.push_str(
        "<button class=\"filter-btn\" data-action=\"toggle-region\" \
         data-en=\"Region\" data-ko=\"지역\">Region</button>",
    );
    if s.open_menu == Some(OpenMenu::Region) {
        html.push_str("<ul class=\"dropdown\">");
        html.push_str("<li data-action=\"select-region\" data-value=\"\">전체</li>");
        for region in filter::ordered_regions(&s.catalog) {
            let marker = if s.filters.selected_region.as_deref() == Some(region) {
                " class=\"selected\""
            } else {
                ""
            };
            let ko = region_ko(region).unwrap_or(region);
            html.push_str(&format!(
                "<li{marker} data-action=\"select-region\" data-value=\"{v}\" \
                 data-en=\"{v}\" data-ko=\"{ko}\">{v}</li>",
                v = escape_html(region),
                ko = escape_html(ko),
            ));
        }
        html.push_str("</ul>");
    }
    html.push_str(&format!(
        "<button class=\"search-btn\" data-action=\"toggle-search\">\
         <img src=\"{}\" alt=\"search\"></button>",
        utils::asset_url(SEARCH_ICON)
    ));
    if s.search_open {
        html.push_str(&format!(
            "<input id=\"search-input\" type=\"text\" placeholder=\"상점 이름 검색\" value=\"{}\">",
            escape_html(&s.filters.search_query)
        ));
    }
    set_html(s, "filter-bar", &html);
}

fn render_chips(s: &State) {
    let mut html = String::new();
    for category in &s.filters.selected_categories {
        html.push_str(&format!(
            "<span class=\"chip\" data-action=\"remove-category\" data-value=\"{v}\">{v} \u{2715}</span>",
            v = escape_html(category)
        ));
    }
    if let Some(region) = &s.filters.selected_region {
        html.push_str(&format!(
            "<span class=\"chip\" data-action=\"select-region\" data-value=\"\">{} \u{2715}</span>",
            escape_html(region)
        ));
    }
    if !html.is_empty() {
        html.push_str(
            "<button class=\"chip chip-clear\" data-action=\"clear-all\" \
             data-en=\"Clear all\" data-ko=\"모두 지우기\">Clear all</button>",
        );
    }
    set_html(s, "chips", &html);
}

fn render_map(s: &State) {
    if let Some(img) = s
        .document
        .get_element_by_id("region-map")
        .and_then(|el| el.dyn_into::<HtmlImageElement>().ok())
        && let Some(src) = s.map_fallback.current()
    {
        img.set_src(&utils::asset_url(src));
    }
}

fn render_grid(s: &State) {
    let sections = filter::region_sections(&s.catalog, &s.filters);
    if sections.is_empty() {
        set_html(s, "shop-grid", "<p class=\"empty\">검색 결과가 없습니다</p>");
        return;
    }
    let mut html = String::new();
    for section in filter::page(&sections, s.filters.current_page) {
        let ko = region_ko(section.title).unwrap_or(section.title);
        html.push_str(&format!(
            "<section class=\"region\"><h2 data-en=\"{t}\" data-ko=\"{ko}\">{t}</h2>",
            t = escape_html(section.title),
            ko = escape_html(ko),
        ));
        for row in &section.rows {
            html.push_str("<div class=\"row\">");
            for shop in row {
                let ko = category_ko(&shop.category).unwrap_or(&shop.category);
                html.push_str(&format!(
                    "<a class=\"shop-card\" href=\"/shops/{href}\">\
                     <span class=\"shop-name\">{name}</span>\
                     <span class=\"shop-cat\" data-en=\"{cat}\" data-ko=\"{ko}\">{cat}</span></a>",
                    href = encode_component(&shop.name),
                    name = escape_html(&shop.name),
                    cat = escape_html(&shop.category),
                    ko = escape_html(ko),
                ));
            }
            html.push_str("</div>");
        }
        html.push_str("</section>");
    }
    set_html(s, "shop-grid", &html);
}

fn render_pagination(s: &State) {
    let sections = filter::region_sections(&s.catalog, &s.filters);
    let pages = filter::total_pages(sections.len());
    if pages <= 1 {
        set_html(s, "pagination", "");
        return;
    }
    let mut html = String::new();
    for page in 1..=pages {
        let marker = if page == s.filters.current_page {
            " class=\"current\""
        } else {
            ""
        };
        html.push_str(&format!(
            "<button{marker} data-action=\"page\" data-value=\"{page}\">{page}</button>"
        ));
    }
    set_html(s, "pagination", &html);
}
