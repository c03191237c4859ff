use std::cell::RefCell;
use std::rc::Rc;

use web_sys::{Document, Window};

use seoulmap_core::carousel::Carousel;
use seoulmap_core::catalog::Catalog;
use seoulmap_core::filter::FilterState;
use seoulmap_core::images::ImageFallback;
use seoulmap_core::query::OpenMenu;
use seoulmap_core::scroll::SectionNav;

/// Shared landing page state. Timer callbacks carry the generation they were
/// armed under; bumping a generation cancels every timer armed before it.
pub struct State {
    pub window: Window,
    pub document: Document,
    pub catalog: Catalog,
    pub filters: FilterState,
    pub open_menu: Option<OpenMenu>,
    pub search_open: bool,
    pub carousel: Carousel,
    pub nav: SectionNav,
    pub map_fallback: ImageFallback,
    pub idle_gen: u64,
    pub settle_gen: u64,
}

thread_local! {
    pub static STATE: RefCell<Option<Rc<RefCell<State>>>> = const { RefCell::new(None) };
}
