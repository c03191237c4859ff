use crate::images::DEFAULT_MAP_IMAGE;

/// How long a slide sits fully visible before the next transition starts.
pub const HOLD_MS: i32 = 3000;
/// Duration of the cross-fade between two slides.
pub const FADE_MS: i32 = 3000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Holding,
    Preloading,
    FadingIn,
}

/// Hero slideshow state machine. Every timer and preload callback carries the
/// cycle id it was started under; a callback whose id no longer matches is
/// stale and must be dropped, so interrupted cycles can never double-advance
/// or fight a newer cycle.
#[derive(Clone, Debug)]
pub struct Carousel {
    images: Vec<String>,
    current: usize,
    pending: usize,
    cycle: u64,
    phase: Phase,
}

impl Carousel {
    pub fn new(images: Vec<String>) -> Self {
        let images = if images.is_empty() {
            vec![DEFAULT_MAP_IMAGE.to_string()]
        } else {
            images
        };
        Carousel {
            images,
            current: 0,
            pending: 0,
            cycle: 0,
            phase: Phase::Idle,
        }
    }

    pub fn current_image(&self) -> &str {
        &self.images[self.current]
    }

    pub fn images(&self) -> &[String] {
        &self.images
    }

    /// A single image never cycles.
    pub fn can_cycle(&self) -> bool {
        self.images.len() >= 2
    }

    /// Start a new hold period. Returns the cycle id the caller must thread
    /// through the hold timer, or `None` when cycling is pointless.
    pub fn begin_cycle(&mut self) -> Option<u64> {
        if !self.can_cycle() {
            self.phase = Phase::Idle;
            return None;
        }
        self.cycle += 1;
        self.pending = (self.current + 1) % self.images.len();
        self.phase = Phase::Holding;
        Some(self.cycle)
    }

    /// Hold timer fired. Returns the image to preload, or `None` if the
    /// callback is stale.
    pub fn hold_elapsed(&mut self, cycle: u64) -> Option<String> {
        if cycle != self.cycle || self.phase != Phase::Holding {
            return None;
        }
        self.phase = Phase::Preloading;
        Some(self.images[self.pending].clone())
    }

    /// Preload finished. Returns the image to fade in, or `None` when stale.
    pub fn preload_done(&mut self, cycle: u64) -> Option<String> {
        if cycle != self.cycle || self.phase != Phase::Preloading {
            return None;
        }
        self.phase = Phase::FadingIn;
        Some(self.images[self.pending].clone())
    }

    /// Fade timer fired. Commits the pending slide; returns whether the
    /// commit actually happened.
    pub fn fade_elapsed(&mut self, cycle: u64) -> bool {
        if cycle != self.cycle || self.phase != Phase::FadingIn {
            return false;
        }
        self.current = self.pending;
        self.phase = Phase::Idle;
        true
    }

    /// Drop an image that failed to load mid-rotation. Invalidates any
    /// in-flight cycle and leaves the machine idle so the driver restarts it.
    pub fn remove_failed(&mut self, src: &str) {
        let current_src = self.images.get(self.current).cloned();
        self.images.retain(|img| img != src);
        if self.images.is_empty() {
            self.images.push(DEFAULT_MAP_IMAGE.to_string());
        }
        // removal shifts indices, so find the on-screen image again by value
        self.current = current_src
            .and_then(|c| self.images.iter().position(|img| *img == c))
            .unwrap_or(0);
        self.pending = self.current;
        self.cycle += 1;
        self.phase = Phase::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slides(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("hero/{i}.png")).collect()
    }

    #[test]
    fn full_cycle_advances_one_slide() {
        let mut c = Carousel::new(slides(3));
        let id = c.begin_cycle().unwrap();
        assert_eq!(c.hold_elapsed(id).as_deref(), Some("hero/2.png"));
        assert_eq!(c.preload_done(id).as_deref(), Some("hero/2.png"));
        assert!(c.fade_elapsed(id));
        assert_eq!(c.current_image(), "hero/2.png");
    }

    #[test]
    fn wraps_from_last_slide_to_first() {
        let mut c = Carousel::new(slides(2));
        for _ in 0..2 {
            let id = c.begin_cycle().unwrap();
            c.hold_elapsed(id);
            c.preload_done(id);
            c.fade_elapsed(id);
        }
        assert_eq!(c.current_image(), "hero/1.png");
    }

    #[test]
    fn stale_cycle_callbacks_are_ignored() {
        let mut c = Carousel::new(slides(3));
        let old = c.begin_cycle().unwrap();
        c.hold_elapsed(old);
        // something restarts the rotation before the old preload lands
        let new = c.begin_cycle().unwrap();
        assert_eq!(c.preload_done(old), None);
        assert!(!c.fade_elapsed(old));
        assert_eq!(c.hold_elapsed(new).as_deref(), Some("hero/2.png"));
    }

    #[test]
    fn out_of_phase_callbacks_are_ignored() {
        let mut c = Carousel::new(slides(2));
        let id = c.begin_cycle().unwrap();
        // fade before preload ever ran
        assert!(!c.fade_elapsed(id));
        assert_eq!(c.hold_elapsed(id).as_deref(), Some("hero/2.png"));
        // second hold with the same id is stale
        assert_eq!(c.hold_elapsed(id), None);
    }

    #[test]
    fn single_image_never_cycles() {
        let mut c = Carousel::new(slides(1));
        assert!(!c.can_cycle());
        assert_eq!(c.begin_cycle(), None);
        assert_eq!(c.current_image(), "hero/1.png");
    }

    #[test]
    fn empty_list_degrades_to_default_map() {
        let c = Carousel::new(Vec::new());
        assert_eq!(c.current_image(), DEFAULT_MAP_IMAGE);
    }

    #[test]
    fn removing_failed_image_invalidates_inflight_cycle() {
        let mut c = Carousel::new(slides(3));
        let id = c.begin_cycle().unwrap();
        c.hold_elapsed(id);
        c.remove_failed("hero/2.png");
        assert_eq!(c.preload_done(id), None);
        assert_eq!(c.images().len(), 2);
        // machine restarts cleanly afterwards
        let id = c.begin_cycle().unwrap();
        assert_eq!(c.hold_elapsed(id).as_deref(), Some("hero/3.png"));
    }

    #[test]
    fn removing_an_earlier_image_keeps_the_visible_slide() {
        let mut c = Carousel::new(slides(3));
        // advance to the last slide, then the wrap-around preload fails
        for _ in 0..2 {
            let id = c.begin_cycle().unwrap();
            c.hold_elapsed(id);
            c.preload_done(id);
            c.fade_elapsed(id);
        }
        assert_eq!(c.current_image(), "hero/3.png");
        c.remove_failed("hero/1.png");
        assert_eq!(c.current_image(), "hero/3.png");
        let id = c.begin_cycle().unwrap();
        assert_eq!(c.hold_elapsed(id).as_deref(), Some("hero/2.png"));
    }

    #[test]
    fn removing_last_image_refills_default() {
        let mut c = Carousel::new(slides(1));
        c.remove_failed("hero/1.png");
        assert_eq!(c.current_image(), DEFAULT_MAP_IMAGE);
        assert!(!c.can_cycle());
    }
}
