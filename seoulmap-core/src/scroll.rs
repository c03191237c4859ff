/// Tolerance for "arrived at the boundary" comparisons. Browsers report
/// fractional scroll offsets, so exact equality never holds.
pub const BOUNDARY_EPS: f64 = 8.0;
/// Fallback after a smooth scroll with no further scroll events.
pub const SCROLL_SETTLE_MS: i32 = 1200;
/// Inactivity before a locked content view slides back to the hero.
pub const IDLE_TIMEOUT_MS: i32 = 60_000;
/// Element id of the content section, also used as the location hash.
pub const SECTION_ID: &str = "section-2";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Section {
    AtHero,
    EnteringContent,
    AtContent,
    LeavingContent,
}

/// Side effects the driver must perform, in order. The machine itself never
/// touches the DOM.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Action {
    ScrollSmooth(f64),
    ScrollInstant(f64),
    PreventDefault,
    StartIdleTimer,
    ClearIdleTimer,
    ClearSectionHash,
}

/// Hero/content section navigator. While `locked`, the viewport is pinned at
/// the content boundary: upward wheel input is swallowed and stray scrolls
/// are snapped back, until the idle timeout or an explicit return releases
/// the pin.
#[derive(Clone, Debug)]
pub struct SectionNav {
    section: Section,
    locked: bool,
    auto_scroll_triggered: bool,
    target: f64,
}

impl Default for SectionNav {
    fn default() -> Self {
        SectionNav {
            section: Section::AtHero,
            locked: false,
            auto_scroll_triggered: false,
            target: 0.0,
        }
    }
}

impl SectionNav {
    pub fn section(&self) -> Section {
        self.section
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Begin the smooth scroll down to the content boundary.
    pub fn request_enter(&mut self, target: f64) -> Vec<Action> {
        self.section = Section::EnteringContent;
        self.auto_scroll_triggered = true;
        self.target = target;
        vec![Action::ScrollSmooth(target)]
    }

    fn arrive(&mut self) -> Vec<Action> {
        self.section = Section::AtContent;
        self.locked = true;
        vec![Action::StartIdleTimer]
    }

    pub fn on_scroll(&mut self, y: f64, boundary: f64) -> Vec<Action> {
        match self.section {
            Section::EnteringContent if (y - self.target).abs() <= BOUNDARY_EPS => self.arrive(),
            Section::LeavingContent if y <= BOUNDARY_EPS => {
                self.section = Section::AtHero;
                Vec::new()
            }
            Section::AtContent if self.locked && y < boundary - BOUNDARY_EPS => {
                vec![Action::ScrollInstant(boundary)]
            }
            _ => Vec::new(),
        }
    }

    /// Settle timer fired without the scroll position ever matching the
    /// target, e.g. after a layout shift. Treat the transition as finished.
    pub fn on_settle_timeout(&mut self) -> Vec<Action> {
        match self.section {
            Section::EnteringContent => self.arrive(),
            Section::LeavingContent => {
                self.section = Section::AtHero;
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    pub fn on_wheel(&mut self, y: f64, delta_y: f64, boundary: f64) -> Vec<Action> {
        match self.section {
            Section::AtHero if delta_y > 0.0 => {
                let mut actions = vec![Action::PreventDefault];
                if !self.auto_scroll_triggered {
                    actions.extend(self.request_enter(boundary));
                }
                actions
            }
            Section::EnteringContent if delta_y > 0.0 && y < boundary - BOUNDARY_EPS => {
                vec![Action::PreventDefault]
            }
            Section::AtContent
                if self.locked && delta_y < 0.0 && y + delta_y < boundary - BOUNDARY_EPS =>
            {
                vec![Action::PreventDefault, Action::ScrollInstant(boundary)]
            }
            _ => Vec::new(),
        }
    }

    /// User activity (pointer, key, touch). At the hero the first such
    /// interaction enters the content section; while locked it restarts the
    /// idle countdown. Only key presses get their default suppressed, so
    /// pointer movement stays native once the descent has begun.
    pub fn on_activity(&mut self, boundary: f64, is_keydown: bool) -> Vec<Action> {
        if self.locked {
            return vec![Action::StartIdleTimer];
        }
        if self.section == Section::AtHero && !self.auto_scroll_triggered {
            let mut actions = Vec::new();
            if is_keydown {
                actions.push(Action::PreventDefault);
            }
            actions.extend(self.request_enter(boundary));
            return actions;
        }
        Vec::new()
    }

    /// Explicit return, e.g. the logo was clicked.
    pub fn return_to_hero(&mut self) -> Vec<Action> {
        self.locked = false;
        self.auto_scroll_triggered = false;
        self.section = Section::LeavingContent;
        vec![
            Action::ClearIdleTimer,
            Action::ScrollSmooth(0.0),
            Action::ClearSectionHash,
        ]
    }

    pub fn on_idle_fired(&mut self) -> Vec<Action> {
        if self.locked {
            self.return_to_hero()
        } else {
            Vec::new()
        }
    }

    /// Hard reload always lands on the hero, whatever the hash says.
    pub fn on_reload(&mut self) -> Vec<Action> {
        *self = SectionNav::default();
        vec![Action::ScrollInstant(0.0), Action::ClearSectionHash]
    }

    /// Jump straight into the locked content state without animating, used
    /// when arriving from the detail page with a section flag set.
    pub fn force_lock(&mut self) -> Vec<Action> {
        self.section = Section::AtContent;
        self.locked = true;
        self.auto_scroll_triggered = true;
        vec![Action::StartIdleTimer]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDARY: f64 = 900.0;

    #[test]
    fn first_activity_at_hero_starts_the_descent() {
        let mut nav = SectionNav::default();
        let actions = nav.on_activity(BOUNDARY, false);
        assert_eq!(actions, vec![Action::ScrollSmooth(BOUNDARY)]);
        assert_eq!(nav.section(), Section::EnteringContent);
        // further activity mid-transition does nothing
        assert!(nav.on_activity(BOUNDARY, false).is_empty());
    }

    #[test]
    fn keydown_activity_also_prevents_default() {
        let mut nav = SectionNav::default();
        let actions = nav.on_activity(BOUNDARY, true);
        assert_eq!(
            actions,
            vec![Action::PreventDefault, Action::ScrollSmooth(BOUNDARY)]
        );
    }

    #[test]
    fn arrival_within_tolerance_locks_and_arms_idle_timer() {
        let mut nav = SectionNav::default();
        nav.request_enter(BOUNDARY);
        assert!(nav.on_scroll(BOUNDARY / 2.0, BOUNDARY).is_empty());
        let actions = nav.on_scroll(BOUNDARY - 5.0, BOUNDARY);
        assert_eq!(actions, vec![Action::StartIdleTimer]);
        assert_eq!(nav.section(), Section::AtContent);
        assert!(nav.is_locked());
    }

    #[test]
    fn settle_timeout_forces_arrival() {
        let mut nav = SectionNav::default();
        nav.request_enter(BOUNDARY);
        let actions = nav.on_settle_timeout();
        assert_eq!(actions, vec![Action::StartIdleTimer]);
        assert!(nav.is_locked());
    }

    #[test]
    fn locked_view_snaps_back_after_stray_scroll() {
        let mut nav = SectionNav::default();
        nav.request_enter(BOUNDARY);
        nav.on_scroll(BOUNDARY, BOUNDARY);
        let actions = nav.on_scroll(200.0, BOUNDARY);
        assert_eq!(actions, vec![Action::ScrollInstant(BOUNDARY)]);
    }

    #[test]
    fn upward_wheel_is_swallowed_while_locked() {
        let mut nav = SectionNav::default();
        nav.request_enter(BOUNDARY);
        nav.on_scroll(BOUNDARY, BOUNDARY);
        let actions = nav.on_wheel(BOUNDARY, -120.0, BOUNDARY);
        assert_eq!(
            actions,
            vec![Action::PreventDefault, Action::ScrollInstant(BOUNDARY)]
        );
        // downward wheel keeps working
        assert!(nav.on_wheel(BOUNDARY, 120.0, BOUNDARY).is_empty());
    }

    #[test]
    fn downward_wheel_at_the_hero_starts_the_descent() {
        let mut nav = SectionNav::default();
        let actions = nav.on_wheel(0.0, 120.0, BOUNDARY);
        assert_eq!(
            actions,
            vec![Action::PreventDefault, Action::ScrollSmooth(BOUNDARY)]
        );
        assert_eq!(nav.section(), Section::EnteringContent);
        // upward wheel at the hero is native
        let mut nav = SectionNav::default();
        assert!(nav.on_wheel(0.0, -120.0, BOUNDARY).is_empty());
    }

    #[test]
    fn pointer_activity_at_the_hero_starts_the_descent() {
        let mut nav = SectionNav::default();
        let actions = nav.on_activity(BOUNDARY, false);
        assert_eq!(actions, vec![Action::ScrollSmooth(BOUNDARY)]);
        assert_eq!(nav.section(), Section::EnteringContent);
        // while locked the same input only feeds the idle countdown
        let mut nav = SectionNav::default();
        nav.force_lock();
        assert_eq!(nav.on_activity(BOUNDARY, false), vec![Action::StartIdleTimer]);
    }

    #[test]
    fn downward_wheel_during_transition_is_swallowed() {
        let mut nav = SectionNav::default();
        nav.request_enter(BOUNDARY);
        let actions = nav.on_wheel(100.0, 120.0, BOUNDARY);
        assert_eq!(actions, vec![Action::PreventDefault]);
    }

    #[test]
    fn idle_timeout_returns_to_hero_and_clears_hash() {
        let mut nav = SectionNav::default();
        nav.force_lock();
        let actions = nav.on_idle_fired();
        assert_eq!(
            actions,
            vec![
                Action::ClearIdleTimer,
                Action::ScrollSmooth(0.0),
                Action::ClearSectionHash,
            ]
        );
        assert_eq!(nav.section(), Section::LeavingContent);
        assert!(!nav.is_locked());
        // landing near the top completes the transition
        nav.on_scroll(0.0, BOUNDARY);
        assert_eq!(nav.section(), Section::AtHero);
    }

    #[test]
    fn idle_fired_after_unlock_is_a_no_op() {
        let mut nav = SectionNav::default();
        nav.force_lock();
        nav.return_to_hero();
        assert!(nav.on_idle_fired().is_empty());
    }

    #[test]
    fn reload_resets_to_the_hero() {
        let mut nav = SectionNav::default();
        nav.force_lock();
        let actions = nav.on_reload();
        assert_eq!(
            actions,
            vec![Action::ScrollInstant(0.0), Action::ClearSectionHash]
        );
        assert_eq!(nav.section(), Section::AtHero);
        assert!(!nav.is_locked());
        // the descent can be triggered again afterwards
        assert!(!nav.on_activity(BOUNDARY, false).is_empty());
    }

    #[test]
    fn force_lock_skips_the_animation() {
        let mut nav = SectionNav::default();
        let actions = nav.force_lock();
        assert_eq!(actions, vec![Action::StartIdleTimer]);
        assert_eq!(nav.section(), Section::AtContent);
        assert!(nav.is_locked());
    }
}
