// Nav menu toggling and link activation
//
// The menu panel mirrors a collapsible nav: link activation always closes
// it, whether or not it was open. Activating a link also marks it active
// immediately, ahead of the scrollspy's next recompute; the spy is free to
// overwrite that mark once the glide starts moving the viewport.

use super::router;
use super::scroll::ScrollState;
use crate::page::{Page, SectionId};
use std::time::Instant;

/// Open or close the menu panel
pub fn toggle_menu(page: &mut Page) {
    page.nav.menu_open = !page.nav.menu_open;
}

/// Close the menu panel; harmless when already closed
pub fn close_menu(page: &mut Page) {
    page.nav.menu_open = false;
}

/// Activate a nav link: close the menu, optimistically mark the link
/// active, and route to its section. Returns whether navigation started.
pub fn activate_link(
    page: &mut Page,
    scroll: &mut ScrollState,
    id: SectionId,
    now: Instant,
) -> bool {
    close_menu(page);
    page.set_active_link(id);
    router::route_to_section(page, scroll, id, now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Portfolio;

    fn fixture() -> (Page, ScrollState) {
        let page = Page::build(&Portfolio::sample(), 80);
        let mut scroll = ScrollState::new();
        scroll.set_bounds(page.layout.height_px(), 400.0);
        (page, scroll)
    }

    #[test]
    fn test_toggle_menu_flips_state() {
        let (mut page, _) = fixture();
        assert!(!page.nav.menu_open);
        toggle_menu(&mut page);
        assert!(page.nav.menu_open);
        toggle_menu(&mut page);
        assert!(!page.nav.menu_open);
    }

    #[test]
    fn test_close_menu_is_idempotent() {
        let (mut page, _) = fixture();
        close_menu(&mut page);
        assert!(!page.nav.menu_open);
        toggle_menu(&mut page);
        close_menu(&mut page);
        close_menu(&mut page);
        assert!(!page.nav.menu_open);
    }

    #[test]
    fn test_activate_link_closes_menu_and_marks_active() {
        let (mut page, mut scroll) = fixture();
        toggle_menu(&mut page);

        let started = activate_link(&mut page, &mut scroll, SectionId::Projects, Instant::now());
        assert!(started);
        assert!(!page.nav.menu_open);
        assert_eq!(page.active_link(), Some(SectionId::Projects));
        assert!(scroll.is_gliding());
    }

    #[test]
    fn test_activate_link_with_menu_closed() {
        let (mut page, mut scroll) = fixture();
        assert!(activate_link(
            &mut page,
            &mut scroll,
            SectionId::About,
            Instant::now()
        ));
        assert_eq!(page.active_link(), Some(SectionId::About));
    }

    #[test]
    fn test_activate_missing_section_still_closes_menu() {
        let mut portfolio = Portfolio::sample();
        portfolio.contests.clear();
        let mut page = Page::build(&portfolio, 80);
        let mut scroll = ScrollState::new();
        scroll.set_bounds(page.layout.height_px(), 400.0);
        toggle_menu(&mut page);

        let started = activate_link(
            &mut page,
            &mut scroll,
            SectionId::Competitive,
            Instant::now(),
        );
        assert!(!started);
        assert!(!page.nav.menu_open);
        assert!(!scroll.is_gliding());
    }
}
