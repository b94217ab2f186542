// Scrollspy - keeps the navbar highlight on the section nearest the
// anchor band below the fixed navbar
//
// Scroll events only schedule work here; the actual recompute runs at most
// once per frame, when the app drains the pending flag. Load and resize
// bypass the queue and recompute immediately.

use crate::page::{Page, SectionId, NAV_OFFSET_PX, SECTION_IDS};

#[derive(Debug)]
pub struct Scrollspy {
    /// Candidate sections in document order: the fixed id list filtered
    /// to ids that actually have a nav link on this page
    tracked: Vec<SectionId>,
    /// One recompute queued at most, regardless of how many scroll
    /// events arrive within a frame
    pending: bool,
}

impl Scrollspy {
    pub fn new(page: &Page) -> Self {
        let tracked = SECTION_IDS
            .iter()
            .copied()
            .filter(|id| page.nav.has_link(*id))
            .collect();
        Self {
            tracked,
            pending: false,
        }
    }

    /// Note a scroll event. Cheap and callable any number of times per
    /// frame; work is deferred to `run_pending`.
    pub fn schedule(&mut self) {
        self.pending = true;
    }

    #[cfg(test)]
    pub fn has_pending(&self) -> bool {
        self.pending
    }

    /// Drain the queue: recompute once if anything was scheduled.
    /// Returns whether the active link changed.
    pub fn run_pending(&mut self, page: &mut Page, offset_px: f32) -> bool {
        if !self.pending {
            return false;
        }
        self.pending = false;
        self.recompute(page, offset_px)
    }

    /// Pick the section whose top, in viewport coordinates, sits nearest
    /// the navbar offset band, and make its link active. Earlier sections
    /// win exact ties. Sections missing from the current layout are
    /// skipped per pass.
    ///
    /// Returns whether the active link changed; a winner that is already
    /// active writes nothing.
    pub fn recompute(&self, page: &mut Page, offset_px: f32) -> bool {
        let mut best: Option<(SectionId, f32)> = None;

        for id in &self.tracked {
            let Some(geom) = page.layout.section(*id) else {
                continue;
            };
            let viewport_top = geom.top_px - offset_px;
            let distance = (viewport_top - NAV_OFFSET_PX).abs();
            match best {
                None => best = Some((*id, distance)),
                Some((_, incumbent)) if distance < incumbent => best = Some((*id, distance)),
                _ => {}
            }
        }

        match best {
            Some((id, _)) => page.set_active_link(id),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Portfolio;
    use crate::page::{Layout, NavBar, NavLink, SectionGeom};

    /// A page with hand-placed section tops, for exact distance math
    fn synthetic_page(tops: &[(SectionId, f32)]) -> Page {
        let links = tops
            .iter()
            .map(|(id, _)| NavLink {
                id: *id,
                active: false,
            })
            .collect();
        let sections = tops
            .iter()
            .map(|(id, top)| SectionGeom {
                id: *id,
                top_px: *top,
                height_px: 160.0,
            })
            .collect();
        Page {
            theme_attr: None,
            nav: NavBar {
                scrolled: false,
                menu_open: false,
                links,
            },
            filters: Vec::new(),
            elements: Vec::new(),
            layout: Layout {
                width: 80,
                rows: Vec::new(),
                sections,
                element_geoms: Vec::new(),
            },
        }
    }

    #[test]
    fn test_nearest_section_wins() {
        let mut page = synthetic_page(&[
            (SectionId::Home, 100.0),
            (SectionId::About, 400.0),
            (SectionId::Skills, 900.0),
        ]);
        let spy = Scrollspy::new(&page);

        // At the top: distances to the band are 20, 320, 820
        spy.recompute(&mut page, 0.0);
        assert_eq!(page.active_link(), Some(SectionId::Home));

        // Scrolled to 350: distances are 330, 30, 470
        spy.recompute(&mut page, 350.0);
        assert_eq!(page.active_link(), Some(SectionId::About));

        // Deep scroll: last section closest
        spy.recompute(&mut page, 850.0);
        assert_eq!(page.active_link(), Some(SectionId::Skills));
    }

    #[test]
    fn test_exact_tie_goes_to_earlier_section() {
        // Tops 60 and 100 are both 20 away from the band at offset 0
        let mut page = synthetic_page(&[(SectionId::Home, 60.0), (SectionId::About, 100.0)]);
        let spy = Scrollspy::new(&page);

        spy.recompute(&mut page, 0.0);
        assert_eq!(page.active_link(), Some(SectionId::Home));
    }

    #[test]
    fn test_recompute_without_change_writes_nothing() {
        let mut page = synthetic_page(&[(SectionId::Home, 0.0), (SectionId::About, 640.0)]);
        let spy = Scrollspy::new(&page);

        assert!(spy.recompute(&mut page, 0.0));
        assert!(!spy.recompute(&mut page, 0.0));
        assert!(!spy.recompute(&mut page, 8.0));
    }

    #[test]
    fn test_schedule_coalesces_to_one_recompute() {
        let mut page = synthetic_page(&[(SectionId::Home, 0.0), (SectionId::About, 640.0)]);
        let mut spy = Scrollspy::new(&page);

        spy.schedule();
        spy.schedule();
        spy.schedule();
        assert!(spy.has_pending());

        assert!(spy.run_pending(&mut page, 0.0));
        assert!(!spy.has_pending());

        // Queue is drained; nothing further runs until rescheduled
        assert!(!spy.run_pending(&mut page, 600.0));
        assert_eq!(page.active_link(), Some(SectionId::Home));

        spy.schedule();
        assert!(spy.run_pending(&mut page, 600.0));
        assert_eq!(page.active_link(), Some(SectionId::About));
    }

    #[test]
    fn test_sections_without_links_are_not_tracked() {
        let mut portfolio = Portfolio::sample();
        portfolio.contests.clear();
        let page = Page::build(&portfolio, 80);
        let spy = Scrollspy::new(&page);
        assert!(!spy.tracked.contains(&SectionId::Competitive));
    }

    #[test]
    fn test_missing_section_skipped_per_pass() {
        // Link exists but the layout carries no geometry for About
        let mut page = synthetic_page(&[(SectionId::Home, 0.0)]);
        page.nav.links.push(NavLink {
            id: SectionId::About,
            active: false,
        });
        let spy = Scrollspy::new(&page);

        spy.recompute(&mut page, 500.0);
        assert_eq!(page.active_link(), Some(SectionId::Home));
    }

    #[test]
    fn test_optimistic_mark_overridden_by_recompute() {
        let mut page = synthetic_page(&[
            (SectionId::Home, 100.0),
            (SectionId::Contact, 2000.0),
        ]);
        let spy = Scrollspy::new(&page);

        // A click marked the far section active, but the viewport has
        // not moved yet; the next recompute pulls it back
        page.set_active_link(SectionId::Contact);
        spy.recompute(&mut page, 0.0);
        assert_eq!(page.active_link(), Some(SectionId::Home));
    }
}
