// Project filter - category chips over the project grid
//
// Selecting a chip re-evaluates every project card. Matching cards enter
// layout at once and start their fade-in 100ms later, so the layout change
// lands before anything animates. Non-matching cards fade out in place and
// leave layout 300ms later, when the fade has finished.
//
// Deferred steps are never cancelled. When one comes due it re-reads the
// current selection and the element's current state, so a step overtaken
// by a newer selection simply drops out.

use std::time::{Duration, Instant};

use crate::page::{Element, Page};

use super::anim::Visual;

/// Delay before a newly displayed card starts fading in
pub const FADE_IN_DELAY: Duration = Duration::from_millis(100);

/// Card fade duration; filtered-out cards leave layout when it elapses
pub const CARD_TRANSITION: Duration = Duration::from_millis(300);

/// The chip tag that matches every card
pub const ALL_TAG: &str = "all";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    FadeIn,
    Hide,
}

#[derive(Debug)]
struct Deferred {
    due: Instant,
    element: usize,
    step: Step,
}

#[derive(Debug, Default)]
pub struct ProjectFilter {
    deferred: Vec<Deferred>,
}

impl ProjectFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// The tag the page is currently filtered by
    pub fn selected_tag(page: &Page) -> &str {
        page.filters
            .iter()
            .find(|chip| chip.active)
            .map(|chip| chip.tag.as_str())
            .unwrap_or(ALL_TAG)
    }

    fn matches(tag: &str, element: &Element) -> bool {
        tag == ALL_TAG || element.category.as_deref() == Some(tag)
    }

    /// Apply a chip selection: exactly one chip ends up active and every
    /// project card is re-evaluated against it. Returns whether layout
    /// changed (a hidden card re-entered it); cards on their way out
    /// leave layout later, from `tick`.
    pub fn select(&mut self, page: &mut Page, tag: &str, now: Instant) -> bool {
        for chip in &mut page.filters {
            chip.active = chip.tag == tag;
        }

        let mut layout_dirty = false;
        for (idx, element) in page.project_elements() {
            if Self::matches(tag, element) {
                if !element.visual.display {
                    element.visual = Visual::staged();
                    layout_dirty = true;
                }
                if element.visual.fading_out() {
                    self.deferred.push(Deferred {
                        due: now + FADE_IN_DELAY,
                        element: idx,
                        step: Step::FadeIn,
                    });
                }
            } else if element.visual.display {
                element.visual.fade_out_over(now, CARD_TRANSITION);
                self.deferred.push(Deferred {
                    due: now + CARD_TRANSITION,
                    element: idx,
                    step: Step::Hide,
                });
            }
        }
        layout_dirty
    }

    /// Run every deferred step that has come due. Returns whether layout
    /// changed (a card left it).
    pub fn tick(&mut self, page: &mut Page, now: Instant) -> bool {
        if self.deferred.is_empty() {
            return false;
        }
        let tag = Self::selected_tag(page).to_string();

        let mut layout_dirty = false;
        let mut upcoming = Vec::with_capacity(self.deferred.len());
        for pending in self.deferred.drain(..) {
            if pending.due > now {
                upcoming.push(pending);
                continue;
            }
            let Some(element) = page.elements.get_mut(pending.element) else {
                continue;
            };
            match pending.step {
                Step::FadeIn => {
                    if element.visual.display
                        && element.visual.fading_out()
                        && Self::matches(&tag, element)
                    {
                        element.visual.fade_in_over(now, CARD_TRANSITION);
                    }
                }
                Step::Hide => {
                    if element.visual.display && !Self::matches(&tag, element) {
                        element.visual.display = false;
                        layout_dirty = true;
                    }
                }
            }
        }
        self.deferred = upcoming;
        layout_dirty
    }

    #[cfg(test)]
    fn pending_steps(&self) -> usize {
        self.deferred.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Portfolio;
    use crate::page::Page;

    fn page() -> Page {
        // Sample projects: 2x systems, 2x backend, 1x web
        Page::build(&Portfolio::sample(), 80)
    }

    fn project_states(page: &Page) -> Vec<(String, bool, bool)> {
        page.elements
            .iter()
            .filter(|e| e.is_project())
            .map(|e| {
                (
                    e.category.clone().unwrap_or_default(),
                    e.visual.display,
                    e.visual.fading_out(),
                )
            })
            .collect()
    }

    #[test]
    fn test_select_activates_exactly_one_chip() {
        let mut page = page();
        let mut filter = ProjectFilter::new();
        let now = Instant::now();

        filter.select(&mut page, "backend", now);
        let active: Vec<&str> = page
            .filters
            .iter()
            .filter(|c| c.active)
            .map(|c| c.tag.as_str())
            .collect();
        assert_eq!(active, vec!["backend"]);
        assert_eq!(ProjectFilter::selected_tag(&page), "backend");

        filter.select(&mut page, ALL_TAG, now);
        assert_eq!(ProjectFilter::selected_tag(&page), ALL_TAG);
    }

    #[test]
    fn test_nonmatching_cards_fade_then_leave_layout() {
        let mut page = page();
        let mut filter = ProjectFilter::new();
        let t0 = Instant::now();

        assert!(!filter.select(&mut page, "backend", t0));

        // Still in layout while the fade runs
        for (tag, display, fading) in project_states(&page) {
            assert!(display);
            assert_eq!(fading, tag != "backend");
        }
        assert!(!filter.tick(&mut page, t0 + Duration::from_millis(299)));

        // Gone at the 300ms mark
        assert!(filter.tick(&mut page, t0 + CARD_TRANSITION));
        for (tag, display, _) in project_states(&page) {
            assert_eq!(display, tag == "backend");
        }
        assert_eq!(filter.pending_steps(), 0);
    }

    #[test]
    fn test_matching_card_displays_at_once_and_fades_in_after_delay() {
        let mut page = page();
        let mut filter = ProjectFilter::new();
        let t0 = Instant::now();

        filter.select(&mut page, "backend", t0);
        filter.tick(&mut page, t0 + CARD_TRANSITION);

        // Bring the web card back: it re-enters layout immediately,
        // transparent, and only starts fading in after the delay
        let t1 = t0 + Duration::from_secs(1);
        assert!(filter.select(&mut page, "web", t1));
        let web = page.elements.iter().find(|e| e.category.as_deref() == Some("web")).unwrap();
        assert!(web.visual.display);
        assert_eq!(web.visual.opacity.value(t1), 0.0);

        filter.tick(&mut page, t1 + Duration::from_millis(99));
        let web = page.elements.iter().find(|e| e.category.as_deref() == Some("web")).unwrap();
        assert!(web.visual.fading_out());

        filter.tick(&mut page, t1 + FADE_IN_DELAY);
        let web = page.elements.iter().find(|e| e.category.as_deref() == Some("web")).unwrap();
        assert!(!web.visual.fading_out());
        let settled = t1 + FADE_IN_DELAY + CARD_TRANSITION;
        assert_eq!(web.visual.opacity.value(settled), 1.0);
    }

    #[test]
    fn test_reselect_during_fade_rescues_card_from_stale_hide() {
        let mut page = page();
        let mut filter = ProjectFilter::new();
        let t0 = Instant::now();

        filter.select(&mut page, "backend", t0);
        // Within the fade-out window, switch back to a filter the web
        // card matches
        let t1 = t0 + Duration::from_millis(150);
        filter.select(&mut page, ALL_TAG, t1);

        filter.tick(&mut page, t1 + FADE_IN_DELAY);

        // The stale hide from the first selection comes due, re-checks
        // the current selection, and leaves the card alone
        assert!(!filter.tick(&mut page, t0 + CARD_TRANSITION));
        let web = page.elements.iter().find(|e| e.category.as_deref() == Some("web")).unwrap();
        assert!(web.visual.display);
        assert!(!web.visual.fading_out());
    }

    #[test]
    fn test_stale_fade_in_does_not_revive_filtered_out_card() {
        let mut page = page();
        let mut filter = ProjectFilter::new();
        let t0 = Instant::now();

        // web card starts fading out, gets rescued, then filtered out
        // again before its queued fade-in fires
        filter.select(&mut page, "backend", t0);
        filter.select(&mut page, "web", t0 + Duration::from_millis(50));
        filter.select(&mut page, "backend", t0 + Duration::from_millis(80));

        // The stale fade-in fires against the current selection and drops
        filter.tick(&mut page, t0 + Duration::from_millis(150));
        let web = page.elements.iter().find(|e| e.category.as_deref() == Some("web")).unwrap();
        assert!(web.visual.fading_out());

        // The rescheduled hide lands
        filter.tick(&mut page, t0 + Duration::from_millis(80) + CARD_TRANSITION);
        let web = page.elements.iter().find(|e| e.category.as_deref() == Some("web")).unwrap();
        assert!(!web.visual.display);
    }

    #[test]
    fn test_select_all_restores_every_card() {
        let mut page = page();
        let mut filter = ProjectFilter::new();
        let t0 = Instant::now();

        filter.select(&mut page, "web", t0);
        filter.tick(&mut page, t0 + CARD_TRANSITION);
        assert_eq!(
            project_states(&page).iter().filter(|(_, d, _)| *d).count(),
            1
        );

        let t1 = t0 + Duration::from_secs(2);
        assert!(filter.select(&mut page, ALL_TAG, t1));
        filter.tick(&mut page, t1 + FADE_IN_DELAY);
        let settled = t1 + FADE_IN_DELAY + CARD_TRANSITION;
        for element in page.elements.iter().filter(|e| e.is_project()) {
            assert!(element.visual.display);
            assert_eq!(element.visual.opacity.value(settled), 1.0);
        }
    }
}
