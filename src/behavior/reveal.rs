// Reveal-on-scroll - cards stay transparent until they enter the viewport
//
// `observe` stages every card; `check` is the intersection pass, run after
// every scroll movement and once at load so above-the-fold cards reveal
// immediately. Reveals are one-way: once a card has faded in it never goes
// back, no matter where the viewport moves.

use std::time::Instant;

use crate::page::Page;

/// Fraction of a card that must be visible before it reveals
pub const REVEAL_THRESHOLD: f32 = 0.1;

#[derive(Debug, Default)]
pub struct RevealObserver {
    /// One flag per page element; true once revealed
    seen: Vec<bool>,
}

impl RevealObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage every element for its entrance.
    pub fn observe(&mut self, page: &mut Page) {
        for element in &mut page.elements {
            element.visual = crate::behavior::anim::Visual::staged();
        }
        self.seen = vec![false; page.elements.len()];
    }

    /// Fade in every unrevealed element that has crossed the visibility
    /// threshold. Returns how many revealed on this pass.
    pub fn check(&mut self, page: &mut Page, offset_px: f32, viewport_px: f32, now: Instant) -> usize {
        let viewport_top = offset_px;
        let viewport_bottom = offset_px + viewport_px;

        let mut revealed = 0;
        for (idx, element) in page.elements.iter_mut().enumerate() {
            if self.seen.get(idx).copied().unwrap_or(true) || !element.visual.display {
                continue;
            }
            let Some(geom) = page.layout.element_geoms.get(idx).copied().flatten() else {
                continue;
            };

            let top = geom.top_px;
            let bottom = geom.top_px + geom.height_px;
            let overlap = (bottom.min(viewport_bottom) - top.max(viewport_top)).max(0.0);
            let ratio = if geom.height_px > 0.0 {
                overlap / geom.height_px
            } else if top >= viewport_top && top <= viewport_bottom {
                1.0
            } else {
                0.0
            };

            if ratio >= REVEAL_THRESHOLD {
                element.visual.fade_in(now);
                self.seen[idx] = true;
                revealed += 1;
            }
        }
        revealed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behavior::anim::Visual;
    use crate::content::Portfolio;
    use crate::page::{
        ElemGeom, Element, ElementKind, Layout, NavBar, Page, SectionGeom, SectionId, ROW_PX,
    };

    /// A page with one project card at a hand-placed position
    fn single_card_page(top_px: f32, height_px: f32) -> Page {
        Page {
            theme_attr: None,
            nav: NavBar {
                scrolled: false,
                menu_open: false,
                links: Vec::new(),
            },
            filters: Vec::new(),
            elements: vec![Element {
                kind: ElementKind::Project(0),
                category: Some("web".to_string()),
                visual: Visual::shown(),
            }],
            layout: Layout {
                width: 80,
                rows: Vec::new(),
                sections: vec![SectionGeom {
                    id: SectionId::Projects,
                    top_px: 0.0,
                    height_px: top_px + height_px,
                }],
                element_geoms: vec![Some(ElemGeom { top_px, height_px })],
            },
        }
    }

    #[test]
    fn test_observe_stages_every_element() {
        let mut page = Page::build(&Portfolio::sample(), 80);
        let mut reveal = RevealObserver::new();
        reveal.observe(&mut page);

        let now = Instant::now();
        for element in &page.elements {
            assert!(element.visual.display);
            assert_eq!(element.visual.opacity.value(now), 0.0);
        }
    }

    #[test]
    fn test_initial_check_reveals_above_the_fold_only() {
        let mut page = Page::build(&Portfolio::sample(), 80);
        let mut reveal = RevealObserver::new();
        reveal.observe(&mut page);

        let viewport = 40.0 * ROW_PX;
        let revealed = reveal.check(&mut page, 0.0, viewport, Instant::now());
        assert!(revealed > 0);
        assert!(revealed < page.elements.len());

        // Everything below the fold is still staged
        for (idx, element) in page.elements.iter().enumerate() {
            if let Some(geom) = page.layout.element_geoms[idx] {
                if geom.top_px > viewport {
                    assert!(element.visual.fading_out());
                }
            }
        }
    }

    #[test]
    fn test_reveal_is_one_way() {
        let mut page = single_card_page(1000.0, 160.0);
        let mut reveal = RevealObserver::new();
        reveal.observe(&mut page);
        let now = Instant::now();

        assert_eq!(reveal.check(&mut page, 900.0, 800.0, now), 1);
        assert!(!page.elements[0].visual.fading_out());

        // Scrolled far away again: the card stays revealed
        assert_eq!(reveal.check(&mut page, 0.0, 160.0, now), 0);
        assert!(!page.elements[0].visual.fading_out());
    }

    #[test]
    fn test_threshold_is_ten_percent_of_the_card() {
        let mut reveal = RevealObserver::new();
        let now = Instant::now();

        // 15 of 160px visible: just under the threshold
        let mut page = single_card_page(1000.0, 160.0);
        reveal.observe(&mut page);
        assert_eq!(reveal.check(&mut page, 215.0, 800.0, now), 0);

        // 16 of 160px visible: exactly at it
        assert_eq!(reveal.check(&mut page, 216.0, 800.0, now), 1);
    }

    #[test]
    fn test_hidden_card_not_revealed_until_displayed() {
        let mut page = single_card_page(100.0, 160.0);
        let mut reveal = RevealObserver::new();
        reveal.observe(&mut page);
        page.elements[0].visual.display = false;
        let now = Instant::now();

        assert_eq!(reveal.check(&mut page, 0.0, 800.0, now), 0);

        page.elements[0].visual.display = true;
        assert_eq!(reveal.check(&mut page, 0.0, 800.0, now), 1);
    }
}
