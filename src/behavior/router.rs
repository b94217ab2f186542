// Anchor routing
//
// Takes an anchor fragment, resolves it against the page, and glides the
// viewport so the section lands just below the fixed navbar. Fragments
// that resolve to nothing fall through without side effects, leaving the
// scroll position alone.

use super::scroll::ScrollState;
use crate::page::{Page, SectionId, NAV_OFFSET_PX};
use std::time::Instant;

/// Route an anchor fragment (without the leading '#').
///
/// Returns whether a navigation was started. Empty and unknown fragments
/// return false, as does a fragment whose section is not on this page.
pub fn route(page: &Page, scroll: &mut ScrollState, fragment: &str, now: Instant) -> bool {
    if fragment.is_empty() {
        return false;
    }
    let Some(id) = SectionId::from_fragment(fragment) else {
        return false;
    };
    route_to_section(page, scroll, id, now)
}

/// Route to a section already resolved to an id.
///
/// The target offset is the section top minus the navbar height, so the
/// section heading settles directly below the fixed bar. Targets above
/// the document start clamp to zero inside the scroll state.
pub fn route_to_section(
    page: &Page,
    scroll: &mut ScrollState,
    id: SectionId,
    now: Instant,
) -> bool {
    let Some(geom) = page.layout.section(id) else {
        return false;
    };
    scroll.glide_to(geom.top_px - NAV_OFFSET_PX, now);
    true
}
