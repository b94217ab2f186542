// Scroll position for the page viewport
//
// Owns the pixel offset, its bounds, and the optional glide tween driven
// by anchor routing. Manual scrolling is instant and interrupts any glide
// in flight; only the router animates.

use super::anim::Tween;
use crate::page::{Page, ROW_PX};
use std::time::{Duration, Instant};

/// Scroll depth past which the navbar switches to its scrolled treatment
pub const SCROLL_FX_THRESHOLD_PX: f32 = 50.0;

/// Duration of the anchor glide
pub const GLIDE: Duration = Duration::from_millis(400);

/// Pixel scroll state for the single page viewport
#[derive(Debug, Clone)]
pub struct ScrollState {
    offset_px: f32,
    doc_px: f32,
    viewport_px: f32,
    glide: Option<Tween>,
}

impl ScrollState {
    pub fn new() -> Self {
        Self {
            offset_px: 0.0,
            doc_px: 0.0,
            viewport_px: 0.0,
            glide: None,
        }
    }

    /// Update document and viewport extents, re-clamping the offset.
    /// Call after every relayout or resize.
    pub fn set_bounds(&mut self, doc_px: f32, viewport_px: f32) {
        self.doc_px = doc_px;
        self.viewport_px = viewport_px;
        self.offset_px = self.clamp(self.offset_px);
    }

    /// Current offset in virtual pixels
    pub fn offset_px(&self) -> f32 {
        self.offset_px
    }

    /// Current offset quantized to whole rows for rendering
    pub fn offset_rows(&self) -> u16 {
        (self.offset_px / ROW_PX).floor().max(0.0) as u16
    }

    /// Viewport height in virtual pixels
    pub fn viewport_px(&self) -> f32 {
        self.viewport_px
    }

    /// Largest reachable offset
    pub fn max_offset(&self) -> f32 {
        (self.doc_px - self.viewport_px).max(0.0)
    }

    fn clamp(&self, offset: f32) -> f32 {
        offset.clamp(0.0, self.max_offset())
    }

    /// Instant scroll by a pixel delta (keys, wheel). Interrupts any glide.
    /// Returns whether the offset actually moved.
    pub fn scroll_by(&mut self, delta_px: f32) -> bool {
        self.glide = None;
        let next = self.clamp(self.offset_px + delta_px);
        let moved = (next - self.offset_px).abs() > f32::EPSILON;
        self.offset_px = next;
        moved
    }

    /// Instant jump to an absolute offset. Interrupts any glide.
    pub fn scroll_to(&mut self, target_px: f32) -> bool {
        self.glide = None;
        let next = self.clamp(target_px);
        let moved = (next - self.offset_px).abs() > f32::EPSILON;
        self.offset_px = next;
        moved
    }

    /// Start an eased glide toward an absolute offset
    pub fn glide_to(&mut self, target_px: f32, now: Instant) {
        let target = self.clamp(target_px);
        if (target - self.offset_px).abs() <= f32::EPSILON {
            self.glide = None;
            return;
        }
        self.glide = Some(Tween::glide(self.offset_px, target, now, GLIDE));
    }

    /// Whether a glide is currently in flight
    pub fn is_gliding(&self) -> bool {
        self.glide.is_some()
    }

    /// Advance the glide, if any. Returns whether the offset moved,
    /// which counts as a scroll event for the page effects.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(tween) = self.glide else {
            return false;
        };
        let next = self.clamp(tween.value(now));
        let moved = (next - self.offset_px).abs() > f32::EPSILON;
        self.offset_px = next;
        if tween.done(now) {
            self.glide = None;
        }
        moved
    }
}

impl Default for ScrollState {
    fn default() -> Self {
        Self::new()
    }
}

/// Recompute the navbar's scrolled marker from the current offset.
/// The marker is set strictly past the threshold, not at it.
pub fn apply_scroll_effects(page: &mut Page, offset_px: f32) {
    page.nav.scrolled = offset_px > SCROLL_FX_THRESHOLD_PX;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Portfolio;

    fn scroll_with_bounds(doc: f32, viewport: f32) -> ScrollState {
        let mut scroll = ScrollState::new();
        scroll.set_bounds(doc, viewport);
        scroll
    }

    #[test]
    fn test_scroll_by_clamps_to_document() {
        let mut scroll = scroll_with_bounds(1000.0, 400.0);

        assert!(!scroll.scroll_by(-50.0));
        assert_eq!(scroll.offset_px(), 0.0);

        assert!(scroll.scroll_by(5000.0));
        assert_eq!(scroll.offset_px(), 600.0);

        assert!(!scroll.scroll_by(16.0));
        assert_eq!(scroll.offset_px(), 600.0);
    }

    #[test]
    fn test_short_document_cannot_scroll() {
        let mut scroll = scroll_with_bounds(300.0, 400.0);
        assert!(!scroll.scroll_by(100.0));
        assert_eq!(scroll.offset_px(), 0.0);
        assert_eq!(scroll.max_offset(), 0.0);
    }

    #[test]
    fn test_set_bounds_reclamps_offset() {
        let mut scroll = scroll_with_bounds(1000.0, 400.0);
        scroll.scroll_to(600.0);

        // Document shrinks (a filter hid some cards)
        scroll.set_bounds(700.0, 400.0);
        assert_eq!(scroll.offset_px(), 300.0);
    }

    #[test]
    fn test_glide_reaches_target_and_stops() {
        let mut scroll = scroll_with_bounds(2000.0, 400.0);
        let start = Instant::now();

        scroll.glide_to(800.0, start);
        assert!(scroll.is_gliding());

        // Mid-flight: moved but not arrived
        assert!(scroll.tick(start + Duration::from_millis(200)));
        let mid = scroll.offset_px();
        assert!(mid > 0.0 && mid < 800.0);

        assert!(scroll.tick(start + GLIDE));
        assert_eq!(scroll.offset_px(), 800.0);
        assert!(!scroll.is_gliding());
        assert!(!scroll.tick(start + GLIDE + Duration::from_millis(100)));
    }

    #[test]
    fn test_manual_scroll_interrupts_glide() {
        let mut scroll = scroll_with_bounds(2000.0, 400.0);
        let start = Instant::now();

        scroll.glide_to(800.0, start);
        scroll.tick(start + Duration::from_millis(100));
        assert!(scroll.is_gliding());

        scroll.scroll_by(16.0);
        assert!(!scroll.is_gliding());
        let held = scroll.offset_px();
        assert!(!scroll.tick(start + Duration::from_millis(300)));
        assert_eq!(scroll.offset_px(), held);
    }

    #[test]
    fn test_glide_target_is_clamped() {
        let mut scroll = scroll_with_bounds(1000.0, 400.0);
        scroll.glide_to(5000.0, Instant::now());
        let now = Instant::now() + GLIDE + Duration::from_millis(50);
        scroll.tick(now);
        assert_eq!(scroll.offset_px(), 600.0);
    }

    #[test]
    fn test_scrolled_marker_threshold_is_strict() {
        let portfolio = Portfolio::sample();
        let mut page = crate::page::Page::build(&portfolio, 80);

        apply_scroll_effects(&mut page, 0.0);
        assert!(!page.nav.scrolled);

        apply_scroll_effects(&mut page, SCROLL_FX_THRESHOLD_PX);
        assert!(!page.nav.scrolled);

        apply_scroll_effects(&mut page, SCROLL_FX_THRESHOLD_PX + 0.5);
        assert!(page.nav.scrolled);

        // And back below again
        apply_scroll_effects(&mut page, 12.0);
        assert!(!page.nav.scrolled);
    }
}
