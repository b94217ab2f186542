// Animation primitives for page transitions
//
// Everything that moves on the page (opacity fades, slide-ins, the smooth
// scroll glide) is a Tween sampled against an explicit `Instant`. Nothing
// here reads the clock on its own; callers pass `now` through, which keeps
// the math deterministic under test.

use std::time::{Duration, Instant};

/// How long element fades and slide-ins take to settle
pub const TRANSITION: Duration = Duration::from_millis(500);

/// Vertical slide distance for elements entering the page, in pixels
pub const SLIDE_PX: f32 = 20.0;

/// Ease-out cubic: fast start, gentle settle
pub fn ease_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// A float gliding from one value to another over a fixed window.
#[derive(Debug, Clone, Copy)]
pub struct Tween {
    from: f32,
    to: f32,
    start: Instant,
    duration: Duration,
}

impl Tween {
    /// A tween already at its target (no motion)
    pub fn fixed(value: f32) -> Self {
        Self {
            from: value,
            to: value,
            start: Instant::now(),
            duration: Duration::ZERO,
        }
    }

    /// Start a glide from `from` to `to` at `start`
    pub fn glide(from: f32, to: f32, start: Instant, duration: Duration) -> Self {
        Self {
            from,
            to,
            start,
            duration,
        }
    }

    /// The value being approached
    pub fn target(&self) -> f32 {
        self.to
    }

    /// Sample the tween at a point in time
    pub fn value(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return self.to;
        }
        let elapsed = now.saturating_duration_since(self.start);
        if elapsed >= self.duration {
            return self.to;
        }
        let t = elapsed.as_secs_f32() / self.duration.as_secs_f32();
        self.from + (self.to - self.from) * ease_out_cubic(t)
    }

    /// Whether the tween has settled at its target
    pub fn done(&self, now: Instant) -> bool {
        self.duration.is_zero() || now.saturating_duration_since(self.start) >= self.duration
    }

    /// Redirect toward a new target, starting from the current sampled
    /// value so an interrupted glide never jumps.
    pub fn retarget(&mut self, to: f32, now: Instant, duration: Duration) {
        let current = self.value(now);
        *self = Self::glide(current, to, now, duration);
    }
}

/// Presentation state for one fadeable page element.
///
/// `display` mirrors whether the element participates in layout at all;
/// opacity and the vertical slide offset only affect how it is drawn.
#[derive(Debug, Clone, Copy)]
pub struct Visual {
    pub display: bool,
    pub opacity: Tween,
    pub offset_px: Tween,
}

impl Visual {
    /// Fully visible, no pending motion
    pub fn shown() -> Self {
        Self {
            display: true,
            opacity: Tween::fixed(1.0),
            offset_px: Tween::fixed(0.0),
        }
    }

    /// Staged for a reveal: in layout but transparent and shifted down
    pub fn staged() -> Self {
        Self {
            display: true,
            opacity: Tween::fixed(0.0),
            offset_px: Tween::fixed(SLIDE_PX),
        }
    }

    /// Ease to fully visible at the natural position
    pub fn fade_in(&mut self, now: Instant) {
        self.fade_in_over(now, TRANSITION);
    }

    /// Ease to transparent, sliding back down
    pub fn fade_out(&mut self, now: Instant) {
        self.fade_out_over(now, TRANSITION);
    }

    /// Fade in over a caller-chosen window
    pub fn fade_in_over(&mut self, now: Instant, duration: Duration) {
        self.opacity.retarget(1.0, now, duration);
        self.offset_px.retarget(0.0, now, duration);
    }

    /// Fade out over a caller-chosen window
    pub fn fade_out_over(&mut self, now: Instant, duration: Duration) {
        self.opacity.retarget(0.0, now, duration);
        self.offset_px.retarget(SLIDE_PX, now, duration);
    }

    /// Whether the element is currently heading toward transparent
    pub fn fading_out(&self) -> bool {
        self.opacity.target() == 0.0
    }

    /// True once all motion has settled
    pub fn settled(&self, now: Instant) -> bool {
        self.opacity.done(now) && self.offset_px.done(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ease_out_cubic_endpoints() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        // Clamped out of range
        assert_eq!(ease_out_cubic(-1.0), 0.0);
        assert_eq!(ease_out_cubic(2.0), 1.0);
    }

    #[test]
    fn test_ease_out_front_loads_motion() {
        // More than half the distance is covered in the first half of the time
        assert!(ease_out_cubic(0.5) > 0.5);
    }

    #[test]
    fn test_tween_endpoints() {
        let start = Instant::now();
        let tween = Tween::glide(0.0, 100.0, start, Duration::from_millis(400));

        assert_eq!(tween.value(start), 0.0);
        assert_eq!(tween.value(start + Duration::from_millis(400)), 100.0);
        assert_eq!(tween.value(start + Duration::from_secs(5)), 100.0);
        assert!(tween.done(start + Duration::from_millis(400)));
        assert!(!tween.done(start + Duration::from_millis(399)));
    }

    #[test]
    fn test_fixed_tween_needs_no_time() {
        let tween = Tween::fixed(42.0);
        assert_eq!(tween.value(Instant::now()), 42.0);
        assert!(tween.done(Instant::now()));
    }

    #[test]
    fn test_retarget_continues_from_current_value() {
        let start = Instant::now();
        let mut tween = Tween::glide(0.0, 100.0, start, Duration::from_millis(400));

        let midpoint = start + Duration::from_millis(200);
        let value_before = tween.value(midpoint);
        tween.retarget(0.0, midpoint, Duration::from_millis(400));

        // No jump at the moment of retargeting
        assert!((tween.value(midpoint) - value_before).abs() < f32::EPSILON);
        assert_eq!(tween.target(), 0.0);
        assert_eq!(tween.value(midpoint + Duration::from_secs(1)), 0.0);
    }

    #[test]
    fn test_visual_fade_cycle() {
        let now = Instant::now();
        let mut visual = Visual::staged();
        assert_eq!(visual.opacity.value(now), 0.0);
        assert_eq!(visual.offset_px.value(now), SLIDE_PX);

        visual.fade_in(now);
        assert!(!visual.fading_out());
        let settled = now + TRANSITION;
        assert_eq!(visual.opacity.value(settled), 1.0);
        assert_eq!(visual.offset_px.value(settled), 0.0);
        assert!(visual.settled(settled));

        visual.fade_out(settled);
        assert!(visual.fading_out());
        assert_eq!(visual.opacity.value(settled + TRANSITION), 0.0);
        assert_eq!(visual.offset_px.value(settled + TRANSITION), SLIDE_PX);
    }
}
