// Behavior layer - the interactive semantics of the page
//
// Each submodule owns one concern: theme persistence, nav state, smooth
// scrolling, section routing, the project filter, the contact bridge,
// reveal-on-scroll and the scrollspy. All of them mutate the shared Page
// and none of them read the clock; the event loop passes `now` through.

pub mod anim;
pub mod contact;
pub mod filter;
pub mod nav;
pub mod prefs;
pub mod reveal;
pub mod router;
pub mod scroll;
pub mod scrollspy;
pub mod theme_ctl;
