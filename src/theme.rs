// Theme system for the portfolio page
//
// Two fixed color schemes (light and dark) plus the mode token that gets
// persisted between runs. The page itself only carries an `Option<ThemeMode>`
// marker; rendering resolves that marker to a concrete palette here.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::BorderType;

/// The two presentable color schemes.
///
/// "Unset" is deliberately not a variant: an absent preference is modeled as
/// `Option<ThemeMode>` so the follow-the-system state cannot be confused with
/// an explicit choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeMode {
    Light,
    Dark,
}

impl ThemeMode {
    /// Token used for persistence and for the page marker
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    /// Parse a persisted token. Unknown tokens are treated as absent,
    /// so a corrupted store degrades to follow-the-system behavior.
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "light" => Some(ThemeMode::Light),
            "dark" => Some(ThemeMode::Dark),
            _ => None,
        }
    }

    /// The opposite mode
    pub fn flipped(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    /// Display name for the status bar and menu
    pub fn name(&self) -> &'static str {
        match self {
            ThemeMode::Light => "Light",
            ThemeMode::Dark => "Dark",
        }
    }
}

/// Complete palette for one theme mode, with all UI colors resolved.
///
/// All colors are explicit RGB so opacity fades can blend toward the
/// background instead of snapping between terminal-defined named colors.
#[derive(Debug, Clone)]
pub struct Palette {
    // Base colors
    pub background: Color,
    pub foreground: Color,
    pub muted: Color,

    // Navbar
    pub brand: Color,
    pub nav_link: Color,
    pub nav_active: Color,
    pub nav_border: Color,
    pub nav_border_scrolled: Color,

    // Document content
    pub heading: Color,
    pub accent: Color,
    pub card_border: Color,
    pub card_title: Color,
    pub card_meta: Color,
    pub timeline: Color,
    pub link: Color,
    pub hint: Color,

    // Filter chips
    pub chip: Color,
    pub chip_active_bg: Color,
    pub chip_active_fg: Color,

    // Chrome
    pub status_bar: Color,
    pub selection_bg: Color,
    pub selection_fg: Color,
    pub success: Color,
    pub error: Color,

    // Log levels (logs overlay)
    pub log_error: Color,
    pub log_warn: Color,
    pub log_info: Color,
    pub log_debug: Color,
    pub log_trace: Color,

    // Border style for boxes
    pub border_type: BorderType,
}

impl Palette {
    /// Resolve the palette for a mode
    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Self::light(),
            ThemeMode::Dark => Self::dark(),
        }
    }

    /// Dark scheme
    pub fn dark() -> Self {
        Self {
            background: Color::Rgb(17, 21, 28),
            foreground: Color::Rgb(214, 219, 228),
            muted: Color::Rgb(108, 118, 134),

            brand: Color::Rgb(122, 200, 255),
            nav_link: Color::Rgb(160, 170, 185),
            nav_active: Color::Rgb(122, 200, 255),
            nav_border: Color::Rgb(52, 61, 76),
            nav_border_scrolled: Color::Rgb(122, 200, 255),

            heading: Color::Rgb(122, 200, 255),
            accent: Color::Rgb(255, 184, 108),
            card_border: Color::Rgb(62, 72, 90),
            card_title: Color::Rgb(235, 240, 248),
            card_meta: Color::Rgb(139, 213, 162),
            timeline: Color::Rgb(180, 142, 222),
            link: Color::Rgb(122, 200, 255),
            hint: Color::Rgb(108, 118, 134),

            chip: Color::Rgb(160, 170, 185),
            chip_active_bg: Color::Rgb(122, 200, 255),
            chip_active_fg: Color::Rgb(17, 21, 28),

            status_bar: Color::Rgb(139, 213, 162),
            selection_bg: Color::Rgb(45, 54, 70),
            selection_fg: Color::Rgb(240, 220, 130),
            success: Color::Rgb(139, 213, 162),
            error: Color::Rgb(235, 110, 115),

            log_error: Color::Rgb(235, 110, 115),
            log_warn: Color::Rgb(240, 220, 130),
            log_info: Color::Rgb(122, 200, 255),
            log_debug: Color::Rgb(108, 118, 134),
            log_trace: Color::Rgb(70, 78, 92),

            border_type: BorderType::Rounded,
        }
    }

    /// Light scheme
    pub fn light() -> Self {
        Self {
            background: Color::Rgb(248, 249, 251),
            foreground: Color::Rgb(36, 41, 51),
            muted: Color::Rgb(120, 128, 142),

            brand: Color::Rgb(18, 102, 176),
            nav_link: Color::Rgb(90, 98, 112),
            nav_active: Color::Rgb(18, 102, 176),
            nav_border: Color::Rgb(205, 211, 221),
            nav_border_scrolled: Color::Rgb(18, 102, 176),

            heading: Color::Rgb(18, 102, 176),
            accent: Color::Rgb(176, 98, 8),
            card_border: Color::Rgb(188, 196, 208),
            card_title: Color::Rgb(24, 28, 36),
            card_meta: Color::Rgb(32, 128, 68),
            timeline: Color::Rgb(116, 72, 180),
            link: Color::Rgb(18, 102, 176),
            hint: Color::Rgb(120, 128, 142),

            chip: Color::Rgb(90, 98, 112),
            chip_active_bg: Color::Rgb(18, 102, 176),
            chip_active_fg: Color::Rgb(248, 249, 251),

            status_bar: Color::Rgb(32, 128, 68),
            selection_bg: Color::Rgb(215, 228, 244),
            selection_fg: Color::Rgb(140, 94, 0),
            success: Color::Rgb(32, 128, 68),
            error: Color::Rgb(190, 42, 48),

            log_error: Color::Rgb(190, 42, 48),
            log_warn: Color::Rgb(140, 94, 0),
            log_info: Color::Rgb(18, 102, 176),
            log_debug: Color::Rgb(120, 128, 142),
            log_trace: Color::Rgb(168, 174, 184),

            border_type: BorderType::Rounded,
        }
    }

    // Helper methods for creating styles

    /// Base style with theme foreground on theme background
    pub fn base_style(&self) -> Style {
        Style::default().fg(self.foreground).bg(self.background)
    }

    /// Section heading style
    pub fn heading_style(&self) -> Style {
        Style::default()
            .fg(self.heading)
            .add_modifier(Modifier::BOLD)
    }

    /// Status bar style
    pub fn status_style(&self) -> Style {
        Style::default().fg(self.status_bar)
    }

    /// Secondary text style
    pub fn hint_style(&self) -> Style {
        Style::default().fg(self.hint)
    }

    /// Blend a foreground color toward the scheme background.
    ///
    /// `opacity` of 1.0 returns the color unchanged, 0.0 returns the
    /// background. This is how the renderer projects style opacity onto
    /// a terminal that has no alpha channel.
    pub fn fade(&self, color: Color, opacity: f32) -> Color {
        blend(self.background, color, opacity)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::dark()
    }
}

/// Linear interpolation between two colors, by channel.
///
/// Non-RGB colors cannot be interpolated; those snap at the midpoint.
pub fn blend(from: Color, to: Color, t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    match (from, to) {
        (Color::Rgb(r0, g0, b0), Color::Rgb(r1, g1, b1)) => {
            let ch = |a: u8, b: u8| -> u8 { (a as f32 + (b as f32 - a as f32) * t).round() as u8 };
            Color::Rgb(ch(r0, r1), ch(g0, g1), ch(b0, b1))
        }
        _ => {
            if t < 0.5 {
                from
            } else {
                to
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_tokens_round_trip() {
        assert_eq!(ThemeMode::parse("light"), Some(ThemeMode::Light));
        assert_eq!(ThemeMode::parse("dark"), Some(ThemeMode::Dark));
        assert_eq!(ThemeMode::Light.as_str(), "light");
        assert_eq!(ThemeMode::Dark.as_str(), "dark");
    }

    #[test]
    fn test_unknown_token_is_absent() {
        assert_eq!(ThemeMode::parse("solarized"), None);
        assert_eq!(ThemeMode::parse(""), None);
        assert_eq!(ThemeMode::parse("Dark"), None);
    }

    #[test]
    fn test_flipped() {
        assert_eq!(ThemeMode::Light.flipped(), ThemeMode::Dark);
        assert_eq!(ThemeMode::Dark.flipped(), ThemeMode::Light);
    }

    #[test]
    fn test_blend_endpoints() {
        let a = Color::Rgb(0, 0, 0);
        let b = Color::Rgb(200, 100, 50);
        assert_eq!(blend(a, b, 0.0), a);
        assert_eq!(blend(a, b, 1.0), b);
        assert_eq!(blend(a, b, 0.5), Color::Rgb(100, 50, 25));
    }

    #[test]
    fn test_fade_at_zero_is_background() {
        let palette = Palette::dark();
        assert_eq!(palette.fade(palette.foreground, 0.0), palette.background);
        assert_eq!(palette.fade(palette.foreground, 1.0), palette.foreground);
    }
}
