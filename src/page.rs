// Page model - the document the behavior layer mutates and the TUI renders
//
// The page is laid out on a virtual pixel grid: one terminal row represents
// ROW_PX pixels of vertical space. Scroll positions, section tops and the
// fixed navbar offset are all tracked in pixels; rendering quantizes back
// to rows. This keeps the interaction math (thresholds, spy distances,
// slide offsets) in one consistent unit.
//
// Layout is recomputed only when it can actually change: on resize and when
// an element's display flag flips. Opacity and slide offsets never reflow.

use crate::behavior::anim::Visual;
use crate::content::Portfolio;
use crate::theme::ThemeMode;
use unicode_width::UnicodeWidthStr;

/// Vertical pixels represented by one terminal row
pub const ROW_PX: f32 = 16.0;

/// Rows occupied by the fixed navbar overlay
pub const NAV_ROWS: u16 = 5;

/// Pixel height of the fixed navbar; anchor targets land just below it
pub const NAV_OFFSET_PX: f32 = NAV_ROWS as f32 * ROW_PX;

/// The sections a portfolio page can have, in document order.
/// Layout, nav links and the scrollspy all follow this order.
pub const SECTION_IDS: [SectionId; 7] = [
    SectionId::Home,
    SectionId::About,
    SectionId::Skills,
    SectionId::Competitive,
    SectionId::Projects,
    SectionId::Education,
    SectionId::Contact,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionId {
    Home,
    About,
    Skills,
    Competitive,
    Projects,
    Education,
    Contact,
}

impl SectionId {
    /// Anchor fragment for routing, without the leading '#'
    pub fn fragment(&self) -> &'static str {
        match self {
            SectionId::Home => "home",
            SectionId::About => "about",
            SectionId::Skills => "skills",
            SectionId::Competitive => "competitive",
            SectionId::Projects => "projects",
            SectionId::Education => "education",
            SectionId::Contact => "contact",
        }
    }

    /// Resolve an anchor fragment to a section id
    pub fn from_fragment(fragment: &str) -> Option<Self> {
        SECTION_IDS.iter().copied().find(|id| id.fragment() == fragment)
    }

    /// Display label for nav links and the status bar
    pub fn label(&self) -> &'static str {
        match self {
            SectionId::Home => "Home",
            SectionId::About => "About",
            SectionId::Skills => "Skills",
            SectionId::Competitive => "CP",
            SectionId::Projects => "Projects",
            SectionId::Education => "Education",
            SectionId::Contact => "Contact",
        }
    }
}

/// One link in the navbar. At most one link is active at a time.
#[derive(Debug, Clone)]
pub struct NavLink {
    pub id: SectionId,
    pub active: bool,
}

/// Navbar state: the scrolled marker and the collapsible menu
#[derive(Debug, Clone, Default)]
pub struct NavBar {
    /// Set while the page is scrolled past the effects threshold
    pub scrolled: bool,
    /// Whether the nav menu panel is open
    pub menu_open: bool,
    pub links: Vec<NavLink>,
}

impl NavBar {
    pub fn has_link(&self, id: SectionId) -> bool {
        self.links.iter().any(|l| l.id == id)
    }
}

/// One filter chip above the project grid
#[derive(Debug, Clone)]
pub struct FilterChip {
    pub tag: String,
    pub active: bool,
}

/// Which portfolio entry a page element shows. The payload indexes
/// into the corresponding `Portfolio` vec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Skill(usize),
    Contest(usize),
    Project(usize),
    Education(usize),
}

/// A fadeable page element: skill cards, contest cards, project cards
/// and timeline entries. These are the reveal targets; project cards
/// are additionally the filter targets.
#[derive(Debug, Clone)]
pub struct Element {
    pub kind: ElementKind,
    /// Filter category; only project cards carry one
    pub category: Option<String>,
    pub visual: Visual,
}

impl Element {
    pub fn is_project(&self) -> bool {
        matches!(self.kind, ElementKind::Project(_))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Layout
// ─────────────────────────────────────────────────────────────────────────────

/// Resolved geometry for one section
#[derive(Debug, Clone)]
pub struct SectionGeom {
    pub id: SectionId,
    pub top_px: f32,
    pub height_px: f32,
}

/// Resolved geometry for one element. Absent while display is off,
/// mirroring an element that does not participate in layout.
#[derive(Debug, Clone, Copy)]
pub struct ElemGeom {
    pub top_px: f32,
    pub height_px: f32,
}

/// One row of the rendered document. Text content is pre-wrapped at
/// layout time so geometry and rendering can never disagree.
#[derive(Debug, Clone)]
pub enum DocRow {
    Blank,
    Heading(SectionId),
    HeroName(String),
    HeroTagline(String),
    Hint(String),
    Text(String),
    Label(String),
    LinkRow { label: String, url: String },
    FilterBar,
    ElemTop { elem: usize },
    ElemBottom { elem: usize },
    ElemTitle { elem: usize, text: String },
    ElemText { elem: usize, text: String },
    ElemMeta { elem: usize, text: String },
    ElemMark { elem: usize, text: String },
    ElemSide { elem: usize, text: String },
}

impl DocRow {
    /// The element this row belongs to, if any
    pub fn elem(&self) -> Option<usize> {
        match self {
            DocRow::ElemTop { elem }
            | DocRow::ElemBottom { elem }
            | DocRow::ElemTitle { elem, .. }
            | DocRow::ElemText { elem, .. }
            | DocRow::ElemMeta { elem, .. }
            | DocRow::ElemMark { elem, .. }
            | DocRow::ElemSide { elem, .. } => Some(*elem),
            _ => None,
        }
    }
}

/// The flat row plan plus the geometry derived from it
#[derive(Debug, Clone, Default)]
pub struct Layout {
    pub width: u16,
    pub rows: Vec<DocRow>,
    pub sections: Vec<SectionGeom>,
    pub element_geoms: Vec<Option<ElemGeom>>,
}

impl Layout {
    /// Total document height in virtual pixels
    pub fn height_px(&self) -> f32 {
        self.rows.len() as f32 * ROW_PX
    }

    /// Geometry for a section, if that section exists on this page
    pub fn section(&self, id: SectionId) -> Option<&SectionGeom> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// Text width available for document content
    pub fn content_width(&self) -> usize {
        content_width(self.width)
    }

    /// Inner text width of a card at this layout's width
    pub fn card_inner(&self) -> usize {
        card_inner(self.width)
    }
}

fn content_width(width: u16) -> usize {
    (width.saturating_sub(4) as usize).max(16)
}

fn card_inner(width: u16) -> usize {
    content_width(width).saturating_sub(4).max(12)
}

/// Greedy word wrap honoring display width (emoji and CJK count double)
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0usize;

    for word in text.split_whitespace() {
        let word_width = word.width();
        if current_width == 0 {
            // A single over-long word gets hard-broken
            if word_width > width {
                let mut piece = String::new();
                let mut piece_width = 0;
                for ch in word.chars() {
                    let ch_width = ch.to_string().width();
                    if piece_width + ch_width > width && !piece.is_empty() {
                        lines.push(std::mem::take(&mut piece));
                        piece_width = 0;
                    }
                    piece.push(ch);
                    piece_width += ch_width;
                }
                current = piece;
                current_width = piece_width;
            } else {
                current.push_str(word);
                current_width = word_width;
            }
        } else if current_width + 1 + word_width <= width {
            current.push(' ');
            current.push_str(word);
            current_width += 1 + word_width;
        } else {
            lines.push(std::mem::take(&mut current));
            current_width = 0;
            current.push_str(word);
            current_width = word_width;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

// ─────────────────────────────────────────────────────────────────────────────
// Page
// ─────────────────────────────────────────────────────────────────────────────

/// The whole mutable page: theme marker, navbar, filter chips, elements
/// and the current layout.
#[derive(Debug, Clone, Default)]
pub struct Page {
    /// Explicit theme marker; `None` means follow the system scheme
    pub theme_attr: Option<ThemeMode>,
    pub nav: NavBar,
    pub filters: Vec<FilterChip>,
    pub elements: Vec<Element>,
    pub layout: Layout,
}

impl Page {
    /// Build the page for a portfolio at the given terminal width
    pub fn build(portfolio: &Portfolio, width: u16) -> Self {
        let mut elements = Vec::new();
        for (i, _) in portfolio.skills.iter().enumerate() {
            elements.push(Element {
                kind: ElementKind::Skill(i),
                category: None,
                visual: Visual::shown(),
            });
        }
        for (i, _) in portfolio.contests.iter().enumerate() {
            elements.push(Element {
                kind: ElementKind::Contest(i),
                category: None,
                visual: Visual::shown(),
            });
        }
        for (i, project) in portfolio.projects.iter().enumerate() {
            elements.push(Element {
                kind: ElementKind::Project(i),
                category: Some(project.category.clone()),
                visual: Visual::shown(),
            });
        }
        for (i, _) in portfolio.education.iter().enumerate() {
            elements.push(Element {
                kind: ElementKind::Education(i),
                category: None,
                visual: Visual::shown(),
            });
        }

        let links = SECTION_IDS
            .iter()
            .copied()
            .filter(|id| section_present(portfolio, *id))
            .map(|id| NavLink { id, active: false })
            .collect();

        let mut filters = vec![FilterChip {
            tag: "all".to_string(),
            active: true,
        }];
        filters.extend(portfolio.categories().into_iter().map(|tag| FilterChip {
            tag,
            active: false,
        }));

        let mut page = Self {
            theme_attr: None,
            nav: NavBar {
                scrolled: false,
                menu_open: false,
                links,
            },
            filters,
            elements,
            layout: Layout::default(),
        };
        page.relayout(portfolio, width);
        page
    }

    /// Recompute the row plan and geometry. Called on resize and whenever
    /// an element's display flag flips.
    pub fn relayout(&mut self, portfolio: &Portfolio, width: u16) {
        self.layout = compute_layout(portfolio, &self.elements, width);
    }

    /// The currently active nav link, if any
    pub fn active_link(&self) -> Option<SectionId> {
        self.nav.links.iter().find(|l| l.active).map(|l| l.id)
    }

    /// Make `id` the single active nav link.
    /// Returns false (and writes nothing) when it already is, or when
    /// the page has no link for that section.
    pub fn set_active_link(&mut self, id: SectionId) -> bool {
        if !self.nav.has_link(id) {
            return false;
        }
        if self.active_link() == Some(id) {
            return false;
        }
        for link in &mut self.nav.links {
            link.active = link.id == id;
        }
        true
    }

    /// Project-card elements with their indices, for the filter
    pub fn project_elements(&mut self) -> impl Iterator<Item = (usize, &mut Element)> {
        self.elements
            .iter_mut()
            .enumerate()
            .filter(|(_, e)| e.is_project())
    }
}

fn section_present(portfolio: &Portfolio, id: SectionId) -> bool {
    match id {
        SectionId::Home => true,
        SectionId::About => !portfolio.about.is_empty(),
        SectionId::Skills => !portfolio.skills.is_empty(),
        SectionId::Competitive => !portfolio.contests.is_empty(),
        SectionId::Projects => !portfolio.projects.is_empty(),
        SectionId::Education => !portfolio.education.is_empty(),
        SectionId::Contact => portfolio.contact.is_some(),
    }
}

fn compute_layout(portfolio: &Portfolio, elements: &[Element], width: u16) -> Layout {
    let text_width = content_width(width);
    let card_inner = card_inner(width);

    let mut rows: Vec<DocRow> = Vec::new();
    let mut sections: Vec<SectionGeom> = Vec::new();
    let mut element_geoms: Vec<Option<ElemGeom>> = vec![None; elements.len()];

    // Emit one element's rows and record its geometry
    let emit_element =
        |rows: &mut Vec<DocRow>, geoms: &mut Vec<Option<ElemGeom>>, elem: usize, body: &mut dyn FnMut(&mut Vec<DocRow>)| {
            let start = rows.len();
            body(rows);
            geoms[elem] = Some(ElemGeom {
                top_px: start as f32 * ROW_PX,
                height_px: (rows.len() - start) as f32 * ROW_PX,
            });
        };

    for id in SECTION_IDS {
        if !section_present(portfolio, id) {
            continue;
        }
        let section_start = rows.len();

        match id {
            SectionId::Home => {
                // Hero padding clears the fixed navbar at scroll zero
                for _ in 0..NAV_ROWS {
                    rows.push(DocRow::Blank);
                }
                rows.push(DocRow::Blank);
                rows.push(DocRow::HeroName(portfolio.name.clone()));
                for line in wrap(&portfolio.tagline, text_width) {
                    rows.push(DocRow::HeroTagline(line));
                }
                rows.push(DocRow::Blank);
                rows.push(DocRow::Hint(
                    "Scroll with j/k, jump with 1-7, press ? for all keys".to_string(),
                ));
                rows.push(DocRow::Blank);
                rows.push(DocRow::Blank);
            }
            SectionId::About => {
                rows.push(DocRow::Blank);
                rows.push(DocRow::Heading(id));
                rows.push(DocRow::Blank);
                for para in &portfolio.about {
                    for line in wrap(para, text_width) {
                        rows.push(DocRow::Text(line));
                    }
                    rows.push(DocRow::Blank);
                }
            }
            SectionId::Skills => {
                rows.push(DocRow::Blank);
                rows.push(DocRow::Heading(id));
                rows.push(DocRow::Blank);
                for (elem, element) in elements.iter().enumerate() {
                    let ElementKind::Skill(i) = element.kind else {
                        continue;
                    };
                    let group = &portfolio.skills[i];
                    emit_element(&mut rows, &mut element_geoms, elem, &mut |rows| {
                        rows.push(DocRow::ElemTop { elem });
                        rows.push(DocRow::ElemTitle {
                            elem,
                            text: group.title.clone(),
                        });
                        for line in wrap(&group.items.join(", "), card_inner) {
                            rows.push(DocRow::ElemText { elem, text: line });
                        }
                        rows.push(DocRow::ElemBottom { elem });
                    });
                    rows.push(DocRow::Blank);
                }
            }
            SectionId::Competitive => {
                rows.push(DocRow::Blank);
                rows.push(DocRow::Heading(id));
                rows.push(DocRow::Blank);
                for (elem, element) in elements.iter().enumerate() {
                    let ElementKind::Contest(i) = element.kind else {
                        continue;
                    };
                    let contest = &portfolio.contests[i];
                    emit_element(&mut rows, &mut element_geoms, elem, &mut |rows| {
                        rows.push(DocRow::ElemTop { elem });
                        rows.push(DocRow::ElemTitle {
                            elem,
                            text: format!("{} · {}", contest.platform, contest.handle),
                        });
                        for line in wrap(&contest.standing, card_inner) {
                            rows.push(DocRow::ElemText { elem, text: line });
                        }
                        rows.push(DocRow::ElemBottom { elem });
                    });
                    rows.push(DocRow::Blank);
                }
            }
            SectionId::Projects => {
                rows.push(DocRow::Blank);
                rows.push(DocRow::Heading(id));
                rows.push(DocRow::Blank);
                rows.push(DocRow::FilterBar);
                rows.push(DocRow::Blank);
                for (elem, element) in elements.iter().enumerate() {
                    let ElementKind::Project(i) = element.kind else {
                        continue;
                    };
                    // display:off cards take no layout space at all
                    if !element.visual.display {
                        continue;
                    }
                    let project = &portfolio.projects[i];
                    emit_element(&mut rows, &mut element_geoms, elem, &mut |rows| {
                        rows.push(DocRow::ElemTop { elem });
                        rows.push(DocRow::ElemTitle {
                            elem,
                            text: project.title.clone(),
                        });
                        for line in wrap(&project.summary, card_inner) {
                            rows.push(DocRow::ElemText { elem, text: line });
                        }
                        if !project.tech.is_empty() {
                            rows.push(DocRow::ElemMeta {
                                elem,
                                text: project.tech.join(" · "),
                            });
                        }
                        rows.push(DocRow::ElemBottom { elem });
                    });
                    rows.push(DocRow::Blank);
                }
            }
            SectionId::Education => {
                rows.push(DocRow::Blank);
                rows.push(DocRow::Heading(id));
                rows.push(DocRow::Blank);
                for (elem, element) in elements.iter().enumerate() {
                    let ElementKind::Education(i) = element.kind else {
                        continue;
                    };
                    let entry = &portfolio.education[i];
                    emit_element(&mut rows, &mut element_geoms, elem, &mut |rows| {
                        rows.push(DocRow::ElemMark {
                            elem,
                            text: entry.period.clone(),
                        });
                        rows.push(DocRow::ElemSide {
                            elem,
                            text: entry.degree.clone(),
                        });
                        rows.push(DocRow::ElemSide {
                            elem,
                            text: entry.school.clone(),
                        });
                        if let Some(detail) = &entry.detail {
                            for line in wrap(detail, text_width.saturating_sub(4).max(12)) {
                                rows.push(DocRow::ElemSide { elem, text: line });
                            }
                        }
                    });
                    rows.push(DocRow::Blank);
                }
            }
            SectionId::Contact => {
                let Some(contact) = &portfolio.contact else {
                    continue;
                };
                rows.push(DocRow::Blank);
                rows.push(DocRow::Heading(id));
                rows.push(DocRow::Blank);
                if let Some(location) = &contact.location {
                    rows.push(DocRow::Text(location.clone()));
                    rows.push(DocRow::Blank);
                }
                rows.push(DocRow::Label(contact.email.clone()));
                for link in &contact.links {
                    rows.push(DocRow::LinkRow {
                        label: link.label.clone(),
                        url: link.url.clone(),
                    });
                }
                rows.push(DocRow::Blank);
                rows.push(DocRow::Hint(
                    "Press c to compose a message · y copies the address".to_string(),
                ));
                // Bottom padding lets the last section scroll up to the
                // anchor band below the navbar
                for _ in 0..8 {
                    rows.push(DocRow::Blank);
                }
            }
        }

        sections.push(SectionGeom {
            id,
            top_px: section_start as f32 * ROW_PX,
            height_px: (rows.len() - section_start) as f32 * ROW_PX,
        });
    }

    Layout {
        width,
        rows,
        sections,
        element_geoms,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_page() -> (Portfolio, Page) {
        let portfolio = Portfolio::sample();
        let page = Page::build(&portfolio, 80);
        (portfolio, page)
    }

    #[test]
    fn test_navbar_offset_is_five_rows() {
        assert_eq!(NAV_OFFSET_PX, 80.0);
        assert_eq!(NAV_ROWS as f32 * ROW_PX, NAV_OFFSET_PX);
    }

    #[test]
    fn test_sample_page_has_all_sections_in_order() {
        let (_, page) = sample_page();
        let ids: Vec<SectionId> = page.layout.sections.iter().map(|s| s.id).collect();
        assert_eq!(ids, SECTION_IDS.to_vec());

        // Tops strictly increase and stay row-aligned
        let mut prev = -1.0f32;
        for geom in &page.layout.sections {
            assert!(geom.top_px > prev);
            assert_eq!(geom.top_px % ROW_PX, 0.0);
            prev = geom.top_px;
        }
    }

    #[test]
    fn test_nav_links_match_present_sections() {
        let (_, page) = sample_page();
        assert_eq!(page.nav.links.len(), 7);

        let mut portfolio = Portfolio::sample();
        portfolio.contests.clear();
        let page = Page::build(&portfolio, 80);
        assert!(!page.nav.has_link(SectionId::Competitive));
        assert!(page.layout.section(SectionId::Competitive).is_none());
        assert_eq!(page.nav.links.len(), 6);
    }

    #[test]
    fn test_set_active_link_is_singleton() {
        let (_, mut page) = sample_page();
        assert_eq!(page.active_link(), None);

        assert!(page.set_active_link(SectionId::Projects));
        assert_eq!(page.active_link(), Some(SectionId::Projects));

        // Already active: no-op
        assert!(!page.set_active_link(SectionId::Projects));

        assert!(page.set_active_link(SectionId::About));
        let active: Vec<_> = page.nav.links.iter().filter(|l| l.active).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, SectionId::About);
    }

    #[test]
    fn test_set_active_link_skips_missing_sections() {
        let mut portfolio = Portfolio::sample();
        portfolio.contests.clear();
        let mut page = Page::build(&portfolio, 80);
        assert!(!page.set_active_link(SectionId::Competitive));
        assert_eq!(page.active_link(), None);
    }

    #[test]
    fn test_hidden_project_leaves_layout() {
        let (portfolio, mut page) = sample_page();
        let before = page.layout.height_px();

        let idx = page
            .elements
            .iter()
            .position(|e| e.is_project())
            .unwrap();
        page.elements[idx].visual.display = false;
        page.relayout(&portfolio, 80);

        assert!(page.layout.height_px() < before);
        assert!(page.layout.element_geoms[idx].is_none());
    }

    #[test]
    fn test_element_geoms_are_row_aligned() {
        let (_, page) = sample_page();
        for geom in page.layout.element_geoms.iter().flatten() {
            assert_eq!(geom.top_px % ROW_PX, 0.0);
            assert!(geom.height_px >= ROW_PX);
        }
    }

    #[test]
    fn test_fragment_round_trip() {
        for id in SECTION_IDS {
            assert_eq!(SectionId::from_fragment(id.fragment()), Some(id));
        }
        assert_eq!(SectionId::from_fragment("missing"), None);
        assert_eq!(SectionId::from_fragment(""), None);
    }

    #[test]
    fn test_wrap_respects_width() {
        let text = "one two three four five six seven eight nine ten";
        for line in wrap(text, 12) {
            assert!(line.len() <= 12, "line too long: {:?}", line);
        }
    }

    #[test]
    fn test_wrap_hard_breaks_long_words() {
        let lines = wrap("abcdefghijklmnop", 5);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(line.len() <= 5);
        }
    }

    #[test]
    fn test_wrap_empty_text_yields_one_row() {
        assert_eq!(wrap("", 10), vec![String::new()]);
    }
}
