// Portfolio content model
//
// The page chrome (navbar, sections, filter chips) is fixed; the text that
// fills it comes from this model. Content is loaded from a TOML file when
// one exists and falls back to the bundled sample otherwise, the same
// precedence scheme the config module uses.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Everything the page renders, in document order.
#[derive(Debug, Clone, Deserialize)]
pub struct Portfolio {
    pub name: String,
    pub tagline: String,

    /// Intro paragraphs for the about section
    #[serde(default)]
    pub about: Vec<String>,

    /// Grouped skill lists, one card per group
    #[serde(default)]
    pub skills: Vec<SkillGroup>,

    /// Competitive programming profiles
    #[serde(default)]
    pub contests: Vec<Contest>,

    /// Project cards, filterable by category
    #[serde(default)]
    pub projects: Vec<Project>,

    /// Education timeline, most recent first
    #[serde(default)]
    pub education: Vec<Education>,

    /// Contact details. Without this the contact section (and the
    /// compose form) is simply absent from the page.
    pub contact: Option<Contact>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SkillGroup {
    pub title: String,
    #[serde(default)]
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Contest {
    pub platform: String,
    pub handle: String,
    pub standing: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Project {
    pub title: String,
    pub summary: String,
    #[serde(default)]
    pub tech: Vec<String>,
    /// Filter category, e.g. "systems" or "web"
    pub category: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Education {
    pub period: String,
    pub degree: String,
    pub school: String,
    pub detail: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Contact {
    /// Recipient for composed messages
    pub email: String,
    pub location: Option<String>,
    #[serde(default)]
    pub links: Vec<ContactLink>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContactLink {
    pub label: String,
    pub url: String,
}

impl Portfolio {
    /// Default portfolio file location: ~/.config/folio/portfolio.toml
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("folio").join("portfolio.toml"))
    }

    /// Load a portfolio from an explicit TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read portfolio file {}", path.display()))?;
        let portfolio: Portfolio = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse portfolio file {}", path.display()))?;
        Ok(portfolio)
    }

    /// Resolve the portfolio to show: explicit path > default file > sample.
    ///
    /// A present-but-broken file is a hard error rather than a silent
    /// fallback, so the user debugs their file and not the sample data.
    pub fn resolve(explicit: Option<&PathBuf>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        if let Some(path) = Self::default_path() {
            if path.exists() {
                return Self::load(&path);
            }
        }

        Ok(Self::sample())
    }

    /// Distinct project categories in first-seen order.
    /// These become the filter chips, after the implicit "all".
    pub fn categories(&self) -> Vec<String> {
        let mut seen = Vec::new();
        for project in &self.projects {
            if !seen.iter().any(|c| c == &project.category) {
                seen.push(project.category.clone());
            }
        }
        seen
    }

    /// Bundled sample shown when no portfolio file exists
    pub fn sample() -> Self {
        Self {
            name: "Rafi Karim".to_string(),
            tagline: "Systems programmer · distributed plumbing · terminal enthusiast".to_string(),
            about: vec![
                "I build backend services and the tooling around them. Most of my \
                 time goes into making data move reliably between machines and \
                 making the failure cases readable when it does not."
                    .to_string(),
                "Away from work I write small terminal utilities, solve contest \
                 problems, and occasionally restore mechanical keyboards."
                    .to_string(),
            ],
            skills: vec![
                SkillGroup {
                    title: "Languages".to_string(),
                    items: vec![
                        "Rust".to_string(),
                        "Go".to_string(),
                        "C".to_string(),
                        "Python".to_string(),
                        "SQL".to_string(),
                    ],
                },
                SkillGroup {
                    title: "Infrastructure".to_string(),
                    items: vec![
                        "PostgreSQL".to_string(),
                        "Kafka".to_string(),
                        "Kubernetes".to_string(),
                        "Terraform".to_string(),
                    ],
                },
                SkillGroup {
                    title: "Practices".to_string(),
                    items: vec![
                        "Property testing".to_string(),
                        "Tracing-first debugging".to_string(),
                        "Capacity planning".to_string(),
                    ],
                },
            ],
            contests: vec![
                Contest {
                    platform: "Codeforces".to_string(),
                    handle: "rkarim".to_string(),
                    standing: "Candidate Master · peak 1942".to_string(),
                },
                Contest {
                    platform: "ICPC".to_string(),
                    handle: "Team Segfault Trio".to_string(),
                    standing: "Regional finalist, 2019".to_string(),
                },
                Contest {
                    platform: "Advent of Code".to_string(),
                    handle: "rkarim".to_string(),
                    standing: "All 50 stars, 2022-2024".to_string(),
                },
            ],
            projects: vec![
                Project {
                    title: "driftwood".to_string(),
                    summary: "Write-ahead log shipping daemon with automatic \
                              failover between replicas."
                        .to_string(),
                    tech: vec!["Rust".to_string(), "tokio".to_string(), "PostgreSQL".to_string()],
                    category: "systems".to_string(),
                },
                Project {
                    title: "hencoop".to_string(),
                    summary: "Job queue with per-tenant fairness and poison-pill \
                              quarantine, built for a previous employer and later \
                              open sourced."
                        .to_string(),
                    tech: vec!["Go".to_string(), "Kafka".to_string()],
                    category: "backend".to_string(),
                },
                Project {
                    title: "quayside".to_string(),
                    summary: "Self-hosted status page with latency heatmaps \
                              rendered straight from probe data."
                        .to_string(),
                    tech: vec!["TypeScript".to_string(), "SvelteKit".to_string()],
                    category: "web".to_string(),
                },
                Project {
                    title: "inkcap".to_string(),
                    summary: "Terminal screenshot tool that renders ANSI capture \
                              files to SVG with full truecolor support."
                        .to_string(),
                    tech: vec!["Rust".to_string(), "ratatui".to_string()],
                    category: "systems".to_string(),
                },
                Project {
                    title: "ledgerline".to_string(),
                    summary: "Double-entry bookkeeping API with idempotent \
                              posting and audit trails."
                        .to_string(),
                    tech: vec!["Rust".to_string(), "axum".to_string(), "PostgreSQL".to_string()],
                    category: "backend".to_string(),
                },
            ],
            education: vec![
                Education {
                    period: "2021 - present".to_string(),
                    degree: "Staff-adjacent wandering".to_string(),
                    school: "Industry".to_string(),
                    detail: Some("Storage infrastructure, then developer tooling.".to_string()),
                },
                Education {
                    period: "2017 - 2021".to_string(),
                    degree: "BSc, Computer Science".to_string(),
                    school: "Chittagong University of Engineering & Technology".to_string(),
                    detail: Some("Thesis on log-structured merge tree compaction.".to_string()),
                },
            ],
            contact: Some(Contact {
                email: "rafi@rkarim.dev".to_string(),
                location: Some("Dhaka, Bangladesh (UTC+6)".to_string()),
                links: vec![
                    ContactLink {
                        label: "GitHub".to_string(),
                        url: "https://github.com/rkarim".to_string(),
                    },
                    ContactLink {
                        label: "Mastodon".to_string(),
                        url: "https://hachyderm.io/@rkarim".to_string(),
                    },
                ],
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_is_complete() {
        let p = Portfolio::sample();
        assert!(!p.about.is_empty());
        assert!(!p.skills.is_empty());
        assert!(!p.contests.is_empty());
        assert!(!p.projects.is_empty());
        assert!(!p.education.is_empty());
        assert!(p.contact.is_some());
    }

    #[test]
    fn test_categories_first_seen_order() {
        let p = Portfolio::sample();
        assert_eq!(p.categories(), vec!["systems", "backend", "web"]);
    }

    #[test]
    fn test_parse_minimal_portfolio() {
        let toml_str = r#"
            name = "Ada"
            tagline = "hello"

            [[projects]]
            title = "engine"
            summary = "difference engine"
            category = "hardware"
        "#;
        let p: Portfolio = toml::from_str(toml_str).unwrap();
        assert_eq!(p.name, "Ada");
        assert!(p.about.is_empty());
        assert!(p.contact.is_none());
        assert_eq!(p.projects.len(), 1);
        assert_eq!(p.categories(), vec!["hardware"]);
    }

    #[test]
    fn test_parse_rejects_missing_name() {
        let toml_str = r#"tagline = "no name""#;
        let parsed: Result<Portfolio, _> = toml::from_str(toml_str);
        assert!(parsed.is_err());
    }
}
