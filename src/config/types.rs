//! Configuration type definitions.
//!
//! These types are pure data - no I/O. Every field has a default, so an
//! empty `folio.yaml` (or none at all) describes the stock patch plan.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

// =============================================================================
// Top-level config
// =============================================================================

/// A patch plan: which document to patch, with which stages, in which order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FolioConfig {
    /// The HTML document to patch, relative to the config file
    pub document: PathBuf,

    /// Where to write the result (defaults to overwriting `document`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,

    /// Directory fragment files are read from (defaults to the config directory)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fragments_dir: Option<PathBuf>,

    /// Keep a `.bak` copy of the file being overwritten
    pub backup: bool,

    /// Fail the run when a stage finds nothing to patch
    pub strict: bool,

    /// Stage names, in the order they run
    pub stages: Vec<String>,

    pub links: LinksConfig,
    pub filters: FiltersConfig,
    pub categories: Vec<CategoryRule>,
    pub modals: ModalsConfig,
    pub form: FormConfig,
    pub card: CardConfig,
    pub about: AboutConfig,
}

impl Default for FolioConfig {
    fn default() -> Self {
        Self {
            document: PathBuf::from("index.html"),
            output: None,
            fragments_dir: None,
            backup: true,
            strict: false,
            stages: [
                "links",
                "filters",
                "categories",
                "modals",
                "form",
                "card",
                "about",
                "toggle",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            links: LinksConfig::default(),
            filters: FiltersConfig::default(),
            categories: default_categories(),
            modals: ModalsConfig::default(),
            form: FormConfig::default(),
            card: CardConfig::default(),
            about: AboutConfig::default(),
        }
    }
}

// =============================================================================
// Stage sections
// =============================================================================

/// Enhancement assets linked from the page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LinksConfig {
    pub stylesheet: String,
    pub script: String,
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            stylesheet: "portfolio-enhancements.css".into(),
            script: "portfolio-enhancements.js".into(),
        }
    }
}

/// Project filter bar under the projects heading.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FiltersConfig {
    /// Subtitle text to replace (whitespace-insensitive)
    pub old_subtitle: String,
    /// Replacement subtitle text
    pub subtitle: String,
    pub buttons: Vec<FilterButton>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterButton {
    pub filter: String,
    pub label: String,
}

impl FilterButton {
    fn new(filter: &str, label: &str) -> Self {
        Self {
            filter: filter.into(),
            label: label.into(),
        }
    }
}

impl Default for FiltersConfig {
    fn default() -> Self {
        Self {
            old_subtitle:
                "From award-winning applications to cutting-edge AI research with industry leaders"
                    .into(),
            subtitle:
                "Production AI systems, multi-agent architectures, and applied machine learning"
                    .into(),
            buttons: vec![
                FilterButton::new("all", "All Projects"),
                FilterButton::new("healthcare", "Healthcare AI"),
                FilterButton::new("aiSystems", "AI Systems / Infrastructure"),
                FilterButton::new("civic", "Civic Tech"),
                FilterButton::new("game", "Game Development"),
            ],
        }
    }
}

/// Categories attached to the card whose title is `title`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRule {
    pub title: String,
    pub categories: Vec<String>,
}

fn default_categories() -> Vec<CategoryRule> {
    [
        ("ESG Dashboard", "civic aiSystems"),
        ("Customer Digital Twin", "healthcare aiSystems"),
        ("MRI Scheduling AI", "healthcare aiSystems"),
        ("Civic AI Debator", "civic aiSystems"),
        ("AI Behavior Lab", "civic game"),
        ("Stock Prediction", "aiSystems"),
        ("Civic AI Negotiator", "civic aiSystems"),
        ("Agentic Infra Co-Pilot", "aiSystems"),
        ("Illigo EV Platform", "aiSystems"),
        ("Dynamic Weather App", "civic"),
        ("VR Ski Training Game", "game"),
        ("Accessible Puzzle Game", "game"),
    ]
    .into_iter()
    .map(|(title, categories)| CategoryRule {
        title: title.into(),
        categories: categories.split_whitespace().map(String::from).collect(),
    })
    .collect()
}

/// Project modal block.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModalsConfig {
    /// Fragment holding the replacement modal markup
    pub fragment: PathBuf,
    /// Markers that open the existing modal block
    pub start_markers: Vec<String>,
}

impl Default for ModalsConfig {
    fn default() -> Self {
        Self {
            fragment: PathBuf::from("modal-content-condensed.html"),
            start_markers: vec!["<!-- Project Modals".into(), "<!-- Modal:".into()],
        }
    }
}

/// Contact form submission target.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Leading classes that identify the contact form
    pub class_prefix: String,
    pub endpoint: String,
    pub method: String,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            class_prefix: "bg-white p-8".into(),
            endpoint: "https://formspree.io/f/mzdgjlpw".into(),
            method: "POST".into(),
        }
    }
}

/// New project card.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CardConfig {
    /// Fragment with the card markup (the built-in card when unset)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fragment: Option<PathBuf>,
    /// Strings that are all present once the card is on the page
    pub signatures: Vec<String>,
    /// Regex matching the block the card goes after
    pub after: String,
    /// Regex matching the grid's closing tags, which the card goes before
    /// when `after` finds nothing
    pub fallback_before: String,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            fragment: None,
            signatures: vec![
                "Prompt Academy".into(),
                "prompt-academy/assets/level_1_background.png".into(),
            ],
            after: r"(?is)<!-- Stock.*?</div>\s*</div>\s*</div>\s*".into(),
            fallback_before: r"(?s)</div>\s*</div>\s*</section>\s*<!-- About".into(),
        }
    }
}

/// Biography rewrite.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AboutConfig {
    /// `id` of the `<section>` the rules are confined to (whole page when unset)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    pub rules: Vec<RewriteRule>,
}

/// Replace every match of `pattern` with `replacement`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewriteRule {
    pub pattern: String,
    #[serde(default)]
    pub replacement: String,
    /// Treat `pattern` as literal text with flexible whitespace
    #[serde(default)]
    pub literal: bool,
    #[serde(default = "default_true")]
    pub case_insensitive: bool,
}

fn default_true() -> bool {
    true
}

impl RewriteRule {
    fn remove(pattern: &str) -> Self {
        Self {
            pattern: pattern.into(),
            replacement: String::new(),
            literal: false,
            case_insensitive: true,
        }
    }

    fn replace_text(old: &str, new: &str) -> Self {
        Self {
            pattern: old.into(),
            replacement: new.into(),
            literal: true,
            case_insensitive: true,
        }
    }
}

impl Default for AboutConfig {
    fn default() -> Self {
        Self {
            section: Some("about".into()),
            rules: vec![
                RewriteRule::remove(r"21 years old[,\s]*"),
                RewriteRule::remove(r",\s*21\s*years\s*old"),
                RewriteRule::remove(r"<span[^>]*>Arabic</span>"),
                RewriteRule::remove(r"Arabic[,\s]*"),
                RewriteRule::remove(r"<span[^>]*>French</span>"),
                RewriteRule::remove(r"French[,\s]*"),
                RewriteRule::replace_text(
                    "I believe AI should be accessible, ethical, and beneficial for all.",
                    "I focus on building reliable, scalable AI systems that solve real-world problems under operational constraints.",
                ),
            ],
        }
    }
}
