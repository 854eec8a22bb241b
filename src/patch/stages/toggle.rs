//! Dark mode toggle button.

use std::sync::LazyLock;

use regex::Regex;

use crate::patch::anchor;
use crate::patch::{Outcome, PatchContext, PatchError, Stage};

const GUARD: &str = "id=\"dark-mode-toggle\"";

const BUTTON: &str = r#"
    <!-- Dark Mode Toggle -->
    <button id="dark-mode-toggle" aria-label="Toggle dark mode">
        <svg fill="none" stroke="currentColor" viewBox="0 0 24 24">
            <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2"
                  d="M20.354 15.354A9 9 0 018.646 3.646 9.003 9.003 0 0012 21a9.003 9.003 0 008.354-5.646z"></path>
        </svg>
    </button>

"#;

static BODY_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<body(?:\s[^>]*)?>").expect("valid regex"));

/// Stage that puts the dark mode toggle right after the opening `<body>` tag.
pub struct ToggleStage;

impl Stage for ToggleStage {
    fn name(&self) -> &'static str {
        "toggle"
    }

    fn requires(&self) -> &'static [&'static str] {
        &["links"]
    }

    fn apply(&self, html: &str, _ctx: &PatchContext) -> Result<Outcome, PatchError> {
        if html.contains(GUARD) {
            return Ok(Outcome::skipped("toggle already present"));
        }
        match anchor::insert_after_match(html, &BODY_OPEN, BUTTON) {
            Some(text) => Ok(Outcome::applied(text, "added dark mode toggle")),
            None => Ok(Outcome::missed("opening <body> tag not found")),
        }
    }
}
