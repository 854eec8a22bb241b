//! Project modal block.

use std::path::PathBuf;

use crate::config::ModalsConfig;
use crate::patch::anchor::{self, Occurrence};
use crate::patch::{Outcome, PatchContext, PatchError, Stage};

const MAIN_CLOSE: &str = "</main>";

/// Stage that replaces the page's project modals with the markup from a
/// fragment file.
///
/// Everything from the first modal marker up to `</main>` is removed, and the
/// fragment goes in its place just before `</main>`. Only the region before
/// the first `</main>` is searched for markers, so content after the main
/// element is never touched.
pub struct ModalsStage {
    fragment: PathBuf,
    start_markers: Vec<String>,
}

impl ModalsStage {
    pub fn new(config: &ModalsConfig) -> Self {
        Self {
            fragment: config.fragment.clone(),
            start_markers: config.start_markers.clone(),
        }
    }
}

impl Stage for ModalsStage {
    fn name(&self) -> &'static str {
        "modals"
    }

    fn requires(&self) -> &'static [&'static str] {
        &["links"]
    }

    fn apply(&self, html: &str, ctx: &PatchContext) -> Result<Outcome, PatchError> {
        let modals = ctx.fragments.load(&self.fragment)?;
        if modals.is_empty() {
            return Err(PatchError::stage(
                "modals",
                format!("fragment '{}' is empty", self.fragment.display()),
            ));
        }
        if html.contains(&modals) {
            return Ok(Outcome::skipped("modals already up to date"));
        }

        let main_end = match anchor::locate(html, MAIN_CLOSE, Occurrence::First) {
            Ok(at) => at,
            Err(miss) => return Ok(Outcome::missed(miss.to_string())),
        };

        let markers: Vec<&str> = self.start_markers.iter().map(String::as_str).collect();
        let (start, detail) = match anchor::find_block(&html[..main_end], &markers, &[]) {
            Some(block) => (block.start, "replaced existing modals"),
            None => (main_end, "inserted modals"),
        };

        let block = format!("\n{modals}\n    ");
        let text = anchor::splice(html, start..main_end, &block);
        Ok(Outcome::applied(text, detail))
    }
}
