//! New project card.

use std::path::PathBuf;

use regex::Regex;

use crate::config::CardConfig;
use crate::patch::anchor;
use crate::patch::fragment::strip_fence;
use crate::patch::{Outcome, PatchContext, PatchError, Stage};

const BUILTIN_CARD: &str = include_str!("../../../fragments/prompt-academy-card.html");

/// Indentation of a card inside the projects grid.
const CARD_INDENT: &str = "                    ";

/// Stage that inserts a single project card into the projects grid.
///
/// Guarded by signature strings: when all of them are on the page the card
/// is already there. The card goes right after the block matched by
/// `after`; when that block is missing, right before the block matched by
/// `fallback_before`.
pub struct CardStage {
    fragment: Option<PathBuf>,
    signatures: Vec<String>,
    after: Regex,
    fallback_before: Regex,
}

impl CardStage {
    pub fn new(config: &CardConfig) -> Result<Self, PatchError> {
        Ok(Self {
            fragment: config.fragment.clone(),
            signatures: config.signatures.clone(),
            after: Regex::new(&config.after)?,
            fallback_before: Regex::new(&config.fallback_before)?,
        })
    }

    fn card(&self, ctx: &PatchContext) -> Result<String, PatchError> {
        let card = match &self.fragment {
            Some(name) => ctx.fragments.load(name)?,
            None => strip_fence(BUILTIN_CARD).to_string(),
        };
        Ok(format!("\n{CARD_INDENT}{card}\n"))
    }
}

impl Stage for CardStage {
    fn name(&self) -> &'static str {
        "card"
    }

    fn requires(&self) -> &'static [&'static str] {
        &["categories"]
    }

    fn apply(&self, html: &str, ctx: &PatchContext) -> Result<Outcome, PatchError> {
        if !self.signatures.is_empty() && self.signatures.iter().all(|s| html.contains(s)) {
            return Ok(Outcome::skipped("card already present"));
        }

        let card = self.card(ctx)?;

        if let Some(text) = anchor::insert_after_match(html, &self.after, &card) {
            return Ok(Outcome::applied(text, "inserted card after anchor block"));
        }
        if let Some(text) = anchor::insert_before_match(html, &self.fallback_before, &card) {
            return Ok(Outcome::applied(
                text,
                "anchor block not found, inserted card at end of grid",
            ));
        }
        Ok(Outcome::missed("no insertion point for card"))
    }
}
