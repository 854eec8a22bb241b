//! Project card category attributes.

use regex::Regex;

use crate::config::CategoryRule;
use crate::patch::anchor;
use crate::patch::{Outcome, PatchContext, PatchError, Stage};
use crate::util::{escape_attr, plural};

const CARD_OPEN: &str = "<div class=\"project-card";
const ATTR: &str = "data-categories";

struct CardRule {
    title: String,
    heading: Regex,
    categories: String,
}

/// Stage that adds `data-categories` to each known project card.
///
/// A card is found through its title: the title's heading (or, failing
/// that, the title's first occurrence) is located, and the nearest
/// `project-card` opening tag before it is the card that gets tagged.
pub struct CategoriesStage {
    rules: Vec<CardRule>,
}

enum Tagged {
    Added(String),
    Already,
    NoCard,
}

impl CategoriesStage {
    pub fn new(rules: &[CategoryRule]) -> Result<Self, PatchError> {
        let rules = rules
            .iter()
            .map(|rule| {
                let heading = Regex::new(&format!(
                    r"<h[1-6][^>]*>\s*{}\s*</h[1-6]>",
                    regex::escape(&rule.title)
                ))?;
                Ok(CardRule {
                    title: rule.title.clone(),
                    heading,
                    categories: rule.categories.join(" "),
                })
            })
            .collect::<Result<Vec<_>, PatchError>>()?;
        Ok(Self { rules })
    }

    fn tag(&self, html: &str, rule: &CardRule) -> Tagged {
        let title_at = rule
            .heading
            .find(html)
            .map(|m| m.start())
            .or_else(|| html.find(&rule.title));
        let Some(title_at) = title_at else {
            return Tagged::NoCard;
        };
        let Some(card_at) = html[..title_at].rfind(CARD_OPEN) else {
            return Tagged::NoCard;
        };

        let Some(tag_len) = html[card_at..].find('>') else {
            return Tagged::NoCard;
        };
        let open_tag = &html[card_at..card_at + tag_len];
        if open_tag.contains(ATTR) {
            return Tagged::Already;
        }

        // end of the class attribute value, after `<div class="`
        let value_start = card_at + "<div class=\"".len();
        let Some(value_len) = html[value_start..card_at + tag_len].find('"') else {
            return Tagged::NoCard;
        };
        let at = value_start + value_len + 1;
        let attr = format!(" {ATTR}=\"{}\"", escape_attr(&rule.categories));
        Tagged::Added(anchor::splice(html, at..at, &attr))
    }
}

impl Stage for CategoriesStage {
    fn name(&self) -> &'static str {
        "categories"
    }

    fn requires(&self) -> &'static [&'static str] {
        &["filters"]
    }

    fn apply(&self, html: &str, _ctx: &PatchContext) -> Result<Outcome, PatchError> {
        let mut text = html.to_string();
        let mut tagged = 0;
        let mut already = 0;
        let mut missing = Vec::new();

        for rule in &self.rules {
            match self.tag(&text, rule) {
                Tagged::Added(patched) => {
                    text = patched;
                    tagged += 1;
                }
                Tagged::Already => already += 1,
                Tagged::NoCard => missing.push(rule.title.as_str()),
            }
        }

        // titles without a card are only a miss when no card was found at
        // all, so a re-run classifies the page the same way
        if tagged + already == 0 {
            return Ok(Outcome::missed(format!("no card for {}", missing.join(", "))));
        }

        let note = if missing.is_empty() {
            String::new()
        } else {
            format!(" (no card for {})", missing.join(", "))
        };
        if tagged > 0 {
            return Ok(Outcome::applied(
                text,
                format!("tagged {}{note}", plural(tagged, "card")),
            ));
        }
        Ok(Outcome::skipped(format!("all cards already tagged{note}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patch::FragmentStore;

    const PAGE: &str = r#"<div class="grid">
                    <!-- ESG -->
                    <div class="project-card bg-white rounded-xl">
                        <h3 class="text-2xl font-bold mb-2">ESG Dashboard</h3>
                        <p>Mentions Stock Prediction in passing.</p>
                    </div>
                    <!-- Stock -->
                    <div class="project-card bg-white rounded-xl">
                        <h3 class="text-2xl font-bold mb-2">Stock Prediction</h3>
                    </div>
                </div>"#;

    fn rules(pairs: &[(&str, &str)]) -> Vec<CategoryRule> {
        pairs
            .iter()
            .map(|(title, cats)| CategoryRule {
                title: title.to_string(),
                categories: cats.split_whitespace().map(String::from).collect(),
            })
            .collect()
    }

    fn run(html: &str, pairs: &[(&str, &str)]) -> Outcome {
        let fragments = FragmentStore::new(".");
        let ctx = PatchContext::new(&fragments, false);
        CategoriesStage::new(&rules(pairs))
            .unwrap()
            .apply(html, &ctx)
            .unwrap()
    }

    #[test]
    fn test_tags_the_card_holding_the_title() {
        let Outcome::Applied { text, detail } = run(
            PAGE,
            &[("ESG Dashboard", "civic aiSystems"), ("Stock Prediction", "aiSystems")],
        ) else {
            panic!("expected applied");
        };
        assert_eq!(detail, "tagged 2 cards");
        assert!(text.contains(
            r#"<div class="project-card bg-white rounded-xl" data-categories="civic aiSystems">
                        <h3 class="text-2xl font-bold mb-2">ESG Dashboard</h3>"#
        ));
        // the passing mention inside the ESG card must not pull the tag there
        assert!(text.contains(
            r#"<div class="project-card bg-white rounded-xl" data-categories="aiSystems">
                        <h3 class="text-2xl font-bold mb-2">Stock Prediction</h3>"#
        ));
    }

    #[test]
    fn test_tagged_cards_are_skipped() {
        let pairs = [("ESG Dashboard", "civic"), ("Stock Prediction", "aiSystems")];
        let Outcome::Applied { text, .. } = run(PAGE, &pairs) else {
            panic!("expected applied");
        };
        assert_eq!(run(&text, &pairs), Outcome::skipped("all cards already tagged"));
        assert_eq!(text.matches(ATTR).count(), 2);
    }

    #[test]
    fn test_unknown_titles_are_reported() {
        match run(PAGE, &[("ESG Dashboard", "civic"), ("VR Ski Training Game", "game")]) {
            Outcome::Applied { detail, .. } => {
                assert_eq!(detail, "tagged 1 card (no card for VR Ski Training Game)")
            }
            other => panic!("expected applied, got {other:?}"),
        }
        assert_eq!(
            run(PAGE, &[("VR Ski Training Game", "game")]),
            Outcome::missed("no card for VR Ski Training Game")
        );
    }

    #[test]
    fn test_rerun_with_unknown_titles_is_skipped() {
        let pairs = [("ESG Dashboard", "civic"), ("VR Ski Training Game", "game")];
        let Outcome::Applied { text, .. } = run(PAGE, &pairs) else {
            panic!("expected applied");
        };
        assert_eq!(
            run(&text, &pairs),
            Outcome::skipped("all cards already tagged (no card for VR Ski Training Game)")
        );
    }

    #[test]
    fn test_title_outside_any_card_is_a_miss() {
        assert_eq!(
            run("<h3>ESG Dashboard</h3>", &[("ESG Dashboard", "civic")]),
            Outcome::missed("no card for ESG Dashboard")
        );
    }
}
