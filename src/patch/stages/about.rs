//! Biography rewrite.

use std::ops::Range;

use regex::{NoExpand, Regex, RegexBuilder};

use crate::config::{AboutConfig, RewriteRule};
use crate::patch::anchor;
use crate::patch::{Outcome, PatchContext, PatchError, Stage};

struct Rewrite {
    pattern: Regex,
    replacement: String,
    literal: bool,
}

/// Stage that rewrites the biography with an ordered list of rules.
///
/// Rules are confined to the configured `<section>` when one is set. Once
/// none of them match the stage is skipped, so a rewritten page reads the
/// same on every run. Only a missing section is a miss.
pub struct AboutStage {
    section: Option<Regex>,
    rewrites: Vec<Rewrite>,
}

impl AboutStage {
    pub fn new(config: &AboutConfig) -> Result<Self, PatchError> {
        let section = config
            .section
            .as_deref()
            .map(|id| Regex::new(&format!(r#"<section[^>]*\bid="{}"[^>]*>"#, regex::escape(id))))
            .transpose()?;
        let rewrites = config
            .rules
            .iter()
            .map(compile)
            .collect::<Result<Vec<_>, PatchError>>()?;
        Ok(Self { section, rewrites })
    }

    fn scope(&self, html: &str) -> Option<Range<usize>> {
        let Some(section) = &self.section else {
            return Some(0..html.len());
        };
        let open = section.find(html)?;
        let end = html[open.end()..]
            .find("</section>")
            .map(|i| open.end() + i)
            .unwrap_or(html.len());
        Some(open.start()..end)
    }
}

fn compile(rule: &RewriteRule) -> Result<Rewrite, PatchError> {
    let pattern = if rule.literal {
        anchor::loose_literal(&rule.pattern, rule.case_insensitive)?
    } else {
        RegexBuilder::new(&rule.pattern)
            .case_insensitive(rule.case_insensitive)
            .build()?
    };
    Ok(Rewrite {
        pattern,
        replacement: rule.replacement.clone(),
        literal: rule.literal,
    })
}

impl Stage for AboutStage {
    fn name(&self) -> &'static str {
        "about"
    }

    fn apply(&self, html: &str, _ctx: &PatchContext) -> Result<Outcome, PatchError> {
        let Some(scope) = self.scope(html) else {
            return Ok(Outcome::missed("about section not found"));
        };

        let mut section = html[scope.clone()].to_string();
        let mut matched = 0;
        for rewrite in &self.rewrites {
            if !rewrite.pattern.is_match(&section) {
                continue;
            }
            matched += 1;
            section = if rewrite.literal {
                rewrite
                    .pattern
                    .replace_all(&section, NoExpand(&rewrite.replacement))
                    .into_owned()
            } else {
                rewrite
                    .pattern
                    .replace_all(&section, rewrite.replacement.as_str())
                    .into_owned()
            };
        }

        if section != html[scope.clone()] {
            let text = anchor::splice(html, scope, &section);
            return Ok(Outcome::applied(
                text,
                format!("applied {matched} of {} rewrites", self.rewrites.len()),
            ));
        }

        // a removal leaves nothing behind to recognise, so an unmatched
        // section is never a miss
        let done = self
            .rewrites
            .iter()
            .any(|r| r.literal && !r.replacement.is_empty() && section.contains(&r.replacement));
        if done {
            return Ok(Outcome::skipped("biography already rewritten"));
        }
        Ok(Outcome::skipped("no rewrite pattern matched"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patch::FragmentStore;

    const OLD: &str = "I believe AI should be accessible, ethical, and beneficial for all.";
    const NEW: &str = "I focus on building reliable, scalable AI systems that solve real-world problems under operational constraints.";

    const PAGE: &str = r#"<section id="projects"><p>Translated into French by volunteers.</p></section>
<section id="about" class="py-20">
    <p>Engineer, 21 years old, based in Zurich.</p>
    <div class="langs"><span class="badge">English</span><span class="badge">Arabic</span><span class="badge">French</span></div>
    <p>I believe AI should be accessible,
       ethical, and beneficial for all.</p>
</section>"#;

    fn run(html: &str, config: &AboutConfig) -> Outcome {
        let fragments = FragmentStore::new(".");
        let ctx = PatchContext::new(&fragments, false);
        AboutStage::new(config).unwrap().apply(html, &ctx).unwrap()
    }

    #[test]
    fn test_rewrites_biography() {
        let Outcome::Applied { text, .. } = run(PAGE, &AboutConfig::default()) else {
            panic!("expected applied");
        };
        assert!(!text.contains("21 years old"));
        assert!(!text.contains(">Arabic<"));
        assert!(text.contains("<span class=\"badge\">English</span></div>"));
        assert_eq!(text.matches(NEW).count(), 1);
        assert!(!text.contains("I believe AI should be accessible"));
        assert!(text.contains("<p>Engineer, based in Zurich.</p>"));
        // outside the about section nothing changes
        assert!(text.contains("<p>Translated into French by volunteers.</p>"));
    }

    #[test]
    fn test_placeholder_sentence_replaced_once() {
        let config = AboutConfig {
            section: None,
            rules: vec![RewriteRule {
                pattern: OLD.into(),
                replacement: NEW.into(),
                literal: true,
                case_insensitive: true,
            }],
        };
        let page = format!("<p>{OLD}</p>");
        let Outcome::Applied { text, detail } = run(&page, &config) else {
            panic!("expected applied");
        };
        assert_eq!(detail, "applied 1 of 1 rewrites");
        assert_eq!(text, format!("<p>{NEW}</p>"));
        assert_eq!(text.matches(NEW).count(), 1);
        assert_eq!(text.matches(OLD).count(), 0);

        assert_eq!(run(&text, &config), Outcome::skipped("biography already rewritten"));
    }

    #[test]
    fn test_literal_replacement_is_not_expanded() {
        let config = AboutConfig {
            section: None,
            rules: vec![RewriteRule {
                pattern: "price".into(),
                replacement: "$5 flat".into(),
                literal: true,
                case_insensitive: false,
            }],
        };
        let Outcome::Applied { text, .. } = run("<p>price</p>", &config) else {
            panic!("expected applied");
        };
        assert_eq!(text, "<p>$5 flat</p>");
    }

    #[test]
    fn test_missing_section_is_a_miss() {
        assert_eq!(
            run("<p>21 years old</p>", &AboutConfig::default()),
            Outcome::missed("about section not found")
        );
    }

    #[test]
    fn test_no_match_is_skipped() {
        assert_eq!(
            run("<section id=\"about\"><p>Hello</p></section>", &AboutConfig::default()),
            Outcome::skipped("no rewrite pattern matched")
        );
    }

    #[test]
    fn test_removals_only_rerun_is_skipped() {
        let config = AboutConfig {
            section: Some("about".into()),
            rules: vec![RewriteRule {
                pattern: r"21 years old[,\s]*".into(),
                replacement: String::new(),
                literal: false,
                case_insensitive: true,
            }],
        };
        let page = "<section id=\"about\"><p>Engineer, 21 years old, in Zurich.</p></section>";
        let Outcome::Applied { text, .. } = run(page, &config) else {
            panic!("expected applied");
        };
        assert_eq!(run(&text, &config), Outcome::skipped("no rewrite pattern matched"));
    }
}
