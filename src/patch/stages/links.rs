//! Enhancement asset links.
//!
//! Links the enhancement stylesheet from `<head>` and the enhancement script
//! from the end of `<body>`.

use crate::config::LinksConfig;
use crate::patch::anchor::{self, Occurrence};
use crate::patch::{Outcome, PatchContext, PatchError, Stage};
use crate::util::escape_attr;

/// Stage that inserts the stylesheet `<link>` and the `<script>` tag.
///
/// Each asset is guarded separately: an asset whose file name already
/// appears in the page, raw or escaped, is left alone. If either asset has
/// no anchor the stage misses and neither is added.
pub struct LinksStage {
    stylesheet: String,
    script: String,
}

impl LinksStage {
    pub fn new(config: &LinksConfig) -> Self {
        Self {
            stylesheet: config.stylesheet.clone(),
            script: config.script.clone(),
        }
    }
}

impl Stage for LinksStage {
    fn name(&self) -> &'static str {
        "links"
    }

    fn apply(&self, html: &str, _ctx: &PatchContext) -> Result<Outcome, PatchError> {
        let mut text = html.to_string();
        let mut added = Vec::new();
        let mut missed = Vec::new();

        let stylesheet = escape_attr(&self.stylesheet);
        if !is_linked(&text, &self.stylesheet, &stylesheet) {
            let link = format!("    <link rel=\"stylesheet\" href=\"{stylesheet}\">\n");
            match anchor::insert_before(&text, "</head>", Occurrence::Only, &link) {
                Ok(patched) => {
                    text = patched;
                    added.push("stylesheet");
                }
                Err(miss) => missed.push(format!("stylesheet: {miss}")),
            }
        }

        let script = escape_attr(&self.script);
        if !is_linked(&text, &self.script, &script) {
            let tag = format!("    <script src=\"{script}\"></script>\n");
            match anchor::insert_before(&text, "</body>", Occurrence::Last, &tag) {
                Ok(patched) => {
                    text = patched;
                    added.push("script");
                }
                Err(miss) => missed.push(format!("script: {miss}")),
            }
        }

        // a miss on either asset leaves the page untouched
        if !missed.is_empty() {
            return Ok(Outcome::missed(missed.join("; ")));
        }
        if added.is_empty() {
            return Ok(Outcome::skipped("stylesheet and script already linked"));
        }
        Ok(Outcome::applied(text, format!("linked {}", added.join(", "))))
    }
}

/// An asset counts as linked when its name appears raw or attribute-escaped.
fn is_linked(html: &str, raw: &str, escaped: &str) -> bool {
    html.contains(raw) || html.contains(escaped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patch::FragmentStore;

    const PAGE: &str = "<html>\n<head>\n    <title>Portfolio</title>\n</head>\n<body>\n    <main></main>\n</body>\n</html>\n";

    fn run(html: &str) -> Outcome {
        let fragments = FragmentStore::new(".");
        let ctx = PatchContext::new(&fragments, false);
        LinksStage::new(&LinksConfig::default()).apply(html, &ctx).unwrap()
    }

    fn applied_text(outcome: Outcome) -> String {
        match outcome {
            Outcome::Applied { text, .. } => text,
            other => panic!("expected applied, got {other:?}"),
        }
    }

    #[test]
    fn test_adds_one_link_before_head_close() {
        let text = applied_text(run(PAGE));
        assert_eq!(text.matches("<link ").count(), 1);
        assert!(text.contains(
            "    <link rel=\"stylesheet\" href=\"portfolio-enhancements.css\">\n</head>"
        ));
        assert!(text.contains(
            "    <script src=\"portfolio-enhancements.js\"></script>\n</body>"
        ));
    }

    #[test]
    fn test_second_run_adds_nothing() {
        let once = applied_text(run(PAGE));
        assert_eq!(
            run(&once),
            Outcome::skipped("stylesheet and script already linked")
        );
    }

    #[test]
    fn test_only_missing_asset_is_added() {
        let page = PAGE.replace(
            "</body>",
            "    <script src=\"portfolio-enhancements.js\"></script>\n</body>",
        );
        match run(&page) {
            Outcome::Applied { text, detail } => {
                assert_eq!(detail, "linked stylesheet");
                assert_eq!(text.matches("portfolio-enhancements.js").count(), 1);
            }
            other => panic!("expected applied, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_anchors_are_a_miss() {
        assert_eq!(
            run("<p>fragment</p>"),
            Outcome::missed(
                "stylesheet: anchor `</head>` not found; script: anchor `</body>` not found"
            )
        );
    }

    #[test]
    fn test_duplicate_head_close_is_ambiguous() {
        let page = PAGE.replace("</head>", "</head></head>");
        let expected = Outcome::missed("stylesheet: anchor `</head>` occurs 2 times");
        assert_eq!(run(&page), expected);
        // nothing was written, so a second run sees the same page
        assert_eq!(run(&page), expected);
    }

    #[test]
    fn test_escaped_asset_is_linked_once() {
        let config = LinksConfig {
            stylesheet: "a.css?v=1&t=2".into(),
            script: "portfolio-enhancements.js".into(),
        };
        let fragments = FragmentStore::new(".");
        let ctx = PatchContext::new(&fragments, false);
        let stage = LinksStage::new(&config);

        let text = applied_text(stage.apply(PAGE, &ctx).unwrap());
        assert!(text.contains("href=\"a.css?v=1&amp;t=2\""));
        assert_eq!(
            stage.apply(&text, &ctx).unwrap(),
            Outcome::skipped("stylesheet and script already linked")
        );
        assert_eq!(text.matches("<link ").count(), 1);
    }
}
