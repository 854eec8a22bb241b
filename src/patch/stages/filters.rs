//! Project filter bar.

use regex::{Captures, Regex};

use crate::config::{FilterButton, FiltersConfig};
use crate::patch::anchor;
use crate::patch::{Outcome, PatchContext, PatchError, Stage};
use crate::util::escape_attr;

const GUARD: &str = "data-filter=";

/// Stage that swaps the projects subtitle for a new one followed by a row
/// of filter buttons.
///
/// The old subtitle is matched with flexible whitespace, and must be the
/// last paragraph of its header `<div>`; the filter bar goes between the
/// paragraph and that closing tag.
pub struct FiltersStage {
    subtitle_re: Regex,
    subtitle: String,
    buttons: Vec<FilterButton>,
}

impl FiltersStage {
    pub fn new(config: &FiltersConfig) -> Result<Self, PatchError> {
        let old = anchor::loose_literal(&config.old_subtitle, false)?;
        let subtitle_re = Regex::new(&format!(
            r"<p(?P<attrs>[^>]*)>\s*{}\s*</p>\s*</div>",
            old.as_str()
        ))?;
        Ok(Self {
            subtitle_re,
            subtitle: config.subtitle.clone(),
            buttons: config.buttons.clone(),
        })
    }

    fn render(&self, attrs: &str) -> String {
        let mut out = format!(
            "<p{}>{}</p>\n                    \n                    <!-- Project Filter -->\n                    <div class=\"flex flex-wrap justify-center gap-3 mt-4\">\n",
            with_class(attrs, "mb-8"),
            escape_attr(&self.subtitle)
        );
        for (i, button) in self.buttons.iter().enumerate() {
            let active = if i == 0 { " active" } else { "" };
            out.push_str(&format!(
                "                        <button class=\"filter-btn{active} px-6 py-2 rounded-full font-semibold transition-all\" data-filter=\"{}\">{}</button>\n",
                escape_attr(&button.filter),
                escape_attr(&button.label)
            ));
        }
        out.push_str("                    </div>\n                </div>");
        out
    }
}

impl Stage for FiltersStage {
    fn name(&self) -> &'static str {
        "filters"
    }

    fn requires(&self) -> &'static [&'static str] {
        &["links"]
    }

    fn apply(&self, html: &str, _ctx: &PatchContext) -> Result<Outcome, PatchError> {
        if html.contains(GUARD) {
            return Ok(Outcome::skipped("filter buttons already present"));
        }

        let Some(caps) = self.subtitle_re.captures(html) else {
            return Ok(Outcome::missed("projects subtitle not found"));
        };
        let range = caps.get(0).map(|m| m.range()).unwrap_or_default();
        let replacement = self.render(attr_group(&caps));
        let text = anchor::splice(html, range, &replacement);

        Ok(Outcome::applied(
            text,
            format!("added {} filter buttons", self.buttons.len()),
        ))
    }
}

fn attr_group<'h>(caps: &Captures<'h>) -> &'h str {
    caps.name("attrs").map(|m| m.as_str()).unwrap_or("")
}

/// Add `class` to the `class="..."` attribute in `attrs`, or add the
/// attribute when there is none.
fn with_class(attrs: &str, class: &str) -> String {
    let Some(start) = attrs.find("class=\"") else {
        return format!("{attrs} class=\"{class}\"");
    };
    let value_start = start + "class=\"".len();
    let Some(len) = attrs[value_start..].find('"') else {
        return attrs.to_string();
    };
    let value = &attrs[value_start..value_start + len];
    if value.split_whitespace().any(|c| c == class) {
        return attrs.to_string();
    }
    let end = value_start + len;
    format!("{} {class}{}", &attrs[..end], &attrs[end..])
}
