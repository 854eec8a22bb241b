//! Contact form submission endpoint.

use regex::{Captures, Regex};

use crate::config::FormConfig;
use crate::patch::{Outcome, PatchContext, PatchError, Stage};
use crate::util::{escape_attr, plural};

/// Stage that points the contact form at the submission endpoint.
///
/// Every `<form>` whose class attribute starts with the configured prefix
/// has its opening tag rewritten to the class attribute followed by
/// `action` and `method`. Other attributes on the tag are dropped, which
/// also makes the rewrite idempotent.
pub struct FormStage {
    form_re: Regex,
    endpoint: String,
    method: String,
}

impl FormStage {
    pub fn new(config: &FormConfig) -> Result<Self, PatchError> {
        let form_re = Regex::new(&format!(
            r#"(?P<open><form\s+class="{}[^"]*")[^>]*>"#,
            regex::escape(&config.class_prefix)
        ))?;
        Ok(Self {
            form_re,
            endpoint: config.endpoint.clone(),
            method: config.method.clone(),
        })
    }
}

impl Stage for FormStage {
    fn name(&self) -> &'static str {
        "form"
    }

    fn apply(&self, html: &str, _ctx: &PatchContext) -> Result<Outcome, PatchError> {
        let count = self.form_re.find_iter(html).count();
        if count == 0 {
            return Ok(Outcome::missed("contact form not found"));
        }

        let endpoint = escape_attr(&self.endpoint);
        let method = escape_attr(&self.method);
        let text = self.form_re.replace_all(html, |caps: &Captures| {
            format!(
                "{} action=\"{endpoint}\" method=\"{method}\">",
                &caps["open"]
            )
        });

        if text == html {
            return Ok(Outcome::skipped(format!(
                "form already submits to {}",
                self.endpoint
            )));
        }
        Ok(Outcome::applied(
            text.into_owned(),
            format!("wired {} to {}", plural(count, "form"), self.endpoint),
        ))
    }
}
