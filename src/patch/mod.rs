//! Patch pipeline for the portfolio page.
//!
//! The pipeline runs the page through a series of named stages:
//! 1. links (enhancement stylesheet and script)
//! 2. filters (project filter bar)
//! 3. categories (card category attributes)
//! 4. modals (condensed project modals)
//! 5. form (contact form endpoint)
//! 6. card (new project card)
//! 7. about (biography rewrite)
//! 8. toggle (dark mode button)
//!
//! Stages are pure: each receives the current text and returns an
//! [`Outcome`]. Each stage declares the stages it depends on, and the
//! pipeline checks the declared order before any document is read.

pub mod anchor;
mod context;
mod document;
mod error;
mod fragment;
mod report;
pub mod stages;

pub use context::PatchContext;
pub use document::{Document, SaveOptions, Saved};
pub use error::PatchError;
pub use fragment::FragmentStore;
pub use report::{Outcome, PatchReport, StepReport, StepStatus};

use std::collections::HashMap;

use crate::config::FolioConfig;

/// A stage in the patch pipeline.
pub trait Stage: Send + Sync {
    /// Unique name for this stage (used in config and for ordering).
    fn name(&self) -> &'static str;

    /// Stages that must run before this one.
    fn requires(&self) -> &'static [&'static str] {
        &[]
    }

    /// Patch `html`, returning new text or the reason nothing changed.
    ///
    /// A stage must not report `Applied` with text equal to its input.
    fn apply(&self, html: &str, ctx: &PatchContext) -> Result<Outcome, PatchError>;
}

/// The document patch pipeline.
///
/// Holds stages in run order. Build one from a config with
/// [`Pipeline::from_config`], which also validates the order.
pub struct Pipeline {
    stages: Vec<Box<dyn Stage>>,
}

impl Pipeline {
    /// Create an empty pipeline with no stages.
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    /// Build the pipeline named by `config.stages`, in that order, and
    /// validate it.
    pub fn from_config(config: &FolioConfig) -> Result<Self, PatchError> {
        let mut pipeline = Self::new();
        for name in &config.stages {
            let stage = stages::build(name, config)?;
            pipeline.stages.push(stage);
        }
        pipeline.validate()?;
        Ok(pipeline)
    }

    /// Add a stage to the end of the pipeline.
    #[allow(dead_code)]
    pub fn add_stage<S: Stage + 'static>(&mut self, stage: S) -> &mut Self {
        self.stages.push(Box::new(stage));
        self
    }

    /// Check that stage names are unique and that every stage's
    /// requirements are present and run earlier.
    pub fn validate(&self) -> Result<(), PatchError> {
        let mut positions: HashMap<&str, usize> = HashMap::new();
        for (i, stage) in self.stages.iter().enumerate() {
            if positions.insert(stage.name(), i).is_some() {
                return Err(PatchError::DuplicateStage(stage.name().to_string()));
            }
        }

        for (i, stage) in self.stages.iter().enumerate() {
            for &required in stage.requires() {
                match positions.get(required) {
                    None => {
                        return Err(PatchError::MissingDependency {
                            stage: stage.name().to_string(),
                            requires: required.to_string(),
                        });
                    }
                    Some(&at) if at > i => {
                        return Err(PatchError::Order {
                            stage: stage.name().to_string(),
                            requires: required.to_string(),
                        });
                    }
                    Some(_) => {}
                }
            }
        }

        Ok(())
    }

    /// Run every stage over `html` in order.
    ///
    /// `on_step` is called after each stage, so progress can be shown even
    /// when a later stage aborts the run.
    pub fn run(
        &self,
        html: &str,
        ctx: &PatchContext,
        mut on_step: impl FnMut(&StepReport),
    ) -> Result<PatchReport, PatchError> {
        let mut text = html.to_string();
        let mut steps = Vec::with_capacity(self.stages.len());

        for stage in &self.stages {
            let step = match stage.apply(&text, ctx)? {
                Outcome::Applied { text: patched, detail } => {
                    text = patched;
                    StepReport {
                        stage: stage.name(),
                        status: StepStatus::Applied,
                        detail,
                    }
                }
                Outcome::Skipped { reason } => StepReport {
                    stage: stage.name(),
                    status: StepStatus::Skipped,
                    detail: reason,
                },
                Outcome::Missed { reason } => StepReport {
                    stage: stage.name(),
                    status: StepStatus::Missed,
                    detail: reason,
                },
            };

            on_step(&step);

            if ctx.strict && step.is_missed() {
                return Err(PatchError::Missed {
                    stage: step.stage.to_string(),
                    reason: step.detail,
                });
            }
            steps.push(step);
        }

        let changed = text != html;
        Ok(PatchReport {
            text,
            steps,
            changed,
        })
    }

    /// Get the names of all stages in order.
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    /// Get each stage's name with the stages it requires, in order.
    pub fn dependencies(&self) -> Vec<(&'static str, &'static [&'static str])> {
        self.stages.iter().map(|s| (s.name(), s.requires())).collect()
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Append(&'static str, &'static [&'static str]);

    impl Stage for Append {
        fn name(&self) -> &'static str {
            self.0
        }

        fn requires(&self) -> &'static [&'static str] {
            self.1
        }

        fn apply(&self, html: &str, _ctx: &PatchContext) -> Result<Outcome, PatchError> {
            Ok(Outcome::applied(format!("{html}[{}]", self.0), "appended"))
        }
    }

    struct Miss;

    impl Stage for Miss {
        fn name(&self) -> &'static str {
            "miss"
        }

        fn apply(&self, _html: &str, _ctx: &PatchContext) -> Result<Outcome, PatchError> {
            Ok(Outcome::missed("anchor `</nope>` not found"))
        }
    }

    fn ctx(fragments: &FragmentStore, strict: bool) -> PatchContext<'_> {
        PatchContext::new(fragments, strict)
    }

    #[test]
    fn test_run_applies_stages_in_order() {
        let mut pipeline = Pipeline::new();
        pipeline.add_stage(Append("a", &[])).add_stage(Append("b", &["a"]));
        pipeline.validate().unwrap();

        let fragments = FragmentStore::new(".");
        let mut seen = Vec::new();
        let report = pipeline
            .run("doc", &ctx(&fragments, false), |s| seen.push(s.stage))
            .unwrap();

        assert_eq!(report.text, "doc[a][b]");
        assert!(report.changed);
        assert_eq!(report.applied(), 2);
        assert_eq!(seen, vec!["a", "b"]);
    }

    #[test]
    fn test_validate_rejects_out_of_order() {
        let mut pipeline = Pipeline::new();
        pipeline.add_stage(Append("b", &["a"])).add_stage(Append("a", &[]));
        let err = pipeline.validate().unwrap_err();
        assert!(matches!(err, PatchError::Order { ref stage, ref requires } if stage == "b" && requires == "a"));
    }

    #[test]
    fn test_validate_rejects_missing_dependency() {
        let mut pipeline = Pipeline::new();
        pipeline.add_stage(Append("b", &["a"]));
        assert!(matches!(
            pipeline.validate().unwrap_err(),
            PatchError::MissingDependency { .. }
        ));
    }

    #[test]
    fn test_validate_rejects_duplicates() {
        let mut pipeline = Pipeline::new();
        pipeline.add_stage(Append("a", &[])).add_stage(Append("a", &[]));
        assert!(matches!(
            pipeline.validate().unwrap_err(),
            PatchError::DuplicateStage(name) if name == "a"
        ));
    }

    #[test]
    fn test_miss_passes_text_through() {
        let mut pipeline = Pipeline::new();
        pipeline.add_stage(Miss).add_stage(Append("a", &[]));

        let fragments = FragmentStore::new(".");
        let report = pipeline.run("doc", &ctx(&fragments, false), |_| {}).unwrap();
        assert_eq!(report.text, "doc[a]");
        assert_eq!(report.missed(), 1);
        assert_eq!(report.steps[0].status, StepStatus::Missed);
    }

    #[test]
    fn test_strict_run_aborts_on_miss() {
        let mut pipeline = Pipeline::new();
        pipeline.add_stage(Miss).add_stage(Append("a", &[]));

        let fragments = FragmentStore::new(".");
        let mut seen = 0;
        let err = pipeline
            .run("doc", &ctx(&fragments, true), |_| seen += 1)
            .unwrap_err();
        assert!(matches!(err, PatchError::Missed { ref stage, .. } if stage == "miss"));
        assert_eq!(seen, 1);
    }

    #[test]
    fn test_from_config_default_order_is_valid() {
        let pipeline = Pipeline::from_config(&FolioConfig::default()).unwrap();
        assert_eq!(
            pipeline.stage_names(),
            vec!["links", "filters", "categories", "modals", "form", "card", "about", "toggle"]
        );
    }

    #[test]
    fn test_from_config_rejects_unknown_and_misordered() {
        let config = FolioConfig {
            stages: vec!["links".into(), "sparkles".into()],
            ..FolioConfig::default()
        };
        assert!(matches!(
            Pipeline::from_config(&config),
            Err(PatchError::UnknownStage(name)) if name == "sparkles"
        ));

        let config = FolioConfig {
            stages: vec!["card".into(), "links".into(), "filters".into(), "categories".into()],
            ..FolioConfig::default()
        };
        assert!(matches!(
            Pipeline::from_config(&config),
            Err(PatchError::Order { .. })
        ));
    }
}
