//! Stage outcomes and the per-run report.

/// What a single stage did to the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The stage produced new text.
    Applied { text: String, detail: String },
    /// The stage's effect is already present.
    Skipped { reason: String },
    /// The stage's pattern or anchor is absent; the text passes through.
    Missed { reason: String },
}

impl Outcome {
    pub fn applied(text: String, detail: impl Into<String>) -> Self {
        Self::Applied {
            text,
            detail: detail.into(),
        }
    }

    pub fn skipped(reason: impl Into<String>) -> Self {
        Self::Skipped {
            reason: reason.into(),
        }
    }

    pub fn missed(reason: impl Into<String>) -> Self {
        Self::Missed {
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Applied,
    Skipped,
    Missed,
}

/// One line of progress: which stage ran and how it went.
#[derive(Debug, Clone)]
pub struct StepReport {
    pub stage: &'static str,
    pub status: StepStatus,
    pub detail: String,
}

impl StepReport {
    pub fn is_missed(&self) -> bool {
        self.status == StepStatus::Missed
    }
}

/// Result of running the whole pipeline over one document.
#[derive(Debug, Clone)]
pub struct PatchReport {
    pub text: String,
    pub steps: Vec<StepReport>,
    pub changed: bool,
}

impl PatchReport {
    pub fn applied(&self) -> usize {
        self.count(StepStatus::Applied)
    }

    pub fn skipped(&self) -> usize {
        self.count(StepStatus::Skipped)
    }

    pub fn missed(&self) -> usize {
        self.count(StepStatus::Missed)
    }

    fn count(&self, status: StepStatus) -> usize {
        self.steps.iter().filter(|s| s.status == status).count()
    }
}
