//! Shared context for patch stages.

use super::fragment::FragmentStore;

/// Resources and run flags available to every stage.
pub struct PatchContext<'a> {
    /// Where auxiliary fragment files are read from
    pub fragments: &'a FragmentStore,

    /// Treat a stage that finds nothing to patch as a fatal error
    pub strict: bool,
}

impl<'a> PatchContext<'a> {
    pub fn new(fragments: &'a FragmentStore, strict: bool) -> Self {
        Self { fragments, strict }
    }
}
