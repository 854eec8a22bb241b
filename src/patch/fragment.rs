//! Auxiliary fragment files.
//!
//! Fragments supply the markup that stages insert. They are often kept as
//! notes alongside the page, so a fragment wrapped in a fenced code block has
//! the fence stripped before use.

use std::path::{Path, PathBuf};

use super::PatchError;

const FENCE_OPEN: &str = "```html";
const FENCE_CLOSE: &str = "```";

/// Reads fragments relative to a base directory.
#[derive(Debug, Clone)]
pub struct FragmentStore {
    dir: PathBuf,
}

impl FragmentStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Resolve a fragment name against the store's directory.
    pub fn path_for(&self, name: &Path) -> PathBuf {
        if name.is_relative() {
            self.dir.join(name)
        } else {
            name.to_path_buf()
        }
    }

    /// Load a fragment, stripping a surrounding code fence if present.
    pub fn load(&self, name: &Path) -> Result<String, PatchError> {
        let path = self.path_for(name);
        let raw = std::fs::read_to_string(&path).map_err(|source| PatchError::Fragment {
            name: path.display().to_string(),
            source,
        })?;
        Ok(strip_fence(&raw).to_string())
    }
}

/// Return the body of the first ```` ```html ```` fence, or the whole text
/// (trimmed) when there is none.
pub fn strip_fence(raw: &str) -> &str {
    let Some(open) = raw.find(FENCE_OPEN) else {
        return raw.trim();
    };
    let body = &raw[open + FENCE_OPEN.len()..];
    let body = match body.find(FENCE_CLOSE) {
        Some(close) => &body[..close],
        None => body,
    };
    body.trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_fence_markdown_wrapper() {
        let raw = "# Modals\n\nPaste this:\n\n```html\n<div id=\"m\"></div>\n```\n\nDone.";
        assert_eq!(strip_fence(raw), "<div id=\"m\"></div>");
    }

    #[test]
    fn test_strip_fence_plain_fragment() {
        assert_eq!(strip_fence("\n  <div>plain</div>\n"), "<div>plain</div>");
    }

    #[test]
    fn test_strip_fence_unterminated() {
        assert_eq!(strip_fence("```html\n<p>open</p>\n"), "<p>open</p>");
    }

    #[test]
    fn test_load_relative_to_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("modal.html"), "```html\n<dialog></dialog>\n```").unwrap();

        let store = FragmentStore::new(dir.path());
        assert_eq!(store.load(Path::new("modal.html")).unwrap(), "<dialog></dialog>");
    }

    #[test]
    fn test_load_missing_fragment_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = FragmentStore::new(dir.path());
        let err = store.load(Path::new("absent.html")).unwrap_err();
        assert!(matches!(err, PatchError::Fragment { .. }));
    }
}
