//! The page being patched, and how it is written back.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use super::PatchError;

/// A loaded HTML document.
///
/// The original text is never modified; stages produce new text from it and
/// the result is saved separately.
#[derive(Debug)]
pub struct Document {
    /// Where the document was read from
    pub path: PathBuf,

    /// Text as read from disk
    pub original: String,
}

/// Where and how a patched document is written.
#[derive(Debug, Clone)]
pub struct SaveOptions {
    pub output: PathBuf,
    /// Copy the existing output to `<name>.bak` before replacing it
    pub backup: bool,
}

/// What happened when saving.
#[derive(Debug, PartialEq, Eq)]
pub enum Saved {
    Unchanged,
    Written {
        path: PathBuf,
        backup: Option<PathBuf>,
    },
}

impl Document {
    pub async fn load(path: &Path) -> Result<Self, PatchError> {
        let original = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| PatchError::io(path, e))?;
        Ok(Self {
            path: path.to_path_buf(),
            original,
        })
    }

    /// Write `text` to the configured output.
    ///
    /// Nothing is written when `text` equals the original and the output is
    /// the source itself. The new text goes to a sibling temporary file that
    /// is then renamed over the target, so the target is never left half
    /// written.
    pub async fn save(&self, text: &str, options: &SaveOptions) -> Result<Saved, PatchError> {
        if text == self.original && options.output == self.path {
            return Ok(Saved::Unchanged);
        }

        let target = &options.output;
        if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| PatchError::io(parent, e))?;
        }

        let exists = tokio::fs::try_exists(target)
            .await
            .map_err(|e| PatchError::io(target, e))?;
        let backup = if options.backup && exists {
            let backup = with_suffix(target, ".bak");
            tokio::fs::copy(target, &backup)
                .await
                .map_err(|e| PatchError::io(&backup, e))?;
            Some(backup)
        } else {
            None
        };

        let tmp = with_suffix(target, ".folio-tmp");
        tokio::fs::write(&tmp, text)
            .await
            .map_err(|e| PatchError::io(&tmp, e))?;
        if let Err(e) = tokio::fs::rename(&tmp, target).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(PatchError::io(target, e));
        }

        Ok(Saved::Written {
            path: target.clone(),
            backup,
        })
    }
}

/// `index.html` + `.bak` -> `index.html.bak`
fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(suffix);
    path.with_file_name(name)
}
