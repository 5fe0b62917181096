//! One template to lint.

use std::path::{Path, PathBuf};

/// Raw template content plus the two names it is known by.
///
/// `real_path` is where the content was read from; `display_path` is what
/// reports show (usually relative to the path the user asked for). Both are
/// fixed at discovery time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    content: String,
    real_path: PathBuf,
    display_path: String,
}

impl Source {
    pub fn new(
        content: impl Into<String>,
        real_path: impl Into<PathBuf>,
        display_path: impl Into<String>,
    ) -> Self {
        Self {
            content: content.into(),
            real_path: real_path.into(),
            display_path: display_path.into(),
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn real_path(&self) -> &Path {
        &self.real_path
    }

    pub fn display_path(&self) -> &str {
        &self.display_path
    }
}
