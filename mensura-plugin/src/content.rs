//! Content flowing through the host build

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File extensions treated as text content
const TEXT_EXTENSIONS: [&str; 6] = ["md", "markdown", "html", "htm", "rst", "txt"];

/// What kind of content an item is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Article,
    Page,
    /// Assets copied verbatim (images, stylesheets, ...)
    Static,
}

impl ContentKind {
    /// Articles for text extensions, static for everything else
    pub fn from_path(path: &Path) -> Self {
        let is_text = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| TEXT_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
            .unwrap_or(false);

        if is_text {
            ContentKind::Article
        } else {
            ContentKind::Static
        }
    }

    pub fn is_text(&self) -> bool {
        !matches!(self, ContentKind::Static)
    }
}

/// One document or asset with its body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    pub path: PathBuf,
    pub kind: ContentKind,
    pub body: String,
}

impl Content {
    pub fn new(path: impl Into<PathBuf>, kind: ContentKind, body: impl Into<String>) -> Self {
        Self { path: path.into(), kind, body: body.into() }
    }

    pub fn article(path: impl Into<PathBuf>, body: impl Into<String>) -> Self {
        Self::new(path, ContentKind::Article, body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_path() {
        assert_eq!(ContentKind::from_path(Path::new("posts/run.md")), ContentKind::Article);
        assert_eq!(ContentKind::from_path(Path::new("index.HTML")), ContentKind::Article);
        assert_eq!(ContentKind::from_path(Path::new("img/logo.png")), ContentKind::Static);
        assert_eq!(ContentKind::from_path(Path::new("Makefile")), ContentKind::Static);
    }

    #[test]
    fn test_is_text() {
        assert!(ContentKind::Article.is_text());
        assert!(ContentKind::Page.is_text());
        assert!(!ContentKind::Static.is_text());
    }
}
