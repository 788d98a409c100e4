// ABOUTME: Static website asset manifest.
// ABOUTME: Each entry pairs a file in the asset directory with the content type it is served with.

use nonempty::{NonEmpty, nonempty};
use serde::Deserialize;
use std::path::PathBuf;

use super::deserialize::deserialize_website_files;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WebsiteFile {
    pub name: String,
    pub content_type: String,
}

impl WebsiteFile {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebsiteConfig {
    #[serde(default = "default_dir")]
    pub dir: PathBuf,

    #[serde(
        default = "default_manifest",
        deserialize_with = "deserialize_website_files"
    )]
    pub files: NonEmpty<WebsiteFile>,
}

fn default_dir() -> PathBuf {
    PathBuf::from("web")
}

/// The pages, stylesheet and script served by the website bucket.
pub fn default_manifest() -> NonEmpty<WebsiteFile> {
    nonempty![
        WebsiteFile::new("index.html", "text/html"),
        WebsiteFile::new("styles.css", "text/css"),
        WebsiteFile::new("app.js", "application/javascript"),
    ]
}

impl Default for WebsiteConfig {
    fn default() -> Self {
        WebsiteConfig {
            dir: default_dir(),
            files: default_manifest(),
        }
    }
}
