// ABOUTME: Temporary project directories laid out like a deployable application.
// ABOUTME: Contains the layer archive and website assets the pipeline reads.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use stackdrop::config::Config;

pub const STACK: &str = "assignment-4-sam";
pub const REGION: &str = "ap-south-1";
pub const ARTIFACT_BUCKET: &str = "assignment-4-sam-artifacts";
pub const WEBSITE_BUCKET: &str = "assignment-4-sam-website";

pub struct Project {
    dir: TempDir,
}

impl Project {
    /// A project with the layer archive and all three website files present.
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let project = Self { dir };
        project.write("dist/mysql-layer.zip", b"PK\x03\x04layer");
        project.write("web/index.html", b"<html><body>hi</body></html>");
        project.write("web/styles.css", b"body { margin: 0; }");
        project.write("web/app.js", b"console.log('hi');");
        project
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn join(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    pub fn write(&self, relative: &str, contents: &[u8]) {
        let path = self.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    pub fn remove(&self, relative: &str) {
        fs::remove_file(self.join(relative)).unwrap();
    }

    /// Default configuration rooted at this project.
    pub fn config(&self) -> Config {
        Config::default().with_base_dir(self.path().to_path_buf())
    }
}
