// ABOUTME: Dependency layer build settings.
// ABOUTME: Locates the external build script, its archive, and the uploaded object key.

use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct LayerConfig {
    #[serde(default = "default_build_script")]
    pub build_script: PathBuf,

    #[serde(default = "default_archive")]
    pub archive: PathBuf,

    #[serde(default = "default_object_key")]
    pub object_key: String,
}

fn default_build_script() -> PathBuf {
    PathBuf::from("layer/mysql-layer/build.sh")
}

fn default_archive() -> PathBuf {
    PathBuf::from("dist/mysql-layer.zip")
}

fn default_object_key() -> String {
    "mysql-layer.zip".to_string()
}

impl Default for LayerConfig {
    fn default() -> Self {
        LayerConfig {
            build_script: default_build_script(),
            archive: default_archive(),
            object_key: default_object_key(),
        }
    }
}
