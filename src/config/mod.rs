// ABOUTME: Configuration types and parsing for stackdrop.yml.
// ABOUTME: Handles YAML parsing, built-in defaults, path resolution, and validation.

mod deserialize;
mod env_value;
mod init;
mod layer;
mod template;
mod website;

pub use env_value::{EnvValue, resolve_parameters};
pub use init::init_config;
pub use layer::LayerConfig;
pub use template::{CODE_BUCKET_PARAMETER, TemplateConfig, WEBSITE_BUCKET_PARAMETER};
pub use website::{WebsiteConfig, WebsiteFile, default_manifest};

use crate::error::{Error, Result};
use crate::types::{BucketName, Region, StackName};
use deserialize::{deserialize_bucket_name, deserialize_region, deserialize_stack_name};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = "stackdrop.yml";
pub const CONFIG_FILENAME_ALT: &str = "stackdrop.yaml";
pub const CONFIG_FILENAME_DIR: &str = ".stackdrop/config.yml";

pub const DEFAULT_STACK_NAME: &str = "assignment-4-sam";
pub const DEFAULT_REGION: &str = "ap-south-1";
pub const DEFAULT_ARTIFACT_BUCKET: &str = "assignment-4-sam-artifacts";
pub const DEFAULT_WEBSITE_BUCKET: &str = "assignment-4-sam-website";

/// Immutable deployment settings, fixed for the lifetime of a run.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(
        default = "default_stack_name",
        deserialize_with = "deserialize_stack_name"
    )]
    pub stack_name: StackName,

    #[serde(default = "default_region", deserialize_with = "deserialize_region")]
    pub region: Region,

    #[serde(
        default = "default_artifact_bucket",
        deserialize_with = "deserialize_bucket_name"
    )]
    pub artifact_bucket: BucketName,

    #[serde(
        default = "default_website_bucket",
        deserialize_with = "deserialize_bucket_name"
    )]
    pub website_bucket: BucketName,

    /// Project root; relative values resolve against the config file's directory.
    #[serde(default)]
    pub root: Option<PathBuf>,

    #[serde(default)]
    pub layer: LayerConfig,

    #[serde(default)]
    pub website: WebsiteConfig,

    #[serde(default)]
    pub template: TemplateConfig,

    /// Directory the configuration was loaded from.
    #[serde(skip, default = "default_base_dir")]
    base_dir: PathBuf,
}

fn default_stack_name() -> StackName {
    StackName::from_static(DEFAULT_STACK_NAME)
}

fn default_region() -> Region {
    Region::from_static(DEFAULT_REGION)
}

fn default_artifact_bucket() -> BucketName {
    BucketName::from_static(DEFAULT_ARTIFACT_BUCKET)
}

fn default_website_bucket() -> BucketName {
    BucketName::from_static(DEFAULT_WEBSITE_BUCKET)
}

fn default_base_dir() -> PathBuf {
    PathBuf::from(".")
}

/// Directory holding `path`. A bare file name lives in the current directory.
fn config_dir(path: &Path) -> PathBuf {
    path.parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(default_base_dir)
}

impl Default for Config {
    fn default() -> Self {
        Config {
            stack_name: default_stack_name(),
            region: default_region(),
            artifact_bucket: default_artifact_bucket(),
            website_bucket: default_website_bucket(),
            root: None,
            layer: LayerConfig::default(),
            website: WebsiteConfig::default(),
            template: TemplateConfig::default(),
            base_dir: default_base_dir(),
        }
    }
}

impl Config {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty document means "all defaults"
        let config: Config = if yaml.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(yaml)?
        };
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content).map(|config| config.with_base_dir(config_dir(path)))
    }

    pub fn discover(dir: &Path) -> Result<Self> {
        let candidates = [
            dir.join(CONFIG_FILENAME),
            dir.join(CONFIG_FILENAME_ALT),
            dir.join(CONFIG_FILENAME_DIR),
        ];

        for path in &candidates {
            if path.exists() {
                tracing::debug!("Loading configuration from {}", path.display());
                let config = Self::load(path)?;
                // .stackdrop/config.yml still describes the project in `dir`
                return Ok(config.with_base_dir(dir.to_path_buf()));
            }
        }

        Err(Error::ConfigNotFound(dir.to_path_buf()))
    }

    /// Discover a config file in `dir`, falling back to built-in defaults rooted at `dir`.
    pub fn discover_or_default(dir: &Path) -> Result<Self> {
        match Self::discover(dir) {
            Err(Error::ConfigNotFound(_)) => {
                tracing::debug!("No configuration file found, using built-in defaults");
                Ok(Config::default().with_base_dir(dir.to_path_buf()))
            }
            other => other,
        }
    }

    pub fn with_base_dir(mut self, base_dir: PathBuf) -> Self {
        self.base_dir = base_dir;
        self
    }

    /// Directory every relative path in the configuration resolves against.
    pub fn project_root(&self) -> PathBuf {
        match &self.root {
            Some(root) if root.is_absolute() => root.clone(),
            Some(root) => self.base_dir.join(root),
            None => self.base_dir.clone(),
        }
    }

    pub fn layer_build_script(&self) -> PathBuf {
        self.project_root().join(&self.layer.build_script)
    }

    pub fn layer_archive(&self) -> PathBuf {
        self.project_root().join(&self.layer.archive)
    }

    pub fn website_dir(&self) -> PathBuf {
        self.project_root().join(&self.website.dir)
    }

    /// All parameter overrides in the order they are passed to the deploy command.
    pub fn parameter_overrides(&self) -> Result<Vec<(String, String)>> {
        let mut overrides = vec![
            (
                CODE_BUCKET_PARAMETER.to_string(),
                self.artifact_bucket.to_string(),
            ),
            (
                WEBSITE_BUCKET_PARAMETER.to_string(),
                self.website_bucket.to_string(),
            ),
        ];
        overrides.extend(resolve_parameters(&self.template.parameters)?);
        Ok(overrides)
    }

    pub fn validate(&self) -> Result<()> {
        if self.artifact_bucket == self.website_bucket {
            return Err(Error::InvalidConfig(format!(
                "artifact_bucket and website_bucket must differ (both are {})",
                self.artifact_bucket
            )));
        }

        if self.layer.object_key.trim().is_empty() {
            return Err(Error::InvalidConfig(
                "layer.object_key cannot be empty".to_string(),
            ));
        }

        if self.template.cli.trim().is_empty() {
            return Err(Error::InvalidConfig(
                "template.cli cannot be empty".to_string(),
            ));
        }

        if self.template.capabilities.is_empty() {
            return Err(Error::InvalidConfig(
                "template.capabilities needs at least one entry".to_string(),
            ));
        }

        for reserved in [CODE_BUCKET_PARAMETER, WEBSITE_BUCKET_PARAMETER] {
            if self.template.parameters.contains_key(reserved) {
                return Err(Error::InvalidConfig(format!(
                    "template.parameters cannot override {reserved}; it is derived from the bucket settings"
                )));
            }
        }

        let mut seen = HashSet::new();
        for file in self.website.files.iter() {
            if !seen.insert(file.name.as_str()) {
                return Err(Error::InvalidConfig(format!(
                    "website file {} is listed more than once",
                    file.name
                )));
            }
        }

        resolve_parameters(&self.template.parameters)?;

        Ok(())
    }
}
