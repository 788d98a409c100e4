// ABOUTME: Config scaffolding for new projects.
// ABOUTME: Writes a stackdrop.yml populated with the built-in defaults.

use std::path::Path;

use crate::error::{Error, Result};
use crate::types::{Region, StackName};

use super::{CONFIG_FILENAME, Config};

pub fn init_config(
    dir: &Path,
    stack: Option<&str>,
    region: Option<&str>,
    force: bool,
) -> Result<()> {
    let config_path = dir.join(CONFIG_FILENAME);

    if config_path.exists() && !force {
        return Err(Error::AlreadyExists(config_path));
    }

    let mut config = Config::default();

    if let Some(s) = stack {
        config.stack_name = StackName::new(s).map_err(|e| Error::InvalidConfig(e.to_string()))?;
    }

    if let Some(r) = region {
        config.region = Region::new(r).map_err(|e| Error::InvalidConfig(e.to_string()))?;
    }

    let yaml = generate_template_yaml(&config);
    std::fs::write(&config_path, yaml)?;

    tracing::info!("Wrote {}", config_path.display());
    Ok(())
}

fn generate_template_yaml(config: &Config) -> String {
    let files: String = config
        .website
        .files
        .iter()
        .map(|f| {
            format!(
                "    - name: {}\n      content_type: {}\n",
                f.name, f.content_type
            )
        })
        .collect();

    format!(
        r#"stack_name: {}
region: {}
artifact_bucket: {}
website_bucket: {}

layer:
  build_script: {}
  archive: {}
  object_key: {}

website:
  dir: {}
  files:
{}
template:
  cli: {}
  capabilities: [{}]
  # Extra parameter overrides, passed after CodeBucket and WebsiteBucketName
  # parameters:
  #   DbPassword: {{ env: DB_PASSWORD }}
"#,
        config.stack_name,
        config.region,
        config.artifact_bucket,
        config.website_bucket,
        config.layer.build_script.display(),
        config.layer.archive.display(),
        config.layer.object_key,
        config.website.dir.display(),
        files,
        config.template.cli,
        config.template.capabilities.join(", "),
    )
}
