// ABOUTME: Custom serde deserializers for config types.
// ABOUTME: Validates stack, bucket and region names and the website manifest while parsing.

use nonempty::NonEmpty;
use serde::Deserialize;
use std::path::{Component, Path};

use super::WebsiteFile;
use crate::types::{BucketName, Region, StackName};

pub fn deserialize_stack_name<'de, D>(deserializer: D) -> Result<StackName, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    StackName::new(&s).map_err(serde::de::Error::custom)
}

pub fn deserialize_bucket_name<'de, D>(deserializer: D) -> Result<BucketName, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    BucketName::new(&s).map_err(serde::de::Error::custom)
}

pub fn deserialize_region<'de, D>(deserializer: D) -> Result<Region, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Region::new(&s).map_err(serde::de::Error::custom)
}

pub fn deserialize_website_files<'de, D>(deserializer: D) -> Result<NonEmpty<WebsiteFile>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let files: Vec<WebsiteFile> = Vec::deserialize(deserializer)?;

    for file in &files {
        if file.name.trim().is_empty() {
            return Err(serde::de::Error::custom("website file name cannot be empty"));
        }
        if !is_contained_path(&file.name) {
            return Err(serde::de::Error::custom(format!(
                "website file {} must be a relative path inside the website directory",
                file.name
            )));
        }
        if file.content_type.trim().is_empty() {
            return Err(serde::de::Error::custom(format!(
                "website file {} needs a content_type",
                file.name
            )));
        }
    }

    NonEmpty::from_vec(files)
        .ok_or_else(|| serde::de::Error::custom("at least one website file is required"))
}

/// Only plain relative components, so joining onto the asset directory stays inside it.
fn is_contained_path(name: &str) -> bool {
    Path::new(name)
        .components()
        .all(|c| matches!(c, Component::Normal(_)))
}
