// ABOUTME: Integration tests for configuration parsing and validation.
// ABOUTME: Tests defaults, YAML parsing, env-backed parameters, and config discovery.

use stackdrop::config::*;
use stackdrop::error::Error;
use std::path::{Path, PathBuf};

mod parsing {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config = Config::from_yaml("").unwrap();

        assert_eq!(config.stack_name.as_str(), DEFAULT_STACK_NAME);
        assert_eq!(config.region.as_str(), DEFAULT_REGION);
        assert_eq!(config.artifact_bucket.as_str(), DEFAULT_ARTIFACT_BUCKET);
        assert_eq!(config.website_bucket.as_str(), DEFAULT_WEBSITE_BUCKET);
        assert_eq!(
            config.layer.build_script,
            PathBuf::from("layer/mysql-layer/build.sh")
        );
        assert_eq!(config.layer.archive, PathBuf::from("dist/mysql-layer.zip"));
        assert_eq!(config.layer.object_key, "mysql-layer.zip");
        assert_eq!(config.website.dir, PathBuf::from("web"));
        assert_eq!(config.template.cli, "sam");
        assert_eq!(
            config.template.capabilities,
            vec!["CAPABILITY_IAM", "CAPABILITY_NAMED_IAM"]
        );
    }

    #[test]
    fn default_manifest_lists_three_files() {
        let config = Config::default();
        let files: Vec<(&str, &str)> = config
            .website
            .files
            .iter()
            .map(|f| (f.name.as_str(), f.content_type.as_str()))
            .collect();

        assert_eq!(
            files,
            vec![
                ("index.html", "text/html"),
                ("styles.css", "text/css"),
                ("app.js", "application/javascript"),
            ]
        );
    }

    #[test]
    fn parse_full_config() {
        let yaml = r#"
stack_name: shop-prod
region: eu-west-1
artifact_bucket: shop-prod-artifacts
website_bucket: shop-prod-site
root: app

layer:
  build_script: scripts/layer.sh
  archive: build/layer.zip
  object_key: layers/deps.zip

website:
  dir: public
  files:
    - name: index.html
      content_type: text/html
    - name: favicon.ico
      content_type: image/x-icon

template:
  cli: /usr/local/bin/sam
  capabilities: [CAPABILITY_IAM]
  parameters:
    Stage: prod
"#;
        let config = Config::from_yaml(yaml).unwrap();

        assert_eq!(config.stack_name.as_str(), "shop-prod");
        assert_eq!(config.region.as_str(), "eu-west-1");
        assert_eq!(config.artifact_bucket.as_str(), "shop-prod-artifacts");
        assert_eq!(config.website_bucket.as_str(), "shop-prod-site");
        assert_eq!(config.layer.object_key, "layers/deps.zip");
        assert_eq!(config.website.files.len(), 2);
        assert_eq!(config.website.files.last().name, "favicon.ico");
        assert_eq!(config.template.cli, "/usr/local/bin/sam");
        assert_eq!(config.template.capabilities, vec!["CAPABILITY_IAM"]);
        assert_eq!(
            config.template.parameters.get("Stage"),
            Some(&EnvValue::Literal("prod".to_string()))
        );
    }

    #[test]
    fn partial_config_keeps_other_defaults() {
        let config = Config::from_yaml("stack_name: other-stack\n").unwrap();

        assert_eq!(config.stack_name.as_str(), "other-stack");
        assert_eq!(config.region.as_str(), DEFAULT_REGION);
        assert_eq!(config.website.files.len(), 3);
    }

    #[test]
    fn parameter_overrides_start_with_bucket_parameters() {
        let config = Config::from_yaml(
            "template:\n  parameters:\n    Zeta: z\n    Beta: b\n",
        )
        .unwrap();

        let overrides = config.parameter_overrides().unwrap();
        let keys: Vec<&str> = overrides.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(
            keys,
            vec![CODE_BUCKET_PARAMETER, WEBSITE_BUCKET_PARAMETER, "Beta", "Zeta"]
        );
        assert_eq!(overrides[0].1, DEFAULT_ARTIFACT_BUCKET);
        assert_eq!(overrides[1].1, DEFAULT_WEBSITE_BUCKET);
    }
}

mod validation {
    use super::*;

    #[test]
    fn rejects_invalid_stack_name() {
        let err = Config::from_yaml("stack_name: 4-bad_name\n").unwrap_err();
        assert!(matches!(err, Error::Yaml(_)));
    }

    #[test]
    fn rejects_invalid_bucket_name() {
        let err = Config::from_yaml("artifact_bucket: Has_Upper\n").unwrap_err();
        assert!(matches!(err, Error::Yaml(_)));
    }

    #[test]
    fn rejects_malformed_region() {
        let err = Config::from_yaml("region: mars\n").unwrap_err();
        assert!(matches!(err, Error::Yaml(_)));
    }

    #[test]
    fn rejects_identical_buckets() {
        let yaml = "artifact_bucket: same-bucket\nwebsite_bucket: same-bucket\n";
        let err = Config::from_yaml(yaml).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(ref msg) if msg.contains("must differ")));
    }

    #[test]
    fn rejects_reserved_parameter() {
        let yaml = "template:\n  parameters:\n    CodeBucket: elsewhere\n";
        let err = Config::from_yaml(yaml).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(ref msg) if msg.contains("CodeBucket")));
    }

    #[test]
    fn rejects_empty_manifest() {
        let err = Config::from_yaml("website:\n  files: []\n").unwrap_err();
        assert!(matches!(err, Error::Yaml(_)));
    }

    #[test]
    fn rejects_duplicate_website_file() {
        let yaml = r#"
website:
  files:
    - name: index.html
      content_type: text/html
    - name: index.html
      content_type: text/plain
"#;
        let err = Config::from_yaml(yaml).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn rejects_website_file_outside_asset_dir() {
        for name in ["../secrets.env", "/etc/passwd", "img/../../app.js", "./index.html"] {
            let yaml = format!(
                "website:\n  files:\n    - name: {name}\n      content_type: text/plain\n"
            );
            let err = Config::from_yaml(&yaml).unwrap_err();
            assert!(
                matches!(err, Error::Yaml(ref e) if e.to_string().contains("relative path")),
                "{name} should be rejected"
            );
        }
    }

    #[test]
    fn accepts_nested_website_file() {
        let yaml = "website:\n  files:\n    - name: img/logo.svg\n      content_type: image/svg+xml\n";
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.website.files.head.name, "img/logo.svg");
    }

    #[test]
    fn rejects_empty_capabilities() {
        let err = Config::from_yaml("template:\n  capabilities: []\n").unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn rejects_empty_object_key() {
        let err = Config::from_yaml("layer:\n  object_key: \"\"\n").unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }
}

mod env_parameters {
    use super::*;

    const YAML: &str = r#"
template:
  parameters:
    DbPassword:
      env: STACKDROP_TEST_DB_PASSWORD
    Stage:
      env: STACKDROP_TEST_STAGE
      default: dev
"#;

    #[test]
    fn resolves_from_environment() {
        temp_env::with_vars(
            [
                ("STACKDROP_TEST_DB_PASSWORD", Some("hunter2")),
                ("STACKDROP_TEST_STAGE", Some("prod")),
            ],
            || {
                let config = Config::from_yaml(YAML).unwrap();
                let overrides = config.parameter_overrides().unwrap();

                assert!(overrides.contains(&("DbPassword".to_string(), "hunter2".to_string())));
                assert!(overrides.contains(&("Stage".to_string(), "prod".to_string())));
            },
        );
    }

    #[test]
    fn falls_back_to_default() {
        temp_env::with_vars(
            [
                ("STACKDROP_TEST_DB_PASSWORD", Some("hunter2")),
                ("STACKDROP_TEST_STAGE", None),
            ],
            || {
                let config = Config::from_yaml(YAML).unwrap();
                let overrides = config.parameter_overrides().unwrap();

                assert!(overrides.contains(&("Stage".to_string(), "dev".to_string())));
            },
        );
    }

    #[test]
    fn missing_variable_without_default_fails() {
        temp_env::with_var_unset("STACKDROP_TEST_DB_PASSWORD", || {
            let err = Config::from_yaml(YAML).unwrap_err();
            assert!(
                matches!(err, Error::MissingEnvVar(ref var) if var == "STACKDROP_TEST_DB_PASSWORD")
            );
        });
    }
}

mod discovery {
    use super::*;

    fn write(dir: &Path, relative: &str, contents: &str) {
        let path = dir.join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, contents).unwrap();
    }

    #[test]
    fn discovers_primary_file() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), CONFIG_FILENAME, "stack_name: found-it\n");

        let config = Config::discover(dir.path()).unwrap();
        assert_eq!(config.stack_name.as_str(), "found-it");
        assert_eq!(config.project_root(), dir.path());
    }

    #[test]
    fn discovers_alternate_extension() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), CONFIG_FILENAME_ALT, "stack_name: alt-file\n");

        let config = Config::discover(dir.path()).unwrap();
        assert_eq!(config.stack_name.as_str(), "alt-file");
    }

    #[test]
    fn nested_config_describes_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), CONFIG_FILENAME_DIR, "website:\n  dir: site\n");

        let config = Config::discover(dir.path()).unwrap();
        assert_eq!(config.website_dir(), dir.path().join("site"));
    }

    #[test]
    fn missing_config_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::discover(dir.path()).unwrap_err();
        assert!(matches!(err, Error::ConfigNotFound(_)));
    }

    #[test]
    fn missing_config_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::discover_or_default(dir.path()).unwrap();

        assert_eq!(config.stack_name.as_str(), DEFAULT_STACK_NAME);
        assert_eq!(
            config.layer_archive(),
            dir.path().join("dist/mysql-layer.zip")
        );
    }

    #[test]
    fn invalid_config_is_not_replaced_by_defaults() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), CONFIG_FILENAME, "region: nowhere\n");

        assert!(Config::discover_or_default(dir.path()).is_err());
    }

    #[test]
    fn relative_root_resolves_against_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "deploy/stackdrop.yml", "root: ..\n");

        let config = Config::load(&dir.path().join("deploy/stackdrop.yml")).unwrap();
        assert_eq!(
            config.layer_build_script(),
            dir.path().join("deploy/../layer/mysql-layer/build.sh")
        );
    }

    #[test]
    fn absolute_root_is_used_as_is() {
        let config = Config::from_yaml("root: /srv/app\n").unwrap();
        assert_eq!(config.project_root(), PathBuf::from("/srv/app"));
        assert_eq!(config.website_dir(), PathBuf::from("/srv/app/web"));
    }
}

mod init {
    use super::*;

    #[test]
    fn init_writes_loadable_config() {
        let dir = tempfile::tempdir().unwrap();
        init_config(dir.path(), Some("my-app"), Some("us-east-1"), false).unwrap();

        let config = Config::discover(dir.path()).unwrap();
        assert_eq!(config.stack_name.as_str(), "my-app");
        assert_eq!(config.region.as_str(), "us-east-1");
        assert_eq!(config.website.files.len(), 3);
    }

    #[test]
    fn init_refuses_overwrite_without_force() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILENAME), "stack_name: keep-me\n").unwrap();

        let err = init_config(dir.path(), None, None, false).unwrap_err();
        assert!(matches!(err, Error::AlreadyExists(_)));

        init_config(dir.path(), None, None, true).unwrap();
        let config = Config::discover(dir.path()).unwrap();
        assert_eq!(config.stack_name.as_str(), DEFAULT_STACK_NAME);
    }
}
