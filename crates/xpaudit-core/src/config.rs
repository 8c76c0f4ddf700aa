use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

pub const SUPPORTED_CONFIG_VERSION: u32 = 1;
pub const DEFAULT_CONFIG_FILE: &str = "xpaudit.yaml";

pub const DEFAULT_RESOURCE_COMPOSITIONS_FILE: &str = "resourceCompositions.txt";
pub const DEFAULT_RESOURCES_FILE: &str = "resources.txt";
pub const DEFAULT_PIPELINE_COMPOSITIONS_FILE: &str = "pipelineCompositions.txt";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Tab-separated tables written to the output directory.
    #[default]
    Text,
    /// The full report as JSON on stdout.
    Json,
}

/// File names for the tab-separated tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportFiles {
    pub resource_compositions: String,
    pub resources: String,
    pub pipeline_compositions: String,
}

impl Default for ReportFiles {
    fn default() -> Self {
        Self {
            resource_compositions: DEFAULT_RESOURCE_COMPOSITIONS_FILE.into(),
            resources: DEFAULT_RESOURCES_FILE.into(),
            pipeline_compositions: DEFAULT_PIPELINE_COMPOSITIONS_FILE.into(),
        }
    }
}

/// Contents of `xpaudit.yaml`. Every field except `version` is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuditConfig {
    pub version: u32,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default)]
    pub format: OutputFormat,
    #[serde(default)]
    pub fail_on_flagged: bool,
    #[serde(default)]
    pub files: ReportFiles,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            version: SUPPORTED_CONFIG_VERSION,
            output_dir: default_output_dir(),
            format: OutputFormat::default(),
            fail_on_flagged: false,
            files: ReportFiles::default(),
        }
    }
}

impl AuditConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.version != SUPPORTED_CONFIG_VERSION {
            return Err(ConfigError::UnsupportedVersion {
                found: self.version,
                supported: SUPPORTED_CONFIG_VERSION,
            });
        }
        let names = [
            ("files.resource_compositions", &self.files.resource_compositions),
            ("files.resources", &self.files.resources),
            ("files.pipeline_compositions", &self.files.pipeline_compositions),
        ];
        for (field, name) in names {
            if name.trim().is_empty() {
                return Err(ConfigError::Invalid {
                    field,
                    reason: "file name must not be empty".into(),
                });
            }
            let mut components = Path::new(name).components();
            let plain = matches!(
                (components.next(), components.next()),
                (Some(Component::Normal(_)), None)
            );
            if !plain {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("'{name}' must be a plain file name"),
                });
            }
        }
        for (i, &(field, name)) in names.iter().enumerate() {
            if let Some((other, _)) = names[..i].iter().find(|&&(_, n)| n == name) {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("'{name}' is already used by {other}"),
                });
            }
        }
        Ok(())
    }
}

pub fn parse_config(raw: &str, path: &Path) -> Result<AuditConfig, ConfigError> {
    let cfg: AuditConfig = serde_yaml::from_str(raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    cfg.validate()?;
    Ok(cfg)
}

pub fn load_config(path: &Path) -> Result<AuditConfig, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&raw, path)
}

/// Load `path` if given, else `xpaudit.yaml` in the working directory if it
/// exists, else the defaults.
pub fn resolve_config(path: Option<&Path>) -> Result<AuditConfig, ConfigError> {
    match path {
        Some(p) => load_config(p),
        None => {
            let default = Path::new(DEFAULT_CONFIG_FILE);
            if default.is_file() {
                load_config(default)
            } else {
                Ok(AuditConfig::default())
            }
        }
    }
}
