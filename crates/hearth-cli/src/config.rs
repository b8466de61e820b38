//! CLI configuration file

use anyhow::Context;
use hearth_validation::{StrictnessLevel, ValidationConfig};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Contents of the YAML file passed with `--config`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// Directories of extra subtype definitions, loaded after the built-ins
    pub subtype_dirs: Vec<PathBuf>,
    pub strictness: StrictnessLevel,
    /// 0 = unlimited
    pub max_errors: usize,
    /// Used when `RUST_LOG` is unset
    pub log_filter: Option<String>,
}

impl CliConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let mut config: Self = serde_yaml::from_str(&text)
            .with_context(|| format!("invalid config file {}", path.display()))?;

        // Relative subtype directories are resolved against the config file.
        if let Some(base) = path.parent() {
            for dir in &mut config.subtype_dirs {
                if dir.is_relative() {
                    *dir = base.join(&*dir);
                }
            }
        }
        Ok(config)
    }

    pub fn validation(&self) -> ValidationConfig {
        ValidationConfig::new()
            .strictness(self.strictness)
            .max_errors(self.max_errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config: CliConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, CliConfig::default());
        assert_eq!(config.validation().strictness, StrictnessLevel::Moderate);
    }

    #[test]
    fn test_load_resolves_relative_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hearth.yaml");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "subtype_dirs: [subtypes, /opt/hearth]").unwrap();
        writeln!(file, "strictness: strict").unwrap();
        writeln!(file, "log_filter: debug").unwrap();

        let config = CliConfig::load(&path).unwrap();
        assert_eq!(config.subtype_dirs[0], dir.path().join("subtypes"));
        assert_eq!(config.subtype_dirs[1], PathBuf::from("/opt/hearth"));
        assert_eq!(config.strictness, StrictnessLevel::Strict);
        assert_eq!(config.log_filter.as_deref(), Some("debug"));
    }

    #[test]
    fn test_unknown_keys_rejected() {
        assert!(serde_yaml::from_str::<CliConfig>("strictnes: strict").is_err());
    }
}
