use super::CascadePolicy;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct FileConfig {
    pub cascade_policy: Option<CascadePolicy>,
    pub logging_level: Option<String>,
    pub seed_path: Option<String>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn loads_all_keys() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "cascade_policy = \"cascade_delete\"\nlogging_level = \"debug\"\nseed_path = \"seed.json\""
        )
        .unwrap();

        let config = FileConfig::load(file.path()).unwrap();
        assert_eq!(config.cascade_policy, Some(CascadePolicy::CascadeDelete));
        assert_eq!(config.logging_level.as_deref(), Some("debug"));
        assert_eq!(config.seed_path.as_deref(), Some("seed.json"));
    }

    #[test]
    fn missing_keys_are_none() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "# nothing here").unwrap();
        let config = FileConfig::load(file.path()).unwrap();
        assert_eq!(config, FileConfig::default());
    }

    #[test]
    fn rejects_unknown_policy() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "cascade_policy = \"ignore\"").unwrap();
        let err = FileConfig::load(file.path()).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse config file"));
    }

    #[test]
    fn missing_file_fails_with_context() {
        let err = FileConfig::load(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
