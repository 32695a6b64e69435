use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "counsel.toml";
pub const DEFAULT_KNOWLEDGE_PATH: &str = "data/knowledge.json";
pub const DEFAULT_SUGGESTIONS: usize = 4;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CounselConfig {
    pub knowledge: PathBuf,
    pub suggestions: usize,
}

impl Default for CounselConfig {
    fn default() -> Self {
        Self {
            knowledge: PathBuf::from(DEFAULT_KNOWLEDGE_PATH),
            suggestions: DEFAULT_SUGGESTIONS,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    knowledge: Option<PathBuf>,
    suggestions: Option<usize>,
}

impl CounselConfig {
    /// Defaults, then the config file, then the knowledge override (flag or
    /// `COUNSEL_KNOWLEDGE`, already merged by clap).
    pub fn resolve(config_path: Option<&Path>, knowledge: Option<PathBuf>) -> Result<Self> {
        let mut cfg = Self::default();

        let file = match config_path {
            Some(path) => Some(path.to_path_buf()),
            None => {
                let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
                fallback.is_file().then_some(fallback)
            }
        };

        if let Some(path) = file {
            cfg.apply_file(&path)?;
        }

        if let Some(knowledge) = knowledge {
            cfg.knowledge = knowledge;
        }

        log::debug!("Resolved config: {cfg:?}");
        Ok(cfg)
    }

    fn apply_file(&mut self, path: &Path) -> Result<()> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read config {}", path.display()))?;
        let raw: RawConfig = toml::from_str(&text)
            .with_context(|| format!("Invalid config {}", path.display()))?;

        if let Some(knowledge) = raw.knowledge {
            // relative paths are anchored at the config file's directory
            self.knowledge = match path.parent() {
                Some(dir) if knowledge.is_relative() && !dir.as_os_str().is_empty() => {
                    dir.join(knowledge)
                }
                _ => knowledge,
            };
        }
        if let Some(suggestions) = raw.suggestions {
            self.suggestions = suggestions;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn file_values_are_anchored_and_overridable() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("counsel.toml");
        std::fs::write(&path, "knowledge = \"kb.json\"\nsuggestions = 2\n").unwrap();

        let cfg = CounselConfig::resolve(Some(&path), None).unwrap();
        assert_eq!(cfg.knowledge, temp.path().join("kb.json"));
        assert_eq!(cfg.suggestions, 2);

        let cfg = CounselConfig::resolve(Some(&path), Some(PathBuf::from("/tmp/other.json")))
            .unwrap();
        assert_eq!(cfg.knowledge, PathBuf::from("/tmp/other.json"));
        assert_eq!(cfg.suggestions, 2);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("counsel.toml");
        std::fs::write(&path, "threshold = 0.5\n").unwrap();

        let err = CounselConfig::resolve(Some(&path), None).unwrap_err();
        assert!(format!("{err:#}").contains("threshold"), "{err:#}");
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let temp = tempdir().unwrap();
        assert!(CounselConfig::resolve(Some(&temp.path().join("absent.toml")), None).is_err());
    }
}
