use crate::registry::{DEFAULT_PLUGINS_YAML, PLUGINS_FILE};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Directory holding `plugins.yaml`, relative to the project root
pub const DEFAULT_PLUGINS_DIR: &str = ".rulesync";

/// Directories whose presence marks a project root
const ROOT_MARKERS: &[&str] = &[".cursor/rules", ".code_review", DEFAULT_PLUGINS_DIR];

/// Optional project settings from `rulesync.toml`
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct RulesyncConfig {
    /// Plugin directory, relative to the project root
    pub plugins_dir: Option<String>,
    /// Target documents for every pipeline, replacing their own targets
    pub targets: Option<Vec<String>>,
}

impl RulesyncConfig {
    /// Resolve the plugin directory against `project_root`
    pub fn plugins_dir_in(&self, project_root: &Path) -> PathBuf {
        project_root.join(self.plugins_dir.as_deref().unwrap_or(DEFAULT_PLUGINS_DIR))
    }
}

pub fn default_config_path_in(base: &Path) -> PathBuf {
    base.join("rulesync.toml")
}

pub fn load_config(path: &Path) -> anyhow::Result<Option<RulesyncConfig>> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(path)?;
    let config: RulesyncConfig = toml::from_str(&contents)?;
    Ok(Some(config))
}

/// Find the project root: the nearest ancestor of `start` holding a rules
/// directory or a plugin directory, else `start` itself
pub fn find_project_root(start: &Path) -> PathBuf {
    start
        .ancestors()
        .find(|dir| ROOT_MARKERS.iter().any(|marker| dir.join(marker).is_dir()))
        .unwrap_or(start)
        .to_path_buf()
}

/// Write the default `plugins.yaml` into `plugins_dir`
pub fn write_default_plugins(plugins_dir: &Path, force: bool) -> anyhow::Result<PathBuf> {
    let path = plugins_dir.join(PLUGINS_FILE);
    if path.exists() && !force {
        anyhow::bail!("config already exists at {} (use --force to overwrite)", path.display());
    }

    if !plugins_dir.exists() {
        std::fs::create_dir_all(plugins_dir)?;
    }
    std::fs::write(&path, DEFAULT_PLUGINS_YAML)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_config() {
        let dir = TempDir::new().unwrap();
        assert!(load_config(&default_config_path_in(dir.path())).unwrap().is_none());
    }

    #[test]
    fn test_load_config() {
        let dir = TempDir::new().unwrap();
        let path = default_config_path_in(dir.path());
        std::fs::write(&path, "plugins_dir = \"tools/rules\"\ntargets = [\"AGENTS.md\"]\n").unwrap();

        let config = load_config(&path).unwrap().unwrap();
        assert_eq!(config.plugins_dir_in(dir.path()), dir.path().join("tools/rules"));
        assert_eq!(config.targets, Some(vec!["AGENTS.md".to_string()]));
    }

    #[test]
    fn test_default_plugins_dir() {
        let config = RulesyncConfig::default();
        assert_eq!(config.plugins_dir_in(Path::new("/p")), PathBuf::from("/p/.rulesync"));
    }

    #[test]
    fn test_find_project_root_walks_up() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join(".code_review")).unwrap();
        let nested = dir.path().join("src").join("deep");
        std::fs::create_dir_all(&nested).unwrap();

        assert_eq!(find_project_root(&nested), dir.path());
    }

    #[test]
    fn test_write_default_plugins_refuses_overwrite() {
        let dir = TempDir::new().unwrap();
        let plugins_dir = dir.path().join(DEFAULT_PLUGINS_DIR);

        let path = write_default_plugins(&plugins_dir, false).unwrap();
        assert!(path.exists());
        assert!(write_default_plugins(&plugins_dir, false).is_err());
        assert!(write_default_plugins(&plugins_dir, true).is_ok());
    }
}
