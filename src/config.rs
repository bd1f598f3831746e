use crate::error::{HypeError, Result};
use crate::types::config::Settings;
use std::path::{Path, PathBuf};
use toml::map::Map;
use toml::Value;

pub const DEFAULT_CONFIG_FILE: &str = "narrative.toml";
pub const DEFAULT_LOCAL_FILE: &str = ".narrative/local.toml";
pub const DEFAULT_GLOBAL_CONFIG_FILE: &str = ".config/narrative-hype/config.toml";
pub const GITHUB_TOKEN_ENV: &str = "GITHUB_TOKEN";

/// Secrets read from the environment, kept apart from the TOML settings.
#[derive(Clone, Default)]
pub struct Credentials {
    pub github_token: Option<String>,
}

impl Credentials {
    pub fn from_env() -> Self {
        Self {
            github_token: std::env::var(GITHUB_TOKEN_ENV)
                .ok()
                .map(|token| token.trim().to_string())
                .filter(|token| !token.is_empty()),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("github_token", &self.github_token.as_ref().map(|_| "***"))
            .finish()
    }
}

/// Loads settings for `root`. `explicit` replaces `<root>/narrative.toml` when
/// given and must exist.
pub fn load_settings(root: &Path, explicit: Option<&Path>) -> Result<Settings> {
    let global = std::env::var_os("HOME")
        .map(PathBuf::from)
        .map(|home| home.join(DEFAULT_GLOBAL_CONFIG_FILE));
    load_settings_with_global(root, explicit, global.as_deref())
}

pub(crate) fn load_settings_with_global(
    root: &Path,
    explicit: Option<&Path>,
    global_path: Option<&Path>,
) -> Result<Settings> {
    let repo_path = match explicit {
        Some(path) => {
            if !path.exists() {
                return Err(HypeError::ConfigParse(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            path.to_path_buf()
        }
        None => root.join(DEFAULT_CONFIG_FILE),
    };

    let mut merged = Value::Table(Map::new());
    if let Some(path) = global_path {
        merge_file_if_exists(&mut merged, path)?;
    }
    merge_file_if_exists(&mut merged, &repo_path)?;
    merge_file_if_exists(&mut merged, &root.join(DEFAULT_LOCAL_FILE))?;

    let settings: Settings = merged
        .try_into()
        .map_err(|e: toml::de::Error| HypeError::ConfigParse(e.to_string()))?;
    settings.validate()?;
    Ok(settings)
}

fn merge_file_if_exists(merged: &mut Value, path: &Path) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }
    tracing::debug!(path = %path.display(), "merging config file");
    let value = read_toml_value(path)?;
    merge_toml(merged, value);
    Ok(())
}

fn read_toml_value(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| HypeError::ConfigParse(format!("{}: {}", path.display(), e)))
}

fn merge_toml(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Table(base_table), Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                match base_table.get_mut(&key) {
                    Some(existing) => merge_toml(existing, value),
                    None => {
                        base_table.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => {
            *slot = value;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::config::ActivityStrategy;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn load_settings_falls_back_to_defaults_without_files() {
        let dir = TempDir::new().expect("temp dir should be created");
        let settings =
            load_settings_with_global(dir.path(), None, None).expect("load should not fail");
        assert!(settings.project("SOL").is_some());
        assert_eq!(settings.weights.dev, 0.6);
    }

    #[test]
    fn load_settings_merges_global_repo_and_local_in_order() {
        let root = TempDir::new().expect("root temp dir should be created");
        let global_root = TempDir::new().expect("global temp dir should be created");
        let global_path = global_root.path().join("config.toml");

        fs::write(
            &global_path,
            r#"
[media]
qualifier = "web3"
window_days = 14

[http]
timeout_secs = 30
"#,
        )
        .expect("global config should write");

        fs::write(
            root.path().join(DEFAULT_CONFIG_FILE),
            r#"
[media]
window_days = 3

[activity]
strategy = "weekly_commits"
"#,
        )
        .expect("repo config should write");

        fs::create_dir_all(root.path().join(".narrative")).expect("local dir should create");
        fs::write(
            root.path().join(DEFAULT_LOCAL_FILE),
            r#"
[activity]
strategy = "days_since_push"
"#,
        )
        .expect("local override should write");

        let settings = load_settings_with_global(root.path(), None, Some(&global_path))
            .expect("load should succeed");

        assert_eq!(settings.media.qualifier, "web3");
        assert_eq!(settings.media.window_days, 3);
        assert_eq!(settings.http.timeout_secs, 30);
        assert_eq!(settings.activity.strategy, ActivityStrategy::DaysSincePush);
    }

    #[test]
    fn explicit_config_must_exist() {
        let dir = TempDir::new().expect("temp dir should be created");
        let missing = dir.path().join("missing.toml");
        let err = load_settings_with_global(dir.path(), Some(&missing), None)
            .expect_err("missing explicit config should fail");
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn invalid_merged_settings_are_rejected() {
        let dir = TempDir::new().expect("temp dir should be created");
        fs::write(
            dir.path().join(DEFAULT_CONFIG_FILE),
            r#"
[weights]
dev = 1.5
"#,
        )
        .expect("repo config should write");

        let result = load_settings_with_global(dir.path(), None, None);
        assert!(matches!(result, Err(HypeError::ConfigParse(_))));
    }

    #[test]
    fn credentials_debug_hides_token() {
        let credentials = Credentials {
            github_token: Some("ghp_secret".to_string()),
        };
        let rendered = format!("{credentials:?}");
        assert!(!rendered.contains("ghp_secret"));
    }
}
