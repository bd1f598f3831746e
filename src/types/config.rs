use crate::error::HypeError;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::time::Duration;

pub const MAX_WINDOW_DAYS: u32 = 3650;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default = "default_projects")]
    pub projects: BTreeMap<String, ProjectConfig>,
    #[serde(default)]
    pub activity: ActivityConfig,
    #[serde(default)]
    pub media: MediaConfig,
    #[serde(default)]
    pub weights: WeightsConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub retry: RetryConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectConfig {
    pub repository: String,
    pub display_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectEntry {
    pub ticker: String,
    pub repository: String,
    pub display_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityStrategy {
    #[default]
    DaysSincePush,
    WeeklyCommits,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ActivityConfig {
    #[serde(default)]
    pub strategy: ActivityStrategy,
    #[serde(default = "default_api_base")]
    pub api_base: String,
}

impl Default for ActivityConfig {
    fn default() -> Self {
        Self {
            strategy: ActivityStrategy::default(),
            api_base: default_api_base(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MediaConfig {
    #[serde(default = "default_feed_url")]
    pub feed_url: String,
    #[serde(default = "default_qualifier")]
    pub qualifier: String,
    #[serde(default = "default_window_days")]
    pub window_days: u32,
    #[serde(default = "default_feed_params")]
    pub extra_params: BTreeMap<String, String>,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            feed_url: default_feed_url(),
            qualifier: default_qualifier(),
            window_days: default_window_days(),
            extra_params: default_feed_params(),
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_dev_weight")]
    pub dev: f64,
    #[serde(default = "default_media_weight")]
    pub media: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            dev: default_dev_weight(),
            media: default_media_weight(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RetryConfig {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_backoff_secs")]
    pub backoff_secs: u64,
    #[serde(default = "default_retry_statuses")]
    pub retry_statuses: Vec<u16>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            backoff_secs: default_backoff_secs(),
            retry_statuses: default_retry_statuses(),
        }
    }
}

fn default_projects() -> BTreeMap<String, ProjectConfig> {
    [
        ("SOL", "https://github.com/solana-labs/solana", "Solana"),
        ("ETH", "https://github.com/ethereum/go-ethereum", "Ethereum"),
        ("ARB", "https://github.com/OffchainLabs/nitro", "Arbitrum"),
        ("OP", "https://github.com/ethereum-optimism/optimism", "Optimism"),
        ("NEAR", "https://github.com/near/nearcore", "NEAR Protocol"),
    ]
    .into_iter()
    .map(|(ticker, repository, display_name)| {
        (
            ticker.to_string(),
            ProjectConfig {
                repository: repository.to_string(),
                display_name: display_name.to_string(),
            },
        )
    })
    .collect()
}

fn default_api_base() -> String {
    "https://api.github.com".to_string()
}

fn default_feed_url() -> String {
    "https://news.google.com/rss/search".to_string()
}

fn default_qualifier() -> String {
    "crypto".to_string()
}

fn default_window_days() -> u32 {
    7
}

fn default_feed_params() -> BTreeMap<String, String> {
    [("hl", "en-US"), ("gl", "US"), ("ceid", "US:en")]
        .into_iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

fn default_dev_weight() -> f64 {
    0.6
}

fn default_media_weight() -> f64 {
    0.4
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    format!("narrative-hype/{}", env!("CARGO_PKG_VERSION"))
}

fn default_max_attempts() -> u32 {
    2
}

fn default_backoff_secs() -> u64 {
    3
}

fn default_retry_statuses() -> Vec<u16> {
    vec![202]
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            projects: default_projects(),
            activity: ActivityConfig::default(),
            media: MediaConfig::default(),
            weights: WeightsConfig::default(),
            http: HttpConfig::default(),
            retry: RetryConfig::default(),
        }
    }
}

impl Settings {
    pub fn project(&self, ticker: &str) -> Option<ProjectEntry> {
        self.projects.get(ticker).map(|project| ProjectEntry {
            ticker: ticker.to_string(),
            repository: project.repository.clone(),
            display_name: project.display_name.clone(),
        })
    }

    /// Supported tickers in sorted order.
    pub fn tickers(&self) -> Vec<&str> {
        self.projects.keys().map(String::as_str).collect()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.http.timeout_secs)
    }

    pub fn validate(&self) -> Result<(), HypeError> {
        if self.projects.is_empty() {
            return Err(HypeError::ConfigParse(
                "projects must define at least one ticker".to_string(),
            ));
        }
        for (ticker, project) in &self.projects {
            if ticker.trim().is_empty() || ticker.chars().any(|c| c.is_ascii_lowercase()) {
                return Err(HypeError::ConfigParse(format!(
                    "projects keys must be non-empty uppercase tickers (found '{ticker}')"
                )));
            }
            if project.display_name.trim().is_empty() {
                return Err(HypeError::ConfigParse(format!(
                    "projects.{ticker}.display_name cannot be empty"
                )));
            }
        }

        let weights = [self.weights.dev, self.weights.media];
        if weights.iter().any(|weight| !(0.0..=1.0).contains(weight)) {
            return Err(HypeError::ConfigParse(
                "weights values must be between 0.0 and 1.0".to_string(),
            ));
        }
        let weight_sum: f64 = weights.iter().sum();
        if (weight_sum - 1.0).abs() > 0.001 {
            return Err(HypeError::ConfigParse(format!(
                "weights must sum to 1.0 (found {:.3})",
                weight_sum
            )));
        }

        if !(1..=MAX_WINDOW_DAYS).contains(&self.media.window_days) {
            return Err(HypeError::ConfigParse(format!(
                "media.window_days must be between 1 and {MAX_WINDOW_DAYS}"
            )));
        }
        if self.http.timeout_secs == 0 {
            return Err(HypeError::ConfigParse(
                "http.timeout_secs must be greater than 0".to_string(),
            ));
        }
        if self.retry.max_attempts == 0 {
            return Err(HypeError::ConfigParse(
                "retry.max_attempts must be greater than 0".to_string(),
            ));
        }
        if let Some(status) = self
            .retry
            .retry_statuses
            .iter()
            .find(|status| !(100..=599).contains(*status))
        {
            return Err(HypeError::ConfigParse(format!(
                "retry.retry_statuses contains invalid HTTP status: {status}"
            )));
        }

        Ok(())
    }
}
