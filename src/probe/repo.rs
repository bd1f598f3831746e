use crate::error::ProbeError;
use crate::http::{HttpRequest, RetryPolicy, Transport};
use crate::types::config::{ActivityStrategy, Settings};
use crate::types::signal::{ActivityReading, ActivitySignal};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

const GITHUB_ACCEPT: &str = "application/vnd.github+json";

#[derive(Debug, Deserialize)]
struct RepoMetadata {
    pushed_at: Option<String>,
}

/// Measures developer activity on a hosted source repository.
pub struct RepoActivityProbe<'a> {
    transport: &'a dyn Transport,
    retry: RetryPolicy,
    api_base: String,
    strategy: ActivityStrategy,
    token: Option<String>,
}

impl<'a> RepoActivityProbe<'a> {
    pub fn new(transport: &'a dyn Transport, settings: &Settings, token: Option<String>) -> Self {
        Self {
            transport,
            retry: RetryPolicy::from(&settings.retry),
            api_base: settings.activity.api_base.trim_end_matches('/').to_string(),
            strategy: settings.activity.strategy,
            token,
        }
    }

    pub fn strategy(&self) -> ActivityStrategy {
        self.strategy
    }

    pub fn probe_activity(&self, repository: &str) -> ActivitySignal {
        self.probe_activity_at(repository, Utc::now())
    }

    pub fn probe_activity_at(&self, repository: &str, now: DateTime<Utc>) -> ActivitySignal {
        let signal = self.fetch(repository, now);
        if let Err(err) = &signal {
            tracing::warn!(repository, error = %err, "repository activity unavailable");
        }
        signal
    }

    fn fetch(&self, repository: &str, now: DateTime<Utc>) -> ActivitySignal {
        let (owner, name) = parse_repository(repository)?;
        match self.strategy {
            ActivityStrategy::DaysSincePush => {
                let url = format!("{}/repos/{owner}/{name}", self.api_base);
                let body = self.get_json(&url)?;
                let metadata: RepoMetadata = serde_json::from_str(&body)
                    .map_err(|e| ProbeError::Malformed(e.to_string()))?;
                let pushed_at = metadata
                    .pushed_at
                    .ok_or_else(|| ProbeError::Malformed("missing pushed_at".to_string()))?;
                let pushed_at = parse_timestamp(&pushed_at)?;
                Ok(ActivityReading::DaysSincePush(days_between(pushed_at, now)))
            }
            ActivityStrategy::WeeklyCommits => {
                let url = format!("{}/repos/{owner}/{name}/stats/commit_activity", self.api_base);
                let body = self.get_json(&url)?;
                Ok(ActivityReading::WeeklyCommits(last_week_total(&body)?))
            }
        }
    }

    fn get_json(&self, url: &str) -> Result<String, ProbeError> {
        if self.token.is_none() {
            tracing::warn!("GITHUB_TOKEN not set, sending unauthenticated request");
        }
        let request = HttpRequest::get(url)
            .header("Accept", GITHUB_ACCEPT)
            .bearer(self.token.as_deref());
        tracing::debug!(url, "requesting repository data");
        let response = self.retry.fetch(self.transport, &request)?;
        Ok(response.body)
    }
}

/// Splits a URL-like identifier into `(owner, name)` using its last two path
/// segments.
pub fn parse_repository(identifier: &str) -> Result<(String, String), ProbeError> {
    let segments = identifier
        .trim()
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>();
    match segments.as_slice() {
        [.., owner, name] => {
            let name = name.strip_suffix(".git").unwrap_or(*name);
            if name.is_empty() {
                return Err(ProbeError::InvalidRepository(identifier.to_string()));
            }
            Ok((owner.to_string(), name.to_string()))
        }
        _ => Err(ProbeError::InvalidRepository(identifier.to_string())),
    }
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, ProbeError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| ProbeError::Malformed(format!("pushed_at '{raw}': {e}")))
}

/// Whole days elapsed, floored. Timestamps in the future count as zero.
pub fn days_between(then: DateTime<Utc>, now: DateTime<Utc>) -> u32 {
    let days = (now - then).num_days().max(0);
    u32::try_from(days).unwrap_or(u32::MAX)
}

/// Reads the commit total of the most recent week in a weekly activity series.
/// An empty or oddly shaped series is a legitimate "no activity" answer; only
/// a body that is not JSON at all counts as malformed.
fn last_week_total(body: &str) -> Result<u32, ProbeError> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| ProbeError::Malformed(e.to_string()))?;
    let total = value
        .as_array()
        .and_then(|weeks| weeks.last())
        .and_then(|week| week.get("total"))
        .and_then(Value::as_u64);
    match total {
        Some(total) => Ok(u32::try_from(total).unwrap_or(u32::MAX)),
        None => {
            if value.as_array().map_or(true, |weeks| !weeks.is_empty()) {
                tracing::warn!("commit activity series has unexpected shape, counting 0 commits");
            }
            Ok(0)
        }
    }
}
