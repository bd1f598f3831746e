use crate::error::ProbeError;
use crate::http::{HttpRequest, RetryPolicy, Transport};
use crate::probe::feed::parse_feed;
use crate::types::config::Settings;
use crate::types::signal::MentionSignal;
use chrono::{DateTime, Duration, Utc};
use std::collections::BTreeMap;

/// Counts recent news items about a project from a search feed.
pub struct MediaMentionProbe<'a> {
    transport: &'a dyn Transport,
    retry: RetryPolicy,
    feed_url: String,
    qualifier: String,
    extra_params: BTreeMap<String, String>,
}

impl<'a> MediaMentionProbe<'a> {
    pub fn new(transport: &'a dyn Transport, settings: &Settings) -> Self {
        Self {
            transport,
            retry: RetryPolicy::from(&settings.retry),
            feed_url: settings.media.feed_url.clone(),
            qualifier: settings.media.qualifier.clone(),
            extra_params: settings.media.extra_params.clone(),
        }
    }

    pub fn probe_mentions(&self, display_name: &str, window_days: u32) -> MentionSignal {
        self.probe_mentions_at(display_name, window_days, Utc::now())
    }

    pub fn probe_mentions_at(
        &self,
        display_name: &str,
        window_days: u32,
        now: DateTime<Utc>,
    ) -> MentionSignal {
        let signal = self.fetch(display_name, window_days, now);
        if let Err(err) = &signal {
            tracing::warn!(display_name, error = %err, "media mentions unavailable");
        }
        signal
    }

    fn fetch(&self, display_name: &str, window_days: u32, now: DateTime<Utc>) -> MentionSignal {
        let query = search_query(display_name, &self.qualifier);
        let mut request = HttpRequest::get(&self.feed_url).query("q", &query);
        for (key, value) in &self.extra_params {
            request = request.query(key, value);
        }
        tracing::debug!(url = %self.feed_url, query = %query, "requesting news feed");

        let response = self.retry.fetch(self.transport, &request)?;

        let entries = parse_feed(&response.body)?;
        let cutoff = now
            .checked_sub_signed(Duration::days(i64::from(window_days)))
            .ok_or_else(|| {
                ProbeError::Malformed(format!("window of {window_days} days is out of range"))
            })?;
        let recent = entries
            .iter()
            .filter(|entry| entry.published.is_some_and(|published| published > cutoff))
            .collect::<Vec<_>>();
        for entry in &recent {
            tracing::trace!(title = ?entry.title, published = ?entry.published, "recent mention");
        }
        let count = recent.len();
        tracing::debug!(
            display_name,
            total = entries.len(),
            recent = count,
            "counted feed entries"
        );
        Ok(u32::try_from(count).unwrap_or(u32::MAX))
    }
}

/// Exact-phrase match on the project name plus a topical qualifier.
pub fn search_query(display_name: &str, qualifier: &str) -> String {
    let phrase = format!("\"{}\"", display_name.trim().replace('"', ""));
    let qualifier = qualifier.trim();
    if qualifier.is_empty() {
        phrase
    } else {
        format!("{phrase} {qualifier}")
    }
}
