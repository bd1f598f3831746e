use crate::config::Credentials;
use crate::error::{HypeError, Result};
use crate::http::Transport;
use crate::probe::{MediaMentionProbe, RepoActivityProbe};
use crate::types::config::{ProjectEntry, Settings};
use crate::types::report::HypeReport;
use crate::types::scoring::ScoreCard;
use crate::types::signal::{describe_activity, describe_mentions};
use chrono::Utc;

/// Runs both probes for one project and combines their signals.
pub struct Pipeline<'a> {
    settings: &'a Settings,
    repo: RepoActivityProbe<'a>,
    media: MediaMentionProbe<'a>,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        settings: &'a Settings,
        transport: &'a dyn Transport,
        credentials: &Credentials,
    ) -> Self {
        Self {
            settings,
            repo: RepoActivityProbe::new(transport, settings, credentials.github_token.clone()),
            media: MediaMentionProbe::new(transport, settings),
        }
    }

    pub fn settings(&self) -> &Settings {
        self.settings
    }

    pub fn run_ticker(&self, ticker: &str) -> Result<HypeReport> {
        let project = self
            .settings
            .project(ticker)
            .ok_or_else(|| HypeError::UnknownTicker(ticker.to_string()))?;
        Ok(self.run(&project))
    }

    pub fn run(&self, project: &ProjectEntry) -> HypeReport {
        let window_days = self.settings.media.window_days;
        tracing::info!(
            ticker = %project.ticker,
            strategy = ?self.repo.strategy(),
            "computing hype index"
        );

        let activity = self.repo.probe_activity(&project.repository);
        let mentions = self.media.probe_mentions(&project.display_name, window_days);
        let scores = ScoreCard::combine(&activity, &mentions, &self.settings.weights);

        tracing::info!(
            ticker = %project.ticker,
            dev = scores.dev,
            media = scores.media,
            hype_index = scores.hype_index,
            "hype index computed"
        );

        HypeReport {
            ticker: project.ticker.clone(),
            display_name: project.display_name.clone(),
            dev_activity: describe_activity(&activity),
            media_mentions: describe_mentions(&mentions, window_days),
            window_days,
            scores,
            generated_at: Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::testing::ScriptedTransport;

    fn settings() -> Settings {
        let mut settings = Settings::default();
        settings.retry.backoff_secs = 0;
        settings
    }

    #[test]
    fn run_combines_both_signals() {
        let pushed_at = (Utc::now() - chrono::Duration::days(3))
            .format("%Y-%m-%dT%H:%M:%SZ")
            .to_string();
        let recent = Utc::now().to_rfc2822();
        let feed = format!(
            "<rss version=\"2.0\"><channel>{}</channel></rss>",
            format!("<item><pubDate>{recent}</pubDate></item>").repeat(12)
        );
        let transport = ScriptedTransport::new()
            .reply(200, &format!(r#"{{"pushed_at": "{pushed_at}"}}"#))
            .reply(200, &feed);
        let settings = settings();
        let pipeline = Pipeline::new(&settings, &transport, &Credentials::default());

        let report = pipeline.run_ticker("SOL").expect("SOL should be supported");
        assert_eq!(report.scores.dev, 75);
        assert_eq!(report.scores.media, 80);
        assert!((report.scores.hype_index - 77.0).abs() < 1e-9);
        assert_eq!(report.dev_activity, "last push 3 days ago");
        assert_eq!(report.media_mentions, "12 news mentions in the last 7 days");
        assert!(!report.is_degraded());
    }

    #[test]
    fn run_degrades_when_a_probe_fails() {
        let transport = ScriptedTransport::new()
            .fail("connection reset")
            .reply(200, "<rss version=\"2.0\"><channel></channel></rss>");
        let settings = settings();
        let pipeline = Pipeline::new(&settings, &transport, &Credentials::default());

        let report = pipeline.run_ticker("ETH").expect("ETH should be supported");
        assert_eq!(report.scores.dev, 0);
        assert_eq!(report.scores.media, 0);
        assert!(report.dev_activity.starts_with("data unavailable"));
        assert_eq!(report.media_mentions, "0 news mentions in the last 7 days");
        assert!(report.is_degraded());
    }

    #[test]
    fn run_ticker_rejects_unknown_ticker_without_requests() {
        let transport = ScriptedTransport::new();
        let settings = settings();
        let pipeline = Pipeline::new(&settings, &transport, &Credentials::default());

        let result = pipeline.run_ticker("XYZ");
        assert!(matches!(result, Err(HypeError::UnknownTicker(_))));
        assert_eq!(transport.calls(), 0);
    }
}
