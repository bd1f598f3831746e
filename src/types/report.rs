use crate::types::scoring::ScoreCard;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct HypeReport {
    pub ticker: String,
    pub display_name: String,
    pub dev_activity: String,
    pub media_mentions: String,
    pub window_days: u32,
    pub scores: ScoreCard,
    pub generated_at: String,
}

impl HypeReport {
    /// True when either probe came back absent.
    pub fn is_degraded(&self) -> bool {
        !self.scores.dev_available || !self.scores.media_available
    }
}
