use crate::types::config::WeightsConfig;
use crate::types::scoring::{ScoreCard, SubScore};
use crate::types::signal::{ActivityReading, ActivitySignal, MentionSignal};

pub fn dev_score(activity: &ActivitySignal) -> SubScore {
    match activity {
        Ok(ActivityReading::DaysSincePush(days)) => days_ago_score(*days),
        Ok(ActivityReading::WeeklyCommits(commits)) => weekly_commits_score(*commits),
        Err(_) => 0,
    }
}

fn days_ago_score(days: u32) -> SubScore {
    match days {
        0..=1 => 100,
        2..=7 => 75,
        8..=30 => 40,
        _ => 10,
    }
}

fn weekly_commits_score(commits: u32) -> SubScore {
    match commits {
        0 => 0,
        1..=4 => 10,
        5..=19 => 40,
        20..=49 => 75,
        _ => 100,
    }
}

pub fn media_score(mentions: &MentionSignal) -> SubScore {
    match mentions {
        Ok(0) | Err(_) => 0,
        Ok(1..=2) => 30,
        Ok(3..=9) => 60,
        Ok(10..=20) => 80,
        Ok(_) => 100,
    }
}

pub fn hype_index(dev: SubScore, media: SubScore, weights: &WeightsConfig) -> f64 {
    f64::from(dev) * weights.dev + f64::from(media) * weights.media
}

impl ScoreCard {
    pub fn combine(
        activity: &ActivitySignal,
        mentions: &MentionSignal,
        weights: &WeightsConfig,
    ) -> Self {
        let dev = dev_score(activity);
        let media = media_score(mentions);
        Self {
            dev,
            media,
            hype_index: hype_index(dev, media, weights),
            dev_available: activity.is_ok(),
            media_available: mentions.is_ok(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProbeError;

    fn days(days: u32) -> ActivitySignal {
        Ok(ActivityReading::DaysSincePush(days))
    }

    fn absent() -> ProbeError {
        ProbeError::Transport("down".to_string())
    }

    #[test]
    fn dev_score_follows_days_ago_table() {
        for value in [0, 1] {
            assert_eq!(dev_score(&days(value)), 100);
        }
        for value in 2..=7 {
            assert_eq!(dev_score(&days(value)), 75);
        }
        for value in 8..=30 {
            assert_eq!(dev_score(&days(value)), 40);
        }
        assert_eq!(dev_score(&days(31)), 10);
        assert_eq!(dev_score(&days(900)), 10);
        assert_eq!(dev_score(&Err(absent())), 0);
    }

    #[test]
    fn dev_score_follows_weekly_commit_table() {
        let commits = |n: u32| -> ActivitySignal { Ok(ActivityReading::WeeklyCommits(n)) };
        assert_eq!(dev_score(&commits(0)), 0);
        assert_eq!(dev_score(&commits(4)), 10);
        assert_eq!(dev_score(&commits(5)), 40);
        assert_eq!(dev_score(&commits(20)), 75);
        assert_eq!(dev_score(&commits(50)), 100);
    }

    #[test]
    fn media_score_follows_mention_table() {
        assert_eq!(media_score(&Ok(0)), 0);
        for value in 1..=2 {
            assert_eq!(media_score(&Ok(value)), 30);
        }
        for value in 3..=9 {
            assert_eq!(media_score(&Ok(value)), 60);
        }
        for value in 10..=20 {
            assert_eq!(media_score(&Ok(value)), 80);
        }
        assert_eq!(media_score(&Ok(21)), 100);
        assert_eq!(media_score(&Err(absent())), 0);
    }

    #[test]
    fn hype_index_uses_default_weights() {
        let weights = WeightsConfig::default();
        assert!((hype_index(100, 0, &weights) - 60.0).abs() < 1e-9);
        assert!((hype_index(0, 100, &weights) - 40.0).abs() < 1e-9);
        assert!((hype_index(75, 60, &weights) - 69.0).abs() < 1e-9);
        assert!((hype_index(100, 100, &weights) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn hype_index_is_weighted_sum_across_grid() {
        let weights = WeightsConfig::default();
        for dev in (0..=100u8).step_by(5) {
            for media in (0..=100u8).step_by(5) {
                let expected = f64::from(dev) * 0.6 + f64::from(media) * 0.4;
                let actual = hype_index(dev, media, &weights);
                assert!((actual - expected).abs() < 1e-9);
                assert!((0.0..=100.0 + 1e-9).contains(&actual));
            }
        }
    }

    #[test]
    fn combine_marks_absent_signals() {
        let card = ScoreCard::combine(&days(3), &Err(absent()), &WeightsConfig::default());
        assert_eq!(card.dev, 75);
        assert_eq!(card.media, 0);
        assert!(card.dev_available);
        assert!(!card.media_available);
        assert!((card.hype_index - 45.0).abs() < 1e-9);
    }
}
