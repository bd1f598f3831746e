use crate::error::ProbeError;

/// A raw reading from a probe. `Err` is the absent value and records why.
pub type Signal<T> = Result<T, ProbeError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityReading {
    DaysSincePush(u32),
    WeeklyCommits(u32),
}

pub type ActivitySignal = Signal<ActivityReading>;
pub type MentionSignal = Signal<u32>;

pub fn describe_activity(signal: &ActivitySignal) -> String {
    match signal {
        Ok(ActivityReading::DaysSincePush(0)) => "last push less than a day ago".to_string(),
        Ok(ActivityReading::DaysSincePush(1)) => "last push 1 day ago".to_string(),
        Ok(ActivityReading::DaysSincePush(days)) => format!("last push {days} days ago"),
        Ok(ActivityReading::WeeklyCommits(1)) => "1 commit in the last week".to_string(),
        Ok(ActivityReading::WeeklyCommits(commits)) => {
            format!("{commits} commits in the last week")
        }
        Err(err) => unavailable(err),
    }
}

pub fn describe_mentions(signal: &MentionSignal, window_days: u32) -> String {
    let window = if window_days == 1 {
        "day".to_string()
    } else {
        format!("{window_days} days")
    };
    match signal {
        Ok(1) => format!("1 news mention in the last {window}"),
        Ok(count) => format!("{count} news mentions in the last {window}"),
        Err(err) => unavailable(err),
    }
}

fn unavailable(err: &ProbeError) -> String {
    format!("data unavailable ({})", err.reason())
}
