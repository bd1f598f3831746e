use crate::types::report::HypeReport;

/// Chat reply using the `*bold*` emphasis of the Telegram Markdown dialect.
pub fn to_chat_text(report: &HypeReport) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "*Narrative Hype Index: {} ({})*\n\n",
        report.ticker, report.display_name
    ));
    output.push_str(&format!(
        "Dev activity: {}\nDev score: {}/100\n\n",
        report.dev_activity, report.scores.dev
    ));
    output.push_str(&format!(
        "Media mentions: {}\nMedia score: {}/100\n\n",
        report.media_mentions, report.scores.media
    ));
    output.push_str(&format!(
        "*Hype Index: {:.1}/100*",
        report.scores.hype_index
    ));
    output
}
