//! Chat command handling. The chat network itself lives outside this crate:
//! it hands over the raw message text and sends back `Reply::text`.

pub mod messages;

use crate::error::HypeError;
use crate::pipeline::Pipeline;
use crate::report::text::to_chat_text;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Usage,
    Narrative(String),
    MissingTicker,
    Unknown(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyKind {
    Report { degraded: bool },
    Usage,
    Rejected,
    InternalError,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub kind: ReplyKind,
    pub text: String,
}

/// Parses `/start`, `/help` and `/narrative TICKER`. The command word is
/// case-insensitive and may carry a `@botname` suffix; the ticker is
/// normalized to uppercase.
pub fn parse(text: &str) -> Command {
    let mut words = text.split_whitespace();
    let Some(head) = words.next() else {
        return Command::Unknown(String::new());
    };
    let Some(name) = head.strip_prefix('/') else {
        return Command::Unknown(head.to_string());
    };
    let name = name.split('@').next().unwrap_or_default().to_ascii_lowercase();

    match name.as_str() {
        "start" | "help" => Command::Usage,
        "narrative" => match words.next() {
            Some(ticker) => Command::Narrative(ticker.to_ascii_uppercase()),
            None => Command::MissingTicker,
        },
        _ => Command::Unknown(head.to_string()),
    }
}

pub struct Dispatcher<'a> {
    pipeline: Pipeline<'a>,
}

impl<'a> Dispatcher<'a> {
    pub fn new(pipeline: Pipeline<'a>) -> Self {
        Self { pipeline }
    }

    pub fn respond(&self, text: &str) -> Reply {
        let tickers = self.pipeline.settings().tickers();
        match parse(text) {
            Command::Usage => Reply {
                kind: ReplyKind::Usage,
                text: messages::usage(&tickers),
            },
            Command::MissingTicker => Reply {
                kind: ReplyKind::Rejected,
                text: messages::MISSING_TICKER.to_string(),
            },
            Command::Unknown(word) => {
                tracing::debug!(command = %word, "ignoring unknown command");
                Reply {
                    kind: ReplyKind::Rejected,
                    text: messages::UNKNOWN_COMMAND.to_string(),
                }
            }
            Command::Narrative(ticker) => match self.pipeline.run_ticker(&ticker) {
                Ok(report) => Reply {
                    kind: ReplyKind::Report {
                        degraded: report.is_degraded(),
                    },
                    text: to_chat_text(&report),
                },
                Err(HypeError::UnknownTicker(ticker)) => {
                    tracing::info!(%ticker, "rejecting unsupported ticker");
                    Reply {
                        kind: ReplyKind::Rejected,
                        text: messages::unsupported(&tickers),
                    }
                }
                Err(err) => {
                    tracing::error!(error = %err, "narrative command failed");
                    Reply {
                        kind: ReplyKind::InternalError,
                        text: messages::INTERNAL_ERROR.to_string(),
                    }
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Credentials;
    use crate::http::testing::ScriptedTransport;
    use crate::types::config::Settings;

    #[test]
    fn parse_recognizes_commands() {
        assert_eq!(parse("/start"), Command::Usage);
        assert_eq!(parse("  /HELP  "), Command::Usage);
        assert_eq!(parse("/narrative SOL"), Command::Narrative("SOL".to_string()));
        assert_eq!(parse("/narrative sol"), Command::Narrative("SOL".to_string()));
        assert_eq!(
            parse("/narrative@hypebot ETH extra"),
            Command::Narrative("ETH".to_string())
        );
        assert_eq!(parse("/narrative"), Command::MissingTicker);
        assert_eq!(parse("/price SOL"), Command::Unknown("/price".to_string()));
        assert_eq!(parse("hello"), Command::Unknown("hello".to_string()));
        assert_eq!(parse(""), Command::Unknown(String::new()));
    }

    #[test]
    fn usage_lists_supported_tickers() {
        let settings = Settings::default();
        let transport = ScriptedTransport::new();
        let dispatcher = Dispatcher::new(Pipeline::new(
            &settings,
            &transport,
            &Credentials::default(),
        ));

        let reply = dispatcher.respond("/help");
        assert_eq!(reply.kind, ReplyKind::Usage);
        assert!(reply.text.contains("/narrative"));
        assert!(reply.text.contains("SOL"));
        assert!(reply.text.contains("ETH"));
        assert_eq!(transport.calls(), 0);
    }

    #[test]
    fn unknown_ticker_is_rejected_without_network_calls() {
        let settings = Settings::default();
        let transport = ScriptedTransport::new();
        let dispatcher = Dispatcher::new(Pipeline::new(
            &settings,
            &transport,
            &Credentials::default(),
        ));

        let reply = dispatcher.respond("/narrative XYZ");
        assert_eq!(reply.kind, ReplyKind::Rejected);
        assert!(reply.text.starts_with(messages::UNSUPPORTED_PREFIX));
        assert_eq!(transport.calls(), 0);

        let reply = dispatcher.respond("/narrative");
        assert_eq!(reply.text, messages::MISSING_TICKER);
        assert_eq!(transport.calls(), 0);
    }

    #[test]
    fn transport_failures_still_produce_a_report() {
        let mut settings = Settings::default();
        settings.retry.backoff_secs = 0;
        let transport = ScriptedTransport::new()
            .fail("dns lookup failed")
            .fail("dns lookup failed");
        let dispatcher = Dispatcher::new(Pipeline::new(
            &settings,
            &transport,
            &Credentials::default(),
        ));

        let reply = dispatcher.respond("/narrative SOL");
        assert_eq!(reply.kind, ReplyKind::Report { degraded: true });
        assert!(reply.text.contains("Dev activity: data unavailable"));
        assert!(reply.text.contains("Media mentions: data unavailable"));
        assert!(reply.text.contains("*Hype Index: 0.0/100*"));
    }
}
