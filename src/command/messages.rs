pub const MISSING_TICKER: &str = "Please add a ticker, for example: /narrative SOL";
pub const UNKNOWN_COMMAND: &str = "Unknown command. Send /help to see what I can do.";
pub const INTERNAL_ERROR: &str =
    "Sorry, something went wrong while computing the hype index. Please try again later.";
pub const UNSUPPORTED_PREFIX: &str = "Sorry, that ticker is not supported yet.";

pub fn usage(tickers: &[&str]) -> String {
    format!(
        "*Narrative Hype Bot*\n\n\
         Send /narrative TICKER to get a hype index built from developer activity and news mentions.\n\n\
         Supported tickers: {}",
        tickers.join(", ")
    )
}

pub fn unsupported(tickers: &[&str]) -> String {
    format!("{UNSUPPORTED_PREFIX} Supported tickers: {}", tickers.join(", "))
}
