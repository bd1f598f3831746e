pub mod json;
pub mod text;

use crate::error::HypeError;
use crate::types::report::HypeReport;

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Text,
    Json,
}

pub fn render(report: &HypeReport, format: OutputFormat) -> Result<String, HypeError> {
    match format {
        OutputFormat::Text => Ok(text::to_chat_text(report)),
        OutputFormat::Json => json::to_json(report).map_err(HypeError::Json),
    }
}
