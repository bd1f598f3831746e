use crate::types::report::HypeReport;

pub fn to_json(report: &HypeReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}
