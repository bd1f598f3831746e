use serde::Serialize;

pub type SubScore = u8;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreCard {
    pub dev: SubScore,
    pub media: SubScore,
    pub hype_index: f64,
    pub dev_available: bool,
    pub media_available: bool,
}
