use crate::model::passing::PassingDirection;
use crate::model::player::PlayerPosition;
use crate::model::score::ScoreBoard;
use crate::model::trick::Play;
use crate::rules::TrickOutcome;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrickRecord {
    pub leader: PlayerPosition,
    pub plays: Vec<Play>,
    pub winner: PlayerPosition,
    pub points: u8,
}

impl From<&TrickOutcome> for TrickRecord {
    fn from(outcome: &TrickOutcome) -> Self {
        Self {
            leader: outcome.trick.leader(),
            plays: outcome.trick.plays().to_vec(),
            winner: outcome.winner,
            points: outcome.points,
        }
    }
}

/// Archived summary of one finished round. Written for audit and logs only;
/// gameplay never reads it back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundRecord {
    pub round: u32,
    pub passing_direction: PassingDirection,
    pub tricks: Vec<TrickRecord>,
    pub captured_points: [u8; 4],
    pub moonshot: Option<PlayerPosition>,
    pub deltas: [u32; 4],
    pub scores: [u32; 4],
}

impl RoundRecord {
    pub fn to_json_line(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchOutcome {
    pub winner: PlayerPosition,
    pub winner_name: String,
    pub scores: ScoreBoard,
    pub rounds: usize,
}
