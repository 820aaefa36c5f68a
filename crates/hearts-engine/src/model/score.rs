use crate::model::card::TOTAL_PENALTY;
use crate::model::player::PlayerPosition;
use serde::{Deserialize, Serialize};

/// A match ends once somebody reaches this total.
pub const MATCH_END_THRESHOLD: u32 = 100;

/// Cumulative points per seat. Totals never decrease.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreBoard {
    totals: [u32; 4],
}

impl ScoreBoard {
    pub const fn new() -> Self {
        Self { totals: [0; 4] }
    }

    pub const fn from_totals(totals: [u32; 4]) -> Self {
        Self { totals }
    }

    pub fn add_penalty(&mut self, seat: PlayerPosition, points: u32) {
        self.totals[seat.index()] += points;
    }

    pub fn score(&self, seat: PlayerPosition) -> u32 {
        self.totals[seat.index()]
    }

    pub fn standings(&self) -> &[u32; 4] {
        &self.totals
    }

    /// Adds one round's captured points. A shooter adds nothing and every
    /// other seat takes the full 26. Returns the per-seat deltas.
    pub fn apply_round(&mut self, captured: [u8; 4], moonshot: Option<PlayerPosition>) -> [u32; 4] {
        let deltas = match moonshot {
            Some(shooter) => PlayerPosition::LOOP.map(|seat| {
                if seat == shooter {
                    0
                } else {
                    u32::from(TOTAL_PENALTY)
                }
            }),
            None => captured.map(u32::from),
        };

        for seat in PlayerPosition::LOOP {
            self.add_penalty(seat, deltas[seat.index()]);
        }
        deltas
    }

    /// Lowest-scoring seat, if exactly one seat holds the minimum.
    pub fn unique_leader(&self) -> Option<PlayerPosition> {
        let lowest = *self.totals.iter().min()?;
        let mut holders = PlayerPosition::LOOP
            .iter()
            .copied()
            .filter(|seat| self.score(*seat) == lowest);
        match (holders.next(), holders.next()) {
            (Some(seat), None) => Some(seat),
            _ => None,
        }
    }

    pub fn threshold_reached(&self) -> bool {
        self.totals.iter().any(|&total| total >= MATCH_END_THRESHOLD)
    }

    /// The winner once the match is over: somebody has reached the threshold
    /// and the lowest total is held by one seat alone. A shared lowest total
    /// keeps the match going.
    pub fn match_winner(&self) -> Option<PlayerPosition> {
        if !self.threshold_reached() {
            return None;
        }
        self.unique_leader()
    }
}

#[cfg(test)]
mod tests {
    use super::ScoreBoard;
    use crate::model::player::PlayerPosition;

    #[test]
    fn scoreboard_tracks_penalty_points() {
        let mut board = ScoreBoard::new();
        board.add_penalty(PlayerPosition::East, 13);
        assert_eq!(board.score(PlayerPosition::East), 13);
        assert_eq!(board.score(PlayerPosition::North), 0);
    }

    #[test]
    fn apply_round_adds_penalties_normally() {
        let mut board = ScoreBoard::new();
        let deltas = board.apply_round([1, 5, 0, 20], None);
        assert_eq!(deltas, [1, 5, 0, 20]);
        assert_eq!(board.score(PlayerPosition::North), 1);
        assert_eq!(board.score(PlayerPosition::East), 5);
        assert_eq!(board.score(PlayerPosition::West), 20);
    }

    #[test]
    fn shoot_the_moon_awards_opponents() {
        let mut board = ScoreBoard::new();
        let deltas = board.apply_round([26, 0, 0, 0], Some(PlayerPosition::North));
        assert_eq!(deltas.iter().sum::<u32>(), 78);
        assert_eq!(board.score(PlayerPosition::North), 0);
        assert_eq!(board.score(PlayerPosition::East), 26);
        assert_eq!(board.score(PlayerPosition::South), 26);
        assert_eq!(board.score(PlayerPosition::West), 26);
    }

    #[test]
    fn no_winner_below_threshold() {
        let board = ScoreBoard::from_totals([99, 10, 20, 30]);
        assert_eq!(board.match_winner(), None);
    }

    #[test]
    fn unique_lowest_wins_once_threshold_crossed() {
        let board = ScoreBoard::from_totals([101, 85, 92, 92]);
        assert_eq!(board.match_winner(), Some(PlayerPosition::East));
    }

    #[test]
    fn unique_lowest_wins_even_when_others_tie_at_threshold() {
        let board = ScoreBoard::from_totals([100, 100, 90, 110]);
        assert_eq!(board.match_winner(), Some(PlayerPosition::South));
    }

    #[test]
    fn tied_lowest_continues_match() {
        let board = ScoreBoard::from_totals([104, 60, 60, 90]);
        assert!(board.threshold_reached());
        assert_eq!(board.match_winner(), None);
    }
}
