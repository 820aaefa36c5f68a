use crate::model::card::Card;
use crate::model::player::PlayerPosition;
use crate::model::suit::Suit;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trick {
    leader: PlayerPosition,
    plays: Vec<Play>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Play {
    pub position: PlayerPosition,
    pub card: Card,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrickError {
    TrickComplete,
    OutOfTurn {
        expected: PlayerPosition,
        actual: PlayerPosition,
    },
    AlreadyPlayed(PlayerPosition),
}

impl fmt::Display for TrickError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrickError::TrickComplete => write!(f, "trick already complete"),
            TrickError::OutOfTurn { expected, actual } => {
                write!(f, "expected {expected} to play next but got {actual}")
            }
            TrickError::AlreadyPlayed(position) => {
                write!(f, "{position} has already played this trick")
            }
        }
    }
}

impl std::error::Error for TrickError {}

impl Trick {
    pub fn new(leader: PlayerPosition) -> Self {
        Self {
            leader,
            plays: Vec::with_capacity(4),
        }
    }

    pub fn leader(&self) -> PlayerPosition {
        self.leader
    }

    pub fn plays(&self) -> &[Play] {
        &self.plays
    }

    pub fn cards(&self) -> impl Iterator<Item = Card> + '_ {
        self.plays.iter().map(|play| play.card)
    }

    pub fn len(&self) -> usize {
        self.plays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plays.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.plays.len() == 4
    }

    /// Suit of the first card played, if any.
    pub fn lead_suit(&self) -> Option<Suit> {
        self.plays.first().map(|play| play.card.suit)
    }

    /// Seat due to play next: the leader offset by the number of cards already down.
    pub fn expected_position(&self) -> PlayerPosition {
        self.leader.offset(self.plays.len())
    }

    pub fn play(&mut self, position: PlayerPosition, card: Card) -> Result<(), TrickError> {
        if self.is_complete() {
            return Err(TrickError::TrickComplete);
        }

        if self.plays.iter().any(|play| play.position == position) {
            return Err(TrickError::AlreadyPlayed(position));
        }

        let expected = self.expected_position();
        if expected != position {
            return Err(TrickError::OutOfTurn {
                expected,
                actual: position,
            });
        }

        self.plays.push(Play { position, card });
        Ok(())
    }

    pub fn penalty_total(&self) -> u8 {
        self.plays
            .iter()
            .map(|play| play.card.penalty_value())
            .sum()
    }
}

impl fmt::Display for Trick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self
            .plays
            .iter()
            .map(|play| format!("{}:{}", play.position, play.card))
            .collect();
        write!(f, "[{}]", rendered.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::{Trick, TrickError};
    use crate::model::card::Card;
    use crate::model::player::PlayerPosition;
    use crate::model::rank::Rank;
    use crate::model::suit::Suit;

    #[test]
    fn plays_follow_turn_order() {
        let mut trick = Trick::new(PlayerPosition::North);
        assert!(
            trick
                .play(PlayerPosition::North, Card::new(Rank::Two, Suit::Clubs))
                .is_ok()
        );
        assert!(matches!(
            trick.play(PlayerPosition::South, Card::new(Rank::Three, Suit::Clubs)),
            Err(TrickError::OutOfTurn { .. })
        ));
        assert_eq!(trick.expected_position(), PlayerPosition::East);
    }

    #[test]
    fn leader_may_sit_anywhere() {
        let mut trick = Trick::new(PlayerPosition::West);
        trick
            .play(PlayerPosition::West, Card::new(Rank::Five, Suit::Diamonds))
            .unwrap();
        assert_eq!(trick.expected_position(), PlayerPosition::North);
        assert_eq!(trick.lead_suit(), Some(Suit::Diamonds));
    }

    #[test]
    fn fifth_card_is_rejected() {
        let mut trick = Trick::new(PlayerPosition::North);
        for (seat, rank) in PlayerPosition::LOOP
            .iter()
            .copied()
            .zip([Rank::Two, Rank::Three, Rank::Four, Rank::Five])
        {
            trick.play(seat, Card::new(rank, Suit::Clubs)).unwrap();
        }
        assert!(trick.is_complete());
        assert_eq!(
            trick.play(PlayerPosition::North, Card::new(Rank::Six, Suit::Clubs)),
            Err(TrickError::TrickComplete)
        );
    }

    #[test]
    fn queen_of_spades_counts_as_penalty() {
        let mut trick = Trick::new(PlayerPosition::North);
        trick
            .play(PlayerPosition::North, Card::new(Rank::Two, Suit::Clubs))
            .unwrap();
        trick
            .play(PlayerPosition::East, Card::new(Rank::Queen, Suit::Spades))
            .unwrap();
        trick
            .play(PlayerPosition::South, Card::new(Rank::Four, Suit::Hearts))
            .unwrap();
        trick
            .play(PlayerPosition::West, Card::new(Rank::Five, Suit::Clubs))
            .unwrap();

        assert_eq!(trick.penalty_total(), 14);
        assert_eq!(trick.to_string(), "[North:2C, East:QS, South:4H, West:5C]");
    }
}
