use crate::model::rank::Rank;
use crate::model::suit::Suit;
use core::fmt;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Points carried by every card in one deal.
pub const TOTAL_PENALTY: u8 = 26;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub const TWO_OF_CLUBS: Card = Card::new(Rank::Two, Suit::Clubs);
    pub const QUEEN_OF_SPADES: Card = Card::new(Rank::Queen, Suit::Spades);

    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    pub const fn is_penalty(self) -> bool {
        matches!(self.suit, Suit::Hearts) || self.is_queen_of_spades()
    }

    pub const fn is_queen_of_spades(self) -> bool {
        matches!(self.rank, Rank::Queen) && matches!(self.suit, Suit::Spades)
    }

    pub const fn is_two_of_clubs(self) -> bool {
        matches!(self.rank, Rank::Two) && matches!(self.suit, Suit::Clubs)
    }

    pub fn penalty_value(self) -> u8 {
        if self.is_queen_of_spades() {
            13
        } else if self.suit == Suit::Hearts {
            1
        } else {
            0
        }
    }

    /// Suit symbol followed by rank, e.g. `♦10`.
    pub fn symbolic(self) -> String {
        format!("{}{}", self.suit.symbol(), self.rank)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CardParseError {
    #[error("no card given")]
    Empty,
    #[error("'{0}' does not name a suit")]
    UnknownSuit(String),
    #[error("'{0}' does not name a rank")]
    UnknownRank(String),
}

impl FromStr for Card {
    type Err = CardParseError;

    /// Accepts rank and suit in either order: `QS`, `♠Q`, `10h`, `♦X`.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let text = raw.trim().trim_matches(|c| c == '\'' || c == '"').trim();
        let mut chars = text.chars();
        let (Some(first), Some(last)) = (chars.next(), text.chars().last()) else {
            return Err(CardParseError::Empty);
        };

        let leading_suit = Suit::from_char(first).filter(|_| text.len() > first.len_utf8());
        let (suit, rank_text) = if let Some(suit) = leading_suit {
            (suit, chars.as_str())
        } else if let Some(suit) = Suit::from_char(last) {
            (suit, &text[..text.len() - last.len_utf8()])
        } else {
            return Err(CardParseError::UnknownSuit(text.to_string()));
        };

        let rank = Rank::from_token(rank_text.trim())
            .ok_or_else(|| CardParseError::UnknownRank(rank_text.trim().to_string()))?;
        Ok(Card::new(rank, suit))
    }
}

/// Splits a comma separated list such as `♦10,♣2,♥A`.
pub fn parse_card_list(raw: &str) -> Result<Vec<Card>, CardParseError> {
    raw.split(',')
        .filter(|part| !part.trim().is_empty())
        .map(str::parse)
        .collect()
}
