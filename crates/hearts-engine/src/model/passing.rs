use crate::model::card::Card;
use crate::model::hand::Hand;
use crate::model::player::PlayerPosition;
use crate::model::table::HandUpdates;
use serde::{Deserialize, Serialize};
use std::array;
use std::fmt;
use thiserror::Error;

/// Where each seat sends its three cards. Rounds cycle through three
/// directions; there is no hold round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PassingDirection {
    Left,
    Across,
    Right,
}

impl PassingDirection {
    pub const CYCLE: [PassingDirection; 3] = [
        PassingDirection::Left,
        PassingDirection::Across,
        PassingDirection::Right,
    ];

    /// Seat `i` passes to seat `(i + 1 + round % 3) % 4`.
    pub const fn for_round(round: u32) -> PassingDirection {
        match round % 3 {
            0 => PassingDirection::Left,
            1 => PassingDirection::Across,
            _ => PassingDirection::Right,
        }
    }

    pub const fn steps(self) -> usize {
        match self {
            PassingDirection::Left => 1,
            PassingDirection::Across => 2,
            PassingDirection::Right => 3,
        }
    }

    pub const fn target(self, seat: PlayerPosition) -> PlayerPosition {
        seat.offset(self.steps())
    }

    pub fn recipients(self) -> [PlayerPosition; 4] {
        PlayerPosition::LOOP.map(|seat| self.target(seat))
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            PassingDirection::Left => "Left",
            PassingDirection::Across => "Across",
            PassingDirection::Right => "Right",
        }
    }
}

impl fmt::Display for PassingDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PassError {
    #[error("exactly 3 cards must be passed, got {0}")]
    WrongCount(usize),
    #[error("{0} was picked more than once")]
    Duplicate(Card),
    #[error("{0} is not in the hand")]
    CardNotInHand(Card),
}

/// Checks a proposed pass: three distinct cards, all held.
pub fn validate_pass(hand: &Hand, cards: &[Card]) -> Result<[Card; 3], PassError> {
    let picked: [Card; 3] = cards
        .try_into()
        .map_err(|_| PassError::WrongCount(cards.len()))?;

    for (idx, card) in picked.iter().enumerate() {
        if picked[..idx].contains(card) {
            return Err(PassError::Duplicate(*card));
        }
        if !hand.contains(*card) {
            return Err(PassError::CardNotInHand(*card));
        }
    }
    Ok(picked)
}

/// Collects every seat's pass before any card changes hands.
#[derive(Debug, Clone)]
pub struct PassingState {
    direction: PassingDirection,
    submissions: [Option<[Card; 3]>; 4],
}

impl PassingState {
    pub fn new(direction: PassingDirection) -> Self {
        Self {
            direction,
            submissions: array::from_fn(|_| None),
        }
    }

    pub fn submit(&mut self, seat: PlayerPosition, cards: [Card; 3]) {
        self.submissions[seat.index()] = Some(cards);
    }

    pub fn is_complete(&self) -> bool {
        self.submissions
            .iter()
            .all(|submission| submission.is_some())
    }

    /// One batched update moving every submitted card to its recipient.
    pub fn to_updates(&self) -> HandUpdates {
        PlayerPosition::LOOP
            .iter()
            .copied()
            .fold(HandUpdates::new(), |updates, seat| {
                match self.submissions[seat.index()] {
                    Some(cards) => updates
                        .remove(seat, cards)
                        .add(self.direction.target(seat), cards),
                    None => updates,
                }
            })
    }
}

#[cfg(test)]
mod tests {
    use super::{PassError, PassingDirection, PassingState, validate_pass};
    use crate::model::card::Card;
    use crate::model::hand::Hand;
    use crate::model::player::PlayerPosition;
    use crate::model::rank::Rank;
    use crate::model::suit::Suit;

    #[test]
    fn direction_repeats_every_three_rounds() {
        assert_eq!(PassingDirection::for_round(0), PassingDirection::Left);
        assert_eq!(PassingDirection::for_round(1), PassingDirection::Across);
        assert_eq!(PassingDirection::for_round(2), PassingDirection::Right);
        for round in 0..12 {
            assert_eq!(
                PassingDirection::for_round(round),
                PassingDirection::for_round(round + 3)
            );
        }
    }

    #[test]
    fn target_follows_round_formula() {
        for round in 0..3u32 {
            let direction = PassingDirection::for_round(round);
            for seat in PlayerPosition::LOOP {
                let expected = (seat.index() + 1 + (round as usize % 3)) % 4;
                assert_eq!(direction.target(seat).index(), expected);
            }
        }
        assert_eq!(
            PassingDirection::Right.target(PlayerPosition::North),
            PlayerPosition::West
        );
    }

    #[test]
    fn nobody_passes_to_themselves() {
        for direction in PassingDirection::CYCLE {
            let recipients = direction.recipients();
            for seat in PlayerPosition::LOOP {
                assert_ne!(recipients[seat.index()], seat);
            }
        }
    }

    #[test]
    fn validate_pass_checks_count_duplicates_and_membership() {
        let hand = Hand::with_cards(vec![
            Card::new(Rank::Two, Suit::Clubs),
            Card::new(Rank::Three, Suit::Clubs),
            Card::new(Rank::Four, Suit::Clubs),
            Card::new(Rank::Ace, Suit::Hearts),
        ]);
        let two = Card::new(Rank::Two, Suit::Clubs);
        let three = Card::new(Rank::Three, Suit::Clubs);
        let ace = Card::new(Rank::Ace, Suit::Hearts);
        let stranger = Card::new(Rank::King, Suit::Spades);

        assert_eq!(validate_pass(&hand, &[two, three, ace]), Ok([two, three, ace]));
        assert_eq!(validate_pass(&hand, &[two, three]), Err(PassError::WrongCount(2)));
        assert_eq!(validate_pass(&hand, &[two, two, ace]), Err(PassError::Duplicate(two)));
        assert_eq!(
            validate_pass(&hand, &[two, stranger, ace]),
            Err(PassError::CardNotInHand(stranger))
        );
    }

    #[test]
    fn updates_route_cards_to_recipients() {
        let mut state = PassingState::new(PassingDirection::Across);
        let cards = [
            Card::new(Rank::Two, Suit::Clubs),
            Card::new(Rank::Three, Suit::Clubs),
            Card::new(Rank::Four, Suit::Clubs),
        ];
        state.submit(PlayerPosition::East, cards);
        assert!(!state.is_complete());

        let updates = state.to_updates();
        assert_eq!(updates.for_seat(PlayerPosition::East).removed, cards.to_vec());
        assert_eq!(updates.for_seat(PlayerPosition::West).added, cards.to_vec());
        assert!(updates.for_seat(PlayerPosition::North).added.is_empty());
    }
}
