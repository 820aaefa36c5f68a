use crate::model::card::Card;
use crate::model::deck::Deck;
use crate::model::hand::Hand;
use crate::model::player::PlayerPosition;
use rand::Rng;
use std::array;
use thiserror::Error;

/// Card custody for one deal: the undealt deck, each seat's hand and each
/// seat's pile of cards won in tricks.
#[derive(Debug, Clone, Default)]
pub struct Table {
    deck: Deck,
    hands: [Hand; 4],
    captured: [Vec<Card>; 4],
}

/// Cards to add to and remove from one seat's hand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HandUpdate {
    pub added: Vec<Card>,
    pub removed: Vec<Card>,
}

/// A batch of hand changes applied all at once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HandUpdates {
    per_seat: [HandUpdate; 4],
}

impl HandUpdates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(mut self, seat: PlayerPosition, cards: impl IntoIterator<Item = Card>) -> Self {
        self.per_seat[seat.index()].added.extend(cards);
        self
    }

    pub fn remove(mut self, seat: PlayerPosition, cards: impl IntoIterator<Item = Card>) -> Self {
        self.per_seat[seat.index()].removed.extend(cards);
        self
    }

    pub fn for_seat(&self, seat: PlayerPosition) -> &HandUpdate {
        &self.per_seat[seat.index()]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("cannot deal {requested} cards, only {remaining} left in the deck")]
    InsufficientCards { requested: usize, remaining: usize },
    #[error("{card} is not in {seat}'s hand")]
    CardNotInHand { seat: PlayerPosition, card: Card },
    #[error("{0} is not in the deck")]
    NotInDeck(Card),
}

impl Table {
    pub fn new() -> Self {
        Self {
            deck: Deck::standard(),
            hands: array::from_fn(|_| Hand::new()),
            captured: array::from_fn(|_| Vec::new()),
        }
    }

    /// Moves `n` random cards from the deck into `seat`'s hand.
    pub fn deal<R: Rng + ?Sized>(
        &mut self,
        n: usize,
        seat: PlayerPosition,
        rng: &mut R,
    ) -> Result<(), TableError> {
        let cards = self.deck.draw_random(n, rng)?;
        self.hands[seat.index()].extend(cards);
        Ok(())
    }

    /// Deals exactly `cards` to `seat`. Each must still be in the deck; on
    /// failure nothing is dealt.
    pub fn deal_cards(&mut self, seat: PlayerPosition, cards: &[Card]) -> Result<(), TableError> {
        let mut deck = self.deck.clone();
        for &card in cards {
            if !deck.take(card) {
                return Err(TableError::NotInDeck(card));
            }
        }
        self.deck = deck;
        self.hands[seat.index()].extend(cards.iter().copied());
        Ok(())
    }

    /// Applies every seat's additions, then its removals. Nothing changes if
    /// any removal names a card the seat does not hold.
    pub fn apply_hand_updates(&mut self, updates: &HandUpdates) -> Result<(), TableError> {
        let mut staged = self.hands.clone();
        for seat in PlayerPosition::LOOP {
            let update = updates.for_seat(seat);
            let hand = &mut staged[seat.index()];
            hand.extend(update.added.iter().copied());
            for card in &update.removed {
                if !hand.remove(*card) {
                    return Err(TableError::CardNotInHand { seat, card: *card });
                }
            }
        }
        self.hands = staged;
        Ok(())
    }

    pub fn record_trick_capture(&mut self, seat: PlayerPosition, cards: impl IntoIterator<Item = Card>) {
        self.captured[seat.index()].extend(cards);
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn hand(&self, seat: PlayerPosition) -> &Hand {
        &self.hands[seat.index()]
    }

    pub fn hands(&self) -> &[Hand; 4] {
        &self.hands
    }

    pub fn captured(&self, seat: PlayerPosition) -> &[Card] {
        &self.captured[seat.index()]
    }

    pub fn captured_piles(&self) -> &[Vec<Card>; 4] {
        &self.captured
    }

    /// Penalty points in `seat`'s captured pile.
    pub fn captured_points(&self, seat: PlayerPosition) -> u8 {
        self.captured[seat.index()]
            .iter()
            .map(|card| card.penalty_value())
            .sum()
    }

    pub fn captured_points_by_seat(&self) -> [u8; 4] {
        array::from_fn(|idx| {
            PlayerPosition::from_index(idx)
                .map(|seat| self.captured_points(seat))
                .unwrap_or_default()
        })
    }

    pub fn holder_of(&self, card: Card) -> Option<PlayerPosition> {
        PlayerPosition::LOOP
            .iter()
            .copied()
            .find(|seat| self.hands[seat.index()].contains(card))
    }

    pub fn all_hands_empty(&self) -> bool {
        self.hands.iter().all(Hand::is_empty)
    }
}
