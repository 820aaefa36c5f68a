use crate::model::card::Card;
use crate::model::rank::Rank;
use crate::model::suit::Suit;
use crate::model::table::TableError;
use rand::Rng;
use rand::seq::index;

/// Undealt cards. Starts full and only ever shrinks.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    pub fn standard() -> Self {
        let mut cards = Vec::with_capacity(52);
        for suit in Suit::ALL.iter().copied() {
            for rank in Rank::ORDERED.iter().copied() {
                cards.push(Card::new(rank, suit));
            }
        }
        Self { cards }
    }

    /// Removes `n` cards chosen uniformly at random, without replacement.
    pub fn draw_random<R: Rng + ?Sized>(
        &mut self,
        n: usize,
        rng: &mut R,
    ) -> Result<Vec<Card>, TableError> {
        if n > self.cards.len() {
            return Err(TableError::InsufficientCards {
                requested: n,
                remaining: self.cards.len(),
            });
        }

        let mut picked = index::sample(rng, self.cards.len(), n).into_vec();
        let drawn: Vec<Card> = picked.iter().map(|&idx| self.cards[idx]).collect();

        picked.sort_unstable_by(|a, b| b.cmp(a));
        for idx in picked {
            self.cards.remove(idx);
        }
        Ok(drawn)
    }

    /// Removes one specific card. False when it was already dealt.
    pub fn take(&mut self, card: Card) -> bool {
        match self.cards.iter().position(|&c| c == card) {
            Some(idx) => {
                self.cards.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::standard()
    }
}
