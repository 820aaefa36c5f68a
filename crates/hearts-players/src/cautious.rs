use async_trait::async_trait;
use hearts_engine::game::{PassContext, PlayContext, Strategy, StrategyError};
use hearts_engine::model::card::Card;
use hearts_engine::model::suit::Suit;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::{Level, event};

/// Always plays the safest-looking legal card and passes three random ones.
pub struct CautiousPlayer {
    rng: StdRng,
}

impl CautiousPlayer {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }

    /// First legal card of the lead suit, else the first that carries no
    /// points, else whatever comes first.
    pub fn choose_play(legal: &[Card], lead_suit: Option<Suit>) -> Option<Card> {
        legal
            .iter()
            .copied()
            .find(|card| Some(card.suit) == lead_suit)
            .or_else(|| legal.iter().copied().find(|card| !card.is_penalty()))
            .or_else(|| legal.first().copied())
    }
}

impl Default for CautiousPlayer {
    fn default() -> Self {
        Self::new(None)
    }
}

#[async_trait]
impl Strategy for CautiousPlayer {
    async fn pass_three_cards(&mut self, ctx: PassContext<'_>) -> Result<[Card; 3], StrategyError> {
        let picked: Vec<Card> = ctx
            .hand
            .cards()
            .choose_multiple(&mut self.rng, 3)
            .copied()
            .collect();
        picked.try_into().map_err(|short: Vec<Card>| {
            StrategyError::Backend(format!("hand holds only {} cards", short.len()))
        })
    }

    async fn select_card_for_trick(&mut self, ctx: PlayContext<'_>) -> Result<Card, StrategyError> {
        let card = Self::choose_play(ctx.legal, ctx.trick.lead_suit())
            .ok_or(StrategyError::NoLegalCards)?;
        event!(
            target: "hearts_players::cautious",
            Level::TRACE,
            seat = %ctx.seat,
            card = %card,
            legal = ctx.legal.len(),
            "cautious play"
        );
        Ok(card)
    }
}

#[cfg(test)]
mod tests {
    use super::CautiousPlayer;
    use hearts_engine::game::{PassContext, Strategy};
    use hearts_engine::model::card::Card;
    use hearts_engine::model::hand::Hand;
    use hearts_engine::model::passing::validate_pass;
    use hearts_engine::model::player::PlayerPosition;
    use hearts_engine::model::rank::Rank;
    use hearts_engine::model::suit::Suit;

    fn card(rank: Rank, suit: Suit) -> Card {
        Card::new(rank, suit)
    }

    #[test]
    fn follows_lead_suit_first() {
        let legal = [
            card(Rank::Ace, Suit::Hearts),
            card(Rank::Four, Suit::Spades),
            card(Rank::Nine, Suit::Hearts),
        ];
        assert_eq!(
            CautiousPlayer::choose_play(&legal, Some(Suit::Hearts)),
            Some(card(Rank::Ace, Suit::Hearts))
        );
    }

    #[test]
    fn sheds_pointless_cards_before_penalties() {
        let legal = [
            Card::QUEEN_OF_SPADES,
            card(Rank::Nine, Suit::Hearts),
            card(Rank::Four, Suit::Diamonds),
        ];
        assert_eq!(
            CautiousPlayer::choose_play(&legal, Some(Suit::Clubs)),
            Some(card(Rank::Four, Suit::Diamonds))
        );
        assert_eq!(
            CautiousPlayer::choose_play(&legal[..2], None),
            Some(Card::QUEEN_OF_SPADES)
        );
        assert_eq!(CautiousPlayer::choose_play(&[], None), None);
    }

    #[tokio::test]
    async fn passes_three_distinct_held_cards() {
        let hand = Hand::with_cards(
            Rank::ORDERED
                .iter()
                .map(|&rank| card(rank, Suit::Diamonds))
                .collect(),
        );
        let names = ["a", "b", "c", "d"];
        let mut player = CautiousPlayer::new(Some(4));
        let passed = player
            .pass_three_cards(PassContext {
                seat: PlayerPosition::North,
                name: names[0],
                hand: &hand,
                recipient: PlayerPosition::East,
                recipient_name: names[1],
                round_number: 0,
            })
            .await
            .unwrap();
        assert_eq!(validate_pass(&hand, &passed), Ok(passed));
    }
}
