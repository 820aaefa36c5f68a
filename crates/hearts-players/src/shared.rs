use async_trait::async_trait;
use hearts_engine::game::{PassContext, PlayContext, Strategy, StrategyError};
use hearts_engine::model::card::Card;
use std::sync::Arc;
use tokio::sync::Mutex;

/// One strategy seated in several games in turn. Clones share the inner
/// strategy, so state such as buffered console input survives between games.
pub struct Shared<S> {
    inner: Arc<Mutex<S>>,
}

impl<S> Shared<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner: Arc::new(Mutex::new(inner)),
        }
    }
}

impl<S> Clone for Shared<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[async_trait]
impl<S: Strategy> Strategy for Shared<S> {
    async fn pass_three_cards(&mut self, ctx: PassContext<'_>) -> Result<[Card; 3], StrategyError> {
        self.inner.lock().await.pass_three_cards(ctx).await
    }

    async fn select_card_for_trick(&mut self, ctx: PlayContext<'_>) -> Result<Card, StrategyError> {
        self.inner.lock().await.select_card_for_trick(ctx).await
    }
}

#[cfg(test)]
mod tests {
    use super::Shared;
    use crate::console::ConsolePlayer;
    use hearts_engine::game::{PassContext, Strategy};
    use hearts_engine::model::card::Card;
    use hearts_engine::model::hand::Hand;
    use hearts_engine::model::player::PlayerPosition;
    use hearts_engine::model::rank::Rank;
    use hearts_engine::model::suit::Suit;
    use tokio::io::BufReader;

    #[tokio::test]
    async fn clones_read_from_the_same_input() {
        let input = "2C,3C,4C\n5C,6C,7C\n";
        let console = ConsolePlayer::new(BufReader::new(input.as_bytes()), Vec::<u8>::new());
        let mut first_game = Shared::new(console);
        let mut second_game = first_game.clone();

        let hand = Hand::with_cards(
            [Rank::Two, Rank::Three, Rank::Four, Rank::Five, Rank::Six, Rank::Seven]
                .map(|rank| Card::new(rank, Suit::Clubs))
                .to_vec(),
        );
        let ctx = PassContext {
            seat: PlayerPosition::South,
            name: "Dorothy",
            hand: &hand,
            recipient: PlayerPosition::West,
            recipient_name: "Sophia",
            round_number: 0,
        };

        let first = first_game.pass_three_cards(ctx).await.unwrap();
        drop(first_game);
        let second = second_game.pass_three_cards(ctx).await.unwrap();

        assert_eq!(first[0], Card::TWO_OF_CLUBS);
        assert_eq!(second[0], Card::new(Rank::Five, Suit::Clubs));
    }
}
