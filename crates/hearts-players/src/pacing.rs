use async_trait::async_trait;
use hearts_engine::game::{PassContext, PlayContext, Strategy, StrategyError};
use hearts_engine::model::card::Card;
use std::time::Duration;

/// Holds each card decision back by a fixed delay so a watcher can follow the trick.
pub struct Paced<S> {
    inner: S,
    delay: Duration,
}

impl<S> Paced<S> {
    pub fn new(inner: S, delay: Duration) -> Self {
        Self { inner, delay }
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

#[async_trait]
impl<S: Strategy> Strategy for Paced<S> {
    async fn pass_three_cards(&mut self, ctx: PassContext<'_>) -> Result<[Card; 3], StrategyError> {
        self.inner.pass_three_cards(ctx).await
    }

    async fn select_card_for_trick(&mut self, ctx: PlayContext<'_>) -> Result<Card, StrategyError> {
        let card = self.inner.select_card_for_trick(ctx).await?;
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(card)
    }
}

#[cfg(test)]
mod tests {
    use super::Paced;
    use crate::cautious::CautiousPlayer;
    use hearts_engine::game::{PlayContext, Strategy};
    use hearts_engine::model::card::Card;
    use hearts_engine::model::hand::Hand;
    use hearts_engine::model::player::PlayerPosition;
    use hearts_engine::model::trick::Trick;
    use std::time::Duration;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn waits_after_choosing_a_card() {
        let mut player = Paced::new(CautiousPlayer::new(Some(1)), Duration::from_millis(1_000));
        let hand = Hand::with_cards(vec![Card::TWO_OF_CLUBS]);
        let names = ["a", "b", "c", "d"].map(String::from);
        let piles: [Vec<Card>; 4] = Default::default();
        let trick = Trick::new(PlayerPosition::North);
        let legal = [Card::TWO_OF_CLUBS];

        let started = Instant::now();
        let card = player
            .select_card_for_trick(PlayContext {
                seat: PlayerPosition::North,
                names: &names,
                hand: &hand,
                legal: &legal,
                trick: &trick,
                captured: &piles,
                trick_index: 0,
                hearts_broken: false,
            })
            .await
            .unwrap();

        assert_eq!(card, Card::TWO_OF_CLUBS);
        assert!(started.elapsed() >= Duration::from_millis(1_000));
    }
}
