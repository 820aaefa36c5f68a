use crate::model::card::Card;
use crate::model::hand::Hand;
use crate::model::player::PlayerPosition;
use crate::model::trick::Trick;
use async_trait::async_trait;
use thiserror::Error;

/// What a seat sees when asked for its three passing cards.
#[derive(Debug, Clone, Copy)]
pub struct PassContext<'a> {
    pub seat: PlayerPosition,
    pub name: &'a str,
    pub hand: &'a Hand,
    pub recipient: PlayerPosition,
    pub recipient_name: &'a str,
    pub round_number: u32,
}

/// What a seat sees when it is on move.
#[derive(Debug, Clone, Copy)]
pub struct PlayContext<'a> {
    pub seat: PlayerPosition,
    pub names: &'a [String; 4],
    pub hand: &'a Hand,
    pub legal: &'a [Card],
    pub trick: &'a Trick,
    pub captured: &'a [Vec<Card>; 4],
    pub trick_index: usize,
    pub hearts_broken: bool,
}

#[derive(Debug, Error)]
pub enum StrategyError {
    #[error("input closed before a decision was made")]
    InputClosed,
    #[error("no legal card was offered")]
    NoLegalCards,
    #[error("no valid decision after {attempts} attempts")]
    Exhausted { attempts: u32 },
    #[error("decision backend failed: {0}")]
    Backend(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Decision maker for one seat. Implementations validate their own input and
/// only return a pass of three distinct held cards and a card from `legal`.
#[async_trait]
pub trait Strategy: Send {
    async fn pass_three_cards(&mut self, ctx: PassContext<'_>) -> Result<[Card; 3], StrategyError>;

    async fn select_card_for_trick(&mut self, ctx: PlayContext<'_>) -> Result<Card, StrategyError>;
}

#[async_trait]
impl<S: Strategy + ?Sized> Strategy for Box<S> {
    async fn pass_three_cards(&mut self, ctx: PassContext<'_>) -> Result<[Card; 3], StrategyError> {
        (**self).pass_three_cards(ctx).await
    }

    async fn select_card_for_trick(&mut self, ctx: PlayContext<'_>) -> Result<Card, StrategyError> {
        (**self).select_card_for_trick(ctx).await
    }
}
