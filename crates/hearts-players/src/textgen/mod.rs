//! Strategy that asks a text-generation service for its decisions.

mod client;

pub use client::{DEFAULT_ENDPOINT, DEFAULT_MODEL, OpenAiClient};

use async_trait::async_trait;
use hearts_engine::game::{PassContext, PlayContext, Strategy, StrategyError};
use hearts_engine::model::card::{Card, parse_card_list};
use hearts_engine::model::passing::validate_pass;
use std::time::Duration;
use thiserror::Error;
use tracing::{Level, event};

use crate::render;

#[derive(Debug, Error)]
pub enum TextGenError {
    #[error("environment variable {0} holding the API key is not set")]
    MissingApiKey(String),
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("reply contained no message")]
    EmptyReply,
}

/// A service that answers a prompt under a system prompt.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn respond(&self, system_prompt: &str, prompt: &str) -> Result<String, TextGenError>;
}

#[async_trait]
impl<G: TextGenerator + ?Sized> TextGenerator for std::sync::Arc<G> {
    async fn respond(&self, system_prompt: &str, prompt: &str) -> Result<String, TextGenError> {
        (**self).respond(system_prompt, prompt).await
    }
}

/// Trims whitespace and any quotes wrapped round the reply.
pub fn clean_reply(reply: &str) -> &str {
    reply.trim().trim_matches(|c| c == '"' || c == '\'').trim()
}

pub struct TextGenPlayer<G> {
    generator: G,
    system_prompt: String,
    count_cards: bool,
    retry_delay: Duration,
    max_attempts: Option<u32>,
}

impl<G: TextGenerator> TextGenPlayer<G> {
    pub fn new<S: AsRef<str>>(generator: G, name: &str, opponents: &[S]) -> Self {
        let opponents: Vec<&str> = opponents.iter().map(AsRef::as_ref).collect();
        Self {
            generator,
            system_prompt: format!(
                "Your name is {name} and you're playing a game of Hearts against {}.",
                opponents.join(", ")
            ),
            count_cards: false,
            retry_delay: Duration::from_secs(1),
            max_attempts: None,
        }
    }

    pub fn shoot_the_moon(mut self, enabled: bool) -> Self {
        if enabled {
            self.system_prompt.push_str("\nTry to shoot the moon!");
        }
        self
    }

    /// Includes every captured pile in the play prompt.
    pub fn count_cards(mut self, enabled: bool) -> Self {
        self.count_cards = enabled;
        self
    }

    /// Pause between rejected replies and an optional cap on attempts.
    /// `None` (or `Some(0)`) keeps asking until a reply is valid.
    pub fn retry(mut self, delay: Duration, max_attempts: Option<u32>) -> Self {
        self.retry_delay = delay;
        self.max_attempts = max_attempts.filter(|&limit| limit > 0);
        self
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    pub fn pass_prompt(ctx: &PassContext<'_>) -> String {
        format!(
            "Choose 3 cards to pass to {}. Your hand: {}. Reply ONLY with a list of cards to pass like: '♦10,♣2,♥A'.",
            ctx.recipient_name,
            render::card_list(ctx.hand.cards()),
        )
    }

    pub fn play_prompt(&self, ctx: &PlayContext<'_>) -> String {
        let mut prompt = format!(
            "Choose a card to play in current trick. The trick so far: {}. Your hand: {}. Cards you can legally play: {}\n",
            render::trick(ctx.trick, ctx.names),
            render::card_list(ctx.hand.cards()),
            render::card_list(ctx.legal),
        );
        if self.count_cards {
            prompt.push_str(&format!(
                "You have been counting cards that have been taken so far, use this to your advantage: {}.\n",
                render::captured(ctx.captured, ctx.names)
            ));
        }
        prompt.push_str("Reply ONLY with a card that's LEGAL to play in the format: '♣J'.");
        prompt
    }

    /// Sends `prompt` until `accept` takes the reply. Gives up only when a
    /// cap is set and reached.
    async fn negotiate<T, F>(&self, prompt: &str, mut accept: F) -> Result<T, StrategyError>
    where
        F: FnMut(&str) -> Result<T, String> + Send,
        T: Send,
    {
        let mut attempt: u32 = 0;
        loop {
            attempt = attempt.saturating_add(1);
            let reason = match self.generator.respond(&self.system_prompt, prompt).await {
                Ok(reply) => match accept(clean_reply(&reply)) {
                    Ok(value) => return Ok(value),
                    Err(reason) => reason,
                },
                Err(err) => err.to_string(),
            };
            event!(
                target: "hearts_players::textgen",
                Level::WARN,
                attempt,
                max_attempts = ?self.max_attempts,
                %reason,
                "reply rejected, trying again"
            );
            if let Some(limit) = self.max_attempts.filter(|&limit| attempt >= limit) {
                return Err(StrategyError::Exhausted { attempts: limit });
            }
            if !self.retry_delay.is_zero() {
                tokio::time::sleep(self.retry_delay).await;
            }
        }
    }
}

#[async_trait]
impl<G: TextGenerator> Strategy for TextGenPlayer<G> {
    async fn pass_three_cards(&mut self, ctx: PassContext<'_>) -> Result<[Card; 3], StrategyError> {
        let prompt = Self::pass_prompt(&ctx);
        let hand = ctx.hand;
        self.negotiate(&prompt, |reply| {
            let cards = parse_card_list(reply).map_err(|err| err.to_string())?;
            validate_pass(hand, &cards).map_err(|err| err.to_string())
        })
        .await
    }

    async fn select_card_for_trick(&mut self, ctx: PlayContext<'_>) -> Result<Card, StrategyError> {
        let prompt = self.play_prompt(&ctx);
        let legal = ctx.legal;
        self.negotiate(&prompt, |reply| {
            let card = reply.parse::<Card>().map_err(|err| err.to_string())?;
            if legal.contains(&card) {
                Ok(card)
            } else {
                Err(format!("{} is not a legal play", card.symbolic()))
            }
        })
        .await
    }
}
