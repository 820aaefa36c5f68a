use std::sync::Arc;
use std::time::Duration;

use hearts_engine::game::Strategy;
use hearts_engine::model::player::PlayerPosition;
use hearts_players::{CautiousPlayer, ConsolePlayer, OpenAiClient, Paced, Shared, TextGenPlayer};
use tokio::io::{BufReader, Stdin, Stdout};
use thiserror::Error;

use crate::config::{PlayerKind, TableConfig, ValidationError};

#[derive(Debug, Error)]
pub enum SetupError {
    #[error(transparent)]
    Config(#[from] ValidationError),
    #[error("text generation setup failed: {0}")]
    TextGen(#[from] hearts_players::TextGenError),
}

/// Builds strategies for one game from a validated config.
pub struct Seating {
    client: Option<Arc<OpenAiClient>>,
    console: Option<Shared<ConsolePlayer<BufReader<Stdin>, Stdout>>>,
}

impl Seating {
    /// Resolves the API client once, only when a `text_gen` seat needs it.
    /// The console player is also built once so stdin is read through a
    /// single buffer for every game.
    pub fn prepare(config: &TableConfig) -> Result<Self, SetupError> {
        let needs_client = config
            .players
            .iter()
            .any(|p| p.kind == PlayerKind::TextGen);
        let client = if needs_client {
            let client = OpenAiClient::from_env(&config.text_gen.api_key_env)?
                .with_endpoint(config.text_gen.endpoint.clone())
                .with_model(config.text_gen.model.clone());
            Some(Arc::new(client))
        } else {
            None
        };
        let console = Self::console_seat(config).map(|_| Shared::new(ConsolePlayer::stdio()));
        Ok(Self { client, console })
    }

    /// Seat where a console player sits, if any. That seat's hand is shown.
    pub fn console_seat(config: &TableConfig) -> Option<PlayerPosition> {
        config
            .players
            .iter()
            .position(|p| p.kind == PlayerKind::Console)
            .and_then(PlayerPosition::from_index)
    }

    /// `game_seed` makes cautious seats reproducible alongside the deal.
    pub fn strategies(
        &self,
        config: &TableConfig,
        game_seed: u64,
    ) -> Result<[Box<dyn Strategy>; 4], SetupError> {
        let delay = Duration::from_millis(config.delay_ms);
        let names = config.names();
        let mut seats: Vec<Box<dyn Strategy>> = Vec::with_capacity(4);

        for (index, player) in config.players.iter().enumerate() {
            let strategy: Box<dyn Strategy> = match player.kind {
                PlayerKind::Cautious => {
                    let seed = game_seed.wrapping_add(index as u64 + 1);
                    Box::new(Paced::new(CautiousPlayer::new(Some(seed)), delay))
                }
                PlayerKind::Console => match self.console.clone() {
                    Some(console) => Box::new(console),
                    None => Box::new(Shared::new(ConsolePlayer::stdio())),
                },
                PlayerKind::TextGen => {
                    let params = player.text_gen_params()?;
                    let client = self.client.clone().ok_or_else(|| {
                        hearts_players::TextGenError::MissingApiKey(
                            config.text_gen.api_key_env.clone(),
                        )
                    })?;
                    let opponents: Vec<&String> =
                        names.iter().filter(|name| **name != player.name).collect();
                    let ai = TextGenPlayer::new(client, &player.name, &opponents)
                        .shoot_the_moon(params.shoot_the_moon)
                        .count_cards(params.count_cards)
                        .retry(
                            Duration::from_millis(config.text_gen.retry_ms),
                            config.text_gen.attempt_limit(),
                        );
                    Box::new(Paced::new(ai, delay))
                }
            };
            seats.push(strategy);
        }

        seats.try_into().map_err(|seats: Vec<Box<dyn Strategy>>| {
            SetupError::Config(ValidationError::InvalidField {
                field: "players".to_string(),
                message: format!("exactly four players are required, found {}", seats.len()),
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::Seating;
    use crate::config::{PlayerKind, TableConfig};
    use hearts_engine::model::player::PlayerPosition;

    #[test]
    fn default_table_needs_no_client() {
        let config = TableConfig::default_table();
        let seating = Seating::prepare(&config).expect("no api key needed");
        assert!(seating.client.is_none());
        assert_eq!(Seating::console_seat(&config), None);
        assert!(seating.strategies(&config, 1).is_ok());
    }

    #[test]
    fn console_seat_follows_list_order() {
        let mut config = TableConfig::default_table();
        config.players[2].kind = PlayerKind::Console;
        assert_eq!(Seating::console_seat(&config), Some(PlayerPosition::South));
    }

    #[test]
    fn console_player_is_built_once() {
        let mut config = TableConfig::default_table();
        config.players[0].kind = PlayerKind::Console;
        let seating = Seating::prepare(&config).expect("no api key needed");
        assert!(seating.console.is_some());
        assert!(seating.strategies(&config, 1).is_ok());
        assert!(seating.strategies(&config, 2).is_ok());
    }

    #[test]
    fn text_gen_without_key_fails_early() {
        let mut config = TableConfig::default_table();
        config.players[1].kind = PlayerKind::TextGen;
        config.text_gen.api_key_env = "HEARTS_TABLE_TEST_KEY_NEVER_SET".to_string();
        let err = Seating::prepare(&config).err().expect("missing key");
        assert!(err.to_string().contains("HEARTS_TABLE_TEST_KEY_NEVER_SET"));
    }
}
