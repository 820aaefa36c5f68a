use crate::game::config::MatchConfig;
use crate::game::history::{MatchOutcome, RoundRecord, TrickRecord};
use crate::game::presenter::Presenter;
use crate::game::strategy::{PassContext, PlayContext, Strategy, StrategyError};
use crate::model::card::Card;
use crate::model::passing::PassingState;
use crate::model::player::PlayerPosition;
use crate::model::round::Round;
use crate::model::score::ScoreBoard;
use crate::model::table::{HandUpdates, Table, TableError};
use crate::model::trick::TrickError;
use crate::rules::{self, RuleError};
use rand::SeedableRng;
use rand::rngs::StdRng;
use thiserror::Error;
use tracing::{Level, event};

const CARDS_PER_HAND: usize = 13;

/// Anything that stops a match. None of these are recoverable mid-round.
#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    Table(#[from] TableError),
    #[error(transparent)]
    Trick(#[from] TrickError),
    #[error(transparent)]
    Rule(#[from] RuleError),
    #[error("{seat} strategy failed: {source}")]
    Strategy {
        seat: PlayerPosition,
        #[source]
        source: StrategyError,
    },
    #[error("{seat} played {card}, which is not a legal play")]
    IllegalPlay { seat: PlayerPosition, card: Card },
    #[error("{0} is on move with an empty hand")]
    EmptyHand(PlayerPosition),
    #[error("nobody holds the two of clubs after passing")]
    MissingTwoOfClubs,
}

/// One match: seating, strategies, cumulative scores and the archive of
/// finished rounds. Every round gets a fresh `Round` and `Table`.
pub struct Game {
    config: MatchConfig,
    strategies: [Box<dyn Strategy>; 4],
    presenter: Box<dyn Presenter>,
    scores: ScoreBoard,
    next_round: u32,
    history: Vec<RoundRecord>,
    rng: StdRng,
    seed: u64,
}

impl Game {
    pub fn new(
        config: MatchConfig,
        strategies: [Box<dyn Strategy>; 4],
        presenter: Box<dyn Presenter>,
    ) -> Self {
        let seed = config.seed().unwrap_or_else(rand::random);
        Self {
            config,
            strategies,
            presenter,
            scores: ScoreBoard::new(),
            next_round: 0,
            history: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn scores(&self) -> &ScoreBoard {
        &self.scores
    }

    pub fn history(&self) -> &[RoundRecord] {
        &self.history
    }

    pub fn names(&self) -> &[String; 4] {
        self.config.names()
    }

    pub fn is_finished(&self) -> bool {
        self.scores.match_winner().is_some()
    }

    /// Plays rounds until one player has reached the threshold and the
    /// lowest total is unique.
    pub async fn play(&mut self) -> Result<MatchOutcome, GameError> {
        event!(
            target: "hearts_engine::game",
            Level::INFO,
            seed = self.seed,
            players = ?self.config.names(),
            "starting match"
        );

        loop {
            if let Some(winner) = self.scores.match_winner() {
                let outcome = MatchOutcome {
                    winner,
                    winner_name: self.config.name(winner).to_string(),
                    scores: self.scores,
                    rounds: self.history.len(),
                };
                event!(
                    target: "hearts_engine::game",
                    Level::INFO,
                    winner = %outcome.winner_name,
                    scores = ?self.scores.standings(),
                    rounds = outcome.rounds,
                    "game over"
                );
                self.presenter.status("Game over!");
                return Ok(outcome);
            }
            self.play_round().await?;
        }
    }

    /// Deal, pass, play thirteen tricks and score one round.
    pub async fn play_round(&mut self) -> Result<RoundRecord, GameError> {
        let mut table = Table::new();
        for seat in PlayerPosition::LOOP {
            table.deal(CARDS_PER_HAND, seat, &mut self.rng)?;
        }
        self.run_round(table).await
    }

    /// Same as [`Game::play_round`] but with the hands given instead of
    /// shuffled. The four hands must be disjoint.
    pub async fn play_round_with_deal(
        &mut self,
        hands: [Vec<Card>; 4],
    ) -> Result<RoundRecord, GameError> {
        let mut table = Table::new();
        for seat in PlayerPosition::LOOP {
            table.deal_cards(seat, &hands[seat.index()])?;
        }
        self.run_round(table).await
    }

    async fn run_round(&mut self, mut table: Table) -> Result<RoundRecord, GameError> {
        let mut round = Round::new(self.next_round);
        let names = self.config.names();

        self.presenter.nametags(names, &self.scores, [0; 4]);
        event!(
            target: "hearts_engine::game",
            Level::INFO,
            round = round.number(),
            scores = ?self.scores.standings(),
            passing = %round.passing_direction(),
            "starting round"
        );

        round.begin_passing();
        self.presenter.hands(&table);

        let mut passing = PassingState::new(round.passing_direction());
        for seat in PlayerPosition::LOOP {
            let recipient = round.pass_recipient(seat);
            let ctx = PassContext {
                seat,
                name: &names[seat.index()],
                hand: table.hand(seat),
                recipient,
                recipient_name: &names[recipient.index()],
                round_number: round.number(),
            };
            let cards = self.strategies[seat.index()]
                .pass_three_cards(ctx)
                .await
                .map_err(|source| GameError::Strategy { seat, source })?;
            event!(
                target: "hearts_engine::game",
                Level::DEBUG,
                player = %names[seat.index()],
                recipient = %names[recipient.index()],
                cards = ?cards.map(|card| card.to_string()),
                "passed cards"
            );
            passing.submit(seat, cards);
        }
        table.apply_hand_updates(&passing.to_updates())?;

        let leader = table
            .holder_of(Card::TWO_OF_CLUBS)
            .ok_or(GameError::MissingTwoOfClubs)?;
        round.begin_play(leader);
        self.presenter.hands(&table);

        let mut tricks = Vec::with_capacity(CARDS_PER_HAND);
        while !table.all_hands_empty() {
            self.presenter
                .nametags(names, &self.scores, table.captured_points_by_seat());
            event!(
                target: "hearts_engine::game",
                Level::DEBUG,
                trick = round.trick_index(),
                leader = %names[round.leads_trick().index()],
                "starting trick"
            );

            for _ in 0..4 {
                let seat = round.whose_move();
                let hand = table.hand(seat);
                let legal = rules::legal_plays(hand, &round);
                if legal.is_empty() {
                    return Err(GameError::EmptyHand(seat));
                }

                let ctx = PlayContext {
                    seat,
                    names,
                    hand,
                    legal: &legal,
                    trick: round.current_trick(),
                    captured: table.captured_piles(),
                    trick_index: round.trick_index(),
                    hearts_broken: round.hearts_broken(),
                };
                let card = self.strategies[seat.index()]
                    .select_card_for_trick(ctx)
                    .await
                    .map_err(|source| GameError::Strategy { seat, source })?;
                if !legal.contains(&card) {
                    return Err(GameError::IllegalPlay { seat, card });
                }

                table.apply_hand_updates(&HandUpdates::new().remove(seat, [card]))?;
                round.record_play(seat, card)?;
                self.presenter.hands(&table);
                self.presenter.card_played(seat, card);
            }

            let outcome = rules::resolve_trick(&mut round, &mut table)?;
            event!(
                target: "hearts_engine::game",
                Level::INFO,
                trick = round.trick_index() - 1,
                cards = %outcome.trick,
                taken_by = %names[outcome.winner.index()],
                points = outcome.points,
                "trick taken"
            );
            self.presenter.trick_cleared(&outcome);
            tricks.push(TrickRecord::from(&outcome));
        }

        let moonshot = rules::detect_moonshot(&table);
        if let Some(shooter) = moonshot {
            event!(
                target: "hearts_engine::game",
                Level::INFO,
                player = %names[shooter.index()],
                "shot the moon, adding 26 to everyone else"
            );
        }
        let captured_points = table.captured_points_by_seat();
        let deltas = self.scores.apply_round(captured_points, moonshot);
        round.finish(moonshot);

        let record = RoundRecord {
            round: round.number(),
            passing_direction: round.passing_direction(),
            tricks,
            captured_points,
            moonshot,
            deltas,
            scores: *self.scores.standings(),
        };
        event!(
            target: "hearts_engine::game",
            Level::INFO,
            round = record.round,
            scores = ?record.scores,
            "round over"
        );

        self.presenter.round_finished(&record);
        self.history.push(record.clone());
        self.next_round += 1;
        Ok(record)
    }
}
