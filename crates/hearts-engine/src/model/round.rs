use crate::model::card::Card;
use crate::model::passing::PassingDirection;
use crate::model::player::PlayerPosition;
use crate::model::trick::{Trick, TrickError};

pub const TRICKS_PER_ROUND: usize = 13;

/// Lifecycle of one deal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    Dealing,
    Passing,
    Playing,
    Scored,
}

/// Transient state of one deal: the trick in progress and the round-scoped flags.
#[derive(Debug, Clone)]
pub struct Round {
    number: u32,
    phase: RoundPhase,
    current_trick: Trick,
    trick_index: usize,
    leads_trick: PlayerPosition,
    hearts_broken: bool,
    passing_direction: PassingDirection,
    moonshot: Option<PlayerPosition>,
}

impl Round {
    pub fn new(number: u32) -> Self {
        Self {
            number,
            phase: RoundPhase::Dealing,
            current_trick: Trick::new(PlayerPosition::North),
            trick_index: 0,
            leads_trick: PlayerPosition::North,
            hearts_broken: false,
            passing_direction: PassingDirection::for_round(number),
            moonshot: None,
        }
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn passing_direction(&self) -> PassingDirection {
        self.passing_direction
    }

    pub fn pass_recipient(&self, seat: PlayerPosition) -> PlayerPosition {
        self.passing_direction.target(seat)
    }

    pub fn current_trick(&self) -> &Trick {
        &self.current_trick
    }

    pub fn trick_index(&self) -> usize {
        self.trick_index
    }

    pub fn is_first_trick(&self) -> bool {
        self.trick_index == 0
    }

    pub fn leads_trick(&self) -> PlayerPosition {
        self.leads_trick
    }

    pub fn hearts_broken(&self) -> bool {
        self.hearts_broken
    }

    pub fn moonshot(&self) -> Option<PlayerPosition> {
        self.moonshot
    }

    /// Seat on move: the leader advanced by the cards already in the trick.
    pub fn whose_move(&self) -> PlayerPosition {
        self.current_trick.expected_position()
    }

    /// Deal finished; cards may now be passed.
    pub fn begin_passing(&mut self) {
        self.phase = RoundPhase::Passing;
    }

    /// Passes applied; `leader` (the Two of Clubs holder) opens trick 0.
    pub fn begin_play(&mut self, leader: PlayerPosition) {
        self.phase = RoundPhase::Playing;
        self.set_leader(leader);
    }

    /// Appends a play to the current trick. Any heart breaks hearts for the rest of the round.
    pub fn record_play(&mut self, seat: PlayerPosition, card: Card) -> Result<(), TrickError> {
        self.current_trick.play(seat, card)?;
        if card.suit.is_heart() {
            self.hearts_broken = true;
        }
        Ok(())
    }

    /// Closes the current trick and hands the lead to `winner`. Returns the finished trick.
    pub fn complete_trick(&mut self, winner: PlayerPosition) -> Trick {
        let finished = std::mem::replace(&mut self.current_trick, Trick::new(winner));
        self.leads_trick = winner;
        self.trick_index += 1;
        finished
    }

    pub fn tricks_remaining(&self) -> usize {
        TRICKS_PER_ROUND.saturating_sub(self.trick_index)
    }

    pub fn finish(&mut self, moonshot: Option<PlayerPosition>) {
        self.moonshot = moonshot;
        self.phase = RoundPhase::Scored;
    }

    fn set_leader(&mut self, leader: PlayerPosition) {
        self.leads_trick = leader;
        self.current_trick = Trick::new(leader);
    }
}
