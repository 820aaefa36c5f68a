//! Pure rule engine: which cards may be played, who takes a finished trick,
//! and whether somebody shot the moon.

use crate::model::card::{Card, TOTAL_PENALTY};
use crate::model::hand::Hand;
use crate::model::player::PlayerPosition;
use crate::model::round::Round;
use crate::model::table::Table;
use crate::model::trick::Trick;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    #[error("trick has {0} of 4 cards and cannot be resolved")]
    IncompleteTrick(usize),
}

/// Result of closing a trick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrickOutcome {
    pub winner: PlayerPosition,
    pub trick: Trick,
    pub points: u8,
}

/// Legal subset of `hand` for the seat on move. Never empty for a non-empty hand.
///
/// Holding the Two of Clubs forces it regardless of position in the trick.
/// Otherwise the lead suit must be followed when possible. A seat that cannot
/// follow, or is leading, sheds penalty cards on the first trick only when it
/// has nothing else, and may lead hearts before they are broken only when it
/// holds nothing but hearts.
pub fn legal_plays(hand: &Hand, round: &Round) -> Vec<Card> {
    if let Some(&two) = hand.iter().find(|card| card.is_two_of_clubs()) {
        return vec![two];
    }

    let trick = round.current_trick();
    if let Some(suit) = trick.lead_suit().filter(|&suit| hand.has_suit(suit)) {
        return hand.iter().copied().filter(|c| c.suit == suit).collect();
    }

    let mut candidates = hand.cards().to_vec();
    if round.is_first_trick() {
        candidates = retain_unless_empty(candidates, |card| !card.is_penalty());
    }
    if trick.is_empty() && !round.hearts_broken() {
        candidates = retain_unless_empty(candidates, |card| !card.suit.is_heart());
    }
    candidates
}

fn retain_unless_empty(cards: Vec<Card>, keep: impl Fn(&Card) -> bool) -> Vec<Card> {
    let kept: Vec<Card> = cards.iter().copied().filter(|card| keep(card)).collect();
    if kept.is_empty() { cards } else { kept }
}

/// Highest card of the lead suit. Off-suit cards never win.
pub fn trick_winner(trick: &Trick) -> Option<PlayerPosition> {
    let lead_suit = trick.lead_suit()?;
    trick
        .plays()
        .iter()
        .filter(|play| play.card.suit == lead_suit)
        .max_by_key(|play| play.card.rank)
        .map(|play| play.position)
}

/// Closes the current trick: the winner captures all four cards and leads next.
pub fn resolve_trick(round: &mut Round, table: &mut Table) -> Result<TrickOutcome, RuleError> {
    let trick = round.current_trick();
    if !trick.is_complete() {
        return Err(RuleError::IncompleteTrick(trick.len()));
    }
    let winner = trick_winner(trick).ok_or(RuleError::IncompleteTrick(0))?;

    let finished = round.complete_trick(winner);
    table.record_trick_capture(winner, finished.cards());
    Ok(TrickOutcome {
        winner,
        points: finished.penalty_total(),
        trick: finished,
    })
}

/// Seat holding every penalty card this round, if any.
pub fn detect_moonshot(table: &Table) -> Option<PlayerPosition> {
    PlayerPosition::LOOP
        .iter()
        .copied()
        .find(|seat| table.captured_points(*seat) == TOTAL_PENALTY)
}
