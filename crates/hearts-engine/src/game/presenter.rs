use crate::game::history::RoundRecord;
use crate::model::card::Card;
use crate::model::player::PlayerPosition;
use crate::model::score::ScoreBoard;
use crate::model::table::Table;
use crate::rules::TrickOutcome;

/// Display sink. The game reports state changes here and never reads anything back.
pub trait Presenter: Send {
    fn hands(&mut self, _table: &Table) {}

    fn card_played(&mut self, _seat: PlayerPosition, _card: Card) {}

    fn nametags(&mut self, _names: &[String; 4], _scores: &ScoreBoard, _round_points: [u8; 4]) {}

    fn trick_cleared(&mut self, _outcome: &TrickOutcome) {}

    fn round_finished(&mut self, _record: &RoundRecord) {}

    fn status(&mut self, _text: &str) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NullPresenter;

impl Presenter for NullPresenter {}
