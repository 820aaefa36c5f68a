use std::io::{self, Write};

use hearts_engine::game::{Presenter, RoundRecord};
use hearts_engine::model::card::Card;
use hearts_engine::model::player::PlayerPosition;
use hearts_engine::model::score::ScoreBoard;
use hearts_engine::model::table::Table;
use hearts_engine::rules::TrickOutcome;
use hearts_players::render;
use tracing::{Level, event};

/// Text rendition of the table. One seat sits at the bottom with its hand
/// face up; everyone else shows a card count.
pub struct ConsolePresenter<W> {
    out: W,
    names: [String; 4],
    face_up: PlayerPosition,
    shown: Option<Vec<Card>>,
}

impl ConsolePresenter<io::Stdout> {
    pub fn stdout(names: [String; 4], face_up: PlayerPosition) -> Self {
        Self::new(io::stdout(), names, face_up)
    }
}

impl<W: Write + Send> ConsolePresenter<W> {
    pub fn new(out: W, names: [String; 4], face_up: PlayerPosition) -> Self {
        Self {
            out,
            names,
            face_up,
            shown: None,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn name(&self, seat: PlayerPosition) -> &str {
        &self.names[seat.index()]
    }

    fn emit(&mut self, line: &str) {
        if let Err(err) = writeln!(self.out, "{line}").and_then(|_| self.out.flush()) {
            event!(target: "hearts_table::presenter", Level::WARN, error = %err, "console write failed");
        }
    }
}

impl<W: Write + Send> Presenter for ConsolePresenter<W> {
    /// Redraws only when the face-up hand changed since the last drawing.
    fn hands(&mut self, table: &Table) {
        let face_up = table.hand(self.face_up).sorted();
        if self.shown.as_ref() == Some(&face_up) {
            return;
        }
        let lines: Vec<String> = PlayerPosition::LOOP
            .iter()
            .map(|&seat| {
                let hand = table.hand(seat);
                if seat == self.face_up {
                    format!("{}: {}", self.name(seat), render::cards(&face_up))
                } else {
                    format!("{}: {} cards", self.name(seat), hand.len())
                }
            })
            .collect();
        for line in lines {
            self.emit(&line);
        }
        self.shown = Some(face_up);
    }

    fn card_played(&mut self, seat: PlayerPosition, card: Card) {
        let line = format!("{} plays {}", self.name(seat), card.symbolic());
        self.emit(&line);
    }

    fn nametags(&mut self, names: &[String; 4], scores: &ScoreBoard, round_points: [u8; 4]) {
        let tags: Vec<String> = PlayerPosition::LOOP
            .iter()
            .map(|&seat| {
                format!(
                    "{} {} (+{})",
                    names[seat.index()],
                    scores.score(seat),
                    round_points[seat.index()]
                )
            })
            .collect();
        self.emit(&format!("Scores: {}", tags.join(" | ")));
    }

    fn trick_cleared(&mut self, outcome: &TrickOutcome) {
        let line = format!(
            "--- {} takes the trick ({} point{}) ---",
            self.name(outcome.winner),
            outcome.points,
            if outcome.points == 1 { "" } else { "s" }
        );
        self.emit(&line);
    }

    fn round_finished(&mut self, record: &RoundRecord) {
        if let Some(shooter) = record.moonshot {
            let line = format!(
                "{} shot the moon! Adding 26 to everyone else's score.",
                self.name(shooter)
            );
            self.emit(&line);
        }
        let totals: Vec<String> = PlayerPosition::LOOP
            .iter()
            .map(|&seat| format!("{} {}", self.name(seat), record.scores[seat.index()]))
            .collect();
        let line = format!("Round {} over, scores: {}", record.round, totals.join(", "));
        self.emit(&line);
    }

    fn status(&mut self, text: &str) {
        self.emit(text);
    }
}

#[cfg(test)]
mod tests {
    use super::ConsolePresenter;
    use hearts_engine::game::{Presenter, RoundRecord};
    use hearts_engine::model::card::Card;
    use hearts_engine::model::passing::PassingDirection;
    use hearts_engine::model::player::PlayerPosition;
    use hearts_engine::model::score::ScoreBoard;
    use hearts_engine::model::table::Table;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn presenter() -> ConsolePresenter<Vec<u8>> {
        let names = ["Rose", "Blanche", "Dorothy", "Sophia"].map(String::from);
        ConsolePresenter::new(Vec::new(), names, PlayerPosition::North)
    }

    fn output(presenter: ConsolePresenter<Vec<u8>>) -> String {
        String::from_utf8(presenter.into_inner()).unwrap()
    }

    #[test]
    fn prints_plays_and_nametags() {
        let mut p = presenter();
        let names = ["Rose", "Blanche", "Dorothy", "Sophia"].map(String::from);
        let scores = ScoreBoard::from_totals([10, 0, 26, 3]);
        p.nametags(&names, &scores, [0, 1, 0, 13]);
        p.card_played(PlayerPosition::East, Card::TWO_OF_CLUBS);
        p.status("Game over!");

        assert_eq!(
            output(p),
            "Scores: Rose 10 (+0) | Blanche 0 (+1) | Dorothy 26 (+0) | Sophia 3 (+13)\n\
             Blanche plays ♣2\n\
             Game over!\n"
        );
    }

    #[test]
    fn hands_redraw_only_on_change() {
        let mut table = Table::new();
        let mut rng = StdRng::seed_from_u64(3);
        for seat in PlayerPosition::LOOP {
            table.deal(13, seat, &mut rng).unwrap();
        }
        let mut p = presenter();
        p.hands(&table);
        p.hands(&table);
        let text = output(p);
        assert_eq!(text.lines().count(), 4);
        assert!(text.contains("Blanche: 13 cards"));
        assert!(text.starts_with("Rose: "));
    }

    #[test]
    fn announces_moonshots() {
        let mut p = presenter();
        p.round_finished(&RoundRecord {
            round: 4,
            passing_direction: PassingDirection::Across,
            tricks: Vec::new(),
            captured_points: [0, 0, 26, 0],
            moonshot: Some(PlayerPosition::South),
            deltas: [26, 26, 0, 26],
            scores: [40, 30, 12, 50],
        });
        let text = output(p);
        assert!(text.starts_with("Dorothy shot the moon!"));
        assert!(text.ends_with("Round 4 over, scores: Rose 40, Blanche 30, Dorothy 12, Sophia 50\n"));
    }
}
