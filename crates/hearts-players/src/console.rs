use async_trait::async_trait;
use hearts_engine::game::{PassContext, PlayContext, Strategy, StrategyError};
use hearts_engine::model::card::{Card, parse_card_list};
use hearts_engine::model::passing::validate_pass;
use tokio::io::{
    self, AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Lines, Stdin,
    Stdout,
};

use crate::render;

/// A person at the keyboard. Prompts until the reply names a valid choice.
pub struct ConsolePlayer<R, W> {
    lines: Lines<R>,
    out: W,
}

impl ConsolePlayer<BufReader<Stdin>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(BufReader::new(io::stdin()), io::stdout())
    }
}

impl<R, W> ConsolePlayer<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(reader: R, out: W) -> Self {
        Self {
            lines: reader.lines(),
            out,
        }
    }

    pub fn into_output(self) -> W {
        self.out
    }

    async fn ask(&mut self, prompt: &str) -> Result<String, StrategyError> {
        self.out.write_all(prompt.as_bytes()).await?;
        self.out.write_all(b" ").await?;
        self.out.flush().await?;
        self.lines
            .next_line()
            .await?
            .ok_or(StrategyError::InputClosed)
    }

    async fn complain(&mut self, reason: &str) -> Result<(), StrategyError> {
        let message = format!("That didn't work ({reason}), try again...\n");
        self.out.write_all(message.as_bytes()).await?;
        Ok(())
    }
}

#[async_trait]
impl<R, W> Strategy for ConsolePlayer<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn pass_three_cards(&mut self, ctx: PassContext<'_>) -> Result<[Card; 3], StrategyError> {
        let prompt = format!(
            "Passing three cards to {}. Your hand is {}. List cards to pass like '♦10,♣2,♥A':",
            ctx.recipient_name,
            render::card_list(&ctx.hand.sorted()),
        );
        loop {
            let reply = self.ask(&prompt).await?;
            let outcome = parse_card_list(&reply)
                .map_err(|err| err.to_string())
                .and_then(|cards| validate_pass(ctx.hand, &cards).map_err(|err| err.to_string()));
            match outcome {
                Ok(cards) => return Ok(cards),
                Err(reason) => self.complain(&reason).await?,
            }
        }
    }

    async fn select_card_for_trick(&mut self, ctx: PlayContext<'_>) -> Result<Card, StrategyError> {
        let prompt = format!(
            "It's your turn to play the trick. Your hand is {}. Cards you can legally play: {}. Trick so far: {}. Select a card to play like '♣J':",
            render::card_list(&ctx.hand.sorted()),
            render::card_list(ctx.legal),
            render::trick(ctx.trick, ctx.names),
        );
        loop {
            let reply = self.ask(&prompt).await?;
            match reply.parse::<Card>() {
                Ok(card) if ctx.legal.contains(&card) => return Ok(card),
                Ok(card) => self.complain(&format!("{} is not a legal play", card.symbolic())).await?,
                Err(err) => self.complain(&err.to_string()).await?,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ConsolePlayer;
    use hearts_engine::game::{PassContext, PlayContext, Strategy, StrategyError};
    use hearts_engine::model::card::Card;
    use hearts_engine::model::hand::Hand;
    use hearts_engine::model::player::PlayerPosition;
    use hearts_engine::model::rank::Rank;
    use hearts_engine::model::suit::Suit;
    use hearts_engine::model::trick::Trick;
    use tokio::io::BufReader;

    fn hand() -> Hand {
        Hand::with_cards(vec![
            Card::new(Rank::Ten, Suit::Diamonds),
            Card::TWO_OF_CLUBS,
            Card::new(Rank::Ace, Suit::Hearts),
            Card::new(Rank::Five, Suit::Spades),
        ])
    }

    fn names() -> [String; 4] {
        ["Rose", "Blanche", "Dorothy", "Sophia"].map(String::from)
    }

    fn pass_ctx(hand: &Hand) -> PassContext<'_> {
        PassContext {
            seat: PlayerPosition::North,
            name: "Rose",
            hand,
            recipient: PlayerPosition::East,
            recipient_name: "Blanche",
            round_number: 0,
        }
    }

    #[tokio::test]
    async fn retries_until_pass_is_valid() {
        let input: &[u8] = "♦10,♦10,♥A\n♦10,♣2,♠K\n♦10, ♣2, ♥A\n".as_bytes();
        let mut player = ConsolePlayer::new(BufReader::new(input), Vec::new());
        let hand = hand();

        let passed = player.pass_three_cards(pass_ctx(&hand)).await.unwrap();
        assert_eq!(
            passed,
            [
                Card::new(Rank::Ten, Suit::Diamonds),
                Card::TWO_OF_CLUBS,
                Card::new(Rank::Ace, Suit::Hearts),
            ]
        );

        let transcript = String::from_utf8(player.into_output()).unwrap();
        assert!(transcript.contains("Passing three cards to Blanche"));
        assert_eq!(transcript.matches("That didn't work").count(), 2);
    }

    #[tokio::test]
    async fn rejects_illegal_then_accepts_legal_card() {
        let input: &[u8] = "banana\n♥A\n♣2\n".as_bytes();
        let mut player = ConsolePlayer::new(BufReader::new(input), Vec::new());
        let hand = hand();
        let names = names();
        let piles: [Vec<Card>; 4] = Default::default();
        let trick = Trick::new(PlayerPosition::North);
        let legal = [Card::TWO_OF_CLUBS];

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

        let transcript = String::from_utf8(player.into_output()).unwrap();
        assert!(transcript.contains("♥A is not a legal play"));
        assert!(transcript.contains("Trick so far: nothing yet"));
    }

    #[tokio::test]
    async fn closed_input_is_an_error() {
        let input: &[u8] = b"";
        let mut player = ConsolePlayer::new(BufReader::new(input), Vec::new());
        let hand = hand();
        let err = player.pass_three_cards(pass_ctx(&hand)).await.unwrap_err();
        assert!(matches!(err, StrategyError::InputClosed));
    }
}
