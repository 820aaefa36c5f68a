//! Plain-text renderings of cards shared by the prompting strategies.

use hearts_engine::model::card::Card;
use hearts_engine::model::trick::Trick;

/// `♠Q, ♥2, ♦10`
pub fn cards(cards: &[Card]) -> String {
    cards
        .iter()
        .map(|card| card.symbolic())
        .collect::<Vec<_>>()
        .join(", ")
}

/// `[♠Q, ♥2]`
pub fn card_list(list: &[Card]) -> String {
    format!("[{}]", cards(list))
}

/// `Rose: ♣2, Blanche: ♣K`, or `nothing yet` for an empty trick.
pub fn trick(trick: &Trick, names: &[String; 4]) -> String {
    if trick.is_empty() {
        return "nothing yet".to_string();
    }
    trick
        .plays()
        .iter()
        .map(|play| format!("{}: {}", names[play.position.index()], play.card.symbolic()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// `Rose: [♥2, ♠Q], Blanche: []`
pub fn captured(piles: &[Vec<Card>; 4], names: &[String; 4]) -> String {
    names
        .iter()
        .zip(piles.iter())
        .map(|(name, pile)| format!("{name}: {}", card_list(pile)))
        .collect::<Vec<_>>()
        .join(", ")
}
