use crate::model::player::PlayerPosition;
use std::collections::HashSet;
use thiserror::Error;

/// Seating and deal seed for one match. Name `i` sits at seat `i`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchConfig {
    names: [String; 4],
    seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeatingError {
    #[error("exactly 4 players are required, got {0}")]
    WrongCount(usize),
    #[error("player names must not be empty")]
    BlankName,
    #[error("player name '{0}' is used more than once")]
    DuplicateName(String),
}

impl MatchConfig {
    pub fn new<I, S>(names: I, seed: Option<u64>) -> Result<Self, SeatingError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let collected: Vec<String> = names.into_iter().map(Into::into).collect();
        let names: [String; 4] = collected
            .try_into()
            .map_err(|rest: Vec<String>| SeatingError::WrongCount(rest.len()))?;

        let mut seen = HashSet::new();
        for name in &names {
            if name.trim().is_empty() {
                return Err(SeatingError::BlankName);
            }
            if !seen.insert(name.as_str()) {
                return Err(SeatingError::DuplicateName(name.clone()));
            }
        }
        Ok(Self { names, seed })
    }

    pub fn names(&self) -> &[String; 4] {
        &self.names
    }

    pub fn name(&self, seat: PlayerPosition) -> &str {
        &self.names[seat.index()]
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::{MatchConfig, SeatingError};
    use crate::model::player::PlayerPosition;

    #[test]
    fn seats_follow_name_order() {
        let config = MatchConfig::new(["Rose", "Blanche", "Dorothy", "Sophia"], Some(3)).unwrap();
        assert_eq!(config.name(PlayerPosition::North), "Rose");
        assert_eq!(config.name(PlayerPosition::West), "Sophia");
        assert_eq!(config.seed(), Some(3));
    }

    #[test]
    fn rejects_wrong_player_count() {
        assert_eq!(
            MatchConfig::new(["a", "b", "c"], None),
            Err(SeatingError::WrongCount(3))
        );
    }

    #[test]
    fn rejects_duplicate_and_blank_names() {
        assert_eq!(
            MatchConfig::new(["a", "b", "a", "d"], None),
            Err(SeatingError::DuplicateName("a".to_string()))
        );
        assert_eq!(
            MatchConfig::new(["a", " ", "c", "d"], None),
            Err(SeatingError::BlankName)
        );
    }
}
