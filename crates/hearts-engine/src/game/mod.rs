pub mod config;
pub mod history;
pub mod presenter;
pub mod session;
pub mod strategy;

pub use config::{MatchConfig, SeatingError};
pub use history::{MatchOutcome, RoundRecord, TrickRecord};
pub use presenter::{NullPresenter, Presenter};
pub use session::{Game, GameError};
pub use strategy::{PassContext, PlayContext, Strategy, StrategyError};
