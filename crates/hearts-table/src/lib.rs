pub mod config;
pub mod logging;
pub mod presenter;
pub mod seating;
