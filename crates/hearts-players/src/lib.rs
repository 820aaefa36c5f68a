pub mod cautious;
pub mod console;
pub mod pacing;
pub mod render;
pub mod shared;
pub mod textgen;

pub use cautious::CautiousPlayer;
pub use console::ConsolePlayer;
pub use pacing::Paced;
pub use shared::Shared;
pub use textgen::{OpenAiClient, TextGenError, TextGenPlayer, TextGenerator, clean_reply};
