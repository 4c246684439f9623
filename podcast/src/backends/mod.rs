//! Vendor adapters for the service seams in [`crate::service`].

mod minimax;
mod openai;
mod scrape;

pub use self::minimax::MinimaxSpeech;
pub use self::openai::OpenAiChat;
