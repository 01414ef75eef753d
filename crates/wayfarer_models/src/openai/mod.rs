//! OpenAI API clients: chat completions, Whisper transcription, image
//! generation.

mod chat;
mod images;
mod transcription;

pub use chat::OpenAiChatClient;
pub use images::OpenAiImageClient;
pub use transcription::WhisperClient;
