//! Text-to-speech over the Google Translate TTS endpoint.

pub mod chunk;
pub mod client;

pub use client::{GoogleTts, SpeechSynthesizer, TtsError};
