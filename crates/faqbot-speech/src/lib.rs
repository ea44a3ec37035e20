//! Speech capabilities for faqbot.
//!
//! Trait-based abstractions for speech-to-text transcription and
//! text-to-speech synthesis, with HTTP implementations against
//! OpenAI-style audio endpoints and mocks for testing.

pub mod synth;
pub mod transcribe;

pub use synth::{HttpSynthesizer, MockSynthesizer, SpeechSynthesizer, SynthesisError};
pub use transcribe::{HttpTranscriber, MockTranscriber, Transcriber, TranscriptionFailure};
