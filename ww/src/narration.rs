//! Speech boundary for story narration
//!
//! Voice selection and speech error mapping. Actual synthesis lives behind
//! the [`Narrator`] trait; the terminal front-end uses [`TerminalNarrator`],
//! which prints instead of speaking.

use std::io::Write;

use thiserror::Error;
use tracing::{debug, warn};

/// A synthesis voice offered by the platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Voice {
    pub name: String,
    /// BCP 47 tag, e.g. `en-IN`
    pub lang: String,
}

impl Voice {
    pub fn new(name: impl Into<String>, lang: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lang: lang.into(),
        }
    }

    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.lang)
    }
}

/// Keep English and Hindi voices, in their original order
pub fn select_voices(available: &[Voice]) -> Vec<Voice> {
    let voices: Vec<Voice> = available
        .iter()
        .filter(|v| v.lang.starts_with("en") || v.lang.starts_with("hi"))
        .cloned()
        .collect();
    debug!(available = available.len(), kept = voices.len(), "select_voices: done");
    voices
}

/// Speech failures, displayed as the message shown to the user
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SpeechError {
    #[error("No narrator voice is selected. Please choose one from the list.")]
    NoVoiceSelected,

    #[error("A network error occurred while generating speech. Please check your connection.")]
    Network,

    #[error("The speech synthesis failed. Try a different voice or refresh the page.")]
    SynthesisFailed,

    #[error("The selected narrator voice is unavailable. Please choose another one.")]
    VoiceUnavailable,

    #[error("Sorry, an audio playback error occurred.")]
    Other(String),
}

impl SpeechError {
    /// Map a platform speech error code
    pub fn from_code(code: &str) -> Self {
        match code {
            "network" => Self::Network,
            "synthesis-failed" => Self::SynthesisFailed,
            "voice-unavailable" => Self::VoiceUnavailable,
            other => Self::Other(other.to_string()),
        }
    }
}

/// Voice list plus the current choice
#[derive(Debug, Clone, Default)]
pub struct VoicePicker {
    voices: Vec<Voice>,
    selected: Option<usize>,
}

impl VoicePicker {
    /// Filter the platform voices; the first kept voice is preselected
    pub fn new(available: &[Voice]) -> Self {
        let voices = select_voices(available);
        let selected = if voices.is_empty() { None } else { Some(0) };
        Self { voices, selected }
    }

    pub fn voices(&self) -> &[Voice] {
        &self.voices
    }

    pub fn selected(&self) -> Option<&Voice> {
        self.selected.and_then(|i| self.voices.get(i))
    }

    /// Select by exact name; unknown names leave the choice unchanged
    pub fn select(&mut self, name: &str) -> bool {
        match self.voices.iter().position(|v| v.name == name) {
            Some(i) => {
                self.selected = Some(i);
                true
            }
            None => false,
        }
    }

    /// Voice to speak with, or the "no voice" error
    pub fn require(&self) -> Result<&Voice, SpeechError> {
        self.selected().ok_or(SpeechError::NoVoiceSelected)
    }
}

/// Something that can read text aloud
pub trait Narrator {
    /// Voices the platform offers
    fn available_voices(&self) -> Vec<Voice>;

    fn speak(&mut self, text: &str, voice: &Voice) -> Result<(), SpeechError>;
}

/// Narrator that writes the story to a terminal
pub struct TerminalNarrator<W: Write> {
    out: W,
}

impl<W: Write> TerminalNarrator<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> Narrator for TerminalNarrator<W> {
    fn available_voices(&self) -> Vec<Voice> {
        vec![Voice::new("Terminal", "en-IN")]
    }

    fn speak(&mut self, text: &str, voice: &Voice) -> Result<(), SpeechError> {
        debug!(voice = %voice.name, chars = text.len(), "TerminalNarrator::speak: called");
        writeln!(self.out, "[{}] {}", voice.label(), text).map_err(|e| {
            warn!(error = %e, "TerminalNarrator::speak: write failed");
            SpeechError::from_code("write-failed")
        })
    }
}
