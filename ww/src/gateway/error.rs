//! Gateway error types

use thiserror::Error;

use crate::domain::StoryTheme;
use crate::llm::LlmError;
use crate::schema::SchemaViolation;

/// What went wrong underneath a gateway failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The prompt could not be built
    Prompt,
    /// Transport or service-side failure
    Service,
    /// Response was not valid JSON for the expected record
    Parse,
    /// Response was JSON but did not match the response schema
    Schema,
    /// Service answered with no text
    Empty,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Prompt => "prompt",
            Self::Service => "service",
            Self::Parse => "parse",
            Self::Schema => "schema",
            Self::Empty => "empty",
        };
        write!(f, "{}", s)
    }
}

/// Gateway failures
///
/// Display is the message shown to the user. The underlying detail is kept
/// for logs only.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Failed to communicate with the AI planner. The itinerary could not be generated.")]
    Itinerary { kind: FailureKind, detail: String },

    #[error("Failed to generate a {theme} story. Please try again.")]
    Story {
        theme: StoryTheme,
        kind: FailureKind,
        detail: String,
    },

    #[error("Failed to create your trip storybook. The AI storyteller might be busy dreaming up other adventures.")]
    Storybook { kind: FailureKind, detail: String },
}

impl GatewayError {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Itinerary { kind, .. } | Self::Story { kind, .. } | Self::Storybook { kind, .. } => *kind,
        }
    }

    /// Underlying cause, for logs
    pub fn detail(&self) -> &str {
        match self {
            Self::Itinerary { detail, .. } | Self::Story { detail, .. } | Self::Storybook { detail, .. } => detail,
        }
    }
}

/// Failure inside a gateway operation before it is mapped to a user message
#[derive(Debug)]
pub(crate) struct Failure {
    pub kind: FailureKind,
    pub detail: String,
}

impl Failure {
    pub fn new(kind: FailureKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }

    pub fn schema(violations: &[SchemaViolation]) -> Self {
        let detail = violations.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ");
        Self::new(FailureKind::Schema, detail)
    }
}

impl From<LlmError> for Failure {
    fn from(err: LlmError) -> Self {
        Self::new(FailureKind::Service, err.to_string())
    }
}
