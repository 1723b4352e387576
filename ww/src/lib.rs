//! Wander Wise - AI trip planner
//!
//! A user answers a few preference questions, a generative model plans a
//! multi-day itinerary, and the trip can then be explored day by day with
//! narrated landmark stories or retold as an illustrated storybook.
//!
//! # Core Concepts
//!
//! - **One call per request**: every operation is a single stateless model call
//! - **Schema-constrained output**: structured answers are validated before use
//! - **Generic failures**: users see one message per operation, logs keep the cause
//! - **Stale-result guard**: navigation invalidates answers still in flight
//!
//! # Modules
//!
//! - [`domain`] - Trip, itinerary, storybook and user records
//! - [`prompts`] - Prompt templates and the reference travel guide
//! - [`schema`] - Response schemas and validation
//! - [`llm`] - LLM client trait and Gemini implementation
//! - [`gateway`] - Itinerary, story and storybook operations
//! - [`session`] - Session state and controller
//! - [`auth`] - Sign-in boundary
//! - [`narration`] - Narrator voices and speech errors
//! - [`repl`] - Interactive terminal session
//! - [`config`] - Configuration types and loading
//! - [`cli`] - Command-line interface

pub mod auth;
pub mod cli;
pub mod config;
pub mod domain;
pub mod export;
pub mod gateway;
pub mod llm;
pub mod narration;
pub mod prompts;
pub mod repl;
pub mod schema;
pub mod session;

// Re-export commonly used types
pub use config::{Config, LlmConfig};
pub use domain::{DayPlan, Itinerary, Preferences, StoryTheme, Storybook, TripDetails, User};
pub use gateway::{FailureKind, GatewayError, TripGateway};
pub use llm::{GeminiClient, GenerateRequest, GenerateResponse, LlmClient, LlmError};
pub use session::{SessionController, SessionState, View};
