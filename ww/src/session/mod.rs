//! Application session: state plus the controller that drives it

mod controller;
mod state;

pub use controller::{RequestKind, SessionController, StoryJob, StorybookJob, Ticket};
pub use state::{SessionState, StoryResult, View};
