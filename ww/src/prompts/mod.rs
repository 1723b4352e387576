//! Prompt building
//!
//! Handlebars templates (embedded, overridable from a directory) plus the
//! reference travel dataset that grounds the itinerary prompt.

mod embedded;
mod loader;
mod reference;

pub use loader::{ItineraryContext, PromptLoader, StoryContext, StorybookContext};
pub use reference::{Attraction, Destination, EMBEDDED_GUIDE, ReferenceGuide};
