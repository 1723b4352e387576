//! Domain types for trip planning
//!
//! Value records exchanged with the generative model and held by the session.
//! JSON field names follow the model's camelCase wire format.

mod itinerary;
mod storybook;
mod trip;
mod user;

pub use itinerary::{
    Activity, Coords, DailyForecast, DayPlan, FoodSuggestion, Itinerary, NearbySuggestion, WeatherForecast,
    WeatherIcon,
};
pub use storybook::{Storybook, StorybookPage};
pub use trip::{Preferences, QUESTIONS, Question, StoryTheme, TripDetails};
pub use user::User;
