//! Session state held by the controller

use serde::Serialize;

use crate::domain::{DayPlan, Itinerary, StoryTheme, Storybook, TripDetails, User};

/// Which screen the session is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum View {
    /// Landing screen
    #[default]
    Home,
    /// Preference questionnaire
    Planner,
    /// Generated day-by-day plan
    Itinerary,
    /// One day, with story narration
    Details,
    /// Diary-style retelling of the trip
    Storybook,
}

impl View {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Planner => "planner",
            Self::Itinerary => "itinerary",
            Self::Details => "details",
            Self::Storybook => "storybook",
        }
    }
}

impl std::fmt::Display for View {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Last narrated story on the details screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryResult {
    pub poi: String,
    pub theme: StoryTheme,
    pub text: String,
}

/// Everything the front-end renders from
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub user: Option<User>,
    pub view: View,
    /// Login prompt is showing
    pub show_login: bool,
    /// Request behind the current itinerary
    pub trip_details: Option<TripDetails>,
    pub itinerary: Option<Itinerary>,
    pub storybook: Option<Storybook>,
    pub selected_day: Option<DayPlan>,
    pub story: Option<StoryResult>,
    /// User-facing message of the last failure
    pub error: Option<String>,
    /// An itinerary or storybook request is in flight
    pub loading: bool,
    /// Bumped on navigation that abandons in-flight requests
    pub generation: u64,
}

impl SessionState {
    pub fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }
}
