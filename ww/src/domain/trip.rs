//! Trip request types and the preference questionnaire

use serde::{Deserialize, Serialize};
use tracing::debug;

/// What the user asked for - fed verbatim into the itinerary prompt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripDetails {
    pub destination: String,
    pub duration: String,
    pub interests: String,
}

impl TripDetails {
    pub fn new(destination: impl Into<String>, duration: impl Into<String>, interests: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
            duration: duration.into(),
            interests: interests.into(),
        }
    }
}

/// One question of the planner flow
#[derive(Debug, Clone, Copy)]
pub struct Question {
    /// Preference slot this question fills
    pub key: &'static str,
    pub prompt: &'static str,
    pub options: &'static [&'static str],
}

/// The planner questions, asked in order before the duration
pub const QUESTIONS: [Question; 4] = [
    Question {
        key: "state",
        prompt: "Which state would you like to visit?",
        options: &["Maharashtra", "Goa"],
    },
    Question {
        key: "interest",
        prompt: "What Would You Prefer?",
        options: &[
            "Historical Sites",
            "Modern Cities",
            "Natural Beauty",
            "Beach's and Tropical Regions",
            "Religious Places",
        ],
    },
    Question {
        key: "cuisine",
        prompt: "Which Types of Cuisines Would You Prefer?",
        options: &["Local Cuisines", "Others"],
    },
    Question {
        key: "vibe",
        prompt: "What is your ideal vibe?",
        options: &["Crowded Places", "Peaceful and calm places"],
    },
];

/// Answers collected by the planner flow
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preferences {
    pub state: String,
    pub interest: String,
    pub cuisine: String,
    pub vibe: String,
    /// Number of days as typed by the user
    pub duration: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            state: String::new(),
            interest: String::new(),
            cuisine: String::new(),
            vibe: String::new(),
            duration: "7".to_string(),
        }
    }
}

impl Preferences {
    /// Store an answer under the question key. Unknown keys are ignored.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        debug!(%key, %value, "Preferences::set: called");
        match key {
            "state" => self.state = value,
            "interest" => self.interest = value,
            "cuisine" => self.cuisine = value,
            "vibe" => self.vibe = value,
            "duration" => self.duration = value,
            _ => debug!(%key, "Preferences::set: unknown key"),
        }
    }

    /// Fold the answers into the request sent to the planner
    pub fn to_trip_details(&self) -> TripDetails {
        TripDetails {
            destination: self.state.clone(),
            duration: format!("{} days", self.duration),
            interests: format!(
                "Primary interest is {}. Prefers {} and enjoys {}.",
                self.interest, self.cuisine, self.vibe
            ),
        }
    }
}

/// Narrative flavor for a landmark story
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoryTheme {
    Historical,
    #[serde(rename = "Local Folklore")]
    LocalFolklore,
    Mythological,
}

impl StoryTheme {
    pub const ALL: [StoryTheme; 3] = [Self::Historical, Self::LocalFolklore, Self::Mythological];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Historical => "Historical",
            Self::LocalFolklore => "Local Folklore",
            Self::Mythological => "Mythological",
        }
    }

    /// Short blurb shown next to the theme
    pub fn blurb(&self) -> &'static str {
        match self {
            Self::Historical => "Uncover the factual past.",
            Self::LocalFolklore => "Hear tales passed down generations.",
            Self::Mythological => "Explore legends and deities.",
        }
    }
}

impl std::fmt::Display for StoryTheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for StoryTheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', '_'], " ").as_str() {
            "historical" | "history" => Ok(Self::Historical),
            "local folklore" | "folklore" => Ok(Self::LocalFolklore),
            "mythological" | "mythology" | "myth" => Ok(Self::Mythological),
            _ => Err(format!(
                "Unknown story theme: {}. Use: Historical, Local Folklore, or Mythological",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_goa_preferences_to_trip_details() {
        let mut prefs = Preferences::default();
        prefs.set("state", "Goa");
        prefs.set("interest", "Beach's and Tropical Regions");
        prefs.set("cuisine", "Local Cuisines");
        prefs.set("vibe", "Peaceful and calm places");
        prefs.set("duration", "5");

        let details = prefs.to_trip_details();
        assert_eq!(details.destination, "Goa");
        assert_eq!(details.duration, "5 days");
        assert_eq!(
            details.interests,
            "Primary interest is Beach's and Tropical Regions. Prefers Local Cuisines and enjoys Peaceful and calm places."
        );
    }

    #[test]
    fn test_default_duration_is_seven() {
        let details = Preferences::default().to_trip_details();
        assert_eq!(details.duration, "7 days");
    }

    #[test]
    fn test_empty_answers_pass_through() {
        let details = Preferences {
            duration: String::new(),
            ..Default::default()
        }
        .to_trip_details();
        assert_eq!(details.destination, "");
        assert_eq!(details.duration, " days");
    }

    #[test]
    fn test_questions_cover_every_preference_slot() {
        let keys: Vec<_> = QUESTIONS.iter().map(|q| q.key).collect();
        assert_eq!(keys, vec!["state", "interest", "cuisine", "vibe"]);
        assert!(QUESTIONS.iter().all(|q| !q.options.is_empty()));
    }

    #[test]
    fn test_story_theme_from_str() {
        assert_eq!("Historical".parse::<StoryTheme>(), Ok(StoryTheme::Historical));
        assert_eq!("local-folklore".parse::<StoryTheme>(), Ok(StoryTheme::LocalFolklore));
        assert_eq!("Local Folklore".parse::<StoryTheme>(), Ok(StoryTheme::LocalFolklore));
        assert_eq!("myth".parse::<StoryTheme>(), Ok(StoryTheme::Mythological));
        assert!("sci-fi".parse::<StoryTheme>().is_err());
    }

    #[test]
    fn test_story_theme_serde_names() {
        let json = serde_json::to_string(&StoryTheme::LocalFolklore).unwrap();
        assert_eq!(json, "\"Local Folklore\"");
        assert_eq!(StoryTheme::LocalFolklore.to_string(), "Local Folklore");
    }
}
