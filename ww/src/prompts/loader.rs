//! Prompt Loader
//!
//! Loads prompt templates from an override directory or falls back to embedded defaults.

use std::path::PathBuf;

use eyre::{Result, eyre};
use handlebars::Handlebars;
use serde::Serialize;
use tracing::{debug, info};

use super::embedded;
use super::reference::ReferenceGuide;
use crate::domain::{Itinerary, StoryTheme, TripDetails};

/// Context for the itinerary template
#[derive(Debug, Clone, Serialize)]
pub struct ItineraryContext<'a> {
    pub destination: &'a str,
    pub duration: &'a str,
    pub interests: &'a str,
    pub guide_title: &'a str,
    /// Rendered reference guide
    pub guide: String,
}

/// Context for the story template
#[derive(Debug, Clone, Serialize)]
pub struct StoryContext<'a> {
    pub poi: &'a str,
    pub theme: &'static str,
}

/// Context for the storybook template
#[derive(Debug, Clone, Serialize)]
pub struct StorybookContext<'a> {
    pub interests: &'a str,
    /// The itinerary as pretty-printed JSON
    pub itinerary_json: String,
}

/// Loads and renders prompt templates
pub struct PromptLoader {
    /// Handlebars template engine
    hbs: Handlebars<'static>,
    /// User override directory (e.g., `~/.config/wanderwise/prompts/`)
    override_dir: Option<PathBuf>,
}

impl PromptLoader {
    /// Create a loader that prefers `<dir>/<name>.hbs` over embedded templates
    pub fn new(override_dir: Option<PathBuf>) -> Self {
        let override_dir = override_dir.filter(|d| {
            let exists = d.is_dir();
            if !exists {
                debug!(dir = %d.display(), "PromptLoader::new: override dir missing, ignoring");
            }
            exists
        });

        Self {
            hbs: engine(),
            override_dir,
        }
    }

    /// Create a loader that only uses embedded prompts
    pub fn embedded_only() -> Self {
        Self {
            hbs: engine(),
            override_dir: None,
        }
    }

    /// Load a template by name
    ///
    /// Checks in order:
    /// 1. Override: `<dir>/{name}.hbs`
    /// 2. Embedded fallback
    fn load_template(&self, name: &str) -> Result<String> {
        if let Some(ref dir) = self.override_dir {
            let path = dir.join(format!("{}.hbs", name));
            if path.exists() {
                debug!("Loading prompt from override: {:?}", path);
                return std::fs::read_to_string(&path)
                    .map_err(|e| eyre!("Failed to read prompt override {}: {}", path.display(), e));
            }
        }

        if let Some(content) = embedded::get_embedded(name) {
            debug!("Using embedded prompt: {}", name);
            return Ok(content.to_string());
        }

        Err(eyre!("Prompt template not found: {}", name))
    }

    /// Render a template with the given context
    pub fn render<T: Serialize>(&self, template_name: &str, context: &T) -> Result<String> {
        let template = self.load_template(template_name)?;
        info!("Rendering template '{}'", template_name);

        self.hbs
            .render_template(&template, context)
            .map_err(|e| eyre!("Failed to render template {}: {}", template_name, e))
    }

    /// Planner prompt for a trip request
    ///
    /// Trip details are passed through as given, empty fields included.
    pub fn itinerary_prompt(&self, details: &TripDetails, guide: &ReferenceGuide) -> Result<String> {
        debug!(destination = %details.destination, duration = %details.duration, "itinerary_prompt: called");
        let ctx = ItineraryContext {
            destination: &details.destination,
            duration: &details.duration,
            interests: &details.interests,
            guide_title: &guide.title,
            guide: guide.render(),
        };
        self.render("itinerary", &ctx)
    }

    /// Audio-guide story prompt for a landmark
    pub fn story_prompt(&self, poi: &str, theme: StoryTheme) -> Result<String> {
        debug!(%poi, %theme, "story_prompt: called");
        self.render("story", &StoryContext { poi, theme: theme.name() })
    }

    /// Storybook prompt embedding the full itinerary
    pub fn storybook_prompt(&self, itinerary: &Itinerary, details: &TripDetails) -> Result<String> {
        debug!(trip_title = %itinerary.trip_title, days = itinerary.days.len(), "storybook_prompt: called");
        let itinerary_json = serde_json::to_string_pretty(itinerary)?;
        let ctx = StorybookContext {
            interests: &details.interests,
            itinerary_json,
        };
        self.render("storybook", &ctx)
    }
}

impl Default for PromptLoader {
    fn default() -> Self {
        Self::embedded_only()
    }
}

/// Prompts are plain text, so HTML escaping is turned off
fn engine() -> Handlebars<'static> {
    let mut hbs = Handlebars::new();
    hbs.register_escape_fn(handlebars::no_escape);
    hbs
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn goa_details() -> TripDetails {
        TripDetails::new(
            "Goa",
            "5 days",
            "Primary interest is Beach's and Tropical Regions. Prefers Local Cuisines and enjoys Peaceful and calm places.",
        )
    }

    fn sample_itinerary() -> Itinerary {
        serde_json::from_value(serde_json::json!({
            "tripTitle": "Coastal Goa",
            "bestTimeToVisit": "November to February",
            "days": [{
                "day": 1,
                "title": "Beaches of the North",
                "dayImage": "https://example.com/baga.jpg",
                "coords": { "lat": 15.5553, "lng": 73.7517 },
                "activities": [{ "time": "Morning", "description": "Swim at Baga" }],
                "foodSuggestion": { "name": "Fish Curry Rice", "description": "Tangy", "imageUrl": "" }
            }]
        }))
        .unwrap()
    }

    #[test]
    fn test_itinerary_prompt_includes_details_verbatim() {
        let loader = PromptLoader::embedded_only();
        let guide = ReferenceGuide::embedded().unwrap();
        let prompt = loader.itinerary_prompt(&goa_details(), &guide).unwrap();

        assert!(prompt.contains("- Destination: Goa"));
        assert!(prompt.contains("- Duration: 5 days"));
        // No HTML escaping of the apostrophe
        assert!(prompt.contains("Beach's and Tropical Regions"));
        assert!(prompt.contains("**CONTEXT: MAHARASHTRA TRAVEL GUIDE**"));
        assert!(prompt.contains("Gateway of India (Lat: 18.9220, Lng: 72.8347)"));
        assert!(prompt.contains("DO NOT provide an imageUrl"));
    }

    #[test]
    fn test_itinerary_prompt_passes_empty_details() {
        let loader = PromptLoader::embedded_only();
        let guide = ReferenceGuide::embedded().unwrap();
        let prompt = loader
            .itinerary_prompt(&TripDetails::new("", "", ""), &guide)
            .unwrap();
        assert!(prompt.contains("- Destination: \n"));
    }

    #[test]
    fn test_story_prompt() {
        let loader = PromptLoader::embedded_only();
        let prompt = loader
            .story_prompt("Gateway of India", StoryTheme::LocalFolklore)
            .unwrap();
        assert!(prompt.contains("Landmark: Gateway of India"));
        assert!(prompt.contains("Story Theme: Local Folklore"));
        assert!(prompt.contains("150 words"));
    }

    #[test]
    fn test_storybook_prompt_embeds_pretty_json() {
        let loader = PromptLoader::embedded_only();
        let prompt = loader
            .storybook_prompt(&sample_itinerary(), &goa_details())
            .unwrap();
        assert!(prompt.contains("- Main Interest: Primary interest is Beach's"));
        assert!(prompt.contains("\"tripTitle\": \"Coastal Goa\""));
        assert!(prompt.contains("\"dayImage\": \"https://example.com/baga.jpg\""));
    }

    #[test]
    fn test_override_dir_takes_precedence() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("story.hbs"), "Tell a {{theme}} tale of {{poi}}.").unwrap();

        let loader = PromptLoader::new(Some(dir.path().to_path_buf()));
        let prompt = loader.story_prompt("Shaniwar Wada", StoryTheme::Historical).unwrap();
        assert_eq!(prompt, "Tell a Historical tale of Shaniwar Wada.");

        // Templates without an override still come from the embedded set
        let guide = ReferenceGuide::embedded().unwrap();
        assert!(loader.itinerary_prompt(&goa_details(), &guide).unwrap().contains("Wander Wise"));
    }

    #[test]
    fn test_missing_override_dir_is_ignored() {
        let loader = PromptLoader::new(Some(PathBuf::from("/nonexistent/prompts")));
        assert!(loader.override_dir.is_none());
        assert!(loader.story_prompt("Marine Drive", StoryTheme::Mythological).is_ok());
    }

    #[test]
    fn test_unknown_template() {
        let loader = PromptLoader::embedded_only();
        assert!(loader.load_template("nonexistent-template").is_err());
    }
}
